//! 전체 워크플로우.

use crate::config::OhlcFetchConfig;
use crate::modules::{
    build_dwd_fund_ohlc, fetch_ods_fund_ohlc, load_dwd_fund_info, load_ods_stock_full,
};
use crate::{JobStats, Result};
use warehouse_data::{KlineProvider, SymbolListProvider, WarehouseTables};

/// 단계 이름과 통계
pub type StepResult = (&'static str, JobStats);

/// 펀드 기본정보 → 펀드 일봉 수집 → 일봉 정규화 → 종목 목록 순으로 실행합니다.
///
/// 한 단계라도 실패하면 이후 단계는 실행하지 않습니다.
pub async fn run_all(
    tables: &dyn WarehouseTables,
    symbols: &dyn SymbolListProvider,
    klines: &dyn KlineProvider,
    config: &OhlcFetchConfig,
) -> Result<Vec<StepResult>> {
    let mut results = Vec::with_capacity(4);

    tracing::info!("=== 전체 워크플로우 시작 ===");

    tracing::info!("Step 1/4: 펀드 기본정보");
    let stats = load_dwd_fund_info(tables, symbols).await?;
    stats.log_summary("펀드 기본정보");
    results.push(("dwd-fund-info", stats));

    tracing::info!("Step 2/4: 펀드 일봉 수집");
    let stats = fetch_ods_fund_ohlc(tables, klines, config, None).await?;
    stats.log_summary("펀드 일봉 수집");
    results.push(("ods-fund-ohlc", stats));

    tracing::info!("Step 3/4: 펀드 일봉 정규화");
    let stats = build_dwd_fund_ohlc(tables).await?;
    stats.log_summary("펀드 일봉 정규화");
    results.push(("dwd-fund-ohlc", stats));

    tracing::info!("Step 4/4: 종목 목록");
    let stats = load_ods_stock_full(tables, symbols).await?;
    stats.log_summary("종목 목록");
    results.push(("ods-stock-full", stats));

    tracing::info!("=== 전체 워크플로우 완료 ===");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::{FakeKlines, FakeSymbols, FakeTables};
    use warehouse_core::MarketCode;

    fn fetch_config() -> OhlcFetchConfig {
        OhlcFetchConfig {
            request_delay_ms: 10,
            adjust: 0,
            start_date: "20240101".to_string(),
            end_date: "20241231".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_all_chains_steps() {
        let tables = FakeTables::default();
        let symbols =
            FakeSymbols::with_funds(&[(MarketCode::Sh, "510300"), (MarketCode::Sz, "159919")]);
        let klines = FakeKlines::new(&[("510300", 2), ("159919", 1)]);

        let results = run_all(&tables, &symbols, &klines, &fetch_config())
            .await
            .unwrap();

        let names: Vec<&str> = results.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["dwd-fund-info", "ods-fund-ohlc", "dwd-fund-ohlc", "ods-stock-full"]
        );

        // 수집한 일봉이 방금 적재한 펀드 기본정보와 매칭되어야 함
        let rows = tables.dwd_rows();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().any(|r| r.full_code == "SZ.159919"));
        assert_eq!(results[2].1.skipped, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_all_stops_on_failure() {
        let tables = FakeTables::default();
        let symbols = FakeSymbols {
            fail: true,
            ..Default::default()
        };
        let klines = FakeKlines::default();

        assert!(run_all(&tables, &symbols, &klines, &fetch_config())
            .await
            .is_err());
        assert_eq!(tables.replace_calls("dwd_ohlc_fund_incr_daily"), 0);
    }
}
