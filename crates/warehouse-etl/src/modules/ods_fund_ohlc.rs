//! 펀드 일봉 원천 수집 모듈.

use crate::config::OhlcFetchConfig;
use crate::{JobStats, Result};
use std::time::Instant;
use tracing::Instrument;
use warehouse_core::{job_span, AssetCode, CoreResult, OdsFundBar};
use warehouse_data::storage::schema::ODS_OHLC_FUND_INCR_EFINANCE_DAILY;
use warehouse_data::{KlineProvider, WarehouseTables};

/// 펀드별 일봉을 조회하여 ods 테이블을 교체합니다.
///
/// `codes`가 없으면 `dwd_info_fund_full`의 전체 펀드를 대상으로 합니다.
/// 종목 단위 실패는 집계만 하고 계속 진행합니다.
pub async fn fetch_ods_fund_ohlc(
    tables: &dyn WarehouseTables,
    provider: &dyn KlineProvider,
    config: &OhlcFetchConfig,
    codes: Option<String>,
) -> Result<JobStats> {
    run(tables, provider, config, codes)
        .instrument(job_span!(
            "ods_fund_ohlc",
            ODS_OHLC_FUND_INCR_EFINANCE_DAILY.name,
            provider.name()
        ))
        .await
}

async fn run(
    tables: &dyn WarehouseTables,
    provider: &dyn KlineProvider,
    config: &OhlcFetchConfig,
    codes: Option<String>,
) -> Result<JobStats> {
    let start = Instant::now();
    let mut stats = JobStats::new();

    let range = config.range()?;
    let adjustment = config.adjustment()?;

    let targets = match codes {
        Some(list) => {
            let targets = parse_code_list(&list)?;
            tracing::info!(count = targets.len(), "특정 펀드 수집");
            targets
        }
        None => {
            let targets = tables.load_fund_codes().await?;
            tracing::info!(count = targets.len(), "펀드 기본정보 조회 완료");
            targets
        }
    };

    if targets.is_empty() {
        tracing::warn!("수집할 펀드가 없습니다");
        stats.elapsed = start.elapsed();
        return Ok(stats);
    }

    tracing::info!(
        begin = %range.begin_str(),
        end = %range.end_str(),
        adj_code = adjustment.code(),
        delay_ms = config.request_delay_ms,
        "일봉 수집 시작"
    );

    let mut bars: Vec<OdsFundBar> = Vec::new();

    for (idx, code) in targets.iter().enumerate() {
        if idx > 0 {
            tokio::time::sleep(config.request_delay()).await;
        }

        tracing::debug!(
            code = %code,
            progress = format!("{}/{}", idx + 1, targets.len()),
            "일봉 조회"
        );

        match provider.fetch_daily_bars(code, &range, adjustment).await {
            Ok(fetched) if !fetched.is_empty() => {
                tracing::debug!(code = %code, bars = fetched.len(), "조회 완료");
                bars.extend(fetched);
            }
            Ok(_) => {
                stats.empty += 1;
                tracing::debug!(code = %code, "데이터 없음");
            }
            Err(e) => {
                stats.errors += 1;
                tracing::error!(code = %code, error = %e, "일봉 조회 실패");
            }
        }
    }

    stats.source_rows = bars.len();

    if bars.is_empty() {
        tracing::warn!("수집된 일봉이 없어 기존 테이블을 유지합니다");
        stats.elapsed = start.elapsed();
        return Ok(stats);
    }

    stats.written_rows = tables.replace_ods_fund_bars(&bars).await?;
    stats.elapsed = start.elapsed();
    Ok(stats)
}

/// 쉼표로 구분된 코드 목록을 파싱합니다.
///
/// `SH.510300` 형식은 그대로, `510300` 형식은 코드 앞자리로 거래소를 추정합니다.
pub fn parse_code_list(list: &str) -> CoreResult<Vec<AssetCode>> {
    let mut codes: Vec<AssetCode> = Vec::new();
    for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let code = if token.contains('.') {
            AssetCode::from_full_code(token)?
        } else {
            AssetCode::from_cn_code(token)?
        };
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::{FakeKlines, FakeTables};
    use std::time::Duration;
    use warehouse_core::MarketCode;

    fn fetch_config(delay_ms: u64) -> OhlcFetchConfig {
        OhlcFetchConfig {
            request_delay_ms: delay_ms,
            adjust: 0,
            start_date: "19000101".to_string(),
            end_date: "20500101".to_string(),
        }
    }

    #[test]
    fn test_parse_code_list() {
        let codes = parse_code_list("510300, SZ.159919,,510300").unwrap();
        assert_eq!(
            codes,
            vec![
                AssetCode::new(MarketCode::Sh, "510300"),
                AssetCode::new(MarketCode::Sz, "159919"),
            ]
        );

        assert!(parse_code_list("ABC").is_err());
        assert!(parse_code_list(".510300").is_err());
        assert!(parse_code_list("").unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_counts_per_fund_outcomes() {
        let tables = FakeTables::default();
        tables.set_fund_codes(vec![
            AssetCode::new(MarketCode::Sh, "510300"),
            AssetCode::new(MarketCode::Sz, "159919"),
            AssetCode::new(MarketCode::Sh, "510500"),
        ]);
        let provider = FakeKlines::new(&[("510300", 3), ("159919", -1), ("510500", 0)]);

        let started = tokio::time::Instant::now();
        let stats = fetch_ods_fund_ohlc(&tables, &provider, &fetch_config(500), None)
            .await
            .unwrap();

        assert_eq!(stats.source_rows, 3);
        assert_eq!(stats.written_rows, 3);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.empty, 1);
        assert_eq!(tables.ods_bars().len(), 3);
        // 첫 요청 이후 요청마다 대기
        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(
            provider.requested(),
            vec!["SH.510300", "SZ.159919", "SH.510500"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_codes_override_skips_fund_table() {
        let tables = FakeTables::default();
        tables.set_fund_codes(vec![AssetCode::new(MarketCode::Sh, "510500")]);
        let provider = FakeKlines::new(&[("159919", 2)]);

        let stats = fetch_ods_fund_ohlc(
            &tables,
            &provider,
            &fetch_config(0),
            Some("159919".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(stats.written_rows, 2);
        assert_eq!(provider.requested(), vec!["SZ.159919"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_bars_keeps_table() {
        let tables = FakeTables::default();
        tables.set_fund_codes(vec![AssetCode::new(MarketCode::Sh, "510300")]);
        let provider = FakeKlines::new(&[("510300", -1)]);

        let stats = fetch_ods_fund_ohlc(&tables, &provider, &fetch_config(0), None)
            .await
            .unwrap();

        assert_eq!(stats.errors, 1);
        assert_eq!(tables.replace_calls("ods_ohlc_fund_incr_efinance_daily"), 0);
    }
}
