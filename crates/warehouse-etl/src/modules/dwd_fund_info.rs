//! 펀드 기본정보 적재 모듈.

use crate::{JobStats, Result};
use std::time::Instant;
use tracing::Instrument;
use warehouse_core::job_span;
use warehouse_data::storage::schema::DWD_INFO_FUND_FULL;
use warehouse_data::{SymbolListProvider, WarehouseTables};

/// 상장지수펀드 목록으로 `dwd_info_fund_full`을 교체합니다.
pub async fn load_dwd_fund_info(
    tables: &dyn WarehouseTables,
    provider: &dyn SymbolListProvider,
) -> Result<JobStats> {
    run(tables, provider)
        .instrument(job_span!(
            "dwd_fund_info",
            DWD_INFO_FUND_FULL.name,
            provider.name()
        ))
        .await
}

async fn run(tables: &dyn WarehouseTables, provider: &dyn SymbolListProvider) -> Result<JobStats> {
    let start = Instant::now();
    let mut stats = JobStats::new();

    let funds = provider.fetch_funds().await?;
    stats.source_rows = funds.len();

    if funds.is_empty() {
        tracing::warn!("조회된 펀드가 없어 기존 테이블을 유지합니다");
        stats.empty = 1;
        stats.elapsed = start.elapsed();
        return Ok(stats);
    }

    tracing::info!(count = funds.len(), "펀드 목록 조회 완료");

    stats.written_rows = tables.replace_fund_info(&funds).await?;
    stats.elapsed = start.elapsed();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::{FakeSymbols, FakeTables};
    use warehouse_core::MarketCode;

    #[tokio::test]
    async fn test_load_dwd_fund_info() {
        let tables = FakeTables::default();
        let provider =
            FakeSymbols::with_funds(&[(MarketCode::Sh, "510300"), (MarketCode::Sz, "159919")]);

        let stats = load_dwd_fund_info(&tables, &provider).await.unwrap();

        assert_eq!(stats.written_rows, 2);
        let funds = tables.funds();
        assert_eq!(funds[0].full_code(), "SH.510300");
        assert_eq!(funds[1].full_code(), "SZ.159919");
    }

    #[tokio::test]
    async fn test_empty_list_keeps_table() {
        let tables = FakeTables::default();
        let stats = load_dwd_fund_info(&tables, &FakeSymbols::default())
            .await
            .unwrap();

        assert_eq!(stats.empty, 1);
        assert_eq!(tables.replace_calls("dwd_info_fund_full"), 0);
    }
}
