//! A주 전체 종목 목록 적재 모듈.

use crate::{JobStats, Result};
use std::time::Instant;
use tracing::Instrument;
use warehouse_core::job_span;
use warehouse_data::storage::schema::ODS_INFO_STOCK_FULL_ADATA;
use warehouse_data::{SymbolListProvider, WarehouseTables};

/// 전체 종목 목록을 조회하여 ods 테이블을 교체합니다.
///
/// 제공자가 빈 목록을 돌려주면 기존 테이블을 유지합니다.
pub async fn load_ods_stock_full(
    tables: &dyn WarehouseTables,
    provider: &dyn SymbolListProvider,
) -> Result<JobStats> {
    run(tables, provider)
        .instrument(job_span!(
            "ods_stock_full",
            ODS_INFO_STOCK_FULL_ADATA.name,
            provider.name()
        ))
        .await
}

async fn run(tables: &dyn WarehouseTables, provider: &dyn SymbolListProvider) -> Result<JobStats> {
    let start = Instant::now();
    let mut stats = JobStats::new();

    tracing::info!("종목 목록 조회 시작");

    let stocks = provider.fetch_stocks().await?;
    stats.source_rows = stocks.len();

    if stocks.is_empty() {
        tracing::warn!("조회된 종목이 없어 기존 테이블을 유지합니다");
        stats.empty = 1;
        stats.elapsed = start.elapsed();
        return Ok(stats);
    }

    let without_list_date = stocks.iter().filter(|s| s.list_date.is_none()).count();
    tracing::info!(
        count = stocks.len(),
        without_list_date,
        "종목 목록 조회 완료"
    );

    stats.written_rows = tables.replace_stock_full(&stocks).await?;
    stats.elapsed = start.elapsed();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;
    use crate::modules::testing::{FakeSymbols, FakeTables};
    use chrono::NaiveDate;
    use warehouse_core::{MarketCode, StockListing};

    fn stock(code: &str, exchange: MarketCode, list_date: Option<NaiveDate>) -> StockListing {
        StockListing {
            stock_code: code.to_string(),
            short_name: format!("股票{}", code),
            exchange,
            list_date,
        }
    }

    #[tokio::test]
    async fn test_load_ods_stock_full() {
        let tables = FakeTables::default();
        let provider = FakeSymbols {
            stocks: vec![
                stock("600000", MarketCode::Sh, NaiveDate::from_ymd_opt(1999, 11, 10)),
                stock("000001", MarketCode::Sz, NaiveDate::from_ymd_opt(1991, 4, 3)),
                stock("920001", MarketCode::Bj, None),
            ],
            ..Default::default()
        };

        let stats = load_ods_stock_full(&tables, &provider).await.unwrap();

        assert_eq!(stats.source_rows, 3);
        assert_eq!(stats.written_rows, 3);
        assert_eq!(tables.stocks()[2].exchange, MarketCode::Bj);
    }

    #[tokio::test]
    async fn test_empty_list_keeps_table() {
        let tables = FakeTables::default();
        let stats = load_ods_stock_full(&tables, &FakeSymbols::default())
            .await
            .unwrap();

        assert_eq!(stats.empty, 1);
        assert_eq!(tables.replace_calls("ods_info_stock_full_adata"), 0);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let tables = FakeTables::default();
        let provider = FakeSymbols {
            fail: true,
            ..Default::default()
        };

        let err = load_ods_stock_full(&tables, &provider).await.unwrap_err();
        assert!(matches!(err, EtlError::Data(_)));
        assert_eq!(tables.replace_calls("ods_info_stock_full_adata"), 0);
    }
}
