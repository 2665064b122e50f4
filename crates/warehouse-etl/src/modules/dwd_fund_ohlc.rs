//! 펀드 일봉 정규화 모듈 (ods → dwd).

use crate::{JobStats, Result};
use std::time::Instant;
use tracing::Instrument;
use warehouse_core::{job_span, FundOhlcNormalizer};
use warehouse_data::storage::schema::{DWD_OHLC_FUND_INCR_DAILY, ODS_OHLC_FUND_INCR_EFINANCE_DAILY};
use warehouse_data::WarehouseTables;

/// 원천 펀드 일봉을 정규화하여 dwd 테이블을 교체합니다.
///
/// 원천이 비어 있어도 대상 테이블은 빈 테이블로 교체됩니다.
pub async fn build_dwd_fund_ohlc(tables: &dyn WarehouseTables) -> Result<JobStats> {
    run(tables)
        .instrument(job_span!(
            "dwd_fund_ohlc",
            DWD_OHLC_FUND_INCR_DAILY.name,
            ODS_OHLC_FUND_INCR_EFINANCE_DAILY.name
        ))
        .await
}

async fn run(tables: &dyn WarehouseTables) -> Result<JobStats> {
    let start = Instant::now();
    let mut stats = JobStats::new();

    tracing::info!("펀드 일봉 정규화 시작");

    let bars = tables.load_ods_fund_bars().await?;
    let codes = tables.load_fund_codes().await?;
    stats.source_rows = bars.len();

    tracing::info!(bars = bars.len(), funds = codes.len(), "원천 데이터 로드 완료");

    if codes.is_empty() {
        tracing::warn!("펀드 기본정보가 비어 있어 모든 원천 행이 제외됩니다");
    }

    let normalizer = FundOhlcNormalizer::default();
    let outcome = normalizer.normalize(&bars, &codes);
    stats.skipped = outcome.unmatched;
    stats.errors = outcome.invalid_dates;

    if outcome.unmatched > 0 {
        tracing::info!(unmatched = outcome.unmatched, "펀드 기본정보에 없는 코드 제외");
    }

    stats.written_rows = tables.replace_dwd_fund_bars(&outcome.rows).await?;
    stats.elapsed = start.elapsed();
    Ok(stats)
}
