//! 시장 데이터 웨어하우스 배치 적재.
//!
//! 이 crate는 웨어하우스 테이블을 채우는 배치 작업을 제공합니다:
//! - 펀드 기본정보 (`dwd_info_fund_full`)
//! - 펀드 일봉 원천 수집 (`ods_ohlc_fund_incr_efinance_daily`)
//! - 펀드 일봉 정규화 (`dwd_ohlc_fund_incr_daily`)
//! - A주 전체 종목 목록 (`ods_info_stock_full_adata`)

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::EtlConfig;
pub use error::{EtlError, Result};
pub use stats::JobStats;
