//! 적재 작업 모듈.

pub mod dwd_fund_info;
pub mod dwd_fund_ohlc;
pub mod ods_fund_ohlc;
pub mod ods_stock_full;
pub mod run_all;

#[cfg(test)]
pub(crate) mod testing;

pub use dwd_fund_info::load_dwd_fund_info;
pub use dwd_fund_ohlc::build_dwd_fund_ohlc;
pub use ods_fund_ohlc::{fetch_ods_fund_ohlc, parse_code_list};
pub use ods_stock_full::load_ods_stock_full;
pub use run_all::{run_all, StepResult};
