//! 데이터 Provider 모듈.
//!
//! ## Eastmoney
//! - `EastmoneyClient`: 종목 목록 / K선 API 클라이언트 (인증 불필요)
//!
//! ## 종목 마스터
//! - `SymbolListProvider`: A주 전체 종목, ETF 목록
//!
//! ## 과거 시세
//! - `KlineProvider`: 종목별 일봉

pub mod eastmoney;
pub mod kline;
pub mod symbol_info;

pub use eastmoney::{ClistItem, EastmoneyClient, EastmoneyConfig, EastmoneyKline, KlineSeries};
pub use kline::{KlineProvider, KlineRange};
pub use symbol_info::{EastmoneySymbolProvider, SymbolListProvider};
