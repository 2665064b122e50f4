//! 웨어하우스 적재를 위한 도메인 모델과 변환 규칙.

mod fund_ohlc;
mod key;
mod listing;

pub use fund_ohlc::*;
pub use key::*;
pub use listing::*;
