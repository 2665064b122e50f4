//! 웨어하우스 전반에서 사용되는 공통 타입.

mod code;
mod frequency;

pub use code::*;
pub use frequency::*;
