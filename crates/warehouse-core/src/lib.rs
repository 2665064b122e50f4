//! # Warehouse Core
//!
//! 시장 데이터 웨어하우스의 핵심 도메인 타입과 변환 규칙을 제공합니다:
//! - 자산 코드 정규화 (`market_code`, `asset_code`, `full_code`)
//! - 시세 주기/복권 코드
//! - 레코드 기본키 파생 (MD5)
//! - ods → dwd 펀드 시세 정규화
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
