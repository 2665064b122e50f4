//! 데이터 웨어하우스 공통 에러 타입.
//!
//! 코드 정규화, 날짜 파싱 등 도메인 규칙 위반을 표현합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// 잘못된 자산 코드 (빈 값, 구분자 누락 등)
    #[error("잘못된 코드: {0}")]
    InvalidCode(String),

    /// 알 수 없는 시장 코드
    #[error("알 수 없는 시장: {0}")]
    UnknownMarket(String),

    /// 알 수 없는 자산 유형
    #[error("알 수 없는 자산 유형: {0}")]
    UnknownAssetType(String),

    /// 지원하지 않는 주기/복권 코드
    #[error("지원하지 않는 코드 값: {0}")]
    UnsupportedCode(i64),

    /// 파싱할 수 없는 거래 일시
    #[error("잘못된 날짜: {0}")]
    InvalidDate(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;
