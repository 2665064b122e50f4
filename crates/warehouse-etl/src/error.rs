//! 에러 타입 정의.

use std::fmt;
use warehouse_core::CoreError;
use warehouse_data::DataError;

/// ETL 에러 타입
#[derive(Debug)]
pub enum EtlError {
    /// 설정 에러
    Config(String),
    /// 데이터 소스/저장소 에러
    Data(DataError),
    /// 도메인 규칙 위반
    Core(CoreError),
}

impl fmt::Display for EtlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Data(e) => write!(f, "Data error: {}", e),
            Self::Core(e) => write!(f, "Domain error: {}", e),
        }
    }
}

impl std::error::Error for EtlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Data(e) => Some(e),
            Self::Core(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<DataError> for EtlError {
    fn from(err: DataError) -> Self {
        Self::Data(err)
    }
}

impl From<CoreError> for EtlError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<std::env::VarError> for EtlError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, EtlError>;
