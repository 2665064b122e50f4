//! 데이터 모듈 오류 타입.

use thiserror::Error;
use warehouse_core::CoreError;

/// 데이터 소스/저장소 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터베이스 연결 오류
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// 쿼리 실행 오류
    #[error("Query error: {0}")]
    QueryError(String),

    /// 데이터 삽입 오류
    #[error("Insert error: {0}")]
    InsertError(String),

    /// 잘못된 식별자 (테이블명 등)
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// 연결 풀 소진
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// 외부 데이터 소스 요청 오류
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 외부 데이터 소스 응답 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 도메인 규칙 위반
    #[error("Invalid data: {0}")]
    InvalidData(#[from] CoreError),
}

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DataError::PoolExhausted,
            sqlx::Error::Io(e) => DataError::ConnectionError(e.to_string()),
            sqlx::Error::Database(db_err) => DataError::QueryError(db_err.message().to_string()),
            _ => DataError::QueryError(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::ParseError(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_pool_timeout_maps_to_exhausted() {
        let err: DataError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DataError::PoolExhausted));
    }

    #[test]
    fn test_core_error_conversion() {
        let err: DataError = CoreError::InvalidCode("SH.".to_string()).into();
        assert!(matches!(err, DataError::InvalidData(_)));
    }
}
