//! 데이터 소스 및 웨어하우스 저장소.
//!
//! 이 crate는 다음을 제공합니다:
//! - Eastmoney 종목 목록 / K선 Provider
//! - ods/dwd 테이블 스키마
//! - PostgreSQL 전체 교체 적재 (트랜잭션 + 청크 단위 UNNEST 삽입)

pub mod error;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};

// Provider 재내보내기
pub use provider::{
    EastmoneyClient, EastmoneyConfig, EastmoneySymbolProvider, KlineProvider, KlineRange,
    SymbolListProvider,
};

// 저장소 재내보내기
pub use storage::{Database, DatabaseConfig, TableSchema, WarehouseStore, WarehouseTables};
