//! 웨어하우스 저장소.
//!
//! - `database`: PostgreSQL 연결 풀
//! - `schema`: ods/dwd 테이블 정의와 SQL 생성
//! - `warehouse`: 테이블 읽기 및 전체 교체 쓰기
//! - `tables`: 적재 작업용 trait

pub mod database;
pub mod schema;
pub mod tables;
pub mod warehouse;

pub use database::{Database, DatabaseConfig};
pub use schema::TableSchema;
pub use tables::WarehouseTables;
pub use warehouse::{WarehouseStore, DEFAULT_CHUNK_SIZE};
