//! 웨어하우스 테이블 스키마.
//!
//! 모든 적재 테이블은 실행마다 통째로 교체되므로 제약 조건 없이 컬럼만
//! 정의합니다. `insert_timestamp`는 적재 시각으로 자동 기록됩니다.

use crate::error::{DataError, Result};

/// 적재 시각 컬럼명.
pub const INSERT_TIMESTAMP_COLUMN: &str = "insert_timestamp";

/// 테이블 정의 (컬럼명, PostgreSQL 타입).
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [(&'static str, &'static str)],
}

/// 원천 펀드 일봉 (제공자 컬럼명 유지).
pub const ODS_OHLC_FUND_INCR_EFINANCE_DAILY: TableSchema = TableSchema {
    name: "ods_ohlc_fund_incr_efinance_daily",
    columns: &[
        ("股票名称", "TEXT"),
        ("股票代码", "TEXT"),
        ("日期", "TEXT"),
        ("开盘", "NUMERIC"),
        ("收盘", "NUMERIC"),
        ("最高", "NUMERIC"),
        ("最低", "NUMERIC"),
        ("成交量", "BIGINT"),
        ("成交额", "NUMERIC"),
        ("振幅", "NUMERIC"),
        ("涨跌幅", "NUMERIC"),
        ("涨跌额", "NUMERIC"),
        ("换手率", "NUMERIC"),
    ],
};

/// 원천 A주 종목 마스터.
pub const ODS_INFO_STOCK_FULL_ADATA: TableSchema = TableSchema {
    name: "ods_info_stock_full_adata",
    columns: &[
        ("stock_code", "TEXT"),
        ("short_name", "TEXT"),
        ("exchange", "TEXT"),
        ("list_date", "DATE"),
    ],
};

/// 펀드 기본정보.
pub const DWD_INFO_FUND_FULL: TableSchema = TableSchema {
    name: "dwd_info_fund_full",
    columns: &[
        ("market_code", "TEXT"),
        ("asset_code", "TEXT"),
        ("full_code", "TEXT"),
        ("asset_type", "TEXT"),
        ("code_name", "TEXT"),
    ],
};

/// 정규화된 펀드 일봉.
pub const DWD_OHLC_FUND_INCR_DAILY: TableSchema = TableSchema {
    name: "dwd_ohlc_fund_incr_daily",
    columns: &[
        ("full_code", "TEXT"),
        ("asset_code", "TEXT"),
        ("market_code", "TEXT"),
        ("code_name", "TEXT"),
        ("date", "DATE"),
        ("time", "TEXT"),
        ("open", "NUMERIC"),
        ("high", "NUMERIC"),
        ("low", "NUMERIC"),
        ("close", "NUMERIC"),
        ("volume", "BIGINT"),
        ("amount", "NUMERIC"),
        ("amplitude", "NUMERIC"),
        ("pct_chg", "NUMERIC"),
        ("price_chg", "NUMERIC"),
        ("turn", "NUMERIC"),
        ("freq_code", "INTEGER"),
        ("adj_code", "INTEGER"),
        ("primary_key", "TEXT"),
    ],
};

/// 식별자를 큰따옴표로 감쌉니다.
///
/// 테이블/컬럼명은 코드에 고정된 값이지만 동적 SQL에 들어가므로 검증합니다.
pub fn quote_ident(name: &str) -> Result<String> {
    if name.trim().is_empty() || name.contains('"') || name.contains('\0') {
        return Err(DataError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{}\"", name))
}

impl TableSchema {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(name, _)| *name).collect()
    }

    pub fn drop_sql(&self) -> Result<String> {
        Ok(format!("DROP TABLE IF EXISTS {}", quote_ident(self.name)?))
    }

    pub fn create_sql(&self) -> Result<String> {
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        for (name, sql_type) in self.columns {
            columns.push(format!("{} {}", quote_ident(name)?, sql_type));
        }
        columns.push(format!(
            "{} TIMESTAMPTZ NOT NULL DEFAULT NOW()",
            quote_ident(INSERT_TIMESTAMP_COLUMN)?
        ));

        Ok(format!(
            "CREATE TABLE {} ({})",
            quote_ident(self.name)?,
            columns.join(", ")
        ))
    }

    /// UNNEST 일괄 삽입 SQL. 바인딩 순서는 컬럼 정의 순서와 같습니다.
    pub fn insert_sql(&self) -> Result<String> {
        let mut names = Vec::with_capacity(self.columns.len());
        let mut params = Vec::with_capacity(self.columns.len());
        for (idx, (name, sql_type)) in self.columns.iter().enumerate() {
            names.push(quote_ident(name)?);
            params.push(format!("${}::{}[]", idx + 1, sql_type.to_lowercase()));
        }

        Ok(format!(
            "INSERT INTO {} ({}) SELECT * FROM UNNEST({})",
            quote_ident(self.name)?,
            names.join(", "),
            params.join(", ")
        ))
    }
}
