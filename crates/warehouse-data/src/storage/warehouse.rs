//! ods/dwd 테이블 읽기 및 전체 교체 쓰기.
//!
//! 쓰기는 항상 하나의 트랜잭션에서 `DROP` → `CREATE` → 청크 단위 `UNNEST`
//! 삽입 순으로 실행됩니다. 중간에 실패하면 롤백되어 기존 테이블이 남습니다.

use crate::error::{DataError, Result};
use crate::storage::database::Database;
use crate::storage::schema::{
    TableSchema, DWD_INFO_FUND_FULL, DWD_OHLC_FUND_INCR_DAILY, ODS_INFO_STOCK_FULL_ADATA,
    ODS_OHLC_FUND_INCR_EFINANCE_DAILY,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Transaction};
use tracing::{debug, info, instrument, warn};
use warehouse_core::{AssetCode, DwdFundBar, FundListing, OdsFundBar, StockListing};

/// 기본 삽입 청크 크기.
pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// 원천 펀드 일봉 행 (제공자 컬럼명을 별칭으로 읽음).
#[derive(Debug, FromRow)]
struct OdsFundBarRow {
    code_name: Option<String>,
    asset_code: Option<String>,
    date: Option<String>,
    open: Option<Decimal>,
    close: Option<Decimal>,
    high: Option<Decimal>,
    low: Option<Decimal>,
    volume: Option<i64>,
    amount: Option<Decimal>,
    amplitude: Option<Decimal>,
    pct_chg: Option<Decimal>,
    price_chg: Option<Decimal>,
    turn: Option<Decimal>,
}

/// 펀드 기본정보의 코드 3종.
#[derive(Debug, FromRow)]
struct FundCodeRow {
    market_code: Option<String>,
    full_code: Option<String>,
    asset_code: Option<String>,
}

/// 웨어하우스 테이블 저장소.
#[derive(Clone)]
pub struct WarehouseStore {
    db: Database,
    chunk_size: usize,
}

impl WarehouseStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// 삽입 청크 크기를 설정합니다 (최소 1).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    // =========================================================================
    // 읽기
    // =========================================================================

    /// 원천 펀드 일봉 전체를 읽습니다.
    ///
    /// 종목코드가 없는 행은 건너뜁니다.
    #[instrument(skip(self))]
    pub async fn load_ods_fund_bars(&self) -> Result<Vec<OdsFundBar>> {
        let rows: Vec<OdsFundBarRow> = sqlx::query_as(
            r#"
            SELECT
                "股票名称"::text    AS code_name,
                "股票代码"::text    AS asset_code,
                "日期"::text        AS date,
                "开盘"::numeric     AS open,
                "收盘"::numeric     AS close,
                "最高"::numeric     AS high,
                "最低"::numeric     AS low,
                "成交量"::bigint    AS volume,
                "成交额"::numeric   AS amount,
                "振幅"::numeric     AS amplitude,
                "涨跌幅"::numeric   AS pct_chg,
                "涨跌额"::numeric   AS price_chg,
                "换手率"::numeric   AS turn
            FROM ods_ohlc_fund_incr_efinance_daily
            ORDER BY "股票代码", "日期"
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let total = rows.len();
        let bars: Vec<OdsFundBar> = rows
            .into_iter()
            .filter_map(|row| {
                let asset_code = row.asset_code?.trim().to_string();
                if asset_code.is_empty() {
                    return None;
                }
                Some(OdsFundBar {
                    code_name: row.code_name,
                    asset_code,
                    date: row.date.unwrap_or_default(),
                    open: row.open,
                    close: row.close,
                    high: row.high,
                    low: row.low,
                    volume: row.volume,
                    amount: row.amount,
                    amplitude: row.amplitude,
                    pct_chg: row.pct_chg,
                    price_chg: row.price_chg,
                    turn: row.turn,
                })
            })
            .collect();

        if bars.len() < total {
            warn!(skipped = total - bars.len(), "종목코드 없는 원천 행 제외");
        }
        debug!(count = bars.len(), "원천 펀드 일봉 로드");
        Ok(bars)
    }

    /// 펀드 기본정보에서 코드 3종을 읽습니다.
    ///
    /// `full_code`는 `market_code`, `asset_code`에서 다시 파생하며, 저장된 값과
    /// 다르면 경고만 남깁니다.
    #[instrument(skip(self))]
    pub async fn load_fund_codes(&self) -> Result<Vec<AssetCode>> {
        let rows: Vec<FundCodeRow> = sqlx::query_as(
            r#"
            SELECT market_code::text AS market_code,
                   full_code::text   AS full_code,
                   asset_code::text  AS asset_code
            FROM dwd_info_fund_full
            ORDER BY full_code
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut codes = Vec::with_capacity(rows.len());
        for row in rows {
            let (market, asset) = match (row.market_code.as_deref(), row.asset_code.as_deref()) {
                (Some(market), Some(asset)) => (market, asset),
                _ => {
                    warn!(full_code = ?row.full_code, "코드 누락된 펀드 기본정보 행 제외");
                    continue;
                }
            };

            match AssetCode::parse(market, asset) {
                Ok(code) => {
                    if let Some(stored) = row.full_code.as_deref() {
                        if stored != code.full_code() {
                            warn!(stored, derived = %code, "full_code 불일치, 파생 값 사용");
                        }
                    }
                    codes.push(code);
                }
                Err(e) => warn!(market, asset, error = %e, "잘못된 펀드 코드 제외"),
            }
        }

        debug!(count = codes.len(), "펀드 코드 로드");
        Ok(codes)
    }

    // =========================================================================
    // 전체 교체 쓰기
    // =========================================================================

    /// 원천 펀드 일봉 테이블을 교체합니다.
    #[instrument(skip(self, bars), fields(count = bars.len()))]
    pub async fn replace_ods_fund_bars(&self, bars: &[OdsFundBar]) -> Result<usize> {
        let schema = &ODS_OHLC_FUND_INCR_EFINANCE_DAILY;
        let sql = schema.insert_sql()?;
        let mut tx = self.db.pool().begin().await?;
        recreate_table(&mut tx, schema).await?;

        let mut inserted = 0;
        for columns in ods_column_chunks(bars, self.chunk_size) {
            let result = sqlx::query(&sql)
                .bind(&columns.names)
                .bind(&columns.codes)
                .bind(&columns.dates)
                .bind(&columns.opens)
                .bind(&columns.closes)
                .bind(&columns.highs)
                .bind(&columns.lows)
                .bind(&columns.volumes)
                .bind(&columns.amounts)
                .bind(&columns.amplitudes)
                .bind(&columns.pct_chgs)
                .bind(&columns.price_chgs)
                .bind(&columns.turns)
                .execute(&mut *tx)
                .await
                .map_err(|e| DataError::InsertError(e.to_string()))?;

            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;
        info!(table = schema.name, inserted, "테이블 교체 완료");
        Ok(inserted)
    }

    /// 정규화된 펀드 일봉 테이블을 교체합니다.
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub async fn replace_dwd_fund_bars(&self, rows: &[DwdFundBar]) -> Result<usize> {
        let schema = &DWD_OHLC_FUND_INCR_DAILY;
        let sql = schema.insert_sql()?;
        let mut tx = self.db.pool().begin().await?;
        recreate_table(&mut tx, schema).await?;

        let mut inserted = 0;
        for columns in dwd_column_chunks(rows, self.chunk_size) {
            let result = sqlx::query(&sql)
                .bind(&columns.full_codes)
                .bind(&columns.asset_codes)
                .bind(&columns.market_codes)
                .bind(&columns.names)
                .bind(&columns.dates)
                .bind(&columns.times)
                .bind(&columns.opens)
                .bind(&columns.highs)
                .bind(&columns.lows)
                .bind(&columns.closes)
                .bind(&columns.volumes)
                .bind(&columns.amounts)
                .bind(&columns.amplitudes)
                .bind(&columns.pct_chgs)
                .bind(&columns.price_chgs)
                .bind(&columns.turns)
                .bind(&columns.freq_codes)
                .bind(&columns.adj_codes)
                .bind(&columns.keys)
                .execute(&mut *tx)
                .await
                .map_err(|e| DataError::InsertError(e.to_string()))?;

            inserted += result.rows_affected() as usize;
            debug!(inserted, total = rows.len(), "dwd 청크 삽입");
        }

        tx.commit().await?;
        info!(table = schema.name, inserted, "테이블 교체 완료");
        Ok(inserted)
    }

    /// 펀드 기본정보 테이블을 교체합니다.
    #[instrument(skip(self, funds), fields(count = funds.len()))]
    pub async fn replace_fund_info(&self, funds: &[FundListing]) -> Result<usize> {
        let schema = &DWD_INFO_FUND_FULL;
        let sql = schema.insert_sql()?;
        let mut tx = self.db.pool().begin().await?;
        recreate_table(&mut tx, schema).await?;

        let mut inserted = 0;
        for chunk in funds.chunks(self.chunk_size) {
            let market_codes: Vec<String> =
                chunk.iter().map(|f| f.code.market_code().to_string()).collect();
            let asset_codes: Vec<&str> = chunk.iter().map(|f| f.code.asset_code()).collect();
            let full_codes: Vec<String> = chunk.iter().map(|f| f.full_code()).collect();
            let asset_types: Vec<&str> = chunk.iter().map(|f| f.asset_type.as_str()).collect();
            let names: Vec<&str> = chunk.iter().map(|f| f.code_name.as_str()).collect();

            let result = sqlx::query(&sql)
                .bind(&market_codes)
                .bind(&asset_codes)
                .bind(&full_codes)
                .bind(&asset_types)
                .bind(&names)
                .execute(&mut *tx)
                .await
                .map_err(|e| DataError::InsertError(e.to_string()))?;

            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;
        info!(table = schema.name, inserted, "테이블 교체 완료");
        Ok(inserted)
    }

    /// A주 종목 마스터 테이블을 교체합니다.
    #[instrument(skip(self, stocks), fields(count = stocks.len()))]
    pub async fn replace_stock_full(&self, stocks: &[StockListing]) -> Result<usize> {
        let schema = &ODS_INFO_STOCK_FULL_ADATA;
        let sql = schema.insert_sql()?;
        let mut tx = self.db.pool().begin().await?;
        recreate_table(&mut tx, schema).await?;

        let mut inserted = 0;
        for chunk in stocks.chunks(self.chunk_size) {
            let codes: Vec<&str> = chunk.iter().map(|s| s.stock_code.as_str()).collect();
            let names: Vec<&str> = chunk.iter().map(|s| s.short_name.as_str()).collect();
            let exchanges: Vec<&str> = chunk.iter().map(|s| s.exchange.as_str()).collect();
            let list_dates: Vec<Option<NaiveDate>> = chunk.iter().map(|s| s.list_date).collect();

            let result = sqlx::query(&sql)
                .bind(&codes)
                .bind(&names)
                .bind(&exchanges)
                .bind(&list_dates)
                .execute(&mut *tx)
                .await
                .map_err(|e| DataError::InsertError(e.to_string()))?;

            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;
        info!(table = schema.name, inserted, "테이블 교체 완료");
        Ok(inserted)
    }
}

/// 원천 펀드 일봉 청크 하나의 컬럼 벡터. 필드 순서는 테이블 컬럼 순서와 같습니다.
#[derive(Debug)]
struct OdsColumns<'a> {
    names: Vec<Option<&'a str>>,
    codes: Vec<&'a str>,
    dates: Vec<&'a str>,
    opens: Vec<Option<Decimal>>,
    closes: Vec<Option<Decimal>>,
    highs: Vec<Option<Decimal>>,
    lows: Vec<Option<Decimal>>,
    volumes: Vec<Option<i64>>,
    amounts: Vec<Option<Decimal>>,
    amplitudes: Vec<Option<Decimal>>,
    pct_chgs: Vec<Option<Decimal>>,
    price_chgs: Vec<Option<Decimal>>,
    turns: Vec<Option<Decimal>>,
}

impl<'a> OdsColumns<'a> {
    fn from_bars(chunk: &'a [OdsFundBar]) -> Self {
        Self {
            names: chunk.iter().map(|b| b.code_name.as_deref()).collect(),
            codes: chunk.iter().map(|b| b.asset_code.as_str()).collect(),
            dates: chunk.iter().map(|b| b.date.as_str()).collect(),
            opens: chunk.iter().map(|b| b.open).collect(),
            closes: chunk.iter().map(|b| b.close).collect(),
            highs: chunk.iter().map(|b| b.high).collect(),
            lows: chunk.iter().map(|b| b.low).collect(),
            volumes: chunk.iter().map(|b| b.volume).collect(),
            amounts: chunk.iter().map(|b| b.amount).collect(),
            amplitudes: chunk.iter().map(|b| b.amplitude).collect(),
            pct_chgs: chunk.iter().map(|b| b.pct_chg).collect(),
            price_chgs: chunk.iter().map(|b| b.price_chg).collect(),
            turns: chunk.iter().map(|b| b.turn).collect(),
        }
    }
}

/// 정규화 일봉 청크 하나의 컬럼 벡터. 필드 순서는 테이블 컬럼 순서와 같습니다.
#[derive(Debug)]
struct DwdColumns<'a> {
    full_codes: Vec<&'a str>,
    asset_codes: Vec<&'a str>,
    market_codes: Vec<&'a str>,
    names: Vec<Option<&'a str>>,
    dates: Vec<NaiveDate>,
    times: Vec<&'a str>,
    opens: Vec<Option<Decimal>>,
    highs: Vec<Option<Decimal>>,
    lows: Vec<Option<Decimal>>,
    closes: Vec<Option<Decimal>>,
    volumes: Vec<Option<i64>>,
    amounts: Vec<Option<Decimal>>,
    amplitudes: Vec<Option<Decimal>>,
    pct_chgs: Vec<Option<Decimal>>,
    price_chgs: Vec<Option<Decimal>>,
    turns: Vec<Option<Decimal>>,
    freq_codes: Vec<i32>,
    adj_codes: Vec<i32>,
    keys: Vec<&'a str>,
}

impl<'a> DwdColumns<'a> {
    fn from_rows(chunk: &'a [DwdFundBar]) -> Self {
        Self {
            full_codes: chunk.iter().map(|r| r.full_code.as_str()).collect(),
            asset_codes: chunk.iter().map(|r| r.asset_code.as_str()).collect(),
            market_codes: chunk.iter().map(|r| r.market_code.as_str()).collect(),
            names: chunk.iter().map(|r| r.code_name.as_deref()).collect(),
            dates: chunk.iter().map(|r| r.date).collect(),
            times: chunk.iter().map(|r| r.time.as_str()).collect(),
            opens: chunk.iter().map(|r| r.open).collect(),
            highs: chunk.iter().map(|r| r.high).collect(),
            lows: chunk.iter().map(|r| r.low).collect(),
            closes: chunk.iter().map(|r| r.close).collect(),
            volumes: chunk.iter().map(|r| r.volume).collect(),
            amounts: chunk.iter().map(|r| r.amount).collect(),
            amplitudes: chunk.iter().map(|r| r.amplitude).collect(),
            pct_chgs: chunk.iter().map(|r| r.pct_chg).collect(),
            price_chgs: chunk.iter().map(|r| r.price_chg).collect(),
            turns: chunk.iter().map(|r| r.turn).collect(),
            freq_codes: chunk.iter().map(|r| r.freq_code).collect(),
            adj_codes: chunk.iter().map(|r| r.adj_code).collect(),
            keys: chunk.iter().map(|r| r.primary_key.as_str()).collect(),
        }
    }
}

fn ods_column_chunks(
    bars: &[OdsFundBar],
    chunk_size: usize,
) -> impl Iterator<Item = OdsColumns<'_>> {
    bars.chunks(chunk_size.max(1)).map(OdsColumns::from_bars)
}

fn dwd_column_chunks(
    rows: &[DwdFundBar],
    chunk_size: usize,
) -> impl Iterator<Item = DwdColumns<'_>> {
    rows.chunks(chunk_size.max(1)).map(DwdColumns::from_rows)
}

/// 트랜잭션 안에서 테이블을 삭제 후 다시 생성합니다.
async fn recreate_table(tx: &mut Transaction<'_, Postgres>, schema: &TableSchema) -> Result<()> {
    sqlx::query(&schema.drop_sql()?).execute(&mut **tx).await?;
    sqlx::query(&schema.create_sql()?).execute(&mut **tx).await?;
    debug!(table = schema.name, "테이블 재생성");
    Ok(())
}
