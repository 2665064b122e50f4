//! 적재 작업이 사용하는 테이블 접근 trait.

use crate::error::Result;
use crate::storage::warehouse::WarehouseStore;
use async_trait::async_trait;
use warehouse_core::{AssetCode, DwdFundBar, FundListing, OdsFundBar, StockListing};

/// 웨어하우스 테이블 읽기/교체 인터페이스.
#[async_trait]
pub trait WarehouseTables: Send + Sync {
    /// `ods_ohlc_fund_incr_efinance_daily` 전체.
    async fn load_ods_fund_bars(&self) -> Result<Vec<OdsFundBar>>;

    /// `dwd_info_fund_full`의 코드 3종.
    async fn load_fund_codes(&self) -> Result<Vec<AssetCode>>;

    async fn replace_ods_fund_bars(&self, bars: &[OdsFundBar]) -> Result<usize>;

    async fn replace_dwd_fund_bars(&self, rows: &[DwdFundBar]) -> Result<usize>;

    async fn replace_fund_info(&self, funds: &[FundListing]) -> Result<usize>;

    async fn replace_stock_full(&self, stocks: &[StockListing]) -> Result<usize>;
}

#[async_trait]
impl WarehouseTables for WarehouseStore {
    async fn load_ods_fund_bars(&self) -> Result<Vec<OdsFundBar>> {
        WarehouseStore::load_ods_fund_bars(self).await
    }

    async fn load_fund_codes(&self) -> Result<Vec<AssetCode>> {
        WarehouseStore::load_fund_codes(self).await
    }

    async fn replace_ods_fund_bars(&self, bars: &[OdsFundBar]) -> Result<usize> {
        WarehouseStore::replace_ods_fund_bars(self, bars).await
    }

    async fn replace_dwd_fund_bars(&self, rows: &[DwdFundBar]) -> Result<usize> {
        WarehouseStore::replace_dwd_fund_bars(self, rows).await
    }

    async fn replace_fund_info(&self, funds: &[FundListing]) -> Result<usize> {
        WarehouseStore::replace_fund_info(self, funds).await
    }

    async fn replace_stock_full(&self, stocks: &[StockListing]) -> Result<usize> {
        WarehouseStore::replace_stock_full(self, stocks).await
    }
}
