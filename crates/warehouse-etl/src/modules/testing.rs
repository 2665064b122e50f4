//! 작업 테스트용 인메모리 테이블/Provider.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use warehouse_core::{
    Adjustment, AssetCode, AssetType, DwdFundBar, FundListing, MarketCode, OdsFundBar,
    StockListing,
};
use warehouse_data::{
    DataError, KlineProvider, KlineRange, Result, SymbolListProvider, WarehouseTables,
};

#[derive(Default)]
pub struct FakeTables {
    ods_bars: Mutex<Vec<OdsFundBar>>,
    fund_codes: Mutex<Vec<AssetCode>>,
    dwd_rows: Mutex<Vec<DwdFundBar>>,
    funds: Mutex<Vec<FundListing>>,
    stocks: Mutex<Vec<StockListing>>,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl FakeTables {
    pub fn set_ods_bars(&self, bars: Vec<OdsFundBar>) {
        *self.ods_bars.lock().unwrap() = bars;
    }

    pub fn set_fund_codes(&self, codes: Vec<AssetCode>) {
        *self.fund_codes.lock().unwrap() = codes;
    }

    pub fn ods_bars(&self) -> Vec<OdsFundBar> {
        self.ods_bars.lock().unwrap().clone()
    }

    pub fn dwd_rows(&self) -> Vec<DwdFundBar> {
        self.dwd_rows.lock().unwrap().clone()
    }

    pub fn funds(&self) -> Vec<FundListing> {
        self.funds.lock().unwrap().clone()
    }

    pub fn stocks(&self) -> Vec<StockListing> {
        self.stocks.lock().unwrap().clone()
    }

    pub fn replace_calls(&self, table: &str) -> usize {
        self.calls.lock().unwrap().get(table).copied().unwrap_or(0)
    }

    fn record(&self, table: &'static str) {
        *self.calls.lock().unwrap().entry(table).or_insert(0) += 1;
    }
}

#[async_trait]
impl WarehouseTables for FakeTables {
    async fn load_ods_fund_bars(&self) -> Result<Vec<OdsFundBar>> {
        Ok(self.ods_bars())
    }

    async fn load_fund_codes(&self) -> Result<Vec<AssetCode>> {
        Ok(self.fund_codes.lock().unwrap().clone())
    }

    async fn replace_ods_fund_bars(&self, bars: &[OdsFundBar]) -> Result<usize> {
        self.record("ods_ohlc_fund_incr_efinance_daily");
        self.set_ods_bars(bars.to_vec());
        Ok(bars.len())
    }

    async fn replace_dwd_fund_bars(&self, rows: &[DwdFundBar]) -> Result<usize> {
        self.record("dwd_ohlc_fund_incr_daily");
        *self.dwd_rows.lock().unwrap() = rows.to_vec();
        Ok(rows.len())
    }

    async fn replace_fund_info(&self, funds: &[FundListing]) -> Result<usize> {
        self.record("dwd_info_fund_full");
        *self.funds.lock().unwrap() = funds.to_vec();
        // 이후 단계가 새 목록을 읽도록 코드도 갱신
        self.set_fund_codes(funds.iter().map(|f| f.code.clone()).collect());
        Ok(funds.len())
    }

    async fn replace_stock_full(&self, stocks: &[StockListing]) -> Result<usize> {
        self.record("ods_info_stock_full_adata");
        *self.stocks.lock().unwrap() = stocks.to_vec();
        Ok(stocks.len())
    }
}

/// 고정 목록을 돌려주는 종목 마스터 Provider.
#[derive(Default)]
pub struct FakeSymbols {
    pub stocks: Vec<StockListing>,
    pub funds: Vec<FundListing>,
    pub fail: bool,
}

impl FakeSymbols {
    pub fn with_funds(codes: &[(MarketCode, &str)]) -> Self {
        Self {
            funds: codes
                .iter()
                .map(|(market, code)| FundListing {
                    code: AssetCode::new(market.clone(), *code),
                    code_name: format!("ETF{}", code),
                    asset_type: AssetType::Etf,
                })
                .collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl SymbolListProvider for FakeSymbols {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_stocks(&self) -> Result<Vec<StockListing>> {
        if self.fail {
            return Err(DataError::FetchError("stock list unavailable".to_string()));
        }
        Ok(self.stocks.clone())
    }

    async fn fetch_funds(&self) -> Result<Vec<FundListing>> {
        if self.fail {
            return Err(DataError::FetchError("fund list unavailable".to_string()));
        }
        Ok(self.funds.clone())
    }
}

/// 코드별 일봉 개수를 지정하는 Provider. 음수는 에러.
#[derive(Default)]
pub struct FakeKlines {
    pub bars_per_code: HashMap<String, i32>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeKlines {
    pub fn new(pairs: &[(&str, i32)]) -> Self {
        Self {
            bars_per_code: pairs.iter().map(|(c, n)| (c.to_string(), *n)).collect(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl KlineProvider for FakeKlines {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_daily_bars(
        &self,
        code: &AssetCode,
        _range: &KlineRange,
        _adjustment: Adjustment,
    ) -> Result<Vec<OdsFundBar>> {
        self.requested.lock().unwrap().push(code.full_code());

        let count = self
            .bars_per_code
            .get(code.asset_code())
            .copied()
            .unwrap_or(0);
        if count < 0 {
            return Err(DataError::FetchError(format!("{} 조회 실패", code)));
        }

        Ok((0..count)
            .map(|day| OdsFundBar {
                code_name: Some(format!("ETF{}", code.asset_code())),
                asset_code: code.asset_code().to_string(),
                date: format!("2024-01-{:02}", day + 1),
                ..Default::default()
            })
            .collect())
    }
}
