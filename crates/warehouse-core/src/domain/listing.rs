//! 종목 마스터 레코드.

use crate::types::{AssetCode, AssetType, MarketCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 전체 A주 종목 목록의 한 행 (ods).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockListing {
    /// 6자리 종목코드
    pub stock_code: String,
    /// 약칭
    pub short_name: String,
    /// 거래소 (SH, SZ, BJ)
    pub exchange: MarketCode,
    /// 상장일. 일부 상장폐지 종목은 제공되지 않습니다.
    pub list_date: Option<NaiveDate>,
}

/// 펀드 기본정보의 한 행 (dwd).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundListing {
    pub code: AssetCode,
    pub code_name: String,
    pub asset_type: AssetType,
}

impl FundListing {
    pub fn full_code(&self) -> String {
        self.code.full_code()
    }
}
