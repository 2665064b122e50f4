//! 자산 코드 정규화.
//!
//! 주식, ETF, 채권, 선물, 리츠 등 모든 자산을 세 개의 코드로 식별합니다:
//! - `market_code` - 시장/거래소 (예: SH, SZ, NYSE)
//! - `asset_code` - 시장 내 자산 식별자 (예: 510300, AAPL)
//! - `full_code` - 두 코드를 `.`으로 연결한 값 (예: SH.510300, NYSE.AAPL)

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `full_code`의 시장/자산 구분자.
pub const FULL_CODE_SEPARATOR: char = '.';

/// 시장(거래소) 코드.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MarketCode {
    /// 상하이 증권거래소
    Sh,
    /// 선전 증권거래소
    Sz,
    /// 베이징 증권거래소
    Bj,
    /// 뉴욕 증권거래소
    Nyse,
    /// 나스닥
    Nasdaq,
    /// 아메리칸 증권거래소
    Amex,
    /// 그 외 시장 (대문자 코드 그대로 보존)
    Other(String),
}

impl MarketCode {
    /// 코드 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        match self {
            MarketCode::Sh => "SH",
            MarketCode::Sz => "SZ",
            MarketCode::Bj => "BJ",
            MarketCode::Nyse => "NYSE",
            MarketCode::Nasdaq => "NASDAQ",
            MarketCode::Amex => "AMEX",
            MarketCode::Other(code) => code,
        }
    }

    /// 중국 본토 6자리 코드의 접두어로 거래소를 추정합니다.
    ///
    /// - `92` → BJ (베이징 신규 코드 대역)
    /// - `5`, `6`, `9`, `11` → SH (펀드, 주식, B주, 채권)
    /// - `0`, `1`, `2`, `3` → SZ
    /// - `4`, `8` → BJ
    pub fn from_cn_stock_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        if code.starts_with("92") {
            return Some(MarketCode::Bj);
        }
        if code.starts_with("11") {
            return Some(MarketCode::Sh);
        }

        match code.as_bytes()[0] {
            b'5' | b'6' | b'9' => Some(MarketCode::Sh),
            b'0' | b'1' | b'2' | b'3' => Some(MarketCode::Sz),
            b'4' | b'8' => Some(MarketCode::Bj),
            _ => None,
        }
    }

    /// Eastmoney 시장 번호 (`secid` 접두어).
    pub fn eastmoney_id(&self) -> Option<u8> {
        match self {
            MarketCode::Sh => Some(1),
            MarketCode::Sz | MarketCode::Bj => Some(0),
            _ => None,
        }
    }

    /// Eastmoney 시장 번호에서 변환합니다.
    ///
    /// 번호 0은 선전/베이징이 공유하므로 선전으로 간주합니다.
    /// 베이징 종목은 [`MarketCode::from_cn_stock_code`]로 먼저 판별해야 합니다.
    pub fn from_eastmoney_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(MarketCode::Sh),
            0 => Some(MarketCode::Sz),
            _ => None,
        }
    }
}

impl fmt::Display for MarketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketCode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let upper = s.trim().to_uppercase();
        if upper.is_empty() || upper.contains(FULL_CODE_SEPARATOR) {
            return Err(CoreError::InvalidCode(s.to_string()));
        }

        Ok(match upper.as_str() {
            "SH" => MarketCode::Sh,
            "SZ" => MarketCode::Sz,
            "BJ" => MarketCode::Bj,
            "NYSE" => MarketCode::Nyse,
            "NASDAQ" => MarketCode::Nasdaq,
            "AMEX" => MarketCode::Amex,
            _ => MarketCode::Other(upper),
        })
    }
}

impl TryFrom<String> for MarketCode {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl From<MarketCode> for String {
    fn from(value: MarketCode) -> Self {
        value.as_str().to_string()
    }
}

/// 자산 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    /// 주식
    Stock,
    /// 상장지수펀드
    Etf,
    /// 채권
    Bond,
    /// 선물
    Future,
    /// 부동산투자신탁
    Reit,
}

impl AssetType {
    /// 저장용 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "STOCK",
            AssetType::Etf => "ETF",
            AssetType::Bond => "BOND",
            AssetType::Future => "FUTURE",
            AssetType::Reit => "REIT",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "STOCK" => Ok(AssetType::Stock),
            "ETF" => Ok(AssetType::Etf),
            "BOND" => Ok(AssetType::Bond),
            "FUTURE" => Ok(AssetType::Future),
            "REIT" => Ok(AssetType::Reit),
            _ => Err(CoreError::UnknownAssetType(s.to_string())),
        }
    }
}

/// 시장 코드와 자산 코드의 쌍.
///
/// `full_code`는 저장하지 않고 항상 두 코드에서 파생합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetCode {
    market_code: MarketCode,
    asset_code: String,
}

impl AssetCode {
    /// 새 자산 코드를 생성합니다.
    pub fn new(market_code: MarketCode, asset_code: impl Into<String>) -> Self {
        Self {
            market_code,
            asset_code: asset_code.into().trim().to_string(),
        }
    }

    /// 문자열 쌍에서 생성합니다 (예: `"sh"`, `"510300"`).
    pub fn parse(market_code: &str, asset_code: &str) -> CoreResult<Self> {
        let asset = asset_code.trim();
        if asset.is_empty() {
            return Err(CoreError::InvalidCode(format!(
                "{}{}{}",
                market_code, FULL_CODE_SEPARATOR, asset_code
            )));
        }
        Ok(Self::new(market_code.parse()?, asset))
    }

    /// `full_code`에서 생성합니다 (예: `"SH.510300"`).
    ///
    /// 첫 번째 `.`을 기준으로 나눕니다.
    pub fn from_full_code(full_code: &str) -> CoreResult<Self> {
        let (market, asset) = full_code
            .trim()
            .split_once(FULL_CODE_SEPARATOR)
            .ok_or_else(|| CoreError::InvalidCode(full_code.to_string()))?;

        if market.trim().is_empty() || asset.trim().is_empty() {
            return Err(CoreError::InvalidCode(full_code.to_string()));
        }
        Self::parse(market, asset)
    }

    /// 중국 본토 6자리 코드에서 거래소를 추정하여 생성합니다.
    pub fn from_cn_code(asset_code: &str) -> CoreResult<Self> {
        let market = MarketCode::from_cn_stock_code(asset_code)
            .ok_or_else(|| CoreError::InvalidCode(asset_code.to_string()))?;
        Ok(Self::new(market, asset_code))
    }

    pub fn market_code(&self) -> &MarketCode {
        &self.market_code
    }

    pub fn asset_code(&self) -> &str {
        &self.asset_code
    }

    /// `market_code.asset_code` 형식의 전체 코드.
    pub fn full_code(&self) -> String {
        format!(
            "{}{}{}",
            self.market_code, FULL_CODE_SEPARATOR, self.asset_code
        )
    }

    /// Eastmoney API용 `secid` (예: `1.510300`).
    pub fn eastmoney_secid(&self) -> CoreResult<String> {
        let id = self
            .market_code
            .eastmoney_id()
            .ok_or_else(|| CoreError::UnknownMarket(self.market_code.to_string()))?;
        Ok(format!("{}.{}", id, self.asset_code))
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.market_code, FULL_CODE_SEPARATOR, self.asset_code
        )
    }
}

impl FromStr for AssetCode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::from_full_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_code_cn_etf() {
        let code = AssetCode::parse("sh", "510300").unwrap();
        assert_eq!(code.market_code(), &MarketCode::Sh);
        assert_eq!(code.asset_code(), "510300");
        assert_eq!(code.full_code(), "SH.510300");
        assert_eq!(code.to_string(), "SH.510300");
    }

    #[test]
    fn test_full_code_us_stock() {
        let code: AssetCode = "NYSE.AAPL".parse().unwrap();
        assert_eq!(code.market_code(), &MarketCode::Nyse);
        assert_eq!(code.asset_code(), "AAPL");
        assert_eq!(code.full_code(), "NYSE.AAPL");
    }

    #[test]
    fn test_from_full_code_rejects_malformed() {
        assert!(AssetCode::from_full_code("510300").is_err());
        assert!(AssetCode::from_full_code(".510300").is_err());
        assert!(AssetCode::from_full_code("SH.").is_err());
        assert!(AssetCode::from_full_code("").is_err());
    }

    #[test]
    fn test_other_market_preserved() {
        let code = AssetCode::from_full_code("hk.00700").unwrap();
        assert_eq!(code.market_code(), &MarketCode::Other("HK".to_string()));
        assert_eq!(code.full_code(), "HK.00700");
    }

    #[test]
    fn test_exchange_from_cn_code() {
        assert_eq!(MarketCode::from_cn_stock_code("600519"), Some(MarketCode::Sh));
        assert_eq!(MarketCode::from_cn_stock_code("688981"), Some(MarketCode::Sh));
        assert_eq!(MarketCode::from_cn_stock_code("510300"), Some(MarketCode::Sh));
        assert_eq!(MarketCode::from_cn_stock_code("113050"), Some(MarketCode::Sh));
        assert_eq!(MarketCode::from_cn_stock_code("000001"), Some(MarketCode::Sz));
        assert_eq!(MarketCode::from_cn_stock_code("300750"), Some(MarketCode::Sz));
        assert_eq!(MarketCode::from_cn_stock_code("159919"), Some(MarketCode::Sz));
        assert_eq!(MarketCode::from_cn_stock_code("830799"), Some(MarketCode::Bj));
        assert_eq!(MarketCode::from_cn_stock_code("430047"), Some(MarketCode::Bj));
        assert_eq!(MarketCode::from_cn_stock_code("920002"), Some(MarketCode::Bj));
        assert_eq!(MarketCode::from_cn_stock_code("AAPL"), None);
        assert_eq!(MarketCode::from_cn_stock_code("60051"), None);
    }

    #[test]
    fn test_eastmoney_secid() {
        assert_eq!(
            AssetCode::parse("SH", "510300").unwrap().eastmoney_secid().unwrap(),
            "1.510300"
        );
        assert_eq!(
            AssetCode::parse("SZ", "159919").unwrap().eastmoney_secid().unwrap(),
            "0.159919"
        );
        assert!(AssetCode::parse("NYSE", "AAPL")
            .unwrap()
            .eastmoney_secid()
            .is_err());
    }

    #[test]
    fn test_asset_type_from_str() {
        assert_eq!("etf".parse::<AssetType>().unwrap(), AssetType::Etf);
        assert_eq!("REIT".parse::<AssetType>().unwrap(), AssetType::Reit);
        assert!("WARRANT".parse::<AssetType>().is_err());
    }

    #[test]
    fn test_market_code_serde_as_string() {
        let json = serde_json::to_string(&MarketCode::Sz).unwrap();
        assert_eq!(json, "\"SZ\"");
        let parsed: MarketCode = serde_json::from_str("\"nasdaq\"").unwrap();
        assert_eq!(parsed, MarketCode::Nasdaq);
    }

    proptest! {
        #[test]
        fn full_code_reparses_to_same_pair(
            market in "[A-Z]{2,6}",
            asset in "[0-9A-Z]{1,8}",
        ) {
            let code = AssetCode::parse(&market, &asset).unwrap();
            let reparsed = AssetCode::from_full_code(&code.full_code()).unwrap();
            prop_assert_eq!(reparsed.full_code(), format!("{}.{}", market, asset));
            prop_assert_eq!(reparsed, code);
        }
    }
}
