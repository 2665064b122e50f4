//! 종목 마스터 Provider.
//!
//! A주 전체 종목 목록과 상장지수펀드 목록을 제공합니다.

use crate::error::Result;
use crate::provider::eastmoney::{ClistItem, EastmoneyClient, CN_A_SHARE_FILTER, CN_ETF_FILTER};
use async_trait::async_trait;
use std::collections::HashSet;
use warehouse_core::{AssetCode, AssetType, FundListing, MarketCode, StockListing};

/// 종목 마스터 Provider trait.
#[async_trait]
pub trait SymbolListProvider: Send + Sync {
    /// Provider 이름 (로그/통계용).
    fn name(&self) -> &str;

    /// 전체 A주 종목 목록.
    async fn fetch_stocks(&self) -> Result<Vec<StockListing>>;

    /// 전체 상장지수펀드 목록.
    async fn fetch_funds(&self) -> Result<Vec<FundListing>>;
}

/// Eastmoney 기반 종목 마스터 Provider.
pub struct EastmoneySymbolProvider {
    client: EastmoneyClient,
}

impl EastmoneySymbolProvider {
    pub fn new(client: EastmoneyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SymbolListProvider for EastmoneySymbolProvider {
    fn name(&self) -> &str {
        "eastmoney"
    }

    async fn fetch_stocks(&self) -> Result<Vec<StockListing>> {
        let items = self.client.fetch_clist(CN_A_SHARE_FILTER).await?;
        let fetched = items.len();
        let stocks = stock_listings(items);

        tracing::info!(fetched, kept = stocks.len(), "A주 종목 목록 조회 완료");
        Ok(stocks)
    }

    async fn fetch_funds(&self) -> Result<Vec<FundListing>> {
        let items = self.client.fetch_clist(CN_ETF_FILTER).await?;
        let fetched = items.len();
        let funds = fund_listings(items);

        tracing::info!(fetched, kept = funds.len(), "ETF 목록 조회 완료");
        Ok(funds)
    }
}

/// 종목 목록을 종목코드 기준으로 중복 제거하고 정렬합니다.
///
/// 거래소는 코드 접두어로 먼저 판별하고, 판별할 수 없으면 응답의 시장 번호를
/// 사용합니다. 둘 다 실패한 행은 제외합니다.
pub fn stock_listings(items: Vec<ClistItem>) -> Vec<StockListing> {
    let mut seen = HashSet::new();
    let mut stocks: Vec<StockListing> = items
        .into_iter()
        .filter_map(|item| {
            let code = item.code.trim().to_string();
            let exchange = MarketCode::from_cn_stock_code(&code)
                .or_else(|| MarketCode::from_eastmoney_id(item.market));

            let exchange = match exchange {
                Some(exchange) => exchange,
                None => {
                    tracing::warn!(code = %code, market = item.market, "거래소 판별 실패, 제외");
                    return None;
                }
            };

            if !seen.insert(code.clone()) {
                return None;
            }

            Some(StockListing {
                list_date: item.list_date(),
                stock_code: code,
                short_name: item.name.trim().to_string(),
                exchange,
            })
        })
        .collect();

    stocks.sort_by(|a, b| a.stock_code.cmp(&b.stock_code));
    stocks
}

/// ETF 목록을 코드 3종 세트로 정규화합니다.
///
/// 펀드는 응답의 시장 번호가 정확하므로 이를 우선 사용합니다.
pub fn fund_listings(items: Vec<ClistItem>) -> Vec<FundListing> {
    let mut seen = HashSet::new();
    let mut funds: Vec<FundListing> = items
        .into_iter()
        .filter_map(|item| {
            let code = item.code.trim();
            let market = MarketCode::from_eastmoney_id(item.market)
                .or_else(|| MarketCode::from_cn_stock_code(code))?;
            let asset = AssetCode::new(market, code);

            if !seen.insert(asset.full_code()) {
                return None;
            }

            Some(FundListing {
                code: asset,
                code_name: item.name.trim().to_string(),
                asset_type: AssetType::Etf,
            })
        })
        .collect();

    funds.sort_by_key(|f| f.full_code());
    funds
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(code: &str, market: i64, name: &str, list_date: serde_json::Value) -> ClistItem {
        ClistItem {
            code: code.to_string(),
            market,
            name: name.to_string(),
            list_date,
        }
    }

    #[test]
    fn test_stock_listings_exchange_and_order() {
        let stocks = stock_listings(vec![
            item("600519", 1, "贵州茅台", serde_json::json!(20010827)),
            item("000001", 0, "平安银行", serde_json::json!(19910403)),
            item("830799", 0, "艾融软件", serde_json::json!("-")),
            item("000001", 0, "平安银行", serde_json::json!(19910403)),
        ]);

        assert_eq!(stocks.len(), 3);
        assert_eq!(stocks[0].stock_code, "000001");
        assert_eq!(stocks[0].exchange, MarketCode::Sz);
        assert_eq!(stocks[0].list_date, NaiveDate::from_ymd_opt(1991, 4, 3));
        assert_eq!(stocks[1].stock_code, "600519");
        assert_eq!(stocks[1].exchange, MarketCode::Sh);
        assert_eq!(stocks[2].exchange, MarketCode::Bj);
        assert_eq!(stocks[2].list_date, None);
    }

    #[test]
    fn test_stock_listings_falls_back_to_market_id() {
        let stocks = stock_listings(vec![
            item("T00018", 1, "上港转债", serde_json::Value::Null),
            item("X12345", 7, "unknown", serde_json::Value::Null),
        ]);
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].exchange, MarketCode::Sh);
    }

    #[test]
    fn test_fund_listings_normalize_codes() {
        let funds = fund_listings(vec![
            item("510300", 1, "沪深300ETF", serde_json::Value::Null),
            item("159919", 0, "沪深300ETF ", serde_json::Value::Null),
        ]);

        let full_codes: Vec<String> = funds.iter().map(|f| f.full_code()).collect();
        assert_eq!(full_codes, vec!["SH.510300", "SZ.159919"]);
        assert_eq!(funds[1].code_name, "沪深300ETF");
        assert!(funds.iter().all(|f| f.asset_type == AssetType::Etf));
    }
}
