//! 과거 시세(K선) Provider.

use crate::error::Result;
use crate::provider::eastmoney::{EastmoneyClient, KlineSeries};
use async_trait::async_trait;
use chrono::NaiveDate;
use warehouse_core::{Adjustment, AssetCode, Frequency, OdsFundBar};

const RANGE_FORMAT: &str = "%Y%m%d";

/// 조회 기간 (양 끝 포함).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KlineRange {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl KlineRange {
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Self {
        Self { begin, end }
    }

    /// `YYYYMMDD` 문자열 쌍에서 생성합니다.
    pub fn parse(begin: &str, end: &str) -> std::result::Result<Self, chrono::ParseError> {
        Ok(Self {
            begin: NaiveDate::parse_from_str(begin, RANGE_FORMAT)?,
            end: NaiveDate::parse_from_str(end, RANGE_FORMAT)?,
        })
    }

    pub fn begin_str(&self) -> String {
        self.begin.format(RANGE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(RANGE_FORMAT).to_string()
    }
}

/// 일봉 시세 Provider trait.
#[async_trait]
pub trait KlineProvider: Send + Sync {
    fn name(&self) -> &str;

    /// 한 종목의 일봉을 원천(ods) 레코드 형태로 조회합니다.
    async fn fetch_daily_bars(
        &self,
        code: &AssetCode,
        range: &KlineRange,
        adjustment: Adjustment,
    ) -> Result<Vec<OdsFundBar>>;
}

#[async_trait]
impl KlineProvider for EastmoneyClient {
    fn name(&self) -> &str {
        "eastmoney"
    }

    async fn fetch_daily_bars(
        &self,
        code: &AssetCode,
        range: &KlineRange,
        adjustment: Adjustment,
    ) -> Result<Vec<OdsFundBar>> {
        let secid = code.eastmoney_secid()?;
        let series = self
            .fetch_klines(
                &secid,
                Frequency::Daily,
                adjustment,
                &range.begin_str(),
                &range.end_str(),
            )
            .await?;

        Ok(series_to_ods_bars(series, code))
    }
}

/// K선 응답을 원천 레코드로 변환합니다.
///
/// 응답의 종목코드가 비어 있으면 요청한 코드를 사용합니다.
pub fn series_to_ods_bars(series: KlineSeries, requested: &AssetCode) -> Vec<OdsFundBar> {
    let asset_code = if series.code.trim().is_empty() {
        requested.asset_code().to_string()
    } else {
        series.code.trim().to_string()
    };
    let code_name = Some(series.name.trim().to_string()).filter(|n| !n.is_empty());

    series
        .klines
        .into_iter()
        .map(|k| OdsFundBar {
            code_name: code_name.clone(),
            asset_code: asset_code.clone(),
            date: k.date,
            open: k.open,
            close: k.close,
            high: k.high,
            low: k.low,
            volume: k.volume,
            amount: k.amount,
            amplitude: k.amplitude,
            pct_chg: k.pct_chg,
            price_chg: k.price_chg,
            turn: k.turnover,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::eastmoney::parse_kline_line;
    use rust_decimal_macros::dec;
    use warehouse_core::MarketCode;

    #[test]
    fn test_kline_range_format() {
        let range = KlineRange::parse("19000101", "20500101").unwrap();
        assert_eq!(range.begin_str(), "19000101");
        assert_eq!(range.end_str(), "20500101");
        assert!(KlineRange::parse("2024-01-01", "20500101").is_err());
    }

    #[test]
    fn test_series_to_ods_bars() {
        let series = KlineSeries {
            code: "510300".to_string(),
            market: 1,
            name: "沪深300ETF".to_string(),
            klines: vec![parse_kline_line(
                "2024-01-02,3.500,3.480,3.510,3.470,1234567,432100000.00,1.14,-0.57,-0.020,0.45",
            )
            .unwrap()],
        };
        let requested = AssetCode::new(MarketCode::Sh, "510300");

        let bars = series_to_ods_bars(series, &requested);

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].asset_code, "510300");
        assert_eq!(bars[0].code_name.as_deref(), Some("沪深300ETF"));
        assert_eq!(bars[0].turn, Some(dec!(0.45)));
    }

    #[test]
    fn test_series_without_code_uses_requested() {
        let series = KlineSeries {
            code: String::new(),
            market: -1,
            name: String::new(),
            klines: vec![parse_kline_line("2024-01-02,1,1,1,1,1,1,0,0,0,0").unwrap()],
        };
        let bars = series_to_ods_bars(series, &AssetCode::new(MarketCode::Sz, "159919"));
        assert_eq!(bars[0].asset_code, "159919");
        assert_eq!(bars[0].code_name, None);
    }
}
