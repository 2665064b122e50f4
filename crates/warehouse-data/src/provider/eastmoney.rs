//! Eastmoney 시세 API 클라이언트.
//!
//! 인증 없이 사용할 수 있는 두 개의 엔드포인트만 사용합니다:
//! - `push2` `/api/qt/clist/get`: 종목 목록 (페이지 단위)
//! - `push2his` `/api/qt/stock/kline/get`: 과거 K선
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use warehouse_data::provider::eastmoney::{EastmoneyClient, CN_ETF_FILTER};
//!
//! let client = EastmoneyClient::new()?;
//! let etfs = client.fetch_clist(CN_ETF_FILTER).await?;
//! let series = client
//!     .fetch_klines("1.510300", Frequency::Daily, Adjustment::None, "19000101", "20500101")
//!     .await?;
//! ```

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use warehouse_core::{Adjustment, Frequency};

/// 종목 목록 API 기본 URL.
pub const DEFAULT_BASE_URL: &str = "https://push2.eastmoney.com";
/// K선 API 기본 URL.
pub const DEFAULT_HISTORY_BASE_URL: &str = "https://push2his.eastmoney.com";

/// 상하이/선전/베이징 A주 전체 필터 (메인보드, 창업판, 과창판, 북교소).
pub const CN_A_SHARE_FILTER: &str = "m:0+t:6,m:0+t:80,m:1+t:2,m:1+t:23,m:0+t:81+s:2048";
/// 상장지수펀드 전체 필터.
pub const CN_ETF_FILTER: &str = "b:MK0021,b:MK0022,b:MK0023,b:MK0024";

const CLIST_FIELDS: &str = "f12,f13,f14,f26";
const KLINE_FIELDS1: &str = "f1,f2,f3,f4,f5,f6";
const KLINE_FIELDS2: &str = "f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61";
const KLINE_FIELD_COUNT: usize = 11;
const USER_AGENT: &str = "Mozilla/5.0";

/// 클라이언트 설정.
#[derive(Debug, Clone)]
pub struct EastmoneyConfig {
    pub base_url: String,
    pub history_base_url: String,
    pub timeout: Duration,
    /// 종목 목록 페이지 크기 (서버 상한 100)
    pub page_size: usize,
}

impl Default for EastmoneyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            history_base_url: DEFAULT_HISTORY_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            page_size: 100,
        }
    }
}

/// Eastmoney API 클라이언트.
#[derive(Clone)]
pub struct EastmoneyClient {
    client: reqwest::Client,
    config: EastmoneyConfig,
}

/// 종목 목록 한 행.
#[derive(Debug, Clone, Deserialize)]
pub struct ClistItem {
    /// 종목코드
    #[serde(rename = "f12")]
    pub code: String,
    /// 시장 번호 (1: 상하이, 0: 선전/베이징)
    #[serde(rename = "f13")]
    pub market: i64,
    /// 종목명
    #[serde(rename = "f14")]
    pub name: String,
    /// 상장일 (YYYYMMDD 숫자 또는 "-")
    #[serde(rename = "f26", default)]
    pub list_date: serde_json::Value,
}

impl ClistItem {
    /// 상장일을 파싱합니다. 제공되지 않으면 `None`.
    pub fn list_date(&self) -> Option<NaiveDate> {
        let raw = match &self.list_date {
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => s.trim().to_string(),
            _ => return None,
        };
        NaiveDate::parse_from_str(&raw, "%Y%m%d").ok()
    }
}

/// K선 한 개 (문자열 응답을 파싱한 결과).
#[derive(Debug, Clone, PartialEq)]
pub struct EastmoneyKline {
    pub date: String,
    pub open: Option<Decimal>,
    pub close: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub volume: Option<i64>,
    pub amount: Option<Decimal>,
    pub amplitude: Option<Decimal>,
    pub pct_chg: Option<Decimal>,
    pub price_chg: Option<Decimal>,
    pub turnover: Option<Decimal>,
}

/// 한 종목의 K선 응답.
#[derive(Debug, Clone)]
pub struct KlineSeries {
    pub code: String,
    pub market: i64,
    pub name: String,
    pub klines: Vec<EastmoneyKline>,
}

#[derive(Deserialize)]
struct ClistResponse {
    data: Option<ClistData>,
}

#[derive(Deserialize)]
struct ClistData {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    diff: Vec<ClistItem>,
}

#[derive(Deserialize)]
struct KlineResponse {
    data: Option<KlineData>,
}

#[derive(Deserialize)]
struct KlineData {
    code: String,
    market: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    klines: Vec<String>,
}

impl EastmoneyClient {
    /// 기본 설정으로 클라이언트를 생성합니다.
    pub fn new() -> Result<Self> {
        Self::with_config(EastmoneyConfig::default())
    }

    pub fn with_config(config: EastmoneyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    /// 필터에 해당하는 전체 종목 목록을 조회합니다.
    ///
    /// 응답의 `total`에 도달하거나 빈 페이지가 나올 때까지 페이지를 넘깁니다.
    pub async fn fetch_clist(&self, filter: &str) -> Result<Vec<ClistItem>> {
        let url = format!("{}/api/qt/clist/get", self.config.base_url);
        let page_size = self.config.page_size.to_string();
        let mut items: Vec<ClistItem> = Vec::new();
        let mut page = 1usize;

        loop {
            let page_str = page.to_string();
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("pn", page_str.as_str()),
                    ("pz", page_size.as_str()),
                    ("po", "0"),
                    ("np", "1"),
                    ("fltt", "2"),
                    ("invt", "2"),
                    ("fid", "f12"),
                    ("fs", filter),
                    ("fields", CLIST_FIELDS),
                ])
                .send()
                .await?
                .error_for_status()?;

            let body: ClistResponse = response.json().await?;
            let data = match body.data {
                Some(data) if !data.diff.is_empty() => data,
                _ => break,
            };

            let total = data.total;
            items.extend(data.diff);
            tracing::debug!(page, fetched = items.len(), total, "종목 목록 페이지 수신");

            if items.len() >= total {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// 한 종목의 K선을 조회합니다.
    ///
    /// `begin`, `end`는 `YYYYMMDD` 형식입니다. 존재하지 않는 종목은 빈 시리즈를
    /// 반환합니다.
    pub async fn fetch_klines(
        &self,
        secid: &str,
        frequency: Frequency,
        adjustment: Adjustment,
        begin: &str,
        end: &str,
    ) -> Result<KlineSeries> {
        let url = format!("{}/api/qt/stock/kline/get", self.config.history_base_url);
        let klt = frequency.code().to_string();
        let fqt = adjustment.code().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("secid", secid),
                ("fields1", KLINE_FIELDS1),
                ("fields2", KLINE_FIELDS2),
                ("klt", klt.as_str()),
                ("fqt", fqt.as_str()),
                ("beg", begin),
                ("end", end),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: KlineResponse = response.json().await?;
        let data = match body.data {
            Some(data) => data,
            None => {
                tracing::debug!(secid, "K선 데이터 없음");
                return Ok(KlineSeries {
                    code: secid
                        .split_once('.')
                        .map(|(_, code)| code)
                        .unwrap_or(secid)
                        .to_string(),
                    market: -1,
                    name: String::new(),
                    klines: Vec::new(),
                });
            }
        };

        let klines = data
            .klines
            .iter()
            .map(|line| parse_kline_line(line))
            .collect::<Result<Vec<_>>>()?;

        Ok(KlineSeries {
            code: data.code,
            market: data.market,
            name: data.name,
            klines,
        })
    }
}

/// 쉼표로 구분된 K선 한 줄을 파싱합니다.
///
/// 필드 순서: 일자, 시가, 종가, 고가, 저가, 거래량, 거래대금, 진폭, 등락률,
/// 등락액, 회전율.
pub fn parse_kline_line(line: &str) -> Result<EastmoneyKline> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < KLINE_FIELD_COUNT {
        return Err(DataError::ParseError(format!(
            "K선 필드 수 부족 ({} < {}): {}",
            fields.len(),
            KLINE_FIELD_COUNT,
            line
        )));
    }

    Ok(EastmoneyKline {
        date: fields[0].to_string(),
        open: parse_decimal_opt(fields[1]),
        close: parse_decimal_opt(fields[2]),
        high: parse_decimal_opt(fields[3]),
        low: parse_decimal_opt(fields[4]),
        volume: parse_volume_opt(fields[5]),
        amount: parse_decimal_opt(fields[6]),
        amplitude: parse_decimal_opt(fields[7]),
        pct_chg: parse_decimal_opt(fields[8]),
        price_chg: parse_decimal_opt(fields[9]),
        turnover: parse_decimal_opt(fields[10]),
    })
}

/// 숫자 문자열 파싱 ("-", 빈 값은 None)
fn parse_decimal_opt(raw: &str) -> Option<Decimal> {
    match raw {
        "" | "-" => None,
        value => Decimal::from_str(value)
            .or_else(|_| Decimal::from_scientific(value))
            .ok(),
    }
}

fn parse_volume_opt(raw: &str) -> Option<i64> {
    match raw {
        "" | "-" => None,
        value => value
            .parse::<i64>()
            .ok()
            .or_else(|| value.parse::<f64>().ok().map(|v| v.round() as i64)),
    }
}
