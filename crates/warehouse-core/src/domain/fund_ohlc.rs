//! 펀드 일봉 시세 정규화 (ods → dwd).
//!
//! 원천(ods) 레코드는 데이터 제공자의 컬럼명을 그대로 가지고 있습니다.
//! 정규화 과정:
//! 1. 컬럼명을 표준 이름으로 변경
//! 2. `freq_code`, `adj_code` 고정값 부여
//! 3. 거래일을 `time` 키로 변환
//! 4. 펀드 기본정보와 `asset_code` 기준 inner join
//! 5. `primary_key` 계산

use crate::domain::key::{parse_trade_time, primary_key, time_key};
use crate::types::{Adjustment, AssetCode, Frequency};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 원천 컬럼명 → 표준 컬럼명 매핑.
pub const ODS_FUND_COLUMN_MAP: &[(&str, &str)] = &[
    ("股票名称", "code_name"),
    ("股票代码", "asset_code"),
    ("日期", "date"),
    ("开盘", "open"),
    ("收盘", "close"),
    ("最高", "high"),
    ("最低", "low"),
    ("成交量", "volume"),
    ("成交额", "amount"),
    ("振幅", "amplitude"),
    ("涨跌幅", "pct_chg"),
    ("涨跌额", "price_chg"),
    ("换手率", "turn"),
];

/// dwd 테이블 컬럼 순서.
pub const DWD_FUND_COLUMNS: &[&str] = &[
    "full_code",
    "asset_code",
    "market_code",
    "code_name",
    "date",
    "time",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "amount",
    "amplitude",
    "pct_chg",
    "price_chg",
    "turn",
    "freq_code",
    "adj_code",
    "primary_key",
];

/// 원천 펀드 시세 레코드 (표준 필드명으로 로드된 상태).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OdsFundBar {
    /// 종목명 (股票名称)
    pub code_name: Option<String>,
    /// 종목코드 (股票代码)
    pub asset_code: String,
    /// 거래일 원문 (日期)
    pub date: String,
    pub open: Option<Decimal>,
    pub close: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub volume: Option<i64>,
    pub amount: Option<Decimal>,
    /// 진폭 (%)
    pub amplitude: Option<Decimal>,
    /// 등락률 (%)
    pub pct_chg: Option<Decimal>,
    /// 등락액
    pub price_chg: Option<Decimal>,
    /// 회전율 (%)
    pub turn: Option<Decimal>,
}

/// 정규화된 펀드 시세 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DwdFundBar {
    pub full_code: String,
    pub asset_code: String,
    pub market_code: String,
    pub code_name: Option<String>,
    pub date: NaiveDate,
    /// `%Y%m%d%H%M%S` 형식 시각 키
    pub time: String,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
    pub volume: Option<i64>,
    pub amount: Option<Decimal>,
    pub amplitude: Option<Decimal>,
    pub pct_chg: Option<Decimal>,
    pub price_chg: Option<Decimal>,
    pub turn: Option<Decimal>,
    pub freq_code: i32,
    pub adj_code: i32,
    pub primary_key: String,
}

/// 정규화 결과.
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    /// 정규화된 레코드 (원천 순서 유지)
    pub rows: Vec<DwdFundBar>,
    /// 펀드 기본정보에 없는 코드라 제외된 원천 레코드 수
    pub unmatched: usize,
    /// 거래일을 파싱할 수 없어 제외된 원천 레코드 수
    pub invalid_dates: usize,
}

/// 펀드 시세 정규화기.
#[derive(Debug, Clone, Copy)]
pub struct FundOhlcNormalizer {
    frequency: Frequency,
    adjustment: Adjustment,
}

impl Default for FundOhlcNormalizer {
    fn default() -> Self {
        Self::new(Frequency::Daily, Adjustment::None)
    }
}

impl FundOhlcNormalizer {
    pub fn new(frequency: Frequency, adjustment: Adjustment) -> Self {
        Self {
            frequency,
            adjustment,
        }
    }

    /// 원천 레코드를 정규화합니다.
    ///
    /// 같은 `asset_code`가 여러 시장에 존재하면 매칭된 코드마다 한 행씩
    /// 생성됩니다 (inner join).
    pub fn normalize(&self, bars: &[OdsFundBar], codes: &[AssetCode]) -> NormalizeOutcome {
        let mut by_asset: HashMap<&str, Vec<&AssetCode>> = HashMap::new();
        for code in codes {
            by_asset.entry(code.asset_code()).or_default().push(code);
        }

        let mut outcome = NormalizeOutcome::default();

        for bar in bars {
            let matches = match by_asset.get(bar.asset_code.trim()) {
                Some(matches) => matches,
                None => {
                    outcome.unmatched += 1;
                    continue;
                }
            };

            let traded_at = match parse_trade_time(&bar.date) {
                Ok(ts) => ts,
                Err(e) => {
                    tracing::warn!(
                        asset_code = %bar.asset_code,
                        date = %bar.date,
                        error = %e,
                        "거래일 파싱 실패, 레코드 제외"
                    );
                    outcome.invalid_dates += 1;
                    continue;
                }
            };
            let time = time_key(traded_at);

            for code in matches {
                let full_code = code.full_code();
                let key = primary_key(&time, &full_code, self.frequency, self.adjustment);

                outcome.rows.push(DwdFundBar {
                    full_code,
                    asset_code: code.asset_code().to_string(),
                    market_code: code.market_code().to_string(),
                    code_name: bar.code_name.clone(),
                    date: traded_at.date(),
                    time: time.clone(),
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume,
                    amount: bar.amount,
                    amplitude: bar.amplitude,
                    pct_chg: bar.pct_chg,
                    price_chg: bar.price_chg,
                    turn: bar.turn,
                    freq_code: self.frequency.code(),
                    adj_code: self.adjustment.code(),
                    primary_key: key,
                });
            }
        }

        outcome
    }
}
