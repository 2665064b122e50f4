//! 레코드 기본키 파생.
//!
//! 시세 레코드의 `primary_key`는 학습 피처로 쓰이지 않고 테이블 간 조인에만
//! 사용됩니다. 종목명은 최신 명칭이라 장기적으로 의미가 없으므로 키에 넣지
//! 않습니다.
//!
//! ```text
//! primary_key = md5_hex(time ‖ full_code ‖ freq_code ‖ adj_code)
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::{Adjustment, Frequency};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use md5::{Digest, Md5};

/// `time` 컬럼 형식 (예: `20240102000000`).
pub const TIME_KEY_FORMAT: &str = "%Y%m%d%H%M%S";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y%m%d%H%M%S",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%#z", "%Y-%m-%dT%H:%M:%S%#z"];

/// 문자열의 MD5 해시를 소문자 16진수로 반환합니다.
pub fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}

/// 거래 일시를 `time` 키 문자열로 변환합니다.
pub fn time_key(ts: NaiveDateTime) -> String {
    ts.format(TIME_KEY_FORMAT).to_string()
}

/// 원천 데이터의 날짜/일시 문자열을 파싱합니다.
///
/// 날짜만 있으면 자정으로 간주합니다. 타임존 오프셋이 붙은 값은 현지 시각을
/// 그대로 사용합니다.
pub fn parse_trade_time(raw: &str) -> CoreResult<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(CoreError::InvalidDate(raw.to_string()));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(ts);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            if let Some(ts) = date.and_hms_opt(0, 0, 0) {
                return Ok(ts);
            }
        }
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(value, fmt) {
            return Ok(ts.naive_local());
        }
    }

    Err(CoreError::InvalidDate(raw.to_string()))
}

/// 시세 레코드의 기본키를 계산합니다.
///
/// 구분자 없이 연결하므로 입력 순서를 바꾸면 키가 달라집니다.
pub fn primary_key(
    time: &str,
    full_code: &str,
    frequency: Frequency,
    adjustment: Adjustment,
) -> String {
    md5_hex(&format!(
        "{}{}{}{}",
        time,
        full_code,
        frequency.code(),
        adjustment.code()
    ))
}
