//! 시세 주기 및 복권(수정주가) 코드.
//!
//! 두 코드는 모두 레코드 기본키의 일부이므로 숫자 값이 바뀌면 안 됩니다.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 시세 주기 (`freq_code`).
///
/// 숫자 값은 Eastmoney `klt` 파라미터와 동일합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// 1분봉
    Min1,
    /// 5분봉
    Min5,
    /// 15분봉
    Min15,
    /// 30분봉
    Min30,
    /// 60분봉
    Min60,
    /// 일봉
    Daily,
    /// 주봉
    Weekly,
    /// 월봉
    Monthly,
}

impl Frequency {
    /// 저장되는 숫자 코드.
    pub fn code(&self) -> i32 {
        match self {
            Frequency::Min1 => 1,
            Frequency::Min5 => 5,
            Frequency::Min15 => 15,
            Frequency::Min30 => 30,
            Frequency::Min60 => 60,
            Frequency::Daily => 101,
            Frequency::Weekly => 102,
            Frequency::Monthly => 103,
        }
    }

    /// 숫자 코드에서 변환합니다.
    pub fn from_code(code: i64) -> CoreResult<Self> {
        match code {
            1 => Ok(Frequency::Min1),
            5 => Ok(Frequency::Min5),
            15 => Ok(Frequency::Min15),
            30 => Ok(Frequency::Min30),
            60 => Ok(Frequency::Min60),
            101 => Ok(Frequency::Daily),
            102 => Ok(Frequency::Weekly),
            103 => Ok(Frequency::Monthly),
            other => Err(CoreError::UnsupportedCode(other)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 복권 방식 (`adj_code`).
///
/// 숫자 값은 Eastmoney `fqt` 파라미터와 동일합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjustment {
    /// 원주가
    #[default]
    None,
    /// 전복권
    Pre,
    /// 후복권
    Post,
}

impl Adjustment {
    pub fn code(&self) -> i32 {
        match self {
            Adjustment::None => 0,
            Adjustment::Pre => 1,
            Adjustment::Post => 2,
        }
    }

    pub fn from_code(code: i64) -> CoreResult<Self> {
        match code {
            0 => Ok(Adjustment::None),
            1 => Ok(Adjustment::Pre),
            2 => Ok(Adjustment::Post),
            other => Err(CoreError::UnsupportedCode(other)),
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
