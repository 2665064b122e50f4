//! 환경변수 기반 설정 모듈.

use crate::error::{EtlError, Result};
use std::str::FromStr;
use std::time::Duration;
use warehouse_core::Adjustment;
use warehouse_data::provider::eastmoney::{DEFAULT_BASE_URL, DEFAULT_HISTORY_BASE_URL};
use warehouse_data::{DatabaseConfig, EastmoneyConfig, KlineRange};

/// ETL 전체 설정
#[derive(Debug, Clone)]
pub struct EtlConfig {
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 데이터 제공자 설정
    pub provider: ProviderConfig,
    /// 일봉 수집 설정
    pub ohlc_fetch: OhlcFetchConfig,
    /// 테이블 쓰기 설정
    pub write: WriteConfig,
}

/// 데이터 제공자 설정
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub history_base_url: String,
    /// HTTP 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 종목 목록 페이지 크기
    pub page_size: usize,
}

/// 일봉 수집 설정
#[derive(Debug, Clone)]
pub struct OhlcFetchConfig {
    /// API 요청 간 딜레이 (밀리초)
    pub request_delay_ms: u64,
    /// 복권 방식 코드 (0: 없음, 1: 전복권, 2: 후복권)
    pub adjust: i64,
    /// 수집 시작 날짜 (YYYYMMDD)
    pub start_date: String,
    /// 수집 종료 날짜 (YYYYMMDD)
    pub end_date: String,
}

/// 테이블 쓰기 설정
#[derive(Debug, Clone)]
pub struct WriteConfig {
    /// 한 번에 삽입할 행 수
    pub chunk_size: usize,
}

impl EtlConfig {
    /// 환경변수에서 설정 로드 (`.env` 포함)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로 설정을 구성합니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").ok_or_else(|| {
            EtlError::Config("DATABASE_URL 환경변수가 설정되지 않았습니다".to_string())
        })?;

        let mut database = DatabaseConfig::new(url);
        database.max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 4);

        let config = Self {
            database,
            provider: ProviderConfig {
                base_url: lookup("PROVIDER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                history_base_url: lookup("PROVIDER_HISTORY_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_HISTORY_BASE_URL.to_string()),
                timeout_secs: parse_or(&lookup, "PROVIDER_TIMEOUT_SECS", 30),
                page_size: parse_or(&lookup, "PROVIDER_PAGE_SIZE", 100),
            },
            ohlc_fetch: OhlcFetchConfig {
                request_delay_ms: parse_or(&lookup, "OHLC_REQUEST_DELAY_MS", 500),
                adjust: parse_or(&lookup, "OHLC_ADJUST", 0),
                start_date: lookup("OHLC_START_DATE").unwrap_or_else(|| "19000101".to_string()),
                end_date: lookup("OHLC_END_DATE").unwrap_or_else(|| "20500101".to_string()),
            },
            write: WriteConfig {
                chunk_size: parse_or(&lookup, "WRITE_CHUNK_SIZE", 5000),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// 잘못된 값이 실행 중간에 발견되지 않도록 미리 검증합니다.
    fn validate(&self) -> Result<()> {
        self.ohlc_fetch.adjustment()?;
        self.ohlc_fetch.range()?;
        if self.write.chunk_size == 0 {
            return Err(EtlError::Config("WRITE_CHUNK_SIZE는 1 이상이어야 합니다".to_string()));
        }
        Ok(())
    }
}

impl ProviderConfig {
    /// Eastmoney 클라이언트 설정으로 변환
    pub fn eastmoney(&self) -> EastmoneyConfig {
        EastmoneyConfig {
            base_url: self.base_url.clone(),
            history_base_url: self.history_base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            page_size: self.page_size.max(1),
        }
    }
}

impl OhlcFetchConfig {
    /// API 요청 간 딜레이를 Duration으로 반환
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn adjustment(&self) -> Result<Adjustment> {
        Ok(Adjustment::from_code(self.adjust)?)
    }

    pub fn range(&self) -> Result<KlineRange> {
        let range = KlineRange::parse(&self.start_date, &self.end_date).map_err(|e| {
            EtlError::Config(format!(
                "수집 기간 형식 오류 ({} ~ {}): {}",
                self.start_date, self.end_date, e
            ))
        })?;

        if range.begin > range.end {
            return Err(EtlError::Config(format!(
                "수집 시작일이 종료일보다 늦습니다: {} > {}",
                self.start_date, self.end_date
            )));
        }
        Ok(range)
    }
}

/// 값을 파싱 (없거나 실패 시 기본값 사용)
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
