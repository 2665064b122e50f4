//! tracing 기반 로깅 초기화.
//!
//! 배치 작업은 한 번 실행되고 종료되므로 프로세스 시작 시 한 번만 초기화합니다.
//! - **pretty**: 터미널에서 직접 실행할 때
//! - **json**: 로그 수집기로 보낼 때
//! - **compact**: cron 등에서 한 줄 로그가 필요할 때

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 워크스페이스 crate의 로그 대상.
pub const WORKSPACE_TARGETS: &[&str] = &["warehouse_etl", "warehouse_data", "warehouse_core"];

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 기본 필터 (`RUST_LOG`가 있으면 그 값이 우선)
    pub level: String,
    pub format: LogFormat,
    /// 파일명과 줄 번호 포함 여부
    pub with_file: bool,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_file: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 워크스페이스의 모든 crate에 같은 레벨을 적용합니다.
    ///
    /// 작업 실행은 `warehouse_etl`에 있지만 행 단위 경고와 테이블 교체 로그는
    /// `warehouse_core`, `warehouse_data`에서 나옵니다.
    pub fn for_workspace(level: &str) -> Self {
        let directives: Vec<String> = WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level.trim()))
            .collect();
        Self::new(directives.join(","))
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_file(mut self, enabled: bool) -> Self {
        self.with_file = enabled;
        self
    }

    /// `LOG_FORMAT` 환경변수로 형식을 덮어씁니다.
    ///
    /// 잘못된 값은 무시하고 기존 형식을 유지합니다.
    pub fn with_env_format(self) -> Self {
        match std::env::var("LOG_FORMAT").ok().and_then(|s| s.parse().ok()) {
            Some(format) => self.with_format(format),
            None => self,
        }
    }
}

/// 로깅 시스템을 초기화합니다.
///
/// ```no_run
/// use warehouse_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::new("warehouse_etl=debug").with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_file(config.with_file)
            .with_line_number(config.with_file)
            .with_target(config.with_target)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_file(config.with_file)
            .with_line_number(config.with_file)
            .with_target(config.with_target)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_file(config.with_file)
            .with_line_number(config.with_file)
            .with_target(config.with_target)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    tracing::debug!(format = ?config.format, level = %config.level, "로깅 초기화 완료");

    Ok(())
}

/// 적재 대상 테이블이 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! job_span {
    ($name:expr, $table:expr, $source:expr) => {
        tracing::info_span!($name, table = %$table, source = %$source)
    };
}
