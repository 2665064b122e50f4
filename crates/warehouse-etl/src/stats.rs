//! 작업 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 적재 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobStats {
    /// 읽거나 조회한 원천 행 수
    pub source_rows: usize,
    /// 대상 테이블에 쓴 행 수
    pub written_rows: usize,
    /// 매칭 실패 등으로 제외된 행 수
    pub skipped: usize,
    /// 행 또는 종목 단위 에러 수
    pub errors: usize,
    /// 데이터가 없었던 종목 수
    pub empty: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl JobStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 원천 대비 적재 비율 (%)
    pub fn load_rate(&self) -> f64 {
        if self.source_rows == 0 {
            0.0
        } else {
            (self.written_rows as f64 / self.source_rows as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, job: &str) {
        tracing::info!(
            job = job,
            source_rows = self.source_rows,
            written_rows = self.written_rows,
            skipped = self.skipped,
            errors = self.errors,
            empty = self.empty,
            load_rate = format!("{:.1}%", self.load_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "작업 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rate() {
        let stats = JobStats {
            source_rows: 200,
            written_rows: 150,
            ..Default::default()
        };
        assert!((stats.load_rate() - 75.0).abs() < f64::EPSILON);
        assert_eq!(JobStats::new().load_rate(), 0.0);
    }
}
