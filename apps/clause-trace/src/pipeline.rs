//! Bounded-wait analysis
//!
//! The engine itself never times out; this module runs it on a blocking task
//! and gives up after a fixed wait. A timeout is reported separately from a
//! task that failed.
//!
//! A blocking task cannot be cancelled, so a timeout only stops the wait. Drive
//! the future with [`run_detached`] so the abandoned work does not keep the
//! process alive once the caller has its answer.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use clause_engine::{segment, AnalyzeOptions, ClauseEngine};
use shared_types::AnalysisReport;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_PARAGRAPHS: usize = 10_000;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Analysis timed out after {0}ms")]
    Timeout(u64),

    #[error("Analysis task failed: {0}")]
    TaskFailed(String),

    #[error("Document has {found} paragraphs, limit is {limit}")]
    TooLarge { found: usize, limit: usize },
}

/// Per-request limits, chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub timeout_ms: u64,
    pub max_paragraphs: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_paragraphs: DEFAULT_MAX_PARAGRAPHS,
        }
    }
}

/// Run `work` on the blocking pool, waiting at most `timeout_ms`
pub async fn run_with_timeout<F, T>(timeout_ms: u64, work: F) -> Result<T, AnalysisError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(work),
    )
    .await;

    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(join_error)) => Err(AnalysisError::TaskFailed(join_error.to_string())),
        Err(_elapsed) => Err(AnalysisError::Timeout(timeout_ms)),
    }
}

/// Drive `future` on a fresh runtime, then drop the runtime without joining
/// blocking tasks that are still running
pub fn run_detached<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

/// Analyze a document within `limits`
pub async fn analyze_document(
    engine: Arc<ClauseEngine>,
    text: String,
    options: AnalyzeOptions,
    limits: Limits,
) -> Result<AnalysisReport, AnalysisError> {
    let paragraphs = segment(&text).len();
    if paragraphs > limits.max_paragraphs {
        warn!(paragraphs, limit = limits.max_paragraphs, "Refusing oversized document");
        return Err(AnalysisError::TooLarge {
            found: paragraphs,
            limit: limits.max_paragraphs,
        });
    }

    info!(
        chars = text.len(),
        paragraphs,
        clauses = engine.catalog().len(),
        "Starting analysis"
    );

    let report =
        run_with_timeout(limits.timeout_ms, move || engine.analyze(&text, options)).await?;

    info!(
        clauses = report.clause_traceability.len(),
        "Clause traceability completed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Instant;

    #[tokio::test]
    async fn test_analysis_completes() {
        let engine = Arc::new(ClauseEngine::default());
        let report = analyze_document(
            engine,
            "Emergency drill held monthly.\nWear PPE.".to_string(),
            AnalyzeOptions {
                include_summary: true,
            },
            Limits::default(),
        )
        .await
        .unwrap();

        assert_eq!(report.clause_traceability.len(), 4);
        assert!(report.summary.is_some());
    }

    #[tokio::test]
    async fn test_oversized_document_is_refused() {
        let engine = Arc::new(ClauseEngine::default());
        let limits = Limits {
            max_paragraphs: 2,
            ..Limits::default()
        };

        let result = analyze_document(
            engine,
            "one\ntwo\nthree".to_string(),
            AnalyzeOptions::default(),
            limits,
        )
        .await;

        assert!(matches!(
            result,
            Err(AnalysisError::TooLarge { found: 3, limit: 2 })
        ));
    }

    #[tokio::test]
    async fn test_timeout_is_distinct_from_failure() {
        let result = run_with_timeout(10, || {
            std::thread::sleep(Duration::from_millis(500));
        })
        .await;
        assert!(matches!(result, Err(AnalysisError::Timeout(10))));

        let result: Result<(), _> = run_with_timeout(1_000, || panic!("matcher exploded")).await;
        assert!(matches!(result, Err(AnalysisError::TaskFailed(_))));
    }

    #[test]
    fn test_timed_out_work_does_not_hold_the_caller() {
        let started = Instant::now();
        let result = run_detached(run_with_timeout(50, || {
            std::thread::sleep(Duration::from_secs(5));
        }))
        .unwrap();

        assert!(matches!(result, Err(AnalysisError::Timeout(50))));
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "returned after {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn test_detached_analysis_returns_report() {
        let engine = Arc::new(ClauseEngine::default());
        let report = run_detached(analyze_document(
            engine,
            "Wear PPE on site.".to_string(),
            AnalyzeOptions::default(),
            Limits::default(),
        ))
        .unwrap()
        .unwrap();

        assert_eq!(report.clause_traceability.len(), 4);
    }

    #[tokio::test]
    async fn test_value_is_returned() {
        let value = run_with_timeout(1_000, || 41 + 1).await.unwrap();
        assert_eq!(value, 42);
    }
}
