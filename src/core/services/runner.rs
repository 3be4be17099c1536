//! Run orchestration
//!
//! Evaluates every expectation of every suite concurrently, bounded by a
//! job limit, a per-call accessor timeout and an optional run deadline.
//! When the deadline elapses, in-flight and queued expectations are
//! reported as `error: cancelled` while completed results are kept.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::core::models::{AccessError, Expectation, ExpectationResult, Report, Suite, Summary};
use crate::core::ports::TargetAccessor;

use super::evaluator::{evaluate, judge};

/// Default number of expectations evaluated at once
pub const DEFAULT_JOBS: usize = 4;

/// Default bound on a single accessor call
pub const DEFAULT_ACCESSOR_TIMEOUT: Duration = Duration::from_secs(10);

/// Limits applied to a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum expectations evaluated concurrently
    pub jobs: usize,
    /// Bound on each accessor call
    pub accessor_timeout: Duration,
    /// Bound on the whole run
    pub run_timeout: Option<Duration>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            jobs: DEFAULT_JOBS,
            accessor_timeout: DEFAULT_ACCESSOR_TIMEOUT,
            run_timeout: None,
        }
    }
}

/// Evaluates suites against one target
pub struct Runner {
    accessor: Arc<dyn TargetAccessor>,
    options: RunOptions,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("target", &self.accessor.describe())
            .field("options", &self.options)
            .finish()
    }
}

impl Runner {
    /// Create a runner for a target
    #[must_use]
    pub fn new(accessor: Arc<dyn TargetAccessor>, options: RunOptions) -> Self {
        Self { accessor, options }
    }

    /// Evaluate all suites and collect one result per expectation
    ///
    /// Never fails: every problem is recorded in the report.
    pub async fn run(&self, suites: &[Suite]) -> Report {
        let started_at = chrono::Utc::now().to_rfc3339();
        let started = Instant::now();
        let target = self.accessor.describe();

        let planned: Vec<(String, Expectation)> = suites
            .iter()
            .flat_map(|suite| {
                suite.expectations.iter().map(|e| (suite.title.clone(), e.clone()))
            })
            .collect();

        info!("Evaluating {} expectation(s) against {target}", planned.len());

        let mut slots: Vec<Option<ExpectationResult>> = vec![None; planned.len()];
        let mut task_index = HashMap::new();
        let semaphore = Arc::new(Semaphore::new(self.options.jobs.max(1)));
        let mut tasks = JoinSet::new();

        for (index, (suite, expectation)) in planned.iter().cloned().enumerate() {
            let accessor = Arc::clone(&self.accessor);
            let semaphore = Arc::clone(&semaphore);
            let timeout = self.options.accessor_timeout;

            let handle = tasks.spawn(async move {
                // The semaphore is never closed, so acquiring cannot fail.
                let _permit = semaphore.acquire_owned().await.ok();
                evaluate(accessor.as_ref(), index, &suite, &expectation, timeout).await
            });
            task_index.insert(handle.id(), index);
        }

        let deadline = self.options.run_timeout.map(|limit| started + limit);
        let mut cancelled = false;

        loop {
            let next = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, tasks.join_next_with_id()).await {
                        Ok(next) => next,
                        Err(_) => {
                            cancelled = true;
                            break;
                        },
                    }
                },
                None => tasks.join_next_with_id().await,
            };

            match next {
                Some(Ok((_, result))) => {
                    let index = result.index;
                    slots[index] = Some(result);
                },
                Some(Err(error)) => {
                    warn!("Evaluation task ended abnormally: {error}");
                    if let Some(&index) = task_index.get(&error.id()) {
                        let (suite, expectation) = &planned[index];
                        let aborted = AccessError::ResourceUnavailable(format!(
                            "evaluation aborted: {error}"
                        ));
                        slots[index] = Some(judge(index, suite, expectation, Err(aborted)));
                    }
                },
                None => break,
            }
        }

        if cancelled {
            tasks.abort_all();
            let remaining = slots.iter().filter(|slot| slot.is_none()).count();
            warn!("Run timeout elapsed; cancelling {remaining} unfinished expectation(s)");
        }

        let results: Vec<ExpectationResult> = slots
            .into_iter()
            .zip(&planned)
            .enumerate()
            .map(|(index, (slot, (suite, expectation)))| {
                slot.unwrap_or_else(|| {
                    judge(index, suite, expectation, Err(AccessError::Cancelled))
                })
            })
            .collect();

        let summary = Summary::from_results(&results);
        info!(
            "Finished: {} passed, {} failed, {} errors",
            summary.passed, summary.failed, summary.errors
        );

        Report {
            target,
            started_at,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            cancelled,
            summary,
            results,
        }
    }
}
