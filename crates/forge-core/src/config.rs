//! Simulated latencies.

use std::time::Duration;

/// Delays used by the simulated backend operations.
///
/// The defaults reproduce the pacing of the interactive workbench;
/// [`Timings::instant`] removes every delay for scripted use and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Plan generation latency
    pub generate_plan: Duration,
    /// Delay between plan approval and the first step running
    pub plan_start: Duration,
    /// Delay between chained steps
    pub step_chain: Duration,
    /// Delay between approving a single step and running it
    pub single_step: Duration,
    /// Delay before a continued project resumes
    pub resume: Duration,
    /// GitHub push latency
    pub github_push: Duration,
    /// Model download latency
    pub model_download: Duration,
    /// Terminal command latency
    pub command: Duration,
    /// Project export latency
    pub project_export: Duration,
}

impl Timings {
    /// All delays set to zero.
    pub const fn instant() -> Self {
        Self {
            generate_plan: Duration::ZERO,
            plan_start: Duration::ZERO,
            step_chain: Duration::ZERO,
            single_step: Duration::ZERO,
            resume: Duration::ZERO,
            github_push: Duration::ZERO,
            model_download: Duration::ZERO,
            command: Duration::ZERO,
            project_export: Duration::ZERO,
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            generate_plan: Duration::from_millis(2000),
            plan_start: Duration::from_millis(3000),
            step_chain: Duration::from_millis(3000),
            single_step: Duration::from_millis(2000),
            resume: Duration::from_millis(1000),
            github_push: Duration::from_millis(2000),
            model_download: Duration::from_millis(5000),
            command: Duration::from_millis(1000),
            project_export: Duration::from_millis(2000),
        }
    }
}

/// Sleeps for `delay`, skipping the timer entirely when it is zero.
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
