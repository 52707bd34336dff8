//! Outcome of running a block, with optional cleanup.

use core::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::warn;

use crate::error::BlockError;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Passed,
    Failed,
    NotRun,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::NotRun => "NOT RUN",
        })
    }
}

/// When a result's cleanup should run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CleanupScope {
    /// After the test case that produced it.
    #[default]
    Step,
    /// After the whole suite.
    Suite,
}

pub type Cleanup = Box<dyn FnOnce() -> Result<(), BlockError> + Send>;

/// What a building block reports back.
pub struct BlockResult {
    pub outcome: Outcome,
    pub output: Option<String>,
    pub scope: CleanupScope,
    cleanup: Option<Cleanup>,
}

impl BlockResult {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            output: None,
            scope: CleanupScope::Step,
            cleanup: None,
        }
    }

    #[inline]
    pub fn passed() -> Self {
        Self::new(Outcome::Passed)
    }

    #[inline]
    pub fn failed() -> Self {
        Self::new(Outcome::Failed)
    }

    #[inline]
    pub fn not_run() -> Self {
        Self::new(Outcome::NotRun)
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_cleanup(
        mut self,
        cleanup: impl FnOnce() -> Result<(), BlockError> + Send + 'static,
    ) -> Self {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// Defer the cleanup to the end of the suite.
    pub fn suite_scoped(mut self) -> Self {
        self.scope = CleanupScope::Suite;
        self
    }

    #[inline]
    pub fn has_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }

    /// Run the cleanup once.
    ///
    /// Returns `true` when there was nothing to do or the cleanup succeeded.
    /// Errors and panics are logged and reported as `false`.
    pub fn run_cleanup(&mut self) -> bool {
        let Some(cleanup) = self.cleanup.take() else {
            return true;
        };
        match catch_unwind(AssertUnwindSafe(cleanup)) {
            Ok(Ok(())) => true,
            Ok(Err(error)) => {
                warn!(%error, outcome = %self.outcome, "cleanup failed");
                false
            }
            Err(_) => {
                warn!(outcome = %self.outcome, "cleanup panicked");
                false
            }
        }
    }
}

impl fmt::Debug for BlockResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockResult")
            .field("outcome", &self.outcome)
            .field("output", &self.output)
            .field("scope", &self.scope)
            .field("has_cleanup", &self.has_cleanup())
            .finish()
    }
}

/// Run step-scoped cleanups newest first.
///
/// Every cleanup is attempted even when an earlier one fails. Suite-scoped
/// results are left untouched.
pub fn cleanup_all(results: &mut [BlockResult]) -> bool {
    results
        .iter_mut()
        .rev()
        .filter(|r| r.scope == CleanupScope::Step)
        .fold(true, |ok, r| r.run_cleanup() && ok)
}

/// Return types a building block may use.
pub trait IntoBlockResult {
    fn into_block_result(self) -> Result<BlockResult, BlockError>;
}

impl IntoBlockResult for BlockResult {
    fn into_block_result(self) -> Result<BlockResult, BlockError> {
        Ok(self)
    }
}

impl IntoBlockResult for bool {
    fn into_block_result(self) -> Result<BlockResult, BlockError> {
        Ok(if self {
            BlockResult::passed()
        } else {
            BlockResult::failed()
        })
    }
}

impl IntoBlockResult for () {
    fn into_block_result(self) -> Result<BlockResult, BlockError> {
        Ok(BlockResult::passed())
    }
}

impl<T, E> IntoBlockResult for Result<T, E>
where
    T: IntoBlockResult,
    E: Into<BlockError>,
{
    fn into_block_result(self) -> Result<BlockResult, BlockError> {
        self.map_err(Into::into)?.into_block_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_cleanup_runs_once() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let mut result = BlockResult::passed().with_cleanup(move || {
            *counter.lock().unwrap() += 1;
            Ok(())
        });
        assert!(result.run_cleanup());
        assert!(result.run_cleanup());
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_cleanup_failures_are_swallowed() {
        let mut failing = BlockResult::passed().with_cleanup(|| Err(BlockError::failed("busy")));
        assert!(!failing.run_cleanup());

        let mut panicking = BlockResult::passed().with_cleanup(|| panic!("boom"));
        assert!(!panicking.run_cleanup());
    }

    #[test]
    fn test_cleanup_all_attempts_everything_in_reverse() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let record = |id: u8, ok: bool| {
            let order = Arc::clone(&order);
            BlockResult::passed().with_cleanup(move || {
                order.lock().unwrap().push(id);
                if ok { Ok(()) } else { Err(BlockError::failed("no")) }
            })
        };
        let mut results = vec![
            record(1, true),
            record(2, false),
            record(3, true).suite_scoped(),
            record(4, true),
        ];
        assert!(!cleanup_all(&mut results));
        assert_eq!(*order.lock().unwrap(), [4, 2, 1]);
        assert!(results[2].has_cleanup());
    }

    #[test]
    fn test_return_conversions() {
        assert_eq!(true.into_block_result().unwrap().outcome, Outcome::Passed);
        assert_eq!(false.into_block_result().unwrap().outcome, Outcome::Failed);
        assert_eq!(().into_block_result().unwrap().outcome, Outcome::Passed);

        let err: Result<bool, BlockError> = Err(BlockError::failed("x"));
        assert!(err.into_block_result().is_err());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::NotRun.to_string(), "NOT RUN");
    }
}
