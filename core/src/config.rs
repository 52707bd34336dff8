//! Reader configuration.
//!
//! # Recursion Limits
//!
//! Lists and vectors are read recursively, so a line such as `((((((...` with
//! thousands of levels would overflow the stack. [`ReaderConfig`] bounds the
//! nesting depth. The reader does not abort when the limit is hit: it records
//! [`ReadErrorKind::RecursionLimitExceeded`](crate::ReadErrorKind), drains the
//! rest of the input and returns an empty incomplete node.
//!
//! # Example
//!
//! ```
//! use rvt_core::ReaderConfig;
//!
//! let config = ReaderConfig::new().with_max_depth(16);
//! assert_eq!(config.max_depth, 16);
//! ```

use crate::error::ReadErrorKind;

/// Configuration for reader resource limits.
///
/// | Setting | Default |
/// |---------|---------|
/// | `max_depth` | 128 |
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Maximum nesting of lists and vectors.
    pub max_depth: usize,
}

impl Default for ReaderConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ReaderConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self { max_depth: 128 };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Disables the nesting limit.
    ///
    /// Only use this for trusted input.
    #[inline]
    pub const fn disable_depth_limit(self) -> Self {
        self.with_max_depth(usize::MAX)
    }
}

/// Tracks nesting depth while reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a nested form.
    ///
    /// On error the depth is left unchanged, so callers must not call
    /// [`exit`](Self::exit) for a rejected entry.
    #[inline]
    pub fn enter(&mut self, limit: usize) -> Result<(), ReadErrorKind> {
        let depth = self.depth.saturating_add(1);
        if depth > limit {
            Err(ReadErrorKind::RecursionLimitExceeded { depth, limit })
        } else {
            self.depth = depth;
            Ok(())
        }
    }

    /// Uses saturating subtraction so extra `exit()` calls don't underflow.
    #[inline]
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_config_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.max_depth, 128);
        assert_eq!(config, ReaderConfig::DEFAULT);
    }

    #[test]
    fn test_reader_config_builder() {
        let config = ReaderConfig::new().with_max_depth(4);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.disable_depth_limit().max_depth, usize::MAX);
    }

    #[test]
    fn test_recursion_guard_basic() {
        let mut guard = RecursionGuard::new();
        guard.enter(128).unwrap();
        guard.enter(128).unwrap();
        assert_eq!(guard.depth(), 2);

        guard.exit();
        assert_eq!(guard.depth(), 1);
    }

    #[test]
    fn test_recursion_guard_limit_exceeded() {
        let mut guard = RecursionGuard::new();
        for _ in 0..3 {
            guard.enter(3).unwrap();
        }

        assert_eq!(
            guard.enter(3),
            Err(ReadErrorKind::RecursionLimitExceeded { depth: 4, limit: 3 })
        );
        // rejected entries do not count
        assert_eq!(guard.depth(), 3);
    }

    #[test]
    fn test_recursion_guard_exit_saturates() {
        let mut guard = RecursionGuard::new();
        guard.exit();
        guard.exit();
        assert_eq!(guard.depth(), 0);

        guard.enter(1).unwrap();
        guard.reset();
        assert_eq!(guard.depth(), 0);
    }
}
