//! Named results for every branch of a physics update

/// What a force or advance call actually did
///
/// Degenerate input never panics or errors at step time. Instead the branch
/// that fired is reported here so callers and tests can tell a real update
/// from a silent skip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The update was computed and written
    Applied,
    /// First observed frame: the timestamp was recorded, nothing moved
    Initialized,
    /// The bodies coincide; the previous force was kept
    SkippedDegenerate,
    /// The timestamp was NaN, infinite, or earlier than the last frame
    SkippedInvalidTime,
    /// The body has exhausted its step budget
    Frozen,
}

impl StepOutcome {
    /// True if state was written (a recorded first timestamp counts)
    pub fn is_applied(self) -> bool {
        matches!(self, StepOutcome::Applied | StepOutcome::Initialized)
    }

    /// True for the two skip branches
    pub fn is_skipped(self) -> bool {
        matches!(
            self,
            StepOutcome::SkippedDegenerate | StepOutcome::SkippedInvalidTime
        )
    }
}

impl std::fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StepOutcome::Applied => "applied",
            StepOutcome::Initialized => "initialized",
            StepOutcome::SkippedDegenerate => "skipped (degenerate geometry)",
            StepOutcome::SkippedInvalidTime => "skipped (invalid timestamp)",
            StepOutcome::Frozen => "frozen",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applied_classification() {
        assert!(StepOutcome::Applied.is_applied());
        assert!(StepOutcome::Initialized.is_applied());
        assert!(!StepOutcome::Frozen.is_applied());
        assert!(!StepOutcome::SkippedDegenerate.is_applied());
    }

    #[test]
    fn test_skipped_classification() {
        assert!(StepOutcome::SkippedDegenerate.is_skipped());
        assert!(StepOutcome::SkippedInvalidTime.is_skipped());
        assert!(!StepOutcome::Frozen.is_skipped());
        assert!(!StepOutcome::Applied.is_skipped());
    }

    #[test]
    fn test_display() {
        assert_eq!(StepOutcome::Frozen.to_string(), "frozen");
        assert!(StepOutcome::SkippedInvalidTime.to_string().contains("timestamp"));
    }
}
