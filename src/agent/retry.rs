//! Bounded-retry policy shared by every sub-task.

use std::time::Duration;

/// Retry budget for one perceive-then-act sub-task.
///
/// `capture_pause` is the wait after a failed screenshot before the next
/// attempt; a missing image is always a retryable condition.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub capture_pause: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, capture_pause: Duration) -> Self {
        Self {
            max_attempts,
            capture_pause,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Non-terminal device action issued between failed attempts of the same
/// sub-task, to change what the next screenshot will show.
#[derive(Debug, Clone, Copy)]
pub enum Corrective {
    /// No correction; just try again.
    None,
    /// Wait for the screen to settle.
    Wait(Duration),
    /// Scroll the relevant list or menu.
    Swipe {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        duration_ms: u64,
        /// Render-settle delay after the gesture.
        settle: Duration,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.capture_pause, Duration::from_secs(1));
    }
}
