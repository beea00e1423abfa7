//! Sliding window of admission instants for one (actor, operation) pair.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

// == Rate Window ==
/// Instants of recently admitted calls, oldest at the front.
#[derive(Debug, Clone, Default)]
pub struct RateWindow {
    admitted: VecDeque<Instant>,
}

impl RateWindow {
    pub fn new() -> Self {
        Self::default()
    }

    // == Prune ==
    /// Drops instants older than `window` as of `now`.
    ///
    /// An instant exactly `window` old still counts.
    pub fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.admitted.front() {
            if now.saturating_duration_since(oldest) > window {
                self.admitted.pop_front();
            } else {
                break;
            }
        }
    }

    // == Try Admit ==
    /// Prunes, then records `now` if fewer than `limit` calls remain in the window.
    ///
    /// Returns the calls still available after this one when admitted, `None`
    /// when rejected. A rejected call leaves the window untouched.
    pub fn try_admit(&mut self, now: Instant, window: Duration, limit: u32) -> Option<u32> {
        self.prune(now, window);
        if self.count() < limit {
            self.admitted.push_back(now);
            Some(limit.saturating_sub(self.count()))
        } else {
            None
        }
    }

    /// Number of admitted calls currently retained.
    pub fn count(&self) -> u32 {
        u32::try_from(self.admitted.len()).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty()
    }
}
