//! Discovery session state: the discovered set, counters, and phase.

use crate::conversation::reply::TokenUsage;
use crate::grid::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lifecycle phase of a solve session.
///
/// `Idle → Exploring → {Solved, Failed, Overflowed, Cancelled}`; terminal
/// phases reset to `Idle` when the next solve starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Exploring,
    Solved,
    Failed,
    Overflowed,
    Cancelled,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionPhase::Solved
                | SessionPhase::Failed
                | SessionPhase::Overflowed
                | SessionPhase::Cancelled
        )
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Idle
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Exploring => "exploring",
            SessionPhase::Solved => "solved",
            SessionPhase::Failed => "failed",
            SessionPhase::Overflowed => "overflowed",
            SessionPhase::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

/// Per-solve bookkeeping (Entity): the discovered set, probe counter, and
/// the latest provider-reported token totals.
///
/// Token totals are adopted, not accumulated — every model reply carries the
/// authoritative counts for the entire history so far.
#[derive(Debug, Clone, Default)]
pub struct DiscoverySession {
    discovered: HashSet<Position>,
    probe_count: u64,
    usage: TokenUsage,
    phase: SessionPhase,
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reinitialize all session-local state for a fresh solve attempt.
    pub fn reset(&mut self) {
        self.discovered.clear();
        self.probe_count = 0;
        self.usage = TokenUsage::default();
        self.phase = SessionPhase::Idle;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    pub fn probe_count(&self) -> u64 {
        self.probe_count
    }

    /// Count one probe attempt (accepted or not).
    pub fn record_probe(&mut self) {
        self.probe_count += 1;
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    pub fn is_discovered(&self, pos: Position) -> bool {
        self.discovered.contains(&pos)
    }

    /// Whether a probe target satisfies the adjacency constraint.
    ///
    /// The very first probe must be the entry itself or one of its eight
    /// neighbours; every later probe must be adjacent to at least one
    /// already-discovered position.
    pub fn admissible(&self, probe: Position, entry: Position) -> bool {
        if self.discovered.is_empty() {
            probe == entry || probe.is_adjacent_to(entry)
        } else {
            self.discovered.iter().any(|d| probe.is_adjacent_to(*d))
        }
    }

    /// Add an accepted probe target to the discovered set.
    pub fn admit(&mut self, pos: Position) {
        self.discovered.insert(pos);
    }

    /// Adopt the latest provider-reported token totals.
    pub fn adopt_usage(&mut self, usage: TokenUsage) {
        self.usage = usage;
    }

    pub fn usage(&self) -> TokenUsage {
        self.usage
    }

    pub fn total_tokens(&self) -> u64 {
        self.usage.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_probe_admissibility() {
        let session = DiscoverySession::new();
        let entry = Position::new(1, 0);

        assert!(session.admissible(entry, entry));
        assert!(session.admissible(Position::new(2, 1), entry));
        assert!(!session.admissible(Position::new(3, 0), entry));
        assert!(!session.admissible(Position::new(5, 5), entry));
    }

    #[test]
    fn test_later_probes_must_touch_discovered_set() {
        let mut session = DiscoverySession::new();
        let entry = Position::new(1, 0);
        session.admit(Position::new(4, 4));

        // All eight neighbours of the discovered cell are admissible, even
        // though none of them touch the entry.
        for (_, neighbour) in Position::new(4, 4).neighbours() {
            assert!(session.admissible(neighbour, entry));
        }
        // The entry itself is no longer automatically admissible.
        assert!(!session.admissible(entry, entry));
        // Distance 2 from the only discovered cell: rejected.
        assert!(!session.admissible(Position::new(6, 4), entry));
    }

    #[test]
    fn test_discovered_set_grows_monotonically() {
        let mut session = DiscoverySession::new();
        session.admit(Position::new(1, 0));
        session.admit(Position::new(1, 1));
        session.admit(Position::new(1, 1));
        assert_eq!(session.discovered_count(), 2);
        assert!(session.is_discovered(Position::new(1, 0)));
    }

    #[test]
    fn test_usage_is_adopted_not_accumulated() {
        let mut session = DiscoverySession::new();
        session.adopt_usage(TokenUsage::new(100, 20));
        session.adopt_usage(TokenUsage::new(350, 65));
        assert_eq!(session.usage().input_tokens, 350);
        assert_eq!(session.total_tokens(), 415);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = DiscoverySession::new();
        session.set_phase(SessionPhase::Exploring);
        session.admit(Position::new(1, 0));
        session.record_probe();
        session.adopt_usage(TokenUsage::new(10, 10));

        session.reset();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.discovered_count(), 0);
        assert_eq!(session.probe_count(), 0);
        assert_eq!(session.total_tokens(), 0);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(SessionPhase::Solved.is_terminal());
        assert!(SessionPhase::Cancelled.is_terminal());
        assert!(!SessionPhase::Idle.is_terminal());
        assert!(!SessionPhase::Exploring.is_terminal());
    }
}
