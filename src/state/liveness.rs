//! Derived-on-read agent liveness.
//!
//! The store only keeps `last_seen` timestamps; whether an agent is active
//! is a pure function of that timestamp and the current time. It must be
//! recomputed on every read: an entry flips from active to stale purely
//! through elapsed time, with no new event to trigger the change.

use chrono::{DateTime, Utc};

use crate::state::types::{AgentLivenessEntry, Liveness};

/// Window after the last signal within which an agent counts as active
pub const STALENESS_WINDOW_MS: i64 = 60_000;

/// Classify an agent from its stored entry (if any) and the current time.
///
/// An agent with no entry has never signalled this session and is
/// `Unknown`, which is distinct from `Stale`.
pub fn evaluate(entry: Option<&AgentLivenessEntry>, now: DateTime<Utc>) -> Liveness {
    match entry {
        None => Liveness::Unknown,
        Some(entry) => {
            let elapsed_ms = (now - entry.last_seen).num_milliseconds();
            if elapsed_ms < STALENESS_WINDOW_MS {
                Liveness::Active
            } else {
                Liveness::Stale
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry_at(ts: DateTime<Utc>) -> AgentLivenessEntry {
        AgentLivenessEntry { last_seen: ts }
    }

    #[test]
    fn test_absent_entry_is_unknown() {
        assert_eq!(evaluate(None, Utc::now()), Liveness::Unknown);
    }

    #[test]
    fn test_active_just_inside_window() {
        let seen = Utc::now();
        let now = seen + Duration::milliseconds(STALENESS_WINDOW_MS - 1);
        assert_eq!(evaluate(Some(&entry_at(seen)), now), Liveness::Active);
    }

    #[test]
    fn test_stale_at_window_boundary() {
        let seen = Utc::now();
        let at_window = seen + Duration::milliseconds(STALENESS_WINDOW_MS);
        assert_eq!(evaluate(Some(&entry_at(seen)), at_window), Liveness::Stale);

        let past_window = seen + Duration::milliseconds(STALENESS_WINDOW_MS + 1);
        assert_eq!(evaluate(Some(&entry_at(seen)), past_window), Liveness::Stale);
    }

    #[test]
    fn test_same_entry_transitions_with_time_only() {
        let seen = Utc::now();
        let entry = entry_at(seen);

        assert_eq!(evaluate(Some(&entry), seen), Liveness::Active);
        let later = seen + Duration::milliseconds(STALENESS_WINDOW_MS * 2);
        assert_eq!(evaluate(Some(&entry), later), Liveness::Stale);
    }
}
