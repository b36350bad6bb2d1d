use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Mode, Settings};

/// Every timer state change produces an Event.
/// Frontends re-render on each one; the terminal also prints completions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u64,
        /// Started by the grace-delay auto-continue rather than the user.
        auto: bool,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    IntervalCompleted {
        finished: Mode,
        next: Mode,
        duration_secs: u64,
        auto_continue: bool,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from: Mode,
        to: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        settings: Settings,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// One-line message for interval boundaries, if this event is one.
    pub fn announcement(&self) -> Option<&'static str> {
        match self {
            Event::IntervalCompleted {
                finished: Mode::Focus,
                ..
            } => Some("Focus complete! Time for a break."),
            Event::IntervalCompleted {
                finished: Mode::Break,
                ..
            } => Some("Break over! Back to focus."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::TimerPaused {
            mode: Mode::Break,
            remaining_secs: 42,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "timer_paused");
        assert_eq!(json["mode"], "break");
        assert_eq!(json["remaining_secs"], 42);
    }

    #[test]
    fn completions_announce_the_next_interval() {
        let done = Event::IntervalCompleted {
            finished: Mode::Focus,
            next: Mode::Break,
            duration_secs: 300,
            auto_continue: false,
            at: Utc::now(),
        };
        assert_eq!(done.announcement(), Some("Focus complete! Time for a break."));
    }
}
