use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

/// Replays uploaded for one match. Each participant may have uploaded one,
/// so there can be up to two, and sometimes zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replays {
    pub replays: Vec<Replay>,
}

impl Replays {
    /// The most recently uploaded replay.
    #[must_use]
    pub fn last_uploaded(&self) -> Option<&Replay> {
        self.replays.iter().max_by_key(|r| r.timestamp)
    }

    /// The earliest uploaded replay.
    #[must_use]
    pub fn first_uploaded(&self) -> Option<&Replay> {
        self.replays.iter().min_by_key(|r| r.timestamp)
    }

    #[must_use]
    pub fn any(&self) -> Option<&Replay> {
        self.replays.first()
    }
}
