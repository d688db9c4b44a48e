//models.rs
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Format of `Session::date`, local time with minute precision.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Workout name -> exercises, in insertion order. This is the whole document.
pub type WorkoutMap = IndexMap<String, Vec<Exercise>>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(rename = "sets")]
    pub target_sets: u32,
    #[serde(rename = "reps")]
    pub target_reps: u32,
    #[serde(default)]
    pub tracking_history: Vec<Session>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub date: String,
    pub sets: Vec<SetResult>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct SetResult {
    pub reps: u32,
    pub weight: f64,
}

impl Exercise {
    pub fn new(name: impl Into<String>, target_sets: u32, target_reps: u32) -> Self {
        Exercise {
            name: name.into(),
            target_sets,
            target_reps,
            tracking_history: Vec::new(),
        }
    }

    /// The last `n` sessions, oldest first.
    pub fn recent_sessions(&self, n: usize) -> &[Session] {
        let start = self.tracking_history.len().saturating_sub(n);
        &self.tracking_history[start..]
    }

    pub fn last_session(&self) -> Option<&Session> {
        self.tracking_history.last()
    }
}

impl Session {
    pub fn new(date: NaiveDateTime, sets: Vec<SetResult>) -> Self {
        Session {
            date: date.format(DATE_FORMAT).to_string(),
            sets,
        }
    }

    pub fn total_volume(&self) -> f64 {
        self.sets.iter().map(SetResult::volume).sum()
    }
}

impl SetResult {
    pub fn new(reps: u32, weight: f64) -> Self {
        SetResult { reps, weight }
    }

    pub fn volume(&self) -> f64 {
        self.reps as f64 * self.weight
    }
}
