use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a host tells its rendering or logging collaborators, one JSON object
/// per line.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WheelEvent {
    SpinStarted {
        from_deg: f64,
        target_deg: f64,
        duration_secs: f64,
        easing: String,
    },
    Frame {
        elapsed_secs: f64,
        angle_deg: f64,
        under_pointer: String,
    },
    Settled(SpinRecord),
    Declined {
        reason: String,
    },
}

impl WheelEvent {
    pub fn to_json_line(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(|e| SessionError::Encode(e.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpinRecord {
    pub ts: DateTime<Utc>,
    pub winner: String,
    pub index: usize,
    pub rotation_deg: f64,
}

/// Winners of the current session, newest last. Lives only as long as the host.
#[derive(Debug, Default, Clone)]
pub struct SessionHistory {
    records: Vec<SpinRecord>,
}

impl SessionHistory {
    pub fn push(&mut self, record: SpinRecord) {
        self.records.push(record);
    }

    pub fn latest(&self) -> Option<&SpinRecord> {
        self.records.last()
    }

    pub fn records(&self) -> &[SpinRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("invalid command: {0}")]
    Invalid(String),
    #[error("could not encode event: {0}")]
    Encode(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> SpinRecord {
        SpinRecord {
            ts: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            winner: "Bob".into(),
            index: 1,
            rotation_deg: 2070.0,
        }
    }

    #[test]
    fn events_are_tagged() {
        let line = WheelEvent::Declined {
            reason: "cannot spin: no names available".into(),
        }
        .to_json_line()
        .unwrap();
        assert_eq!(
            line,
            r#"{"event":"declined","reason":"cannot spin: no names available"}"#
        );
    }

    #[test]
    fn settled_event_flattens_record() {
        let line = WheelEvent::Settled(record()).to_json_line().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["event"], "settled");
        assert_eq!(value["winner"], "Bob");
        assert_eq!(value["index"], 1);
        assert_eq!(value["ts"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn history_keeps_order() {
        let mut history = SessionHistory::default();
        assert!(history.latest().is_none());
        history.push(record());
        let mut second = record();
        second.winner = "Alice".into();
        history.push(second);
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().map(|r| r.winner.as_str()), Some("Alice"));
        history.clear();
        assert!(history.is_empty());
    }
}
