use std::time::Duration;

use chrono::Utc;
use tracing::error;
use wheelpick_core::{SpinOutcome, SpinPlan};
use wheelpick_shared::{SessionHistory, SpinRecord, WheelEvent};

/// Prints wheel events as text or JSON lines and keeps the session's winners.
#[derive(Debug, Default)]
pub struct Reporter {
    json: bool,
    history: SessionHistory,
}

impl Reporter {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            history: SessionHistory::default(),
        }
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn started(&mut self, plan: &SpinPlan) {
        let event = WheelEvent::SpinStarted {
            from_deg: plan.from_deg,
            target_deg: plan.target_deg,
            duration_secs: plan.duration.as_secs_f64(),
            easing: plan.easing.css(),
        };
        self.emit(&event, || {
            format!("Spinning... ({:.1}s)", plan.duration.as_secs_f64())
        });
    }

    pub fn frame(&mut self, elapsed: Duration, angle_deg: f64, under_pointer: &str) {
        let event = WheelEvent::Frame {
            elapsed_secs: elapsed.as_secs_f64(),
            angle_deg,
            under_pointer: under_pointer.to_string(),
        };
        self.emit(&event, || {
            format!(
                "  {:>5.2}s {:>9.1}° -> {under_pointer}",
                elapsed.as_secs_f64(),
                angle_deg
            )
        });
    }

    pub fn settled(&mut self, outcome: &SpinOutcome) {
        let record = SpinRecord {
            ts: Utc::now(),
            winner: outcome.winner_name.clone(),
            index: outcome.winner_index,
            rotation_deg: outcome.final_rotation_deg,
        };
        self.history.push(record.clone());
        self.emit(&WheelEvent::Settled(record), || {
            format!("We have a winner! Congratulations {}!", outcome.winner_name)
        });
    }

    pub fn declined(&mut self, reason: &str) {
        let event = WheelEvent::Declined {
            reason: reason.to_string(),
        };
        self.emit(&event, || reason.to_string());
    }

    fn emit(&self, event: &WheelEvent, text: impl FnOnce() -> String) {
        if !self.json {
            println!("{}", text());
            return;
        }
        match event.to_json_line() {
            Ok(line) => println!("{line}"),
            Err(err) => error!(%err, "dropping event"),
        }
    }
}
