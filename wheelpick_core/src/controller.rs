//! Spin state machine: `Idle -> Spinning -> Settled -> Spinning -> ...`.
//!
//! The controller draws the target rotation, asks its [`Scheduler`] for one
//! settlement timer and resolves the winner when the host reports that timer
//! through [`SpinController::fire`]. It never renders; observers registered
//! with [`SpinController::on_spin_started`] receive the [`SpinPlan`] to animate.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::animation::{Easing, SpinPlan};
use crate::names::NameList;
use crate::rng::SpinSource;
use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle};
use crate::selector::{select_winner, FULL_TURN_DEG};
use crate::settings::SpinDuration;

pub const MIN_EXTRA_TURNS: f64 = 5.0;
pub const MAX_EXTRA_TURNS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpinDeclined {
    #[error("cannot spin: no names available")]
    NoNames,
    #[error("the wheel is already spinning")]
    AlreadySpinning,
    #[error("the wheel has been torn down")]
    TornDown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub winner_name: String,
    pub winner_index: usize,
    pub final_rotation_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinState {
    Idle,
    Spinning,
    Settled,
}

#[derive(Debug)]
struct PendingSpin {
    timer: TimerHandle,
    plan: SpinPlan,
    names: Vec<String>,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Spinning(PendingSpin),
    Settled(SpinOutcome),
}

type SettledCallback = Box<dyn FnMut(&SpinOutcome)>;
type StartedCallback = Box<dyn FnMut(&SpinPlan)>;

/// Full rotations and landing offset for one spin, from two independent draws.
pub fn draw_spin<R: SpinSource + ?Sized>(source: &mut R) -> (f64, f64) {
    let extra_turns = MIN_EXTRA_TURNS + source.next_unit() * (MAX_EXTRA_TURNS - MIN_EXTRA_TURNS);
    let offset_deg = source.next_unit() * FULL_TURN_DEG;
    (extra_turns, offset_deg)
}

pub struct SpinController<S: Scheduler, R: SpinSource> {
    scheduler: S,
    source: R,
    rotation_deg: f64,
    easing: Easing,
    phase: Phase,
    torn_down: bool,
    settled: Vec<SettledCallback>,
    started: Vec<StartedCallback>,
}

impl<S: Scheduler, R: SpinSource> SpinController<S, R> {
    pub fn new(scheduler: S, source: R) -> Self {
        Self {
            scheduler,
            source,
            rotation_deg: 0.0,
            easing: Easing::WHEEL,
            phase: Phase::Idle,
            torn_down: false,
            settled: Vec::new(),
            started: Vec::new(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn state(&self) -> SpinState {
        match self.phase {
            Phase::Idle => SpinState::Idle,
            Phase::Spinning(_) => SpinState::Spinning,
            Phase::Settled(_) => SpinState::Settled,
        }
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, Phase::Spinning(_))
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Cumulative rotation in degrees. Already holds the target while spinning.
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    pub fn current_plan(&self) -> Option<&SpinPlan> {
        match &self.phase {
            Phase::Spinning(pending) => Some(&pending.plan),
            _ => None,
        }
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        match &self.phase {
            Phase::Spinning(pending) => Some(pending.timer),
            _ => None,
        }
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        match &self.phase {
            Phase::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Register a result listener. Called at most once per accepted spin.
    pub fn on_settled(&mut self, callback: impl FnMut(&SpinOutcome) + 'static) {
        self.settled.push(Box::new(callback));
    }

    /// Register an animation driver. Called once per accepted spin, before
    /// `try_request_spin` returns.
    pub fn on_spin_started(&mut self, callback: impl FnMut(&SpinPlan) + 'static) {
        self.started.push(Box::new(callback));
    }

    /// Start a spin over a snapshot of `names`, or say why not. A declined
    /// request leaves the controller untouched.
    pub fn try_request_spin(
        &mut self,
        names: &NameList,
        duration: SpinDuration,
    ) -> Result<SpinPlan, SpinDeclined> {
        if self.torn_down {
            debug!("spin ignored: controller torn down");
            return Err(SpinDeclined::TornDown);
        }
        if self.is_spinning() {
            debug!("spin ignored: already spinning");
            return Err(SpinDeclined::AlreadySpinning);
        }
        if names.is_empty() {
            debug!("spin declined: no names");
            return Err(SpinDeclined::NoNames);
        }

        let (extra_turns, offset_deg) = draw_spin(&mut self.source);
        let from_deg = self.rotation_deg;
        let target_deg = from_deg + extra_turns * FULL_TURN_DEG + offset_deg;
        let plan = SpinPlan {
            from_deg,
            target_deg,
            duration: duration.as_duration(),
            easing: self.easing,
        };
        let timer = self.scheduler.schedule(plan.duration);
        self.rotation_deg = target_deg;
        self.phase = Phase::Spinning(PendingSpin {
            timer,
            plan,
            names: names.as_slice().to_vec(),
        });
        debug!(
            %timer,
            from_deg,
            target_deg,
            extra_turns,
            offset_deg,
            duration_secs = duration.as_secs_f64(),
            "spin accepted"
        );

        for callback in &mut self.started {
            callback(&plan);
        }
        Ok(plan)
    }

    /// Returns whether the spin was accepted.
    pub fn request_spin(&mut self, names: &NameList, duration: SpinDuration) -> bool {
        self.try_request_spin(names, duration).is_ok()
    }

    /// Deliver an expired timer. Settles the pending spin if `timer` is its
    /// live settlement timer; stale, foreign and cancelled handles are ignored.
    pub fn fire(&mut self, timer: TimerHandle) -> Option<SpinOutcome> {
        let matches = matches!(&self.phase, Phase::Spinning(p) if p.timer == timer);
        if !matches {
            debug!(%timer, "ignoring timer with no matching spin");
            return None;
        }
        if !self.scheduler.fired(timer) {
            debug!(%timer, "ignoring cancelled timer");
            return None;
        }
        let Phase::Spinning(pending) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return None;
        };

        let winner_index = match select_winner(pending.plan.target_deg, pending.names.len()) {
            Ok(index) => index,
            Err(err) => {
                error!(%err, "spin settled without a winner");
                return None;
            }
        };
        let outcome = SpinOutcome {
            winner_name: pending.names[winner_index].clone(),
            winner_index,
            final_rotation_deg: pending.plan.target_deg,
        };
        debug!(
            winner = %outcome.winner_name,
            winner_index,
            "spin settled"
        );
        for callback in &mut self.settled {
            callback(&outcome);
        }
        self.phase = Phase::Settled(outcome.clone());
        Some(outcome)
    }

    /// Cancel any pending settlement and refuse further spins. Runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Phase::Spinning(pending) = std::mem::replace(&mut self.phase, Phase::Idle) {
            let cancelled = self.scheduler.cancel(pending.timer);
            debug!(timer = %pending.timer, cancelled, "teardown cancelled pending spin");
        }
    }
}

impl<R: SpinSource> SpinController<ManualScheduler, R> {
    /// Step the manual clock and deliver whatever came due.
    pub fn advance(&mut self, by: Duration) -> Vec<SpinOutcome> {
        let due = self.scheduler.advance(by);
        due.into_iter().filter_map(|timer| self.fire(timer)).collect()
    }
}

impl<S: Scheduler, R: SpinSource> Drop for SpinController<S, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S: Scheduler, R: SpinSource> fmt::Debug for SpinController<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinController")
            .field("state", &self.state())
            .field("rotation_deg", &self.rotation_deg)
            .field("pending_timer", &self.pending_timer())
            .field("torn_down", &self.torn_down)
            .field("settled_listeners", &self.settled.len())
            .field("started_listeners", &self.started.len())
            .finish()
    }
}
