use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::bail;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, warn};
use wheelpick_core::{
    layout, segment_under_pointer, ColorPalette, FontFamily, NameList, SpinController,
    SpinDeclined, SpinDuration, SpinOutcome, SpinSettings, SpinSource, TimerHandle, QUICK_ADD,
};

use crate::report::Reporter;
use crate::repl::{parse_command, Command, HELP};
use crate::timer::TokioScheduler;

const FRAME_INTERVAL: Duration = Duration::from_millis(250);

type Wheel = SpinController<TokioScheduler, Box<dyn SpinSource>>;

/// One wheel plus the state its host owns: the editable names, the settings
/// panel values and the winner log.
pub struct Session {
    wheel: Wheel,
    timers: UnboundedReceiver<TimerHandle>,
    names: NameList,
    settings: SpinSettings,
    reporter: Rc<RefCell<Reporter>>,
    frames: bool,
    spin_clock: Option<Instant>,
}

impl Session {
    pub fn new(
        names: NameList,
        settings: SpinSettings,
        source: Box<dyn SpinSource>,
        json: bool,
        frames: bool,
    ) -> Self {
        let (scheduler, timers) = TokioScheduler::new();
        let mut wheel = SpinController::new(scheduler, source);
        let reporter = Rc::new(RefCell::new(Reporter::new(json)));

        let on_start = Rc::clone(&reporter);
        wheel.on_spin_started(move |plan| on_start.borrow_mut().started(plan));
        let on_settle = Rc::clone(&reporter);
        wheel.on_settled(move |outcome| on_settle.borrow_mut().settled(outcome));

        Self {
            wheel,
            timers,
            names,
            settings,
            reporter,
            frames,
            spin_clock: None,
        }
    }

    /// Ask the wheel to spin; declines are reported, not raised.
    pub fn spin(&mut self) -> bool {
        match self
            .wheel
            .try_request_spin(&self.names, self.settings.spin_duration)
        {
            Ok(_) => {
                self.spin_clock = Some(Instant::now());
                true
            }
            Err(SpinDeclined::NoNames) => {
                self.reporter
                    .borrow_mut()
                    .declined(&SpinDeclined::NoNames.to_string());
                false
            }
            Err(other) => {
                debug!(%other, "spin request ignored");
                false
            }
        }
    }

    /// Drive the event loop until the running spin settles.
    pub async fn run_until_settled(&mut self) -> anyhow::Result<Option<SpinOutcome>> {
        if !self.wheel.is_spinning() {
            return Ok(None);
        }
        let mut ticker = interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                timer = self.timers.recv() => {
                    let Some(timer) = timer else {
                        bail!("timer channel closed mid-spin");
                    };
                    if let Some(outcome) = self.wheel.fire(timer) {
                        self.spin_clock = None;
                        return Ok(Some(outcome));
                    }
                }
                _ = ticker.tick(), if self.frames => self.draw_frame(),
            }
        }
    }

    pub async fn interactive_stdin(&mut self) -> anyhow::Result<()> {
        self.interactive(BufReader::new(tokio::io::stdin())).await
    }

    /// Read commands until `quit` or end of input. End of input lets a running
    /// spin finish; `quit` tears the wheel down without an outcome.
    pub async fn interactive<R>(&mut self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut ticker = interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut input_open = true;
        println!("{} names on the wheel. Type `help` for commands.", self.names.len());

        loop {
            if !input_open && !self.wheel.is_spinning() {
                break;
            }
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        input_open = false;
                        continue;
                    };
                    match parse_command(&line) {
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(command)) => self.apply(command),
                        Ok(None) => {}
                        Err(err) => {
                            warn!(%err, "rejected input");
                            println!("{err}");
                        }
                    }
                }
                Some(timer) = self.timers.recv() => {
                    if self.wheel.fire(timer).is_some() {
                        self.spin_clock = None;
                    }
                }
                _ = ticker.tick(), if self.frames && self.wheel.is_spinning() => self.draw_frame(),
                else => break,
            }
        }

        if self.wheel.is_spinning() {
            println!("Spin cancelled.");
        }
        self.wheel.teardown();
        Ok(())
    }

    fn apply(&mut self, command: Command) {
        if command.edits_names() && self.wheel.is_spinning() {
            println!("Wait for the wheel to stop before changing names.");
            return;
        }
        match command {
            Command::Add(name) => self.add_name(&name),
            Command::Quick(index) => match QUICK_ADD.get(index) {
                Some(name) => self.add_name(name),
                None => println!("No suggestion at position {}.", index + 1),
            },
            Command::Remove(index) => match self.names.remove(index) {
                Some(name) => println!("Removed {name}."),
                None => println!("No name at position {}.", index + 1),
            },
            Command::Clear => {
                self.names.clear();
                self.reporter.borrow_mut().clear_history();
                println!("Cleared all names.");
            }
            Command::List => self.print_wheel(),
            Command::Suggest => {
                for (i, name) in QUICK_ADD.iter().enumerate() {
                    let mark = if self.names.contains(name) { "x" } else { " " };
                    println!("  [{mark}] {} {name}", i + 1);
                }
            }
            Command::Spin => {
                if !self.spin() && self.wheel.is_spinning() {
                    println!("Already spinning.");
                }
            }
            Command::Duration(secs) => match SpinDuration::new(secs) {
                Ok(duration) => {
                    self.settings.spin_duration = duration;
                    println!("Spin duration set to {duration}.");
                }
                Err(err) => println!("{err}"),
            },
            Command::Palette(name) => match name.parse::<ColorPalette>() {
                Ok(palette) => {
                    println!("Palette set to {}.", palette.name());
                    self.settings.palette = palette;
                }
                Err(err) => println!("{err}"),
            },
            Command::Font(name) => match name.parse::<FontFamily>() {
                Ok(font) => {
                    self.settings.font = font;
                    println!("Font set to {}.", font.label());
                }
                Err(err) => println!("{err}"),
            },
            Command::History => {
                let reporter = self.reporter.borrow();
                if reporter.history().is_empty() {
                    println!("No winners yet.");
                }
                for (i, record) in reporter.history().records().iter().enumerate() {
                    println!(
                        "  {:>3}. {} at {}",
                        i + 1,
                        record.winner,
                        record.ts.format("%H:%M:%S")
                    );
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
    }

    fn add_name(&mut self, raw: &str) {
        match self.names.add(raw) {
            Ok(name) => println!("Added {name}."),
            Err(err) => println!("{err}"),
        }
    }

    fn print_wheel(&self) {
        let segments = layout(&self.names, &self.settings);
        if segments.is_empty() {
            println!("No names added yet. Add some names to get started!");
            return;
        }
        println!(
            "{} names | {} | {} | {}",
            segments.len(),
            self.settings.palette.name(),
            self.settings.font.label(),
            self.settings.spin_duration
        );
        for segment in &segments {
            println!(
                "  {:>2}. {:<15} {:>6.1}°..{:>6.1}° {}",
                segment.index + 1,
                segment.label,
                segment.start_deg,
                segment.end_deg(),
                segment.color
            );
        }
    }

    fn draw_frame(&mut self) {
        let (Some(plan), Some(clock)) = (self.wheel.current_plan().copied(), self.spin_clock) else {
            return;
        };
        let elapsed = clock.elapsed().min(plan.duration);
        let angle = plan.angle_at(elapsed);
        let segments = layout(&self.names, &self.settings);
        if let Ok(segment) = segment_under_pointer(angle, &segments) {
            self.reporter
                .borrow_mut()
                .frame(elapsed, angle, &segment.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheelpick_core::{SeededSource, SpinState};

    fn session(names: &[&str]) -> Session {
        Session::new(
            NameList::try_from(names.to_vec()).unwrap(),
            SpinSettings::default(),
            Box::new(SeededSource::new("session")),
            true,
            true,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn one_shot_spin_settles_once() {
        let mut session = session(&["Alice", "Bob"]);
        let started = Instant::now();
        assert!(session.spin());
        assert!(!session.spin());
        let outcome = session.run_until_settled().await.unwrap().unwrap();
        assert!(started.elapsed() >= Duration::from_secs(4));
        assert!(session.names.contains(&outcome.winner_name));
        assert_eq!(session.wheel.state(), SpinState::Settled);
        assert_eq!(session.reporter.borrow().history().len(), 1);
        assert_eq!(session.run_until_settled().await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_wheel_declines() {
        let mut session = session(&[]);
        assert!(!session.spin());
        assert_eq!(session.wheel.state(), SpinState::Idle);
        assert_eq!(session.run_until_settled().await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn names_are_frozen_while_spinning() {
        let mut session = session(&["Alice", "Bob"]);
        assert!(session.spin());
        session.apply(Command::Add("Carol".into()));
        session.apply(Command::Clear);
        assert_eq!(session.names.len(), 2);
        session.run_until_settled().await.unwrap();
        session.apply(Command::Add("Carol".into()));
        assert_eq!(session.names.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn quit_mid_spin_cancels_without_a_winner() {
        let mut session = session(&["Alice", "Bob"]);
        session.interactive(&b"spin\nquit\n"[..]).await.unwrap();
        assert!(session.wheel.is_torn_down());
        assert_eq!(session.wheel.state(), SpinState::Idle);
        assert!(session.reporter.borrow().history().is_empty());
        assert!(!session.wheel.request_spin(&session.names, SpinDuration::default()));
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_input_lets_the_spin_finish() {
        let mut session = session(&["Alice", "Bob"]);
        let started = Instant::now();
        session.interactive(&b"spin\n"[..]).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(4));
        let reporter = session.reporter.borrow();
        assert_eq!(reporter.history().len(), 1);
        let winner = &reporter.history().latest().unwrap().winner;
        assert!(session.names.contains(winner));
    }

    #[tokio::test(start_paused = true)]
    async fn end_of_input_while_idle_returns_at_once() {
        let mut session = session(&["Alice"]);
        session.interactive(&b"add Bob\nlist\n"[..]).await.unwrap();
        assert_eq!(session.names.len(), 2);
        assert!(session.reporter.borrow().history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn settings_commands_update_next_spin() {
        let mut session = session(&["Alice", "Bob"]);
        session.apply(Command::Duration(2.0));
        session.apply(Command::Duration(11.0));
        session.apply(Command::Palette("ocean".into()));
        assert_eq!(session.settings.spin_duration.as_secs_f64(), 2.0);
        assert_eq!(session.settings.palette.name(), "Ocean");
        let started = Instant::now();
        assert!(session.spin());
        session.run_until_settled().await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
