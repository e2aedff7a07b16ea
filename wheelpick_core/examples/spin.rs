use std::time::Duration;

use wheelpick_core::{layout, ManualScheduler, NameList, SeededSource, SpinController, SpinSettings};

fn main() {
    // Example end-to-end spin on a stepped clock
    let names = NameList::default();
    let settings = SpinSettings::default();
    let source = SeededSource::new("example-seed");
    println!("seed_fingerprint={}", source.seed_fingerprint());

    let mut wheel = SpinController::new(ManualScheduler::new(), source);
    wheel.on_settled(|outcome| println!("winner={} index={}", outcome.winner_name, outcome.winner_index));

    if !wheel.request_spin(&names, settings.spin_duration) {
        println!("cannot spin: no names available");
        return;
    }
    if let Some(plan) = wheel.current_plan().copied() {
        for step in 0..=8 {
            let elapsed = plan.duration.mul_f64(f64::from(step) / 8.0);
            println!("t={:.2}s angle={:.1}", elapsed.as_secs_f64(), plan.angle_at(elapsed));
        }
    }
    wheel.advance(settings.spin_duration.as_duration() + Duration::from_millis(1));

    for segment in layout(&names, &settings) {
        println!(
            "{:>2} {:<14} {:>6.1}..{:>6.1} {}",
            segment.index,
            segment.label,
            segment.start_deg,
            segment.end_deg(),
            segment.color
        );
    }
}
