use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wheelpick_core::{
    layout, segment_under_pointer, select_winner, ManualScheduler, NameList, SeededSource,
    SpinController, SpinDuration, SpinOutcome, SpinSettings, SpinState,
};

fn alice_bob() -> NameList {
    NameList::try_from(vec!["Alice", "Bob"]).unwrap()
}

#[test]
fn seeded_spins_are_repeatable() {
    let mut a = SpinController::new(ManualScheduler::new(), SeededSource::new("s"));
    let mut b = SpinController::new(ManualScheduler::new(), SeededSource::new("s"));
    let names = NameList::default();
    for _ in 0..5 {
        assert!(a.request_spin(&names, SpinDuration::default()));
        assert!(b.request_spin(&names, SpinDuration::default()));
        assert_eq!(
            a.advance(Duration::from_secs(4)),
            b.advance(Duration::from_secs(4))
        );
    }
}

#[test]
fn double_request_yields_one_outcome() {
    let outcomes: Rc<RefCell<Vec<SpinOutcome>>> = Rc::default();
    let mut wheel = SpinController::new(ManualScheduler::new(), SeededSource::new("dbl"));
    let sink = Rc::clone(&outcomes);
    wheel.on_settled(move |o| sink.borrow_mut().push(o.clone()));

    let names = alice_bob();
    assert!(wheel.request_spin(&names, SpinDuration::default()));
    assert!(!wheel.request_spin(&names, SpinDuration::default()));
    wheel.advance(Duration::from_secs(30));

    let seen = outcomes.borrow();
    assert_eq!(seen.len(), 1);
    assert!(["Alice", "Bob"].contains(&seen[0].winner_name.as_str()));
}

#[test]
fn rotation_never_decreases_across_spins() {
    let mut wheel = SpinController::new(ManualScheduler::new(), SeededSource::new("acc"));
    let names = NameList::default();
    let mut last = wheel.rotation_deg();
    for _ in 0..20 {
        assert!(wheel.request_spin(&names, SpinDuration::default()));
        assert!(wheel.rotation_deg() > last);
        last = wheel.rotation_deg();
        assert_eq!(wheel.advance(Duration::from_secs(4)).len(), 1);
        assert_eq!(wheel.state(), SpinState::Settled);
    }
}

#[test]
fn dropping_the_controller_cancels_its_timer() {
    let fired = Rc::new(RefCell::new(false));
    {
        let mut wheel = SpinController::new(ManualScheduler::new(), SeededSource::new("drop"));
        let flag = Rc::clone(&fired);
        wheel.on_settled(move |_| *flag.borrow_mut() = true);
        assert!(wheel.request_spin(&alice_bob(), SpinDuration::default()));
    }
    assert!(!*fired.borrow());
}

#[test]
fn reported_winner_matches_the_drawn_wheel() {
    let settings = SpinSettings::default();
    let names = NameList::try_from(vec!["Ann", "Ben", "Cleo", "Dev", "Eve", "Finn", "Gus"]).unwrap();
    let segments = layout(&names, &settings);
    let mut wheel = SpinController::new(ManualScheduler::new(), SeededSource::new("visual"));
    for _ in 0..50 {
        assert!(wheel.request_spin(&names, settings.spin_duration));
        let outcome = wheel.advance(Duration::from_secs(4)).remove(0);
        let drawn = segment_under_pointer(outcome.final_rotation_deg, &segments).unwrap();
        assert_eq!(drawn.index, outcome.winner_index);
        assert_eq!(drawn.name, outcome.winner_name);
    }
}

#[test]
fn selection_is_roughly_uniform() {
    let names = NameList::try_from(vec!["a", "b", "c", "d"]).unwrap();
    let mut wheel = SpinController::new(ManualScheduler::new(), SeededSource::new("uniform"));
    let mut counts = [0usize; 4];
    for _ in 0..4000 {
        assert!(wheel.request_spin(&names, SpinDuration::default()));
        for outcome in wheel.advance(Duration::from_secs(4)) {
            counts[outcome.winner_index] += 1;
        }
    }
    // very loose bounds; 1000 expected per name
    assert!(counts.iter().all(|&c| (800..=1200).contains(&c)), "{counts:?}");
}

#[test]
fn quarter_turn_boundary() {
    assert_eq!(select_winner(270.0, 4), Ok(1));
}
