pub mod animation;
pub mod controller;
pub mod names;
pub mod rng;
pub mod scheduler;
pub mod selector;
pub mod settings;
pub mod wheel;

pub use crate::animation::{Easing, SpinPlan};
pub use crate::controller::{draw_spin, SpinController, SpinDeclined, SpinOutcome, SpinState};
pub use crate::names::{NameError, NameList, MAX_NAME_CHARS, QUICK_ADD};
pub use crate::rng::{derive_floats, derive_hash_hex, EntropySource, SeededSource, SpinSource};
pub use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle};
pub use crate::selector::{pointer_angle, segment_angle, select_winner, SelectError};
pub use crate::settings::{ColorPalette, FontFamily, SettingsError, SpinDuration, SpinSettings};
pub use crate::wheel::{layout, segment_under_pointer, Segment};
