//! Read-only projection of names and settings onto wheel segments.
//!
//! Nothing here feeds back into selection: colours, labels and font sizes are
//! derived per render from [`NameList`] and [`SpinSettings`].

use serde::{Deserialize, Serialize};

use crate::names::NameList;
use crate::selector::{select_winner, SelectError, FULL_TURN_DEG};
use crate::settings::SpinSettings;

pub const LABEL_MAX_CHARS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    pub name: String,
    pub label: String,
    pub start_deg: f64,
    pub sweep_deg: f64,
    pub color: String,
    pub label_px: u32,
}

impl Segment {
    pub fn mid_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg / 2.0
    }

    pub fn end_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg
    }

    /// Whether the wheel-relative angle `deg` falls inside this slice.
    pub fn contains(&self, deg: f64) -> bool {
        let deg = deg.rem_euclid(FULL_TURN_DEG);
        deg >= self.start_deg && deg < self.end_deg()
    }
}

/// Names longer than twelve characters are cut and suffixed with "...".
pub fn label_for(name: &str) -> String {
    if name.chars().count() > LABEL_MAX_CHARS {
        let head: String = name.chars().take(LABEL_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

/// Label size shrinks as the wheel gets crowded.
pub fn label_px(segment_count: usize) -> u32 {
    match segment_count {
        n if n > 12 => 10,
        n if n > 8 => 12,
        _ => 14,
    }
}

pub fn layout(names: &NameList, settings: &SpinSettings) -> Vec<Segment> {
    let n = names.len();
    if n == 0 {
        return Vec::new();
    }
    let sweep = FULL_TURN_DEG / n as f64;
    let px = label_px(n);
    names
        .iter()
        .enumerate()
        .map(|(index, name)| Segment {
            index,
            name: name.to_string(),
            label: label_for(name),
            start_deg: index as f64 * sweep,
            sweep_deg: sweep,
            color: settings.palette.color_for(index).to_string(),
            label_px: px,
        })
        .collect()
}

/// Segment drawn under the top pointer when the wheel shows `rotation_deg`.
pub fn segment_under_pointer(
    rotation_deg: f64,
    segments: &[Segment],
) -> Result<&Segment, SelectError> {
    let index = select_winner(rotation_deg, segments.len())?;
    Ok(&segments[index])
}
