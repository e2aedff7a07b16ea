use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_SPIN_SECS: f64 = 2.0;
pub const MAX_SPIN_SECS: f64 = 8.0;
pub const SPIN_STEP_SECS: f64 = 0.5;
pub const DEFAULT_SPIN_SECS: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("spin duration {0}s is outside {min}..={max}s", min = MIN_SPIN_SECS, max = MAX_SPIN_SECS)]
    DurationOutOfRange(f64),
    #[error("spin duration {0}s is not a multiple of {step}s", step = SPIN_STEP_SECS)]
    DurationOffStep(f64),
    #[error("a colour palette needs at least one colour")]
    EmptyPalette,
    #[error("unknown palette `{0}`")]
    UnknownPalette(String),
    #[error("unknown font `{0}`")]
    UnknownFont(String),
}

/// How long the wheel animates. Has no influence on which name wins.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SpinDuration(f64);

impl SpinDuration {
    pub fn new(secs: f64) -> Result<Self, SettingsError> {
        if !(MIN_SPIN_SECS..=MAX_SPIN_SECS).contains(&secs) {
            return Err(SettingsError::DurationOutOfRange(secs));
        }
        let steps = secs / SPIN_STEP_SECS;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(SettingsError::DurationOffStep(secs));
        }
        Ok(Self(secs))
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl Default for SpinDuration {
    fn default() -> Self {
        Self(DEFAULT_SPIN_SECS)
    }
}

impl TryFrom<f64> for SpinDuration {
    type Error = SettingsError;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        Self::new(secs)
    }
}

impl From<SpinDuration> for f64 {
    fn from(d: SpinDuration) -> f64 {
        d.0
    }
}

impl fmt::Display for SpinDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

const PRESETS: &[(&str, [&str; 8])] = &[
    ("Vibrant", ["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F"]),
    ("Ocean", ["#006994", "#13A5DC", "#94D1F2", "#7FB3D3", "#5A9FD4", "#266DD3", "#1B4F72", "#85C1E9"]),
    ("Sunset", ["#FF9A8B", "#A8E6CF", "#FFB347", "#FF6B9D", "#C780E8", "#87CEEB", "#98FB98", "#F0E68C"]),
    ("Earth", ["#8B4513", "#CD853F", "#DEB887", "#F4A460", "#D2691E", "#BC8F8F", "#F5DEB3", "#D2B48C"]),
    ("Neon", ["#FF073A", "#39FF14", "#00FFFF", "#FF1493", "#7FFF00", "#FF4500", "#DA70D6", "#00FF7F"]),
    ("Pastel", ["#FFB3BA", "#BAFFC9", "#BAE1FF", "#FFFFBA", "#FFDFBA", "#E0BBE4", "#D4F0F0", "#FCF4A3"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPalette")]
pub struct ColorPalette {
    name: String,
    colors: Vec<String>,
}

#[derive(Deserialize)]
struct RawPalette {
    name: String,
    colors: Vec<String>,
}

impl TryFrom<RawPalette> for ColorPalette {
    type Error = SettingsError;

    fn try_from(raw: RawPalette) -> Result<Self, Self::Error> {
        Self::custom(raw.name, raw.colors)
    }
}

impl ColorPalette {
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _)| *name)
    }

    pub fn presets() -> Vec<ColorPalette> {
        PRESETS
            .iter()
            .map(|(name, colors)| ColorPalette {
                name: (*name).to_string(),
                colors: colors.iter().map(|c| (*c).to_string()).collect(),
            })
            .collect()
    }

    /// Case-insensitive lookup of a named preset.
    pub fn preset(name: &str) -> Result<Self, SettingsError> {
        Self::presets()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| SettingsError::UnknownPalette(name.to_string()))
    }

    pub fn custom(
        name: impl Into<String>,
        colors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, SettingsError> {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(SettingsError::EmptyPalette);
        }
        Ok(Self {
            name: name.into(),
            colors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Colour for segment `index`, cycling through the palette.
    pub fn color_for(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        let (name, colors) = PRESETS[0];
        Self {
            name: name.to_string(),
            colors: colors.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl FromStr for ColorPalette {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::preset(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Poppins,
    Inter,
    Arial,
    Georgia,
    Monospace,
}

impl FontFamily {
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Poppins,
        FontFamily::Inter,
        FontFamily::Arial,
        FontFamily::Georgia,
        FontFamily::Monospace,
    ];

    pub fn css_name(self) -> &'static str {
        match self {
            FontFamily::Poppins => "Poppins",
            FontFamily::Inter => "Inter",
            FontFamily::Arial => "Arial",
            FontFamily::Georgia => "Georgia",
            FontFamily::Monospace => "monospace",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontFamily::Poppins => "Poppins (Modern)",
            FontFamily::Inter => "Inter (Clean)",
            FontFamily::Arial => "Arial (Classic)",
            FontFamily::Georgia => "Georgia (Elegant)",
            FontFamily::Monospace => "Monospace (Technical)",
        }
    }
}

impl FromStr for FontFamily {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.css_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SettingsError::UnknownFont(s.to_string()))
    }
}

/// Everything the settings panel controls. Only `spin_duration` reaches the
/// spin controller, and only to time the animation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpinSettings {
    pub spin_duration: SpinDuration,
    pub palette: ColorPalette,
    pub font: FontFamily,
}
