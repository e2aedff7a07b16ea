use anyhow::Context;
use clap::Args;
use wheelpick_core::{
    ColorPalette, EntropySource, FontFamily, SeededSource, SpinDuration, SpinSettings, SpinSource,
};

#[derive(Debug, Clone, Args)]
pub struct SettingsArgs {
    /// Spin animation length in seconds (2-8, step 0.5)
    #[arg(long, env = "WHEELPICK_DURATION", default_value_t = 4.0, global = true)]
    pub duration: f64,
    /// Colour palette preset
    #[arg(long, env = "WHEELPICK_PALETTE", default_value = "vibrant", global = true)]
    pub palette: String,
    /// Font family used for segment labels
    #[arg(long, env = "WHEELPICK_FONT", default_value = "poppins", global = true)]
    pub font: String,
    /// Seed for reproducible spins; omit for OS randomness
    #[arg(long, env = "WHEELPICK_SEED", global = true)]
    pub seed: Option<String>,
}

impl SettingsArgs {
    pub fn settings(&self) -> anyhow::Result<SpinSettings> {
        let spin_duration = SpinDuration::new(self.duration).context("invalid --duration")?;
        let palette: ColorPalette = self.palette.parse().context("invalid --palette")?;
        let font: FontFamily = self.font.parse().context("invalid --font")?;
        Ok(SpinSettings {
            spin_duration,
            palette,
            font,
        })
    }

    pub fn source(&self) -> Box<dyn SpinSource> {
        match &self.seed {
            Some(seed) => {
                let source = SeededSource::new(seed.as_str());
                tracing::info!(fingerprint = %source.seed_fingerprint(), "using seeded spins");
                Box::new(source)
            }
            None => Box::new(EntropySource::new()),
        }
    }
}
