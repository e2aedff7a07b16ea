use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wheelpick_core::{ColorPalette, FontFamily, NameList};

mod config;
mod report;
mod repl;
mod session;
mod timer;

use config::SettingsArgs;
use session::Session;

#[derive(Parser)]
#[command(name = "wheelpick", about = "Spin a wheel to pick a random name")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    settings: SettingsArgs,
    /// Print wheel events as JSON lines
    #[arg(long, global = true)]
    json: bool,
    /// Print the wheel angle while it turns
    #[arg(long, global = true)]
    frames: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin once over the given names and print the winner
    Spin {
        /// A name on the wheel; repeat for each entry
        #[arg(long = "name", value_name = "NAME")]
        names: Vec<String>,
    },
    /// Edit names and spin from a prompt
    Interactive {
        /// Start with an empty wheel instead of the sample names
        #[arg(long)]
        empty: bool,
    },
    /// List colour palettes and fonts
    Palettes,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Spin { names } => {
            let names = NameList::try_from(names).context("invalid name list")?;
            let settings = cli.settings.settings()?;
            let mut session =
                Session::new(names, settings, cli.settings.source(), cli.json, cli.frames);
            if session.spin() {
                session.run_until_settled().await?;
            }
        }
        Commands::Interactive { empty } => {
            let names = if empty {
                NameList::new()
            } else {
                NameList::default()
            };
            let settings = cli.settings.settings()?;
            Session::new(names, settings, cli.settings.source(), cli.json, cli.frames)
                .interactive_stdin()
                .await?;
        }
        Commands::Palettes => {
            for palette in ColorPalette::presets() {
                println!("{:<8} {}", palette.name(), palette.colors().join(" "));
            }
            println!();
            for font in FontFamily::ALL {
                println!("{:<10} {}", font.css_name(), font.label());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_takes_repeated_name_flags() {
        let cli =
            Cli::try_parse_from(["wheelpick", "spin", "--name", "Alice", "--name", "Mary Jane"])
                .unwrap();
        match cli.command {
            Commands::Spin { names } => assert_eq!(names, ["Alice", "Mary Jane"]),
            _ => panic!("expected spin"),
        }
        assert!(Cli::try_parse_from(["wheelpick", "spin", "Alice"]).is_err());
    }
}
