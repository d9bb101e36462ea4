use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use snake_tui::modes::{PlayMode, SettingsMode};
use snake_tui::prefs::PrefStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_tui")]
#[command(version, about = "Snake in the terminal with persisted preferences")]
struct Cli {
    /// What to run: the game or the settings panel
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Cells per board axis
    #[arg(long, default_value = "20")]
    tiles: usize,

    /// Preference file shared by every mode and instance
    #[arg(long, default_value = "snake_prefs.json")]
    prefs: PathBuf,

    /// Disable terminal bell cues
    #[arg(long)]
    mute: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Adjust speed, walls, skins; changes persist for every instance
    Settings,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(cli.tiles >= 10, "board must be at least 10x10 cells");

    let store = PrefStore::open(cli.prefs)?;

    match cli.mode {
        Mode::Play => {
            let mut play = PlayMode::new(store, cli.tiles, cli.mute);
            play.run().await?;
        }
        Mode::Settings => {
            let mut settings = SettingsMode::new(store);
            settings.run().await?;
        }
    }

    Ok(())
}
