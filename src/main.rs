//! Star Strike - native entry point

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use star_strike::assets::AssetPaths;
use star_strike::platform::{self, AppConfig};
use star_strike::settings::DEFAULT_SETTINGS_FILE;
use star_strike::{GameLog, Settings};

#[derive(Parser, Debug)]
#[command(name = "star-strike", version, about = "A vertical-scrolling arcade space shooter")]
struct Cli {
    /// Free-form argument, written verbatim to the game log
    arg: Option<String>,

    /// Asset root directory (overrides settings)
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Settings file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Game log file (overrides settings)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Run seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(assets) = &self.assets {
            settings.assets_dir = assets.clone();
        }
        if let Some(log_file) = &self.log_file {
            settings.log_file = log_file.clone();
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.settings);
    cli.apply(&mut settings);

    let mut journal = match GameLog::open(&settings.log_file) {
        Ok(journal) => journal,
        Err(e) => {
            log::error!("Failed to open game log {}: {}", settings.log_file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(arg) = &cli.arg {
        journal.write(arg);
    }

    let config = AppConfig {
        assets: AssetPaths::new(&settings.assets_dir),
        seed: settings.seed.unwrap_or_else(clock_seed),
        settings,
    };

    match platform::run(config, &mut journal) {
        Ok(()) => {
            log::info!("Shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            journal.write(&format!("Startup failed: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_settings() {
        let cli = Cli::parse_from(["star-strike", "hello", "--assets", "data", "--seed", "7"]);
        assert_eq!(cli.arg.as_deref(), Some("hello"));
        assert_eq!(cli.settings, PathBuf::from(DEFAULT_SETTINGS_FILE));

        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.assets_dir, PathBuf::from("data"));
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.log_file, PathBuf::from("game.log"));
    }

    #[test]
    fn test_cli_defaults_keep_settings() {
        let cli = Cli::parse_from(["star-strike"]);
        let mut settings = Settings {
            seed: Some(3),
            ..Default::default()
        };
        cli.apply(&mut settings);
        assert_eq!(settings.seed, Some(3));
        assert!(cli.arg.is_none());
    }
}
