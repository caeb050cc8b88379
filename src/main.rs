use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use viper::game::GameConfig;
use viper::runtime::App;

/// Library names behind the three switchable backend slots (keys 1/2/3)
const BACKEND_SLOTS: [&str; 3] = [
    "viper_backend_tui",
    "viper_backend_ascii",
    "viper_backend_retro",
];

#[derive(Parser)]
#[command(name = "viper")]
#[command(version, about = "Grid-arena snake with hot-swappable renderer plugins")]
struct Cli {
    /// Arena width in cells (minimum 16)
    width: usize,

    /// Arena height in cells (minimum 16)
    height: usize,

    /// Directory holding the renderer plugin libraries; defaults to the
    /// directory of the executable itself
    #[arg(long)]
    backend_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Missing or invalid arguments exit with status 1, not clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    // The active backend owns stderr for rendering, so log lines go to
    // stdout where they surface once the terminal is restored
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("viper=info")),
        )
        .with_writer(std::io::stdout)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = GameConfig::new(cli.width, cli.height);
    config.validate()?;

    let backend_dir = match cli.backend_dir {
        Some(dir) => dir,
        None => default_backend_dir()?,
    };
    let backends = BACKEND_SLOTS
        .iter()
        .map(|name| backend_dir.join(format!("{DLL_PREFIX}{name}{DLL_SUFFIX}")))
        .collect();

    App::new(config, backends).run()
}

fn default_backend_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot locate the running executable")?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
