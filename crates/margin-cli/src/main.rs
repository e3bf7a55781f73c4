mod client;

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use margin_config::Config;
use margin_engine::{
    Buffer, EditError, EditSession, Mode, Position, RopeBuffer, SessionSettings, StatusReporter,
};

use client::HttpGenerator;

#[derive(Parser, Debug)]
#[command(name = "margin")]
#[command(about = "Ask a language model to write into a Markdown file at a cursor or selection")]
#[command(version)]
struct Args {
    /// Markdown file to edit
    file: PathBuf,

    /// What the model should write
    instruction: String,

    /// Cursor line (1-based)
    #[arg(long, short = 'l')]
    line: usize,

    /// Cursor column (1-based, in bytes)
    #[arg(long, short = 'c')]
    column: usize,

    /// Selection end line (1-based)
    #[arg(long, requires = "to_column")]
    to_line: Option<usize>,

    /// Selection end column (1-based, in bytes)
    #[arg(long, requires = "to_line")]
    to_column: Option<usize>,

    /// Replace the selection, insert at the cursor, or pick by whether anything is selected
    #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
    mode: ModeArg,

    /// Config file [default: ~/.config/margin/config.toml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the edited document instead of writing the file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Auto,
    Replace,
    Insert,
}

impl ModeArg {
    /// Picks the edit mode for `selection`; a replace needs one.
    fn resolve(self, selection: &str) -> Result<Mode, EditError> {
        let mode = match self {
            ModeArg::Auto => Mode::auto(selection),
            ModeArg::Replace => Mode::Replace,
            ModeArg::Insert => Mode::Insert,
        };
        if mode == Mode::Replace && selection.is_empty() {
            return Err(EditError::Mode);
        }
        Ok(mode)
    }
}

impl Args {
    fn cursor(&self) -> Position {
        Position::new(self.line.saturating_sub(1), self.column.saturating_sub(1))
    }

    fn selection_end(&self) -> Position {
        match (self.to_line, self.to_column) {
            (Some(line), Some(column)) => {
                Position::new(line.saturating_sub(1), column.saturating_sub(1))
            }
            _ => self.cursor(),
        }
    }
}

/// Status lines on stderr, so `--dry-run` output stays clean.
struct StderrStatus;

impl StatusReporter for StderrStatus {
    fn busy(&mut self, message: &str) {
        eprint!("{message}");
        let _ = std::io::stderr().flush();
    }

    fn clear(&mut self) {
        eprintln!();
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file {} does not exist", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };
    Ok(loaded)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let mut buffer = RopeBuffer::from_bytes(&bytes)
        .with_context(|| format!("{} is not UTF-8", args.file.display()))?;
    buffer.select(args.cursor(), args.selection_end());

    let mode = args.mode.resolve(&buffer.selection_text())?;

    let generator = HttpGenerator::from_config(&config)?;
    let settings = SessionSettings {
        context_window: config.context_window,
    };
    let mut session = EditSession::with_settings(generator, StderrStatus, settings);
    let outcome = session.run(&mut buffer, mode, &args.instruction)?;
    info!(
        "{:?} at {}..{} in {}",
        outcome.mode,
        outcome.from,
        outcome.to,
        args.file.display()
    );

    if args.dry_run {
        print!("{}", buffer.text());
    } else {
        std::fs::write(&args.file, buffer.to_bytes())
            .with_context(|| format!("Failed to write {}", args.file.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Args::parse())
}
