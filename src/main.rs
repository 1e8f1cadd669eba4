//! Binary entrypoint for the Questline CLI.
//!
//! Commands:
//! - `play [--name <n>] [--save <path>] [--new]` - text menu game
//! - `grid [--name <n>] [--save <path>] [--new]` - ASCII grid overworld
//! - `init` - write a starter `questline.toml`
//! - `status [--name <n>] [--save <path>]` - summarize a save file
//!
//! See the library crate docs for module-level details: `questline::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use questline::adventure::storage::{load_game, save_path};
use questline::adventure::{welcome_banner, Prompter, Session, TurnResult};
use questline::config::Config;
use questline::console::ConsoleIo;
use questline::validation::validate_character_name;

const BANNER_WIDTH: usize = 20;

#[derive(Parser)]
#[command(name = "questline")]
#[command(about = "A single-player text adventure with monsters, a shop and save files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "questline.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play with the numbered text menu
    Play {
        /// Character name (asked interactively when omitted)
        #[arg(short, long)]
        name: Option<String>,
        /// Save file to use instead of <save_dir>/<name>.json
        #[arg(short, long)]
        save: Option<String>,
        /// Ignore any existing save and start over
        #[arg(long)]
        new: bool,
    },
    /// Play on the ASCII grid overworld
    Grid {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        save: Option<String>,
        #[arg(long)]
        new: bool,
    },
    /// Write a default configuration file
    Init,
    /// Show the state stored in a save file
    Status {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        save: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes it)
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Some(load_or_default(&cli.config)?),
    };
    init_logging(pre_config.as_ref().map(|(c, _)| c), cli.verbose);
    if let Some((_, true)) = pre_config {
        warn!(
            "Config file {} not found; using built-in defaults",
            cli.config
        );
    }
    let config = pre_config.map(|(c, _)| c).unwrap_or_default();

    match cli.command {
        Commands::Play { name, save, new } => {
            let mut io = ConsoleIo::stdio();
            let Some(mut session) = open_session(&config, name, save, new, &mut io)? else {
                return Ok(());
            };
            let mut rng = StdRng::from_entropy();
            let result = session.run(&mut io, &mut rng);
            report_end(&session, result);
        }
        Commands::Grid { name, save, new } => {
            let mut io = ConsoleIo::stdio();
            let Some(mut session) = open_session(&config, name, save, new, &mut io)? else {
                return Ok(());
            };
            let mut rng = StdRng::from_entropy();
            let mut world = session.grid_world(&config.grid, &mut rng);
            let result = session.run_grid(&mut world, &mut io, &mut rng);
            report_end(&session, result);
        }
        Commands::Status { name, save } => {
            let path = match (save, name) {
                (Some(path), _) => PathBuf::from(path),
                (None, Some(name)) => {
                    let name = validate_character_name(&name)?;
                    save_path(Path::new(&config.game.save_dir), &name)
                }
                (None, None) => return Err(anyhow!("status needs --name or --save")),
            };
            let outcome = load_game(&path);
            println!("{}", outcome.notice(&path));
            println!("{}", outcome.state.summary());
            println!("Position: {:?}", <[usize; 2]>::from(outcome.state.position));
        }
        Commands::Init => {
            if Path::new(&cli.config).exists() {
                println!("{} already exists; leaving it untouched.", cli.config);
                return Ok(());
            }
            Config::create_default(&cli.config)?;
            info!("Configuration file created at {}", cli.config);
            println!("Wrote default configuration to {}", cli.config);
        }
    }

    Ok(())
}

/// Load the config file, or fall back to defaults when it does not exist. A file that
/// exists but does not parse is still an error.
fn load_or_default(path: &str) -> Result<(Config, bool)> {
    if Path::new(path).exists() {
        Ok((Config::load(path)?, false))
    } else {
        Ok((Config::default(), true))
    }
}

/// Ask for a character name until a valid one is entered. `None` on end of input.
fn ask_name<P: Prompter>(io: &mut P) -> Option<String> {
    loop {
        let raw = io.ask("What is your name, adventurer? ")?;
        match validate_character_name(&raw) {
            Ok(name) => return Some(name),
            Err(e) => io.say(&format!("{}. Please try again.", e)),
        }
    }
}

fn open_session<P: Prompter>(
    config: &Config,
    name: Option<String>,
    save: Option<String>,
    fresh: bool,
    io: &mut P,
) -> Result<Option<Session>> {
    let name = match name {
        Some(n) => n,
        None => match ask_name(io) {
            Some(n) => n,
            None => return Ok(None),
        },
    };
    let mut session = Session::new(&name, config.game.clone())?;
    if let Some(path) = save {
        session = session.with_save_path(path);
    }
    io.say(&welcome_banner(&session.name, BANNER_WIDTH));
    if fresh {
        info!("New game for {} at {}", session.name, session.save_path.display());
        io.say("Starting a new game.");
    } else {
        let (_, notice) = session.load();
        io.say(&notice);
    }
    Ok(Some(session))
}

fn report_end(session: &Session, result: TurnResult) {
    match result {
        TurnResult::GameOver => info!("{} was defeated", session.name),
        TurnResult::Quit | TurnResult::Continue => info!("{} left the game", session.name),
    }
}

fn init_logging(config: Option<&Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let level = match verbosity {
        0 => config
            .map(|c| c.logging.level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    // Log lines go to stderr only on request, so they never interleave with the game
    // screen by default.
    let mirror = verbosity > 0 && atty::is(atty::Stream::Stderr);
    let file = config
        .and_then(|c| c.logging.log_file())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    match file {
        Some(f) => {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if mirror {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            if verbosity == 0 {
                builder.filter_level(level.min(log::LevelFilter::Warn));
            }
            builder.format(|fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
            });
        }
    }
    let _ = builder.try_init();
}
