//! Binary entrypoint for the survsim CLI.
//!
//! Commands:
//! - `play` - load content and run the interactive session loop
//! - `init` - create a starter `survsim.toml` and default content files
//! - `status` - load content and print a summary of what is defined
//!
//! See the library crate docs for module-level details: `survsim::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{BufRead, Write};
use std::path::Path;

use survsim::config::Config;
use survsim::game::{handle_command, ContentPaths, ContentRegistry, GameSession};

#[derive(Parser)]
#[command(name = "survsim")]
#[command(about = "A content-driven turn-based survival simulation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "survsim.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive session
    Play,
    /// Initialize a starter configuration and content directory
    Init,
    /// Show a summary of loadable content
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes it)
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Play => {
            let config = match pre_config {
                Some(config) => config,
                None => {
                    warn!(
                        "config {} not found or invalid; using defaults (run 'survsim init')",
                        cli.config
                    );
                    Config::default()
                }
            };
            info!("Starting survsim v{}", env!("CARGO_PKG_VERSION"));
            play(&config)?;
        }
        Commands::Init => {
            init(&cli.config)?;
        }
        Commands::Status => {
            let config = pre_config.unwrap_or_default();
            let paths = ContentPaths::under(&config.game.content_dir);
            let registry = ContentRegistry::load(&paths);
            println!("Content directory: {}", config.game.content_dir);
            println!("  items:    {}", registry.item_count());
            println!("  monsters: {}", registry.monster_count());
            println!("  recipes:  {}", registry.recipe_count());
        }
    }

    Ok(())
}

/// The interactive dispatcher: read a line, route it through the session,
/// print the result. Ends on quit or permanent player defeat.
fn play(config: &Config) -> Result<()> {
    let paths = ContentPaths::under(&config.game.content_dir);
    let registry = ContentRegistry::load(&paths);
    let mut session = GameSession::new(registry, config.game.player_hp);

    println!("survsim - type 'help' for commands");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        if line.trim().is_empty() {
            continue;
        }

        let (lines, quit) = handle_command(&mut session, &line);
        for out in lines {
            println!("{}", out);
        }
        if quit || session.is_over() {
            break;
        }
    }
    Ok(())
}

/// Write a default config plus starter content files so a fresh checkout
/// has something to play with.
fn init(config_path: &str) -> Result<()> {
    if Path::new(config_path).exists() {
        println!("{} already exists; leaving it untouched", config_path);
    } else {
        Config::create_default(config_path)?;
        println!("Wrote {}", config_path);
    }

    let config = Config::load(config_path)?;
    let dir = Path::new(&config.game.content_dir);
    std::fs::create_dir_all(dir)?;

    write_if_absent(&dir.join("items.txt"), STARTER_ITEMS)?;
    write_if_absent(&dir.join("monsters.txt"), STARTER_MONSTERS)?;
    write_if_absent(&dir.join("recipes.txt"), STARTER_RECIPES)?;
    println!("Content directory ready: {}", dir.display());
    Ok(())
}

fn write_if_absent(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists; leaving it untouched", path.display());
        return Ok(());
    }
    std::fs::write(path, contents)?;
    println!("Wrote {}", path.display());
    Ok(())
}

// Starter content in the record shapes the scanner understands. Items use
// the simplified delimiterless variant; monsters and recipes use delimited
// records.
const STARTER_ITEMS: &str = r#""id": "stick"
"str": "Stout Stick"
"id": "coal"
"str": "Lump of Coal"
"id": "rope"
"str": "Hemp Rope"
"id": "flint"
"str": "Flint Shard"
"id": "torch"
"str": "Torch"
"#;

const STARTER_MONSTERS: &str = r#"{
  "id": "gray_wolf",
  "name": { "str": "Gray Wolf" },
  "hp": 10,
  "melee_dice": 1,
  "melee_dice_sides": 4,
  "armor": 0
}
{
  "id": "cave_bear",
  "name": { "str": "Cave Bear" },
  "hp": 25,
  "melee_dice": 2,
  "melee_dice_sides": 4,
  "armor": 1
}
"#;

const STARTER_RECIPES: &str = r#"{
  "id": "torch",
  "result": "torch",
  "components": [
    [ "stick", 1 ],
    [ "coal", 1 ]
  ]
}
{
  "id": "fire_starter",
  "result": "fire_starter",
  "components": [
    [ "flint", 1 ],
    [ "stick", 1 ],
    [ "rope", 1 ]
  ]
}
"#;

fn init_logging(config: &Option<Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|cfg| match cfg.logging.level.as_str() {
                "error" => log::LevelFilter::Error,
                "warn" => log::LevelFilter::Warn,
                "debug" => log::LevelFilter::Debug,
                "trace" => log::LevelFilter::Trace,
                _ => log::LevelFilter::Info,
            })
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    if let Some(cfg) = config {
        if let Some(ref file) = cfg.logging.file {
            if let Ok(f) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
            {
                let mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
                let write_mutex = mutex.clone();

                // When stdout is a terminal, echo log lines to the console
                // as well as the file
                let is_tty = atty::is(atty::Stream::Stdout);

                builder.format(move |fmt, record| {
                    let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                    let line = format!("{} [{}] {}", ts, record.level(), record.args());

                    if let Ok(mut guard) = write_mutex.lock() {
                        let _ = writeln!(guard, "{}", line);
                    }
                    if is_tty {
                        writeln!(fmt, "{}", line)?;
                    }
                    Ok(())
                });
            }
        }
    }

    let _ = builder.try_init();
}
