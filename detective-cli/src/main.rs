mod console;
mod stdin;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::ConsoleNarrator;
use detective_core::config::DEFAULT_BUCKET_COUNT;
use detective_core::{CommandSource, Expedition, LedgerConfig, Level, QuestConfig, RoomTree};
use std::io::Write;
use stdin::StdinCommands;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "detective-quest")]
#[command(about = "Explore the mansion, collect clues and name the culprit", long_about = None)]
struct Cli {
    /// Game variant to play
    #[arg(long, value_enum, default_value_t = LevelArg::Master)]
    level: LevelArg,

    /// Bucket count of the clue -> suspect table
    #[arg(long, default_value_t = DEFAULT_BUCKET_COUNT)]
    buckets: usize,

    /// End the walk on reaching a room with no doors (defaults depend on level)
    #[arg(long)]
    stop_at_leaf: Option<bool>,

    /// Print a JSON session report after the game
    #[arg(long)]
    json: bool,

    /// Log filter for diagnostics on stderr (e.g. "debug", "detective_core=info")
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LevelArg {
    Explorer,
    Collector,
    Master,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Explorer => Level::Explorer,
            LevelArg::Collector => Level::Collector,
            LevelArg::Master => Level::Master,
        }
    }
}

impl Cli {
    fn quest_config(&self) -> QuestConfig {
        QuestConfig {
            level: self.level.into(),
            ledger: LedgerConfig {
                bucket_count: self.buckets,
            },
            stop_at_leaf: self.stop_at_leaf,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.quest_config();
    let tree = RoomTree::mansion().context("Failed to build the mansion map")?;
    let mut expedition = Expedition::new(tree, config).context("Invalid game configuration")?;

    println!("Welcome to Detective Quest ({} level)!", config.level);
    println!("Explore the mansion and collect clues.");

    let mut input = StdinCommands::default();
    let mut narrator = ConsoleNarrator::default();
    expedition
        .explore(&mut input, &mut narrator)
        .await
        .context("Exploration aborted")?;

    if config.level.collects_clues() {
        println!("\nClues collected (alphabetical order):");
        if expedition.clues().is_empty() {
            println!("No clues were collected.");
        } else {
            for clue in expedition.clues() {
                println!("- {clue}");
            }
        }
    }

    let verdict = if config.level.tracks_suspects() {
        accuse(&expedition, &mut input).await?
    } else {
        None
    };

    if cli.json {
        let report = expedition.report(verdict);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

async fn accuse<S: CommandSource>(
    expedition: &Expedition,
    input: &mut S,
) -> Result<Option<detective_core::Verdict>> {
    print!("\nWho do you accuse? Type the suspect's name: ");
    std::io::stdout().flush()?;

    let Some(name) = input.next_line().await.context("Failed to read accusation")? else {
        println!("\nNo name given. The trial is closed.");
        return Ok(None);
    };

    match expedition.accuse(&name)? {
        Some(verdict) => {
            println!("\n{verdict}");
            Ok(Some(verdict))
        }
        None => {
            println!("Empty name. The trial is closed.");
            Ok(None)
        }
    }
}
