use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use connect_four_minimax::ai::{Agent, HumanAgent, MoveSelector};
use connect_four_minimax::config::AppConfig;
use connect_four_minimax::game::Board;
use connect_four_minimax::session::GameSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Two people share the terminal
    TwoPlayer,
    /// One person against the bot
    HumanVsBot,
    /// Two bots, optionally of different skill
    BotVsBot,
}

/// Play Connect Four against a minimax bot.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against a minimax bot")]
struct Cli {
    /// Who is playing
    #[arg(long, value_enum, default_value = "human-vs-bot")]
    mode: Mode,

    /// In human-vs-bot mode, let the human move first (as Red)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    human_first: bool,

    /// Override the bot's skill (0-100)
    #[arg(long)]
    skill: Option<u8>,

    /// Skill of the second bot in bot-vs-bot mode (defaults to --skill)
    #[arg(long)]
    opponent_skill: Option<u8>,

    /// Override the search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Seed for reproducible bot play
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(skill) = cli.skill {
        config.bot.skill = skill;
    }
    if let Some(depth) = cli.depth {
        config.search.max_depth = depth;
    }
    if let Some(seed) = cli.seed {
        config.bot.seed = Some(seed);
    }
    config.validate().context("invalid settings")?;

    let (red, yellow): (Box<dyn Agent>, Box<dyn Agent>) = match cli.mode {
        Mode::TwoPlayer => (
            Box::new(HumanAgent::stdio("Player 1")),
            Box::new(HumanAgent::stdio("Player 2")),
        ),
        Mode::HumanVsBot if cli.human_first => (
            Box::new(HumanAgent::stdio("You")),
            Box::new(MoveSelector::from_config(&config)),
        ),
        Mode::HumanVsBot => (
            Box::new(MoveSelector::from_config(&config)),
            Box::new(HumanAgent::stdio("You")),
        ),
        Mode::BotVsBot => {
            let mut opponent = config.clone();
            if let Some(skill) = cli.opponent_skill {
                opponent.bot.skill = skill;
            }
            opponent.bot.seed = config.bot.seed.map(|seed| seed.wrapping_add(2));
            opponent.validate().context("invalid opponent settings")?;
            (
                Box::new(MoveSelector::from_config(&config)),
                Box::new(MoveSelector::from_config(&opponent)),
            )
        }
    };

    println!("Welcome to Connect 4!");
    println!("Red: {}  |  Yellow: {}", red.name(), yellow.name());
    println!("{}", Board::new());

    let mut session = GameSession::new(red, yellow);
    let outcome = session
        .run(|board, turn| {
            println!("\n{} played column {}", turn.player.name(), turn.column);
            println!("{board}");
        })
        .context("game aborted")?;

    println!("{outcome}");
    Ok(())
}
