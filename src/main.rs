use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use spin_connect::ai::{Agent, MinimaxAgent, RandomAgent};
use spin_connect::config::AppConfig;
use spin_connect::game::{GameOutcome, GameState, Player};
use spin_connect::play::play_game;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// You play first against the minimax opponent
    HumanVsAi,
    /// Two people take turns at the same terminal
    HumanVsHuman,
    /// Minimax against itself
    AiVsAi,
    /// Minimax (first) against a random player
    AiVsRandom,
}

/// Play Connect-N with board rotation in the terminal.
#[derive(Parser)]
#[command(name = "spin-connect", about = "Connect-N with a rotating board")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "spin_connect.toml")]
    config: PathBuf,

    /// Who plays whom
    #[arg(long, value_enum, default_value = "human-vs-ai")]
    mode: Mode,

    /// Override number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of columns
    #[arg(long)]
    cols: Option<usize>,

    /// Override the run length needed to win
    #[arg(long)]
    connect: Option<usize>,

    /// Override the search depth in plies
    #[arg(long)]
    depth: Option<usize>,

    /// Seed for the random player
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

/// A line of human input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Drop(usize),
    Rotate(i32),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "q" | "quit" => Some(Command::Quit),
        "cw" => Some(Command::Rotate(1)),
        "ccw" => Some(Command::Rotate(-1)),
        "flip" => Some(Command::Rotate(2)),
        other => other.parse().ok().map(Command::Drop),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    if let Some(connect) = cli.connect {
        config.board.connect = connect;
    }
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    config.validate().context("validating configuration")?;

    let mut state = config.board.new_game();
    let mut minimax = MinimaxAgent::from_config(&config.search, config.heuristic);

    match cli.mode {
        Mode::HumanVsAi => {
            play_interactive(&mut state, [None, Some(&mut minimax as &mut dyn Agent)])
        }
        Mode::HumanVsHuman => play_interactive(&mut state, [None, None]),
        Mode::AiVsAi => {
            let mut other = MinimaxAgent::from_config(&config.search, config.heuristic);
            play_automated(&mut state, &mut minimax, &mut other)
        }
        Mode::AiVsRandom => {
            let mut random = match cli.seed {
                Some(seed) => RandomAgent::seeded(seed),
                None => RandomAgent::new(),
            };
            play_automated(&mut state, &mut minimax, &mut random)
        }
    }
}

fn play_automated(state: &mut GameState, first: &mut dyn Agent, second: &mut dyn Agent) -> Result<()> {
    println!(
        "{} ({}) vs {} ({})",
        first.name(),
        Player::One.id(),
        second.name(),
        Player::Two.id()
    );
    let record = play_game(state, first, second).context("running game")?;
    for mv in &record.moves {
        println!("{} drops in column {}", mv.player.name(), mv.column);
    }
    println!("{}", state.grid());
    report(record.outcome);
    Ok(())
}

/// Interactive game. `agents` holds player one's and player two's agent; a
/// `None` seat is played by a human typing commands.
fn play_interactive(
    state: &mut GameState,
    mut agents: [Option<&mut dyn Agent>; 2],
) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Commands: <column>, cw, ccw, flip, q");
    while !state.is_terminal() {
        println!("{}\n", state.grid());

        let player = state.current_player();
        if let Some(agent) = agents[seat(player)].as_deref_mut() {
            let Some(column) = agent.select_action(state) else {
                bail!("{} found no move", agent.name());
            };
            state.play(column).context("applying agent move")?;
            println!("{} drops in column {column}", agent.name());
            continue;
        }

        print!("{} ({}) > ", player.name(), player.id());
        io::stdout().flush().context("flushing stdout")?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("reading input")?;

        match parse_command(&line) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::Drop(column)) => {
                if let Err(err) = state.play(column) {
                    println!("{err}");
                }
            }
            Some(Command::Rotate(quarter_turns)) => match state.rotate(quarter_turns) {
                Ok(result) => println!("{} tokens moved", result.relocations.len()),
                Err(err) => println!("{err}"),
            },
            None => println!("unrecognised input '{}'", line.trim()),
        }
    }

    println!("{}", state.grid());
    if let Some(outcome) = state.outcome() {
        report(outcome);
    }
    Ok(())
}

/// Index into the seat array of [`play_interactive`].
fn seat(player: Player) -> usize {
    match player {
        Player::One => 0,
        Player::Two => 1,
    }
}

fn report(outcome: GameOutcome) {
    match outcome {
        GameOutcome::Winner(player) => println!("{} wins!", player.name()),
        GameOutcome::Draw => println!("Draw."),
    }
}
