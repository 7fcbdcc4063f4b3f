//! Pyramid solitaire - command line front end
//!
//! A thin view/input layer over the engine: it maps text commands onto the
//! session's command API and renders snapshots. All engine rejections are
//! printed and play continues; nothing here can crash the game.

use clap::{Parser, Subcommand};
use pyramid_rs::game::{
    Command as GameCommand, GameSession, GameStatus, RandomController, SlotId, Snapshot, Source,
    DEFAULT_RECYCLE_LIMIT,
};
use std::io::{self, BufRead, Write};

/// Verbosity level for playout output (accepts both names and numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum VerbosityLevel {
    Silent = 0,
    Minimal = 1,
    Normal = 2,
    Verbose = 3,
}

#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "pyramid")]
#[command(about = "Pyramid (Match-13) solitaire", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive play over stdin
    Play {
        /// Random seed for the deal (default: from system entropy)
        #[arg(long)]
        seed: Option<u64>,

        /// How many times the waste may be recycled into the stock
        #[arg(long, default_value_t = DEFAULT_RECYCLE_LIMIT)]
        recycle_limit: u32,

        /// Print snapshots as JSON instead of the ASCII board
        #[arg(long)]
        json: bool,
    },

    /// Seeded random playouts (engine soak / win-rate sampling)
    Auto {
        /// Base seed; game i uses seed + i
        #[arg(long)]
        seed: Option<u64>,

        /// How many times the waste may be recycled into the stock
        #[arg(long, default_value_t = DEFAULT_RECYCLE_LIMIT)]
        recycle_limit: u32,

        /// Number of games to play
        #[arg(long, default_value_t = 100)]
        games: u64,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, short = 'v', default_value = "normal")]
        verbosity: VerbosityArg,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            seed,
            recycle_limit,
            json,
        } => run_play(resolve_seed(seed), recycle_limit, json),
        Commands::Auto {
            seed,
            recycle_limit,
            games,
            verbosity,
        } => run_auto(resolve_seed(seed), recycle_limit, games, verbosity.0),
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

fn run_play(seed: u64, recycle_limit: u32, json: bool) -> anyhow::Result<()> {
    let mut session = GameSession::new(seed, recycle_limit);
    println!("Pyramid solitaire (seed {seed}, recycle limit {recycle_limit})");
    println!("Commands: d=draw  r=recycle  k <slot|w>  m <a> <b>  b=board  q=quit");
    render(&session.snapshot(), json)?;

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let command = match tokens.as_slice() {
            [] => continue,
            ["q"] | ["quit"] => break,
            ["b"] | ["board"] => {
                render(&session.snapshot(), json)?;
                continue;
            }
            ["d"] | ["draw"] => GameCommand::Draw,
            ["r"] | ["recycle"] => GameCommand::Recycle,
            ["k", src] => match parse_source(src) {
                Some(source) => GameCommand::RemoveSingle(source),
                None => {
                    println!("unrecognized source '{src}' (use a slot number or 'w')");
                    continue;
                }
            },
            ["m", a, b] => match (parse_source(a), parse_source(b)) {
                (Some(a), Some(b)) => GameCommand::RemovePair(a, b),
                _ => {
                    println!("unrecognized sources (use slot numbers or 'w')");
                    continue;
                }
            },
            _ => {
                println!("unrecognized command (d, r, k <src>, m <a> <b>, b, q)");
                continue;
            }
        };

        match session.apply(command) {
            Ok(snapshot) => {
                render(&snapshot, json)?;
                match snapshot.status {
                    GameStatus::Won => {
                        println!("You cleared the pyramid!");
                        break;
                    }
                    GameStatus::Lost => {
                        println!("No moves remain. Game over.");
                        break;
                    }
                    GameStatus::InProgress => {}
                }
            }
            Err(err) => println!("rejected: {err}"),
        }
    }
    Ok(())
}

fn run_auto(
    seed: u64,
    recycle_limit: u32,
    games: u64,
    verbosity: VerbosityLevel,
) -> anyhow::Result<()> {
    let mut won = 0u64;
    for i in 0..games {
        let game_seed = seed.wrapping_add(i);
        let mut session = GameSession::new(game_seed, recycle_limit);
        let mut controller = RandomController::with_seed(game_seed);
        let status = controller.play_out(&mut session)?;
        if status == GameStatus::Won {
            won += 1;
        }
        if verbosity >= VerbosityLevel::Verbose {
            println!(
                "seed {game_seed}: {status:?} ({} of 28 removed, {} recycles)",
                session.state().tableau.removed_count(),
                session.state().piles.recycles_used()
            );
        } else if verbosity >= VerbosityLevel::Normal {
            println!("seed {game_seed}: {status:?}");
        }
    }
    if verbosity >= VerbosityLevel::Minimal {
        println!("won {won}/{games} random playouts (base seed {seed})");
    }
    Ok(())
}

fn parse_source(token: &str) -> Option<Source> {
    match token {
        "w" | "waste" => Some(Source::Waste),
        _ => token.parse::<u8>().ok().map(|n| Source::Pyramid(SlotId::new(n))),
    }
}

/// Draw the pyramid as seven centered rows of `id:card` cells, exposed cards
/// marked with `*`, removed slots as dots.
fn render(snapshot: &Snapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }
    let mut id = 0usize;
    for row in 0..7 {
        let mut line = " ".repeat((6 - row) * 4);
        for _ in 0..=row {
            let view = &snapshot.slots[id];
            if view.removed {
                line.push_str("   ·    ");
            } else {
                let mark = if view.exposed { '*' } else { ' ' };
                line.push_str(&format!("{id:>2}:{:<3}{mark} ", view.card.to_string()));
            }
            id += 1;
        }
        println!("{}", line.trim_end());
    }
    let waste = match snapshot.waste_top {
        Some(card) => format!("{card} ({} cards)", snapshot.waste_len),
        None => "empty".to_string(),
    };
    println!(
        "stock: {}  waste: {waste}  recycles: {}/{}  status: {:?}",
        snapshot.stock_len, snapshot.recycles_used, snapshot.recycle_limit, snapshot.status
    );
    Ok(())
}
