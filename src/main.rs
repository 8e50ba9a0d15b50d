use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use merge_2048::engine::Move;
use merge_2048::input::ParseMoveError;
use merge_2048::session::{Outcome, Session};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Debug, Parser)]
#[command(name = "merge-2048", version, about = "Play 2048 in the terminal")]
struct Args {
    /// Seed for tile spawns (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Play random directions instead of reading moves from stdin
    #[arg(long)]
    auto: bool,

    /// Auto mode: stop after this many accepted moves
    #[arg(long, value_name = "N")]
    max_moves: Option<u32>,

    /// Only print the game-over and score lines when a game ends
    #[arg(long)]
    quiet: bool,
}

enum Command {
    Go(Move),
    New,
    Quit,
}

const RESTART_HINT: &str = "Type `new` to play again or `quit` to exit.";

fn parse_command(line: &str) -> Result<Option<Command>, ParseMoveError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "n" | "new" => Ok(Some(Command::New)),
        "q" | "quit" | "exit" => Ok(Some(Command::Quit)),
        other => other.parse().map(|m| Some(Command::Go(m))),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Session::start(&mut rng);
    let mut out = io::stdout().lock();

    if args.auto {
        run_auto(&mut game, &mut rng, args.max_moves, args.quiet, &mut out)?;
    } else {
        run_interactive(&mut game, &mut rng, args.quiet, io::stdin().lock(), &mut out)?;
    }
    out.flush().context("flushing stdout")?;
    Ok(())
}

fn render<W: Write>(game: &Session, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", game.board())?;
    writeln!(out, "Score: {}", game.score())
}

/// Announce a finished game. Written once, on the move that ended it.
fn announce_game_over<W: Write>(game: &Session, out: &mut W) -> io::Result<()> {
    writeln!(out, "Game Over!")?;
    writeln!(out, "I scored {} in 2048!", game.score())
}

fn run_auto<W: Write>(
    game: &mut Session,
    rng: &mut StdRng,
    max_moves: Option<u32>,
    quiet: bool,
    out: &mut W,
) -> Result<()> {
    if !quiet {
        render(game, out)?;
    }
    while !game.is_game_over() {
        if max_moves.is_some_and(|limit| game.moves() >= limit) {
            info!("stopped after {} moves with score {}", game.moves(), game.score());
            return Ok(());
        }
        let dir = Move::ALL[rng.gen_range(0..Move::ALL.len())];
        if let Outcome::Moved { .. } = game.play(dir, rng) {
            if !quiet {
                writeln!(out, "{dir}")?;
                render(game, out)?;
            }
        }
    }
    announce_game_over(game, out)?;
    Ok(())
}

fn run_interactive<R: BufRead, W: Write>(
    game: &mut Session,
    rng: &mut StdRng,
    quiet: bool,
    input: R,
    out: &mut W,
) -> Result<()> {
    if !quiet {
        render(game, out)?;
    }
    for line in input.lines() {
        let line = line.context("reading move from stdin")?;
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                if !quiet {
                    writeln!(out, "{e}")?;
                }
                continue;
            }
        };
        match cmd {
            Command::Quit => break,
            Command::New => {
                info!("new game (previous score {})", game.score());
                game.restart(rng);
                if !quiet {
                    render(game, out)?;
                }
            }
            Command::Go(dir) => match game.play(dir, rng) {
                Outcome::Moved { game_over: true, .. } => {
                    if !quiet {
                        render(game, out)?;
                    }
                    announce_game_over(game, out)?;
                    if !quiet {
                        writeln!(out, "{RESTART_HINT}")?;
                    }
                }
                Outcome::Moved { .. } => {
                    if !quiet {
                        render(game, out)?;
                    }
                }
                Outcome::NoChange => {
                    if !quiet {
                        writeln!(out, "{dir} does not move anything")?;
                    }
                }
                Outcome::Finished => {
                    if !quiet {
                        writeln!(out, "{RESTART_HINT}")?;
                    }
                }
            },
        }
        out.flush().context("flushing output")?;
    }
    Ok(())
}
