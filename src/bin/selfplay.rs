use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use merge_2048::engine::Move;
use merge_2048::report::{self, Report};
use merge_2048::session::{Session, Summary};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "selfplay", version, about = "Play many random-policy 2048 games in parallel")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Base seed; game `i` uses `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of worker threads (defaults to Rayon default)
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,

    /// Write per-game summaries and the aggregate to this JSON file
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,
}

fn play_one(seed: u64) -> Summary {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Session::start(&mut rng);
    while !game.is_game_over() {
        let dir = Move::ALL[rng.gen_range(0..Move::ALL.len())];
        game.play(dir, &mut rng);
    }
    game.summary()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Some(n) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("configuring rayon thread pool")?;
    }

    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(cli.games);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} games ({eta})")?
                .progress_chars("=>-"),
        );
        pb
    };

    let summaries: Vec<Summary> = (0..cli.games)
        .into_par_iter()
        .map(|i| {
            let s = play_one(cli.seed.wrapping_add(i));
            pb.inc(1);
            s
        })
        .collect();
    pb.finish_and_clear();

    let report = Report::new(cli.seed, summaries);
    let agg = &report.aggregate;
    println!(
        "games: {} | mean score: {:.1} | max score: {} | mean moves: {:.1} | highest tile: {}",
        agg.games, agg.mean_score, agg.max_score, agg.mean_moves, agg.highest_tile
    );
    for (tile, count) in &agg.tile_histogram {
        println!("{tile:>6}: {count}");
    }

    if let Some(path) = cli.json {
        report::write_json_to_path(&path, &report)
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!("wrote report to {}", path.display());
    }
    Ok(())
}
