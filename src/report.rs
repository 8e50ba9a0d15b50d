//! Aggregate results over many finished sessions.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::Tile;
use crate::session::Summary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub games: usize,
    pub mean_score: f64,
    pub max_score: u64,
    pub mean_moves: f64,
    pub highest_tile: Tile,
    /// Number of games whose highest tile was exactly the key.
    pub tile_histogram: BTreeMap<Tile, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub seed: u64,
    pub aggregate: Aggregate,
    pub games: Vec<Summary>,
}

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Aggregate {
    pub fn from_summaries(games: &[Summary]) -> Self {
        let mut tile_histogram = BTreeMap::new();
        for g in games {
            *tile_histogram.entry(g.highest_tile).or_insert(0) += 1;
        }
        let n = games.len().max(1) as f64;
        Aggregate {
            games: games.len(),
            mean_score: games.iter().map(|g| g.score as f64).sum::<f64>() / n,
            max_score: games.iter().map(|g| g.score).max().unwrap_or(0),
            mean_moves: games.iter().map(|g| g.moves as f64).sum::<f64>() / n,
            highest_tile: games.iter().map(|g| g.highest_tile).max().unwrap_or(0),
            tile_histogram,
        }
    }
}

impl Report {
    pub fn new(seed: u64, games: Vec<Summary>) -> Self {
        Report { seed, aggregate: Aggregate::from_summaries(&games), games }
    }
}

pub fn write_json_to_path<P: AsRef<Path>>(path: P, report: &Report) -> Result<(), ReportError> {
    let bytes = serde_json::to_vec_pretty(report)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn read_json_from_path<P: AsRef<Path>>(path: P) -> Result<Report, ReportError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
