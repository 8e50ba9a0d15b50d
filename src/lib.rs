//! merge-2048: a deterministic game-state engine for 2048
//!
//! This crate provides:
//! - A `Board` value type and pure engine functions (`engine` module): line
//!   collapse, directional moves, random tile spawn and the terminal check
//! - Parsing of player direction input and checked board deserialization (`input` module)
//! - A caller-side `Session` that tracks score and game over (`session` module)
//! - Aggregate reporting over many finished games (`report` module)
//!
//! Quick start:
//! ```
//! use merge_2048::engine::{self, Board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = engine::spawn_tile(engine::spawn_tile(engine::new_board(), &mut rng), &mut rng);
//! let (b1, delta) = engine::apply_move(b0, Move::Left);
//! if b1 != b0 {
//!     let b2 = engine::spawn_tile(b1, &mut rng);
//!     assert!(engine::has_moves(b2));
//! }
//! assert!(delta == 0 || delta == 4 || delta == 8);
//! ```
//!
//! Full loop, letting `Session` do the bookkeeping:
//! ```
//! use merge_2048::engine::Move;
//! use merge_2048::session::{Outcome, Session};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let mut game = Session::start(&mut rng);
//! for dir in [Move::Left, Move::Up, Move::Right, Move::Down] {
//!     if let Outcome::Moved { game_over: true, .. } = game.play(dir, &mut rng) {
//!         break;
//!     }
//! }
//! println!("{}Score: {}", game.board(), game.score());
//! ```
//!
pub mod engine;
pub mod input;
pub mod report;
pub mod session;
