//! Caller-side game state: the board, the running score and the terminal flag.
//!
//! The engine is pure; `Session` is the one place that mutates state, once per
//! accepted move.

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{self, Board, Move, Score, Tile};

/// What happened when a move was offered to a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The board changed; a tile was spawned and the score updated.
    Moved { score_delta: Score, game_over: bool },
    /// The move would not change the board. Nothing was spawned or scored.
    NoChange,
    /// The session is already over and accepts no moves.
    Finished,
}

/// End-of-game (or in-progress) figures for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub score: u64,
    pub moves: u32,
    pub highest_tile: Tile,
    pub game_over: bool,
    pub board: Board,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    board: Board,
    score: u64,
    moves: u32,
    game_over: bool,
}

impl Session {
    /// Start a session: an empty board seeded with two random tiles.
    ///
    /// ```
    /// use merge_2048::session::Session;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let s = Session::start(&mut rng);
    /// assert_eq!(s.board().count_empty(), 14);
    /// assert_eq!(s.score(), 0);
    /// ```
    pub fn start<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let board = engine::new_board().with_random_tile(rng).with_random_tile(rng);
        debug!("session started\n{board}");
        Self::from_board(board)
    }

    /// Resume play from an arbitrary board with a zero score.
    pub fn from_board(board: Board) -> Self {
        Session { board, score: 0, moves: 0, game_over: board.is_game_over() }
    }

    /// Discard the current game and start a fresh one.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Session::start(rng);
    }

    #[inline]
    pub fn board(&self) -> Board {
        self.board
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Number of accepted (board-changing) moves.
    #[inline]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Offer a move. Tiles are spawned and the terminal check runs only after a
    /// move that changed the board.
    ///
    /// ```
    /// use merge_2048::engine::{Board, Move};
    /// use merge_2048::session::{Outcome, Session};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let mut s = Session::from_board(Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]));
    /// assert_eq!(s.play(Move::Left, &mut rng), Outcome::Moved { score_delta: 4, game_over: false });
    /// assert_eq!(s.score(), 4);
    /// ```
    pub fn play<R: Rng + ?Sized>(&mut self, direction: Move, rng: &mut R) -> Outcome {
        if self.game_over {
            trace!("ignoring {direction}: session is over");
            return Outcome::Finished;
        }
        let (moved, score_delta) = engine::apply_move(self.board, direction);
        if moved == self.board {
            trace!("{direction} does not change the board");
            return Outcome::NoChange;
        }
        self.board = engine::spawn_tile(moved, rng);
        self.score += u64::from(score_delta);
        self.moves += 1;
        self.game_over = !engine::has_moves(self.board);
        if self.game_over {
            debug!(
                "game over after {} moves, score {}, highest tile {}",
                self.moves,
                self.score,
                self.board.highest_tile()
            );
        }
        Outcome::Moved { score_delta, game_over: self.game_over }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            score: self.score,
            moves: self.moves,
            highest_tile: self.board.highest_tile(),
            game_over: self.game_over,
            board: self.board,
        }
    }
}
