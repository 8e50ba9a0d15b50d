use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board.
pub const SIZE: usize = 4;

/// Probability that a spawned tile is a 2 (otherwise a 4).
pub const TWO_PROBABILITY: f64 = 0.9;

pub type Tile = u32;
pub type Score = u32;
pub type Line = [Tile; SIZE];
pub type Grid = [Line; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All directions, in `[Up, Down, Left, Right]` order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// The geometric transforms that map this move onto a leftward collapse,
    /// as `(transpose, reverse_rows)`.
    ///
    /// The transforms are applied in that order before collapsing and undone
    /// in the opposite order afterwards.
    #[inline]
    pub const fn transforms(self) -> (bool, bool) {
        match self {
            Move::Left => (false, false),
            Move::Right => (false, true),
            Move::Up => (true, false),
            Move::Down => (true, true),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// A 4x4 2048 board, row-major, 0 = empty.
///
/// `Board` is a plain `Copy` value: every operation takes a board and returns
/// a new one, so callers never observe partial updates.
///
/// Deserialization goes through `TryFrom<Grid>` (see [`crate::input`]) and
/// rejects tiles that are not 0 or a power of two >= 2.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Grid", into = "Grid")]
pub struct Board(Grid);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Construct a `Board` from its rows.
    ///
    /// Every non-zero value must be a power of two no smaller than 2.
    #[inline]
    pub fn from_rows(rows: Grid) -> Self {
        debug_assert!(
            rows.iter().flatten().all(|&v| is_valid_tile(v)),
            "board tiles must be 0 or a power of two >= 2: {rows:?}"
        );
        Board(rows)
    }

    /// Copy out the rows of this board.
    #[inline]
    pub fn rows(&self) -> Grid {
        self.0
    }

    /// Tile value at `(row, col)`, 0 if empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use merge_2048::engine::{Board, Move};
    /// let b = Board::from_rows([[0, 2, 0, 2], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.shift(Move::Left).get(0, 0), 4);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self {
        apply_move(self, dir).0
    }

    /// Slide/merge tiles in `dir`, returning the new board and the score gained.
    #[inline]
    pub fn apply_move(self, dir: Move) -> (Self, Score) {
        apply_move(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty slot, using the provided RNG.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use merge_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        spawn_tile(self, rng)
    }

    /// Convenience: like `with_random_tile` but uses thread-local RNG.
    #[inline]
    pub fn with_random_tile_thread(self) -> Self {
        let mut rng = rand::thread_rng();
        self.with_random_tile(&mut rng)
    }

    /// Return true if the board has an empty cell or two equal horizontal or
    /// vertical neighbours. See [`has_moves`].
    #[inline]
    pub fn has_moves(self) -> bool {
        has_moves(self)
    }

    /// Return true if no legal moves remain.
    ///
    /// ```
    /// use merge_2048::engine::Board;
    /// let full = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
    /// assert!(full.is_game_over());
    /// assert!(!Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(self) -> bool {
        !has_moves(self)
    }

    /// Return the highest tile value present on the board (0 when empty).
    #[inline]
    pub fn highest_tile(self) -> Tile {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize {
        self.0.iter().flatten().filter(|&&v| v == 0).count()
    }
}

impl From<Board> for Grid {
    fn from(b: Board) -> Self {
        b.rows()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f, "{}", "-".repeat(SIZE * 8 - 1))?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

/// True for 0 (empty) and for powers of two no smaller than 2.
#[inline]
pub fn is_valid_tile(v: Tile) -> bool {
    v == 0 || (v >= 2 && v.is_power_of_two())
}

/// An all-empty board.
pub fn new_board() -> Board {
    Board::EMPTY
}

/// Remove zeros from `line`, keeping the order of the remaining tiles, and pad
/// with zeros on the right.
pub fn compress(line: Line) -> Line {
    let mut out = [0; SIZE];
    for (slot, tile) in out.iter_mut().zip(line.into_iter().filter(|&v| v != 0)) {
        *slot = tile;
    }
    out
}

/// One left-to-right merge pass over a compressed line, then compress again.
///
/// A tile produced by a merge never merges a second time in the same pass.
pub fn merge(line: Line) -> (Line, Score) {
    let mut line = line;
    let mut delta = 0;
    let mut idx = 0;
    while idx + 1 < SIZE {
        if line[idx] != 0 && line[idx] == line[idx + 1] {
            line[idx] *= 2;
            line[idx + 1] = 0;
            delta += line[idx];
            // the zeroed neighbour cannot start a merge
            idx += 2;
        } else {
            idx += 1;
        }
    }
    (compress(line), delta)
}

/// Collapse a line towards index 0: compress, merge, compress.
///
/// ```
/// use merge_2048::engine::collapse_line;
/// assert_eq!(collapse_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
/// ```
pub fn collapse_line(line: Line) -> (Line, Score) {
    merge(compress(line))
}

/// Swap rows and columns.
pub fn transpose(board: Board) -> Board {
    let src = board.0;
    let mut out = [[0; SIZE]; SIZE];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = src[c][r];
        }
    }
    Board(out)
}

/// Mirror every row left-to-right.
pub fn reverse_rows(board: Board) -> Board {
    let mut out = board.0;
    for row in out.iter_mut() {
        row.reverse();
    }
    Board(out)
}

fn shift_rows_left(board: Board) -> (Board, Score) {
    let mut out = [[0; SIZE]; SIZE];
    let mut delta = 0;
    for (dst, &src) in out.iter_mut().zip(board.0.iter()) {
        let (line, line_delta) = collapse_line(src);
        *dst = line;
        delta += line_delta;
    }
    (Board(out), delta)
}

/// Slide/merge tiles in the given direction. No randomness.
///
/// Returns the new board and the sum of tiles created by merges. The board is
/// unchanged when the move is not legal.
pub fn apply_move(board: Board, direction: Move) -> (Board, Score) {
    let (transposed, reversed) = direction.transforms();
    let mut b = board;
    if transposed {
        b = transpose(b);
    }
    if reversed {
        b = reverse_rows(b);
    }
    let (mut b, delta) = shift_rows_left(b);
    if reversed {
        b = reverse_rows(b);
    }
    if transposed {
        b = transpose(b);
    }
    (b, delta)
}

/// Insert a 2 (90%) or 4 (10%) into a uniformly chosen empty cell.
///
/// A full board is returned unchanged.
pub fn spawn_tile<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Board {
    let empty: Vec<(usize, usize)> = (0..SIZE)
        .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
        .filter(|&(r, c)| board.0[r][c] == 0)
        .collect();
    if empty.is_empty() {
        return board;
    }
    let (r, c) = empty[rng.gen_range(0..empty.len())];
    let mut out = board.0;
    out[r][c] = generate_random_tile(rng);
    Board(out)
}

/// Insert a random tile using thread-local RNG.
///
/// For reproducible behavior, prefer `spawn_tile` with a seeded RNG.
pub fn spawn_tile_thread(board: Board) -> Board {
    board.with_random_tile_thread()
}

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_bool(TWO_PROBABILITY) { 2 } else { 4 }
}

/// True if the board has an empty cell or two equal horizontal/vertical neighbours.
///
/// On any board holding at least one tile this is the same as "some direction
/// changes the board". The empty board is the exception: it has moves by this
/// predicate although no direction changes it.
pub fn has_moves(board: Board) -> bool {
    let g = board.0;
    for r in 0..SIZE {
        for c in 0..SIZE {
            if g[r][c] == 0 {
                return true;
            }
            if c + 1 < SIZE && g[r][c] == g[r][c + 1] {
                return true;
            }
            if r + 1 < SIZE && g[r][c] == g[r + 1][c] {
                return true;
            }
        }
    }
    false
}

fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(7),
        x => format!("{:^7}", x),
    }
}
