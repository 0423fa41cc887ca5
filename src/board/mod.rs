mod fen;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::utils::popcount;

/// Castling rights: bit 0=White kingside, 1=White queenside, 2=Black kingside, 3=Black queenside
pub const CASTLE_WK: u8 = 0b0001;
pub const CASTLE_WQ: u8 = 0b0010;
pub const CASTLE_BK: u8 = 0b0100;
pub const CASTLE_BQ: u8 = 0b1000;

/// Which side a piece belongs to. Neutral pieces belong to both and are
/// represented by membership in both occupancy masks, not by a variant
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

/// Core position representation using bitboards.
///
/// `piece_boards` is keyed by the FEN letter of each piece type; the
/// inventory is variant-defined, so there is no fixed piece enum. A
/// `BTreeMap` keeps square→letter resolution deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Union of all occupied squares.
    pub occupancy: u64,
    /// Per-side occupancy. Neutral squares are set in both.
    pub occ_white: u64,
    pub occ_black: u64,
    /// One bitboard per piece letter seen in the position.
    pub piece_boards: BTreeMap<char, u64>,
    /// Opaque auxiliary layers; hashed, never interpreted.
    pub quantum_state: Vec<u64>,
    pub white_to_move: bool,
    pub castling_rights: u8,
    /// En passant target square as a bitboard with at most one bit set.
    pub en_passant: u64,
    /// Halfmove clock (for fifty-move draw rule).
    pub halfmove_clock: u32,
    /// Fullmove number (starts at 1 and increments after Black's move).
    pub fullmove_number: u32,
    /// Cached Zobrist fingerprint, recomputable at any time.
    pub zobrist: u64,
    /// Position hash -> occurrence count.
    pub repetition_table: HashMap<u64, u32>,
}

impl Board {
    /// Create an empty board (all bitboards zero, White to move).
    pub fn new_empty() -> Self {
        let mut b = Board {
            occupancy: 0,
            occ_white: 0,
            occ_black: 0,
            piece_boards: BTreeMap::new(),
            quantum_state: Vec::new(),
            white_to_move: true,
            castling_rights: 0,
            en_passant: 0,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist: 0,
            repetition_table: HashMap::new(),
        };
        b.refresh_zobrist();
        b
    }

    /// Recompute from current state and store into `self.zobrist`.
    #[inline]
    pub fn refresh_zobrist(&mut self) {
        self.zobrist = crate::hash::zobrist::hash_position(self);
    }

    /// Squares occupied by a piece belonging to neither side alone.
    #[inline(always)]
    pub fn neutral_squares(&self) -> u64 {
        self.occ_white & self.occ_black
    }

    /// The piece letter occupying `square`, resolved in letter order.
    /// Unambiguous for every square on a board satisfying `validate`.
    pub fn piece_letter_at(&self, square: usize) -> Option<char> {
        let bit = 1u64 << square;
        self.piece_boards
            .iter()
            .find(|&(_, &bb)| bb & bit != 0)
            .map(|(&letter, _)| letter)
    }

    /// Records the current hash in the repetition table and returns the
    /// new occurrence count.
    pub fn record_repetition(&mut self) -> u32 {
        let count = self.repetition_table.entry(self.zobrist).or_insert(0);
        *count += 1;
        *count
    }

    /// Occurrences of the current hash recorded so far.
    pub fn repetition_count(&self) -> u32 {
        self.repetition_table.get(&self.zobrist).copied().unwrap_or(0)
    }

    /// Checks the occupancy invariants:
    /// - `occupancy` is the union of every piece board;
    /// - no square is claimed by two piece letters;
    /// - both side masks stay inside `occupancy`;
    /// - at most one en-passant square.
    pub fn validate(&self) -> Result<(), String> {
        let mut union = 0u64;
        let mut seen = 0u64;
        for (&letter, &bb) in &self.piece_boards {
            if seen & bb != 0 {
                return Err(format!(
                    "piece board `{letter}` overlaps another piece on {:#018x}",
                    seen & bb
                ));
            }
            seen |= bb;
            union |= bb;
        }
        if union != self.occupancy {
            return Err(format!(
                "occupancy {:#018x} is not the union of piece boards {union:#018x}",
                self.occupancy
            ));
        }
        if (self.occ_white | self.occ_black) != self.occupancy {
            return Err("side occupancies do not cover occupancy".to_string());
        }
        if popcount(self.en_passant) > 1 {
            return Err("more than one en-passant square".to_string());
        }
        Ok(())
    }
}

/// An all-zero board (no pieces) with White to move.
impl Default for Board {
    fn default() -> Self {
        Board::new_empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
