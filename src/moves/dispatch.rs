// src/moves/dispatch.rs
//
// Walks the occupied squares of a parsed position in three passes
// (white, black, neutral) and resolves each piece's move expression into
// a destination bitboard. Attack queries always see the full occupancy
// as the blocker set; a side's own squares are removed from the targets
// afterwards, so sliders never see through enemy pieces.

use std::collections::BTreeMap;

use tracing::warn;

use crate::board::{Board, Color};
use crate::moves::magic::MagicTables;
use crate::utils::pop_lsb;
use crate::variant::Variant;
use crate::variant::expr::{self, CompiledExpr};

/// A variant's movesets compiled to attack codes, built once per variant
/// so the per-square hot path never touches expression strings.
#[derive(Debug)]
pub struct CompiledMovesets {
    by_letter: BTreeMap<char, CompiledExpr>,
}

impl CompiledMovesets {
    pub fn from_variant(variant: &Variant) -> Self {
        let mut by_letter = BTreeMap::new();
        for (&letter, expr_str) in &variant.movesets {
            match expr::parse_expr(expr_str) {
                Ok(codes) => {
                    by_letter.insert(letter, codes);
                }
                Err(e) => warn!(
                    "variant `{}`: piece `{letter}`: {e}; its squares generate no moves",
                    variant.game_mode
                ),
            }
        }
        CompiledMovesets { by_letter }
    }

    /// Resolves a board letter against the variant alphabet, folding case
    /// so `p` finds a moveset written for `P`.
    fn lookup(&self, letter: char) -> Option<&CompiledExpr> {
        self.by_letter
            .get(&letter)
            .or_else(|| self.by_letter.get(&letter.to_ascii_uppercase()))
            .or_else(|| self.by_letter.get(&letter.to_ascii_lowercase()))
    }
}

fn dispatch_pass(
    board: &Board,
    compiled: &CompiledMovesets,
    tables: &MagicTables,
    squares: u64,
    target_mask: u64,
    moves: &mut [u64; 64],
) {
    let mut bb = squares;
    while bb != 0 {
        let sq = pop_lsb(&mut bb) as usize;
        let Some(letter) = board.piece_letter_at(sq) else {
            continue;
        };
        let Some(codes) = compiled.lookup(letter) else {
            warn!("piece `{letter}` on square {sq} has no moveset; empty move set");
            continue;
        };
        let side = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        moves[sq] = expr::evaluate(codes, sq, board.occupancy, side, tables) & target_mask;
    }
}

/// Per-square move sets for a position under an already-compiled variant.
/// The three passes touch disjoint squares, so writing into one array is
/// the OR of their results.
pub fn generate_moves_compiled(
    board: &Board,
    compiled: &CompiledMovesets,
    tables: &MagicTables,
) -> [u64; 64] {
    let neutral = board.neutral_squares();
    let mut moves = [0u64; 64];

    // white pieces may not land on white or neutral squares
    dispatch_pass(
        board,
        compiled,
        tables,
        board.occ_white & !neutral,
        !board.occ_white,
        &mut moves,
    );
    // black pieces, symmetric
    dispatch_pass(
        board,
        compiled,
        tables,
        board.occ_black & !neutral,
        !board.occ_black,
        &mut moves,
    );
    // neutral pieces own both sides: empty squares only
    dispatch_pass(
        board,
        compiled,
        tables,
        neutral,
        !board.occupancy,
        &mut moves,
    );

    moves
}

/// Convenience entry point: compiles the variant's movesets and runs the
/// three passes.
pub fn generate_moves(board: &Board, variant: &Variant, tables: &MagicTables) -> [u64; 64] {
    let compiled = CompiledMovesets::from_variant(variant);
    generate_moves_compiled(board, &compiled, tables)
}
