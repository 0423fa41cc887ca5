// src/variant/expr.rs
//
// Move expressions are `+`-separated base-attack codes, e.g. `1+2+3`
// for rook | bishop | knight. Codes resolve to attack functions with the
// uniform signature (square, occupancy) -> bitboard; evaluation combines
// them with XOR. For the inventories this engine serves no two base
// functions ever share a destination square, so XOR and OR coincide, but
// XOR is what downstream consumers hash against and must stay bit-exact.

use arrayvec::ArrayVec;

use crate::board::Color;
use crate::moves::king::king_attacks;
use crate::moves::knight::knight_attacks;
use crate::moves::magic::MagicTables;
use crate::moves::pawn::{black_pawn_attacks, white_pawn_attacks};

/// Expressions are short lists; anything longer than this is rejected.
pub const MAX_TERMS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackCode {
    Rook,
    Bishop,
    Knight,
    King,
    WhitePawn,
    Duck,
    BlackPawn,
}

impl AttackCode {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(AttackCode::Rook),
            2 => Some(AttackCode::Bishop),
            3 => Some(AttackCode::Knight),
            16 => Some(AttackCode::King),
            17 => Some(AttackCode::WhitePawn),
            19 => Some(AttackCode::Duck),
            20 => Some(AttackCode::BlackPawn),
            _ => None,
        }
    }
}

pub type CompiledExpr = ArrayVec<AttackCode, MAX_TERMS>;

/// Parses `1+2+3` into attack codes. Unknown or malformed codes are a
/// recoverable error; the caller drops the affected piece letter.
pub fn parse_expr(expr: &str) -> Result<CompiledExpr, String> {
    let mut codes = CompiledExpr::new();
    for term in expr.split('+') {
        let term = term.trim();
        let number: u32 = term
            .parse()
            .map_err(|_| format!("malformed attack code `{term}` in `{expr}`"))?;
        let code = AttackCode::from_code(number)
            .ok_or_else(|| format!("unknown attack code {number} in `{expr}`"))?;
        codes
            .try_push(code)
            .map_err(|_| format!("expression `{expr}` exceeds {MAX_TERMS} terms"))?;
    }
    Ok(codes)
}

/// Evaluates a compiled expression at (square, occupancy), XOR-combining
/// the referenced attack functions. Pawn codes are colour-resolved: a
/// black-side piece always attacks down the board regardless of which
/// pawn code the variant author wrote.
pub fn evaluate(
    codes: &CompiledExpr,
    square: usize,
    occupancy: u64,
    side: Color,
    tables: &MagicTables,
) -> u64 {
    let mut result = 0u64;
    for &code in codes {
        let attacks = match code {
            AttackCode::Rook => tables.rook.get_attacks(square, occupancy),
            AttackCode::Bishop => tables.bishop.get_attacks(square, occupancy),
            AttackCode::Duck => tables.duck.get_attacks(square, occupancy),
            AttackCode::Knight => knight_attacks(square, occupancy),
            AttackCode::King => king_attacks(square, occupancy),
            AttackCode::WhitePawn | AttackCode::BlackPawn => match side {
                Color::White => white_pawn_attacks(square, occupancy),
                Color::Black => black_pawn_attacks(square, occupancy),
            },
        };
        result ^= attacks;
    }
    result
}
