// src/hash/zobrist.rs

use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use tracing::warn;

use crate::board::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ};

/// Piece letters are drawn from the ASCII alphabet: `A..Z` then `a..z`.
pub const PIECE_SLOTS: usize = 52;

/// Hashed auxiliary layers. Positions carrying more layers than this
/// warn and skip the extras.
pub const QUANTUM_LAYERS: usize = 4;

#[cfg(feature = "deterministic_zobrist")]
const ZOBRIST_SEED: u64 = 0x9E37_79B9_AAAC_5C87;

fn make_zobrist_rng() -> StdRng {
    #[cfg(feature = "deterministic_zobrist")]
    {
        StdRng::seed_from_u64(ZOBRIST_SEED)
    }
    #[cfg(not(feature = "deterministic_zobrist"))]
    {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        StdRng::from_seed(seed)
    }
}

pub struct ZobristKeys {
    /// [piece slot][square]; slots assigned by `piece_index`.
    pub piece_square: [[u64; 64]; PIECE_SLOTS],
    /// [layer][square] for the opaque quantum layers.
    pub quantum_square: [[u64; 64]; QUANTUM_LAYERS],
    /// [0]=WK, [1]=WQ, [2]=BK, [3]=BQ
    pub castling: [u64; 4],
    /// a..h => 0..7
    pub ep_file: [u64; 8],
    pub side_to_move: u64,
}

/// Maps a piece letter to its key-table slot; non-alphabetic letters
/// have no keys.
#[inline]
pub fn piece_index(letter: char) -> Option<usize> {
    match letter {
        'A'..='Z' => Some(letter as usize - 'A' as usize),
        'a'..='z' => Some(26 + letter as usize - 'a' as usize),
        _ => None,
    }
}

/// Global keys, initialized on first use.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| generate_zobrist_keys_with_rng(make_zobrist_rng()))
}

fn generate_zobrist_keys_with_rng(mut rng: StdRng) -> ZobristKeys {
    #[inline]
    fn non_zero(r: &mut StdRng) -> u64 {
        // avoid zero keys to reduce degenerate collisions
        let mut v = r.next_u64();
        while v == 0 {
            v = r.next_u64();
        }
        v
    }

    let mut keys = ZobristKeys {
        piece_square: [[0u64; 64]; PIECE_SLOTS],
        quantum_square: [[0u64; 64]; QUANTUM_LAYERS],
        castling: [0u64; 4],
        ep_file: [0u64; 8],
        side_to_move: 0,
    };

    for slot in keys.piece_square.iter_mut() {
        for sq in slot.iter_mut() {
            *sq = non_zero(&mut rng);
        }
    }
    for layer in keys.quantum_square.iter_mut() {
        for sq in layer.iter_mut() {
            *sq = non_zero(&mut rng);
        }
    }
    for key in keys.castling.iter_mut() {
        *key = non_zero(&mut rng);
    }
    for key in keys.ep_file.iter_mut() {
        *key = non_zero(&mut rng);
    }
    keys.side_to_move = non_zero(&mut rng);

    keys
}

/// Full recompute of the position fingerprint. XOR-commutative: the
/// order in which piece squares are visited never changes the result.
pub fn hash_position(board: &Board) -> u64 {
    let keys = zobrist_keys();
    let mut hash: u64 = 0;

    for (&letter, &bb) in &board.piece_boards {
        let Some(idx) = piece_index(letter) else {
            warn!("piece letter `{letter}` has no zobrist keys; skipped");
            continue;
        };
        let mut bits = bb;
        while bits != 0 {
            let sq = bits.trailing_zeros() as usize;
            hash ^= keys.piece_square[idx][sq];
            bits &= bits - 1;
        }
    }

    for (layer, &bb) in board.quantum_state.iter().enumerate() {
        if layer >= QUANTUM_LAYERS {
            warn!("quantum layer {layer} has no zobrist keys; skipped");
            continue;
        }
        let mut bits = bb;
        while bits != 0 {
            let sq = bits.trailing_zeros() as usize;
            hash ^= keys.quantum_square[layer][sq];
            bits &= bits - 1;
        }
    }

    if !board.white_to_move {
        hash ^= keys.side_to_move;
    }

    if board.castling_rights & CASTLE_WK != 0 {
        hash ^= keys.castling[0];
    }
    if board.castling_rights & CASTLE_WQ != 0 {
        hash ^= keys.castling[1];
    }
    if board.castling_rights & CASTLE_BK != 0 {
        hash ^= keys.castling[2];
    }
    if board.castling_rights & CASTLE_BQ != 0 {
        hash ^= keys.castling[3];
    }

    if board.en_passant != 0 {
        let file = board.en_passant.trailing_zeros() as usize % 8;
        hash ^= keys.ep_file[file];
    }

    hash
}
