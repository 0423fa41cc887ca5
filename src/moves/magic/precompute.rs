// src/moves/magic/precompute.rs

use rand::{RngCore, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::moves::magic::attacks::{
    bishop_attacks_per_square, bishop_relevant_mask, duck_attacks_per_square, duck_relevant_mask,
    rook_attacks_per_square, rook_relevant_mask,
};
use crate::moves::magic::search::find_magic_for_square;
use crate::moves::magic::structs::{MagicEntry, SlidingAttackTable};
use crate::utils::subsets;

#[cfg(feature = "deterministic_magic")]
const MAGIC_SEED: u64 = 0xD6E8_FEB8_6659_FD93;

/// The three sliding piece kinds this engine hashes with magic tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidingKind {
    Rook,
    Bishop,
    Duck,
}

impl SlidingKind {
    pub fn relevant_mask(self, square: usize) -> u64 {
        match self {
            SlidingKind::Rook => rook_relevant_mask(square),
            SlidingKind::Bishop => bishop_relevant_mask(square),
            SlidingKind::Duck => duck_relevant_mask(square),
        }
    }

    pub fn attacks(self, square: usize, blockers: u64) -> u64 {
        match self {
            SlidingKind::Rook => rook_attacks_per_square(square, blockers),
            SlidingKind::Bishop => bishop_attacks_per_square(square, blockers),
            SlidingKind::Duck => duck_attacks_per_square(square, blockers),
        }
    }

    /// Cache file name for this kind (see `loader`).
    pub fn file_name(self) -> &'static str {
        match self {
            SlidingKind::Rook => "rookMagics.bin",
            SlidingKind::Bishop => "bishopMagics.bin",
            SlidingKind::Duck => "duckMagics.bin",
        }
    }
}

/// Seed policy for the magic search RNG.
#[derive(Debug, Clone, Copy)]
pub enum MagicTableSeed {
    Fixed(u64),
    Entropy,
}

fn make_magic_rng(seed: MagicTableSeed) -> StdRng {
    match seed {
        MagicTableSeed::Fixed(s) => StdRng::seed_from_u64(s),
        MagicTableSeed::Entropy => {
            #[cfg(feature = "deterministic_magic")]
            {
                StdRng::seed_from_u64(MAGIC_SEED)
            }
            #[cfg(not(feature = "deterministic_magic"))]
            {
                let mut seed_bytes = [0u8; 32];
                rand::rng().fill_bytes(&mut seed_bytes);
                StdRng::from_seed(seed_bytes)
            }
        }
    }
}

/// Builds the full 64-square magic table for one sliding kind: enumerate
/// every blocker subset of each square's relevant mask, compute the
/// reference attacks, then search a collision-free multiplier.
pub fn generate_sliding_table(
    kind: SlidingKind,
    seed: MagicTableSeed,
) -> Result<SlidingAttackTable, String> {
    let mut rng = make_magic_rng(seed);
    let mut entries = Vec::with_capacity(64);

    for square in 0..64 {
        let mask = kind.relevant_mask(square);
        let blockers: Vec<u64> = subsets(mask).collect();
        let attacks: Vec<u64> = blockers.iter().map(|&b| kind.attacks(square, b)).collect();

        let (magic, shift, table) = find_magic_for_square(mask, &blockers, &attacks, &mut rng)
            .map_err(|e| format!("{kind:?} square {square}: {e}"))?;

        debug!(?kind, square, magic, table_len = table.len(), "magic found");
        entries.push(MagicEntry {
            magic,
            shift,
            mask,
            table,
        });
    }

    Ok(SlidingAttackTable { entries })
}
