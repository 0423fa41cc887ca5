// src/moves/magic/structs.rs

/// A single magic bitboard entry used to compute sliding piece attacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicEntry {
    /// The magic number used to hash blocker bitboards into attack indices.
    pub magic: u64,

    /// The number of bits to shift after multiplication to get the table index.
    pub shift: u32,

    /// The relevant-occupancy mask for this square.
    pub mask: u64,

    /// The precomputed attack table indexed by (blockers & mask) * magic >> shift.
    pub table: Box<[u64]>,
}

/// 64 magic entries for one sliding kind, indexed by square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingAttackTable {
    pub entries: Vec<MagicEntry>,
}

impl SlidingAttackTable {
    /// Returns the attack bitboard for a given square and blockers.
    #[inline(always)]
    pub fn get_attacks(&self, square: usize, blockers: u64) -> u64 {
        let entry = &self.entries[square];
        let masked = blockers & entry.mask;
        let index = (masked.wrapping_mul(entry.magic) >> entry.shift) as usize;
        entry.table[index]
    }
}

/// The composite lookup context passed through every move query.
#[derive(Debug)]
pub struct MagicTables {
    pub rook: SlidingAttackTable,
    pub bishop: SlidingAttackTable,
    pub duck: SlidingAttackTable,
}
