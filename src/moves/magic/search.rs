// src/moves/magic/search.rs

use rand::RngCore;

const MAX_ATTEMPTS: u32 = 1_000_000;

/// Generate a sparse 64-bit candidate by AND-ing three random draws.
/// Sparse multipliers spread the mask bits across the top of the product,
/// which keeps the index distribution collision-friendly.
#[inline(always)]
pub fn random_sparse_u64<R: RngCore>(rng: &mut R) -> u64 {
    rng.next_u64() & rng.next_u64() & rng.next_u64()
}

/// Cheap pre-filter from Stockfish: a candidate whose product with the
/// mask puts fewer than six bits into the top byte hashes too narrowly to
/// be worth the full table-fill test.
#[inline(always)]
fn top_byte_is_dense(magic: u64, mask: u64) -> bool {
    (magic.wrapping_mul(mask) & 0xFF00_0000_0000_0000).count_ones() >= 6
}

/// Attempts to fill a perfect-hash table for one square. Two blocker
/// subsets may share a slot only if they share an attack set (a
/// constructive collision); any destructive collision rejects the magic.
fn try_fill_table(
    blockers: &[u64],
    attacks: &[u64],
    magic: u64,
    shift: u32,
) -> Option<Box<[u64]>> {
    debug_assert_eq!(blockers.len(), attacks.len());

    let mut table = vec![0u64; blockers.len()].into_boxed_slice();
    let mut used = vec![false; blockers.len()];

    for (&occ, &attack) in blockers.iter().zip(attacks.iter()) {
        let index = (occ.wrapping_mul(magic) >> shift) as usize;
        if !used[index] {
            used[index] = true;
            table[index] = attack;
        } else if table[index] != attack {
            return None;
        }
    }
    Some(table)
}

/// Draws candidates until one hashes every blocker subset of `mask`
/// without a destructive collision, returning the magic and its filled
/// attack table. Termination is probabilistic; in practice a few thousand
/// draws suffice per square.
pub fn find_magic_for_square<R: RngCore>(
    mask: u64,
    blockers: &[u64],
    attacks: &[u64],
    rng: &mut R,
) -> Result<(u64, u32, Box<[u64]>), String> {
    let shift = 64 - mask.count_ones();

    for _attempt in 0..MAX_ATTEMPTS {
        let magic = random_sparse_u64(rng);
        if !top_byte_is_dense(magic, mask) {
            continue;
        }
        if let Some(table) = try_fill_table(blockers, attacks, magic, shift) {
            return Ok((magic, shift, table));
        }
    }
    Err(format!(
        "no magic found for mask {mask:#018x} after {MAX_ATTEMPTS} attempts"
    ))
}
