// src/moves/magic/loader.rs
//
// Binary persistence for the magic tables, one file per sliding kind
// (rookMagics.bin / bishopMagics.bin / duckMagics.bin). Each file is 64
// records in square order:
//
//   mask    : u64 little-endian
//   magic   : u64 little-endian
//   shift   : i32 little-endian
//   n       : u64 little-endian   (attack table length)
//   attacks : n x u64 little-endian
//
// bincode's fixint encoding (little-endian integers, u64 vector lengths)
// produces exactly this layout when the record below is serialised field
// by field, so no hand-rolled byte packing is needed.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::moves::magic::precompute::{MagicTableSeed, SlidingKind, generate_sliding_table};
use crate::moves::magic::structs::{MagicEntry, MagicTables, SlidingAttackTable};

#[derive(Serialize, Deserialize)]
struct MagicRecord {
    mask: u64,
    magic: u64,
    shift: i32,
    attacks: Vec<u64>,
}

pub fn magic_file_path(dir: &Path, kind: SlidingKind) -> PathBuf {
    dir.join(kind.file_name())
}

fn write_table(path: &Path, table: &SlidingAttackTable) -> Result<(), String> {
    let file =
        File::create(path).map_err(|e| format!("cannot create {}: {e}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for entry in &table.entries {
        let record = MagicRecord {
            mask: entry.mask,
            magic: entry.magic,
            shift: entry.shift as i32,
            attacks: entry.table.to_vec(),
        };
        bincode::serialize_into(&mut writer, &record)
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    }
    Ok(())
}

fn read_table(path: &Path) -> Result<SlidingAttackTable, String> {
    let file = File::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut entries = Vec::with_capacity(64);
    for square in 0..64 {
        let record: MagicRecord = bincode::deserialize_from(&mut reader)
            .map_err(|e| format!("{}: record {square}: {e}", path.display()))?;

        let expected = 1usize << record.mask.count_ones();
        if record.attacks.len() != expected {
            return Err(format!(
                "{}: record {square}: table length {} does not match mask popcount ({expected})",
                path.display(),
                record.attacks.len(),
            ));
        }
        if record.shift != (64 - record.mask.count_ones()) as i32 {
            return Err(format!(
                "{}: record {square}: shift {} inconsistent with mask",
                path.display(),
                record.shift,
            ));
        }

        entries.push(MagicEntry {
            magic: record.magic,
            shift: record.shift as u32,
            mask: record.mask,
            table: record.attacks.into_boxed_slice(),
        });
    }

    Ok(SlidingAttackTable { entries })
}

/// Loads one kind's table from its cache file, building and persisting it
/// if the file is absent. A file that fails validation is treated as
/// corrupt: it is rebuilt from scratch and overwritten, never silently
/// worked around.
pub fn load_sliding_table(
    dir: &Path,
    kind: SlidingKind,
    seed: MagicTableSeed,
) -> Result<SlidingAttackTable, String> {
    let path = magic_file_path(dir, kind);

    if path.exists() {
        match read_table(&path) {
            Ok(table) => {
                debug!(?kind, path = %path.display(), "magic table loaded from cache");
                return Ok(table);
            }
            Err(e) => {
                warn!(?kind, "corrupt magic cache ({e}); rebuilding");
            }
        }
    }

    let table = generate_sliding_table(kind, seed)?;
    write_table(&path, &table)?;
    debug!(?kind, path = %path.display(), "magic table built and persisted");
    Ok(table)
}

/// Loads (or builds on first use) all three sliding tables from `dir`.
pub fn load_magic_tables(dir: &Path) -> Result<MagicTables, String> {
    Ok(MagicTables {
        rook: load_sliding_table(dir, SlidingKind::Rook, MagicTableSeed::Entropy)?,
        bishop: load_sliding_table(dir, SlidingKind::Bishop, MagicTableSeed::Entropy)?,
        duck: load_sliding_table(dir, SlidingKind::Duck, MagicTableSeed::Entropy)?,
    })
}
