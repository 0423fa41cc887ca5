// src/variant/ini.rs
//
// Variants configuration: an INI file with one `[Section]` per variant.
// `Pieces` and `Moveset` may arrive in either order; whichever comes
// second triggers the pairing into the per-letter moveset map.

use std::path::Path;

use tracing::warn;

use super::{Variant, VariantRegistry};

fn parse_piece_list(value: &str) -> Vec<char> {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '+')
        .collect()
}

fn parse_moveset_list(value: &str) -> Vec<String> {
    let (Some(open), Some(close)) = (value.find('['), value.rfind(']')) else {
        warn!("Moveset value `{value}` is not a bracketed list");
        return Vec::new();
    };
    if close <= open {
        warn!("Moveset value `{value}` is not a bracketed list");
        return Vec::new();
    }
    value[open + 1..close]
        .split(',')
        .map(|item| item.trim().to_string())
        .collect()
}

fn bind_movesets(variant: &mut Variant, movesets: &[String]) {
    if movesets.len() != variant.pieces.len() {
        warn!(
            "mismatched Pieces ({}) and Moveset ({}) count in variant `{}`",
            variant.pieces.len(),
            movesets.len(),
            variant.game_mode,
        );
        variant.movesets.clear();
        return;
    }
    variant.movesets = variant
        .pieces
        .iter()
        .copied()
        .zip(movesets.iter().cloned())
        .collect();
}

/// Parses INI text into a registry. Syntax problems are recovered with a
/// diagnostic; the affected variant is left partially populated.
pub fn parse_variants_ini(text: &str) -> VariantRegistry {
    let mut registry = VariantRegistry::default();

    let mut current: Option<Variant> = None;
    let mut pending_moveset: Option<Vec<String>> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if let Some(done) = current.take() {
                registry.insert(done);
            }
            pending_moveset = None;

            let name = line[1..line.len() - 1].trim().to_string();
            current = Some(Variant {
                game_mode: name,
                ..Variant::default()
            });
            continue;
        }

        let Some(variant) = current.as_mut() else {
            warn!("configuration line `{line}` outside any [Variant] section");
            continue;
        };

        let Some((key, value)) = line.split_once('=') else {
            warn!("configuration line `{line}` is not key=value");
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "Pieces" => {
                variant.pieces = parse_piece_list(value);
                if let Some(movesets) = pending_moveset.take() {
                    bind_movesets(variant, &movesets);
                }
            }
            "Moveset" => {
                let movesets = parse_moveset_list(value);
                if variant.pieces.is_empty() {
                    // wait until Pieces appears
                    pending_moveset = Some(movesets);
                } else {
                    bind_movesets(variant, &movesets);
                }
            }
            "Effects" => variant.effects = value.to_string(),
            "Board" => variant.board = value.to_string(),
            "StdPos" => variant.std_pos = value.to_string(),
            "Move_num" => {
                variant.move_num = value.parse().unwrap_or_else(|_| {
                    warn!("Move_num `{value}` is not an integer; keeping 1");
                    1
                })
            }
            "Board_num" => {
                variant.board_num = value.parse().unwrap_or_else(|_| {
                    warn!("Board_num `{value}` is not an integer; keeping 1");
                    1
                })
            }
            other => warn!(
                "unknown key `{other}` in variant `{}`",
                variant.game_mode
            ),
        }
    }

    if let Some(done) = current.take() {
        registry.insert(done);
    }
    registry
}

/// Reads and parses a variants INI file.
pub fn load_variants<P: AsRef<Path>>(path: P) -> Result<VariantRegistry, String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot open variants file {}: {e}", path.display()))?;
    Ok(parse_variants_ini(&text))
}
