pub mod expr;
pub mod ini;

use std::collections::BTreeMap;

/// One `[Section]` of the variants INI file.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Section name.
    pub game_mode: String,
    /// Piece alphabet, whitespace and `+` stripped.
    pub pieces: Vec<char>,
    /// Piece letter -> move-expression string, e.g. `"1+2+3"`.
    pub movesets: BTreeMap<char, String>,
    pub effects: String,
    pub board: String,
    pub std_pos: String,
    pub move_num: i32,
    pub board_num: i32,
}

impl Default for Variant {
    fn default() -> Self {
        Variant {
            game_mode: String::new(),
            pieces: Vec::new(),
            movesets: BTreeMap::new(),
            effects: String::new(),
            board: String::new(),
            std_pos: String::new(),
            move_num: 1,
            board_num: 1,
        }
    }
}

/// All parsed variants, looked up by section name.
#[derive(Debug, Default)]
pub struct VariantRegistry {
    variants: BTreeMap<String, Variant>,
}

impl VariantRegistry {
    pub fn insert(&mut self, variant: Variant) {
        self.variants.insert(variant.game_mode.clone(), variant);
    }

    /// Looks a variant up by name; a miss is a caller-visible error
    /// naming the missing variant.
    pub fn get(&self, name: &str) -> Result<&Variant, String> {
        self.variants
            .get(name)
            .ok_or_else(|| format!("variant `{name}` not found"))
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
