// tests/variant_ini_tests.rs
use flockgen::variant::ini::{load_variants, parse_variants_ini};

const SAMPLE: &str = r"
; comment line
# another comment
[Flock-Chess]
Pieces  = KQRBNPD
Moveset = [16, 1+2+3, 1, 2, 3, 17, 19]
Effects = Flock, Quantum
Board   = 8x8
StdPos  = rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR
Move_num  = 2
Board_num = 1

[Classic-Chess]
Pieces  = KQRBNP
Moveset = [16, 1+2, 1, 2, 3, 17]
";

#[test]
fn parses_sections_and_fields() {
    let registry = parse_variants_ini(SAMPLE);
    assert_eq!(registry.len(), 2);

    let flock = registry.get("Flock-Chess").expect("section exists");
    assert_eq!(flock.game_mode, "Flock-Chess");
    assert_eq!(flock.pieces, vec!['K', 'Q', 'R', 'B', 'N', 'P', 'D']);
    assert_eq!(flock.movesets[&'K'], "16");
    assert_eq!(flock.movesets[&'Q'], "1+2+3");
    assert_eq!(flock.movesets[&'D'], "19");
    assert_eq!(flock.effects, "Flock, Quantum");
    assert_eq!(flock.board, "8x8");
    assert_eq!(flock.move_num, 2);
    assert_eq!(flock.board_num, 1);
}

#[test]
fn moveset_before_pieces_still_binds() {
    let registry = parse_variants_ini(
        "[Reversed]\nMoveset = [1, 2]\nPieces = RB\n",
    );
    let v = registry.get("Reversed").expect("section exists");
    assert_eq!(v.movesets[&'R'], "1");
    assert_eq!(v.movesets[&'B'], "2");
}

#[test]
fn length_mismatch_leaves_movesets_empty() {
    let registry = parse_variants_ini(
        "[Broken]\nPieces = KQR\nMoveset = [16, 1]\n",
    );
    let v = registry.get("Broken").expect("section exists");
    assert_eq!(v.pieces, vec!['K', 'Q', 'R']);
    assert!(v.movesets.is_empty(), "mismatch must not half-populate");
}

#[test]
fn pieces_strip_whitespace_and_plus() {
    let registry = parse_variants_ini("[Spaced]\nPieces = K Q +D\n");
    let v = registry.get("Spaced").expect("section exists");
    assert_eq!(v.pieces, vec!['K', 'Q', 'D']);
}

#[test]
fn unknown_keys_are_ignored() {
    let registry = parse_variants_ini(
        "[Odd]\nPieces = K\nMoveset = [16]\nColour = mauve\n",
    );
    let v = registry.get("Odd").expect("section exists");
    assert_eq!(v.movesets[&'K'], "16");
}

#[test]
fn defaults_apply_when_fields_are_absent() {
    let registry = parse_variants_ini("[Bare]\nPieces = K\n");
    let v = registry.get("Bare").expect("section exists");
    assert_eq!(v.move_num, 1);
    assert_eq!(v.board_num, 1);
    assert!(v.effects.is_empty());
}

#[test]
fn unbracketed_moveset_is_dropped() {
    let registry = parse_variants_ini("[NoBrackets]\nPieces = K\nMoveset = 16\n");
    let v = registry.get("NoBrackets").expect("section exists");
    assert!(v.movesets.is_empty());
}

#[test]
fn unknown_variant_error_names_it() {
    let registry = parse_variants_ini(SAMPLE);
    let err = registry.get("foo").unwrap_err();
    assert!(err.contains("foo"), "error should name the variant: {err}");
}

#[test]
fn shipped_variants_file_parses() {
    let registry = load_variants("variants.ini").expect("variants.ini at crate root");
    let flock = registry.get("Flock-Chess").expect("Flock-Chess defined");
    assert_eq!(flock.pieces.len(), flock.movesets.len());
}

#[test]
fn missing_file_is_an_error() {
    let err = load_variants("no-such-file.ini").unwrap_err();
    assert!(err.contains("no-such-file.ini"));
}
