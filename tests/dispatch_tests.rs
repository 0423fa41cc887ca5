// tests/dispatch_tests.rs
use std::sync::OnceLock;

use flockgen::board::Board;
use flockgen::moves::dispatch::{CompiledMovesets, generate_moves, generate_moves_compiled};
use flockgen::moves::magic::MagicTables;
use flockgen::moves::magic::precompute::{MagicTableSeed, SlidingKind, generate_sliding_table};
use flockgen::variant::Variant;
use flockgen::variant::ini::parse_variants_ini;

/// One constant seed for repeatable results
const TEST_SEED: u64 = 0x45;

/// Build the three magic tables once for the whole test binary.
fn tables() -> &'static MagicTables {
    static TABLES: OnceLock<MagicTables> = OnceLock::new();
    TABLES.get_or_init(|| MagicTables {
        rook: generate_sliding_table(SlidingKind::Rook, MagicTableSeed::Fixed(TEST_SEED))
            .expect("rook magics"),
        bishop: generate_sliding_table(SlidingKind::Bishop, MagicTableSeed::Fixed(TEST_SEED))
            .expect("bishop magics"),
        duck: generate_sliding_table(SlidingKind::Duck, MagicTableSeed::Fixed(TEST_SEED))
            .expect("duck magics"),
    })
}

fn flock_variant() -> Variant {
    let registry = parse_variants_ini(
        "[Flock-Chess]\nPieces = KQRBNPD\nMoveset = [16, 1+2+3, 1, 2, 3, 17, 19]\n",
    );
    registry.get("Flock-Chess").expect("variant").clone()
}

fn bit(sq: usize) -> u64 {
    1u64 << sq
}

#[test]
fn empty_board_generates_nothing() {
    let board = Board::from_fen("8/8/8/8/8/8/8/8");
    let moves = generate_moves(&board, &flock_variant(), tables());
    assert!(moves.iter().all(|&m| m == 0));
}

#[test]
fn startpos_knight_and_rook() {
    let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    let moves = generate_moves(&board, &flock_variant(), tables());

    // knight on b1: a3 and c3 only (d2 holds an own pawn)
    assert_eq!(moves[1], bit(16) | bit(18));
    // rook on a1: every ray blocked by own pieces
    assert_eq!(moves[0], 0);
}

#[test]
fn lone_knight_on_a1() {
    let board = Board::from_fen("8/8/8/8/8/8/8/N7");
    let moves = generate_moves(&board, &flock_variant(), tables());
    assert_eq!(moves[0], bit(17) | bit(10)); // b3, c2
}

#[test]
fn bishop_on_open_d4_sees_both_diagonals() {
    let board = Board::from_fen("4k3/8/8/8/3B4/8/8/4K3");
    let moves = generate_moves(&board, &flock_variant(), tables());

    let expected = [0usize, 9, 18, 36, 45, 54, 63, 48, 41, 34, 20, 13, 6]
        .iter()
        .fold(0u64, |acc, &sq| acc | bit(sq));
    assert_eq!(moves[27], expected);
}

#[test]
fn neutral_duck_generates_moves_for_no_side() {
    let board = Board::from_fen("8/8/8/3+D4/8/8/8/8");
    let moves = generate_moves(&board, &flock_variant(), tables());
    assert_ne!(moves[35], 0, "neutral duck on d5 must still move");
}

#[test]
fn neutral_piece_lands_only_on_empty_squares() {
    // neutral duck d5, white pawn e6 adjacent on its NE diagonal
    let board = Board::from_fen("8/8/4P3/3+D4/8/8/8/8");
    let moves = generate_moves(&board, &flock_variant(), tables());
    assert_eq!(
        moves[35] & board.occupancy,
        0,
        "neutral moves may not land on any occupied square"
    );
    // the jump over e6 lands on f7
    assert_ne!(moves[35] & bit(53), 0);
}

#[test]
fn no_side_captures_its_own_pieces() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        "r3k2r/8/8/3q4/3B4/8/8/R3K2R",
        "rnbqkbnr/pppppppp/8/8/8/+D7/PPPPPPPP/RNBQKBNR",
    ] {
        let board = Board::from_fen(fen);
        let moves = generate_moves(&board, &flock_variant(), tables());
        let neutral = board.neutral_squares();

        let mut whites = board.occ_white & !neutral;
        while whites != 0 {
            let sq = whites.trailing_zeros() as usize;
            whites &= whites - 1;
            assert_eq!(moves[sq] & board.occ_white, 0, "white self-capture from {sq} ({fen})");
        }
        let mut blacks = board.occ_black & !neutral;
        while blacks != 0 {
            let sq = blacks.trailing_zeros() as usize;
            blacks &= blacks - 1;
            assert_eq!(moves[sq] & board.occ_black, 0, "black self-capture from {sq} ({fen})");
        }
    }
}

#[test]
fn sliders_do_not_see_through_enemy_pieces() {
    // white rook a1, black pawn a4: the file stops at a4 (capture), a5+ unreachable
    let board = Board::from_fen("8/8/8/8/p7/8/8/R7");
    let moves = generate_moves(&board, &flock_variant(), tables());

    assert_ne!(moves[0] & bit(24), 0, "capture of the blocker is a move");
    assert_eq!(moves[0] & (bit(32) | bit(40) | bit(48) | bit(56)), 0);
}

#[test]
fn black_pawn_attacks_down_the_board() {
    // black pawn e5 with white targets d4 and f4
    let board = Board::from_fen("8/8/8/4p3/3P1P2/8/8/8");
    let moves = generate_moves(&board, &flock_variant(), tables());
    assert_eq!(moves[36], bit(27) | bit(29));
}

#[test]
fn letter_without_moveset_generates_empty_set() {
    // Z is not in the Flock alphabet
    let board = Board::from_fen("8/8/8/3Z4/8/8/8/8");
    let moves = generate_moves(&board, &flock_variant(), tables());
    assert_eq!(moves[35], 0);
}

#[test]
fn compiled_movesets_are_reusable_across_positions() {
    let variant = flock_variant();
    let compiled = CompiledMovesets::from_variant(&variant);

    let a = Board::from_fen("8/8/8/8/8/8/8/N7");
    let b = Board::from_fen("4k3/8/8/8/3B4/8/8/4K3");
    assert_eq!(
        generate_moves_compiled(&a, &compiled, tables()),
        generate_moves(&a, &variant, tables())
    );
    assert_eq!(
        generate_moves_compiled(&b, &compiled, tables()),
        generate_moves(&b, &variant, tables())
    );
}

#[test]
fn duck_jump_appears_in_dispatch_output() {
    // white duck d4, black pawn e5, empty f6: jump lands on f6
    let board = Board::from_fen("8/8/8/4p3/3D4/8/8/8");
    let moves = generate_moves(&board, &flock_variant(), tables());
    assert_ne!(moves[27] & bit(45), 0, "duck jump to f6 missing");
    assert_eq!(moves[27] & bit(36), 0, "e5 is not reachable when adjacent is occupied");
}
