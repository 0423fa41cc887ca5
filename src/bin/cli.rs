use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use indicatif::ProgressBar;

use flockgen::board::Board;
use flockgen::logger::init_logging;
use flockgen::moves::dispatch::{CompiledMovesets, generate_moves_compiled};
use flockgen::moves::magic::loader::load_magic_tables;
use flockgen::utils::pop_lsb;
use flockgen::variant::ini::load_variants;

const DEFAULT_VARIANTS_PATH: &str = "./variants.ini";

fn main() -> ExitCode {
    init_logging("flockgen=warn");

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: flockgen <fen> <variant-name> [variants-ini-path]");
        return ExitCode::FAILURE;
    }
    let fen = &args[1];
    let game_mode = &args[2];
    let ini_path = args
        .get(3)
        .map(String::as_str)
        .unwrap_or(DEFAULT_VARIANTS_PATH);

    let registry = match load_variants(ini_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let variant = match registry.get(game_mode) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // First run discovers the magic multipliers, which takes a moment;
    // later runs load the cached tables.
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("loading magic tables");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let tables = match load_magic_tables(Path::new(".")) {
        Ok(t) => t,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    spinner.finish_and_clear();

    let board = Board::from_fen(fen);
    let compiled = CompiledMovesets::from_variant(variant);
    let moves = generate_moves_compiled(&board, &compiled, &tables);

    let move_lists: Vec<Vec<u8>> = moves
        .iter()
        .map(|&bb| {
            let mut squares = Vec::with_capacity(bb.count_ones() as usize);
            let mut bits = bb;
            while bits != 0 {
                squares.push(pop_lsb(&mut bits));
            }
            squares
        })
        .collect();

    match serde_json::to_string(&move_lists) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: cannot serialise move sets: {e}");
            ExitCode::FAILURE
        }
    }
}
