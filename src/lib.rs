pub mod board;
pub mod hash;
#[cfg(feature = "cli")]
pub mod logger;
pub mod moves;
pub mod utils;
pub mod variant;
