//! Bitboard-based chess position representation and pseudo-legal move
//! generation.
//!
//! The crate is organized bottom-up:
//!
//! - [`chess::core`] provides squares, colors and pieces.
//! - [`chess::bitboard`] stores the occupancy of each (color, piece kind) pair.
//! - [`chess::position`] is the immutable board state with piece placement,
//!   lookup and move application.
//! - [`chess::movegen`] enumerates pseudo-legal pawn moves.
//! - [`chess::render`] dumps the board for humans.
//! - [`engine`] runs the text command loop of the `pawnstorm` binary.

// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]

pub mod chess;
pub mod engine;

use shadow_rs::shadow;

shadow!(build);

/// Target features the binary was built with. Produced by `build.rs`.
const FEATURES: &str = include_str!(concat!(env!("OUT_DIR"), "/features"));

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
#[must_use]
pub fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the version on startup.
pub fn print_engine_info() {
    println!("pawnstorm {}", version());
}

/// Prints information the build type, features and whether the build is clean
/// on startup.
pub fn print_binary_info() {
    println!("Release build: {}", !shadow_rs::is_debug());
    println!("Features: {FEATURES}");
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
