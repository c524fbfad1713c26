#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod arc_consistency;
pub mod assignment;
pub mod domains;
pub mod heuristics;
pub mod puzzle;
pub mod render;
pub mod search;
pub mod slot;
pub mod stats;
pub mod word_bank;
