#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod assignment;
pub mod consistency;
pub mod domain;
pub mod render;
pub mod search;
pub mod slot;
pub mod structure;
pub mod word_bank;
pub mod xword;

pub use assignment::Assignment;
pub use search::{Inference, SolveConfig, SolveStats};
pub use structure::XWordStructure;
pub use xword::XWord;
