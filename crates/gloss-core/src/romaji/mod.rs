//! Romaji-to-hiragana conversion.
//!
//! A byte trie over the mapping table feeds a left-to-right state machine
//! that handles sokuon (っ), hatsuon (ん), long vowels and pass-through of
//! anything it cannot map.

mod config;
mod convert;
mod normalize;
mod table;
mod trie;

pub use config::{parse_romaji_toml, RomajiConfigError, RomajiTable};
pub use convert::SegmentConverter;
pub use normalize::normalize_romaji;
pub use table::default_toml;
pub use trie::RomajiTrie;
