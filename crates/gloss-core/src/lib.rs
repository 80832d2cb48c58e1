//! Romaji transliteration, segmentation and gloss resolution.
//!
//! Everything in this crate is synchronous and free of I/O except the
//! [`gloss::Lookup`] seam, which the engine crate backs with a real HTTP
//! gateway.

pub mod detect;
pub mod gloss;
pub mod lexicon;
pub mod romaji;
pub mod settings;
pub(crate) mod testutil;
pub mod titles;
pub mod tokenizer;
pub mod translate;

pub use lexicon::Lexicon;
pub use settings::Settings;
pub use tokenizer::{Token, Tokenizer};
pub use titles::{KnownTitle, TitleType};
pub use translate::{TranslationResult, TranslationSource, Translator};
