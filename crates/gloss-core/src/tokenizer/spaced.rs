use super::{Token, CONF_CONVERTED, CONF_DICTIONARY, CONF_SPACED_PARTICLE};
use crate::lexicon::Lexicon;

/// Classify each whitespace-delimited segment without re-splitting it.
///
/// The first segment is never a particle; it falls through to the word
/// dictionary or the converter even when it spells one.
pub(super) fn tokenize_spaced(lexicon: &Lexicon, text: &str) -> Vec<Token> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, segment)| match lexicon.particle(segment) {
            Some(p) if i > 0 => Token::particle(segment, &p.hiragana, &p.role, CONF_SPACED_PARTICLE),
            _ => match lexicon.word(segment) {
                Some(kana) => Token::word(segment, kana, CONF_DICTIONARY),
                None => Token::word(
                    segment,
                    &lexicon.converter().convert(segment),
                    CONF_CONVERTED,
                ),
            },
        })
        .collect()
}
