//! Dictionary segmentation of unspaced romaji.
//!
//! Forward DP over character positions: `best[i]` is the highest-scoring
//! tokenization of `text[..i]`, stored as a backpointer to its start
//! position plus the last token. Dictionary matches score
//! `len × WORD_WEIGHT` (particles after the first position a flat
//! `PARTICLE_BONUS`); unknown spans score `len × UNKNOWN_WEIGHT`. A
//! candidate only replaces a cell with a strictly higher score, so the
//! first solution wins ties.
//!
//! Each cell keeps only its best incoming edge, which makes the result
//! locally rather than globally optimal for some inputs.

use tracing::{debug, debug_span};

use super::{Token, CONF_DICTIONARY, CONF_UNKNOWN, CONF_WHOLE_INPUT};
use crate::lexicon::Lexicon;

const WORD_WEIGHT: f64 = 1.5;
const PARTICLE_BONUS: f64 = 2.0;
const UNKNOWN_WEIGHT: f64 = 0.5;
/// Margin below which an existing next-position score triggers the
/// unknown-span fallback anyway.
const FALLBACK_MARGIN: f64 = 0.5;

struct Cell {
    score: f64,
    /// (start position, token spanning start..this position)
    back: Option<(usize, Token)>,
}

fn improves(cell: &Option<Cell>, score: f64) -> bool {
    cell.as_ref().map_or(true, |c| c.score < score)
}

pub(super) fn segment_unspaced(lexicon: &Lexicon, text: &str) -> Vec<Token> {
    let char_count = text.chars().count();
    if char_count == 0 {
        return Vec::new();
    }
    let _span = debug_span!("segment_unspaced", char_count).entered();

    // byte_offsets[i] = byte position of char i; one extra slot for the end
    let mut byte_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    byte_offsets.push(text.len());

    let mut best: Vec<Option<Cell>> = (0..=char_count).map(|_| None).collect();
    best[0] = Some(Cell {
        score: 0.0,
        back: None,
    });

    for start in 0..char_count {
        let Some(base) = best[start].as_ref().map(|c| c.score) else {
            continue;
        };
        let suffix = &text[byte_offsets[start]..];

        let mut found_match = false;
        for entry in lexicon.entries_at(suffix) {
            found_match = true;
            // Lexicon keys are ASCII, so byte length == char length.
            let end = start + entry.len();
            let (score, token) = match (&entry.particle_role, start > 0) {
                (Some(role), true) => (
                    base + PARTICLE_BONUS,
                    Token::particle(&entry.romaji, &entry.kana, role, CONF_DICTIONARY),
                ),
                _ => (
                    base + entry.len() as f64 * WORD_WEIGHT,
                    Token::word(&entry.romaji, &entry.kana, CONF_DICTIONARY),
                ),
            };
            if improves(&best[end], score) {
                best[end] = Some(Cell {
                    score,
                    back: Some((start, token)),
                });
            }
        }

        let next_is_weak = best[start + 1]
            .as_ref()
            .map_or(true, |c| c.score < base - FALLBACK_MARGIN);
        if !found_match || next_is_weak {
            let mut end = start + 1;
            while end < char_count && !lexicon.starts_entry(&text[byte_offsets[end]..]) {
                end += 1;
            }
            let span = &text[byte_offsets[start]..byte_offsets[end]];
            let score = base + (end - start) as f64 * UNKNOWN_WEIGHT;
            if improves(&best[end], score) {
                let kana = lexicon.converter().convert(span);
                best[end] = Some(Cell {
                    score,
                    back: Some((start, Token::word(span, &kana, CONF_UNKNOWN))),
                });
            }
        }
    }

    if best[char_count].is_none() {
        debug!("no segmentation reached the end; converting whole input");
        let kana = lexicon.converter().convert(text);
        return vec![Token::word(text, &kana, CONF_WHOLE_INPUT)];
    }

    let mut tokens = Vec::new();
    let mut pos = char_count;
    while let Some(Cell {
        back: Some((start, token)),
        ..
    }) = best[pos].take()
    {
        tokens.push(token);
        pos = start;
    }
    tokens.reverse();
    debug!(tokens = tokens.len(), "segmented");
    tokens
}
