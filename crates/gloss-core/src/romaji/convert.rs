use std::collections::BTreeMap;

use super::config::RomajiTable;
use super::trie::RomajiTrie;

/// Longest romaji chunk tried against the mapping table.
const MAX_CHUNK: usize = 4;

fn is_consonant(ch: char) -> bool {
    matches!(
        ch,
        'b' | 'c' | 'd' | 'f' | 'g' | 'h' | 'j' | 'k' | 'l' | 'm' | 'n' | 'p' | 'q' | 'r' | 's'
            | 't' | 'v' | 'w' | 'x' | 'y' | 'z'
    )
}

/// Two-vowel sequences emitted as a unit when no mapping covers them.
fn long_vowel_pair(first: char, second: char) -> Option<&'static str> {
    match (first, second) {
        ('o', 'u') => Some("おう"),
        ('u', 'u') => Some("うう"),
        ('i', 'i') => Some("いい"),
        ('e', 'i') => Some("えい"),
        _ => None,
    }
}

/// Character-level romaji → hiragana converter.
///
/// Used for any fragment that is not found whole in the word dictionary.
/// Never fails: input it cannot map is copied through unchanged.
pub struct SegmentConverter {
    trie: RomajiTrie,
    long_vowels: BTreeMap<char, String>,
}

impl SegmentConverter {
    pub fn new(table: &RomajiTable) -> Self {
        Self {
            trie: RomajiTrie::from_table(table),
            long_vowels: table.long_vowels.clone(),
        }
    }

    /// Convert a romaji fragment to kana, left to right.
    ///
    /// At each cursor position, in priority order:
    /// 1. longest mapping of up to four characters (greedy, not globally optimal)
    /// 2. doubled consonant other than `n` → っ, advance one
    /// 3. `n` at the end, before a non-`y` consonant, or before `'`/space → ん
    /// 4. macron vowel → its kana
    /// 5. `ou`/`uu`/`ii`/`ei` → fixed two-kana output, advance two
    /// 6. anything else is copied through
    ///
    /// Every branch advances the cursor, so the loop always terminates.
    pub fn convert(&self, fragment: &str) -> String {
        let lowered = fragment.to_lowercase();
        let mut out = String::with_capacity(lowered.len() * 3);
        let mut rest = lowered.as_str();

        while let Some(ch) = rest.chars().next() {
            if let Some((len, kana)) = self.trie.longest_match(rest, MAX_CHUNK) {
                out.push_str(kana);
                rest = &rest[len..];
                continue;
            }

            let after = &rest[ch.len_utf8()..];
            let next = after.chars().next();

            // Sokuon: "kk" → っ + reprocess "k"
            if is_consonant(ch) && ch != 'n' && next == Some(ch) {
                out.push('っ');
                rest = after;
                continue;
            }

            if ch == 'n' {
                let standalone = match next {
                    None => true,
                    Some(c) => (is_consonant(c) && c != 'y') || c == '\'' || c == ' ',
                };
                if standalone {
                    out.push('ん');
                    rest = after;
                    continue;
                }
            }

            if let Some(kana) = self.long_vowels.get(&ch) {
                out.push_str(kana);
                rest = after;
                continue;
            }

            if let Some(next) = next {
                if let Some(kana) = long_vowel_pair(ch, next) {
                    out.push_str(kana);
                    rest = &after[next.len_utf8()..];
                    continue;
                }
            }

            out.push(ch);
            rest = after;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> SegmentConverter {
        SegmentConverter::new(&RomajiTable::builtin())
    }

    fn minimal() -> SegmentConverter {
        let toml = "[mappings]\nka = \"か\"\n\n[long_vowels]\n\"ō\" = \"う\"\n";
        SegmentConverter::new(&RomajiTable::from_toml(toml).unwrap())
    }

    #[test]
    fn test_basic_kakiku() {
        assert_eq!(builtin().convert("kakiku"), "かきく");
    }

    #[test]
    fn test_empty() {
        assert_eq!(builtin().convert(""), "");
    }

    #[test]
    fn test_sokuon_gakkou() {
        assert_eq!(builtin().convert("gakkou"), "がっこう");
    }

    #[test]
    fn test_sokuon_matte() {
        assert_eq!(builtin().convert("matte"), "まって");
    }

    #[test]
    fn test_youon() {
        assert_eq!(builtin().convert("kyou"), "きょう");
        assert_eq!(builtin().convert("shashin"), "しゃしん");
    }

    #[test]
    fn test_hatsuon_from_table() {
        assert_eq!(builtin().convert("kanji"), "かんじ");
        assert_eq!(builtin().convert("hon"), "ほん");
    }

    #[test]
    fn test_apostrophe_n() {
        assert_eq!(builtin().convert("kon'ya"), "こんや");
    }

    #[test]
    fn test_greedy_nn_is_not_globally_optimal() {
        // "nn" is consumed as ん before "ni" gets a chance.
        assert_eq!(builtin().convert("konnichiwa"), "こんいちわ");
    }

    #[test]
    fn test_uppercase_is_folded() {
        assert_eq!(builtin().convert("SUSHI"), "すし");
    }

    #[test]
    fn test_pass_through() {
        assert_eq!(builtin().convert("123"), "123");
        assert_eq!(builtin().convert("abc!"), "あbc!");
    }

    #[test]
    fn test_macron_vowel() {
        assert_eq!(builtin().convert("ā"), "あ");
        assert_eq!(builtin().convert("ō"), "う");
    }

    #[test]
    fn test_standalone_n_rule() {
        let conv = minimal();
        assert_eq!(conv.convert("kan"), "かん");
        assert_eq!(conv.convert("n'"), "ん'");
        // n before a vowel is not standalone
        assert_eq!(conv.convert("na"), "na");
        // n before y is not standalone
        assert_eq!(conv.convert("ny"), "ny");
    }

    #[test]
    fn test_long_vowel_pairs() {
        let conv = minimal();
        assert_eq!(conv.convert("kou"), "kおう");
        assert_eq!(conv.convert("kei"), "kえい");
        assert_eq!(conv.convert("uuii"), "うういい");
    }

    #[test]
    fn test_sokuon_without_mapping() {
        let conv = minimal();
        assert_eq!(conv.convert("kka"), "っか");
        // n never geminates
        assert_eq!(conv.convert("nn"), "んん");
    }

    #[test]
    fn test_macron_from_custom_table() {
        assert_eq!(minimal().convert("kō"), "kう");
    }
}
