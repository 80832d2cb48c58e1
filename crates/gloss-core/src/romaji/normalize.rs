fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o')
}

fn expand_long_vowel(ch: char) -> Option<&'static str> {
    match ch {
        'ā' | 'â' => Some("aa"),
        'ī' | 'î' => Some("ii"),
        'ū' | 'û' => Some("uu"),
        'ē' | 'ê' => Some("ee"),
        'ō' | 'ô' => Some("ou"),
        _ => None,
    }
}

/// Normalize romaji for tokenization.
///
/// Lowercases and trims, spells macron/circumflex vowels as doubled vowels,
/// and folds common romanization variants: `tch` → `cch`, `m` before
/// `b`/`p` → `n`, and `ou` directly before another vowel → `o`.
pub fn normalize_romaji(text: &str) -> String {
    let mut expanded = String::with_capacity(text.len());
    for ch in text.trim().to_lowercase().chars() {
        match expand_long_vowel(ch) {
            Some(s) => expanded.push_str(s),
            None => expanded.push(ch),
        }
    }

    let chars: Vec<char> = expanded.replace("tch", "cch").chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();
        if ch == 'm' && matches!(next, Some('b' | 'p')) {
            out.push('n');
        } else if ch == 'o' && next == Some('u') && chars.get(i + 2).is_some_and(|&c| is_vowel(c)) {
            out.push('o');
            i += 2;
            continue;
        } else {
            out.push(ch);
        }
        i += 1;
    }
    out
}
