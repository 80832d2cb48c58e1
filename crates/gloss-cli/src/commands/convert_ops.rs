use gloss_core::{Lexicon, Token, Tokenizer};

use super::die;

pub fn kana_cmd(text: &str) {
    let lexicon = Lexicon::builtin();
    let tokens = Tokenizer::new(&lexicon).tokenize(text);
    println!("{}", gloss_core::tokenizer::join_kana(&tokens));
}

pub fn tokens_cmd(text: &str, json: bool) {
    let lexicon = Lexicon::builtin();
    let tokens = Tokenizer::new(&lexicon).tokenize(text);
    if json {
        println!(
            "{}",
            die!(
                serde_json::to_string_pretty(&tokens),
                "Error serializing tokens: {}"
            )
        );
    } else {
        print!("{}", format_tokens(&tokens));
    }
}

pub fn detect_cmd(text: &str) {
    let lexicon = Lexicon::builtin();
    let likely = gloss_core::detect::is_likely_romaji(&lexicon, text);
    println!("{}", if likely { "romaji" } else { "not romaji" });
}

/// One line per token: romaji, kana, kind, confidence.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, t) in tokens.iter().enumerate() {
        let kind = match (&t.particle_role, t.is_particle) {
            (Some(role), true) => format!("particle:{role}"),
            (None, true) => "particle".to_string(),
            _ => "word".to_string(),
        };
        out.push_str(&format!(
            "{:>2}  {:<14} {:<10} {:<18} {:.2}\n",
            i + 1,
            t.romaji,
            t.kana,
            kind,
            t.confidence
        ));
    }
    out
}
