use std::fs;
use std::path::Path;
use std::sync::Arc;

use gloss_core::gloss::{Lookup, OfflineLookup};
use gloss_core::settings::parse_settings_toml;
use gloss_core::{Lexicon, Settings, TranslationResult};
use gloss_engine::{init_tracing, GlossEngine, JishoGateway};

use super::die;

pub fn translate_cmd(
    text: &str,
    offline: bool,
    json: bool,
    settings_file: Option<&str>,
    trace_dir: Option<&str>,
) {
    if let Some(dir) = trace_dir {
        die!(fs::create_dir_all(dir), "Error creating trace directory: {}");
        init_tracing(Path::new(dir));
    }

    let settings = match settings_file {
        Some(path) => {
            let content = die!(fs::read_to_string(path), "Error reading settings: {}");
            die!(parse_settings_toml(&content), "Error parsing settings: {}")
        }
        None => Settings::builtin(),
    };

    let lookup: Arc<dyn Lookup> = if offline {
        Arc::new(OfflineLookup)
    } else {
        Arc::new(JishoGateway::new(&settings.gateway))
    };
    let engine = GlossEngine::with_lookup(Arc::new(Lexicon::builtin()), lookup, &settings);
    let result = engine.translate(text);

    if json {
        println!(
            "{}",
            die!(
                serde_json::to_string_pretty(&result),
                "Error serializing result: {}"
            )
        );
    } else {
        print!("{}", format_result(&result));
    }
}

pub fn format_result(r: &TranslationResult) -> String {
    let mut out = format!(
        "romaji:     {}\nkana:       {}\nenglish:    {}\nsource:     {}\nconfidence: {:.2}\n",
        r.romaji, r.kana, r.english, r.source, r.confidence
    );
    if let Some(t) = r.title_type {
        out.push_str(&format!("title:      {t:?}\n"));
    }
    if !r.alternatives.is_empty() {
        out.push_str(&format!("also:       {}\n", r.alternatives.join(" / ")));
    }
    if !r.parts_of_speech.is_empty() {
        out.push_str(&format!("pos:        {}\n", r.parts_of_speech.join(", ")));
    }
    if !r.jlpt.is_empty() {
        out.push_str(&format!("jlpt:       {}\n", r.jlpt.join(", ")));
    }
    if let Some(note) = &r.note {
        out.push_str(&format!("note:       {note}\n"));
    }
    out
}
