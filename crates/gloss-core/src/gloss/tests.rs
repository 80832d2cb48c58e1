use std::sync::{Arc, Mutex};

use super::*;
use crate::settings::Settings;
use crate::testutil::{entry, MockLookup};
use crate::tokenizer::Tokenizer;

struct Fixture {
    resolver: GlossResolver,
    lookup: Arc<MockLookup>,
    cache: Arc<Mutex<TranslationCache>>,
    lexicon: Arc<Lexicon>,
}

fn fixture(lookup: MockLookup) -> Fixture {
    let lexicon = Arc::new(Lexicon::builtin());
    let lookup = Arc::new(lookup);
    let cache = Arc::new(Mutex::new(TranslationCache::new(8)));
    let resolver = GlossResolver::new(
        lexicon.clone(),
        lookup.clone(),
        cache.clone(),
        Settings::builtin().gloss,
    );
    Fixture {
        resolver,
        lookup,
        cache,
        lexicon,
    }
}

impl Fixture {
    fn tokens(&self, romaji: &str) -> Vec<Token> {
        Tokenizer::new(&self.lexicon).tokenize(romaji)
    }
}

#[test]
fn offline_phrase_wins_without_lookup() {
    let f = fixture(MockLookup::new());
    let tokens = f.tokens("konnichiwa");
    let gloss = f.resolver.resolve("こんにちは", &tokens).unwrap();
    assert_eq!(gloss.english, "hello; good afternoon");
    assert_eq!(gloss.source, TranslationSource::Offline);
    assert_eq!(gloss.confidence, 0.85);
    assert!(gloss.alternatives.is_empty());
    assert!(f.lookup.calls().is_empty());
}

#[test]
fn remote_whole_phrase() {
    let mut cat = entry("猫", &[&["cat"], &["shamisen"]], true);
    cat.jlpt = vec!["jlpt-n5".to_string()];
    let f = fixture(MockLookup::new().with(
        "ねこ",
        LookupResponse::ok(vec![cat, entry("寝子", &[&["sleeping child"]], false)]),
    ));
    let gloss = f.resolver.resolve("ねこ", &f.tokens("neko")).unwrap();
    assert_eq!(gloss.english, "cat; shamisen");
    assert_eq!(gloss.source, TranslationSource::Remote);
    assert_eq!(gloss.confidence, 0.9);
    assert_eq!(gloss.alternatives, vec!["sleeping child"]);
    assert_eq!(gloss.parts_of_speech, vec!["Noun"]);
    assert_eq!(gloss.jlpt, vec!["jlpt-n5"]);
}

#[test]
fn remote_uncommon_confidence() {
    let f = fixture(MockLookup::new().with(
        "ねこ",
        LookupResponse::ok(vec![entry("猫", &[&["cat"]], false)]),
    ));
    let gloss = f.resolver.resolve("ねこ", &f.tokens("neko")).unwrap();
    assert_eq!(gloss.confidence, 0.75);
}

#[test]
fn remote_results_are_cached() {
    let f = fixture(MockLookup::new().with(
        "ねこ",
        LookupResponse::ok(vec![entry("猫", &[&["cat"]], true)]),
    ));
    let tokens = f.tokens("neko");
    f.resolver.resolve("ねこ", &tokens).unwrap();
    f.resolver.resolve("ねこ", &tokens).unwrap();
    assert_eq!(f.lookup.calls(), vec!["ねこ"]);
    assert!(f.cache.lock().unwrap().get("ねこ").is_some());
}

#[test]
fn failures_are_not_cached() {
    let f = fixture(MockLookup::new());
    let tokens = f.tokens("xyz");
    f.resolver.resolve("xyz", &tokens).unwrap();
    f.resolver.resolve("xyz", &tokens).unwrap();
    assert_eq!(f.lookup.calls().len(), 2);
    assert!(f.cache.lock().unwrap().is_empty());
}

#[test]
fn word_by_word_fallback() {
    // the whole phrase fails remotely; each word is then looked up alone
    let f = fixture(MockLookup::new().with(
        "ねこ",
        LookupResponse::ok(vec![entry("猫", &[&["cat", "feline"]], true)]),
    ));
    let tokens = vec![
        Token::word("neko", "ねこ", 0.9),
        Token::particle("o", "を", "object", 0.95),
        Token::word("zzz", "zzz", 0.7),
    ];
    let gloss = f.resolver.resolve("ねこをzzz", &tokens).unwrap();
    assert_eq!(gloss.english, "cat [object] [zzz?]");
    assert_eq!(gloss.source, TranslationSource::RemoteWordByWord);
    assert_eq!(gloss.confidence, 0.5);
    assert_eq!(f.lookup.calls(), vec!["ねこをzzz", "ねこ", "zzz"]);
}

#[test]
fn word_by_word_uses_first_offline_meaning() {
    let f = fixture(MockLookup::new());
    let tokens = vec![
        Token::word("konnichiwa", "こんにちは", 0.9),
        Token::word("neko", "ねこ", 0.9),
    ];
    let gloss = f.resolver.resolve("こんにちはねこ", &tokens).unwrap();
    assert_eq!(gloss.english, "hello [neko?]");
}

#[test]
fn word_by_word_particle_without_role() {
    let f = fixture(MockLookup::new());
    let mut particle = Token::particle("wa", "は", "topic", 0.95);
    particle.particle_role = None;
    let tokens = vec![Token::word("qq", "qq", 0.5), particle];
    let gloss = f.resolver.resolve("qqは", &tokens).unwrap();
    assert_eq!(gloss.english, "[qq?] [particle]");
}

#[test]
fn empty_remote_result_falls_through() {
    let f = fixture(MockLookup::new().with("ぬ", LookupResponse::ok(Vec::new())));
    let tokens = vec![Token::word("nu", "ぬ", 0.5)];
    let gloss = f.resolver.resolve("ぬ", &tokens).unwrap();
    assert_eq!(gloss.source, TranslationSource::None);
    assert_eq!(gloss.english, "Unable to translate: ぬ");
    assert_eq!(gloss.confidence, 0.0);
    // empty successes are still cached
    assert!(f.cache.lock().unwrap().get("ぬ").is_some());
}

#[test]
fn single_token_without_translation_is_sentinel() {
    let f = fixture(MockLookup::new());
    let tokens = vec![Token::word("xyz", "xyz", 0.5)];
    let gloss = f.resolver.resolve("xyz", &tokens).unwrap();
    assert_eq!(gloss.english, "Unable to translate: xyz");
    assert_eq!(gloss.source, TranslationSource::None);
}

#[test]
fn poisoned_cache_is_an_error() {
    let f = fixture(MockLookup::new());
    let cache = f.cache.clone();
    let _ = std::thread::spawn(move || {
        let _guard = cache.lock().unwrap();
        panic!("poison the cache");
    })
    .join();
    let err = f.resolver.resolve("ねこ", &f.tokens("neko")).unwrap_err();
    assert!(matches!(err, GlossError::CachePoisoned));
}

#[test]
fn source_serializes_kebab_case() {
    let json = serde_json::to_string(&TranslationSource::RemoteWordByWord).unwrap();
    assert_eq!(json, "\"remote-word-by-word\"");
    assert_eq!(TranslationSource::KnownTitle.to_string(), "known-title");
}
