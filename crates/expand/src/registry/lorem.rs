//! Lorem ipsum filler generator, registered as a pattern snippet.
//!
//! Names of the shape `lorem<lang><count>` (both parts optional,
//! case-insensitive) expand to `count` words of placeholder text in the
//! requested vocabulary: `lorem`, `loremru`, `lorem10`, `loremru20`.

use once_cell::sync::Lazy;
use regex::Regex;
use xabbr_core::{Node, Snippet};

/// Default number of generated words.
pub const DEFAULT_WORD_COUNT: usize = 30;
/// Upper bound on generated words; larger requests are clamped.
pub const MAX_WORD_COUNT: usize = 10_000;
/// Vocabulary used when none (or an unknown one) is requested.
pub const DEFAULT_LANG: &str = "latin";

/// Pattern recognizing lorem generator names.
pub static LOREM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^lorem([a-z]*)(\d*)$").expect("lorem pattern is valid"));

const SENTENCE_LENGTHS: &[usize] = &[8, 11, 6, 9, 13, 7];

const LATIN_OPENING: &[&str] = &["lorem", "ipsum", "dolor", "sit", "amet"];
const LATIN: &[&str] = &[
    "consectetur", "adipisicing", "elit", "sed", "do", "eiusmod", "tempor", "incididunt", "ut",
    "labore", "et", "dolore", "magna", "aliqua", "enim", "ad", "minim", "veniam", "quis",
    "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip", "ex", "ea", "commodo",
    "consequat", "duis", "aute", "irure", "in", "reprehenderit", "voluptate", "velit", "esse",
    "cillum", "fugiat", "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non",
    "proident", "sunt", "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id", "est",
    "laborum",
];

const RU_OPENING: &[&str] = &["далеко-далеко", "за", "словесными", "горами"];
const RU: &[&str] = &[
    "в", "стране", "гласных", "и", "согласных", "живут", "рыбные", "тексты", "вдали", "от", "всех",
    "они", "буквенных", "домах", "на", "берегу", "семантика", "большого", "языкового", "океана",
    "маленький", "ручеек", "даль", "журчит", "по", "всей", "обеспечивает", "ее", "всеми",
    "необходимыми", "правилами", "эта", "парадигматическая", "страна", "которой", "жаренные",
    "предложения", "залетают", "прямо", "рот",
];

const SP_OPENING: &[&str] = &["mujer", "uno", "dolor", "más", "de", "poder", "mismo", "si"];
const SP: &[&str] = &[
    "ejercicio", "preferencia", "perspicacia", "laboral", "paño", "suntuoso", "molde", "namibia",
    "planeador", "mirar", "demás", "oficinista", "excepción", "odio", "consecuencia", "casi",
    "auto", "chicharra", "velo", "elixir", "ataque", "no", "odio", "temporal", "cuórum",
    "dignísimo", "facilismo", "letra", "nihilista", "expedición", "alma", "alveolar", "aparte",
    "león", "animal", "como", "paria", "belleza", "modo", "natividad",
];

/// Parameters parsed from a lorem snippet name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoremOptions {
    /// Vocabulary name (`latin`, `ru`, `sp`).
    pub lang: String,
    /// Number of words to emit.
    pub word_count: usize,
}

impl Default for LoremOptions {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
            word_count: DEFAULT_WORD_COUNT,
        }
    }
}

/// Parses language and word count out of a lorem snippet name.
///
/// Returns `None` when `name` is not a lorem name.
pub fn lorem_options(name: &str) -> Option<LoremOptions> {
    let captures = LOREM_PATTERN.captures(name)?;
    let mut options = LoremOptions::default();

    if let Some(lang) = captures.get(1).filter(|m| !m.as_str().is_empty()) {
        options.lang = lang.as_str().to_ascii_lowercase();
    }
    if let Some(count) = captures.get(2).filter(|m| !m.as_str().is_empty()) {
        // Digits only, so a parse failure means overflow.
        let requested = count.as_str().parse().unwrap_or(usize::MAX);
        if requested > MAX_WORD_COUNT {
            log::debug!(
                "Clamping lorem word count {} to {MAX_WORD_COUNT}",
                count.as_str()
            );
        }
        options.word_count = requested.min(MAX_WORD_COUNT);
    }

    Some(options)
}

/// The snippet installed under [`LOREM_PATTERN`].
pub fn lorem_snippet() -> Snippet {
    Snippet::generator(lorem_generator)
}

fn lorem_generator(node: &Node) -> String {
    let options = node
        .name()
        .and_then(lorem_options)
        .unwrap_or_default();
    lorem(&options)
}

/// Generates `word_count` words of placeholder text.
///
/// Output is deterministic: the same options always give the same text.
pub fn lorem(options: &LoremOptions) -> String {
    let (opening, vocabulary) = vocabulary(&options.lang);
    let words = opening
        .iter()
        .chain(vocabulary.iter().cycle())
        .copied()
        .take(options.word_count);

    let mut sentences: Vec<String> = Vec::new();
    let mut sentence: Vec<&str> = Vec::new();
    let mut lengths = SENTENCE_LENGTHS.iter().cycle();
    let mut target = lengths.next().copied().unwrap_or(options.word_count);

    for word in words {
        sentence.push(word);
        if sentence.len() == target {
            sentences.push(finish_sentence(&sentence));
            sentence.clear();
            target = lengths.next().copied().unwrap_or(options.word_count);
        }
    }
    if !sentence.is_empty() {
        sentences.push(finish_sentence(&sentence));
    }

    sentences.join(" ")
}

fn vocabulary(lang: &str) -> (&'static [&'static str], &'static [&'static str]) {
    match lang {
        "ru" => (RU_OPENING, RU),
        "sp" => (SP_OPENING, SP),
        "latin" => (LATIN_OPENING, LATIN),
        other => {
            log::debug!("Unknown lorem vocabulary '{other}', using {DEFAULT_LANG}");
            (LATIN_OPENING, LATIN)
        }
    }
}

fn finish_sentence(words: &[&str]) -> String {
    let mut text = words.join(" ");
    if let Some(first) = text.chars().next() {
        let upper: String = first.to_uppercase().collect();
        text.replace_range(..first.len_utf8(), &upper);
    }
    text.push('.');
    text
}
