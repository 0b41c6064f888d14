use std::sync::LazyLock;

use regex::Regex;

use crate::config::ParserConfig;

static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:i|we)\s+)?(?:(?:was|were|is|are|am|been|being)\s+(?:responsible\s+for|in\s+charge\s+of|tasked\s+with|involved\s+in)|(?:helped|assisted)(?:\s+(?:with|in|on))?|worked\s+on|involved\s+in|responsible\s+for|duties\s+included)(?:\s+|$)",
    )
    .unwrap()
});

/// Verb stems matched at the start of any word ("manag" covers managed,
/// managing, manages).
const ACTION_VERB_STEMS: &[&str] = &[
    "manag",
    "develop",
    "creat",
    "implement",
    "analy",
    "lead",
    "design",
    "build",
    "execut",
    "deliver",
    "achiev",
    "establish",
    "improv",
    "optimi",
    "coordinat",
    "launch",
    "negotiat",
    "structur",
    "originat",
    "oversee",
    "reduc",
    "increas",
    "generat",
    "prepar",
    "conduct",
    "advis",
    "review",
    "monitor",
    "model",
    "automat",
    "streamlin",
    "underwr",
    "support",
    "present",
    "track",
    "research",
    "valu",
    "assess",
    "draft",
    "spearhead",
];

/// Irregular past forms, matched as whole words.
const IRREGULAR_VERBS: &[&str] = &[
    "led", "built", "oversaw", "ran", "grew", "won", "drove", "wrote", "made", "took", "sold",
    "taught", "began", "brought", "held", "rebuilt",
];

/// Words ending in a period that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "approx.", "incl.", "Dr.", "Mr.", "Mrs.", "Ms.", "Prof.",
    "Inc.", "Ltd.", "Co.", "Corp.", "No.", "St.", "Jr.", "Sr.",
];

/// Clean every item and keep at most `max_items` of them.
pub fn rewrite_items<I, S>(items: I, config: &ParserConfig, prefix_verbs: bool) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .filter_map(|item| {
            let out = rewrite(item.as_ref(), config, prefix_verbs);
            (!out.is_empty()).then_some(out)
        })
        .take(config.max_items)
        .collect()
}

/// Turn one responsibility/detail string into a short active-voice statement.
pub fn rewrite(item: &str, config: &ParserConfig, prefix_verbs: bool) -> String {
    let trimmed = item.trim();
    let stripped = BOILERPLATE_RE.replace(trimmed, "");
    let text = stripped.trim();
    if text.is_empty() {
        return String::new();
    }

    let mut out = capitalize_first(text);
    if prefix_verbs && !has_action_verb(&out) {
        out = prefix_verb(&out, &config.default_verb);
    }
    cap_length(&out, config.max_item_len)
}

pub fn has_action_verb(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .any(|w| {
            IRREGULAR_VERBS.contains(&w.as_str())
                || ACTION_VERB_STEMS.iter().any(|stem| w.starts_with(stem))
        })
}

fn prefix_verb(text: &str, default_verb: &str) -> String {
    if let Some(rest) = text.strip_prefix("The ") {
        return format!("Managed the {rest}");
    }
    format!("{} {}", default_verb.trim(), lower_first(text))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first letter unless the first word is an acronym ("SQL").
fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.next().is_some_and(|c| c.is_uppercase() || c.is_ascii_digit()) {
        return text.to_string();
    }
    first.to_lowercase().chain(text.chars().skip(1)).collect()
}

/// Cut at the last sentence end within `max` chars, else hard-cut with "...".
pub fn cap_length(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let window: String = text.chars().take(max).collect();
    if let Some(end) = last_sentence_end(&window) {
        return window[..end].trim_end().to_string();
    }

    let keep = max.saturating_sub(3);
    let cut: String = text.chars().take(keep).collect();
    format!("{}...", cut.trim_end())
}

fn last_sentence_end(window: &str) -> Option<usize> {
    let boundaries = sentence_boundaries(window);
    let full_stop = window
        .trim_end()
        .ends_with(['.', '!', '?'])
        .then(|| window.trim_end().len());
    full_stop
        .or_else(|| boundaries.last().copied())
        .filter(|&end| end > 0)
}

/// Byte offsets just past each sentence-ending punctuation mark that is
/// followed by whitespace and a capital letter or digit.
fn sentence_boundaries(text: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let chars: Vec<(usize, char)> = text.char_indices().collect();

    for (i, &(pos, c)) in chars.iter().enumerate() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = pos + c.len_utf8();
        let mut j = i + 1;
        if j >= chars.len() || !chars[j].1.is_whitespace() {
            continue;
        }
        while j < chars.len() && chars[j].1.is_whitespace() {
            j += 1;
        }
        let starts_sentence = chars
            .get(j)
            .is_some_and(|&(_, n)| n.is_uppercase() || n.is_ascii_digit());
        if starts_sentence && !ends_with_abbreviation(&text[..end]) {
            ends.push(end);
        }
    }
    ends
}

fn ends_with_abbreviation(text: &str) -> bool {
    let last = text.split_whitespace().last().unwrap_or("");
    let word = last.trim_start_matches(|c: char| matches!(c, '(' | '"' | '\''));
    ABBREVIATIONS.iter().any(|a| a.eq_ignore_ascii_case(word))
        || (word.len() == 2 && word.chars().next().is_some_and(char::is_uppercase))
}

/// Split prose into sentences; text without boundaries comes back whole.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    for end in sentence_boundaries(text) {
        let piece = text[start..end].trim();
        if !piece.is_empty() {
            out.push(piece.to_string());
        }
        start = end;
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
    out
}
