use std::sync::LazyLock;

use regex::Regex;

use crate::config::ParserConfig;
use crate::parser::sections::is_header;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// Tried in order; the first pattern with a match anywhere wins.
static PHONE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\+44\s?(?:\(0\)\s?)?\d{2,4}[\s-]?\d{3,4}[\s-]?\d{3,4}",
        r"\+1[\s-]?\(?\d{3}\)?[\s-]?\d{3}[\s-]?\d{4}",
        r"\b0\d{4}[\s-]?\d{6}\b|\b0\d{2,3}[\s-]?\d{3,4}[\s-]?\d{4}\b",
        r"\b\d{3}[\s.-]\d{3}[\s.-]\d{4}\b",
        r"\b\d{3}[\s.-]?\d{7}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// `London, UK` or `New York, NY`, ending the line or followed by a separator.
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\p{Lu}\p{Ll}+(?:[ \t]+\p{Lu}\p{Ll}+)*,[ \t]*\p{Lu}{2,3})[ \t]*(?:$|[|,;·/])")
        .unwrap()
});

const NOISE_WORDS: &[&str] = &["curriculum", "vitae", "resume", "cv", "page"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

pub fn extract(lines: &[String], config: &ParserConfig) -> Contact {
    Contact {
        name: extract_name(lines, config),
        email: extract_email(lines),
        phone: extract_phone(lines),
        location: extract_location(lines, config),
    }
}

pub fn extract_name(lines: &[String], config: &ParserConfig) -> String {
    lines
        .iter()
        .take(config.name_scan_lines)
        .map(|l| l.trim())
        .find(|l| looks_like_name(l, config))
        .map(str::to_string)
        .unwrap_or_else(|| config.name_placeholder.clone())
}

fn looks_like_name(line: &str, config: &ParserConfig) -> bool {
    if line.chars().count() <= config.name_min_len
        || line.contains('@')
        || line.chars().any(|c| c.is_ascii_digit())
    {
        return false;
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 2 {
        return false;
    }
    let noisy = words.iter().any(|w| {
        let bare = w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        NOISE_WORDS.contains(&bare.as_str())
    });
    let capitalized = words
        .iter()
        .take(2)
        .all(|w| w.chars().next().is_some_and(char::is_uppercase));

    !noisy && capitalized && !is_header(line, config)
}

pub fn extract_email(lines: &[String]) -> String {
    lines
        .iter()
        .find_map(|l| EMAIL_RE.find(l))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn extract_phone(lines: &[String]) -> String {
    PHONE_RES
        .iter()
        .find_map(|re| lines.iter().find_map(|l| re.find(l)))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

pub fn extract_location(lines: &[String], config: &ParserConfig) -> String {
    lines
        .iter()
        .find_map(|l| LOCATION_RE.captures(l))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| config.location_placeholder.clone())
}
