use std::sync::LazyLock;

use regex::Regex;

use super::patterns::DATE_RANGE_RE;

static HSPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static CAMEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\p{Ll})(\p{Lu})").unwrap());

/// Header phrases that get their own line when glued onto surrounding text.
const BREAK_HEADERS: &[&str] = &[
    "PROFESSIONAL EXPERIENCE",
    "WORK EXPERIENCE",
    "EMPLOYMENT HISTORY",
    "CAREER HISTORY",
    "WORK HISTORY",
    "PROFESSIONAL SUMMARY",
    "EXECUTIVE SUMMARY",
    "EDUCATION",
    "ACADEMIC BACKGROUND",
    "QUALIFICATIONS",
    "COMPUTER SKILLS",
    "TECHNICAL SKILLS",
    "IT SKILLS",
    "KEY SKILLS",
    "LANGUAGE SKILLS",
    "LANGUAGES",
    "EXTRA CURRICULAR",
    "EXTRACURRICULAR ACTIVITIES",
    "INTERESTS",
    "HOBBIES",
];

static HEADER_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = BREAK_HEADERS
        .iter()
        .map(|h| regex::escape(h).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
});

const ARTIFACTS: &[(&str, &str)] = &[
    ("\r\n", "\n"),
    ("\r", "\n"),
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
    ("\u{00A0}", " "),
    ("\u{202F}", " "),
    ("\u{2009}", " "),
    ("\u{200B}", ""),
    ("\u{200C}", ""),
    ("\u{200D}", ""),
    ("\u{FEFF}", ""),
    ("\u{00AD}", ""),
];

/// Clean extracted resume text so that one logical item sits on one line.
pub fn normalize(text: &str) -> String {
    let repaired = repair_artifacts(text);
    let collapsed = collapse_whitespace(&repaired);
    let split = CAMEL_RE.replace_all(&collapsed, "$1 $2");
    let with_headers = break_lines(&split, &HEADER_BREAK_RE, true);
    break_lines(&with_headers, &DATE_RANGE_RE, false)
}

fn repair_artifacts(text: &str) -> String {
    let mut out = text.to_string();
    for (from, to) in ARTIFACTS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    let joined = text
        .split('\n')
        .map(|line| HSPACE_RE.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_RUN_RE
        .replace_all(joined.trim(), "\n\n")
        .into_owned()
}

/// Insert a line break before every mid-line match of `re`. With
/// `break_after`, a match at line start is also cut off from a following
/// capitalized word ("LANGUAGES English, French").
fn break_lines(text: &str, re: &Regex, break_after: bool) -> String {
    text.split('\n')
        .map(|line| split_line(line, re, break_after).join("\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn split_line<'a>(line: &'a str, re: &Regex, break_after: bool) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut rest = line;
    while let Some((head, tail)) = next_cut(rest, re, break_after) {
        parts.push(head);
        rest = tail;
    }
    parts.push(rest);
    parts
}

fn next_cut<'a>(line: &'a str, re: &Regex, break_after: bool) -> Option<(&'a str, &'a str)> {
    for m in re.find_iter(line) {
        let head = line[..m.start()].trim_end_matches(is_separator);
        if !head.is_empty() {
            return Some((head, line[m.start()..].trim_start()));
        }
        if break_after {
            let tail = line[m.end()..].trim_start_matches(is_separator);
            if starts_capitalized_word(tail) {
                return Some((line[..m.end()].trim_end(), tail));
            }
        }
    }
    None
}

fn starts_capitalized_word(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(first), Some(second)) if first.is_uppercase() && second.is_lowercase()
    )
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | '|' | '-' | '–' | '—' | ':')
}
