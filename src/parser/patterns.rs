//! Date, bullet and keyword patterns shared by the normalizer, the segmenter
//! and the record builders.

use std::sync::LazyLock;

use regex::Regex;

const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";
const MONTH_UPPER: &str = r"(?:JAN(?:UARY)?|FEB(?:RUARY)?|MAR(?:CH)?|APR(?:IL)?|MAY|JUNE?|JULY?|AUG(?:UST)?|SEP(?:T(?:EMBER)?)?|OCT(?:OBER)?|NOV(?:EMBER)?|DEC(?:EMBER)?)";
const YEAR: &str = r"(?:19|20)\d{2}";

fn date_point() -> String {
    format!(r"(?:(?:{MONTH}\.?\s+)|(?:\d{{1,2}}[/.]))?{YEAR}")
}

/// `2019 - 2021`, `Jan 2019 – Present`, `03/2018 to 06/2020`, ...
pub static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let point = date_point();
    Regex::new(&format!(
        r"(?i)\b{point}\s*(?:[-–—]|\bto\b|\buntil\b)\s*(?:{point}|present|current|now|date|today)\b"
    ))
    .unwrap()
});

/// A single `Month YYYY` or bare `YYYY`.
pub static SINGLE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b(?:{MONTH}\.?\s+)?{YEAR}\b")).unwrap());

pub static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b{YEAR}\b")).unwrap());

/// Month names as they appear in dates: capitalized or all caps, never "may".
pub static MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b(?:{MONTH}|{MONTH_UPPER})\b\.?")).unwrap());

pub const BULLETS: &[char] = &[
    '•', '-', '*', '◦', '▪', '‣', '–', '●', '○', '·', '⁃',
];

pub fn starts_with_bullet(line: &str) -> bool {
    line.starts_with(BULLETS)
}

pub fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(|c: char| BULLETS.contains(&c) || c.is_whitespace())
        .trim_end()
}

/// True if the line contains a year or a month name.
pub fn has_date(line: &str) -> bool {
    YEAR_RE.is_match(line) || MONTH_RE.is_match(line)
}

/// Longest date range in `line`, falling back to a single date.
pub fn find_dates(line: &str) -> Option<&str> {
    DATE_RANGE_RE
        .find_iter(line)
        .max_by_key(|m| m.len())
        .or_else(|| SINGLE_DATE_RE.find(line))
        .map(|m| m.as_str())
}

/// True if `dates` spans a range rather than naming a single point.
pub fn is_range(dates: &str) -> bool {
    DATE_RANGE_RE.is_match(dates)
}

/// Remove `dates` from `line` and tidy the separators left behind.
pub fn remove_dates(line: &str, dates: &str) -> String {
    if dates.is_empty() {
        return line.to_string();
    }
    let removed = line.replacen(dates, " ", 1);
    tidy_separators(&removed)
}

/// Trim separator debris (`, ,`, trailing `|`, doubled spaces).
pub fn tidy_separators(s: &str) -> String {
    let parts: Vec<&str> = s
        .split(',')
        .map(|p| p.trim_matches(is_separator_debris))
        .filter(|p| !p.is_empty())
        .collect();
    parts
        .join(", ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_separator_debris(c: char) -> bool {
    c.is_whitespace() || matches!(c, '|' | '-' | '–' | '—' | '(' | ')')
}

/// Build a case-insensitive whole-word matcher for a keyword table.
pub fn word_set(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
}

/// Letters are present and none of them is lowercase.
pub fn is_upper(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && !s.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        for (line, want) in [
            ("2020-2023", "2020-2023"),
            ("London, 2019 – Present", "2019 – Present"),
            ("Jan 2019 - Mar 2021", "Jan 2019 - Mar 2021"),
            ("September 2015 to June 2018", "September 2015 to June 2018"),
            ("03/2018 - 06/2020", "03/2018 - 06/2020"),
            ("2016 - current", "2016 - current"),
        ] {
            assert_eq!(find_dates(line), Some(want), "{line}");
        }
    }

    #[test]
    fn longest_range_wins() {
        let line = "2019-2020 (contract), Feb 2020 - December 2022";
        assert_eq!(find_dates(line), Some("Feb 2020 - December 2022"));
    }

    #[test]
    fn single_date_fallback() {
        assert_eq!(find_dates("Graduated June 2018"), Some("June 2018"));
        assert_eq!(find_dates("Class of 2012"), Some("2012"));
        assert_eq!(find_dates("No dates here"), None);
    }

    #[test]
    fn range_or_point() {
        assert!(is_range("Jan 2019 - Present"));
        assert!(is_range("2014-2017"));
        assert!(!is_range("2021"));
        assert!(!is_range("June 2018"));
    }

    #[test]
    fn date_detection() {
        assert!(has_date("Since 2019"));
        assert!(has_date("Mar - Jun"));
        assert!(has_date("JAN 2020"));
        assert!(!has_date("I may help with marketing"));
        assert!(!has_date("Phone 12345"));
    }

    #[test]
    fn bullets() {
        assert!(starts_with_bullet("• did X"));
        assert!(starts_with_bullet("- did X"));
        assert!(starts_with_bullet("◦ did X"));
        assert!(!starts_with_bullet("did X"));
        assert_eq!(strip_bullet("•  did X "), "did X");
        assert_eq!(strip_bullet("* - nested"), "nested");
    }

    #[test]
    fn remove_dates_tidies() {
        assert_eq!(
            remove_dates("Analyst, ACME LTD, 2019 - 2021, London", "2019 - 2021"),
            "Analyst, ACME LTD, London"
        );
        assert_eq!(remove_dates("ACME LTD (2019-2021)", "2019-2021"), "ACME LTD");
    }

    #[test]
    fn upper() {
        assert!(is_upper("ABC BANK PLC"));
        assert!(is_upper("J.P. MORGAN & CO."));
        assert!(!is_upper("ABC Bank"));
        assert!(!is_upper("2019"));
    }

    #[test]
    fn word_set_is_whole_word() {
        let re = word_set(&["INC", "VICE PRESIDENT"]);
        assert!(re.is_match("Acme Inc."));
        assert!(re.is_match("vice  president"));
        assert!(!re.is_match("PRINCIPAL"));
    }
}
