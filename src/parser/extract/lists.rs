use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::ParserConfig;
use crate::parser::patterns::{strip_bullet, word_set};
use crate::parser::sections::{SectionKind, Segments};

const LANGUAGE_NAMES: &[&str] = &[
    "English",
    "French",
    "German",
    "Spanish",
    "Italian",
    "Portuguese",
    "Dutch",
    "Flemish",
    "Swedish",
    "Norwegian",
    "Danish",
    "Finnish",
    "Icelandic",
    "Polish",
    "Czech",
    "Slovak",
    "Hungarian",
    "Romanian",
    "Bulgarian",
    "Greek",
    "Turkish",
    "Russian",
    "Ukrainian",
    "Serbian",
    "Croatian",
    "Arabic",
    "Hebrew",
    "Farsi",
    "Persian",
    "Hindi",
    "Urdu",
    "Bengali",
    "Punjabi",
    "Gujarati",
    "Tamil",
    "Mandarin",
    "Cantonese",
    "Chinese",
    "Japanese",
    "Korean",
    "Vietnamese",
    "Thai",
    "Malay",
    "Indonesian",
    "Swahili",
    "Afrikaans",
    "Welsh",
    "Irish",
    "Latin",
];

const TOOL_KEYWORDS: &[&str] = &[
    "Excel",
    "VBA",
    "Word",
    "PowerPoint",
    "Outlook",
    "Access",
    "Office",
    "Microsoft",
    "Python",
    "SQL",
    "R",
    "MATLAB",
    "Java",
    "JavaScript",
    "SAS",
    "Stata",
    "SPSS",
    "Tableau",
    "Power BI",
    "Bloomberg",
    "Reuters",
    "Refinitiv",
    "Eikon",
    "FactSet",
    "Capital IQ",
    "PitchBook",
    "Dealogic",
    "Mergermarket",
    "Salesforce",
    "SAP",
    "Oracle",
    "Murex",
    "Calypso",
    "Git",
    "Linux",
    "AWS",
    "Alteryx",
    "Argus",
];

const PROFICIENCY_WORDS: &[&str] = &[
    "fluent",
    "fluency",
    "native",
    "bilingual",
    "mother tongue",
    "intermediate",
    "conversational",
    "elementary",
    "beginner",
    "working proficiency",
    "professional proficiency",
    "spoken",
    "written",
];

static LANGUAGE_RE: LazyLock<Regex> = LazyLock::new(|| word_set(LANGUAGE_NAMES));
static TOOL_RE: LazyLock<Regex> = LazyLock::new(|| word_set(TOOL_KEYWORDS));
static PROFICIENCY_RE: LazyLock<Regex> = LazyLock::new(|| word_set(PROFICIENCY_WORDS));

/// A short `Label:` lead such as `Languages:` or `IT Skills:`.
/// `IT Skills:`, `Languages:`, `Other interests:`. A lead naming a skill
/// itself (`Python: pandas`) is content.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[\p{L}&/-]+\s+){0,3}(?:skills?|languages?|tools|software|interests|hobbies|activities|certifications?|technolog(?:y|ies)|technical|competencies|expertise|platforms|systems|other)\s*:\s*",
    )
    .unwrap()
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lists {
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub extracurricular: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Skills,
    Languages,
}

fn route(item: &str, fallback: Target) -> Target {
    if LANGUAGE_RE.is_match(item) {
        Target::Languages
    } else if TOOL_RE.is_match(item) {
        Target::Skills
    } else if PROFICIENCY_RE.is_match(item) {
        Target::Languages
    } else {
        fallback
    }
}

pub fn extract(segments: &Segments, config: &ParserConfig) -> Lists {
    let mut skills = Vec::new();
    let mut languages = Vec::new();

    for (kind, fallback) in [
        (SectionKind::Skills, Target::Skills),
        (SectionKind::Languages, Target::Languages),
    ] {
        for item in split_lines(segments.lines(kind)) {
            match route(&item, fallback) {
                Target::Skills => skills.push(item),
                Target::Languages => languages.push(item),
            }
        }
    }

    Lists {
        skills: dedup_capped(skills, config.max_list_items),
        languages: dedup_capped(languages, config.max_list_items),
        extracurricular: dedup_capped(
            split_lines(segments.lines(SectionKind::Extracurricular)),
            config.max_list_items,
        ),
    }
}

/// SUMMARY lines joined into one paragraph.
pub fn summary(segments: &Segments) -> String {
    segments
        .lines(SectionKind::Summary)
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Break list lines into items on `,` `;` `|` and inline bullets.
pub fn split_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| {
            let body = strip_bullet(line);
            let body = LABEL_RE.replace(body, "");
            body.split([',', ';', '|', '•'])
                .map(|item| item.trim().trim_end_matches('.').trim().to_string())
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
        })
        .collect()
}

fn dedup_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .take(cap)
        .collect()
}
