use serde::Serialize;
use tracing::trace;

use super::patterns::starts_with_bullet;
use crate::config::ParserConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    None,
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Extracurricular,
}

/// Trigger phrases per section, in tie-break priority order.
const TRIGGERS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Experience,
        &["experience", "employment", "work history", "career history"],
    ),
    (
        SectionKind::Education,
        &["education", "academic", "qualifications"],
    ),
    (SectionKind::Skills, &["skills", "competencies", "expertise"]),
    (SectionKind::Languages, &["language"]),
    (
        SectionKind::Extracurricular,
        &[
            "extra curricular",
            "extracurricular",
            "extra-curricular",
            "activities",
            "interests",
            "hobbies",
            "volunteering",
        ],
    ),
    (
        SectionKind::Summary,
        &["summary", "profile", "objective", "about me", "personal statement"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<String>,
}

/// Sections in source order; each kind occurs at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Segments {
    pub sections: Vec<Section>,
}

impl Segments {
    pub fn lines(&self, kind: SectionKind) -> &[String] {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.lines.as_slice())
            .unwrap_or(&[])
    }

    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }
}

/// Every section whose trigger phrases occur in `line`, highest priority first.
pub fn header_candidates(line: &str, config: &ParserConfig) -> Vec<SectionKind> {
    if line.chars().count() > config.header_max_len || starts_with_bullet(line) {
        return Vec::new();
    }
    let lower = line.to_lowercase();
    TRIGGERS
        .iter()
        .filter(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(kind, _)| *kind)
        .collect()
}

pub fn is_header(line: &str, config: &ParserConfig) -> bool {
    !header_candidates(line, config).is_empty()
}

/// Partition non-empty lines into sections with a one-way state machine.
pub fn segment_lines<'a, I>(lines: I, config: &ParserConfig) -> Segments
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sections: Vec<Section> = Vec::new();
    let mut current = Section {
        kind: SectionKind::None,
        lines: Vec::new(),
    };

    for line in lines.into_iter().map(str::trim).filter(|l| !l.is_empty()) {
        match detect_transition(line, current.kind, &sections, config) {
            Some(next) if next == current.kind => {
                trace!("repeated {:?} header: {}", next, line);
            }
            Some(next) => {
                trace!("{:?} -> {:?} at {:?}", current.kind, next, line);
                let closed = std::mem::replace(
                    &mut current,
                    Section {
                        kind: next,
                        lines: Vec::new(),
                    },
                );
                if closed.kind != SectionKind::None || !closed.lines.is_empty() {
                    sections.push(closed);
                }
            }
            None => {
                current.lines.push(line.to_string());
                continue;
            }
        }
        if let Some(rest) = inline_content(line) {
            current.lines.push(rest.to_string());
        }
    }

    if current.kind != SectionKind::None || !current.lines.is_empty() {
        sections.push(current);
    }

    Segments { sections }
}

/// Content after a header's colon: `Languages: French, German`.
fn inline_content(header: &str) -> Option<&str> {
    header
        .split_once(':')
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
}

fn detect_transition(
    line: &str,
    current: SectionKind,
    closed: &[Section],
    config: &ParserConfig,
) -> Option<SectionKind> {
    header_candidates(line, config)
        .into_iter()
        .find(|kind| *kind == current || !closed.iter().any(|s| s.kind == *kind))
}
