pub mod classify;
pub mod extract;
pub mod normalize;
pub mod patterns;
pub mod rewrite;
pub mod sections;

use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::record::CvRecord;
use sections::Segments;

/// Four-pass pipeline: text → normalized lines → sections → record.
pub fn parse_cv(text: &str, config: &ParserConfig) -> CvRecord {
    let lines = prepare(text, config);
    let segments = sections::segment_lines(lines.iter().map(String::as_str), config);
    let record = extract::extract_all(&segments, &lines, config);

    debug!(
        "parsed {} lines: {} sections, {} jobs, {} schools, {} skills, {} languages",
        lines.len(),
        segments.sections.len(),
        record.experience.len(),
        record.education.len(),
        record.skills.len(),
        record.languages.len(),
    );
    record
}

/// Like [`parse_cv`], for raw file contents. Input that is not UTF-8 parses
/// as an empty document.
pub fn parse_cv_bytes(bytes: &[u8], config: &ParserConfig) -> CvRecord {
    match std::str::from_utf8(bytes) {
        Ok(text) => parse_cv(text, config),
        Err(e) => {
            warn!("input is not valid UTF-8 ({}), parsing as empty", e);
            parse_cv("", config)
        }
    }
}

/// Normalize and segment without building a record.
pub fn segment(text: &str, config: &ParserConfig) -> Segments {
    let lines = prepare(text, config);
    sections::segment_lines(lines.iter().map(String::as_str), config)
}

fn prepare(text: &str, config: &ParserConfig) -> Vec<String> {
    let text = truncate_input(text, config.max_input_bytes);
    normalize::normalize(text)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn truncate_input(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    warn!("input is {} bytes, truncating to {}", text.len(), end);
    &text[..end]
}

// ── Tests ──
