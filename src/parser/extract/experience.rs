use tracing::trace;

use crate::config::ParserConfig;
use crate::parser::classify::{classify_experience_line, LineClass};
use crate::parser::patterns::{find_dates, is_range, remove_dates, strip_bullet};
use crate::parser::rewrite::{rewrite_items, split_sentences};
use crate::record::Experience;

/// The entry under construction.
#[derive(Debug, Default)]
struct Pending {
    title: String,
    company: String,
    location: String,
    dates: String,
    dates_ranged: bool,
    responsibilities: Vec<String>,
}

impl Pending {
    fn is_identified(&self) -> bool {
        !self.title.is_empty() || !self.company.is_empty()
    }

    /// The first range seen wins. A single date only holds the slot until
    /// a range turns up.
    fn note_dates(&mut self, dates: &str) {
        let ranged = is_range(dates);
        if self.dates.is_empty() || (ranged && !self.dates_ranged) {
            self.dates = dates.to_string();
            self.dates_ranged = ranged;
        }
    }

    /// Take any date out of `text`.
    fn lift_dates(&mut self, text: &str) -> String {
        match find_dates(text) {
            Some(dates) => {
                self.note_dates(dates);
                remove_dates(text, dates)
            }
            None => text.trim().to_string(),
        }
    }
}

struct Builder<'c> {
    config: &'c ParserConfig,
    entries: Vec<Experience>,
    pending: Pending,
}

impl<'c> Builder<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Builder {
            config,
            entries: Vec::new(),
            pending: Pending::default(),
        }
    }

    fn line(mut self, line: &str) -> Self {
        match classify_experience_line(line, self.config) {
            LineClass::Bullet => {
                let item = strip_bullet(line);
                if !item.is_empty() {
                    self.pending.responsibilities.push(item.to_string());
                }
            }
            LineClass::Company => {
                if self.pending.is_identified() {
                    self.flush();
                }
                let text = self.pending.lift_dates(line);
                let (company, location) = match text.split_once(',') {
                    Some((company, rest)) => (company, rest.trim()),
                    None => (text.as_str(), ""),
                };
                self.pending.company = company.trim().to_uppercase();
                if !location.is_empty() && self.pending.location.is_empty() {
                    self.pending.location = location.to_string();
                }
            }
            LineClass::Title => {
                if !self.pending.title.is_empty() {
                    self.flush();
                }
                let text = self.pending.lift_dates(line);
                let mut parts = text.split(',').map(str::trim).filter(|p| !p.is_empty());
                self.pending.title = parts.next().unwrap_or_default().to_string();
                if let Some(company) = parts.next() {
                    if self.pending.company.is_empty() {
                        self.pending.company = company.to_uppercase();
                    }
                }
                let location = parts.collect::<Vec<_>>().join(", ");
                if !location.is_empty() && self.pending.location.is_empty() {
                    self.pending.location = location;
                }
            }
            LineClass::Date => {
                let dates = find_dates(line).unwrap_or_default();
                let residue = remove_dates(line, dates);
                if residue.chars().count() > self.config.free_text_min_len {
                    // prose mentioning a year
                    if is_range(dates) {
                        self.pending.note_dates(dates);
                    }
                    self.free_text(line);
                } else if !dates.is_empty() {
                    self.pending.note_dates(dates);
                }
            }
            LineClass::FreeText => self.free_text(line),
            LineClass::Other => trace!("ignored experience line: {}", line),
        }
        self
    }

    fn free_text(&mut self, text: &str) {
        let text = text.trim();
        if text.chars().count() > self.config.sentence_split_len {
            self.pending.responsibilities.extend(split_sentences(text));
        } else {
            self.pending.responsibilities.push(text.to_string());
        }
    }

    fn flush(&mut self) {
        let done = std::mem::take(&mut self.pending);
        if !done.is_identified() {
            return;
        }
        trace!("experience entry: {} / {}", done.title, done.company);
        self.entries.push(Experience {
            title: done.title,
            company: done.company,
            location: done.location,
            dates: done.dates,
            responsibilities: rewrite_items(&done.responsibilities, self.config, true),
        });
    }

    fn finish(mut self) -> Vec<Experience> {
        self.flush();
        self.entries
    }
}

/// Fold the EXPERIENCE section's lines into entries.
pub fn extract(lines: &[String], config: &ParserConfig) -> Vec<Experience> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .fold(Builder::new(config), Builder::line)
        .finish()
}
