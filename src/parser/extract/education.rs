use std::sync::LazyLock;

use regex::Regex;

use crate::config::ParserConfig;
use crate::parser::classify::is_institution_line;
use crate::parser::patterns::{
    find_dates, is_range, is_upper, remove_dates, starts_with_bullet, strip_bullet, word_set,
};
use crate::parser::rewrite::rewrite_items;
use crate::record::Education;

const DEGREE_KEYWORDS: &[&str] = &[
    "BSc",
    "BA",
    "BEng",
    "BCom",
    "LLB",
    "MSc",
    "MA",
    "MEng",
    "MBA",
    "MPhil",
    "PhD",
    "DPhil",
    "Bachelor",
    "Bachelors",
    "Master",
    "Masters",
    "Doctorate",
    "Diploma",
    "Certificate",
    "CFA",
    "ACCA",
    "ACA",
    "A-Levels",
    "A Levels",
    "GCSEs",
    "IB",
    "Baccalaureate",
];

/// Result and award words that show up in caps under a degree.
const DETAIL_KEYWORDS: &[&str] = &[
    "GPA",
    "HONOURS",
    "HONORS",
    "HONS",
    "DISTINCTION",
    "MERIT",
    "CUM LAUDE",
    "DEAN'S LIST",
    "GRADE",
    "GRADES",
    "CLASSIFICATION",
];

static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| word_set(DEGREE_KEYWORDS));
static DETAIL_RE: LazyLock<Regex> = LazyLock::new(|| word_set(DETAIL_KEYWORDS));

/// `KPMG TRAINING` or `HEC PARIS, 2015`: a caps name of two words or more,
/// once dates are gone, that is neither a degree nor a grade.
fn is_caps_school(line: &str) -> bool {
    let name = remove_dates(line, find_dates(line).unwrap_or_default());
    is_upper(&name)
        && name.split_whitespace().count() >= 2
        && !name.chars().any(|c| c.is_ascii_digit())
        && !DEGREE_RE.is_match(&name)
        && !DETAIL_RE.is_match(&name)
}

#[derive(Debug, Default)]
struct Pending {
    school: String,
    degree: String,
    dates: String,
    dates_ranged: bool,
    details: Vec<String>,
}

impl Pending {
    fn fill_dates(&mut self, text: &str) -> String {
        match find_dates(text) {
            Some(dates) => {
                let ranged = is_range(dates);
                if self.dates.is_empty() || (ranged && !self.dates_ranged) {
                    self.dates = dates.to_string();
                    self.dates_ranged = ranged;
                }
                remove_dates(text, dates)
            }
            None => text.trim().to_string(),
        }
    }
}

struct Builder<'c> {
    config: &'c ParserConfig,
    entries: Vec<Education>,
    pending: Pending,
}

impl<'c> Builder<'c> {
    fn line(mut self, line: &str) -> Self {
        if starts_with_bullet(line) {
            let item = strip_bullet(line);
            if !item.is_empty() {
                self.pending.details.push(item.to_string());
            }
            return self;
        }

        if is_institution_line(line) || is_caps_school(line) {
            if !self.pending.school.is_empty() {
                self.flush();
            }
            self.institution(line);
            return self;
        }

        // a degree line after a complete entry opens the next one
        if !self.pending.school.is_empty()
            && !self.pending.degree.is_empty()
            && DEGREE_RE.is_match(line)
        {
            self.flush();
        }

        let text = self.pending.fill_dates(line);
        if !text.chars().any(char::is_alphabetic) {
            return self;
        }
        if self.pending.degree.is_empty() {
            self.pending.degree = text;
        } else {
            self.pending.details.push(text);
        }
        self
    }

    /// `BSc Finance, London Business School, 2018`: the segment naming the
    /// institution is the school, the others are dates or degree.
    fn institution(&mut self, line: &str) {
        let text = self.pending.fill_dates(line);
        let segments: Vec<&str> = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let school_idx = segments
            .iter()
            .position(|s| is_institution_line(s))
            .unwrap_or(0);

        let mut degree = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            if i == school_idx {
                self.pending.school = segment.to_uppercase();
            } else {
                degree.push(*segment);
            }
        }
        if self.pending.degree.is_empty() && !degree.is_empty() {
            self.pending.degree = degree.join(", ");
        }
    }

    fn flush(&mut self) {
        let done = std::mem::take(&mut self.pending);
        if done.school.is_empty() {
            return;
        }
        self.entries.push(Education {
            school: done.school,
            degree: done.degree,
            dates: done.dates,
            details: rewrite_items(&done.details, self.config, self.config.rewrite_details),
        });
    }

    fn finish(mut self) -> Vec<Education> {
        self.flush();
        self.entries
    }
}

/// Fold the EDUCATION section's lines into entries. A degree line that
/// comes before its institution is carried into that entry.
pub fn extract(lines: &[String], config: &ParserConfig) -> Vec<Education> {
    let builder = Builder {
        config,
        entries: Vec::new(),
        pending: Pending::default(),
    };
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .fold(builder, Builder::line)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<Education> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        extract(&lines, &ParserConfig::default())
    }

    #[test]
    fn single_line_entry() {
        let entries = run("BSc Finance, London Business School, 2018");
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.school, "LONDON BUSINESS SCHOOL");
        assert_eq!(e.degree, "BSc Finance");
        assert_eq!(e.dates, "2018");
    }

    #[test]
    fn school_then_degree_then_details() {
        let entries = run(
            "University of Leeds\n2014 - 2017\nBA Economics\n\
             • Dissertation on sovereign credit spreads\n• President of the Finance Society",
        );
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.school, "UNIVERSITY OF LEEDS");
        assert_eq!(e.dates, "2014 - 2017");
        assert_eq!(e.degree, "BA Economics");
        assert_eq!(e.details.len(), 2);
    }

    #[test]
    fn degree_before_school_is_carried() {
        let entries = run("MSc Financial Mathematics\nIMPERIAL COLLEGE LONDON, 2019");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].school, "IMPERIAL COLLEGE LONDON");
        assert_eq!(entries[0].degree, "MSc Financial Mathematics");
        assert_eq!(entries[0].dates, "2019");
    }

    #[test]
    fn several_entries() {
        let entries = run(
            "London Business School\nMBA\n2021 - 2023\n\
             University of Bristol\nBSc Mathematics\n2012 - 2015",
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].degree, "MBA");
        assert_eq!(entries[0].dates, "2021 - 2023");
        assert_eq!(entries[1].school, "UNIVERSITY OF BRISTOL");
        assert_eq!(entries[1].dates, "2012 - 2015");
    }

    #[test]
    fn degree_first_layout_over_several_entries() {
        let entries =
            run("MSc Finance\nLondon School of Economics\nBSc Physics\nUniversity of Warwick");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].degree, "MSc Finance");
        assert_eq!(entries[1].degree, "BSc Physics");
        assert_eq!(entries[1].school, "UNIVERSITY OF WARWICK");
    }

    #[test]
    fn caps_date_line_stays_with_school() {
        let entries = run("University of Leeds\nSEP 2014 - JUN 2017\nBA Economics");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].school, "UNIVERSITY OF LEEDS");
        assert_eq!(entries[0].dates, "SEP 2014 - JUN 2017");
        assert_eq!(entries[0].degree, "BA Economics");
    }

    #[test]
    fn caps_name_without_keyword_is_a_school() {
        let entries = run("KPMG TRAINING\nACA Chartered Accountancy\n2016 - 2019");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].school, "KPMG TRAINING");
        assert_eq!(entries[0].degree, "ACA Chartered Accountancy");
        assert_eq!(entries[0].dates, "2016 - 2019");
    }

    #[test]
    fn caps_grades_are_not_schools() {
        let entries = run("University of Leeds\nBA Economics\nFIRST CLASS HONOURS\nGPA 3.8");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].details.len(), 2);
        assert!(entries[0].details[0].contains("FIRST CLASS HONOURS"));
    }

    #[test]
    fn range_replaces_graduation_year() {
        let entries = run("University of Leeds, 2017\nBA Economics, 2014 - 2017");
        assert_eq!(entries[0].dates, "2014 - 2017");
    }

    #[test]
    fn details_respect_rewrite_switch() {
        let lines = vec![
            "University of York".to_string(),
            "• First Class Honours".to_string(),
        ];
        let config = ParserConfig {
            rewrite_details: false,
            ..ParserConfig::default()
        };
        assert_eq!(extract(&lines, &config)[0].details, ["First Class Honours"]);
        let prefixed = &extract(&lines, &ParserConfig::default())[0].details[0];
        assert!(prefixed.starts_with("Developed"));
    }

    #[test]
    fn nothing_without_school() {
        assert!(run("Self-taught programmer\n• Online courses").is_empty());
    }
}
