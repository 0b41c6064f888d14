pub mod contact;
pub mod education;
pub mod experience;
pub mod lists;

use super::sections::{SectionKind, Segments};
use crate::config::ParserConfig;
use crate::record::CvRecord;

/// Build the record from the segmented document. `lines` is the whole
/// normalized document; contact fields are searched across all of it.
pub fn extract_all(segments: &Segments, lines: &[String], config: &ParserConfig) -> CvRecord {
    let contact = contact::extract(lines, config);
    let experience = experience::extract(segments.lines(SectionKind::Experience), config);
    let education = education::extract(segments.lines(SectionKind::Education), config);
    let lists = lists::extract(segments, config);

    CvRecord {
        name: contact.name,
        email: contact.email,
        phone: contact.phone,
        location: contact.location,
        summary: lists::summary(segments),
        experience,
        education,
        languages: lists.languages,
        skills: lists.skills,
        extracurricular: lists.extracurricular,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::normalize::normalize;
    use crate::parser::sections::segment_lines;

    fn parse(fixture: &str) -> CvRecord {
        let text = std::fs::read_to_string(format!("tests/fixtures/{}.txt", fixture)).unwrap();
        let config = ParserConfig::default();
        let lines: Vec<String> = normalize(&text)
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
        let segments = segment_lines(lines.iter().map(String::as_str), &config);
        extract_all(&segments, &lines, &config)
    }

    #[test]
    fn credit_analyst_contact() {
        let cv = parse("credit_analyst");
        assert_eq!(cv.name, "Sarah Okafor");
        assert_eq!(cv.email, "sarah.okafor@mail.com");
        assert_eq!(cv.phone, "+44 7700 900 456");
        assert_eq!(cv.location, "London, UK");
        assert!(cv.summary.starts_with("Credit analyst"));
    }

    #[test]
    fn credit_analyst_experience() {
        let cv = parse("credit_analyst");
        assert_eq!(cv.experience.len(), 3);
        let first = &cv.experience[0];
        assert_eq!(first.company, "NORTHBRIDGE CAPITAL PARTNERS LLP");
        assert_eq!(first.title, "Senior Credit Analyst");
        assert!(first.dates.contains("2021"));
        assert_eq!(first.responsibilities.len(), 3);
        assert!(cv.experience.iter().all(|e| e.is_identified()));
        assert!(cv
            .experience
            .iter()
            .flat_map(|e| &e.responsibilities)
            .all(|r| r.chars().count() <= 120 && !r.is_empty()));
    }

    #[test]
    fn credit_analyst_education_and_lists() {
        let cv = parse("credit_analyst");
        assert_eq!(cv.education.len(), 2);
        assert_eq!(cv.education[0].school, "LONDON SCHOOL OF ECONOMICS");
        assert_eq!(cv.education[0].degree, "MSc Finance");
        assert_eq!(cv.education[1].school, "UNIVERSITY OF MANCHESTER");
        assert!(cv.skills.contains(&"Bloomberg".to_string()));
        assert!(cv.languages.iter().any(|l| l.starts_with("French")));
        assert!(cv.extracurricular.iter().any(|x| x.contains("Marathon")));
    }

    #[test]
    fn unstructured_text_yields_placeholders() {
        let cv = parse("unstructured");
        assert_eq!(cv.location, "Location");
        assert!(cv.experience.is_empty());
        assert!(cv.education.is_empty());
        assert!(cv.skills.is_empty());
        assert!(cv.languages.is_empty());
        assert!(cv.extracurricular.is_empty());
    }
}
