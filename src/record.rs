use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;

/// Structured candidate record produced from one resume text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub languages: Vec<String>,
    pub skills: Vec<String>,
    pub extracurricular: Vec<String>,
}

impl CvRecord {
    /// Record with every field at its default: placeholders for name and
    /// location, empty everywhere else.
    pub fn empty(config: &ParserConfig) -> Self {
        CvRecord {
            name: config.name_placeholder.clone(),
            email: String::new(),
            phone: String::new(),
            location: config.location_placeholder.clone(),
            summary: String::new(),
            experience: Vec::new(),
            education: Vec::new(),
            languages: Vec::new(),
            skills: Vec::new(),
            extracurricular: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free-text span as written in the source ("Jan 2019 - Present").
    pub dates: String,
    pub responsibilities: Vec<String>,
}

impl Experience {
    pub fn is_identified(&self) -> bool {
        !self.title.is_empty() || !self.company.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub dates: String,
    pub details: Vec<String>,
}

impl Education {
    pub fn is_identified(&self) -> bool {
        !self.school.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_uses_placeholders() {
        let config = ParserConfig::default();
        let record = CvRecord::empty(&config);
        assert_eq!(record.name, config.name_placeholder);
        assert_eq!(record.location, config.location_placeholder);
        assert!(record.email.is_empty());
        assert!(record.experience.is_empty());
    }

    #[test]
    fn json_has_every_key() {
        let record = CvRecord::empty(&ParserConfig::default());
        let value = serde_json::to_value(&record).unwrap();
        for key in [
            "name",
            "email",
            "phone",
            "location",
            "summary",
            "experience",
            "education",
            "languages",
            "skills",
            "extracurricular",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
            assert!(!value[key].is_null(), "{key} is null");
        }
    }

    #[test]
    fn identification() {
        let mut exp = Experience::default();
        assert!(!exp.is_identified());
        exp.company = "ACME LTD".into();
        assert!(exp.is_identified());

        let mut edu = Education::default();
        edu.degree = "BSc".into();
        assert!(!edu.is_identified());
        edu.school = "KING'S COLLEGE".into();
        assert!(edu.is_identified());
    }
}
