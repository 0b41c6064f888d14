use std::sync::LazyLock;

use regex::Regex;

use super::patterns::{has_date, is_upper, starts_with_bullet, word_set};
use crate::config::ParserConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Bullet,
    Company,
    Title,
    Date,
    FreeText,
    Other,
}

pub const COMPANY_KEYWORDS: &[&str] = &[
    "LTD",
    "LIMITED",
    "LLC",
    "LLP",
    "LP",
    "INC",
    "CORP",
    "CORPORATION",
    "PLC",
    "CO",
    "COMPANY",
    "PARTNERS",
    "CAPITAL",
    "BANK",
    "BANKING",
    "GROUP",
    "FUND",
    "FUNDS",
    "HOLDINGS",
    "MANAGEMENT",
    "INVESTMENT",
    "INVESTMENTS",
    "VENTURES",
    "ASSOCIATES",
    "ADVISORS",
    "ADVISERS",
    "SECURITIES",
    "GLOBAL",
    "CONSULTING",
    "SOLUTIONS",
    "TECHNOLOGIES",
    "AG",
    "SA",
    "GMBH",
    "NV",
    "BV",
];

pub const ROLE_KEYWORDS: &[&str] = &[
    "ANALYST",
    "MANAGER",
    "DIRECTOR",
    "MANAGING DIRECTOR",
    "ASSOCIATE",
    "VP",
    "AVP",
    "VICE PRESIDENT",
    "PRESIDENT",
    "HEAD",
    "SENIOR",
    "JUNIOR",
    "LEAD",
    "OFFICER",
    "SPECIALIST",
    "CONSULTANT",
    "ENGINEER",
    "DEVELOPER",
    "ADVISOR",
    "ADVISER",
    "TRADER",
    "STRUCTURER",
    "ECONOMIST",
    "STRATEGIST",
    "PARTNER",
    "PRINCIPAL",
    "INTERN",
    "INTERNSHIP",
    "TRAINEE",
    "ACCOUNTANT",
    "CONTROLLER",
    "COORDINATOR",
    "ASSISTANT",
    "EXECUTIVE",
    "CEO",
    "CFO",
    "COO",
    "CTO",
    "CRO",
];

pub const INSTITUTION_KEYWORDS: &[&str] = &[
    "UNIVERSITY",
    "COLLEGE",
    "SCHOOL",
    "INSTITUTE",
    "ACADEMY",
    "POLYTECHNIC",
];

static COMPANY_RE: LazyLock<Regex> = LazyLock::new(|| word_set(COMPANY_KEYWORDS));
static ROLE_RE: LazyLock<Regex> = LazyLock::new(|| word_set(ROLE_KEYWORDS));
static INSTITUTION_RE: LazyLock<Regex> = LazyLock::new(|| word_set(INSTITUTION_KEYWORDS));

type Test = fn(&str, &ParserConfig) -> bool;

/// Experience line classes in priority order; the first passing test wins.
const EXPERIENCE_RULES: &[(LineClass, Test)] = &[
    (LineClass::Bullet, bullet_test),
    (LineClass::Company, company_test),
    (LineClass::Title, title_test),
    (LineClass::Date, date_test),
    (LineClass::FreeText, free_text_test),
];

pub fn classify_experience_line(line: &str, config: &ParserConfig) -> LineClass {
    EXPERIENCE_RULES
        .iter()
        .find(|(_, test)| test(line, config))
        .map(|(class, _)| *class)
        .unwrap_or(LineClass::Other)
}

fn bullet_test(line: &str, _: &ParserConfig) -> bool {
    starts_with_bullet(line)
}

fn company_test(line: &str, _: &ParserConfig) -> bool {
    is_company_line(line)
}

fn title_test(line: &str, _: &ParserConfig) -> bool {
    is_title_line(line)
}

fn date_test(line: &str, _: &ParserConfig) -> bool {
    has_date(line)
}

fn free_text_test(line: &str, config: &ParserConfig) -> bool {
    line.chars().count() > config.free_text_min_len
}

/// `ABC CAPITAL PARTNERS` or `HSBC BANK PLC, London`: the part before the
/// first comma is all caps, longer than 5 chars, and names a corporate form.
pub fn is_company_line(line: &str) -> bool {
    let lead = line.split(',').next().unwrap_or("").trim();
    is_upper(lead) && lead.chars().count() > 5 && COMPANY_RE.is_match(lead)
}

/// `Senior Credit Analyst` or `VICE PRESIDENT, CREDIT`.
pub fn is_title_line(line: &str) -> bool {
    (is_title_case(line) || is_upper(line)) && ROLE_RE.is_match(line)
}

pub fn is_institution_line(line: &str) -> bool {
    INSTITUTION_RE.is_match(line)
}

/// Capitalized throughout, allowing short connectives ("Head of Credit Risk").
pub fn is_title_case(line: &str) -> bool {
    if is_upper(line) {
        return false;
    }
    let first_alpha = line.chars().find(|c| c.is_alphabetic());
    if !first_alpha.is_some_and(char::is_uppercase) {
        return false;
    }
    line.split_whitespace()
        .filter(|w| w.chars().next().is_some_and(char::is_alphabetic))
        .filter(|w| w.chars().filter(|c| c.is_alphabetic()).count() >= 4)
        .all(|w| w.chars().next().is_some_and(char::is_uppercase))
}
