use crate::constants::PROFILE_HOST;
use crate::domain::{Gender, Occupation, Relation, StateUt, VaccineName};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap());

const PHONE_LEN_WITH_CC: usize = 13;
const PHONE_LEN: usize = 10;

/// Label lookup tables for the form enumerations, built once per run and
/// passed by reference into the normalizers.
pub struct Lookups {
    genders: HashMap<&'static str, Gender>,
    states: HashMap<&'static str, StateUt>,
    occupations: HashMap<&'static str, Occupation>,
    relations: HashMap<&'static str, Relation>,
    vaccines: HashMap<&'static str, VaccineName>,
}

impl Lookups {
    pub fn new() -> Self {
        Self {
            genders: Gender::ALL.iter().map(|g| (g.label(), *g)).collect(),
            states: StateUt::ALL.iter().map(|s| (s.label(), *s)).collect(),
            occupations: Occupation::ALL.iter().map(|o| (o.label(), *o)).collect(),
            relations: Relation::ALL.iter().map(|r| (r.label(), *r)).collect(),
            vaccines: VaccineName::ALL.iter().map(|v| (v.label(), *v)).collect(),
        }
    }

    pub fn relation(&self, label: &str) -> Option<Relation> {
        self.relations.get(label).copied()
    }

    pub fn vaccine(&self, label: &str) -> Option<VaccineName> {
        self.vaccines.get(label).copied()
    }
}

impl Default for Lookups {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a date cell: ISO-8601 first, then D/M/YYYY.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    let caps = DATE_RE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Normalize a phone cell. Unrecognized forms become the empty string,
/// meaning "no phone" rather than an error.
pub fn clean_phone(phone: &str) -> String {
    let clean: String = phone
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let clean = clean.trim_start_matches('0');
    if clean.is_empty() {
        String::new()
    } else if (clean.starts_with("+91") && clean.len() == PHONE_LEN_WITH_CC)
        || (clean.starts_with('+') && !clean.starts_with("+91"))
    {
        clean.to_string()
    } else if !clean.starts_with('+') && clean.len() == PHONE_LEN {
        format!("+91{clean}")
    } else {
        String::new()
    }
}

/// Map a free-text occupation cell onto the occupation enumeration.
/// Unmatched text means "occupation unknown", same as an absent cell.
pub fn clean_occupation(occupation: Option<&str>, lookups: &Lookups) -> Option<Occupation> {
    let cleaned = match occupation {
        None => return None,
        Some(text) if text.starts_with("Student") => "Student".to_string(),
        Some(text) if text.starts_with("Not working") => "Unemployed".to_string(),
        Some(text) if text.starts_with("Working -") => text
            .replace("Working -", "")
            .replace("job", "")
            .trim()
            .to_string(),
        Some(_) => String::new(),
    };
    lookups.occupations.get(cleaned.as_str()).copied()
}

/// Accept a profile URL only when it points at the upstream profile service.
pub fn clean_profile_url(url: &str) -> Option<&str> {
    (host_of(url)? == PROFILE_HOST).then_some(url)
}

/// Extract the identity slug, the final path segment of a profile URL.
pub fn profile_slug(url: &str) -> Option<String> {
    let rest = strip_scheme(url)?;
    let path_start = rest.find('/').unwrap_or(rest.len());
    let path = rest[path_start..]
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .trim_matches('/');
    let slug = path.rsplit('/').next().unwrap_or("");
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

fn strip_scheme(url: &str) -> Option<&str> {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
}

fn host_of(url: &str) -> Option<&str> {
    let rest = strip_scheme(url)?;
    rest.split(['/', '?', '#']).next()
}

/// Map a gender cell onto the gender enumeration; unknown labels become
/// `Other` with the raw text preserved.
pub fn clean_gender(raw: &str, lookups: &Lookups) -> (Gender, Option<String>) {
    match lookups.genders.get(raw) {
        Some(gender) => (*gender, None),
        None => (Gender::Other, Some(raw.to_string())),
    }
}

/// Map a state cell onto the state enumeration; unknown labels mean the
/// player is not in India.
pub fn clean_state(raw: &str, lookups: &Lookups) -> (Option<StateUt>, bool) {
    match lookups.states.get(raw) {
        Some(state) => (Some(*state), false),
        None => (None, true),
    }
}

/// Lowercase ASCII slug: alphanumerics kept, whitespace runs collapsed to
/// single hyphens.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_and_dmy() {
        let expected = NaiveDate::from_ymd_opt(1994, 3, 7).unwrap();
        assert_eq!(parse_date("1994-03-07"), Some(expected));
        assert_eq!(parse_date("7/3/1994"), Some(expected));
        assert_eq!(parse_date("07/03/1994"), Some(expected));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("7-3-1994"), None);
        assert_eq!(parse_date("March 7, 1994"), None);
        assert_eq!(parse_date("7/3/94"), None);
        // Valid pattern, invalid calendar date
        assert_eq!(parse_date("31/2/1994"), None);
    }

    #[test]
    fn clean_phone_prefixes_bare_local_numbers() {
        assert_eq!(clean_phone("9876543210"), "+919876543210");
        assert_eq!(clean_phone("98765 43210"), "+919876543210");
        assert_eq!(clean_phone("98765-43210"), "+919876543210");
        assert_eq!(clean_phone("09876543210"), "+919876543210");
    }

    #[test]
    fn clean_phone_keeps_prefixed_numbers() {
        assert_eq!(clean_phone("+919876543210"), "+919876543210");
        assert_eq!(clean_phone("+1 555 012 3456"), "+15550123456");
    }

    #[test]
    fn clean_phone_drops_unrecognized_forms() {
        assert_eq!(clean_phone(""), "");
        assert_eq!(clean_phone("12345"), "");
        assert_eq!(clean_phone("+9198765432101234"), "");
        assert_eq!(clean_phone("98765432101"), "");
    }

    #[test]
    fn clean_occupation_prefix_rules() {
        let lookups = Lookups::new();
        assert_eq!(
            clean_occupation(Some("Working - Software job"), &lookups),
            None
        );
        assert_eq!(
            clean_occupation(Some("Working - Government job"), &lookups),
            Some(Occupation::Government)
        );
        assert_eq!(
            clean_occupation(Some("Student, final year"), &lookups),
            Some(Occupation::Student)
        );
        assert_eq!(
            clean_occupation(Some("Not working currently"), &lookups),
            Some(Occupation::Unemployed)
        );
        assert_eq!(clean_occupation(Some("Retired"), &lookups), None);
        assert_eq!(clean_occupation(None, &lookups), None);
    }

    #[test]
    fn clean_profile_url_checks_host() {
        assert!(clean_profile_url("https://indiaultimate.org/en_in/u/john-doe").is_some());
        assert!(clean_profile_url("https://www.indiaultimate.org/u/john-doe").is_none());
        assert!(clean_profile_url("https://example.com/u/john-doe").is_none());
        assert!(clean_profile_url("not a url").is_none());
    }

    #[test]
    fn profile_slug_takes_final_path_segment() {
        assert_eq!(
            profile_slug("https://indiaultimate.org/en_in/u/john-doe"),
            Some("john-doe".to_string())
        );
        assert_eq!(
            profile_slug("https://indiaultimate.org/u/john-doe/"),
            Some("john-doe".to_string())
        );
        assert_eq!(profile_slug("https://indiaultimate.org"), None);
        assert_eq!(profile_slug("https://indiaultimate.org/"), None);
    }

    #[test]
    fn clean_gender_falls_back_to_other() {
        let lookups = Lookups::new();
        assert_eq!(clean_gender("Female", &lookups), (Gender::Female, None));
        assert_eq!(
            clean_gender("Non-binary", &lookups),
            (Gender::Other, Some("Non-binary".to_string()))
        );
    }

    #[test]
    fn clean_state_flags_unknown_regions() {
        let lookups = Lookups::new();
        assert_eq!(clean_state("Karnataka", &lookups), (Some(StateUt::Ka), false));
        assert_eq!(clean_state("N/A (I'm not in India)", &lookups), (None, true));
    }

    #[test]
    fn slugify_collapses_whitespace() {
        assert_eq!(slugify("Jane Q Doe"), "jane-q-doe");
        assert_eq!(slugify("  Jane   Doe  "), "jane-doe");
        assert_eq!(slugify("certificate (final).PDF"), "certificate-finalpdf");
    }
}
