use crate::error::{ImportError, Result};
use std::collections::HashMap;

/// Guardian columns, present only in the minors layout
#[derive(Debug, Clone, Copy)]
pub struct GuardianColumns {
    pub email: &'static str,
    pub phone: &'static str,
    pub name: &'static str,
    pub relation: &'static str,
}

/// Maps logical fields to the raw column headers of one registration form
/// layout. Selected once per run; the guardian block and the explanation
/// column double as the adult/minor branch markers.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSchema {
    pub email: Option<&'static str>,
    pub phone: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub dob: &'static str,
    pub gender: &'static str,
    pub city: &'static str,
    pub state_ut: &'static str,
    pub occupation: &'static str,
    pub educational_institution: Option<&'static str>,
    pub profile_url: &'static str,
    pub guardian: Option<GuardianColumns>,
    pub membership_type: &'static str,
    pub is_vaccinated: &'static str,
    pub vaccination_name: &'static str,
    pub not_vaccinated_reason: &'static str,
    pub not_vaccinated_explanation: Option<&'static str>,
    pub certificate: &'static str,
}

impl ColumnSchema {
    /// Layout of the adult registration form
    pub fn adults() -> Self {
        Self {
            email: Some("Personal Email ID"),
            phone: "Personal Phone Number",
            first_name: "First/Given Name",
            last_name: "Last Name or Initial",
            dob: "Date of Birth",
            gender: "Gender",
            city: "City",
            state_ut: "State / UT (in India)",
            occupation: "Occupation",
            educational_institution: None,
            profile_url:
                "Please add the link (URL) to your www.indiaultimate.org Profile here",
            guardian: None,
            membership_type: "Type of UPAI Membership",
            is_vaccinated: "Are you fully vaccinated against Covid-19?",
            vaccination_name: "Name of the vaccination",
            not_vaccinated_reason: "Please select/mention your reasons",
            not_vaccinated_explanation: Some(
                "Please give an explanation to your selected reasons for not being \
                 vaccinated against Covid-19",
            ),
            certificate: "Upload your final (full) vaccination Certificate here",
        }
    }

    /// Layout of the minors registration form; the respondent email comes
    /// from identity resolution, never from a column.
    pub fn minors() -> Self {
        Self {
            email: None,
            phone: "Personal  phone number of the Minor",
            first_name: "First/Given Name of Minor",
            last_name: "Last Name or Initial of Minor",
            dob: "Date of Birth of the Minor",
            gender: "Gender of the Minor",
            city: "City of residence of the Minor",
            state_ut: "State / UT (in India)",
            occupation: "Occupation",
            educational_institution: Some(
                "Name of the educational institution the Minor is associated with",
            ),
            profile_url:
                "Please add the link to your son/ daughter or ward's  www.indiaultimate.org \
                 Profile here",
            guardian: Some(GuardianColumns {
                email: "Personal Email ID of the parent/ guardian",
                phone: "Personal Phone Number of the parent/ guardian",
                name: "Name of parent/ guardian of the Minor",
                relation: "Relationship with the minor",
            }),
            membership_type:
                "Type of UPAI Membership you are opting for your son/ daughter or ward",
            is_vaccinated: "Is your son/ daughter or ward fully vaccinated against Covid-19?",
            vaccination_name: "Name of the Vaccination",
            not_vaccinated_reason:
                "If your son/ daughter or ward is NOT Vaccinated, please share reasons below",
            not_vaccinated_explanation: None,
            certificate:
                "Upload the final (full) vaccination Certificate of your son/ daughter or ward \
                 (if applicable)",
        }
    }

    pub fn for_mode(minors: bool) -> Self {
        if minors {
            Self::minors()
        } else {
            Self::adults()
        }
    }
}

/// One input row, keyed by trimmed column header with trimmed cell values
#[derive(Debug, Clone)]
pub struct Row {
    values: HashMap<String, String>,
}

impl Row {
    pub fn new(headers: &csv::StringRecord, record: &csv::StringRecord) -> Self {
        let values = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { values }
    }

    /// Look up a cell by header; a header missing from the input table is a
    /// row-fatal error.
    pub fn get(&self, header: &str) -> Result<&str> {
        self.values
            .get(header)
            .map(String::as_str)
            .ok_or_else(|| ImportError::MissingColumn(header.to_string()))
    }
}
