use crate::constants::{MEMBERSHIP_END, MEMBERSHIP_START};
use crate::error::{ImportError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender of a player, with an "Other" free-text fallback on the player record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Indian states and union territories, as offered by the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateUt {
    An,
    Ap,
    Ar,
    As,
    Br,
    Cdg,
    Cg,
    Dnh,
    Dd,
    Dl,
    Ga,
    Gj,
    Hr,
    Hp,
    Jk,
    Jh,
    Ka,
    Kl,
    Lk,
    Ld,
    Mp,
    Mh,
    Mn,
    Ml,
    Mz,
    Nl,
    Or,
    Py,
    Pb,
    Rj,
    Sk,
    Tn,
    Tl,
    Tr,
    Up,
    Uk,
    Wb,
}

impl StateUt {
    pub const ALL: [StateUt; 37] = [
        StateUt::An,
        StateUt::Ap,
        StateUt::Ar,
        StateUt::As,
        StateUt::Br,
        StateUt::Cdg,
        StateUt::Cg,
        StateUt::Dnh,
        StateUt::Dd,
        StateUt::Dl,
        StateUt::Ga,
        StateUt::Gj,
        StateUt::Hr,
        StateUt::Hp,
        StateUt::Jk,
        StateUt::Jh,
        StateUt::Ka,
        StateUt::Kl,
        StateUt::Lk,
        StateUt::Ld,
        StateUt::Mp,
        StateUt::Mh,
        StateUt::Mn,
        StateUt::Ml,
        StateUt::Mz,
        StateUt::Nl,
        StateUt::Or,
        StateUt::Py,
        StateUt::Pb,
        StateUt::Rj,
        StateUt::Sk,
        StateUt::Tn,
        StateUt::Tl,
        StateUt::Tr,
        StateUt::Up,
        StateUt::Uk,
        StateUt::Wb,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StateUt::An => "Andaman and Nicobar Islands",
            StateUt::Ap => "Andhra Pradesh",
            StateUt::Ar => "Arunachal Pradesh",
            StateUt::As => "Assam",
            StateUt::Br => "Bihar",
            StateUt::Cdg => "Chandigarh",
            StateUt::Cg => "Chhattisgarh",
            StateUt::Dnh => "Dadra and Nagar Haveli",
            StateUt::Dd => "Daman and Diu",
            StateUt::Dl => "Delhi",
            StateUt::Ga => "Goa",
            StateUt::Gj => "Gujarat",
            StateUt::Hr => "Haryana",
            StateUt::Hp => "Himachal Pradesh",
            StateUt::Jk => "Jammu and Kashmir",
            StateUt::Jh => "Jharkhand",
            StateUt::Ka => "Karnataka",
            StateUt::Kl => "Kerala",
            StateUt::Lk => "Ladakh",
            StateUt::Ld => "Lakshadweep",
            StateUt::Mp => "Madhya Pradesh",
            StateUt::Mh => "Maharashtra",
            StateUt::Mn => "Manipur",
            StateUt::Ml => "Meghalaya",
            StateUt::Mz => "Mizoram",
            StateUt::Nl => "Nagaland",
            StateUt::Or => "Odisha",
            StateUt::Py => "Puducherry",
            StateUt::Pb => "Punjab",
            StateUt::Rj => "Rajasthan",
            StateUt::Sk => "Sikkim",
            StateUt::Tn => "Tamil Nadu",
            StateUt::Tl => "Telangana",
            StateUt::Tr => "Tripura",
            StateUt::Up => "Uttar Pradesh",
            StateUt::Uk => "Uttarakhand",
            StateUt::Wb => "West Bengal",
        }
    }
}

/// Occupation of an adult player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupation {
    Student,
    Business,
    Government,
    NonProfit,
    Other,
    Unemployed,
}

impl Occupation {
    pub const ALL: [Occupation; 6] = [
        Occupation::Student,
        Occupation::Business,
        Occupation::Government,
        Occupation::NonProfit,
        Occupation::Other,
        Occupation::Unemployed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Occupation::Student => "Student",
            Occupation::Business => "Own business",
            Occupation::Government => "Government",
            Occupation::NonProfit => "NGO / NPO",
            Occupation::Other => "Other",
            Occupation::Unemployed => "Unemployed",
        }
    }
}

/// Relation of a guardian to a minor player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Mother,
    Father,
    LegalGuardian,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::Mother, Relation::Father, Relation::LegalGuardian];

    pub fn label(&self) -> &'static str {
        match self {
            Relation::Mother => "Mother",
            Relation::Father => "Father",
            Relation::LegalGuardian => "Legal Guardian",
        }
    }
}

/// Recognized vaccine names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaccineName {
    Covishield,
    Covaxin,
    Moderna,
    Sputnik,
    JohnsonAndJohnson,
}

impl VaccineName {
    pub const ALL: [VaccineName; 5] = [
        VaccineName::Covishield,
        VaccineName::Covaxin,
        VaccineName::Moderna,
        VaccineName::Sputnik,
        VaccineName::JohnsonAndJohnson,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VaccineName::Covishield => "Covishield",
            VaccineName::Covaxin => "Covaxin",
            VaccineName::Moderna => "Moderna",
            VaccineName::Sputnik => "Sputnik",
            VaccineName::JohnsonAndJohnson => "Johnson & Johnson",
        }
    }
}

/// A user account in the system; `username` is the lowercased email and the
/// sole idempotency key for imports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Option<Uuid>,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
}

impl Account {
    /// Create a new account keyed by the lowercased email
    pub fn new(email: &str, phone: String, first_name: &str, last_name: &str) -> Self {
        let email = email.to_lowercase();
        Self {
            id: None,
            username: email.clone(),
            email,
            phone,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(ImportError::Validation {
                entity: "account",
                message: "username must not be empty".to_string(),
            });
        }
        if self.phone.len() > 20 {
            return Err(ImportError::Validation {
                entity: "account",
                message: format!("phone too long: {}", self.phone),
            });
        }
        Ok(())
    }
}

/// A player profile owned by one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<Uuid>,
    pub account_id: Uuid,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub other_gender: Option<String>,
    pub city: String,
    pub state_ut: Option<StateUt>,
    pub not_in_india: bool,
    pub occupation: Option<Occupation>,
    pub educational_institution: Option<String>,
    pub external_id: Option<Uuid>,
    pub team_ids: Vec<Uuid>,
    pub imported_data: bool,
}

impl Player {
    pub fn validate(&self) -> Result<()> {
        if self.city.is_empty() {
            return Err(ImportError::Validation {
                entity: "player",
                message: "city must not be empty".to_string(),
            });
        }
        if self.city.len() > 100 {
            return Err(ImportError::Validation {
                entity: "player",
                message: format!("city too long: {}", self.city),
            });
        }
        if let Some(institution) = &self.educational_institution {
            if institution.len() > 100 {
                return Err(ImportError::Validation {
                    entity: "player",
                    message: format!("educational institution too long: {institution}"),
                });
            }
        }
        Ok(())
    }
}

/// Links a guardian account to a minor player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guardianship {
    pub id: Option<Uuid>,
    pub account_id: Uuid,
    pub player_id: Uuid,
    pub relation: Relation,
}

impl Guardianship {
    pub fn new(account_id: Uuid, player_id: Uuid, relation: Relation) -> Self {
        Self {
            id: None,
            account_id,
            player_id,
            relation,
        }
    }
}

/// An annual or event membership owned by one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub id: Option<Uuid>,
    pub player_id: Uuid,
    pub membership_number: String,
    pub is_annual: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl Membership {
    /// Create a membership over the fixed program window, inactive until paid
    pub fn new(player_id: Uuid, is_annual: bool) -> Self {
        let (sy, sm, sd) = MEMBERSHIP_START;
        let (ey, em, ed) = MEMBERSHIP_END;
        Self {
            id: None,
            player_id,
            membership_number: Uuid::new_v4().to_string()[..8].to_string(),
            is_annual,
            start_date: NaiveDate::from_ymd_opt(sy, sm, sd).unwrap(),
            end_date: NaiveDate::from_ymd_opt(ey, em, ed).unwrap(),
            is_active: false,
        }
    }
}

/// A certificate file resolved from the drive map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateFile {
    pub name: String,
    pub content: Vec<u8>,
}

/// Vaccination status of one player, with an optional certificate file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vaccination {
    pub id: Option<Uuid>,
    pub player_id: Uuid,
    pub is_vaccinated: bool,
    pub name: Option<VaccineName>,
    pub explain_not_vaccinated: String,
    pub certificate: Option<CertificateFile>,
}

impl Vaccination {
    pub fn new(
        player_id: Uuid,
        is_vaccinated: bool,
        name: Option<VaccineName>,
        explain_not_vaccinated: String,
    ) -> Self {
        Self {
            id: None,
            player_id,
            is_vaccinated,
            name,
            explain_not_vaccinated,
            certificate: None,
        }
    }
}

/// A person known to the upstream membership registry. Read-only for the
/// importer; matched by slug or email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryPerson {
    pub id: Option<Uuid>,
    pub slug: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A registry-side record of a person playing for a team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRegistration {
    pub id: Option<Uuid>,
    pub person_id: Uuid,
    pub team_id: Uuid,
}
