use crate::certificates::{CertificateLookup, DriveMap};
use crate::columns::{ColumnSchema, Row};
use crate::constants::{ANNUAL_MEMBERSHIP_LABEL, VACCINATED_YES};
use crate::domain::{Account, Guardianship, Membership, Occupation, Player, Vaccination};
use crate::error::{ImportError, Result};
use crate::identity::resolve_identity;
use crate::normalize::{
    clean_gender, clean_occupation, clean_phone, clean_profile_url, clean_state, parse_date,
    slugify, Lookups,
};
use crate::storage::Storage;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Why a row was abandoned without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingEmail,
    UnparsableDob,
    DuplicateAccount,
}

/// Outcome of one input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// All entities persisted, certificate attached
    Imported,
    /// All entities persisted, no certificate attached
    ImportedWithoutMedia,
    Skipped(SkipReason),
    Failed(String),
}

/// Totals for a complete import run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub imported: usize,
    pub imported_without_media: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ImportSummary {
    pub fn record(&mut self, outcome: &RowOutcome) {
        self.total_rows += 1;
        match outcome {
            RowOutcome::Imported => self.imported += 1,
            RowOutcome::ImportedWithoutMedia => self.imported_without_media += 1,
            RowOutcome::Skipped(_) => self.skipped += 1,
            RowOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Drives one sequential pass over a registration CSV: normalization,
/// registry matching, idempotent account creation, related-entity
/// persistence, and certificate attachment.
pub struct Importer {
    storage: Arc<dyn Storage>,
    schema: ColumnSchema,
    lookups: Lookups,
    drive_map: DriveMap,
    minors: bool,
}

impl Importer {
    pub fn new(storage: Arc<dyn Storage>, minors: bool, drive_map: DriveMap) -> Self {
        Self {
            storage,
            schema: ColumnSchema::for_mode(minors),
            lookups: Lookups::new(),
            drive_map,
            minors,
        }
    }

    /// Run the import over every row of the CSV. Preconditions are fatal;
    /// per-row problems are reported and the run continues.
    #[instrument(skip(self))]
    pub async fn run(&self, csv_file: &Path) -> Result<ImportSummary> {
        if self.storage.registry_person_count().await? == 0 {
            return Err(ImportError::Precondition(
                "No registry profiles found; linking to registry profiles will not work correctly."
                    .to_string(),
            ));
        }
        if !csv_file.exists() {
            return Err(ImportError::Precondition(format!(
                "'{}' does not exist.",
                csv_file.display()
            )));
        }
        if std::fs::metadata(csv_file)?.len() == 0 {
            return Err(ImportError::Precondition(format!(
                "'{}' is empty.",
                csv_file.display()
            )));
        }

        info!("Starting member import from {}", csv_file.display());
        let mut reader = csv::Reader::from_path(csv_file)?;
        let headers = reader.headers()?.clone();

        let mut summary = ImportSummary::default();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let row = Row::new(&headers, &record);
            let outcome = match self.process_row(&row).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Row {} failed: {}", i + 1, e);
                    println!("Row {} failed: {e}", i + 1);
                    RowOutcome::Failed(e.to_string())
                }
            };
            summary.record(&outcome);
        }

        info!(
            "Import finished: {} imported, {} without media, {} skipped, {} failed",
            summary.imported, summary.imported_without_media, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    /// Process one row end to end. Skips and validation failures are normal
    /// outcomes; only storage and I/O trouble is an `Err`.
    async fn process_row(&self, row: &Row) -> Result<RowOutcome> {
        // Step 1: normalize email and profile URL, match against the registry
        let raw_email = match self.schema.email {
            Some(column) => row.get(column)?,
            None => "",
        };
        let profile_url = clean_profile_url(row.get(self.schema.profile_url)?);
        let resolved = resolve_identity(self.storage.as_ref(), profile_url, raw_email).await?;

        let first_name = row.get(self.schema.first_name)?;
        let last_name = row.get(self.schema.last_name)?;
        let name = format!("{first_name} {last_name}");

        // Step 2: no email even after resolution means the account cannot be keyed
        let email = resolved.email;
        if email.is_empty() {
            warn!("Skipping import of user with missing email: {}", slugify(&name));
            println!("Skipping import of user with missing email: {}.", slugify(&name));
            return Ok(RowOutcome::Skipped(SkipReason::MissingEmail));
        }

        // Step 3: date of birth
        let date_of_birth = match parse_date(row.get(self.schema.dob)?) {
            Some(date) => date,
            None => {
                warn!("Couldn't parse date of birth for {}", name);
                println!("Couldn't parse date of birth for {name}. Skipping.");
                return Ok(RowOutcome::Skipped(SkipReason::UnparsableDob));
            }
        };

        // Step 4: phone never fails; unrecognized forms become ""
        let phone = clean_phone(row.get(self.schema.phone)?);

        // Step 5: idempotent account creation; first row wins. Duplicates are
        // decided before any validation runs.
        let mut account = Account::new(&email, phone, first_name, last_name);
        let created = self.storage.get_or_create_account(&mut account).await?;
        if !created {
            warn!("Skipping row for existing account: {}", account.username);
            println!("Skipping row for existing account: {}.", account.username);
            return Ok(RowOutcome::Skipped(SkipReason::DuplicateAccount));
        }
        if let Err(e) = account.validate() {
            error!("Not importing {}: {}", account.username, e);
            println!("Not importing {}: {e}", account.username);
            return Ok(RowOutcome::Failed(e.to_string()));
        }
        let account_id = account.id.unwrap();

        // Step 6: construct, validate, persist the player
        let (gender, other_gender) = clean_gender(row.get(self.schema.gender)?, &self.lookups);
        let (state_ut, not_in_india) = clean_state(row.get(self.schema.state_ut)?, &self.lookups);
        let occupation = if self.minors {
            Some(Occupation::Student)
        } else {
            clean_occupation(Some(row.get(self.schema.occupation)?), &self.lookups)
        };
        let educational_institution = match self.schema.educational_institution {
            Some(column) => Some(row.get(column)?.to_string()),
            None => None,
        };

        let mut player = Player {
            id: None,
            account_id,
            date_of_birth,
            gender,
            other_gender,
            city: row.get(self.schema.city)?.to_string(),
            state_ut,
            not_in_india,
            occupation,
            educational_institution,
            external_id: resolved.person.as_ref().and_then(|p| p.id),
            team_ids: resolved.team_ids,
            imported_data: true,
        };
        if let Err(e) = player.validate() {
            error!("Not importing {}: {}", account.username, e);
            println!("Not importing {}: {e}", account.username);
            return Ok(RowOutcome::Failed(e.to_string()));
        }
        self.storage.create_player(&mut player).await?;
        let player_id = player.id.unwrap();

        // Step 7: guardian account and guardianship, minors only
        if let Some(columns) = &self.schema.guardian {
            let guardian_name = row.get(columns.name)?;
            let raw_guardian_email = row.get(columns.email)?;
            // A guardian without an email is keyed by their slugified name
            let guardian_email = if raw_guardian_email.is_empty() {
                slugify(guardian_name)
            } else {
                raw_guardian_email.to_string()
            };
            let guardian_phone = clean_phone(row.get(columns.phone)?);
            let mut names = guardian_name.split_whitespace();
            let guardian_first = names.next().unwrap_or("");
            let guardian_last = names.next().unwrap_or("");

            let mut guardian_account =
                Account::new(&guardian_email, guardian_phone, guardian_first, guardian_last);
            if let Err(e) = guardian_account.validate() {
                error!("Not importing {}: {}", account.username, e);
                println!("Not importing {}: {e}", account.username);
                return Ok(RowOutcome::Failed(e.to_string()));
            }
            self.storage.get_or_create_account(&mut guardian_account).await?;

            let relation_label = row.get(columns.relation)?;
            let relation = match self.lookups.relation(relation_label) {
                Some(relation) => relation,
                None => {
                    let message = format!("unknown guardian relation '{relation_label}'");
                    error!("Not importing {}: {}", account.username, message);
                    println!("Not importing {}: {message}", account.username);
                    return Ok(RowOutcome::Failed(message));
                }
            };
            let mut guardianship =
                Guardianship::new(guardian_account.id.unwrap(), player_id, relation);
            self.storage.create_guardianship(&mut guardianship).await?;
        }

        // Step 8: membership over the fixed program window, inactive
        let is_annual = row.get(self.schema.membership_type)? == ANNUAL_MEMBERSHIP_LABEL;
        let mut membership = Membership::new(player_id, is_annual);
        self.storage.create_membership(&mut membership).await?;

        // Step 9: vaccination, with certificate resolution when vaccinated
        let is_vaccinated = row.get(self.schema.is_vaccinated)? == VACCINATED_YES;
        let reason = row.get(self.schema.not_vaccinated_reason)?;
        let explanation = match self.schema.not_vaccinated_explanation {
            Some(column) => format!("{reason}\n{}", row.get(column)?).trim().to_string(),
            None => reason.to_string(),
        };
        let vaccine_name = self.lookups.vaccine(row.get(self.schema.vaccination_name)?);
        let mut vaccination =
            Vaccination::new(player_id, is_vaccinated, vaccine_name, explanation);
        self.storage.create_vaccination(&mut vaccination).await?;

        let mut media_upload = false;
        if is_vaccinated {
            let link = row.get(self.schema.certificate)?;
            match self.drive_map.find_certificate(link)? {
                CertificateLookup::Found(certificate) => {
                    self.storage
                        .attach_certificate(vaccination.id.unwrap(), certificate)
                        .await?;
                    media_upload = true;
                }
                CertificateLookup::Unresolved { file_id } => {
                    error!(
                        "Missing vaccination certificate for {} (file id: {})",
                        account.username, file_id
                    );
                    println!(
                        "Missing vaccination certificate: {} (file id: {file_id})",
                        account.username
                    );
                }
                CertificateLookup::NotProvided => {
                    error!("No vaccination certificate provided for {}", account.username);
                    println!("Missing vaccination certificate: {}", account.username);
                }
            }
        }

        if media_upload {
            println!("Data imported successfully.");
            Ok(RowOutcome::Imported)
        } else {
            println!("Data imported successfully (without media).");
            Ok(RowOutcome::ImportedWithoutMedia)
        }
    }
}
