use crate::domain::{
    Account, CertificateFile, Guardianship, Membership, Player, RegistryPerson, TeamRegistration,
    Vaccination,
};
use crate::error::{ImportError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// Storage trait for the entity stores the importer writes to, plus the
/// read-only registry it reconciles against.
#[async_trait]
pub trait Storage: Send + Sync {
    // Registry lookups (read-only)
    async fn registry_person_count(&self) -> Result<usize>;
    async fn get_registry_person_by_slug(&self, slug: &str) -> Result<Option<RegistryPerson>>;
    /// Exact-email lookup. An email shared by more than one registry person
    /// is treated as no match.
    async fn get_registry_person_by_email(&self, email: &str) -> Result<Option<RegistryPerson>>;
    async fn get_team_ids_for_person(&self, person_id: Uuid) -> Result<Vec<Uuid>>;

    // Account operations
    /// Return an existing account with the same username, or create this
    /// one. Returns true when the account was created.
    async fn get_or_create_account(&self, account: &mut Account) -> Result<bool>;

    // Player / related-entity operations
    async fn create_player(&self, player: &mut Player) -> Result<()>;
    async fn create_guardianship(&self, guardianship: &mut Guardianship) -> Result<()>;
    async fn create_membership(&self, membership: &mut Membership) -> Result<()>;
    async fn create_vaccination(&self, vaccination: &mut Vaccination) -> Result<()>;
    async fn attach_certificate(
        &self,
        vaccination_id: Uuid,
        certificate: CertificateFile,
    ) -> Result<()>;
}

/// In-memory storage implementation for development/testing
pub struct InMemoryStorage {
    registry_people: Arc<Mutex<HashMap<Uuid, RegistryPerson>>>,
    team_registrations: Arc<Mutex<Vec<TeamRegistration>>>,
    accounts: Arc<Mutex<HashMap<Uuid, Account>>>,
    players: Arc<Mutex<HashMap<Uuid, Player>>>,
    guardianships: Arc<Mutex<HashMap<Uuid, Guardianship>>>,
    memberships: Arc<Mutex<HashMap<Uuid, Membership>>>,
    vaccinations: Arc<Mutex<HashMap<Uuid, Vaccination>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            registry_people: Arc::new(Mutex::new(HashMap::new())),
            team_registrations: Arc::new(Mutex::new(Vec::new())),
            accounts: Arc::new(Mutex::new(HashMap::new())),
            players: Arc::new(Mutex::new(HashMap::new())),
            guardianships: Arc::new(Mutex::new(HashMap::new())),
            memberships: Arc::new(Mutex::new(HashMap::new())),
            vaccinations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a registry person, returning its assigned id
    pub fn seed_registry_person(&self, mut person: RegistryPerson) -> Uuid {
        let id = Uuid::new_v4();
        person.id = Some(id);
        self.registry_people.lock().unwrap().insert(id, person);
        id
    }

    pub fn seed_team_registration(&self, person_id: Uuid, team_id: Uuid) {
        self.team_registrations.lock().unwrap().push(TeamRegistration {
            id: Some(Uuid::new_v4()),
            person_id,
            team_id,
        });
    }

    pub fn account_by_username(&self, username: &str) -> Option<Account> {
        let accounts = self.accounts.lock().unwrap();
        accounts.values().find(|a| a.username == username).cloned()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn player_for_account(&self, account_id: Uuid) -> Option<Player> {
        let players = self.players.lock().unwrap();
        players.values().find(|p| p.account_id == account_id).cloned()
    }

    pub fn player_count(&self) -> usize {
        self.players.lock().unwrap().len()
    }

    pub fn guardianship_for_player(&self, player_id: Uuid) -> Option<Guardianship> {
        let guardianships = self.guardianships.lock().unwrap();
        guardianships.values().find(|g| g.player_id == player_id).cloned()
    }

    pub fn membership_for_player(&self, player_id: Uuid) -> Option<Membership> {
        let memberships = self.memberships.lock().unwrap();
        memberships.values().find(|m| m.player_id == player_id).cloned()
    }

    pub fn membership_count(&self) -> usize {
        self.memberships.lock().unwrap().len()
    }

    pub fn vaccination_for_player(&self, player_id: Uuid) -> Option<Vaccination> {
        let vaccinations = self.vaccinations.lock().unwrap();
        vaccinations.values().find(|v| v.player_id == player_id).cloned()
    }

    pub fn vaccination_count(&self) -> usize {
        self.vaccinations.lock().unwrap().len()
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn registry_person_count(&self) -> Result<usize> {
        Ok(self.registry_people.lock().unwrap().len())
    }

    async fn get_registry_person_by_slug(&self, slug: &str) -> Result<Option<RegistryPerson>> {
        let people = self.registry_people.lock().unwrap();
        Ok(people.values().find(|p| p.slug == slug).cloned())
    }

    async fn get_registry_person_by_email(&self, email: &str) -> Result<Option<RegistryPerson>> {
        let people = self.registry_people.lock().unwrap();
        let mut matches = people.values().filter(|p| p.email == email);
        let first = matches.next().cloned();
        // Ambiguous email means no match, not an error
        if matches.next().is_some() {
            return Ok(None);
        }
        Ok(first)
    }

    async fn get_team_ids_for_person(&self, person_id: Uuid) -> Result<Vec<Uuid>> {
        let registrations = self.team_registrations.lock().unwrap();
        Ok(registrations
            .iter()
            .filter(|r| r.person_id == person_id)
            .map(|r| r.team_id)
            .collect())
    }

    async fn get_or_create_account(&self, account: &mut Account) -> Result<bool> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(existing) = accounts.values().find(|a| a.username == account.username) {
            debug!("Found existing account: {}", existing.username);
            *account = existing.clone();
            return Ok(false);
        }

        let id = Uuid::new_v4();
        account.id = Some(id);
        accounts.insert(id, account.clone());

        debug!("Created account: {} with id {}", account.username, id);
        Ok(true)
    }

    async fn create_player(&self, player: &mut Player) -> Result<()> {
        let id = Uuid::new_v4();
        player.id = Some(id);

        let mut players = self.players.lock().unwrap();
        players.insert(id, player.clone());

        debug!("Created player for account {} with id {}", player.account_id, id);
        Ok(())
    }

    async fn create_guardianship(&self, guardianship: &mut Guardianship) -> Result<()> {
        let id = Uuid::new_v4();
        guardianship.id = Some(id);

        let mut guardianships = self.guardianships.lock().unwrap();
        guardianships.insert(id, guardianship.clone());

        debug!("Created guardianship for player {} with id {}", guardianship.player_id, id);
        Ok(())
    }

    async fn create_membership(&self, membership: &mut Membership) -> Result<()> {
        let id = Uuid::new_v4();
        membership.id = Some(id);

        let mut memberships = self.memberships.lock().unwrap();
        memberships.insert(id, membership.clone());

        debug!("Created membership {} with id {}", membership.membership_number, id);
        Ok(())
    }

    async fn create_vaccination(&self, vaccination: &mut Vaccination) -> Result<()> {
        let id = Uuid::new_v4();
        vaccination.id = Some(id);

        let mut vaccinations = self.vaccinations.lock().unwrap();
        vaccinations.insert(id, vaccination.clone());

        debug!("Created vaccination for player {} with id {}", vaccination.player_id, id);
        Ok(())
    }

    async fn attach_certificate(
        &self,
        vaccination_id: Uuid,
        certificate: CertificateFile,
    ) -> Result<()> {
        let mut vaccinations = self.vaccinations.lock().unwrap();
        let vaccination = vaccinations.get_mut(&vaccination_id).ok_or_else(|| {
            ImportError::Storage(format!("no vaccination with id {vaccination_id}"))
        })?;
        debug!("Attached certificate {} to vaccination {}", certificate.name, vaccination_id);
        vaccination.certificate = Some(certificate);
        Ok(())
    }
}
