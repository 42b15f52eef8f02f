use crate::domain::RegistryPerson;
use crate::error::Result;
use crate::normalize::profile_slug;
use crate::storage::Storage;
use std::collections::BTreeSet;
use tracing::debug;
use uuid::Uuid;

/// Outcome of matching a row against the upstream registry
#[derive(Debug, Clone)]
pub struct ResolvedIdentity {
    pub person: Option<RegistryPerson>,
    /// Row email, backfilled from the matched person when the row had none
    pub email: String,
    /// Deduplicated team associations of the matched person
    pub team_ids: Vec<Uuid>,
}

/// Match a row to a registry person: by profile-URL slug when a cleaned
/// profile URL is present, otherwise by exact email. No match is a normal
/// outcome, never an error.
pub async fn resolve_identity(
    storage: &dyn Storage,
    profile_url: Option<&str>,
    email: &str,
) -> Result<ResolvedIdentity> {
    let person = if let Some(slug) = profile_url.and_then(profile_slug) {
        let person = storage.get_registry_person_by_slug(&slug).await?;
        debug!(slug = %slug, matched = person.is_some(), "Registry lookup by slug");
        person
    } else if !email.is_empty() {
        let person = storage.get_registry_person_by_email(email).await?;
        debug!(matched = person.is_some(), "Registry lookup by email");
        person
    } else {
        None
    };

    let email = if email.is_empty() {
        person.as_ref().map(|p| p.email.clone()).unwrap_or_default()
    } else {
        email.to_string()
    };

    let team_ids = match person.as_ref().and_then(|p| p.id) {
        Some(person_id) => {
            let ids: BTreeSet<Uuid> =
                storage.get_team_ids_for_person(person_id).await?.into_iter().collect();
            ids.into_iter().collect()
        }
        None => Vec::new(),
    };

    Ok(ResolvedIdentity {
        person,
        email,
        team_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    fn person(slug: &str, email: &str) -> RegistryPerson {
        RegistryPerson {
            id: None,
            slug: slug.to_string(),
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "Person".to_string(),
        }
    }

    #[tokio::test]
    async fn slug_match_backfills_email_and_teams() {
        let storage = InMemoryStorage::new();
        let person_id = storage.seed_registry_person(person("jane-doe", "jane@example.com"));
        let team = Uuid::new_v4();
        storage.seed_team_registration(person_id, team);
        storage.seed_team_registration(person_id, team);

        let resolved = resolve_identity(
            &storage,
            Some("https://indiaultimate.org/u/jane-doe"),
            "",
        )
        .await
        .unwrap();

        assert_eq!(resolved.email, "jane@example.com");
        assert_eq!(resolved.team_ids, vec![team]);
        assert!(resolved.person.is_some());
    }

    #[tokio::test]
    async fn ambiguous_email_is_no_match() {
        let storage = InMemoryStorage::new();
        storage.seed_registry_person(person("jane-doe", "shared@example.com"));
        storage.seed_registry_person(person("janet-doe", "shared@example.com"));

        let resolved = resolve_identity(&storage, None, "shared@example.com")
            .await
            .unwrap();

        assert!(resolved.person.is_none());
        assert!(resolved.team_ids.is_empty());
        assert_eq!(resolved.email, "shared@example.com");
    }

    #[tokio::test]
    async fn unknown_slug_leaves_row_unlinked() {
        let storage = InMemoryStorage::new();
        storage.seed_registry_person(person("jane-doe", "jane@example.com"));

        let resolved = resolve_identity(
            &storage,
            Some("https://indiaultimate.org/u/nobody"),
            "someone@example.com",
        )
        .await
        .unwrap();

        assert!(resolved.person.is_none());
        assert_eq!(resolved.email, "someone@example.com");
    }
}
