use ride_share_lib::{
    ride_query::parse_ride_date, NewProvider, NewReceiver, ProfileUpdate, Provider, ProviderView,
    Receiver, RecordId, RideQuery, Role,
};

use crate::{database::db::RideDatabase, password, DataManagerError, MatchingConfig, StoreConfig};

#[derive(Clone)]
pub struct DataManager {
    pub(crate) database: RideDatabase,
    matching: MatchingConfig,
}

/// The public interface for all ride share data management.
impl DataManager {
    pub async fn start(store: &StoreConfig, matching: MatchingConfig) -> Result<Self, DataManagerError> {
        let database = RideDatabase::connect(store).await?;
        tracing::info!("Document store ready at {}", store.url);

        Ok(DataManager { database, matching })
    }

    /// Closes the store. Calls made afterwards fail with a database error.
    pub async fn close(&self) {
        self.database.close().await;
        tracing::info!("Document store closed");
    }

    /// Stores a new provider with no ride published yet.
    pub async fn register_provider(&self, form: NewProvider) -> Result<RecordId, DataManagerError> {
        let password_hash = match form.password.clone() {
            Some(password) => Some(password::hash(password).await?),
            None => None,
        };

        let provider = Provider::register(RecordId::generate(), form, password_hash);
        self.database.insert_provider(&provider).await?;

        tracing::debug!("Registered provider {}", provider.id);
        Ok(provider.id)
    }

    pub async fn get_provider(&self, provider_id: &str) -> Result<ProviderView, DataManagerError> {
        let provider_id: RecordId = provider_id.parse()?;
        self.database
            .get_provider(&provider_id)
            .await?
            .ok_or(DataManagerError::NotFound)
    }

    pub async fn get_providers(&self) -> Result<Vec<ProviderView>, DataManagerError> {
        self.database.get_providers().await
    }

    /// Overwrites the seat count. `None` clears it.
    pub async fn set_provider_seats(&self, provider_id: &str, seats_available: Option<&str>) -> Result<(), DataManagerError> {
        let provider_id: RecordId = provider_id.parse()?;
        if !self.database.set_provider_seats(&provider_id, seats_available).await? {
            return Err(DataManagerError::NotFound);
        }

        tracing::debug!("Updated seats of provider {provider_id}");
        Ok(())
    }

    /// Publishes ride details on the first provider registered with the
    /// update's email. Absent fields keep their stored values.
    pub async fn update_provider_profile(&self, update: ProfileUpdate) -> Result<(), DataManagerError> {
        let Some(email) = update.email.as_deref() else {
            return Err(DataManagerError::NotFound);
        };

        let date = match update.date.as_deref() {
            Some(raw) => Some(
                parse_ride_date(raw).ok_or_else(|| DataManagerError::InvalidInput(format!("Invalid date '{raw}'")))?,
            ),
            None => None,
        };

        let updated = self
            .database
            .update_provider_by_email(
                email,
                date,
                update.departure_time.as_deref(),
                update.pickup_location.as_deref(),
                update.seats_available.as_deref(),
            )
            .await?;

        if !updated {
            return Err(DataManagerError::NotFound);
        }

        Ok(())
    }

    /// Providers matching the query. An empty match is `NotFound` unless the
    /// matching config asks for an empty list.
    pub async fn find_rides(&self, query: &RideQuery) -> Result<Vec<ProviderView>, DataManagerError> {
        let rides = self.database.find_rides(query).await?;
        tracing::debug!("Ride search for '{}' on {} matched {} providers", query.location, query.date, rides.len());

        if rides.is_empty() && self.matching.empty_is_not_found {
            return Err(DataManagerError::NotFound);
        }

        Ok(rides)
    }

    pub async fn register_receiver(&self, form: NewReceiver) -> Result<RecordId, DataManagerError> {
        let password_hash = match form.password.clone() {
            Some(password) => Some(password::hash(password).await?),
            None => None,
        };

        let receiver = Receiver::register(RecordId::generate(), form, password_hash);
        self.database.insert_receiver(&receiver).await?;

        tracing::debug!("Registered receiver {}", receiver.id);
        Ok(receiver.id)
    }

    /// Checks the credentials against the role's collection. Accounts sharing
    /// an email are tried oldest first.
    pub async fn authenticate(&self, role: Role, email: Option<&str>, password: Option<&str>) -> Result<Role, DataManagerError> {
        let (Some(email), Some(password)) = (email, password) else {
            return Err(DataManagerError::Unauthorized);
        };

        for hash in self.database.get_password_hashes(role, email).await? {
            if password::verify(password.to_string(), hash).await? {
                return Ok(role);
            }
        }

        Err(DataManagerError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ride_share_lib::RideSearchParams;

    use super::*;
    use crate::database::constants::{PROVIDERS_TABLE_NAME, RECEIVERS_TABLE_NAME};

    async fn manager() -> DataManager {
        DataManager::start(&StoreConfig::in_memory(), MatchingConfig::default()).await.unwrap()
    }

    fn provider(name: &str, email: &str, location: &str) -> NewProvider {
        NewProvider {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some("secret".into()),
            contact: Some("0800".into()),
            location: Some(location.into()),
            closest_landmark: Some("Market".into()),
            vehicle_type: Some("Car".into()),
            vehicle_registration_number: Some("ABC-123".into()),
        }
    }

    fn publish(email: &str, date: &str, seats: &str) -> ProfileUpdate {
        ProfileUpdate {
            email: Some(email.into()),
            date: Some(date.into()),
            departure_time: Some("08:00".into()),
            pickup_location: Some("Main gate".into()),
            seats_available: Some(seats.into()),
        }
    }

    fn search(location: &str, date: &str, seats: &str) -> RideQuery {
        RideQuery::try_from(RideSearchParams {
            location: Some(location.into()),
            date: Some(date.into()),
            seats_requested: Some(seats.into()),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn registered_provider_can_be_fetched_without_credentials() {
        let manager = manager().await;
        let id = manager.register_provider(provider("Ada", "ada@example.com", "Lagos Island")).await.unwrap();

        let view = manager.get_provider(id.as_str()).await.unwrap();
        assert_eq!(view.id, id);
        assert_eq!(view.name.as_deref(), Some("Ada"));
        assert_eq!(view.contact.as_deref(), Some("0800"));
        assert_eq!(view.location.as_deref(), Some("Lagos Island"));
        assert_eq!(view.closest_landmark.as_deref(), Some("Market"));
        assert_eq!(view.vehicle_type.as_deref(), Some("Car"));
        assert_eq!(view.vehicle_registration_number.as_deref(), Some("ABC-123"));
        assert_eq!(view.date, None);
        assert_eq!(view.seats_available, None);
    }

    #[tokio::test]
    async fn passwords_are_not_stored_in_plaintext() {
        let manager = manager().await;
        let id = manager.register_provider(provider("Ada", "ada@example.com", "Lagos")).await.unwrap();

        let stored = manager.database.raw_password(&id).await.unwrap();
        assert_ne!(stored, "secret");
        assert!(stored.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn fetch_distinguishes_missing_and_malformed_ids() {
        let manager = manager().await;

        let missing = manager.get_provider(RecordId::generate().as_str()).await;
        assert!(matches!(missing, Err(DataManagerError::NotFound)));

        let malformed = manager.get_provider("not-an-id").await;
        assert!(matches!(malformed, Err(DataManagerError::InvalidIdentifier(_))));
    }

    #[tokio::test]
    async fn lists_every_provider_in_registration_order() {
        let manager = manager().await;
        assert!(manager.get_providers().await.unwrap().is_empty());

        manager.register_provider(provider("Ada", "ada@example.com", "Lagos")).await.unwrap();
        manager.register_provider(provider("Bola", "bola@example.com", "Abuja")).await.unwrap();

        let names: Vec<_> = manager
            .get_providers()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|view| view.name)
            .collect();
        assert_eq!(names, ["Ada", "Bola"]);
    }

    #[tokio::test]
    async fn seat_updates() {
        let manager = manager().await;
        let id = manager.register_provider(provider("Ada", "ada@example.com", "Lagos")).await.unwrap();

        manager.set_provider_seats(id.as_str(), Some("3")).await.unwrap();
        let view = manager.get_provider(id.as_str()).await.unwrap();
        assert_eq!(view.seats_available.as_deref(), Some("3"));

        manager.set_provider_seats(id.as_str(), None).await.unwrap();
        let view = manager.get_provider(id.as_str()).await.unwrap();
        assert_eq!(view.seats_available, None);

        let unknown = manager.set_provider_seats(RecordId::generate().as_str(), Some("3")).await;
        assert!(matches!(unknown, Err(DataManagerError::NotFound)));

        let malformed = manager.set_provider_seats("not-an-id", Some("3")).await;
        assert!(matches!(malformed, Err(DataManagerError::InvalidIdentifier(_))));
    }

    #[tokio::test]
    async fn profile_update_only_touches_supplied_fields() {
        let manager = manager().await;
        let id = manager.register_provider(provider("Ada", "ada@example.com", "Lagos")).await.unwrap();
        manager.update_provider_profile(publish("ada@example.com", "2024-05-01", "4")).await.unwrap();

        manager
            .update_provider_profile(ProfileUpdate {
                email: Some("ada@example.com".into()),
                seats_available: Some("0".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let view = manager.get_provider(id.as_str()).await.unwrap();
        assert_eq!(view.date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(view.departure_time.as_deref(), Some("08:00"));
        assert_eq!(view.pickup_location.as_deref(), Some("Main gate"));
        assert_eq!(view.seats_available.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn profile_update_targets_the_first_account_with_the_email() {
        let manager = manager().await;
        let first = manager.register_provider(provider("Ada", "shared@example.com", "Lagos")).await.unwrap();
        let second = manager.register_provider(provider("Bola", "shared@example.com", "Lagos")).await.unwrap();

        manager.update_provider_profile(publish("shared@example.com", "2024-05-01", "2")).await.unwrap();

        let first = manager.get_provider(first.as_str()).await.unwrap();
        let second = manager.get_provider(second.as_str()).await.unwrap();
        assert_eq!(first.seats_available.as_deref(), Some("2"));
        assert_eq!(second.seats_available, None);
    }

    #[tokio::test]
    async fn profile_update_failures() {
        let manager = manager().await;
        manager.register_provider(provider("Ada", "ada@example.com", "Lagos")).await.unwrap();

        let unknown = manager.update_provider_profile(publish("nobody@example.com", "2024-05-01", "2")).await;
        assert!(matches!(unknown, Err(DataManagerError::NotFound)));

        let no_email = manager.update_provider_profile(ProfileUpdate::default()).await;
        assert!(matches!(no_email, Err(DataManagerError::NotFound)));

        let bad_date = manager.update_provider_profile(publish("ada@example.com", "soon", "2")).await;
        assert!(matches!(bad_date, Err(DataManagerError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn ride_matching_filters_location_date_and_seats() {
        let manager = manager().await;
        for (name, email, location, date, seats) in [
            ("Ada", "ada@example.com", "Lagos Island", "2024-05-01", "3"),
            ("Bola", "bola@example.com", "lagos mainland", "2024-05-01", "10"),
            ("Chi", "chi@example.com", "Lagos", "2024-05-01", "1"),
            ("Dayo", "dayo@example.com", "Lagos", "2024-05-02", "4"),
            ("Eze", "eze@example.com", "Abuja", "2024-05-01", "4"),
        ] {
            manager.register_provider(provider(name, email, location)).await.unwrap();
            manager.update_provider_profile(publish(email, date, seats)).await.unwrap();
        }
        // Registered but never published a ride
        manager.register_provider(provider("Femi", "femi@example.com", "Lagos")).await.unwrap();

        let names: Vec<_> = manager
            .find_rides(&search("LAGOS", "2024-05-01", "2"))
            .await
            .unwrap()
            .into_iter()
            .filter_map(|view| view.name)
            .collect();

        // "10" >= "2" only holds numerically
        assert_eq!(names, ["Ada", "Bola"]);
    }

    #[tokio::test]
    async fn location_is_matched_literally() {
        let manager = manager().await;
        manager.register_provider(provider("Ada", "ada@example.com", "Lagos")).await.unwrap();
        manager.update_provider_profile(publish("ada@example.com", "2024-05-01", "3")).await.unwrap();

        let result = manager.find_rides(&search("La.os", "2024-05-01", "1")).await;
        assert!(matches!(result, Err(DataManagerError::NotFound)));
    }

    #[tokio::test]
    async fn location_case_folding_covers_non_ascii_text() {
        let manager = manager().await;
        manager.register_provider(provider("Ada", "ada@example.com", "Zürich Hbf")).await.unwrap();
        manager.update_provider_profile(publish("ada@example.com", "2024-05-01", "3")).await.unwrap();

        for location in ["zürich", "ZÜRICH", "Zürich Hbf"] {
            let rides = manager.find_rides(&search(location, "2024-05-01", "1")).await.unwrap();
            assert_eq!(rides.len(), 1, "{location}");
        }
    }

    #[tokio::test]
    async fn non_numeric_seat_counts_never_match() {
        let manager = manager().await;
        manager.register_provider(provider("Ada", "ada@example.com", "Lagos")).await.unwrap();
        manager.update_provider_profile(publish("ada@example.com", "2024-05-01", "full")).await.unwrap();

        let result = manager.find_rides(&search("Lagos", "2024-05-01", "0")).await;
        assert!(matches!(result, Err(DataManagerError::NotFound)));

        manager.update_provider_profile(publish("ada@example.com", "2024-05-01", "0")).await.unwrap();
        let rides = manager.find_rides(&search("Lagos", "2024-05-01", "0")).await.unwrap();
        assert_eq!(rides.len(), 1);
    }

    #[tokio::test]
    async fn empty_match_policy_is_configurable() {
        let strict = manager().await;
        let result = strict.find_rides(&search("Lagos", "2024-05-01", "1")).await;
        assert!(matches!(result, Err(DataManagerError::NotFound)));

        let lenient = DataManager::start(
            &StoreConfig::in_memory(),
            MatchingConfig { empty_is_not_found: false },
        )
        .await
        .unwrap();
        assert!(lenient.find_rides(&search("Lagos", "2024-05-01", "1")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn receivers_are_stored() {
        let manager = manager().await;
        manager
            .register_receiver(NewReceiver {
                name: Some("Tunde".into()),
                email: Some("tunde@example.com".into()),
                password: Some("secret".into()),
                vehicle_type_preference: Some("Bus".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(manager.database.count(RECEIVERS_TABLE_NAME).await, 1);
        assert_eq!(manager.database.count(PROVIDERS_TABLE_NAME).await, 0);
    }

    #[tokio::test]
    async fn authentication_checks_the_role_collection() {
        let manager = manager().await;
        manager.register_provider(provider("Ada", "ada@example.com", "Lagos")).await.unwrap();

        let ok = manager.authenticate(Role::Provider, Some("ada@example.com"), Some("secret")).await;
        assert_eq!(ok.unwrap(), Role::Provider);

        let wrong_password = manager.authenticate(Role::Provider, Some("ada@example.com"), Some("nope")).await;
        assert!(matches!(wrong_password, Err(DataManagerError::Unauthorized)));

        let wrong_role = manager.authenticate(Role::Receiver, Some("ada@example.com"), Some("secret")).await;
        assert!(matches!(wrong_role, Err(DataManagerError::Unauthorized)));

        let missing = manager.authenticate(Role::Provider, Some("ada@example.com"), None).await;
        assert!(matches!(missing, Err(DataManagerError::Unauthorized)));
    }

    #[tokio::test]
    async fn authentication_tries_every_account_with_the_email() {
        let manager = manager().await;
        manager.register_provider(provider("Ada", "shared@example.com", "Lagos")).await.unwrap();
        manager
            .register_provider(NewProvider {
                password: Some("other".into()),
                ..provider("Bola", "shared@example.com", "Lagos")
            })
            .await
            .unwrap();

        let role = manager.authenticate(Role::Provider, Some("shared@example.com"), Some("other")).await;
        assert_eq!(role.unwrap(), Role::Provider);
    }

    #[tokio::test]
    async fn closed_store_reports_database_errors() {
        let manager = manager().await;
        manager.close().await;

        let result = manager.get_providers().await;
        assert!(matches!(result, Err(DataManagerError::Database(_))));
    }
}
