use std::str::FromStr;

use chrono::NaiveDate;
use const_format::concatcp;
use ride_share_lib::{Provider, ProviderView, Receiver, RecordId, RideQuery, Role};
use sqlx::{
    query, query_as, query_scalar,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Executor, Pool, Sqlite,
};

use crate::{DataManagerError, StoreConfig};

use super::constants::*;

const PROVIDER_VIEW_COLUMNS: &str = concatcp!(
    PROVIDER_ID, " AS id, ",
    NAME, ", ",
    CONTACT, ", ",
    LOCATION, ", ",
    CLOSEST_LANDMARK, ", ",
    VEHICLE_TYPE, ", ",
    VEHICLE_REGISTRATION_NUMBER, " AS vehicle_registration_number, ",
    DATE, ", ",
    DEPARTURE_TIME, ", ",
    PICKUP_LOCATION, ", ",
    SEATS_AVAILABLE
);

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DataManagerError {
    move |err| {
        tracing::debug!("{context}: {err}");
        DataManagerError::Database(format!("{context}: {err}"))
    }
}

/// The document store: one table per collection, every field nullable.
#[derive(Clone)]
pub struct RideDatabase {
    pool: Pool<Sqlite>,
}

impl RideDatabase {
    pub async fn connect(config: &StoreConfig) -> Result<Self, DataManagerError> {
        let pool = if config.is_in_memory() {
            let options = SqliteConnectOptions::from_str(&config.url)
                .map_err(db_error("Invalid database url"))?;

            // An in-memory database lives exactly as long as its connection
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
                .map_err(db_error("Failed to connect to database"))?
        } else {
            let file = config.database_file();
            if let Some(dir) = file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(dir).await.map_err(|err| {
                    DataManagerError::Database(format!("Failed to create data directory {dir:?}: {err}"))
                })?;
            }

            let options = SqliteConnectOptions::new()
                .filename(&file)
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(config.max_connections.max(1))
                .connect_with(options)
                .await
                .map_err(db_error("Failed to connect to database"))?
        };

        let db = Self { pool };

        db.init().await?;

        Ok(db)
    }

    pub async fn init(&self) -> Result<(), DataManagerError> {
        self.pool.execute(concatcp!("
            CREATE TABLE IF NOT EXISTS ", PROVIDERS_TABLE_NAME, "(",
                PROVIDER_ID,                 " TEXT PRIMARY KEY NOT NULL,",
                NAME,                        " TEXT,",
                EMAIL,                       " TEXT,",
                PASSWORD,                    " TEXT,",
                CONTACT,                     " TEXT,",
                LOCATION,                    " TEXT,",
                CLOSEST_LANDMARK,            " TEXT,",
                VEHICLE_TYPE,                " TEXT,",
                VEHICLE_REGISTRATION_NUMBER, " TEXT,",
                DATE,                        " TEXT,",
                DEPARTURE_TIME,              " TEXT,",
                PICKUP_LOCATION,             " TEXT,",
                SEATS_AVAILABLE,             " TEXT);

            CREATE TABLE IF NOT EXISTS ", RECEIVERS_TABLE_NAME, "(",
                RECEIVER_ID,             " TEXT PRIMARY KEY NOT NULL,",
                NAME,                    " TEXT,",
                EMAIL,                   " TEXT,",
                PASSWORD,                " TEXT,",
                CONTACT,                 " TEXT,",
                LOCATION,                " TEXT,",
                CLOSEST_LANDMARK,        " TEXT,",
                VEHICLE_TYPE_PREFERENCE, " TEXT)"))
            .await
            .map_err(db_error("Failed to create collections"))
            .map(|_| ())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn insert_provider(&self, provider: &Provider) -> Result<(), DataManagerError> {
        query(concatcp!("
            INSERT INTO ", PROVIDERS_TABLE_NAME, "(",
            PROVIDER_ID, ", ", NAME, ", ", EMAIL, ", ", PASSWORD, ", ", CONTACT, ", ", LOCATION, ", ",
            CLOSEST_LANDMARK, ", ", VEHICLE_TYPE, ", ", VEHICLE_REGISTRATION_NUMBER, ", ", DATE, ", ",
            DEPARTURE_TIME, ", ", PICKUP_LOCATION, ", ", SEATS_AVAILABLE, ")
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"))
            .bind(provider.id.as_str())
            .bind(&provider.name)
            .bind(&provider.email)
            .bind(&provider.password_hash)
            .bind(&provider.contact)
            .bind(&provider.location)
            .bind(&provider.closest_landmark)
            .bind(&provider.vehicle_type)
            .bind(&provider.vehicle_registration_number)
            .bind(provider.date)
            .bind(&provider.departure_time)
            .bind(&provider.pickup_location)
            .bind(&provider.seats_available)
            .execute(&self.pool).await
            .map_err(db_error("Failed to insert provider"))
            .map(|_| ())
    }

    pub async fn get_provider(&self, provider_id: &RecordId) -> Result<Option<ProviderView>, DataManagerError> {
        query_as::<_, ProviderView>(concatcp!(
            "SELECT ", PROVIDER_VIEW_COLUMNS, " FROM ", PROVIDERS_TABLE_NAME, " WHERE ", PROVIDER_ID, " = ?1"))
            .bind(provider_id.as_str())
            .fetch_optional(&self.pool).await
            .map_err(db_error("Failed to get provider"))
    }

    pub async fn get_providers(&self) -> Result<Vec<ProviderView>, DataManagerError> {
        query_as::<_, ProviderView>(concatcp!(
            "SELECT ", PROVIDER_VIEW_COLUMNS, " FROM ", PROVIDERS_TABLE_NAME, " ORDER BY rowid"))
            .fetch_all(&self.pool).await
            .map_err(db_error("Failed to get providers"))
    }

    /// Returns whether a provider was updated.
    pub async fn set_provider_seats(&self, provider_id: &RecordId, seats_available: Option<&str>) -> Result<bool, DataManagerError> {
        query(concatcp!("UPDATE ", PROVIDERS_TABLE_NAME, " SET ", SEATS_AVAILABLE, " = ?1 WHERE ", PROVIDER_ID, " = ?2"))
            .bind(seats_available)
            .bind(provider_id.as_str())
            .execute(&self.pool).await
            .map_err(db_error("Failed to update seats"))
            .map(|result| result.rows_affected() > 0)
    }

    /// Updates the first provider registered with `email`. `None` fields keep
    /// their stored value. Returns whether a provider was updated.
    pub async fn update_provider_by_email(
        &self,
        email: &str,
        date: Option<NaiveDate>,
        departure_time: Option<&str>,
        pickup_location: Option<&str>,
        seats_available: Option<&str>,
    ) -> Result<bool, DataManagerError> {
        query(concatcp!("
            UPDATE ", PROVIDERS_TABLE_NAME, " SET ",
                DATE,            " = COALESCE(?1, ", DATE, "), ",
                DEPARTURE_TIME,  " = COALESCE(?2, ", DEPARTURE_TIME, "), ",
                PICKUP_LOCATION, " = COALESCE(?3, ", PICKUP_LOCATION, "), ",
                SEATS_AVAILABLE, " = COALESCE(?4, ", SEATS_AVAILABLE, ")
            WHERE rowid = (
                SELECT rowid FROM ", PROVIDERS_TABLE_NAME, " WHERE ", EMAIL, " = ?5 ORDER BY rowid LIMIT 1
            )"))
            .bind(date)
            .bind(departure_time)
            .bind(pickup_location)
            .bind(seats_available)
            .bind(email)
            .execute(&self.pool).await
            .map_err(db_error("Failed to update provider"))
            .map(|result| result.rows_affected() > 0)
    }

    /// Exact date and a numeric comparison on the seat count in SQL, then a
    /// case-insensitive literal substring on location. SQLite's `lower()`
    /// only folds ASCII, so location folding happens here.
    pub async fn find_rides(&self, ride_query: &RideQuery) -> Result<Vec<ProviderView>, DataManagerError> {
        let mut rides = query_as::<_, ProviderView>(concatcp!(
            "SELECT ", PROVIDER_VIEW_COLUMNS, " FROM ", PROVIDERS_TABLE_NAME, "
            WHERE ", DATE, " = ?1
              AND ", SEATS_AVAILABLE, " <> ''
              AND ", SEATS_AVAILABLE, " NOT GLOB '*[^0-9]*'
              AND CAST(", SEATS_AVAILABLE, " AS INTEGER) >= ?2
            ORDER BY rowid"))
            .bind(ride_query.date)
            .bind(ride_query.seats_requested)
            .fetch_all(&self.pool).await
            .map_err(db_error("Failed to find rides"))?;

        let needle = ride_query.location.to_lowercase();
        rides.retain(|ride| {
            ride.location
                .as_deref()
                .is_some_and(|location| location.to_lowercase().contains(&needle))
        });

        Ok(rides)
    }

    pub async fn insert_receiver(&self, receiver: &Receiver) -> Result<(), DataManagerError> {
        query(concatcp!("
            INSERT INTO ", RECEIVERS_TABLE_NAME, "(",
            RECEIVER_ID, ", ", NAME, ", ", EMAIL, ", ", PASSWORD, ", ", CONTACT, ", ", LOCATION, ", ",
            CLOSEST_LANDMARK, ", ", VEHICLE_TYPE_PREFERENCE, ")
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"))
            .bind(receiver.id.as_str())
            .bind(&receiver.name)
            .bind(&receiver.email)
            .bind(&receiver.password_hash)
            .bind(&receiver.contact)
            .bind(&receiver.location)
            .bind(&receiver.closest_landmark)
            .bind(&receiver.vehicle_type_preference)
            .execute(&self.pool).await
            .map_err(db_error("Failed to insert receiver"))
            .map(|_| ())
    }

    /// Stored password hashes of every account with `email` in the role's
    /// collection, oldest account first.
    pub async fn get_password_hashes(&self, role: Role, email: &str) -> Result<Vec<String>, DataManagerError> {
        let sql = match role {
            Role::Provider => concatcp!(
                "SELECT ", PASSWORD, " FROM ", PROVIDERS_TABLE_NAME,
                " WHERE ", EMAIL, " = ?1 AND ", PASSWORD, " IS NOT NULL ORDER BY rowid"),
            Role::Receiver => concatcp!(
                "SELECT ", PASSWORD, " FROM ", RECEIVERS_TABLE_NAME,
                " WHERE ", EMAIL, " = ?1 AND ", PASSWORD, " IS NOT NULL ORDER BY rowid"),
        };

        query_scalar::<_, String>(sql)
            .bind(email)
            .fetch_all(&self.pool).await
            .map_err(db_error("Failed to look up credentials"))
    }

    #[cfg(test)]
    pub(crate) async fn count(&self, table: &str) -> i64 {
        query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool).await
            .unwrap()
    }

    #[cfg(test)]
    pub(crate) async fn raw_password(&self, provider_id: &RecordId) -> Option<String> {
        query_scalar::<_, Option<String>>(concatcp!(
            "SELECT ", PASSWORD, " FROM ", PROVIDERS_TABLE_NAME, " WHERE ", PROVIDER_ID, " = ?1"))
            .bind(provider_id.as_str())
            .fetch_one(&self.pool).await
            .unwrap()
    }
}
