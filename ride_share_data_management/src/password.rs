use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tokio::task;

use crate::DataManagerError;

/// Salted Argon2id hash in PHC string form. Runs on the blocking pool.
pub async fn hash(password: String) -> Result<String, DataManagerError> {
    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| DataManagerError::Credentials(format!("Failed to hash password: {err}")))
    })
    .await
    .map_err(|err| DataManagerError::Credentials(format!("Password hashing task failed: {err}")))?
}

pub async fn verify(password: String, hash: String) -> Result<bool, DataManagerError> {
    task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash)
            .map_err(|err| DataManagerError::Credentials(format!("Stored password hash is malformed: {err}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(DataManagerError::Credentials(format!("Failed to verify password: {err}"))),
        }
    })
    .await
    .map_err(|err| DataManagerError::Credentials(format!("Password verification task failed: {err}")))?
}

#[tokio::test]
async fn hashes_are_salted_and_verifiable() {
    let first = hash("hunter2".into()).await.unwrap();
    let second = hash("hunter2".into()).await.unwrap();

    assert_ne!(first, second);
    assert!(first.starts_with("$argon2id$"));
    assert!(verify("hunter2".into(), first.clone()).await.unwrap());
    assert!(!verify("hunter3".into(), first).await.unwrap());
}

#[tokio::test]
async fn malformed_hash_is_an_error() {
    let result = verify("hunter2".into(), "hunter2".into()).await;
    assert!(matches!(result, Err(DataManagerError::Credentials(_))));
}
