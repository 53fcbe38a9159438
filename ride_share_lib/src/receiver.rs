use serde::Deserialize;

use crate::{record_id::RecordId, text};

/// Registration form of a rider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReceiver {
    #[serde(default, deserialize_with = "text::lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text::lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text::lenient")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "text::lenient")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "text::lenient")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "text::lenient")]
    pub closest_landmark: Option<String>,
    #[serde(default, rename = "vehicle_type_pref", deserialize_with = "text::lenient")]
    pub vehicle_type_preference: Option<String>,
}

/// A receiver document as stored. Receivers are write-only: nothing reads
/// them back except the login check.
#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub id: RecordId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub closest_landmark: Option<String>,
    pub vehicle_type_preference: Option<String>,
}

impl Receiver {
    pub fn register(id: RecordId, form: NewReceiver, password_hash: Option<String>) -> Self {
        Self {
            id,
            name: form.name,
            email: form.email,
            password_hash,
            contact: form.contact,
            location: form.location,
            closest_landmark: form.closest_landmark,
            vehicle_type_preference: form.vehicle_type_preference,
        }
    }
}
