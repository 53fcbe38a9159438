use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{record_id::RecordId, text};

/// Registration form of a driver offering rides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProvider {
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
    #[serde(default, deserialize_with = "text::lenient")]
    pub vehicle_type: Option<String>,
    #[serde(default, rename = "veh_num", deserialize_with = "text::lenient")]
    pub vehicle_registration_number: Option<String>,
}

/// A provider document as stored. The ride details stay unset until the
/// provider publishes a ride through a profile update.
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    pub id: RecordId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub closest_landmark: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_registration_number: Option<String>,
    pub date: Option<NaiveDate>,
    pub departure_time: Option<String>,
    pub pickup_location: Option<String>,
    pub seats_available: Option<String>,
}

impl Provider {
    pub fn register(id: RecordId, form: NewProvider, password_hash: Option<String>) -> Self {
        Self {
            id,
            name: form.name,
            email: form.email,
            password_hash,
            contact: form.contact,
            location: form.location,
            closest_landmark: form.closest_landmark,
            vehicle_type: form.vehicle_type,
            vehicle_registration_number: form.vehicle_registration_number,
            date: None,
            departure_time: None,
            pickup_location: None,
            seats_available: None,
        }
    }

    /// The provider without its credentials.
    pub fn view(&self) -> ProviderView {
        ProviderView {
            id: self.id.clone(),
            name: self.name.clone(),
            contact: self.contact.clone(),
            location: self.location.clone(),
            closest_landmark: self.closest_landmark.clone(),
            vehicle_type: self.vehicle_type.clone(),
            vehicle_registration_number: self.vehicle_registration_number.clone(),
            date: self.date,
            departure_time: self.departure_time.clone(),
            pickup_location: self.pickup_location.clone(),
            seats_available: self.seats_available.clone(),
        }
    }
}

/// Public projection of a provider: everything except email and password.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderView {
    #[serde(rename = "_id")]
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closest_landmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(rename = "veh_num", skip_serializing_if = "Option::is_none")]
    pub vehicle_registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "departureTime", skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(rename = "pickupLocation", skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(rename = "seatsAvailable", skip_serializing_if = "Option::is_none")]
    pub seats_available: Option<String>,
}

/// Body of a seat update. An absent seat count clears the stored one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeatUpdate {
    #[serde(default, rename = "rideId", deserialize_with = "text::lenient")]
    pub ride_id: Option<String>,
    #[serde(default, rename = "updatedSeatsAvailable", deserialize_with = "text::lenient")]
    pub seats_available: Option<String>,
}

/// Ride details a provider publishes, keyed by email. Falsy fields mean
/// "keep the stored value".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, deserialize_with = "text::lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text::truthy")]
    pub date: Option<String>,
    #[serde(default, rename = "departureTime", deserialize_with = "text::truthy")]
    pub departure_time: Option<String>,
    #[serde(default, rename = "pickupLocation", deserialize_with = "text::truthy")]
    pub pickup_location: Option<String>,
    #[serde(default, rename = "seatsAvailable", deserialize_with = "text::truthy")]
    pub seats_available: Option<String>,
}
