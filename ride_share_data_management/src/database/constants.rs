pub const PROVIDERS_TABLE_NAME: &str = "Providers";
pub const PROVIDER_ID: &str = "provider_id";
pub const VEHICLE_TYPE: &str = "vehicle_type";
pub const VEHICLE_REGISTRATION_NUMBER: &str = "veh_num";
pub const DATE: &str = "date";
pub const DEPARTURE_TIME: &str = "departure_time";
pub const PICKUP_LOCATION: &str = "pickup_location";
pub const SEATS_AVAILABLE: &str = "seats_available";

pub const RECEIVERS_TABLE_NAME: &str = "Receivers";
pub const RECEIVER_ID: &str = "receiver_id";
pub const VEHICLE_TYPE_PREFERENCE: &str = "vehicle_type_pref";

// Shared by both collections
pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONTACT: &str = "contact";
pub const LOCATION: &str = "location";
pub const CLOSEST_LANDMARK: &str = "closest_landmark";
