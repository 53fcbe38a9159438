pub mod provider;
pub mod receiver;
pub mod record_id;
pub mod ride_query;
pub mod role;
pub mod text;

pub use provider::{NewProvider, ProfileUpdate, Provider, ProviderView, SeatUpdate};
pub use receiver::{NewReceiver, Receiver};
pub use record_id::{InvalidRecordId, RecordId};
pub use ride_query::{RideQuery, RideQueryError, RideSearchParams};
pub use role::{LoginRequest, Role, UnknownRole};
