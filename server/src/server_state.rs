use ride_share_data_management::DataManager;

use crate::config::LandingPages;

pub struct ServerState {
    pub data_manager: DataManager,
    pub landing: LandingPages,
}
