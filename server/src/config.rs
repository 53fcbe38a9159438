use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use ride_share_data_management::{MatchingConfig, StoreConfig};
use ride_share_lib::Role;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Directory the HTML pages are served from. `/` serves its `signup.html`.
    pub static_dir: PathBuf,
    pub log_dir: PathBuf,
    pub store: StoreConfig,
    pub matching: MatchingConfig,
    pub landing: LandingPages,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3019,
            static_dir: PathBuf::from("public"),
            log_dir: PathBuf::from("log"),
            store: StoreConfig::default(),
            matching: MatchingConfig::default(),
            landing: LandingPages::default(),
        }
    }
}

/// Where a successful login sends each role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LandingPages {
    pub provider: String,
    pub receiver: String,
}

impl Default for LandingPages {
    fn default() -> Self {
        Self {
            provider: "/providerpage.html".to_string(),
            receiver: "/findride.html".to_string(),
        }
    }
}

impl LandingPages {
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Provider => &self.provider,
            Role::Receiver => &self.receiver,
        }
    }
}

impl Config {
    const DEFAULT_CONFIG_FILE: &str = "ride_share.toml";

    pub fn load() -> Result<Self, figment::Error> {
        dotenvy::dotenv().ok();
        Self::figment().extract()
    }

    /// `ride_share.toml`, then `RIDE_SHARE_*` variables (`__` separates
    /// nested keys), then `DATABASE_URL`.
    pub(crate) fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            .merge(Env::prefixed("RIDE_SHARE_").split("__"))
            .merge(Env::raw().only(&["DATABASE_URL"]).map(|_| "store.url".into()))
    }
}
