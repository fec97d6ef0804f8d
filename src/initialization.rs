//! Logger and HTTP client setup.

use log::{LevelFilter, SetLoggerError};
use reqwest::{Client, ClientBuilder};

use crate::config::{GEOCODER_CONNECT_TIMEOUT, GEOCODER_READ_TIMEOUT};

/// Initializes the global logger at `level`.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_millis()
        .try_init()
}

/// Builds the HTTP client used for geocoder calls: bounded connect and
/// read timeouts plus an explicit User-Agent.
pub fn init_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .connect_timeout(GEOCODER_CONNECT_TIMEOUT)
        .timeout(GEOCODER_READ_TIMEOUT)
        .user_agent(user_agent)
        .build()
}
