//! Application configuration and constants.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

/// The guide's home city. The local reverse geocoder suppresses this token
/// in assembled addresses so results do not repeat the city name.
pub const HOME_CITY: &str = "Курск";

/// Country prefix stripped from remote geocoder output.
pub const COUNTRY_PREFIX: &str = "Россия, ";

/// Regional qualifier stripped from remote geocoder output for readability.
pub const REGION_QUALIFIER: &str = "Курская область, ";

/// Remote geocoder endpoint (scheme and host; the request path is fixed).
pub const GEOCODER_BASE_URL: &str = "https://geocode-maps.yandex.ru";

/// Response language requested from the remote geocoder.
pub const GEOCODER_LANG: &str = "ru_RU";

// Network operation timeouts
/// TCP connect timeout for a single geocoder call.
pub const GEOCODER_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Read timeout for a single geocoder call.
pub const GEOCODER_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent header sent with geocoder requests. The service rejects
/// requests without one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default directory holding the persisted stores.
pub const DEFAULT_DATA_DIR: &str = "./.guide_data";

/// Named store holding the serialized user-submitted place list.
pub const USER_PLACES_STORE: &str = "user_places";
/// Key the serialized place list lives under inside its store.
pub const USER_PLACES_KEY: &str = "user_places";

/// Named store holding the favorite place identifiers.
pub const FAVORITES_STORE: &str = "favorites";
/// Key the favorite id set lives under inside its store.
pub const FAVORITES_KEY: &str = "favorite_places";

/// City center coordinates, the default map viewport.
pub const CITY_CENTER: (f64, f64) = (51.7373, 36.1873);

/// Marker icon edge length in pixels.
pub const MARKER_ICON_SIZE: u32 = 56;

/// Endpoints probed to decide whether the network is reachable. Any one
/// answering within the timeout counts as online.
pub const PROBE_TARGETS: &[&str] = &["1.1.1.1:443", "8.8.8.8:53"];
/// Per-target timeout for the reachability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Cutoff beyond which the local gazetteer reports no result, in meters.
pub const GAZETTEER_MAX_DISTANCE_M: f64 = 500.0;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages and above.
    Info,
    /// Debug detail and above.
    Debug,
    /// Everything.
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Command-line options.
///
/// Generated by `clap` from the field attributes. All options have sensible
/// defaults and can be overridden via command-line flags.
#[derive(Debug, Parser)]
#[command(
    name = "city_guide",
    about = "Point-of-interest guide for Kursk: catalog, search, and address resolution."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Directory holding the persisted stores
    #[arg(long, value_parser, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Remote geocoder base URL
    #[arg(long, default_value = GEOCODER_BASE_URL)]
    pub geocoder_url: String,

    /// HTTP User-Agent header value for geocoder requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// The action to run
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands, one per guide operation.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the category taxonomy
    Categories,
    /// List places, optionally restricted to one category tag
    List {
        /// Exact category tag to filter by
        #[arg(long)]
        category: Option<String>,
    },
    /// Search places by name, description, or address
    Search {
        /// Free-text query, matched case-insensitively
        query: String,
    },
    /// Show one place in detail
    Show {
        /// Place identifier
        id: i64,
    },
    /// Add a user place at the given coordinates
    Add {
        /// Latitude of the new place
        #[arg(long)]
        lat: f64,
        /// Longitude of the new place
        #[arg(long)]
        lon: f64,
        /// Display name
        #[arg(long)]
        name: String,
        /// Short description
        #[arg(long)]
        description: String,
        /// Full description; defaults to the short description
        #[arg(long)]
        full_description: Option<String>,
        /// Category tag; defaults to the user-submitted category
        #[arg(long)]
        category: Option<String>,
        /// Street address; resolved from the coordinates when omitted
        #[arg(long)]
        address: Option<String>,
        /// Contact phone
        #[arg(long, default_value = "")]
        phone: String,
        /// Website URL
        #[arg(long, default_value = "")]
        website: String,
        /// Working hours
        #[arg(long, default_value = "")]
        working_hours: String,
        /// Rating from 0.0 to 5.0
        #[arg(long, default_value_t = 0.0)]
        rating: f32,
    },
    /// Delete a user place by identifier
    Delete {
        /// Place identifier
        id: i64,
    },
    /// Resolve coordinates to an address
    Resolve {
        /// Latitude to resolve
        lat: f64,
        /// Longitude to resolve
        lon: f64,
    },
    /// Manage favorite places
    Favorite {
        /// What to do with the favorites set
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Print route links handing off to the external map application
    Route {
        /// Place identifier
        id: i64,
    },
    /// Summarize the map markers the catalog produces
    Map,
}

/// Favorite-set operations.
#[derive(Debug, Subcommand)]
pub enum FavoriteAction {
    /// Mark a place as favorite
    Add {
        /// Place identifier
        id: i64,
    },
    /// Remove a place from the favorites
    Remove {
        /// Place identifier
        id: i64,
    },
    /// List favorite places
    List,
}
