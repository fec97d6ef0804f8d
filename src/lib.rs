//! city_guide library: a point-of-interest guide for a single city.
//!
//! Provides the place catalog (built-in entries plus locally persisted
//! user places), free-text search, a coordinate-to-address resolution
//! chain, favorites, external-map route links, and map-marker lifecycle
//! management.
//!
//! # Example
//!
//! ```no_run
//! use city_guide::{
//!     initialization::init_client, AddressResolver, LocalGazetteer, RemoteGeocoder, TcpProbe,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = init_client("Mozilla/5.0")?;
//! let resolver = AddressResolver::new(
//!     RemoteGeocoder::new(client, "https://geocode-maps.yandex.ru")?,
//!     LocalGazetteer::from_builtin_catalog(),
//!     Box::new(TcpProbe::new()),
//! );
//!
//! match resolver.resolve(51.724124, 36.191233).await {
//!     Ok(resolved) => println!("{} (via {})", resolved.address, resolved.provider),
//!     Err(e) => println!("address unknown: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod geocode;
pub mod initialization;
mod kv;
pub mod markers;
pub mod place;
pub mod routes;
pub mod search;
pub mod store;

// Re-export the public API
pub use catalog::{PlaceCatalog, BUILTIN_PLACES};
pub use config::{Command, FavoriteAction, LogLevel, Opt};
pub use geocode::{
    AddressResolver, GeocodeError, GazetteerEntry, LocalGazetteer, NetworkProbe, Provider,
    RemoteGeocoder, ResolvedAddress, TcpProbe,
};
pub use markers::{GeoPoint, MapSurface, MarkerManager, OverlayId, RasterIcon};
pub use place::{Category, Place};
pub use routes::{route_links, RouteLinks};
pub use search::{filter_by_category, search};
pub use store::{FavoritesStore, PlaceStore, StoreError};
