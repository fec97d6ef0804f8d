//! Coordinate-to-address resolution with a provider fallback chain.
//!
//! Resolution first checks network reachability, then tries the remote
//! geocoding service, then the local gazetteer, short-circuiting on the
//! first usable address. Both providers failing leaves the caller to prompt
//! for manual entry. The whole chain runs as one future, so dropping it
//! cancels any in-flight lookup; no detached work survives the caller.

mod local;
mod net;
mod remote;

pub use local::{GazetteerEntry, LocalGazetteer};
pub use net::{NetworkProbe, TcpProbe};
pub use remote::RemoteGeocoder;

use std::fmt;

use log::debug;
use thiserror::Error;

/// Which resolution strategy produced an address or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// The hosted geocoding service.
    Remote,
    /// The bundled offline gazetteer.
    Local,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Remote => write!(f, "remote geocoder"),
            Provider::Local => write!(f, "local gazetteer"),
        }
    }
}

/// A successfully resolved address.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    /// Normalized, human-readable address string.
    pub address: String,
    /// The provider that produced it.
    pub provider: Provider,
}

/// Address resolution failures.
///
/// All variants are recoverable; none abort the enclosing flow. A failed
/// resolution leaves the caller free to fall back to manual address entry.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// No usable network transport; neither provider was attempted.
    #[error("no network connection available")]
    NetworkUnavailable,

    /// One provider produced nothing; the chain continues past this.
    #[error("{provider} returned no result: {reason}")]
    ProviderNoResult {
        /// The provider that failed.
        provider: Provider,
        /// What went wrong, for logs and the aggregate failure.
        reason: String,
    },

    /// Every provider failed. `reason` carries the most recent provider
    /// failure; earlier ones are superseded silently.
    #[error("could not determine an address for these coordinates: {reason}")]
    Exhausted {
        /// The last provider failure in the chain.
        reason: String,
    },
}

/// Resolves coordinates to an address through the provider chain.
pub struct AddressResolver {
    remote: RemoteGeocoder,
    local: LocalGazetteer,
    probe: Box<dyn NetworkProbe>,
}

impl AddressResolver {
    /// Creates a resolver over the given providers and reachability probe.
    pub fn new(remote: RemoteGeocoder, local: LocalGazetteer, probe: Box<dyn NetworkProbe>) -> Self {
        AddressResolver {
            remote,
            local,
            probe,
        }
    }

    /// Resolves `(latitude, longitude)` to a human-readable address.
    ///
    /// Tries the remote service first and the local gazetteer second,
    /// returning the first non-empty address. Fails with
    /// [`GeocodeError::NetworkUnavailable`] before attempting either
    /// provider when the network is unreachable, and with
    /// [`GeocodeError::Exhausted`] when both providers come up empty.
    pub async fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ResolvedAddress, GeocodeError> {
        if !self.probe.is_online().await {
            return Err(GeocodeError::NetworkUnavailable);
        }

        match self.remote.lookup(latitude, longitude).await {
            Ok(address) => {
                return Ok(ResolvedAddress {
                    address,
                    provider: Provider::Remote,
                })
            }
            Err(e) => debug!("Remote lookup for ({latitude}, {longitude}) failed: {e}"),
        }

        // The local failure supersedes the remote one; only the final
        // reason reaches the caller.
        match self.local.lookup(latitude, longitude) {
            Ok(address) => Ok(ResolvedAddress {
                address,
                provider: Provider::Local,
            }),
            Err(e) => {
                debug!("Local lookup for ({latitude}, {longitude}) failed: {e}");
                Err(GeocodeError::Exhausted {
                    reason: e.to_string(),
                })
            }
        }
    }
}
