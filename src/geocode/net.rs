//! Network reachability probing.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::{PROBE_TARGETS, PROBE_TIMEOUT};

/// Answers whether the network is currently reachable.
///
/// The resolver consults the probe once per resolution and refuses to
/// start either provider while offline.
#[async_trait]
pub trait NetworkProbe: Send + Sync {
    /// True when at least one transport is usable.
    async fn is_online(&self) -> bool;
}

/// Probes reachability by attempting TCP connects against well-known
/// endpoints; any one answering within the timeout counts as online.
pub struct TcpProbe {
    targets: Vec<String>,
    timeout: Duration,
}

impl TcpProbe {
    /// Creates a probe over the default endpoint set.
    pub fn new() -> Self {
        Self::with_targets(
            PROBE_TARGETS.iter().map(|t| t.to_string()).collect(),
            PROBE_TIMEOUT,
        )
    }

    /// Creates a probe over explicit `host:port` targets.
    pub fn with_targets(targets: Vec<String>, timeout: Duration) -> Self {
        TcpProbe { targets, timeout }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkProbe for TcpProbe {
    async fn is_online(&self) -> bool {
        for target in &self.targets {
            match timeout(self.timeout, TcpStream::connect(target.as_str())).await {
                Ok(Ok(_)) => return true,
                Ok(Err(e)) => debug!("Probe target {target} refused: {e}"),
                Err(_) => debug!("Probe target {target} timed out"),
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_targets_read_as_offline() {
        // Reserved TEST-NET-1 address; nothing listens there.
        let probe = TcpProbe::with_targets(
            vec!["192.0.2.1:9".to_string()],
            Duration::from_millis(200),
        );
        assert!(!probe.is_online().await);
    }

    #[tokio::test]
    async fn a_listening_socket_reads_as_online() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let probe =
            TcpProbe::with_targets(vec![addr.to_string()], Duration::from_millis(500));
        assert!(probe.is_online().await);
    }
}
