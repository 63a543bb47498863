// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - Transfer gateway
//
// Public entry point for moving a player to another server. Validates the
// request and hands it to the host's transfer capability. Other components
// of the host may use this directly; the /transfer command goes through it
// as well.

use crate::host::{Player, TransferCapability};
use crate::types::TransferError;
use std::fmt;
use std::sync::Arc;

/// A transfer that passed validation
#[derive(Clone)]
pub struct TransferRequest {
    target: Arc<dyn Player>,
    host: String,
    port: u16,
}

impl TransferRequest {
    /// Validate target, host and port.
    ///
    /// The port is taken as a wide integer so out-of-range values can be
    /// rejected here rather than silently truncated by the caller.
    pub fn new(
        target: Option<Arc<dyn Player>>,
        host: &str,
        port: i64,
    ) -> Result<Self, TransferError> {
        let target = target.ok_or(TransferError::InvalidTarget)?;
        if host.trim().is_empty() {
            return Err(TransferError::InvalidHost);
        }
        let port = u16::try_from(port)
            .ok()
            .filter(|port| *port >= 1)
            .ok_or(TransferError::InvalidPort(port))?;

        Ok(Self {
            target,
            host: host.to_string(),
            port,
        })
    }

    pub fn target(&self) -> &Arc<dyn Player> {
        &self.target
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Debug for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferRequest")
            .field("target", &self.target.name())
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// Validating facade over the host transfer capability
pub struct TransferGateway {
    capability: Arc<dyn TransferCapability>,
}

impl TransferGateway {
    pub fn new(capability: Arc<dyn TransferCapability>) -> Self {
        Self { capability }
    }

    /// Transfer `target` to `host:port`.
    ///
    /// Nothing is delegated when validation fails. Success only means the
    /// host accepted the request; the handoff itself is not observed.
    pub fn transfer(
        &self,
        target: Option<Arc<dyn Player>>,
        host: &str,
        port: i64,
    ) -> Result<(), TransferError> {
        let request = TransferRequest::new(target, host, port)?;
        self.submit(&request);
        Ok(())
    }

    /// Delegate an already validated request
    pub fn submit(&self, request: &TransferRequest) {
        tracing::info!(
            "Transferring {} to {}:{}",
            request.target().name(),
            request.host(),
            request.port()
        );
        self.capability
            .transfer(request.target().as_ref(), request.host(), request.port());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePlayer, RecordingCapability};

    fn gateway() -> (TransferGateway, Arc<RecordingCapability>) {
        let capability = Arc::new(RecordingCapability::default());
        (TransferGateway::new(capability.clone()), capability)
    }

    #[test]
    fn test_valid_transfer_is_delegated() {
        let (gateway, capability) = gateway();
        let alice: Arc<dyn Player> = FakePlayer::new("alice", &[]);

        gateway.transfer(Some(alice), "lobby.example.com", 25566).unwrap();
        assert_eq!(
            capability.calls(),
            vec![("alice".to_string(), "lobby.example.com".to_string(), 25566)]
        );
    }

    #[test]
    fn test_request_keeps_validated_values() {
        let alice: Arc<dyn Player> = FakePlayer::new("alice", &[]);
        let request = TransferRequest::new(Some(alice), "lobby.example.com", 25566).unwrap();
        assert_eq!(request.target().name(), "alice");
        assert_eq!(request.host(), "lobby.example.com");
        assert_eq!(request.port(), 25566);

        let (gateway, capability) = gateway();
        gateway.submit(&request);
        assert_eq!(
            capability.calls(),
            vec![("alice".to_string(), "lobby.example.com".to_string(), 25566)]
        );
    }

    #[test]
    fn test_missing_target_is_rejected() {
        let (gateway, capability) = gateway();
        assert_eq!(
            gateway.transfer(None, "lobby.example.com", 25565),
            Err(TransferError::InvalidTarget)
        );
        assert!(capability.calls().is_empty());
    }

    #[test]
    fn test_blank_host_is_rejected() {
        let (gateway, capability) = gateway();
        for host in ["", "   ", "\t"] {
            let alice: Arc<dyn Player> = FakePlayer::new("alice", &[]);
            assert_eq!(
                gateway.transfer(Some(alice), host, 25565),
                Err(TransferError::InvalidHost)
            );
        }
        assert!(capability.calls().is_empty());
    }

    #[test]
    fn test_out_of_range_port_is_rejected() {
        let (gateway, capability) = gateway();
        for port in [0, -1, 65536, i64::MAX] {
            let alice: Arc<dyn Player> = FakePlayer::new("alice", &[]);
            assert_eq!(
                gateway.transfer(Some(alice), "lobby.example.com", port),
                Err(TransferError::InvalidPort(port))
            );
        }
        assert!(capability.calls().is_empty());
    }

    #[test]
    fn test_port_bounds_are_inclusive() {
        let (gateway, capability) = gateway();
        for port in [1, 65535] {
            let alice: Arc<dyn Player> = FakePlayer::new("alice", &[]);
            gateway.transfer(Some(alice), "h", port).unwrap();
        }
        assert_eq!(capability.calls().len(), 2);
    }
}
