//! Datagram Transport
//!
//! The seam between the protocol roles and the network. Roles only ever see the
//! `Transport` trait: a fire-and-forget `broadcast` to the whole segment and a
//! `unicast` to one peer on the shared cluster port.
//!
//! - **`udp`**: The production adapter built on a tokio `UdpSocket`.
//! - **`testing`**: An in-memory recorder used by the unit tests.

pub mod udp;

#[cfg(test)]
pub mod testing;

use crate::protocol::types::{Message, NodeAddress};

/// Outbound half of the transport, as seen by the roles.
///
/// Both operations are non-blocking and never report failure to the caller:
/// a lost datagram is handled by the protocol re-asserting itself on the
/// next tick.
pub trait Transport: Send + Sync {
    fn broadcast(&self, msg: &Message);

    fn unicast(&self, peer: NodeAddress, msg: &Message);
}
