//! Slave Role
//!
//! Tracks which node is the leader and whether it is still alive. The leader's
//! liveness is judged only from its keepalive acks; adopting a leader counts as
//! hearing from it.

use crate::config::ClusterConfig;
use crate::protocol::types::{Message, NodeAddress, NodeColor};
use crate::transport::Transport;

use std::time::Duration;
use tokio::time::Instant;

pub struct SlaveBehavior {
    leader: Option<NodeAddress>,
    last_keepalive_from_leader: Option<Instant>,
    leader_dead_after: Duration,
}

impl SlaveBehavior {
    pub fn new(config: &ClusterConfig) -> Self {
        Self {
            leader: None,
            last_keepalive_from_leader: None,
            leader_dead_after: config.leader_dead_after,
        }
    }

    pub fn leader(&self) -> Option<NodeAddress> {
        self.leader
    }

    pub fn last_keepalive_from_leader(&self) -> Option<Instant> {
        self.last_keepalive_from_leader
    }

    pub fn set_leader(&mut self, leader_id: NodeAddress) {
        if self.leader != Some(leader_id) {
            tracing::info!("Following leader {}", leader_id);
        }
        self.leader = Some(leader_id);
        self.last_keepalive_from_leader = Some(Instant::now());
    }

    pub fn clear_leader(&mut self) {
        self.leader = None;
        self.last_keepalive_from_leader = None;
    }

    pub fn on_leader_keepalive(&mut self) {
        self.last_keepalive_from_leader = Some(Instant::now());
    }

    /// Sends our color to the leader, unless the leader has gone quiet for too long,
    /// in which case it is forgotten and nothing is sent.
    ///
    /// Returns true if a keepalive was sent.
    pub fn send_keepalive(&mut self, my_color: NodeColor, transport: &dyn Transport) -> bool {
        let Some(leader) = self.leader else {
            return false;
        };

        if let Some(last) = self.last_keepalive_from_leader {
            let silence = Instant::now().saturating_duration_since(last);
            if silence > self.leader_dead_after {
                tracing::warn!(
                    "Leader {} is dead (silent for {:?} > {:?})",
                    leader,
                    silence,
                    self.leader_dead_after
                );
                self.clear_leader();
                return false;
            }
        }

        transport.unicast(
            leader,
            &Message::Keepalive {
                color: Some(my_color),
            },
        );
        true
    }
}
