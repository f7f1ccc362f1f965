//! Leader Role
//!
//! Active only while the node is the elected leader. It owns the membership
//! table and decides every member's color.
//!
//! ## Responsibilities
//! - **Keepalive Ack**: Answers every slave keepalive; for slaves this ack is the
//!   only evidence that the leader is still alive.
//! - **Membership**: Adds unknown senders, refreshes known ones, evicts the silent.
//! - **Coloring**: Keeps `ceil((members + 1) * red_ratio)` nodes RED, counting the
//!   leader itself as one of them, and the rest GREEN.

use super::membership::MembershipTable;
use crate::config::ClusterConfig;
use crate::protocol::types::{Message, NodeAddress, NodeColor};
use crate::transport::Transport;

use std::time::Duration;
use tokio::time::Instant;

// Absorbs float error in `total * ratio` so exact products are not rounded up.
const RATIO_EPSILON: f64 = 1e-9;

/// Number of RED nodes, leader included, for a cluster of `total` nodes.
pub fn red_total(total: usize, red_ratio: f64) -> usize {
    ((total as f64) * red_ratio - RATIO_EPSILON).ceil().max(0.0) as usize
}

pub struct LeaderBehavior {
    members: MembershipTable,
    node_dead_after: Duration,
    red_ratio: f64,
    reassert_colors: bool,
}

impl LeaderBehavior {
    pub fn new(config: &ClusterConfig) -> Self {
        Self {
            members: MembershipTable::new(),
            node_dead_after: config.node_dead_after,
            red_ratio: config.red_ratio,
            reassert_colors: config.reassert_colors,
        }
    }

    pub fn members(&self) -> &MembershipTable {
        &self.members
    }

    /// Forgets every member; used when this node takes or gives up leadership.
    pub fn reset(&mut self) {
        self.members.clear();
    }

    /// Handles a keepalive from a slave reporting `color`.
    pub fn on_keepalive(
        &mut self,
        node_id: NodeAddress,
        color: Option<NodeColor>,
        transport: &dyn Transport,
    ) {
        transport.unicast(node_id, &Message::Keepalive { color: None });

        let now = Instant::now();

        if self.members.touch(&node_id, now) {
            if self.reassert_colors {
                self.reassert_color(node_id, color, transport);
            }
            return;
        }

        let color = color.unwrap_or_default();
        self.members.insert(node_id, color, now);
        tracing::info!(
            "Added NEW node {} ({}), cluster size now {}",
            node_id,
            color,
            self.members.len() + 1
        );

        self.reconfigure_colors(transport);
    }

    /// Re-sends the assigned color to a member that reports a different one,
    /// which happens when an earlier directive was lost.
    fn reassert_color(
        &self,
        node_id: NodeAddress,
        reported: Option<NodeColor>,
        transport: &dyn Transport,
    ) {
        let Some(reported) = reported else {
            return;
        };
        let Some(record) = self.members.get(&node_id) else {
            return;
        };

        if reported != record.color
            && let Some(directive) = Message::set_color(record.color)
        {
            tracing::debug!(
                "Node {} reports {} but is assigned {}, re-sending",
                node_id,
                reported,
                record.color
            );
            transport.unicast(node_id, &directive);
        }
    }

    /// Evicts every member silent for longer than the dead threshold.
    pub fn sweep_dead_members(&mut self, transport: &dyn Transport) {
        let dead = self.members.expired(Instant::now(), self.node_dead_after);

        for node_id in dead {
            self.members.remove(&node_id);
            tracing::warn!(
                "Removed DEAD node {}, cluster size now {}",
                node_id,
                self.members.len() + 1
            );
            self.reconfigure_colors(transport);
        }
    }

    /// Repaints members in address order: the first `red_quota` RED, the rest GREEN.
    ///
    /// A directive is sent only when the stored color differs, and the stored color
    /// is updated right away without waiting for any acknowledgement.
    pub fn reconfigure_colors(&mut self, transport: &dyn Transport) {
        let mut red_quota = red_total(self.members.len() + 1, self.red_ratio).saturating_sub(1);

        tracing::debug!(
            "Reconfiguring colors: {} members, {} RED besides the leader",
            self.members.len(),
            red_quota
        );

        for record in self.members.iter_mut() {
            let target = if red_quota > 0 {
                red_quota -= 1;
                NodeColor::Red
            } else {
                NodeColor::Green
            };

            if record.color == target {
                continue;
            }

            if let Some(directive) = Message::set_color(target) {
                transport.unicast(record.node_id, &directive);
            }
            tracing::info!("Node {} {} -> {}", record.node_id, record.color, target);
            record.color = target;
        }
    }
}
