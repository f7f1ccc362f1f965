//! The leader's view of the cluster.

use crate::protocol::types::{NodeAddress, NodeColor};

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::time::Duration;
use tokio::time::Instant;

/// One known slave, as tracked by the leader.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipRecord {
    pub node_id: NodeAddress,
    /// The color the leader last assigned (or the one the node reported on joining).
    pub color: NodeColor,
    pub last_seen: Instant,
}

/// Slaves keyed by address; iteration is always in ascending address order,
/// which makes color assignment deterministic.
#[derive(Debug, Default)]
pub struct MembershipTable {
    records: BTreeMap<NodeAddress, MembershipRecord>,
}

impl MembershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, node: &NodeAddress) -> bool {
        self.records.contains_key(node)
    }

    pub fn get(&self, node: &NodeAddress) -> Option<&MembershipRecord> {
        self.records.get(node)
    }

    pub fn insert(&mut self, node: NodeAddress, color: NodeColor, now: Instant) {
        self.records.insert(
            node,
            MembershipRecord {
                node_id: node,
                color,
                last_seen: now,
            },
        );
    }

    /// Refreshes `last_seen`; returns false if the node is unknown.
    pub fn touch(&mut self, node: &NodeAddress, now: Instant) -> bool {
        match self.records.get_mut(node) {
            Some(record) => {
                record.last_seen = now;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, node: &NodeAddress) -> Option<MembershipRecord> {
        self.records.remove(node)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Members silent for strictly longer than `dead_after`, in address order.
    pub fn expired(&self, now: Instant, dead_after: Duration) -> Vec<NodeAddress> {
        self.records
            .values()
            .filter(|record| now.saturating_duration_since(record.last_seen) > dead_after)
            .map(|record| record.node_id)
            .collect()
    }

    pub fn count_color(&self, color: NodeColor) -> usize {
        self.records.values().filter(|r| r.color == color).count()
    }

    pub fn iter(&self) -> btree_map::Values<'_, NodeAddress, MembershipRecord> {
        self.records.values()
    }

    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, NodeAddress, MembershipRecord> {
        self.records.values_mut()
    }
}
