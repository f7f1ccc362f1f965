//! Color Monitor
//!
//! A passive observer that never joins the cluster. It periodically broadcasts
//! MONITOR_COLOR_REQUEST and records every node's answer in a display table.
//! It never takes part in elections and never expires a node.

pub mod service;


use crate::protocol::types::{Message, NodeAddress, NodeColor};
use crate::transport::Transport;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub node: NodeAddress,
    pub color: NodeColor,
}

/// The monitor's display table: last reported color per node.
pub struct ColorMonitor {
    local_addr: NodeAddress,
    colors: DashMap<NodeAddress, NodeColor>,
}

impl ColorMonitor {
    pub fn new(local_addr: NodeAddress) -> Self {
        Self {
            local_addr,
            colors: DashMap::new(),
        }
    }

    pub fn process_msg(&self, sender: NodeAddress, msg: Message) {
        if sender == self.local_addr {
            return;
        }

        if let Message::MonitorColorResponse { color } = msg {
            let previous = self.colors.insert(sender, color);
            if previous != Some(color) {
                tracing::info!("Node {} is {}", sender, color);
                tracing::info!("{}", self.render());
            }
        }
    }

    pub fn poll(&self, transport: &dyn Transport) {
        tracing::trace!("Polling cluster colors");
        transport.broadcast(&Message::MonitorColorRequest);
    }

    /// Entries in ascending address order.
    pub fn snapshot(&self) -> Vec<ColorEntry> {
        let mut entries: Vec<ColorEntry> = self
            .colors
            .iter()
            .map(|entry| ColorEntry {
                node: *entry.key(),
                color: *entry.value(),
            })
            .collect();
        entries.sort_by_key(|entry| entry.node);
        entries
    }

    pub fn render(&self) -> String {
        let cells: Vec<String> = self
            .snapshot()
            .iter()
            .map(|entry| format!("{}={}", entry.node, entry.color))
            .collect();
        format!("Cluster colors: [{}]", cells.join(", "))
    }
}
