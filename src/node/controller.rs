//! Node Role Controller
//!
//! Owns all mutable role state of one node and is its only mutator. Inbound
//! messages arrive through `process_msg`, time passes through `on_tick`; both
//! run to completion without suspending, so callers only need to serialize
//! access (see `service`).

use super::leader::LeaderBehavior;
use super::slave::SlaveBehavior;
use super::types::{ElectionState, MemberStatus, NodeStatus, OperationMode};
use crate::config::ClusterConfig;
use crate::protocol::types::{Message, NodeAddress, NodeColor};
use crate::transport::Transport;

use std::sync::Arc;
use tokio::time::Instant;

pub struct NodeRoleController {
    my_addr: NodeAddress,
    my_color: NodeColor,
    election_state: ElectionState,
    operation_mode: OperationMode,
    leader: LeaderBehavior,
    slave: SlaveBehavior,
    transport: Arc<dyn Transport>,
}

impl NodeRoleController {
    pub fn new(my_addr: NodeAddress, config: &ClusterConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            my_addr,
            my_color: NodeColor::Init,
            election_state: ElectionState::Init,
            operation_mode: OperationMode::Slave,
            leader: LeaderBehavior::new(config),
            slave: SlaveBehavior::new(config),
            transport,
        }
    }

    pub fn my_addr(&self) -> NodeAddress {
        self.my_addr
    }

    pub fn my_color(&self) -> NodeColor {
        self.my_color
    }

    pub fn election_state(&self) -> ElectionState {
        self.election_state
    }

    pub fn operation_mode(&self) -> OperationMode {
        self.operation_mode
    }

    pub fn is_leader(&self) -> bool {
        self.operation_mode == OperationMode::Leader
    }

    pub fn known_leader(&self) -> Option<NodeAddress> {
        match self.operation_mode {
            OperationMode::Leader => Some(self.my_addr),
            OperationMode::Slave => self.slave.leader(),
        }
    }

    pub fn leader_behavior(&self) -> &LeaderBehavior {
        &self.leader
    }

    pub fn slave_behavior(&self) -> &SlaveBehavior {
        &self.slave
    }

    pub fn process_msg(&mut self, sender: NodeAddress, msg: Message) {
        // Our own broadcasts come back to us
        if sender == self.my_addr {
            return;
        }

        if msg != Message::MonitorColorRequest {
            tracing::debug!("Node {} received {:?} from {}", self.my_addr, msg, sender);
        }

        match msg {
            Message::Election => self.on_election(sender),

            Message::Victory | Message::LeaderResponse => {
                self.step_down();
                self.slave.set_leader(sender);
                self.election_state = ElectionState::Init;
            }

            Message::LeaderRequest => {
                if self.is_leader() {
                    self.transport.unicast(sender, &Message::LeaderResponse);
                }
            }

            Message::SetToRed => self.set_my_color(NodeColor::Red),

            Message::SetToGreen => self.set_my_color(NodeColor::Green),

            Message::Keepalive { color } => {
                if self.is_leader() {
                    self.leader
                        .on_keepalive(sender, color, self.transport.as_ref());
                } else {
                    self.slave.on_leader_keepalive();
                }
            }

            Message::MonitorColorRequest => {
                self.transport.unicast(
                    sender,
                    &Message::MonitorColorResponse {
                        color: self.my_color,
                    },
                );
            }

            Message::MonitorColorResponse { .. } => {
                tracing::debug!("Ignoring {:?} from {}, not a monitor", msg, sender);
            }
        }
    }

    fn on_election(&mut self, sender: NodeAddress) {
        if sender.outranks(&self.my_addr) {
            // A higher node is running; stand back and wait for its VICTORY
            self.election_state = ElectionState::ElectionMsgReceived;
        } else {
            // Tell the lower node we outrank it and start over from the bottom
            self.transport.unicast(sender, &Message::Election);
            self.election_state = ElectionState::Init;
        }

        // Any election invalidates what we believed about the leader
        self.step_down();
        self.slave.clear_leader();
    }

    pub fn on_tick(&mut self) {
        match self.operation_mode {
            OperationMode::Leader => {
                self.leader.sweep_dead_members(self.transport.as_ref());
            }
            OperationMode::Slave => {
                if self.slave.leader().is_none() {
                    self.advance_election();
                } else {
                    self.slave
                        .send_keepalive(self.my_color, self.transport.as_ref());
                }
            }
        }
    }

    fn advance_election(&mut self) {
        self.election_state = match self.election_state {
            ElectionState::Init => {
                self.transport.broadcast(&Message::LeaderRequest);
                ElectionState::SentLeaderRequest
            }
            ElectionState::SentLeaderRequest => {
                tracing::info!("No leader answered, {} starting election", self.my_addr);
                self.transport.broadcast(&Message::Election);
                ElectionState::SentElectionBroadcast
            }
            ElectionState::SentElectionBroadcast => {
                self.transport.broadcast(&Message::Victory);
                self.become_leader();
                ElectionState::Init
            }
            ElectionState::ElectionMsgReceived => ElectionState::ElectionMsgLongDelay,
            ElectionState::ElectionMsgLongDelay => {
                tracing::info!("Higher node never declared victory, restarting election");
                ElectionState::Init
            }
        };
    }

    fn become_leader(&mut self) {
        tracing::info!("Node {} won the election, now LEADER", self.my_addr);
        self.operation_mode = OperationMode::Leader;
        self.slave.clear_leader();
        self.leader.reset();
        self.set_my_color(NodeColor::Red);
    }

    fn step_down(&mut self) {
        if self.is_leader() {
            tracing::info!("Node {} stepping down to SLAVE", self.my_addr);
            self.leader.reset();
        }
        self.operation_mode = OperationMode::Slave;
    }

    fn set_my_color(&mut self, color: NodeColor) {
        if self.my_color != color {
            tracing::info!("Node {} color {} -> {}", self.my_addr, self.my_color, color);
        }
        self.my_color = color;
    }

    pub fn status(&self) -> NodeStatus {
        let now = Instant::now();
        let members = self
            .leader
            .members()
            .iter()
            .map(|record| MemberStatus {
                node: record.node_id,
                color: record.color,
                last_seen_ms_ago: now.saturating_duration_since(record.last_seen).as_millis()
                    as u64,
            })
            .collect();

        NodeStatus {
            node: self.my_addr,
            mode: self.operation_mode,
            election_state: self.election_state,
            color: self.my_color,
            leader: self.known_leader(),
            members,
        }
    }
}
