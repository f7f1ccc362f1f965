use super::Transport;
use crate::protocol::types::{Message, NodeAddress};

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sent {
    Broadcast(Message),
    Unicast(NodeAddress, Message),
}

/// Captures everything a role sends, in order.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Drains and returns everything sent so far.
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    pub fn broadcasts(&self) -> Vec<Message> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Broadcast(msg) => Some(msg),
                Sent::Unicast(..) => None,
            })
            .collect()
    }

    pub fn unicasts_to(&self, peer: NodeAddress) -> Vec<Message> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Unicast(to, msg) if to == peer => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, msg: Message) -> usize {
        self.sent()
            .iter()
            .filter(|sent| match sent {
                Sent::Broadcast(m) | Sent::Unicast(_, m) => *m == msg,
            })
            .count()
    }
}

impl Transport for RecordingTransport {
    fn broadcast(&self, msg: &Message) {
        self.sent.lock().unwrap().push(Sent::Broadcast(*msg));
    }

    fn unicast(&self, peer: NodeAddress, msg: &Message) {
        self.sent.lock().unwrap().push(Sent::Unicast(peer, *msg));
    }
}
