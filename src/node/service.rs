use super::controller::NodeRoleController;
use super::types::NodeStatus;
use crate::config::ClusterConfig;
use crate::protocol::types::NodeAddress;
use crate::transport::udp::UdpTransport;

use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Runs one cluster node: a receive loop and a ticker sharing one controller.
///
/// The controller sits behind a single mutex that is never held across an
/// `.await`, so every message and every tick is handled atomically.
pub struct NodeService {
    pub local_addr: NodeAddress,
    controller: Arc<Mutex<NodeRoleController>>,
    transport: Arc<UdpTransport>,
    keepalive_interval: Duration,
}

impl NodeService {
    pub async fn new(config: &ClusterConfig, local_addr: NodeAddress) -> Result<Arc<Self>> {
        let transport = UdpTransport::bind(config.listen_addr(), config.broadcast_ip).await?;
        Ok(Self::with_transport(config, local_addr, transport))
    }

    pub fn with_transport(
        config: &ClusterConfig,
        local_addr: NodeAddress,
        transport: Arc<UdpTransport>,
    ) -> Arc<Self> {
        let controller = NodeRoleController::new(local_addr, config, transport.clone());

        Arc::new(Self {
            local_addr,
            controller: Arc::new(Mutex::new(controller)),
            transport,
            keepalive_interval: config.keepalive_interval,
        })
    }

    pub async fn start(self: Arc<Self>) {
        tracing::info!("Starting node {}...", self.local_addr);

        let _receive_handle = {
            let service = self.clone();
            tokio::spawn(async move {
                service.receive_loop().await;
            })
        };

        let _tick_handle = {
            let service = self.clone();
            tokio::spawn(async move {
                service.tick_loop().await;
            })
        };

        tracing::info!("All background tasks started");
    }

    pub fn status(&self) -> NodeStatus {
        lock(&self.controller).status()
    }

    async fn receive_loop(self: Arc<Self>) {
        let controller = self.controller.clone();

        self.transport
            .clone()
            .receive_loop(move |sender, msg| {
                lock(&controller).process_msg(sender, msg);
            })
            .await;
    }

    async fn tick_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(self.keepalive_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            tracing::trace!("Executing timer task...");
            lock(&self.controller).on_tick();
        }
    }
}

// A panic inside a handler leaves the state as consistent as any lost datagram would.
fn lock(controller: &Mutex<NodeRoleController>) -> MutexGuard<'_, NodeRoleController> {
    controller.lock().unwrap_or_else(PoisonError::into_inner)
}
