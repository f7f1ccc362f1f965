use super::{ColorEntry, ColorMonitor};
use crate::config::ClusterConfig;
use crate::protocol::types::NodeAddress;
use crate::transport::udp::UdpTransport;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Runs a `ColorMonitor` on the cluster socket: one receive loop, one poll loop.
pub struct MonitorService {
    pub local_addr: NodeAddress,
    monitor: Arc<ColorMonitor>,
    transport: Arc<UdpTransport>,
    poll_interval: Duration,
}

impl MonitorService {
    pub async fn new(config: &ClusterConfig, local_addr: NodeAddress) -> Result<Arc<Self>> {
        let transport = UdpTransport::bind(config.listen_addr(), config.broadcast_ip).await?;
        Ok(Self::with_transport(config, local_addr, transport))
    }

    pub fn with_transport(
        config: &ClusterConfig,
        local_addr: NodeAddress,
        transport: Arc<UdpTransport>,
    ) -> Arc<Self> {
        Arc::new(Self {
            local_addr,
            monitor: Arc::new(ColorMonitor::new(local_addr)),
            transport,
            poll_interval: config.monitor_poll_interval,
        })
    }

    pub async fn start(self: Arc<Self>) {
        tracing::info!("Starting color monitor on {}...", self.local_addr);

        let _receive_handle = {
            let monitor = self.monitor.clone();
            let transport = self.transport.clone();
            tokio::spawn(async move {
                transport
                    .receive_loop(move |sender, msg| monitor.process_msg(sender, msg))
                    .await;
            })
        };

        let _poll_handle = {
            let service = self.clone();
            tokio::spawn(async move {
                service.poll_loop().await;
            })
        };
    }

    pub fn colors(&self) -> Vec<ColorEntry> {
        self.monitor.snapshot()
    }

    async fn poll_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(self.poll_interval);

        loop {
            interval.tick().await;
            self.monitor.poll(&*self.transport);
        }
    }
}
