//! Read-only HTTP view of a running node or monitor.
//!
//! - `GET /status`: role, election state, color, leader and (on the leader) members.
//! - `GET /colors`: the monitor's color table in address order.

use crate::monitor::ColorEntry;
use crate::monitor::service::MonitorService;
use crate::node::service::NodeService;
use crate::node::types::NodeStatus;

use anyhow::Result;
use axum::extract::Extension;
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;

pub const ENDPOINT_STATUS: &str = "/status";
pub const ENDPOINT_COLORS: &str = "/colors";

pub fn node_router(service: Arc<NodeService>) -> Router {
    Router::new()
        .route(ENDPOINT_STATUS, get(handle_node_status))
        .layer(Extension(service))
}

pub fn monitor_router(service: Arc<MonitorService>) -> Router {
    Router::new()
        .route(ENDPOINT_COLORS, get(handle_colors))
        .layer(Extension(service))
}

pub async fn handle_node_status(Extension(service): Extension<Arc<NodeService>>) -> Json<NodeStatus> {
    Json(service.status())
}

pub async fn handle_colors(Extension(service): Extension<Arc<MonitorService>>) -> Json<Vec<ColorEntry>> {
    Json(service.colors())
}

pub async fn serve(router: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP status server listening on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClusterConfig;
    use crate::node::types::{ElectionState, OperationMode};
    use crate::protocol::types::{NodeAddress, NodeColor};
    use crate::transport::udp::UdpTransport;
    use std::net::Ipv4Addr;

    async fn loopback_transport() -> Arc<UdpTransport> {
        UdpTransport::bind("127.0.0.1:0".parse().unwrap(), Ipv4Addr::LOCALHOST)
            .await
            .expect("bind")
    }

    #[tokio::test]
    async fn test_fresh_node_status() {
        let config = ClusterConfig::default();
        let local = NodeAddress::new(127, 0, 0, 1);
        let service = NodeService::with_transport(&config, local, loopback_transport().await);

        let Json(status) = handle_node_status(Extension(service)).await;

        assert_eq!(status.node, local);
        assert_eq!(status.mode, OperationMode::Slave);
        assert_eq!(status.election_state, ElectionState::Init);
        assert_eq!(status.color, NodeColor::Init);
        assert_eq!(status.leader, None);
        assert!(status.members.is_empty());
    }

    #[tokio::test]
    async fn test_monitor_colors_empty() {
        let config = ClusterConfig::default();
        let service = MonitorService::with_transport(
            &config,
            NodeAddress::new(127, 0, 0, 1),
            loopback_transport().await,
        );

        let Json(colors) = handle_colors(Extension(service)).await;
        assert!(colors.is_empty());
    }
}
