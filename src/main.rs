use clap::Parser;
use color_cluster::config::ClusterConfig;
use color_cluster::discovery;
use color_cluster::monitor::service::MonitorService;
use color_cluster::node::service::NodeService;
use color_cluster::protocol::types::NodeAddress;
use color_cluster::status;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// A node of the self-organizing color cluster.
#[derive(Parser, Debug)]
#[command(name = "color-cluster", version, about)]
struct Cli {
    /// Run as a read-only color monitor instead of a cluster node.
    #[arg(long)]
    monitor: bool,

    /// UDP port shared by every node.
    #[arg(long, default_value_t = 9999)]
    port: u16,

    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0")]
    listen: Ipv4Addr,

    /// Broadcast address of the cluster segment.
    #[arg(long, default_value = "10.0.1.255")]
    broadcast: Ipv4Addr,

    /// Prefix used to find this node's own address among the interfaces.
    #[arg(long, default_value = "10.0.1.")]
    ip_prefix: String,

    /// This node's address; skips interface discovery.
    #[arg(long)]
    node_address: Option<Ipv4Addr>,

    #[arg(long, default_value_t = 5)]
    keepalive_secs: u64,

    #[arg(long, default_value_t = 20)]
    leader_dead_secs: u64,

    #[arg(long, default_value_t = 20)]
    node_dead_secs: u64,

    /// Fraction of the cluster kept RED.
    #[arg(long, default_value_t = 1.0 / 3.0)]
    red_ratio: f64,

    #[arg(long, default_value_t = 3)]
    monitor_poll_secs: u64,

    /// Serve the read-only HTTP status endpoint on this port.
    #[arg(long)]
    http_port: Option<u16>,

    /// Do not re-send colors to members that report a stale one.
    #[arg(long)]
    no_reassert_colors: bool,

    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

impl Cli {
    fn into_config(self) -> ClusterConfig {
        ClusterConfig {
            listen_ip: self.listen,
            port: self.port,
            broadcast_ip: self.broadcast,
            ip_prefix: self.ip_prefix,
            node_address: self.node_address,
            keepalive_interval: Duration::from_secs(self.keepalive_secs),
            leader_dead_after: Duration::from_secs(self.leader_dead_secs),
            node_dead_after: Duration::from_secs(self.node_dead_secs),
            red_ratio: self.red_ratio,
            monitor_poll_interval: Duration::from_secs(self.monitor_poll_secs),
            http_port: self.http_port,
            reassert_colors: !self.no_reassert_colors,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .init();

    let run_monitor = cli.monitor;
    let config = cli.into_config();
    config.validate()?;

    let local_addr = match config.node_address {
        Some(ip) => NodeAddress(ip),
        None => discovery::local_address(&config.ip_prefix)?,
    };
    tracing::info!("Local address: {}", local_addr);

    let router = if run_monitor {
        let monitor = MonitorService::new(&config, local_addr).await?;
        monitor.clone().start().await;
        status::monitor_router(monitor)
    } else {
        let node = NodeService::new(&config, local_addr).await?;
        node.clone().start().await;
        status::node_router(node)
    };

    if let Some(http_port) = config.http_port {
        let http_addr = SocketAddr::new(config.listen_ip.into(), http_port);
        tokio::spawn(async move {
            if let Err(e) = status::serve(router, http_addr).await {
                tracing::error!("HTTP status server failed: {}", e);
            }
        });
    }

    tracing::info!("Press Ctrl+C to shutdown");
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    Ok(())
}
