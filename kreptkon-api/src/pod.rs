//! Pod identity detection

use serde::Serialize;
use tokio::net::lookup_host;

/// Identity of the pod (or host) serving this process.
///
/// Resolved once at startup and carried in the shared state; request handlers
/// never read process globals.
#[derive(Debug, Clone, Serialize)]
pub struct PodInfo {
    pub pod_name: String,
    pub pod_ip: String,
}

impl PodInfo {
    /// Detect the pod name from `HOSTNAME` and resolve its IPv4 address.
    ///
    /// Falls back to "unknown" when either is unavailable, e.g. outside a
    /// Kubernetes pod.
    pub async fn detect() -> Self {
        let pod_name = std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string());
        let pod_ip = match lookup_host((pod_name.as_str(), 0)).await {
            Ok(mut addrs) => addrs
                .find(|addr| addr.is_ipv4())
                .map(|addr| addr.ip().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            Err(_) => "unknown".to_string(),
        };

        Self { pod_name, pod_ip }
    }
}
