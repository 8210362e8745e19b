// tests/common/mod.rs
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;

use axum::Router;
use httpmock::MockServer;

use crate::config::credentials::Credentials;
use crate::config::settings::ProviderSettings;
use crate::resilience::retry::RetrySettings;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Credentials pointing at a mock token endpoint.
pub fn mock_credentials(server: &MockServer) -> Credentials {
    Credentials::new(
        "test-tenant",
        "test-client",
        "test-secret",
        "api://resource/.default",
        format!("{}/token", server.base_url()),
    )
}

/// Credentials pointing at an arbitrary local address.
pub fn credentials_for_addr(addr: SocketAddr) -> Credentials {
    Credentials::new(
        "test-tenant",
        "test-client",
        "test-secret",
        "api://resource/.default",
        format!("http://{addr}/token"),
    )
}

/// Provider settings with millisecond backoff so tests stay fast.
pub fn fast_settings() -> ProviderSettings {
    ProviderSettings {
        retry: RetrySettings {
            attempts: 3,
            base_delay_ms: 5,
            max_delay_ms: 20,
        },
        ..ProviderSettings::default()
    }
}
