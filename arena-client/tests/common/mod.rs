//! Shared helpers for backend integration tests.

#![allow(dead_code)]

use std::net::TcpListener;
use std::time::Duration;

use arena_client::ClientConfig;
use wiremock::MockServer;

/// PNG signature, enough for MIME sniffing.
pub const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Config pointing at a mock backend.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.uri()).expect("config")
}

/// Base URL of a port nothing listens on.
///
/// Binds an ephemeral port and releases it straight away. Mock servers are
/// pooled, so dropping one does not free its port.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Config with a short probe timeout for delay tests.
pub fn fast_probe(config: ClientConfig) -> ClientConfig {
    config.with_probe_timeout(Duration::from_millis(100))
}
