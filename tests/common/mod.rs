//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use console_router::config::RouterConfig;
use console_router::http::HttpServer;
use console_router::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// A router service running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server for `config` and wait until it accepts connections.
pub async fn start_server(config: RouterConfig) -> TestServer {
    let nav = config.navigation.build_router().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, nav);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    TestServer {
        addr,
        shutdown,
        client,
    }
}
