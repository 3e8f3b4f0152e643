//! # Common Test Utilities
//!
//! A full application harness that spawns the server on a random port,
//! configured against a single `httpmock::MockServer` that stands in for
//! both the document registry and the extraction service.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use pubmeta_server::{config, router, state::build_app_state};
use reqwest::Client;
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::TempDir;
use tokio::{net::TcpListener, task::JoinHandle};

/// Registry mock endpoints live under this prefix on the mock server.
pub const REGISTRY_PREFIX: &str = "/registry";
/// Extraction mock endpoints live under this prefix on the mock server.
pub const EXTRACTION_PREFIX: &str = "/extract";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application with both upstreams configured.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start();
        let extraction_url = mock_server.url(EXTRACTION_PREFIX);
        TestApp::spawn_with_extraction_url(mock_server, Some(extraction_url)).await
    }

    /// Spawns the application without an extraction service, exercising the
    /// 503 "not configured" path.
    pub async fn spawn_unconfigured() -> Result<Self> {
        let mock_server = MockServer::start();
        TestApp::spawn_with_extraction_url(mock_server, None).await
    }

    async fn spawn_with_extraction_url(
        mock_server: MockServer,
        extraction_url: Option<String>,
    ) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let config_dir = TempDir::new()?;
        let config_path = config_dir.path().join("config.yml");
        let extraction_section = match &extraction_url {
            Some(url) => format!("extraction:\n  base_url: \"{url}\"\n"),
            None => String::new(),
        };
        let config_content = format!(
            r#"
port: 0
{extraction_section}registry:
  base_url: "{}"
  api_key: "test-registry-key"
"#,
            mock_server.url(REGISTRY_PREFIX),
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        let app_state = build_app_state(config).await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
