use std::path::Path;
use std::time::Duration;

use log::info;
use tokio::process::{Child, Command};
use tokio::time::sleep;

use super::SessionError;

/// Owns the chromedriver child process for the length of a run.
///
/// The child is also killed when this value is dropped, so an early return
/// never leaves a stray driver behind.
pub struct ChromeDriverProcess {
    process: Child,
    port: u16,
}

impl ChromeDriverProcess {
    /// Starts the driver binary at `path` listening on `port`, then waits
    /// `grace` for it to accept connections.
    pub async fn spawn(path: &Path, port: u16, grace: Duration) -> Result<Self, SessionError> {
        let process = Command::new(path)
            .arg(format!("--port={}", port))
            .kill_on_drop(true)
            .spawn()?;

        info!("Started chromedriver ({}) on port {}", path.display(), port);
        sleep(grace).await;

        Ok(Self { process, port })
    }

    pub fn server_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub async fn stop(mut self) -> Result<(), SessionError> {
        self.process.kill().await?;
        info!("Stopped chromedriver");
        Ok(())
    }
}
