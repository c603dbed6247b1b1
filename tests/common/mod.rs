use std::net::TcpListener as StdListener;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use assert_cmd::Command;
use booking_api::{cms::UnconfiguredCms, mailer::DisabledMailer, AppState};
use booking_config::{Config, ConfigManager};
use tempfile::TempDir;

pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Isolated `TRANSFER_BOOKING_HOME` whose config points the shell at
/// `api_base`.
pub struct CliHarness {
    home: TempDir,
}

impl CliHarness {
    pub fn with_api_base(api_base: &str) -> Self {
        let home = tempfile::tempdir().expect("create temp dir");
        let manager =
            ConfigManager::with_base_dir(home.path().to_path_buf()).expect("config manager");
        let mut config = Config::default();
        config.client.api_base = api_base.to_string();
        config.client.timeout_secs = 5;
        manager.save(&config).expect("write config");
        Self { home }
    }

    /// Harness talking to a freshly started in-process intake service.
    pub fn with_service() -> Self {
        Self::with_api_base(&start_service())
    }

    /// Harness whose service address refuses connections.
    pub fn offline() -> Self {
        let listener = StdListener::bind("127.0.0.1:0").expect("bind probe port");
        let addr = listener.local_addr().expect("probe addr");
        drop(listener);
        Self::with_api_base(&format!("http://{addr}"))
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn run_script(&self, script: &str) -> CliOutput {
        let mut cmd = Command::cargo_bin("transfer_booking_cli").expect("binary exists");
        cmd.env("TRANSFER_BOOKING_HOME", self.home())
            .env("TRANSFER_BOOKING_CLI_SCRIPT", "1")
            .env("RUST_LOG", "off")
            .write_stdin(script.to_string());
        let output = cmd.output().expect("run script CLI");
        if !output.status.success() {
            panic!(
                "script CLI failed: status={}\nstdout:\n{}\nstderr:\n{}",
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Starts the intake service on an ephemeral port with mail and CMS
/// switched off. Returns its base URL.
pub fn start_service() -> String {
    let listener = StdListener::bind("127.0.0.1:0").expect("bind service port");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().expect("service addr");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            let state = AppState::new(
                Arc::new(DisabledMailer),
                Arc::new(UnconfiguredCms),
                "ops@example.com",
            );
            booking_api::run(
                listener,
                state,
                Duration::from_secs(10),
                std::future::pending(),
            )
            .await
            .expect("service runs");
        });
    });

    format!("http://{addr}")
}

/// A complete return booking priced at 190 EUR, ending on the summary.
pub const RETURN_BOOKING: &str = "\
set type return
set collectionPoint \"Geneva Airport\"
set destinationPoint Verbier
next
set collectionDate 2099-01-10
set collectionTime 09:30
set returnDate 2099-01-20
set returnTime 14:00
next
set adults 3
next
set suitcases 2
next
set name \"Ada Lovelace\"
set email ada@example.com
set phone \"+41 79 123 45 67\"
next
";
