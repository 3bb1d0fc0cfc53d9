//! CLI commands

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use vigil_core::{SessionData, SessionEvent, SessionSnapshot, SessionWatcher};
use vigil_http::{AuthClient, ClientError};

use crate::settings::Settings;

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the session endpoint and print each settled state
    Watch {
        /// Exit after the first check
        #[arg(long)]
        once: bool,
    },

    /// Fetch the current session once and print it
    Check,

    /// Configuration file operations
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the default configuration as TOML
    Init {
        /// Output file path (prints to stdout when omitted)
        output: Option<PathBuf>,
    },

    /// Print the effective configuration with credentials masked
    Show,
}

impl Commands {
    pub async fn execute(self, settings: Settings) -> Result<()> {
        match self {
            Self::Watch { once } => watch(settings, once).await,
            Self::Check => check(&settings).await,
            Self::Config { command } => command.execute(&settings),
        }
    }
}

impl ConfigCommands {
    fn execute(self, settings: &Settings) -> Result<()> {
        match self {
            Self::Init { output } => {
                let content = toml::to_string_pretty(&Settings::default())?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, content)?;
                        info!("Configuration written to: {}", path.display());
                    }
                    None => print!("{content}"),
                }
                Ok(())
            }
            Self::Show => {
                print!("{}", toml::to_string_pretty(&settings.redacted())?);
                Ok(())
            }
        }
    }
}

fn render_snapshot(snapshot: &SessionSnapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

fn print_snapshot(snapshot: &SessionSnapshot) -> Result<()> {
    println!("{}", render_snapshot(snapshot)?);
    Ok(())
}

async fn watch(settings: Settings, once: bool) -> Result<()> {
    let client = settings.client.build_client()?;

    if once {
        let snapshot = first_snapshot(client, settings.watcher.interval()).await?;
        return print_snapshot(&snapshot);
    }

    let watcher = SessionWatcher::builder(Arc::new(client))
        .interval(settings.watcher.interval())
        .start()
        .await?;

    let mut state_rx = watcher.subscribe();
    let mut last_reported: Option<Option<SessionData>> = None;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                result?;
                info!("Received shutdown signal");
                watcher.shutdown();
                break;
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }

                let snapshot = state_rx.borrow_and_update().clone();
                if snapshot.is_pending {
                    continue;
                }

                if last_reported.as_ref() == Some(&snapshot.data) {
                    debug!("Session unchanged");
                    continue;
                }

                info!(signed_in = snapshot.is_authenticated(), "Session changed");
                print_snapshot(&snapshot)?;
                last_reported = Some(snapshot.data);
            }
        }
    }

    Ok(())
}

/// Start a watcher, wait for its first check and stop it again
async fn first_snapshot(client: AuthClient, interval: Duration) -> Result<SessionSnapshot> {
    let watcher = SessionWatcher::builder(Arc::new(client))
        .interval(interval)
        .start()
        .await?;

    let snapshot = watcher.wait_until_ready().await;
    watcher.shutdown();
    Ok(snapshot)
}

async fn check(settings: &Settings) -> Result<()> {
    let client = settings.client.build_client()?;

    let (snapshot, failure) = check_snapshot(&client).await;
    print_snapshot(&snapshot)?;

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// One check outside any watcher. A failure still yields the cleared snapshot.
async fn check_snapshot(client: &AuthClient) -> (SessionSnapshot, Option<ClientError>) {
    let (event, failure) = match client.get_session().await {
        Ok(data) => (SessionEvent::CheckSucceeded(data), None),
        Err(e) => {
            error!("Session check error: {}", e);
            (SessionEvent::CheckFailed(e.to_string()), Some(e))
        }
    };

    let snapshot = SessionSnapshot::default()
        .apply(SessionEvent::CheckStarted)
        .apply(event);
    (snapshot, failure)
}
