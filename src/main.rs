//! Showreel - a headless presentation engine for dashboard-style UIs
//! Drives theme resolution, rotations, and text reveals over a host sink

mod config;
mod features;
mod platform;
mod session;
mod sink;

use std::sync::Arc;
use std::time::Duration;

use config::RegionId;
use features::ThemePreference;
use features::prefs::FileStore;
use platform::scheduler::TokioScheduler;
use platform::signal::DesktopSignal;
use session::runtime::SessionRuntime;
use session::{PresentationSession, SessionEvent};
use sink::TracingSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let (session, receiver) = PresentationSession::new(
        Arc::new(FileStore::new()),
        DesktopSignal::new(),
        Arc::new(TokioScheduler),
        Arc::new(TracingSink),
    );
    let commands = session.sender();

    // Optional theme override from the environment.
    if let Ok(value) = std::env::var("SHOWREEL_THEME") {
        match value.parse::<ThemePreference>() {
            Ok(preference) => {
                let _ = commands.send(SessionEvent::SetThemePreference(preference));
            }
            Err(error) => tracing::warn!(%error, "ignoring SHOWREEL_THEME"),
        }
    }

    for region in config::load_regions() {
        let _ = commands.send(SessionEvent::MountRegion(region));
    }

    let pump = tokio::spawn(SessionRuntime::new(session, receiver).run());

    // Scripted dashboard changes, standing in for a host UI.
    let script = commands.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(15)).await;
        // The greeting is one-shot; retire its region once it has played.
        let _ = script.send(SessionEvent::UnmountRegion(RegionId::new("greeting")));

        tokio::time::sleep(Duration::from_secs(15)).await;
        // A fourth announcement arrived; rotate over the larger set.
        let _ = script.send(SessionEvent::RestartRotation {
            region: RegionId::new("announcements"),
            sequence_length: 4,
        });
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    let _ = commands.send(SessionEvent::Shutdown);
    pump.await?;
    Ok(())
}
