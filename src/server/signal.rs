// Signal handling module
//
// Supported signals:
// - SIGHUP:  Re-run controller discovery and drop cached views
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

/// Start signal handlers (Unix only)
///
/// Spawns a background task listening for Unix signals.
///
/// | Signal  | Action                              |
/// |---------|-------------------------------------|
/// | SIGHUP  | Rebuild the controller registry     |
/// | SIGTERM | Stop accepting connections          |
/// | SIGINT  | Stop accepting connections          |
#[cfg(unix)]
pub fn start_signal_handler(state: Arc<AppState>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let registered = (
            signal(SignalKind::hangup()),
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        );
        let (mut sighup, mut sigterm, mut sigint) = match registered {
            (Ok(hup), Ok(term), Ok(int)) => (hup, term, int),
            (hup, term, int) => {
                for err in [hup.err(), term.err(), int.err()].into_iter().flatten() {
                    logger::log_error(&format!("Failed to register signal handler: {err}"));
                }
                return;
            }
        };

        logger::log_info(&format!(
            "[SIGNAL] Handlers registered (pid {}): \
             SIGHUP reloads controllers, SIGTERM/SIGINT stop",
            std::process::id()
        ));

        loop {
            tokio::select! {
                _ = sighup.recv() => {
                    logger::log_info("[SIGNAL] SIGHUP received, reloading controllers");
                    reload(&state).await;
                }
                _ = sigterm.recv() => {
                    logger::log_info("[SIGNAL] SIGTERM received, initiating graceful shutdown");
                    state.shutdown.notify_one();
                    break;
                }
                _ = sigint.recv() => {
                    logger::log_info("[SIGNAL] SIGINT received, initiating graceful shutdown");
                    state.shutdown.notify_one();
                    break;
                }
            }
        }
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(state: Arc<AppState>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_info("[SIGNAL] Ctrl+C received, initiating graceful shutdown");
            state.shutdown.notify_one();
        }
    });
}

/// Run discovery on the blocking pool
#[cfg(unix)]
async fn reload(state: &Arc<AppState>) {
    let application = Arc::clone(&state.app);
    match tokio::task::spawn_blocking(move || application.reload()).await {
        Ok(count) => logger::log_info(&format!("[SIGNAL] Reload complete: {count} controllers")),
        Err(e) => logger::log_error(&format!("Reload task failed: {e}")),
    }
}
