//! HTTP API and chat page.
//!
//! ## Endpoints
//!
//! - `GET /` - Chat page for the cookie-identified session
//! - `POST /chat` - Form submission from the chat page
//! - `POST /reset` - Discard the current session
//! - `POST /api/chat` - Stateless turn with caller-supplied history
//! - `POST /api/sessions` - Create a session
//! - `GET /api/sessions/:id/messages` - Session message log
//! - `POST /api/sessions/:id/chat` - Turn against a session
//! - `DELETE /api/sessions/:id` - Discard a session
//! - `GET /api/tools` - Registered tools
//! - `GET /api/health` - Health check

mod chat;
mod routes;
pub mod types;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::agent::Agent;
use crate::config::Config;

pub use routes::{router, AppState};
pub use ui::SESSION_COOKIE;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Start the HTTP server and run until it stops.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let agent = Arc::new(Agent::new(&config)?);
    info!(
        tools = agent.tools().len(),
        model = %agent.model(),
        "Agent ready"
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config, agent));

    let idle = state.config.session_idle_timeout;
    let sweep_every = idle.clamp(Duration::from_secs(1), SESSION_SWEEP_INTERVAL);
    let sweep = state.sessions.spawn_idle_sweep(idle, sweep_every);
    info!(idle_secs = idle.as_secs(), "Idle session sweep started");

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    let served = axum::serve(listener, app).await;
    sweep.abort();
    served?;

    Ok(())
}
