//! Example: Transparent session recovery against a live backend
//!
//! This example wires the full client stack - shared cookie jar, refresh
//! client, session manager, API client - and runs a couple of calls. When
//! the backend answers 401, recovery and replay happen inside the client;
//! nothing here handles it.
//!
//! # Setup
//!
//! 1. Point the client at a backend: ```bash export
//!    HIRELOOP_API_BASE_URL=https://api.hireloop.io/v1 ```
//!
//! 2. Provide credentials to sign in with: ```bash export
//!    HIRELOOP_EMAIL=you@example.com HIRELOOP_PASSWORD=... ```
//!
//! 3. Run this example: ```bash cargo run --example session_recovery ```

use std::sync::Arc;

use hireloop_common::auth::{
    MemorySessionStore, NoopRedirect, RefreshClient, SessionConfig, SessionManager,
};
use hireloop_domain::JobQuery;
use hireloop_infra::api::{
    ApiClient, ApiClientConfig, ApiCommands, LoginRequest, SessionAuthService,
};
use reqwest::cookie::Jar;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("HireLoop Session Recovery Example");
    println!("=================================\n");

    let config = ApiClientConfig::from_env();
    println!("Backend: {}\n", config.base_url);

    // One jar shared by the API transport and the refresh client; a
    // successful refresh rotates the credential for both.
    let jar = Arc::new(Jar::default());
    let session_config = SessionConfig::new(config.base_url.clone());
    let refresher = Arc::new(RefreshClient::new(&session_config, Arc::clone(&jar))?);
    let manager = Arc::new(SessionManager::new(
        refresher,
        Arc::new(MemorySessionStore::new()),
        Arc::new(NoopRedirect),
    ));

    let recovery = SessionAuthService::new(Arc::clone(&manager));
    let client = ApiClient::new(config, Arc::new(recovery), jar)?;
    let commands = ApiCommands::new(Arc::new(client));

    match (std::env::var("HIRELOOP_EMAIL"), std::env::var("HIRELOOP_PASSWORD")) {
        (Ok(email), Ok(password)) => {
            println!("Signing in as {email}...");
            let user = commands.login(&LoginRequest { email, password }).await?;
            manager.establish_session(user.clone()).await?;
            println!("✓ Signed in: {} ({:?})\n", user.display_name, user.role);

            // If the session cookie expires between calls, the 401 is
            // recovered and the request replayed without surfacing here.
            let account = commands.current_account().await?;
            println!("✓ Account check: {}", account.email);

            let jobs = commands.list_jobs(&JobQuery::default()).await?;
            println!("✓ {} job postings visible (of {})", jobs.items.len(), jobs.total);
        }
        _ => {
            println!("ℹ️  HIRELOOP_EMAIL / HIRELOOP_PASSWORD not set");
            println!("   Set both to sign in and exercise authenticated calls.\n");

            // Public listing works without a session.
            let jobs = commands.list_jobs(&JobQuery::default()).await?;
            println!("✓ {} public job postings (of {})", jobs.items.len(), jobs.total);
        }
    }

    Ok(())
}
