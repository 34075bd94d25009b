mod args;
mod error;
mod routes;

pub use args::{Args, ClientArgs, Command, ServeArgs};
pub use error::Error;
pub use routes::{router, AppState};

use airdrop::{EligibilityChecker, EligibilityResult};
use axum::http::HeaderName;
use chrono::Utc;
use github_client::{GithubClient, GithubClientBuilder};
use log::info;

pub fn github_checker(args: ClientArgs) -> Result<EligibilityChecker<GithubClient>, Error> {
    let mut client = GithubClientBuilder::default().with_github_url(args.api_url);
    if let Some(token) = args.api_token {
        client = client.try_with_token(token)?;
    }
    let client = client.build()?;
    Ok(EligibilityChecker::new(client))
}

/// Evaluates `username` against GitHub right now.
pub async fn check(args: ClientArgs, username: &str) -> Result<EligibilityResult, Error> {
    let checker = github_checker(args)?;
    Ok(checker.check(username, Utc::now()).await?)
}

pub fn app(client: ClientArgs, identity_header: &str) -> Result<axum::Router, Error> {
    let identity_header = HeaderName::try_from(identity_header.trim())
        .map_err(|_| Error::IdentityHeader(identity_header.to_string()))?;
    let checker = github_checker(client)?;
    Ok(router(AppState::new(checker, identity_header)))
}

pub async fn serve(client: ClientArgs, args: ServeArgs) -> Result<(), Error> {
    let app = app(client, &args.identity_header)?;
    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!("Airdrop checker listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
