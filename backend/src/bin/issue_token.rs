//! Mint a bearer token signed with the configured `JWT_SECRET`.
//!
//! Useful for exercising the API locally when `JWT_REQUIRED=true`.

use std::time::Duration;

use clap::Parser;
use users_api::outbound::token::JwtTokenVerifier;
use users_api::settings::AuthSettings;

#[derive(Debug, Parser)]
#[command(name = "issue-token", about = "Issue a signed bearer token")]
struct Args {
    /// Value of the `sub` claim.
    #[arg(long, default_value = "users-api-operator")]
    subject: String,
    /// Override `JWT_EXPIRATION_SECS` for this token.
    #[arg(long)]
    ttl_secs: Option<u64>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let auth = AuthSettings::from_env()?;
    let lifetime = args
        .ttl_secs
        .map_or_else(|| auth.expiration(), Duration::from_secs);
    let verifier = JwtTokenVerifier::new(auth.secret().as_bytes(), lifetime);
    println!("{}", verifier.issue(&args.subject)?);
    Ok(())
}
