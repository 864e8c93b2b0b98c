use clap::{Parser, Subcommand};
use serde_json::json;

use warden_api::auth::token::{self, Claims};
use warden_api::config;

/// Developer CLI for the Warden API
#[derive(Parser)]
#[command(name = "warden", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mint a signed token for local development and testing
    Mint {
        /// Principal identifier to embed in the token
        #[arg(long)]
        principal: String,
        /// Permission string to grant; repeat for multiple
        #[arg(short, long = "permission")]
        permissions: Vec<String>,
        /// Token lifetime in hours (defaults to the configured expiry)
        #[arg(long)]
        expiry_hours: Option<u64>,
    },
    /// Verify a token and print its claims
    Inspect {
        token: String,
    },
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let security = &config::config().security;

    match cli.command {
        Command::Mint {
            principal,
            permissions,
            expiry_hours,
        } => {
            let hours = expiry_hours.unwrap_or(security.jwt_expiry_hours);
            let claims = Claims::new(principal, permissions, hours);
            let jwt = token::mint(&claims, security.jwt_secret.as_bytes())?;
            println!("{}", jwt);
        }
        Command::Inspect { token: raw } => {
            match token::verify(&raw, security.jwt_secret.as_bytes()) {
                Some(claims) => println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "principal": claims.sub,
                        "permissions": claims.permissions,
                        "issued_at": claims.iat,
                        "expires_at": claims.exp,
                    }))?
                ),
                None => anyhow::bail!("token is invalid or expired"),
            }
        }
    }

    Ok(())
}
