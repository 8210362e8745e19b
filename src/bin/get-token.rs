//! Acquire a bearer token and print it to stdout.
//!
//! Resolves configuration from flags or the environment (a `.env` file in
//! the working directory is honored). With `--user-token` set, the token is
//! validated through the passthrough path instead of hitting the endpoint.

use anyhow::Result;
use clap::Parser;

use apim_auth::utils::logging::{init_logging, LogFormat};
use apim_auth::{AuthMode, Credentials, PassthroughToken, ProviderSettings, TokenProvider};

const USER_TOKEN_ENV: &str = "USER_ACCESS_TOKEN";

#[derive(Debug, Parser)]
#[command(name = "get-token", about = "Acquire an OAuth2 bearer token")]
struct Args {
    /// Application identifier, used in diagnostics only
    #[arg(long, default_value = "get-token")]
    app: String,

    #[arg(long, env = "AZURE_TENANT_ID")]
    tenant_id: Option<String>,

    #[arg(long, env = "AZURE_CLIENT_ID")]
    client_id: Option<String>,

    #[arg(long, env = "AZURE_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// OAuth2 scope, e.g. "api://<resource>/.default"
    #[arg(long, env = "APIM_SCOPE")]
    scope: Option<String>,

    /// Pre-issued token: printed back through the passthrough path,
    /// no network call
    #[arg(long, env = "USER_ACCESS_TOKEN", hide_env_values = true)]
    user_token: Option<String>,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_logging(&args.log_level, args.log_format);

    let mode = if args.user_token.is_some() {
        AuthMode::Passthrough(PassthroughToken::new(USER_TOKEN_ENV, args.user_token.clone()))
    } else {
        AuthMode::ClientCredentials(Credentials::for_tenant(
            args.tenant_id.unwrap_or_default(),
            args.client_id.unwrap_or_default(),
            args.client_secret.unwrap_or_default(),
            args.scope.unwrap_or_default(),
        ))
    };

    let provider = TokenProvider::new(&args.app, mode, ProviderSettings::default())?;
    let token = provider.get_token().await?;
    println!("{token}");
    Ok(())
}
