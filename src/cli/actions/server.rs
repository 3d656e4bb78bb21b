use crate::{cli::globals::GlobalArgs, portal};
use anyhow::Result;
use secrecy::SecretString;
use std::net::IpAddr;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub address: IpAddr,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_secret_code: SecretString,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the administrator cannot be seeded or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let globals = GlobalArgs::new(args.admin_name, args.admin_email, args.admin_secret_code);

    portal::new(args.address, args.port, &globals).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}:{}", args.address, args.port)),
        ("admin_name", args.admin_name.clone()),
        ("admin_email", args.admin_email.clone()),
        ("admin_secret_code", "***".to_string()),
    ];

    for (key, value) in entries {
        info!("{key}: {value}");
    }
}
