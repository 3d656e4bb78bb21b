//! Command-line argument dispatch.
//!
//! Maps parsed CLI matches to the action the binary executes, validating the
//! seeded administrator account before anything binds a socket.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_ADDRESS, ARG_PORT, admin};
use anyhow::{Context, Result};
use std::net::IpAddr;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8081);
    let address = matches
        .get_one::<IpAddr>(ARG_ADDRESS)
        .copied()
        .context("missing required argument: --address")?;

    let admin_opts = admin::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        address,
        admin_name: admin_opts.name,
        admin_email: admin_opts.email,
        admin_secret_code: admin_opts.secret_code,
    }))
}
