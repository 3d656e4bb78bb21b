use crate::portal::validation::{valid_email, valid_name};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_ADMIN_NAME: &str = "admin-name";
pub const ARG_ADMIN_EMAIL: &str = "admin-email";
pub const ARG_ADMIN_SECRET_CODE: &str = "admin-secret-code";

#[derive(Debug, Clone)]
pub struct Options {
    pub name: String,
    pub email: String,
    pub secret_code: SecretString,
}

impl Options {
    /// Parse and validate the seeded administrator account.
    ///
    /// # Errors
    /// Returns an error if the name or email would be rejected by `/register`,
    /// or if the secret code is blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let get = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

        let name = get(ARG_ADMIN_NAME);
        if !valid_name(&name) {
            anyhow::bail!("invalid --{ARG_ADMIN_NAME}: must be 1-100 characters");
        }

        let email = get(ARG_ADMIN_EMAIL);
        if !valid_email(&email) {
            anyhow::bail!("invalid --{ARG_ADMIN_EMAIL}: {email}");
        }

        let secret_code = get(ARG_ADMIN_SECRET_CODE);
        if secret_code.trim().is_empty() {
            anyhow::bail!("missing required argument: --{ARG_ADMIN_SECRET_CODE}");
        }

        Ok(Self {
            name,
            email,
            secret_code: SecretString::from(secret_code),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ADMIN_NAME)
                .long(ARG_ADMIN_NAME)
                .help("Display name of the seeded administrator")
                .default_value("Admin User")
                .env("COMPLAINT_PORTAL_ADMIN_NAME"),
        )
        .arg(
            Arg::new(ARG_ADMIN_EMAIL)
                .long(ARG_ADMIN_EMAIL)
                .help("Email of the seeded administrator")
                .default_value("admin@bugsmirror.com")
                .env("COMPLAINT_PORTAL_ADMIN_EMAIL"),
        )
        .arg(
            Arg::new(ARG_ADMIN_SECRET_CODE)
                .long(ARG_ADMIN_SECRET_CODE)
                .help("Secret code of the seeded administrator")
                .long_help(
                    "Secret code of the seeded administrator. It is the only credential for administrator endpoints, so override the default outside local development.",
                )
                .default_value("ADMIN123")
                .env("COMPLAINT_PORTAL_ADMIN_SECRET_CODE")
                .hide_env_values(true),
        )
}
