use secrecy::SecretString;

/// Runtime settings shared with the HTTP layer.
#[derive(Clone)]
pub struct GlobalArgs {
    pub admin_name: String,
    pub admin_email: String,
    pub admin_secret_code: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(admin_name: String, admin_email: String, admin_secret_code: SecretString) -> Self {
        Self {
            admin_name,
            admin_email,
            admin_secret_code,
        }
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("admin_name", &self.admin_name)
            .field("admin_email", &self.admin_email)
            .field("admin_secret_code", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "Admin User".to_string(),
            "admin@bugsmirror.com".to_string(),
            SecretString::from("ADMIN123"),
        );
        assert_eq!(args.admin_name, "Admin User");
        assert_eq!(args.admin_secret_code.expose_secret(), "ADMIN123");
    }

    #[test]
    fn debug_redacts_secret_code() {
        let args = GlobalArgs::new(
            "Admin User".to_string(),
            "admin@bugsmirror.com".to_string(),
            SecretString::from("ADMIN123"),
        );
        let debug = format!("{args:?}");
        assert!(debug.contains("admin@bugsmirror.com"));
        assert!(!debug.contains("ADMIN123"));
    }
}
