//! Configuration management for mailroom
//!
//! Settings are loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `MAILROOM_` prefix, `__` for nesting)
//! 2. The TOML file passed to [`MailroomConfig::load_from`], or `./config.toml`
//! 3. `~/.config/mailroom/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! Environment variable format: `MAILROOM_SECTION__FIELD_NAME`, for example
//! `MAILROOM_EMAIL__DRIVER=test`.
//!
//! # Example Configuration
//!
//! ```toml
//! [app]
//! name = "gopl"
//!
//! [server]
//! addr = "https://gopl.dev/"
//!
//! [email]
//! driver = "smtp"
//! from = "noreply@gopl.dev"
//! host = "smtp.example.com"
//! port = 587
//! username = "mailer"
//! password = "secret"
//! tls = true
//! subject_prefix = "gopl"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::email::Site;

/// Application identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Product name shown in emails
    pub name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "gopl".to_string(),
        }
    }
}

/// Public server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Public base URL used to build links inside emails
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "http://localhost:8080/".to_string(),
        }
    }
}

/// Email delivery settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    /// Transport driver: `smtp` or `test`
    pub driver: String,

    /// Sender address
    pub from: String,

    /// SMTP relay hostname
    pub host: String,

    /// SMTP relay port (usually 587 for STARTTLS)
    pub port: u16,

    /// SMTP username; authentication is skipped when empty
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Use STARTTLS (default: true)
    pub tls: bool,

    /// Brand tag prepended to every subject as `"<prefix>: "`
    pub subject_prefix: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            driver: "smtp".to_string(),
            from: "noreply@localhost".to_string(),
            host: "localhost".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
            tls: true,
            subject_prefix: "gopl".to_string(),
        }
    }
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("driver", &self.driver)
            .field("from", &self.from)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("tls", &self.tls)
            .field("subject_prefix", &self.subject_prefix)
            .finish()
    }
}

/// Complete mailroom configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MailroomConfig {
    /// Application identity
    #[serde(default)]
    pub app: AppSettings,

    /// Public server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Email delivery settings
    #[serde(default)]
    pub email: EmailSettings,
}

impl MailroomConfig {
    /// Load configuration from the default locations
    ///
    /// Precedence: `MAILROOM_*` environment variables, `./config.toml`,
    /// the user config file, defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be parsed or a value
    /// has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use mailroom::config::MailroomConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = MailroomConfig::load()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Self::defaults()?;

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        let config = figment.merge(Self::env()).extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Environment variables still override values from the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or a value has the
    /// wrong type.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config = Self::defaults()?
            .merge(Toml::file(path.as_ref()))
            .merge(Self::env())
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path
    ///
    /// Returns `~/.config/mailroom/config.toml`, or `./config.toml` when no
    /// config directory can be determined.
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| config_dir.join("mailroom").join("config.toml"),
        )
    }

    /// Site identity used to compose links inside messages
    #[must_use]
    pub fn site(&self) -> Site {
        Site::new(self.app.name.clone(), self.server.addr.clone())
    }

    fn defaults() -> anyhow::Result<Figment> {
        Ok(Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?)))
    }

    fn env() -> Env {
        Env::prefixed("MAILROOM_").split("__").lowercase(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = MailroomConfig::default();
        assert_eq!(config.app.name, "gopl");
        assert_eq!(config.email.driver, "smtp");
        assert_eq!(config.email.port, 587);
        assert!(config.email.tls);
        assert_eq!(config.email.subject_prefix, "gopl");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
addr = "https://gopl.dev/"

[email]
driver = "test"
port = 2525
"#
        )
        .unwrap();

        let config = MailroomConfig::load_from(file.path()).unwrap();

        assert_eq!(config.server.addr, "https://gopl.dev/");
        assert_eq!(config.email.driver, "test");
        assert_eq!(config.email.port, 2525);
        // untouched values keep their defaults
        assert_eq!(config.email.host, "localhost");
        assert_eq!(config.app.name, "gopl");
    }

    #[test]
    fn test_load_from_rejects_bad_types() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[email]\nport = \"not a port\"").unwrap();

        assert!(MailroomConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_site_from_config() {
        let mut config = MailroomConfig::default();
        config.server.addr = "https://gopl.dev/".to_string();

        let site = config.site();
        assert_eq!(site.name(), "gopl");
        assert_eq!(site.base_url(), "https://gopl.dev");
    }

    #[test]
    fn test_debug_redacts_password() {
        let settings = EmailSettings {
            password: "hunter2".to_string(),
            ..EmailSettings::default()
        };

        let debug = format!("{settings:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[redacted]"));
    }
}
