use std::fmt;

/// Process configuration, read once at startup.
pub struct Config {
    pub mode: String, // "stdio" or "http"
    pub port: u16,
    pub project: String,
    pub sid: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SCRAPBOX_SID is not set")]
    MissingSid,
    #[error("SCRAPBOX_PROJECT is not set")]
    MissingProject,
    #[error("PORT must be a valid number")]
    InvalidPort,
    #[error("MODE must be \"stdio\" or \"http\", got \"{0}\"")]
    InvalidMode(String),
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let sid = read_env("SCRAPBOX_SID").ok_or(ConfigError::MissingSid)?;
        let project = read_env("SCRAPBOX_PROJECT").ok_or(ConfigError::MissingProject)?;

        let mode = read_env("MODE").unwrap_or_else(|| "stdio".into());
        if mode != "stdio" && mode != "http" {
            return Err(ConfigError::InvalidMode(mode));
        }

        let port = match read_env("PORT") {
            Some(s) => s.parse::<u16>().map_err(|_| ConfigError::InvalidPort)?,
            None => 8080,
        };

        Ok(Self {
            mode,
            port,
            project,
            sid,
        })
    }
}

// The session cookie value must never reach logs or debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("mode", &self.mode)
            .field("port", &self.port)
            .field("project", &self.project)
            .field("sid", &"<redacted>")
            .finish()
    }
}
