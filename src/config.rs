use anyhow::{Context, Result, anyhow};
use netrc::Netrc;
use std::env;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::booking::constants::{BASE_URL, DEFAULT_WEBDRIVER_URL};

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

/// Bounded waits used while driving the court sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Booking dialog controls (duration button, error dialog, confirmation).
    pub element: Duration,
    /// Club and date dropdowns after login.
    pub control: Duration,
    /// How long a login error may take to show up.
    pub login_result: Duration,
    /// Pause after a failed attempt before trying the next slot.
    pub settle: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            element: Duration::from_secs(15),
            control: Duration::from_secs(10),
            login_result: Duration::from_secs(5),
            settle: Duration::from_secs(3),
        }
    }
}

#[cfg(test)]
impl Timeouts {
    pub fn immediate() -> Self {
        Timeouts {
            element: Duration::ZERO,
            control: Duration::ZERO,
            login_result: Duration::ZERO,
            settle: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub site_url: Url,
    pub webdriver_url: Url,
    pub smtp: SmtpSettings,
    pub timeouts: Timeouts,
}

impl Settings {
    /// Reads settings from the environment. Call `dotenv` first to pick up a
    /// `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let site_url = lookup("COURTBOOKING_URL").unwrap_or_else(|| BASE_URL.to_string());
        let site_url = Url::parse(&site_url)
            .with_context(|| format!("COURTBOOKING_URL is not a valid url: {site_url}"))?;

        let webdriver_url =
            lookup("WEBDRIVER_URL").unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string());
        let webdriver_url = Url::parse(&webdriver_url)
            .with_context(|| format!("WEBDRIVER_URL is not a valid url: {webdriver_url}"))?;

        let port = match lookup("SMTP_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("SMTP_PORT is not a port number: {port}"))?,
            None => DEFAULT_SMTP_PORT,
        };

        let host = lookup("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());
        let mut username = lookup("SMTP_USERNAME").filter(|v| !v.is_empty());
        let mut password = lookup("SMTP_PASSWORD").filter(|v| !v.is_empty());

        if username.is_none() && password.is_none() {
            if let Some(path) = netrc_path(&lookup) {
                match netrc_credentials(&path, &host) {
                    Ok(Some((login, secret))) => {
                        username = Some(login);
                        password = secret;
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Ignoring {}: {:#}", path.display(), e),
                }
            }
        }

        Ok(Settings {
            site_url,
            webdriver_url,
            smtp: SmtpSettings {
                host,
                port,
                username,
                password,
            },
            timeouts: Timeouts::default(),
        })
    }
}

/// `$NETRC`, or `.netrc` in the home directory.
fn netrc_path(lookup: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    lookup("NETRC")
        .map(PathBuf::from)
        .or_else(|| lookup("HOME").map(|home| Path::new(&home).join(".netrc")))
}

/// Login and password for `host`, falling back to the `default` entry.
/// A missing file is not an error.
fn netrc_credentials(path: &Path, host: &str) -> Result<Option<(String, Option<String>)>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("unable to open {}", path.display())),
    };
    let netrc = Netrc::parse(BufReader::new(file))
        .map_err(|e| anyhow!("unable to parse {}: {:?}", path.display(), e))?;

    let machine = netrc
        .hosts
        .into_iter()
        .find(|(name, _)| name == host)
        .map(|(_, machine)| machine)
        .or(netrc.default);
    Ok(machine.map(|machine| (machine.login, machine.password)))
}
