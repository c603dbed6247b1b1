use std::{path::PathBuf, time::Duration};

use booking_core::PriceTable;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Settings shared by the CLI and the intake service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub pricing: PriceTable,
    #[serde(default)]
    pub mail: MailSettings,
    #[serde(default)]
    pub cms: CmsSettings,
    #[serde(default)]
    pub client: ClientSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".into(),
            request_timeout_secs: 30,
        }
    }
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Transactional e-mail provider. With `enabled = false` nothing is sent and
/// every dispatch reports failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    pub enabled: bool,
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub from: String,
    pub operator_email: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "https://api.resend.com/emails".into(),
            api_key: None,
            from: "Alpine Transfers <bookings@alpine-transfers.example>".into(),
            operator_email: "bookings@alpine-transfers.example".into(),
        }
    }
}

/// Headless CMS (Sanity) holding testimonials and links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub dataset: String,
    pub api_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: "production".into(),
            api_version: "2023-05-03".into(),
            token: None,
        }
    }
}

impl CmsSettings {
    /// Query endpoint, or `None` while no project is configured.
    pub fn query_url(&self) -> Option<String> {
        let project = self.project_id.as_deref()?;
        Some(format!(
            "https://{project}.api.sanity.io/v{}/data/query/{}",
            self.api_version, self.dataset
        ))
    }
}

/// Where the CLI sends bookings and reads content from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:3000".into(),
            timeout_secs: 15,
        }
    }
}

impl ClientSettings {
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn booking_url(&self) -> String {
        self.endpoint("api/booking")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Config {
    /// Keys accepted by [`Config::set_value`] and [`Config::value`].
    pub const KEYS: &'static [&'static str] = &[
        "server.bind_addr",
        "server.request_timeout_secs",
        "pricing.one_way_base",
        "pricing.return_base",
        "pricing.per_extra_passenger",
        "pricing.per_luggage_item",
        "pricing.per_equipment_item",
        "pricing.currency",
        "mail.enabled",
        "mail.endpoint",
        "mail.api_key",
        "mail.from",
        "mail.operator_email",
        "cms.project_id",
        "cms.dataset",
        "cms.api_version",
        "cms.token",
        "client.api_base",
        "client.timeout_secs",
    ];

    /// Current value of `key` rendered for display. Secrets are masked.
    pub fn value(&self, key: &str) -> Result<String, ConfigError> {
        let rendered = match key.to_ascii_lowercase().as_str() {
            "server.bind_addr" => self.server.bind_addr.clone(),
            "server.request_timeout_secs" => self.server.request_timeout_secs.to_string(),
            "pricing.one_way_base" => self.pricing.one_way_base.to_string(),
            "pricing.return_base" => self.pricing.return_base.to_string(),
            "pricing.per_extra_passenger" => self.pricing.per_extra_passenger.to_string(),
            "pricing.per_luggage_item" => self.pricing.per_luggage_item.to_string(),
            "pricing.per_equipment_item" => self.pricing.per_equipment_item.to_string(),
            "pricing.currency" => self.pricing.currency.clone(),
            "mail.enabled" => self.mail.enabled.to_string(),
            "mail.endpoint" => self.mail.endpoint.clone(),
            "mail.api_key" => mask(self.mail.api_key.as_deref()),
            "mail.from" => self.mail.from.clone(),
            "mail.operator_email" => self.mail.operator_email.clone(),
            "cms.project_id" => self
                .cms
                .project_id
                .clone()
                .unwrap_or_else(|| "(none)".into()),
            "cms.dataset" => self.cms.dataset.clone(),
            "cms.api_version" => self.cms.api_version.clone(),
            "cms.token" => mask(self.cms.token.as_deref()),
            "client.api_base" => self.client.api_base.clone(),
            "client.timeout_secs" => self.client.timeout_secs.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(rendered)
    }

    /// Updates a single setting from its textual form. `none` or an empty
    /// value clears optional settings.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = key.to_ascii_lowercase();
        let value = value.trim();
        match key.as_str() {
            "server.bind_addr" => self.server.bind_addr = required(&key, value)?,
            "server.request_timeout_secs" => {
                self.server.request_timeout_secs = positive(&key, value)?
            }
            "pricing.one_way_base" => self.pricing.one_way_base = amount(&key, value)?,
            "pricing.return_base" => self.pricing.return_base = amount(&key, value)?,
            "pricing.per_extra_passenger" => {
                self.pricing.per_extra_passenger = amount(&key, value)?
            }
            "pricing.per_luggage_item" => self.pricing.per_luggage_item = amount(&key, value)?,
            "pricing.per_equipment_item" => {
                self.pricing.per_equipment_item = amount(&key, value)?
            }
            "pricing.currency" => {
                let code = required(&key, value)?.to_ascii_uppercase();
                if code.len() != 3 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
                    return Err(invalid(&key, "use a three-letter ISO code"));
                }
                self.pricing.currency = code;
            }
            "mail.enabled" => self.mail.enabled = flag(&key, value)?,
            "mail.endpoint" => self.mail.endpoint = required(&key, value)?,
            "mail.api_key" => self.mail.api_key = optional(value),
            "mail.from" => self.mail.from = required(&key, value)?,
            "mail.operator_email" => {
                let address = required(&key, value)?;
                if !address.contains('@') {
                    return Err(invalid(&key, "expected an e-mail address"));
                }
                self.mail.operator_email = address;
            }
            "cms.project_id" => self.cms.project_id = optional(value),
            "cms.dataset" => self.cms.dataset = required(&key, value)?,
            "cms.api_version" => self.cms.api_version = required(&key, value)?,
            "cms.token" => self.cms.token = optional(value),
            "client.api_base" => self.client.api_base = required(&key, value)?,
            "client.timeout_secs" => self.client.timeout_secs = positive(&key, value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn default_home() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("transfer-booking")
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn required(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(invalid(key, "value cannot be empty"))
    } else {
        Ok(value.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

fn amount(key: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .parse()
        .map_err(|_| invalid(key, "expected a whole, non-negative amount"))
}

fn positive(key: &str, value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(invalid(key, "expected a positive number of seconds")),
    }
}

fn flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, "expected on/off")),
    }
}

fn mask(secret: Option<&str>) -> String {
    match secret {
        Some(value) if !value.is_empty() => "********".into(),
        _ => "(none)".into(),
    }
}
