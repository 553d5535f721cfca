//! Application settings loading from config.toml
//!
//! Every section is optional; a missing file or section falls back to the
//! defaults (household of five, years 2017-2030, no bootstrap administrator).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{
    env::{self, VarError},
    num::NonZeroU32,
    path::Path,
};
use tracing::{debug, info};

const DEFAULT_HOUSEHOLD_SIZE: NonZeroU32 = match NonZeroU32::new(5) {
    Some(size) => size,
    None => unreachable!(),
};

/// Top-level structure of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How shared costs are split
    pub household: HouseholdSettings,
    /// Years an administrator may record charges for
    pub years: YearRange,
    /// Administrator account created on first start
    pub admin: Option<AdminBootstrap>,
}

/// Household used for splitting every shared bill evenly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HouseholdSettings {
    /// Number of residents sharing each bill
    pub size: NonZeroU32,
}

impl HouseholdSettings {
    /// Household of the given size.
    #[must_use]
    pub const fn new(size: NonZeroU32) -> Self {
        Self { size }
    }

    /// Number of residents sharing each bill.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size.get()
    }
}

impl Default for HouseholdSettings {
    fn default() -> Self {
        Self::new(DEFAULT_HOUSEHOLD_SIZE)
    }
}

/// Inclusive range of selectable billing years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct YearRange {
    /// First selectable year
    pub first: i32,
    /// Last selectable year
    pub last: i32,
}

impl YearRange {
    /// Whether `year` may be used for a new charge period.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.first <= year && year <= self.last
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            first: 2017,
            last: 2030,
        }
    }
}

/// Administrator seeded at startup; the password comes from `ADMIN_PASSWORD`
#[derive(Debug, Clone, Deserialize)]
pub struct AdminBootstrap {
    /// Login name
    pub username: String,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: String,
    /// Contact email
    pub email: String,
}

impl Settings {
    /// Rejects settings that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.years.first > self.years.last {
            return Err(Error::Config {
                message: format!(
                    "years.first ({}) is after years.last ({})",
                    self.years.first, self.years.last
                ),
            });
        }
        Ok(())
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The resulting settings are inconsistent
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    let settings: Settings = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {path_ref:?}: {e}"),
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Loads settings from ./config.toml, or the defaults when the file is absent.
pub fn load_default_config() -> Result<Settings> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_config(path)
    } else {
        info!("No config.toml found, using default settings");
        Ok(Settings::default())
    }
}

/// Environment variable holding the bootstrap administrator's password
pub const ADMIN_PASSWORD_VAR: &str = "ADMIN_PASSWORD";

/// Reads the bootstrap administrator's password, `None` when it is unset.
///
/// # Errors
/// Returns `Error::EnvVar` if the variable is set but not valid Unicode.
pub fn admin_password() -> Result<Option<String>> {
    optional_var(env::var(ADMIN_PASSWORD_VAR))
}

fn optional_var(lookup: std::result::Result<String, VarError>) -> Result<Option<String>> {
    match lookup {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
