//! Unified error type for the household board and shared-cost ledger.
//!
//! Domain outcomes (`Duplicate`, `NotFound`, `Auth`, `Empty`) are expected during
//! normal use and are left to the caller to present. Database and I/O failures
//! propagate unchanged.

use crate::core::charges::ChargeCategory;
use rust_decimal::Decimal;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Every error the crate can return.
#[derive(Debug, Error)]
pub enum Error {
    /// A uniqueness rule was violated (username, email, or month/year of a period)
    #[error("{entity} with this {field} already exists")]
    Duplicate {
        /// Kind of record that collided
        entity: &'static str,
        /// Field (or field pair) that must be unique
        field: &'static str,
    },

    /// Lookup by id found nothing
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record looked up
        entity: &'static str,
        /// Identifier that was requested
        id: String,
    },

    /// Unknown username or wrong password, deliberately indistinguishable
    #[error("Login failed: invalid username or password")]
    Auth,

    /// A "latest entry" query ran against an empty category
    #[error("No {category} entries have been recorded yet")]
    Empty {
        /// Category that has no entries
        category: ChargeCategory,
    },

    /// The operation requires a logged-in resident
    #[error("You must be logged in to do that")]
    Unauthenticated,

    /// Login or registration attempted while already logged in
    #[error("Already logged in")]
    AlreadyAuthenticated,

    /// The operation requires the administrator role
    #[error("Administrator access required")]
    Forbidden,

    /// Form input failed field validation
    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Money amounts must be zero or positive
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// Offending amount
        amount: Decimal,
    },

    /// A stored payment points at no period, or at two of them
    #[error("Payment {payment_id} must reference exactly one charge period")]
    InvalidPeriodReference {
        /// Payment with the broken reference
        payment_id: i64,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Hashing or parsing a stored password hash failed
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Underlying hasher message
        message: String,
    },

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable lookup failed
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Maps a failed insert to `Duplicate` when the store reports a unique
    /// constraint violation, keeping every other failure as a database error.
    pub(crate) fn from_insert(err: DbErr, entity: &'static str, field: &'static str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate { entity, field },
            _ => Self::Database(err),
        }
    }

    /// Shorthand for a `NotFound` keyed by a numeric id.
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::PasswordHash {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
