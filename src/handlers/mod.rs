//! Handler layer - framework-agnostic request handlers.
//!
//! Each handler receives the shared [`AppContext`] and the currently logged-in resident
//! (if any), validates its form, applies the login or administrator gate, and calls into
//! `core`. Transport, sessions and rendering belong to whatever web framework wraps these.

/// Administrator views of the household
pub mod admin;
/// Registration and login
pub mod auth;
/// Monthly internet entries
pub mod internet;
/// Bulletin board posts
pub mod posts;
/// Monthly utilities entries
pub mod utilities;

use crate::{
    config::Settings,
    core::identity,
    entities::resident,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Shared data available to all handlers.
/// Holds the database connection and the loaded settings; built once at startup and
/// passed by reference into every handler.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Database connection for all store operations
    pub database: DatabaseConnection,
    /// Application settings
    pub settings: Settings,
}

impl AppContext {
    /// Creates a new `AppContext` from an open connection and loaded settings.
    #[must_use]
    pub const fn new(database: DatabaseConnection, settings: Settings) -> Self {
        Self { database, settings }
    }
}

/// Passes through the logged-in resident, or fails with `Error::Unauthenticated`.
pub fn require_login(current: Option<&resident::Model>) -> Result<&resident::Model> {
    match current {
        Some(resident) => Ok(resident),
        None => Err(Error::Unauthenticated),
    }
}

/// Re-reads the logged-in resident and checks that the stored role is `ADMIN`.
///
/// The session copy of the resident may be stale, so the decision is made on the row
/// currently in the database.
///
/// # Errors
/// * `Error::Unauthenticated` if nobody is logged in
/// * `Error::Forbidden` if the stored role is not `ADMIN`
pub async fn require_admin(
    ctx: &AppContext,
    current: Option<&resident::Model>,
) -> Result<resident::Model> {
    let session_resident = require_login(current)?;
    let stored = identity::get_resident(&ctx.database, session_resident.id).await?;
    if identity::is_admin(Some(&stored)) {
        Ok(stored)
    } else {
        Err(Error::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_require_login() -> Result<()> {
        let ctx = setup_test_context().await?;
        let resident = create_test_resident(&ctx.database, "ala").await?;

        assert!(matches!(require_login(None), Err(Error::Unauthenticated)));
        assert_eq!(require_login(Some(&resident))?.id, resident.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_require_admin_gate() -> Result<()> {
        let ctx = setup_test_context().await?;
        let user = create_test_resident(&ctx.database, "user").await?;
        let admin = create_test_admin(&ctx.database, "boss").await?;

        assert!(matches!(
            require_admin(&ctx, None).await,
            Err(Error::Unauthenticated)
        ));
        assert!(matches!(
            require_admin(&ctx, Some(&user)).await,
            Err(Error::Forbidden)
        ));
        assert_eq!(require_admin(&ctx, Some(&admin)).await?.id, admin.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_require_admin_uses_stored_role() -> Result<()> {
        let ctx = setup_test_context().await?;
        let stale = create_test_resident(&ctx.database, "rising").await?;
        identity::promote_to_admin(&ctx.database, stale.id).await?;

        // The session copy still says USER; the stored row decides.
        assert!(require_admin(&ctx, Some(&stale)).await.is_ok());
        Ok(())
    }
}
