//! Administrator panel handlers.

use super::{AppContext, require_admin};
use crate::{core::identity, entities::resident, errors::Result};

/// Every registered resident, for the administrator panel.
pub async fn residents(
    ctx: &AppContext,
    current: Option<&resident::Model>,
) -> Result<Vec<resident::Model>> {
    require_admin(ctx, current).await?;
    identity::list_residents(&ctx.database).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Error, test_utils::*};

    #[tokio::test]
    async fn test_residents_listing_is_admin_only() -> Result<()> {
        let ctx = setup_test_context().await?;
        let user = create_test_resident(&ctx.database, "lokator").await?;
        let admin = create_test_admin(&ctx.database, "admin").await?;

        assert!(matches!(
            residents(&ctx, Some(&user)).await,
            Err(Error::Forbidden)
        ));
        assert_eq!(residents(&ctx, Some(&admin)).await?.len(), 2);
        Ok(())
    }
}
