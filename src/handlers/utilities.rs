//! Utilities entry handlers, mirroring the internet ones.

use super::{AppContext, require_admin, require_login};
use crate::{
    core::{
        charges,
        overview::{self, PeriodOverview},
    },
    entities::{resident, utility_period},
    errors::Result,
    forms::UtilityPeriodForm,
};

/// Every utilities entry, newest first.
pub async fn admin_list(
    ctx: &AppContext,
    current: Option<&resident::Model>,
) -> Result<Vec<utility_period::Model>> {
    require_admin(ctx, current).await?;
    charges::list_utility_periods(&ctx.database).await
}

/// Records a month's utilities bill.
pub async fn admin_create(
    ctx: &AppContext,
    current: Option<&resident::Model>,
    form: UtilityPeriodForm,
) -> Result<utility_period::Model> {
    require_admin(ctx, current).await?;
    form.validate_for(&ctx.settings.years)?;
    charges::create_utility_period(&ctx.database, form.into()).await
}

/// One entry with its per-capita share and payments.
pub async fn admin_show(
    ctx: &AppContext,
    current: Option<&resident::Model>,
    period_id: i64,
) -> Result<PeriodOverview<utility_period::Model>> {
    require_admin(ctx, current).await?;
    overview::utility_period_overview(&ctx.database, period_id, &ctx.settings.household).await
}

/// The latest entry with its per-capita share and payments.
pub async fn current(
    ctx: &AppContext,
    current: Option<&resident::Model>,
) -> Result<PeriodOverview<utility_period::Model>> {
    require_login(current)?;
    overview::current_utility_overview(&ctx.database, &ctx.settings.household).await
}
