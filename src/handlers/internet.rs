//! Internet entry handlers.
//!
//! Listing, creating and inspecting entries is for administrators; any logged-in
//! resident may view the current month's bill and their share of it.

use super::{AppContext, require_admin, require_login};
use crate::{
    core::{
        charges,
        overview::{self, PeriodOverview},
    },
    entities::{charge_period, resident},
    errors::Result,
    forms::ChargePeriodForm,
};

/// Every internet entry, newest first.
pub async fn admin_list(
    ctx: &AppContext,
    current: Option<&resident::Model>,
) -> Result<Vec<charge_period::Model>> {
    require_admin(ctx, current).await?;
    charges::list_charge_periods(&ctx.database).await
}

/// Records a month's internet bill.
pub async fn admin_create(
    ctx: &AppContext,
    current: Option<&resident::Model>,
    form: ChargePeriodForm,
) -> Result<charge_period::Model> {
    require_admin(ctx, current).await?;
    form.validate_for(&ctx.settings.years)?;
    charges::create_charge_period(&ctx.database, form.into()).await
}

/// One entry with its per-capita share and payments.
pub async fn admin_show(
    ctx: &AppContext,
    current: Option<&resident::Model>,
    period_id: i64,
) -> Result<PeriodOverview<charge_period::Model>> {
    require_admin(ctx, current).await?;
    overview::charge_period_overview(&ctx.database, period_id, &ctx.settings.household).await
}

/// The latest entry with its per-capita share and payments.
pub async fn current(
    ctx: &AppContext,
    current: Option<&resident::Model>,
) -> Result<PeriodOverview<charge_period::Model>> {
    require_login(current)?;
    overview::current_charge_overview(&ctx.database, &ctx.settings.household).await
}
