//! Registration and login handlers.

use super::AppContext;
use crate::{
    core::identity,
    entities::resident,
    errors::{Error, Result},
    forms::{LoginForm, RegistrationForm},
};
use validator::Validate;

/// Signs up a new resident; refused while someone is logged in.
pub async fn register(
    ctx: &AppContext,
    current: Option<&resident::Model>,
    form: RegistrationForm,
) -> Result<resident::Model> {
    if current.is_some() {
        return Err(Error::AlreadyAuthenticated);
    }
    form.validate()?;
    identity::register(&ctx.database, form.into()).await
}

/// Checks credentials and returns the resident to store in the session.
pub async fn login(
    ctx: &AppContext,
    current: Option<&resident::Model>,
    form: LoginForm,
) -> Result<resident::Model> {
    if current.is_some() {
        return Err(Error::AlreadyAuthenticated);
    }
    form.validate()?;
    identity::authenticate(&ctx.database, &form.username, &form.password).await
}
