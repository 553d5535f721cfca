//! Bulletin board handlers. Every route requires a logged-in resident.

use super::{AppContext, require_login};
use crate::{
    core::bulletin,
    entities::{post, resident},
    errors::Result,
    forms::PostForm,
};
use validator::Validate;

/// All posts, newest first.
pub async fn list(ctx: &AppContext, current: Option<&resident::Model>) -> Result<Vec<post::Model>> {
    require_login(current)?;
    bulletin::list_posts(&ctx.database).await
}

/// A single post.
pub async fn show(
    ctx: &AppContext,
    current: Option<&resident::Model>,
    post_id: i64,
) -> Result<post::Model> {
    require_login(current)?;
    bulletin::get_post(&ctx.database, post_id).await
}

/// Publishes a post authored by the logged-in resident.
pub async fn create(
    ctx: &AppContext,
    current: Option<&resident::Model>,
    form: PostForm,
) -> Result<post::Model> {
    let author = require_login(current)?;
    form.validate()?;
    bulletin::create_post(&ctx.database, author, form.title, form.content).await
}

/// Edits the title and content of a post.
pub async fn update(
    ctx: &AppContext,
    current: Option<&resident::Model>,
    post_id: i64,
    form: PostForm,
) -> Result<post::Model> {
    require_login(current)?;
    form.validate()?;
    bulletin::update_post(&ctx.database, post_id, form.title, form.content).await
}
