//! Bulletin board business logic - creating, listing and editing posts.

use crate::{
    entities::{Post, post, resident},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Publishes a new post by `author`, stamped with the current time.
pub async fn create_post(
    db: &DatabaseConnection,
    author: &resident::Model,
    title: String,
    content: String,
) -> Result<post::Model> {
    let post = post::ActiveModel {
        title: Set(title),
        content: Set(content),
        date_posted: Set(Utc::now()),
        author_id: Set(author.id),
        ..Default::default()
    };

    let created = post.insert(db).await?;
    info!(post_id = created.id, author_id = author.id, "Created post");
    Ok(created)
}

/// All posts, newest first.
///
/// Ids grow with posting time, so ordering by id avoids comparing stored timestamps.
pub async fn list_posts(db: &DatabaseConnection) -> Result<Vec<post::Model>> {
    Post::find()
        .order_by_desc(post::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads a post by id.
///
/// # Errors
/// * `Error::NotFound` if no post has this id
pub async fn get_post(db: &DatabaseConnection, post_id: i64) -> Result<post::Model> {
    Post::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("post", post_id))
}

/// Replaces the title and content of a post. Author and posting date stay as they were.
///
/// # Errors
/// * `Error::NotFound` if no post has this id
pub async fn update_post(
    db: &DatabaseConnection,
    post_id: i64,
    title: String,
    content: String,
) -> Result<post::Model> {
    let post = get_post(db, post_id).await?;

    let mut active_model: post::ActiveModel = post.into();
    active_model.title = Set(title);
    active_model.content = Set(content);
    active_model.update(db).await.map_err(Into::into)
}
