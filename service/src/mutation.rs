use crate::{PostForm, ServiceError, TagForm, UserForm};
use ::entity::prelude::{Post, PostTag, Tag, User};
use ::entity::{post, post_tag, tag, user};
use sea_orm::*;
use tracing::{debug, info, instrument};

pub struct Mutation;

impl Mutation {
    #[instrument(skip_all)]
    pub async fn create_user(db: &DbConn, form_data: UserForm) -> Result<user::Model, ServiceError> {
        let user = user::ActiveModel {
            first_name: Set(form_data.first_name),
            last_name: Set(form_data.last_name),
            image_url: Set(user::image_url_or_default(&form_data.image_url)),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(id = user.id, "created user");
        Ok(user)
    }

    /// Overwrites all three fields of the user.
    #[instrument(skip(db, form_data))]
    pub async fn update_user_by_id(
        db: &DbConn,
        id: i32,
        form_data: UserForm,
    ) -> Result<user::Model, ServiceError> {
        let mut user: user::ActiveModel = User::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", id))?
            .into();

        user.first_name = Set(form_data.first_name);
        user.last_name = Set(form_data.last_name);
        user.image_url = Set(user::image_url_or_default(&form_data.image_url));

        Ok(user.update(db).await?)
    }

    /// Deletes the user, their posts and the tag links of those posts.
    #[instrument(skip(db))]
    pub async fn delete_user(db: &DbConn, id: i32) -> Result<user::Model, ServiceError> {
        let txn = db.begin().await?;

        let user = User::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", id))?;

        let post_ids: Vec<i32> = user
            .find_related(Post)
            .all(&txn)
            .await?
            .into_iter()
            .map(|post| post.id)
            .collect();

        if !post_ids.is_empty() {
            PostTag::delete_many()
                .filter(post_tag::Column::PostId.is_in(post_ids.clone()))
                .exec(&txn)
                .await?;
            Post::delete_many()
                .filter(post::Column::UserId.eq(id))
                .exec(&txn)
                .await?;
        }

        user.clone().delete(&txn).await?;
        txn.commit().await?;

        info!(posts = post_ids.len(), "deleted user");
        Ok(user)
    }

    /// Creates a post owned by `user_id` and attaches the tags among `tag_ids`
    /// that exist. Unknown tag ids are ignored.
    #[instrument(skip(db, form_data))]
    pub async fn create_post(
        db: &DbConn,
        user_id: i32,
        form_data: PostForm,
        tag_ids: &[i32],
    ) -> Result<post::Model, ServiceError> {
        let txn = db.begin().await?;

        if User::find_by_id(user_id).one(&txn).await?.is_none() {
            return Err(ServiceError::not_found("user", user_id));
        }

        let post = post::ActiveModel {
            title: Set(form_data.title),
            content: Set(form_data.content),
            created_at: Set(chrono::Local::now().naive_local()),
            user_id: Set(user_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let linked = link_tags(&txn, post.id, tag_ids).await?;
        txn.commit().await?;

        info!(id = post.id, tags = linked, "created post");
        Ok(post)
    }

    /// Updates title and content. Owner and tags are left as they are.
    #[instrument(skip(db, form_data))]
    pub async fn update_post_by_id(
        db: &DbConn,
        id: i32,
        form_data: PostForm,
    ) -> Result<post::Model, ServiceError> {
        let mut post: post::ActiveModel = Post::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("post", id))?
            .into();

        post.title = Set(form_data.title);
        post.content = Set(form_data.content);

        Ok(post.update(db).await?)
    }

    /// Deletes the post and its tag links; the tags themselves remain.
    #[instrument(skip(db))]
    pub async fn delete_post(db: &DbConn, id: i32) -> Result<post::Model, ServiceError> {
        let txn = db.begin().await?;

        let post = Post::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("post", id))?;

        PostTag::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await?;
        post.clone().delete(&txn).await?;
        txn.commit().await?;

        info!("deleted post");
        Ok(post)
    }

    #[instrument(skip_all)]
    pub async fn create_tag(db: &DbConn, form_data: TagForm) -> Result<tag::Model, ServiceError> {
        let txn = db.begin().await?;

        let tag = tag::ActiveModel {
            name: Set(form_data.name),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let linked = link_posts(&txn, tag.id, &form_data.post_ids).await?;
        txn.commit().await?;

        info!(id = tag.id, posts = linked, "created tag");
        Ok(tag)
    }

    /// Renames the tag and replaces its whole set of posts.
    #[instrument(skip(db, form_data))]
    pub async fn update_tag_by_id(
        db: &DbConn,
        id: i32,
        form_data: TagForm,
    ) -> Result<tag::Model, ServiceError> {
        let txn = db.begin().await?;

        let mut tag: tag::ActiveModel = Tag::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("tag", id))?
            .into();
        tag.name = Set(form_data.name);
        let tag = tag.update(&txn).await?;

        let unlinked = PostTag::delete_many()
            .filter(post_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        let linked = link_posts(&txn, id, &form_data.post_ids).await?;
        txn.commit().await?;

        debug!(unlinked, linked, "replaced tag posts");
        Ok(tag)
    }

    /// Deletes the tag and its post links; the posts themselves remain.
    #[instrument(skip(db))]
    pub async fn delete_tag(db: &DbConn, id: i32) -> Result<tag::Model, ServiceError> {
        let txn = db.begin().await?;

        let tag = Tag::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("tag", id))?;

        PostTag::delete_many()
            .filter(post_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await?;
        tag.clone().delete(&txn).await?;
        txn.commit().await?;

        info!("deleted tag");
        Ok(tag)
    }
}

/// Links the post to every existing tag in `tag_ids`, returning how many were linked.
async fn link_tags<C>(db: &C, post_id: i32, tag_ids: &[i32]) -> Result<usize, DbErr>
where
    C: ConnectionTrait,
{
    if tag_ids.is_empty() {
        return Ok(0);
    }

    let tags = Tag::find()
        .filter(tag::Column::Id.is_in(tag_ids.iter().copied()))
        .all(db)
        .await?;

    for tag in &tags {
        post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag.id),
        }
        .insert(db)
        .await?;
    }

    Ok(tags.len())
}

/// Links the tag to every existing post in `post_ids`, returning how many were linked.
async fn link_posts<C>(db: &C, tag_id: i32, post_ids: &[i32]) -> Result<usize, DbErr>
where
    C: ConnectionTrait,
{
    if post_ids.is_empty() {
        return Ok(0);
    }

    let posts = Post::find()
        .filter(post::Column::Id.is_in(post_ids.iter().copied()))
        .all(db)
        .await?;

    for post in &posts {
        post_tag::ActiveModel {
            post_id: Set(post.id),
            tag_id: Set(tag_id),
        }
        .insert(db)
        .await?;
    }

    Ok(posts.len())
}
