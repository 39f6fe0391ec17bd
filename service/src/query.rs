use ::entity::{post, tag, user};
use ::entity::prelude::{Post, Tag, User};
use sea_orm::*;

pub struct Query;

/// A post together with its author and tags.
#[derive(Clone, Debug, PartialEq)]
pub struct PostDetail {
    pub post: post::Model,
    pub author: user::Model,
    pub tags: Vec<tag::Model>,
}

impl Query {
    /// All users, ordered by last name then first name.
    pub async fn find_users(db: &DbConn) -> Result<Vec<user::Model>, DbErr> {
        User::find()
            .order_by_asc(user::Column::LastName)
            .order_by_asc(user::Column::FirstName)
            .all(db)
            .await
    }

    pub async fn find_user_by_id(db: &DbConn, id: i32) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(db).await
    }

    /// The user and their posts, newest first.
    pub async fn find_user_with_posts(
        db: &DbConn,
        id: i32,
    ) -> Result<Option<(user::Model, Vec<post::Model>)>, DbErr> {
        let Some(user) = User::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let posts = user
            .find_related(Post)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(db)
            .await?;

        Ok(Some((user, posts)))
    }

    pub async fn find_post_by_id(db: &DbConn, id: i32) -> Result<Option<post::Model>, DbErr> {
        Post::find_by_id(id).one(db).await
    }

    pub async fn find_post_detail(db: &DbConn, id: i32) -> Result<Option<PostDetail>, DbErr> {
        let Some((post, author)) = Post::find_by_id(id)
            .find_also_related(User)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let author = author.ok_or_else(|| {
            DbErr::RecordNotFound(format!("author {} of post {}", post.user_id, post.id))
        })?;

        let tags = post
            .find_related(Tag)
            .order_by_asc(tag::Column::Name)
            .all(db)
            .await?;

        Ok(Some(PostDetail { post, author, tags }))
    }

    /// All posts, newest first.
    pub async fn find_posts(db: &DbConn) -> Result<Vec<post::Model>, DbErr> {
        Post::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(db)
            .await
    }

    /// The `limit` newest posts with their authors.
    pub async fn find_recent_posts(
        db: &DbConn,
        limit: u64,
    ) -> Result<Vec<(post::Model, user::Model)>, DbErr> {
        let rows = Post::find()
            .find_also_related(User)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(post, author)| author.map(|author| (post, author)))
            .collect())
    }

    /// All tags, ordered by name.
    pub async fn find_tags(db: &DbConn) -> Result<Vec<tag::Model>, DbErr> {
        Tag::find().order_by_asc(tag::Column::Name).all(db).await
    }

    pub async fn find_tag_by_id(db: &DbConn, id: i32) -> Result<Option<tag::Model>, DbErr> {
        Tag::find_by_id(id).one(db).await
    }

    /// The tag and the posts carrying it, newest first.
    pub async fn find_tag_with_posts(
        db: &DbConn,
        id: i32,
    ) -> Result<Option<(tag::Model, Vec<post::Model>)>, DbErr> {
        let Some(tag) = Tag::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let posts = tag
            .find_related(Post)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(db)
            .await?;

        Ok(Some((tag, posts)))
    }
}
