//! Template contexts: entity rows plus the fields derived for display.

use entity::{post, tag, user};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: user::Model,
    pub full_name: String,
}

impl From<user::Model> for UserView {
    fn from(user: user::Model) -> Self {
        let full_name = user.full_name();
        Self { user, full_name }
    }
}

#[derive(Debug, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: post::Model,
    pub friendly_date: String,
}

impl From<post::Model> for PostView {
    fn from(post: post::Model) -> Self {
        let friendly_date = post.friendly_date();
        Self { post, friendly_date }
    }
}

/// A post listed with its author, as on the users page.
#[derive(Debug, Serialize)]
pub struct PostWithAuthor {
    pub post: PostView,
    pub author: UserView,
}

impl From<(post::Model, user::Model)> for PostWithAuthor {
    fn from((post, author): (post::Model, user::Model)) -> Self {
        Self {
            post: post.into(),
            author: author.into(),
        }
    }
}

/// A row of a checkbox list.
#[derive(Debug, Serialize)]
pub struct Choice<T> {
    #[serde(flatten)]
    pub item: T,
    pub checked: bool,
}

pub fn tag_choices(tags: Vec<tag::Model>, checked: &[i32]) -> Vec<Choice<tag::Model>> {
    tags.into_iter()
        .map(|item| Choice {
            checked: checked.contains(&item.id),
            item,
        })
        .collect()
}

pub fn post_choices(posts: Vec<post::Model>, checked: &[i32]) -> Vec<Choice<post::Model>> {
    posts
        .into_iter()
        .map(|item| Choice {
            checked: checked.contains(&item.id),
            item,
        })
        .collect()
}
