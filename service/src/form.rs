use serde::Deserialize;

/// Fields submitted by the add and edit user forms. All three keys must be
/// present; a blank `image_url` stores the placeholder image.
#[derive(Clone, Debug, Deserialize)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

/// Title and content of a post. Tags are attached only on creation.
#[derive(Clone, Debug, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

/// Name of a tag and the full set of posts it should be attached to.
#[derive(Clone, Debug, Default)]
pub struct TagForm {
    pub name: String,
    pub post_ids: Vec<i32>,
}
