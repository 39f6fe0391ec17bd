//! SeaORM entities for the Blogly schema.
//!
//! Four tables: `users`, `posts`, `tags` and the `posts_tags` junction
//! linking posts and tags many-to-many.

pub mod prelude;

pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;
