//! Decoding of url-encoded bodies whose multi-selects repeat a key, such as
//! `tags=1&tags=3`.

use crate::AppError;
use blogly_service::{PostForm, TagForm};

pub type FormPairs = Vec<(String, String)>;

fn field(pairs: &[(String, String)], name: &'static str) -> Result<String, AppError> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.to_owned())
        .ok_or(AppError::MissingField(name))
}

/// Every value of `name` that parses as an id; anything else is skipped.
fn ids(pairs: &[(String, String)], name: &str) -> Vec<i32> {
    let mut ids: Vec<i32> = pairs
        .iter()
        .filter(|(key, _)| key == name)
        .filter_map(|(_, value)| value.trim().parse().ok())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// A new or edited post plus the tag ids ticked on the form.
pub fn post_form(pairs: &[(String, String)]) -> Result<(PostForm, Vec<i32>), AppError> {
    let form = PostForm {
        title: field(pairs, "title")?,
        content: field(pairs, "content")?,
    };
    Ok((form, ids(pairs, "tags")))
}

pub fn tag_form(pairs: &[(String, String)]) -> Result<TagForm, AppError> {
    Ok(TagForm {
        name: field(pairs, "name")?,
        post_ids: ids(pairs, "posts"),
    })
}
