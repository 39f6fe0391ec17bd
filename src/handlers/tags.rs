use super::{Id, page_context};
use crate::{
    AppError, AppState,
    flash::{Flash, PostResponse, post_response},
    form::{FormPairs, tag_form},
    views::{PostView, post_choices},
};
use axum::{
    extract::{Form, State},
    response::Html,
};
use blogly_service::{Mutation, Query};
use tower_cookies::Cookies;

pub async fn list(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let tags = Query::find_tags(&state.conn).await?;

    let mut ctx = page_context(&cookies);
    ctx.insert("tags", &tags);

    state.render("tags/list.html", &ctx)
}

pub async fn new_form(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let posts = Query::find_posts(&state.conn).await?;

    let mut ctx = page_context(&cookies);
    ctx.insert("posts", &post_choices(posts, &[]));

    state.render("tags/new.html", &ctx)
}

pub async fn create(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(pairs): Form<FormPairs>,
) -> Result<PostResponse, AppError> {
    let tag = Mutation::create_tag(&state.conn, tag_form(&pairs)?).await?;

    let flash = Flash::success(format!("Tag {} added", tag.name));
    Ok(post_response(&cookies, "/tags", flash))
}

pub async fn show(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let (tag, posts) = Query::find_tag_with_posts(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("tag", id))?;
    let posts: Vec<PostView> = posts.into_iter().map(PostView::from).collect();

    let mut ctx = page_context(&cookies);
    ctx.insert("tag", &tag);
    ctx.insert("posts", &posts);

    state.render("tags/show.html", &ctx)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let (tag, tagged) = Query::find_tag_with_posts(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("tag", id))?;
    let tagged: Vec<i32> = tagged.iter().map(|post| post.id).collect();
    let posts = Query::find_posts(&state.conn).await?;

    let mut ctx = page_context(&cookies);
    ctx.insert("tag", &tag);
    ctx.insert("posts", &post_choices(posts, &tagged));

    state.render("tags/edit.html", &ctx)
}

/// Renames the tag and replaces the whole set of posts carrying it.
pub async fn update(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
    Form(pairs): Form<FormPairs>,
) -> Result<PostResponse, AppError> {
    let tag = Mutation::update_tag_by_id(&state.conn, id, tag_form(&pairs)?).await?;

    let flash = Flash::success(format!("Tag {} updated", tag.name));
    Ok(post_response(&cookies, "/tags", flash))
}

pub async fn delete(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
) -> Result<PostResponse, AppError> {
    let tag = Mutation::delete_tag(&state.conn, id).await?;

    let flash = Flash::info(format!("Tag {} deleted", tag.name));
    Ok(post_response(&cookies, "/tags", flash))
}
