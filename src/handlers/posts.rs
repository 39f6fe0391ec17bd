use super::{Id, page_context};
use crate::{
    AppError, AppState,
    flash::{Flash, PostResponse, post_response},
    form::{FormPairs, post_form},
    views::{PostView, UserView, tag_choices},
};
use axum::{
    extract::{Form, State},
    response::Html,
};
use blogly_service::{Mutation, Query};
use tower_cookies::Cookies;

pub async fn new_form(
    State(state): State<AppState>,
    Id(user_id): Id,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let user = Query::find_user_by_id(&state.conn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user", user_id))?;
    let tags = Query::find_tags(&state.conn).await?;

    let mut ctx = page_context(&cookies);
    ctx.insert("user", &UserView::from(user));
    ctx.insert("tags", &tag_choices(tags, &[]));

    state.render("posts/new.html", &ctx)
}

pub async fn create(
    State(state): State<AppState>,
    Id(user_id): Id,
    cookies: Cookies,
    Form(pairs): Form<FormPairs>,
) -> Result<PostResponse, AppError> {
    let (form, tag_ids) = post_form(&pairs)?;
    let post = Mutation::create_post(&state.conn, user_id, form, &tag_ids).await?;

    let flash = Flash::success(format!("Post \"{}\" added", post.title));
    Ok(post_response(&cookies, &format!("/users/{user_id}"), flash))
}

pub async fn show(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let detail = Query::find_post_detail(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("post", id))?;

    let mut ctx = page_context(&cookies);
    ctx.insert("post", &PostView::from(detail.post));
    ctx.insert("author", &UserView::from(detail.author));
    ctx.insert("tags", &detail.tags);

    state.render("posts/show.html", &ctx)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let detail = Query::find_post_detail(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("post", id))?;

    let mut ctx = page_context(&cookies);
    ctx.insert("post", &PostView::from(detail.post));
    ctx.insert("author", &UserView::from(detail.author));

    state.render("posts/edit.html", &ctx)
}

/// Title and content only; any `tags` keys in the body are ignored.
pub async fn update(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
    Form(pairs): Form<FormPairs>,
) -> Result<PostResponse, AppError> {
    let (form, _) = post_form(&pairs)?;
    let post = Mutation::update_post_by_id(&state.conn, id, form).await?;

    let flash = Flash::success(format!("Post \"{}\" updated", post.title));
    Ok(post_response(&cookies, &format!("/posts/{id}"), flash))
}

pub async fn delete(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
) -> Result<PostResponse, AppError> {
    let post = Mutation::delete_post(&state.conn, id).await?;

    let flash = Flash::info(format!("Post \"{}\" deleted", post.title));
    Ok(post_response(&cookies, &format!("/users/{}", post.user_id), flash))
}
