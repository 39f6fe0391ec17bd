use super::{Id, page_context};
use crate::{
    AppError, AppState,
    flash::{Flash, PostResponse, post_response},
    views::{PostView, PostWithAuthor, UserView},
};
use axum::{
    extract::{Form, State},
    response::Html,
};
use blogly_service::{Mutation, Query, UserForm};
use tower_cookies::Cookies;

/// Posts shown under "recent posts" on the users page.
const RECENT_POSTS: u64 = 5;

pub async fn list(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let users: Vec<UserView> = Query::find_users(&state.conn)
        .await?
        .into_iter()
        .map(UserView::from)
        .collect();
    let recent_posts: Vec<PostWithAuthor> = Query::find_recent_posts(&state.conn, RECENT_POSTS)
        .await?
        .into_iter()
        .map(PostWithAuthor::from)
        .collect();

    let mut ctx = page_context(&cookies);
    ctx.insert("users", &users);
    ctx.insert("recent_posts", &recent_posts);

    state.render("users/list.html", &ctx)
}

pub async fn new_form(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let ctx = page_context(&cookies);

    state.render("users/new.html", &ctx)
}

pub async fn create(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<UserForm>,
) -> Result<PostResponse, AppError> {
    let user = Mutation::create_user(&state.conn, form).await?;

    let flash = Flash::success(format!("User {} added", user.full_name()));
    Ok(post_response(&cookies, "/users", flash))
}

pub async fn show(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let (user, posts) = Query::find_user_with_posts(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("user", id))?;
    let posts: Vec<PostView> = posts.into_iter().map(PostView::from).collect();

    let mut ctx = page_context(&cookies);
    ctx.insert("user", &UserView::from(user));
    ctx.insert("posts", &posts);

    state.render("users/show.html", &ctx)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
) -> Result<Html<String>, AppError> {
    let user = Query::find_user_by_id(&state.conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("user", id))?;

    let mut ctx = page_context(&cookies);
    ctx.insert("user", &UserView::from(user));

    state.render("users/edit.html", &ctx)
}

pub async fn update(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
    Form(form): Form<UserForm>,
) -> Result<PostResponse, AppError> {
    let user = Mutation::update_user_by_id(&state.conn, id, form).await?;

    let flash = Flash::success(format!("User {} updated", user.full_name()));
    Ok(post_response(&cookies, "/users", flash))
}

/// Reachable by both GET and POST so a plain link can delete.
pub async fn delete(
    State(state): State<AppState>,
    Id(id): Id,
    cookies: Cookies,
) -> Result<PostResponse, AppError> {
    let user = Mutation::delete_user(&state.conn, id).await?;

    let flash = Flash::info(format!("User {} deleted", user.full_name()));
    Ok(post_response(&cookies, "/users", flash))
}
