use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use blogly::{AppState, app};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use pretty_assertions::assert_eq;
use sea_orm::Database;
use tera::Tera;
use tower::ServiceExt;

async fn setup() -> Router {
    let conn = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&conn, None).await.unwrap();
    let templates = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap();

    app(AppState::new(conn, templates))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// POSTs a form and asserts a `303 See Other` to `expected`.
async fn submit(app: &Router, uri: &str, body: &str, expected: &str) -> Response<Body> {
    let response = send(app, form(uri, body)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {uri}");
    assert_eq!(location(&response), expected, "POST {uri}");
    response
}

/// Sends back only what a browser keeps of the `Set-Cookie` header.
fn with_cookie(uri: &str, set_cookie: &str) -> Request<Body> {
    let pair = set_cookie.split(';').next().unwrap().to_owned();
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn root_redirects_to_users() {
    let app = setup().await;

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/users");
}

#[tokio::test]
async fn user_pages() {
    let app = setup().await;

    assert_eq!(send(&app, get("/users")).await.status(), StatusCode::OK);
    assert_eq!(send(&app, get("/users/add_user")).await.status(), StatusCode::OK);

    let response = submit(
        &app,
        "/users/add_user",
        "first_name=Jane&last_name=Doe&image_url=",
        "/users",
    )
    .await;
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("_flash="));

    let page = text(send(&app, with_cookie("/users", set_cookie)).await).await;
    assert!(page.contains("Jane Doe"));
    assert!(page.contains("User Jane Doe added"));

    // tera escapes `/` in attribute values
    let page = text(send(&app, get("/users/1")).await).await;
    assert!(page.contains("www.freeiconspng.com"));
    assert_eq!(send(&app, get("/users/1/edit")).await.status(), StatusCode::OK);

    submit(
        &app,
        "/users/1/edit",
        "first_name=Janet&last_name=Smith&image_url=https%3A%2F%2Fexample.com%2Fj.png",
        "/users",
    )
    .await;
    let page = text(send(&app, get("/users/1")).await).await;
    assert!(page.contains("Janet Smith"));
    assert!(page.contains("example.com"));
    assert!(!page.contains("freeiconspng"));

    let response = send(&app, get("/users/1/delete")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/users");
    assert_eq!(send(&app, get("/users/1")).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_pages() {
    let app = setup().await;

    submit(&app, "/users/add_user", "first_name=A&last_name=B&image_url=", "/users").await;
    submit(&app, "/tags/new", "name=rust", "/tags").await;

    assert_eq!(send(&app, get("/users/1/posts/new")).await.status(), StatusCode::OK);
    submit(
        &app,
        "/users/1/posts/new",
        "title=Hello&content=First+post&tags=1&tags=99",
        "/users/1",
    )
    .await;

    let page = text(send(&app, get("/posts/1")).await).await;
    assert!(page.contains("Hello"));
    assert!(page.contains("rust"));
    assert!(page.contains("A B"));
    assert_eq!(send(&app, get("/posts/1/edit")).await.status(), StatusCode::OK);

    submit(&app, "/posts/1/edit", "title=Hello+again&content=Edited", "/posts/1").await;
    let page = text(send(&app, get("/posts/1")).await).await;
    assert!(page.contains("Hello again"));
    assert!(page.contains("rust"));

    submit(&app, "/posts/1/delete", "", "/users/1").await;
    assert_eq!(send(&app, get("/posts/1")).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, get("/tags/1")).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn tag_pages() {
    let app = setup().await;

    submit(&app, "/users/add_user", "first_name=A&last_name=B&image_url=", "/users").await;
    submit(&app, "/users/1/posts/new", "title=One&content=1", "/users/1").await;
    submit(&app, "/users/1/posts/new", "title=Two&content=2", "/users/1").await;

    assert_eq!(send(&app, get("/tags/new")).await.status(), StatusCode::OK);
    submit(&app, "/tags/new", "name=fun&posts=1", "/tags").await;

    let page = text(send(&app, get("/tags")).await).await;
    assert!(page.contains("fun"));

    let duplicate = send(&app, form("/tags/new", "name=fun")).await;
    assert_eq!(duplicate.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(send(&app, get("/tags/1/edit")).await.status(), StatusCode::OK);
    submit(&app, "/tags/1/edit", "name=games&posts=2", "/tags").await;

    let page = text(send(&app, get("/tags/1")).await).await;
    assert!(page.contains("games"));
    assert!(page.contains("Two"));
    assert!(!page.contains("One"));

    submit(&app, "/tags/1/delete", "", "/tags").await;
    assert_eq!(send(&app, get("/tags/1")).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, get("/posts/2")).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = setup().await;

    for uri in [
        "/users/7",
        "/users/7/edit",
        "/users/7/delete",
        "/users/7/posts/new",
        "/posts/7",
        "/posts/7/edit",
        "/tags/7",
        "/tags/7/edit",
        "/no/such/page",
    ] {
        assert_eq!(send(&app, get(uri)).await.status(), StatusCode::NOT_FOUND, "GET {uri}");
    }

    for uri in ["/posts/7/delete", "/tags/7/delete"] {
        assert_eq!(send(&app, form(uri, "")).await.status(), StatusCode::NOT_FOUND, "POST {uri}");
    }
    let response = send(&app, form("/users/7/posts/new", "title=T&content=C")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn flash_survives_punctuation_and_accents() {
    let app = setup().await;

    for (body, expected) in [
        ("first_name=Ann&last_name=O%3BBrien&image_url=", "User Ann O;Brien added"),
        ("first_name=Jos%C3%A9&last_name=Ruiz&image_url=", "User José Ruiz added"),
    ] {
        let response = submit(&app, "/users/add_user", body, "/users").await;
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("_flash="));

        let page = text(send(&app, with_cookie("/users", set_cookie)).await).await;
        assert!(page.contains(expected), "flash `{expected}` not shown");
    }
}

#[tokio::test]
async fn malformed_ids_are_not_found() {
    let app = setup().await;

    for uri in [
        "/users/abc",
        "/users/99999999999",
        "/users/-x/edit",
        "/posts/x/edit",
        "/tags/1.5",
    ] {
        assert_eq!(send(&app, get(uri)).await.status(), StatusCode::NOT_FOUND, "GET {uri}");
    }

    let response = send(&app, form("/posts/x/delete", "")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = setup().await;

    let response = send(&app, form("/users/add_user", "first_name=A")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(&app, form("/users/1/posts/new", "title=T")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(&app, form("/tags/new", "posts=1")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn serves_the_stylesheet() {
    let app = setup().await;

    let response = send(&app, get("/static/style.css")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
