use blogly_service::sea_orm::{Database, DatabaseConnection};
use blogly_service::{Mutation, PostForm, TagForm, UserForm};
use entity::{post, tag, user};
use migration::{Migrator, MigratorTrait};

pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn seed_user(db: &DatabaseConnection, first_name: &str, last_name: &str) -> user::Model {
    Mutation::create_user(
        db,
        UserForm {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            image_url: String::new(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_post(
    db: &DatabaseConnection,
    user_id: i32,
    title: &str,
    tag_ids: &[i32],
) -> post::Model {
    Mutation::create_post(
        db,
        user_id,
        PostForm {
            title: title.to_owned(),
            content: format!("{title} content"),
        },
        tag_ids,
    )
    .await
    .unwrap()
}

pub async fn seed_tag(db: &DatabaseConnection, name: &str, post_ids: &[i32]) -> tag::Model {
    Mutation::create_tag(
        db,
        TagForm {
            name: name.to_owned(),
            post_ids: post_ids.to_vec(),
        },
    )
    .await
    .unwrap()
}
