use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Image shown for users who did not provide one.
pub const DEFAULT_IMAGE_URL: &str = "https://www.freeiconspng.com/img/13470";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub first_name: String,
    #[sea_orm(column_type = "Text")]
    pub last_name: String,
    #[sea_orm(column_type = "Text")]
    pub image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Returns `image_url` unless it is blank, in which case the placeholder is used.
pub fn image_url_or_default(image_url: &str) -> String {
    let image_url = image_url.trim();
    if image_url.is_empty() {
        DEFAULT_IMAGE_URL.to_owned()
    } else {
        image_url.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sea_orm::{DbBackend, QueryOrder, QueryTrait};

    fn jane() -> Model {
        Model {
            id: 1,
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            image_url: DEFAULT_IMAGE_URL.to_owned(),
        }
    }

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(jane().full_name(), "Jane Doe");
    }

    #[test]
    fn blank_image_url_falls_back() {
        assert_eq!(image_url_or_default(""), DEFAULT_IMAGE_URL);
        assert_eq!(image_url_or_default("   "), DEFAULT_IMAGE_URL);
        assert_eq!(
            image_url_or_default("https://example.com/me.png"),
            "https://example.com/me.png"
        );
    }

    #[test]
    fn listing_orders_by_last_then_first_name() {
        assert_eq!(
            Entity::find()
                .order_by_asc(Column::LastName)
                .order_by_asc(Column::FirstName)
                .build(DbBackend::Postgres)
                .to_string(),
            [
                r#"SELECT "users"."id", "users"."first_name", "users"."last_name", "users"."image_url""#,
                r#"FROM "users""#,
                r#"ORDER BY "users"."last_name" ASC, "users"."first_name" ASC"#,
            ]
            .join(" ")
        );
    }
}
