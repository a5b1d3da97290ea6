//! Course database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Course, CourseCategory};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub photos: Option<String>,
    pub mentor: String,
    pub rolementor: String,
    pub avatar: Option<String>,
    pub company: String,
    pub rating: f32,
    pub review_count: i32,
    pub price: String,
    pub category: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// The category column is constrained at write time, so an unparseable
/// stored value can only come from out-of-band edits; fall back to the
/// first enum value rather than failing the whole read.
impl From<Model> for Course {
    fn from(model: Model) -> Self {
        Course {
            id: model.id,
            title: model.title,
            description: model.description,
            photos: model.photos,
            mentor: model.mentor,
            rolementor: model.rolementor,
            avatar: model.avatar,
            company: model.company,
            rating: model.rating,
            review_count: model.review_count,
            price: model.price,
            category: CourseCategory::parse(&model.category)
                .unwrap_or(CourseCategory::Pemasaran),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
