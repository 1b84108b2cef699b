use sea_orm::entity::prelude::*;

/// Status every report starts with. Nothing transitions it yet.
pub const DEFAULT_STATUS: &str = "Open";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bugs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub tag: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(50))", default_value = "Open")]
    pub status: String,

    /// Username copied from the reporter at creation time
    #[sea_orm(column_type = "String(StringLen::N(80))")]
    pub reported_by: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
