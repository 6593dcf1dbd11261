use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub recipe_id: i32,
    #[sea_orm(belongs_to, from = "recipe_id", to = "id")]
    pub recipe: HasOne<super::recipe::Entity>,

    pub position: i32, // display order within the recipe, from 0
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub quantity: String,
}

impl ActiveModelBehavior for ActiveModel {}
