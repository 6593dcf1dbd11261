use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub original_servings: i32, // always > 0

    #[sea_orm(has_many)]
    pub ingredients: HasMany<super::ingredient::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
