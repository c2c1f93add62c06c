use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "player_card_pool")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "player_id")]
    pub player_id: String,
    #[sea_orm(primary_key, auto_increment = false, column_name = "set_code")]
    pub set_code: String,
    #[sea_orm(primary_key, auto_increment = false, column_name = "collector_number")]
    pub collector_number: i32,
    pub name: String,
    pub count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::PlayerId",
        to = "super::players::Column::Id"
    )]
    Player,
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
