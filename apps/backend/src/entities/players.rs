use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "player")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "wild_card_count")]
    pub wild_card_count: i32,
    #[sea_orm(column_name = "wild_pack_count")]
    pub wild_pack_count: i32,
    pub dropped: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::player_card_pool::Entity")]
    CardPool,
}

impl Related<super::player_card_pool::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardPool.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
