use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "league_admin")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "player_id")]
    pub player_id: String,
    #[sea_orm(column_name = "granted_at")]
    pub granted_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
