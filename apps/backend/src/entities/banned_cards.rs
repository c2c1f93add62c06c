use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banned_card")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "card_name")]
    pub card_name: String,
    #[sea_orm(column_name = "banned_at")]
    pub banned_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
