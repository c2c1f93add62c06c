//! SeaORM adapters: thin table access returning `DbErr`.

pub mod card_pool_sea;
pub mod league_sea;
pub mod moderation_sea;
pub mod pairings_sea;
pub mod players_sea;
