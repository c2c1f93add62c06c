/// DTO for inserting or overwriting a player row.
#[derive(Debug, Clone)]
pub struct PlayerUpsert {
    pub id: String,
    pub wild_cards: i32,
    pub wild_packs: i32,
    pub dropped: bool,
}
