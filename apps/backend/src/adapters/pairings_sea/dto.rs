/// DTO for scheduling a pairing.
#[derive(Debug, Clone)]
pub struct PairingInsert {
    pub round: i32,
    pub player1: String,
    pub player2: String,
    pub wins1: i32,
    pub wins2: i32,
    pub draws: i32,
}

/// DTO for the compare-and-set result write.
#[derive(Debug, Clone)]
pub struct PairingResult {
    pub round: i32,
    pub player1: String,
    pub player2: String,
    pub wins1: i32,
    pub wins2: i32,
    pub draws: i32,
}
