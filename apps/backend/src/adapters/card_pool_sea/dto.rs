/// One grouped pool key and how many copies to add to it.
#[derive(Debug, Clone)]
pub struct PoolIncrement {
    pub name: String,
    pub set_code: String,
    pub collector_number: i32,
    pub count: i32,
}
