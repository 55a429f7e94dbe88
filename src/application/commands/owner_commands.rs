//! Owner Commands

#[derive(Debug, Clone)]
pub struct CreateOwner {
    pub sin: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct DeleteOwner {
    pub sin: i64,
}
