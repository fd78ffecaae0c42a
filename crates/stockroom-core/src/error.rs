use thiserror::Error;

#[derive(Debug, Error)]
pub enum StockroomError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
