pub mod error;
pub mod health;
pub mod item;

pub use error::StockroomError;
pub use item::Item;
