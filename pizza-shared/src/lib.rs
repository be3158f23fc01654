pub mod pii;
pub mod models;

pub use pii::Masked;
