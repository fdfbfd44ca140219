pub mod export;
pub(crate) mod health;
pub mod industries;
pub mod research;
pub mod settings;

pub use health::health_check;
