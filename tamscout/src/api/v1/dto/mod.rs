//! v1 API Data Transfer Objects.
//!
//! Wire format for the v1 REST API, kept separate from the domain models in
//! `src/models/` and converted from them with `From` impls.

pub mod industries;
pub mod research;
pub mod settings;

pub use industries::*;
pub use research::*;
pub use settings::*;
