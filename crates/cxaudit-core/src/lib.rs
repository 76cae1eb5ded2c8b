pub mod companies;
pub mod config;
pub mod error;
pub mod types;
pub mod validation;

pub use companies::{resolve, COMPANIES};
pub use crate::config::*;
pub use error::*;
pub use types::*;
pub use validation::{validate_and_finalize, weighted_overall};
