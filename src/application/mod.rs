pub mod error;
pub mod model;
pub mod ports;
pub mod slug;

pub use error::{ApplicationError, ApplicationResult, RegistrationError};
