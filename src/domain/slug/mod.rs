pub mod services;

pub use services::{SlugOwner, SlugService};
