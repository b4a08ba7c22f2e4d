// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod repos;
pub mod time;
pub mod util;

pub use repos::{CountingReadRepo, FailingReadRepo, StaleReadRepo};
pub use time::fixed_now;
pub use util::{DummyClock, DummySlug};
