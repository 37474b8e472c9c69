//! Read-only mock API backed by static JSON fixtures.
//!
//! Every call re-reads its fixture; nothing is cached.

pub mod fixtures;
pub mod handlers;
pub mod service;

pub use fixtures::{FixtureSource, Fixtures};
pub use service::MockDataService;
