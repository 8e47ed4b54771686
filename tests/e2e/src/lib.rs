//! Verbum end-to-end test support
//!
//! Shared harness and fixtures for the journey tests under `tests/`.


pub use harness::{TestClock, TestStoreManager};
pub use mocks::{DeckConfig, TestDataFactory, TestScenario};
