//! Time source abstraction.

use super::Timestamp;

/// Source of the current time.
///
/// Use cases read the time through this trait so tests can control it.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
