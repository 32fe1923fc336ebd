//! Infrastructure layer.
//!
//! Concrete repositories, clocks, the expiry scheduler and wire DTOs.

pub mod clock;
pub mod dto;
pub mod repository;
pub mod scheduler;
