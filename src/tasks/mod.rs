//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: reclaims expired cache entries and idle rate windows

mod cleanup;

pub use cleanup::spawn_cleanup_task;
