//! Shared utilities for the Jimaku caption relay binaries.

pub mod logger;
pub mod time;
