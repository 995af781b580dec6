//! API Routes
//!
//! Route handlers organized by functionality.

pub mod election;
pub mod health;
pub mod voters;
pub mod votes;
pub mod wallet;
