//! Data-access layer.
//!
//! [`dao`] holds the operations every table supports; the per-entity modules add typed
//! inserts and updates, lookups by natural keys and composite fetches.

pub mod category;
pub mod client;
pub mod contact;
pub mod dao;
pub mod employee;
pub mod full;
pub mod password;
pub mod product;
pub mod sale;
pub mod supplier;
pub mod user;

pub use dao::BatchResult;
pub use full::{ContactOwner, Full};
