#![forbid(unsafe_code)]

//! LTO event chain: hash-linked events, accounts and resource identifiers.
//!
//! This crate is the chain side of a Live Contracts process. It knows
//! nothing about scenarios or projections; consumers see it through the
//! [`ResourceChain`] trait.

pub mod account;
pub mod chain;
pub mod error;
pub mod event;
pub mod hashing;

pub use account::Account;
pub use chain::{EventChain, ResourceChain};
pub use error::ChainError;
pub use event::{Event, EventBody};
