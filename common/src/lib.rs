//! Shared types and client-side logic for the vault migration console.
//!
//! Everything in this crate is target-agnostic: the browser console
//! (`vault-console`) compiles it to `wasm32`, the host process and the test
//! suite compile it natively.

pub mod error;
pub mod filter;
pub mod jobs;
pub mod model;
pub mod pagination;
pub mod requests;
