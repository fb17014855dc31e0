//! Query adapters: one stateless operation per tool.
//!
//! Each adapter calls the external client, unwraps the result, locates the
//! fields it needs and builds a fixed-shape response.

pub mod balance;
pub mod blocks;
pub mod supply;
pub mod transactions;
pub mod wallet;
