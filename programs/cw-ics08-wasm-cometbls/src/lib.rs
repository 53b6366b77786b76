#![doc = include_str!("../README.md")]

pub mod contract;
mod error;
pub mod msg;
pub mod state;

pub use error::ContractError;
