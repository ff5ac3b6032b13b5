//! chartfolio: stock chart indicator and portfolio valuation engine.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], request
//! orchestration in [`service`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod service;
pub mod cli;
