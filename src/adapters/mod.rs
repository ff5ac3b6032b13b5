//! Concrete adapter implementations for ports.

pub mod csv_price_adapter;
pub mod csv_repository_adapter;
pub mod memory_cache;
pub mod file_config_adapter;
