// Library exports for the binaries and tests
pub mod config;
pub mod db;
pub mod models;
pub mod services;
