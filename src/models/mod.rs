pub mod activity;
pub mod child;
pub mod database;
pub mod group;
pub mod message;
pub mod parent;
pub mod status;
