//! Shared utilities: time formatting and process resource tracking

pub mod resource;
pub mod time;
