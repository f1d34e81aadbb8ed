//! HTTP route handlers.

pub mod auth;
pub mod chronicle;
pub mod connections;
pub mod contacts;
pub mod health;
pub mod profiles;
pub mod synergy;
pub mod work_entries;
