//! Application services.

pub mod auth;
pub mod cookies;
pub mod redemption;
pub mod synergy;
