//! Domain layer for the Nexus backend.
//!
//! This crate contains:
//! - Request/response DTOs for the HTTP API
//! - Domain enums (connection status, relationship types, chronicle kinds)
//! - Invite code constants and normalization
//! - The synergy reply parser

pub mod models;
