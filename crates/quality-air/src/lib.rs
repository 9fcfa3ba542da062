//! Quality Air user management backend.
//!
//! A small REST service for creating, updating, listing and authenticating
//! users stored in a single SQLite table.

pub mod api;
pub mod config;
pub mod db;
pub mod user;
