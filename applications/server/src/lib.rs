//! Cantor Server
//!
//! HTTP API for the setlist manager: JWT-authenticated routes over the
//! shared song library and per-user setlists.

#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
