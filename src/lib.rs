//! TinyApp - a small multi-user URL shortener
//!
//! Registered users create short codes for long URLs and manage their own
//! entries; anyone may follow a short code through `/u/<code>`.
//!
//! # Architecture
//! - `storage`: in-memory User and URL directories plus seed data
//! - `services`: ownership filtering, access gate, auth and URL operations
//! - `api`: session cookies, middleware, HTML views, handlers and routes
//! - `config`: static configuration (TOML + environment)
//! - `runtime`: application state and the HTTP server loop
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
