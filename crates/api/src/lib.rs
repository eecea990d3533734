//! HTTP API: routing, request/response mapping and configuration.

pub mod app;
pub mod config;
pub mod middleware;
