//! Climate observation API server.
//!
//! A read-only web service over a SQLite database of precipitation and
//! temperature readings, answering fixed aggregate queries as JSON.

pub mod config;
pub mod domain;
pub mod store;
pub mod web;
