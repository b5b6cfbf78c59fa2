//! Departure board server.
//!
//! A web application that answers: "Which stations are near me, and what
//! leaves from them next?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod nearby;
pub mod refresh;
pub mod session;
pub mod transport;
pub mod web;
