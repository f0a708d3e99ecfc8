//! Library entrypoint for the order-entry service.
//!
//! The binary only wires settings, logging and the listener together;
//! everything a test needs (state, router, store) is reachable from here.

pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;

pub mod services;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub store: services::OrderStore,
}
