//! eBus site client.
//!
//! This module provides an HTTP client for the Taipei eBus site,
//! which serves live route and stop information.
//!
//! Key characteristics of eBus:
//! - A stop's membership page lists every route serving that stop
//! - A route's stop-list data carries both traversal directions, with
//!   per-stop coordinates and a live arrival annotation
//! - Arrival annotations are **ephemeral** free text: a countdown, an
//!   arrived marker, or empty while not yet computed
//! - The stop list materialises lazily, so the fetch is bounded by an
//!   explicit readiness timeout

mod client;
mod error;
mod types;

pub use client::{EbusClient, EbusConfig, SEQUENCE_TIMEOUT_SECS};
pub use error::EbusError;
pub use types::{RouteItemDto, RouteStopDto, RoutesOfStopDto, StopsOfRouteDto};
