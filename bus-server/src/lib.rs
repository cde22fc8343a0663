//! Taipei direct bus route server.
//!
//! A web application that answers: "which buses take me from this
//! stop straight to that stop, and where along the route are they?"

pub mod catalog;
pub mod domain;
pub mod ebus;
pub mod matcher;
pub mod render;
pub mod web;
