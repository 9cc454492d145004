//! HTTP request handlers

pub mod calculator;
pub mod health;

pub use calculator::*;
pub use health::*;
