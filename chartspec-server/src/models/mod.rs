//! Data models served alongside chart specs

pub mod sample;

pub use sample::*;
