//! Caching proxy for the public bacon ipsum text generator.

pub mod cache;
pub mod gateway;
pub mod model;
pub mod render;
pub mod upstream;
