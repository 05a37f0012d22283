//! Australian GST invoice engine.
//!
//! [`core`] holds the calculation and validation rules; [`render`] turns an
//! assembled [`core::Invoice`] into a terminal preview or an HTML document.

pub mod core;
pub mod render;
