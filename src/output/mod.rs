//! Result output
//!
//! - [`sink`]: the one-shot "elapsed_us count sum" record (default `primes.txt`)
//! - [`text`]: human-readable console summary
//! - [`json`]: structured JSON result document

pub mod json;
pub mod sink;
pub mod text;
