//! Provider-agnostic map model
//!
//! This module contains the types that describe a single map instance
//! independently of any mapping provider. A renderer consumes a
//! [`MapDescription`] and never mutates it.

mod types;

pub use types::{Coordinate, MapDescription, MapType, Marker};
