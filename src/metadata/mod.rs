//! Converted-metadata snapshot, annotation path resolution, and capability
//! restriction derivation.

pub mod capabilities;
pub mod model;
pub mod path;
