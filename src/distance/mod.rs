//! Distance model.
//!
//! Great-circle distances between [`GeoNode`](crate::models::GeoNode)s
//! materialized as a dense matrix, shared by all three engines.

mod matrix;

pub use matrix::DistanceMatrix;
