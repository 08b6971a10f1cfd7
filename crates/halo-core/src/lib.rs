//! Infall detection and tensor-field sampling kernels.
//!
//! Pure functions over in-memory merger trees and eigen-decomposed
//! field grids; all file I/O lives in `halo-io`.

pub mod grid;
pub mod infall;
pub mod sampler;
