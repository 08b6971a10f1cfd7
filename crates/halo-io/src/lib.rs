//! Catalog, merger-tree, and field-grid I/O.
//!
//! Text tables are whitespace-separated with `#` comment lines; field
//! grids are NumPy `.npy` archives read through `ndarray-npy`.

pub mod field;
pub mod output;
pub mod table;
