//! Approximate-nearest-neighbor index structures.

pub mod ivf;

pub use ivf::IvfIndex;
