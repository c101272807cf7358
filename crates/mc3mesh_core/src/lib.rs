//! Public library API for decoding relocatable Midnight Club 3 mesh containers.

/// Container traversal, geometry scanning, and face synthesis.
pub mod container;
