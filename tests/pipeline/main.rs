//! End-to-end tests for `tkview-rs`: asset files on disk through to composed
//! rasters and exported images.

mod compose;
mod fixtures;
mod load;
mod session;
