//! Station directory.
//!
//! Holds the name → telecode mapping parsed from the 12306 station list,
//! plus the reverse lookup used to tie train endpoints back to stations.

mod directory;

pub use directory::StationDirectory;
