//! Planned-route cache with hit-driven time-to-live.

mod path_cache;

pub use path_cache::PathCache;
