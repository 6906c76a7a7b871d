//! HTTP API handlers for soundbloom-server

pub mod buildinfo;
pub mod health;
pub mod sounds;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use sounds::get_sounds;
