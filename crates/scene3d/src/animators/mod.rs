//! Skeletal helpers for scene-graph hierarchies
//!
//! Animation itself is plain local-transform driving on nodes; this module
//! only adds the bone/skeleton conveniences on top.

mod skeleton;

pub use skeleton::Skeleton;
