//! Foundation utilities: math, time, and logging
//!
//! These modules have no dependency on the scene or physics layers and can be
//! used standalone.

pub mod logging;
pub mod math;
pub mod time;
