//! Reads GPX tracks recorded on the water and turns them into something you
//! can tell the story of a race with: offsets in nautical miles from the
//! start, speed in knots between every pair of points, and a smoothed speed.
//! Marks from other GPX files can be laid over the same frame.

pub mod config;
pub mod error;
pub mod kinematics;
pub mod marks;
pub mod model;
pub mod model_impls;
pub mod pipeline;
pub mod projection;
pub mod read;
pub mod time_format;
