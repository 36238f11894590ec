//! Motion clip core: the time-stamped skeletal configuration container and
//! the quaternion helpers the motion graph crates build on.

pub mod clip;
pub mod error;
pub mod math;

pub use clip::{ChannelLayout, Frame, MotionClip};
pub use error::ClipError;
pub use math::{Quat, Vec3};
