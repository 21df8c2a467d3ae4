pub mod frame;
pub mod matrix;
pub mod vec3;

pub use frame::{rotate_around_axis, SectionFrame};
pub use matrix::Mat4;
pub use vec3::Vec3;
