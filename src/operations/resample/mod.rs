mod interpolate;
mod set_length;
mod space;

pub use interpolate::{Interpolate, InterpolateProportional};
pub use set_length::SetCurveLength;
pub use space::ResampleByArcLength;

pub(crate) use interpolate::bezier_length;
