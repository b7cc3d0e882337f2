mod handle_type;
mod insert_point;
mod join;
mod merge_points;
mod remove_point;
mod slide_point;
mod smooth;
mod split;

pub use handle_type::SetHandleType;
pub use insert_point::InsertPoint;
pub use join::Join;
pub use merge_points::MergePoints;
pub use remove_point::RemovePoint;
pub use slide_point::SlidePoint;
pub use smooth::Smooth;
pub use split::SplitCurve;
