mod find_split_point;
mod length;

pub use find_split_point::FindSplitPoint;
pub use length::CurveLength;
