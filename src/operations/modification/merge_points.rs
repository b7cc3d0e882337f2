use crate::error::{OperationError, Result};
use crate::geometry::{BezierCurve, SplitPoint};

use super::{InsertPoint, RemovePoint};

/// Merges two adjacent control points into a single point at their
/// connecting segment's midpoint, in place.
///
/// Implemented as a midpoint insertion followed by removal of the two
/// original points, so the merged point inherits subdivision handles and the
/// neighbouring segments deform smoothly.
pub struct MergePoints {
    index: usize,
}

impl MergePoints {
    /// Creates a new `MergePoints` operation merging points `index` and
    /// `index + 1`.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Executes the merge; the merged point ends up at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when the curve has fewer than 3 points, when
    /// `index + 1` is out of range, or when either removal hits degenerate
    /// handles.
    pub fn execute(&self, curve: &mut BezierCurve) -> Result<()> {
        let n = curve.point_count();
        if n < 3 {
            return Err(OperationError::InvalidSelection(
                "merging needs at least 3 control points".into(),
            )
            .into());
        }
        if self.index + 1 >= n {
            return Err(OperationError::InvalidSelection(format!(
                "cannot merge points {} and {} of {n}",
                self.index,
                self.index + 1
            ))
            .into());
        }

        InsertPoint::new(SplitPoint::new(self.index, 0.5)).execute(curve)?;
        // Right original first so the left one's index stays valid.
        RemovePoint::new(self.index + 2).execute(curve)?;
        RemovePoint::new(self.index).execute(curve)?;
        Ok(())
    }
}
