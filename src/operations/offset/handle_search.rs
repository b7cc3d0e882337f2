use crate::math::{cubic_3d, distance, Point3};

/// Which of a segment's two interior handles is being searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchedHandle {
    Right,
    Left,
}

/// Distance from `target` to the closest of `precision` uniform samples of
/// the segment with `handle` substituted at the searched position.
fn closest_sample_distance(
    segment: &[Point3; 4],
    which: SearchedHandle,
    handle: &Point3,
    target: &Point3,
    precision: usize,
) -> f64 {
    let [p0, p1, p2, p3] = segment;
    let (p1, p2) = match which {
        SearchedHandle::Right => (handle, p2),
        SearchedHandle::Left => (p1, handle),
    };

    let mut best = f64::INFINITY;
    for k in 0..precision {
        #[allow(clippy::cast_precision_loss)]
        let t = k as f64 / (precision - 1) as f64;
        let sample = cubic_3d::evaluate(p0, p1, p2, p3, t);
        best = best.min(distance(&sample, target));
    }
    best
}

/// Searches for the handle position that brings the segment closest to an
/// offset target, by scaling the handle along its own direction.
///
/// The handle is stepped outward by 1% of its vector per iteration until the
/// closest-sample distance stops improving, then inward from wherever the
/// outward walk ended. The handle recorded at each reversal is the first
/// position past the local minimum; the one-step overshoot is part of the
/// operation's established output and is kept as-is. Returns `None` when the
/// distance never degrades within the step budget, meaning no reversal was
/// observed and the search is inconclusive.
pub fn find_best_handle_length(
    segment: &[Point3; 4],
    which: SearchedHandle,
    target: &Point3,
    precision: usize,
) -> Option<Point3> {
    let [p0, p1, p2, p3] = segment;
    let (step, mut handle) = match which {
        SearchedHandle::Right => ((p1 - p0) * 0.01, *p1),
        SearchedHandle::Left => ((p2 - p3) * 0.01, *p2),
    };

    let mut current = closest_sample_distance(segment, which, &handle, target, precision);
    let mut best = None;

    // Longer handle.
    for _ in 0..precision {
        handle += step;
        let next = closest_sample_distance(segment, which, &handle, target, precision);
        if next > current {
            best = Some(handle);
            break;
        }
        current = next;
    }

    // Shorter handle, continuing from where the outward walk stopped.
    for _ in 0..precision {
        handle -= step;
        let next = closest_sample_distance(segment, which, &handle, target, precision);
        if next > current {
            best = Some(handle);
            break;
        }
        current = next;
    }

    best
}
