use nalgebra::Point2;

/// Order four corners as top-left, top-right, bottom-right, bottom-left.
///
/// Corners are sorted by their angle around the centroid (clockwise on
/// screen, since image y grows downwards), and the cycle starts at the
/// corner with the smallest `x + y`. Unlike a row-then-column sort, this
/// keeps a consistent cyclic order for quadrilaterals rotated near 45°.
/// Ties on `x + y` go to the corner that comes first in angular order.
pub fn order_corners(corners: [Point2<f64>; 4]) -> [Point2<f64>; 4] {
    let cx = corners.iter().map(|p| p.x).sum::<f64>() / 4.0;
    let cy = corners.iter().map(|p| p.y).sum::<f64>() / 4.0;

    let mut sorted = corners;
    sorted.sort_by(|a, b| {
        let ta = (a.y - cy).atan2(a.x - cx);
        let tb = (b.y - cy).atan2(b.x - cx);
        ta.total_cmp(&tb)
    });

    let mut start = 0;
    for (i, p) in sorted.iter().enumerate() {
        if p.x + p.y < sorted[start].x + sorted[start].y {
            start = i;
        }
    }
    sorted.rotate_left(start);
    sorted
}
