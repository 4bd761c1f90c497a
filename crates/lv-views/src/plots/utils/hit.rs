//! Pointer hit testing in screen space

use egui::Pos2;

/// Shortest distance from `p` to the segment `a`-`b`
pub fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Index of the segment closest to `pointer`, if any lies within `tolerance`.
///
/// Ties go to the later segment, which is drawn on top.
pub fn nearest_segment(
    pointer: Pos2,
    segments: impl IntoIterator<Item = (usize, Pos2, Pos2)>,
    tolerance: f32,
) -> Option<usize> {
    nearest(
        segments
            .into_iter()
            .map(|(idx, a, b)| (idx, distance_to_segment(pointer, a, b))),
        tolerance,
    )
}

/// Index of the point closest to `pointer`, if any lies within `radius`.
///
/// Ties go to the later point, which is drawn on top.
pub fn nearest_point(
    pointer: Pos2,
    points: impl IntoIterator<Item = (usize, Pos2)>,
    radius: f32,
) -> Option<usize> {
    nearest(
        points.into_iter().map(|(idx, p)| (idx, pointer.distance(p))),
        radius,
    )
}

fn nearest(candidates: impl Iterator<Item = (usize, f32)>, limit: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, dist) in candidates {
        if dist > limit {
            continue;
        }
        if best.map_or(true, |(_, best_dist)| dist <= best_dist) {
            best = Some((idx, dist));
        }
    }
    best.map(|(idx, _)| idx)
}
