// Copyright 2026 the Glimmer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry primitives and overlap math.
//!
//! Points, sizes, and rectangles are the [`kurbo`] types. A rectangle with a
//! `location` and a `size` is built with [`Rect::from_origin_size`]; its
//! derived `right`/`bottom` edges are `x1`/`y1`.
//!
//! Point containment follows [`Rect::contains`], which is half-open
//! (`x0 <= x < x1`): two LEDs that share an edge never both claim a point on
//! that edge.

pub use kurbo::{Point, Rect, Size, Vec2};

/// Returns the fraction of `candidate`'s area covered by `reference`.
///
/// The result is in `[0, 1]`: 0 when the rectangles are disjoint, 1 when
/// `candidate` lies entirely inside `reference`. A zero-area `candidate`
/// yields 0; it is treated as not overlapping anything.
#[must_use]
pub fn overlap_percentage(reference: Rect, candidate: Rect) -> f64 {
    let candidate_area = candidate.area();
    if candidate_area <= 0.0 {
        return 0.0;
    }
    let overlap = reference.intersect(candidate).area();
    (overlap / candidate_area).clamp(0.0, 1.0)
}

/// Returns `true` if the two rectangles share a region of positive area.
///
/// Rectangles that only touch along an edge or at a corner do not intersect.
#[must_use]
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.intersect(b).area() > 0.0
}

/// Returns the minimal axis-aligned rectangle covering all `rects`.
///
/// An empty input yields [`Rect::ZERO`] (a zero-sized rectangle at the
/// origin).
#[must_use]
pub fn bounding_box<I>(rects: I) -> Rect
where
    I: IntoIterator<Item = Rect>,
{
    rects
        .into_iter()
        .reduce(|acc, r| acc.union(r))
        .unwrap_or(Rect::ZERO)
}

/// Returns `rect` moved by `offset`.
#[inline]
#[must_use]
pub fn translate(rect: Rect, offset: Vec2) -> Rect {
    rect + offset
}

/// Returns `true` if `size` has no negative or non-finite component.
#[inline]
#[must_use]
pub fn is_valid_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::from_origin_size((x, y), (w, h))
    }

    #[test]
    fn derived_edges() {
        let r = rect(2.0, 3.0, 10.0, 5.0);
        assert_eq!(r.x1, 12.0, "right = x + width");
        assert_eq!(r.y1, 8.0, "bottom = y + height");
        assert_eq!(r.origin(), Point::new(2.0, 3.0));
        assert_eq!(r.size(), Size::new(10.0, 5.0));
    }

    #[test]
    fn disjoint_rects_have_no_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 20.0, 10.0, 10.0);
        assert_eq!(overlap_percentage(a, b), 0.0);
        assert!(!intersects(a, b));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 10.0, 10.0);
        assert_eq!(overlap_percentage(a, b), 0.0);
        assert!(!intersects(a, b));
    }

    #[test]
    fn contained_candidate_is_full_overlap() {
        let reference = rect(0.0, 0.0, 100.0, 100.0);
        let candidate = rect(10.0, 10.0, 10.0, 10.0);
        assert_eq!(overlap_percentage(reference, candidate), 1.0);
    }

    #[test]
    fn overlap_is_relative_to_candidate_area() {
        let reference = rect(0.0, 0.0, 5.0, 10.0);
        let candidate = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(overlap_percentage(reference, candidate), 0.5);
        // Swapping the roles changes the denominator.
        assert_eq!(overlap_percentage(candidate, reference), 1.0);
    }

    #[test]
    fn zero_area_candidate_is_no_overlap() {
        let reference = rect(0.0, 0.0, 10.0, 10.0);
        let line = rect(5.0, 5.0, 0.0, 3.0);
        assert_eq!(overlap_percentage(reference, line), 0.0);
        assert_eq!(overlap_percentage(reference, Rect::ZERO), 0.0);
    }

    #[test]
    fn bounding_box_of_nothing_is_zero() {
        assert_eq!(bounding_box(Vec::new()), Rect::ZERO);
    }

    #[test]
    fn bounding_box_covers_all_inputs() {
        let rects = [
            rect(5.0, 5.0, 10.0, 10.0),
            rect(-2.0, 8.0, 1.0, 1.0),
            rect(30.0, 0.0, 5.0, 40.0),
        ];
        let bb = bounding_box(rects);
        assert_eq!(bb, Rect::new(-2.0, 0.0, 35.0, 40.0));
    }

    #[test]
    fn translate_moves_origin_only() {
        let r = translate(rect(1.0, 2.0, 3.0, 4.0), Vec2::new(10.0, 20.0));
        assert_eq!(r, rect(11.0, 22.0, 3.0, 4.0));
    }

    #[test]
    fn negative_sizes_are_invalid() {
        assert!(is_valid_size(Size::ZERO));
        assert!(is_valid_size(Size::new(3.0, 0.0)));
        assert!(!is_valid_size(Size::new(-1.0, 2.0)));
        assert!(!is_valid_size(Size::new(f64::NAN, 2.0)));
    }
}
