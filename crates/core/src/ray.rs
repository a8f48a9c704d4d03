//! Rays and segments: rectangle raycasting and ray/ray intersection.
//!
//! A [`Ray2D`] is `origin + dir·s`. Infinite rays accept any `s > 0`; finite
//! rays stand for the segment `origin..origin + dir`, so their scale is the
//! direction's own length rather than 1.
//!
//! Misses are ordinary results here: every query returns `Option`.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::draw::{Dot, DrawSettings, Segment};
use crate::rect::Rect;
use crate::vector::Vector2D;

/// Directions shorter than this (squared) cannot be cast.
const MIN_DIR_LEN_SQR: f64 = 1e-12;

/// Origin plus direction, optionally limited to the segment it spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray2D {
    pub origin: Vector2D,
    pub dir: Vector2D,
    #[serde(default)]
    pub has_finite_length: bool,
}

/// A successful raycast or intersection: the point and the ray parameter `s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vector2D,
    pub s: f64,
}

/// Nearest intersection found by [`Ray2D::intersect_closest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestHit<'a> {
    pub point: Vector2D,
    pub ray: &'a Ray2D,
    pub s: f64,
}

impl Ray2D {
    /// Infinite half-line.
    pub fn new(origin: Vector2D, dir: Vector2D) -> Self {
        Self {
            origin,
            dir,
            has_finite_length: false,
        }
    }

    /// Segment from `origin` to `origin + dir`.
    pub fn finite(origin: Vector2D, dir: Vector2D) -> Self {
        Self {
            origin,
            dir,
            has_finite_length: true,
        }
    }

    /// Ray from the center of `rect` pointing along +x.
    pub fn center(rect: &Rect, has_finite_length: bool) -> Self {
        Self {
            origin: Vector2D::center(rect),
            dir: Vector2D::from_angle(0.0),
            has_finite_length,
        }
    }

    pub fn point_at(&self, s: f64) -> Vector2D {
        self.origin + self.dir * s
    }

    /// `origin + dir`, the far end of a finite ray.
    pub fn end(&self) -> Vector2D {
        self.point_at(1.0)
    }

    /// First crossing of the rectangle boundary along the ray.
    ///
    /// Only the sides the direction points at are considered (right when
    /// `dir.x > 0`, left when `dir.x < 0`, bottom/`max_y` when `dir.y > 0`,
    /// top/`min_y` when `dir.y < 0`), and the smallest positive finite
    /// parameter wins. Returns `None` for a degenerate direction, when the
    /// rectangle is behind the ray, or when a finite ray ends first.
    pub fn raycast(&self, rect: &Rect) -> Option<RayHit> {
        if self.dir.len_sqr() < MIN_DIR_LEN_SQR {
            return None;
        }

        let mut candidates = [f64::NAN; 2];
        if self.dir.x > 0.0 {
            candidates[0] = (rect.max_x - self.origin.x) / self.dir.x;
        } else if self.dir.x < 0.0 {
            candidates[0] = (rect.min_x - self.origin.x) / self.dir.x;
        }
        if self.dir.y > 0.0 {
            candidates[1] = (rect.max_y - self.origin.y) / self.dir.y;
        } else if self.dir.y < 0.0 {
            candidates[1] = (rect.min_y - self.origin.y) / self.dir.y;
        }

        let s = candidates
            .into_iter()
            .filter(|s| s.is_finite() && *s > 0.0)
            .fold(f64::INFINITY, f64::min);
        if !s.is_finite() || (self.has_finite_length && s > 1.0) {
            return None;
        }

        Some(RayHit {
            point: self.point_at(s),
            s,
        })
    }

    /// Intersection of two rays, solving `o1 + d1·s = o2 + d2·t`.
    ///
    /// Parallel and collinear rays (`d1 × d2 == 0`) never intersect. The point
    /// must lie strictly ahead of both origins, and within the span of each
    /// ray that has finite length. Returns the point and `s` along `self`.
    pub fn intersect(&self, other: &Ray2D) -> Option<RayHit> {
        let det = self.dir.cross(other.dir);
        if det == 0.0 {
            return None;
        }

        let to_other = other.origin - self.origin;
        let s = to_other.cross(other.dir) / det;
        let t = to_other.cross(self.dir) / det;
        if s <= 0.0 || t <= 0.0 || !s.is_finite() || !t.is_finite() {
            return None;
        }

        let point = self.point_at(s);
        if !self.reaches(point) || !other.reaches(point) {
            return None;
        }

        Some(RayHit { point, s })
    }

    /// Nearest intersection among `candidates`, by parameter along `self`.
    ///
    /// Candidates equal to `self` (origin and direction within
    /// [`EPSILON`](crate::vector::EPSILON)) are skipped. On equal parameters
    /// the first candidate in iteration order is kept.
    pub fn intersect_closest<'a, I>(&self, candidates: I) -> Option<ClosestHit<'a>>
    where
        I: IntoIterator<Item = &'a Ray2D>,
    {
        let mut best: Option<ClosestHit<'a>> = None;
        for ray in candidates {
            if self.same_ray(ray) {
                continue;
            }
            let Some(hit) = self.intersect(ray) else {
                continue;
            };
            if best.map_or(true, |b| hit.s < b.s) {
                best = Some(ClosestHit {
                    point: hit.point,
                    ray,
                    s: hit.s,
                });
            }
        }
        best
    }

    fn same_ray(&self, other: &Ray2D) -> bool {
        self.origin.approx_eq(other.origin) && self.dir.approx_eq(other.dir)
    }

    /// Whether `point` (assumed on the ray's line, ahead of origin) is in range.
    fn reaches(&self, point: Vector2D) -> bool {
        !self.has_finite_length || (point - self.origin).len_sqr() <= self.dir.len_sqr()
    }

    /// Describes the ray's direction as a segment drawn from its origin.
    pub fn to_segment(&self, settings: &DrawSettings) -> Segment {
        self.dir.segment_from(self.origin, settings)
    }

    pub fn origin_dot(&self, radius: f64, color: Color) -> Dot {
        self.origin.as_dot(radius, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector2D {
        Vector2D::new(x, y)
    }

    fn square() -> Rect {
        Rect::new(0.0, 100.0, 0.0, 100.0)
    }

    // -- Raycast --

    #[test]
    fn raycast_from_center_hits_right_side() {
        let hit = Ray2D::new(v(50.0, 50.0), v(1.0, 0.0))
            .raycast(&square())
            .expect("should hit");
        assert!(hit.point.approx_eq(v(100.0, 50.0)), "got {}", hit.point);
        assert!((hit.s - 50.0).abs() < 1e-9);
    }

    #[test]
    fn raycast_each_axis_direction() {
        let origin = v(50.0, 50.0);
        let cases = [
            (v(-1.0, 0.0), v(0.0, 50.0)),
            (v(0.0, 1.0), v(50.0, 100.0)),
            (v(0.0, -1.0), v(50.0, 0.0)),
        ];
        for (dir, expected) in cases {
            let hit = Ray2D::new(origin, dir).raycast(&square()).unwrap();
            assert!(hit.point.approx_eq(expected), "dir {dir}: got {}", hit.point);
        }
    }

    #[test]
    fn raycast_diagonal_takes_nearest_side() {
        let hit = Ray2D::new(v(50.0, 50.0), v(1.0, 2.0))
            .raycast(&square())
            .unwrap();
        assert!(hit.point.approx_eq(v(75.0, 100.0)), "got {}", hit.point);
        assert!((hit.s - 25.0).abs() < 1e-9);
    }

    #[test]
    fn raycast_zero_direction_is_none() {
        for origin in [v(50.0, 50.0), v(-10.0, 300.0), v(0.0, 0.0)] {
            assert!(Ray2D::new(origin, Vector2D::zero()).raycast(&square()).is_none());
        }
        assert!(Ray2D::new(v(1.0, 1.0), v(1e-7, 0.0)).raycast(&square()).is_none());
    }

    #[test]
    fn raycast_rect_behind_ray_is_none() {
        assert!(Ray2D::new(v(150.0, 50.0), v(1.0, 0.0))
            .raycast(&square())
            .is_none());
    }

    #[test]
    fn raycast_finite_ray_stopping_short_is_none() {
        assert!(Ray2D::finite(v(50.0, 50.0), v(10.0, 0.0))
            .raycast(&square())
            .is_none());
        let hit = Ray2D::finite(v(50.0, 50.0), v(60.0, 0.0))
            .raycast(&square())
            .expect("long enough to reach the side");
        assert!(hit.point.approx_eq(v(100.0, 50.0)));
        assert!(hit.s <= 1.0);
    }

    #[test]
    fn raycast_from_outside_reports_the_far_side() {
        let hit = Ray2D::new(v(-50.0, 50.0), v(1.0, 0.0))
            .raycast(&square())
            .unwrap();
        assert!(hit.point.approx_eq(v(100.0, 50.0)));
    }

    #[test]
    fn raycast_against_inset_rect() {
        let rect = Rect::from_size(200.0, 100.0).inset(20.0);
        let hit = Ray2D::center(&Rect::from_size(200.0, 100.0), false)
            .raycast(&rect)
            .unwrap();
        assert!(hit.point.approx_eq(v(180.0, 50.0)));
    }

    // -- Intersection --

    #[test]
    fn crossing_rays_intersect() {
        let a = Ray2D::new(v(0.0, 0.0), v(1.0, 1.0));
        let b = Ray2D::new(v(10.0, 0.0), v(-1.0, 1.0));
        let hit = a.intersect(&b).expect("rays cross");
        assert!(hit.point.approx_eq(v(5.0, 5.0)));
        assert!((hit.s - 5.0).abs() < 1e-9);
    }

    #[test]
    fn swapping_rays_keeps_point_but_changes_parameter() {
        let a = Ray2D::new(v(0.0, 0.0), v(2.0, 2.0));
        let b = Ray2D::new(v(10.0, 0.0), v(-1.0, 1.0));
        let ab = a.intersect(&b).unwrap();
        let ba = b.intersect(&a).unwrap();
        assert!(ab.point.approx_eq(ba.point));
        assert!((ab.s - 2.5).abs() < 1e-9);
        assert!((ba.s - 5.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_and_collinear_rays_do_not_intersect() {
        let a = Ray2D::new(v(0.0, 0.0), v(1.0, 0.0));
        assert!(a.intersect(&Ray2D::new(v(0.0, 5.0), v(3.0, 0.0))).is_none());
        assert!(a.intersect(&Ray2D::new(v(5.0, 0.0), v(-1.0, 0.0))).is_none());
        assert!(a.intersect(&a).is_none());
    }

    #[test]
    fn intersection_behind_either_origin_is_rejected() {
        let b = Ray2D::new(v(10.0, 0.0), v(-1.0, 1.0));
        assert!(Ray2D::new(v(0.0, 0.0), v(-1.0, -1.0)).intersect(&b).is_none());
        let b_away = Ray2D::new(v(10.0, 0.0), v(1.0, -1.0));
        assert!(Ray2D::new(v(0.0, 0.0), v(1.0, 1.0)).intersect(&b_away).is_none());
    }

    #[test]
    fn finite_ray_short_of_target_misses_but_infinite_hits() {
        let b = Ray2D::new(v(10.0, 0.0), v(-1.0, 1.0));
        let short = Ray2D::finite(v(0.0, 0.0), v(2.0, 2.0));
        assert!(short.intersect(&b).is_none());
        let unbounded = Ray2D {
            has_finite_length: false,
            ..short
        };
        assert!(unbounded.intersect(&b).is_some());
    }

    #[test]
    fn finite_other_ray_limits_the_hit_too() {
        let a = Ray2D::new(v(0.0, 0.0), v(1.0, 1.0));
        let short_b = Ray2D::finite(v(10.0, 0.0), v(-1.0, 1.0));
        assert!(a.intersect(&short_b).is_none());
        let long_b = Ray2D::finite(v(10.0, 0.0), v(-6.0, 6.0));
        assert!(a.intersect(&long_b).is_some());
    }

    // -- Closest intersection --

    #[test]
    fn intersect_closest_picks_smallest_parameter() {
        let a = Ray2D::new(v(0.0, 0.0), v(1.0, 1.0));
        let far = Ray2D::new(v(20.0, 0.0), v(-1.0, 1.0));
        let near = Ray2D::new(v(10.0, 0.0), v(-1.0, 1.0));
        let miss = Ray2D::new(v(-5.0, 0.0), v(-1.0, 0.0));
        let candidates = [far, miss, near];
        let hit = a.intersect_closest(&candidates).unwrap();
        assert_eq!(*hit.ray, near);
        assert!(hit.point.approx_eq(v(5.0, 5.0)));
        assert!((hit.s - 5.0).abs() < 1e-9);
    }

    #[test]
    fn intersect_closest_skips_self() {
        let a = Ray2D::new(v(0.0, 0.0), v(1.0, 1.0));
        let other = Ray2D::new(v(10.0, 0.0), v(-1.0, 1.0));
        let candidates = [a, other];
        let hit = a.intersect_closest(&candidates).unwrap();
        assert_eq!(*hit.ray, other);
        assert!(a.intersect_closest(&[a]).is_none());
    }

    #[test]
    fn intersect_closest_first_wins_ties() {
        let a = Ray2D::new(v(0.0, 0.0), v(1.0, 1.0));
        let from_right = Ray2D::new(v(10.0, 0.0), v(-1.0, 1.0));
        let from_top = Ray2D::new(v(0.0, 10.0), v(1.0, -1.0));
        let right_first = [from_right, from_top];
        let top_first = [from_top, from_right];
        let first = a.intersect_closest(&right_first).unwrap();
        assert_eq!(*first.ray, from_right);
        let second = a.intersect_closest(&top_first).unwrap();
        assert_eq!(*second.ray, from_top);
    }

    #[test]
    fn intersect_closest_empty_is_none() {
        let a = Ray2D::new(v(0.0, 0.0), v(1.0, 1.0));
        let none: [Ray2D; 0] = [];
        assert!(a.intersect_closest(&none).is_none());
    }

    // -- Helpers --

    #[test]
    fn center_ray_points_along_x() {
        let r = Ray2D::center(&square(), true);
        assert_eq!(r.origin, v(50.0, 50.0));
        assert!(r.dir.approx_eq(v(1.0, 0.0)));
        assert!(r.has_finite_length);
    }

    #[test]
    fn end_and_point_at() {
        let r = Ray2D::finite(v(1.0, 1.0), v(2.0, 0.0));
        assert_eq!(r.end(), v(3.0, 1.0));
        assert_eq!(r.point_at(0.5), v(2.0, 1.0));
    }

    #[test]
    fn to_segment_spans_origin_to_end() {
        let r = Ray2D::new(v(1.0, 1.0), v(3.0, 4.0));
        let seg = r.to_segment(&DrawSettings::default());
        assert_eq!(seg.from, r.origin);
        assert_eq!(seg.to, r.end());
        assert!(seg.tail.is_some());
        assert_eq!(r.origin_dot(2.0, Color::BLACK).center, r.origin);
    }

    #[test]
    fn json_defaults_to_infinite() {
        let r: Ray2D =
            serde_json::from_str(r#"{"origin":{"x":0,"y":0},"dir":{"x":1,"y":0}}"#).unwrap();
        assert!(!r.has_finite_length);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn raycast_from_inside_lands_on_boundary(
                x in 1.0_f64..99.0,
                y in 1.0_f64..99.0,
                angle in 0.0_f64..std::f64::consts::TAU,
            ) {
                let ray = Ray2D::new(v(x, y), Vector2D::from_angle(angle));
                let hit = ray.raycast(&square()).expect("inside ray always exits");
                let p = hit.point;
                let on_edge = [p.x, 100.0 - p.x, p.y, 100.0 - p.y]
                    .iter()
                    .any(|d| d.abs() < 1e-6);
                prop_assert!(on_edge, "point {p} not on boundary");
                prop_assert!(square().inset(-1e-6).contains(p.x, p.y));
            }

            #[test]
            fn swapped_intersection_points_agree(
                ax in -50.0_f64..50.0, ay in -50.0_f64..50.0,
                bx in -50.0_f64..50.0, by in -50.0_f64..50.0,
                a_angle in 0.0_f64..std::f64::consts::TAU,
                b_angle in 0.0_f64..std::f64::consts::TAU,
            ) {
                let a = Ray2D::new(v(ax, ay), Vector2D::from_angle(a_angle));
                let b = Ray2D::new(v(bx, by), Vector2D::from_angle(b_angle));
                prop_assume!(a.dir.cross(b.dir).abs() > 1e-3);
                match (a.intersect(&b), b.intersect(&a)) {
                    (Some(ab), Some(ba)) => {
                        prop_assert!(ab.point.approx_eq_within(ba.point, 1e-4));
                    }
                    (None, None) => {}
                    (ab, ba) => prop_assert!(false, "asymmetric result {ab:?} vs {ba:?}"),
                }
            }
        }
    }
}
