//! Two-dimensional vector value type.
//!
//! [`Vector2D`] is `Copy`, and every plain method (`add`, `scale`, `rotate`,
//! ...) returns a fresh vector. The `*_mut` methods and the `*Assign`
//! operators update the receiver in place and return it for chaining. They
//! need `&mut self`, so only the owner of that binding sees the change;
//! copies taken earlier keep their old value. Use them in per-frame hot paths
//! over many vectors and the value API everywhere else.
//!
//! Canvas coordinates grow downward, so a mathematically counter-clockwise
//! rotation shows up as clockwise on screen.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::draw::{Dot, DrawSettings, Segment};
use crate::prng::Xorshift64;
use crate::rect::Rect;

/// Default tolerance for [`Vector2D::approx_eq`].
pub const EPSILON: f64 = 1e-6;

/// A 2D vector or point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub const fn one() -> Self {
        Self::new(1.0, 1.0)
    }

    /// Midpoint of `rect`.
    pub fn center(rect: &Rect) -> Self {
        Self::new(
            (rect.min_x + rect.max_x) / 2.0,
            (rect.min_y + rect.max_y) / 2.0,
        )
    }

    /// Random integer-grid point in `[min_x, max_x) x [min_y, max_y)`.
    ///
    /// Degenerate (zero-width) axes return the minimum.
    pub fn random_in(rect: &Rect, rng: &mut Xorshift64) -> Self {
        let pick = |rng: &mut Xorshift64, min: f64, max: f64| {
            let span = (max - min).floor();
            if span <= 0.0 {
                min
            } else {
                (rng.next_f64() * span).floor() + min
            }
        };
        let x = pick(rng, rect.min_x, rect.max_x);
        let y = pick(rng, rect.min_y, rect.max_y);
        Self::new(x, y)
    }

    /// Unit vector `(cos a, sin a)`.
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Maps a noise sample in [-1, 1] to a unit direction.
    ///
    /// The sample is clamped, then mapped linearly onto the angle `(n + 1)π`,
    /// so -1 and 1 both land on `(1, 0)` and 0 on `(-1, 0)`.
    pub fn from_noise(n: f64) -> Self {
        let n = n.clamp(-1.0, 1.0);
        Self::from_angle((n + 1.0) * PI)
    }

    pub fn add(self, v: Vector2D) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }

    pub fn sub(self, v: Vector2D) -> Self {
        Self::new(self.x - v.x, self.y - v.y)
    }

    /// Componentwise product.
    pub fn mul(self, v: Vector2D) -> Self {
        Self::new(self.x * v.x, self.y * v.y)
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    /// Applies the column-major matrix
    ///
    /// ```text
    /// | a c |
    /// | b d |
    /// ```
    pub fn transform(self, a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::new(self.x * a + self.y * c, self.x * b + self.y * d)
    }

    /// Rotation by `angle` radians with `[[cos, -sin], [sin, cos]]`.
    ///
    /// Canvas y points down, so a positive angle turns clockwise on screen.
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        self.transform(cos, sin, -sin, cos)
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn normalize(self) -> Self {
        let len = self.len();
        if len == 0.0 {
            Self::zero()
        } else {
            self.scale(1.0 / len)
        }
    }

    /// Applies `f(component, axis)` to each axis (0 = x, 1 = y).
    pub fn map(self, f: impl Fn(f64, usize) -> f64) -> Self {
        Self::new(f(self.x, 0), f(self.y, 1))
    }

    pub fn add_mut(&mut self, v: Vector2D) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self
    }

    pub fn sub_mut(&mut self, v: Vector2D) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self
    }

    pub fn mul_mut(&mut self, v: Vector2D) -> &mut Self {
        self.x *= v.x;
        self.y *= v.y;
        self
    }

    pub fn scale_mut(&mut self, s: f64) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self
    }

    pub fn transform_mut(&mut self, a: f64, b: f64, c: f64, d: f64) -> &mut Self {
        *self = self.transform(a, b, c, d);
        self
    }

    pub fn rotate_mut(&mut self, angle: f64) -> &mut Self {
        *self = self.rotate(angle);
        self
    }

    pub fn normalize_mut(&mut self) -> &mut Self {
        *self = self.normalize();
        self
    }

    pub fn map_mut(&mut self, f: impl Fn(f64, usize) -> f64) -> &mut Self {
        *self = self.map(f);
        self
    }

    /// Angle to the positive x axis, in (-π, π].
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn len(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn len_sqr(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Vector from `self` to `v`.
    pub fn to(self, v: Vector2D) -> Self {
        v.sub(self)
    }

    pub fn dist_to(self, v: Vector2D) -> f64 {
        self.to(v).len()
    }

    /// Unit direction from `self` towards `v`.
    pub fn dir_to(self, v: Vector2D) -> Self {
        self.to(v).normalize()
    }

    pub fn dot(self, v: Vector2D) -> f64 {
        self.x * v.x + self.y * v.y
    }

    /// Scalar 2D cross product `x·v.y − y·v.x`.
    pub fn cross(self, v: Vector2D) -> f64 {
        self.x * v.y - self.y * v.x
    }

    /// Componentwise comparison within [`EPSILON`].
    pub fn approx_eq(self, v: Vector2D) -> bool {
        self.approx_eq_within(v, EPSILON)
    }

    pub fn approx_eq_within(self, v: Vector2D, epsilon: f64) -> bool {
        (self.x - v.x).abs() <= epsilon && (self.y - v.y).abs() <= epsilon
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Describes `self` drawn as an arrow-less line starting at `origin`.
    ///
    /// With marker settings, a tail of `tail_length` is laid perpendicular to
    /// the line, centred on `origin`.
    pub fn segment_from(self, origin: Vector2D, settings: &DrawSettings) -> Segment {
        let tail = settings.marker.as_ref().map(|marker| {
            let perp = *self
                .normalize()
                .rotate_mut(PI / 2.0)
                .scale_mut(marker.tail_length);
            let back = perp.scale(-0.5);
            let start = origin + back;
            Segment {
                from: start,
                to: start + perp,
                width: 1.0,
                color: marker.tail_color,
                tail: None,
            }
        });
        Segment {
            from: origin,
            to: origin + self,
            width: settings.line_width,
            color: settings.line_color,
            tail: tail.map(Box::new),
        }
    }

    /// Describes `self` as a filled point.
    pub fn as_dot(self, radius: f64, color: Color) -> Dot {
        Dot {
            center: self,
            radius,
            color,
        }
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.3}, {:.3})", self.x, self.y)
    }
}

impl From<[f64; 2]> for Vector2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Vector2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::add(self, rhs)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::sub(self, rhs)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        self.scale(rhs)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        self.scale(-1.0)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        self.add_mut(rhs);
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Vector2D) {
        self.sub_mut(rhs);
    }
}

impl MulAssign<f64> for Vector2D {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale_mut(rhs);
    }
}
