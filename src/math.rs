use macroquad::prelude::{Vec2, Vec3};

/// Tolerance used when comparing pixel positions and sizes. Changes smaller than this are
/// treated as "no change" and do not invalidate a layout.
pub const FRACTION_OF_PIXEL: f32 = 0.2;

/// Depth added on top of a layout's `z` so that resolved elements always sit slightly above
/// their layout baseline.
pub const DEPTH_BIAS: f32 = 0.01;

const APPROX_EPSILON: f32 = 0.0001;

/// Returns true if `a` and `b` are equal within a small absolute epsilon.
#[inline]
pub fn approx(a: f32, b: f32) -> bool {
    approx_to(a, b, APPROX_EPSILON)
}

/// Returns true if `a` and `b` differ by no more than `tolerance`.
#[inline]
pub fn approx_to(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

#[inline]
pub(crate) fn vec2_approx_to(a: Vec2, b: Vec2, tolerance: f32) -> bool {
    a.abs_diff_eq(b, tolerance)
}

/// Distances from each side of a rectangle. Used for border, padding, margin, inner offsets and
/// stretch insets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    /// Distance from the left side.
    pub left: f32,
    /// Distance from the top side.
    pub top: f32,
    /// Distance from the right side.
    pub right: f32,
    /// Distance from the bottom side.
    pub bottom: f32,
}

impl Edges {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates new `Edges` in left, top, right, bottom order.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Sets the same value for all sides.
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sets the same value for left and right sides.
    /// Top and bottom are set to `0`.
    pub const fn horizontal(value: f32) -> Self {
        Self::new(value, 0.0, value, 0.0)
    }

    /// Sets the same value for top and bottom sides.
    /// Left and right are set to `0`.
    pub const fn vertical(value: f32) -> Self {
        Self::new(0.0, value, 0.0, value)
    }

    /// Sum of the left and right sides.
    #[inline]
    pub fn width(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom sides.
    #[inline]
    pub fn height(&self) -> f32 {
        self.top + self.bottom
    }

    /// Returns true if every side is within `tolerance` of the matching side in `other`.
    pub fn approx_to(&self, other: &Edges, tolerance: f32) -> bool {
        approx_to(self.left, other.left, tolerance)
            && approx_to(self.top, other.top, tolerance)
            && approx_to(self.right, other.right, tolerance)
            && approx_to(self.bottom, other.bottom, tolerance)
    }
}

impl std::ops::Add for Edges {
    type Output = Edges;

    fn add(self, rhs: Edges) -> Edges {
        Edges::new(
            self.left + rhs.left,
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
        )
    }
}

impl From<f32> for Edges {
    /// Creates edges with the same value for all sides.
    fn from(value: f32) -> Self {
        Self::all(value)
    }
}

impl From<(f32, f32, f32, f32)> for Edges {
    /// Creates edges from a tuple in CSS order: (top, right, bottom, left).
    fn from((top, right, bottom, left): (f32, f32, f32, f32)) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// A resolved rectangle in parent-local, center-origin pixel space.
///
/// `x`/`y` are the center of the rectangle. Floating anchors leave `width`/`height` at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Divides `scale` by `parent` component-wise, leaving `z` untouched when the parent depth
/// scale is zero.
pub(crate) fn relative_scale(scale: Vec3, parent: Vec3) -> Vec3 {
    let z = if approx(parent.z, 0.0) { scale.z } else { scale.z / parent.z };
    Vec3::new(
        scale.x / non_zero(parent.x),
        scale.y / non_zero(parent.y),
        z,
    )
}

/// Substitutes `1` for a numerically zero value so it can safely be used as a divisor.
#[inline]
pub(crate) fn non_zero(value: f32) -> f32 {
    if approx(value, 0.0) {
        1.0
    } else {
        value
    }
}
