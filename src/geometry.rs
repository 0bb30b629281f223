//! Pure anchor math.
//!
//! Every function works in parent-local, center-origin pixel space: `(0, 0)` is the middle of the
//! container, `+x` goes right and `+y` goes up.

use macroquad::prelude::Vec2;

use crate::anchor::{AlignX, AlignY, Anchor};
use crate::math::{BoundingBox, Edges};

/// X of an element whose left side sits `edges.left` pixels from the container's left side.
#[inline]
pub fn align_left(edges: &Edges, w: f32, size: Vec2) -> f32 {
    -w * 0.5 + size.x * 0.5 + edges.left
}

/// X of an element whose right side sits `edges.right` pixels from the container's right side.
#[inline]
pub fn align_right(edges: &Edges, w: f32, size: Vec2) -> f32 {
    w * 0.5 - size.x * 0.5 - edges.right
}

/// Y of an element whose top side sits `edges.top` pixels below the container's top side.
#[inline]
pub fn align_top(edges: &Edges, h: f32, size: Vec2) -> f32 {
    h * 0.5 - size.y * 0.5 - edges.top
}

/// Y of an element whose bottom side sits `edges.bottom` pixels above the container's bottom.
#[inline]
pub fn align_bottom(edges: &Edges, h: f32, size: Vec2) -> f32 {
    -h * 0.5 + size.y * 0.5 + edges.bottom
}

/// Resolves a floating anchor.
///
/// `offset` is the accumulated pixel offset (explicit offset plus row-flow offset). It acts as the
/// edge distance on aligned axes and as the absolute coordinate on centered axes. `inner` is added
/// on every axis that is aligned to an edge. The returned width/height are always zero.
pub fn resolve_floating(
    align: (AlignX, AlignY),
    offset: Vec2,
    inner: &Edges,
    w: f32,
    h: f32,
    size: Vec2,
) -> BoundingBox {
    let edges = Edges::new(offset.x, offset.y, offset.x, offset.y);
    let x = match align.0 {
        AlignX::Left => align_left(&edges, w, size) + inner.left,
        AlignX::CenterX => offset.x,
        AlignX::Right => align_right(&edges, w, size) + inner.right,
    };
    let y = match align.1 {
        AlignY::Top => align_top(&edges, h, size) + inner.top,
        AlignY::CenterY => offset.y,
        AlignY::Bottom => align_bottom(&edges, h, size) + inner.bottom,
    };
    BoundingBox::new(x, y, 0.0, 0.0)
}

/// Resolves a stretch anchor against a `w` x `h` container.
///
/// Stretch-left/right keep a fixed width taken from the inset on the *opposite* side
/// (`right`/`left`), stretch-top/bottom keep a fixed height taken from `bottom`/`top`. The
/// stretched dimension is the container size minus the pair of insets on that axis. Sizes are
/// not clamped, insets larger than the container give negative sizes.
///
/// Floating anchors are resolved as stretch-center.
pub fn resolve_stretch(anchor: Anchor, stretch: &Edges, w: f32, h: f32) -> BoundingBox {
    let Edges {
        left,
        top,
        right,
        bottom,
    } = *stretch;
    match anchor {
        Anchor::StretchLeft => {
            let x_size = right;
            let y_size = h - (top + bottom);
            let x_mid = -w * 0.5 + x_size * 0.5 + left;
            let y_mid = bottom * 0.5 - top * 0.5;
            BoundingBox::new(x_mid, y_mid, x_size, y_size)
        }
        Anchor::StretchTop => {
            let x_size = w - (left + right);
            let y_size = bottom;
            let x_mid = left * 0.5 - right * 0.5;
            let y_mid = h * 0.5 - y_size * 0.5 - top;
            BoundingBox::new(x_mid, y_mid, x_size, y_size)
        }
        Anchor::StretchRight => {
            let x_size = left;
            let y_size = h - (top + bottom);
            let x_mid = w * 0.5 - x_size * 0.5 + right;
            let y_mid = bottom * 0.5 - top * 0.5;
            BoundingBox::new(x_mid, y_mid, x_size, y_size)
        }
        Anchor::StretchBottom => {
            let x_size = w - (left + right);
            let y_size = top;
            let x_mid = left * 0.5 - right * 0.5;
            let y_mid = -h * 0.5 + y_size * 0.5 - bottom;
            BoundingBox::new(x_mid, y_mid, x_size, y_size)
        }
        _ => {
            let x_size = w - (left + right);
            let y_size = h - (top + bottom);
            let x_mid = left * 0.5 - right * 0.5;
            let y_mid = bottom * 0.5 - top * 0.5;
            BoundingBox::new(x_mid, y_mid, x_size, y_size)
        }
    }
}
