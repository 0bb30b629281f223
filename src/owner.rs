use macroquad::prelude::{Vec2, Vec3};

/// What a [`Layout`](crate::layout::Layout) needs from the element that owns it.
///
/// The layout never owns its element. It is handed one of these every time it resolves, reads
/// the container bounds from it and writes the result back through it.
pub trait LayoutOwner {
    /// The owner's size in pixels.
    fn world_scale(&self) -> Vec3;

    /// The parent's size in pixels, `None` for roots.
    fn parent_world_scale(&self) -> Option<Vec3>;

    /// Size of the host window. Roots resolve against it.
    fn window_size(&self) -> Vec2;

    /// Sets the owner's position relative to its parent.
    fn set_position_local(&mut self, position: Vec3);

    /// Sets the owner's parent-relative scale without rescaling its children.
    fn scale_local_only(&mut self, scale: Vec3);

    fn is_root(&self) -> bool {
        self.parent_world_scale().is_none()
    }

    /// The bounds this owner is laid out in: the window for roots, the parent's size otherwise.
    fn container_bounds(&self) -> Vec2 {
        match self.parent_world_scale() {
            Some(scale) => scale.truncate(),
            None => self.window_size(),
        }
    }
}

/// Local transform of a UI element.
///
/// `scale` is stored relative to the parent, so a child's pixel size is its parent's world scale
/// times its own scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// The world scale of this transform under a parent of scale `parent`.
    #[inline]
    pub fn world_scale(&self, parent: Option<Vec3>) -> Vec3 {
        match parent {
            Some(parent) => parent * self.scale,
            None => self.scale,
        }
    }
}

/// A [`LayoutOwner`] over a borrowed transform plus a snapshot of what it needs from the tree.
#[derive(Debug)]
pub struct NodeView<'a> {
    pub transform: &'a mut Transform,
    pub parent_scale: Option<Vec3>,
    pub window: Vec2,
}

impl<'a> NodeView<'a> {
    pub fn new(transform: &'a mut Transform, parent_scale: Option<Vec3>, window: Vec2) -> Self {
        Self {
            transform,
            parent_scale,
            window,
        }
    }
}

impl LayoutOwner for NodeView<'_> {
    fn world_scale(&self) -> Vec3 {
        self.transform.world_scale(self.parent_scale)
    }

    fn parent_world_scale(&self) -> Option<Vec3> {
        self.parent_scale
    }

    fn window_size(&self) -> Vec2 {
        self.window
    }

    fn set_position_local(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    fn scale_local_only(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_resolves_against_window() {
        let mut transform = Transform::default();
        let view = NodeView::new(&mut transform, None, Vec2::new(800.0, 600.0));
        assert!(view.is_root());
        assert_eq!(view.container_bounds(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn child_resolves_against_parent_scale() {
        let mut transform = Transform {
            scale: Vec3::new(0.5, 0.25, 1.0),
            ..Default::default()
        };
        let view = NodeView::new(
            &mut transform,
            Some(Vec3::new(400.0, 200.0, 1.0)),
            Vec2::new(800.0, 600.0),
        );
        assert!(!view.is_root());
        assert_eq!(view.container_bounds(), Vec2::new(400.0, 200.0));
        assert_eq!(view.world_scale(), Vec3::new(200.0, 50.0, 1.0));
    }
}
