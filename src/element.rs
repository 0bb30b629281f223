use macroquad::prelude::{Vec2, Vec3};

use crate::anchor::Anchor;
use crate::id::ElementId;
use crate::layout::Layout;
use crate::math::Edges;
use crate::owner::{LayoutOwner, NodeView, Transform};

/// A UI element in a [`Manager`](crate::manager::Manager) pool.
///
/// The element owns its [`Layout`] and [`Transform`]; the layout only keeps the element's id.
#[derive(Debug)]
pub struct UiElement {
    id: ElementId,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    transform: Transform,
    layout: Layout,
    elapsed: f32,
}

impl UiElement {
    pub(crate) fn new(id: ElementId) -> Self {
        let mut layout = Layout::new(Anchor::TopLeft);
        layout.set_owner(id);
        Self {
            id,
            parent: None,
            children: Vec::new(),
            transform: Transform::default(),
            layout,
            elapsed: 0.0,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Mutable access to the layout. Setters that need the element's size (scaling, padding,
    /// stretch ratios) go through [`Manager::element_mut`](crate::manager::Manager::element_mut).
    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Total time this element has been updated by its manager.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Borrows the layout together with an owner view of this element.
    pub fn split(&mut self, parent_scale: Option<Vec3>, window: Vec2) -> (&mut Layout, NodeView<'_>) {
        (
            &mut self.layout,
            NodeView::new(&mut self.transform, parent_scale, window),
        )
    }

    /// Resolves the layout if it is dirty. Used on roots before the rest of the tree updates.
    pub(crate) fn clean_if_needed(&mut self, parent_scale: Option<Vec3>, window: Vec2) -> bool {
        let (layout, mut view) = self.split(parent_scale, window);
        layout.clean_if_needed(&mut view)
    }

    pub(crate) fn update_from_manager(
        &mut self,
        delta_time: f32,
        parent_scale: Option<Vec3>,
        window: Vec2,
    ) -> bool {
        self.elapsed += delta_time;
        self.clean_if_needed(parent_scale, window)
    }

    pub(crate) fn recover(&mut self) {
        self.layout.recover();
    }
}

/// Mutable access to an element's layout plus an owner view for operations that need its size.
///
/// ```ignore
/// let mut element = manager.element_mut(id).unwrap();
/// element.layout.scale(&mut element.node, 120.0, 32.0);
/// ```
#[derive(Debug)]
pub struct ElementMut<'a> {
    pub layout: &'a mut Layout,
    pub node: NodeView<'a>,
}

impl ElementMut<'_> {
    /// See [`Layout::scale`].
    pub fn scale(&mut self, width: f32, height: f32) -> bool {
        self.layout.scale(&mut self.node, width, height)
    }

    pub fn scale_width(&mut self, width: f32) -> bool {
        self.layout.scale_width(&mut self.node, width)
    }

    pub fn scale_height(&mut self, height: f32) -> bool {
        self.layout.scale_height(&mut self.node, height)
    }

    pub fn set_padding(&mut self, padding: impl Into<Edges>) {
        self.layout.set_padding(&mut self.node, padding);
    }

    pub fn set_stretch_ratio(&mut self, ratio: impl Into<Edges>) {
        self.layout.set_stretch_ratio(&self.node, ratio);
    }

    pub fn pixel_size(&self) -> Vec2 {
        self.layout.pixel_size(&self.node)
    }

    pub fn content_size(&self) -> (f32, f32) {
        self.layout.content_size(&self.node)
    }

    /// The bounds the element is currently laid out in.
    pub fn container_bounds(&self) -> Vec2 {
        self.node.container_bounds()
    }
}
