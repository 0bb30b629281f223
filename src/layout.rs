use std::panic::{self, AssertUnwindSafe};

use macroquad::prelude::{debug, error, Vec2, Vec3};

use crate::anchor::{Anchor, Positioning, Strategy};
use crate::dirty::{Dirty, DirtyType};
use crate::functions::LayoutFunctions;
use crate::geometry;
use crate::id::{ElementId, LayoutFunctionId};
use crate::math::{
    approx, non_zero, relative_scale, vec2_approx_to, BoundingBox, Edges, DEPTH_BIAS,
    FRACTION_OF_PIXEL,
};
use crate::owner::LayoutOwner;

/// Where a layout is in its update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LayoutState {
    /// Nothing changed since the last resolve.
    Clean,
    /// An input changed and the layout will resolve on the next update.
    PendingRecompute,
    /// Layout functions and the anchor are being applied right now.
    Applying,
}

/// Converts positioning rules into a position (and, for stretch anchors, a scale) for the element
/// that owns it.
///
/// Every setter compares the new value against the current one and does nothing when they match
/// within tolerance. Otherwise the value is stored and a [`DirtyType`] is raised; the layout then
/// resolves on the next [`Layout::clean_if_needed`].
#[derive(Debug)]
pub struct Layout {
    owner: Option<ElementId>,
    offset: Vec2,
    row_layout_offset: Vec2,
    inner_offset: Edges,
    local_inner_offset: Edges,
    stretch: Edges,
    z: f32,
    anchor: Anchor,
    border: Edges,
    padding: Edges,
    margin: Edges,
    inset: Edges,
    positioning: Positioning,
    functions: LayoutFunctions,
    running_functions: bool,
    applying: bool,
    dirty: Dirty,
    last_bounds: Option<Vec2>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(Anchor::default())
    }
}

impl Layout {
    /// Creates a layout anchored to `anchor`. New layouts start dirty so they resolve on the
    /// first update.
    pub fn new(anchor: Anchor) -> Self {
        Self {
            owner: None,
            offset: Vec2::ZERO,
            row_layout_offset: Vec2::ZERO,
            inner_offset: Edges::ZERO,
            local_inner_offset: Edges::ZERO,
            stretch: Edges::ZERO,
            z: 0.0,
            anchor,
            border: Edges::ZERO,
            padding: Edges::ZERO,
            margin: Edges::ZERO,
            inset: Edges::ZERO,
            positioning: Positioning::default(),
            functions: LayoutFunctions::new(),
            running_functions: false,
            applying: false,
            dirty: DirtyType::Generated.into(),
            last_bounds: None,
        }
    }

    /// The element this layout belongs to, if it lives in a manager pool.
    pub fn owner(&self) -> Option<ElementId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: ElementId) {
        self.owner = Some(owner);
    }

    // ========================================================================
    // Layout functions
    // ========================================================================

    pub fn add_function<F>(&mut self, function: F) -> LayoutFunctionId
    where
        F: FnMut(&mut Layout) + Send + 'static,
    {
        self.functions.add(function)
    }

    pub fn remove_function(&mut self, id: LayoutFunctionId) {
        self.functions.remove(id);
    }

    pub fn clear_functions(&mut self) {
        self.functions.clear();
    }

    pub fn functions(&self) -> &LayoutFunctions {
        &self.functions
    }

    /// Runs the registered layout functions. Calls made from inside a running function return
    /// immediately.
    ///
    /// If a function panics the registry is restored before the panic continues, so every
    /// registered function survives into the next update.
    fn prepare(&mut self) {
        if self.running_functions {
            return;
        }
        self.running_functions = true;
        let mut running = self.functions.detach();
        let mut failure = None;
        for (_, function) in running.iter_mut() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| function(self))) {
                failure = Some(payload);
                break;
            }
        }
        self.functions.reattach(running);
        self.running_functions = false;
        if let Some(payload) = failure {
            panic::resume_unwind(payload);
        }
    }

    // ========================================================================
    // Dirty tracking
    // ========================================================================

    pub fn state(&self) -> LayoutState {
        if self.applying {
            LayoutState::Applying
        } else if self.dirty.is_clean() {
            LayoutState::Clean
        } else {
            LayoutState::PendingRecompute
        }
    }

    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    /// Returns the raised flags and marks the layout clean without resolving it.
    pub fn take_dirty(&mut self) -> Dirty {
        self.dirty.take()
    }

    /// Flags the layout as stale. Collaborators use this when something the layout cannot see
    /// (e.g. text content) changed the element's size.
    pub fn mark_dirty(&mut self, kind: DirtyType) {
        self.dirty.raise(kind);
    }

    /// Resets the execution flags after an update was interrupted by a panic.
    pub(crate) fn recover(&mut self) {
        self.applying = false;
        self.running_functions = false;
        self.dirty.raise(DirtyType::Layout);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn positioning(&self) -> Positioning {
        self.positioning
    }

    pub fn border(&self) -> Edges {
        self.border
    }

    pub fn padding(&self) -> Edges {
        self.padding
    }

    pub fn margin(&self) -> Edges {
        self.margin
    }

    pub fn inset(&self) -> Edges {
        self.inset
    }

    pub fn stretch(&self) -> Edges {
        self.stretch
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn row_layout_offset(&self) -> Vec2 {
        self.row_layout_offset
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    /// The explicit offset plus the row-layout offset.
    pub fn calc_offset(&self) -> Vec2 {
        self.row_layout_offset + self.offset
    }

    pub fn local_inner_offset(&self) -> Edges {
        self.local_inner_offset
    }

    /// The combined inner offset: the locally driven part plus the externally driven part.
    pub fn inner_offset(&self) -> Edges {
        self.local_inner_offset + self.inner_offset
    }

    /// The owner's size in pixels.
    pub fn pixel_size(&self, owner: &impl LayoutOwner) -> Vec2 {
        owner.world_scale().truncate()
    }

    /// The owner's size minus padding, as `(width, height)`.
    pub fn content_size(&self, owner: &impl LayoutOwner) -> (f32, f32) {
        let size = self.pixel_size(&*owner);
        (
            size.x - self.padding.width(),
            size.y - self.padding.height(),
        )
    }

    // ========================================================================
    // Setters
    // ========================================================================

    pub fn set_offset(&mut self, x: f32, y: f32) {
        let offset = Vec2::new(x, y);
        if vec2_approx_to(self.offset, offset, FRACTION_OF_PIXEL) {
            return;
        }
        self.offset = offset;
        self.dirty.raise(DirtyType::Layout);
    }

    pub fn set_row_layout_offset(&mut self, offset: Vec2) {
        if vec2_approx_to(self.row_layout_offset, offset, FRACTION_OF_PIXEL) {
            return;
        }
        self.row_layout_offset = offset;
        self.dirty.raise(DirtyType::Layout);
    }

    pub fn set_inner_offset(&mut self, inner_offset: impl Into<Edges>) {
        let inner_offset = inner_offset.into();
        if self.inner_offset.approx_to(&inner_offset, FRACTION_OF_PIXEL) {
            return;
        }
        self.inner_offset = inner_offset;
        self.dirty.raise(DirtyType::Layout);
    }

    pub fn set_inner_offset_left(&mut self, offset: f32) {
        if approx(self.inner_offset.left, offset) {
            return;
        }
        self.inner_offset.left = offset;
        self.dirty.raise(DirtyType::Layout);
    }

    pub fn set_inner_offset_top(&mut self, offset: f32) {
        if approx(self.inner_offset.top, offset) {
            return;
        }
        self.inner_offset.top = offset;
        self.dirty.raise(DirtyType::Layout);
    }

    pub fn set_inner_offset_right(&mut self, offset: f32) {
        if approx(self.inner_offset.right, offset) {
            return;
        }
        self.inner_offset.right = offset;
        self.dirty.raise(DirtyType::Layout);
    }

    pub fn set_inner_offset_bottom(&mut self, offset: f32) {
        if approx(self.inner_offset.bottom, offset) {
            return;
        }
        self.inner_offset.bottom = offset;
        self.dirty.raise(DirtyType::Layout);
    }

    pub fn set_local_inner_offset(&mut self, offset: impl Into<Edges>) {
        let offset = offset.into();
        if self.local_inner_offset.approx_to(&offset, FRACTION_OF_PIXEL) {
            return;
        }
        self.local_inner_offset = offset;
        self.dirty.raise(DirtyType::Layout);
    }

    /// Sets the stretch insets, the distances kept from each container edge by stretch anchors.
    pub fn set_stretch(&mut self, stretch: impl Into<Edges>) {
        let stretch = stretch.into();
        let unchanged = approx(self.stretch.left, stretch.left)
            && approx(self.stretch.top, stretch.top)
            && approx(self.stretch.right, stretch.right)
            && approx(self.stretch.bottom, stretch.bottom);
        if unchanged {
            return;
        }
        self.stretch = stretch;
        self.dirty.raise(DirtyType::Resize);
    }

    /// Sets the stretch insets as fractions of the current container bounds.
    ///
    /// Always recomputes, since the container may have changed size even if the ratios did not.
    pub fn set_stretch_ratio(&mut self, owner: &impl LayoutOwner, ratio: impl Into<Edges>) {
        let ratio = ratio.into();
        let bounds = owner.container_bounds();
        self.stretch = Edges::new(
            bounds.x * ratio.left,
            bounds.y * ratio.top,
            bounds.x * ratio.right,
            bounds.y * ratio.bottom,
        );
        self.dirty.raise(DirtyType::Resize);
    }

    pub fn set_border(&mut self, border: impl Into<Edges>) {
        let border = border.into();
        if self.border.approx_to(&border, FRACTION_OF_PIXEL) {
            return;
        }
        self.border = border;
        self.dirty.raise(DirtyType::Resize);
    }

    /// Sets the padding and grows (or shrinks) the owner so its content size stays the same.
    pub fn set_padding(&mut self, owner: &mut impl LayoutOwner, padding: impl Into<Edges>) {
        let padding = padding.into();
        if self.padding.approx_to(&padding, FRACTION_OF_PIXEL) {
            return;
        }
        let last = self.padding;
        self.padding = padding;
        let size = self.pixel_size(&*owner);
        self.scale(owner, size.x - last.width(), size.y - last.height());
        self.dirty.raise(DirtyType::Resize);
    }

    pub fn set_margin(&mut self, margin: impl Into<Edges>) {
        let margin = margin.into();
        if self.margin.approx_to(&margin, FRACTION_OF_PIXEL) {
            return;
        }
        self.margin = margin;
        self.dirty.raise(DirtyType::Resize);
    }

    /// Sets the inset that stretch anchors shave off their size and correct their position by.
    pub fn set_inset(&mut self, inset: impl Into<Edges>) {
        let inset = inset.into();
        if self.inset.approx_to(&inset, FRACTION_OF_PIXEL) {
            return;
        }
        self.inset = inset;
        self.dirty.raise(DirtyType::Resize);
    }

    pub fn set_positioning(&mut self, positioning: Positioning) {
        if self.positioning == positioning {
            return;
        }
        self.positioning = positioning;
        self.dirty.raise(DirtyType::Layout);
    }

    pub fn set_z(&mut self, z: f32) {
        if self.z == z {
            return;
        }
        self.z = z;
        self.dirty.raise(DirtyType::Layout);
    }

    // ========================================================================
    // Scaling
    // ========================================================================

    /// Resizes the owner so its content is `width` x `height` pixels (padding is added on top).
    ///
    /// Returns false without touching the owner when either dimension is zero or the owner
    /// already has that size.
    pub fn scale(&mut self, owner: &mut impl LayoutOwner, width: f32, height: f32) -> bool {
        if approx(width, 0.0) || approx(height, 0.0) {
            return false;
        }
        let size = Vec2::new(
            width + self.padding.width(),
            height + self.padding.height(),
        );
        if vec2_approx_to(self.pixel_size(&*owner), size, FRACTION_OF_PIXEL) {
            return false;
        }
        self.apply_pixel_size(owner, size);
        true
    }

    /// Like [`Layout::scale`] but only changes the width.
    pub fn scale_width(&mut self, owner: &mut impl LayoutOwner, width: f32) -> bool {
        if approx(width, 0.0) {
            return false;
        }
        let current = self.pixel_size(&*owner);
        let width = width + self.padding.width();
        if approx_to_pixel(current.x, width) {
            return false;
        }
        self.apply_pixel_size(owner, Vec2::new(width, current.y));
        self.prepare();
        true
    }

    /// Like [`Layout::scale`] but only changes the height.
    pub fn scale_height(&mut self, owner: &mut impl LayoutOwner, height: f32) -> bool {
        if approx(height, 0.0) {
            return false;
        }
        let current = self.pixel_size(&*owner);
        let height = height + self.padding.height();
        if approx_to_pixel(current.y, height) {
            return false;
        }
        self.apply_pixel_size(owner, Vec2::new(current.x, height));
        self.prepare();
        true
    }

    fn apply_pixel_size(&mut self, owner: &mut impl LayoutOwner, size: Vec2) {
        let mut scale = size.extend(1.0);
        if let Some(parent) = owner.parent_world_scale() {
            scale = relative_scale(scale, parent);
        }
        owner.scale_local_only(scale);
        self.dirty.raise(DirtyType::Resize);
    }

    // ========================================================================
    // Anchoring
    // ========================================================================

    pub fn anchor_to(&mut self, anchor: Anchor) {
        if self.anchor == anchor {
            return;
        }
        self.anchor = anchor;
        self.dirty.raise(DirtyType::Generated);
    }

    /// Anchors to the anchor with numeric id `raw`. Unknown ids are reported and fall back to
    /// [`Anchor::TopLeft`].
    pub fn anchor_to_raw(&mut self, raw: i32) {
        match Anchor::try_from(raw) {
            Ok(anchor) => self.anchor_to(anchor),
            Err(invalid) => {
                error!("Invalid anchor position {}, falling back to top left", invalid);
                self.anchor = Anchor::TopLeft;
                self.dirty.raise(DirtyType::Generated);
            }
        }
    }

    /// Resolves the current anchor against the owner's container without writing anything.
    pub fn resolve(&self, owner: &impl LayoutOwner) -> BoundingBox {
        let bounds = owner.container_bounds();
        match self.anchor.align() {
            Some(align) => geometry::resolve_floating(
                align,
                self.calc_offset(),
                &self.inner_offset(),
                bounds.x,
                bounds.y,
                self.pixel_size(&*owner),
            ),
            None => geometry::resolve_stretch(self.anchor, &self.stretch, bounds.x, bounds.y),
        }
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Resolves the layout if an input changed or the container was resized since the last
    /// resolve. Returns true if anything was recomputed.
    pub fn clean_if_needed(&mut self, owner: &mut impl LayoutOwner) -> bool {
        let bounds = owner.container_bounds();
        if let Some(last) = self.last_bounds {
            if !vec2_approx_to(last, bounds, FRACTION_OF_PIXEL) {
                self.dirty.raise(DirtyType::Resize);
            }
        }
        if self.dirty.is_clean() {
            return false;
        }
        self.update(owner);
        true
    }

    /// Runs the layout functions and applies the anchor, whether or not the layout is dirty.
    pub fn update(&mut self, owner: &mut impl LayoutOwner) {
        self.applying = true;
        self.prepare();
        match self.anchor.strategy() {
            Strategy::Floating => self.apply_floating(owner),
            Strategy::Stretch => self.apply_stretch(owner),
        }
        self.last_bounds = Some(owner.container_bounds());
        self.dirty = Dirty::CLEAN;
        self.applying = false;
    }

    fn apply_floating(&self, owner: &mut impl LayoutOwner) {
        let resolved = self.resolve(&*owner);
        owner.set_position_local(Vec3::new(resolved.x, resolved.y, self.z + DEPTH_BIAS));
    }

    fn apply_stretch(&self, owner: &mut impl LayoutOwner) {
        let bounds = owner.container_bounds();
        let resolved = self.resolve(&*owner);
        let mut offset = self.calc_offset();
        if self.anchor.is_top() && !owner.is_root() {
            offset.y = -(offset.y - self.stretch.top);
        }
        let x = resolved.x + offset.x;
        let y = resolved.y + offset.y;

        let mut scale = Vec3::new(resolved.width, resolved.height, 1.0);
        if owner.parent_world_scale().is_some() {
            let w = non_zero(bounds.x);
            let h = non_zero(bounds.y);
            scale.x = scale.x / w - self.inset.width() / w;
            scale.y = scale.y / h - self.inset.height() / h;
        } else {
            scale.x -= self.inset.width();
            scale.y -= self.inset.height();
        }
        if scale.x < 0.0 || scale.y < 0.0 {
            debug!(
                "Stretch insets exceed container {:?} for {:?}, clamping size to zero",
                bounds, self.owner
            );
            scale.x = scale.x.max(0.0);
            scale.y = scale.y.max(0.0);
        }
        owner.scale_local_only(scale);
        owner.set_position_local(Vec3::new(
            x + (self.inset.left - self.inset.right),
            y + (self.inset.bottom - self.inset.top),
            self.z + DEPTH_BIAS,
        ));
    }
}

#[inline]
fn approx_to_pixel(a: f32, b: f32) -> bool {
    crate::math::approx_to(a, b, FRACTION_OF_PIXEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owner::{NodeView, Transform};

    const WINDOW: Vec2 = Vec2::new(800.0, 600.0);

    fn clean_layout(anchor: Anchor) -> Layout {
        let mut layout = Layout::new(anchor);
        layout.dirty = Dirty::CLEAN;
        layout
    }

    #[test]
    fn new_layouts_start_dirty() {
        let layout = Layout::default();
        assert_eq!(layout.anchor(), Anchor::TopLeft);
        assert_eq!(layout.state(), LayoutState::PendingRecompute);
        assert!(layout.dirty().contains(DirtyType::Generated));
    }

    #[test]
    fn setters_are_idempotent() {
        let mut layout = clean_layout(Anchor::TopLeft);
        layout.set_offset(4.0, 2.0);
        assert!(layout.dirty().contains(DirtyType::Layout));
        layout.dirty = Dirty::CLEAN;
        layout.set_offset(4.0, 2.0);
        assert!(layout.dirty().is_clean());

        layout.set_stretch(Edges::all(3.0));
        assert!(layout.dirty().contains(DirtyType::Resize));
        layout.dirty = Dirty::CLEAN;
        layout.set_stretch(Edges::all(3.0));
        layout.set_margin(Edges::ZERO);
        layout.set_border(Edges::ZERO);
        layout.set_inset(Edges::ZERO);
        layout.set_positioning(Positioning::Static);
        layout.set_z(0.0);
        layout.anchor_to(Anchor::TopLeft);
        assert!(layout.dirty().is_clean());
    }

    #[test]
    fn offset_setters_raise_once_for_repeated_values() {
        let mut layout = clean_layout(Anchor::TopLeft);
        let setters: [fn(&mut Layout); 7] = [
            |l| l.set_row_layout_offset(Vec2::new(3.0, 1.0)),
            |l| l.set_inner_offset(Edges::new(1.0, 2.0, 3.0, 4.0)),
            |l| l.set_inner_offset_left(6.0),
            |l| l.set_inner_offset_top(7.0),
            |l| l.set_inner_offset_right(8.0),
            |l| l.set_inner_offset_bottom(9.0),
            |l| l.set_local_inner_offset(Edges::all(2.5)),
        ];
        for setter in setters {
            setter(&mut layout);
            assert_eq!(layout.take_dirty(), Dirty::from(DirtyType::Layout));
            setter(&mut layout);
            assert!(layout.dirty().is_clean());
        }
        assert_eq!(layout.inner_offset(), Edges::new(8.5, 9.5, 10.5, 11.5));
    }

    #[test]
    fn repeated_padding_rescales_once() {
        let mut transform = Transform {
            scale: Vec3::new(100.0, 50.0, 1.0),
            ..Default::default()
        };
        let mut view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = clean_layout(Anchor::TopLeft);
        layout.set_padding(&mut view, Edges::all(5.0));
        assert!(layout.take_dirty().contains(DirtyType::Resize));
        assert_eq!(layout.pixel_size(&view), Vec2::new(110.0, 60.0));

        layout.set_padding(&mut view, Edges::all(5.0));
        assert!(layout.dirty().is_clean());
        assert_eq!(layout.pixel_size(&view), Vec2::new(110.0, 60.0));
    }

    #[test]
    fn take_dirty_clears_without_resolving() {
        let mut transform = Transform::default();
        let mut layout = Layout::new(Anchor::Center);
        layout.set_offset(10.0, 0.0);
        let taken = layout.take_dirty();
        assert!(taken.contains(DirtyType::Generated));
        assert!(taken.contains(DirtyType::Layout));
        assert_eq!(layout.state(), LayoutState::Clean);
        assert!(!layout.clean_if_needed(&mut NodeView::new(&mut transform, None, WINDOW)));
        assert_eq!(transform.position, Vec3::ZERO);
    }

    #[test]
    fn offset_within_tolerance_is_absorbed() {
        let mut layout = clean_layout(Anchor::TopLeft);
        layout.set_offset(FRACTION_OF_PIXEL * 0.5, 0.0);
        assert!(layout.dirty().is_clean());
        assert_eq!(layout.offset(), Vec2::ZERO);
        layout.set_offset(1.0, 0.0);
        assert!(!layout.dirty().is_clean());
    }

    #[test]
    fn inner_offset_sums_both_parts() {
        let mut layout = clean_layout(Anchor::TopLeft);
        layout.set_inner_offset(Edges::new(1.0, 2.0, 3.0, 4.0));
        layout.set_local_inner_offset(Edges::all(10.0));
        layout.set_inner_offset_left(5.0);
        assert_eq!(layout.inner_offset(), Edges::new(15.0, 12.0, 13.0, 14.0));
    }

    #[test]
    fn stretch_ratio_always_raises_resize() {
        let mut transform = Transform::default();
        let view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = clean_layout(Anchor::StretchCenter);
        layout.set_stretch_ratio(&view, Edges::new(0.1, 0.1, 0.0, 0.0));
        assert_eq!(layout.stretch(), Edges::new(80.0, 60.0, 0.0, 0.0));
        layout.dirty = Dirty::CLEAN;
        layout.set_stretch_ratio(&view, Edges::new(0.1, 0.1, 0.0, 0.0));
        assert!(layout.dirty().contains(DirtyType::Resize));
    }

    #[test]
    fn anchor_to_raises_generated() {
        let mut layout = clean_layout(Anchor::TopLeft);
        layout.anchor_to(Anchor::StretchTop);
        assert!(layout.dirty().contains(DirtyType::Generated));
        assert_eq!(layout.anchor().strategy(), Strategy::Stretch);
    }

    #[test]
    fn invalid_raw_anchor_falls_back_to_top_left() {
        let mut layout = clean_layout(Anchor::Center);
        layout.anchor_to_raw(42);
        assert_eq!(layout.anchor(), Anchor::TopLeft);
        assert!(layout.dirty().contains(DirtyType::Generated));

        layout.anchor_to_raw(Anchor::BottomRight.raw());
        assert_eq!(layout.anchor(), Anchor::BottomRight);
    }

    #[test]
    fn floating_top_left_writes_position_only() {
        let mut transform = Transform {
            scale: Vec3::new(100.0, 50.0, 1.0),
            ..Default::default()
        };
        let before = transform.scale;
        let mut view = NodeView::new(&mut transform, None, Vec2::new(400.0, 300.0));
        let mut layout = Layout::new(Anchor::TopLeft);
        assert!(layout.clean_if_needed(&mut view));
        assert_eq!(transform.position, Vec3::new(-150.0, 125.0, DEPTH_BIAS));
        assert_eq!(transform.scale, before);
        assert_eq!(layout.state(), LayoutState::Clean);
    }

    #[test]
    fn clean_layout_skips_update() {
        let mut transform = Transform::default();
        let mut view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = Layout::new(Anchor::Center);
        assert!(layout.clean_if_needed(&mut view));
        assert!(!layout.clean_if_needed(&mut view));
    }

    #[test]
    fn container_resize_invalidates() {
        let mut transform = Transform::default();
        let mut layout = Layout::new(Anchor::TopRight);
        layout.clean_if_needed(&mut NodeView::new(&mut transform, None, WINDOW));
        let resized = Vec2::new(1024.0, 768.0);
        assert!(layout.clean_if_needed(&mut NodeView::new(&mut transform, None, resized)));
        assert_eq!(transform.position.x, 512.0 - 0.5);
    }

    #[test]
    fn stretch_center_child_scales_relative_to_parent() {
        let parent = Vec3::new(400.0, 300.0, 1.0);
        let mut transform = Transform::default();
        let mut view = NodeView::new(&mut transform, Some(parent), WINDOW);
        let mut layout = Layout::new(Anchor::StretchCenter);
        layout.set_stretch(Edges::new(10.0, 5.0, 10.0, 5.0));
        layout.update(&mut view);
        assert_eq!(transform.position, Vec3::new(0.0, 0.0, DEPTH_BIAS));
        assert_eq!(transform.scale, Vec3::new(380.0 / 400.0, 290.0 / 300.0, 1.0));
    }

    #[test]
    fn stretch_root_uses_absolute_pixels() {
        let mut transform = Transform::default();
        let mut view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = Layout::new(Anchor::StretchCenter);
        layout.set_stretch(Edges::all(20.0));
        layout.set_inset(Edges::new(5.0, 0.0, 5.0, 0.0));
        layout.update(&mut view);
        assert_eq!(transform.scale, Vec3::new(750.0, 560.0, 1.0));
    }

    #[test]
    fn stretch_inside_zero_sized_parent_stays_finite() {
        let mut transform = Transform::default();
        let mut view = NodeView::new(&mut transform, Some(Vec3::new(0.0, 0.0, 1.0)), WINDOW);
        let mut layout = Layout::new(Anchor::StretchCenter);
        layout.update(&mut view);
        assert!(transform.scale.is_finite());
    }

    #[test]
    fn oversized_stretch_is_clamped() {
        let mut transform = Transform::default();
        let mut view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = Layout::new(Anchor::StretchCenter);
        layout.set_stretch(Edges::all(1000.0));
        layout.update(&mut view);
        assert_eq!(transform.scale.x, 0.0);
        assert_eq!(transform.scale.y, 0.0);
    }

    #[test]
    fn scale_rejects_zero_dimensions() {
        let mut transform = Transform::default();
        let mut view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = clean_layout(Anchor::TopLeft);
        assert!(!layout.scale(&mut view, 0.0, 40.0));
        assert!(!layout.scale_width(&mut view, 0.0));
        assert!(!layout.scale_height(&mut view, 0.0));
        assert_eq!(transform.scale, Vec3::ONE);
        assert!(layout.dirty().is_clean());
    }

    #[test]
    fn scale_divides_by_parent_world_scale() {
        let parent = Vec3::new(200.0, 100.0, 1.0);
        let mut transform = Transform::default();
        let mut view = NodeView::new(&mut transform, Some(parent), WINDOW);
        let mut layout = clean_layout(Anchor::TopLeft);
        assert!(layout.scale(&mut view, 50.0, 25.0));
        assert!(!layout.scale(&mut view, 50.0, 25.0));
        assert_eq!(view.world_scale().truncate(), Vec2::new(50.0, 25.0));
        assert_eq!(transform.scale, Vec3::new(0.25, 0.25, 1.0));
        assert!(layout.dirty().contains(DirtyType::Resize));
    }

    #[test]
    fn padding_keeps_content_size() {
        let mut transform = Transform {
            scale: Vec3::new(100.0, 40.0, 1.0),
            ..Default::default()
        };
        let mut view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = clean_layout(Anchor::TopLeft);
        layout.set_padding(&mut view, Edges::all(5.0));
        assert_eq!(layout.pixel_size(&view), Vec2::new(110.0, 50.0));
        assert_eq!(layout.content_size(&view), (100.0, 40.0));
    }

    #[test]
    fn scale_width_keeps_height() {
        let mut transform = Transform {
            scale: Vec3::new(100.0, 40.0, 1.0),
            ..Default::default()
        };
        let mut view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = clean_layout(Anchor::TopLeft);
        assert!(layout.scale_width(&mut view, 60.0));
        assert!(layout.scale_height(&mut view, 30.0));
        assert_eq!(transform.scale, Vec3::new(60.0, 30.0, 1.0));
    }

    #[test]
    fn functions_run_before_resolve() {
        let mut transform = Transform::default();
        let mut view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = Layout::new(Anchor::Center);
        layout.add_function(|layout| layout.set_row_layout_offset(Vec2::new(30.0, -10.0)));
        layout.update(&mut view);
        assert_eq!(transform.position.truncate(), Vec2::new(30.0, -10.0));
        assert_eq!(layout.functions().len(), 1);
    }

    #[test]
    fn functions_do_not_recurse() {
        let mut transform = Transform::default();
        let mut view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = Layout::new(Anchor::Center);
        layout.add_function(|layout| {
            let x = layout.offset().x + 1.0;
            layout.set_offset(x, 0.0);
            layout.prepare();
        });
        layout.update(&mut view);
        assert_eq!(layout.offset(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn function_can_remove_itself() {
        let mut transform = Transform::default();
        let mut view = NodeView::new(&mut transform, None, WINDOW);
        let mut layout = Layout::new(Anchor::Center);
        let id = std::sync::Arc::new(std::sync::Mutex::new(None));
        let captured = std::sync::Arc::clone(&id);
        let registered = layout.add_function(move |layout| {
            if let Some(id) = *captured.lock().unwrap() {
                layout.remove_function(id);
            }
        });
        *id.lock().unwrap() = Some(registered);
        layout.update(&mut view);
        assert!(layout.functions().is_empty());
    }
}
