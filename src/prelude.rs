//! The Ply anchors prelude: a single import for everything you need.
//!
//! ```rust
//! use ply_anchors::prelude::*;
//! ```

// Core types
pub use crate::element::{ElementMut, UiElement};
pub use crate::errors::{Error, ErrorType};
pub use crate::id::{ElementId, LayoutFunctionId};
pub use crate::layout::{Layout, LayoutState};
pub use crate::manager::{FrameStats, Manager, ManagerConfig};
pub use crate::math::{BoundingBox, Edges};
pub use crate::owner::{LayoutOwner, NodeView, Transform};

// Anchors: type only, not globbed
pub use crate::anchor::{Anchor, Positioning, Strategy};

// Alignment: globbed
pub use crate::anchor::AlignX::{self, *};
pub use crate::anchor::AlignY::{self, *};

pub use crate::dirty::{Dirty, DirtyType};

// Math types used throughout the API
pub use macroquad::prelude::{Vec2, Vec3};
