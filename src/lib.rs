//! Anchor and stretch layout resolution for Ply UI trees.
//!
//! Every UI element owns a [`Layout`](layout::Layout) that turns anchor, stretch, padding and
//! offset rules into a parent-relative position and scale. Layouts only recompute when one of
//! their inputs changed. A [`Manager`](manager::Manager) owns the elements and lays all of them
//! out once per frame on a worker pool, resolving roots first so children always see their
//! root's final size.
//!
//! ```no_run
//! use ply_anchors::prelude::*;
//!
//! let mut ui = Manager::new(ManagerConfig::new().window_size(1280.0, 720.0)).unwrap();
//! let panel = ui.add();
//! ui.get_mut(panel).unwrap().layout_mut().anchor_to(Anchor::StretchLeft);
//! ui.get_mut(panel).unwrap().layout_mut().set_stretch(Edges::new(0.0, 0.0, 240.0, 0.0));
//!
//! let label = ui.add_child(panel).unwrap();
//! ui.element_mut(label).unwrap().scale(120.0, 24.0);
//!
//! ui.update(1.0 / 60.0);
//! ```

pub mod anchor;
pub mod dirty;
pub mod element;
pub mod errors;
pub mod functions;
pub mod geometry;
pub mod id;
pub mod layout;
pub mod manager;
pub mod math;
pub mod owner;
pub mod prelude;

pub use errors::Error;
pub use layout::Layout;
pub use manager::Manager;
