use std::fmt;

use rustc_hash::FxHashSet;

use crate::id::LayoutFunctionId;
use crate::layout::Layout;

/// A callback that runs right before a layout resolves its anchor. It usually adjusts the offset
/// or row-layout offset (e.g. to flow elements in a row).
pub type LayoutFunction = Box<dyn FnMut(&mut Layout) + Send>;

/// Ordered, id-addressable collection of [`LayoutFunction`]s.
///
/// Functions run in insertion order. While the owning layout executes them they are detached from
/// the registry, so a function can add, remove or clear entries on its own layout; those edits are
/// merged back when the run finishes.
#[derive(Default)]
pub struct LayoutFunctions {
    next_id: u64,
    entries: Vec<(LayoutFunctionId, LayoutFunction)>,
    detached: Option<Detached>,
}

#[derive(Default)]
struct Detached {
    len: usize,
    removed: FxHashSet<LayoutFunctionId>,
    cleared: bool,
}

pub(crate) type Entries = Vec<(LayoutFunctionId, LayoutFunction)>;

impl LayoutFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function` and returns the id used to remove it later.
    pub fn add<F>(&mut self, function: F) -> LayoutFunctionId
    where
        F: FnMut(&mut Layout) + Send + 'static,
    {
        let id = LayoutFunctionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(function)));
        id
    }

    /// Removes the function registered as `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: LayoutFunctionId) {
        if let Some(index) = self.entries.iter().position(|(entry, _)| *entry == id) {
            self.entries.remove(index);
        } else if let Some(detached) = &mut self.detached {
            detached.removed.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        if let Some(detached) = &mut self.detached {
            detached.cleared = true;
        }
    }

    pub fn len(&self) -> usize {
        let running = self
            .detached
            .as_ref()
            .map(|d| if d.cleared { 0 } else { d.len.saturating_sub(d.removed.len()) })
            .unwrap_or(0);
        self.entries.len() + running
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes the registered functions out for execution.
    pub(crate) fn detach(&mut self) -> Entries {
        let entries = std::mem::take(&mut self.entries);
        self.detached = Some(Detached {
            len: entries.len(),
            ..Default::default()
        });
        entries
    }

    /// Puts detached functions back in front of anything added while they were running, dropping
    /// entries that were removed or cleared in the meantime.
    pub(crate) fn reattach(&mut self, mut entries: Entries) {
        let detached = self.detached.take().unwrap_or_default();
        if detached.cleared {
            entries.clear();
        } else if !detached.removed.is_empty() {
            entries.retain(|(id, _)| !detached.removed.contains(id));
        }
        entries.append(&mut self.entries);
        self.entries = entries;
    }

    pub(crate) fn is_detached(&self) -> bool {
        self.detached.is_some()
    }
}

impl fmt::Debug for LayoutFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutFunctions")
            .field("ids", &self.entries.iter().map(|(id, _)| *id).collect::<Vec<_>>())
            .field("detached", &self.is_detached())
            .finish()
    }
}
