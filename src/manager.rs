//! The per-frame layout pass over every live UI element.
//!
//! An update runs in two phases. Phase 1 resolves every root so root sizes are final. Phase 2
//! then resolves every element (children first, roots again at the end) against a snapshot of
//! world scales taken after phase 1. Both phases fan out over a rayon pool in bounded batches and
//! join before moving on.
//!
//! Phase 2 does not order parents before children below the roots. An element nested two or more
//! levels under a stretched root sees its parent's size from before the parent resolved, so deep
//! stretch changes settle one frame later per level.
//!
//! A root whose update panics in phase 1 sits out phase 2 of the same frame and is retried on the
//! next update.

use std::panic::{self, AssertUnwindSafe};

use macroquad::prelude::{error, warn, Vec2, Vec3};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::dirty::DirtyType;
use crate::element::{ElementMut, UiElement};
use crate::errors::{Error, ErrorType};
use crate::id::ElementId;

/// How many element updates are in flight at once, per phase.
pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Maximum number of elements dispatched together before waiting for the batch to finish.
    pub batch_size: usize,
    /// Worker threads. `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Initial window size, roots are laid out in it.
    pub window_size: Vec2,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            threads: None,
            window_size: Vec2::new(800.0, 600.0),
        }
    }
}

impl ManagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[inline]
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    #[inline]
    pub fn window_size(mut self, width: f32, height: f32) -> Self {
        self.window_size = Vec2::new(width, height);
        self
    }
}

/// What happened during one [`Manager::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Roots resolved in phase 1.
    pub roots: usize,
    /// Elements visited in phase 2.
    pub elements: usize,
    /// Layouts that were dirty and got resolved, across both phases.
    pub recomputed: usize,
    /// Element updates that panicked and were skipped.
    pub failed: usize,
}

#[derive(Debug)]
enum Outcome {
    Clean,
    Recomputed,
    Failed(ElementId, Error),
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    element: Option<UiElement>,
}

/// Owns every live UI element and lays them out once per frame.
#[derive(Debug)]
pub struct Manager {
    config: ManagerConfig,
    pool: rayon::ThreadPool,
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
    window: Vec2,
    failures: Vec<Error>,
}

impl Manager {
    pub fn new(config: ManagerConfig) -> Result<Self, Error> {
        if config.batch_size == 0 {
            return Err(Error::new(
                ErrorType::InvalidBatchSize,
                "batch size must be at least 1",
            ));
        }
        let pool = build_thread_pool(config.threads)?;
        Ok(Self {
            window: config.window_size,
            config,
            pool,
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            failures: Vec::new(),
        })
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn window_size(&self) -> Vec2 {
        self.window
    }

    /// Updates the window size roots are laid out in. Roots notice the change on the next update.
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        self.window = Vec2::new(width, height);
    }

    // ========================================================================
    // Pool
    // ========================================================================

    /// Adds a new root element anchored top-left.
    pub fn add(&mut self) -> ElementId {
        let id = match self.free.pop() {
            Some(index) => ElementId::new(index, self.slots[index as usize].generation),
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    element: None,
                });
                ElementId::new(index, 0)
            }
        };
        self.slots[id.index()].element = Some(UiElement::new(id));
        self.len += 1;
        id
    }

    /// Adds a new element under `parent`. Returns `None` if `parent` is not alive.
    pub fn add_child(&mut self, parent: ElementId) -> Option<ElementId> {
        if !self.contains(parent) {
            warn!("Cannot add a child to unknown element {}", parent);
            return None;
        }
        let child = self.add();
        self.attach(child, parent);
        Some(child)
    }

    /// Removes `id` and everything below it. Returns false if `id` is not alive.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let Some(parent) = self.get(id).map(|element| element.parent) else {
            warn!("Tried to remove unknown element {}", id);
            return false;
        };
        if let Some(parent) = parent.and_then(|parent| self.get_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index()];
            if let Some(element) = slot.element.take() {
                stack.extend(element.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                self.len -= 1;
            }
        }
        true
    }

    /// Removes every element. Outstanding ids stop resolving.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.element.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    /// Reserves room for `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.slots
            .reserve(additional.saturating_sub(self.free.len()));
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&UiElement> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.element.as_ref()
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut UiElement> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.element.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UiElement> {
        self.slots.iter().filter_map(|slot| slot.element.as_ref())
    }

    pub fn roots(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.iter()
            .filter(|element| element.is_root())
            .map(|element| element.id())
    }

    /// The layout of `id` together with an owner view, for operations that need the element's
    /// current size.
    pub fn element_mut(&mut self, id: ElementId) -> Option<ElementMut<'_>> {
        let parent_scale = self
            .get(id)?
            .parent
            .and_then(|parent| self.world_scale(parent));
        let window = self.window;
        let (layout, node) = self.get_mut(id)?.split(parent_scale, window);
        Some(ElementMut { layout, node })
    }

    /// The pixel size of `id`: its local scale times every ancestor's.
    pub fn world_scale(&self, id: ElementId) -> Option<Vec3> {
        let element = self.get(id)?;
        let parent = element.parent.and_then(|parent| self.world_scale(parent));
        Some(element.transform().world_scale(parent))
    }

    // ========================================================================
    // Tree
    // ========================================================================

    /// Moves `child` under `parent`. Fails if either is not alive or the move would create a
    /// cycle.
    pub fn attach(&mut self, child: ElementId, parent: ElementId) -> bool {
        if child == parent || !self.contains(child) || !self.contains(parent) {
            return false;
        }
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                warn!("Refusing to attach {} under its own descendant {}", child, parent);
                return false;
            }
            ancestor = self.get(current).and_then(|element| element.parent);
        }
        self.detach(child);
        if let Some(element) = self.get_mut(parent) {
            element.children.push(child);
        }
        if let Some(element) = self.get_mut(child) {
            element.parent = Some(parent);
            element.layout_mut().mark_dirty(DirtyType::Resize);
        }
        true
    }

    /// Makes `child` a root. Returns false if it is not alive or already a root.
    pub fn detach(&mut self, child: ElementId) -> bool {
        let Some(parent) = self.get(child).and_then(|element| element.parent) else {
            return false;
        };
        if let Some(element) = self.get_mut(parent) {
            element.children.retain(|id| *id != child);
        }
        if let Some(element) = self.get_mut(child) {
            element.parent = None;
            element.layout_mut().mark_dirty(DirtyType::Resize);
        }
        true
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Failures from the most recent [`Manager::update`].
    pub fn last_failures(&self) -> &[Error] {
        &self.failures
    }

    /// Lays out every element. Call once per frame.
    pub fn update(&mut self, delta_time: f32) -> FrameStats {
        let window = self.window;
        let batch_size = self.config.batch_size;
        let capacity = self.slots.len();
        let mut stats = FrameStats::default();

        let (mut roots, children): (Vec<&mut UiElement>, Vec<&mut UiElement>) = self
            .slots
            .iter_mut()
            .filter_map(|slot| slot.element.as_mut())
            .partition(|element| element.is_root());
        stats.roots = roots.len();

        let mut outcomes = run_batched(&self.pool, &mut roots, batch_size, |element| {
            element.clean_if_needed(None, window)
        });
        let failed_roots: FxHashSet<ElementId> = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                Outcome::Failed(id, _) => Some(*id),
                _ => None,
            })
            .collect();
        if !failed_roots.is_empty() {
            roots.retain(|element| !failed_roots.contains(&element.id()));
        }

        // Root scales are final from here on.
        let world = world_scales(roots.iter().chain(children.iter()).map(|e| &**e), capacity);

        let mut all = children;
        all.append(&mut roots);
        stats.elements = all.len();
        outcomes.extend(run_batched(&self.pool, &mut all, batch_size, |element| {
            let parent_scale = element
                .parent()
                .and_then(|parent| world.get(parent.index()).copied().flatten());
            element.update_from_manager(delta_time, parent_scale, window)
        }));

        self.failures.clear();
        for outcome in outcomes {
            match outcome {
                Outcome::Clean => {}
                Outcome::Recomputed => stats.recomputed += 1,
                Outcome::Failed(_, failure) => {
                    stats.failed += 1;
                    self.failures.push(failure);
                }
            }
        }
        stats
    }
}

fn build_thread_pool(threads: Option<usize>) -> Result<rayon::ThreadPool, Error> {
    if let Some(0) = threads {
        return Err(Error::new(
            ErrorType::ThreadPoolUnavailable,
            "worker thread count must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("ply-layout-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        Error::new(
            ErrorType::ThreadPoolUnavailable,
            format!("failed to build rayon thread pool: {e}"),
        )
    })
}

/// Runs `task` on every element, at most `batch_size` at a time, and waits for all of them.
fn run_batched<F>(
    pool: &rayon::ThreadPool,
    elements: &mut [&mut UiElement],
    batch_size: usize,
    task: F,
) -> Vec<Outcome>
where
    F: Fn(&mut UiElement) -> bool + Sync,
{
    let mut outcomes = Vec::with_capacity(elements.len());
    pool.install(|| {
        for batch in elements.chunks_mut(batch_size) {
            let results: Vec<Outcome> = batch
                .par_iter_mut()
                .map(|element| run_isolated(element, &task))
                .collect();
            outcomes.extend(results);
        }
    });
    outcomes
}

fn run_isolated<F>(element: &mut UiElement, task: &F) -> Outcome
where
    F: Fn(&mut UiElement) -> bool,
{
    let id = element.id();
    match panic::catch_unwind(AssertUnwindSafe(|| task(element))) {
        Ok(true) => Outcome::Recomputed,
        Ok(false) => Outcome::Clean,
        Err(payload) => {
            element.recover();
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("Layout update for element {} failed: {}", id, reason);
            Outcome::Failed(
                id,
                Error::new(
                    ErrorType::ElementUpdateFailed,
                    format!("element {id}: {reason}"),
                ),
            )
        }
    }
}

/// World scale of every element, indexed by pool slot.
fn world_scales<'a>(
    elements: impl Iterator<Item = &'a UiElement>,
    capacity: usize,
) -> Vec<Option<Vec3>> {
    let mut nodes: Vec<Option<(Option<usize>, Vec3)>> = vec![None; capacity];
    for element in elements {
        nodes[element.id().index()] = Some((
            element.parent().map(|parent| parent.index()),
            element.transform().scale,
        ));
    }
    let mut world = vec![None; capacity];
    for index in 0..capacity {
        resolve_world_scale(index, &nodes, &mut world);
    }
    world
}

fn resolve_world_scale(
    index: usize,
    nodes: &[Option<(Option<usize>, Vec3)>],
    world: &mut [Option<Vec3>],
) -> Option<Vec3> {
    if let Some(scale) = world[index] {
        return Some(scale);
    }
    let (parent, scale) = nodes[index]?;
    let parent_scale = parent.and_then(|parent| resolve_world_scale(parent, nodes, world));
    let resolved = match parent_scale {
        Some(parent_scale) => parent_scale * scale,
        None => scale,
    };
    world[index] = Some(resolved);
    Some(resolved)
}
