use crate::api::types::DisplayId;
use crate::components::display::{DisplayKind, DisplayObject};

/// Flat storage for ephemeral display objects (moving stars, labels,
/// particles, the rating badge). Handles are allocated here and never reused.
/// Designed for a handful of live objects, not thousands.
pub struct DisplayArena {
    objects: Vec<DisplayObject>,
    next_id: u32,
}

impl DisplayArena {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(32),
            next_id: 1,
        }
    }

    /// Allocate a handle and insert a fresh object of `kind`, letting the
    /// caller finish it with the builder methods.
    pub fn spawn_with(
        &mut self,
        kind: DisplayKind,
        build: impl FnOnce(DisplayObject) -> DisplayObject,
    ) -> DisplayId {
        let id = DisplayId(self.next_id);
        self.next_id += 1;
        self.objects.push(build(DisplayObject::new(id, kind)));
        id
    }

    /// Like `spawn_with`, but the new object draws just behind `behind`.
    /// Falls back to the top of the draw order if `behind` is gone.
    pub fn spawn_behind(
        &mut self,
        kind: DisplayKind,
        behind: DisplayId,
        build: impl FnOnce(DisplayObject) -> DisplayObject,
    ) -> DisplayId {
        let id = self.spawn_with(kind, build);
        if let Some(idx) = self.objects.iter().position(|o| o.id == behind) {
            if let Some(obj) = self.objects.pop() {
                self.objects.insert(idx, obj);
            }
        }
        id
    }

    /// Remove an object by ID. Returns the removed object if found.
    /// Draw order is insertion order, so removal keeps the remaining order.
    pub fn despawn(&mut self, id: DisplayId) -> Option<DisplayObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(idx))
    }

    pub fn get(&self, id: DisplayId) -> Option<&DisplayObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: DisplayId) -> Option<&mut DisplayObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: DisplayId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over all objects in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &DisplayObject> {
        self.objects.iter()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drop every object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl Default for DisplayArena {
    fn default() -> Self {
        Self::new()
    }
}
