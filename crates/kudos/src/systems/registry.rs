use glam::Vec2;
use crate::api::types::StarId;
use super::layout::LayoutPolicy;

/// One persistent star slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub id: StarId,
    /// Fill level, 0 (empty) to 1 (earned).
    pub fill: f32,
    /// Position relative to the star anchor.
    pub pos: Vec2,
}

/// Ordered, capacity-bounded collection of persistent stars.
/// Insertion order is display order.
#[derive(Debug, Clone)]
pub struct StarRegistry {
    stars: Vec<Star>,
    max_stars: usize,
    layout: LayoutPolicy,
    next_id: u32,
}

impl StarRegistry {
    pub fn new(max_stars: usize, layout: LayoutPolicy) -> Self {
        Self {
            stars: Vec::new(),
            max_stars,
            layout,
            next_id: 0,
        }
    }

    /// Rebuild from the authoritative count: every previous star is dropped and
    /// `clamp(source_count, 0, max_stars)` filled stars take their place.
    pub fn refresh(&mut self, source_count: i64) {
        self.clear();
        let count = usize::try_from(source_count).unwrap_or(0).min(self.max_stars);
        for _ in 0..count {
            self.push(1.0);
        }
        self.relayout();
    }

    /// Append an empty star. Returns `None` once the registry is full.
    pub fn add_filling_star(&mut self) -> Option<StarId> {
        self.add_star(0.0)
    }

    /// Append a fully earned star. Returns `None` once the registry is full.
    pub fn add_filled_star(&mut self) -> Option<StarId> {
        self.add_star(1.0)
    }

    fn add_star(&mut self, fill: f32) -> Option<StarId> {
        if self.is_full() {
            log::debug!("star registry full ({} stars), ignoring new star", self.max_stars);
            return None;
        }
        let id = self.push(fill);
        self.relayout();
        Some(id)
    }

    fn push(&mut self, fill: f32) -> StarId {
        let id = StarId(self.next_id);
        self.next_id += 1;
        self.stars.push(Star {
            id,
            fill: fill.clamp(0.0, 1.0),
            pos: Vec2::ZERO,
        });
        id
    }

    fn relayout(&mut self) {
        let count = self.stars.len();
        for (i, star) in self.stars.iter_mut().enumerate() {
            star.pos = self.layout.position(i, count);
        }
    }

    /// The most recently added star.
    pub fn last_star(&self) -> Option<&Star> {
        self.stars.last()
    }

    pub fn get(&self, id: StarId) -> Option<&Star> {
        self.stars.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: StarId) -> Option<&mut Star> {
        self.stars.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: StarId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Star> {
        self.stars.iter()
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stars.len() >= self.max_stars
    }

    pub fn max_stars(&self) -> usize {
        self.max_stars
    }

    pub fn layout(&self) -> LayoutPolicy {
        self.layout
    }

    /// Drop every star. Ids keep counting so stale handles never match.
    pub fn clear(&mut self) {
        self.stars.clear();
    }
}
