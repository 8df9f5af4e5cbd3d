use kudos::{
    Canvas, DisplayBuffer, FeedbackConfig, FeedbackCoordinator,
    FeedbackEvent, SharedAwardCount,
};
use glam::vec2;

/// Owns the coordinator plus the flat buffers the host reads after each tick.
///
/// The crate root keeps one of these in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export a
/// struct holding a `Box<dyn AwardSource>`.
pub struct FeedbackRunner {
    coordinator: FeedbackCoordinator,
    award_count: SharedAwardCount,
    display_buffer: DisplayBuffer,
    /// Flat buffer of audio cue IDs for host reads.
    sound_buffer: Vec<u32>,
}

impl FeedbackRunner {
    pub fn new(config: FeedbackConfig) -> Self {
        let award_count = SharedAwardCount::default();
        let coordinator = FeedbackCoordinator::new(config, Box::new(award_count.clone()));
        Self {
            coordinator,
            award_count,
            display_buffer: DisplayBuffer::new(),
            sound_buffer: Vec::with_capacity(8),
        }
    }

    /// Parse `json` into a config. Invalid JSON falls back to the defaults
    /// and hands the parse error back for the host log.
    pub fn from_json(json: &str) -> (Self, Option<serde_json::Error>) {
        match FeedbackConfig::from_json(json) {
            Ok(config) => (Self::new(config), None),
            Err(err) => (Self::new(FeedbackConfig::default()), Some(err)),
        }
    }

    pub fn coordinator(&self) -> &FeedbackCoordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut FeedbackCoordinator {
        &mut self.coordinator
    }

    pub fn set_award_count(&mut self, count: i64) {
        self.award_count.set(count);
    }

    /// `width`/`height` are the canvas size; `(anchor_x, anchor_y)` is the
    /// star container in canvas-local coordinates.
    pub fn attach_canvas(&mut self, width: f32, height: f32, anchor_x: f32, anchor_y: f32) {
        let canvas = Canvas::new(vec2(width, height)).with_star_anchor(vec2(anchor_x, anchor_y));
        self.coordinator.attach_canvas(canvas);
    }

    /// Run one frame: advance the coordinator, rebuild the display buffer,
    /// pack the audio cues.
    pub fn tick(&mut self, dt: f32) {
        self.coordinator.tick(dt);
        self.coordinator.build_display_buffer(&mut self.display_buffer);

        self.sound_buffer.clear();
        self.sound_buffer.extend(self.coordinator.sounds().iter().map(|cue| cue.0));
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.display_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.display_buffer.instance_count()
    }

    pub fn sound_events_ptr(&self) -> *const u32 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn feedback_events_ptr(&self) -> *const f32 {
        self.coordinator.events().as_ptr() as *const f32
    }

    /// Number of events (each `FeedbackEvent::FLOATS` floats).
    pub fn feedback_events_len(&self) -> u32 {
        self.coordinator.events().len() as u32
    }

    pub fn event_floats(&self) -> u32 {
        FeedbackEvent::FLOATS as u32
    }

    pub fn labels_json(&self) -> String {
        match self.display_buffer.labels_json() {
            Ok(json) => json,
            Err(err) => {
                log::warn!("label serialization failed: {}", err);
                "[]".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let (runner, err) = FeedbackRunner::from_json("{ not json");
        assert!(err.is_some());
        assert_eq!(runner.coordinator().config(), &FeedbackConfig::default());
    }

    #[test]
    fn tick_packs_buffers() {
        let (mut runner, err) = FeedbackRunner::from_json(r#"{ "auto_praise": false }"#);
        assert!(err.is_none());
        runner.set_award_count(3);
        runner.attach_canvas(1920.0, 1080.0, 800.0, 400.0);
        runner.coordinator_mut().activate();
        runner.tick(1.0 / 60.0);

        assert_eq!(runner.instance_count(), 3);
        assert_eq!(runner.sound_events_len(), 0);
        assert_eq!(runner.labels_json(), "[]");
    }
}
