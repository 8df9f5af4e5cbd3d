use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::systems::layout::LayoutPolicy;
use crate::systems::praise::SpawnRegion;

/// Tuning for the whole feedback subsystem, provided by the host.
/// Every field has a default, so a JSON config only lists what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    // -- Stars --
    /// Capacity of the star registry.
    pub max_stars: usize,
    /// Seconds for a new star to fill from empty.
    pub fill_duration: f32,
    /// Seconds for the full round trip corner → centre → corner.
    pub move_duration: f32,
    /// Seconds for one pop-in (grow + settle).
    pub flash_duration: f32,
    /// Peak scale multiplier of a pop.
    pub flash_scale: f32,
    /// Scale a popped object starts from, relative to its final scale.
    pub pop_initial_scale: f32,
    /// Seconds an ephemeral object takes to shrink before it is removed.
    pub destroy_scale_duration: f32,
    /// Scale an ephemeral object shrinks to before it is removed.
    pub destroy_target_scale: f32,
    pub small_star_size: Vec2,
    pub large_star_size: Vec2,
    pub layout: LayoutPolicy,

    // -- Celebration --
    pub celebration_text: String,
    /// Phrase index whose voice line plays when a star is celebrated.
    pub celebration_audio_index: usize,

    // -- Praise --
    pub auto_praise: bool,
    /// Seconds between automatic praise popups.
    pub praise_interval: f32,
    pub praise_phrases: Vec<String>,
    /// Voice lines. Same length as `praise_phrases` → paired by index,
    /// otherwise a random one plays.
    pub praise_audio: Vec<u32>,
    /// Seconds a praise popup stays before shrinking away.
    pub praise_duration: f32,
    /// Rotation range for praise popups, in degrees.
    pub rotation_min: f32,
    pub rotation_max: f32,
    /// Inset applied to each spawn region, in canvas units.
    pub spawn_padding: Vec2,
    pub spawn_regions: Vec<SpawnRegion>,
    /// Spawn a particle burst behind celebration and praise labels.
    pub particles: bool,
    pub particle_scale: f32,
    pub font_size: u32,
    /// RGBA, 0..1.
    pub text_color: [f32; 4],

    // -- Rating badge --
    /// Number of rating sprites the host provides (indices 0..n).
    pub rating_sprites: usize,
    pub pulse_scale: f32,
    pub pulse_duration: f32,
    pub rating_position: Vec2,
    pub rating_size: Vec2,

    /// RNG seed for praise placement.
    pub seed: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            max_stars: 12,
            fill_duration: 5.0,
            move_duration: 0.6,
            flash_duration: 0.2,
            flash_scale: 1.6,
            pop_initial_scale: 0.02,
            destroy_scale_duration: 0.15,
            destroy_target_scale: 0.05,
            small_star_size: Vec2::splat(36.0),
            large_star_size: Vec2::splat(180.0),
            layout: LayoutPolicy::default(),
            celebration_text: "You Got A Star!".to_string(),
            celebration_audio_index: 0,
            auto_praise: true,
            praise_interval: 30.0,
            praise_phrases: ["Good job!", "Well done!", "Awesome!", "Nice!"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            praise_audio: Vec::new(),
            praise_duration: 1.0,
            rotation_min: -35.0,
            rotation_max: 35.0,
            spawn_padding: Vec2::new(500.0, 200.0),
            spawn_regions: vec![SpawnRegion::FULL],
            particles: true,
            particle_scale: 1.0,
            font_size: 36,
            text_color: [1.0, 1.0, 1.0, 1.0],
            rating_sprites: 0,
            pulse_scale: 1.1,
            pulse_duration: 0.2,
            rating_position: Vec2::new(0.0, 300.0),
            rating_size: Vec2::splat(160.0),
            seed: 42,
        }
    }
}

/// Replace a NaN or negative duration with `floor`.
fn duration_or(value: f32, floor: f32) -> f32 {
    if value.is_finite() {
        value.max(floor)
    } else {
        floor
    }
}

impl FeedbackConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Clamp values that would stall an animation or divide by zero.
    pub fn sanitized(mut self) -> Self {
        self.fill_duration = duration_or(self.fill_duration, 0.0);
        self.move_duration = duration_or(self.move_duration, 0.0);
        self.flash_duration = duration_or(self.flash_duration, 0.0);
        self.destroy_scale_duration = duration_or(self.destroy_scale_duration, 0.0);
        self.praise_duration = duration_or(self.praise_duration, 0.01);
        self.praise_interval = duration_or(self.praise_interval, 0.01);
        self.pulse_duration = duration_or(self.pulse_duration, 0.001);
        self.destroy_target_scale = duration_or(self.destroy_target_scale, 0.0001);
        // Regions parsed from JSON bypass `SpawnRegion::new`
        for region in &mut self.spawn_regions {
            *region = SpawnRegion::new(region.min, region.max);
        }
        if self.rotation_min > self.rotation_max {
            std::mem::swap(&mut self.rotation_min, &mut self.rotation_max);
        }
        if self.large_star_size.x <= 0.0 {
            log::warn!("large_star_size must be positive, using the small size");
            self.large_star_size = self.small_star_size.max(Vec2::ONE);
        }
        self
    }

    /// Scale at which the large moving star matches a small corner star.
    pub fn small_to_large(&self) -> f32 {
        self.small_star_size.x / self.large_star_size.x
    }
}
