pub mod runner;

pub use runner::FeedbackRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<FeedbackRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Before `feedback_init` every export is a
/// logged no-op returning `R::default()`.
fn with_runner<R: Default>(f: impl FnOnce(&mut FeedbackRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("feedback not initialized, call feedback_init() first");
            R::default()
        }
    })
}

/// Create the runner from a JSON config. Invalid JSON falls back to defaults.
#[wasm_bindgen]
pub fn feedback_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let (runner, err) = FeedbackRunner::from_json(config_json);
    if let Some(err) = err {
        web_sys::console::warn_1(&format!("kudos: bad config ({}), using defaults", err).into());
    }

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("kudos: initialized");
}

#[wasm_bindgen]
pub fn feedback_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn feedback_activate() {
    with_runner(|r| r.coordinator_mut().activate());
}

#[wasm_bindgen]
pub fn feedback_deactivate() {
    with_runner(|r| r.coordinator_mut().deactivate());
}

#[wasm_bindgen]
pub fn feedback_attach_canvas(width: f32, height: f32, anchor_x: f32, anchor_y: f32) {
    with_runner(|r| r.attach_canvas(width, height, anchor_x, anchor_y));
}

#[wasm_bindgen]
pub fn feedback_detach_canvas() {
    with_runner(|r| r.coordinator_mut().detach_canvas());
}

/// Update the authoritative award count. Takes effect on the next refresh.
#[wasm_bindgen]
pub fn feedback_set_award_count(count: i32) {
    with_runner(|r| r.set_award_count(i64::from(count)));
}

#[wasm_bindgen]
pub fn feedback_refresh() {
    with_runner(|r| r.coordinator_mut().refresh_from_source());
}

#[wasm_bindgen]
pub fn feedback_start_filling() {
    with_runner(|r| r.coordinator_mut().start_filling_next_star());
}

#[wasm_bindgen]
pub fn feedback_trigger_star(awarded: bool) {
    with_runner(|r| r.coordinator_mut().trigger_star(awarded));
}

#[wasm_bindgen]
pub fn feedback_show_rating(index: i32) {
    with_runner(|r| r.coordinator_mut().show_rating(index));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.instances_ptr())
    })
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.sound_events_ptr())
    })
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(|r| r.sound_events_len())
}

#[wasm_bindgen]
pub fn get_feedback_events_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.feedback_events_ptr())
    })
}

#[wasm_bindgen]
pub fn get_feedback_events_len() -> u32 {
    with_runner(|r| r.feedback_events_len())
}

#[wasm_bindgen]
pub fn get_event_floats() -> u32 {
    with_runner(|r| r.event_floats())
}

#[wasm_bindgen]
pub fn get_is_celebrating() -> bool {
    with_runner(|r| r.coordinator().is_celebrating())
}

/// Labels for this frame as a JSON array of `{ instance, text, font_size, color }`.
#[wasm_bindgen]
pub fn get_labels_json() -> String {
    with_runner(|r| r.labels_json())
}
