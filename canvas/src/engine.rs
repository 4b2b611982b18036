use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Point, ViewportTransform};
use crate::consts::{MAX_SCALE, MIN_SCALE, STORAGE_KEY, WHEEL_SENSITIVITY, ZOOM_FACTOR};
use crate::doc::{Shape, ShapeList};
use crate::input::{Button, CaptureState, Tool, WheelDelta, draft_between};
use crate::render;
use crate::store::{self, KeyValueStore, MemoryStore, StoreError};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A capture finished and the shape was appended and saved.
    ShapeCommitted(Shape),
    /// The viewport transform changed.
    ViewportChanged(ViewportTransform),
    /// State visible on the canvas changed; redraw before returning to the host.
    RenderNeeded,
}

/// Tunable engine settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Key the shape list is stored under.
    pub storage_key: String,
    /// Exponent per wheel pixel for continuous zoom.
    pub wheel_sensitivity: f64,
    /// Step for the zoom-in / zoom-out controls.
    pub zoom_factor: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_owned(),
            wheel_sensitivity: WHEEL_SENSITIVITY,
            zoom_factor: ZOOM_FACTOR,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

/// A host-supplied [`EngineConfig`] value outside its valid range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("scale limits must satisfy 0 < min_scale <= max_scale, got {min} and {max}")]
    ScaleLimits { min: f64, max: f64 },
    #[error("zoom_factor must be finite and greater than 1, got {0}")]
    ZoomFactor(f64),
    #[error("wheel_sensitivity must be finite and non-negative, got {0}")]
    WheelSensitivity(f64),
    #[error("storage_key must not be empty")]
    EmptyStorageKey,
}

impl EngineConfig {
    /// Initial viewport for these settings.
    #[must_use]
    pub fn viewport(&self) -> ViewportTransform {
        ViewportTransform::with_limits(self.zoom_factor, self.min_scale, self.max_scale)
    }

    /// Check every field. NaN fails each numeric check.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_scale, self.max_scale);
        let limits_ok = min > 0.0 && min <= max && max.is_finite();
        if !limits_ok {
            return Err(ConfigError::ScaleLimits { min, max });
        }
        let step_ok = self.zoom_factor > 1.0 && self.zoom_factor.is_finite();
        if !step_ok {
            return Err(ConfigError::ZoomFactor(self.zoom_factor));
        }
        let sensitivity_ok = self.wheel_sensitivity >= 0.0 && self.wheel_sensitivity.is_finite();
        if !sensitivity_ok {
            return Err(ConfigError::WheelSensitivity(self.wheel_sensitivity));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Every mutating handler returns the actions it caused; any handler that
/// changes visible state includes [`Action::RenderNeeded`].
pub struct EngineCore {
    pub shapes: ShapeList,
    pub viewport: ViewportTransform,
    pub capture: CaptureState,
    pub tool: Tool,
    pub viewport_width: f64,
    pub viewport_height: f64,
    config: EngineConfig,
    store: Box<dyn KeyValueStore>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(Box::new(MemoryStore::new()), EngineConfig::default())
    }
}

impl EngineCore {
    /// Create an idle engine with an empty board. An invalid `config` is
    /// logged and replaced by [`EngineConfig::default`].
    #[must_use]
    pub fn new(store: Box<dyn KeyValueStore>, config: EngineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid engine config ({err}); using defaults");
                EngineConfig::default()
            }
        };
        Self {
            shapes: ShapeList::new(),
            viewport: config.viewport(),
            capture: CaptureState::Idle,
            tool: Tool::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            config,
            store,
        }
    }

    // --- Persistence ---

    /// Replace the shape list with the persisted one.
    ///
    /// On error the current list is left untouched; recovery is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Malformed`] if the stored value is not a shape
    /// array, or [`StoreError::Unavailable`] if the store cannot be read.
    pub fn load(&mut self) -> Result<(), StoreError> {
        self.shapes = store::load_shapes(self.store.as_ref(), &self.config.storage_key)?;
        log::debug!("loaded {} shapes", self.shapes.len());
        Ok(())
    }

    fn commit(&mut self, shape: Shape) -> Action {
        log::debug!(
            "commit {:?} #{} at {:?} ({} x {})",
            shape.kind(),
            self.shapes.len() + 1,
            shape.origin(),
            shape.width(),
            shape.height()
        );
        self.shapes.append(shape.clone());
        if let Err(err) = store::save_shapes(self.store.as_ref(), &self.config.storage_key, &self.shapes) {
            log::warn!("failed to save shapes: {err}");
        }
        Action::ShapeCommitted(shape)
    }

    // --- Tool ---

    /// Set the active tool. An in-progress capture or pan is cancelled
    /// without committing anything.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if tool == self.tool {
            return Vec::new();
        }
        self.tool = tool;
        if !self.capture.is_idle() {
            log::debug!("tool changed to {tool:?} mid-gesture; discarding it");
        }
        self.abandon_gesture()
    }

    /// Return to idle without committing anything.
    fn abandon_gesture(&mut self) -> Vec<Action> {
        if std::mem::take(&mut self.capture).is_idle() {
            return Vec::new();
        }
        vec![Action::RenderNeeded]
    }

    // --- Viewport ---

    /// Record the canvas size in pixels. Content and transform are unchanged.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport_width = width;
        self.viewport_height = height;
        vec![Action::RenderNeeded]
    }

    /// Center of the canvas in screen space; the anchor for button zoom.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    fn replace_viewport(&mut self, next: ViewportTransform) -> Vec<Action> {
        self.viewport = next;
        vec![Action::ViewportChanged(next), Action::RenderNeeded]
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        let next = self.viewport.zoom_in(self.viewport_center());
        self.replace_viewport(next)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        let next = self.viewport.zoom_out(self.viewport_center());
        self.replace_viewport(next)
    }

    pub fn reset_zoom(&mut self) -> Vec<Action> {
        log::debug!("viewport reset");
        let next = self.viewport.reset();
        self.replace_viewport(next)
    }

    /// Zoom level as a rounded percentage.
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.viewport.percent()
    }

    // --- Input events ---

    /// Start a capture or pan. Ignored unless idle and the primary button is pressed.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.capture.is_idle() {
            return Vec::new();
        }

        if self.tool == Tool::Pan {
            self.capture = CaptureState::Panning { pan_start: screen_pt, origin_at_pan_start: self.viewport.origin() };
            return Vec::new();
        }

        let start = self.viewport.screen_to_logical(screen_pt);
        let points = if self.tool == Tool::Pencil { vec![start] } else { Vec::new() };
        let draft = draft_between(self.tool, start, start);
        let has_draft = draft.is_some();
        self.capture = CaptureState::Capturing { tool: self.tool, start, points, draft };
        if has_draft { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Extend the draft or move the viewport.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match &mut self.capture {
            CaptureState::Idle => Vec::new(),
            CaptureState::Panning { pan_start, origin_at_pan_start } => {
                let delta = Point::new(screen_pt.x - pan_start.x, screen_pt.y - pan_start.y);
                let next = self.viewport.pan(delta, *origin_at_pan_start);
                self.replace_viewport(next)
            }
            CaptureState::Capturing { tool, start, points, draft } => {
                let at = self.viewport.screen_to_logical(screen_pt);
                if *tool == Tool::Pencil {
                    points.push(at);
                    *draft = Some(Shape::Pencil { points: points.clone() });
                } else {
                    *draft = draft_between(*tool, *start, at);
                }
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Finish the gesture. Drawing tools commit their draft; a pencil stroke
    /// needs at least two points.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match std::mem::take(&mut self.capture) {
            CaptureState::Idle | CaptureState::Panning { .. } => Vec::new(),
            CaptureState::Capturing { tool, points, draft, .. } => {
                let shape = if tool == Tool::Pencil {
                    (points.len() > 1).then_some(Shape::Pencil { points })
                } else {
                    draft
                };
                match shape {
                    Some(shape) => vec![self.commit(shape), Action::RenderNeeded],
                    None => vec![Action::RenderNeeded],
                }
            }
        }
    }

    /// The browser took the pointer away (`pointercancel`, lost capture).
    /// Any capture or pan ends without a commit.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        if !self.capture.is_idle() {
            log::debug!("pointer cancelled mid-gesture; discarding it");
        }
        self.abandon_gesture()
    }

    /// Continuous zoom anchored at the pointer. Never interrupts a capture.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        let next = self.viewport.zoom_wheel(screen_pt, delta.dy, self.config.wheel_sensitivity);
        self.replace_viewport(next)
    }

    // --- Queries ---

    /// The in-progress shape, if any.
    #[must_use]
    pub fn draft(&self) -> Option<&Shape> {
        self.capture.draft()
    }

    /// The current viewport transform.
    #[must_use]
    pub fn viewport(&self) -> ViewportTransform {
        self.viewport
    }

    /// Committed shapes in paint order.
    #[must_use]
    pub fn shapes(&self) -> &ShapeList {
        &self.shapes
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// Every handler services `RenderNeeded` before returning, so the canvas never
/// shows a state that did not exist in `EngineCore`.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, store: Box<dyn KeyValueStore>, config: EngineConfig) -> Self {
        Self { canvas, core: EngineCore::new(store, config) }
    }

    // --- Delegated data inputs ---

    /// Load persisted shapes and redraw.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineCore::load`] errors; the canvas is still redrawn.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let result = self.core.load();
        self.paint();
        result
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let actions = self.core.set_tool(tool);
        self.service(actions)
    }

    // --- Viewport ---

    /// Resize the backing buffer to `width` × `height` pixels and redraw.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        let width = width.max(1.0);
        let height = height.max(1.0);
        self.canvas.set_width(width.round() as u32);
        self.canvas.set_height(height.round() as u32);
        let actions = self.core.set_viewport(width, height);
        self.service(actions)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        let actions = self.core.zoom_in();
        self.service(actions)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        let actions = self.core.zoom_out();
        self.service(actions)
    }

    pub fn reset_zoom(&mut self) -> Vec<Action> {
        let actions = self.core.reset_zoom();
        self.service(actions)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_down(screen_pt, button);
        self.service(actions)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_move(screen_pt);
        self.service(actions)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_up(screen_pt, button);
        self.service(actions)
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_cancel();
        self.service(actions)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        let actions = self.core.on_wheel(screen_pt, delta);
        self.service(actions)
    }

    // --- Render ---

    /// Draw the current state to the canvas. A missing 2D context skips the pass.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(mut ctx) = self.context() else {
            log::debug!("no 2d context; skipping render");
            return Ok(());
        };
        render::draw(
            &mut ctx,
            &self.core.shapes,
            self.core.draft(),
            &self.core.viewport,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }

    fn context(&self) -> Option<CanvasRenderingContext2d> {
        let Ok(Some(object)) = self.canvas.get_context("2d") else {
            return None;
        };
        match object.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => Some(ctx),
            Err(_) => None,
        }
    }

    fn paint(&self) {
        if let Err(err) = self.render() {
            log::warn!("render failed: {err:?}");
        }
    }

    fn service(&self, actions: Vec<Action>) -> Vec<Action> {
        if actions.contains(&Action::RenderNeeded) {
            self.paint();
        }
        actions
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn viewport(&self) -> ViewportTransform {
        self.core.viewport()
    }

    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.core.zoom_percent()
    }
}
