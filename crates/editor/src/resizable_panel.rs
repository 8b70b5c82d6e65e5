// Chunk: docs/chunks/resizable_panel - Drag-resizable side panel
//!
//! A panel whose width is changed by dragging a handle on its right edge.
//!
//! Width only ever changes through [`ResizablePanel::adjust_width`], which
//! clamps into `[min_width, max_width]`. The resize callback fires only when
//! the clamped width differs from the current one, so pushing the handle
//! past a bound is silent.
//!
//! Drags are incremental: each move applies the distance from the previous
//! move position, not from the press position.

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Default side bar width in pixels.
pub const DEFAULT_SIDE_BAR_WIDTH: f32 = 220.0;

/// Narrowest the side bar can be dragged.
pub const MIN_SIDE_BAR_WIDTH: f32 = 180.0;

/// Widest the side bar can be dragged.
pub const MAX_SIDE_BAR_WIDTH: f32 = 400.0;

/// Width of the drag handle strip.
pub const RESIZE_HANDLE_WIDTH: f32 = 8.0;

/// Invalid panel bounds.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("panel bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: f32, max: f32 },
    #[error("panel dimensions must be finite")]
    NonFinite,
}

// =============================================================================
// Geometry
// =============================================================================

/// A width constrained to `[min_width, max_width]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    current_width: f32,
    min_width: f32,
    max_width: f32,
}

impl PanelGeometry {
    /// Creates the geometry, clamping `width` into the bounds.
    pub fn new(width: f32, min_width: f32, max_width: f32) -> Result<Self, GeometryError> {
        if !(width.is_finite() && min_width.is_finite() && max_width.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        if min_width > max_width {
            return Err(GeometryError::InvertedBounds {
                min: min_width,
                max: max_width,
            });
        }
        Ok(Self {
            current_width: width.clamp(min_width, max_width),
            min_width,
            max_width,
        })
    }

    pub fn current_width(&self) -> f32 {
        self.current_width
    }

    pub fn min_width(&self) -> f32 {
        self.min_width
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    /// Applies `delta` and returns the new width if it changed.
    pub fn apply_delta(&mut self, delta: f32) -> Option<f32> {
        if !delta.is_finite() {
            return None;
        }
        let new_width = (self.current_width + delta).clamp(self.min_width, self.max_width);
        if new_width == self.current_width {
            return None;
        }
        self.current_width = new_width;
        Some(new_width)
    }
}

// =============================================================================
// ResizablePanel
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    start_x: f32,
    start_width: f32,
    last_x: f32,
}

/// The side panel width plus the drag interaction on its handle.
pub struct ResizablePanel {
    geometry: PanelGeometry,
    drag: Option<DragState>,
    hovered: bool,
    on_resize: Option<Box<dyn FnMut(f32)>>,
}

impl ResizablePanel {
    pub fn new(width: f32, min_width: f32, max_width: f32) -> Result<Self, GeometryError> {
        Ok(Self {
            geometry: PanelGeometry::new(width, min_width, max_width)?,
            drag: None,
            hovered: false,
            on_resize: None,
        })
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    pub fn width(&self) -> f32 {
        self.geometry.current_width()
    }

    /// Registers the callback run with the new width after every change.
    pub fn set_on_resize(&mut self, callback: impl FnMut(f32) + 'static) {
        self.on_resize = Some(Box::new(callback));
    }

    /// Changes the width by `delta`, clamped into the bounds.
    ///
    /// Returns the new width and runs the resize callback only if the width
    /// changed.
    pub fn adjust_width(&mut self, delta: f32) -> Option<f32> {
        let new_width = self.geometry.apply_delta(delta)?;
        debug!(width = new_width, "panel resized");
        if let Some(callback) = self.on_resize.as_mut() {
            callback(new_width);
        }
        Some(new_width)
    }

    // ==================== Drag Handling ====================

    /// Starts a drag at pointer x `x`.
    pub fn press(&mut self, x: f32) {
        self.drag = Some(DragState {
            start_x: x,
            start_width: self.width(),
            last_x: x,
        });
    }

    /// Continues a drag to pointer x `x`. Ignored when no drag is active.
    pub fn drag_to(&mut self, x: f32) -> Option<f32> {
        let drag = self.drag.as_mut()?;
        let delta = x - drag.last_x;
        drag.last_x = x;
        self.adjust_width(delta)
    }

    /// Ends the drag without changing the width.
    pub fn release(&mut self) {
        if let Some(drag) = self.drag.take() {
            debug!(
                from = drag.start_width,
                to = self.width(),
                moved = drag.last_x - drag.start_x,
                "panel drag finished"
            );
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Width when the current drag started.
    pub fn drag_start_width(&self) -> Option<f32> {
        self.drag.map(|d| d.start_width)
    }

    // ==================== Hover ====================

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Whether the handle draws in its highlighted state.
    pub fn is_handle_highlighted(&self) -> bool {
        self.hovered || self.is_dragging()
    }
}

impl fmt::Debug for ResizablePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizablePanel")
            .field("geometry", &self.geometry)
            .field("drag", &self.drag)
            .field("hovered", &self.hovered)
            .field("has_on_resize", &self.on_resize.is_some())
            .finish()
    }
}
