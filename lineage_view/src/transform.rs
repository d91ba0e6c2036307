// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between layout space and screen pixels.

use kurbo::{Point, Rect, Size, Vec2};

/// The visible rectangle of layout space and the pixel size it is drawn into.
///
/// Layout X runs along screen X; time points run along screen Y. Pixel `0` maps to
/// the rectangle's minimum and pixel `size - 1` to its maximum, so one pixel step is
/// `(max - min) / (size - 1)` layout units.
///
/// The visible rectangle must have a non-zero extent on both axes and the screen
/// should be at least two pixels in each direction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewTransform {
    visible: Rect,
    screen_width: u32,
    screen_height: u32,
}

impl ViewTransform {
    /// Create a transform showing `visible` (layout space) on a `screen_width` ×
    /// `screen_height` pixel surface.
    pub fn new(visible: Rect, screen_width: u32, screen_height: u32) -> Self {
        Self {
            visible: visible.abs(),
            screen_width,
            screen_height,
        }
    }

    /// Create a transform from explicit bounds.
    pub fn from_bounds(
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        screen_width: u32,
        screen_height: u32,
    ) -> Self {
        Self::new(
            Rect::new(min_x, min_y, max_x, max_y),
            screen_width,
            screen_height,
        )
    }

    /// An independent copy, for handing the transform to another thread or frame.
    pub fn snapshot(&self) -> Self {
        *self
    }

    /// Visible rectangle in layout space.
    pub fn visible(&self) -> Rect {
        self.visible
    }

    /// Smallest visible layout X.
    pub fn min_x(&self) -> f64 {
        self.visible.x0
    }

    /// Largest visible layout X.
    pub fn max_x(&self) -> f64 {
        self.visible.x1
    }

    /// Smallest visible time point coordinate.
    pub fn min_y(&self) -> f64 {
        self.visible.y0
    }

    /// Largest visible time point coordinate.
    pub fn max_y(&self) -> f64 {
        self.visible.y1
    }

    /// Screen width in pixels.
    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    /// Screen height in pixels.
    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// Screen size in pixels.
    pub fn screen_size(&self) -> Size {
        Size::new(f64::from(self.screen_width), f64::from(self.screen_height))
    }

    /// Update the screen size, keeping the visible rectangle.
    pub fn set_screen_size(&mut self, screen_width: u32, screen_height: u32) {
        self.screen_width = screen_width;
        self.screen_height = screen_height;
    }

    /// Replace the visible rectangle.
    pub fn set_visible(&mut self, visible: Rect) {
        self.visible = visible.abs();
    }

    fn steps_x(&self) -> f64 {
        f64::from(self.screen_width.saturating_sub(1).max(1))
    }

    fn steps_y(&self) -> f64 {
        f64::from(self.screen_height.saturating_sub(1).max(1))
    }

    /// Layout units per pixel along X.
    pub fn inv_scale_x(&self) -> f64 {
        self.visible.width() / self.steps_x()
    }

    /// Layout units per pixel along Y.
    pub fn inv_scale_y(&self) -> f64 {
        self.visible.height() / self.steps_y()
    }

    /// Pixels per layout unit along X.
    pub fn x_scale(&self) -> f64 {
        self.steps_x() / self.visible.width()
    }

    /// Pixels per layout unit along Y (pixels per time point).
    pub fn y_scale(&self) -> f64 {
        self.steps_y() / self.visible.height()
    }

    /// Layout X under screen column `x`.
    pub fn screen_to_layout_x(&self, x: f64) -> f64 {
        self.visible.x0 + self.inv_scale_x() * x
    }

    /// Layout Y (time) under screen row `y`.
    pub fn screen_to_layout_y(&self, y: f64) -> f64 {
        self.visible.y0 + self.inv_scale_y() * y
    }

    /// Layout position under a screen point.
    pub fn screen_to_layout(&self, p: Point) -> Point {
        Point::new(self.screen_to_layout_x(p.x), self.screen_to_layout_y(p.y))
    }

    /// Screen column of layout X `x`.
    pub fn layout_to_screen_x(&self, x: f64) -> f64 {
        (x - self.visible.x0) * self.x_scale()
    }

    /// Screen row of layout Y `y`.
    pub fn layout_to_screen_y(&self, y: f64) -> f64 {
        (y - self.visible.y0) * self.y_scale()
    }

    /// Screen position of a layout position.
    pub fn layout_to_screen(&self, p: Point) -> Point {
        Point::new(self.layout_to_screen_x(p.x), self.layout_to_screen_y(p.y))
    }

    /// Set the visible rectangle to `from`'s, moved by `delta` pixels at this
    /// transform's zoom level.
    ///
    /// Dragging passes the transform captured at drag start as `from` and the total
    /// drag distance as `delta`, so no error accumulates over a gesture.
    pub fn pan(&mut self, delta: Vec2, from: &Self) {
        let offset = Vec2::new(self.inv_scale_x() * delta.x, self.inv_scale_y() * delta.y);
        self.visible = from.visible + offset;
    }

    /// Zoom both axes by `factor` (the visible span is multiplied by it), keeping the
    /// layout position under `anchor` fixed.
    pub fn scale(&mut self, factor: f64, anchor: Point) {
        self.scale_x(factor, anchor);
        self.scale_y(factor, anchor);
    }

    /// Zoom the X axis only, keeping the layout X under `anchor.x` fixed.
    pub fn scale_x(&mut self, factor: f64, anchor: Point) {
        let lx = self.screen_to_layout_x(anchor.x);
        let width = self.visible.width() * factor;
        let x0 = lx - width / self.steps_x() * anchor.x;
        self.visible.x0 = x0;
        self.visible.x1 = x0 + width;
    }

    /// Zoom the Y axis only, keeping the layout Y under `anchor.y` fixed.
    pub fn scale_y(&mut self, factor: f64, anchor: Point) {
        let ly = self.screen_to_layout_y(anchor.y);
        let height = self.visible.height() * factor;
        let y0 = ly - height / self.steps_y() * anchor.y;
        self.visible.y0 = y0;
        self.visible.y1 = y0 + height;
    }

    /// Linear interpolation between two transforms; the screen size is taken from `to`.
    pub fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        let a = from.visible;
        let b = to.visible;
        let mix = |p: f64, q: f64| p + (q - p) * t;
        Self {
            visible: Rect::new(
                mix(a.x0, b.x0),
                mix(a.y0, b.y0),
                mix(a.x1, b.x1),
                mix(a.y1, b.y1),
            ),
            screen_width: to.screen_width,
            screen_height: to.screen_height,
        }
    }
}
