use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::unix_seconds_to_datetime;
use crate::core::{CoordinateMapper, PixelDelta, PixelPoint, PlotArea};
use crate::error::{TimeBoxError, TimeBoxResult};

/// Stable identifier of a box within one chart session. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxId(pub u64);

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "box#{}", self.0)
    }
}

/// Geometry tuning shared by every box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometryConfig {
    /// Floor for rendered width/height so a zero-size drag stays visible.
    pub min_size_px: f64,
    /// Offset of the live corner from the anchor when a box is seeded.
    pub seed_size_px: f64,
    /// Pick radius around the resize handle.
    pub handle_radius_px: f64,
}

impl Default for BoxGeometryConfig {
    fn default() -> Self {
        Self {
            min_size_px: 2.0,
            seed_size_px: 1.0,
            handle_radius_px: 6.0,
        }
    }
}

impl BoxGeometryConfig {
    pub fn validate(self) -> TimeBoxResult<Self> {
        if !self.min_size_px.is_finite() || self.min_size_px < 2.0 {
            return Err(TimeBoxError::InvalidData(
                "box min_size_px must be finite and >= 2".to_owned(),
            ));
        }
        if !self.seed_size_px.is_finite() || self.seed_size_px < 0.0 {
            return Err(TimeBoxError::InvalidData(
                "box seed_size_px must be finite and >= 0".to_owned(),
            ));
        }
        if !self.handle_radius_px.is_finite() || self.handle_radius_px <= 0.0 {
            return Err(TimeBoxError::InvalidData(
                "box handle_radius_px must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Data-space predicate of a box: time interval (unix seconds) x value interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl DataRange {
    #[must_use]
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    #[must_use]
    pub fn contains_time(&self, time: f64) -> bool {
        self.xmin <= time && time <= self.xmax
    }

    #[must_use]
    pub fn contains_value(&self, value: f64) -> bool {
        self.ymin <= value && value <= self.ymax
    }

    #[must_use]
    pub fn mid_time(&self) -> f64 {
        (self.xmin + self.xmax) / 2.0
    }

    pub fn time_bounds(&self) -> TimeBoxResult<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((
            unix_seconds_to_datetime(self.xmin)?,
            unix_seconds_to_datetime(self.xmax)?,
        ))
    }
}

/// Axis-aligned rectangle in plot-local pixels, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One user-drawn filter rectangle.
///
/// `(x0, y0)` is the gesture anchor and `(x1, y1)` the live corner. Corners
/// stay inside the plot area, and the data range is recomputed from them on
/// every geometry change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterBox {
    id: BoxId,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    range: DataRange,
    finalized: bool,
    hovered: bool,
}

impl FilterBox {
    /// Seeds a box at `anchor` with its live corner `seed_size_px` away.
    #[must_use]
    pub fn create(
        id: BoxId,
        anchor: PixelPoint,
        seed_size_px: f64,
        mapper: &CoordinateMapper,
    ) -> Self {
        let plot = mapper.plot();
        let anchor = plot.clamp(anchor);
        let live = plot.clamp(PixelPoint::new(anchor.x + seed_size_px, anchor.y + seed_size_px));
        let mut filter_box = Self {
            id,
            x0: anchor.x,
            y0: anchor.y,
            x1: live.x,
            y1: live.y,
            range: DataRange::new(0.0, 0.0, 0.0, 0.0),
            finalized: false,
            hovered: false,
        };
        filter_box.recompute_range(mapper);
        filter_box
    }

    #[must_use]
    pub fn id(&self) -> BoxId {
        self.id
    }

    #[must_use]
    pub fn range(&self) -> DataRange {
        self.range
    }

    #[must_use]
    pub fn anchor(&self) -> PixelPoint {
        PixelPoint::new(self.x0, self.y0)
    }

    #[must_use]
    pub fn live_corner(&self) -> PixelPoint {
        PixelPoint::new(self.x1, self.y1)
    }

    /// `(x0, y0, x1, y1)` as stored, not reordered.
    #[must_use]
    pub fn corners(&self) -> (f64, f64, f64, f64) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    /// Signed `(x1 - x0, y1 - y0)`.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        (self.x1 - self.x0, self.y1 - self.y0)
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        changed
    }

    /// Resize handle position, always the live corner.
    #[must_use]
    pub fn handle(&self) -> PixelPoint {
        self.live_corner()
    }

    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.x0 <= self.x1 && self.y0 <= self.y1
    }

    /// Moves the live corner to `live` (clamped to the plot) and re-derives the range.
    pub fn resize_to(&mut self, live: PixelPoint, mapper: &CoordinateMapper) {
        let live = mapper.plot().clamp(live);
        self.x1 = live.x;
        self.y1 = live.y;
        self.recompute_range(mapper);
    }

    /// Swaps corners so that `x0 <= x1` and `y0 <= y1`.
    ///
    /// Returns `true` when any corner moved. Idempotent.
    pub fn finalize(&mut self) -> bool {
        let mut swapped = false;
        if self.x0 > self.x1 {
            std::mem::swap(&mut self.x0, &mut self.x1);
            swapped = true;
        }
        if self.y0 > self.y1 {
            std::mem::swap(&mut self.y0, &mut self.y1);
            swapped = true;
        }
        self.finalized = true;
        swapped
    }

    /// Translates the whole box, shortening the translation at plot edges so
    /// the box keeps its size. Returns the delta actually applied.
    pub fn move_by(&mut self, delta: PixelDelta, mapper: &CoordinateMapper) -> PixelDelta {
        let plot = mapper.plot();
        let dx = settle_translation(self.x0, self.x1, delta.dx, plot.width);
        let dy = settle_translation(self.y0, self.y1, delta.dy, plot.height);
        self.x0 += dx;
        self.x1 += dx;
        self.y0 += dy;
        self.y1 += dy;
        self.recompute_range(mapper);
        PixelDelta::new(dx, dy)
    }

    /// Whether `point` lies within the box's corner-spanned area.
    #[must_use]
    pub fn contains(&self, point: PixelPoint) -> bool {
        let (left, right) = ordered(self.x0, self.x1);
        let (top, bottom) = ordered(self.y0, self.y1);
        left <= point.x && point.x <= right && top <= point.y && point.y <= bottom
    }

    /// Drawable rectangle with width/height floored to `min_size_px`, kept inside `plot`.
    #[must_use]
    pub fn rect(&self, plot: PlotArea, min_size_px: f64) -> BoxRect {
        let (left, right) = ordered(self.x0, self.x1);
        let (top, bottom) = ordered(self.y0, self.y1);
        let width = (right - left).max(min_size_px);
        let height = (bottom - top).max(min_size_px);
        BoxRect {
            x: left.min(plot.width - width).max(0.0),
            y: top.min(plot.height - height).max(0.0),
            width,
            height,
        }
    }

    fn recompute_range(&mut self, mapper: &CoordinateMapper) {
        let (left, right) = ordered(self.x0, self.x1);
        let (top, bottom) = ordered(self.y0, self.y1);
        // Pixel Y grows downward, so the bottom edge is the lower value.
        self.range = DataRange::new(
            mapper.pixel_to_time(left),
            mapper.pixel_to_time(right),
            mapper.pixel_to_value(bottom),
            mapper.pixel_to_value(top),
        );
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn settle_translation(a: f64, b: f64, delta: f64, limit: f64) -> f64 {
    let (low, high) = ordered(a, b);
    if low + delta < 0.0 {
        -low
    } else if high + delta > limit {
        limit - high
    } else {
        delta
    }
}
