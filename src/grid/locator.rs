//! Point-to-cell hit testing.
//!
//! `CellLocator` knows each cell's rectangle and nothing about what the
//! cells contain. A point outside every rectangle locates to `None`,
//! which is how a drop gets cancelled.

use serde::{Deserialize, Serialize};

use super::model::CellIndex;
use crate::core::{CellLayout, LocatorError};

/// A point in the input collaborator's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle described by its centre and size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellRect {
    pub center: Point,
    pub width: f32,
    pub height: f32,
}

impl CellRect {
    #[must_use]
    pub const fn new(center: Point, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Inclusive half-extent test on both axes.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        point.x >= self.center.x - half_w
            && point.x <= self.center.x + half_w
            && point.y >= self.center.y - half_h
            && point.y <= self.center.y + half_h
    }
}

/// Maps points to cells by scanning cell rectangles row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CellLocatorRaw")]
pub struct CellLocator {
    rows: usize,
    columns: usize,
    /// Row-major, one per cell.
    rects: Vec<CellRect>,
}

#[derive(Deserialize)]
struct CellLocatorRaw {
    rows: usize,
    columns: usize,
    rects: Vec<CellRect>,
}

impl TryFrom<CellLocatorRaw> for CellLocator {
    type Error = LocatorError;

    fn try_from(raw: CellLocatorRaw) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.columns, raw.rects)
    }
}

impl CellLocator {
    /// Build from explicit row-major rectangles.
    pub fn new(rows: usize, columns: usize, rects: Vec<CellRect>) -> Result<Self, LocatorError> {
        let expected = rows.checked_mul(columns);
        if expected != Some(rects.len()) {
            return Err(LocatorError::RectCount {
                expected: expected.unwrap_or(usize::MAX),
                actual: rects.len(),
            });
        }
        Ok(Self { rows, columns, rects })
    }

    /// Lay cells out centered on the origin, y pointing up.
    ///
    /// Row 0 is the top row and column 0 the leftmost column.
    #[must_use]
    pub fn centered(rows: usize, columns: usize, layout: CellLayout) -> Self {
        let CellLayout {
            cell_width: w,
            cell_height: h,
            gap,
        } = layout;
        let offset_x = w / 2.0 - (columns as f32 * (w + gap) - gap) / 2.0;
        let offset_y = (rows as f32 * (h + gap) - gap) / 2.0 - h / 2.0;

        let rects = (0..rows * columns)
            .map(|i| {
                let cell = CellIndex::from_flat(i, columns);
                let x = offset_x + cell.column as f32 * (w + gap);
                let y = offset_y - cell.row as f32 * (h + gap);
                CellRect::new(Point::new(x, y), w, h)
            })
            .collect();

        Self { rows, columns, rects }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Rectangle for `cell`, if it exists.
    #[must_use]
    pub fn rect(&self, cell: CellIndex) -> Option<&CellRect> {
        if cell.row >= self.rows || cell.column >= self.columns {
            return None;
        }
        self.rects.get(cell.flat(self.columns))
    }

    /// First cell (row-major) whose rectangle contains `point`.
    #[must_use]
    pub fn locate(&self, point: Point) -> Option<CellIndex> {
        self.rects
            .iter()
            .position(|rect| rect.contains(point))
            .map(|i| CellIndex::from_flat(i, self.columns))
    }
}
