use std::ops::Range;

use approx::{AbsDiffEq, RelativeEq};

use crate::{Cell, GeoTransform, Point, Rect, Result};

/// Fractional cell positions closer than this to a cell edge are considered on the edge
const CELL_EDGE_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RasterSize {
    pub rows: usize,
    pub cols: usize,
}

impl RasterSize {
    pub const fn with_rows_cols(rows: usize, cols: usize) -> Self {
        RasterSize { rows, cols }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CellSize {
    x: f64,
    y: f64,
}

impl CellSize {
    pub fn new(x: f64, y: f64) -> Self {
        CellSize { x, y }
    }

    /// Square cells for a north-up raster (negative vertical size)
    pub fn square(size: f64) -> Self {
        CellSize::new(size, -size)
    }

    pub fn is_valid(&self) -> bool {
        self.x != 0.0 && self.y != 0.0
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// A rectangular block of cells, expressed as half-open row and column ranges
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellWindow {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl CellWindow {
    pub fn size(&self) -> RasterSize {
        RasterSize::with_rows_cols(self.rows.len(), self.cols.len())
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows
            .clone()
            .flat_map(move |row| self.cols.clone().map(move |col| Cell::from_row_col(row, col)))
    }
}

/// Describes the spatial layout of a raster: projection, extent, resolution and nodata value
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GeoReference {
    /// Projection as WKT, empty when unknown
    projection: String,
    size: RasterSize,
    geo_transform: GeoTransform,
    nodata: Option<f64>,
}

impl GeoReference {
    pub fn new<S: Into<String>>(projection: S, size: RasterSize, geo_transform: GeoTransform, nodata: Option<f64>) -> Self {
        GeoReference {
            projection: projection.into(),
            size,
            geo_transform,
            nodata,
        }
    }

    pub fn with_top_left<S: Into<String>>(
        projection: S,
        size: RasterSize,
        top_left: Point,
        cell_size: CellSize,
        nodata: Option<f64>,
    ) -> Self {
        GeoReference::new(
            projection,
            size,
            GeoTransform::from_top_left_and_cell_size(top_left, cell_size),
            nodata,
        )
    }

    pub fn without_spatial_reference(size: RasterSize, nodata: Option<f64>) -> Self {
        GeoReference::with_top_left("", size, Point::new(0.0, 0.0), CellSize::square(1.0), nodata)
    }

    pub fn copy_with_nodata(&self, nodata: Option<f64>) -> Self {
        GeoReference {
            nodata,
            ..self.clone()
        }
    }

    pub fn raster_size(&self) -> RasterSize {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.size.rows
    }

    pub fn columns(&self) -> usize {
        self.size.cols
    }

    pub fn projection(&self) -> &str {
        &self.projection
    }

    pub fn set_projection(&mut self, projection: String) {
        self.projection = projection;
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    pub fn set_nodata(&mut self, nodata: Option<f64>) {
        self.nodata = nodata;
    }

    pub fn geo_transform(&self) -> GeoTransform {
        self.geo_transform
    }

    pub fn cell_size(&self) -> CellSize {
        self.geo_transform.cell_size()
    }

    /// Map area covered by a single cell
    pub fn cell_area(&self) -> f64 {
        self.geo_transform.cell_area()
    }

    pub fn is_cell_on_map(&self, cell: Cell) -> bool {
        cell.row < self.rows() && cell.col < self.columns()
    }

    /// The map extent of the cell
    pub fn cell_bounds(&self, cell: Cell) -> Rect {
        let p1 = self.geo_transform.apply(cell.col as f64, cell.row as f64);
        let p2 = self.geo_transform.apply((cell.col + 1) as f64, (cell.row + 1) as f64);
        Rect::from_points(p1, p2)
    }

    pub fn cell_center(&self, cell: Cell) -> Point {
        self.geo_transform.apply(cell.col as f64 + 0.5, cell.row as f64 + 0.5)
    }

    /// The map extent of the full raster
    pub fn bounding_box(&self) -> Rect {
        let p1 = self.geo_transform.apply(0.0, 0.0);
        let p2 = self.geo_transform.apply(self.columns() as f64, self.rows() as f64);
        Rect::from_points(p1, p2)
    }

    /// The cells that overlap with the provided map extent, limited to the raster extent.
    /// Partially overlapped cells at the edges are included.
    /// Returns `None` when the extent does not overlap with the raster.
    pub fn cell_window(&self, bounds: &Rect) -> Result<Option<CellWindow>> {
        let (c1, r1) = self.geo_transform.to_fractional_cell(bounds.top_left())?;
        let (c2, r2) = self.geo_transform.to_fractional_cell(bounds.bottom_right())?;

        let cols = clamped_range(c1.min(c2), c1.max(c2), self.columns());
        let rows = clamped_range(r1.min(r2), r1.max(r2), self.rows());

        match (rows, cols) {
            (Some(rows), Some(cols)) => Ok(Some(CellWindow { rows, cols })),
            _ => Ok(None),
        }
    }

    /// Georeference of a window of this raster, the projection, resolution and nodata value are kept
    pub fn window_georeference(&self, window: &CellWindow) -> GeoReference {
        let top_left = self.geo_transform.apply(window.cols.start as f64, window.rows.start as f64);
        GeoReference::with_top_left(
            self.projection.clone(),
            window.size(),
            top_left,
            self.cell_size(),
            self.nodata,
        )
    }
}

fn snap_to_edge(val: f64) -> f64 {
    let rounded = val.round();
    if (val - rounded).abs() < CELL_EDGE_TOLERANCE { rounded } else { val }
}

fn clamped_range(lower: f64, upper: f64, count: usize) -> Option<Range<usize>> {
    let start = snap_to_edge(lower).floor().max(0.0);
    let end = snap_to_edge(upper).ceil().min(count as f64);

    if !start.is_finite() || !end.is_finite() || start >= end {
        return None;
    }

    Some(start as usize..end as usize)
}

impl AbsDiffEq for GeoReference {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.projection == other.projection
            && self.size == other.size
            && self.nodata == other.nodata
            && self.geo_transform.abs_diff_eq(&other.geo_transform, epsilon)
    }
}

impl RelativeEq for GeoReference {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.projection == other.projection
            && self.size == other.size
            && self.nodata == other.nodata
            && self.geo_transform.relative_eq(&other.geo_transform, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn georef() -> GeoReference {
        GeoReference::with_top_left(
            "",
            RasterSize::with_rows_cols(4, 5),
            Point::new(100.0, 40.0),
            CellSize::square(10.0),
            None,
        )
    }

    #[test]
    fn cell_geometry() {
        let meta = georef();
        assert_relative_eq!(
            meta.cell_bounds(Cell::from_row_col(1, 2)),
            Rect::from_points(Point::new(120.0, 30.0), Point::new(130.0, 20.0))
        );
        assert_eq!(meta.cell_center(Cell::from_row_col(0, 0)), Point::new(105.0, 35.0));
        assert_relative_eq!(
            meta.bounding_box(),
            Rect::from_points(Point::new(100.0, 40.0), Point::new(150.0, 0.0))
        );
        assert_relative_eq!(meta.cell_area(), 100.0);
    }

    #[test]
    fn cell_window_includes_partial_cells() -> Result<()> {
        let meta = georef();
        let window = meta
            .cell_window(&Rect::from_points(Point::new(115.0, 35.0), Point::new(125.0, 15.0)))?
            .expect("overlapping bounds");
        assert_eq!(window.rows, 0..3);
        assert_eq!(window.cols, 1..3);
        assert_eq!(window.cells().count(), 6);

        Ok(())
    }

    #[test]
    fn cell_window_on_cell_edges() -> Result<()> {
        let meta = georef();
        let window = meta
            .cell_window(&Rect::from_points(Point::new(110.0, 30.0), Point::new(130.0, 10.0)))?
            .expect("overlapping bounds");
        assert_eq!(window.rows, 1..3);
        assert_eq!(window.cols, 1..3);

        Ok(())
    }

    #[test]
    fn cell_window_is_clamped_to_the_raster() -> Result<()> {
        let meta = georef();
        let window = meta
            .cell_window(&Rect::from_points(Point::new(0.0, 100.0), Point::new(112.0, 35.0)))?
            .expect("overlapping bounds");
        assert_eq!(window.rows, 0..1);
        assert_eq!(window.cols, 0..2);

        assert!(
            meta.cell_window(&Rect::from_points(Point::new(200.0, 40.0), Point::new(300.0, 0.0)))?
                .is_none()
        );

        Ok(())
    }

    #[test]
    fn window_georeference_shifts_origin() {
        let meta = georef();
        let window = CellWindow { rows: 1..3, cols: 2..5 };
        let sub = meta.window_georeference(&window);

        assert_eq!(sub.raster_size(), RasterSize::with_rows_cols(2, 3));
        assert_eq!(sub.geo_transform().top_left(), Point::new(120.0, 30.0));
        assert_eq!(sub.cell_size(), meta.cell_size());
    }

    #[test]
    fn south_up_raster_window() -> Result<()> {
        let meta = GeoReference::with_top_left(
            "",
            RasterSize::with_rows_cols(4, 4),
            Point::new(0.0, 0.0),
            CellSize::new(1.0, 1.0),
            None,
        );

        let window = meta
            .cell_window(&Rect::from_points(Point::new(0.5, 0.5), Point::new(1.5, 2.0)))?
            .expect("overlapping bounds");
        assert_eq!(window.rows, 0..2);
        assert_eq!(window.cols, 0..2);

        Ok(())
    }
}
