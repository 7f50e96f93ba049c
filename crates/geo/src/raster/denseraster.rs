use crate::{Cell, Error, GeoReference, Nodata, RasterNum, RasterSize, Result};

/// A raster with all of its cells stored in memory in row-major order.
/// Nodata cells contain the `T::NODATA` sentinel, the nodata value from the metadata
/// is only used when the raster is exported.
#[derive(Clone, Debug)]
pub struct DenseRaster<T: RasterNum> {
    metadata: GeoReference,
    data: Vec<T>,
}

impl<T: RasterNum> DenseRaster<T> {
    /// Creates a raster from data that already uses the internal nodata sentinel
    pub fn new(metadata: GeoReference, data: Vec<T>) -> Result<Self> {
        let expected = metadata.raster_size().cell_count();
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(DenseRaster { metadata, data })
    }

    /// For algorithms that produce exactly one value per cell of the metadata
    pub(crate) fn from_parts(metadata: GeoReference, data: Vec<T>) -> Self {
        debug_assert_eq!(metadata.raster_size().cell_count(), data.len());
        DenseRaster { metadata, data }
    }

    /// Creates a raster from foreign data, cells matching the nodata value of the metadata are converted to `T::NODATA`
    pub fn from_foreign_data(metadata: GeoReference, mut data: Vec<T>) -> Result<Self> {
        if let Some(nodata) = metadata.nodata().and_then(T::nodata_from_f64) {
            data.iter_mut().for_each(|v| v.init_nodata(nodata));
        }

        DenseRaster::new(metadata, data)
    }

    pub fn filled_with(metadata: GeoReference, val: T) -> Self {
        let data = vec![val; metadata.raster_size().cell_count()];
        DenseRaster { metadata, data }
    }

    pub fn filled_with_nodata(metadata: GeoReference) -> Self {
        Self::filled_with(metadata, T::NODATA)
    }

    pub fn metadata(&self) -> &GeoReference {
        &self.metadata
    }

    pub fn raster_size(&self) -> RasterSize {
        self.metadata.raster_size()
    }

    pub fn rows(&self) -> usize {
        self.metadata.rows()
    }

    pub fn columns(&self) -> usize {
        self.metadata.columns()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// The value of the cell, `None` for nodata or cells outside of the raster
    pub fn cell_value(&self, cell: Cell) -> Option<T> {
        if !self.metadata.is_cell_on_map(cell) {
            return None;
        }

        let val = self.data[cell.index(self.columns())];
        if val.is_nodata() { None } else { Some(val) }
    }

    pub fn set_cell_value(&mut self, cell: Cell, val: Option<T>) {
        if self.metadata.is_cell_on_map(cell) {
            let index = cell.index(self.columns());
            self.data[index] = val.unwrap_or(T::NODATA);
        }
    }

    pub fn nodata_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_nodata()).count()
    }

    /// The cell values with the nodata sentinel replaced by the nodata value of the metadata
    pub fn to_foreign_data(&self) -> Vec<T> {
        let mut data = self.data.clone();
        if let Some(nodata) = self.metadata.nodata().and_then(T::nodata_from_f64) {
            data.iter_mut().for_each(|v| v.restore_nodata(nodata));
        }

        data
    }

    pub fn into_raw_parts(self) -> (GeoReference, Vec<T>) {
        (self.metadata, self.data)
    }
}

impl<T: RasterNum> PartialEq for DenseRaster<T> {
    /// Nodata cells compare equal to each other
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata
            && self.data.len() == other.data.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&lhs, &rhs)| (lhs.is_nodata() && rhs.is_nodata()) || lhs == rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{NOD, georef, raster_from_values};

    #[test]
    fn size_mismatch_is_rejected() {
        let err = DenseRaster::<f64>::new(georef(2, 2, None), vec![1.0; 3]).expect_err("size mismatch");
        assert!(matches!(err, Error::SizeMismatch { expected: 4, actual: 3 }));
    }

    #[test]
    fn foreign_nodata_is_converted() -> Result<()> {
        let ras = DenseRaster::<i32>::from_foreign_data(georef(1, 3, Some(-1.0)), vec![1, -1, 3])?;
        assert_eq!(ras.cell_value(Cell::from_row_col(0, 0)), Some(1));
        assert_eq!(ras.cell_value(Cell::from_row_col(0, 1)), None);
        assert_eq!(ras.nodata_count(), 1);
        assert_eq!(ras.to_foreign_data(), vec![1, -1, 3]);

        Ok(())
    }

    #[test]
    fn nodata_cells_compare_equal() {
        let r1 = raster_from_values::<f32>(georef(1, 2, Some(NOD)), &[NOD, 1.0]);
        let r2 = raster_from_values::<f32>(georef(1, 2, Some(NOD)), &[NOD, 1.0]);
        assert_eq!(r1, r2);
    }

    #[test]
    fn cells_outside_the_raster() {
        let mut ras = DenseRaster::filled_with(georef(2, 2, None), 4_u8);
        assert_eq!(ras.cell_value(Cell::from_row_col(2, 0)), None);
        ras.set_cell_value(Cell::from_row_col(5, 5), Some(1));
        ras.set_cell_value(Cell::from_row_col(1, 1), None);
        assert_eq!(ras.as_slice(), &[4, 4, 4, u8::NODATA]);
    }
}
