use crate::Nodata;

/// Numeric cell types that can be stored in a [`crate::raster::DenseRaster`]
pub trait RasterNum: Nodata + num::NumCast + PartialOrd + std::fmt::Debug + Default + Send + Sync + 'static {
    /// Human readable name of the type, used in diagnostics
    const TYPE_NAME: &'static str;

    /// The value as f64, `None` for nodata
    #[inline]
    fn to_f64_opt(self) -> Option<f64> {
        if self.is_nodata() { None } else { self.to_f64() }
    }

    /// Converts a foreign (f64) nodata value to this type, `None` if it does not fit
    #[inline]
    fn nodata_from_f64(nodata: f64) -> Option<Self> {
        num::NumCast::from(nodata)
    }
}

macro_rules! impl_rasternum {
    ( $t:ty ) => {
        impl RasterNum for $t {
            const TYPE_NAME: &'static str = stringify!($t);
        }
    };
}

impl_rasternum!(u8);
impl_rasternum!(u16);
impl_rasternum!(u32);
impl_rasternum!(i16);
impl_rasternum!(i32);
impl_rasternum!(f32);
impl_rasternum!(f64);
