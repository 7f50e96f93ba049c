use num::ToPrimitive;

/// Trait for types that can represent a no-data value in raster data.
/// Floating point types use NaN as the no-data value, integer types use their maximum value for unsigned types
/// and minimum value for signed types.
pub trait Nodata: ToPrimitive + PartialEq + Sized + Copy {
    const NODATA: Self;

    #[inline]
    fn is_nodata(self) -> bool {
        self == Self::NODATA
    }

    /// For importing foreign data that may contain nodata values not adhering to the predefined `Self::NODATA` value.
    #[inline]
    fn init_nodata(&mut self, nodata: Self) {
        if *self == nodata {
            *self = Self::NODATA;
        }
    }

    /// For exporting the data to a format where the nodata value does not match the predefined `Self::NODATA` value.
    #[inline]
    fn restore_nodata(&mut self, nodata: Self) {
        if self.is_nodata() {
            *self = nodata;
        }
    }
}

macro_rules! impl_nodata_fixed_point {
    ( $t:ident, $nodata:ident ) => {
        impl Nodata for $t {
            const NODATA: $t = $t::$nodata;
        }
    };
}

macro_rules! impl_nodata_floating_point {
    ( $t:ident ) => {
        impl Nodata for $t {
            const NODATA: $t = $t::NAN;

            #[inline]
            fn is_nodata(self) -> bool {
                self.is_nan()
            }
        }
    };
}

impl_nodata_fixed_point!(u8, MAX);
impl_nodata_fixed_point!(u16, MAX);
impl_nodata_fixed_point!(u32, MAX);
impl_nodata_fixed_point!(i16, MIN);
impl_nodata_fixed_point!(i32, MIN);

impl_nodata_floating_point!(f32);
impl_nodata_floating_point!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_nodata_roundtrip() {
        let mut val = -9999.0_f64;
        val.init_nodata(-9999.0);
        assert!(val.is_nodata());
        val.restore_nodata(-9999.0);
        assert_eq!(val, -9999.0);

        let mut byte = 0_u8;
        byte.init_nodata(0);
        assert_eq!(byte, u8::MAX);
        assert!(byte.is_nodata());
    }

    #[test]
    fn valid_values_are_untouched() {
        let mut val = 0.25_f32;
        val.init_nodata(-1.0);
        assert!(!val.is_nodata());
        val.restore_nodata(-1.0);
        assert_eq!(val, 0.25);
    }
}
