//! Spatial reference handling and coordinate transformation of polygons between projections.

use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use geo_types::{Coord, LineString, MultiPolygon, Polygon};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialReference {
    srs: SpatialRef,
}

impl SpatialReference {
    /// Accepts any definition understood by GDAL: WKT, `EPSG:<code>`, proj strings
    pub fn from_definition(def: &str) -> Result<Self> {
        if def.is_empty() {
            return Err(Error::InvalidArgument("Empty projection string".into()));
        }

        let mut srs = SpatialRef::from_definition(def)?;
        srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
        Ok(SpatialReference { srs })
    }

    pub fn from_epsg(epsg: u32) -> Result<Self> {
        let mut srs = SpatialRef::from_epsg(epsg)?;
        srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
        Ok(SpatialReference { srs })
    }

    pub fn to_wkt(&self) -> Result<String> {
        Ok(self.srs.to_wkt()?)
    }

    pub fn srs(&self) -> &SpatialRef {
        &self.srs
    }
}

pub struct CoordinateTransformer {
    transformer: CoordTransform,
}

impl CoordinateTransformer {
    pub fn new(source_srs: &SpatialReference, target_srs: &SpatialReference) -> Result<Self> {
        Ok(CoordinateTransformer {
            transformer: CoordTransform::new(source_srs.srs(), target_srs.srs())?,
        })
    }

    pub fn transform_ring(&self, ring: &LineString<f64>) -> Result<LineString<f64>> {
        let mut xs: Vec<f64> = ring.coords().map(|c| c.x).collect();
        let mut ys: Vec<f64> = ring.coords().map(|c| c.y).collect();
        self.transformer.transform_coords(&mut xs, &mut ys, &mut [])?;

        Ok(LineString::new(xs.into_iter().zip(ys).map(|(x, y)| Coord { x, y }).collect()))
    }

    pub fn transform_polygon(&self, poly: &Polygon<f64>) -> Result<Polygon<f64>> {
        let interiors = poly
            .interiors()
            .iter()
            .map(|ring| self.transform_ring(ring))
            .collect::<Result<Vec<_>>>()?;

        Ok(Polygon::new(self.transform_ring(poly.exterior())?, interiors))
    }

    pub fn transform_multi_polygon(&self, multi: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        Ok(MultiPolygon::new(
            multi.iter().map(|poly| self.transform_polygon(poly)).collect::<Result<Vec<_>>>()?,
        ))
    }
}

/// Expresses the polygons in the `target` projection.
/// The polygons are returned unchanged when both projections describe the same reference system.
pub fn reproject_multi_polygon(polygons: MultiPolygon<f64>, source: &str, target: &str) -> Result<MultiPolygon<f64>> {
    let source_srs = SpatialReference::from_definition(source)?;
    let target_srs = SpatialReference::from_definition(target)?;
    if source_srs == target_srs {
        return Ok(polygons);
    }

    log::info!("Reprojecting {} polygons to the raster projection", polygons.0.len());
    CoordinateTransformer::new(&source_srs, &target_srs)?.transform_multi_polygon(&polygons)
}
