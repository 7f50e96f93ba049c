//! Serialization of [`VectorDataset`] to GeoJSON feature collections.
//! Only polygonal geometries are supported.

use std::{io::Write, path::Path};

use geo_types::{Geometry, LineString, Polygon};
use serde_json::{Map, Value, json};

use crate::{
    Error, Result,
    vector::{VectorDataset, geometry},
};

pub fn to_geojson(dataset: &VectorDataset) -> Result<Value> {
    let features = dataset
        .iter()
        .map(|feature| -> Result<Value> {
            let properties: Map<String, Value> = feature
                .attributes
                .iter()
                .map(|(name, value)| (name.clone(), number_or_null(*value)))
                .collect();

            let mut obj = json!({
                "type": "Feature",
                "geometry": geometry_to_json(&feature.geometry)?,
                "properties": properties,
            });

            if let (Some(id), Value::Object(map)) = (feature.id, &mut obj) {
                map.insert("id".to_string(), json!(id));
            }

            Ok(obj)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}

pub fn write_geojson(dataset: &VectorDataset, writer: impl Write) -> Result<()> {
    serde_json::to_writer(writer, &to_geojson(dataset)?)?;
    Ok(())
}

pub fn write_geojson_file(dataset: &VectorDataset, path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    let mut writer = std::io::BufWriter::new(file);
    write_geojson(dataset, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn number_or_null(value: Option<f64>) -> Value {
    value
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

fn geometry_to_json(geom: &Geometry<f64>) -> Result<Value> {
    match geom {
        Geometry::Polygon(poly) => Ok(json!({
            "type": "Polygon",
            "coordinates": polygon_coordinates(poly),
        })),
        Geometry::MultiPolygon(multi) => Ok(json!({
            "type": "MultiPolygon",
            "coordinates": multi.iter().map(polygon_coordinates).collect::<Vec<_>>(),
        })),
        other => match geometry::polygons(other) {
            Some(multi) => geometry_to_json(&Geometry::MultiPolygon(multi)),
            None => Err(Error::InvalidArgument("Only polygonal geometries can be written as GeoJSON".into())),
        },
    }
}

fn polygon_coordinates(poly: &Polygon<f64>) -> Vec<Vec<[f64; 2]>> {
    std::iter::once(poly.exterior())
        .chain(poly.interiors().iter())
        .map(ring_coordinates)
        .collect()
}

fn ring_coordinates(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}
