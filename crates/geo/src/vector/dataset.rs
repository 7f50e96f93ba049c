use geo_types::Geometry;

/// A single feature: geometry with an ordered set of numeric attributes
#[derive(Clone, Debug, PartialEq)]
pub struct VectorFeature {
    /// Feature id as reported by the data source
    pub id: Option<u64>,
    pub geometry: Geometry<f64>,
    /// Attribute values in field order, `None` represents a null value
    pub attributes: Vec<(String, Option<f64>)>,
}

impl VectorFeature {
    pub fn new(id: Option<u64>, geometry: Geometry<f64>) -> Self {
        VectorFeature {
            id,
            geometry,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Option<f64>) -> Self {
        self.attributes.push((name.into(), value));
        self
    }

    /// Value of the named attribute, `None` when the attribute is missing or null
    pub fn attribute(&self, name: &str) -> Option<f64> {
        self.attributes
            .iter()
            .find(|(field, _)| field == name)
            .and_then(|(_, value)| *value)
    }
}

/// In-memory vector dataset with a single layer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorDataset {
    /// Projection as WKT, empty when unknown
    pub projection: String,
    pub features: Vec<VectorFeature>,
}

impl VectorDataset {
    pub fn new(projection: impl Into<String>, features: Vec<VectorFeature>) -> Self {
        VectorDataset {
            projection: projection.into(),
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VectorFeature> {
        self.features.iter()
    }

    /// Names of the attribute fields, in the order of the first feature
    pub fn field_names(&self) -> Vec<&str> {
        self.features
            .first()
            .map(|feature| feature.attributes.iter().map(|(name, _)| name.as_str()).collect())
            .unwrap_or_default()
    }
}
