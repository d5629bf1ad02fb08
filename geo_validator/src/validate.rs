use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use serde_json::{Map, Value};
use tracing::info;

use crate::{
    error::GeoError,
    geometry::BBox,
    layer::Layer,
    load::{Feature, canonical_id, load_feature_collection},
    report::{Problem, ValidationReport},
};

/// Features of all three layers, in file order.
#[derive(Debug, Clone, Default)]
pub struct Layers {
    pub city: Vec<Feature>,
    pub micro_markets: Vec<Feature>,
    pub localities: Vec<Feature>,
}

impl Layers {
    pub fn features(&self, layer: Layer) -> &[Feature] {
        match layer {
            Layer::City => &self.city,
            Layer::MicroMarkets => &self.micro_markets,
            Layer::Localities => &self.localities,
        }
    }

    fn features_mut(&mut self, layer: Layer) -> &mut Vec<Feature> {
        match layer {
            Layer::City => &mut self.city,
            Layer::MicroMarkets => &mut self.micro_markets,
            Layer::Localities => &mut self.localities,
        }
    }
}

/// A feature that carries every required property.
struct Checked<'a> {
    id: String,
    props: &'a Map<String, Value>,
    bbox: Option<BBox>,
}

/// Load the three layers from `root` and validate them.
///
/// Missing files are all collected before failing, so one run names every
/// absent layer.
pub fn validate_dir(root: &Path) -> Result<ValidationReport, GeoError> {
    let missing: Vec<String> = Layer::ALL
        .iter()
        .filter(|l| !root.join(l.file_name()).is_file())
        .map(|l| l.file_name().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(GeoError::MissingFiles(missing));
    }

    let mut layers = Layers::default();
    for layer in Layer::ALL {
        let feats = load_feature_collection(&root.join(layer.file_name()))?;
        info!(layer = %layer, features = feats.len(), "loaded layer");
        *layers.features_mut(layer) = feats;
    }

    let report = validate_layers(&layers);
    info!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );
    Ok(report)
}

/// Run every per-layer and cross-layer check over already-loaded layers.
pub fn validate_layers(layers: &Layers) -> ValidationReport {
    let mut report = ValidationReport::default();

    let city = check_layer(Layer::City, layers.features(Layer::City), &mut report);
    let micro_markets = check_layer(Layer::MicroMarkets, layers.features(Layer::MicroMarkets), &mut report);
    let localities = check_layer(Layer::Localities, layers.features(Layer::Localities), &mut report);

    let city_bbox = city.iter().find_map(|c| c.bbox);
    let mm_bboxes: HashMap<&str, Option<BBox>> =
        micro_markets.iter().map(|m| (m.id.as_str(), m.bbox)).collect();

    for loc in &localities {
        let mm_id = loc
            .props
            .get("MicroMarketID")
            .map(canonical_id)
            .unwrap_or_default();

        let Some(mm_bbox) = mm_bboxes.get(mm_id.as_str()) else {
            report.errors.push(Problem::UnknownMicroMarket {
                locality: loc.id.clone(),
                micro_market: mm_id,
            });
            continue;
        };

        let Some(center) = loc.bbox.map(|b| b.center()) else {
            continue;
        };
        if let Some(cb) = city_bbox {
            if !cb.contains(center) {
                report.warnings.push(Problem::OutsideCity {
                    locality: loc.id.clone(),
                });
            }
        }
        if let Some(mb) = mm_bbox {
            if !mb.contains(center) {
                report.warnings.push(Problem::OutsideMicroMarket {
                    locality: loc.id.clone(),
                    micro_market: mm_id,
                });
            }
        }
    }

    report
}

/// Required-property, uniqueness and coordinate-range checks for one layer.
///
/// Returns the features that carry every required property; a feature missing
/// any of them is reported and never enters the uniqueness set.
fn check_layer<'a>(layer: Layer, features: &'a [Feature], report: &mut ValidationReport) -> Vec<Checked<'a>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(features.len());

    for (index, feat) in features.iter().enumerate() {
        let empty = Map::new();
        let props = feat.props();
        let missing: Vec<&'static str> = layer
            .required_props()
            .iter()
            .copied()
            .filter(|p| !props.unwrap_or(&empty).contains_key(*p))
            .collect();
        let Some(props) = props.filter(|_| missing.is_empty()) else {
            report.errors.push(Problem::MissingProps { layer, index, missing });
            continue;
        };

        let id = canonical_id(&props[layer.id_prop()]);
        if !seen.insert(id.clone()) {
            report.errors.push(Problem::DuplicateId { layer, id: id.clone() });
        }

        let bbox = feat.bbox();
        if let Some(b) = bbox {
            if !b.is_wgs84() {
                report.warnings.push(Problem::OutOfRange { layer, index, bbox: b });
            }
        }

        out.push(Checked { id, props, bbox });
    }

    out
}
