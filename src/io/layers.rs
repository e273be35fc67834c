//! CAD layer-name classification.
//!
//! Layer names are matched case-insensitively. Contour layers must match one
//! of the three `COURBES_DE_NIVEAU_*` names exactly; talus and building layers
//! match by substring, so `"TOPO_BAS_TALUS_2"` is a LOW talus layer.

use crate::talus::TalusSide;
use crate::trim::CourbeLayer;

/// What a CAD layer holds, as far as trimming is concerned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayerClass {
    Building,
    Talus(TalusSide),
    Courbe(CourbeLayer),
}

const BUILDING_TAGS: [&str; 3] = ["batiment", "bâtiment", "building"];

/// Classifies a layer name, or `None` for layers the pipeline ignores.
pub fn classify_layer(name: &str) -> Option<LayerClass> {
    if let Some(layer) = CourbeLayer::ALL
        .into_iter()
        .find(|l| l.cad_layer_name().eq_ignore_ascii_case(name.trim()))
    {
        return Some(LayerClass::Courbe(layer));
    }

    let lower = name.to_lowercase();
    if lower.contains("bas_talus") {
        Some(LayerClass::Talus(TalusSide::Low))
    } else if lower.contains("haut_talus") {
        Some(LayerClass::Talus(TalusSide::High))
    } else if BUILDING_TAGS.iter().any(|tag| lower.contains(tag)) {
        Some(LayerClass::Building)
    } else {
        None
    }
}
