//! Species candidate lists and selection.

use agro_core::{Climate, FarmParameters, Soil, SpeciesKind, SpeciesRecommendation};

/// Most species recommended per kind.
pub const MAX_SPECIES: usize = 6;

/// Intercropping patterns suggested with every plan.
pub const PATTERNS: [&str; 4] = [
    "Intercropping (trees + legumes)",
    "Alley cropping (trees alleys + cereals)",
    "Relay cropping (staggered sowing)",
    "Sequential double/triple cropping",
];

/// Tree options offered by editors before any plan exists.
pub const FALLBACK_TREES: [&str; 3] = ["Neem", "Tamarind", "Mango"];
/// Crop options offered by editors before any plan exists.
pub const FALLBACK_CROPS: [&str; 3] = ["Millet", "Pulses", "Turmeric"];

/// Trees suited to a soil, in preference order.
pub fn tree_candidates(soil: Soil) -> &'static [&'static str] {
    match soil {
        Soil::Loam => &["Neem", "Tamarind", "Mango", "Guava", "Jackfruit", "Teak"],
        Soil::Clay => &["Eucalyptus", "Neem", "Mahogany", "Teak", "Subabul", "Jamun"],
        Soil::Sandy => &["Casuarina", "Acacia", "Date Palm", "Sisal", "Babool", "Drumstick"],
    }
}

/// Crops suited to a climate, in preference order.
pub fn crop_candidates(climate: Climate) -> &'static [&'static str] {
    match climate {
        Climate::Tropical => &[
            "Turmeric",
            "Banana",
            "Pigeon Pea",
            "Millet",
            "Okra",
            "Papaya",
            "Sweet Potato",
        ],
        Climate::Arid => &[
            "Millet",
            "Sesame",
            "Pulses",
            "Pearl Millet",
            "Cluster Bean",
            "Groundnut",
        ],
        Climate::Temperate => &["Wheat", "Mustard", "Chickpea", "Barley", "Potato", "Lentil"],
        Climate::Moderate => &["Maize", "Soybean", "Sunflower", "Green Gram", "Cabbage", "Spinach"],
    }
}

fn take(names: &[&str]) -> Vec<String> {
    names.iter().take(MAX_SPECIES).map(|s| s.to_string()).collect()
}

/// Species mix for the plot. Rainfall is not consulted.
pub fn recommend_species(params: &FarmParameters) -> SpeciesRecommendation {
    SpeciesRecommendation {
        trees: take(tree_candidates(params.soil)),
        crops: take(crop_candidates(params.climate)),
        patterns: PATTERNS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Species an editor should offer for `kind`: the recommendation when it
/// has any, otherwise the fallback list.
pub fn editor_options(rec: &SpeciesRecommendation, kind: SpeciesKind) -> Vec<String> {
    let listed = rec.species(kind);
    if !listed.is_empty() {
        return listed.to_vec();
    }
    let fallback: &[&str] = match kind {
        SpeciesKind::Tree => &FALLBACK_TREES,
        SpeciesKind::Crop => &FALLBACK_CROPS,
    };
    fallback.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_core::{Investment, Rainfall};

    fn params(soil: Soil, climate: Climate) -> FarmParameters {
        FarmParameters {
            area: 1.0,
            soil,
            rainfall: Rainfall::Moderate,
            climate,
            investment: Investment::Medium,
        }
    }

    #[test]
    fn lists_are_prefixes_of_candidates() {
        for soil in Soil::ALL {
            for climate in Climate::ALL {
                let rec = recommend_species(&params(soil, climate));
                let trees = tree_candidates(soil);
                let crops = crop_candidates(climate);
                assert!(rec.trees.len() <= MAX_SPECIES);
                assert!(rec.crops.len() <= MAX_SPECIES);
                assert!(rec.trees.iter().zip(trees).all(|(a, b)| a == b));
                assert!(rec.crops.iter().zip(crops).all(|(a, b)| a == b));
                assert_eq!(rec.patterns.len(), 4);
            }
        }
    }

    #[test]
    fn tropical_is_truncated_to_six() {
        let rec = recommend_species(&params(Soil::Loam, Climate::Tropical));
        assert_eq!(rec.crops.len(), 6);
        assert_eq!(rec.crops.last().map(String::as_str), Some("Papaya"));
        assert_eq!(rec.trees[0], "Neem");
    }

    #[test]
    fn rainfall_does_not_change_species() {
        let mut p = params(Soil::Clay, Climate::Arid);
        let a = recommend_species(&p);
        p.rainfall = Rainfall::High;
        assert_eq!(recommend_species(&p), a);
    }

    #[test]
    fn editor_options_fall_back() {
        let empty = SpeciesRecommendation::default();
        assert_eq!(editor_options(&empty, SpeciesKind::Tree), FALLBACK_TREES);
        assert_eq!(editor_options(&empty, SpeciesKind::Crop)[0], "Millet");
        let rec = recommend_species(&params(Soil::Sandy, Climate::Temperate));
        assert_eq!(editor_options(&rec, SpeciesKind::Tree)[0], "Casuarina");
        assert_eq!(editor_options(&rec, SpeciesKind::Crop)[0], "Wheat");
    }
}
