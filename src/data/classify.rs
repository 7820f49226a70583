use super::model::ServiceCategory;

// ---------------------------------------------------------------------------
// Service label → generalized category
// ---------------------------------------------------------------------------

const HUMAN_HAPPINESS: &[&str] = &[
    "Aesthetic information",
    "Opportunities for recreation and tourism",
    "Recreation",
    "Inspiration for culture, art and design",
    "Spiritual experience",
    "Information for cognitive development",
    "Existence, bequest values",
];

const FOOD_AND_WATER: &[&str] = &[
    "Food",
    "Water",
    "Pollination",
    "Regulation of water flows",
    "Maintenance of soil fertility",
    "Biological control",
];

const HEALTH: &[&str] = &[
    "Medicinal resources",
    "Air quality regulation",
    "Waste treatment",
    "Maintenance of genetic diversity",
];

const WEATHER_PROTECTION: &[&str] = &[
    "Climate regulation",
    "Moderation of extreme events",
    "Erosion prevention",
];

const ECONOMIC_AND_ENERGY: &[&str] = &[
    "Raw materials",
    "Genetic resources",
    "Ornamental resources",
];

/// Membership lists in match order. A label listed twice resolves to the
/// first category here.
const MEMBERSHIP: [(ServiceCategory, &[&str]); 5] = [
    (ServiceCategory::HumanHappiness, HUMAN_HAPPINESS),
    (ServiceCategory::FoodAndWater, FOOD_AND_WATER),
    (ServiceCategory::Health, HEALTH),
    (ServiceCategory::WeatherProtection, WEATHER_PROTECTION),
    (ServiceCategory::EconomicAndEnergy, ECONOMIC_AND_ENERGY),
];

/// Classify a raw ecosystem-service label. Total: unknown labels are `Other`.
pub fn classify(label: &str) -> ServiceCategory {
    let label = label.trim();
    MEMBERSHIP
        .iter()
        .find(|(_, members)| members.iter().any(|m| m.eq_ignore_ascii_case(label)))
        .map(|&(category, _)| category)
        .unwrap_or(ServiceCategory::Other)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn pollination_is_food_and_water() {
        assert_eq!(classify("Pollination"), ServiceCategory::FoodAndWater);
    }

    #[test]
    fn matching_ignores_case_and_padding() {
        assert_eq!(classify("  climate REGULATION "), ServiceCategory::WeatherProtection);
    }

    #[test]
    fn unknown_labels_fall_through_to_other() {
        assert_eq!(classify("Maintenance of life cycles"), ServiceCategory::Other);
        assert_eq!(classify(""), ServiceCategory::Other);
        assert_eq!(classify("🦀"), ServiceCategory::Other);
    }

    #[test]
    fn every_category_is_reachable() {
        let reached: BTreeSet<ServiceCategory> = [
            "Recreation",
            "Food",
            "Waste treatment",
            "Erosion prevention",
            "Raw materials",
            "Something else",
        ]
        .iter()
        .map(|l| classify(l))
        .collect();
        assert_eq!(reached.len(), ServiceCategory::ALL.len());
    }

    #[test]
    fn classification_is_deterministic() {
        for (_, members) in MEMBERSHIP {
            for label in members {
                assert_eq!(classify(label), classify(label));
            }
        }
    }

    #[test]
    fn membership_lists_are_disjoint() {
        let mut seen = BTreeSet::new();
        for (_, members) in MEMBERSHIP {
            for label in members {
                assert!(seen.insert(label.to_ascii_lowercase()), "{label} listed twice");
            }
        }
    }
}
