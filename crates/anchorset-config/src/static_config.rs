//! Bundled static defaults
//!
//! Served when no store is configured, when aggregation fails, and as the
//! per-category fallback for empty tables. Built once and never mutated.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::model::*;

static STATIC_CONFIG: LazyLock<CalculatorConfig> = LazyLock::new(build);

/// The process-wide defaults bundle
pub fn static_config() -> &'static CalculatorConfig {
    &STATIC_CONFIG
}

const GROUP_A_THREADED: &[(&str, f64, f64, f64, f64, f64)] = &[
    ("M6", 8.0, 6.0, 60.0, 0.0, 0.0),
    ("M8", 10.0, 8.0, 80.0, 60.0, 160.0),
    ("M10", 12.0, 10.0, 90.0, 60.0, 200.0),
    ("M12", 14.0, 12.0, 110.0, 70.0, 240.0),
    ("M16", 18.0, 16.0, 125.0, 80.0, 320.0),
    ("M20", 24.0, 20.0, 170.0, 90.0, 400.0),
    ("M24", 28.0, 24.0, 210.0, 96.0, 480.0),
    ("M27", 32.0, 27.0, 240.0, 0.0, 0.0),
    ("M30", 35.0, 30.0, 280.0, 0.0, 0.0),
];

const GROUP_A_REBAR: &[(&str, f64, f64, f64, f64, f64)] = &[
    ("Φ8", 12.0, 8.0, 80.0, 60.0, 160.0),
    ("Φ10", 14.0, 10.0, 90.0, 60.0, 200.0),
    ("Φ12", 16.0, 12.0, 110.0, 70.0, 240.0),
    ("Φ14", 18.0, 14.0, 115.0, 75.0, 280.0),
    ("Φ16", 20.0, 16.0, 125.0, 80.0, 320.0),
    ("Φ20", 24.0, 20.0, 170.0, 90.0, 400.0),
    ("Φ25", 32.0, 25.0, 210.0, 100.0, 500.0),
    ("Φ28", 35.0, 28.0, 250.0, 112.0, 560.0),
    ("Φ32", 40.0, 32.0, 280.0, 128.0, 640.0),
];

const GROUP_B_THREADED: &[(&str, f64, f64, f64)] = &[
    ("M6", 8.0, 6.0, 60.0),
    ("M8", 10.0, 8.0, 80.0),
    ("M10", 12.0, 10.0, 90.0),
    ("M12", 14.0, 12.0, 110.0),
    ("M16", 18.0, 16.0, 125.0),
    ("M20", 22.0, 20.0, 170.0),
    ("M24", 28.0, 24.0, 210.0),
    ("M27", 30.0, 27.0, 240.0),
    ("M30", 35.0, 30.0, 280.0),
    ("M33", 38.0, 33.0, 320.0),
    ("M36", 42.0, 36.0, 350.0),
    ("M39", 45.0, 39.0, 380.0),
    ("M42", 52.0, 42.0, 420.0),
    ("M48", 60.0, 48.0, 480.0),
];

const GROUP_B_REBAR: &[(&str, f64, f64, f64)] = &[
    ("Φ8", 12.0, 8.0, 80.0),
    ("Φ10", 14.0, 10.0, 90.0),
    ("Φ12", 16.0, 12.0, 110.0),
    ("Φ14", 18.0, 14.0, 115.0),
    ("Φ16", 20.0, 16.0, 125.0),
    ("Φ18", 22.0, 18.0, 150.0),
    ("Φ20", 25.0, 20.0, 170.0),
    ("Φ24", 32.0, 24.0, 205.0),
    ("Φ25", 32.0, 25.0, 210.0),
    ("Φ28", 35.0, 28.0, 250.0),
    ("Φ30", 37.0, 30.0, 270.0),
    ("Φ32", 40.0, 32.0, 330.0),
    ("Φ36", 45.0, 36.0, 360.0),
    ("Φ40", 50.0, 40.0, 390.0),
];

/// Products whose ETA covers their whole group catalog
const ETA_FULL_COVERAGE: &[&str] = &["PE", "PESF", "EASF", "EP1000"];

fn bounded_anchors(rows: &[(&str, f64, f64, f64, f64, f64)]) -> Vec<Anchor> {
    rows.iter()
        .map(|&(id, d0, da, hef, hmin, hmax)| Anchor {
            id: id.to_string(),
            d0,
            hef,
            da: Some(da),
            hmin: Some(hmin),
            hmax: Some(hmax),
            active: None,
        })
        .collect()
}

fn plain_anchors(rows: &[(&str, f64, f64, f64)]) -> Vec<Anchor> {
    rows.iter()
        .map(|&(id, d0, da, hef)| Anchor {
            id: id.to_string(),
            d0,
            hef,
            da: Some(da),
            hmin: None,
            hmax: None,
            active: None,
        })
        .collect()
}

fn cartridges(rows: &[(i32, f64)]) -> Vec<Cartridge> {
    rows.iter()
        .map(|&(nominal, net)| Cartridge { nominal, net })
        .collect()
}

fn product(code: &str, display_name: &str, group: &str, eta_approved: bool) -> Product {
    Product {
        code: code.to_string(),
        display_name: display_name.to_string(),
        group: group.to_string(),
        eta_approved,
    }
}

fn constant(value: f64, description: &str) -> FormulaConstant {
    FormulaConstant {
        value,
        description: description.to_string(),
    }
}

fn enable_all(anchors: &[Anchor]) -> BTreeMap<String, bool> {
    anchors.iter().map(|a| (a.id.clone(), true)).collect()
}

fn build() -> CalculatorConfig {
    let products = vec![
        product("PE", "F.1311 (PE)", "A", true),
        product("PESF", "F.1311 (PESF)", "A", true),
        product("VE", "F.1511 (VE)", "A", false),
        product("VESF", "F.1511 (VESF)", "A", false),
        product("EASF", "F.1711 (VINIL PLUS)", "A", true),
        product("EP100", "F.1911 (MT103)", "B", false),
        product("EP1000", "F.2111 (MT1003)", "B", true),
    ];

    let mut groups = BTreeMap::new();
    groups.insert(
        "A".to_string(),
        GroupConfig {
            anchors: GroupAnchors {
                threaded: bounded_anchors(GROUP_A_THREADED),
                rebar: bounded_anchors(GROUP_A_REBAR),
            },
            cartridges: cartridges(&[(165, 148.5), (300, 270.0), (345, 310.5), (410, 369.0)]),
        },
    );
    groups.insert(
        "B".to_string(),
        GroupConfig {
            anchors: GroupAnchors {
                threaded: plain_anchors(GROUP_B_THREADED),
                rebar: plain_anchors(GROUP_B_REBAR),
            },
            cartridges: cartridges(&[(385, 346.5), (585, 526.5)]),
        },
    );

    let constants = BTreeMap::from([
        (
            "circular_area_factor".to_string(),
            constant(
                0.25,
                "Area factor applied to π·d² to obtain hole cross-section.",
            ),
        ),
        (
            "ml_conversion".to_string(),
            constant(0.001, "Conversion from mm³ to ml."),
        ),
        (
            "fill_ratio".to_string(),
            constant(
                0.6666667,
                "Fill ratio representing resin occupation of the hole (2/3).",
            ),
        ),
    ]);

    let usage_factors = vec![
        UsageFactor {
            code: "standard".to_string(),
            label_tr: "Standart".to_string(),
            label_en: "Standard".to_string(),
            percentage: 1.0,
            sort_order: 1,
            is_default: true,
        },
        UsageFactor {
            code: "optimized".to_string(),
            label_tr: "Optimize".to_string(),
            label_en: "Optimized".to_string(),
            percentage: 1.2,
            sort_order: 2,
            is_default: false,
        },
    ];

    let eta_assignments = products
        .iter()
        .map(|p| {
            let assignments = match groups.get(&p.group) {
                Some(group) if ETA_FULL_COVERAGE.contains(&p.code.as_str()) => EtaAssignments {
                    threaded: enable_all(&group.anchors.threaded),
                    rebar: enable_all(&group.anchors.rebar),
                },
                _ => EtaAssignments::default(),
            };
            (p.code.clone(), assignments)
        })
        .collect();

    CalculatorConfig {
        products,
        groups,
        constants,
        usage_factors,
        eta_assignments,
        theme: Theme {
            brand_color: "#8CCE41".to_string(),
            page_background: "#f5f9fc".to_string(),
            card_background: "#ffffff".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_products_and_groups() {
        let config = static_config();
        assert_eq!(config.products.len(), 7);
        assert_eq!(config.groups.len(), 2);

        let group_a = &config.groups["A"];
        assert_eq!(group_a.anchors.threaded.len(), 9);
        assert_eq!(group_a.anchors.rebar.len(), 9);
        assert_eq!(group_a.cartridges.len(), 4);

        let group_b = &config.groups["B"];
        assert_eq!(group_b.anchors.threaded.len(), 14);
        assert_eq!(group_b.anchors.rebar.len(), 14);
        assert!(group_b.anchors.threaded.iter().all(|a| a.hmin.is_none()));
    }

    #[test]
    fn test_bundle_every_product_references_a_group() {
        let config = static_config();
        for product in &config.products {
            assert!(config.groups.contains_key(&product.group), "{}", product.code);
        }
    }

    #[test]
    fn test_bundle_eta_assignments() {
        let config = static_config();
        assert_eq!(config.eta_assignments.len(), config.products.len());

        let pe = &config.eta_assignments["PE"];
        assert_eq!(pe.threaded.len(), 9);
        assert_eq!(pe.rebar.get("Φ32"), Some(&true));

        assert!(config.eta_assignments["VE"].threaded.is_empty());
        assert!(config.eta_assignments["EP100"].rebar.is_empty());
        assert_eq!(config.eta_assignments["EP1000"].threaded.get("M48"), Some(&true));
    }

    #[test]
    fn test_bundle_single_default_usage_factor() {
        let defaults = static_config()
            .usage_factors
            .iter()
            .filter(|f| f.is_default)
            .count();
        assert_eq!(defaults, 1);
    }

    #[test]
    fn test_bundle_is_shared() {
        assert!(std::ptr::eq(static_config(), static_config()));
    }
}
