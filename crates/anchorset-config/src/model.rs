//! Calculator configuration snapshot model
//!
//! Field names serialize in camelCase; the shape is identical whether the
//! content comes from the store or from the bundled defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use anchorset_common::{BarType, ThemeKey};

/// Full configuration snapshot consumed by the calculator client
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorConfig {
    pub products: Vec<Product>,
    pub groups: BTreeMap<String, GroupConfig>,
    pub constants: BTreeMap<String, FormulaConstant>,
    pub usage_factors: Vec<UsageFactor>,
    /// Keyed by product code
    pub eta_assignments: BTreeMap<String, EtaAssignments>,
    pub theme: Theme,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub code: String,
    pub display_name: String,
    pub group: String,
    pub eta_approved: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub anchors: GroupAnchors,
    pub cartridges: Vec<Cartridge>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupAnchors {
    pub threaded: Vec<Anchor>,
    pub rebar: Vec<Anchor>,
}

impl GroupAnchors {
    pub fn by_bar_type_mut(&mut self, bar_type: BarType) -> &mut Vec<Anchor> {
        match bar_type {
            BarType::Threaded => &mut self.threaded,
            BarType::Rebar => &mut self.rebar,
        }
    }
}

/// Anchor dimensions in mm. Optional fields are omitted when unset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: String,
    pub d0: f64,
    pub hef: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub da: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cartridge {
    /// Nominal volume in ml
    pub nominal: i32,
    /// Net resin volume in ml
    pub net: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormulaConstant {
    pub value: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageFactor {
    pub code: String,
    pub label_tr: String,
    pub label_en: String,
    pub percentage: f64,
    pub sort_order: i32,
    pub is_default: bool,
}

/// Per-anchor ETA flags of one product, keyed by anchor id
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtaAssignments {
    pub threaded: BTreeMap<String, bool>,
    pub rebar: BTreeMap<String, bool>,
}

impl EtaAssignments {
    pub fn by_bar_type_mut(&mut self, bar_type: BarType) -> &mut BTreeMap<String, bool> {
        match bar_type {
            BarType::Threaded => &mut self.threaded,
            BarType::Rebar => &mut self.rebar,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub brand_color: String,
    pub page_background: String,
    pub card_background: String,
}

impl Theme {
    pub fn set(&mut self, key: ThemeKey, value: String) {
        match key {
            ThemeKey::BrandColor => self.brand_color = value,
            ThemeKey::PageBackground => self.page_background = value,
            ThemeKey::CardBackground => self.card_background = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_omits_unset_fields() {
        let anchor = Anchor {
            id: "M8".to_string(),
            d0: 10.0,
            hef: 80.0,
            da: None,
            hmin: Some(60.0),
            hmax: None,
            active: None,
        };
        let json = serde_json::to_value(&anchor).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert!(obj.contains_key("hmin"));
        assert!(!obj.contains_key("da"));
        assert!(!obj.contains_key("active"));
    }

    #[test]
    fn test_usage_factor_camel_case() {
        let factor = UsageFactor {
            code: "standard".to_string(),
            label_tr: "Standart".to_string(),
            label_en: "Standard".to_string(),
            percentage: 1.0,
            sort_order: 1,
            is_default: true,
        };
        let json = serde_json::to_value(&factor).unwrap();
        assert_eq!(json["labelTr"], "Standart");
        assert_eq!(json["sortOrder"], 1);
        assert_eq!(json["isDefault"], true);
    }

    #[test]
    fn test_theme_set() {
        let mut theme = Theme {
            brand_color: "#000".to_string(),
            page_background: "#111".to_string(),
            card_background: "#222".to_string(),
        };
        theme.set(ThemeKey::PageBackground, "#fff".to_string());
        assert_eq!(theme.page_background, "#fff");
        assert_eq!(theme.brand_color, "#000");
    }
}
