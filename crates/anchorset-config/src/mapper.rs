//! Row mappers
//!
//! Each mapper turns the ordered rows of one category into the nested shape
//! the snapshot uses. What happens when a category has no rows is declared
//! once, in [`Category::fallback_policy`].

use std::collections::BTreeMap;

use tracing::debug;

use anchorset_common::{BarType, ThemeKey};
use anchorset_persistence::{
    AnchorRow, CartridgeRow, ConstantRow, EtaRow, ProductRow, ThemeRow, UsageFactorRow,
};

use crate::model::*;
use crate::static_config::static_config;

/// Top-level categories of the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Products,
    Groups,
    Constants,
    UsageFactors,
    EtaAssignments,
    Theme,
}

/// How stored rows combine with the bundled defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Stored content is used as is, even when empty
    Verbatim,
    /// No rows means the bundled category replaces the result entirely
    WholeCategory,
    /// Stored keys overwrite a copy of the bundled value one by one
    PerKeyMerge,
}

impl Category {
    pub const fn fallback_policy(self) -> FallbackPolicy {
        match self {
            Category::Products | Category::Groups => FallbackPolicy::Verbatim,
            Category::Constants | Category::UsageFactors | Category::EtaAssignments => {
                FallbackPolicy::WholeCategory
            }
            Category::Theme => FallbackPolicy::PerKeyMerge,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Products => "products",
            Category::Groups => "groups",
            Category::Constants => "constants",
            Category::UsageFactors => "usageFactors",
            Category::EtaAssignments => "etaAssignments",
            Category::Theme => "theme",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verbatim categories have no bundled fallback; the stored rows are the answer.
fn verbatim<T>(category: Category, build: impl FnOnce() -> T) -> T {
    debug_assert_eq!(category.fallback_policy(), FallbackPolicy::Verbatim);
    build()
}

/// Apply the category's policy: `build` maps the stored rows, `fallback`
/// yields the bundled value.
fn resolve<T>(
    category: Category,
    rows_empty: bool,
    build: impl FnOnce() -> T,
    fallback: impl FnOnce() -> T,
) -> T {
    match category.fallback_policy() {
        FallbackPolicy::WholeCategory if rows_empty => {
            debug!(category = %category, "No stored rows, using bundled defaults");
            fallback()
        }
        FallbackPolicy::Verbatim | FallbackPolicy::WholeCategory | FallbackPolicy::PerKeyMerge => {
            build()
        }
    }
}

pub fn map_products(rows: Vec<ProductRow>) -> Vec<Product> {
    verbatim(Category::Products, || {
        rows.into_iter()
            .map(|row| Product {
                code: row.code,
                display_name: row.display_name,
                group: row.group_key,
                eta_approved: row.eta_approved,
            })
            .collect()
    })
}

fn map_anchor(row: AnchorRow) -> Anchor {
    Anchor {
        id: row.id,
        d0: row.d0,
        hef: row.hef,
        da: row.da,
        hmin: row.hmin,
        hmax: row.hmax,
        active: row.is_active,
    }
}

/// Build group containers from the registry, then attach anchors and
/// cartridges. Rows naming an unregistered group are dropped.
pub fn map_groups(
    group_keys: Vec<String>,
    anchors: Vec<AnchorRow>,
    cartridges: Vec<CartridgeRow>,
) -> BTreeMap<String, GroupConfig> {
    verbatim(Category::Groups, || {
        let mut groups: BTreeMap<String, GroupConfig> = group_keys
            .into_iter()
            .map(|key| (key, GroupConfig::default()))
            .collect();

        for row in anchors {
            let Ok(bar_type) = row.bar_type.parse::<BarType>() else {
                debug!(group = %row.group_key, bar_type = %row.bar_type, id = %row.id, "Skipping anchor with unknown bar type");
                continue;
            };
            let Some(group) = groups.get_mut(&row.group_key) else {
                continue;
            };
            group
                .anchors
                .by_bar_type_mut(bar_type)
                .push(map_anchor(row));
        }

        for row in cartridges {
            if let Some(group) = groups.get_mut(&row.group_key) {
                group.cartridges.push(Cartridge {
                    nominal: row.nominal,
                    net: row.net,
                });
            }
        }

        groups
    })
}

pub fn map_constants(rows: Vec<ConstantRow>) -> BTreeMap<String, FormulaConstant> {
    resolve(
        Category::Constants,
        rows.is_empty(),
        || {
            rows.into_iter()
                .map(|row| {
                    (
                        row.key,
                        FormulaConstant {
                            value: row.value,
                            description: row.description.unwrap_or_default(),
                        },
                    )
                })
                .collect()
        },
        || static_config().constants.clone(),
    )
}

pub fn map_usage_factors(rows: Vec<UsageFactorRow>) -> Vec<UsageFactor> {
    resolve(
        Category::UsageFactors,
        rows.is_empty(),
        || {
            rows.into_iter()
                .map(|row| UsageFactor {
                    code: row.code,
                    label_tr: row.label_tr,
                    label_en: row.label_en,
                    percentage: row.percentage,
                    sort_order: row.sort_order,
                    is_default: row.is_default,
                })
                .collect()
        },
        || static_config().usage_factors.clone(),
    )
}

pub fn map_theme(rows: Vec<ThemeRow>) -> Theme {
    resolve(
        Category::Theme,
        rows.is_empty(),
        || {
            let mut theme = static_config().theme.clone();
            for row in rows {
                match row.key.parse::<ThemeKey>() {
                    Ok(key) => theme.set(key, row.value),
                    Err(_) => debug!(key = %row.key, "Ignoring unknown theme key"),
                }
            }
            theme
        },
        || static_config().theme.clone(),
    )
}

/// Seed an empty entry for every product, then overlay the stored flags.
/// Rows may introduce product codes the product list does not contain.
pub fn map_eta_assignments(
    products: &[Product],
    rows: Vec<EtaRow>,
) -> BTreeMap<String, EtaAssignments> {
    resolve(
        Category::EtaAssignments,
        rows.is_empty(),
        || {
            let mut assignments: BTreeMap<String, EtaAssignments> = products
                .iter()
                .map(|p| (p.code.clone(), EtaAssignments::default()))
                .collect();

            for row in rows {
                let Ok(bar_type) = row.bar_type.parse::<BarType>() else {
                    debug!(product = %row.product_code, bar_type = %row.bar_type, "Skipping ETA row with unknown bar type");
                    continue;
                };
                assignments
                    .entry(row.product_code)
                    .or_default()
                    .by_bar_type_mut(bar_type)
                    .insert(row.anchor_id, row.eta_enabled);
            }

            assignments
        },
        || static_config().eta_assignments.clone(),
    )
}
