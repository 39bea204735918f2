//! Admin request payloads and their validation
//!
//! Payload fields are read leniently: numbers may arrive as JSON numbers or
//! numeric strings, and flags only count when they are real JSON booleans.
//! Each `validate` returns the storage row or a `ValidationError` whose
//! message is shown to the caller.

use std::borrow::Cow;

use serde::Deserialize;
use validator::ValidationError;

use anchorset_common::{AnchorsetError, BarType, ThemeKey};
use anchorset_persistence::{
    AnchorRow, CartridgeRow, ConstantRow, EtaRow, ProductRow, ProductUpdate, ThemeRow,
    UsageFactorRow,
};

/// Content type stored when an upload does not declare one
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "application/octet-stream";

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Convert a validation error into the service error shown to the caller
pub fn into_illegal_argument(err: ValidationError) -> AnchorsetError {
    let message = err
        .message
        .map(|m| m.into_owned())
        .unwrap_or_else(|| err.code.into_owned());
    AnchorsetError::IllegalArgument(message)
}

/// Lenient field readers used through `deserialize_with`
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Trimmed string; numbers are accepted and rendered as text
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Only real JSON strings; anything else reads as absent
    pub fn strict_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => Some(s.trim().to_string()),
            _ => None,
        })
    }

    /// Number or numeric string. Unparsable input reads as NaN so the
    /// caller can report it; null and blank strings read as absent.
    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(n.as_f64().unwrap_or(f64::NAN)),
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(s.trim().parse().unwrap_or(f64::NAN)),
            Some(_) => Some(f64::NAN),
        })
    }

    pub fn bool_value<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Bool(b)) => Some(b),
            _ => None,
        })
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_bar_type(value: Option<&str>) -> Option<BarType> {
    value.and_then(|v| v.parse().ok())
}

/// Whole positive ml volume
fn whole_nominal(value: f64) -> Option<i32> {
    let whole = is_positive(value) && value.fract() == 0.0 && value <= i32::MAX as f64;
    whole.then_some(value as i32)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorPayload {
    #[serde(default, deserialize_with = "lenient::text")]
    pub group: Option<String>,
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub bar_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub d0: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub da: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub hef: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub hmin: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub hmax: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bool_value")]
    pub active: Option<bool>,
}

impl AnchorPayload {
    pub fn validate(self) -> Result<AnchorRow, ValidationError> {
        let group = non_empty(self.group);
        let bar_type = parse_bar_type(self.bar_type.as_deref());
        let id = non_empty(self.id);
        let d0 = self.d0.filter(|v| !v.is_nan());
        let hef = self.hef.filter(|v| !v.is_nan());
        let (Some(group), Some(bar_type), Some(id), Some(d0), Some(hef)) =
            (group, bar_type, id, d0, hef)
        else {
            return Err(invalid(
                "anchor_required",
                "group, barType, id, d0 and hef are required fields.",
            ));
        };

        if !is_positive(d0) || !is_positive(hef) {
            return Err(invalid("anchor_dimensions", "d0 and hef must be positive numbers."));
        }
        if let Some(da) = self.da {
            if da.is_nan() {
                return Err(invalid("anchor_da", "da must be numeric when provided."));
            }
            if !is_positive(da) {
                return Err(invalid("anchor_da", "da must be a positive number."));
            }
        }
        let non_finite = |bound: Option<f64>| bound.is_some_and(|v| !v.is_finite());
        if non_finite(self.hmin) || non_finite(self.hmax) {
            return Err(invalid(
                "anchor_bounds",
                "hmin and hmax must be numeric when provided.",
            ));
        }
        if self.hmin.is_some_and(|v| v < 0.0) || self.hmax.is_some_and(|v| v < 0.0) {
            return Err(invalid("anchor_bounds", "hmin and hmax cannot be negative."));
        }
        if let (Some(hmin), Some(hmax)) = (self.hmin, self.hmax)
            && hmin > hmax
        {
            return Err(invalid(
                "anchor_bounds",
                "hmin must be less than or equal to hmax.",
            ));
        }

        Ok(AnchorRow {
            group_key: group,
            bar_type: bar_type.as_str().to_string(),
            id,
            d0,
            da: self.da,
            hef,
            hmin: self.hmin,
            hmax: self.hmax,
            is_active: Some(self.active != Some(false)),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CartridgePayload {
    #[serde(default, deserialize_with = "lenient::text")]
    pub group: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub nominal: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub net: Option<f64>,
}

impl CartridgePayload {
    pub fn validate(self) -> Result<CartridgeRow, ValidationError> {
        let (Some(group), Some(nominal), Some(net)) = (
            non_empty(self.group),
            self.nominal.filter(|v| !v.is_nan()),
            self.net.filter(|v| !v.is_nan()),
        ) else {
            return Err(invalid(
                "cartridge_required",
                "group, nominal and net fields are required.",
            ));
        };
        if !is_positive(nominal) || !is_positive(net) {
            return Err(invalid(
                "cartridge_volume",
                "nominal and net must be positive numbers.",
            ));
        }
        let Some(nominal) = whole_nominal(nominal) else {
            return Err(invalid(
                "cartridge_nominal",
                "nominal must be a whole number of ml.",
            ));
        };

        Ok(CartridgeRow {
            group_key: group,
            nominal,
            net,
        })
    }

    /// Identity of the cartridge to delete; `net` is ignored
    pub fn validate_key(self) -> Result<(String, i32), ValidationError> {
        let (Some(group), Some(nominal)) =
            (non_empty(self.group), self.nominal.filter(|v| !v.is_nan()))
        else {
            return Err(invalid(
                "cartridge_key_required",
                "group and nominal fields are required.",
            ));
        };
        let Some(nominal) = whole_nominal(nominal) else {
            return Err(invalid(
                "cartridge_nominal",
                "nominal must be a whole number of ml.",
            ));
        };
        Ok((group, nominal))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ConstantPayload {
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub description: Option<String>,
}

impl ConstantPayload {
    pub fn validate(self) -> Result<ConstantRow, ValidationError> {
        let (Some(key), Some(value)) = (
            non_empty(self.key),
            self.value.filter(|v| v.is_finite()),
        ) else {
            return Err(invalid("constant_required", "key and numeric value are required."));
        };
        Ok(ConstantRow {
            key,
            value,
            description: self.description,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageFactorPayload {
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub label_tr: Option<String>,
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub label_en: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sort_order: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bool_value")]
    pub is_default: Option<bool>,
}

impl UsageFactorPayload {
    pub fn validate(self) -> Result<UsageFactorRow, ValidationError> {
        let Some(code) = non_empty(self.code) else {
            return Err(invalid("usage_factor_code", "code is required."));
        };
        let (Some(label_tr), Some(label_en), Some(percentage), Some(sort_order)) = (
            self.label_tr,
            self.label_en,
            self.percentage.filter(|v| !v.is_nan()),
            self.sort_order.filter(|v| v.is_finite()),
        ) else {
            return Err(invalid(
                "usage_factor_required",
                "labelTr, labelEn, percentage and sortOrder are required fields.",
            ));
        };
        if !is_positive(percentage) {
            return Err(invalid(
                "usage_factor_percentage",
                "percentage must be a positive number.",
            ));
        }
        if sort_order.fract() != 0.0 || sort_order.abs() > i32::MAX as f64 {
            return Err(invalid(
                "usage_factor_sort_order",
                "sortOrder must be a whole number.",
            ));
        }

        Ok(UsageFactorRow {
            code,
            label_tr,
            label_en,
            percentage,
            sort_order: sort_order as i32,
            is_default: self.is_default == Some(true),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePayload {
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub brand_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub page_background: Option<String>,
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub card_background: Option<String>,
}

impl ThemePayload {
    pub fn validate(self) -> Result<Vec<ThemeRow>, ValidationError> {
        let rows: Vec<ThemeRow> = [
            (ThemeKey::BrandColor, self.brand_color),
            (ThemeKey::PageBackground, self.page_background),
            (ThemeKey::CardBackground, self.card_background),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            non_empty(value).map(|value| ThemeRow {
                key: key.as_str().to_string(),
                value,
            })
        })
        .collect();

        if rows.is_empty() {
            return Err(invalid("theme_required", "At least one theme value is required."));
        }
        Ok(rows)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtaPayload {
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub product_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub bar_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub anchor_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool_value")]
    pub enabled: Option<bool>,
}

impl EtaPayload {
    pub fn validate(self) -> Result<EtaRow, ValidationError> {
        let (Some(product_code), Some(bar_type), Some(anchor_id)) = (
            non_empty(self.product_code),
            parse_bar_type(self.bar_type.as_deref()),
            non_empty(self.anchor_id),
        ) else {
            return Err(invalid(
                "eta_required",
                "productCode, barType and anchorId are required.",
            ));
        };
        Ok(EtaRow {
            product_code,
            bar_type: bar_type.as_str().to_string(),
            anchor_id,
            eta_enabled: self.enabled == Some(true),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::strict_text")]
    pub group: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool_value")]
    pub eta_approved: Option<bool>,
}

impl ProductPayload {
    /// Validate a create request
    pub fn validate(self) -> Result<ProductRow, ValidationError> {
        let (Some(code), Some(display_name), Some(group)) = (
            non_empty(self.code),
            non_empty(self.display_name),
            non_empty(self.group),
        ) else {
            return Err(invalid(
                "product_required",
                "code, displayName and group are required fields.",
            ));
        };
        Ok(ProductRow {
            code,
            display_name,
            group_key: group,
            eta_approved: self.eta_approved == Some(true),
        })
    }

    /// Validate a partial update; the code comes from the path
    pub fn validate_update(self) -> Result<ProductUpdate, ValidationError> {
        if self.display_name.as_deref() == Some("") {
            return Err(invalid("product_display_name", "displayName cannot be empty."));
        }
        if self.group.as_deref() == Some("") {
            return Err(invalid("product_group", "group cannot be empty."));
        }
        let update = ProductUpdate {
            display_name: self.display_name,
            group_key: self.group,
            eta_approved: self.eta_approved,
        };
        if update.is_empty() {
            return Err(invalid(
                "product_update_empty",
                "At least one of displayName, group, etaApproved must be provided.",
            ));
        }
        Ok(update)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GroupPayload {
    #[serde(default, deserialize_with = "lenient::text")]
    pub key: Option<String>,
}

impl GroupPayload {
    pub fn validate(self) -> Result<String, ValidationError> {
        non_empty(self.key).ok_or_else(|| invalid("group_required", "key is required."))
    }
}

pub fn validate_product_code(code: &str) -> Result<String, ValidationError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(invalid("product_code", "Product code is required in the path."));
    }
    Ok(code.to_string())
}

/// Product image identity from an upload form or query string
pub fn validate_image_key(
    product: Option<&str>,
    nominal: Option<&str>,
    missing_message: &'static str,
) -> Result<(String, i32), ValidationError> {
    let (Some(product), Some(nominal)) = (
        product.map(str::trim).filter(|p| !p.is_empty()),
        nominal.map(str::trim).filter(|n| !n.is_empty()),
    ) else {
        return Err(invalid("image_required", missing_message));
    };
    let nominal = nominal
        .parse::<f64>()
        .ok()
        .and_then(whole_nominal)
        .ok_or_else(|| invalid("image_nominal", "nominal must be a positive number."))?;
    Ok((product.to_string(), nominal))
}

/// Identity of a multipart upload; the file part must be present
pub fn validate_image_upload(
    product: Option<&str>,
    nominal: Option<&str>,
    has_file: bool,
) -> Result<(String, i32), ValidationError> {
    const MISSING: &str = "productCode, nominal and file are required.";
    if !has_file {
        return Err(invalid("image_required", MISSING));
    }
    validate_image_key(product, nominal, MISSING)
}
