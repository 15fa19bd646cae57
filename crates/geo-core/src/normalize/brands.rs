use serde::Serialize;
use serde_json::Value;

use super::{present, unwrap_envelope};
use crate::access::{first_text, safe_array, safe_get};

const ID_KEYS: &[&str] = &["id", "brandId"];
const NAME_KEYS: &[&str] = &["name", "brandName"];

/// Extract the brand list from a `metricsV1Brands` payload.
///
/// Accepts `{ data: { brands } }`, `{ brands }` and a bare array.
#[must_use]
pub fn normalize_brands(raw: Option<&Value>) -> Vec<Value> {
    let Some(raw) = present(raw) else {
        return Vec::new();
    };
    let body = unwrap_envelope(raw);
    match present(safe_get(body, "brands")) {
        Some(brands) => safe_array(Some(brands)).to_vec(),
        None => safe_array(Some(body)).to_vec(),
    }
}

/// Identity of one brand on the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandSummary {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl BrandSummary {
    #[must_use]
    pub fn from_value(raw: &Value) -> Self {
        Self {
            id: first_text(raw, ID_KEYS),
            name: first_text(raw, NAME_KEYS),
        }
    }
}

/// Why a brand was picked during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceReason {
    /// The account has exactly one brand.
    OnlyBrand,
    /// The name hint matched this brand.
    NameMatch,
    /// Several brands and no match; the first one is used.
    FirstOfMany,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandChoice {
    pub id: String,
    pub reason: ChoiceReason,
}

/// Pick a brand ID from the account's brands.
///
/// A name hint matches case-insensitively as a substring of the brand name.
/// Returns `None` when there are no brands or the chosen one has no ID.
#[must_use]
pub fn select_brand(brands: &[BrandSummary], name_hint: Option<&str>) -> Option<BrandChoice> {
    let choose = |brand: &BrandSummary, reason| {
        brand.id.clone().map(|id| BrandChoice { id, reason })
    };

    match brands {
        [] => None,
        [only] => choose(only, ChoiceReason::OnlyBrand),
        [first, ..] => {
            let hint = name_hint
                .map(str::trim)
                .filter(|hint| !hint.is_empty())
                .map(str::to_lowercase);
            let matched = hint.and_then(|hint| {
                brands.iter().find(|brand| {
                    brand
                        .name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&hint))
                })
            });
            match matched {
                Some(brand) => choose(brand, ChoiceReason::NameMatch),
                None => choose(first, ChoiceReason::FirstOfMany),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn brand(id: &str, name: &str) -> BrandSummary {
        BrandSummary {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn brands_from_envelope_field_or_array() {
        let enveloped = json!({"success": true, "data": {"brands": [{"id": "a"}]}});
        assert_eq!(normalize_brands(Some(&enveloped)).len(), 1);

        let bare = json!([{"id": "a"}, {"id": "b"}]);
        assert_eq!(normalize_brands(Some(&bare)).len(), 2);

        let wrapped_array = json!({"data": [{"id": "a"}]});
        assert_eq!(normalize_brands(Some(&wrapped_array)).len(), 1);
    }

    #[test]
    fn malformed_brand_payloads_are_empty() {
        assert!(normalize_brands(None).is_empty());
        assert!(normalize_brands(Some(&json!({"brands": "many"}))).is_empty());
        assert!(normalize_brands(Some(&json!({"data": {"count": 2}}))).is_empty());
    }

    #[test]
    fn summary_reads_alias_fields() {
        let summary = BrandSummary::from_value(&json!({"brandId": "b9", "brandName": "Acme"}));
        assert_eq!(summary, brand("b9", "Acme"));
        assert_eq!(
            BrandSummary::from_value(&json!(null)),
            BrandSummary { id: None, name: None }
        );
    }

    #[test]
    fn single_brand_is_chosen_without_hint() {
        let choice = select_brand(&[brand("a", "Acme")], Some("other")).unwrap();
        assert_eq!(choice.id, "a");
        assert_eq!(choice.reason, ChoiceReason::OnlyBrand);
    }

    #[test]
    fn hint_matches_case_insensitive_substring() {
        let brands = [brand("a", "Acme Corp"), brand("b", "Globex Industries")];
        let choice = select_brand(&brands, Some("GLOBEX")).unwrap();
        assert_eq!(choice.id, "b");
        assert_eq!(choice.reason, ChoiceReason::NameMatch);
    }

    #[test]
    fn unmatched_hint_uses_first_brand() {
        let brands = [brand("a", "Acme Corp"), brand("b", "Globex")];
        let choice = select_brand(&brands, Some("initech")).unwrap();
        assert_eq!(choice.id, "a");
        assert_eq!(choice.reason, ChoiceReason::FirstOfMany);
    }

    #[test]
    fn no_brands_or_missing_id_selects_nothing() {
        assert_eq!(select_brand(&[], None), None);
        let nameless = BrandSummary { id: None, name: Some("X".into()) };
        assert_eq!(select_brand(&[nameless], None), None);
    }
}
