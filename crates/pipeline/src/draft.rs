//! Intermediate shapes passed between pipeline stages.
//!
//! `ExtractedContent` comes out of document extraction, `ProjectDraft`
//! out of AI mapping; the draft plus its translation and SEO fields are
//! stored on the prospect as `generated_sections` so the manual
//! create-project fallback can materialize a listing without re-running
//! any model call.

use mirador_core::payment_plan::PaymentPlan;
use serde::{Deserialize, Serialize};

/// Raw content extracted from the uploaded document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Full extracted text.
    pub text: String,
    /// Pricing rows found in tables, one per unit type.
    #[serde(default)]
    pub pricing_rows: Vec<PricingRow>,
    /// Construction/payment milestones mentioned in the document.
    #[serde(default)]
    pub milestones: Vec<String>,
}

/// One row of a pricing table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRow {
    pub unit_type: String,
    #[serde(default)]
    pub price_from_aed: Option<i64>,
    #[serde(default)]
    pub size_sqft: Option<i64>,
}

/// Structured project fields mapped from extracted content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub units: Vec<UnitDraft>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub payment_plan: PaymentPlan,
}

/// One unit type offered by the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitDraft {
    pub unit_type: String,
    #[serde(default)]
    pub bedrooms: Option<u8>,
    #[serde(default)]
    pub size_sqft: Option<i64>,
    #[serde(default)]
    pub price_from_aed: Option<i64>,
}

/// Second-language renditions of the headline fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedFields {
    pub language: String,
    pub name: String,
    pub description: String,
}

/// SEO metadata for the generated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoFields {
    pub title: String,
    pub description: String,
}

/// Everything the pipeline generated for a prospect, stored as
/// `prospects.generated_sections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSections {
    pub draft: ProjectDraft,
    pub translated: TranslatedFields,
    pub seo: SeoFields,
}

impl ProjectDraft {
    /// Lowest advertised price across all units, if any.
    pub fn price_from_aed(&self) -> Option<i64> {
        self.units.iter().filter_map(|u| u.price_from_aed).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_apply_on_sparse_json() {
        let draft: ProjectDraft = serde_json::from_str(
            r#"{"name": "Bay Residences", "description": "Waterfront living"}"#,
        )
        .unwrap();
        assert!(draft.units.is_empty());
        assert!(draft.amenities.is_empty());
        assert_eq!(draft.payment_plan, PaymentPlan::default());
    }

    #[test]
    fn price_from_is_the_minimum_across_units() {
        let draft = ProjectDraft {
            name: "x".into(),
            description: "y".into(),
            location: None,
            units: vec![
                UnitDraft {
                    unit_type: "1BR".into(),
                    bedrooms: Some(1),
                    size_sqft: None,
                    price_from_aed: Some(1_200_000),
                },
                UnitDraft {
                    unit_type: "Studio".into(),
                    bedrooms: Some(0),
                    size_sqft: None,
                    price_from_aed: Some(850_000),
                },
            ],
            amenities: vec![],
            payment_plan: PaymentPlan::default(),
        };
        assert_eq!(draft.price_from_aed(), Some(850_000));
    }

    #[test]
    fn generated_sections_roundtrip() {
        let sections = GeneratedSections {
            draft: ProjectDraft {
                name: "Bay Residences".into(),
                description: "Waterfront living".into(),
                location: Some("Dubai Maritime City".into()),
                units: vec![],
                amenities: vec!["Infinity Pool".into()],
                payment_plan: PaymentPlan::default(),
            },
            translated: TranslatedFields {
                language: "ar".into(),
                name: "باي ريزيدنسز".into(),
                description: "حياة على الواجهة البحرية".into(),
            },
            seo: SeoFields {
                title: "Bay Residences | Dubai Maritime City".into(),
                description: "Waterfront living".into(),
            },
        };
        let value = serde_json::to_value(&sections).unwrap();
        let back: GeneratedSections = serde_json::from_value(value).unwrap();
        assert_eq!(back.draft.name, "Bay Residences");
        assert_eq!(back.translated.language, "ar");
    }
}
