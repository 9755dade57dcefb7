//! Payment-plan presentation for project listings.
//!
//! Developers publish plans as percentage splits (e.g. 20/50/30). The
//! listing shows them as an ordered milestone list in the fixed
//! sequence down-payment, during-construction, on-handover,
//! post-handover, omitting milestones that are absent or zero.

use serde::{Deserialize, Serialize};

/// Percentage split of a payment plan, as extracted from a brochure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlan {
    #[serde(default)]
    pub down_payment: Option<u32>,
    #[serde(default)]
    pub during_construction: Option<u32>,
    #[serde(default)]
    pub on_handover: Option<u32>,
    #[serde(default)]
    pub post_handover: Option<u32>,
}

/// One rendered milestone of a payment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMilestone {
    pub label: String,
    pub percent: u32,
}

/// Render a plan as its ordered milestone list.
pub fn format_payment_plan(plan: &PaymentPlan) -> Vec<PaymentMilestone> {
    let entries = [
        ("Down Payment", plan.down_payment),
        ("During Construction", plan.during_construction),
        ("On Handover", plan.on_handover),
        ("Post Handover", plan.post_handover),
    ];

    entries
        .into_iter()
        .filter_map(|(label, percent)| match percent {
            Some(p) if p > 0 => Some(PaymentMilestone {
                label: label.to_string(),
                percent: p,
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(milestones: &[PaymentMilestone]) -> Vec<&str> {
        milestones.iter().map(|m| m.label.as_str()).collect()
    }

    #[test]
    fn three_way_split_in_fixed_order() {
        let plan = PaymentPlan {
            down_payment: Some(20),
            during_construction: Some(50),
            on_handover: Some(30),
            post_handover: None,
        };
        let milestones = format_payment_plan(&plan);
        assert_eq!(
            labels(&milestones),
            vec!["Down Payment", "During Construction", "On Handover"]
        );
        assert_eq!(
            milestones.iter().map(|m| m.percent).collect::<Vec<_>>(),
            vec![20, 50, 30]
        );
    }

    #[test]
    fn zero_entries_are_omitted() {
        let plan = PaymentPlan {
            down_payment: Some(10),
            during_construction: Some(0),
            on_handover: Some(90),
            post_handover: None,
        };
        assert_eq!(
            labels(&format_payment_plan(&plan)),
            vec!["Down Payment", "On Handover"]
        );
    }

    #[test]
    fn post_handover_comes_last() {
        let plan = PaymentPlan {
            down_payment: Some(10),
            during_construction: None,
            on_handover: Some(50),
            post_handover: Some(40),
        };
        assert_eq!(
            labels(&format_payment_plan(&plan)),
            vec!["Down Payment", "On Handover", "Post Handover"]
        );
    }

    #[test]
    fn empty_plan_renders_nothing() {
        assert!(format_payment_plan(&PaymentPlan::default()).is_empty());
    }
}
