//! Subscription plan resource.

use serde::{Deserialize, Serialize};

use super::{parse_i64, require_text};
use crate::error::Result;
use crate::xml::XmlValue;

/// A plan offered by the billing site.
///
/// Read-only from the client's perspective: plans are configured on the
/// service and can only be enumerated or looked up here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    /// Service-assigned numeric identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Entitlement tier this plan grants.
    pub feature_level: Option<String>,
    /// Whether this is a free-trial plan.
    pub trial: bool,
}

impl SubscriptionPlan {
    /// Builds a plan from its decoded XML element.
    ///
    /// The wire carries a `plan_type` leaf; `free_trial` marks trial plans.
    pub(crate) fn from_xml(element: &XmlValue) -> Result<Self> {
        let id = parse_i64(require_text(element, "id", "subscription plan")?, "id")?;
        let name = require_text(element, "name", "subscription plan")?.to_owned();
        Ok(Self {
            id,
            name,
            feature_level: element.child_text("feature_level").map(str::to_owned),
            trial: element.child_text("plan_type") == Some("free_trial"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::decode;

    #[test]
    fn test_regular_plan_parses() {
        let doc = decode(
            "<subscription_plan><id>4</id><name>Gold</name>\
             <feature_level>gold</feature_level><plan_type>regular</plan_type>\
             </subscription_plan>",
        )
        .unwrap();
        let plan = SubscriptionPlan::from_xml(doc.get("subscription_plan").unwrap()).unwrap();
        assert_eq!(plan.id, 4);
        assert_eq!(plan.name, "Gold");
        assert_eq!(plan.feature_level.as_deref(), Some("gold"));
        assert!(!plan.trial);
    }

    #[test]
    fn test_free_trial_plan() {
        let doc = decode(
            "<subscription_plan><id>9</id><name>Trial</name>\
             <plan_type>free_trial</plan_type></subscription_plan>",
        )
        .unwrap();
        let plan = SubscriptionPlan::from_xml(doc.get("subscription_plan").unwrap()).unwrap();
        assert!(plan.trial);
        assert_eq!(plan.feature_level, None);
    }

    #[test]
    fn test_missing_id_is_fatal() {
        let doc = decode("<subscription_plan><name>Gold</name></subscription_plan>").unwrap();
        let result = SubscriptionPlan::from_xml(doc.get("subscription_plan").unwrap());
        assert!(result.unwrap_err().to_string().contains("id"));
    }

    #[test]
    fn test_non_numeric_id_is_fatal() {
        let doc =
            decode("<subscription_plan><id>four</id><name>Gold</name></subscription_plan>")
                .unwrap();
        assert!(SubscriptionPlan::from_xml(doc.get("subscription_plan").unwrap()).is_err());
    }
}
