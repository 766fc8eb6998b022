use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mirrors the subset of Stripe subscription statuses the platform acts on.
#[derive(
    Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "subscription_status")]
pub enum SubscriptionStatus {
    #[sea_orm(string_value = "incomplete")]
    #[default]
    Incomplete,
    #[sea_orm(string_value = "trialing")]
    Trialing,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "past_due")]
    PastDue,
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

impl SubscriptionStatus {
    /// Statuses that entitle the tenant to use the platform.
    pub fn entitles_access(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Active | SubscriptionStatus::Trialing
        )
    }

    /// Maps a Stripe API status string to the platform's internal status.
    /// Stripe statuses with no direct counterpart (`incomplete_expired`,
    /// `unpaid`) collapse onto the nearest internal one.
    pub fn from_stripe(status: &str) -> Self {
        match status {
            "trialing" => SubscriptionStatus::Trialing,
            "active" => SubscriptionStatus::Active,
            "past_due" | "unpaid" => SubscriptionStatus::PastDue,
            "canceled" | "incomplete_expired" => SubscriptionStatus::Canceled,
            _ => SubscriptionStatus::Incomplete,
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionStatus::Incomplete => write!(fmt, "incomplete"),
            SubscriptionStatus::Trialing => write!(fmt, "trialing"),
            SubscriptionStatus::Active => write!(fmt, "active"),
            SubscriptionStatus::PastDue => write!(fmt, "past_due"),
            SubscriptionStatus::Canceled => write!(fmt, "canceled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_stripe_maps_known_statuses() {
        assert_eq!(
            SubscriptionStatus::from_stripe("active"),
            SubscriptionStatus::Active
        );
        assert_eq!(
            SubscriptionStatus::from_stripe("trialing"),
            SubscriptionStatus::Trialing
        );
        assert_eq!(
            SubscriptionStatus::from_stripe("past_due"),
            SubscriptionStatus::PastDue
        );
        assert_eq!(
            SubscriptionStatus::from_stripe("unpaid"),
            SubscriptionStatus::PastDue
        );
        assert_eq!(
            SubscriptionStatus::from_stripe("canceled"),
            SubscriptionStatus::Canceled
        );
    }

    #[test]
    fn from_stripe_defaults_to_incomplete() {
        assert_eq!(
            SubscriptionStatus::from_stripe("incomplete"),
            SubscriptionStatus::Incomplete
        );
        assert_eq!(
            SubscriptionStatus::from_stripe("something_new"),
            SubscriptionStatus::Incomplete
        );
    }

    #[test]
    fn entitlement_follows_active_and_trialing() {
        assert!(SubscriptionStatus::Active.entitles_access());
        assert!(SubscriptionStatus::Trialing.entitles_access());
        assert!(!SubscriptionStatus::PastDue.entitles_access());
        assert!(!SubscriptionStatus::Canceled.entitles_access());
        assert!(!SubscriptionStatus::Incomplete.entitles_access());
    }
}
