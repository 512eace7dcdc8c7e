//! Route classification table — maps request paths to visibility tiers.

use serde::{Deserialize, Serialize};

/// Visibility tier of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    /// Anyone may see this; credentials are not even inspected.
    Public,
    /// Any verified session may see this.
    Authenticated,
    /// Only sessions passing the admin policy may see this.
    Admin,
}

/// A single classification rule: a path prefix and the tier it grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRule {
    /// Path prefix to match (e.g. `/admin`, `/dashboard`, `/`).
    pub pattern: String,
    pub tier: Tier,
}

/// Ordered, immutable route classification table.
///
/// Built once at startup and shared read-only across requests. Matching is
/// by path prefix; the longest matching prefix wins, with declaration order
/// breaking ties. Paths matching no rule fall to `default_tier`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    default_tier: Tier,
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>, default_tier: Tier) -> Self {
        Self {
            rules,
            default_tier,
        }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn default_tier(&self) -> Tier {
        self.default_tier
    }

    /// Classify a request path into a tier.
    ///
    /// Every path resolves to exactly one tier: the most specific (longest)
    /// matching prefix, first-declared on equal length, or the default tier
    /// when nothing matches.
    pub fn classify(&self, path: &str) -> Tier {
        let mut best: Option<&RouteRule> = None;
        for rule in &self.rules {
            if !path.starts_with(&rule.pattern) {
                continue;
            }
            // Strictly-longer wins; equal length keeps the earlier rule.
            match best {
                Some(current) if rule.pattern.len() <= current.pattern.len() => {}
                _ => best = Some(rule),
            }
        }
        best.map(|r| r.tier).unwrap_or(self.default_tier)
    }
}
