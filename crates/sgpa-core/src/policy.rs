//! # Policy Module
//!
//! Faculty tuition-waiver policies.
//!
//! Each faculty has a small rule table of (minimum SGPA, waiver %) pairs.
//! Resolution picks the rule with the highest threshold the SGPA meets, so
//! the order rules are written in does not matter.

use crate::engine::Sgpa;
use crate::units::GradePoint;
use serde::Serialize;

/// One waiver tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaiverRule {
    /// Inclusive lower bound on SGPA.
    pub min_sgpa: GradePoint,
    /// Tuition waiver percentage, 0-100.
    pub percentage: u8,
}

impl WaiverRule {
    const fn new(min_sgpa_hundredths: u16, percentage: u8) -> Self {
        Self {
            min_sgpa: GradePoint::from_hundredths(min_sgpa_hundredths),
            percentage,
        }
    }
}

/// A faculty and its waiver rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacultyPolicy {
    /// Selector value used on the command line.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Waiver tiers. Thresholds are distinct.
    pub rules: &'static [WaiverRule],
}

/// Every faculty with a waiver policy.
pub const FACULTY_POLICIES: &[FacultyPolicy] = &[
    FacultyPolicy {
        id: "be-sit-ahs-eng",
        name: "BE, SIT, AHS, Engineering",
        rules: &[
            WaiverRule::new(400, 50),
            WaiverRule::new(390, 30),
            WaiverRule::new(385, 20),
            WaiverRule::new(380, 10),
        ],
    },
    FacultyPolicy {
        id: "humanities-social",
        name: "Humanities & Social Sciences",
        rules: &[
            WaiverRule::new(390, 50),
            WaiverRule::new(385, 40),
            WaiverRule::new(380, 20),
            WaiverRule::new(375, 15),
            WaiverRule::new(360, 10),
        ],
    },
];

impl FacultyPolicy {
    /// Find a policy in `policies` by selector. Blank or unknown selectors
    /// give `None`.
    #[must_use]
    pub fn lookup(policies: &'static [FacultyPolicy], id: &str) -> Option<&'static FacultyPolicy> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        policies.iter().find(|p| p.id == id)
    }

    /// The tier an SGPA falls into, if any.
    #[must_use]
    pub fn matching_rule(&self, sgpa: &Sgpa) -> Option<&'static WaiverRule> {
        self.rules
            .iter()
            .filter(|rule| sgpa.meets(rule.min_sgpa))
            .max_by_key(|rule| rule.min_sgpa)
    }

    /// Waiver percentage for an SGPA; 0 when no tier is met.
    #[must_use]
    pub fn percentage_for(&self, sgpa: &Sgpa) -> u8 {
        self.matching_rule(sgpa).map(|r| r.percentage).unwrap_or(0)
    }

    /// Rules sorted by threshold, highest first.
    #[must_use]
    pub fn rules_descending(&self) -> Vec<WaiverRule> {
        let mut rules = self.rules.to_vec();
        rules.sort_by(|a, b| b.min_sgpa.cmp(&a.min_sgpa));
        rules
    }
}

// =============================================================================
// TESTS
// =============================================================================
