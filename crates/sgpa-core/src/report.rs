//! # Report Module
//!
//! Text rendering of a [`CalculationResult`].
//!
//! Three waiver outcomes are kept apart:
//! - a tier was met: percentage and faculty are shown
//! - a faculty was selected but no tier met: a "No Waiver" notice
//! - no faculty: nothing about waivers at all

use crate::engine::CalculationResult;

/// The waiver part of a result, as the display sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaiverOutcome<'a> {
    Eligible { percentage: u8, faculty: &'a str },
    NoWaiver { faculty: &'a str },
    NotSelected,
}

impl CalculationResult {
    /// Classify the waiver for display.
    #[must_use]
    pub fn waiver_outcome(&self) -> WaiverOutcome<'_> {
        match &self.waiver {
            Some(w) if w.percentage > 0 => WaiverOutcome::Eligible {
                percentage: w.percentage,
                faculty: &w.faculty,
            },
            Some(w) => WaiverOutcome::NoWaiver {
                faculty: &w.faculty,
            },
            None => WaiverOutcome::NotSelected,
        }
    }

    /// Format as plain text with the standard card layout.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str(&format!("│ Your SGPA: {}\n", self.sgpa));
        output.push_str(&format!(
            "│ Courses counted: {} ({} credits)\n",
            self.courses_counted, self.total_credits
        ));

        match self.waiver_outcome() {
            WaiverOutcome::Eligible {
                percentage,
                faculty,
            } => {
                output.push_str("├─────────────────────────────────────┤\n");
                output.push_str(&format!("│ Waiver Eligible: {}%\n", percentage));
                output.push_str(&format!("│ {}\n", faculty));
            }
            WaiverOutcome::NoWaiver { .. } => {
                output.push_str("├─────────────────────────────────────┤\n");
                output.push_str("│ No Waiver\n");
                output.push_str("│ Better luck next semester!\n");
            }
            WaiverOutcome::NotSelected => {}
        }

        output.push_str("└─────────────────────────────────────┘\n");
        output
    }
}

// =============================================================================
// TESTS
// =============================================================================
