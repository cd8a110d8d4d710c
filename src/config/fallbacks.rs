//! Fallback tap coordinates for the label-as-marketing flow.
//!
//! The vision step is best-effort; when it yields nothing the workflow still
//! has to make forward progress. Defaults live in one table keyed by step
//! name so a different device profile can swap them without touching the
//! control flow. Coordinates target the 720x1600 reference profile.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::model::Point;

/// Step name -> default tap point when the vision query comes back empty.
pub static LABEL_FLOW_FALLBACKS: Lazy<HashMap<&'static str, Point>> = Lazy::new(|| {
    let mut m = HashMap::new();

    // Overflow (three dots) button in the selection toolbar, top right
    m.insert("overflow_menu", Point::new(690, 90));
    // 'Label as' entry in the overflow popup
    m.insert("label_as", Point::new(360, 500));
    // Marketing checkbox row in the label dialog
    m.insert("marketing_checkbox", Point::new(650, 700));
    // OK / Done button closing the dialog
    m.insert("confirm_ok", Point::new(560, 900));

    m
});

/// Get the fallback point for a label-flow step.
pub fn fallback_point(step: &str) -> Option<Point> {
    LABEL_FLOW_FALLBACKS.get(step).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_step_has_a_fallback() {
        for step in ["overflow_menu", "label_as", "marketing_checkbox", "confirm_ok"] {
            assert!(fallback_point(step).is_some(), "missing fallback for {}", step);
        }
        assert!(fallback_point("nonexistent_step").is_none());
    }

    #[test]
    fn test_fallbacks_fit_reference_profile() {
        for (step, pt) in LABEL_FLOW_FALLBACKS.iter() {
            assert!(pt.in_bounds(720, 1600), "{} fallback off-screen", step);
        }
    }
}
