//! Relevance scoring that prioritizes FDM-printable designs

use super::params::ExtractedParams;
use super::{FDM_PRINTING, GENERIC_3D_PRINTING};

/// Score a paper for automated prioritization. FDM-printable,
/// mm-scale designs rank highest; micro/nano-scale work is penalized.
pub fn relevance_score(params: &ExtractedParams, text: &str) -> f64 {
    let mut score = 0.0;

    if params
        .manufacturing_methods
        .iter()
        .any(|m| m == FDM_PRINTING)
    {
        score += 5.0;
    } else if params
        .manufacturing_methods
        .iter()
        .any(|m| m == GENERIC_3D_PRINTING)
    {
        score += 2.0;
    }

    // One bonus for the first printable-scale dimension
    if params.dimensions.iter().any(|d| d.is_printable_scale()) {
        score += 3.0;
    }

    // Micro/nano features are not FDM printable
    if params
        .dimensions
        .iter()
        .any(|d| d.unit == "um" || d.unit == "nm")
    {
        score -= 2.0;
    }

    let contains_any = |terms: &[&str]| terms.iter().any(|term| text.contains(term));
    if contains_any(&["tunable", "parametric", "configurable", "reconfigurable"]) {
        score += 1.0;
    }
    if contains_any(&["unit cell", "periodic", "lattice", "metamaterial"]) {
        score += 1.0;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_params;

    fn score_of(text: &str) -> f64 {
        relevance_score(&extract_params(text), text)
    }

    #[test]
    fn fdm_mm_scale_tunable_design_scores_ten() {
        let score = score_of("fdm printed tunable metamaterial with 10 mm unit cell");
        assert!((score - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn generic_printing_scores_lower_than_fdm() {
        let generic = score_of("3d printed structure with 10 mm period");
        let fdm = score_of("fdm printed structure with 10 mm period");
        assert!(fdm > generic);
        assert!((generic - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn nano_scale_is_penalized() {
        let score = score_of("a lithography-defined lattice with 200 nm pitch");
        // lattice (+1) minus nano penalty (-2)
        assert!((score + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn printable_dimension_bonus_applies_once() {
        let score = score_of("cells of 5 mm, 10 mm and 20 mm");
        assert!((score - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn irrelevant_text_scores_zero() {
        assert_eq!(score_of("a survey of deep learning"), 0.0);
    }
}
