//! Terminal rendering for assessments

use crate::domain::RiskAssessment;

/// Human-readable report: headline, then one line per analysis entry
pub fn render_assessment(symbol: &str, address: &str, assessment: &RiskAssessment) -> String {
    let mut out = format!(
        "{} ({})\n  Score: {}/{}  Risk: {}  Policy: {}\n",
        symbol, address, assessment.score, assessment.total_score, assessment.risk, assessment.policy
    );

    if assessment.detailed_analysis.is_empty() {
        out.push_str("  No findings\n");
        return out;
    }

    for entry in &assessment.detailed_analysis {
        out.push_str(&format!(
            "  [{:<16}] {:<22} {}\n",
            entry.risk.as_str(),
            entry.rule.name(),
            entry.detail
        ));
    }
    out
}

/// One-line summary used by batch mode
pub fn render_summary(symbol: &str, address: &str, assessment: &RiskAssessment) -> String {
    format!(
        "{:<10} {:<44} {:>3}/{:<3} {}",
        symbol, address, assessment.score, assessment.total_score, assessment.risk
    )
}
