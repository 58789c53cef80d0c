//! JSON formatter for analysis reports.

use lockstep_core::AnalysisReport;
use serde_json::json;

pub struct JsonFormatter;

/// The report plus a few derived flags, so consumers don't recompute them.
pub fn to_value(report: &AnalysisReport) -> serde_json::Value {
    json!({
        "report": report,
        "no_action_needed": report.no_action_needed(),
        "has_unresolvable": report.has_unresolvable(),
        "has_pending_changes": report.has_pending_changes(),
    })
}

pub fn print_json(report: &AnalysisReport) {
    match serde_json::to_string_pretty(&to_value(report)) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results: {}", e),
    }
}
