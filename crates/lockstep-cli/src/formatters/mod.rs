//! Output formatters for lockstep analysis reports.

pub mod human;
pub mod json;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

use lockstep_core::AnalysisReport;

/// Trait for formatting analysis reports
pub trait Formatter {
    /// Format and print the report
    fn format(&self, report: &AnalysisReport);
}

impl Formatter for HumanFormatter {
    fn format(&self, report: &AnalysisReport) {
        print!("{}", human::render(report));
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &AnalysisReport) {
        json::print_json(report);
    }
}
