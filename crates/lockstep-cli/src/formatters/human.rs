//! Human-readable formatter for analysis reports.

use colored::*;
use lockstep_core::{AnalysisReport, RunMode};
use std::fmt::{self, Write};

pub struct HumanFormatter;

/// Max entries printed per list before collapsing the rest.
const LIST_LIMIT: usize = 20;

pub fn render(report: &AnalysisReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &AnalysisReport) -> fmt::Result {
    writeln!(out, "\nLockstep Analysis Results")?;
    writeln!(out, "=========================\n")?;

    let stats = &report.statistics;
    writeln!(out, "Statistics:")?;
    writeln!(out, "  Total packages: {}", stats.total_packages)?;
    writeln!(out, "  Duplicated packages: {}", stats.duplicate_packages)?;
    writeln!(out, "  Native packages: {}", stats.native_packages)?;
    writeln!(out, "  Duration: {}ms", stats.duration_ms)?;

    if report.no_action_needed() {
        writeln!(
            out,
            "\n{} No action needed: native packages are deduplicated and hoisted",
            "✓".green()
        )?;
        return Ok(());
    }

    write_resolutions(out, report)?;

    if !report.not_hoisted.is_empty() {
        writeln!(
            out,
            "\n{} ({}):",
            "Native packages missing from the root install location".yellow().bold(),
            report.not_hoisted.len()
        )?;
        write_list(out, report.not_hoisted.iter())?;
    }

    if !report.peer_declarations.is_empty() {
        writeln!(out, "\n{}", "Declared as peer dependencies:".bold())?;
        for peer in &report.peer_declarations {
            let resolved = peer.resolved.as_deref().unwrap_or("unresolved");
            writeln!(
                out,
                "  {} {} (declared {}, pinned to {})",
                "!".yellow(),
                peer.package,
                peer.declared_range,
                resolved
            )?;
        }
    }

    write_pins(out, report)
}

fn write_resolutions(out: &mut String, report: &AnalysisReport) -> fmt::Result {
    let record = &report.resolutions;
    if report.native_duplicates.is_empty() {
        return Ok(());
    }

    writeln!(
        out,
        "\n{} ({}):",
        "Duplicated native packages".bold(),
        report.native_duplicates.len()
    )?;
    for (package, version) in &record.resolved {
        writeln!(out, "  {} {} → {}", "✓".green(), package, version)?;
    }
    for (package, conflict) in &record.unresolvable {
        writeln!(
            out,
            "  {} {}: {} vs {} (major versions differ, resolve manually)",
            "✗".red(),
            package,
            conflict.kept,
            conflict.candidate
        )?;
    }
    for (package, reason) in &record.invalid {
        writeln!(out, "  {} {}: {}", "✗".red(), package, reason)?;
    }
    Ok(())
}

fn write_pins(out: &mut String, report: &AnalysisReport) -> fmt::Result {
    if report.pin_changes.is_empty() && !report.creates_resolutions {
        if report.mode == RunMode::Write && !report.resolutions.resolved.is_empty() {
            writeln!(out, "\nResolutions already up to date")?;
        }
        return Ok(());
    }

    let heading = if report.manifest_changed {
        "Pins written to resolutions:"
    } else {
        "Planned pins (run with --write to apply):"
    };
    writeln!(out, "\n{}", heading.bold())?;
    if report.creates_resolutions {
        writeln!(out, "  + new \"resolutions\" field")?;
    }
    for pin in &report.pin_changes {
        match &pin.old_version {
            Some(old) => writeln!(out, "  ~ {}: {} → {}", pin.package, old, pin.new_version)?,
            None => writeln!(out, "  + {}: {}", pin.package, pin.new_version)?,
        }
    }

    if report.manifest_changed {
        writeln!(
            out,
            "\n{} Re-run your package manager's install to apply the new resolutions",
            "→".cyan()
        )?;
    }
    Ok(())
}

fn write_list<'a>(out: &mut String, items: impl Iterator<Item = &'a String>) -> fmt::Result {
    let items: Vec<_> = items.collect();
    for item in items.iter().take(LIST_LIMIT) {
        writeln!(out, "  - {}", item)?;
    }
    if items.len() > LIST_LIMIT {
        writeln!(out, "  ... and {} more", items.len() - LIST_LIMIT)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_core::{PeerDeclaration, Statistics};
    use lockstep_deps::{AppliedPin, MajorConflict};

    fn report_with_findings() -> AnalysisReport {
        let mut report = AnalysisReport {
            statistics: Statistics {
                total_packages: 12,
                duplicate_packages: 3,
                native_packages: 3,
                duration_ms: 5,
            },
            ..Default::default()
        };
        report.native_duplicates = ["camera".to_string(), "netinfo".to_string(), "svg".to_string()]
            .into_iter()
            .collect();
        report
            .resolutions
            .resolved
            .insert("netinfo".to_string(), "9.3.10".to_string());
        report.resolutions.unresolvable.insert(
            "svg".to_string(),
            MajorConflict {
                kept: "12.1.0".to_string(),
                candidate: "13.4.0".to_string(),
            },
        );
        report.resolutions.invalid.insert(
            "camera".to_string(),
            "invalid version '4.2.1-beta.1': segment '1-beta' is not numeric".to_string(),
        );
        report.pin_changes.push(AppliedPin {
            package: "netinfo".to_string(),
            old_version: Some("9.3.7".to_string()),
            new_version: "9.3.10".to_string(),
        });
        report
    }

    #[test]
    fn test_no_action_needed() {
        colored::control::set_override(false);
        let text = render(&AnalysisReport::default());
        assert!(text.contains("No action needed"));
        assert!(!text.contains("Planned pins"));
    }

    #[test]
    fn test_report_only_shows_plan() {
        colored::control::set_override(false);
        let text = render(&report_with_findings());

        assert!(text.contains("Total packages: 12"));
        assert!(text.contains("netinfo → 9.3.10"));
        assert!(text.contains("svg: 12.1.0 vs 13.4.0"));
        assert!(text.contains("Duplicated native packages (3):"));
        assert!(text.contains("camera: invalid version '4.2.1-beta.1'"));
        assert!(text.contains("Planned pins (run with --write to apply):"));
        assert!(text.contains("~ netinfo: 9.3.7 → 9.3.10"));
        assert!(!text.contains("Re-run"));
    }

    #[test]
    fn test_write_mode_shows_install_hint() {
        colored::control::set_override(false);
        let mut report = report_with_findings();
        report.mode = RunMode::Write;
        report.manifest_changed = true;
        report.peer_declarations.push(PeerDeclaration {
            package: "netinfo".to_string(),
            declared_range: "^9.0.0".to_string(),
            resolved: Some("9.3.10".to_string()),
        });

        let text = render(&report);
        assert!(text.contains("Pins written to resolutions:"));
        assert!(text.contains("Re-run your package manager's install"));
        assert!(text.contains("netinfo (declared ^9.0.0, pinned to 9.3.10)"));
    }

    #[test]
    fn test_long_lists_are_truncated() {
        colored::control::set_override(false);
        let mut report = AnalysisReport::default();
        report.not_hoisted = (0..25).map(|i| format!("pkg-{i:02}")).collect();

        let text = render(&report);
        assert!(text.contains("pkg-19"));
        assert!(!text.contains("pkg-20"));
        assert!(text.contains("... and 5 more"));
    }
}
