use crate::OutputFormat;
use anyhow::{Context, Result};
use colored::*;
use lockstep_core::{resolve_conflict, ConflictQuery};
use lockstep_deps::Resolution;

pub fn handle_resolve_command(
    package: &str,
    first: &str,
    second: &str,
    break_on_major: bool,
    format: OutputFormat,
) -> Result<()> {
    let query = resolve_conflict(package, first, second, break_on_major)
        .with_context(|| format!("Failed to compare versions of {}", package))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&query)?),
        OutputFormat::Human => println!("{}", describe(&query)),
    }
    Ok(())
}

fn describe(query: &ConflictQuery) -> String {
    match &query.resolution {
        Resolution::Resolved { version } => {
            format!("{} {}@{}", "✓".green(), query.package, version)
        }
        Resolution::Unresolvable(conflict) => format!(
            "{} {}: {} and {} differ in major version; pass --allow-major to compare anyway",
            "✗".red(),
            query.package,
            conflict.kept,
            conflict.candidate
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_resolved() {
        colored::control::set_override(false);
        let query = resolve_conflict("react-native-svg", "12.1.0", "12.3.0", true).unwrap();
        assert_eq!(describe(&query), "✓ react-native-svg@12.3.0");
    }

    #[test]
    fn test_describe_major_conflict() {
        colored::control::set_override(false);
        let query = resolve_conflict("react-native-svg", "12.1.0", "13.0.0", true).unwrap();
        assert!(describe(&query).contains("12.1.0 and 13.0.0 differ in major version"));
    }

    #[test]
    fn test_malformed_version_is_an_error() {
        let result =
            handle_resolve_command("x", "1.0.0-rc.1", "1.0.0", true, OutputFormat::Json);
        assert!(result.is_err());
    }
}
