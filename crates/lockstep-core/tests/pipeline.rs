//! End-to-end runs of the analyzer over a temporary project.

use lockstep_config::LockstepConfig;
use lockstep_core::{Analyzer, Error, RunMode};
use lockstep_deps::ResolutionRecord;
use lockstep_fs::NativeFileSystem;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const YARN_LOCK: &str = r#"# yarn lockfile v1


"@react-native-community/netinfo@^9.0.0":
  version "9.3.7"

"@react-native-community/netinfo@^9.3.0":
  version "9.3.10"

lodash@^4.17.15:
  version "4.17.15"

lodash@^4.17.21:
  version "4.17.21"

react-native-svg@^12.1.0:
  version "12.1.0"

react-native-svg@^13.4.0:
  version "13.4.0"

react-native-camera@^4.2.1:
  version "4.2.1"
"#;

const PACKAGE_JSON: &str = r#"{
  "name": "mobile-app",
  "version": "1.0.0",
  "resolutions": {
    "left-pad": "1.3.0"
  }
}
"#;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn project(manifest: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "yarn.lock", YARN_LOCK);
    write(root, "package.json", manifest);
    write(
        root,
        "node_modules/@react-native-community/netinfo/android/src/NetInfoModule.java",
        "public class NetInfoModule extends ReactContextBaseJavaModule {}",
    );
    write(
        root,
        "node_modules/react-native-svg/ios/RNSVGSvgViewModule.m",
        "@interface RNSVGSvgViewModule : NSObject <RCTBridgeModule>\n@end",
    );
    write(
        root,
        "node_modules/react-native-camera/ios/RNCamera.swift",
        "class RNCamera: NSObject, RCTBridgeModule {}",
    );
    write(root, "node_modules/lodash/lodash.js", "module.exports = {};");
    temp_dir
}

fn analyzer(root: &Path) -> Analyzer<NativeFileSystem> {
    let fs = Arc::new(NativeFileSystem::new(root).unwrap());
    Analyzer::new(fs, LockstepConfig::default())
}

fn read_manifest(root: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(root.join("package.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[tokio::test]
async fn test_report_only_leaves_manifest_untouched() {
    let temp_dir = project(PACKAGE_JSON);

    let report = analyzer(temp_dir.path())
        .run(RunMode::ReportOnly)
        .await
        .unwrap();

    assert_eq!(report.statistics.total_packages, 4);
    assert_eq!(report.statistics.duplicate_packages, 3);
    assert_eq!(report.statistics.native_packages, 3);
    assert_eq!(
        report.native_duplicates.iter().collect::<Vec<_>>(),
        ["@react-native-community/netinfo", "react-native-svg"]
    );
    assert!(report.not_hoisted.is_empty());

    assert_eq!(
        report.resolutions.resolved["@react-native-community/netinfo"],
        "9.3.10"
    );
    assert!(report.resolutions.unresolvable.contains_key("react-native-svg"));
    assert!(!report.resolutions.resolved.contains_key("lodash"));

    assert_eq!(report.pin_changes.len(), 1);
    assert_eq!(report.pin_changes[0].new_version, "9.3.10");
    assert!(!report.creates_resolutions);
    assert!(!report.manifest_changed);
    assert!(report.has_pending_changes());
    assert!(report.has_unresolvable());

    let text = std::fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
    assert_eq!(text, PACKAGE_JSON);
}

#[tokio::test]
async fn test_write_mode_pins_and_is_idempotent() {
    let temp_dir = project(PACKAGE_JSON);
    let analyzer = analyzer(temp_dir.path());

    let first = analyzer.run(RunMode::Write).await.unwrap();
    assert!(first.manifest_changed);
    assert!(!first.has_pending_changes());

    let manifest = read_manifest(temp_dir.path());
    assert_eq!(
        manifest["resolutions"]["@react-native-community/netinfo"],
        "9.3.10"
    );
    assert_eq!(manifest["resolutions"]["left-pad"], "1.3.0");
    assert!(manifest["resolutions"].get("react-native-svg").is_none());
    assert_eq!(manifest["name"], "mobile-app");

    let after_first = std::fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
    let second = analyzer.run(RunMode::Write).await.unwrap();
    assert!(!second.manifest_changed);
    assert!(second.pin_changes.is_empty());
    let after_second = std::fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
    assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn test_write_mode_creates_resolutions() {
    let temp_dir = project("{\n  \"name\": \"mobile-app\"\n}\n");

    let report = analyzer(temp_dir.path()).run(RunMode::Write).await.unwrap();

    assert!(report.creates_resolutions);
    assert!(report.manifest_changed);
    let manifest = read_manifest(temp_dir.path());
    assert_eq!(
        manifest["resolutions"]["@react-native-community/netinfo"],
        "9.3.10"
    );
}

#[tokio::test]
async fn test_no_native_duplicates() {
    let temp_dir = project(PACKAGE_JSON);
    std::fs::remove_dir_all(temp_dir.path().join("node_modules/@react-native-community")).unwrap();
    std::fs::remove_dir_all(temp_dir.path().join("node_modules/react-native-svg")).unwrap();

    let report = analyzer(temp_dir.path()).run(RunMode::Write).await.unwrap();

    assert!(report.no_action_needed());
    assert!(report.pin_changes.is_empty());
    assert!(!report.manifest_changed);
    assert_eq!(report.resolutions, ResolutionRecord::default());
    let text = std::fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
    assert_eq!(text, PACKAGE_JSON);
}

#[tokio::test]
async fn test_malformed_lockfile_aborts_before_writing() {
    let temp_dir = project(PACKAGE_JSON);
    std::fs::write(temp_dir.path().join("yarn.lock"), "# empty\n").unwrap();

    let result = analyzer(temp_dir.path()).run(RunMode::Write).await;

    assert!(matches!(
        result,
        Err(Error::Deps(lockstep_deps::Error::MalformedLockfile(_)))
    ));
    let text = std::fs::read_to_string(temp_dir.path().join("package.json")).unwrap();
    assert_eq!(text, PACKAGE_JSON);
}

#[tokio::test]
async fn test_malformed_manifest_aborts() {
    let temp_dir = project("[\"not\", \"an\", \"object\"]\n");

    let result = analyzer(temp_dir.path()).run(RunMode::Write).await;

    assert!(matches!(
        result,
        Err(Error::Deps(lockstep_deps::Error::ManifestParse(_, _)))
    ));
}

#[tokio::test]
async fn test_peer_declarations_reported() {
    let temp_dir = project(
        r#"{
  "name": "mobile-lib",
  "peerDependencies": {
    "@react-native-community/netinfo": "^9.0.0",
    "react": "*"
  }
}
"#,
    );

    let report = analyzer(temp_dir.path())
        .run(RunMode::ReportOnly)
        .await
        .unwrap();

    assert_eq!(report.peer_declarations.len(), 1);
    let peer = &report.peer_declarations[0];
    assert_eq!(peer.package, "@react-native-community/netinfo");
    assert_eq!(peer.declared_range, "^9.0.0");
    assert_eq!(peer.resolved.as_deref(), Some("9.3.10"));
}

#[tokio::test]
async fn test_nested_native_package_counts_toward_its_parent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "yarn.lock",
        "foo@^1.0.0:\n  version \"1.0.0\"\n\nbar@^2.0.0:\n  version \"2.0.0\"\n",
    );
    write(root, "package.json", PACKAGE_JSON);
    write(root, "node_modules/foo/index.js", "module.exports = {};");
    write(
        root,
        "node_modules/foo/node_modules/bar/android/Bar.java",
        "class Bar extends ReactContextBaseJavaModule {}",
    );

    let report = analyzer(root).run(RunMode::ReportOnly).await.unwrap();

    assert_eq!(report.native_packages.iter().collect::<Vec<_>>(), ["foo"]);
    assert!(report.not_hoisted.is_empty());
}
