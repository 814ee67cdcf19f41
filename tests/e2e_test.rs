/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const GEARBOX: &str = "tests/fixtures/gearbox.json";

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("bom-explorer")
            .args(["show", "--snapshot", GEARBOX])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("bom-explorer").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("bom-explorer")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("bom-explorer")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("bom-explorer")
            .args(["show", "--snapshot", GEARBOX, "-f", "markdown"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - missing snapshot
    #[test]
    fn test_exit_code_missing_snapshot() {
        cargo_bin_cmd!("bom-explorer")
            .args(["show", "--snapshot", "/nonexistent/bom.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("BOM snapshot not found"));
    }

    /// Exit code 3: Application error - no data source at all
    #[test]
    fn test_exit_code_no_source() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("bom-explorer")
            .current_dir(dir.path())
            .args(["show"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("--snapshot or --api-url"));
    }

    /// Exit code 3: Application error - invalid API URL
    #[test]
    fn test_exit_code_invalid_api_url() {
        cargo_bin_cmd!("bom-explorer")
            .args(["show", "--api-url", "ftp://erp", "--bom", "B-100"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid API URL"));
    }

    /// Exit code 4: Operation blocked by an ERP lock
    #[test]
    fn test_exit_code_operation_blocked() {
        cargo_bin_cmd!("bom-explorer")
            .args([
                "plan-drop",
                "--snapshot",
                GEARBOX,
                "--node",
                "SEAL-20-GBX.HSG.SEAL",
                "--x",
                "5",
                "--width",
                "100",
                "--item",
                "SEAL-2",
            ])
            .assert()
            .code(4)
            .stderr(predicate::str::contains("read-only"));
    }
}

mod show_tests {
    use super::*;

    #[test]
    fn test_show_tree() {
        cargo_bin_cmd!("bom-explorer")
            .args(["show", "--snapshot", GEARBOX])
            .assert()
            .success()
            .stdout(predicate::str::contains("BOM B-100 v1 · GBX - Gearbox"))
            .stdout(predicate::str::contains("├── HSG - Housing  x1 PZ"))
            .stdout(predicate::str::contains(
                "⚙ 10 MILL Milling @ CNC (CNC machining)  setup 00:30:00  run 00:45:00",
            ))
            .stdout(predicate::str::contains("BRG - Bearing  x4 PZ  🔒"))
            .stdout(predicate::str::contains("6 components, 3 routing steps"));
    }

    #[test]
    fn test_show_json() {
        let output = cargo_bin_cmd!("bom-explorer")
            .args(["show", "--snapshot", GEARBOX, "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["tool"]["name"], "bom-explorer");
        assert_eq!(json["summary"]["componentCount"], 6);
        assert_eq!(json["roots"][0]["id"], "GBX-0-GBX");
        assert_eq!(json["roots"][0]["type"], "component");
        assert_eq!(json["roots"][0]["data"]["BOMId"], "B-100");
        assert!(json["anomalies"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_show_multilevel_truncates() {
        cargo_bin_cmd!("bom-explorer")
            .args(["show", "--snapshot", GEARBOX, "--multilevel", "--max-level", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("4 components"))
            .stdout(predicate::str::contains("CAST").not());
    }

    #[test]
    fn test_show_reports_anomalies() {
        cargo_bin_cmd!("bom-explorer")
            .args(["show", "--snapshot", "tests/fixtures/no_root.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("structure anomalies"))
            .stderr(predicate::str::contains("promoted to root"));
    }

    #[test]
    fn test_show_bom_mismatch_is_an_error() {
        cargo_bin_cmd!("bom-explorer")
            .args(["show", "--snapshot", GEARBOX, "--bom", "B-999"])
            .assert()
            .code(3);
    }

    #[test]
    fn test_show_output_file() {
        let dir = TempDir::new().unwrap();
        let output_path = dir.path().join("gearbox.txt");

        cargo_bin_cmd!("bom-explorer")
            .args(["show", "--snapshot", GEARBOX, "--output"])
            .arg(&output_path)
            .assert()
            .success()
            .stderr(predicate::str::contains("Output written"));

        let written = std::fs::read_to_string(&output_path).unwrap();
        assert!(written.starts_with("BOM B-100"));
    }

    #[test]
    fn test_show_output_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("bom-explorer")
            .args(["show", "--snapshot", GEARBOX, "--output"])
            .arg(dir.path().join("missing/out.txt"))
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Parent directory does not exist"));
    }
}

mod classify_tests {
    use super::*;

    fn classify(level: &str, x: &str) -> assert_cmd::assert::Assert {
        cargo_bin_cmd!("bom-explorer")
            .args(["classify", "--level", level, "--x", x, "--width", "100"])
            .assert()
    }

    #[test]
    fn test_root_level_zones() {
        classify("0", "10").success().stdout("replace\n");
        classify("1", "50").success().stdout("addUnder\n");
        classify("0", "90").success().stdout("addSibling\n");
    }

    #[test]
    fn test_nested_level_has_two_zones() {
        classify("2", "10").success().stdout("replace\n");
        classify("2", "50").success().stdout("addUnder\n");
        classify("2", "90").success().stdout("addUnder\n");
    }

    #[test]
    fn test_force_replace() {
        cargo_bin_cmd!("bom-explorer")
            .args([
                "classify",
                "--level",
                "0",
                "--x",
                "90",
                "--width",
                "100",
                "--force-replace",
            ])
            .assert()
            .success()
            .stdout("replace\n");
    }
}

mod lock_tests {
    use super::*;

    fn lock(node: &str, operation: &str) -> assert_cmd::assert::Assert {
        cargo_bin_cmd!("bom-explorer")
            .args([
                "lock",
                "--snapshot",
                GEARBOX,
                "--node",
                node,
                "--operation",
                operation,
            ])
            .assert()
    }

    #[test]
    fn test_lock_asymmetry() {
        lock("SEAL-20-GBX.HSG.SEAL", "replace")
            .success()
            .stdout("locked\n");
        lock("SEAL-20-GBX.HSG.SEAL", "add-sibling")
            .success()
            .stdout("unlocked\n");
    }

    #[test]
    fn test_root_level_parent_bom_lock() {
        lock("BRG-30-GBX.BRG", "add-sibling")
            .success()
            .stdout("locked\n");
        lock("SHAFT-20-GBX.SHAFT", "delete")
            .success()
            .stdout("unlocked\n");
    }

    #[test]
    fn test_unknown_node() {
        lock("NOPE-1-NOPE", "modify")
            .code(3)
            .stderr(predicate::str::contains("Node not found"));
    }

    #[test]
    fn test_cycle_node_is_rejected() {
        lock("GBX-0-GBX/cycle-10", "modify")
            .code(3)
            .stderr(predicate::str::contains("routing step"));
    }

    #[test]
    fn test_invalid_operation_is_a_usage_error() {
        lock("GBX-0-GBX", "move").code(2);
    }
}

mod plan_drop_tests {
    use super::*;

    fn plan(extra: &[&str]) -> std::process::Output {
        cargo_bin_cmd!("bom-explorer")
            .args(["plan-drop", "--snapshot", GEARBOX, "--width", "100"])
            .args(extra)
            .output()
            .unwrap()
    }

    #[test]
    fn test_add_sibling_plan() {
        let output = plan(&["--node", "HSG-10-GBX.HSG", "--x", "95", "--item", "COVER"]);
        assert!(output.status.success());

        let intent: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(intent["action"], "add-component");
        assert_eq!(intent["bomId"], "B-100");
        assert_eq!(intent["parentComponentId"], "GBX");
        assert_eq!(intent["afterLine"], 10);
        assert_eq!(intent["source"]["itemId"], "COVER");
    }

    #[test]
    fn test_replace_with_temporary_code() {
        let output = plan(&[
            "--node",
            "SHAFT-20-GBX.SHAFT",
            "--x",
            "10",
            "--temporary",
            "Hardened shaft",
            "--uom",
            "PZ",
        ]);
        assert!(output.status.success());

        let intent: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(intent["action"], "replace-component-with-new-temporary-code");
        assert_eq!(intent["bomId"], "B-100");
        assert_eq!(intent["componentId"], "SHAFT");
        assert_eq!(intent["line"], 20);
        assert_eq!(intent["description"], "Hardened shaft");
    }

    #[test]
    fn test_force_replace_overrides_zone() {
        let output = plan(&[
            "--node",
            "CAST-10-GBX.HSG.CAST",
            "--x",
            "90",
            "--force-replace",
            "--item",
            "CAST-B",
        ]);
        assert!(output.status.success());

        let intent: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(intent["action"], "replace-component-with-existing");
        assert_eq!(intent["bomId"], "B-110");
        assert_eq!(intent["itemId"], "CAST-B");
    }

    #[test]
    fn test_purchased_target_refuses_children() {
        let output = plan(&["--node", "CAST-10-GBX.HSG.CAST", "--x", "90", "--item", "X"]);
        assert_eq!(output.status.code(), Some(4));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("is purchased"));
    }
}
