//! End-to-end test suite for orphanscan-core.

use crate::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_file(file: &Path, content: &str) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn setup_temp_project() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("orphanscan_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn unused_of(root: &Path) -> Vec<String> {
    Scanner::new(root).analyze().unused
}

// Scenario: one unreferenced component, one referenced from app/
#[test]
fn test_button_and_card() {
    let root = setup_temp_project();
    write_file(&root.join("components/Button.tsx"), "export const Button = () => null;");
    write_file(&root.join("components/Card.tsx"), "export const Card = () => null;");
    write_file(
        &root.join("app/Home.tsx"),
        "import { Card } from '../components/Card';\nexport default () => <Card />;",
    );

    let mut stdout = Vec::<u8>::new();
    let outcome = Scanner::new(&root)
        .run_with_output(OutputFormat::Plain, &mut stdout)
        .unwrap();
    assert_eq!(outcome.unused, vec!["components/Button.tsx"]);
    assert_eq!(stdout, b"DELETE: components/Button.tsx\n");
    assert_eq!(
        fs::read_to_string(root.join("unused_files.txt")).unwrap(),
        "components/Button.tsx\n"
    );

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_button_and_card_json_output() {
    let root = setup_temp_project();
    write_file(&root.join("components/Button.tsx"), "");
    write_file(&root.join("components/Card.tsx"), "");
    write_file(&root.join("app/Home.tsx"), "<Card />");

    let mut stdout = Vec::<u8>::new();
    Scanner::new(&root)
        .run_with_output(OutputFormat::Json, &mut stdout)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "unused": ["components/Button.tsx"] }));
    // The report file stays one path per line regardless of stdout format
    assert_eq!(
        fs::read_to_string(root.join("unused_files.txt")).unwrap(),
        "components/Button.tsx\n"
    );

    fs::remove_dir_all(&root).ok();
}

// Scenario: nothing to scan still produces an empty report
#[test]
fn test_empty_project_writes_empty_report() {
    let root = setup_temp_project();

    let mut stdout = Vec::<u8>::new();
    let outcome = Scanner::new(&root)
        .run_with_output(OutputFormat::Plain, &mut stdout)
        .unwrap();
    assert!(stdout.is_empty(), "nothing should be printed");
    assert_eq!(outcome.total_candidates, 0);
    assert_eq!(outcome.corpus_files, 0);
    assert!(outcome.unused.is_empty());

    let report = root.join("unused_files.txt");
    assert!(report.exists());
    assert_eq!(fs::read_to_string(report).unwrap(), "");

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_every_eligible_file_is_a_candidate_once() {
    let root = setup_temp_project();
    let files = [
        "components/A.tsx",
        "components/nested/deeper/B.ts",
        "hooks/useC.js",
        "utils/d.jsx",
        "state/store.ts",
        "api/client.ts",
    ];
    for f in &files {
        write_file(&root.join(f), "");
    }

    let cands = collect_candidates(&root, &ScanConfig::default());
    for f in &files {
        let hits = cands.iter().filter(|c| c.relative == *f).count();
        assert_eq!(hits, 1, "{} should be collected exactly once", f);
    }
    assert_eq!(cands.len(), files.len());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_tests_dirs_never_candidates() {
    let root = setup_temp_project();
    write_file(&root.join("components/__tests__/Orphan.tsx"), "");
    write_file(&root.join("hooks/__tests__/deep/useOrphan.ts"), "");
    write_file(&root.join("components/Kept.tsx"), "");

    let cands = collect_candidates(&root, &ScanConfig::default());
    assert_eq!(cands.len(), 1);
    assert_eq!(cands[0].relative, "components/Kept.tsx");
    assert_eq!(unused_of(&root), vec!["components/Kept.tsx"]);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_word_boundary_in_scan() {
    let root = setup_temp_project();
    write_file(&root.join("components/Tab.tsx"), "export const Tab = 1;");
    write_file(
        &root.join("app/_layout.tsx"),
        "import TabBarIcon from '../components/TabBarIcon';",
    );
    assert_eq!(unused_of(&root), vec!["components/Tab.tsx"]);

    for usage in ["<Tab />", "route: 'tab'", "TAB_KEY = 'TAB'"] {
        write_file(&root.join("app/screen.tsx"), usage);
        assert!(unused_of(&root).is_empty(), "'{}' should count as usage", usage);
    }

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_self_reference_does_not_count() {
    let root = setup_temp_project();
    write_file(
        &root.join("utils/format.ts"),
        "// format helpers\nexport function format() { return format; }",
    );

    assert_eq!(unused_of(&root), vec!["utils/format.ts"]);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_reference_from_other_candidate_counts() {
    let root = setup_temp_project();
    write_file(&root.join("hooks/useAuth.ts"), "import { api } from '../api/session';");
    write_file(&root.join("api/session.ts"), "export const api = 1;");

    // session is referenced by useAuth; useAuth is referenced by nobody
    assert_eq!(unused_of(&root), vec!["hooks/useAuth.ts"]);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_root_files_are_searched() {
    let root = setup_temp_project();
    write_file(&root.join("components/Splash.tsx"), "");
    write_file(&root.join("App.tsx"), "import Splash from './components/Splash';");

    assert!(unused_of(&root).is_empty());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_json_corpus_files_are_searched() {
    let root = setup_temp_project();
    write_file(&root.join("components/Onboarding.tsx"), "");
    write_file(&root.join("constants/routes.json"), "{\"first\": \"Onboarding\"}");

    assert!(unused_of(&root).is_empty());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_node_modules_are_not_searched() {
    let root = setup_temp_project();
    write_file(&root.join("components/Modal.tsx"), "");
    write_file(&root.join("app/node_modules/pkg/index.js"), "Modal");

    assert_eq!(unused_of(&root), vec!["components/Modal.tsx"]);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_invalid_utf8_does_not_abort() {
    let root = setup_temp_project();
    write_file(&root.join("components/Badge.tsx"), "");
    fs::create_dir_all(root.join("app")).unwrap();
    fs::write(root.join("app/a_binary.js"), [0xff, 0xfe, 0x00, 0x80, 0xc3]).unwrap();
    write_file(&root.join("app/z_screen.tsx"), "<Badge />");

    assert!(unused_of(&root).is_empty());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_previous_report_is_not_a_reference() {
    let root = setup_temp_project();
    write_file(&root.join("components/Stale.tsx"), "");

    let first = Scanner::new(&root).run(OutputFormat::Plain).unwrap();
    assert_eq!(first.unused, vec!["components/Stale.tsx"]);

    // The report now mentions Stale; a config listing "." must still not search it
    let second = Scanner::new(&root)
        .search_dirs([".", "components"])
        .run(OutputFormat::Plain)
        .unwrap();
    assert_eq!(second.unused, first.unused);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_idempotent_report() {
    let root = setup_temp_project();
    write_file(&root.join("components/Z.tsx"), "");
    write_file(&root.join("components/A.tsx"), "");
    write_file(&root.join("hooks/useX.ts"), "");

    Scanner::new(&root).run(OutputFormat::Plain).unwrap();
    let first = fs::read(root.join("unused_files.txt")).unwrap();
    Scanner::new(&root).run(OutputFormat::Json).unwrap();
    let second = fs::read(root.join("unused_files.txt")).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        String::from_utf8(first).unwrap(),
        "components/A.tsx\ncomponents/Z.tsx\nhooks/useX.ts\n"
    );

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_config_file_drives_scan() {
    let root = setup_temp_project();
    write_file(&root.join("src/widgets/Gauge.tsx"), "");
    write_file(&root.join("src/widgets/LegacyDial.tsx"), "");
    write_file(&root.join("components/Unscanned.tsx"), "");
    write_file(
        &root.join(config::CONFIG_FILE),
        "candidate_dirs = [\"src\"]\nsearch_dirs = [\"src\"]\nignore = [\"Legacy*\"]\n[output]\nfile = \"reports/dead.txt\"\n",
    );

    let mut cfg = ScanConfig::default();
    cfg.apply(load_config(&root).unwrap().unwrap());

    let outcome = Scanner::new(&root)
        .with_config(cfg)
        .run(OutputFormat::Plain)
        .unwrap();
    assert_eq!(outcome.unused, vec!["src/widgets/Gauge.tsx"]);
    assert_eq!(
        fs::read_to_string(root.join("reports/dead.txt")).unwrap(),
        "src/widgets/Gauge.tsx\n"
    );

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_report_write_failure_propagates() {
    let root = setup_temp_project();
    // A directory where the report file should go makes the write fail
    fs::create_dir_all(root.join("unused_files.txt")).unwrap();

    let err = Scanner::new(&root).run(OutputFormat::Plain).unwrap_err();
    assert!(matches!(err, ScanError::Io { .. }));

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_report_outside_root_is_rejected() {
    let base = setup_temp_project();
    let root = base.join("proj");
    write_file(&root.join("components/Orphan.tsx"), "");
    write_file(
        &root.join(config::CONFIG_FILE),
        "[output]\nfile = \"../escaped.txt\"\n",
    );

    let mut cfg = ScanConfig::default();
    cfg.apply(load_config(&root).unwrap().unwrap());

    let mut stdout = Vec::<u8>::new();
    let err = Scanner::new(&root)
        .with_config(cfg)
        .run_with_output(OutputFormat::Plain, &mut stdout)
        .unwrap_err();
    assert!(matches!(err, ScanError::InvalidArgument { .. }));
    assert!(!base.join("escaped.txt").exists());
    assert!(stdout.is_empty());

    fs::remove_dir_all(&base).ok();
}
