use std::path::Path;

use bank_rebalance::config::Config;
use bank_rebalance::models::loaders::{load_bank, save_bank};
use bank_rebalance::orchestrator::process_bank;
use bank_rebalance::services::verifier::MarkerSource;
use bank_rebalance::{App, CycleTable, RewriteRules, RunMode, Slot, Style};
use serde_json::{json, Value};

const MANIFEST: &str = r#"
[[groups]]
name = "laws"
style = "verb-led"
directories = ["laws"]
files = ["set-a.json", "absent.json"]

[[groups]]
name = "csk"
style = "clause-classifier"
directories = ["csk", "no-such-dir"]
pattern = '^csk-.*\.json$'

[cycles]
"set-a.json" = ["C", "A", "D", "B"]
"#;

fn question(id: &str, correct: &str, texts: [&str; 4]) -> Value {
    json!({
        "id": id,
        "question": format!("Stem of {}", id),
        "options": { "A": texts[0], "B": texts[1], "C": texts[2], "D": texts[3] },
        "correct_answer": correct,
        "explanation": {
            "correct": "Because it follows the statute.",
            "incorrect": {
                "B": format!("{} B is wrong.", id),
                "C": format!("{} C is wrong.", id),
                "D": format!("{} D is wrong.", id)
            }
        },
        "difficulty": "médio"
    })
}

fn laws_bank() -> Value {
    json!({
        "title": "Laws and Technology",
        "questions": [
            question("q1", "A", ["The statute governs data.", "Courts ignore it.", "Nothing changes.", "Only contracts matter."]),
            question("q2", "A", ["Consent is required.", "Consent is optional.", "Consent is banned.", "Consent is irrelevant."]),
            question("q3", "A", ["Regulators audit models.", "Nobody audits.", "Users audit.", "Vendors audit."]),
            question("q4", "A", ["Liability is shared.", "Liability vanishes.", "Liability is fixed.", "Liability is optional."])
        ]
    })
}

fn write_json(path: &Path, value: &Value) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn setup() -> (tempfile::TempDir, Config) {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("manifest.toml"), MANIFEST).unwrap();
    write_json(&root.path().join("laws/set-a.json"), &laws_bank());

    let config = Config {
        bank_root: root.path().display().to_string(),
        manifest_path: Some(root.path().join("manifest.toml").display().to_string()),
        max_concurrent_files: 2,
        verbose_logging: false,
        output_log_file: root.path().join("run.log").display().to_string(),
        dry_run: false,
    };
    (root, config)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_rebalance_moves_truth_and_keeps_other_fields() {
    let (root, config) = setup();
    let path = root.path().join("laws/set-a.json");

    let stats = App::initialize(config)
        .await
        .unwrap()
        .run(RunMode::Rebalance)
        .await
        .unwrap();

    assert_eq!(stats.processed, 1);
    assert_eq!(stats.missing, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.records, 4);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.ends_with("}\n") && !raw.ends_with("\n\n"));
    assert!(raw.contains("médio"));

    let bank = read_json(&path);
    assert_eq!(bank["title"], json!("Laws and Technology"));

    let letters: String = bank["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["correct_answer"].as_str().unwrap())
        .collect();
    assert_eq!(letters, "CADB");

    let q1 = &bank["questions"][0];
    assert_eq!(q1["options"]["C"], json!("Contends that the statute governs data."));
    assert_eq!(q1["options"]["A"], json!("Argues that nothing changes."));
    // 原来 C 的错误原因跟着文本移到 A，正确位置补空串
    assert_eq!(q1["explanation"]["incorrect"]["A"], json!("q1 C is wrong."));
    assert_eq!(q1["explanation"]["incorrect"]["C"], json!(""));
    assert_eq!(q1["question"], json!("Stem of q1"));

    let q2 = &bank["questions"][1];
    assert_eq!(q2["options"]["A"], json!("Argues that consent is required."));
    assert_eq!(q2["explanation"]["incorrect"]["B"], json!("q2 B is wrong."));
}

#[tokio::test]
async fn test_second_run_is_stable() {
    let (root, config) = setup();
    let path = root.path().join("laws/set-a.json");

    let app = App::initialize(config).await.unwrap();
    app.run(RunMode::Rebalance).await.unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    app.run(RunMode::Rebalance).await.unwrap();
    let second = std::fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_dry_run_leaves_files_untouched() {
    let (root, mut config) = setup();
    config.dry_run = true;
    let path = root.path().join("laws/set-a.json");
    let before = std::fs::read_to_string(&path).unwrap();

    let stats = App::initialize(config)
        .await
        .unwrap()
        .run(RunMode::Rebalance)
        .await
        .unwrap();

    assert_eq!(stats.processed, 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[tokio::test]
async fn test_pattern_group_uses_clause_classifier_style() {
    let (root, config) = setup();
    let path = root.path().join("csk/csk-module1.json");
    write_json(
        &path,
        &json!({ "questions": [question(
            "c1",
            "A",
            ["To support judicial independence", "Because judges are elected", "So that courts close", "Hybrid review applies"]
        )] }),
    );

    App::initialize(config)
        .await
        .unwrap()
        .run(RunMode::Rebalance)
        .await
        .unwrap();

    // csk-module1.json 没有配置循环，使用默认循环
    let bank = read_json(&path);
    let correct = Slot::parse(bank["questions"][0]["correct_answer"].as_str().unwrap()).unwrap();
    assert_eq!(
        bank["questions"][0]["options"][correct.key()],
        json!("Claims this emphasis supports judicial independence.")
    );
}

#[tokio::test]
async fn test_verify_reports_mismatches_without_writing() {
    let (root, config) = setup();
    let path = root.path().join("laws/set-a.json");
    let mut bank = laws_bank();
    bank["questions"][1]["correct_answer"] = json!("B");
    bank["questions"][1]["explanation"]["incorrect"]["D"] =
        json!("D is the correct answer here.");
    write_json(&path, &bank);
    let before = std::fs::read_to_string(&path).unwrap();

    let stats = App::initialize(config.clone())
        .await
        .unwrap()
        .run(RunMode::Verify)
        .await
        .unwrap();

    assert_eq!(stats.reports.len(), 1);
    let report = &stats.reports[0];
    assert_eq!(report.record_id, "q2");
    assert_eq!(report.declared.as_deref(), Some("B"));
    assert_eq!(report.observed, vec![Slot::D]);
    assert_eq!(report.source, MarkerSource::TextHeuristic);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);

    let log = std::fs::read_to_string(&config.output_log_file).unwrap();
    assert!(log.contains("[WARN]"));
    assert!(log.contains("q2 -> correct=B, flagged=[D]"));
}

#[tokio::test]
async fn test_verify_clean_bank_has_no_reports() {
    let (_root, config) = setup();
    let stats = App::initialize(config)
        .await
        .unwrap()
        .run(RunMode::Verify)
        .await
        .unwrap();
    assert!(stats.reports.is_empty());
    assert_eq!(stats.processed, 1);
}

#[tokio::test]
async fn test_invalid_cycle_override_aborts_initialization() {
    let (root, config) = setup();
    std::fs::write(
        root.path().join("manifest.toml"),
        "[cycles]\n\"set-a.json\" = [\"A\", \"A\", \"B\", \"C\"]\n",
    )
    .unwrap();
    assert!(App::initialize(config).await.is_err());
}

#[tokio::test]
async fn test_unparseable_bank_fails_the_run() {
    let (root, config) = setup();
    std::fs::write(root.path().join("laws/set-a.json"), "{ broken").unwrap();

    let result = App::initialize(config)
        .await
        .unwrap()
        .run(RunMode::Rebalance)
        .await;
    assert!(result.is_err());
}

#[test]
fn test_loader_and_processor_without_runtime_macro() {
    let (root, _config) = setup();
    let path = root.path().join("laws/set-a.json");

    tokio_test::block_on(async {
        let mut bank = load_bank(&path, Style::VerbLed).await.unwrap().unwrap();
        let stats = process_bank(
            &mut bank,
            &CycleTable::default(),
            &RewriteRules::default(),
            1,
        )
        .unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.distribution.iter().sum::<usize>(), 4);
        save_bank(&bank).await.unwrap();
    });

    assert!(read_json(&path)["questions"][0]["correct_answer"].is_string());
}
