mod helpers;

use helpers::Sandbox;
use predicates::prelude::*;

// ═══════════════════════════════════════════════
// 1. create / list
// ═══════════════════════════════════════════════

#[test]
fn create_then_list() {
    let sb = Sandbox::new();

    sb.cli()
        .args(["create", "piloto", "--description", "primeira rodada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created: piloto"));

    assert!(sb.project_dir("piloto").join("project.json").is_file());
    assert!(sb.project_dir("piloto").join("transcripts").is_dir());

    sb.cli()
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("piloto")
                .and(predicate::str::contains("primeira rodada"))
                .and(predicate::str::contains("[empty]")),
        );
}

#[test]
fn file_writes_are_logged_to_stderr() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["create", "piloto"])
        .assert()
        .success()
        .stderr(predicate::str::contains("project created"));

    sb.write_transcript("piloto", "a.txt", "Eu gosto da escola. Foi bom.");
    sb.cli()
        .args(["-v", "analyze", "piloto", "--no-jitter"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("artifact written")
                .and(predicate::str::contains("report.md")),
        );
}

#[test]
fn list_without_projects_is_friendly() {
    let sb = Sandbox::new();
    sb.cli()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects"));
}

#[test]
fn create_duplicate_fails() {
    let sb = Sandbox::new();
    sb.cli().args(["create", "dup"]).assert().success();
    sb.cli()
        .args(["create", "dup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn create_rejects_invalid_name() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["create", "nome com espaço"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid project name"));
}

#[test]
fn projects_dir_flag_overrides_env() {
    let sb = Sandbox::new();
    let other = sb.home().join("elsewhere");
    sb.cli()
        .args(["--projects-dir", other.to_str().unwrap(), "create", "p"])
        .assert()
        .success();
    assert!(other.join("p").join("project.json").is_file());
    assert!(!sb.project_dir("p").exists());
}

// ═══════════════════════════════════════════════
// 2. analyze
// ═══════════════════════════════════════════════

#[test]
fn analyze_writes_outputs_per_transcript() {
    let sb = Sandbox::new();
    let dir = sb.project_with("escola", &["entrevista_escola.txt", "entrevista_trabalho.txt"]);

    sb.cli()
        .args(["analyze", "escola", "--no-jitter"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2 file(s) processed, 0 failed")
                .and(predicate::str::contains("mean coherence")),
        );

    for stem in ["entrevista_escola", "entrevista_trabalho"] {
        let out = dir.join("output").join(stem);
        assert!(out.join("analysis.json").is_file());
        assert!(out.join("report.md").is_file());
        assert!(out.join("charts.txt").is_file());
    }

    let json = std::fs::read_to_string(dir.join("output/entrevista_escola/analysis.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["filename"], "entrevista_escola.txt");
    assert!(value["global_metrics"]["thematic_coherence"].is_number());

    sb.cli()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[analysed]"));
}

#[test]
fn analyze_respects_output_toggles() {
    let sb = Sandbox::new();
    let dir = sb.project_with("p", &["entrevista_trabalho.txt"]);
    let config_path = dir.join("project.json");
    let mut config: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();
    config["output"]["generate_visuals"] = serde_json::json!(false);
    config["output"]["generate_markdown"] = serde_json::json!(false);
    std::fs::write(&config_path, config.to_string()).unwrap();

    sb.cli().args(["analyze", "p"]).assert().success();

    let out = dir.join("output/entrevista_trabalho");
    assert!(out.join("analysis.json").is_file());
    assert!(!out.join("report.md").exists());
    assert!(!out.join("charts.txt").exists());
}

#[test]
fn analyze_json_format_is_an_array() {
    let sb = Sandbox::new();
    sb.project_with("p", &["entrevista_escola.txt"]);

    let output = sb
        .cli()
        .args(["analyze", "p", "--format", "json", "--seed", "7"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0]["temporal_analysis"].as_array().unwrap().len() <= 5);
}

#[test]
fn empty_transcript_fails_run_but_others_succeed() {
    let sb = Sandbox::new();
    let dir = sb.project_with("p", &["entrevista_escola.txt"]);
    sb.write_transcript("p", "vazio.txt", "   \n\n  ");

    sb.cli()
        .args(["analyze", "p"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL  vazio.txt"))
        .stderr(predicate::str::contains("vazio.txt"));

    assert!(dir.join("output/entrevista_escola/analysis.json").is_file());
    assert!(!dir.join("output/vazio").exists());
}

#[test]
fn analyze_unknown_project_is_config_error() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["analyze", "fantasma"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project not found"));
}

#[test]
fn broken_project_config_aborts_run() {
    let sb = Sandbox::new();
    let dir = sb.project_with("p", &["entrevista_escola.txt"]);
    std::fs::write(dir.join("project.json"), "{ broken").unwrap();

    sb.cli()
        .args(["analyze", "p"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
    assert!(!dir.join("output/entrevista_escola").exists());
}

// ═══════════════════════════════════════════════
// 3. analyze-file
// ═══════════════════════════════════════════════

#[test]
fn analyze_file_prints_json() {
    let sb = Sandbox::new();
    let output = sb
        .cli()
        .args(["analyze-file", "--no-jitter"])
        .arg(helpers::fixture_path("entrevista_trabalho.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["filename"], "entrevista_trabalho.txt");
    assert!(value["word_frequencies"].as_array().unwrap().len() <= 50);
}

#[test]
fn analyze_file_markdown_with_config() {
    let sb = Sandbox::new();
    let cfg = sb.home().join("cfg.json");
    std::fs::write(
        &cfg,
        r#"{"project_name": "adhoc", "analysis": {"disabled_analyzers": ["contradiction_detection"]}}"#,
    )
    .unwrap();

    sb.cli()
        .args(["analyze-file", "--format", "markdown", "--config"])
        .arg(&cfg)
        .arg(helpers::fixture_path("entrevista_escola.txt"))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("# Transcript analysis: entrevista_escola.txt")
                .and(predicate::str::contains("## Global metrics"))
                .and(predicate::str::contains("None detected.")),
        );
}

#[test]
fn analyze_file_missing_input_fails() {
    let sb = Sandbox::new();
    sb.cli()
        .args(["analyze-file", "/nonexistent/entrevista.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input error"));
}

// ═══════════════════════════════════════════════
// 4. compare / analyzers
// ═══════════════════════════════════════════════

#[test]
fn compare_two_projects() {
    let sb = Sandbox::new();
    sb.project_with("a", &["entrevista_escola.txt"]);
    sb.project_with("b", &["entrevista_trabalho.txt", "entrevista_escola.txt"]);

    sb.cli()
        .args(["compare", "a", "b", "--no-jitter"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Compared 2 projects, 3 file(s)")
                .and(predicate::str::contains("Common themes: escola")),
        );
}

#[test]
fn compare_json_report() {
    let sb = Sandbox::new();
    sb.project_with("a", &["entrevista_escola.txt"]);
    sb.project_with("b", &["entrevista_trabalho.txt"]);

    let output = sb
        .cli()
        .args(["compare", "a", "b", "--format", "json", "--no-jitter"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["projects_compared"], 2);
    assert_eq!(value["projects"].as_array().unwrap().len(), 2);
}

#[test]
fn compare_reports_failed_transcripts_and_exits_nonzero() {
    let sb = Sandbox::new();
    sb.project_with("a", &["entrevista_escola.txt"]);
    sb.project_with("b", &["entrevista_trabalho.txt"]);
    sb.write_transcript("b", "vazio.txt", "   \n\n  ");

    sb.cli()
        .args(["compare", "a", "b", "--no-jitter"])
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("Compared 2 projects, 2 file(s)")
                .and(predicate::str::contains("1 file(s) failed:"))
                .and(predicate::str::contains("FAIL  b/vazio.txt")),
        );

    let output = sb
        .cli()
        .args(["compare", "a", "b", "--format", "json", "--no-jitter"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["failures"][0]["file"], "vazio.txt");
    assert_eq!(value["projects"][1]["failed_files"], 1);
}

#[test]
fn compare_needs_two_projects() {
    let sb = Sandbox::new();
    sb.project_with("a", &["entrevista_escola.txt"]);
    sb.cli().args(["compare", "a"]).assert().failure();
}

#[test]
fn analyzers_lists_registry() {
    let sb = Sandbox::new();
    sb.cli()
        .arg("analyzers")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("word_frequency")
                .and(predicate::str::contains("contradiction_detection")),
        );
}
