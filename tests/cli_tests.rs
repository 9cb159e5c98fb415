use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rts_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("rts"))
}

fn init_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    rts_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();
    temp_dir
}

fn answer(dir: &TempDir, answer: &str) {
    rts_cmd()
        .args(["answer", answer])
        .current_dir(dir.path())
        .assert()
        .success();
}

fn json_output(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = rts_cmd()
        .args(args)
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?} failed", args);
    serde_json::from_slice(&output.stdout).unwrap()
}

fn state_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path()
        .join(".rts")
        .join("local")
        .join("rts_area_state_v1.json")
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    rts_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("questionnaire"));
}

#[test]
fn test_version() {
    rts_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rts"));
}

#[test]
fn test_not_initialized_error() {
    let temp_dir = TempDir::new().unwrap();

    rts_cmd()
        .arg("status")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("not initialized")
                .or(predicate::str::contains("Failed to load")),
        );
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();

    rts_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(temp_dir.path().join(".rts.toml").exists());
    assert!(temp_dir.path().join(".rts").join("local").is_dir());
}

#[test]
fn test_init_with_custom_endpoint() {
    let temp_dir = TempDir::new().unwrap();

    rts_cmd()
        .args(["init", "--endpoint", "http://127.0.0.1:9/leads"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    let config = std::fs::read_to_string(temp_dir.path().join(".rts.toml")).unwrap();
    assert!(config.contains("http://127.0.0.1:9/leads"));
}

#[test]
fn test_init_twice_fails() {
    let temp_dir = init_project();

    rts_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

// =============================================================================
// Questionnaire
// =============================================================================

#[test]
fn test_show_starts_on_first_question() {
    let temp_dir = init_project();

    rts_cmd()
        .arg("show")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("immobili"));
}

#[test]
fn test_answer_advances_and_persists() {
    let temp_dir = init_project();

    rts_cmd()
        .args(["answer", "yes", "--note", "tre sedi"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded"))
        .stdout(predicate::str::contains("consumi"));

    let blob: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(state_file(&temp_dir)).unwrap()).unwrap();
    assert_eq!(blob["currentStepId"], "consumi");
    assert_eq!(blob["answers"]["immobili"], "yes");
    assert_eq!(blob["notes"]["immobili"], "tre sedi");
    assert_eq!(blob["history"], serde_json::json!(["immobili"]));
    assert!(blob["lastUpdated"].is_string());
}

#[test]
fn test_answer_json_reports_transition() {
    let temp_dir = init_project();

    let result = json_output(&temp_dir, &["answer", "no", "--json"]);
    assert_eq!(result["answered"], "immobili");
    assert_eq!(result["next"], "consumi");
    assert_eq!(result["complete"], false);
    assert_eq!(result["completion"], 10);
}

#[test]
fn test_full_questionnaire_completes() {
    let temp_dir = init_project();

    for _ in 0..9 {
        answer(&temp_dir, "yes");
    }

    rts_cmd()
        .args(["answer", "yes"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Questionario completato"))
        .stdout(predicate::str::contains("Percorso CER/CEC prioritario"));

    let status = json_output(&temp_dir, &["status", "--json"]);
    assert_eq!(status["completion"], 100);
    assert_eq!(status["current_step"], "certo_user");

    let outcome = json_output(&temp_dir, &["outcome", "--json"]);
    assert_eq!(outcome["status"], "Valutazione completata");
    assert_eq!(outcome["responses"].as_array().unwrap().len(), 10);
    assert_eq!(
        outcome["indications"],
        serde_json::json!([
            "Percorso CER/CEC prioritario",
            "Percorso Conto Termico prioritario",
            "Percorso Rigenerazione immobiliare prioritario"
        ])
    );
}

#[test]
fn test_outcome_fallback_when_nothing_matches() {
    let temp_dir = init_project();
    answer(&temp_dir, "no");

    let outcome = json_output(&temp_dir, &["outcome", "--json"]);
    assert_eq!(outcome["status"], "Valutazione in corso");
    assert_eq!(
        outcome["indications"],
        serde_json::json!(["È necessaria un’analisi tecnica preliminare aggiuntiva."])
    );
}

#[test]
fn test_back_restores_previous_question() {
    let temp_dir = init_project();
    answer(&temp_dir, "yes");
    answer(&temp_dir, "yes");
    answer(&temp_dir, "yes");

    rts_cmd()
        .arg("back")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("consumi"));

    let shown = json_output(&temp_dir, &["show", "--json"]);
    assert_eq!(shown["step"]["id"], "consumi");
    assert_eq!(shown["answer"], "yes");
}

#[test]
fn test_note_without_answer() {
    let temp_dir = init_project();

    rts_cmd()
        .args(["note", "bollette disponibili"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    let shown = json_output(&temp_dir, &["show", "--json"]);
    assert_eq!(shown["note"], "bollette disponibili");
    assert!(shown["answer"].is_null());
    assert_eq!(shown["completion"], 0);
}

#[test]
fn test_corrupt_state_falls_back_to_defaults() {
    let temp_dir = init_project();
    std::fs::write(state_file(&temp_dir), "{definitely not json").unwrap();

    let status = json_output(&temp_dir, &["status", "--json"]);
    assert_eq!(status["completion"], 0);
    assert_eq!(status["current_step"], "immobili");
    assert_eq!(status["last_updated"], "Non disponibile");
}

#[test]
fn test_state_with_null_fields_keeps_answers() {
    let temp_dir = init_project();
    std::fs::write(
        state_file(&temp_dir),
        r#"{"currentStepId":"cer","answers":{"immobili":"yes","consumi":"yes"},"notes":null}"#,
    )
    .unwrap();

    answer(&temp_dir, "yes");

    let summary = json_output(&temp_dir, &["summary"]);
    assert_eq!(summary["answers"]["immobili"], "yes");
    assert_eq!(summary["answers"]["consumi"], "yes");
    assert_eq!(summary["answers"]["cer"], "yes");
    assert_eq!(summary["currentStepId"], "governance");
}

#[test]
fn test_interactive_wizard() {
    let temp_dir = init_project();

    rts_cmd()
        .arg("wizard")
        .current_dir(temp_dir.path())
        .write_stdin("s\nforse\nNota bollette 2024\nn\nb\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Risposta non valida"))
        .stdout(predicate::str::contains("Nota salvata"))
        .stdout(predicate::str::contains("Progresso salvato"));

    let state = json_output(&temp_dir, &["summary"]);
    assert_eq!(state["answers"]["immobili"], "yes");
    assert_eq!(state["answers"]["consumi"], "no");
    assert_eq!(state["notes"]["consumi"], "bollette 2024");
    assert_eq!(state["currentStepId"], "immobili");
}

#[test]
fn test_reset_force_clears_everything() {
    let temp_dir = init_project();
    answer(&temp_dir, "yes");
    rts_cmd()
        .args(["contact", "--nome", "Anna"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    rts_cmd()
        .args(["reset", "--force"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset"));

    assert!(!state_file(&temp_dir).exists());
    let summary = json_output(&temp_dir, &["summary"]);
    assert!(summary["userContact"].is_null());
    assert_eq!(summary["answers"], serde_json::json!({}));
}

#[test]
fn test_reset_cancelled_keeps_answers() {
    let temp_dir = init_project();
    answer(&temp_dir, "yes");

    rts_cmd()
        .arg("reset")
        .current_dir(temp_dir.path())
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    assert!(state_file(&temp_dir).exists());
}

// =============================================================================
// Contact and leads
// =============================================================================

#[test]
fn test_contact_registration() {
    let temp_dir = init_project();

    rts_cmd()
        .args([
            "contact",
            "--nome",
            "Maria Rossi",
            "--ente",
            "Associazione Aurora",
            "--email",
            "maria@aurora.org",
            "--privacy",
        ])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Richiesta registrata"));

    assert!(
        temp_dir
            .path()
            .join(".rts/local/userContact.json")
            .exists()
    );
    let summary = json_output(&temp_dir, &["summary", "--lead-type", "contact"]);
    assert_eq!(summary["leadType"], "contact");
    assert_eq!(summary["userContact"]["ente"], "Associazione Aurora");
    assert_eq!(summary["userContact"]["privacy"], true);
}

#[test]
fn test_contact_rejects_bad_email() {
    let temp_dir = init_project();

    rts_cmd()
        .args(["contact", "--email", "not-an-email"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email"));
}

#[test]
fn test_lead_build_merges_sources() {
    let temp_dir = init_project();
    answer(&temp_dir, "yes");
    rts_cmd()
        .args(["contact", "--nome", "Luca", "--telefono", "011 555"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    let payload = json_output(
        &temp_dir,
        &[
            "lead",
            "build",
            "-f",
            "email= luca@stella.org ",
            "--hidden",
            "org_type=odv",
            "--session",
            "wizard_cache={broken",
            "--global",
            r#"wizardState={"esito":{"percorso":"cer"},"punteggio":7}"#,
            "--page-url",
            "https://www.rts-terzosettore.it/area-riservata/esito",
        ],
    );

    assert_eq!(payload["source_site"], "rts");
    assert_eq!(payload["org_type"], "odv");
    assert_eq!(payload["lead_type"], "esito");
    assert_eq!(payload["email"], "luca@stella.org");
    assert_eq!(payload["full_name"], "Luca");
    assert_eq!(payload["phone"], "011 555");
    assert!(payload.get("attachments").is_none());

    let wizard_state: serde_json::Value =
        serde_json::from_str(payload["wizard_state"].as_str().unwrap()).unwrap();
    assert_eq!(wizard_state["selections"]["immobili"], "yes");
    assert_eq!(wizard_state["selections"]["org_type"], "odv");
    assert_eq!(wizard_state["result"]["percorso"], "cer");
    assert_eq!(wizard_state["result"]["punteggio"], 7);
}

#[test]
fn test_lead_build_with_attachment() {
    let temp_dir = init_project();
    std::fs::write(temp_dir.path().join("bolletta.pdf"), vec![1u8; 64]).unwrap();

    let payload = json_output(
        &temp_dir,
        &["lead", "build", "--attach", "bolletta.pdf", "-t", "contact"],
    );
    assert_eq!(payload["lead_type"], "contact");
    assert_eq!(
        payload["attachments"],
        serde_json::json!([{"name": "bolletta.pdf", "size": 64, "type": "application/pdf"}])
    );
}

#[test]
fn test_lead_submit_unreachable_endpoint_fails() {
    let temp_dir = init_project();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/leads", listener.local_addr().unwrap());
    drop(listener);

    rts_cmd()
        .args(["lead", "submit", "-f", "nome=Anna", "--endpoint", &endpoint])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invio non riuscito"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_lead_submit_success() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/leads"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = init_project();
    let endpoint = format!("{}/leads", server.uri());

    let output = tokio::task::spawn_blocking({
        let dir = temp_dir.path().to_path_buf();
        move || {
            rts_cmd()
                .args(["lead", "submit", "--json", "-f", "ente=ODV Stella"])
                .env("RTS_ENDPOINT", endpoint)
                .current_dir(dir)
                .output()
                .unwrap()
        }
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["success"], true);
    assert_eq!(result["payload"]["org_name"], "ODV Stella");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}
