mod common;

use std::path::Path;
use std::sync::Arc;

use common::{auth_body, refresh_body};
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use mockito::Server;
use quizgate::cli::Command;
use quizgate::config::{extract_config, ConfigV1};
use quizgate::models::{TestType, TokenPair};
use quizgate::startup;
use quizgate::store::{FileStore, TokenStore};
use quizgate::store::file_store::FileStoreConfig;

fn load_test_config(base_url: &str, storage: &Path) -> Arc<ConfigV1> {
    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: "{}"
  timeout_in_ms: 5000
store:
  enabled: true
  type: file
  path: "{}"
routes:
  redirect_to: /login
logging:
  level: debug
  format: json
"#,
        base_url,
        storage.display()
    );

    let config = extract_config(Figment::new().merge(Yaml::string(&yaml)))
        .expect("Failed to parse test config YAML");
    Arc::new(config)
}

fn file_store(storage: &Path) -> FileStore {
    FileStore::new(&FileStoreConfig {
        path: storage.to_path_buf(),
    })
}

#[tokio::test]
async fn test_login_whoami_logout_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let storage = dir.path().join("storage.json");

    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(auth_body("t1", "r1", "qa@example.com"))
        .create_async()
        .await;
    let whoami = server
        .mock("GET", "/user")
        .match_header("authorization", "Bearer t1")
        .with_status(200)
        .with_body(r#"{"data": {"email": "qa@example.com"}}"#)
        .expect(1)
        .create_async()
        .await;
    let logout = server
        .mock("POST", "/auth/logout")
        .match_header("authorization", "Bearer t1")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let config = load_test_config(&server.url(), &storage);

    startup::run(
        config.clone(),
        Command::Login {
            email: "qa@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .await
    .expect("login should succeed");
    assert_eq!(
        file_store(&storage).load().await.unwrap(),
        Some(TokenPair::new("t1", "r1"))
    );

    // A fresh process picks the tokens up from the file.
    startup::run(config.clone(), Command::Whoami)
        .await
        .expect("whoami should succeed");
    whoami.assert_async().await;

    startup::run(config, Command::Logout)
        .await
        .expect("logout should succeed");
    logout.assert_async().await;
    assert_eq!(file_store(&storage).load().await.unwrap(), None);
}

#[tokio::test]
async fn test_rejected_login_fails_and_stores_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let storage = dir.path().join("storage.json");

    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/auth/login")
        .with_status(403)
        .with_body(r#"{"message": "Email or password is wrong"}"#)
        .expect(1)
        .create_async()
        .await;

    // JSON logging routes the warning through tracing rather than the console.
    let config = load_test_config(&server.url(), &storage);
    assert_eq!(config.logging.format, "json");

    let err = startup::run(
        config,
        Command::Login {
            email: "qa@example.com".to_string(),
            password: "wrong".to_string(),
        },
    )
    .await
    .unwrap_err();

    m.assert_async().await;
    assert_eq!(err.to_string(), "login failed");
    assert_eq!(file_store(&storage).load().await.unwrap(), None);
}

#[tokio::test]
async fn test_test_command_without_tokens_redirects() {
    let dir = tempfile::tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    let server = Server::new_async().await;
    let config = load_test_config(&server.url(), &storage);

    let err = startup::run(
        config,
        Command::Test {
            test_type: TestType::Tech,
        },
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("/login"), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_refresh_is_written_back_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    file_store(&storage)
        .save(&TokenPair::new("t1", "r1"))
        .await
        .unwrap();

    let mut server = Server::new_async().await;
    server
        .mock("GET", "/test/theory")
        .match_header("authorization", "Bearer t1")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", "/auth/refresh")
        .match_header("authorization", "Bearer r1")
        .with_status(200)
        .with_body(refresh_body("t2", "r2"))
        .create_async()
        .await;
    server
        .mock("GET", "/user")
        .with_status(200)
        .with_body(r#"{"data": {"email": "qa@example.com"}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/test/theory")
        .match_header("authorization", "Bearer t2")
        .with_status(200)
        .with_body(r#"{"questions": 12}"#)
        .create_async()
        .await;

    let config = load_test_config(&server.url(), &storage);
    startup::run(
        config,
        Command::Test {
            test_type: TestType::Theory,
        },
    )
    .await
    .expect("test fetch should succeed after refresh");

    assert_eq!(
        file_store(&storage).load().await.unwrap(),
        Some(TokenPair::new("t2", "r2"))
    );
}

#[tokio::test]
async fn test_submit_reads_answers_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = dir.path().join("storage.json");
    let answers = dir.path().join("answers.json");
    std::fs::write(&answers, r#"[{"questionId": "q1", "answer": "b"}]"#).unwrap();
    file_store(&storage)
        .save(&TokenPair::new("t1", "r1"))
        .await
        .unwrap();

    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/results/tech")
        .match_header("authorization", "Bearer t1")
        .match_body(mockito::Matcher::Json(
            serde_json::json!([{"questionId": "q1", "answer": "b"}]),
        ))
        .with_status(200)
        .with_body(r#"{"result": "100%"}"#)
        .create_async()
        .await;

    let config = load_test_config(&server.url(), &storage);
    startup::run(
        config,
        Command::Submit {
            test_type: TestType::Tech,
            answers,
        },
    )
    .await
    .expect("submit should succeed");
    m.assert_async().await;
}

#[tokio::test]
async fn test_menu_and_schema_need_no_backend() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_test_config("http://127.0.0.1:9", &dir.path().join("storage.json"));
    assert!(startup::run(config.clone(), Command::Menu).await.is_ok());
    assert!(startup::run(config, Command::Schema).await.is_ok());
}
