//! End-to-end tests of `HttpClient` against the in-process fake backend.

mod common;

use booksum_core::api::{
    download_to, FileUpload, Operation, SummarizerApi, SummaryRequest,
};
use booksum_core::error::BooksumError;
use booksum_core::model::*;
use common::{spawn_backend, temp_dir, ADMIN_PASSWORD, ADMIN_USERNAME};

fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_persists_token_and_decodes_user() {
    let backend = spawn_backend().await;
    let client = backend.client();

    let session = client
        .login(&login_request(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap();
    assert!(session.is_admin(), "integer is_admin should decode as true");
    assert_eq!(session.user.username, "admin");
    assert_eq!(client.tokens().load(), Some(session.token.clone()));
}

#[tokio::test]
async fn test_login_failure_surfaces_detail() {
    let backend = spawn_backend().await;
    let client = backend.client();

    let err = client
        .login(&login_request(ADMIN_USERNAME, "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BooksumError::Api { op: Operation::Login, status: 401, .. }
    ));
    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(client.tokens().load().is_none());
}

#[tokio::test]
async fn test_bearer_header_present_only_with_token() {
    let backend = spawn_backend().await;
    let client = backend.client();

    let err = client.validate_session().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(backend.last_seen("/auth/me").unwrap().authorization, None);

    let session = client
        .login(&login_request(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap();
    let me = client.validate_session().await.unwrap();
    assert_eq!(me.id, session.user.id);
    assert_eq!(
        backend.last_seen("/auth/me").unwrap().authorization,
        Some(format!("Bearer {}", session.token))
    );
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let backend = spawn_backend().await;
    let client = backend.client();
    let request = RegisterRequest {
        username: "admin".into(),
        email: "x@example.com".into(),
        password: "secret1".into(),
        is_admin: false,
    };
    let err = client.register(&request).await.unwrap_err();
    assert_eq!(err.user_message(), "Username already exists");
}

#[tokio::test]
async fn test_text_summary_multipart_fields() {
    let backend = spawn_backend().await;
    let client = backend.client();
    client
        .register(&RegisterRequest {
            username: "reader".into(),
            email: "reader@example.com".into(),
            password: "secret1".into(),
            is_admin: false,
        })
        .await
        .unwrap();

    let request = SummaryRequest::from_text("Call me Ishmael. Some years ago, never mind how long.")
        .with_type(SummaryType::Bullet)
        .with_length(SummaryLength::Short);
    let created = client.create_summary(&request).await.unwrap();
    assert_eq!(created.summary_type, SummaryType::Bullet);
    assert_eq!(created.word_count, 5);

    let fields = backend.last_upload();
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["summary_type", "summary_length", "input_text"]);
    assert_eq!(fields[1].value, b"50");
}

#[tokio::test]
async fn test_file_summary_sends_filename_and_mime() {
    let backend = spawn_backend().await;
    let client = backend.client();
    client
        .login(&login_request(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap();

    let upload = FileUpload::new("chapter.txt", "text/plain", b"It was a bright cold day in April".to_vec());
    client
        .create_summary(&SummaryRequest::from_file(upload))
        .await
        .unwrap();

    let fields = backend.last_upload();
    let file = fields.iter().find(|f| f.name == "file").unwrap();
    assert_eq!(file.file_name.as_deref(), Some("chapter.txt"));
    assert_eq!(file.content_type.as_deref(), Some("text/plain"));
    assert!(fields.iter().all(|f| f.name != "input_text"));
}

#[tokio::test]
async fn test_summarize_without_session_is_unauthorized() {
    let backend = spawn_backend().await;
    let client = backend.client();
    let err = client
        .create_summary(&SummaryRequest::from_text("words"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_list_own_summaries_without_owner_fields() {
    let backend = spawn_backend().await;
    let reader_id = backend.seed_user("reader", "secret1");
    backend.seed_summary(reader_id, "first summary");
    backend.seed_summary(1, "admin's summary");

    let client = backend.client();
    client.login(&login_request("reader", "secret1")).await.unwrap();
    let summaries = client.list_summaries().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].summary_text, "first summary");
    assert_eq!(summaries[0].username, "");
    assert_eq!(summaries[0].user_id, 0);
}

#[tokio::test]
async fn test_download_lands_at_expected_name() {
    let backend = spawn_backend().await;
    let client = backend.client();
    client
        .login(&login_request(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap();
    let id = backend.seed_summary(1, "downloadable text");
    let dir = temp_dir("dl");

    let pdf = download_to(&client, &dir, &id, DownloadFormat::Pdf).await.unwrap();
    assert_eq!(pdf, dir.join(format!("summary_{id}.pdf")));
    assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF"));

    let txt = download_to(&client, &dir, &id, DownloadFormat::Txt).await.unwrap();
    assert_eq!(std::fs::read_to_string(&txt).unwrap(), "downloadable text");

    let mut names: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec![format!("summary_{id}.pdf"), format!("summary_{id}.txt")]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_download_missing_uses_error_key() {
    let backend = spawn_backend().await;
    let client = backend.client();
    client
        .login(&login_request(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap();
    let dir = temp_dir("dl-missing");

    let err = download_to(&client, &dir, "nope", DownloadFormat::Txt)
        .await
        .unwrap_err();
    assert!(matches!(err, BooksumError::Api { status: 404, .. }));
    assert_eq!(err.user_message(), "Summary not found");
    assert!(!dir.join("summary_nope.txt").exists());
}

#[tokio::test]
async fn test_download_id_with_reserved_chars_stays_on_download_route() {
    let backend = spawn_backend().await;
    let client = backend.client();
    client
        .login(&login_request(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap();

    // Unencoded, these would resolve to /api/admin/users or split the query.
    for id in ["../admin/users", "x?format=pdf", "a#b"] {
        let err = client
            .download_summary(id, DownloadFormat::Txt)
            .await
            .unwrap_err();
        assert!(
            matches!(err, BooksumError::Api { status: 404, .. }),
            "{id}: {err:?}"
        );
    }
}

#[tokio::test]
async fn test_admin_endpoints_require_admin() {
    let backend = spawn_backend().await;
    backend.seed_user("reader", "secret1");
    let client = backend.client();
    client.login(&login_request("reader", "secret1")).await.unwrap();

    let err = client.admin_list_users().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Admin access required");
}

#[tokio::test]
async fn test_admin_listings() {
    let backend = spawn_backend().await;
    let reader_id = backend.seed_user("reader", "secret1");
    backend.seed_summary(reader_id, "one");
    backend.seed_summary(reader_id, "two");
    backend.seed_summary(1, "three");

    let client = backend.client();
    client
        .login(&login_request(ADMIN_USERNAME, ADMIN_PASSWORD))
        .await
        .unwrap();

    let users = client.admin_list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    let reader = users.iter().find(|u| u.id == reader_id).unwrap();
    assert_eq!(reader.summary_count, 2);
    assert!(!reader.is_admin);

    let all = client.admin_list_summaries().await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().any(|s| s.username == "reader"));

    let theirs = client.admin_list_user_summaries(reader_id).await.unwrap();
    assert_eq!(theirs.len(), 2);
    assert!(theirs.iter().all(|s| s.user_id == reader_id));
    assert!(theirs.iter().all(|s| s.username == "reader"));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Bind and drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = booksum_core::api::HttpClient::new(
        &format!("http://{addr}/api"),
        "booksum-test",
        common::temp_token_store(),
    )
    .unwrap();
    let err = client
        .login(&login_request("a", "b"))
        .await
        .unwrap_err();
    assert!(matches!(err, BooksumError::Transport { op: Operation::Login, .. }));
    assert_eq!(err.user_message(), "Login failed. Please try again.");
}
