use seaf_api::{ApiErrorKind, DirentType, SeafileClient};
use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hex(c: char) -> String {
    std::iter::repeat_n(c, 40).collect()
}

#[tokio::test]
async fn list_directory_includes_token_header_and_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/dir/"))
        .and(query_param("p", "/Docs"))
        .and(header("authorization", "Token test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("oid", hex('a').as_str())
                .set_body_json(json!([
                    {"name": "a.txt", "id": hex('b'), "type": "file", "size": 5, "mtime": 1700000000},
                    {"name": "Sub", "id": hex('c'), "type": "dir"}
                ])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let dirents = client.list_directory("repo-1", "/Docs").await.unwrap();

    assert_eq!(dirents.len(), 2);
    assert_eq!(dirents[0].name, "a.txt");
    assert_eq!(dirents[0].kind, DirentType::File);
    assert_eq!(dirents[0].id.as_str(), hex('b'));
    assert_eq!(dirents[0].size, Some(5));
    assert_eq!(dirents[1].kind, DirentType::Dir);
}

#[tokio::test]
async fn list_directory_without_oid_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/dir/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "a.txt", "id": hex('b'), "type": "file"}
        ])))
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let err = client.list_directory("repo-1", "/").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::MalformedResponse);
}

#[tokio::test]
async fn list_directory_not_found_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/dir/"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("oid", hex('a').as_str())
                .set_body_string("Folder not found."),
        )
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let err = client
        .list_directory("repo-1", "/missing")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert_eq!(err.http_status, Some(404));
    assert_eq!(err.message.as_deref(), Some("Folder not found."));
}

#[tokio::test]
async fn download_link_unwraps_quoted_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/file/"))
        .and(query_param("p", "/y"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("oid", hex('d').as_str())
                .set_body_string("\"http://x/y\""),
        )
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let link = client.get_file_download_link("repo-1", "/y").await.unwrap();

    assert_eq!(link.url, "http://x/y");
    assert_eq!(link.file_id, Some(hex('d')));
}

#[tokio::test]
async fn download_link_with_empty_quotes_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/file/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"\""))
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let err = client
        .get_file_download_link("repo-1", "/y")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::MalformedResponse);
}

#[tokio::test]
async fn shared_link_reads_location_header() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api2/repos/repo-1/file/shared-link/"))
        .and(body_string("type=f&p=%2Fa.txt"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", "http://x/link")
                .set_body_string("ignored body"),
        )
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let link = client
        .get_shared_link("repo-1", "/a.txt", true)
        .await
        .unwrap();

    assert_eq!(link, "http://x/link");
}

#[tokio::test]
async fn create_directory_uses_get_with_mkdir_form() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/dir/"))
        .and(query_param("p", "/New"))
        .and(body_string("operation=mkdir"))
        .respond_with(ResponseTemplate::new(201).set_body_string("\"success\""))
        .expect(1)
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let reply = client.create_directory("repo-1", "/New").await.unwrap();

    assert_eq!(reply, "\"success\"");
}

#[tokio::test]
async fn rename_directory_posts_new_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api2/repos/repo-1/dir/"))
        .and(query_param("p", "/Old"))
        .and(body_string("operation=rename&newname=Fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"success\""))
        .expect(1)
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    client
        .rename_directory("repo-1", "/Old", "Fresh")
        .await
        .unwrap();
}

#[tokio::test]
async fn remove_file_accepts_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api2/repos/repo-1/file/"))
        .and(query_param("p", "/a.txt"))
        .and(header("authorization", "Token test-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    client.remove_file("repo-1", "/a.txt").await.unwrap();
}

#[tokio::test]
async fn remove_directory_reports_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api2/repos/repo-1/dir/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let err = client.remove_directory("repo-1", "/d").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert_eq!(err.http_status, Some(403));
}

#[tokio::test]
async fn move_file_posts_destination() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api2/repos/repo-1/file/"))
        .and(query_param("p", "/a.txt"))
        .and(body_string_contains("operation=move"))
        .and(body_string_contains("dst_repo=repo-2"))
        .and(body_string_contains("dst_dir=%2FArchive"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api2/repos/repo-1/file/"))
        .and(query_param("p", "/b.txt"))
        .and(body_string_contains("operation=move"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let err = client
        .move_file("repo-1", "/a.txt", "repo-2", "/Archive")
        .await
        .unwrap_err();
    assert_eq!(err.http_status, Some(400));

    client
        .move_file("repo-1", "/b.txt", "repo-2", "/Archive")
        .await
        .unwrap();
}

#[tokio::test]
async fn rename_file_posts_new_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api2/repos/repo-1/file/"))
        .and(query_param("p", "/a.txt"))
        .and(body_string("operation=rename&newname=b.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("garbage that is ignored"))
        .expect(1)
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    client
        .rename_file("repo-1", "/a.txt", "b.txt")
        .await
        .unwrap();
}

#[tokio::test]
async fn star_and_unstar_use_starredfiles_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api2/starredfiles/"))
        .and(body_string("repo_id=repo-1&p=%2Fa.txt"))
        .respond_with(ResponseTemplate::new(201).set_body_string("\"success\""))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api2/starredfiles/"))
        .and(query_param("repo_id", "repo-1"))
        .and(query_param("p", "/a.txt"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    client.star_file("repo-1", "/a.txt").await.unwrap();
    client.unstar_file("repo-1", "/a.txt").await.unwrap();
}

#[tokio::test]
async fn upload_and_update_links_are_unwrapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/upload-link/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("\"https://up.example/upload-api/1\""),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/update-link/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"not a url\""))
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let upload = client.get_upload_link("repo-1").await.unwrap();
    assert_eq!(upload, "https://up.example/upload-api/1");

    let err = client.get_update_link("repo-1").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::MalformedResponse);
}

#[tokio::test]
async fn file_revision_link_sends_commit_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/file/revision/"))
        .and(query_param("p", "/a.txt"))
        .and(query_param("commit_id", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"https://dl.example/rev\""))
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let link = client
        .get_file_revision_link("repo-1", "/a.txt", "c1")
        .await
        .unwrap();

    assert_eq!(link.url, "https://dl.example/rev");
    assert!(link.file_id.is_none());
}

#[tokio::test]
async fn file_detail_and_history_decode_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/file/detail/"))
        .and(query_param("p", "/a.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": hex('e'),
            "name": "a.txt",
            "type": "file",
            "size": 22,
            "mtime": 1398148877
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/file/history/"))
        .and(query_param("p", "/a.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commits": [
                {
                    "id": "c2",
                    "rev_file_id": hex('e'),
                    "ctime": 1398149763,
                    "creator_name": "alice@example.com",
                    "rev_file_size": 22,
                    "desc": "Modified \"a.txt\""
                },
                {"id": "c1", "rev_file_id": hex('f'), "ctime": 1398140000}
            ]
        })))
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let detail = client.get_file_detail("repo-1", "/a.txt").await.unwrap();
    assert_eq!(detail.name, "a.txt");
    assert_eq!(detail.kind, DirentType::File);
    assert_eq!(detail.size, Some(22));

    let commits = client.get_file_history("repo-1", "/a.txt").await.unwrap();
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].id, "c2");
    assert_eq!(
        commits[0].creator_name.as_deref(),
        Some("alice@example.com")
    );
    assert_eq!(commits[1].rev_file_id, hex('f'));
    assert_eq!(commits[1].rev_file_size, None);
}

#[tokio::test]
async fn file_history_requires_revision_file_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/file/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commits": [{"id": "c1", "ctime": 1398140000}]
        })))
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let err = client
        .get_file_history("repo-1", "/a.txt")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Decode);
    assert_eq!(err.http_status, None);
}

#[tokio::test]
async fn list_starred_files_decodes_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/starredfiles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"repo": "repo-1", "path": "/a.txt", "dir": false, "size": 3, "mtime": 1398148877},
            {"repo_id": "repo-2", "path": "/Docs", "is_dir": true}
        ])))
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let starred = client.list_starred_files().await.unwrap();

    assert_eq!(starred.len(), 2);
    assert_eq!(starred[0].repo, "repo-1");
    assert!(!starred[0].dir);
    assert_eq!(starred[1].repo, "repo-2");
    assert!(starred[1].dir);
}

#[tokio::test]
async fn dispatched_listing_resolves_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api2/repos/repo-1/dir/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("oid", hex('a').as_str())
                .set_body_json(json!([])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = SeafileClient::with_base_url(&server.uri(), "test-token").unwrap();
    let pending = client.dispatch(|c| async move { c.list_directory("repo-1", "/").await });

    assert!(pending.await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_server_is_transport_error_without_status() {
    let client = SeafileClient::with_base_url("http://127.0.0.1:1", "test-token").unwrap();

    let err = client.remove_file("repo-1", "/a.txt").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert_eq!(err.http_status, None);
}
