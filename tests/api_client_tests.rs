use clipcast::client::ApiClient;
use clipcast::models::{ArtifactUpdate, IngestRequest, OutputKind, ProviderKeyUpdate};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(&server.uri()).expect("mock server uri parses")
}

#[tokio::test]
async fn non_2xx_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("job 99 missing"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.job(99).await.unwrap_err();
    assert_eq!(err.to_string(), "API 404: job 99 missing");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn jobs_list_sends_project_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/jobs"))
        .and(query_param("project_id", "5"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 12, "kind": "generate", "status": "running", "project_id": 5 },
            { "id": 11, "kind": "ingest", "status": "succeeded", "project_id": 5 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let jobs = client.jobs(5, 20).await.unwrap();
    assert_eq!(jobs.len(), 2);
    // Most recent first; element 0 is the latest.
    assert_eq!(jobs[0].id, 12);
}

#[tokio::test]
async fn artifact_content_patch_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/artifacts/7"))
        .and(body_json(json!({ "content": "edited draft" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "kind": "tweet",
            "title": "Hook",
            "content": "edited draft"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/artifacts"))
        .and(query_param("project_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "kind": "tweet", "title": "Hook", "content": "edited draft" }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let updated = client
        .update_artifact(7, &ArtifactUpdate::content("edited draft"))
        .await
        .unwrap();
    assert_eq!(updated.content.as_deref(), Some("edited draft"));

    // A subsequent fetch reflects exactly the saved content.
    let listed = client.artifacts(1).await.unwrap();
    assert_eq!(listed[0].content.as_deref(), Some("edited draft"));
}

#[tokio::test]
async fn template_list_narrows_by_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .and(query_param("kind", "tweet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Hooks", "kind": "tweet", "version": 3, "content": "..." }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Hooks", "kind": "tweet", "version": 3, "content": "..." },
            { "id": 2, "name": "Threads", "kind": "linkedin", "version": 1, "content": "..." }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let tweets = client.templates(Some(OutputKind::Tweet)).await.unwrap();
    assert_eq!(tweets.len(), 1);
    assert_eq!(tweets[0].kind, OutputKind::Tweet);

    let all = client.templates(None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn ingest_posts_url_and_returns_job() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/ingest/youtube"))
        .and(body_json(json!({ "url": "https://youtube.com/watch?v=abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "kind": "ingest",
            "status": "queued",
            "project_id": 9
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let job = client
        .ingest_youtube(&IngestRequest {
            url: "https://youtube.com/watch?v=abc".to_string(),
            project_name: None,
        })
        .await
        .unwrap();
    assert_eq!(job.id, 3);
    assert!(!job.is_terminal());
}

#[tokio::test]
async fn provider_key_put_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/provider-settings/text/openai"))
        .and(body_json(json!({ "api_key": "sk-test-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "provider": "openai",
            "has_api_key": true,
            "key_hint": "sk-...t-1",
            "configured_via": "workspace"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/provider-settings/text/openai"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let setting = client
        .put_provider_key(
            "openai",
            &ProviderKeyUpdate {
                api_key: "sk-test-1".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(setting.has_api_key);
    assert_eq!(setting.key_hint.as_deref(), Some("sk-...t-1"));

    client.delete_provider_key("openai").await.unwrap();
}

#[tokio::test]
async fn analytics_queries_carry_the_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/analytics/timeline"))
        .and(query_param("days", "14"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "date": "2024-01-01", "kind": "job_completed", "count": 3 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let points = client.analytics_timeline(14).await.unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].kind, "job_completed");
}

#[tokio::test]
async fn workflow_run_returns_initial_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/workflows/4/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 21,
            "kind": "workflow",
            "status": "queued",
            "output": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let job = client
        .run_workflow(
            4,
            &clipcast::models::WorkflowRunRequest {
                project_id: None,
                url: Some("https://youtube.com/watch?v=abc".to_string()),
                project_name: Some("Workflow Import".to_string()),
                outputs: vec![OutputKind::Tweet],
                tone: "professional".to_string(),
                brand_voice: None,
                template_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(job.id, 21);
}
