//! Integration tests for `ObliqoClient` using wiremock HTTP mocks.

use obliqo_client::{ClientError, JobFeedQuery, ObliqoClient};
use obliqo_core::{Decision, UserProfile};
use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ObliqoClient {
    ObliqoClient::with_base_url(base_url, 30, "obliqo-test")
        .expect("client construction should not fail")
}

fn job_match_json(title: &str, link: &str, fit_score: f64, decision: &str) -> serde_json::Value {
    serde_json::json!({
        "job": {
            "JobTitles": title,
            "Company_Name": "Initech",
            "Skills": "Rust, SQL",
            "Links": link
        },
        "fit_score": fit_score,
        "decision": decision,
        "decision_reason": "Skill overlap",
        "explanation": {
            "matched_skills": ["Rust"],
            "missing_skills": ["SQL"],
            "risk_factors": [],
            "strengths": [],
            "skill_gaps": []
        },
        "competition_level": "Medium",
        "career_impact": "Positive"
    })
}

#[tokio::test]
async fn health_returns_service_banner() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Obliqo API",
            "version": "1.0.0",
            "jobs_loaded": 1200
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let health = client.health().await.expect("should parse health");

    assert_eq!(health.message, "Obliqo API");
    assert_eq!(health.version.as_deref(), Some("1.0.0"));
    assert_eq!(health.jobs_loaded, Some(1200));
}

#[tokio::test]
async fn get_profile_returns_partial_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_id": "user_42",
            "personal_info": { "full_name": "Ada Lovelace" },
            "skills": ["Rust", "SQL"]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let patch = client.get_profile().await.expect("should parse profile");

    assert_eq!(patch.user_id.as_deref(), Some("user_42"));
    assert_eq!(
        patch.personal_info.and_then(|p| p.full_name).as_deref(),
        Some("Ada Lovelace")
    );
    assert_eq!(patch.skills, Some(vec!["Rust".to_owned(), "SQL".to_owned()]));
    assert!(patch.projects.is_none());
}

#[tokio::test]
async fn get_profile_404_surfaces_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "detail": "Profile not found" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_profile().await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Profile not found");
}

#[tokio::test]
async fn save_profile_posts_full_profile() {
    let server = MockServer::start().await;

    let mut profile = UserProfile::skeleton();
    profile.user_id = "user_7".to_owned();
    profile.personal_info.full_name = "Grace Hopper".to_owned();
    profile.skills = vec!["COBOL".to_owned()];

    Mock::given(method("POST"))
        .and(path("/api/profile"))
        .and(body_partial_json(serde_json::json!({
            "user_id": "user_7",
            "personal_info": { "full_name": "Grace Hopper" },
            "skills": ["COBOL"],
            "projects": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Profile saved successfully",
            "user_id": "user_7"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ack = client.save_profile(&profile).await.expect("save should succeed");

    assert_eq!(ack.user_id.as_deref(), Some("user_7"));
    assert_eq!(ack.message.as_deref(), Some("Profile saved successfully"));
}

#[tokio::test]
async fn save_profile_without_detail_uses_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/profile"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "boom" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .save_profile(&UserProfile::skeleton())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "API request failed");
}

#[tokio::test]
async fn get_job_feed_sends_paging_and_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "10"))
        .and(query_param("decision_filter", "Apply"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jobs": [job_match_json("Backend Intern", "https://jobs.example/1", 88.0, "Apply")],
            "total_count": 11,
            "page": 2,
            "page_size": 10
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let feed = client
        .get_job_feed(&JobFeedQuery {
            page: 2,
            page_size: 10,
            decision: Some(Decision::Apply),
        })
        .await
        .expect("should parse feed");

    assert_eq!(feed.total_count, 11);
    assert_eq!(feed.page, 2);
    assert_eq!(feed.jobs.len(), 1);
    assert_eq!(feed.jobs[0].decision, Decision::Apply);
    assert_eq!(feed.jobs[0].normalized().id, "https://jobs.example/1");
}

#[tokio::test]
async fn get_job_feed_omits_filter_when_unset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jobs": [],
            "total_count": 0,
            "page": 1,
            "page_size": 20
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let feed = client
        .get_job_feed(&JobFeedQuery::default())
        .await
        .expect("should parse empty feed");
    assert!(feed.jobs.is_empty());

    let requests = server.received_requests().await.expect("recording is on");
    let query = requests[0].url.query().unwrap_or_default().to_owned();
    assert_eq!(query, "page=1&page_size=20");
}

#[tokio::test]
async fn get_job_detail_encodes_link_id_as_one_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/https:%2F%2Fjobs.example%2F42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_match_json(
            "Data Intern",
            "https://jobs.example/42",
            64.5,
            "Wait",
        )))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let job = client
        .get_job_detail("https://jobs.example/42")
        .await
        .expect("should parse job detail");

    assert_eq!(job.decision, Decision::Wait);
    assert_eq!(job.normalized().title, "Data Intern");
    assert_eq!(job.normalized().skills, vec!["Rust", "SQL"]);
}

#[tokio::test]
async fn get_job_detail_unknown_job_is_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "detail": "Job not found" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_job_detail("missing").await.unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 404, .. }));
    assert_eq!(err.to_string(), "Job not found");
}

#[tokio::test]
async fn get_stats_returns_decision_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_jobs": 10,
            "decisions": { "Apply": 3, "Wait": 4, "Skip": 2, "Avoid": 1 },
            "recommendation": "Focus on Apply jobs"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stats = client.get_stats().await.expect("should parse stats");

    assert_eq!(stats.total_jobs, 10);
    assert_eq!(stats.decisions.get(Decision::Apply), 3);
    assert_eq!(stats.decisions.get(Decision::Avoid), 1);
    assert_eq!(stats.recommendation, "Focus on Apply jobs");
}

#[tokio::test]
async fn upload_cv_sends_multipart_file_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload-cv"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"resume.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "CV uploaded successfully",
            "filename": "resume.pdf",
            "file_url": "/uploads/resume.pdf",
            "extracted_data": {
                "personal_info": { "full_name": "Ada Lovelace" },
                "skills": ["Rust"],
                "experience_years": 3
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .upload_cv("resume.pdf", b"%PDF-1.4".to_vec())
        .await
        .expect("upload should succeed");

    assert_eq!(response.file_url, "/uploads/resume.pdf");
    let extracted = response.extracted_data.expect("extraction present");
    assert_eq!(extracted.experience_years, Some(3));
}

#[tokio::test]
async fn upload_cv_rejects_unsupported_extension_without_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload-cv"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .upload_cv("notes.txt", b"hello".to_vec())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::UnsupportedFileType(_)));
}

#[tokio::test]
async fn upload_cv_failure_uses_upload_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload-cv"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .upload_cv("resume.docx", b"PK".to_vec())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to upload CV");
}

#[tokio::test]
async fn non_json_error_body_uses_status_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_stats().await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "Service Unavailable");
}

#[tokio::test]
async fn malformed_success_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_stats().await.unwrap_err();

    assert!(matches!(err, ClientError::Deserialize { .. }));
}
