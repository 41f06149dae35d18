use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const NOW: &str = "2024-06-01T00:00:00Z";

fn app() -> Router {
    jm_api::create_router(jm_api::test_state())
}

fn jobs() -> Value {
    json!([
        {
            "id": "b",
            "title": "Java Developer",
            "skills_required": ["java"],
            "location": "Bangalore",
            "created_at": "2024-05-12T00:00:00Z"
        },
        {
            "id": "a",
            "title": "Data Engineer",
            "skills_required": ["Python", "SQL", "AWS"],
            "location": "Bangalore",
            "created_at": "2024-05-27T00:00:00Z"
        }
    ])
}

fn candidate() -> Value {
    json!({ "id": "u1", "skills": ["python", "sql"], "location": "Bangalore" })
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<&str> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["job"]["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn ranks_jobs_by_total_score() {
    let (status, body) = post_json(
        app(),
        "/api/recommendations",
        json!({ "candidate": candidate(), "jobs": jobs(), "now": NOW }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(ids(&body), ["a", "b"]);

    let top = &body["recommendations"][0];
    assert_eq!(top["score"], 0.76);
    assert_eq!(top["components"]["skill_score"], 0.67);
    assert_eq!(top["components"]["loc_score"], 1.0);
    assert_eq!(top["components"]["matched_skills"], json!(["python", "sql"]));
    assert_eq!(body["recommendations"][1]["score"], 0.25);
}

#[tokio::test]
async fn query_limit_and_min_score_shape_the_list() {
    let request = json!({ "candidate": candidate(), "jobs": jobs(), "now": NOW });

    let (_, limited) = post_json(app(), "/api/recommendations?limit=1", request.clone()).await;
    assert_eq!(ids(&limited), ["a"]);

    let (_, filtered) =
        post_json(app(), "/api/recommendations?minScore=0.5", request.clone()).await;
    assert_eq!(ids(&filtered), ["a"]);

    let (status, fallback) = post_json(
        app(),
        "/api/recommendations?limit=abc&minScore=-3",
        request,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback["count"], 2);
}

#[tokio::test]
async fn score_endpoint_reports_percentages() {
    let job = jobs()[1].clone();
    let (status, body) = post_json(
        app(),
        "/api/jobs/score",
        json!({ "candidate": candidate(), "job": job, "now": NOW }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "total_score": 76, "skill_score": 67, "loc_score": 100, "rec_score": 83 })
    );
}

#[tokio::test]
async fn resume_text_extends_candidate_skills() {
    let (status, body) = post_json(
        app(),
        "/api/resume/recommendations",
        json!({
            "candidate": { "id": "u1", "skills": ["Go"], "location": "Bangalore" },
            "resume_text": "Experienced in Python and Docker",
            "jobs": [jobs()[1].clone()],
            "now": NOW
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["extracted_skills"], json!(["python", "docker"]));
    assert_eq!(body["updated_skills"], json!(["Go", "python", "docker"]));
    assert_eq!(body["count"], 1);
    // Jaccard: {python} over {go, python, docker, sql, aws}.
    assert_eq!(body["recommendations"][0]["components"]["skill_score"], 0.2);
}

#[tokio::test]
async fn blank_resume_text_keeps_existing_skills() {
    let (status, body) = post_json(
        app(),
        "/api/resume/recommendations",
        json!({ "candidate": candidate(), "resume_text": "   ", "jobs": jobs(), "now": NOW }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["extracted_skills"], json!([]));
    assert_eq!(body["updated_skills"], json!(["python", "sql"]));
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn repeated_query_keys_use_first_value() {
    let request = json!({ "candidate": candidate(), "jobs": jobs(), "now": NOW });

    let (status, body) =
        post_json(app(), "/api/recommendations?limit=1&limit=2", request.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), ["a"]);

    let (status, body) = post_json(
        app(),
        "/api/recommendations?min_score=0.5&minScore=0.1",
        request,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), ["a"]);
}

#[tokio::test]
async fn omitted_limit_returns_ten() {
    let many: Vec<Value> = (0..12)
        .map(|idx| {
            json!({
                "id": format!("job-{idx}"),
                "skills_required": ["python"],
                "location": "Bangalore",
                "created_at": "2024-05-30T00:00:00Z"
            })
        })
        .collect();

    let (status, body) = post_json(
        app(),
        "/api/recommendations",
        json!({ "candidate": candidate(), "jobs": many, "now": NOW }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 10);
    assert_eq!(ids(&body)[0], "job-0");
}

#[tokio::test]
async fn profile_recommendations_use_jaccard() {
    let candidate = json!({
        "id": "u1",
        "skills": ["python", "sql", "go", "rust"],
        "location": "Bangalore"
    });

    let (status, body) = post_json(
        app(),
        "/api/users/recommendations",
        json!({ "candidate": candidate.clone(), "jobs": jobs(), "now": NOW }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(ids(&body), ["a", "b"]);
    // {python, sql} over {python, sql, go, rust, aws}.
    assert_eq!(body["recommendations"][0]["components"]["skill_score"], 0.4);
    assert_eq!(body["recommendations"][1]["score"], 0.3);

    let (_, coverage) = post_json(
        app(),
        "/api/recommendations",
        json!({ "candidate": candidate, "jobs": jobs(), "now": NOW }),
    )
    .await;
    assert_eq!(coverage["recommendations"][0]["components"]["skill_score"], 0.67);
}
