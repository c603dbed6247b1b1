use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use booking_api::{build_router, AppState, CmsClient, CmsError, Email, MailError, Mailer};
use booking_core::FixedClock;
use booking_domain::{Link, Testimonial};
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<Email>>,
    fail: bool,
    reject_to: Option<&'static str>,
}

impl RecordingMailer {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn rejecting(recipient: &'static str) -> Self {
        Self {
            reject_to: Some(recipient),
            ..Self::default()
        }
    }

    fn subjects(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|email| email.subject.clone())
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.fail || self.reject_to == Some(email.to.as_str()) {
            Err(MailError::Rejected {
                status: 422,
                body: "invalid sender".into(),
            })
        } else {
            Ok(())
        }
    }
}

struct FakeCms {
    fail: bool,
}

#[async_trait]
impl CmsClient for FakeCms {
    async fn testimonials(&self) -> Result<Vec<Testimonial>, CmsError> {
        if self.fail {
            return Err(CmsError::Status(503));
        }
        Ok(vec![Testimonial::new("Mia", "Spotless van").with_rating(5)])
    }

    async fn links(&self, category: &str) -> Result<Vec<Link>, CmsError> {
        if self.fail {
            return Err(CmsError::Transport("timeout".into()));
        }
        Ok(vec![Link {
            title: "Verbier".into(),
            url: "https://www.verbier.ch".into(),
            category: category.to_string(),
            description: None,
        }])
    }
}

fn app_with(mailer: Arc<RecordingMailer>, cms_fails: bool) -> Router {
    let state = AppState::new(mailer, Arc::new(FakeCms { fail: cms_fails }), "ops@example.com")
        .with_clock(Arc::new(FixedClock::at_date(2025, 1, 1).unwrap()));
    build_router(state, Duration::from_secs(5))
}

fn app() -> (Router, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    (app_with(mailer.clone(), false), mailer)
}

async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn booking_body() -> Value {
    json!({
        "journey": {
            "type": "return",
            "collectionPoint": "Geneva Airport",
            "destinationPoint": "Verbier"
        },
        "dates": {
            "collectionDate": "2025-01-10",
            "collectionTime": "10:30",
            "returnDate": "2025-01-17",
            "returnTime": "14:00"
        },
        "people": { "adults": 2, "children": 1 },
        "luggage": { "suitcases": 2, "skis": 1 },
        "passenger": { "name": "Ada Lovelace", "email": "ada@example.com", "phone": "" }
    })
}

#[tokio::test]
async fn health_check_reports_service() {
    let (app, _) = app();
    let (status, body) = call(app, "GET", "/api/booking", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "booking");
    assert!(body["timestamp"].as_str().unwrap().starts_with("2025-01-01"));
}

#[tokio::test]
async fn booking_is_priced_and_both_emails_are_sent() {
    let (app, mailer) = app();
    let (status, body) = call(app, "POST", "/api/booking", Some(booking_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["emailSent"], true);
    // 150 + 2 extra passengers * 15 + 2 suitcases * 5 + 1 ski * 10
    assert_eq!(body["estimatedPrice"], 200);
    assert_eq!(body["currency"], "EUR");
    let quote = body["quoteId"].as_str().unwrap();
    assert!(quote.starts_with("Q-20250101-"));
    assert_eq!(quote.len(), "Q-20250101-".len() + 8);

    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[1].to, "ops@example.com");
    assert!(sent.iter().all(|email| email.subject.contains(quote)));
}

#[tokio::test]
async fn booking_still_succeeds_when_email_fails() {
    let mailer = Arc::new(RecordingMailer::failing());
    let app = app_with(mailer.clone(), false);
    let (status, body) = call(app, "POST", "/api/booking", Some(booking_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["emailSent"], false);
    assert!(body["message"].as_str().unwrap().contains("could not be sent"));

    let subjects = mailer.subjects();
    assert_eq!(subjects.len(), 3);
    assert!(subjects[2].contains("could not be delivered"));
}

#[tokio::test]
async fn operator_is_emailed_even_when_customer_email_fails() {
    let mailer = Arc::new(RecordingMailer::rejecting("ada@example.com"));
    let app = app_with(mailer.clone(), false);
    let (status, body) = call(app, "POST", "/api/booking", Some(booking_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emailSent"], false);
    assert!(body["message"].as_str().unwrap().contains("could not be sent"));

    let sent = mailer.sent.lock().unwrap().clone();
    let recipients: Vec<&str> = sent.iter().map(|email| email.to.as_str()).collect();
    assert_eq!(
        recipients,
        ["ada@example.com", "ops@example.com", "ops@example.com"]
    );
    assert!(sent[2].subject.contains("could not be delivered"));
}

#[tokio::test]
async fn operator_email_failure_is_reported() {
    let mailer = Arc::new(RecordingMailer::rejecting("ops@example.com"));
    let app = app_with(mailer.clone(), false);
    let (status, body) = call(app, "POST", "/api/booking", Some(booking_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emailSent"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("has been sent to ada@example.com"));
    assert!(message.contains("could not be notified"));
    assert_eq!(mailer.subjects().len(), 3);
}

#[tokio::test]
async fn booking_requires_email_and_journey_points() {
    let (app, mailer) = app();
    let mut missing_email = booking_body();
    missing_email["passenger"]["email"] = json!("  ");
    let (status, body) = call(app.clone(), "POST", "/api/booking", Some(missing_email)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let mut missing_point = booking_body();
    missing_point["journey"]["destinationPoint"] = json!("");
    let (status, _) = call(app.clone(), "POST", "/api/booking", Some(missing_point)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let malformed = Request::builder()
        .method("POST")
        .uri("/api/booking")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let resp = app.oneshot(malformed).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn contact_validates_and_forwards_to_operator() {
    let (app, mailer) = app();
    let (status, _) = call(
        app.clone(),
        "POST",
        "/api/contact",
        Some(json!({ "name": "Bob", "email": "bob.example.com", "message": "Hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        app.clone(),
        "POST",
        "/api/contact",
        Some(json!({ "name": "Bob", "email": "bob@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        app,
        "POST",
        "/api/contact",
        Some(json!({ "name": "Bob", "email": "bob@example.com", "message": "Ski racks?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ops@example.com");
    assert_eq!(sent[0].reply_to.as_deref(), Some("bob@example.com"));
}

#[tokio::test]
async fn contact_reports_mail_failure() {
    let app = app_with(Arc::new(RecordingMailer::failing()), false);
    let (status, body) = call(
        app,
        "POST",
        "/api/contact",
        Some(json!({ "name": "Bob", "email": "bob@example.com", "message": "Hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn links_require_a_category() {
    let (app, _) = app();
    let (status, _) = call(app.clone(), "GET", "/api/links", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(app.clone(), "GET", "/api/links?category=%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(app, "GET", "/api/links?category=resorts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Verbier");
    assert_eq!(body[0]["category"], "resorts");
}

#[tokio::test]
async fn content_endpoints_fail_with_500_when_cms_is_down() {
    let app = app_with(Arc::new(RecordingMailer::default()), true);
    let (status, _) = call(app.clone(), "GET", "/api/testimonials", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _) = call(app, "GET", "/api/links?category=airports", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn testimonials_are_proxied() {
    let (app, _) = app();
    let (status, body) = call(app, "GET", "/api/testimonials", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Mia");
    assert_eq!(body[0]["rating"], 5);
    assert!(body[0].get("location").is_none());
}
