use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use vitalis_application::{Pipelines, UnavailableGenerator};
use vitalis_application::prompts::DEFAULT_ANALYSIS_QUERY;
use vitalis_core::chat::{ChatRole, ChatTranscript, FALLBACK_REPLY};
use vitalis_core::clock::FixedClock;
use vitalis_core::daily_log::seed_logs;
use vitalis_core::error::{Result, VitalisError};
use vitalis_core::generation::{ContentGenerator, DocumentUpload, GenerationRequest, PromptPart};
use vitalis_core::health_info::{Block, DEFAULT_DISCLAIMER, convert};
use vitalis_core::patient::{ActivityLevel, Sex, SignUpInput};
use vitalis_core::prediction::{AdHocInput, RiskLabel};
use vitalis_core::session::SessionContext;

const PREDICTION: &str = r#"{
    "disease": "Hypertension",
    "riskProbability": 0.41,
    "riskLabel": "Medium",
    "topContributors": ["Elevated systolic pressure", "Short sleep"],
    "recommendations": [
        {"title": "Reduce salt", "description": "Under 5 g per day.", "category": "Diet"},
        {"title": "Sleep 7+ hours", "description": "Keep a fixed bedtime.", "category": "Lifestyle"},
        {"title": "Home BP checks", "description": "Twice weekly.", "category": "Monitoring"}
    ]
}"#;

/// Records every request and answers from a queue of canned replies.
#[derive(Default)]
struct RecordingGenerator {
    requests: Mutex<Vec<GenerationRequest>>,
    replies: Mutex<VecDeque<Result<String>>>,
    delay: Option<Duration>,
}

impl RecordingGenerator {
    fn replying(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        })
    }

    fn slow(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(vec![Ok(reply.to_string())].into()),
            delay: Some(Duration::from_millis(50)),
            ..Self::default()
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last_request(&self) -> GenerationRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

#[async_trait]
impl ContentGenerator for RecordingGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(VitalisError::service(None, "no canned reply", false)))
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn pipelines(generator: Arc<RecordingGenerator>) -> Pipelines {
    Pipelines::new(generator, Arc::new(FixedClock::new(today()))).unwrap()
}

fn session() -> SessionContext {
    let patient = SignUpInput {
        username: "johndoe".into(),
        password: "password123".into(),
        name_alias: "John Doe".into(),
        dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        sex: Sex::Male,
        height_cm: 180.0,
        weight_kg: 85.0,
        known_conditions: "Hypertension".into(),
        medications: String::new(),
        family_history: String::new(),
        smoker: false,
        alcohol: true,
        activity_level: ActivityLevel::Moderate,
        food_pattern_summary: String::new(),
    }
    .into_patient(1_700_000_000_000)
    .unwrap();
    let daily_logs = seed_logs(&patient.patient_id, today());
    SessionContext { patient, daily_logs }
}

fn prompt_text(request: &GenerationRequest) -> &str {
    match &request.parts[0] {
        PromptPart::Text(text) => text,
        other => panic!("expected text part, got {other:?}"),
    }
}

#[tokio::test]
async fn test_analysis_without_input_never_calls_service() {
    let generator = RecordingGenerator::replying(vec![]);
    let pipelines = pipelines(generator.clone());

    let err = pipelines.analysis.analyze(&session(), "  ", None).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_analysis_with_description() {
    let generator = RecordingGenerator::replying(vec![Ok(PREDICTION.to_string())]);
    let pipelines = pipelines(generator.clone());

    let result = pipelines
        .analysis
        .analyze(&session(), "Morning headaches lately", None)
        .await
        .unwrap();

    assert_eq!(result.disease, "Hypertension");
    assert_eq!(result.risk_label, RiskLabel::Medium);

    let request = generator.last_request();
    assert!(request.is_structured());
    assert_eq!(request.parts.len(), 1);
    let prompt = prompt_text(&request);
    assert!(prompt.contains("- Age: 36"));
    assert!(prompt.contains("- Known Conditions: Hypertension"));
    assert!(prompt.contains("Morning headaches lately"));
}

#[tokio::test]
async fn test_analysis_with_upload_only() {
    let generator = RecordingGenerator::replying(vec![Ok(format!("```json\n{PREDICTION}\n```"))]);
    let pipelines = pipelines(generator.clone());
    let upload = DocumentUpload::new("labs.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]);

    let result = pipelines
        .analysis
        .analyze(&session(), "", Some(&upload))
        .await
        .unwrap();
    assert_eq!(result.recommendations.len(), 3);

    let request = generator.last_request();
    assert!(prompt_text(&request).contains(DEFAULT_ANALYSIS_QUERY));
    assert_eq!(
        request.parts[1],
        PromptPart::InlineData {
            mime_type: "image/png".into(),
            data: "iVBORw==".into(),
        }
    );
}

#[tokio::test]
async fn test_analysis_surfaces_service_failure() {
    let generator = RecordingGenerator::replying(vec![Err(VitalisError::service(
        Some(503),
        "UNAVAILABLE",
        true,
    ))]);
    let pipelines = pipelines(generator.clone());

    let err = pipelines
        .analysis
        .analyze(&session(), "check", None)
        .await
        .unwrap_err();
    assert!(err.is_service_failure());
    assert_eq!(generator.calls(), 1);
    assert!(!pipelines.analysis.is_loading());
}

#[tokio::test]
async fn test_analysis_rejects_payload_without_required_fields() {
    let generator = RecordingGenerator::replying(vec![Ok(r#"{"disease": "Flu"}"#.to_string())]);
    let pipelines = pipelines(generator);

    let err = pipelines
        .analysis
        .analyze(&session(), "check", None)
        .await
        .unwrap_err();
    assert!(err.is_parse());
}

#[tokio::test]
async fn test_second_concurrent_analysis_is_rejected() {
    let generator = RecordingGenerator::slow(PREDICTION);
    let pipelines = pipelines(generator.clone());
    let context = session();

    let (first, second) = tokio::join!(
        pipelines.analysis.analyze(&context, "first", None),
        pipelines.analysis.analyze(&context, "second", None),
    );

    assert!(first.is_ok());
    assert!(second.unwrap_err().is_in_flight());
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_pipelines_do_not_share_in_flight_flags() {
    let generator = RecordingGenerator::slow(PREDICTION);
    let pipelines = pipelines(generator.clone());
    let context = session();

    let (analysis, topic) = tokio::join!(
        pipelines.analysis.analyze(&context, "first", None),
        pipelines.content.lookup("Hypertension"),
    );

    // Both calls reach the service; which one gets the single canned reply
    // does not matter here.
    assert!(!analysis.is_err_and(|e| e.is_in_flight()));
    assert!(!topic.is_err_and(|e| e.is_in_flight()));
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_adhoc_prediction_uses_form() {
    let generator = RecordingGenerator::replying(vec![Ok(PREDICTION.to_string())]);
    let pipelines = pipelines(generator.clone());

    let result = pipelines.predictor.predict(&AdHocInput::default()).await.unwrap();
    assert_eq!(result.risk_percent(), 41);

    let request = generator.last_request();
    assert!(request.is_structured());
    assert!(prompt_text(&request).contains("- Reported Symptoms: Occasional fatigue, frequent thirst"));
}

#[tokio::test]
async fn test_empty_topic_is_noop() {
    let generator = RecordingGenerator::replying(vec![]);
    let pipelines = pipelines(generator.clone());

    assert_eq!(pipelines.content.lookup("   ").await.unwrap(), None);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_topic_lookup_converts_markdown() {
    let payload = r###"{
        "topic": "Healthy Diet",
        "sections": [
            {"title": "Overview", "content": "## Title\n* item one\n* item two\nplain text"}
        ]
    }"###;
    let generator = RecordingGenerator::replying(vec![Ok(payload.to_string())]);
    let pipelines = pipelines(generator);

    let info = pipelines.content.lookup("Healthy Diet").await.unwrap().unwrap();
    assert_eq!(info.disclaimer, DEFAULT_DISCLAIMER);

    let blocks = convert(&info.sections[0].content);
    assert_eq!(blocks.len(), 3);
    assert!(matches!(blocks[0], Block::Heading { level: 2, .. }));
    assert!(matches!(&blocks[1], Block::List(items) if items.len() == 2));
    assert!(matches!(blocks[2], Block::Paragraph(_)));
}

#[tokio::test]
async fn test_chat_appends_reply_and_sends_only_latest_message() {
    let generator = RecordingGenerator::replying(vec![
        Ok("BMI compares weight to height.".to_string()),
        Ok("Hypertension is high blood pressure.".to_string()),
    ]);
    let pipelines = pipelines(generator.clone());
    let mut transcript = ChatTranscript::new();

    pipelines.chat.respond(&mut transcript, "What is BMI?").await.unwrap();
    let reply = pipelines
        .chat
        .respond(&mut transcript, "What is hypertension?")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(reply.role, ChatRole::Bot);
    assert_eq!(transcript.len(), 5);
    let prompt = prompt_text(&generator.last_request()).to_string();
    assert!(prompt.contains("What is hypertension?"));
    assert!(!prompt.contains("BMI compares weight"));
    assert!(!generator.last_request().is_structured());
}

#[tokio::test]
async fn test_chat_failure_becomes_fallback_message() {
    let generator = RecordingGenerator::replying(vec![Err(VitalisError::service(
        None,
        "connection refused",
        true,
    ))]);
    let pipelines = pipelines(generator);
    let mut transcript = ChatTranscript::new();

    let reply = pipelines
        .chat
        .respond(&mut transcript, "hello")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(reply.text, FALLBACK_REPLY);
    assert_eq!(transcript.len(), 3);
}

#[tokio::test]
async fn test_blank_chat_input_is_ignored() {
    let generator = RecordingGenerator::replying(vec![]);
    let pipelines = pipelines(generator.clone());
    let mut transcript = ChatTranscript::new();

    assert!(pipelines.chat.respond(&mut transcript, " \n").await.unwrap().is_none());
    assert_eq!(transcript.len(), 1);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_chat_without_service_client_uses_fallback() {
    let generator = Arc::new(UnavailableGenerator::new(VitalisError::config(
        "No Gemini API key configured.",
    )));
    let pipelines = Pipelines::new(generator, Arc::new(FixedClock::new(today()))).unwrap();
    let mut transcript = ChatTranscript::new();

    let reply = pipelines
        .chat
        .respond(&mut transcript, "what is bmi")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(reply.text, FALLBACK_REPLY);
    assert!(pipelines.analysis.analyze(&session(), "check", None).await.unwrap_err().is_config());
}
