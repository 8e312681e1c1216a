//! Prompt templates for the generation pipelines.
//!
//! Each template embeds its system instruction in the prompt text; the
//! service receives one user turn per request.

use minijinja::{Environment, context};
use vitalis_core::error::{Result, VitalisError};
use vitalis_core::patient::PatientSummary;
use vitalis_core::prediction::AdHocInput;

/// Query used when the user uploads a file without describing it.
pub const DEFAULT_ANALYSIS_QUERY: &str = "No specific query, please summarize the attached document.";

const ANALYSIS: &str = r#"System Instruction: You are an AI medical report analyst. Your task is to analyze the provided patient profile, user query, and any attached medical document (like a lab report or imaging summary). Extract key findings from the document in the context of the user's query and patient history. Identify the primary health concern discussed or implied. Provide a risk assessment (Low, Medium, High), list the key contributing factors based on the document, and generate three actionable recommendations. ALWAYS respond in the specified JSON format.

Patient Data:
- Age: {{ patient.age }}
- Sex: {{ patient.sex }}
- BMI: {{ bmi }}
- Known Conditions: {{ patient.known_conditions | join(", ") or "None" }}

User's Query/Manual Input:
"{{ query }}"

Analyze the attached document and/or the user query and provide your findings in the required JSON format."#;

const ADHOC: &str = r#"System Instruction: You are an advanced AI health analyst. Your task is to predict the primary disease risk for a person based on self-reported data including symptoms. You must provide a risk score, a risk level (Low, Medium, or High), the key contributing factors, and three personalized, actionable recommendations categorized as 'Diet', 'Lifestyle', or 'Monitoring'. ALWAYS respond in the specified JSON format.

Patient Data:
- Age: {{ form.age }}
- Sex: {{ sex }}
- BMI: {{ bmi }}
- Reported Symptoms: {{ form.symptoms or "None" }}
- Known Conditions: {{ form.known_conditions or "None" }}
- Family History: {{ form.family_history or "None" }}
- Vitals: Fasting Glucose {{ glucose }} mg/dL, BP {{ systolic }}/{{ diastolic }} mmHg
- Food & Lifestyle Patterns: {{ form.food_pattern_summary }}. Activity level is {{ form.activity_level }}.
- Smoker: {{ smoker }}, Alcohol: {{ alcohol }}

Based on all this data, especially the reported symptoms, analyze the risk for diseases like Type 2 Diabetes, Hypertension, Heart Disease, or other relevant conditions. Focus on the single most prominent risk and provide your analysis in the JSON format defined by the schema."#;

const HEALTH_INFO: &str = r#"System Instruction: You are a helpful AI health assistant. Your role is to provide clear, concise, and easy-to-understand information on health topics for a general audience.
Structure the article as a short list of sections, starting with a general overview. Inside each section use simple Markdown: '#' headers, lines starting with '* ' for bullet points, and **bold** for emphasis.
Do not provide direct medical advice or diagnosis. Always include a disclaimer, such as "This information is for educational purposes only. Please consult a healthcare professional for medical advice."

Topic: "{{ topic }}""#;

const CHAT: &str = r#"System Instruction: You are a friendly and helpful AI assistant for the 'AI Disease Risk Predictor' app. Your role is to answer general questions about health, wellness, and how to use the application. You are NOT a medical professional.

**CRITICAL RULE: DO NOT provide medical advice, diagnoses, or treatment plans under any circumstances.**

If a user asks for any form of medical advice (e.g., "Should I take this medicine?", "What does my lab result mean?", "Do I have [disease]?"), you MUST politely decline and strongly advise them to consult a qualified healthcare professional.

Keep your answers concise, helpful, and easy to understand.

Examples of appropriate questions you can answer:
- "What is hypertension?"
- "What are the benefits of a balanced diet?"
- "How does the 'Predictor' page work?"
- "What is BMI?"

User's question: "{{ message }}""#;

/// Compiled prompt templates.
pub struct PromptLibrary {
    env: Environment<'static>,
}

impl PromptLibrary {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in [
            ("analysis", ANALYSIS),
            ("adhoc", ADHOC),
            ("health_info", HEALTH_INFO),
            ("chat", CHAT),
        ] {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self { env })
    }

    /// `query` falls back to [`DEFAULT_ANALYSIS_QUERY`] when blank.
    pub fn analysis(&self, patient: &PatientSummary, query: &str) -> Result<String> {
        let query = match query.trim() {
            "" => DEFAULT_ANALYSIS_QUERY,
            trimmed => trimmed,
        };
        self.render(
            "analysis",
            context! { patient, query, bmi => number(patient.bmi) },
        )
    }

    pub fn adhoc(&self, form: &AdHocInput) -> Result<String> {
        let bmi = form
            .bmi()
            .map(|value| format!("{value:.1}"))
            .unwrap_or_else(|| "N/A".to_string());
        self.render(
            "adhoc",
            context! {
                form,
                bmi,
                sex => form.sex.code(),
                glucose => number(form.fasting_glucose),
                systolic => number(form.bp_systolic),
                diastolic => number(form.bp_diastolic),
                smoker => form.smoker.to_string(),
                alcohol => form.alcohol.to_string()
            },
        )
    }

    pub fn health_info(&self, topic: &str) -> Result<String> {
        self.render("health_info", context! { topic })
    }

    pub fn chat(&self, message: &str) -> Result<String> {
        self.render("chat", context! { message })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(template_error)
    }
}

/// Whole numbers print without a decimal point, as form input shows them.
fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn template_error(err: minijinja::Error) -> VitalisError {
    VitalisError::internal(format!("prompt template error: {err}"))
}
