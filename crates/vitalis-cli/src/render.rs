//! Terminal rendering for profiles, predictions and articles.

use colored::{ColoredString, Colorize};
use vitalis_core::chat::{ChatMessage, ChatRole};
use vitalis_core::daily_log::{DailyLog, VitalsPoint};
use vitalis_core::health_info::{Block, HealthInfo, Inline, convert};
use vitalis_core::patient::PatientSummary;
use vitalis_core::prediction::{PredictionResult, RecommendationCategory, RiskLabel};

pub fn heading(text: &str) {
    println!("{}", format!("=== {text} ===").bright_magenta().bold());
}

pub fn success(text: &str) {
    println!("{}", format!("✓ {text}").green());
}

pub fn hint(text: &str) {
    println!("{}", text.bright_black());
}

pub fn error_panel(message: &str) {
    eprintln!("{}", "Error".red().bold());
    eprintln!("{}", message.red());
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn field(label: &str, value: impl std::fmt::Display) {
    let label = format!("{:<20}", format!("{label}:"));
    println!("  {} {}", label.bright_black(), value);
}

pub fn profile(summary: &PatientSummary) {
    heading(&summary.name_alias);
    field("Patient ID", &summary.patient_id);
    field("Age", summary.age);
    field("Sex", summary.sex);
    field("BMI", format!("{:.1}", summary.bmi));
    field("Activity", summary.activity);
    field("Smoker", yes_no(summary.smoker));
    field("Alcohol", yes_no(summary.alcohol));
    field("Known conditions", list_or_none(&summary.known_conditions));
    field("Medications", list_or_none(&summary.medications));
    field("Family history", list_or_none(&summary.family_history));
    field("Recent symptoms", list_or_none(&summary.recent_symptoms));
    println!();
}

pub fn vitals(series: &[VitalsPoint]) {
    heading("Vitals Trend");
    if series.is_empty() {
        hint("No vitals recorded yet.");
        println!();
        return;
    }
    let header = format!(
        "  {:<12} {:>10} {:>10} {:>10}",
        "Date", "Systolic", "Diastolic", "Glucose"
    );
    println!("{}", header.bold());
    for point in series {
        println!(
            "  {:<12} {:>10} {:>10} {:>10}",
            point.date.format("%Y-%m-%d").to_string(),
            point.bp_systolic,
            point.bp_diastolic,
            point.fasting_glucose
        );
    }
    println!();
}

pub fn daily_logs(logs: &[DailyLog]) {
    heading("Recent Daily Logs");
    if logs.is_empty() {
        hint("No daily logs yet.");
        println!();
        return;
    }
    for log in logs {
        println!(
            "  {}  BP {}/{}  Glucose {}  HR {}  Sleep {}h",
            log.date.format("%Y-%m-%d").to_string().bold(),
            log.vitals.bp_systolic,
            log.vitals.bp_diastolic,
            log.vitals.fasting_glucose,
            log.vitals.heart_rate,
            log.sleep_hours
        );
        if !log.symptoms.is_empty() {
            println!("      {}", format!("Symptoms: {}", log.symptoms.join(", ")).yellow());
        }
    }
    println!();
}

fn risk_colored(result: &PredictionResult) -> ColoredString {
    let text = format!("{} ({}%)", result.risk_label, result.risk_percent());
    match result.risk_label {
        RiskLabel::Low => text.green().bold(),
        RiskLabel::Medium => text.yellow().bold(),
        RiskLabel::High => text.red().bold(),
    }
}

fn category_colored(category: RecommendationCategory) -> ColoredString {
    let tag = format!("[{category}]");
    match category {
        RecommendationCategory::Diet => tag.green(),
        RecommendationCategory::Lifestyle => tag.blue(),
        RecommendationCategory::Monitoring => tag.magenta(),
    }
}

pub fn prediction(result: &PredictionResult) {
    heading("AI Risk Assessment");
    field("Disease", result.disease.bold());
    field("Risk", risk_colored(result));

    if !result.top_contributors.is_empty() {
        println!("  {}", "Top contributing factors:".bright_black());
        for contributor in &result.top_contributors {
            println!("    - {contributor}");
        }
    }

    println!();
    heading("Recommendations");
    for recommendation in &result.recommendations {
        println!(
            "  {} {}",
            category_colored(recommendation.category),
            recommendation.title.bold()
        );
        println!("      {}", recommendation.description);
    }
    println!();
}

fn inline_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) => text.normal().to_string(),
            Inline::Strong(text) => text.bold().to_string(),
        })
        .collect()
}

pub fn health_info(info: &HealthInfo) {
    heading(&info.topic);
    for section in &info.sections {
        println!("{}", section.title.bright_cyan().bold());
        for block in convert(&section.content) {
            match block {
                Block::Heading { inlines, .. } => {
                    println!("{}", inline_text(&inlines).cyan().bold());
                }
                Block::List(items) => {
                    for item in items {
                        println!("  • {}", inline_text(&item));
                    }
                }
                Block::Paragraph(inlines) => println!("{}", inline_text(&inlines)),
            }
        }
        println!();
    }
    println!("{}", info.disclaimer.bright_black().italic());
}

pub fn chat_message(message: &ChatMessage) {
    match message.role {
        ChatRole::User => println!("{}", format!("> {}", message.text).green()),
        ChatRole::Bot => {
            for line in message.text.lines() {
                println!("{}", line.bright_blue());
            }
        }
    }
}
