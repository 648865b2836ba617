//! Feature 6: Culture & Language Fusion Translator
//!
//! Translates the submitted text into each target language and wraps the
//! result in etiquette notes for the region named in the text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FeatureContext, FeatureResult, Prepared};
use crate::adapters::generate_json;
use crate::catalog::FeatureId;
use crate::form::FormSubmission;
use crate::regions::RegionalRecord;

pub const DEFAULT_TEXT: &str = "Hello, how are you today?";

/// Hidden field listing comma-separated language codes
pub const TARGET_LANGUAGES_FIELD: &str = "_targetLanguages";

pub const DEFAULT_LANGUAGES: &[&str] = &["es", "fr", "de", "ja", "zh"];

const NOTES_SCHEMA: &str = r#"{"culturalNotes": "two or three sentences of communication advice"}"#;

/// Output key for a language code; unknown codes are used as-is
pub fn language_name(code: &str) -> &str {
    match code {
        "es" => "spanish",
        "fr" => "french",
        "de" => "german",
        "ja" => "japanese",
        "zh" => "chinese",
        "ar" => "arabic",
        "hi" => "hindi",
        "pt" => "portuguese",
        "ru" => "russian",
        "ko" => "korean",
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureSubtitle {
    pub time: &'static str,
    pub text: String,
    pub gesture: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationReport {
    pub translated_text: String,
    pub translations: BTreeMap<String, String>,
    pub translated_audio_url: &'static str,
    pub gesture_subtitles: Vec<GestureSubtitle>,
    pub cultural_notes: String,
    pub etiquette_alerts: Vec<String>,
    pub confidence_score: u32,
    pub bias_assessment: &'static str,
    pub emotional_tone: &'static str,
    pub formality_level: String,
    pub target_region: &'static str,
    pub target_country: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationBaseline {
    pub translated_text: String,
    pub translations: BTreeMap<String, String>,
    pub confidence_score: u32,
    pub cultural_notes: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedNotes {
    #[serde(default)]
    cultural_notes: String,
}

pub async fn process(ctx: &FeatureContext, form: &FormSubmission) -> FeatureResult {
    let prep = Prepared::begin(ctx, FeatureId::Translator, form).await;
    let outcome = analyze(ctx, form, &prep).await;
    conclude(&prep, outcome)
}

fn conclude(prep: &Prepared, outcome: anyhow::Result<TranslationReport>) -> FeatureResult {
    prep.finish(outcome, || baseline(prep.text_or(DEFAULT_TEXT)))
}

/// Requested language codes, or the default five
pub fn target_languages(form: &FormSubmission) -> Vec<String> {
    let requested: Vec<String> = form
        .hidden(TARGET_LANGUAGES_FIELD)
        .map(|list| {
            list.split(',')
                .map(|code| code.trim().to_lowercase())
                .filter(|code| !code.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if requested.is_empty() {
        DEFAULT_LANGUAGES.iter().map(|c| c.to_string()).collect()
    } else {
        requested
    }
}

async fn analyze(
    ctx: &FeatureContext,
    form: &FormSubmission,
    prep: &Prepared,
) -> anyhow::Result<TranslationReport> {
    let text = prep.text_or(DEFAULT_TEXT);
    let region = ctx.resolver.resolve(text);
    let culture = &region.cultural_context;

    let mut translations = BTreeMap::new();
    for code in target_languages(form) {
        let translated = ctx.inference.translate(text, &code).await;
        translations.insert(language_name(&code).to_string(), translated);
    }

    let sentiment = ctx.inference.sentiment(text).await;
    let emotional_tone = match sentiment.first().map(|s| s.score) {
        Some(s) if s > 0.6 => "positive",
        Some(s) if s < 0.4 => "negative",
        _ => "neutral",
    };

    let translated_any = translations
        .values()
        .any(|t| !t.is_empty() && t.as_str() != text);

    let prompt = format!(
        "Give cultural communication advice for delivering this message in {}, {}: \"{}\"\nGreeting style: {}\nFormality: {}\nBusiness culture: {}\nEmotional tone: {}",
        region.region,
        region.country,
        text,
        culture.greeting_style,
        culture.formality_level,
        culture.business_culture,
        emotional_tone
    );
    let cultural_notes =
        match generate_json::<GeneratedNotes>(ctx.generator.as_ref(), &prompt, Some(NOTES_SCHEMA)).await {
            Ok(generated) if !generated.cultural_notes.trim().is_empty() => generated.cultural_notes,
            Ok(_) => cultural_notes(region),
            Err(e) => {
                debug!(error = %e, "cultural notes generation unavailable, using template");
                cultural_notes(region)
            }
        };

    Ok(TranslationReport {
        translated_text: translations
            .get("spanish")
            .filter(|t| !t.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("[Spanish]: {}", text)),
        translated_audio_url: "/placeholders/translated-speech.wav",
        gesture_subtitles: gesture_subtitles(text, region),
        cultural_notes,
        etiquette_alerts: etiquette_alerts(region),
        confidence_score: if translated_any { 92 } else { 75 },
        bias_assessment: "Translation maintains cultural context. No significant bias detected.",
        emotional_tone,
        formality_level: culture.formality_level.to_lowercase(),
        target_region: region.region,
        target_country: region.country,
        translations,
    })
}

pub fn cultural_notes(region: &RegionalRecord) -> String {
    let culture = &region.cultural_context;
    format!(
        "When communicating with {} ({}): {}. Formality level is {}. Business culture: {}.",
        region.region,
        region.country,
        culture.greeting_style,
        culture.formality_level.to_lowercase(),
        culture.business_culture
    )
}

pub fn etiquette_alerts(region: &RegionalRecord) -> Vec<String> {
    let culture = &region.cultural_context;
    let formal = matches!(culture.formality_level, "High" | "Very High");
    vec![
        format!("Primary languages: {}", culture.primary_languages.join(", ")),
        format!("Formality level: {}", culture.formality_level),
        if formal {
            "Use formal titles and honorifics"
        } else {
            "Casual communication is acceptable"
        }
        .to_string(),
    ]
}

/// Opening words paired with the local greeting, then the next few words
fn gesture_subtitles(text: &str, region: &RegionalRecord) -> Vec<GestureSubtitle> {
    let words: Vec<&str> = text.split(' ').collect();
    let span = |from: usize, to: usize| {
        words
            .get(from.min(words.len())..to.min(words.len()))
            .unwrap_or_default()
            .join(" ")
    };
    let greeting = region
        .cultural_context
        .greeting_style
        .split(' ')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    vec![
        GestureSubtitle {
            time: "00:01",
            text: span(0, 2),
            gesture: greeting,
        },
        GestureSubtitle {
            time: "00:03",
            text: span(2, 5),
            gesture: "speaking".to_string(),
        },
    ]
}

fn baseline(text: &str) -> TranslationBaseline {
    TranslationBaseline {
        translated_text: text.to_string(),
        translations: BTreeMap::from([("spanish".to_string(), text.to_string())]),
        confidence_score: 70,
        cultural_notes: "Translation service temporarily limited.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::testing::{failed, offline_context, prepared};
    use serde_json::json;
    use crate::regions::RegionResolver;

    #[test]
    fn test_target_languages_default_and_override() {
        let form = FormSubmission::new().with_text("input_0", "Hi");
        assert_eq!(target_languages(&form), vec!["es", "fr", "de", "ja", "zh"]);

        let form = form.with_text(TARGET_LANGUAGES_FIELD, " KO, pt ,,");
        assert_eq!(target_languages(&form), vec!["ko", "pt"]);
    }

    #[test]
    fn test_etiquette_for_formal_region() {
        let tokyo = RegionResolver::builtin().resolve("Tokyo");
        let alerts = etiquette_alerts(tokyo);
        assert_eq!(alerts[0], "Primary languages: Japanese");
        assert_eq!(alerts[1], "Formality level: Very High");
        assert_eq!(alerts[2], "Use formal titles and honorifics");

        let sydney = RegionResolver::builtin().resolve("Sydney");
        assert_eq!(etiquette_alerts(sydney)[2], "Casual communication is acceptable");
    }

    #[test]
    fn test_gesture_subtitles_short_text() {
        let paris = RegionResolver::builtin().resolve("Paris");
        let subs = gesture_subtitles("Bonjour", paris);
        assert_eq!(subs[0].text, "Bonjour");
        assert_eq!(subs[0].gesture, "la");
        assert_eq!(subs[1].text, "");
    }

    #[test]
    fn test_cultural_notes() {
        let berlin = RegionResolver::builtin().resolve("Berlin");
        let notes = cultural_notes(berlin);
        assert!(notes.starts_with("When communicating with Berlin (Germany): Firm handshake."));
        assert!(notes.contains("Formality level is high."));
    }

    #[test]
    fn test_failed_analysis_returns_baseline() {
        let ctx = offline_context();
        let form = FormSubmission::new().with_text("input_0", "Bonjour");
        let prep = prepared(&ctx, FeatureId::Translator, &form);
        let result = conclude(&prep, failed());

        assert_eq!(result.input_percentage, prep.completeness.percentage);
        assert_eq!(result.get("translatedText"), Some(&json!("Bonjour")));
        assert_eq!(result.get("translations"), Some(&json!({ "spanish": "Bonjour" })));
        assert_eq!(
            result.get("culturalNotes"),
            Some(&json!("Translation service temporarily limited."))
        );
    }
}
