//! Gemini API を使った SuggestionGenerator 実装
//!
//! 配信状況を各言語の見出し付きのコンテキスト文にまとめ、`generateContent` に送る。
//! タイムアウトや回数制限はここでは扱わない（`gated` が担当する）。

use std::fmt::Write as _;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::domain::{
    GeneratorError, LanguageCode, SuggestionContext, SuggestionGenerator,
    suggestion::{
        EnergyLevel, EngagementLevel, GrowthStatus, RecentEvent, SentimentStatus, ViewerTrend,
    },
};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const MESSAGE_EXCERPT_CHARS: usize = 50;

pub struct GeminiSuggestionGenerator {
    client: HttpClient,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiSuggestionGenerator {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_endpoint(api_key, model, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(api_key: &str, model: &str, endpoint: &str) -> Self {
        Self {
            client: HttpClient::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    stop_sequences: Vec<&'static str>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 150,
            stop_sequences: vec!["\n\n", "---", "###"],
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[async_trait]
impl SuggestionGenerator for GeminiSuggestionGenerator {
    async fn generate(
        &self,
        context: &SuggestionContext,
        language: LanguageCode,
    ) -> Result<String, GeneratorError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_context(context, language),
                }],
            }],
            generation_config: GenerationConfig::default(),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        let response = self
            .client
            .post(url)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| GeneratorError::Backend(format!("Gemini API error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Backend(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Malformed(format!("parse error: {}", e)))?;

        result
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .map(|part| part.text)
            .next()
            .ok_or_else(|| GeneratorError::Malformed("no candidates".to_string()))
    }
}

/// 見出し・ラベル（言語ごと）
struct Labels {
    system_persona: &'static str,
    context_header: &'static str,
    stream_duration: &'static str,
    viewer_trend: &'static str,
    engagement: &'static str,
    energy: &'static str,
    sentiment: &'static str,
    growth: &'static str,
    category: &'static str,
    unknown_category: &'static str,
    metrics_header: &'static str,
    messages_per_minute: &'static str,
    follows: &'static str,
    subs: &'static str,
    bits: &'static str,
    activity_header: &'static str,
    no_recent_events: &'static str,
    users_header: &'static str,
    no_users: &'static str,
    suggestions_header: &'static str,
    no_suggestions: &'static str,
    task_header: &'static str,
    task_points: [&'static str; 6],
    examples_header: &'static str,
    examples: [&'static str; 3],
    format_instructions: &'static str,
    engagement_levels: [&'static str; 5],
    sentiment_statuses: [&'static str; 3],
    growth_statuses: [&'static str; 3],
    energy_levels: [&'static str; 3],
    viewer_trends: [&'static str; 3],
}

const EN: Labels = Labels {
    system_persona: "You are LiveBot, an expert Twitch stream co-host with deep knowledge of streaming psychology and audience engagement. Your task is to generate a specific, actionable prompt that will genuinely help the streamer improve their Twitch stream.",
    context_header: "STREAM CONTEXT:",
    stream_duration: "Stream Duration",
    viewer_trend: "Viewer Trend",
    engagement: "Engagement Level",
    energy: "Energy Level",
    sentiment: "Sentiment",
    growth: "Growth",
    category: "Game/Category",
    unknown_category: "Unknown",
    metrics_header: "DETAILED METRICS:",
    messages_per_minute: "Messages per minute",
    follows: "Follows gained (session)",
    subs: "Subs gained (session)",
    bits: "Bits earned (session)",
    activity_header: "RECENT ACTIVITY:",
    no_recent_events: "No recent notable events",
    users_header: "TOP ENGAGED USERS:",
    no_users: "No engaged users yet",
    suggestions_header: "CONTENT SUGGESTIONS:",
    no_suggestions: "Continue current content strategy",
    task_header: "TASK: Generate a specific, actionable prompt (1-2 sentences) that:",
    task_points: [
        "Addresses the current stream situation with precision",
        "Provides a clear, specific action for the streamer",
        "Feels natural and matches the stream's energy",
        "Helps build genuine community connection",
        "Avoids generic phrases like \"hit that follow button\"",
        "Considers Twitch-specific features (bits, subs, raids, etc.)",
    ],
    examples_header: "EXAMPLES OF GOOD PROMPTS:",
    examples: [
        "\"I see we have some new faces! Drop a message and tell me what brought you here today\"",
        "\"The chat is buzzing! Let's do a quick poll - what's your favorite part of this stream so far?\"",
        "\"Thanks for all the bits! You all are amazing supporters!\"",
    ],
    format_instructions: "FORMAT: Just the prompt text, no explanations or formatting.",
    engagement_levels: [
        "EXPLOSIVE - Very high engagement!",
        "HIGH - Good engagement",
        "MODERATE - Decent engagement",
        "LOW - Needs attention",
        "QUIET - Very low engagement, needs activation",
    ],
    sentiment_statuses: [
        "POSITIVE - Great vibes!",
        "NEUTRAL - Mixed feelings",
        "NEGATIVE - Needs energy boost",
    ],
    growth_statuses: [
        "EXCELLENT - Strong growth!",
        "GOOD - Steady growth",
        "SLOW - Needs momentum",
    ],
    energy_levels: [
        "HIGH - Great energy!",
        "MEDIUM - Decent energy",
        "LOW - Needs boost",
    ],
    viewer_trends: [
        "RISING - Viewers increasing",
        "STABLE - Consistent viewership",
        "DECLINING - Viewers decreasing",
    ],
};

const FR: Labels = Labels {
    system_persona: "Vous êtes LiveBot, un co-animateur expert de stream Twitch avec une connaissance approfondie de la psychologie du streaming et de l'engagement du public. Votre tâche est de générer une suggestion spécifique et exploitable qui aidera réellement le streamer à améliorer son stream Twitch. Vous ne devez parler QUE français.",
    context_header: "CONTEXTE DU STREAM :",
    stream_duration: "Durée du Stream",
    viewer_trend: "Tendance des spectateurs",
    engagement: "Niveau d'engagement",
    energy: "Niveau d'énergie",
    sentiment: "Sentiment",
    growth: "Croissance",
    category: "Jeu/Catégorie",
    unknown_category: "Inconnu",
    metrics_header: "MÉTRIQUES DÉTAILLÉES :",
    messages_per_minute: "Messages par minute",
    follows: "Follows gagnés (session)",
    subs: "Abonnements gagnés (session)",
    bits: "Bits reçus (session)",
    activity_header: "ACTIVITÉ RÉCENTE :",
    no_recent_events: "Aucun événement notable récent",
    users_header: "UTILISATEURS LES PLUS ENGAGÉS :",
    no_users: "Aucun utilisateur engagé pour le moment",
    suggestions_header: "SUGGESTIONS DE CONTENU :",
    no_suggestions: "Continuer la stratégie de contenu actuelle",
    task_header: "TÂCHE : Générez une suggestion spécifique et exploitable (1-2 phrases) qui :",
    task_points: [
        "Répond à la situation actuelle du stream avec précision",
        "Fournit une action claire et spécifique pour le streamer",
        "Semble naturelle et correspond à l'énergie du stream",
        "Aide à créer une véritable connexion avec la communauté",
        "Évite les phrases génériques comme \"cliquez sur le bouton suivre\"",
        "Prend en compte les fonctionnalités spécifiques de Twitch (bits, subs, raids, etc.)",
    ],
    examples_header: "EXEMPLES DE BONNES SUGGESTIONS :",
    examples: [
        "\"Je vois qu'il y a de nouveaux visages ! Laissez un message et dites-moi ce qui vous amène ici aujourd'hui\"",
        "\"Le chat est en feu ! Faisons un petit sondage : quelle est votre partie préférée du stream jusqu'à présent ?\"",
        "\"Merci pour tous les bits ! Vous êtes des supporters incroyables !\"",
    ],
    format_instructions: "FORMAT : Uniquement le texte de la suggestion, sans explications ni mise en forme. RÉPONDEZ UNIQUEMENT EN FRANÇAIS.",
    engagement_levels: [
        "EXPLOSIF - Engagement très élevé !",
        "ÉLEVÉ - Bon engagement",
        "MODÉRÉ - Engagement correct",
        "FAIBLE - Nécessite de l'attention",
        "CALME - Engagement très faible, nécessite une activation",
    ],
    sentiment_statuses: [
        "POSITIF - Excellente ambiance !",
        "NEUTRE - Sentiments mitigés",
        "NÉGATIF - Besoin d'un boost d'énergie",
    ],
    growth_statuses: [
        "EXCELLENT - Croissance forte !",
        "BON - Croissance régulière",
        "LENT - Besoin d'élan",
    ],
    energy_levels: [
        "ÉLEVÉE - Excellente énergie !",
        "MOYENNE - Énergie correcte",
        "FAIBLE - Besoin d'un boost",
    ],
    viewer_trends: [
        "EN HAUSSE - Spectateurs en augmentation",
        "STABLE - Audience constante",
        "EN BAISSE - Spectateurs en diminution",
    ],
};

/// es / de は英語の見出しを使い、応答言語だけを指示する
fn labels(language: LanguageCode) -> &'static Labels {
    match language {
        LanguageCode::Fr => &FR,
        _ => &EN,
    }
}

fn language_instruction(language: LanguageCode) -> Option<&'static str> {
    match language {
        LanguageCode::Es => Some("IMPORTANT: Respond only in Spanish."),
        LanguageCode::De => Some("IMPORTANT: Respond only in German."),
        _ => None,
    }
}

fn engagement_index(level: EngagementLevel) -> usize {
    match level {
        EngagementLevel::Explosive => 0,
        EngagementLevel::High => 1,
        EngagementLevel::Moderate => 2,
        EngagementLevel::Low => 3,
        EngagementLevel::Quiet => 4,
    }
}

fn sentiment_index(status: SentimentStatus) -> usize {
    match status {
        SentimentStatus::Positive => 0,
        SentimentStatus::Neutral => 1,
        SentimentStatus::Negative => 2,
    }
}

fn growth_index(status: GrowthStatus) -> usize {
    match status {
        GrowthStatus::Excellent => 0,
        GrowthStatus::Good => 1,
        GrowthStatus::Slow => 2,
    }
}

fn energy_index(level: EnergyLevel) -> usize {
    match level {
        EnergyLevel::High => 0,
        EnergyLevel::Medium => 1,
        EnergyLevel::Low => 2,
    }
}

fn trend_index(trend: ViewerTrend) -> usize {
    match trend {
        ViewerTrend::Rising => 0,
        ViewerTrend::Stable => 1,
        ViewerTrend::Declining => 2,
    }
}

fn describe_event(event: &RecentEvent) -> String {
    match event {
        RecentEvent::Message { from, text } => {
            let excerpt: String = text.chars().take(MESSAGE_EXCERPT_CHARS).collect();
            format!("Latest message from {}: \"{}\"", from, excerpt)
        }
        RecentEvent::Cheer { from, bits } => format!("Recent bits from {}: {} bits", from, bits),
        RecentEvent::Follow { from } => format!("New follower: {}", from),
        RecentEvent::Subscription { from, tier } => {
            format!("New subscriber: {} ({:?})", from, tier)
        }
        RecentEvent::Raid { from, viewers } => {
            format!("Recent raid from {}: {} viewers", from, viewers)
        }
    }
}

/// 生成サービスに送るコンテキスト文
pub fn build_context(context: &SuggestionContext, language: LanguageCode) -> String {
    let t = labels(language);
    let category = if context.category.is_empty() {
        t.unknown_category
    } else {
        context.category.as_str()
    };

    // String への書き込みは失敗しない
    let mut out = String::new();
    let _ = writeln!(out, "{}", t.system_persona);
    if let Some(instruction) = language_instruction(language) {
        let _ = writeln!(out, "{}", instruction);
    }

    let _ = writeln!(out, "\n{}", t.context_header);
    let _ = writeln!(
        out,
        "- {}: {} minutes ({} phase, {})",
        t.stream_duration,
        context.stream_minutes.floor() as u64,
        context.stream_stage().as_str(),
        context.phase
    );
    let _ = writeln!(
        out,
        "- {}: {}",
        t.viewer_trend,
        t.viewer_trends[trend_index(context.viewer_trend())]
    );
    let _ = writeln!(
        out,
        "- {}: {}",
        t.engagement,
        t.engagement_levels[engagement_index(context.engagement_level())]
    );
    let _ = writeln!(
        out,
        "- {}: {}",
        t.energy,
        t.energy_levels[energy_index(context.energy_level())]
    );
    let _ = writeln!(
        out,
        "- {}: {}",
        t.sentiment,
        t.sentiment_statuses[sentiment_index(context.sentiment_status())]
    );
    let _ = writeln!(
        out,
        "- {}: {}",
        t.growth,
        t.growth_statuses[growth_index(context.growth_status())]
    );
    let _ = writeln!(out, "- {}: {}", t.category, category);
    let _ = writeln!(
        out,
        "- Local time: {} ({})",
        context.time.time_of_day.as_str(),
        context.time.day_of_week()
    );

    let _ = writeln!(out, "\n{}", t.metrics_header);
    let _ = writeln!(
        out,
        "- {}: {:.1}",
        t.messages_per_minute, context.messages_per_minute
    );
    let _ = writeln!(out, "- {}: {}", t.follows, context.session_follows);
    let _ = writeln!(out, "- {}: {}", t.subs, context.session_subs);
    let _ = writeln!(out, "- {}: {}", t.bits, context.session_bits);

    let _ = writeln!(out, "\n{}", t.activity_header);
    if context.recent_events.is_empty() {
        let _ = writeln!(out, "- {}", t.no_recent_events);
    }
    for event in &context.recent_events {
        let _ = writeln!(out, "- {}", describe_event(event));
    }

    let _ = writeln!(out, "\n{}", t.users_header);
    if context.top_users.is_empty() {
        let _ = writeln!(out, "- {}", t.no_users);
    }
    for user in &context.top_users {
        let e = &user.engagement;
        let _ = writeln!(
            out,
            "- {}: {} messages, {} bits, {} subs",
            user.chatter.as_str(),
            e.messages,
            e.bits,
            e.subs
        );
    }

    let _ = writeln!(out, "\n{}", t.suggestions_header);
    let suggestions = context.content_suggestions();
    if suggestions.is_empty() {
        let _ = writeln!(out, "- {}", t.no_suggestions);
    }
    for suggestion in suggestions {
        let _ = writeln!(out, "- {}", suggestion);
    }

    let _ = writeln!(out, "\n{}", t.task_header);
    for point in t.task_points {
        let _ = writeln!(out, "1. {}", point);
    }

    let _ = writeln!(out, "\n{}", t.examples_header);
    for example in t.examples {
        let _ = writeln!(out, "- {}", example);
    }

    let _ = write!(out, "\n{}", t.format_instructions);
    out
}
