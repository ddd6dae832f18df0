//! Category suggestion backed by the Gemini API.
//!
//! The network call is a single blocking request; everything around it
//! (validation, prompt assembly, response resolution) is pure so it can be
//! tested without the API.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::categories::FALLBACK_CATEGORY;

const API_KEY_VAR: &str = "GEMINI_API_KEY";
const MODEL_VAR: &str = "GEMINI_MODEL";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const MIN_DESCRIPTION_LEN: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuggestError {
    #[error("description must be at least {MIN_DESCRIPTION_LEN} characters long")]
    DescriptionTooShort,
    #[error("{API_KEY_VAR} is not set")]
    MissingApiKey,
}

// long digit runs and day/month fragments carry no categorization signal
static DIGIT_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d{5,}").ok());
static DATE_FRAGMENT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d{2}/\d{2}").ok());

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini client configured from the environment.
pub struct Suggester {
    api_key: String,
    model: String,
}

impl Suggester {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR).map_err(|_| SuggestError::MissingApiKey)?;
        let model = env::var(MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self { api_key, model })
    }

    /// Ask the model for the best-fitting category from `categories`.
    /// Replies that are not an exact member of the list fall back to
    /// [`FALLBACK_CATEGORY`].
    pub fn suggest(&self, description: &str, categories: &[String]) -> Result<String> {
        if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            bail!(SuggestError::DescriptionTooShort);
        }

        let prompt = build_prompt(&scrub(description), categories);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .context("build http client")?;
        let resp = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .context("gemini request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().unwrap_or_default();
            bail!("gemini error: {status} {txt}");
        }

        let out: GenerateResponse = resp.json().context("parse gemini response")?;
        let reply = out
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .unwrap_or_default();

        Ok(resolve_suggestion(&reply, categories))
    }
}

/// Strip account numbers and date fragments before the text leaves the machine.
fn scrub(description: &str) -> String {
    let mut masked = description.to_string();
    if let Some(re) = DIGIT_RUN.as_ref() {
        masked = re.replace_all(&masked, "00000").into_owned();
    }
    if let Some(re) = DATE_FRAGMENT.as_ref() {
        masked = re.replace_all(&masked, "01/01").into_owned();
    }
    masked
}

fn build_prompt(description: &str, categories: &[String]) -> String {
    format!(
        "You are an expert financial assistant. Your task is to categorize a \
         transaction based on its description.\n\n\
         Analyze the following transaction description:\n\
         \"{description}\"\n\n\
         Suggest the single most appropriate category from the following list:\n\
         {}\n\n\
         Rules:\n\
         - Respond with only the category name.\n\
         - If the description does not clearly match any category, you MUST \
         respond with \"{FALLBACK_CATEGORY}\".\n\
         - Do not add any extra text, explanation, or punctuation.",
        categories.join(", ")
    )
}

/// Accept the model's reply only when it names a known category.
fn resolve_suggestion(reply: &str, categories: &[String]) -> String {
    let trimmed = reply.trim();
    if categories.iter().any(|c| c == trimmed) {
        trimmed.to_string()
    } else {
        FALLBACK_CATEGORY.to_string()
    }
}

#[cfg(test)]
mod tests;
