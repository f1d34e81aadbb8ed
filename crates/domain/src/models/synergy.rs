//! Synergy note domain models and reply parsing.
//!
//! The synergy generator asks a language model for talking points between
//! two connected users. The model is instructed to answer under three
//! literal labels; the reply is split with ordered regex captures and a
//! missing label yields an empty string for that section.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref HELP_THEM_RE: Regex =
        Regex::new(r"(?s)HELP_THEM:\s*(.*?)\s*(?:HELP_ME:|COMMON_GROUND:|$)").unwrap();
    static ref HELP_ME_RE: Regex =
        Regex::new(r"(?s)HELP_ME:\s*(.*?)\s*(?:COMMON_GROUND:|$)").unwrap();
    static ref COMMON_GROUND_RE: Regex = Regex::new(r"(?s)COMMON_GROUND:\s*(.*?)\s*$").unwrap();
}

/// Textual profile fields sent to the generator.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SynergyProfile {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    /// One-line career summary, typically the latest work entry.
    #[serde(default)]
    pub work_summary: Option<String>,
}

impl SynergyProfile {
    /// Renders the profile as the bullet block embedded in the prompt.
    pub fn as_prompt_block(&self) -> String {
        let mut block = format!("Name: {}", self.full_name);
        if let Some(bio) = self.bio.as_deref().filter(|s| !s.is_empty()) {
            block.push_str(&format!("\nBio: {}", bio));
        }
        if let Some(location) = self.location.as_deref().filter(|s| !s.is_empty()) {
            block.push_str(&format!("\nLocation: {}", location));
        }
        if let Some(website) = self.website.as_deref().filter(|s| !s.is_empty()) {
            block.push_str(&format!("\nWebsite: {}", website));
        }
        if let Some(work) = self.work_summary.as_deref().filter(|s| !s.is_empty()) {
            block.push_str(&format!("\nWork: {}", work));
        }
        block
    }
}

/// Request body for the synergy endpoint: the caller and the counterpart.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SynergyRequest {
    #[validate(nested)]
    pub me: SynergyProfile,

    #[validate(nested)]
    pub them: SynergyProfile,
}

/// The three labeled sections of a synergy note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyResponse {
    pub help_them: String,
    pub help_me: String,
    pub common_ground: String,
}

/// Splits a model reply into the three labeled sections.
///
/// Captures are keyed on the literal labels `HELP_THEM:`, `HELP_ME:` and
/// `COMMON_GROUND:`; any missing label produces an empty string.
pub fn parse_synergy_sections(reply: &str) -> SynergyResponse {
    let capture = |re: &Regex| {
        re.captures(reply)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };

    SynergyResponse {
        help_them: capture(&HELP_THEM_RE),
        help_me: capture(&HELP_ME_RE),
        common_ground: capture(&COMMON_GROUND_RE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> SynergyProfile {
        SynergyProfile {
            full_name: name.to_string(),
            bio: None,
            location: None,
            website: None,
            work_summary: None,
        }
    }

    #[test]
    fn test_parse_all_three_sections() {
        let reply = "HELP_THEM: A\nHELP_ME: B\nCOMMON_GROUND: C";
        let sections = parse_synergy_sections(reply);
        assert_eq!(sections.help_them, "A");
        assert_eq!(sections.help_me, "B");
        assert_eq!(sections.common_ground, "C");
    }

    #[test]
    fn test_parse_multiline_sections() {
        let reply = "HELP_THEM: Introduce them to\nyour publisher.\nHELP_ME: Ask about hiring.\nCOMMON_GROUND: Both lived in Berlin.";
        let sections = parse_synergy_sections(reply);
        assert_eq!(sections.help_them, "Introduce them to\nyour publisher.");
        assert_eq!(sections.help_me, "Ask about hiring.");
        assert_eq!(sections.common_ground, "Both lived in Berlin.");
    }

    #[test]
    fn test_parse_missing_label_yields_empty_string() {
        let reply = "HELP_THEM: A\nCOMMON_GROUND: C";
        let sections = parse_synergy_sections(reply);
        assert_eq!(sections.help_them, "A");
        assert_eq!(sections.help_me, "");
        assert_eq!(sections.common_ground, "C");
    }

    #[test]
    fn test_parse_empty_reply() {
        let sections = parse_synergy_sections("");
        assert_eq!(sections.help_them, "");
        assert_eq!(sections.help_me, "");
        assert_eq!(sections.common_ground, "");
    }

    #[test]
    fn test_parse_preamble_ignored() {
        let reply = "Sure! Here are some ideas.\n\nHELP_THEM: A\nHELP_ME: B\nCOMMON_GROUND: C\n";
        let sections = parse_synergy_sections(reply);
        assert_eq!(sections.help_them, "A");
        assert_eq!(sections.help_me, "B");
        assert_eq!(sections.common_ground, "C");
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = SynergyResponse {
            help_them: "A".to_string(),
            help_me: "B".to_string(),
            common_ground: "C".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"helpThem":"A","helpMe":"B","commonGround":"C"}"#
        );
    }

    #[test]
    fn test_prompt_block_includes_present_fields_only() {
        let mut p = profile("Ada Lovelace");
        p.bio = Some("Analyst.".to_string());
        p.location = Some(String::new());

        let block = p.as_prompt_block();
        assert!(block.contains("Name: Ada Lovelace"));
        assert!(block.contains("Bio: Analyst."));
        assert!(!block.contains("Location:"));
        assert!(!block.contains("Website:"));
    }

    #[test]
    fn test_request_validation_rejects_empty_name() {
        let request = SynergyRequest {
            me: profile(""),
            them: profile("Grace Hopper"),
        };
        assert!(request.validate().is_err());
    }
}
