use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Industry sector of an audited company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Bank,
    Insurance,
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sector::Bank => write!(f, "bank"),
            Sector::Insurance => write!(f, "insurance"),
        }
    }
}

/// A company eligible for auditing. Only ever constructed from the
/// server-side allow-list, never from client input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub id: String,
    pub name: String,
    /// Bare hostname, e.g. "wellsfargo.com".
    pub website: String,
    pub sector: Sector,
}

impl CompanyInfo {
    pub fn new(id: &str, name: &str, website: &str, sector: Sector) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            website: website.to_string(),
            sector,
        }
    }
}

/// The five fixed scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryKey {
    AiReadiness,
    MobileApp,
    CustomerSentiment,
    WebExperience,
    Accessibility,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 5] = [
        CategoryKey::AiReadiness,
        CategoryKey::MobileApp,
        CategoryKey::CustomerSentiment,
        CategoryKey::WebExperience,
        CategoryKey::Accessibility,
    ];

    /// Fixed weight as a percentage. Weights sum to 100.
    pub fn weight(&self) -> u8 {
        match self {
            CategoryKey::AiReadiness => 25,
            CategoryKey::MobileApp => 25,
            CategoryKey::CustomerSentiment => 20,
            CategoryKey::WebExperience => 15,
            CategoryKey::Accessibility => 15,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryKey::AiReadiness => "AI Readiness",
            CategoryKey::MobileApp => "Mobile App Experience",
            CategoryKey::CustomerSentiment => "Customer Sentiment",
            CategoryKey::WebExperience => "Web Experience",
            CategoryKey::Accessibility => "Accessibility",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::AiReadiness => "aiReadiness",
            CategoryKey::MobileApp => "mobileApp",
            CategoryKey::CustomerSentiment => "customerSentiment",
            CategoryKey::WebExperience => "webExperience",
            CategoryKey::Accessibility => "accessibility",
        }
    }
}

/// Coarse banding of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Strong,
    Adequate,
    NeedsWork,
}

impl Tier {
    /// Thresholds: strong >= 75, adequate in [50, 75), needs-work < 50.
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            Tier::Strong
        } else if score >= 50 {
            Tier::Adequate
        } else {
            Tier::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Strong => "Strong",
            Tier::Adequate => "Adequate",
            Tier::NeedsWork => "Needs Work",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub observation: String,
    pub why_it_matters: String,
    pub evidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditCategory {
    pub key: CategoryKey,
    pub label: String,
    /// Integer score 0-100.
    pub score: u8,
    /// Weight as a percentage.
    pub weight: u8,
    /// Exactly three findings.
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
}

/// The complete structured assessment for one company. Immutable once
/// created; replaced wholesale on regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    /// Equals the company id.
    pub id: String,
    pub company: CompanyInfo,
    pub overall_score: u8,
    pub tier: Tier,
    /// Exactly five, one per category key.
    pub categories: Vec<AuditCategory>,
    /// Exactly four.
    pub recommendations: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
}

/// The raw tool-call input returned by the model, before server-side
/// validation and score recomputation. Deserialized strictly: unknown
/// fields fail the parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuditPayload {
    pub overall_score: f64,
    pub tier: Tier,
    pub categories: Vec<CategoryPayload>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryPayload {
    pub key: CategoryKey,
    pub label: String,
    pub score: f64,
    pub weight: f64,
    pub findings: Vec<Finding>,
}

/// Numeric summary extracted from the page-performance API. Absent
/// entirely when the API call fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedResult {
    /// 0-100, scaled from the API's 0-1 fraction.
    pub performance_score: u8,
    /// 0-100, scaled from the API's 0-1 fraction.
    pub accessibility_score: u8,
    /// Largest contentful paint, milliseconds.
    pub lcp: f64,
    /// Cumulative layout shift.
    pub cls: f64,
    /// Max potential first input delay, milliseconds.
    pub fid: f64,
    pub mobile_usability: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds() {
        assert_eq!(Tier::from_score(100), Tier::Strong);
        assert_eq!(Tier::from_score(75), Tier::Strong);
        assert_eq!(Tier::from_score(74), Tier::Adequate);
        assert_eq!(Tier::from_score(50), Tier::Adequate);
        assert_eq!(Tier::from_score(49), Tier::NeedsWork);
        assert_eq!(Tier::from_score(0), Tier::NeedsWork);
    }

    #[test]
    fn category_weights_sum_to_100() {
        let total: u32 = CategoryKey::ALL.iter().map(|k| k.weight() as u32).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn tier_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Tier::NeedsWork).unwrap(),
            "\"needs-work\""
        );
        assert_eq!(serde_json::to_string(&Tier::Strong).unwrap(), "\"strong\"");
    }

    #[test]
    fn category_key_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&CategoryKey::AiReadiness).unwrap(),
            "\"aiReadiness\""
        );
        assert_eq!(
            serde_json::to_string(&CategoryKey::CustomerSentiment).unwrap(),
            "\"customerSentiment\""
        );
    }

    #[test]
    fn finding_uses_camel_case_wire_names() {
        let f = Finding {
            observation: "o".into(),
            why_it_matters: "w".into(),
            evidence: "e".into(),
        };
        let json = serde_json::to_value(&f).unwrap();
        assert!(json.get("whyItMatters").is_some());
    }

    #[test]
    fn payload_rejects_unknown_fields() {
        let raw = serde_json::json!({
            "overallScore": 60,
            "tier": "adequate",
            "categories": [],
            "recommendations": [],
            "extra": true,
        });
        let parsed: std::result::Result<AuditPayload, _> = serde_json::from_value(raw);
        assert!(parsed.is_err());
    }
}
