use crate::model::AuditModel;
use crate::prompt::build_prompt;
use cxaudit_core::{
    validate_and_finalize, Audit, AuditPayload, CompanyInfo, CxAuditError, PageSpeedResult, Result,
};
use std::sync::Arc;
use tracing::info;

/// Drives one model invocation and turns the tool input into a
/// validated, server-recomputed audit.
pub struct AuditSynthesizer {
    model: Arc<dyn AuditModel>,
}

impl AuditSynthesizer {
    pub fn new(model: Arc<dyn AuditModel>) -> Self {
        Self { model }
    }

    pub async fn synthesize(
        &self,
        company: &CompanyInfo,
        html: &str,
        page_speed: Option<&PageSpeedResult>,
    ) -> Result<Audit> {
        let prompt = build_prompt(company, html, page_speed);
        info!(
            company = %company.id,
            model = self.model.model_name(),
            page_speed = page_speed.is_some(),
            "synthesizing audit"
        );

        let input = self.model.generate_audit(&prompt).await?;
        let payload: AuditPayload = serde_json::from_value(input)
            .map_err(|e| CxAuditError::Validation(format!("malformed tool input: {}", e)))?;

        validate_and_finalize(company, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cxaudit_core::{resolve, CategoryKey, Tier};
    use serde_json::{json, Value};

    struct ScriptedModel {
        input: Value,
    }

    #[async_trait]
    impl AuditModel for ScriptedModel {
        async fn generate_audit(&self, _prompt: &str) -> Result<Value> {
            Ok(self.input.clone())
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn category(key: &str, score: f64) -> Value {
        json!({
            "key": key,
            "label": "whatever",
            "score": score,
            "weight": 20,
            "findings": [
                { "observation": "o1", "whyItMatters": "w1", "evidence": "e1" },
                { "observation": "o2", "whyItMatters": "w2", "evidence": "e2" },
                { "observation": "o3", "whyItMatters": "w3", "evidence": "e3" }
            ]
        })
    }

    fn full_payload() -> Value {
        json!({
            "overallScore": 99,
            "tier": "strong",
            "categories": [
                category("aiReadiness", 68.0),
                category("mobileApp", 58.0),
                category("customerSentiment", 55.0),
                category("webExperience", 72.0),
                category("accessibility", 61.0)
            ],
            "recommendations": [
                { "title": "r1", "description": "d1" },
                { "title": "r2", "description": "d2" },
                { "title": "r3", "description": "d3" },
                { "title": "r4", "description": "d4" }
            ]
        })
    }

    #[tokio::test]
    async fn synthesize_recomputes_untrusted_arithmetic() {
        let synthesizer = AuditSynthesizer::new(Arc::new(ScriptedModel {
            input: full_payload(),
        }));
        let company = resolve("wells-fargo").unwrap();
        let audit = synthesizer.synthesize(company, "<html/>", None).await.unwrap();

        // 68*25 + 58*25 + 55*20 + 72*15 + 61*15 = 6245 -> 62, not the
        // model's claimed 99.
        assert_eq!(audit.overall_score, 62);
        assert_eq!(audit.tier, Tier::Adequate);
        assert_eq!(audit.categories.len(), 5);
        assert_eq!(audit.categories[0].key, CategoryKey::AiReadiness);
        assert_eq!(audit.categories[0].weight, 25);
        assert_eq!(audit.recommendations.len(), 4);
        assert_eq!(audit.id, "wells-fargo");
    }

    #[tokio::test]
    async fn malformed_tool_input_is_fatal() {
        let synthesizer = AuditSynthesizer::new(Arc::new(ScriptedModel {
            input: json!({ "overallScore": "not a number" }),
        }));
        let company = resolve("geico").unwrap();
        let err = synthesizer
            .synthesize(company, "", None)
            .await
            .unwrap_err();
        assert!(matches!(err, CxAuditError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_category_is_fatal() {
        let mut payload = full_payload();
        payload["categories"].as_array_mut().unwrap().pop();
        let synthesizer = AuditSynthesizer::new(Arc::new(ScriptedModel { input: payload }));
        let company = resolve("geico").unwrap();
        assert!(synthesizer.synthesize(company, "", None).await.is_err());
    }
}
