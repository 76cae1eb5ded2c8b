use crate::error::{CxAuditError, Result};
use crate::types::{
    Audit, AuditCategory, AuditPayload, CategoryKey, CompanyInfo, Tier,
};
use chrono::Utc;

/// Validate the model's tool-call payload and assemble the final audit.
///
/// The model is instructed to make overallScore equal the rounded
/// weighted average of the category scores, but its arithmetic is
/// untrusted input: the score, tier, weights, and labels are all
/// recomputed or normalized server-side from the returned category
/// scores. Shape deviations fail closed; there is no partial recovery.
pub fn validate_and_finalize(company: &CompanyInfo, payload: AuditPayload) -> Result<Audit> {
    if payload.categories.len() != 5 {
        return Err(CxAuditError::Validation(format!(
            "expected exactly 5 categories, got {}",
            payload.categories.len()
        )));
    }
    if payload.recommendations.len() != 4 {
        return Err(CxAuditError::Validation(format!(
            "expected exactly 4 recommendations, got {}",
            payload.recommendations.len()
        )));
    }

    let mut categories = Vec::with_capacity(5);
    for key in CategoryKey::ALL {
        let matching: Vec<_> = payload
            .categories
            .iter()
            .filter(|c| c.key == key)
            .collect();
        let category = match matching.as_slice() {
            [one] => *one,
            [] => {
                return Err(CxAuditError::Validation(format!(
                    "missing category {}",
                    key.as_str()
                )))
            }
            _ => {
                return Err(CxAuditError::Validation(format!(
                    "duplicate category {}",
                    key.as_str()
                )))
            }
        };

        if category.findings.len() != 3 {
            return Err(CxAuditError::Validation(format!(
                "category {} has {} findings, expected 3",
                key.as_str(),
                category.findings.len()
            )));
        }

        let score = checked_score(category.score, key.as_str())?;
        categories.push(AuditCategory {
            key,
            label: key.label().to_string(),
            score,
            weight: key.weight(),
            findings: category.findings.clone(),
        });
    }

    let overall_score = weighted_overall(&categories);
    let tier = Tier::from_score(overall_score);

    Ok(Audit {
        id: company.id.clone(),
        company: company.clone(),
        overall_score,
        tier,
        categories,
        recommendations: payload.recommendations,
        generated_at: Utc::now(),
    })
}

/// Rounded weighted average of the category scores. Weights are the
/// canonical percentages and sum to 100.
pub fn weighted_overall(categories: &[AuditCategory]) -> u8 {
    let sum: f64 = categories
        .iter()
        .map(|c| c.score as f64 * c.weight as f64)
        .sum();
    (sum / 100.0).round() as u8
}

fn checked_score(raw: f64, key: &str) -> Result<u8> {
    if !raw.is_finite() || !(0.0..=100.0).contains(&raw) {
        return Err(CxAuditError::Validation(format!(
            "category {} score {} out of range",
            key, raw
        )));
    }
    Ok(raw.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies;
    use crate::types::{CategoryPayload, Finding, Recommendation};

    fn findings() -> Vec<Finding> {
        (0..3)
            .map(|i| Finding {
                observation: format!("observation {}", i),
                why_it_matters: format!("impact {}", i),
                evidence: format!("evidence {}", i),
            })
            .collect()
    }

    fn recommendations() -> Vec<Recommendation> {
        (0..4)
            .map(|i| Recommendation {
                title: format!("rec {}", i),
                description: format!("desc {}", i),
            })
            .collect()
    }

    fn payload_with_scores(scores: [f64; 5]) -> AuditPayload {
        let categories = CategoryKey::ALL
            .iter()
            .zip(scores)
            .map(|(key, score)| CategoryPayload {
                key: *key,
                label: key.label().to_string(),
                score,
                weight: key.weight() as f64,
                findings: findings(),
            })
            .collect();
        AuditPayload {
            overall_score: 0.0,
            tier: Tier::NeedsWork,
            categories,
            recommendations: recommendations(),
        }
    }

    fn company() -> &'static CompanyInfo {
        companies::resolve("wells-fargo").unwrap()
    }

    #[test]
    fn recomputes_overall_score_and_tier() {
        // 68*25 + 58*25 + 55*20 + 72*15 + 61*15 = 6245 -> 62
        let audit =
            validate_and_finalize(company(), payload_with_scores([68.0, 58.0, 55.0, 72.0, 61.0]))
                .unwrap();
        assert_eq!(audit.overall_score, 62);
        assert_eq!(audit.tier, Tier::Adequate);
    }

    #[test]
    fn model_claimed_overall_is_ignored() {
        let mut payload = payload_with_scores([80.0, 80.0, 80.0, 80.0, 80.0]);
        payload.overall_score = 12.0;
        payload.tier = Tier::NeedsWork;
        let audit = validate_and_finalize(company(), payload).unwrap();
        assert_eq!(audit.overall_score, 80);
        assert_eq!(audit.tier, Tier::Strong);
    }

    #[test]
    fn normalizes_weights_and_labels() {
        let mut payload = payload_with_scores([50.0; 5]);
        payload.categories[0].weight = 90.0;
        payload.categories[0].label = "Something Else".into();
        let audit = validate_and_finalize(company(), payload).unwrap();
        assert_eq!(audit.categories[0].weight, 25);
        assert_eq!(audit.categories[0].label, "AI Readiness");
        let total: u32 = audit.categories.iter().map(|c| c.weight as u32).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn rejects_wrong_category_count() {
        let mut payload = payload_with_scores([50.0; 5]);
        payload.categories.pop();
        assert!(validate_and_finalize(company(), payload).is_err());
    }

    #[test]
    fn rejects_duplicate_category_key() {
        let mut payload = payload_with_scores([50.0; 5]);
        payload.categories[1].key = CategoryKey::AiReadiness;
        assert!(validate_and_finalize(company(), payload).is_err());
    }

    #[test]
    fn rejects_wrong_finding_count() {
        let mut payload = payload_with_scores([50.0; 5]);
        payload.categories[2].findings.pop();
        assert!(validate_and_finalize(company(), payload).is_err());
    }

    #[test]
    fn rejects_wrong_recommendation_count() {
        let mut payload = payload_with_scores([50.0; 5]);
        payload.recommendations.pop();
        assert!(validate_and_finalize(company(), payload).is_err());
    }

    #[test]
    fn rejects_out_of_range_score() {
        assert!(
            validate_and_finalize(company(), payload_with_scores([101.0, 50.0, 50.0, 50.0, 50.0]))
                .is_err()
        );
        assert!(
            validate_and_finalize(company(), payload_with_scores([-1.0, 50.0, 50.0, 50.0, 50.0]))
                .is_err()
        );
        assert!(
            validate_and_finalize(
                company(),
                payload_with_scores([f64::NAN, 50.0, 50.0, 50.0, 50.0])
            )
            .is_err()
        );
    }

    #[test]
    fn audit_id_matches_company_id() {
        let audit = validate_and_finalize(company(), payload_with_scores([50.0; 5])).unwrap();
        assert_eq!(audit.id, "wells-fargo");
        assert_eq!(audit.company.id, "wells-fargo");
    }
}
