use serde_json::{json, Value};

pub const AUDIT_TOOL_NAME: &str = "submit_audit";

/// The tool definition the model is forced to invoke. Mirrors the
/// `AuditPayload` shape: 5 categories with fixed keys, findings with
/// observation / whyItMatters / evidence, and recommendations.
pub fn audit_tool() -> Value {
    json!({
        "name": AUDIT_TOOL_NAME,
        "description": "Submit the completed CX audit for a financial services company.",
        "input_schema": {
            "type": "object",
            "properties": {
                "overallScore": {
                    "type": "number",
                    "description": "Overall weighted score 0-100"
                },
                "tier": {
                    "type": "string",
                    "enum": ["strong", "adequate", "needs-work"],
                    "description": "strong: 75-100, adequate: 50-74, needs-work: 0-49"
                },
                "categories": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "key": {
                                "type": "string",
                                "enum": [
                                    "aiReadiness",
                                    "mobileApp",
                                    "customerSentiment",
                                    "webExperience",
                                    "accessibility"
                                ]
                            },
                            "label": { "type": "string" },
                            "score": {
                                "type": "number",
                                "description": "Category score 0-100"
                            },
                            "weight": {
                                "type": "number",
                                "description": "Category weight as percentage (e.g. 25)"
                            },
                            "findings": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "observation": { "type": "string" },
                                        "whyItMatters": { "type": "string" },
                                        "evidence": { "type": "string" }
                                    },
                                    "required": ["observation", "whyItMatters", "evidence"]
                                }
                            }
                        },
                        "required": ["key", "label", "score", "weight", "findings"]
                    }
                },
                "recommendations": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "description": { "type": "string" }
                        },
                        "required": ["title", "description"]
                    }
                }
            },
            "required": ["overallScore", "tier", "categories", "recommendations"]
        }
    })
}
