pub mod anthropic;
pub mod model;
pub mod prompt;
pub mod schema;
pub mod synthesizer;

pub use anthropic::{AnthropicConfig, AnthropicProvider};
pub use model::AuditModel;
pub use prompt::build_prompt;
pub use schema::{audit_tool, AUDIT_TOOL_NAME};
pub use synthesizer::AuditSynthesizer;
