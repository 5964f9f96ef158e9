// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt shared by every enrichment call.
pub const CAREER_COACH_SYSTEM: &str = "You are a professional career coach and \
    personal branding expert. You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Placeholder used in prompts when the user left a field empty.
pub const NOT_SPECIFIED: &str = "Not specified";
