// Cross-cutting prompt fragments shared by every generation domain.

/// Appended to every JSON-returning system prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every prose-returning system prompt.
pub const PROSE_ONLY_INSTRUCTION: &str = "Respond with the finished text only. \
    Do NOT include preamble, commentary, or markdown code fences.";
