//! Model-name matcher: ordered keyword table.
//!
//! The first keyword contained in the lowercased name wins, so more specific
//! keywords come first: `openhermes-2.5-mistral` is ChatML, not Mistral, and
//! `tinyllama` is Zephyr-formatted, not LLaMA-2.

/// (keyword, template) pairs in priority order. Keywords are lowercase.
pub const MODEL_KEYWORDS: &[(&str, &str)] = &[
    ("openhermes", "chatml"),
    ("dolphin", "chatml"),
    ("qwen", "chatml"),
    ("yi-", "chatml"),
    ("chatml", "chatml"),
    ("tinyllama", "zephyr"),
    ("zephyr", "zephyr"),
    ("llama-3", "llama3"),
    ("llama3", "llama3"),
    ("llama-2", "llama2"),
    ("llama2", "llama2"),
    ("codellama", "llama2"),
    ("vicuna", "vicuna"),
    ("mistral", "mistral"),
    ("mixtral", "mistral"),
    ("phi-3", "phi3"),
    ("phi3", "phi3"),
    ("gemma", "gemma"),
    ("alpaca", "alpaca"),
    ("llama", "llama2"),
];

/// Detect the template a model expects from its name or hub id.
pub fn detect_template_from_model_name(name: &str) -> Option<&'static str> {
    let lowered = name.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    let hit = MODEL_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|&(_, template)| template);
    tracing::debug!(model = name, template = ?hit, "model name detection");
    hit
}
