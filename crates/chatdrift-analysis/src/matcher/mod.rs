//! Template matcher: infers a template identity from text, a model name, or
//! a config mapping.
//!
//! Every operation returns `Option<&'static str>`: a registry name, or `None`
//! when the evidence is missing or ambiguous. A wrong guess would hide a real
//! training/inference mismatch downstream, so ties and unknowns stay `None`.
//!
//! - `text.rs`: marker-presence scoring over the registry
//! - `model_name.rs`: ordered keyword table
//! - `config.rs`: recognized keys in an inference config mapping

pub mod config;
pub mod model_name;
pub mod text;

pub use config::detect_template_from_config;
pub use model_name::detect_template_from_model_name;
pub use text::{
    detect_template_from_text, detect_template_in, rank_candidates_in, rank_text_candidates,
    TextCandidate,
};
