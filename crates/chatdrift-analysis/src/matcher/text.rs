//! Text matcher: scores every registry template by the markers found in text.
//!
//! A template is a candidate only if all of its required markers occur in the
//! text. Its score is the combined character length of its distinct markers
//! found (optional system markers included), so long, specific markers outrank
//! short generic ones like `</s>`.

use std::sync::OnceLock;

use aho_corasick::{AhoCorasick, MatchKind};
use rustc_hash::FxHashSet;

use crate::registry::{Template, TemplateRegistry};

/// A template whose required markers were all found, with its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCandidate {
    pub template: &'static str,
    pub score: usize,
}

/// One automaton over every distinct marker in the registry.
struct MarkerIndex {
    automaton: AhoCorasick,
    markers: Vec<&'static str>,
}

impl MarkerIndex {
    fn build(registry: TemplateRegistry) -> Option<Self> {
        let mut markers: Vec<&'static str> = Vec::new();
        for template in registry.iter() {
            for marker in template.required_markers().chain(template.optional_markers()) {
                if !markers.contains(&marker) {
                    markers.push(marker);
                }
            }
        }
        match AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&markers)
        {
            Ok(automaton) => Some(Self { automaton, markers }),
            Err(e) => {
                tracing::warn!(error = %e, "marker automaton unavailable, falling back to substring scan");
                None
            }
        }
    }

    fn present_in(&self, text: &str) -> FxHashSet<&'static str> {
        self.automaton
            .find_overlapping_iter(text)
            .map(|m| self.markers[m.pattern().as_usize()])
            .collect()
    }
}

static MARKER_INDEX: OnceLock<Option<MarkerIndex>> = OnceLock::new();

/// Markers of the built-in registry present in `text`, in one automaton pass.
fn builtin_markers_present(text: &str) -> FxHashSet<&'static str> {
    let index = MARKER_INDEX.get_or_init(|| MarkerIndex::build(TemplateRegistry::builtin()));
    match index {
        Some(index) => index.present_in(text),
        None => markers_present(TemplateRegistry::builtin().as_slice(), text),
    }
}

/// Markers of `templates` present in `text`, by plain substring search.
fn markers_present(templates: &[Template], text: &str) -> FxHashSet<&'static str> {
    templates
        .iter()
        .flat_map(|t| t.required_markers().chain(t.optional_markers()))
        .filter(|m| text.contains(m))
        .collect()
}

/// Score one template against the set of markers present. `None` = not a candidate.
fn score_template(template: &Template, present: &FxHashSet<&'static str>) -> Option<usize> {
    let mut matched: FxHashSet<&'static str> = FxHashSet::default();
    for marker in template.required_markers() {
        if !present.contains(marker) {
            return None;
        }
        matched.insert(marker);
    }
    // A template with no markers at all would match any text.
    if matched.is_empty() {
        return None;
    }
    matched.extend(template.optional_markers().filter(|m| present.contains(m)));
    Some(matched.iter().map(|m| m.chars().count()).sum())
}

fn rank(templates: &[Template], present: &FxHashSet<&'static str>) -> Vec<TextCandidate> {
    let mut candidates: Vec<TextCandidate> = templates
        .iter()
        .filter_map(|t| {
            score_template(t, present).map(|score| TextCandidate {
                template: t.name,
                score,
            })
        })
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// Winner of a ranked candidate list; `None` when empty or when the top two tie.
fn pick(candidates: &[TextCandidate]) -> Option<&'static str> {
    match candidates {
        [] => None,
        [best] => Some(best.template),
        [best, runner_up, ..] if best.score == runner_up.score => {
            tracing::debug!(
                first = best.template,
                second = runner_up.template,
                score = best.score,
                "ambiguous template detection"
            );
            None
        }
        [best, ..] => Some(best.template),
    }
}

/// All registry candidates for `text`, best first. Equal scores keep registry order.
pub fn rank_text_candidates(text: &str) -> Vec<TextCandidate> {
    if text.is_empty() {
        return Vec::new();
    }
    rank(
        TemplateRegistry::builtin().as_slice(),
        &builtin_markers_present(text),
    )
}

/// Rank an arbitrary template list against `text`.
pub fn rank_candidates_in(templates: &[Template], text: &str) -> Vec<TextCandidate> {
    if text.is_empty() {
        return Vec::new();
    }
    rank(templates, &markers_present(templates, text))
}

/// Detect the template used to format `text`.
///
/// Returns `None` when no template's markers are all present, or when the two
/// best candidates score the same.
pub fn detect_template_from_text(text: &str) -> Option<&'static str> {
    pick(&rank_text_candidates(text))
}

/// Detect against an arbitrary template list, with the same tie rule.
pub fn detect_template_in(templates: &[Template], text: &str) -> Option<&'static str> {
    pick(&rank_candidates_in(templates, text))
}
