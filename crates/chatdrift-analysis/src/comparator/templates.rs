//! Template-vs-template comparison.

use chatdrift_core::{Mismatch, Severity};

use crate::registry::{Template, TemplateField, TemplateRegistry};

/// Field name used for findings about the template identity itself.
pub const TEMPLATE_FIELD: &str = "template";

/// Compare the training-side template with the inference-side template.
///
/// Unresolved sides (absent, or not a registry name) yield one `warning` each
/// and stop the comparison. Identical names yield nothing. Otherwise each
/// structural field that differs yields one finding, `expected` holding the
/// training value and `actual` the inference value.
pub fn compare_templates(training: Option<&str>, inference: Option<&str>) -> Vec<Mismatch> {
    let registry = TemplateRegistry::builtin();
    let training_template = training.and_then(|name| registry.resolve(name));
    let inference_template = inference.and_then(|name| registry.resolve(name));

    let (training_template, inference_template) = match (training_template, inference_template) {
        (Some(t), Some(i)) => (t, i),
        _ => {
            let mut mismatches = Vec::new();
            if training_template.is_none() {
                mismatches.push(Mismatch::warning(
                    TEMPLATE_FIELD,
                    training,
                    inference,
                    unresolved_message("training", training),
                ));
            }
            if inference_template.is_none() {
                mismatches.push(Mismatch::warning(
                    TEMPLATE_FIELD,
                    training,
                    inference,
                    unresolved_message("inference", inference),
                ));
            }
            return mismatches;
        }
    };

    if training_template.name == inference_template.name {
        return Vec::new();
    }

    TemplateField::ALL
        .into_iter()
        .filter_map(|field| compare_field(field, training_template, inference_template))
        .collect()
}

fn unresolved_message(side: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("Unknown {side} template '{name}'; field comparison skipped"),
        None => format!("Could not detect {side} template; field comparison skipped"),
    }
}

fn compare_field(field: TemplateField, training: &Template, inference: &Template) -> Option<Mismatch> {
    let expected = training.field(field);
    let actual = inference.field(field);
    if expected == actual {
        return None;
    }

    let severity = match (expected, actual) {
        (Some(e), Some(a)) if e.trim() == a.trim() => Severity::Info,
        _ if field.is_special_token() => Severity::Warning,
        _ => Severity::Error,
    };

    let message = match (expected, actual) {
        (Some(_), None) => format!(
            "{field} is defined by training template '{}' but not by inference template '{}'",
            training.name, inference.name
        ),
        (None, Some(_)) => format!(
            "{field} is defined by inference template '{}' but not by training template '{}'",
            inference.name, training.name
        ),
        _ if severity == Severity::Info => format!(
            "{field} differs only in whitespace between '{}' and '{}'",
            training.name, inference.name
        ),
        _ => format!(
            "{field} differs between training template '{}' and inference template '{}'",
            training.name, inference.name
        ),
    };

    Some(Mismatch::new(severity, field.name(), expected, actual, message))
}
