//! Formatted-text validation against one named template.
//!
//! Checks run in a fixed order and findings keep that order:
//! 1. BOS token at the start (`error`)
//! 2. EOS token at the end (`warning`)
//! 3. user turns present, and no user suffix closing a turn that is not open (`error`)
//! 4. the same for assistant turns, then stray system suffixes (`error`)
//! 5. every opened turn closed by its suffix before the next turn (`error`)
//!
//! A turn opens at its role prefix. User and assistant turns run until the
//! next user or assistant prefix; system turns run until the next prefix of
//! any role, since some templates (LLaMA-2) nest the system block inside the
//! first user turn. Empty markers are never checked, and whitespace-only
//! suffixes are never treated as closing evidence.

use chatdrift_core::{DetectorError, Mismatch};

use crate::registry::{Template, TemplateField, TemplateRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }

    fn prefix_field(self) -> TemplateField {
        match self {
            Self::User => TemplateField::UserPrefix,
            Self::Assistant => TemplateField::AssistantPrefix,
            Self::System => TemplateField::SystemPrefix,
        }
    }

    fn suffix_field(self) -> TemplateField {
        match self {
            Self::User => TemplateField::UserSuffix,
            Self::Assistant => TemplateField::AssistantSuffix,
            Self::System => TemplateField::SystemSuffix,
        }
    }

    fn is_conversational(self) -> bool {
        matches!(self, Self::User | Self::Assistant)
    }
}

const ROLES: [Role; 3] = [Role::User, Role::Assistant, Role::System];

/// A turn opened by a role prefix at byte `start`; its body begins at `body_start`.
#[derive(Debug, Clone, Copy)]
struct Turn {
    role: Role,
    start: usize,
    body_start: usize,
}

/// A role suffix at byte `start` that closes no open turn.
#[derive(Debug, Clone, Copy)]
struct StrayClose {
    role: Role,
    start: usize,
}

/// Validate `text` against the registry template named `template_name`.
///
/// An unknown template name is an `InvalidInput` error. Conformant text
/// yields an empty vector.
pub fn analyze_formatted_text(text: &str, template_name: &str) -> Result<Vec<Mismatch>, DetectorError> {
    let template = TemplateRegistry::builtin()
        .resolve(template_name)
        .ok_or_else(|| DetectorError::invalid_input(format!("unknown template '{template_name}'")))?;
    Ok(analyze_with_template(text, template))
}

/// Validate `text` against an already-resolved template.
pub fn analyze_with_template(text: &str, template: &Template) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    if let Some(bos) = template.field(TemplateField::BosToken) {
        let head = text.trim_start();
        if !head.starts_with(bos) {
            mismatches.push(Mismatch::error(
                TemplateField::BosToken.name(),
                Some(bos),
                leading(head, bos.chars().count()),
                format!("Text does not start with the BOS token of '{}'", template.name),
            ));
        }
    }

    if let Some(eos) = template.field(TemplateField::EosToken) {
        let tail = text.trim_end();
        if !tail.ends_with(eos) {
            mismatches.push(Mismatch::warning(
                TemplateField::EosToken.name(),
                Some(eos),
                trailing(tail, eos.chars().count()),
                format!("Text does not end with the EOS token of '{}'", template.name),
            ));
        }
    }

    let turns = find_turns(text, template);
    let strays = find_stray_closes(text, template, &turns);

    for role in [Role::User, Role::Assistant] {
        check_role_turns(template, &turns, &strays, role, &mut mismatches);
    }
    push_strays(template, &turns, &strays, Role::System, &mut mismatches);

    check_unterminated_turns(text, template, &turns, &mut mismatches);

    mismatches
}

/// Locate every turn opening, leftmost first. At one position the longest
/// prefix wins; overlapping openings are dropped.
fn find_turns(text: &str, template: &Template) -> Vec<Turn> {
    let mut turns: Vec<Turn> = ROLES
        .into_iter()
        .filter_map(|role| template.field(role.prefix_field()).map(|prefix| (role, prefix)))
        .flat_map(|(role, prefix)| {
            text.match_indices(prefix).map(move |(start, _)| Turn {
                role,
                start,
                body_start: start + prefix.len(),
            })
        })
        .collect();
    turns.sort_by(|a, b| a.start.cmp(&b.start).then(b.body_start.cmp(&a.body_start)));

    let mut cursor = 0;
    turns.retain(|turn| {
        if turn.start < cursor {
            return false;
        }
        cursor = turn.body_start;
        true
    });
    turns
}

/// Pair every closing suffix with the most recent open turn of a role that
/// uses it. Suffixes left unpaired are stray, except a suffix that doubles as
/// the trailing EOS token.
fn find_stray_closes(text: &str, template: &Template, turns: &[Turn]) -> Vec<StrayClose> {
    let mut suffixes: Vec<&'static str> = Vec::new();
    for role in ROLES {
        if template.field(role.prefix_field()).is_none() {
            continue;
        }
        if let Some(suffix) = closing_marker(template, role) {
            if !suffixes.contains(&suffix) {
                suffixes.push(suffix);
            }
        }
    }

    let mut closes: Vec<(usize, &'static str)> = suffixes
        .iter()
        .flat_map(|&suffix| text.match_indices(suffix).map(move |(start, _)| (start, suffix)))
        .collect();
    closes.sort_unstable();

    let tail_len = text.trim_end().len();
    let eos = template.field(TemplateField::EosToken);

    let mut open: Vec<Turn> = Vec::new();
    let mut pending = turns.iter().peekable();
    let mut strays = Vec::new();

    for (start, suffix) in closes {
        while let Some(turn) = pending.next_if(|t| t.body_start <= start) {
            // Same region rules as the unterminated-turn check.
            open.retain(|o| o.role.is_conversational() && !turn.role.is_conversational());
            open.push(*turn);
        }

        if let Some(i) = open
            .iter()
            .rposition(|o| closing_marker(template, o.role) == Some(suffix))
        {
            open.remove(i);
            continue;
        }

        let closing = suffix.trim_end();
        if eos.is_some_and(|e| closing.ends_with(e)) && start + closing.len() == tail_len {
            continue;
        }

        let Some(role) = turns
            .iter()
            .rev()
            .filter(|t| t.start < start)
            .map(|t| t.role)
            .chain(ROLES)
            .find(|&r| {
                template.field(r.prefix_field()).is_some() && closing_marker(template, r) == Some(suffix)
            })
        else {
            continue;
        };
        strays.push(StrayClose { role, start });
    }

    strays
}

fn closing_marker(template: &Template, role: Role) -> Option<&'static str> {
    template
        .field(role.suffix_field())
        .filter(|s| !s.trim().is_empty())
}

fn check_role_turns(
    template: &Template,
    turns: &[Turn],
    strays: &[StrayClose],
    role: Role,
    mismatches: &mut Vec<Mismatch>,
) {
    let Some(prefix) = template.field(role.prefix_field()) else {
        return;
    };
    let prefix_field = role.prefix_field().name();

    if !turns.iter().any(|t| t.role == role) {
        mismatches.push(Mismatch::error(
            prefix_field,
            Some(prefix),
            None,
            format!("No {} turn found: {prefix_field} never occurs", role.name()),
        ));
        return;
    }

    push_strays(template, turns, strays, role, mismatches);
}

fn push_strays(
    template: &Template,
    turns: &[Turn],
    strays: &[StrayClose],
    role: Role,
    mismatches: &mut Vec<Mismatch>,
) {
    let suffix_field = role.suffix_field().name();
    let first_open = turns.first().map_or(usize::MAX, |t| t.start);

    for stray in strays.iter().filter(|s| s.role == role) {
        let message = if stray.start < first_open {
            format!(
                "{suffix_field} appears before the first turn opens; {} turns are out of order",
                role.name()
            )
        } else {
            format!(
                "{suffix_field} at byte {} closes no open {} turn",
                stray.start,
                role.name()
            )
        };
        mismatches.push(Mismatch::error(
            suffix_field,
            closing_marker(template, role),
            None,
            message,
        ));
    }
}

fn check_unterminated_turns(
    text: &str,
    template: &Template,
    turns: &[Turn],
    mismatches: &mut Vec<Mismatch>,
) {
    let mut ordinals = [0usize; 3];
    for (i, turn) in turns.iter().enumerate() {
        let ordinal = &mut ordinals[turn.role as usize];
        *ordinal += 1;

        let Some(suffix) = template.field(turn.role.suffix_field()) else {
            continue;
        };
        let end = turns[i + 1..]
            .iter()
            .find(|next| !turn.role.is_conversational() || next.role.is_conversational())
            .map_or(text.len(), |next| next.start);
        if !text[turn.body_start..end].contains(suffix) {
            let suffix_field = turn.role.suffix_field().name();
            mismatches.push(Mismatch::error(
                suffix_field,
                Some(suffix),
                None,
                format!(
                    "{} turn {} at byte {} has no {suffix_field} before the next turn",
                    turn.role.name(),
                    ordinal,
                    turn.start
                ),
            ));
        }
    }
}

/// First `chars` characters of `text`, or `None` for empty text.
fn leading(text: &str, chars: usize) -> Option<&str> {
    if text.is_empty() {
        return None;
    }
    let end = text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i);
    Some(&text[..end])
}

/// Last `chars` characters of `text`, or `None` for empty text.
fn trailing(text: &str, chars: usize) -> Option<&str> {
    if text.is_empty() {
        return None;
    }
    let skip = text.chars().count().saturating_sub(chars);
    let start = text.char_indices().nth(skip).map_or(text.len(), |(i, _)| i);
    Some(&text[start..])
}
