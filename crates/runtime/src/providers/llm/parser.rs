//! Reading the sectioned reply of an LLM agent.
//!
//! Expected shape:
//!
//! ```text
//! [Condensed Memory]
//! ...
//! [Thinking Process]
//! ...
//! [Action]
//! MOVE from Cafeteria to Admin
//! ```

use game_core::Action;

use crate::api::DecisionError;

/// Sections of one reply, trimmed. Missing optional sections are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    pub memory: Option<String>,
    pub thinking: Option<String>,
    pub action: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Memory,
    Thinking,
    Action,
}

/// Recognises `[Name]` headers, tolerating markdown emphasis and a trailing
/// colon. Returns the section and any text following the header.
fn header(line: &str) -> Option<(Section, &str)> {
    let line = line.trim().trim_start_matches(['#', '*', ' ']);
    let (name, rest) = line.strip_prefix('[')?.split_once(']')?;
    let section = match name.trim().to_ascii_lowercase().as_str() {
        "condensed memory" => Section::Memory,
        "thinking process" => Section::Thinking,
        "action" => Section::Action,
        _ => return None,
    };
    Some((section, rest.trim_start_matches(['*', ':', ' '])))
}

/// Splits `text` into its sections.
///
/// # Errors
///
/// [`DecisionError::Parse`] when the `[Action]` section is missing or empty.
pub fn parse_response(text: &str) -> Result<ParsedResponse, DecisionError> {
    let mut current = None;
    let mut memory = Vec::new();
    let mut thinking = Vec::new();
    let mut action = Vec::new();

    for line in text.lines() {
        let content = match header(line) {
            Some((section, rest)) => {
                current = Some(section);
                rest
            }
            None => line,
        };
        let target = match current {
            Some(Section::Memory) => &mut memory,
            Some(Section::Thinking) => &mut thinking,
            Some(Section::Action) => &mut action,
            None => continue,
        };
        target.push(content);
    }

    let join = |lines: Vec<&str>| {
        let text = lines.join("\n").trim().to_string();
        (!text.is_empty()).then_some(text)
    };

    Ok(ParsedResponse {
        memory: join(memory),
        thinking: join(thinking),
        action: join(action)
            .ok_or_else(|| DecisionError::Parse("missing [Action] section".to_string()))?,
    })
}

/// Drops list numbering such as `3. ` or `3) `.
fn strip_numbering(text: &str) -> &str {
    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0
        && let Some(rest) = text[digits..].strip_prefix(['.', ')'])
    {
        return rest.trim_start();
    }
    text
}

fn speech(text: &str) -> Option<String> {
    let upper = text.get(..5)?;
    if !upper.eq_ignore_ascii_case("speak") {
        return None;
    }
    let message = text[5..].trim_start().strip_prefix(':').unwrap_or(&text[5..]);
    let message = message.trim().trim_matches('"').trim();
    Some(message.to_string())
}

/// Maps the `[Action]` text onto one of this turn's legal templates.
///
/// `descriptions[i]` must be the prompt text of `legal[i]`. Exact matches win;
/// otherwise the longest description contained in the first line is taken.
///
/// # Errors
///
/// [`DecisionError::Parse`] when nothing matches or a speech is empty.
pub fn match_action(
    text: &str,
    legal: &[Action],
    descriptions: &[String],
) -> Result<Action, DecisionError> {
    let text = strip_numbering(text.trim());

    if let Some(message) = speech(text)
        && let Some(Action::Speak { location, .. }) =
            legal.iter().find(|action| matches!(action, Action::Speak { .. }))
    {
        if message.is_empty() {
            return Err(DecisionError::Parse("empty speech".to_string()));
        }
        return Ok(Action::Speak {
            location: location.clone(),
            message,
        });
    }

    let line = strip_numbering(text.lines().next().unwrap_or_default().trim());
    let candidates = legal
        .iter()
        .zip(descriptions)
        .filter(|(action, _)| !matches!(action, Action::Speak { .. }));

    let lowered = line.to_ascii_lowercase();
    let mut best: Option<(&Action, usize)> = None;
    for (action, description) in candidates {
        if description.eq_ignore_ascii_case(line) {
            return Ok(action.clone());
        }
        let needle = description.to_ascii_lowercase();
        if lowered.contains(&needle) && best.is_none_or(|(_, len)| needle.len() > len) {
            best = Some((action, needle.len()));
        }
    }

    best.map(|(action, _)| action.clone())
        .ok_or_else(|| DecisionError::Parse(format!("'{line}' matches no available action")))
}
