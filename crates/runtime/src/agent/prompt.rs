//! Text handed to decision policies.

use game_core::{Action, ImpostorRoster, Observation};

use crate::api::{AgentContext, AgentIdentity};

pub const NO_MEMORY: &str = "No memory has been processed.";
pub const NO_THINKING: &str = "No thought process has been made.";

const GAME_RULES: &str = "\
You are playing a social deduction game aboard a spaceship. Players walk between \
rooms, work on tasks, and gather in meetings to vote someone off the ship. The game \
runs sequentially: players in the same room see what you do, players elsewhere do \
not. Everything said in a meeting is heard by every living player.";

const CREWMATE_GOAL: &str = "\
You are a Crewmate. Complete your assigned tasks and work out who the Impostors are. \
Crewmates win when every task is done or every Impostor has been voted out.";

const IMPOSTOR_GOAL: &str = "\
You are an Impostor. Kill Crewmates when nobody else is watching, pretend to work on \
your tasks, and steer suspicion away from your team during meetings. Impostors win \
once they are as many as the living Crewmates.";

const RESPONSE_FORMAT: &str = "\
Answer in exactly this format:
[Condensed Memory]
What you need to remember about the game so far.
[Thinking Process]
Your reasoning for this turn.
[Action]
One available action, copied exactly as listed. To speak, write SPEAK: \"your message\".";

/// Builds the fixed part of an agent's prompt.
///
/// Impostors get the full roster, themselves included.
pub fn system_prompt(identity: &AgentIdentity, roster: &ImpostorRoster) -> String {
    let mut prompt = format!("You are {}. {GAME_RULES}\n\n", identity.name);

    if identity.role.is_impostor() {
        prompt.push_str(IMPOSTOR_GOAL);
        prompt.push_str(&format!(
            "\nList of impostors: [{}]",
            roster.names().join(", ")
        ));
    } else {
        prompt.push_str(CREWMATE_GOAL);
    }

    if let Some(personality) = &identity.personality {
        prompt.push_str(&format!("\nPersonality: {personality}"));
    }

    prompt.push_str("\n\n");
    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

/// Per-turn prompt: carried memory followed by the rendered observation.
pub fn turn_prompt(ctx: &AgentContext, observation: &Observation) -> String {
    format!(
        "Memory: {}\nPrevious reasoning: {}\n\n{observation}",
        ctx.memory, ctx.thinking
    )
}

/// Prompt-style text of a chosen action, e.g. `MOVE from Cafeteria to Admin`.
pub fn describe_choice(observation: &Observation, action: &Action) -> String {
    if let Action::Speak { message, .. } = action {
        return format!("SPEAK: \"{message}\"");
    }
    observation
        .legal_actions
        .iter()
        .position(|template| template.admits(action))
        .and_then(|index| observation.legal_descriptions.get(index).cloned())
        .unwrap_or_else(|| format!("{action:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{PlayerId, Role};

    fn identity(name: &str, role: Role) -> AgentIdentity {
        AgentIdentity {
            player: PlayerId(0),
            name: name.to_string(),
            role,
            personality: None,
        }
    }

    #[test]
    fn crewmates_never_see_the_roster() {
        let prompt = system_prompt(
            &identity("Player 1: red", Role::Crewmate),
            &ImpostorRoster::default(),
        );
        assert!(!prompt.contains("List of impostors"));
        assert!(prompt.contains("You are a Crewmate"));
    }

    #[test]
    fn personality_is_appended() {
        let mut me = identity("Player 1: red", Role::Crewmate);
        me.personality = Some("The Strategist".to_string());
        let prompt = system_prompt(&me, &ImpostorRoster::default());
        assert!(prompt.contains("Personality: The Strategist"));
    }
}
