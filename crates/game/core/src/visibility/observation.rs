use std::fmt;

use sha2::{Digest, Sha256};

use crate::action::Action;
use crate::env::Room;
use crate::state::{Phase, PlayerId, Role, Timestep};

/// One witnessed event, already rendered for the observer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservedEvent {
    pub sequence: u64,
    pub timestep: Timestep,
    pub phase: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskView {
    pub name: String,
    pub room: Room,
    pub steps_left: u32,
    /// Rooms to walk through, current room first. Empty if unreachable.
    pub path: Vec<Room>,
}

/// Everything one player is allowed to know at this instant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub player: PlayerId,
    pub name: String,
    /// The observer's own role; other roles never appear here.
    pub role: Role,
    pub alive: bool,
    pub timestep: Timestep,
    pub max_timesteps: u32,
    pub phase: Phase,
    /// Discussion rounds per meeting, for framing the phase.
    pub discussion_rounds: u32,
    pub location: Room,
    /// Living players in the observer's room, observer included.
    pub co_located: Vec<String>,
    /// Unreported bodies in the observer's room.
    pub bodies: Vec<String>,
    pub history: Vec<ObservedEvent>,
    pub own_actions: Vec<String>,
    pub tasks: Vec<TaskView>,
    pub legal_actions: Vec<Action>,
    /// Prompt text of `legal_actions`, same order.
    pub legal_descriptions: Vec<String>,
}

impl Observation {
    /// SHA-256 over the rendered prompt text.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.player.0.to_le_bytes());
        hasher.update(self.to_string().as_bytes());
        hasher.finalize().into()
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game Time: {}/{}", self.timestep, self.max_timesteps)?;
        writeln!(
            f,
            "Current Phase: {}",
            self.phase.describe(self.discussion_rounds)
        )?;
        let guidance = self.phase.guidance(self.discussion_rounds);
        if !guidance.is_empty() {
            writeln!(f, "{guidance}")?;
        }
        if !self.alive {
            writeln!(f, "You are dead. You can no longer act.")?;
        }
        writeln!(f, "Current Location: {}", self.location)?;
        writeln!(
            f,
            "Players in {}: {}",
            self.location,
            self.co_located.join(", ")
        )?;
        if !self.bodies.is_empty() {
            writeln!(
                f,
                "Dead bodies in {}: {}",
                self.location,
                self.bodies.join(", ")
            )?;
        }

        writeln!(f, "\nObservation History:")?;
        if self.history.is_empty() {
            writeln!(f, "No observations yet.")?;
        }
        for (index, event) in self.history.iter().enumerate() {
            writeln!(
                f,
                "{}. Timestep {}: [{}] {}",
                index + 1,
                event.timestep,
                event.phase,
                event.text
            )?;
        }

        writeln!(f, "\nAction History:")?;
        if self.own_actions.is_empty() {
            writeln!(f, "No actions yet.")?;
        }
        for (index, action) in self.own_actions.iter().enumerate() {
            writeln!(f, "{}. {action}", index + 1)?;
        }

        if self.role.is_impostor() {
            writeln!(f, "\nYour Fake Tasks (no real progress, use them as cover):")?;
        } else {
            writeln!(f, "\nYour Assigned Tasks:")?;
        }
        for (index, task) in self.tasks.iter().enumerate() {
            let status = match task.steps_left {
                0 => "completed".to_string(),
                1 => "1 step left".to_string(),
                n => format!("{n} steps left"),
            };
            let path: Vec<&str> = task.path.iter().map(Room::as_str).collect();
            writeln!(
                f,
                "{}. {} in {} ({status}) - path: {}",
                index + 1,
                task.name,
                task.room,
                path.join(" -> ")
            )?;
        }

        writeln!(f, "\nAvailable Actions:")?;
        if self.legal_descriptions.is_empty() {
            writeln!(f, "None.")?;
        }
        for (index, action) in self.legal_descriptions.iter().enumerate() {
            writeln!(f, "{}. {action}", index + 1)?;
        }
        Ok(())
    }
}
