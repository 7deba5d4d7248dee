use std::collections::BTreeSet;

use crate::action::{ActionError, ActionTransition};
use crate::env::{GameEnv, TaskId};
use crate::state::{EventKind, GameState, PlayerId};

/// One step of work on an assigned task.
///
/// Impostors go through the same motions without making progress; the event
/// they leave behind is indistinguishable for witnesses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskAction {
    pub actor: PlayerId,
    pub task: TaskId,
}

impl TaskAction {
    pub fn new(actor: PlayerId, task: TaskId) -> Self {
        Self { actor, task }
    }
}

impl ActionTransition for TaskAction {
    type Error = ActionError;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let player = state
            .player(self.actor)
            .ok_or(ActionError::PlayerNotFound(self.actor))?;
        let task = player
            .task(self.task)
            .ok_or(ActionError::TaskNotAssigned(self.task))?;
        if task.room != player.location {
            return Err(ActionError::WrongRoom {
                player: self.actor,
                expected: task.room.clone(),
                actual: player.location.clone(),
            });
        }
        if !player.is_impostor() && task.is_complete() {
            return Err(ActionError::TaskComplete(self.task));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let player = state
            .player_mut(self.actor)
            .ok_or(ActionError::PlayerNotFound(self.actor))?;
        let fake = player.is_impostor();
        let room = player.location.clone();
        if !fake {
            let task = player
                .task_mut(self.task)
                .ok_or(ActionError::TaskNotAssigned(self.task))?;
            task.steps_left = task.steps_left.saturating_sub(1);
        }

        let mut witnesses: BTreeSet<PlayerId> = state.occupants(&room).into_iter().collect();
        witnesses.insert(self.actor);
        state.record(
            Some(self.actor),
            Some(room),
            EventKind::TaskWorked {
                task: self.task,
                fake,
            },
            witnesses,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{env, game_with_impostors, id, place};

    #[test]
    fn crewmate_work_makes_progress() {
        let mut state = game_with_impostors(5, &[0]);
        let task = state.players[1].tasks[0].clone();
        place(&mut state, 1, task.room.as_str());

        let action = TaskAction::new(id(1), task.id);
        action.pre_validate(&state, &env()).unwrap();
        action.apply(&mut state, &env()).unwrap();

        assert_eq!(state.players[1].tasks[0].steps_left, task.steps_left - 1);
    }

    #[test]
    fn impostor_work_is_fake_but_looks_real() {
        let mut state = game_with_impostors(5, &[0]);
        let task = state.players[0].tasks[0].clone();
        place(&mut state, 0, task.room.as_str());
        place(&mut state, 2, task.room.as_str());

        TaskAction::new(id(0), task.id)
            .apply(&mut state, &env())
            .unwrap();

        assert_eq!(state.players[0].tasks[0].steps_left, task.steps_left);
        let event = state.events.last().unwrap();
        assert!(event.is_witnessed_by(id(2)));
        assert_eq!(
            event.describe(&state),
            format!("{} COMPLETE TASK - {}", state.players[0].name, task.name)
        );
    }
}
