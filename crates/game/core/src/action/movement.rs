use std::collections::BTreeSet;

use crate::action::{ActionError, ActionTransition};
use crate::env::{GameEnv, Room};
use crate::state::{EventKind, GameState, PlayerId};

/// How a player travels between two rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Passage {
    Corridor,
    Vent,
}

/// Relocation of one player to a connected room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: PlayerId,
    pub from: Room,
    pub to: Room,
    pub passage: Passage,
}

impl MoveAction {
    pub fn new(actor: PlayerId, from: Room, to: Room, passage: Passage) -> Self {
        Self {
            actor,
            from,
            to,
            passage,
        }
    }
}

impl ActionTransition for MoveAction {
    type Error = ActionError;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let player = state
            .player(self.actor)
            .ok_or(ActionError::PlayerNotFound(self.actor))?;
        if player.location != self.from {
            return Err(ActionError::WrongRoom {
                player: self.actor,
                expected: self.from.clone(),
                actual: player.location.clone(),
            });
        }

        let map = env.map()?;
        let reachable = match self.passage {
            Passage::Corridor => map.adjacent_rooms(&self.from),
            Passage::Vent => {
                if !player.is_impostor() {
                    return Err(ActionError::NotImpostor(self.actor));
                }
                map.vent_connections(&self.from)
            }
        };
        if !reachable.contains(&self.to) {
            return Err(ActionError::NotConnected {
                from: self.from.clone(),
                to: self.to.clone(),
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        // Both rooms perceive the move: the one left behind and the one entered.
        let mut witnesses: BTreeSet<PlayerId> = state.occupants(&self.from).into_iter().collect();
        witnesses.extend(state.occupants(&self.to));
        witnesses.insert(self.actor);

        state
            .player_mut(self.actor)
            .ok_or(ActionError::PlayerNotFound(self.actor))?
            .location = self.to.clone();

        let kind = match self.passage {
            Passage::Corridor => EventKind::Moved {
                from: self.from.clone(),
                to: self.to.clone(),
            },
            Passage::Vent => EventKind::Vented {
                from: self.from.clone(),
                to: self.to.clone(),
            },
        };
        state.record(Some(self.actor), Some(self.from.clone()), kind, witnesses);
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        match state.player(self.actor) {
            Some(player) if player.location == self.to => Ok(()),
            _ => Err(ActionError::PostCondition("mover did not arrive")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{env, game_with_impostors, id, place};

    #[test]
    fn move_is_witnessed_by_both_rooms() {
        let mut state = game_with_impostors(5, &[0]);
        place(&mut state, 2, "Admin");
        place(&mut state, 3, "Storage");

        let action = MoveAction::new(id(1), "Cafeteria".into(), "Admin".into(), Passage::Corridor);
        action.pre_validate(&state, &env()).unwrap();
        action.apply(&mut state, &env()).unwrap();

        let event = state.events.last().unwrap();
        assert!(event.is_witnessed_by(id(0)));
        assert!(event.is_witnessed_by(id(1)));
        assert!(event.is_witnessed_by(id(2)));
        assert!(event.is_witnessed_by(id(4)));
        assert!(!event.is_witnessed_by(id(3)));
        assert_eq!(state.players[1].location, Room::from("Admin"));
    }

    #[test]
    fn crewmate_cannot_vent() {
        let mut state = game_with_impostors(5, &[0]);
        place(&mut state, 1, "Admin");
        let action = MoveAction::new(id(1), "Admin".into(), "Electrical".into(), Passage::Vent);
        assert_eq!(
            action.pre_validate(&state, &env()),
            Err(ActionError::NotImpostor(id(1)))
        );
    }

    #[test]
    fn rejects_rooms_without_corridor() {
        let state = game_with_impostors(5, &[0]);
        let action = MoveAction::new(
            id(1),
            "Cafeteria".into(),
            "Electrical".into(),
            Passage::Corridor,
        );
        assert!(matches!(
            action.pre_validate(&state, &env()),
            Err(ActionError::NotConnected { .. })
        ));
    }
}
