use std::collections::BTreeSet;

use crate::action::available::cooldown_remaining;
use crate::action::{ActionError, ActionTransition};
use crate::env::GameEnv;
use crate::state::{Body, EventKind, GameState, PlayerId};

/// An impostor eliminating a co-located crewmate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KillAction {
    pub actor: PlayerId,
    pub target: PlayerId,
}

impl KillAction {
    pub fn new(actor: PlayerId, target: PlayerId) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for KillAction {
    type Error = ActionError;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let killer = state
            .player(self.actor)
            .ok_or(ActionError::PlayerNotFound(self.actor))?;
        if !killer.is_impostor() {
            return Err(ActionError::NotImpostor(self.actor));
        }

        let remaining = cooldown_remaining(killer, state);
        if remaining > 0 {
            return Err(ActionError::KillCooldown { remaining });
        }

        let victim = state
            .player(self.target)
            .ok_or(ActionError::PlayerNotFound(self.target))?;
        if !victim.alive || victim.is_impostor() {
            return Err(ActionError::InvalidTarget(self.target));
        }
        if victim.location != killer.location {
            return Err(ActionError::TargetElsewhere {
                target: self.target,
                room: killer.location.clone(),
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let now = state.turn.timestep;
        let room = {
            let victim = state
                .player_mut(self.target)
                .ok_or(ActionError::PlayerNotFound(self.target))?;
            victim.alive = false;
            victim.location.clone()
        };
        state
            .player_mut(self.actor)
            .ok_or(ActionError::PlayerNotFound(self.actor))?
            .last_kill = Some(now);

        state.bodies.push(Body {
            victim: self.target,
            killer: self.actor,
            room: room.clone(),
            killed_at: now,
        });

        // The victim is already dead, so occupants covers the killer and bystanders.
        let mut witnesses: BTreeSet<PlayerId> = state.occupants(&room).into_iter().collect();
        witnesses.insert(self.actor);
        state.record(
            Some(self.actor),
            Some(room),
            EventKind::Killed {
                victim: self.target,
            },
            witnesses,
        );
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.is_alive(self.target) {
            return Err(ActionError::PostCondition("victim survived"));
        }
        Ok(())
    }
}
