//! Battle - the turn state machine
//!
//! Owns both combatants, the content set, the active environment, and the
//! per-battle bookkeeping. Each side slot: advance (turn counter,
//! cooldowns, regen, environment tick), check incapacitation, resolve the
//! chosen action, then tick the acting side's own statuses. Ticking each
//! side at the close of its own slot keeps durations symmetric: a
//! one-turn stun granted mid-round still forfeits the target's next slot
//! no matter which side granted it. Terminal outcomes are checked the
//! instant either side's life reaches zero, before any action is offered.

use super::enemy::select_action_with_rng;
use super::gate::{self, can_use};
use super::state::BattleState;
use crate::combat::{effective_speed, resolve_action, ActionContext, BattleEvent};
use crate::combatant::Combatant;
use crate::content::ContentSet;
use crate::environment::{EnvironmentContext, EnvironmentModifiers};
use crate::status::ids;
use crate::types::{attr_modifier, BattleOutcome, Side};
use rand::Rng;
use std::time::Duration;

/// A pre-resolved consumable effect, applied between turns by the caller
#[derive(Debug, Clone, Default)]
pub struct ItemEffect {
    pub life: i32,
    pub mana: i32,
    /// Status ids removed by the consumable
    pub cures: Vec<String>,
}

/// What the human side chose to do with its slot
#[derive(Debug, Clone)]
pub enum PlayerChoice {
    UseAbility(String),
    UseItem(ItemEffect),
    AttemptEscape,
    /// Forfeit the slot
    Pass,
}

/// Tunable battle behavior
#[derive(Debug, Clone)]
pub struct BattleConfig {
    /// Cosmetic pause before the automated side acts
    pub pacing_delay: Duration,
    /// Report defeat as a respawn instead of a loss
    pub respawn_on_defeat: bool,
    /// Escape roll target on a d20 plus modifiers
    pub escape_threshold: i32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        BattleConfig {
            pacing_delay: Duration::from_secs(1),
            respawn_on_defeat: false,
            escape_threshold: 12,
        }
    }
}

impl BattleConfig {
    /// No pacing delay (tests and headless runs)
    pub fn instant() -> Self {
        BattleConfig {
            pacing_delay: Duration::ZERO,
            ..BattleConfig::default()
        }
    }
}

/// A single running battle
pub struct Battle {
    player: Combatant,
    enemy: Combatant,
    content: ContentSet,
    environment: Option<EnvironmentContext>,
    state: BattleState,
    config: BattleConfig,
    events: Vec<BattleEvent>,
    outcome: Option<BattleOutcome>,
}

impl Battle {
    /// Start a battle; content must be fully loaded beforehand
    ///
    /// An unknown environment id degrades to no environment (with a
    /// warning from the registry), never a failed battle start.
    pub fn new(
        player: Combatant,
        enemy: Combatant,
        content: ContentSet,
        environment_id: Option<&str>,
        intensity: u32,
        config: BattleConfig,
    ) -> Self {
        let environment = environment_id
            .and_then(|id| content.environments.get(id).cloned())
            .map(|descriptor| EnvironmentContext::new(descriptor, intensity));
        let state = BattleState::new(&player, &enemy, &content.abilities);
        Battle {
            player,
            enemy,
            content,
            environment,
            state,
            config,
            events: Vec::new(),
            outcome: None,
        }
    }

    // === Introspection for the presentation layer ===

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn side_to_act(&self) -> Side {
        self.state.side_to_act
    }

    /// Everything that has happened so far, in order
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Take the accumulated events, leaving the log empty
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn cooldown(&self, ability_id: &str) -> u32 {
        self.state.cooldown(ability_id)
    }

    pub fn uses_left(&self, ability_id: &str) -> Option<u32> {
        self.state.uses_left(ability_id)
    }

    /// Ability ids the current actor may legally use right now
    pub fn legal_actions(&self) -> Vec<String> {
        let side = self.state.side_to_act;
        let (actor, target) = match side {
            Side::Player => (&self.player, &self.enemy),
            Side::Enemy => (&self.enemy, &self.player),
        };
        actor
            .abilities
            .iter()
            .filter_map(|known| self.content.abilities.get(&known.id))
            .filter(|ability| can_use(actor, target, ability, &self.state, side))
            .map(|ability| ability.id.clone())
            .collect()
    }

    /// Status summary line for a side
    pub fn status_summary(&self, side: Side) -> String {
        self.content.statuses.summary(self.combatant(side))
    }

    // === Driving the battle ===

    /// Run the turn loop to completion
    ///
    /// The controller is consulted for every human slot. An illegal
    /// choice is silently rejected and the controller is asked again, so
    /// controllers must eventually return a legal choice or `Pass`.
    pub fn run<C, R>(&mut self, mut controller: C, rng: &mut R) -> BattleOutcome
    where
        C: FnMut(&Battle) -> PlayerChoice,
        R: Rng,
    {
        loop {
            if let Some(outcome) = self.outcome {
                return outcome;
            }
            self.step(&mut controller, rng);
        }
    }

    /// Execute one side slot of the turn loop
    pub fn step<C, R>(&mut self, controller: &mut C, rng: &mut R)
    where
        C: FnMut(&Battle) -> PlayerChoice,
        R: Rng,
    {
        let side = self.state.side_to_act;
        self.advance(side, rng);
        if self.outcome.is_some() {
            return;
        }

        let actor = self.combatant(side);
        if self.content.statuses.incapacitated(actor) {
            self.state.clear_last_used(side);
            self.events.push(BattleEvent::Incapacitated { side });
            std::thread::sleep(self.config.pacing_delay);
        } else {
            match side {
                Side::Player => loop {
                    match controller(self) {
                        PlayerChoice::UseAbility(id) => {
                            if self.perform_ability(side, &id, rng) {
                                break;
                            }
                            // Illegal request: nothing mutated, ask again
                        }
                        PlayerChoice::UseItem(effect) => {
                            self.apply_item(side, &effect);
                            break;
                        }
                        PlayerChoice::AttemptEscape => {
                            self.attempt_escape_with_rng(rng);
                            break;
                        }
                        PlayerChoice::Pass => break,
                    }
                },
                Side::Enemy => {
                    std::thread::sleep(self.config.pacing_delay);
                    if let Some(id) = select_action_with_rng(
                        &self.enemy,
                        &self.player,
                        &self.state,
                        &self.content.abilities,
                        rng,
                    ) {
                        self.perform_ability(side, &id, rng);
                    }
                }
            }
        }

        // The acting side's statuses run down as its slot closes, so a
        // status granted to the opponent this slot survives into theirs
        if self.outcome.is_none() {
            self.tick_statuses(side);
        }
        if self.outcome.is_none() {
            self.state.switch_side();
        }
    }

    /// Gate, commit, and resolve one ability use; false when illegal
    pub fn perform_ability(&mut self, side: Side, ability_id: &str, rng: &mut impl Rng) -> bool {
        let Some(ability) = self.content.abilities.get(ability_id).cloned() else {
            return false;
        };
        {
            let (actor, target) = match side {
                Side::Player => (&self.player, &self.enemy),
                Side::Enemy => (&self.enemy, &self.player),
            };
            if !can_use(actor, target, &ability, &self.state, side) {
                return false;
            }
        }
        gate::mark_used(&ability, &mut self.state, side);

        let (attacker, defender) = match side {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        };
        attacker.spend_mana(ability.mana_cost);

        let ctx = ActionContext {
            side,
            ability: &ability,
            statuses: &self.content.statuses,
            environment: self.environment.as_ref(),
        };
        let events = resolve_action(attacker, defender, &ctx, rng);
        self.events.extend(events);
        self.check_terminal();
        true
    }

    /// Apply a pre-resolved consumable to a side (between-turn callback)
    pub fn apply_item(&mut self, side: Side, effect: &ItemEffect) {
        let combatant = match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        };
        let life_restored = combatant.heal(effect.life);
        let mana_restored = combatant.restore_mana(effect.mana);
        self.events.push(BattleEvent::ItemUsed {
            side,
            life_restored,
            mana_restored,
        });
        for cure in &effect.cures {
            if self.content.statuses.clear(combatant, cure) {
                self.events.push(BattleEvent::StatusCleared {
                    target: side,
                    status_id: cure.clone(),
                });
            }
        }
    }

    /// Escape roll: d20 + speed delta, or the strength variant when
    /// restrained, against the configured threshold
    ///
    /// Both speeds carry the environment's speed penalty, so a mired
    /// runner escapes a sure-footed native less often.
    pub fn attempt_escape_with_rng(&mut self, rng: &mut impl Rng) -> bool {
        let roll = rng.gen_range(1..=20);
        let total = if self.player.has_status(ids::RESTRAINED) {
            roll + attr_modifier(self.player.strength)
                - (self.enemy.weight_kg / 10.0).floor() as i32
        } else {
            let player_speed = effective_speed(
                &self.player,
                self.env_modifiers(&self.player).speed_penalty,
            );
            let enemy_speed =
                effective_speed(&self.enemy, self.env_modifiers(&self.enemy).speed_penalty);
            roll + (player_speed - enemy_speed)
        };
        let success = total >= self.config.escape_threshold;
        self.events.push(BattleEvent::EscapeAttempted {
            side: Side::Player,
            roll,
            total,
            success,
        });
        if success {
            self.set_outcome(BattleOutcome::Escape);
        }
        success
    }

    // === Internals ===

    fn env_modifiers(&self, combatant: &Combatant) -> EnvironmentModifiers {
        self.environment
            .as_ref()
            .map(|env| env.modifiers_for(combatant))
            .unwrap_or_default()
    }

    /// Turn advance: counter, cooldowns, regen, environment tick
    fn advance(&mut self, side: Side, rng: &mut impl Rng) {
        self.state.turn += 1;
        self.events.push(BattleEvent::TurnStarted {
            turn: self.state.turn,
            side,
        });
        self.state.tick_cooldowns();

        // Regen for the acting side; the environment may grant life regen
        let actor = match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        };
        let mana_regen = actor.mana_regen;
        actor.restore_mana(mana_regen);
        if let Some(env) = &self.environment {
            let life_regen = env.modifiers_for(actor).life_regen;
            if life_regen > 0 {
                actor.heal(life_regen);
            }
        }

        // Environment tick hits both combatants while both stand
        if self.environment.is_some() && self.player.is_alive() && self.enemy.is_alive() {
            self.environment_tick(Side::Player, rng);
            self.environment_tick(Side::Enemy, rng);
        }
        self.check_terminal();
    }

    fn environment_tick(&mut self, side: Side, rng: &mut impl Rng) {
        let Some(env) = &self.environment else {
            return;
        };
        let combatant = match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        };
        let bundle = env.resolve_with_rng(combatant, rng);
        if bundle.has_immunity {
            return;
        }
        if bundle.damage > 0 {
            combatant.apply_damage(bundle.damage);
            self.events.push(BattleEvent::EnvironmentDamage {
                target: side,
                amount: bundle.damage,
            });
        }
        if let Some(status_id) = &bundle.status_id {
            if self
                .content
                .statuses
                .apply(combatant, status_id, bundle.status_duration, false)
            {
                self.events.push(BattleEvent::EnvironmentStatus {
                    target: side,
                    status_id: status_id.clone(),
                });
            }
        }
        for message in &bundle.special_messages {
            self.events.push(BattleEvent::EnvironmentSpecial {
                target: side,
                message: message.clone(),
            });
        }
        if bundle.special_damage > 0 {
            combatant.apply_damage(bundle.special_damage);
            self.events.push(BattleEvent::EnvironmentDamage {
                target: side,
                amount: bundle.special_damage,
            });
        }
    }

    /// End-of-slot status tick for the side that just acted
    fn tick_statuses(&mut self, side: Side) {
        let combatant = match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        };
        let report = self.content.statuses.tick_all(combatant);
        for ticked in report.ticked {
            if ticked.damage > 0 {
                self.events.push(BattleEvent::StatusTicked {
                    target: side,
                    status_id: ticked.status_id.clone(),
                    damage: ticked.damage,
                });
            }
            if ticked.expired {
                self.events.push(BattleEvent::StatusExpired {
                    target: side,
                    status_id: ticked.status_id,
                });
            }
        }
        self.check_terminal();
    }

    /// Terminal transition the instant either side's life reaches zero
    fn check_terminal(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        if !self.player.is_alive() {
            self.set_outcome(BattleOutcome::Lose);
        } else if !self.enemy.is_alive() {
            self.set_outcome(BattleOutcome::Win);
        }
    }

    fn set_outcome(&mut self, outcome: BattleOutcome) {
        if self.outcome.is_some() {
            return;
        }
        // Battle-end statuses are cleared, reversing any live payloads
        self.content.statuses.clear_all(&mut self.player);
        self.content.statuses.clear_all(&mut self.enemy);
        self.outcome = Some(outcome);
        self.events.push(BattleEvent::BattleEnded { outcome });
    }
}
