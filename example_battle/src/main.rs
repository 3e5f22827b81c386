//! Example Battle - a scripted encounter demonstrating battle_core
//!
//! This demo shows:
//! - Loading the built-in content set (abilities, statuses, environments)
//! - Building combatants with elements, physique, and known abilities
//! - Running the turn loop with a scripted player controller
//! - Rendering the event log as it accumulates

use battle_core::{
    default_content, start_battle, Battle, BattleConfig, Combatant, Element, KnownAbility,
    PlayerChoice, Rarity,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

fn make_player() -> Combatant {
    Combatant::new("hero", "Hero", 120, 60, [14, 14, 12, 10, 11, 10])
        .with_element(Element::Fire)
        .with_physique(180.0, 85.0)
        .with_ability(KnownAbility::new("quick_attack"))
        .with_ability(KnownAbility::new("heavy_slash"))
        .with_ability(KnownAbility::new("fireball"))
        .with_ability(KnownAbility::new("mend"))
        .with_ability(KnownAbility::new("war_cry"))
        .with_ability(KnownAbility::new("crushing_blow"))
}

fn make_enemy() -> Combatant {
    Combatant::new("bog_serpent", "Bog Serpent", 140, 40, [16, 12, 14, 6, 8, 4])
        .with_element(Element::Water)
        .with_physique(420.0, 310.0)
        .with_ability(KnownAbility::with_rarity("quick_attack", Rarity::Frequent))
        .with_ability(KnownAbility::with_rarity("venom_fang", Rarity::Preferred))
        .with_ability(KnownAbility::with_rarity("grapple", Rarity::Rare))
}

/// Scripted controller: opener combo, then heal when hurt, fireball while
/// mana lasts, quick_attack otherwise
fn choose(battle: &Battle) -> PlayerChoice {
    let legal = battle.legal_actions();
    let player = battle.player();

    let pick = |id: &str| legal.iter().any(|a| a == id);
    if pick("heavy_slash") {
        return PlayerChoice::UseAbility("heavy_slash".to_string());
    }
    if player.current_life < player.max_life / 3 && pick("mend") {
        return PlayerChoice::UseAbility("mend".to_string());
    }
    if pick("fireball") {
        return PlayerChoice::UseAbility("fireball".to_string());
    }
    if pick("quick_attack") {
        return PlayerChoice::UseAbility("quick_attack".to_string());
    }
    PlayerChoice::Pass
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let config = BattleConfig {
        pacing_delay: Duration::from_millis(300),
        ..BattleConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0xBA77);

    println!("A Bog Serpent rises from the swamp!\n");
    let (battle, outcome) = start_battle(
        make_player(),
        make_enemy(),
        default_content(),
        Some("swamp"),
        6,
        config,
        choose,
        &mut rng,
    );

    for event in battle.events() {
        println!("{event}");
    }

    println!();
    println!(
        "Hero: {}/{} life | Bog Serpent: {}/{} life",
        battle.player().current_life,
        battle.player().max_life,
        battle.enemy().current_life,
        battle.enemy().max_life,
    );
    println!("Result: {outcome:?}");
}
