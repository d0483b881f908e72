//! Novice bot behaviour against a scripted host: greedy all-in attacks,
//! front-loaded reinforcement and safe-source fortification.

#![allow(clippy::unwrap_used)]

mod support;

use support::{ScriptedHost, bot};
use teg_core::{AttackOutcome, ConfiguredBot, FortifyOutcome, Gateways, PlacementOutcome, SkipReason};
use teg_types::{
    AttackOrder, BotLevel, BotStrategy, EventType, FortifyOrder, GameState, Player, PlayerColor,
};

fn novice() -> Player {
    bot(BotLevel::Novice, BotStrategy::Aggressive, PlayerColor::Red)
}

fn rival() -> Player {
    bot(BotLevel::Novice, BotStrategy::Aggressive, PlayerColor::Blue)
}

fn executor(player: &Player) -> ConfiguredBot {
    ConfiguredBot::for_profile(player.bot_profile.as_ref().unwrap())
}

#[test]
fn stops_at_three_attacks() {
    let host = ScriptedHost::default();
    let me = novice();
    let them = rival();
    for i in 0..5 {
        let mine = host.territory(&format!("mine-{i}"), &me, 10, "Asia");
        let theirs = host.territory(&format!("theirs-{i}"), &them, 1, "Asia");
        host.connect(mine, theirs);
    }
    let game = host.game(GameState::NormalPlay, vec![me.clone(), them]);

    let outcome = executor(&me).attack(&me, &game, &Gateways::uniform(&host));

    assert!(matches!(outcome, AttackOutcome::Completed { .. }));
    assert_eq!(outcome.attacks().len(), 3);
    assert_eq!(host.attacks.borrow().len(), 3);
    assert!(host.attacks.borrow().iter().all(|a| a.armies == 9));
    assert_eq!(host.events_of(EventType::AttackPerformed), 3);
}

#[test]
fn single_army_never_attacks() {
    let host = ScriptedHost::default();
    let me = novice();
    let them = rival();
    let mine = host.territory("Chile", &me, 1, "South America");
    let theirs = host.territory("Peru", &them, 1, "South America");
    host.connect(mine, theirs);
    let game = host.game(GameState::NormalPlay, vec![me.clone(), them]);

    let outcome = executor(&me).attack(&me, &game, &Gateways::uniform(&host));

    assert!(outcome.attacks().is_empty());
    assert_eq!(host.calls("attack_targets"), 0);
    assert_eq!(host.calls("attack"), 0);
}

#[test]
fn three_against_two_goes_all_in() {
    let host = ScriptedHost::default();
    let me = novice();
    let them = rival();
    let mine = host.territory("Brasil", &me, 3, "South America");
    let theirs = host.territory("Uruguay", &them, 2, "South America");
    host.connect(mine, theirs);
    let game = host.game(GameState::NormalPlay, vec![me.clone(), them]);

    let _ = executor(&me).attack(&me, &game, &Gateways::uniform(&host));

    assert_eq!(
        *host.attacks.borrow(),
        vec![AttackOrder {
            from: mine,
            to: theirs,
            armies: 2,
        }]
    );
}

#[test]
fn even_odds_are_not_taken() {
    let host = ScriptedHost::default();
    let me = novice();
    let them = rival();
    let mine = host.territory("Brasil", &me, 2, "South America");
    let theirs = host.territory("Uruguay", &them, 2, "South America");
    host.connect(mine, theirs);
    let game = host.game(GameState::NormalPlay, vec![me.clone(), them]);

    let outcome = executor(&me).attack(&me, &game, &Gateways::uniform(&host));

    assert!(outcome.attacks().is_empty());
    assert_eq!(host.calls("attack"), 0);
}

#[test]
fn goes_for_the_weakest_neighbour() {
    let host = ScriptedHost::default();
    let me = novice();
    let them = rival();
    let mine = host.territory("Egipto", &me, 10, "Africa");
    let strong = host.territory("Israel", &them, 4, "Asia");
    let weak = host.territory("Etiopia", &them, 1, "Africa");
    host.connect(mine, strong);
    host.connect(mine, weak);
    let game = host.game(GameState::NormalPlay, vec![me.clone(), them]);

    let _ = executor(&me).attack(&me, &game, &Gateways::uniform(&host));

    let first = host.attacks.borrow().first().copied().unwrap();
    assert_eq!(first.to, weak);
}

#[test]
fn conquest_is_reported() {
    let host = ScriptedHost::default();
    host.conquer.set(true);
    let me = novice();
    let them = rival();
    let mine = host.territory("Sahara", &me, 6, "Africa");
    let theirs = host.territory("Zaire", &them, 1, "Africa");
    host.connect(mine, theirs);
    let game = host.game(GameState::NormalPlay, vec![me.clone(), them]);

    let outcome = executor(&me).attack(&me, &game, &Gateways::uniform(&host));

    assert_eq!(outcome.conquests(), 1);
    assert_eq!(
        host.event_kinds(),
        vec![EventType::AttackPerformed, EventType::TerritoryConquered]
    );
}

#[test]
fn reinforcement_front_loads_weakest_border() {
    let host = ScriptedHost::default();
    host.reinforcements.set(7);
    let me = novice();
    let them = rival();
    let weak = host.territory("Alaska", &me, 2, "North America");
    let strong = host.territory("Yukon", &me, 5, "North America");
    let inner = host.territory("Oregon", &me, 3, "North America");
    let enemy = host.territory("Kamchatka", &them, 4, "Asia");
    host.connect(weak, enemy);
    host.connect(strong, enemy);
    host.connect(inner, weak);
    let game = host.game(GameState::NormalPlay, vec![me.clone(), them]);

    let outcome = executor(&me).reinforce(&me, &game, &Gateways::uniform(&host));

    assert_eq!(outcome.armies_placed(), 7);
    let plan = host.reinforcement_plans.borrow().first().cloned().unwrap();
    assert_eq!(plan.get(weak), 4);
    assert_eq!(plan.get(strong), 3);
    assert_eq!(plan.get(inner), 0);
    assert_eq!(host.events_of(EventType::ReinforcementsPlaced), 2);
}

#[test]
fn reinforcement_waits_for_permission() {
    let host = ScriptedHost::default();
    host.may_reinforce.set(false);
    host.reinforcements.set(5);
    let me = novice();
    let _ = host.territory("Iran", &me, 2, "Asia");
    let game = host.game(GameState::NormalPlay, vec![me.clone()]);

    let outcome = executor(&me).reinforce(&me, &game, &Gateways::uniform(&host));

    assert_eq!(outcome, PlacementOutcome::Skipped(SkipReason::NotEligible));
    assert_eq!(host.calls("reinforcement_status"), 0);
    assert_eq!(host.mutations(), 0);
}

#[test]
fn fortifies_from_safe_interior_to_border() {
    let host = ScriptedHost::default();
    let me = novice();
    let them = rival();
    let interior = host.territory("Francia", &me, 5, "Europe");
    let border = host.territory("Espana", &me, 1, "Europe");
    let back = host.territory("Italia", &me, 1, "Europe");
    let enemy = host.territory("Sahara", &them, 3, "Africa");
    host.connect(interior, border);
    host.connect(interior, back);
    host.connect(border, enemy);
    let game = host.game(GameState::NormalPlay, vec![me.clone(), them]);

    let outcome = executor(&me).fortify(&me, &game, &Gateways::uniform(&host));

    let expected = FortifyOrder {
        from: interior,
        to: border,
        armies: 2,
    };
    assert_eq!(outcome, FortifyOutcome::Moved(expected));
    assert_eq!(*host.fortifications.borrow(), vec![expected]);
    assert_eq!(host.events_of(EventType::FortificationPerformed), 1);
}

#[test]
fn no_safe_source_means_no_move() {
    let host = ScriptedHost::default();
    let me = novice();
    let them = rival();
    let a = host.territory("Suecia", &me, 5, "Europe");
    let b = host.territory("Rusia", &me, 3, "Europe");
    let enemy = host.territory("Aral", &them, 2, "Asia");
    host.connect(a, b);
    host.connect(a, enemy);
    host.connect(b, enemy);
    let game = host.game(GameState::NormalPlay, vec![me.clone(), them]);

    let outcome = executor(&me).fortify(&me, &game, &Gateways::uniform(&host));

    assert_eq!(outcome, FortifyOutcome::Skipped(SkipReason::NoCandidates));
    assert_eq!(host.calls("max_movable"), 0);
    assert_eq!(host.calls("fortify"), 0);
}

#[test]
fn initial_placement_spends_allotment_silently() {
    let host = ScriptedHost::default();
    let me = novice();
    let them = rival();
    let a = host.territory("Java", &me, 1, "Oceania");
    let b = host.territory("Sumatra", &me, 1, "Oceania");
    let enemy = host.territory("Borneo", &them, 1, "Oceania");
    host.connect(a, enemy);
    host.connect(a, b);
    let game = host.game(GameState::Reinforcement5, vec![me.clone(), them]);

    let outcome = executor(&me).place_initial_armies(&me, &game, &Gateways::uniform(&host), 5);

    assert_eq!(outcome.armies_placed(), 5);
    let plan = host.initial_plans.borrow().first().cloned().unwrap();
    assert_eq!(plan.get(a), 5);
    assert!(host.events.borrow().is_empty());
}
