//! Attack-chain progression, buffering, and blocking through the public
//! `Character` API.

use combat_character::{attack::AttackOutcome, ActionTag, AttackKind, Character, InputEvent};
use combat_shared::{config::ControllerConfig, math::Vec3};
use combat_tests::{assert_invariants, init_tracing, tick_into_window, tick_until, DT};

fn character() -> anyhow::Result<Character> {
    init_tracing();
    Character::new(ControllerConfig::default())
}

#[test]
fn five_well_timed_light_attacks_then_sixth_is_ignored() -> anyhow::Result<()> {
    let mut c = character()?;
    let mut tags = Vec::new();
    let mut pulses = 0;

    for step in 0..5 {
        if step > 0 {
            tick_into_window(&mut c);
            assert!(c.is_static(), "chain ended before step {step}");
        }
        assert_eq!(c.attack_index(AttackKind::Light), step);
        assert_eq!(c.light_attack(), AttackOutcome::Started { index: step });
        assert_eq!(c.attack_index(AttackKind::Light), step + 1);
        tags.push(c.action().to_string());

        let frame = c.tick(DT, Vec3::ZERO);
        pulses += frame.attack_triggers.len();
        assert_invariants(&c);
    }

    assert_eq!(
        tags,
        ["LightAttack_0", "LightAttack_1", "LightAttack_2", "LightAttack_3", "LightAttack_4"]
    );
    assert_eq!(pulses, 5);

    tick_into_window(&mut c);
    assert_eq!(c.light_attack(), AttackOutcome::Ignored);
    assert_eq!(c.attack_index(AttackKind::Light), 5);
    assert_eq!(c.action(), ActionTag::LightAttack(4));
    Ok(())
}

#[test]
fn heavy_chain_is_three_steps() -> anyhow::Result<()> {
    let mut c = character()?;
    for step in 0..3 {
        if step > 0 {
            tick_into_window(&mut c);
        }
        assert_eq!(c.heavy_attack(), AttackOutcome::Started { index: step });
    }
    assert_eq!(c.action().to_string(), "HeavyAttack_2");
    tick_into_window(&mut c);
    assert_eq!(c.heavy_attack(), AttackOutcome::Ignored);
    Ok(())
}

#[test]
fn early_press_fires_exactly_once_when_window_opens() -> anyhow::Result<()> {
    let mut c = character()?;
    c.light_attack();
    c.tick(DT, Vec3::ZERO);

    assert_eq!(c.light_attack(), AttackOutcome::Buffered);
    assert_eq!(c.attack_index(AttackKind::Light), 1);

    let frames = tick_until(&mut c, Vec3::ZERO, 600, |c, _| !c.is_static());

    let fired: Vec<_> = frames
        .iter()
        .enumerate()
        .flat_map(|(i, f)| f.attack_triggers.iter().map(move |t| (i, *t)))
        .collect();
    assert_eq!(fired.len(), 1, "buffered press must start exactly one step");
    assert_eq!(fired[0].1.kind, AttackKind::Light);
    assert_eq!(fired[0].1.index, 1);

    // The step fired on the first tick whose remaining time was inside the window.
    let (fired_tick, _) = fired[0];
    for frame in &frames[..fired_tick] {
        assert_eq!(frame.action, ActionTag::LightAttack(0));
    }
    assert_eq!(frames[fired_tick].action, ActionTag::LightAttack(1));

    let ended: Vec<_> = frames.iter().flat_map(|f| f.chains_ended.iter()).collect();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].steps, 2);
    assert_eq!(c.attack_index(AttackKind::Light), 0);
    Ok(())
}

#[test]
fn chains_are_mutually_exclusive() -> anyhow::Result<()> {
    let mut c = character()?;
    c.light_attack();
    for _ in 0..200 {
        assert_eq!(c.heavy_attack(), AttackOutcome::Ignored);
        c.tick(DT, Vec3::ZERO);
        assert_invariants(&c);
        if !c.is_static() {
            break;
        }
    }
    assert!(!c.is_static());
    assert_eq!(c.heavy_attack(), AttackOutcome::Started { index: 0 });
    assert_eq!(c.light_attack(), AttackOutcome::Ignored);
    Ok(())
}

#[test]
fn block_is_idempotent_and_frozen_during_attacks() -> anyhow::Result<()> {
    let mut c = character()?;
    for _ in 0..4 {
        c.set_block(true);
        assert!(c.state().blocking);
    }

    // Starting an attack drops the guard; block input cannot raise it mid-swing.
    c.light_attack();
    assert!(!c.state().blocking);
    for _ in 0..10 {
        assert!(!c.set_block(true));
        assert!(!c.state().blocking);
        c.tick(DT, Vec3::ZERO);
        assert_invariants(&c);
    }

    tick_until(&mut c, Vec3::ZERO, 600, |c, _| !c.is_static());
    assert!(c.set_block(true));
    assert!(c.state().blocking);
    Ok(())
}

#[test]
fn movement_is_frozen_for_the_whole_attack() -> anyhow::Result<()> {
    let mut c = character()?;
    let frame = c.step(DT, Vec3::ZERO, &[InputEvent::HeavyAttack]);
    assert!(frame.movement.is_none());

    let frames = tick_until(&mut c, Vec3::ZERO, 600, |c, _| !c.is_static());
    for f in &frames {
        assert!(f.movement.is_none());
    }
    let free = c.tick(DT, Vec3::ZERO);
    assert!(free.movement.is_some());
    assert_eq!(free.action, ActionTag::Idle);
    Ok(())
}
