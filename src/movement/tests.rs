//! Movement domain: unit tests for contacts, strategies and the controller tick.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::components::{
    CharacterIntent, CharacterState, ContactSet, ControllerRole, Facing, Hitstun,
    PendingKnockback,
};
use super::contact::{
    ContactPhase, TerrainContact, apply_contact, end_contact, normal_into_character,
};
use super::controller::{
    TickOutcome, apply_fall_multiplier, commit_velocity, run_tick, should_flip,
};
use super::resources::MovementTuning;
use super::strategy::{
    BackAndForthStrategy, CatStrategy, CrowStrategy, EnemyAttack, MarkovMove, MarkovStrategy,
    MoveDurations, MovementContext, MovementStrategy, StationaryStrategy, Strategy,
    StrategyKind,
};
use crate::combat::MarkovChain;

const DT: f32 = 0.02;
const GRAVITY_Y: f32 = -1200.0;
const THRESHOLD: f32 = 0.99;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn terrain(id: u64) -> Entity {
    Entity::from_bits(id)
}

fn contact(normals: &[Vec2]) -> TerrainContact {
    TerrainContact::classify(normals, THRESHOLD)
}

fn begin(state: &mut CharacterState, tuning: &MovementTuning, id: u64, normals: &[Vec2]) {
    apply_contact(
        state,
        tuning,
        terrain(id),
        contact(normals),
        ContactPhase::Begin,
    );
}

/// One controller tick with the strategy's own role and no target.
fn tick(
    strategy: &mut Strategy,
    state: &mut CharacterState,
    intent: &mut CharacterIntent,
    tuning: &MovementTuning,
    velocity: Vec2,
) -> TickOutcome {
    let role = strategy.role().unwrap_or(ControllerRole::Player);
    let mut ctx = MovementContext {
        role,
        intent,
        tuning,
        position: Vec2::ZERO,
        target: None,
    };
    run_tick(strategy, state, &mut ctx, velocity, GRAVITY_Y, DT)
}

// -----------------------------------------------------------------------------
// Contact classification
// -----------------------------------------------------------------------------

#[test]
fn test_classify_axis_aligned_normals() {
    assert_eq!(
        contact(&[Vec2::Y]),
        TerrainContact {
            ground: true,
            left_wall: false,
            right_wall: false
        }
    );
    // Normal pushes the character right: the wall is on its left
    assert!(contact(&[Vec2::X]).left_wall);
    assert!(contact(&[Vec2::NEG_X]).right_wall);
    assert!(contact(&[Vec2::NEG_Y]).is_empty());
}

#[test]
fn test_classify_or_reduces_points() {
    let classified = contact(&[Vec2::Y, Vec2::X]);
    assert!(classified.ground);
    assert!(classified.left_wall);
    assert!(!classified.right_wall);
}

#[test]
fn test_classify_ignores_slopes_and_bad_normals() {
    assert!(contact(&[Vec2::new(0.7, 0.7)]).is_empty());
    let non_finite = [Vec2::new(f32::NAN, 1.0), Vec2::new(f32::INFINITY, 0.0)];
    assert!(contact(&non_finite).is_empty());
    assert!(contact(&[]).is_empty());
    // Tolerates float noise around the axis
    assert!(contact(&[Vec2::new(0.001, 0.9999)]).ground);
}

#[test]
fn test_normal_points_into_character() {
    // Engine normal points from the first collider to the second
    assert_eq!(normal_into_character(Vec2::NEG_Y, true), Vec2::Y);
    assert_eq!(normal_into_character(Vec2::Y, false), Vec2::Y);
}

#[test]
fn test_contact_set_attribution() {
    let mut set = ContactSet::default();
    assert!(!set.is_active());
    assert!(set.attach(terrain(1)));
    assert!(!set.attach(terrain(1)));
    assert!(set.attach(terrain(2)));
    assert_eq!(set.len(), 2);

    assert!(set.detach(terrain(1)));
    assert!(set.is_active());
    assert!(!set.detach(terrain(1)));
    assert!(set.detach(terrain(2)));
    assert!(!set.is_active());
}

#[test]
fn test_ending_wall_contact_keeps_ground() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();

    begin(&mut state, &tuning, 1, &[Vec2::Y]);
    begin(&mut state, &tuning, 2, &[Vec2::X]);
    assert!(state.is_grounded());
    assert!(state.is_touching_wall_left());

    assert!(end_contact(&mut state, terrain(2)));
    assert!(state.is_grounded());
    assert!(!state.is_touching_wall_left());
}

#[test]
fn test_single_event_with_ground_and_wall_normals() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();

    begin(&mut state, &tuning, 1, &[Vec2::Y, Vec2::NEG_X]);
    assert!(state.is_grounded());
    assert!(state.is_touching_wall_right());

    end_contact(&mut state, terrain(1));
    assert!(!state.is_grounded());
    assert!(!state.is_touching_wall_right());
}

#[test]
fn test_ending_unattributed_contact_is_noop() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::Y]);

    assert!(!end_contact(&mut state, terrain(9)));
    assert!(state.is_grounded());
}

#[test]
fn test_two_grounds_clear_only_after_both_end() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::Y]);
    begin(&mut state, &tuning, 2, &[Vec2::Y]);

    end_contact(&mut state, terrain(1));
    assert!(state.is_grounded());
    end_contact(&mut state, terrain(2));
    assert!(!state.is_grounded());
}

#[test]
fn test_continue_attaches_new_category_and_detaches_stale_one() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::X]);
    begin(&mut state, &tuning, 2, &[Vec2::X]);
    assert!(!state.double_jump_available);

    // Object 1 is now only under the character's feet
    let enter = apply_contact(
        &mut state,
        &tuning,
        terrain(1),
        contact(&[Vec2::Y]),
        ContactPhase::Continue,
    );
    assert!(enter.ground);
    assert!(state.is_grounded());
    assert!(state.double_jump_available);
    // Object 2 still holds the wall
    assert!(state.is_touching_wall_left());
    assert!(!state.left_wall.contains(terrain(1)));

    // Re-reporting an attributed category is not a fresh enter
    let enter = apply_contact(
        &mut state,
        &tuning,
        terrain(1),
        contact(&[Vec2::Y]),
        ContactPhase::Continue,
    );
    assert!(!enter.ground);
}

#[test]
fn test_begin_does_not_detach() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::Y]);
    begin(&mut state, &tuning, 1, &[Vec2::X]);

    assert!(state.is_grounded());
    assert!(state.is_touching_wall_left());
}

// -----------------------------------------------------------------------------
// Double jump bookkeeping
// -----------------------------------------------------------------------------

#[test]
fn test_wall_touch_refund_follows_policy() {
    let mut tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::X]);
    assert!(!state.double_jump_available);

    tuning.wall_touch_refunds_double_jump = true;
    begin(&mut state, &tuning, 2, &[Vec2::NEG_X]);
    assert!(state.double_jump_available);
}

#[test]
fn test_crow_grounded_jump() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::Y]);
    let double_jump_before = state.double_jump_available;

    let mut strategy = Strategy::Crow(CrowStrategy);
    let mut intent = CharacterIntent::default();
    intent.latch_jump(true);

    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);

    assert_eq!(outcome.direction.y, tuning.jump_force);
    assert_eq!(outcome.velocity.y, tuning.jump_force);
    assert!(state.is_grounded());
    assert_eq!(state.double_jump_available, double_jump_before);
    assert!(!intent.jump);
}

#[test]
fn test_crow_double_jump_consumed_until_grounded() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::Y]);
    end_contact(&mut state, terrain(1));
    assert!(state.double_jump_available);

    let mut strategy = Strategy::Crow(CrowStrategy);
    let mut intent = CharacterIntent::default();

    intent.latch_jump(true);
    let outcome = tick(
        &mut strategy,
        &mut state,
        &mut intent,
        &tuning,
        Vec2::new(0.0, -50.0),
    );
    assert_eq!(outcome.velocity.y, tuning.jump_force);
    assert!(!state.double_jump_available);

    // No jump left: the vertical velocity is left to gravity
    intent.latch_jump(true);
    let outcome = tick(
        &mut strategy,
        &mut state,
        &mut intent,
        &tuning,
        Vec2::new(0.0, -80.0),
    );
    assert_eq!(outcome.velocity.y, -80.0);
    assert!(!state.double_jump_available);
    assert!(!intent.jump);

    // A wall alone does not refund it by default
    begin(&mut state, &tuning, 2, &[Vec2::X]);
    assert!(!state.double_jump_available);

    begin(&mut state, &tuning, 3, &[Vec2::Y]);
    assert!(state.double_jump_available);
}

// -----------------------------------------------------------------------------
// Cat wall jump and hitstun windows
// -----------------------------------------------------------------------------

#[test]
fn test_cat_left_wall_jump() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::X]);
    assert!(!state.is_grounded());
    assert!(!state.double_jump_available);

    let mut strategy = Strategy::Cat(CatStrategy);
    let mut intent = CharacterIntent {
        horizontal: -tuning.movement_speed,
        ..default()
    };
    intent.latch_jump(true);

    let outcome = tick(
        &mut strategy,
        &mut state,
        &mut intent,
        &tuning,
        Vec2::new(0.0, -100.0),
    );

    assert_eq!(outcome.direction.x, tuning.wall_jump_sideways_force);
    assert_eq!(outcome.direction.y, tuning.wall_jump_upwards_force);
    let sideways = tuning.wall_jump_sideways_force * DT;
    assert!(approx(outcome.velocity.x, sideways));
    assert!(state.double_jump_available);
    assert_eq!(state.wall_hitstun.counter, tuning.wall_jump_recovery_ticks);
    assert_eq!(state.wall_hitstun.direction, Facing::Right);
}

#[test]
fn test_cat_right_wall_jump_pushes_left() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::NEG_X]);

    let mut strategy = Strategy::Cat(CatStrategy);
    let mut intent = CharacterIntent::default();
    intent.latch_jump(true);

    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert_eq!(outcome.direction.x, -tuning.wall_jump_sideways_force);
    assert_eq!(state.wall_hitstun.direction, Facing::Left);
    assert_eq!(state.facing, Facing::Left);
}

#[test]
fn test_cat_airborne_without_wall_cannot_jump() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState {
        double_jump_available: true,
        ..default()
    };
    let mut strategy = Strategy::Cat(CatStrategy);
    let mut intent = CharacterIntent::default();
    intent.latch_jump(true);

    let outcome = tick(
        &mut strategy,
        &mut state,
        &mut intent,
        &tuning,
        Vec2::new(0.0, -30.0),
    );
    assert_eq!(outcome.direction, Vec2::ZERO);
    assert_eq!(outcome.velocity.y, -30.0);
    assert!(!intent.jump);
}

#[test]
fn test_wall_jump_recovery_window() {
    let tuning = MovementTuning::default();
    let duration = tuning.wall_jump_recovery_ticks;
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::X]);

    let mut strategy = Strategy::Cat(CatStrategy);
    let input = -tuning.movement_speed;
    let mut intent = CharacterIntent {
        horizontal: input,
        ..default()
    };
    intent.latch_jump(true);
    tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);

    let dominated = tuning.wall_jump_sideways_force + input * tuning.wall_jump_input_influence;
    for n in 1..=duration {
        let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
        assert!(
            approx(outcome.direction.x, dominated),
            "tick {} should be recovery-dominated, got {}",
            n,
            outcome.direction.x
        );
    }
    assert_eq!(state.wall_hitstun.counter, 0);

    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert_eq!(outcome.direction.x, input);
}

#[test]
fn test_knockback_window() {
    let tuning = MovementTuning::default();
    let duration = tuning.knockback_hitstun_ticks;
    let mut state = CharacterState {
        pending_knockback: Some(PendingKnockback {
            source: terrain(42),
            direction: Facing::Left,
        }),
        ..default()
    };

    let mut strategy = Strategy::Crow(CrowStrategy);
    let input = tuning.movement_speed;
    let mut intent = CharacterIntent {
        horizontal: input,
        ..default()
    };
    intent.latch_jump(true);

    // The knockback tick ignores input and leaves the jump latched
    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert_eq!(
        outcome.direction,
        Vec2::new(
            -tuning.knockback_sideways_force,
            tuning.knockback_upwards_force,
        )
    );
    assert!(state.pending_knockback.is_none());
    assert_eq!(state.knockback_hitstun.counter, duration);
    assert!(intent.jump);
    intent.take_jump();

    let dominated = -tuning.knockback_sideways_force + input * tuning.knockback_input_influence;
    for _ in 1..=duration {
        let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
        assert!(approx(outcome.direction.x, dominated));
    }

    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert_eq!(outcome.direction.x, input);
    assert!(!state.in_hitstun());
}

#[test]
fn test_knockback_takes_priority_over_wall_recovery() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    state.wall_hitstun.start(5, Facing::Right);
    state.knockback_hitstun.start(3, Facing::Left);

    let mut strategy = Strategy::Cat(CatStrategy);
    let mut intent = CharacterIntent::default();

    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert_eq!(outcome.direction.x, -tuning.knockback_sideways_force);
    // Both windows keep counting down
    assert_eq!(state.knockback_hitstun.counter, 2);
    assert_eq!(state.wall_hitstun.counter, 4);
}

#[test]
fn test_knockback_tick_counts_down_wall_recovery() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState {
        pending_knockback: Some(PendingKnockback {
            source: terrain(42),
            direction: Facing::Left,
        }),
        ..default()
    };
    state.wall_hitstun.start(5, Facing::Right);

    let mut strategy = Strategy::Cat(CatStrategy);
    let mut intent = CharacterIntent::default();
    tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);

    assert_eq!(state.wall_hitstun.counter, 4);
    assert_eq!(
        state.knockback_hitstun.counter,
        tuning.knockback_hitstun_ticks
    );
}

#[test]
fn test_wall_jump_tick_counts_down_knockback() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::X]);
    state.knockback_hitstun.start(5, Facing::Left);

    let mut strategy = Strategy::Cat(CatStrategy);
    let mut intent = CharacterIntent::default();
    intent.latch_jump(true);
    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);

    assert_eq!(outcome.direction.y, tuning.wall_jump_upwards_force);
    assert_eq!(state.knockback_hitstun.counter, 4);
    assert_eq!(state.wall_hitstun.counter, tuning.wall_jump_recovery_ticks);
}

#[test]
fn test_hitstun_countdown() {
    let mut hitstun = Hitstun::default();
    assert_eq!(hitstun.tick(), None);

    hitstun.start(2, Facing::Left);
    assert_eq!(hitstun.tick(), Some(Facing::Left));
    assert!(hitstun.is_active());
    assert_eq!(hitstun.tick(), Some(Facing::Left));
    assert!(!hitstun.is_active());
    assert_eq!(hitstun.tick(), None);
}

// -----------------------------------------------------------------------------
// Controller tick
// -----------------------------------------------------------------------------

#[test]
fn test_zero_dy_preserves_vertical_velocity() {
    let committed = commit_velocity(Vec2::new(100.0, 0.0), Vec2::new(3.0, -250.0), DT);
    assert!(approx(committed.x, 2.0));
    assert_eq!(committed.y, -250.0);

    let committed = commit_velocity(Vec2::new(0.0, 400.0), Vec2::new(0.0, -250.0), DT);
    assert_eq!(committed.y, 400.0);
}

#[test]
fn test_stationary_tick_keeps_falling() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    let mut strategy = Strategy::Stationary(StationaryStrategy);
    let mut intent = CharacterIntent::default();

    let outcome = tick(
        &mut strategy,
        &mut state,
        &mut intent,
        &tuning,
        Vec2::new(5.0, -321.0),
    );
    assert_eq!(outcome.velocity, Vec2::new(0.0, -321.0));
    assert_eq!(state.velocity, outcome.velocity);
}

#[test]
fn test_fall_multiplier() {
    assert_eq!(
        apply_fall_multiplier(true, false, -10.0, 1.5, -1000.0),
        -510.0
    );
    // Grounded, rising, or disabled: untouched
    assert_eq!(
        apply_fall_multiplier(true, true, -10.0, 1.5, -1000.0),
        -10.0
    );
    assert_eq!(apply_fall_multiplier(true, false, 10.0, 1.5, -1000.0), 10.0);
    assert_eq!(apply_fall_multiplier(true, false, 0.0, 1.5, -1000.0), 0.0);
    assert_eq!(
        apply_fall_multiplier(false, false, -10.0, 1.5, -1000.0),
        -10.0
    );
}

#[test]
fn test_fall_multiplier_speeds_up_falling_body() {
    let tuning = MovementTuning {
        apply_fall_multiplier: true,
        fall_multiplier: 2.0,
        ..default()
    };
    let mut strategy = Strategy::Crow(CrowStrategy);
    let mut intent = CharacterIntent::default();

    let mut airborne = CharacterState::default();
    let outcome = tick(
        &mut strategy,
        &mut airborne,
        &mut intent,
        &tuning,
        Vec2::new(0.0, -300.0),
    );
    assert_eq!(outcome.velocity.y, -300.0 + GRAVITY_Y);

    // A rising body keeps its velocity
    let outcome = tick(
        &mut strategy,
        &mut airborne,
        &mut intent,
        &tuning,
        Vec2::new(0.0, 200.0),
    );
    assert_eq!(outcome.velocity.y, 200.0);

    let mut grounded = CharacterState::default();
    begin(&mut grounded, &tuning, 1, &[Vec2::Y]);
    let outcome = tick(
        &mut strategy,
        &mut grounded,
        &mut intent,
        &tuning,
        Vec2::new(0.0, -300.0),
    );
    assert_eq!(outcome.velocity.y, -300.0);
}

#[test]
fn test_facing_deadzone() {
    assert!(!should_flip(0.005, Facing::Left, 0.01));
    assert!(!should_flip(-0.005, Facing::Right, 0.01));
    assert!(should_flip(0.5, Facing::Left, 0.01));
    assert!(should_flip(-0.5, Facing::Right, 0.01));
    assert!(!should_flip(0.5, Facing::Right, 0.01));
}

#[test]
fn test_facing_flip_is_idempotent_inside_deadzone() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState {
        facing: Facing::Left,
        ..default()
    };
    let mut strategy = Strategy::Crow(CrowStrategy);
    // 0.4 * DT stays below the deadzone
    let mut intent = CharacterIntent {
        horizontal: 0.4,
        ..default()
    };

    for _ in 0..10 {
        let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
        assert!(!outcome.flipped);
        assert_eq!(state.facing, Facing::Left);
    }

    intent.horizontal = tuning.movement_speed;
    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert!(outcome.flipped);
    assert_eq!(state.facing, Facing::Right);
}

// -----------------------------------------------------------------------------
// Enemy strategies
// -----------------------------------------------------------------------------

#[test]
fn test_back_and_forth_patrol() {
    let tuning = MovementTuning::default();
    let speed = tuning.movement_speed;
    let mut strategy = Strategy::BackAndForth(BackAndForthStrategy);
    let mut intent = CharacterIntent::default();

    let mut state = CharacterState::default();
    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert_eq!(outcome.direction, Vec2::new(speed, 0.0));

    // Bump into a wall on the right: turn around
    begin(&mut state, &tuning, 1, &[Vec2::NEG_X]);
    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert_eq!(outcome.direction.x, -speed);
    assert_eq!(state.facing, Facing::Left);

    // Off the wall, keep heading left
    end_contact(&mut state, terrain(1));
    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert_eq!(outcome.direction.x, -speed);

    // Left wall sends it back right
    begin(&mut state, &tuning, 2, &[Vec2::X]);
    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert_eq!(outcome.direction.x, speed);
    assert_eq!(state.facing, Facing::Right);
}

fn markov(transitions: Vec<Vec<f32>>) -> MarkovStrategy {
    let chain = MarkovChain::new(transitions, 0).unwrap();
    let durations = MoveDurations {
        move_to_player: 4,
        jump: 2,
        bite: 2,
        spikes: 3,
    };
    MarkovStrategy::new(chain, durations, ChaCha8Rng::seed_from_u64(3))
}

fn markov_step(
    brain: &mut MarkovStrategy,
    state: &mut CharacterState,
    tuning: &MovementTuning,
    target: Vec2,
    draw: f32,
) -> Vec2 {
    let mut intent = CharacterIntent::default();
    let mut ctx = MovementContext {
        role: ControllerRole::Enemy,
        intent: &mut intent,
        tuning,
        position: Vec2::ZERO,
        target: Some(target),
    };
    brain.step_with_draw(state, &mut ctx, draw)
}

#[test]
fn test_markov_moves_run_to_completion() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    let mut brain = markov(vec![
        vec![0.0, 0.3, 0.4, 0.3],
        vec![0.8, 0.05, 0.1, 0.05],
        vec![0.8, 0.05, 0.05, 0.1],
        vec![0.8, 0.05, 0.1, 0.05],
    ]);
    let target = Vec2::new(100.0, 0.0);

    let direction = markov_step(&mut brain, &mut state, &tuning, target, 0.95);
    assert_eq!(direction, Vec2::ZERO);
    assert_eq!(brain.current_move(), Some(MarkovMove::Spikes));
    assert_eq!(brain.take_attack(), Some(EnemyAttack::Spikes));
    assert_eq!(brain.take_attack(), None);

    // The draw is ignored while the move runs
    markov_step(&mut brain, &mut state, &tuning, target, 0.1);
    assert_eq!(brain.current_move(), Some(MarkovMove::Spikes));
    markov_step(&mut brain, &mut state, &tuning, target, 0.1);
    assert!(brain.is_idle());

    let direction = markov_step(&mut brain, &mut state, &tuning, target, 0.1);
    assert_eq!(brain.current_move(), Some(MarkovMove::MoveToPlayer));
    assert_eq!(direction.x, tuning.movement_speed);

    // Direction is held even if the player crosses over
    for _ in 0..3 {
        let direction = markov_step(&mut brain, &mut state, &tuning, -target, 0.5);
        assert_eq!(direction.x, tuning.movement_speed);
    }
    assert!(brain.is_idle());
}

#[test]
fn test_markov_jump_needs_ground() {
    let tuning = MovementTuning::default();
    let always_jump = vec![vec![0.0, 1.0, 0.0, 0.0]; 4];

    let mut brain = markov(always_jump.clone());
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::Y]);
    let direction = markov_step(&mut brain, &mut state, &tuning, Vec2::ZERO, 0.5);
    assert_eq!(direction, Vec2::new(0.0, tuning.jump_force));

    let mut brain = markov(always_jump);
    let mut airborne = CharacterState::default();
    let direction = markov_step(&mut brain, &mut airborne, &tuning, Vec2::ZERO, 0.5);
    assert_eq!(direction, Vec2::ZERO);
    assert_eq!(brain.current_move(), Some(MarkovMove::Jump));
}

#[test]
fn test_markov_no_transition_stays_idle() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    let mut brain = markov(vec![vec![0.5, 0.2, 0.0, 0.0]; 4]);

    let direction = markov_step(&mut brain, &mut state, &tuning, Vec2::ZERO, 0.9);
    assert_eq!(direction, Vec2::ZERO);
    assert!(brain.is_idle());
    assert_eq!(brain.take_attack(), None);

    markov_step(&mut brain, &mut state, &tuning, Vec2::ZERO, 0.1);
    assert_eq!(brain.current_move(), Some(MarkovMove::MoveToPlayer));
}

#[test]
fn test_markov_bite_sets_attack() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    let mut brain = markov(vec![vec![0.0, 0.0, 1.0, 0.0]; 4]);

    markov_step(&mut brain, &mut state, &tuning, Vec2::ZERO, 0.5);
    assert_eq!(brain.take_attack(), Some(EnemyAttack::Bite));
    assert_eq!(brain.remaining_ticks(), 1);
}

// -----------------------------------------------------------------------------
// Wiring, variants and intent
// -----------------------------------------------------------------------------

#[test]
#[should_panic(expected = "Crow strategy is wired to a Enemy controller")]
fn test_player_strategy_on_enemy_controller_panics() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    let mut intent = CharacterIntent::default();
    let mut strategy = Strategy::Crow(CrowStrategy);
    let mut ctx = MovementContext {
        role: ControllerRole::Enemy,
        intent: &mut intent,
        tuning: &tuning,
        position: Vec2::ZERO,
        target: None,
    };
    strategy.determine_movement(&mut state, &mut ctx);
}

#[test]
fn test_stationary_runs_under_any_role() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    let mut intent = CharacterIntent::default();
    let mut strategy = Strategy::Stationary(StationaryStrategy);

    for role in [ControllerRole::Player, ControllerRole::Enemy] {
        let mut ctx = MovementContext {
            role,
            intent: &mut intent,
            tuning: &tuning,
            position: Vec2::ZERO,
            target: None,
        };
        let direction = strategy.determine_movement(&mut state, &mut ctx);
        assert_eq!(direction, Vec2::ZERO);
    }
}

#[test]
fn test_animal_switch_swaps_pair_only() {
    let crow = Strategy::Crow(CrowStrategy);
    let cat = crow.switched_animal().unwrap();
    assert_eq!(cat.kind(), StrategyKind::Cat);
    assert_eq!(cat.switched_animal().unwrap().kind(), StrategyKind::Crow);

    assert!(
        Strategy::BackAndForth(BackAndForthStrategy)
            .switched_animal()
            .is_none()
    );
    assert!(Strategy::default().switched_animal().is_none());
}

#[test]
fn test_switch_preserves_state() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::X]);
    state.double_jump_available = true;

    let mut strategy = Strategy::Crow(CrowStrategy);
    strategy = strategy.switched_animal().unwrap();

    // The cat immediately uses the wall the crow was touching
    let mut intent = CharacterIntent::default();
    intent.latch_jump(true);
    let outcome = tick(&mut strategy, &mut state, &mut intent, &tuning, Vec2::ZERO);
    assert_eq!(outcome.direction.y, tuning.wall_jump_upwards_force);
}

#[test]
fn test_intent_latching() {
    let mut intent = CharacterIntent::default();
    intent.latch_jump(true);
    // A release before consumption does not drop the request
    intent.latch_jump(false);
    assert!(intent.jump);
    assert!(intent.take_jump());
    assert!(!intent.take_jump());

    intent.latch_switch(false);
    assert!(!intent.switch_animal);
    intent.latch_switch(true);
    intent.latch_switch(true);
    assert!(intent.take_switch());
    assert!(!intent.switch_animal);
}

#[test]
fn test_snapshot_reflects_state() {
    let tuning = MovementTuning::default();
    let mut state = CharacterState::default();
    begin(&mut state, &tuning, 1, &[Vec2::Y]);
    begin(&mut state, &tuning, 2, &[Vec2::NEG_X]);
    state.knockback_hitstun.start(2, Facing::Left);

    let snapshot = state.snapshot(StrategyKind::Cat);
    assert!(snapshot.grounded);
    assert!(!snapshot.touching_wall_left);
    assert!(snapshot.touching_wall_right);
    assert!(snapshot.double_jump_available);
    assert!(snapshot.in_hitstun);
    assert_eq!(snapshot.variant, StrategyKind::Cat);
    assert_eq!(snapshot.facing, Facing::Right);
}

#[test]
fn test_tuning_from_def_clamps_fractions() {
    let def = crate::content::MovementDef {
        wall_jump_input_influence: 1.7,
        knockback_input_influence: -0.2,
        facing_deadzone: -0.05,
        ..default()
    };
    let tuning = MovementTuning::from_def(&def);
    assert_eq!(tuning.wall_jump_input_influence, 1.0);
    assert_eq!(tuning.knockback_input_influence, 0.0);
    assert_eq!(tuning.facing_deadzone, 0.05);
}

#[test]
fn test_single_jump_height() {
    let tuning = MovementTuning {
        jump_force: 600.0,
        ..default()
    };
    assert_eq!(tuning.single_jump_height(1200.0), 150.0);
    assert_eq!(tuning.single_jump_height(0.0), 0.0);
}
