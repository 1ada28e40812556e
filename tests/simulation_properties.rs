//! End-to-end properties of the sense -> decide -> act loop.

mod common;

use common::ScriptedRng;
use rand::{SeedableRng, rngs::StdRng};
use tileworld::{
    Agent, AgentConfig, Environment, Error, ModelKind, NoiseLevel, RunConfig, Strategy, Variant,
    beliefs::OracleMode,
    policy::DecisionReason,
    types::Direction,
};

const ALL_VARIANTS: [Variant; 4] = [
    Variant::Histogram,
    Variant::Noisy,
    Variant::Weighted,
    Variant::Beta,
];

const COUNT_AND_BETA_MODELS: [ModelKind; 5] = [
    ModelKind::Binomial {
        oracle: OracleMode::BeliefOnly,
    },
    ModelKind::Binomial {
        oracle: OracleMode::GroundTruthScaled,
    },
    ModelKind::PosteriorVariance,
    ModelKind::Certainty,
    ModelKind::Beta,
];

fn noisy_run(steps: usize, strategy: Strategy) -> RunConfig {
    RunConfig::new(steps, strategy)
        .with_observation_noise(NoiseLevel::HIGH)
        .with_actuation_noise(NoiseLevel::HIGH)
}

#[test]
fn positions_stay_on_the_strip() {
    for variant in ALL_VARIANTS {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let world = Environment::random(7, &mut rng).unwrap();
            let mut agent = Agent::new(world, &variant.agent_config(), &mut rng).unwrap();
            for strategy in Strategy::ALL {
                agent.run(&noisy_run(50, strategy), &mut rng).unwrap();
                assert!(agent.position() < 7, "{variant} seed {seed}");
            }
            assert!(agent.history().iter().all(|&p| p < 7));
            assert_eq!(agent.history().len(), 100);
        }
    }
}

#[test]
fn zero_step_run_changes_nothing() {
    let mut rng = StdRng::seed_from_u64(21);
    let world = Environment::from_bits(&[1, 0, 1]).unwrap();
    let config = AgentConfig::new(ModelKind::Beta).with_initial_position(2);
    let mut agent = Agent::new(world, &config, &mut rng).unwrap();
    let summary = agent
        .run(&noisy_run(0, Strategy::Adventurous), &mut rng)
        .unwrap();
    assert_eq!(summary.steps, 0);
    assert_eq!(summary.final_position, 2);
    assert_eq!(agent.position(), 2);
    assert!(agent.history().is_empty());
    assert_eq!(agent.beliefs().total_observations(), 0);
}

#[test]
fn single_tile_world_keeps_the_agent_in_place() {
    for variant in ALL_VARIANTS {
        let mut rng = StdRng::seed_from_u64(8);
        let world = Environment::from_bits(&[1]).unwrap();
        let mut agent = Agent::new(world, &variant.agent_config(), &mut rng).unwrap();
        for strategy in Strategy::ALL {
            let summary = agent.run(&noisy_run(30, strategy), &mut rng).unwrap();
            assert_eq!(summary.decisions_for(DecisionReason::EdgeForced), 30);
            assert_eq!(agent.position(), 0, "{variant}");
        }
        assert!(agent.history().iter().all(|&p| p == 0));
        assert_eq!(agent.history().len(), 60);
    }
}

#[test]
fn raw_decisions_at_edges_point_inward() {
    let mut rng = StdRng::seed_from_u64(11);
    let world = Environment::from_bits(&[1, 0, 0, 1, 1]).unwrap();
    let config = Variant::Histogram.agent_config();
    let mut agent = Agent::new(world, &config, &mut rng).unwrap();
    let recorder = tileworld::pipeline::StepRecorder::new();
    let mut handle = recorder.clone();
    agent
        .run_observed(&noisy_run(200, Strategy::Adventurous), &mut rng, &mut handle)
        .unwrap();

    let mut edge_steps = 0;
    for (_, record) in recorder.records() {
        match record.position {
            0 => {
                assert_eq!(record.decision.direction, Direction::Right);
                edge_steps += 1;
            }
            4 => {
                assert_eq!(record.decision.direction, Direction::Left);
                edge_steps += 1;
            }
            _ => assert_ne!(record.decision.reason, DecisionReason::EdgeForced),
        }
    }
    assert!(edge_steps > 0);
}

#[test]
fn same_seed_same_trajectory() {
    for variant in ALL_VARIANTS {
        let simulate = || {
            let mut rng = StdRng::seed_from_u64(2024);
            let world = Environment::random(10, &mut rng).unwrap();
            let mut agent = Agent::new(world, &variant.agent_config(), &mut rng).unwrap();
            agent
                .run(&noisy_run(80, Strategy::Cautious), &mut rng)
                .unwrap();
            let means: Vec<f64> = (0..10).map(|p| agent.belief_mean(p)).collect();
            (agent.history().to_vec(), means, agent.position())
        };
        assert_eq!(simulate(), simulate(), "{variant}");
    }
}

#[test]
fn scripted_zero_draws_give_known_history() {
    // Every tie breaks left, no noise fires: 1 -> tie -> 0 -> edge -> 1 -> known left
    for model in COUNT_AND_BETA_MODELS {
        let world = Environment::from_bits(&[0, 1, 0, 1]).unwrap();
        let config = AgentConfig::new(model).with_initial_position(1);
        let mut rng = ScriptedRng::zeros();
        let mut agent = Agent::new(world, &config, &mut rng).unwrap();
        let summary = agent
            .run(&RunConfig::new(3, Strategy::Cautious), &mut rng)
            .unwrap();
        assert_eq!(agent.history(), &[1, 0, 1], "{model}");
        assert_eq!(agent.position(), 0, "{model}");
        assert_eq!(summary.decisions_for(DecisionReason::TieBreak), 1);
        assert_eq!(summary.decisions_for(DecisionReason::EdgeForced), 1);
        assert_eq!(summary.decisions_for(DecisionReason::Preferred), 1);
    }
}

#[test]
fn scripted_max_draws_break_ties_right() {
    let world = Environment::from_bits(&[0, 1, 0, 1]).unwrap();
    let config = AgentConfig::new(ModelKind::Beta).with_initial_position(1);
    let mut rng = ScriptedRng::ones();
    let mut agent = Agent::new(world, &config, &mut rng).unwrap();
    agent
        .run(&RunConfig::new(3, Strategy::Cautious), &mut rng)
        .unwrap();
    assert_eq!(agent.history(), &[1, 2, 1]);
    assert_eq!(agent.position(), 2);
}

#[test]
fn unknown_strategy_leaves_agent_untouched() {
    let mut rng = StdRng::seed_from_u64(5);
    let world = Environment::from_bits(&[0, 1, 1, 0]).unwrap();
    let mut agent = Agent::new(world, &AgentConfig::default(), &mut rng).unwrap();
    let start = agent.position();

    let err = agent.run_named(10, "greedy", 0.0, 0.0, &mut rng).unwrap_err();
    assert!(matches!(err, Error::InvalidStrategy { ref name } if name == "greedy"));
    assert!(agent.history().is_empty());
    assert_eq!(agent.beliefs().total_observations(), 0);
    assert_eq!(agent.position(), start);
}

#[test]
fn unsupported_noise_is_rejected_before_running() {
    let mut rng = StdRng::seed_from_u64(6);
    let world = Environment::from_bits(&[0, 1, 1, 0]).unwrap();
    let mut agent = Agent::new(world, &AgentConfig::default(), &mut rng).unwrap();

    let err = agent
        .run_named(10, "cautious", 0.25, 0.0, &mut rng)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidNoiseLevel { .. }));
    assert!(agent.history().is_empty());

    let summary = agent
        .run_named(10, "adventurous", 0.4, 0.1, &mut rng)
        .unwrap();
    assert_eq!(summary.steps, 10);
}

#[test]
fn fresh_beliefs_are_uninformed() {
    let mut rng = StdRng::seed_from_u64(7);
    for model in COUNT_AND_BETA_MODELS {
        let world = Environment::from_bits(&[1, 1, 0, 0, 1]).unwrap();
        let agent = Agent::new(world, &AgentConfig::new(model), &mut rng).unwrap();
        for position in 0..5 {
            assert_eq!(agent.belief_mean(position), 0.5, "{model}");
            assert_eq!(agent.beliefs().counts(position).total(), 0);
        }
        assert_eq!(agent.belief_uncertainty(-1), f64::INFINITY);
        assert_eq!(agent.belief_uncertainty(5), f64::INFINITY);
    }
}

#[test]
fn strategies_choose_opposite_sides() {
    let world = Environment::from_bits(&[0, 0, 1, 1, 0]).unwrap();
    let config = AgentConfig::new(ModelKind::Beta).with_initial_position(1);

    let first_move = |strategy: Strategy| {
        // One noiseless step from tile 1 with the opening tie broken right:
        // tile 1 is now known, tile 3 has never been seen.
        let mut rng = ScriptedRng::ones();
        let mut agent = Agent::new(world.clone(), &config, &mut rng).unwrap();
        agent
            .run(&RunConfig::new(1, Strategy::Cautious), &mut rng)
            .unwrap();
        assert_eq!(agent.position(), 2);
        assert_eq!(agent.beliefs().counts(1).total(), 1);
        assert_eq!(agent.beliefs().counts(3).total(), 0);

        let summary = agent.run(&RunConfig::new(1, strategy), &mut rng).unwrap();
        assert_eq!(summary.decisions_for(DecisionReason::Preferred), 1);
        agent.position()
    };

    assert_eq!(first_move(Strategy::Cautious), 1);
    assert_eq!(first_move(Strategy::Adventurous), 3);
}
