use clap::Parser;
use tileworld::{
    Variant,
    cli::commands::{
        run::{self, RunArgs},
        sweep::{self, SweepArgs},
    },
};

fn parse_run<I, T>(args: I) -> RunArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    RunArgs::parse_from(args)
}

#[test]
fn run_defaults_match_the_noisy_preset() {
    let args = parse_run(["tileworld-run"]);
    assert_eq!(args.variant, Variant::Noisy);
    assert_eq!(args.length, 10);
    assert_eq!(args.steps, 100);
    assert_eq!(args.strategy, "cautious");
    assert!(args.noise.is_none());
}

#[test]
fn seeded_run_completes() {
    let args = parse_run([
        "tileworld-run",
        "--variant",
        "beta",
        "--length",
        "8",
        "--steps",
        "30",
        "--strategy",
        "adventurous",
        "--noise",
        "40%",
        "--seed",
        "42",
        "--json",
    ]);
    run::execute(args).expect("seeded run should succeed");
}

#[test]
fn unknown_strategy_fails() {
    let args = parse_run(["tileworld-run", "--strategy", "greedy", "--seed", "1"]);
    let err = run::execute(args).unwrap_err();
    assert!(err.to_string().contains("greedy"), "{err}");
}

#[test]
fn unsupported_noise_fails() {
    let args = parse_run(["tileworld-run", "--noise", "0.25", "--seed", "1"]);
    assert!(run::execute(args).is_err());
}

#[test]
fn start_outside_world_fails() {
    let args = parse_run(["tileworld-run", "--length", "4", "--start", "4"]);
    assert!(run::execute(args).is_err());
}

#[test]
fn fresh_sweep_completes() {
    let args = SweepArgs::parse_from([
        "tileworld-sweep",
        "--variant",
        "histogram",
        "--steps",
        "20",
        "--fresh",
        "--actuation-noise",
        "0",
        "--seed",
        "9",
    ]);
    assert!(args.fresh);
    sweep::execute(args).expect("sweep should succeed");
}
