use clap::{CommandFactory, FromArgMatches, Parser};
use std::io::Write;
use temperforge::config::{Config, SearchParams};
use temperforge::optimizer::OptimizationOptions;
use temperforge::scorer::FitnessMode;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let mut argv = vec!["temperforge"];
    argv.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

fn write_config(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    file
}

#[test]
fn test_clap_defaults_match_serde_defaults() {
    let (cli, _) = parse(&[]);
    let from_json: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(cli.search.population_size, from_json.search.population_size);
    assert_eq!(cli.search.blend_alpha, from_json.search.blend_alpha);
    assert_eq!(cli.search.fitness_mode, FitnessMode::Root);
    assert_eq!(cli.dissonance.curve_steps, from_json.dissonance.curve_steps);
    assert_eq!(cli.dissonance.fundamental_hz, 261.63);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(r#"{"search": {"population_size": 10, "fitness_mode": "all-tonics"}}"#);
    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.search.population_size, 10);
    assert_eq!(config.search.fitness_mode, FitnessMode::AllTonics);
    assert_eq!(config.search.max_generations, SearchParams::default().max_generations);
    assert_eq!(config.dissonance.partial_count, 7);
}

#[test]
fn test_cli_overrides_only_typed_values() {
    let file = write_config(r#"{"search": {"population_size": 10, "max_generations": 5}}"#);
    let mut config = Config::load_from_file(file.path()).unwrap();

    let (cli, matches) = parse(&["--population-size", "50", "--curve-steps", "30"]);
    config.merge_from_cli(&cli, &matches);

    assert_eq!(config.search.population_size, 50);
    assert_eq!(config.search.max_generations, 5);
    assert_eq!(config.dissonance.curve_steps, 30);
}

#[test]
fn test_fitness_mode_from_cli() {
    let (cli, matches) = parse(&["--fitness-mode", "all-tonics"]);
    let mut config = Config::default();
    config.merge_from_cli(&cli, &matches);
    assert_eq!(config.search.fitness_mode, FitnessMode::AllTonics);
}

#[test]
fn test_bad_file_is_an_error() {
    let file = write_config("{ not json");
    assert!(Config::load_from_file(file.path()).is_err());
    assert!(Config::load_from_file("/definitely/not/here.json").is_err());
}

#[test]
fn test_options_from_config() {
    let mut config = Config::default();
    config.search.elite_count = 4;
    let opts = OptimizationOptions::from(&config);
    assert_eq!(opts.params.elite_count, 4);
    assert!(opts.max_time.is_none());
}

#[test]
fn test_time_limit_from_cli() {
    let (cli, matches) = parse(&["--time-limit-secs", "3"]);
    let mut config = Config::default();
    config.merge_from_cli(&cli, &matches);
    assert_eq!(config.search.time_limit_secs, Some(3));

    let opts = OptimizationOptions::from(&config);
    assert_eq!(opts.max_time, Some(std::time::Duration::from_secs(3)));
}
