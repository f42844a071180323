use anyhow::{bail, ensure, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use itertools::Itertools;
use log::debug;
use tracing_subscriber::EnvFilter;

use randkit::{FastTraits, GeneratorTraits, RandomBase, RandomConfig, ServerTraits};

const DEFAULT_CONFIG: &str = "randkit.json";

fn cli() -> Command {
    let items = || {
        Arg::new("items")
            .value_name("ITEM")
            .num_args(1..)
            .required(true)
    };

    Command::new("randkit")
        .about("Draws samples from the randkit generators")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .action(ArgAction::Set)
                .global(true),
        )
        .arg(
            Arg::new("server")
                .long("server")
                .help("Draw from the explicitly seeded server generator")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Server generator seed, overrides the config")
                .value_parser(value_parser!(u64))
                .action(ArgAction::Set)
                .global(true),
        )
        .arg(
            Arg::new("count")
                .short('n')
                .long("count")
                .value_name("N")
                .help("How many samples to draw")
                .value_parser(value_parser!(usize))
                .action(ArgAction::Set)
                .global(true),
        )
        .subcommand(
            Command::new("uniform")
                .about("Integer in [0, TO] or [FROM, TO]")
                .allow_negative_numbers(true)
                .arg(
                    Arg::new("bounds")
                        .value_name("BOUND")
                        .num_args(1..=2)
                        .required(true)
                        .value_parser(value_parser!(i64)),
                ),
        )
        .subcommand(
            Command::new("uniformf")
                .about("Float in [0, TO] or [FROM, TO)")
                .allow_negative_numbers(true)
                .arg(
                    Arg::new("bounds")
                        .value_name("BOUND")
                        .num_args(1..=2)
                        .required(true)
                        .value_parser(value_parser!(f64)),
                ),
        )
        .subcommand(Command::new("probability").about("Integer in [0, 100]"))
        .subcommand(Command::new("probabilityf").about("Float in [0, 1]"))
        .subcommand(Command::new("yes-no").about("Coin flip"))
        .subcommand(
            Command::new("normal")
                .about("Normal distribution")
                .allow_negative_numbers(true)
                .arg(Arg::new("mean").required(true).value_parser(value_parser!(f64)))
                .arg(Arg::new("stddev").required(true).value_parser(value_parser!(f64))),
        )
        .subcommand(
            Command::new("triangular")
                .about("Triangular distribution on [A, B] with mode C")
                .allow_negative_numbers(true)
                .arg(Arg::new("a").required(true).value_parser(value_parser!(f64)))
                .arg(Arg::new("b").required(true).value_parser(value_parser!(f64)))
                .arg(Arg::new("c").required(true).value_parser(value_parser!(f64))),
        )
        .subcommand(Command::new("pick").about("One item, equal odds").arg(items()))
        .subcommand(
            Command::new("weighted")
                .about("One item, odds proportional to its weight")
                .arg(
                    Arg::new("weights")
                        .short('w')
                        .long("weights")
                        .value_name("W,W,...")
                        .value_delimiter(',')
                        .required(true)
                        .value_parser(value_parser!(f32)),
                )
                .arg(items()),
        )
        .subcommand(Command::new("shuffle").about("Random permutation of the items").arg(items()))
}

fn root_init(args: &ArgMatches) -> Result<RandomConfig> {
    let config = match args.get_one::<String>("config") {
        Some(path) => RandomConfig::from_file(path)
            .with_context(|| format!("could not load config from {path}"))?,
        None => RandomConfig::from_file(DEFAULT_CONFIG).unwrap_or_default(),
    };

    Ok(config)
}

/// Seeds the server generator from `--seed`, falling back to the config.
/// Runs after logging is up so the seeding record is kept.
fn install_seed(args: &ArgMatches, config: &RandomConfig) -> bool {
    match args.get_one::<u64>("seed") {
        Some(seed) => {
            ServerTraits::seed(*seed);
            true
        }
        None => config.install_server_seed(),
    }
}

fn init_logging(level: &str) {
    // RUST_LOG still wins over the configured level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn values<T: Clone + Send + Sync + 'static>(args: &ArgMatches, id: &str) -> Vec<T> {
    args.get_many::<T>(id)
        .map(|values| values.cloned().collect_vec())
        .unwrap_or_default()
}

fn number<T: Copy + Send + Sync + 'static>(args: &ArgMatches, id: &str) -> Result<T> {
    args.get_one::<T>(id)
        .copied()
        .with_context(|| format!("missing argument {id}"))
}

fn draw_one<G: GeneratorTraits>(command: &str, args: &ArgMatches) -> Result<String> {
    let line = match command {
        "uniform" => match values::<i64>(args, "bounds")[..] {
            [to] => {
                ensure!(to >= 0, "upper bound {to} is negative");
                RandomBase::<G>::uniform_to(to).to_string()
            }
            [from, to] => {
                ensure!(from <= to, "empty interval [{from}, {to}]");
                RandomBase::<G>::uniform_in(from, to).to_string()
            }
            _ => bail!("expected one or two bounds"),
        },
        "uniformf" => match values::<f64>(args, "bounds")[..] {
            [to] => {
                ensure!(to >= 0.0 && to.is_finite(), "upper bound {to} is not a finite non-negative number");
                RandomBase::<G>::uniformf_to(to).to_string()
            }
            [from, to] => {
                ensure!(from < to, "empty interval [{from}, {to})");
                RandomBase::<G>::uniformf_in(from, to).to_string()
            }
            _ => bail!("expected one or two bounds"),
        },
        "probability" => RandomBase::<G>::probability::<u8>().to_string(),
        "probabilityf" => RandomBase::<G>::probabilityf::<f64>().to_string(),
        "yes-no" => String::from(if RandomBase::<G>::yes_no() { "yes" } else { "no" }),
        "normal" => {
            let mean: f64 = number(args, "mean")?;
            let stddev: f64 = number(args, "stddev")?;
            RandomBase::<G>::try_normalf(mean, stddev)?.to_string()
        }
        "triangular" => {
            let a: f64 = number(args, "a")?;
            let b: f64 = number(args, "b")?;
            let c: f64 = number(args, "c")?;
            ensure!(a < b && a <= c && c <= b, "expected A <= C <= B with A < B");
            RandomBase::<G>::triangularf(a, b, c).to_string()
        }
        "pick" => RandomBase::<G>::try_uniform_from(&values::<String>(args, "items"))?.clone(),
        "weighted" => {
            let weights = values::<f32>(args, "weights");
            let items = values::<String>(args, "items");
            ensure!(
                weights.len() == items.len(),
                "{} weights for {} items",
                weights.len(),
                items.len()
            );
            RandomBase::<G>::try_weighted_from(&weights, &items)?.clone()
        }
        "shuffle" => {
            let mut items = values::<String>(args, "items");
            RandomBase::<G>::shuffle(&mut items);
            items.iter().join(" ")
        }
        other => bail!("unknown command {other}"),
    };

    Ok(line)
}

fn draw<G: GeneratorTraits>(command: &str, args: &ArgMatches, count: usize) -> Result<Vec<String>> {
    (0..count).map(|_| draw_one::<G>(command, args)).collect()
}

fn main() -> Result<()> {
    let args = cli().get_matches();
    let config = root_init(&args)?;
    init_logging(&config.log_level);
    debug!("{:?}", config);
    install_seed(&args, &config);

    let count = args.get_one::<usize>("count").copied().unwrap_or(config.count);
    let (command, command_args) = args.subcommand().context("missing command")?;

    let lines = if args.get_flag("server") {
        ensure!(
            ServerTraits::is_seeded(),
            "--server needs a seed: pass --seed or set server_seed in the config"
        );
        draw::<ServerTraits>(command, command_args, count)?
    } else {
        draw::<FastTraits>(command, command_args, count)?
    };

    for line in lines {
        println!("{line}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(argv: &[&str]) -> Result<Vec<String>> {
        let args = cli().try_get_matches_from(argv)?;
        let count = args.get_one::<usize>("count").copied().unwrap_or(1);
        let (command, command_args) = args.subcommand().context("missing command")?;
        draw::<FastTraits>(command, command_args, count)
    }

    #[test]
    fn test_install_seed_prefers_command_line() {
        let config = RandomConfig::default();
        let args = cli().try_get_matches_from(["randkit", "yes-no"]).unwrap();
        assert!(!install_seed(&args, &config));

        let args = cli()
            .try_get_matches_from(["randkit", "--seed", "7", "--server", "yes-no"])
            .unwrap();
        assert!(install_seed(&args, &config));
        assert!(ServerTraits::is_seeded());

        let (command, command_args) = args.subcommand().unwrap();
        let first = draw::<ServerTraits>(command, command_args, 5).unwrap();
        install_seed(&args, &config);
        let second = draw::<ServerTraits>(command, command_args, 5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_uniform_command() {
        let lines = run(&["randkit", "-n", "50", "uniform", "-3", "3"]).unwrap();
        assert_eq!(lines.len(), 50);
        for line in lines {
            let value: i64 = line.parse().unwrap();
            assert!((-3..=3).contains(&value));
        }
    }

    #[test]
    fn test_uniform_command_rejects_bad_bounds() {
        assert!(run(&["randkit", "uniform", "5", "1"]).is_err());
        assert!(run(&["randkit", "uniform", "-1"]).is_err());
        assert!(run(&["randkit", "uniformf", "2.0", "2.0"]).is_err());
    }

    #[test]
    fn test_weighted_command() {
        let lines = run(&["randkit", "-n", "20", "weighted", "-w", "0,1", "heads", "tails"]).unwrap();
        assert!(lines.iter().all(|line| line == "tails"));
        assert!(run(&["randkit", "weighted", "-w", "1", "heads", "tails"]).is_err());
    }

    #[test]
    fn test_shuffle_command_keeps_items() {
        let lines = run(&["randkit", "shuffle", "a", "b", "c", "d"]).unwrap();
        let items = lines[0].split(' ').sorted().collect_vec();
        assert_eq!(items, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_triangular_command_validates_mode() {
        assert!(run(&["randkit", "triangular", "0", "1", "2"]).is_err());
        let lines = run(&["randkit", "triangular", "0", "1", "0.5"]).unwrap();
        let value: f64 = lines[0].parse().unwrap();
        assert!((0.0..=1.0).contains(&value));
    }
}
