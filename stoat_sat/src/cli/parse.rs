use std::path::PathBuf;

use clap::{value_parser, Arg, Command};

use stoat_sat::config::{CcMin, Config, PhaseSaving};

pub fn cli() -> Command {
    Command::new("stoat_sat")
        .about("Determines whether a CNF formula is satisfiable")
        .arg(
            Arg::new("path")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("The DIMACS CNF file to solve (plain, .gz, or .xz)."),
        )
        .arg(
            Arg::new("var_decay")
                .long("var-decay")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .help("The variable activity decay factor. Default: 0.95"),
        )
        .arg(
            Arg::new("cla_decay")
                .long("cla-decay")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .help("The clause activity decay factor. Default: 0.999"),
        )
        .arg(
            Arg::new("rnd_freq")
                .long("rnd-freq")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .help("The frequency with which the decision heuristic tries a random variable. Default: 0"),
        )
        .arg(
            Arg::new("rnd_seed")
                .long("rnd-seed")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .help("Seed for random variable selection. Default: 91648253"),
        )
        .arg(
            Arg::new("ccmin_mode")
                .long("ccmin-mode")
                .value_parser(value_parser!(u32).range(0..=2))
                .num_args(1)
                .help("Conflict clause minimisation (0=none, 1=basic, 2=deep). Default: 2"),
        )
        .arg(
            Arg::new("phase_saving")
                .long("phase-saving")
                .value_parser(value_parser!(u32).range(0..=2))
                .num_args(1)
                .help("Phase saving (0=none, 1=limited, 2=full). Default: 2"),
        )
        .arg(
            Arg::new("rnd_init")
                .long("rnd-init")
                .action(clap::ArgAction::SetTrue)
                .help("Randomise the initial activity."),
        )
        .arg(
            Arg::new("no_luby")
                .long("no-luby")
                .action(clap::ArgAction::SetTrue)
                .help("Restart geometrically instead of on the Luby sequence."),
        )
        .arg(
            Arg::new("rfirst")
                .long("rfirst")
                .value_parser(value_parser!(u32).range(1..))
                .num_args(1)
                .help("The base restart interval. Default: 100"),
        )
        .arg(
            Arg::new("rinc")
                .long("rinc")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .help("Restart interval increase factor. Default: 2"),
        )
        .arg(
            Arg::new("gc_frac")
                .long("gc-frac")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .help("The fraction of wasted memory allowed before garbage collection. Default: 0.20"),
        )
        .arg(
            Arg::new("min_learnts")
                .long("min-learnts")
                .value_parser(value_parser!(u32))
                .num_args(1)
                .help("Minimum learnt clause limit. Default: 0"),
        )
        .arg(
            Arg::new("verb")
                .long("verb")
                .value_parser(value_parser!(u32).range(0..=2))
                .num_args(1)
                .help("Verbosity (0=silent, 1=some). Default: 1"),
        )
        .arg(
            Arg::new("conf_budget")
                .long("conf-budget")
                .value_parser(value_parser!(i64))
                .num_args(1)
                .help("Give up after this many conflicts."),
        )
        .arg(
            Arg::new("prop_budget")
                .long("prop-budget")
                .value_parser(value_parser!(i64))
                .num_args(1)
                .help("Give up after this many propagations."),
        )
        .arg(
            Arg::new("dimacs")
                .long("dimacs")
                .value_parser(value_parser!(PathBuf))
                .num_args(1)
                .help("Write the simplified instance to this file instead of solving."),
        )
        .arg(
            Arg::new("stats_cadence")
                .long("stats-cadence")
                .value_parser(value_parser!(u64))
                .num_args(1)
                .help("Sample and print solver counters every this many milliseconds."),
        )
}

pub fn config_from_args(matches: &clap::ArgMatches) -> Config {
    let mut config = Config {
        verbosity: 1,
        ..Config::default()
    };
    if let Some(&v) = matches.get_one::<f64>("var_decay") {
        config.var_decay = v;
    }
    if let Some(&v) = matches.get_one::<f64>("cla_decay") {
        config.clause_decay = v;
    }
    if let Some(&v) = matches.get_one::<f64>("rnd_freq") {
        config.random_var_freq = v;
    }
    if let Some(&v) = matches.get_one::<f64>("rnd_seed") {
        config.random_seed = v;
    }
    if let Some(&v) = matches.get_one::<u32>("ccmin_mode") {
        config.ccmin_mode = CcMin::from_level(v);
    }
    if let Some(&v) = matches.get_one::<u32>("phase_saving") {
        config.phase_saving = PhaseSaving::from_level(v);
    }
    if matches.get_flag("rnd_init") {
        config.rnd_init_act = true;
    }
    if matches.get_flag("no_luby") {
        config.luby_restart = false;
    }
    if let Some(&v) = matches.get_one::<u32>("rfirst") {
        config.restart_first = v;
    }
    if let Some(&v) = matches.get_one::<f64>("rinc") {
        config.restart_inc = v;
    }
    if let Some(&v) = matches.get_one::<f64>("gc_frac") {
        config.garbage_frac = v;
    }
    if let Some(&v) = matches.get_one::<u32>("min_learnts") {
        config.min_learnts_lim = v;
    }
    if let Some(&v) = matches.get_one::<u32>("verb") {
        config.verbosity = v;
    }
    config
}
