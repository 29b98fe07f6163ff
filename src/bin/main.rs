use std::fs;
use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, ValueEnum};

use twophase::algorithm::{EPSILON, SolverOptions};
use twophase::algorithm::duality::solve_via_dual;
use twophase::algorithm::geometry::Polyhedron;
use twophase::algorithm::two_phase::solve_with;
use twophase::algorithm::two_phase::strategy::pivot_rule::{Dantzig, FirstProfitable};
use twophase::algorithm::two_phase::trace::{LogTrace, Recorder, TraceSink};
use twophase::io::{export, import};

/// Column selection rule of the simplex method.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Rule {
    /// Most negative relative cost.
    Dantzig,
    /// First negative relative cost.
    FirstProfitable,
}

/// A linear program solver using the two-phase simplex method.
#[derive(Parser)]
#[command(version, about)]
struct Opts {
    /// File containing the problem description, in JSON
    problem_file: PathBuf,
    /// Solve the dual problem and recover the primal solution from it
    #[arg(long)]
    dual: bool,
    /// Also enumerate the vertices of a problem in two variables
    #[arg(long)]
    geometry: bool,
    /// Print every intermediate tableau
    #[arg(long)]
    trace: bool,
    /// Column selection rule
    #[arg(long, value_enum, default_value_t = Rule::Dantzig)]
    rule: Rule,
    /// Values within this distance of zero are treated as zero
    #[arg(long, default_value_t = EPSILON)]
    epsilon: f64,
    /// Give up after this many pivots
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Write the problem description back out to this file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let opts = Opts::parse();

    println!("Reading problem file: \"{}\"...", opts.problem_file.display());
    let program = import(&opts.problem_file).unwrap_or_else(|error| {
        eprintln!("Couldn't read the problem: {error}");
        exit(1);
    });
    println!("{program}");

    if let Some(path) = &opts.export {
        if let Err(error) = fs::write(path, export(&program)) {
            eprintln!("Couldn't write \"{}\": {error}", path.display());
            exit(1);
        }
    }

    let options = SolverOptions { epsilon: opts.epsilon, max_iterations: opts.max_iterations };

    if opts.dual {
        println!("Solving the dual problem...");
        match solve_via_dual(&program, &options) {
            Ok(result) => {
                println!("Dual problem:\n{}", result.dual_program);
                println!("Dual solution:\n{}", result.dual);
                print!("Primal solution:\n{}", result.primal);
            },
            Err(error) => {
                eprintln!("Solve failed: {error}");
                exit(1);
            },
        }
    } else {
        println!("Solving...");
        let mut recorder = Recorder::new();
        let mut log_trace = LogTrace;
        let sink: &mut dyn TraceSink = if opts.trace { &mut recorder } else { &mut log_trace };

        let result = match opts.rule {
            Rule::Dantzig => solve_with::<Dantzig, _>(&program, &options, sink),
            Rule::FirstProfitable => solve_with::<FirstProfitable, _>(&program, &options, sink),
        };
        if opts.trace {
            print!("{recorder}");
        }
        match result {
            Ok(solution) => print!("{solution}"),
            Err(error) => {
                eprintln!("Solve failed: {error}");
                exit(1);
            },
        }
    }

    if opts.geometry {
        println!("Enumerating vertices...");
        match Polyhedron::from_linear_program(&program, options.epsilon) {
            Ok(polyhedron) => print!("{polyhedron}"),
            Err(error) => eprintln!("{error}"),
        }
    }
}
