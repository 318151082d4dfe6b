use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use clap::{App, AppSettings, Arg};
use env_logger::{fmt, Builder, Target};
use log::{error, info, Level, LevelFilter, Record};

use cdcl::solver::Solver;

fn main() {
    init_logging();

    let matches = App::new("cdcl-solve")
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::DisableHelpSubcommand)
        .arg(
            Arg::with_name("INPUT")
                .help("DIMACS CNF input files to solve, each independently")
                .multiple(true),
        )
        .get_matches();

    match matches.values_of("INPUT") {
        Some(paths) => {
            for path in paths {
                solve_file(path);
            }
        }
        // No input at all is not a solved instance, so it gets no `s ` result-line prefix.
        None => println!("UNKNOWN"),
    }

    // The result of every instance is conveyed on stdout, not through the exit code.
    std::process::exit(0);
}

fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .format(format)
        .filter(None, LevelFilter::Info);

    if let Ok(env_var) = env::var("CDCL_LOG") {
        builder.parse_filters(&env_var);
    }

    builder.init();
}

/// Solve a single input file and print its result line.
///
/// A file that fails to open or parse is logged and skipped; it never aborts the remaining
/// inputs.
fn solve_file(path: &str) {
    info!("Reading file '{}'", path);

    let mut solver = Solver::new();

    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) => {
            error!("Reading file '{}': {}", path, err);
            println!("s UNKNOWN");
            return;
        }
    };

    if let Err(err) = solver.add_dimacs_cnf(file) {
        error!("Parsing file '{}': {}", path, err);
        println!("s UNKNOWN");
        return;
    }

    match solver.solve() {
        Some(true) => {
            println!("s SATISFIABLE");
            if let Err(err) = write_model(path, &solver) {
                error!("Writing model for '{}': {}", path, err);
            }
        }
        Some(false) => println!("s UNSATISFIABLE"),
        None => println!("s UNKNOWN"),
    }
}

/// Write the model file next to `path`, replacing its extension with `.model`.
fn write_model(path: &str, solver: &Solver) -> io::Result<()> {
    let model_path = Path::new(path).with_extension("model");
    let mut file = fs::File::create(model_path)?;

    for lit in solver.model().unwrap() {
        writeln!(file, "{} : {}", lit.var().to_dimacs(), lit.is_positive() as u8)?;
    }

    Ok(())
}
