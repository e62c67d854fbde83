use coalescence::{proof, *};
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    path::PathBuf,
};

const HISTORY: &str = ".coalescence_history";

/// What to print for each formula.
struct Opts {
    dot: Option<PathBuf>,
    tokens: bool,
    witness: bool,
}

/// Prove one formula and print the result.
///
/// Parse errors and unprovable formulas are reported and are not fatal;
/// an inconsistency of the engine is.
fn process(opts: &Opts, line: &str) -> anyhow::Result<()> {
    let e = match parse_formula(line) {
        Ok(e) => e,
        Err(err) => {
            log::error!("{}", err);
            return Ok(());
        }
    };
    log::info!("formula: {}", e);

    let tokens = match coalesce(&e) {
        Verdict::Provable(tokens) => tokens,
        Verdict::NotProvable(reason) => {
            println!("not provable: {}", e);
            println!("  ({})", reason);
            return Ok(());
        }
    };

    println!("provable: {}", e);
    if opts.tokens {
        println!("  {} tokens; {}", tokens.len(), tokens.stats());
    }

    let p = match extract(&Place::singleton(e.clone()), &tokens) {
        Ok(p) => p,
        Err(err) => {
            log::error!("{}", err.to_string_with_src());
            return Err(err.into());
        }
    };

    if opts.witness {
        print!("{}", proof::print_witness(&p));
    } else {
        print!("{}", proof::print_proof(&p));
    }

    if let Some(dir) = &opts.dot {
        let mut h = DefaultHasher::new();
        e.hash(&mut h);
        let file = dir.join(format!("{:x}.gv", h.finish()));
        std::fs::write(&file, proof::proof_to_dot(&p))?;
        log::info!("wrote graph to {:?}", file);
    }
    Ok(())
}

/// Feed each formula line to `f`, skipping blank and comment lines.
///
/// Stops at the first error, without reading further lines.
fn run_lines<I, F>(lines: I, mut f: F) -> anyhow::Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(&str) -> anyhow::Result<()>,
{
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        f(line)?;
    }
    Ok(())
}

fn run_file(opts: &Opts, file: &str) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)?;
    run_lines(content.lines(), |line| process(opts, line))
}

fn run_repl(opts: &Opts) -> anyhow::Result<()> {
    let mut rl = rustyline::Editor::<()>::new();
    if rl.load_history(HISTORY).is_err() {
        log::info!("No previous history.");
    }

    let lines = std::iter::from_fn(|| match rl.readline("ψ> ") {
        Ok(line) => {
            if !line.trim().is_empty() {
                rl.add_history_entry(line.as_str());
            }
            Some(line)
        }
        Err(rustyline::error::ReadlineError::Interrupted) => {
            println!("CTRL-C");
            None
        }
        Err(rustyline::error::ReadlineError::Eof) => {
            println!("CTRL-D");
            None
        }
        Err(err) => {
            println!("Error: {:?}", err);
            None
        }
    });
    // history is saved even when a fatal error ends the session
    let res = run_lines(lines, |line| process(opts, line));
    if let Err(e) = rl.save_history(HISTORY) {
        log::error!("cannot save history: {}", e);
    }
    res
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("start cli");

    let mut args = pico_args::Arguments::from_env();
    let opts = Opts {
        tokens: args.contains("--tokens"),
        witness: args.contains("--witness"),
        dot: args
            .opt_value_from_str::<&str, String>("--dot")?
            .map(PathBuf::from),
    };
    let file = args.opt_value_from_str::<&str, String>("--file")?;

    if let Some(dir) = &opts.dot {
        std::fs::create_dir_all(dir)?;
    }

    match file {
        Some(f) => run_file(&opts, &f),
        None => run_repl(&opts),
    }
}
