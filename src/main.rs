use anyhow::{bail, Context, Result};
use env_logger::Builder;
use process_scheduling::scheduler::{
    load_process_control_blocks, Algorithm, Comparison, DisplayTerminal, DEFAULT_QUANTUM,
};
use std::{env, io::Write, process::ExitCode};

const COMPARE_FLAG: &str = "--compare";

fn usage(program: &str) -> String {
    format!("{program} <pcb file> <FCFS|P|SJF|SRT|RR|{COMPARE_FLAG}> [quantum]")
}

fn parse_quantum(arg: Option<&String>, default: Option<usize>) -> Result<usize> {
    match (arg, default) {
        (Some(arg), _) => arg
            .parse()
            .with_context(|| format!("invalid quantum \"{arg}\"")),
        (None, Some(default)) => Ok(default),
        (None, None) => bail!("round robin needs a quantum"),
    }
}

fn compare(filename: &str, quantum: usize) -> Result<()> {
    let ready_queue = load_process_control_blocks(filename)
        .with_context(|| format!("failed to load {filename}"))?;

    let comparisons: Vec<Comparison> = Algorithm::ALL
        .into_iter()
        .map(|algorithm| Comparison {
            algorithm,
            outcome: algorithm.run(ready_queue.clone(), quantum),
        })
        .collect();

    let mut terminal = DisplayTerminal::new().context("failed to set up the terminal")?;
    loop {
        terminal.draw(filename, quantum, &comparisons)?;
        if terminal.should_quit() {
            break;
        }
    }
    Ok(())
}

fn simulate(filename: &str, algorithm: Algorithm, quantum: usize) -> Result<()> {
    let ready_queue = load_process_control_blocks(filename)
        .with_context(|| format!("failed to load {filename}"))?;
    let result = algorithm
        .run(ready_queue, quantum)
        .with_context(|| format!("{algorithm} scheduling failed"))?;

    println!("Algorithm: {algorithm}");
    println!("Average waiting time: {:.2}", result.average_waiting_time);
    println!(
        "Average turnaround time: {:.2}",
        result.average_turnaround_time
    );
    println!("Total run time: {}", result.total_run_time);
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let (filename, mode) = match args {
        [_, filename, mode, ..] => (filename, mode),
        _ => bail!("missing arguments"),
    };
    let quantum_arg = args.get(3);

    if mode == COMPARE_FLAG {
        let quantum = parse_quantum(quantum_arg, Some(DEFAULT_QUANTUM))?;
        return compare(filename, quantum);
    }

    let algorithm: Algorithm = mode.parse()?;
    let quantum = if algorithm.needs_quantum() {
        parse_quantum(quantum_arg, None)?
    } else {
        0
    };
    simulate(filename, algorithm, quantum)
}

fn main() -> ExitCode {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let args: Vec<String> = env::args().collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let program = args.first().map_or("process-scheduling", String::as_str);
            eprintln!("error: {err:#}");
            eprintln!("usage: {}", usage(program));
            ExitCode::FAILURE
        }
    }
}
