//! Interactive operator console for the juicer simulation.
//!
//! Drives an in-process [`JuicerMachine`] through a read-eval loop:
//! every line is parsed into a [`Command`] and executed against the
//! machine. Unknown commands and domain failures print a message and
//! the loop continues; only end of input or `quit` leaves it.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use juicer_core::{JuicerConfig, JuicerError, JuicerMachine};
use juicer_types::{Fruit, MachineStatus};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{Command, FeedArgs, ParseError};

/// Interactive operator console for the juicer simulation.
#[derive(Parser, Debug)]
#[command(name = "juicer-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "juicer-config.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the
    /// configured level.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = JuicerConfig::from_file_or_default(&cli.config)
        .context("failed to load configuration")?;
    let level = cli.log_level.unwrap_or_else(|| config.logging.level.clone());

    // Logs go to stderr so the console output stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    let mut machine = JuicerMachine::new(&config.machine);

    println!("commercial citrus juicer console (machine {})", machine.id());
    print_help();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("juicer> ");
        stdout.flush().context("failed to flush prompt")?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            break;
        }

        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                debug!(?command, "dispatching");
                run_command(&mut machine, command);
            }
            Err(ParseError::Empty) => {}
            Err(err) => println!("error: {err}"),
        }
    }

    println!("goodbye");
    Ok(())
}

fn run_command(machine: &mut JuicerMachine, command: Command) {
    match command {
        Command::Start => report(machine.start(), "machine started"),
        Command::Stop => report(machine.stop(), "machine stopped"),
        Command::Feed(args) => feed(machine, &args),
        Command::Status => print_status(&machine.status()),
        Command::Metrics => print_metrics(machine),
        Command::Clean => {
            machine.clean();
            println!(
                "cleaning cycle complete ({} total)",
                machine.metrics().cleaning_cycles
            );
        }
        Command::Reset => {
            machine.reset_to_idle();
            println!("machine reset to idle");
        }
        Command::FaultPress => {
            machine.trigger_press_error();
            println!("press forced into error state");
        }
        Command::Help => print_help(),
        // quit is handled by the loop before dispatch
        Command::Quit => {}
    }
}

fn feed(machine: &mut JuicerMachine, args: &FeedArgs) {
    let fruit = match args.weight_grams {
        Some(weight) => match Fruit::new(args.fruit_type, args.size, args.ripeness, weight) {
            Ok(fruit) => fruit,
            Err(err) => {
                println!("error: {err}");
                return;
            }
        },
        None => Fruit::with_random_weight(args.fruit_type, args.size, args.ripeness, &mut rand::rng()),
    };

    println!(
        "feeding a {} {} {} ({} g)",
        args.ripeness,
        args.size,
        args.fruit_type,
        fruit.weight_grams()
    );
    match machine.feed_fruit(&fruit) {
        Ok(outcome) => {
            println!("juice: {}", outcome.juice);
            println!("waste: {} g", outcome.waste);
        }
        Err(err) => println!("error: {err}"),
    }
}

fn report(result: Result<(), JuicerError>, success: &str) {
    match result {
        Ok(()) => println!("{success}"),
        Err(err) => println!("error: {err}"),
    }
}

fn print_status(status: &MachineStatus) {
    println!("machine state: {}", status.state);
    println!(
        "juice tank:  {} of {} ({}% full)",
        status.juice_tank.volume, status.juice_tank.capacity, status.juice_tank.percentage
    );
    println!(
        "waste bin:   {} g of {} g ({}% full)",
        status.waste_bin.waste_grams, status.waste_bin.capacity_grams, status.waste_bin.percentage
    );
    println!(
        "press unit:  {} (presses {}, wear {}, efficiency {}%)",
        status.press_unit.state,
        status.press_unit.press_count,
        status.press_unit.wear_level,
        status.press_unit.efficiency_percentage
    );
    println!(
        "filter unit: {} (filters {}, clog {}, needs cleaning: {})",
        status.filter_unit.state,
        status.filter_unit.filter_count,
        status.filter_unit.clog_level,
        status.filter_unit.needs_cleaning
    );
}

fn print_metrics(machine: &JuicerMachine) {
    let metrics = machine.metrics();
    println!("fruits processed: {}", metrics.fruits_processed);
    println!("total juice:      {} ml", metrics.total_juice_ml);
    println!("total waste:      {} g", metrics.total_waste_grams);
    println!("cleaning cycles:  {}", metrics.cleaning_cycles);
    println!("errors:           {}", metrics.errors);
    println!(
        "press efficiency: {}%",
        machine.press_unit().efficiency_percentage()
    );
}

fn print_help() {
    println!("commands:");
    println!("  start                                 start the machine");
    println!("  stop                                  stop the machine");
    println!("  feed [type] [size] [ripeness] [g]     feed one fruit (e.g. feed orange medium ripe 150)");
    println!("  status                                show the machine status");
    println!("  metrics                               show production metrics");
    println!("  clean                                 run a cleaning cycle");
    println!("  reset                                 reset to idle after a fault");
    println!("  fault-press                           force the press into error");
    println!("  help                                  show this message");
    println!("  quit                                  leave the console");
    println!("fruit types: orange, lemon, grapefruit");
    println!("sizes: small, medium, large");
    println!("ripeness: unripe, ripe, overripe");
}
