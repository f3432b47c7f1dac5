//! # Dining Table
//!
//! Runs a table of philosophers until SIGINT/SIGTERM (or `--run-for-ms`), printing
//! each event as a line on stdout and logging through `tracing` on stderr.

use clap::Parser;
use dining_table::config::TableConfig;
use dining_table::framework::SleepOutcome;
use dining_table::lifecycle::{setup_tracing, shutdown_on_signal, DiningSystem};
use dining_table::model::EventSink;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "dining-table")]
#[command(about = "Run the dining philosophers until interrupted", long_about = None)]
struct Cli {
    /// TOML config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of philosophers (and utensils), at least 2
    #[arg(long)]
    seats: Option<usize>,

    #[arg(long)]
    think_min_ms: Option<u64>,

    #[arg(long)]
    think_max_ms: Option<u64>,

    #[arg(long)]
    eat_min_ms: Option<u64>,

    #[arg(long)]
    eat_max_ms: Option<u64>,

    /// Wait this long for the second utensil instead of probing once
    #[arg(long)]
    second_wait_ms: Option<u64>,

    /// Stop the dinner after this long, as if interrupted
    #[arg(long)]
    run_for_ms: Option<u64>,

    /// Do not print events to stdout
    #[arg(short, long)]
    quiet: bool,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut TableConfig) {
        if let Some(seats) = self.seats {
            config.seats = seats;
        }
        let timing = &mut config.timing;
        if let Some(ms) = self.think_min_ms {
            timing.think_min_ms = ms;
        }
        if let Some(ms) = self.think_max_ms {
            timing.think_max_ms = ms;
        }
        if let Some(ms) = self.eat_min_ms {
            timing.eat_min_ms = ms;
        }
        if let Some(ms) = self.eat_max_ms {
            timing.eat_max_ms = ms;
        }
        if self.second_wait_ms.is_some() {
            config.second_wait_ms = self.second_wait_ms;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TableConfig::load_from_file(path)
            .await
            .map_err(|e| e.to_string())?,
        None => TableConfig::default(),
    };
    cli.apply(&mut config);
    config.validate().map_err(|e| e.to_string())?;

    if cli.print_config {
        print!("{}", config.to_toml_string().map_err(|e| e.to_string())?);
        return Ok(());
    }

    let (events, console) = if cli.quiet {
        (EventSink::disabled(), None)
    } else {
        let (events, mut receiver) = EventSink::channel();
        let console = tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                println!("{event}");
            }
        });
        (events, Some(console))
    };

    let system = DiningSystem::from_config(&config, events).map_err(|e| e.to_string())?;
    let shutdown = system.shutdown_handle();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    if let Some(ms) = cli.run_for_ms {
        tokio::spawn(async move {
            if shutdown.sleep(Duration::from_millis(ms)).await == SleepOutcome::Completed {
                info!(after_ms = ms, "Run time elapsed");
                shutdown.request_shutdown();
            }
        });
    }

    let summary = system.join().await.map_err(|e| e.to_string())?;

    // Every sender is gone once the philosophers have left, so the printer drains and stops
    if let Some(console) = console {
        let _ = console.await;
    }

    for report in &summary.reports {
        info!(
            seat = report.index,
            meals = report.meals,
            aborted = report.aborted_attempts,
            "Report"
        );
    }
    info!(total_meals = summary.total_meals(), "Application completed successfully");
    Ok(())
}
