use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{OnFailure, Step};

const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

pub fn run(host_only: bool) -> Result<()> {
    println!();
    println!("{}", "🔍 Checking DAI crates...".cyan().bold());
    println!();

    let total_start = Instant::now();

    let host: &[Step] = &[
        Step {
            label: "Checking workspace (host)",
            args: &["check", "--workspace", "--all-targets"],
            on_failure: OnFailure::Abort,
        },
        Step {
            label: "Checking tracing logging",
            args: &["check", "-p", "dai", "-p", "firmware", "--features", "tracing"],
            on_failure: OnFailure::Abort,
        },
    ];

    // The core and drivers must stay no_std; defmt is only meaningful there.
    let embedded: &[Step] = &[
        Step {
            label: "Checking platform (no_std)",
            args: &["check", "-p", "platform", "--target", EMBEDDED_TARGET],
            on_failure: OnFailure::Abort,
        },
        Step {
            label: "Checking dai (no_std + defmt)",
            args: &["check", "-p", "dai", "--target", EMBEDDED_TARGET, "--features", "defmt"],
            on_failure: OnFailure::Abort,
        },
        Step {
            label: "Checking firmware (no_std + defmt)",
            args: &["check", "-p", "firmware", "--target", EMBEDDED_TARGET, "--features", "defmt"],
            on_failure: OnFailure::Abort,
        },
    ];

    let hygiene: &[Step] = &[
        Step {
            label: "Running clippy lints",
            args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            on_failure: OnFailure::Warn,
        },
        Step {
            label: "Checking code formatting",
            args: &["fmt", "--all", "--check"],
            on_failure: OnFailure::Warn,
        },
    ];

    for step in host {
        step.run()?;
    }
    if host_only {
        println!("{}", format!("  ⚠ Skipping {EMBEDDED_TARGET} builds").yellow());
        println!();
    } else {
        for step in embedded {
            step.run()?;
        }
    }
    for step in hygiene {
        step.run()?;
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
