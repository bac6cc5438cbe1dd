//! Step-through demo for the element-combiner reducer.
//!
//! Usage:
//!   step-through [SCENARIO] [--debug]
//!   step-through --list

mod scenarios;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scenarios::{Scenario, Token};

#[derive(Parser)]
#[command(name = "step-through")]
#[command(about = "Runs a built-in scenario through the adjacent-element reducer")]
struct Cli {
    /// Scenario to run; runs every scenario when omitted
    scenario: Option<String>,

    /// Log every cycle's snapshot of the reducer's regions
    #[arg(long)]
    debug: bool,

    /// List the built-in scenarios and exit
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "info,element_combiner=trace"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.list {
        for scenario in scenarios::catalog() {
            println!("{:<10} {}", scenario.name, scenario.summary);
        }
        return Ok(());
    }

    let selected = match cli.scenario.as_deref() {
        Some(name) => vec![scenarios::find(name).with_context(|| {
            format!("unknown scenario `{name}`; use --list to see the available ones")
        })?],
        None => scenarios::catalog(),
    };

    for scenario in selected {
        run(scenario, cli.debug)?;
    }
    Ok(())
}

fn run(scenario: Scenario, debug: bool) -> anyhow::Result<()> {
    tracing::info!(scenario = scenario.name, "{}", scenario.summary);
    println!("INPUT:  {}", render(&scenario.input));

    let output = scenarios::builder()
        .input(scenario.input)
        .debug(debug)
        .run()
        .with_context(|| format!("scenario `{}` failed", scenario.name))?;

    println!("OUTPUT: {}", render(&output));
    if output != scenario.expected {
        bail!(
            "scenario `{}` produced {} instead of {}",
            scenario.name,
            render(&output),
            render(&scenario.expected)
        );
    }
    println!();
    Ok(())
}

fn render(tokens: &[Token]) -> String {
    let items: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}
