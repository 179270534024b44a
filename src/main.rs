mod file_io;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use seatplan_core::{element_bounds, Element, ElementKind, PlanStore, SeatPlan, SeatStatus};
use seatplan_session::EditorConfig;

/// Seating-chart plan tooling
#[derive(Parser, Debug)]
#[command(name = "seatplan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Editor configuration (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an empty plan with the stock categories
    New {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Plan name
        #[arg(long)]
        name: Option<String>,
    },
    /// Write the sample theatre
    Sample {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Summarize a plan and check it
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Regenerate every row's seats, validate and write the result
    Normalize {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output file (defaults to overwriting FILE)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    match args.command {
        Command::New { file, name } => {
            let mut plan = SeatPlan::new_default();
            if let Some(name) = name {
                plan.name = name;
            }
            file_io::save_plan(&plan, &file)?;
            info!(?file, "wrote empty plan");
        }
        Command::Sample { file } => {
            file_io::save_plan(&SeatPlan::sample(), &file)?;
            info!(?file, "wrote sample plan");
        }
        Command::Inspect { file } => {
            let plan = file_io::read_plan(&file)?;
            print!("{}", summarize(&plan));
            if let Err(err) = plan.validate() {
                println!("invalid: {err:#}");
                std::process::exit(1);
            }
            println!("valid");
        }
        Command::Normalize { file, output } => {
            let plan = file_io::read_plan(&file)?;
            let mut store = PlanStore::with_limits(plan, config.limits.clone());
            let dangling = store.repair();
            store.plan().validate()?;
            let out = output.unwrap_or(file);
            file_io::save_plan(store.plan(), &out)?;
            println!(
                "normalized {} rows, dropped {} dangling seats -> {}",
                store.plan().rows().count(),
                dangling,
                out.display()
            );
        }
    }
    Ok(())
}

/// Human-readable overview of a plan
fn summarize(plan: &SeatPlan) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", plan.name, plan.id));
    out.push_str(&format!(
        "canvas {}x{}, zoom {}\n",
        plan.meta.canvas_width, plan.meta.canvas_height, plan.meta.zoom
    ));

    let mut per_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for element in &plan.elements {
        *per_kind.entry(element.kind().name()).or_default() += 1;
    }
    let kinds: Vec<String> = per_kind.iter().map(|(k, n)| format!("{n} {k}")).collect();
    out.push_str(&format!("elements: {}\n", kinds.join(", ")));

    out.push_str("categories:\n");
    for category in plan.categories.values() {
        let seats = plan.seats().filter(|s| s.category == category.id).count();
        out.push_str(&format!(
            "  {} {} {} ({} seats)\n",
            category.id, category.label, category.color, seats
        ));
    }

    let rows: Vec<&Element> = plan
        .elements
        .iter()
        .filter(|e| e.kind() == ElementKind::Row)
        .collect();
    if !rows.is_empty() {
        out.push_str("rows:\n");
    }
    for element in rows {
        let Element::Row(row) = element else {
            continue;
        };
        let unavailable = plan
            .seats_of(&row.id)
            .filter(|s| s.status == SeatStatus::Unavailable)
            .count();
        let extent = element_bounds(element)
            .map(|b| format!("{:.0}x{:.0}", b.width(), b.height()))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {} '{}' {} seats ({} unavailable), spacing {}, orientation {}, curvature {}, {}\n",
            row.id,
            row.label,
            row.seat_count,
            unavailable,
            row.spacing,
            row.orientation,
            row.curvature.unwrap_or(0.0),
            extent
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_rows_and_categories() {
        let summary = summarize(&SeatPlan::sample());
        assert!(summary.contains("Sample theatre"));
        assert!(summary.contains("3 row, 28 seat, 1 text, 1 zone"));
        assert!(summary.contains("row-vip 'VIP' 6 seats (1 unavailable)"));
        assert!(summary.contains("orchestre Orchestre #3b82f6 (10 seats)"));
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from(["seatplan", "normalize", "in.json", "-o", "out.json"]).unwrap();
        match args.command {
            Command::Normalize { file, output } => {
                assert_eq!(file, PathBuf::from("in.json"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
