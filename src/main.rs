use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::PathBuf;

use estate_maps::export::{export_csv, export_json};
use estate_maps::model::HierarchyScope;
use estate_maps::parser::load_envelope;
use estate_maps::resolve::{resolve_envelope, ProjectGraph};
use estate_maps::sync::{plan_batch_sync, ExistingStore};
use estate_maps::table::{project_rows, PriceOrder, TableFilter};
use estate_maps::ui::App;

#[derive(Parser, Debug)]
#[command(name = "estate-maps")]
#[command(about = "Estate Maps - resolve floor-plan regions, linked maps and locality tables")]
#[command(version)]
struct Args {
    /// Path to the project payload (envelope or bare project JSON)
    #[arg(required = true)]
    payload: PathBuf,

    /// Export the locality table to CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export the resolved project to JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Print the ranked project hierarchy and exit
    #[arg(long)]
    order: bool,

    /// Print the persistence sync plan for the batch and exit
    #[arg(long)]
    sync_plan: bool,

    /// Table scope: current | hierarchy (defaults to the payload's setting)
    #[arg(long)]
    scope: Option<String>,

    /// Filter rows by a search term
    #[arg(long)]
    search: Option<String>,

    /// Filter rows by exact status id
    #[arg(long)]
    status: Option<String>,

    /// Order rows by price: asc | desc
    #[arg(long)]
    price: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let envelope = load_envelope(&args.payload)?;
    let scope = match args.scope.as_deref() {
        Some("current") => HierarchyScope::Current,
        Some("hierarchy") => HierarchyScope::Hierarchy,
        Some(other) => return Err(eyre!("unknown scope '{other}' (use current|hierarchy)")),
        None => envelope.project.table_scope(),
    };

    if args.order {
        let graph = ProjectGraph::from_envelope(&envelope);
        let batch: Vec<_> = graph.projects().collect();
        for entry in estate_maps::resolve::order_projects(&batch) {
            println!("{:>3}. {}{} ({})", entry.rank, "  ".repeat(entry.depth), entry.name, entry.id);
        }
        return Ok(());
    }

    if args.sync_plan {
        let graph = ProjectGraph::from_envelope(&envelope);
        let batch: Vec<_> = graph.projects().collect();
        let plan = plan_batch_sync(&ExistingStore::default(), &batch);
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let resolved = resolve_envelope(&envelope, scope);

    if let Some(csv_path) = &args.csv {
        let filter = TableFilter {
            search: args.search.clone(),
            status: args.status.clone(),
            price_order: match args.price.as_deref() {
                Some("asc") => Some(PriceOrder::Ascending),
                Some("desc") => Some(PriceOrder::Descending),
                Some(other) => return Err(eyre!("unknown price order '{other}' (use asc|desc)")),
                None => None,
            },
        };
        let rows = project_rows(&resolved.localities, &filter);
        export_csv(&rows, csv_path)?;
        println!("Exported to CSV: {}", csv_path.display());
    }

    if let Some(json_path) = &args.json {
        export_json(&resolved, json_path)?;
        println!("Exported to JSON: {}", json_path.display());
    }

    if args.csv.is_some() || args.json.is_some() {
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = App::new(envelope, scope).run(terminal);
    ratatui::restore();
    result
}
