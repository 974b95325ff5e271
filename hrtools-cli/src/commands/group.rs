use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use hrtools_core::{AppState, ExportFormat, Group, GroupingPolicy, Result};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Shuffle the roster and split it into groups
    Run {
        /// Members per group
        #[arg(short, long, conflicts_with = "count")]
        size: Option<usize>,
        /// Number of groups
        #[arg(short, long)]
        count: Option<usize>,
    },
    /// Show the last grouping result
    Show,
    /// Write the last grouping result to a file
    Export {
        /// Output format (txt, csv)
        #[arg(short, long, default_value = "csv")]
        format: String,
        /// Output directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn handle_group_command(cmd: GroupCommands, state: &mut AppState) -> Result<()> {
    match cmd {
        GroupCommands::Run { size, count } => {
            let policy = resolve_policy(size, count, state.config().default_group_size);
            state.regroup(policy).await?;
            print_groups(state.groups());
        }

        GroupCommands::Show => print_groups(state.groups()),

        GroupCommands::Export { format, output } => {
            let format: ExportFormat = format.parse()?;
            let dir = output.unwrap_or_else(|| PathBuf::from("."));
            let path = export_groups(state, format, &dir).await?;
            println!("Exported {} groups to {}", state.groups().len(), path.display());
        }
    }

    Ok(())
}

pub(crate) fn resolve_policy(
    size: Option<usize>,
    count: Option<usize>,
    default_size: usize,
) -> GroupingPolicy {
    match (size, count) {
        (_, Some(count)) => GroupingPolicy::ByCount(count),
        (Some(size), None) => GroupingPolicy::BySize(size),
        (None, None) => GroupingPolicy::BySize(default_size),
    }
}

/// Render the groups and write them under `dir` with a date-stamped name.
pub(crate) async fn export_groups(
    state: &AppState,
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf> {
    let content = state.export(format)?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(state.export_filename(format));
    tokio::fs::write(&path, content).await?;

    tracing::info!("Wrote {} export to {}", format.extension(), path.display());
    Ok(path)
}

pub(crate) fn print_groups(groups: &[Group]) {
    if groups.is_empty() {
        println!("No groups yet.");
        println!("Create some with: hrtools group run --size 4");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Group", "Size", "Members"]);

    for group in groups {
        table.add_row(vec![
            group.ordinal.to_string(),
            group.len().to_string(),
            group.member_names().join(", "),
        ]);
    }

    println!("{}", table);
}
