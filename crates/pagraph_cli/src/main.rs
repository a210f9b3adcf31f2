//! CLI smoke entry point.
//!
//! # Responsibility
//! - Run a snapshot file through projection, selection and the cascade
//!   without a host UI.
//! - Keep output deterministic JSON for quick local sanity checks.

use clap::Parser;
use log::info;
use pagraph_core::{
    init_logging, ControlRequest, ElementRef, GraphCommand, GraphSession, LogTarget,
    ObjectSnapshot, Preferences,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Replays graph commands against a snapshot and prints the result as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Snapshot JSON file
    snapshot: PathBuf,
    /// Preferences JSON file; defaults apply when absent
    #[arg(long)]
    prefs: Option<PathBuf>,
    /// Commands such as `down`, `mute`, `select:sink-0` or `swap:sinkInput-4:sink-1`
    commands: Vec<GraphCommand>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("pagraph: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    init_logging(pagraph_core::default_log_level(), LogTarget::Stderr)?;

    let preferences = match &args.prefs {
        Some(path) => Preferences::load(path).map_err(|err| err.to_string())?,
        None => Preferences::default(),
    };
    let raw = std::fs::read_to_string(&args.snapshot)
        .map_err(|err| format!("failed to read `{}`: {err}", args.snapshot.display()))?;
    let mut snapshot = ObjectSnapshot::from_json_str(&raw)
        .map_err(|err| format!("invalid snapshot `{}`: {err}", args.snapshot.display()))?;
    if snapshot.monitor_sources.is_empty() {
        snapshot.refresh_monitor_sources();
    }

    let mut session = GraphSession::new(preferences);
    session.reproject(Arc::new(snapshot));

    let mut requests: Vec<ControlRequest> = Vec::new();
    for command in args.commands {
        let outcome = session.dispatch(command, &mut requests);
        info!(
            "event=cli_command module=cli status=ok command={:?} outcome={:?}",
            command, outcome
        );
    }

    let projection = session.projection();
    let nodes: Vec<_> = projection
        .nodes()
        .map(|node| {
            let label = session
                .element_to_info(ElementRef::Node(node.id))
                .map(|info| info.label());
            serde_json::json!({ "node": node, "label": label })
        })
        .collect();
    let edges: Vec<_> = projection.edges().collect();
    let selection = session.selection().element_ref().map(|id| id.to_string());
    let report = serde_json::json!({
        "nodes": nodes,
        "edges": edges,
        "selection": selection,
        "requests": requests,
    });
    let rendered = serde_json::to_string_pretty(&report).map_err(|err| err.to_string())?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::{CommandFactory, Parser};
    use pagraph_core::{GraphCommand, VerticalDirection};
    use std::path::PathBuf;

    #[test]
    fn args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn flag_may_precede_the_snapshot_path() {
        let argv = ["pagraph", "--prefs", "p.json", "snap.json", "down", "mute"];
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.snapshot, PathBuf::from("snap.json"));
        assert_eq!(args.prefs, Some(PathBuf::from("p.json")));
        assert_eq!(
            args.commands,
            vec![
                GraphCommand::Navigate(VerticalDirection::Down),
                GraphCommand::ToggleMute
            ]
        );
    }

    #[test]
    fn unknown_commands_are_rejected_at_parse_time() {
        assert!(Args::try_parse_from(["pagraph", "snap.json", "jump"]).is_err());
        assert!(Args::try_parse_from(["pagraph"]).is_err());
    }
}
