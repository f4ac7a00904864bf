//! `list` command implementation.

use anyhow::{Context, Result};
use contracts::FlightSession;
use logbook::{Reconciler, SessionSummary};
use serde::Serialize;
use tracing::info;

use super::{load_config, log_path};
use crate::cli::ListArgs;

/// One logbook row for JSON output
#[derive(Serialize)]
struct ListEntry<'a> {
    #[serde(flatten)]
    summary: SessionSummary,
    duration_s: Option<i64>,
    session: &'a FlightSession,
}

/// Execute the `list` command
pub fn run_list(args: &ListArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let log = log_path(&config, args.log.as_ref());

    let mut sessions = Reconciler::new(&config.reconciler).reconcile_file(&log);
    let total = sessions.len();
    if let Some(limit) = args.limit {
        sessions.truncate(limit);
    }
    info!(log = %log.display(), total, shown = sessions.len(), "Logbook rebuilt");

    if args.json {
        let entries: Vec<ListEntry<'_>> = sessions
            .iter()
            .map(|session| ListEntry {
                summary: SessionSummary::from_session(session),
                duration_s: session.duration_seconds(),
                session,
            })
            .collect();
        let json =
            serde_json::to_string_pretty(&entries).context("Failed to serialize logbook")?;
        println!("{}", json);
    } else {
        print!("{}", render_text(&sessions, total));
    }

    Ok(())
}

fn render_text(sessions: &[FlightSession], total: usize) -> String {
    if sessions.is_empty() {
        return "No flights logged.\n".to_string();
    }

    let mut out = String::new();
    for session in sessions {
        out.push_str(&SessionSummary::from_session(session).to_string());
        out.push_str("\n\n");
    }
    if sessions.len() < total {
        out.push_str(&format!("({} of {} flights shown)\n", sessions.len(), total));
    }
    out
}
