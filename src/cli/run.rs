//! Run command handler

use crate::cli::output::format_run_result;
use crate::cli::RunArgs;
use crate::client::LightkeeperApi;
use crate::dashboard::Dashboard;
use crate::model::RunFilter;
use colored::Colorize;
use serde_json::json;
use std::sync::Arc;

/// Handle `lightkeeper run`
pub async fn handle_run(
    args: &RunArgs,
    api: Arc<dyn LightkeeperApi>,
) -> Result<String, Box<dyn std::error::Error>> {
    if args.all {
        let filter = RunFilter {
            url: args.url.clone(),
            device: args.device,
            env: args.env.clone(),
        };
        eprintln!("{}", "Running audits for all enabled pages...".dimmed());
        let ack = api.run_all(&filter).await?;
        if args.json {
            return Ok(serde_json::to_string_pretty(&json!({ "message": ack.message }))?);
        }
        return Ok(format!("{} {}", "✓".green(), ack.message));
    }

    let Some(page_id) = args.id.as_deref() else {
        return Err("A page ID or --all is required".into());
    };

    eprintln!("{}", "Running audit...".dimmed());
    let mut dashboard = Dashboard::new(api);
    let result = dashboard.run_audit(page_id).await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&json!({
            "page_id": page_id,
            "result": result,
        }))?);
    }
    Ok(format_run_result(page_id, &result))
}
