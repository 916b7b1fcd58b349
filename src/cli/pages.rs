//! Pages command handlers

use crate::cli::output::{format_page_detail, format_pages_json, format_pages_table, PageView};
use crate::cli::{PageIdArgs, PagesAddArgs, PagesEditArgs, PagesListArgs, PagesRemoveArgs, PagesShowArgs};
use crate::client::LightkeeperApi;
use crate::dashboard::Dashboard;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// Handle `lightkeeper pages list`
pub async fn handle_pages_list(
    args: &PagesListArgs,
    api: Arc<dyn LightkeeperApi>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut dashboard = Dashboard::new(api);
    let pages = dashboard.pages().await?;
    let views: Vec<PageView> = pages.iter().map(PageView::from).collect();

    if args.json {
        return Ok(format_pages_json(&views));
    }
    if views.is_empty() {
        return Ok("No pages monitored yet. Add one with: lightkeeper pages add".to_string());
    }
    Ok(format_pages_table(&views))
}

/// Handle `lightkeeper pages show`
pub async fn handle_pages_show(
    args: &PagesShowArgs,
    api: Arc<dyn LightkeeperApi>,
) -> Result<String, Box<dyn std::error::Error>> {
    let page = api.get_page(&args.id).await?;
    if args.json {
        return Ok(serde_json::to_string_pretty(&page)?);
    }
    Ok(format_page_detail(&page))
}

/// Handle `lightkeeper pages add`
pub async fn handle_pages_add(
    args: &PagesAddArgs,
    api: Arc<dyn LightkeeperApi>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut dashboard = Dashboard::new(api);
    dashboard.open_create();
    if let Some(form) = dashboard.form_mut() {
        form.name = args.name.clone();
        form.url = args.url.clone();
        form.env = args.env.clone();
        form.device = args.device;
        form.benchmark_score = args.benchmark;
        form.threshold_percentage = args.threshold;
    }

    let page = dashboard.submit().await?;
    Ok(format!(
        "{} Added page '{}' ({})\n  ID: {}",
        "✓".green(),
        page.name,
        page.url,
        page.id
    ))
}

/// Handle `lightkeeper pages edit`
///
/// Only the flags given change; everything else keeps its current value.
pub async fn handle_pages_edit(
    args: &PagesEditArgs,
    api: Arc<dyn LightkeeperApi>,
) -> Result<String, Box<dyn std::error::Error>> {
    if args.name.is_none()
        && args.url.is_none()
        && args.env.is_none()
        && args.device.is_none()
        && args.benchmark.is_none()
        && args.threshold.is_none()
    {
        return Err(
            "Nothing to change. Use --name, --url, --env, --device, --benchmark or --threshold."
                .into(),
        );
    }

    let mut dashboard = Dashboard::new(api);
    dashboard.open_edit(&args.id).await?;
    if let Some(form) = dashboard.form_mut() {
        if let Some(ref name) = args.name {
            form.name = name.clone();
        }
        if let Some(ref url) = args.url {
            form.url = url.clone();
        }
        if let Some(ref env) = args.env {
            form.env = env.clone();
        }
        if let Some(device) = args.device {
            form.device = device;
        }
        if let Some(benchmark) = args.benchmark {
            form.benchmark_score = benchmark;
        }
        if let Some(threshold) = args.threshold {
            form.threshold_percentage = threshold;
        }
    }

    let page = dashboard.submit().await?;
    Ok(format!("{} Updated page '{}'", "✓".green(), page.name))
}

/// Handle `lightkeeper pages toggle`
pub async fn handle_pages_toggle(
    args: &PageIdArgs,
    api: Arc<dyn LightkeeperApi>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut dashboard = Dashboard::new(api);
    let page = dashboard.toggle(&args.id).await?;
    let status = if page.is_enabled {
        "enabled".green()
    } else {
        "disabled".dimmed()
    };
    Ok(format!("{} '{}' is now {}", "✓".green(), page.name, status))
}

/// Handle `lightkeeper pages remove`
///
/// Asks on `input` unless `--yes` was given.
pub async fn handle_pages_remove<R: BufRead>(
    args: &PagesRemoveArgs,
    api: Arc<dyn LightkeeperApi>,
    input: &mut R,
) -> Result<String, Box<dyn std::error::Error>> {
    let page = api.get_page(&args.id).await?;
    let mut dashboard = Dashboard::new(api);
    dashboard.request_delete(&page.id);

    if !args.yes {
        let prompt = format!(
            "Stop monitoring '{}' ({})? Its audit history stays on the service. [y/N] ",
            page.name, page.url
        );
        if !confirm(&prompt, input)? {
            dashboard.cancel();
            return Ok("Cancelled".to_string());
        }
    }

    dashboard.confirm_delete().await?;
    Ok(format!("{} Removed page '{}'", "✓".green(), page.name))
}

/// Prints `prompt` and reads a yes/no answer. Anything but `y`/`yes` is no.
pub fn confirm<R: BufRead>(prompt: &str, input: &mut R) -> std::io::Result<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
