//! Interactive dashboard session
//!
//! A line-oriented loop over the [`Dashboard`] controller: the page table is
//! re-rendered after every mutation, forms are filled one prompt per field,
//! and failures show as alerts without leaving the session.

use crate::cli::output::{format_alert, format_pages_table, format_run_result, PageView};
use crate::cli::trends::format_trends;
use crate::config::DisplayConfig;
use crate::dashboard::{Dashboard, DashboardError, PageForm, UiState};
use crate::model::{DeviceType, Page};
use crate::trends::load_trends;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

type SessionResult<T> = Result<T, Box<dyn std::error::Error>>;

const HELP: &str = "\
Commands:
  list               Show the page list
  add                Add a page
  edit <page>        Edit a page
  toggle <page>      Enable or disable scheduled audits
  delete <page>      Stop monitoring a page
  run <page>         Run an audit now
  dismiss            Hide the last audit result
  trends <page>      Show audit history charts
  help               Show this help
  quit               Leave the dashboard

<page> is a row number from the list or a page ID.";

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    List,
    Add,
    Edit(&'a str),
    Toggle(&'a str),
    Delete(&'a str),
    Run(&'a str),
    Dismiss,
    Trends(&'a str),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Command::Empty;
        };
        let target = parts.next();

        let needs_target = |make: fn(&'a str) -> Command<'a>| match target {
            Some(t) => make(t),
            None => Command::Invalid(format!("Usage: {} <page>", verb)),
        };

        match verb.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "add" | "new" => Command::Add,
            "edit" => needs_target(Command::Edit),
            "toggle" => needs_target(Command::Toggle),
            "delete" | "rm" => needs_target(Command::Delete),
            "run" => needs_target(Command::Run),
            "dismiss" => Command::Dismiss,
            "trends" => needs_target(Command::Trends),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Invalid(format!("Unknown command: {}. Type 'help'.", other)),
        }
    }
}

/// Resolves a row number or page ID against the last rendered list.
fn resolve_page<'p>(pages: &'p [Page], reference: &str) -> Option<&'p Page> {
    if let Ok(row) = reference.parse::<usize>() {
        if let Some(page) = row.checked_sub(1).and_then(|i| pages.get(i)) {
            return Some(page);
        }
    }
    pages.iter().find(|p| p.id == reference)
}

/// Interactive session state: the controller plus its I/O.
pub struct Session<'o, R, W> {
    dashboard: Dashboard,
    lines: Lines<R>,
    out: &'o mut W,
    display: DisplayConfig,
}

impl<'o, R, W> Session<'o, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(dashboard: Dashboard, input: R, out: &'o mut W, display: DisplayConfig) -> Self {
        Self {
            dashboard,
            lines: input.lines(),
            out,
            display,
        }
    }

    /// Runs until `quit` or end of input.
    ///
    /// If the first page-list fetch fails the session prints the
    /// unavailable message and ends; there is no retry.
    pub async fn run(mut self) -> SessionResult<()> {
        self.loading("Loading pages...")?;
        if let Err(e) = self.dashboard.pages().await {
            writeln!(self.out, "{}", e.to_string().red().bold())?;
            return Ok(());
        }
        self.render().await?;
        writeln!(self.out, "{}", "Type 'help' for commands.".dimmed())?;

        loop {
            write!(self.out, "{} ", "lightkeeper>".bold())?;
            self.out.flush()?;
            let Some(line) = self.lines.next_line().await? else {
                break;
            };

            match Command::parse(&line) {
                Command::Empty => {}
                Command::Quit => break,
                Command::Help => writeln!(self.out, "{}", HELP)?,
                Command::Invalid(message) => writeln!(self.out, "{}", message)?,
                Command::List => self.render().await?,
                Command::Add => {
                    self.dashboard.open_create();
                    self.fill_and_submit().await?;
                }
                Command::Edit(reference) => {
                    let Some(id) = self.page_id(reference)? else { continue };
                    match self.dashboard.open_edit(&id).await {
                        Ok(()) => self.fill_and_submit().await?,
                        Err(e) => self.alert(&e)?,
                    }
                }
                Command::Toggle(reference) => {
                    let Some(id) = self.page_id(reference)? else { continue };
                    match self.dashboard.toggle(&id).await {
                        Ok(_) => self.render().await?,
                        Err(e) => self.alert(&e)?,
                    }
                }
                Command::Delete(reference) => {
                    let Some(id) = self.page_id(reference)? else { continue };
                    self.delete(&id).await?;
                }
                Command::Run(reference) => {
                    let Some(id) = self.page_id(reference)? else { continue };
                    self.loading("Running audit...")?;
                    match self.dashboard.run_audit(&id).await {
                        Ok(_) => self.render().await?,
                        Err(e) => self.alert(&e)?,
                    }
                }
                Command::Dismiss => {
                    self.dashboard.dismiss_result();
                    self.render().await?;
                }
                Command::Trends(reference) => {
                    let Some(id) = self.page_id(reference)? else { continue };
                    self.loading("Loading audit history...")?;
                    match load_trends(self.dashboard.api(), &id).await {
                        Ok(report) => {
                            let rendered = format_trends(
                                &report,
                                self.display.chart_width,
                                self.display.chart_height,
                            );
                            writeln!(self.out, "{}", rendered)?;
                        }
                        Err(e) => writeln!(self.out, "{}", format_alert(&e.to_string()))?,
                    }
                }
            }
        }

        writeln!(self.out, "Bye")?;
        Ok(())
    }

    fn loading(&mut self, message: &str) -> SessionResult<()> {
        writeln!(self.out, "{}", message.dimmed())?;
        self.out.flush()?;
        Ok(())
    }

    fn alert(&mut self, error: &DashboardError) -> SessionResult<()> {
        tracing::debug!(error = %error, "Dashboard action failed");
        writeln!(self.out, "{}", format_alert(&error.alert()))?;
        Ok(())
    }

    /// Page list followed by the result panel, if one is showing.
    async fn render(&mut self) -> SessionResult<()> {
        if !self.dashboard.is_fresh() {
            self.loading("Loading pages...")?;
        }
        let table = match self.dashboard.pages().await {
            Ok(pages) if pages.is_empty() => {
                "No pages monitored yet. Type 'add' to create one.".to_string()
            }
            Ok(pages) => {
                let views: Vec<PageView> = pages.iter().map(PageView::from).collect();
                format_pages_table(&views)
            }
            Err(e) => {
                self.alert(&e)?;
                return Ok(());
            }
        };
        writeln!(self.out, "{}", table)?;

        if let UiState::ResultShown { page_id, result } = self.dashboard.state() {
            writeln!(self.out, "{}", format_run_result(page_id, result))?;
        }
        Ok(())
    }

    /// Resolves a page reference, printing a message when it matches nothing.
    fn page_id(&mut self, reference: &str) -> SessionResult<Option<String>> {
        let pages = self.dashboard.cached_pages().unwrap_or_default();
        match resolve_page(pages, reference) {
            Some(page) => Ok(Some(page.id.clone())),
            None => {
                writeln!(self.out, "No page '{}'. Use a row number or ID.", reference)?;
                Ok(None)
            }
        }
    }

    /// Reads one line. Blank keeps `current`. End of input yields `None`.
    async fn ask(&mut self, label: &str, current: &str) -> SessionResult<Option<String>> {
        if current.is_empty() {
            write!(self.out, "  {}: ", label)?;
        } else {
            write!(self.out, "  {} [{}]: ", label, current)?;
        }
        self.out.flush()?;
        let Some(line) = self.lines.next_line().await? else {
            return Ok(None);
        };
        let line = line.trim();
        Ok(Some(if line.is_empty() {
            current.to_string()
        } else {
            line.to_string()
        }))
    }

    /// Asks until the answer parses. `None` on end of input.
    async fn ask_parsed<T>(&mut self, label: &str, current: T) -> SessionResult<Option<T>>
    where
        T: std::str::FromStr + std::fmt::Display,
    {
        loop {
            let Some(answer) = self.ask(label, &current.to_string()).await? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "  Invalid {}: {}", label, answer)?,
            }
        }
    }

    /// Prompts for every form field, starting from the form's prefill.
    async fn prompt_form(&mut self, form: PageForm) -> SessionResult<Option<PageForm>> {
        let Some(name) = self.ask("Page name", &form.name).await? else { return Ok(None) };
        let Some(url) = self.ask("Target URL", &form.url).await? else { return Ok(None) };
        let Some(env) = self.ask("Environment", &form.env).await? else { return Ok(None) };
        let Some(device) = self.ask_parsed::<DeviceType>("Device", form.device).await? else {
            return Ok(None);
        };
        let Some(benchmark_score) = self.ask_parsed("Benchmark score", form.benchmark_score).await?
        else {
            return Ok(None);
        };
        let Some(threshold_percentage) =
            self.ask_parsed("Threshold %", form.threshold_percentage).await?
        else {
            return Ok(None);
        };

        Ok(Some(PageForm {
            name,
            url,
            env,
            device,
            benchmark_score,
            threshold_percentage,
        }))
    }

    /// Fills the open modal and submits it. A failed save keeps the modal
    /// and the user's input; the user can retry or abandon it.
    async fn fill_and_submit(&mut self) -> SessionResult<()> {
        loop {
            let Some(prefill) = self.dashboard.form_mut().map(|f| f.clone()) else {
                return Ok(());
            };
            let Some(filled) = self.prompt_form(prefill).await? else {
                self.dashboard.close_modal();
                return Ok(());
            };
            if let Some(form) = self.dashboard.form_mut() {
                *form = filled;
            }

            match self.dashboard.submit().await {
                Ok(page) => {
                    writeln!(self.out, "{} Saved '{}'", "✓".green(), page.name)?;
                    return self.render().await;
                }
                Err(e) => {
                    self.alert(&e)?;
                    write!(self.out, "Edit and retry? [y/N] ")?;
                    self.out.flush()?;
                    let retry = self
                        .lines
                        .next_line()
                        .await?
                        .map(|a| matches!(a.trim().to_lowercase().as_str(), "y" | "yes"))
                        .unwrap_or(false);
                    if !retry {
                        self.dashboard.close_modal();
                        return Ok(());
                    }
                }
            }
        }
    }

    async fn delete(&mut self, page_id: &str) -> SessionResult<()> {
        let name = self
            .dashboard
            .cached_pages()
            .and_then(|pages| pages.iter().find(|p| p.id == page_id))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| page_id.to_string());

        self.dashboard.request_delete(page_id);
        write!(self.out, "Stop monitoring '{}'? [y/N] ", name)?;
        self.out.flush()?;

        let confirmed = self
            .lines
            .next_line()
            .await?
            .map(|a| matches!(a.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false);
        if !confirmed {
            self.dashboard.cancel();
            writeln!(self.out, "Cancelled")?;
            return Ok(());
        }

        match self.dashboard.confirm_delete().await {
            Ok(_) => self.render().await,
            Err(e) => self.alert(&e),
        }
    }
}
