//! CLI command implementations
//!
//! Each command loads configuration, builds the record source and runs
//! the single fetch on a tokio runtime. Everything after the fetch is
//! synchronous.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};
use tokio::runtime::Runtime;

use crate::config::ViewConfig;
use crate::filter::Selection;
use crate::observability::{init_tracing, Event};
use crate::present::{render_table, ViewReport};
use crate::record::Field;
use crate::sort::{SortDirection, SortState};
use crate::source::{source_for, CachedRecordSource, RecordSource};
use crate::view::{load_session, reload, LoadState, ViewController};

use super::args::{Cli, Command, SourceArgs, ViewArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_requests, write_error, write_response, write_text};
use super::protocol::SessionCommand;

/// The source every command fetches through
pub type SessionSource = CachedRecordSource<Box<dyn RecordSource>>;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Show { source, view, json } => show(&source, &view, json),
        Command::Facets {
            source,
            field,
            json,
        } => facets(&source, &field, json),
        Command::Session { source } => session(&source),
    }
}

/// Loads the config file (if any) and applies flag overrides
pub fn load_config(args: &SourceArgs) -> CliResult<ViewConfig> {
    let mut config = ViewConfig::load_or_default(args.config.as_deref())?;
    if let Some(source) = &args.source {
        config.source = source.clone();
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    config.validate()?;
    Ok(config)
}

/// Fetch once and print one page
pub fn show(args: &SourceArgs, view_args: &ViewArgs, json: bool) -> CliResult<()> {
    let (config, runtime, source) = prepare(args)?;
    let mut controller = runtime.block_on(load_session(&source, &config));
    apply_view_args(&mut controller, view_args);

    let view = controller.view();
    if json {
        write_response(&mut io::stdout().lock(), ViewReport::new(&view).to_json())?;
    } else {
        write_text(&render_table(&view))?;
    }

    match view.error() {
        Some(err) => Err(CliError::Fetch(err.clone())),
        None => Ok(()),
    }
}

/// Fetch once and list the distinct values of a field
pub fn facets(args: &SourceArgs, field: &str, json: bool) -> CliResult<()> {
    let (config, runtime, source) = prepare(args)?;
    let controller = runtime.block_on(load_session(&source, &config));
    if let LoadState::Failed(err) = controller.load_state() {
        return Err(CliError::Fetch(err.clone()));
    }

    let field = Field::from_name(field);
    let values = controller.facet_values(&field);
    if json {
        write_response(
            &mut io::stdout().lock(),
            json!({ "field": field.as_str(), "values": values }),
        )?;
    } else {
        let mut text = values.join("\n");
        text.push('\n');
        write_text(&text)?;
    }
    Ok(())
}

/// Interactive session over stdin/stdout
pub fn session(args: &SourceArgs) -> CliResult<()> {
    let (config, runtime, source) = prepare(args)?;
    let mut controller = runtime.block_on(load_session(&source, &config));

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(
        &runtime,
        &source,
        &mut controller,
        stdin.lock(),
        &mut stdout.lock(),
    )
}

/// Serves session commands until `input` ends.
///
/// The current view is written first. A malformed command gets an error
/// line and the session carries on; only I/O failures end it.
pub fn run_session<S, R, W>(
    runtime: &Runtime,
    source: &S,
    controller: &mut ViewController,
    input: R,
    output: &mut W,
) -> CliResult<()>
where
    S: RecordSource + ?Sized,
    R: BufRead,
    W: Write,
{
    write_response(output, view_json(controller))?;

    for request in read_requests(input) {
        let command = match request.and_then(SessionCommand::from_value) {
            Ok(command) => command,
            Err(CliError::Io(e)) => return Err(CliError::Io(e)),
            Err(e) => {
                tracing::warn!(code = e.code(), error = %e, "rejected session command");
                write_error(output, e.code(), &e.to_string())?;
                continue;
            }
        };

        let data = execute(runtime, source, controller, command)?;
        write_response(output, data)?;
    }

    Ok(())
}

fn execute<S>(
    runtime: &Runtime,
    source: &S,
    controller: &mut ViewController,
    command: SessionCommand,
) -> CliResult<Value>
where
    S: RecordSource + ?Sized,
{
    match command {
        SessionCommand::Search { text } => {
            controller.set_search_text(text);
        }
        SessionCommand::Filter { field, value } => {
            controller.set_categorical_filter(Field::from_name(&field), Selection::parse(&value));
        }
        SessionCommand::Sort { field } => controller.click_sort_header(Field::from_name(&field)),
        SessionCommand::Page { page } => {
            controller.go_to_page(page);
        }
        SessionCommand::Next => {
            controller.next_page();
        }
        SessionCommand::Prev => {
            controller.previous_page();
        }
        SessionCommand::Show => {}
        SessionCommand::Facets { field } => {
            let field = Field::from_name(&field);
            let values = controller.facet_values(&field);
            return Ok(json!({ "field": field.as_str(), "values": values }));
        }
        SessionCommand::Summary => return Ok(serde_json::to_value(controller.summary())?),
        SessionCommand::Stats => return Ok(serde_json::to_value(controller.stats())?),
        SessionCommand::Reload => runtime.block_on(reload(controller, source)),
    }
    Ok(view_json(controller))
}

fn view_json(controller: &mut ViewController) -> Value {
    let view = controller.view();
    ViewReport::new(&view).to_json()
}

/// Applies one-shot view flags in the order a user would
fn apply_view_args(controller: &mut ViewController, args: &ViewArgs) {
    controller.set_search_text(args.search.clone());
    for (field, selection) in &args.filters {
        controller.set_categorical_filter(field.clone(), selection.clone());
    }
    if let Some(sort) = &args.sort {
        apply_sort(controller, sort);
    }
    controller.go_to_page(args.page);
}

/// Reaches a sort state through header clicks
fn apply_sort(controller: &mut ViewController, sort: &SortState) {
    let Some(field) = sort.field() else {
        return;
    };
    controller.click_sort_header(field.clone());
    if sort.direction() == SortDirection::Descending {
        controller.click_sort_header(field.clone());
    }
}

fn prepare(args: &SourceArgs) -> CliResult<(ViewConfig, Runtime, SessionSource)> {
    let config = load_config(args)?;
    init_tracing(&config.log_filter);
    tracing::info!(
        event = Event::ConfigLoaded.as_str(),
        source = %config.source,
        page_size = config.page_size,
        "configuration loaded"
    );

    let runtime = Runtime::new()
        .map_err(|e| CliError::Runtime(format!("Failed to create tokio runtime: {}", e)))?;
    let source = CachedRecordSource::new(
        source_for(&config.source, config.request_timeout()),
        config.cache_policy(),
    );
    Ok((config, runtime, source))
}
