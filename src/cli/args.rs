//! CLI argument definitions using clap
//!
//! Commands:
//! - loanview show [--search TEXT] [--filter FIELD=VALUE]... [--sort FIELD[:asc|:desc]] [--page N] [--json]
//! - loanview facets [--field FIELD] [--json]
//! - loanview session

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::filter::Selection;
use crate::record::Field;
use crate::sort::SortState;

/// loanview - Browse a loan portfolio feed from the terminal
#[derive(Parser, Debug)]
#[command(name = "loanview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where records come from and how they are paged
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Record feed URL or file path (overrides the config file)
    #[arg(long)]
    pub source: Option<String>,

    /// Records per page (overrides the config file)
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Initial view state for a one-shot render
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Case-insensitive text matched against every field
    #[arg(long, default_value = "")]
    pub search: String,

    /// Exact categorical filter; VALUE "all" clears it
    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(Field, Selection)>,

    /// Sort column, ascending unless ":desc" is given
    #[arg(long, value_name = "FIELD[:asc|:desc]", value_parser = parse_sort)]
    pub sort: Option<SortState>,

    /// Page to show, clamped to the available pages
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch records and print one page
    Show {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// Print a JSON report instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the distinct values of a field
    Facets {
        #[command(flatten)]
        source: SourceArgs,

        /// Field wire name
        #[arg(long, default_value = "PROPERTY_STATE")]
        field: String,

        /// Print JSON instead of one value per line
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: JSON commands on stdin, one JSON view per line on stdout
    Session {
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Parses `FIELD=VALUE`
pub fn parse_filter(arg: &str) -> Result<(Field, Selection), String> {
    let (field, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", arg))?;
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", arg));
    }
    Ok((Field::from_name(field), Selection::parse(value)))
}

/// Parses `FIELD`, `FIELD:asc` or `FIELD:desc`
pub fn parse_sort(arg: &str) -> Result<SortState, String> {
    let (field, direction) = match arg.rsplit_once(':') {
        Some((field, direction)) => (field, direction),
        None => (arg, "asc"),
    };
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", arg));
    }
    match direction {
        "asc" => Ok(SortState::asc(field)),
        "desc" => Ok(SortState::desc(field)),
        other => Err(format!("unknown sort direction '{}', expected asc or desc", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filter() {
        let (field, selection) = parse_filter("PROPERTY_STATE=CA").unwrap();
        assert_eq!(field, Field::PropertyState);
        assert_eq!(selection, Selection::Value("CA".into()));

        let (_, selection) = parse_filter("OWNERSHIP_TYPE=all").unwrap();
        assert!(selection.is_all());

        assert!(parse_filter("PROPERTY_STATE").is_err());
        assert!(parse_filter("=CA").is_err());
    }

    #[test]
    fn test_parse_sort() {
        let sort = parse_sort("ORIGINAL_LOAN_BAL").unwrap();
        assert_eq!(sort.field(), Some(&Field::OriginalLoanBal));
        assert_eq!(sort.direction(), SortDirection::Ascending);

        let sort = parse_sort("LOAN_ID:desc").unwrap();
        assert_eq!(sort.direction(), SortDirection::Descending);

        assert!(parse_sort("LOAN_ID:sideways").is_err());
    }

    #[test]
    fn test_show_arguments() {
        let cli = Cli::try_parse_from([
            "loanview",
            "show",
            "--source",
            "./loans.json",
            "--filter",
            "PROPERTY_STATE=CA",
            "--filter",
            "OWNERSHIP_TYPE=all",
            "--sort",
            "ORIGINAL_LOAN_BAL:desc",
            "--page",
            "2",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Command::Show { source, view, json } => {
                assert_eq!(source.source.as_deref(), Some("./loans.json"));
                assert_eq!(view.filters.len(), 2);
                assert_eq!(view.page, 2);
                assert!(view.sort.is_some());
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
