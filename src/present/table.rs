//! Plain-text table rendering

use std::fmt::Write;

use super::{format_cell, COLUMNS};
use crate::record::Field;
use crate::sort::{SortIndicator, SortState};
use crate::view::{DerivedView, ViewStatus};

const COLUMN_GAP: &str = "  ";

/// Renders a derived view for a terminal.
///
/// Loading and failed sessions render a status block instead of a table;
/// an empty filtered subset renders headers plus a "No loans found" note.
pub fn render_table(view: &DerivedView<'_>) -> String {
    let mut out = String::new();

    match view.status {
        ViewStatus::Loading => {
            out.push_str("Loading Portfolio Data\n");
            out.push_str("Fetching your loan information...\n");
            return out;
        }
        ViewStatus::Failed(err) => {
            out.push_str("Unable to Load Data\n");
            let _ = writeln!(out, "{} ({})", err, err.code());
            out.push_str("Reload to try again.\n");
            return out;
        }
        ViewStatus::Ready => {}
    }

    let headers: Vec<String> = COLUMNS
        .iter()
        .map(|(field, label)| header_label(label, &view.sort, field))
        .collect();
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|record| COLUMNS.iter().map(|(field, _)| format_cell(record, field)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    push_row(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    push_row(&mut out, &rule, &widths);

    if view.is_no_matches() {
        out.push('\n');
        out.push_str("No loans found\n");
        out.push_str("Try adjusting your filters to see more results\n");
        return out;
    }

    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    out.push('\n');
    if let Some((first, last, total)) = view.position.showing() {
        let _ = writeln!(out, "Showing {} to {} of {} results", first, last, total);
    }
    if view.position.show_controls() {
        out.push_str(&page_controls(view));
        out.push('\n');
    }

    out
}

fn header_label(label: &str, sort: &SortState, field: &Field) -> String {
    match sort.indicator(field) {
        SortIndicator::Unsorted => label.to_string(),
        SortIndicator::Ascending => format!("{} ^", label),
        SortIndicator::Descending => format!("{} v", label),
    }
}

fn page_controls(view: &DerivedView<'_>) -> String {
    let position = &view.position;
    let mut parts = Vec::new();

    parts.push(if position.has_previous() { "< Prev" } else { "  ----" }.to_string());
    for page in view.window.pages() {
        if page == position.page {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }
    if view.window.overflow {
        parts.push("...".to_string());
    }
    parts.push(if position.has_next() { "Next >" } else { "----  " }.to_string());

    let mut line = parts.join(" ");
    let _ = write!(line, "  (page {} of {})", position.page, position.total_pages);
    line
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        let pad = width.saturating_sub(cell.chars().count());
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
