//! Plain-text rendering of the view model.
//!
//! The table layout prints one line per record with facet columns grouped
//! under their section titles; the list layout prints one card per
//! materialized row.

use std::fmt::Write as _;

use serde::Serialize;
use verifier_core::presentation::{
    FacetCell, ListLayout, RecordRow, ResultsLayout, StatusBadge, TableLayout, Tone,
};
use verifier_core::{
    AppViewModel, FacetGroup, FailureKind, Notice, NoticeSeverity, PhaseView,
    VERIFY_FAILED_MESSAGE,
};

const COLUMN_GAP: &str = "  ";

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    if let Some(summary) = view.summary {
        let _ = writeln!(
            out,
            "Summary: {} total | {} valid | {} invalid",
            summary.total(),
            summary.valid(),
            summary.invalid()
        );
        let _ = writeln!(out, "Errors: {}", view.error_count);
    }
    if view.failed_submissions > 0 {
        let _ = writeln!(out, "Failed submissions: {}", view.failed_submissions);
    }

    match &view.results {
        Some(ResultsLayout::Table(table)) => {
            out.push('\n');
            out.push_str(&render_table(table));
        }
        Some(ResultsLayout::List(list)) => {
            out.push('\n');
            out.push_str(&render_list(list));
        }
        None if view.phase == PhaseView::Succeeded => {
            out.push_str("No records returned.\n");
        }
        None => {}
    }

    out
}

pub fn render_notice(notice: &Notice) -> String {
    let prefix = match notice.severity {
        NoticeSeverity::Warning => "warning",
        NoticeSeverity::Error => "error",
    };
    format!("{prefix}: {}", notice.message)
}

#[derive(Serialize)]
struct FailureDocument {
    error: &'static str,
    message: &'static str,
}

/// Machine-readable stand-in for the report when a submission fails.
pub fn render_failure_json(kind: FailureKind) -> serde_json::Result<String> {
    let error = match kind {
        FailureKind::Unavailable => "unavailable",
        FailureKind::InvalidResponse => "invalid_response",
    };
    serde_json::to_string_pretty(&FailureDocument {
        error,
        message: VERIFY_FAILED_MESSAGE,
    })
}

/// Status line while a request is in flight.
pub fn render_progress(view: &AppViewModel) -> Option<String> {
    match &view.phase {
        PhaseView::Pending {
            failed_attempts: 0,
            ..
        } => Some(view.submit_label.to_string()),
        PhaseView::Pending {
            failed_attempts,
            max_attempts,
            last_error,
        } => {
            let max = max_attempts.map_or_else(|| "?".to_string(), |max| max.to_string());
            let cause = last_error
                .as_deref()
                .map(|reason| format!(" ({reason})"))
                .unwrap_or_default();
            Some(format!(
                "{} attempt {failed_attempts} of {max} failed{cause}, retrying",
                view.submit_label
            ))
        }
        _ => None,
    }
}

fn render_table(table: &TableLayout) -> String {
    let mut columns = vec![
        Column::new("#", table.rows.iter().map(|row| (row.index + 1).to_string())),
        Column::new("Email", table.rows.iter().map(|row| row.email.clone())),
        Column::new("Status", table.rows.iter().map(status_text)),
    ];
    let facet_start = columns.len();
    let mut spans = Vec::new();
    for group in FacetGroup::ALL {
        let first = columns.len();
        if let Some(sample) = table.rows.first() {
            for cell in sample.facets_in(group) {
                let facet = cell.facet;
                columns.push(Column::new(
                    facet.label(),
                    table.rows.iter().map(|row| {
                        row.facets
                            .iter()
                            .find(|c| c.facet == facet)
                            .map(cell_text)
                            .unwrap_or_default()
                    }),
                ));
            }
        }
        spans.push((group, first..columns.len()));
    }
    columns.push(Column::new(
        "Reason",
        table
            .rows
            .iter()
            .map(|row| row.reason.clone().unwrap_or_else(|| "-".to_string())),
    ));

    // Widen the last column of a group whose title outgrows its facets.
    for (group, range) in &spans {
        if range.is_empty() {
            continue;
        }
        let span = span_width(&columns[range.clone()]);
        let title_len = group.title().len();
        if title_len > span {
            columns[range.end - 1].width += title_len - span;
        }
    }

    let mut out = String::new();
    let mut group_line = String::new();
    group_line.push_str(&" ".repeat(span_width(&columns[..facet_start]) + COLUMN_GAP.len()));
    for (group, range) in &spans {
        if range.is_empty() {
            continue;
        }
        let _ = write!(
            group_line,
            "{:<width$}{COLUMN_GAP}",
            group.title(),
            width = span_width(&columns[range.clone()])
        );
    }
    out.push_str(group_line.trim_end());
    out.push('\n');

    let headers: Vec<&str> = columns.iter().map(|col| col.header.as_str()).collect();
    push_line(&mut out, &columns, &headers);
    let rule: Vec<String> = columns.iter().map(|col| "-".repeat(col.width)).collect();
    push_line(&mut out, &columns, &rule.iter().map(String::as_str).collect::<Vec<_>>());
    for index in 0..table.rows.len() {
        let cells: Vec<&str> = columns.iter().map(|col| col.cells[index].as_str()).collect();
        push_line(&mut out, &columns, &cells);
    }

    let options = table
        .page_size_options
        .iter()
        .map(|size| size.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(
        out,
        "\n{}  page {}/{}  page size {} (options: {})",
        table.range_label, table.page, table.page_count, table.page_size, options
    );
    out
}

fn render_list(list: &ListLayout) -> String {
    let mut out = String::new();
    if list.visible.is_empty() {
        let _ = writeln!(out, "No rows in view ({} total)", list.total_rows);
        return out;
    }
    let _ = writeln!(
        out,
        "Showing rows {}-{} of {} (scroll {} of {})",
        list.visible.start + 1,
        list.visible.end,
        list.total_rows,
        list.scroll_offset,
        list.total_height
    );

    for positioned in &list.rows {
        out.push('\n');
        out.push_str(&render_card(&positioned.row));
    }
    out
}

fn render_card(row: &RecordRow) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}  {}", row.index + 1, row.email, status_text(row));
    if let Some(reason) = &row.reason {
        let _ = writeln!(out, "    Reason: {reason}");
    }
    for group in FacetGroup::ALL {
        let cells = row
            .facets_in(group)
            .map(|cell| format!("{} {}", cell.facet.label(), cell_text(cell)))
            .collect::<Vec<_>>()
            .join(" | ");
        let _ = writeln!(out, "    {}: {}", group.title(), cells);
    }
    out
}

fn status_text(row: &RecordRow) -> String {
    let marker = match row.badge {
        StatusBadge::Success => "+",
        StatusBadge::Error => "x",
    };
    format!("{marker} {}", row.status.label())
}

fn cell_text(cell: &FacetCell) -> String {
    format!("{} {}", tone_marker(cell.tone), cell.text)
}

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Good => "+",
        Tone::Bad => "x",
        Tone::Warning => "!",
        Tone::Neutral => "-",
    }
}

struct Column {
    header: String,
    cells: Vec<String>,
    width: usize,
}

impl Column {
    fn new(header: &str, cells: impl Iterator<Item = String>) -> Self {
        let cells: Vec<String> = cells.collect();
        let width = cells
            .iter()
            .map(|cell| cell.chars().count())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);
        Self {
            header: header.to_string(),
            cells,
            width,
        }
    }
}

fn span_width(columns: &[Column]) -> usize {
    let gaps = columns.len().saturating_sub(1) * COLUMN_GAP.len();
    columns.iter().map(|col| col.width).sum::<usize>() + gaps
}

fn push_line(out: &mut String, columns: &[Column], cells: &[&str]) {
    let line = columns
        .iter()
        .zip(cells)
        .map(|(col, cell)| format!("{:<width$}", cell, width = col.width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}
