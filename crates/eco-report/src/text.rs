//! Plain-text rendering of a [`PrintDocument`], for terminals.

use std::fmt::Write as _;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::document::{
    CHECK_MARK, CHECKLIST_COLUMNS, CONCLUSION_HEADING, ChecklistRow, FOOTER, IDENTITY_HEADING,
    PHOTOS_HEADING, PrintDocument, REGULATION_HEADER, TITLE, UNSIGNED,
};

const WIDTH: u16 = 100;

/// Render the document for a terminal. Images are summarised, not drawn.
pub fn render_text(document: &PrintDocument) -> String {
    let mut out = String::new();
    for line in REGULATION_HEADER {
        let _ = writeln!(out, "{line}");
    }
    out.push('\n');
    for line in TITLE {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "{}\n", document.number);
    let _ = writeln!(out, "{}\n", document.opening);

    let _ = writeln!(out, "{IDENTITY_HEADING}");
    let mut identity = new_table();
    for row in &document.identity {
        identity.add_row(vec![Cell::new(row.label), Cell::new(&row.value)]);
    }
    let _ = writeln!(out, "{identity}\n");

    let _ = writeln!(out, "{}", document.checklist_heading);
    let mut checklist = new_table();
    checklist.set_header(CHECKLIST_COLUMNS.to_vec());
    for row in &document.checklist {
        match row {
            ChecklistRow::Section { label } => {
                checklist.add_row(vec![
                    Cell::new(""),
                    Cell::new(label.to_uppercase()),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                ]);
            }
            ChecklistRow::Item {
                number,
                label,
                answer,
                remark,
            } => {
                checklist.add_row(vec![
                    Cell::new(number).set_alignment(CellAlignment::Right),
                    Cell::new(label),
                    mark(*answer == Some(true)),
                    mark(*answer == Some(false)),
                    Cell::new(remark),
                ]);
            }
        }
    }
    let _ = writeln!(out, "{checklist}\n");

    let _ = writeln!(out, "{CONCLUSION_HEADING}");
    let _ = writeln!(out, "{}\n", document.conclusion);

    if !document.photos.is_empty() {
        let _ = writeln!(out, "{PHOTOS_HEADING}");
        for index in 0..document.photos.len() {
            let _ = writeln!(out, "  [foto] {}", PrintDocument::photo_caption(index));
        }
        out.push('\n');
    }

    for block in &document.signatures {
        let _ = writeln!(out, "{}", block.party);
        let _ = writeln!(out, "{}", block.role);
        let signed = if block.image.is_some() {
            "[tanda tangan terlampir]"
        } else {
            UNSIGNED
        };
        let _ = writeln!(out, "  {signed}");
        let _ = writeln!(out, "{}", block.name);
        let _ = writeln!(out, "{}\n", block.detail);
    }

    let _ = writeln!(out, "{FOOTER}");
    out
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(WIDTH);
    table
}

fn mark(checked: bool) -> Cell {
    Cell::new(if checked { CHECK_MARK } else { "" }).set_alignment(CellAlignment::Center)
}
