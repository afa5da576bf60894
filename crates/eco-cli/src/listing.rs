//! Tables and exports for the terminal.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use eco_catalog::FormCatalog;
use eco_model::{FieldType, InspectionRecord, Inspector};
use eco_persistence::DashboardStatus;
use eco_report::dates;

/// Shown instead of an empty archive table.
pub const EMPTY_ARCHIVE: &str = "Belum ada arsip data";

/// Apply the shared table style.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(value: usize) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

/// The dashboard's "Status Database Lokal" panel.
pub fn status_table(status: &DashboardStatus) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Status Database Lokal"), header_cell("")]);
    let user = match &status.user {
        Some(name) => Cell::new(name).fg(Color::Green),
        None => Cell::new("belum login").fg(Color::Yellow),
    };
    table.add_row(vec![Cell::new("Pengguna"), user]);
    table.add_row(vec![Cell::new("Pejabat pengawas"), count_cell(status.inspectors)]);
    table.add_row(vec![Cell::new("Arsip berita acara"), count_cell(status.records)]);
    table
}

pub fn forms_table(catalog: &FormCatalog) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Form"),
        header_cell("Judul"),
        header_cell("Lingkup"),
        header_cell("Butir"),
    ]);
    for form in catalog.forms() {
        let items = form
            .fields
            .iter()
            .filter(|field| field.field_type != FieldType::Header)
            .count();
        table.add_row(vec![
            Cell::new(&form.id).add_attribute(Attribute::Bold),
            Cell::new(&form.title),
            Cell::new(&form.subtitle),
            count_cell(items),
        ]);
    }
    table
}

pub fn inspectors_table<'a>(inspectors: impl IntoIterator<Item = &'a Inspector>) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Nama"),
        header_cell("NIP"),
        header_cell("Jabatan"),
        header_cell("Instansi"),
    ]);
    for inspector in inspectors {
        table.add_row(vec![
            Cell::new(&inspector.id),
            Cell::new(&inspector.name),
            Cell::new(&inspector.nip),
            Cell::new(&inspector.job_title),
            Cell::new(&inspector.agency),
        ]);
    }
    table
}

/// Archive listing, one row per record as on the history screen.
pub fn history_table(records: &[&InspectionRecord]) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Formulir"),
        header_cell("Tanggal"),
        header_cell("Perusahaan"),
        header_cell("Pengawas"),
    ]);
    for record in records {
        let row = HistoryRow::from(*record);
        table.add_row(vec![
            Cell::new(&row.id),
            Cell::new(format!("BA Form {}", row.form_id)).fg(Color::Green),
            Cell::new(&row.date),
            Cell::new(&row.business).add_attribute(Attribute::Bold),
            Cell::new(format!("Oleh: {}", row.inspector)),
        ]);
    }
    table
}

/// Flat summary of a record, for CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub id: String,
    pub form_id: String,
    pub form_title: String,
    /// Creation date in the local time zone, e.g. `5 Agu 2024`.
    pub date: String,
    pub business: String,
    pub inspector: String,
    pub nip: String,
    pub photos: usize,
}

impl From<&InspectionRecord> for HistoryRow {
    fn from(record: &InspectionRecord) -> Self {
        Self {
            id: record.id.clone(),
            form_id: record.form_id.clone(),
            form_title: record.form_title.clone(),
            date: dates::format_short(record.created_at.with_timezone(&Local).date_naive()),
            business: record.business.name.clone(),
            inspector: record.inspector.name.clone(),
            nip: record.inspector.nip.clone(),
            photos: record.photos.len(),
        }
    }
}

pub fn write_history_csv<W: Write>(out: W, records: &[&InspectionRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer
            .serialize(HistoryRow::from(*record))
            .with_context(|| format!("failed to write record {}", record.id))?;
    }
    writer.flush().context("failed to flush CSV output")?;
    Ok(())
}

/// Full record snapshots, as stored.
pub fn write_history_json<W: Write>(mut out: W, records: &[&InspectionRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, records).context("failed to write JSON output")?;
    writeln!(out).context("failed to write JSON output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use eco_model::{BusinessEntity, NewInspector, ResponseSet, Signatures};

    use super::*;

    fn record() -> InspectionRecord {
        let mut business = BusinessEntity::default();
        business.name = "PT Hijau Lestari".into();
        InspectionRecord {
            id: "K3J9X0AB".into(),
            inspector: NewInspector::new("Budi Santoso", "198701012010011001")
                .into_inspector("k3j9x0ab".into())
                .unwrap(),
            business,
            form_id: "6B".into(),
            form_title: "6B PPMA Air Limbah".into(),
            responses: ResponseSet::new(),
            notes: String::new(),
            photos: Vec::new(),
            signatures: Signatures::default(),
            created_at: Utc.with_ymd_and_hms(2024, 8, 5, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn forms_table_lists_the_catalog() {
        let catalog = FormCatalog::load_embedded().unwrap();
        let mut table = forms_table(&catalog);
        table.force_no_tty();
        insta::assert_snapshot!(table.to_string(), @r"
        ╭──────┬─────────────────────────────┬───────────────────────────────────────┬───────╮
        │ Form ┆ Judul                       ┆ Lingkup                               ┆ Butir │
        ╞══════╪═════════════════════════════╪═══════════════════════════════════════╪═══════╡
        │ 6A   ┆ 6A Persetujuan Lingkungan   ┆ Kewajiban Persetujuan Lingkungan      ┆     6 │
        │ 6B   ┆ 6B PPMA Air Limbah          ┆ Perlindungan & Pengelolaan Mutu Air   ┆     6 │
        │ 6C   ┆ 6C PPMU Udara               ┆ Perlindungan & Pengelolaan Mutu Udara ┆     5 │
        │ 6D   ┆ 6D Pengelolaan B3           ┆ Bahan Berbahaya dan Beracun           ┆     5 │
        │ 6E   ┆ 6E Pengelolaan Limbah B3    ┆ Limbah Bahan Berbahaya dan Beracun    ┆     6 │
        │ 6F   ┆ 6F Pengelolaan Limbah nonB3 ┆ Limbah Non Bahan Berbahaya & Beracun  ┆     4 │
        │ 6G   ┆ 6G Pengelolaan Sampah       ┆ Pengurangan dan Penanganan Sampah     ┆     5 │
        ╰──────┴─────────────────────────────┴───────────────────────────────────────┴───────╯
        ");
    }

    #[test]
    fn history_table_shows_one_row_per_record() {
        let record = record();
        let mut table = history_table(&[&record]);
        table.force_no_tty();
        insta::assert_snapshot!(table.to_string(), @r"
        ╭──────────┬────────────┬────────────┬──────────────────┬────────────────────╮
        │ ID       ┆ Formulir   ┆ Tanggal    ┆ Perusahaan       ┆ Pengawas           │
        ╞══════════╪════════════╪════════════╪══════════════════╪════════════════════╡
        │ K3J9X0AB ┆ BA Form 6B ┆ 5 Agu 2024 ┆ PT Hijau Lestari ┆ Oleh: Budi Santoso │
        ╰──────────┴────────────┴────────────┴──────────────────┴────────────────────╯
        ");
    }

    #[test]
    fn history_csv_has_header_and_flat_rows() {
        let record = record();
        let mut out = Vec::new();
        write_history_csv(&mut out, &[&record]).unwrap();
        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
        id,form_id,form_title,date,business,inspector,nip,photos
        K3J9X0AB,6B,6B PPMA Air Limbah,5 Agu 2024,PT Hijau Lestari,Budi Santoso,198701012010011001,0
        ");
    }
}
