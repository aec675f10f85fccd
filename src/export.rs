use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use crate::match_stats::RAW_COLUMNS;
use crate::metrics::{DERIVED_COLUMNS, DerivedRow};
use crate::scores::{RadarPercentiles, RadarScores, SCORE_COLUMNS};

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Id(u64),
    Text(String),
    Count(u64),
    Number(f64),
    Missing,
}

impl Cell {
    fn from_opt(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Missing,
        }
    }

    pub fn to_field(&self) -> String {
        match self {
            Cell::Id(v) | Cell::Count(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Number(v) => v.to_string(),
            Cell::Missing => String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

pub struct ExportReport {
    pub metrics_path: PathBuf,
    pub radar_path: PathBuf,
    pub xlsx_path: Option<PathBuf>,
    pub players: usize,
}

pub fn metrics_table(rows: &[DerivedRow], scores: &[RadarScores]) -> Table {
    let mut headers = vec!["player_id".to_string(), "player_name".to_string()];
    headers.extend(RAW_COLUMNS.iter().map(|(stat, p)| stat.column(*p).to_string()));
    headers.extend(DERIVED_COLUMNS.iter().map(|s| s.to_string()));
    headers.extend(SCORE_COLUMNS.iter().map(|s| s.to_string()));

    let rows = rows
        .iter()
        .zip(scores.iter())
        .map(|(row, score)| {
            let mut cells = vec![
                Cell::Id(row.player.player_id),
                Cell::Text(row.player.player_name.clone()),
            ];
            cells.extend(RAW_COLUMNS.iter().map(|(stat, p)| {
                let v = row.player.stats.get(*stat, *p);
                if stat.is_count() {
                    Cell::Count(v.round().max(0.0) as u64)
                } else {
                    Cell::Number(v)
                }
            }));
            cells.extend(row.metrics.values().into_iter().map(Cell::from_opt));
            cells.extend(score.values().into_iter().map(Cell::from_opt));
            cells
        })
        .collect();

    Table { headers, rows }
}

pub fn radar_table(
    rows: &[DerivedRow],
    scores: &[RadarScores],
    percentiles: &[RadarPercentiles],
) -> Table {
    let mut headers = vec!["player_id".to_string(), "player_name".to_string()];
    headers.extend(SCORE_COLUMNS.iter().map(|s| s.to_string()));
    headers.extend(SCORE_COLUMNS.iter().map(|s| format!("{s}_pct")));

    let rows = rows
        .iter()
        .zip(scores.iter().zip(percentiles.iter()))
        .map(|(row, (score, pct))| {
            let mut cells = vec![
                Cell::Id(row.player.player_id),
                Cell::Text(row.player.player_name.clone()),
            ];
            cells.extend(score.values().into_iter().map(Cell::from_opt));
            cells.extend(pct.values().into_iter().map(Cell::from_opt));
            cells
        })
        .collect();

    Table { headers, rows }
}

pub fn write_csv(path: &Path, table: &Table) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("open csv {}", path.display()))?;
    writer
        .write_record(&table.headers)
        .with_context(|| format!("write csv header {}", path.display()))?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(Cell::to_field))
            .with_context(|| format!("write csv row {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv {}", path.display()))?;
    Ok(())
}

pub fn write_xlsx(path: &Path, sheets: &[(&str, &Table)]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create workbook dir {}", parent.display()))?;
    }
    let mut workbook = Workbook::new();
    for (name, table) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name)?;
        write_table(sheet, table)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn write_table(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    for (col_idx, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, header)
            .with_context(|| format!("write header cell {col_idx}"))?;
    }
    for (idx, row) in table.rows.iter().enumerate() {
        let row_idx = (idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = col_idx as u16;
            let written = match cell {
                Cell::Id(v) | Cell::Count(v) => worksheet.write_number(row_idx, col, *v as f64),
                Cell::Number(v) => worksheet.write_number(row_idx, col, *v),
                Cell::Text(s) => worksheet.write_string(row_idx, col, s),
                Cell::Missing => continue,
            };
            written.with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

/// Writes `<prefix>_shot_metrics.csv`, `<prefix>_offense_radar.csv` and, when
/// asked for, an XLSX workbook with both tables.
pub fn export_tables(
    out_dir: &Path,
    prefix: &str,
    metrics: &Table,
    radar: &Table,
    xlsx: Option<&Path>,
) -> Result<ExportReport> {
    let metrics_path = out_dir.join(format!("{prefix}_shot_metrics.csv"));
    let radar_path = out_dir.join(format!("{prefix}_offense_radar.csv"));

    write_csv(&metrics_path, metrics)?;
    info!(path = %metrics_path.display(), rows = metrics.rows.len(), "wrote full metrics");
    write_csv(&radar_path, radar)?;
    info!(path = %radar_path.display(), rows = radar.rows.len(), "wrote radar table");

    if let Some(path) = xlsx {
        write_xlsx(path, &[("Metrics", metrics), ("Radar", radar)])?;
        info!(path = %path.display(), "wrote workbook");
    }

    Ok(ExportReport {
        metrics_path,
        radar_path,
        xlsx_path: xlsx.map(Path::to_path_buf),
        players: metrics.rows.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_render_as_flat_fields() {
        assert_eq!(Cell::Id(5).to_field(), "5");
        assert_eq!(Cell::Count(3).to_field(), "3");
        assert_eq!(Cell::Number(0.25).to_field(), "0.25");
        assert_eq!(Cell::Missing.to_field(), "");
        assert_eq!(Cell::from_opt(Some(f64::INFINITY)), Cell::Missing);
        assert_eq!(Cell::from_opt(None), Cell::Missing);
    }
}
