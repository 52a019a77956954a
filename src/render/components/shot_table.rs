//! Fixed-width table layout for the per-round shot table

use crate::config::Style;
use crate::error::ConfigError;
use crate::render::blocks::{ContentBlock, TableCell, TableRowBlock};
use crate::render::helpers::geometry::LAYOUT_EPSILON;
use crate::render::helpers::styles::CellRole;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    /// Width in mm
    pub width: f32,
}

/// Values for one body row
#[derive(Debug, Clone, PartialEq)]
pub struct TableRowData {
    pub values: Vec<String>,
    /// Hit/miss flag driving the status column fill, if the row has one
    pub status: Option<bool>,
}

/// Column labels and widths, checked against the content width
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    columns: Vec<Column>,
    row_height: f32,
    status_column: Option<usize>,
}

impl TableLayout {
    pub fn new(
        labels: &[String],
        widths: &[f32],
        row_height: f32,
        status_column: Option<usize>,
        content_width: f32,
    ) -> Result<Self, ConfigError> {
        if labels.len() != widths.len() || labels.is_empty() {
            return Err(ConfigError::InvalidTableColumns {
                labels: labels.len(),
                widths: widths.len(),
            });
        }
        if let Some((index, &width)) = widths
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(ConfigError::InvalidColumnWidth { index, width });
        }
        if !row_height.is_finite() || row_height <= 0.0 {
            return Err(ConfigError::InvalidRowHeight(row_height));
        }
        if let Some(index) = status_column {
            if index >= labels.len() {
                return Err(ConfigError::InvalidStatusColumn {
                    index,
                    columns: labels.len(),
                });
            }
        }

        let total: f32 = widths.iter().sum();
        if total > content_width + LAYOUT_EPSILON {
            return Err(ConfigError::TableTooWide {
                total,
                available: content_width,
            });
        }

        let columns = labels
            .iter()
            .zip(widths)
            .map(|(label, &width)| Column {
                label: label.clone(),
                width,
            })
            .collect();
        Ok(Self {
            columns,
            row_height,
            status_column,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn status_column(&self) -> Option<usize> {
        self.status_column
    }

    pub fn total_width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// The label row
    pub fn header_block(&self, style: &Style) -> ContentBlock {
        let cell_style = style.cell(CellRole::Header);
        let cells = self
            .columns
            .iter()
            .map(|column| TableCell {
                text: column.label.clone(),
                width: column.width,
                role: CellRole::Header,
                style: cell_style,
            })
            .collect();
        ContentBlock::TableRow(TableRowBlock {
            cells,
            height: self.row_height,
            is_header: true,
        })
    }

    /// One body row. Missing values render as empty cells and extra values
    /// are ignored.
    pub fn row_block(&self, row: &TableRowData, style: &Style) -> ContentBlock {
        let cells = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let role = match (self.status_column, row.status) {
                    (Some(status_index), Some(hit)) if status_index == index => {
                        CellRole::status(hit)
                    }
                    _ => CellRole::Body,
                };
                TableCell {
                    text: row.values.get(index).cloned().unwrap_or_default(),
                    width: column.width,
                    role,
                    style: style.cell(role),
                }
            })
            .collect();
        ContentBlock::TableRow(TableRowBlock {
            cells,
            height: self.row_height,
            is_header: false,
        })
    }

    /// Header followed by one block per row
    pub fn blocks(&self, rows: &[TableRowData], style: &Style) -> Vec<ContentBlock> {
        std::iter::once(self.header_block(style))
            .chain(rows.iter().map(|row| self.row_block(row, style)))
            .collect()
    }
}

/// Format a measurement without trailing zeros (`350`, `12.5`)
pub fn format_measure(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}
