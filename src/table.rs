use crate::curve::CurveModel;
use crate::error::{GradError, Result};
use crate::models::point::{Channel, LEVEL_MAX, SIGNAL_MAX};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Column {
    Signal,
    Gradient,
    Red,
    Green,
    Blue,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Signal,
        Column::Gradient,
        Column::Red,
        Column::Green,
        Column::Blue,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Signal => "Signal",
            Column::Gradient => "Gradient",
            Column::Red => "Red",
            Column::Green => "Green",
            Column::Blue => "Blue",
        }
    }

    fn channel(self) -> Option<Channel> {
        match self {
            Column::Red => Some(Channel::Red),
            Column::Green => Some(Channel::Green),
            Column::Blue => Some(Channel::Blue),
            Column::Signal | Column::Gradient => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One row of the point table; the field names double as CSV headers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableRow {
    pub signal: u16,
    pub gradient: f64,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Build the table view, one row per point index.
///
/// Rows are keyed by index across all three channels, so the channels must
/// hold points at the same signals.
pub fn rows(model: &CurveModel) -> Result<Vec<TableRow>> {
    model.ensure_synchronized()?;
    let [r, g, b] = Channel::ALL.map(|c| model.points(c));
    Ok(r.iter()
        .zip(g)
        .zip(b)
        .map(|((r, g), b)| TableRow {
            signal: r.signal,
            gradient: r.signal as f64 / SIGNAL_MAX as f64,
            red: r.level,
            green: g.level,
            blue: b.level,
        })
        .collect())
}

/// Apply the text typed into one table cell.
///
/// Text that does not parse, or falls outside its axis, is rejected and the
/// model is left as it was.
pub fn apply_edit(model: &mut CurveModel, row: usize, column: Column, text: &str) -> Result<()> {
    model.ensure_synchronized()?;
    let rows = model.len(Channel::Red);
    if row >= rows {
        return Err(GradError::NoSuchRow { row, rows });
    }

    match column {
        Column::Gradient => Err(GradError::ReadOnlyColumn(column)),
        Column::Signal => {
            let signal = parse_cell(column, text, SIGNAL_MAX)?;
            model.set_signal(row, signal)
        }
        Column::Red | Column::Green | Column::Blue => {
            let level = parse_cell(column, text, LEVEL_MAX as u16)?;
            let channel = column.channel().ok_or(GradError::ReadOnlyColumn(column))?;
            model.set_level(channel, row, level as i32)?;
            debug!(%channel, row, level, "table edit");
            Ok(())
        }
    }
}

fn parse_cell(column: Column, text: &str, max: u16) -> Result<u16> {
    let invalid = |reason: String| GradError::InvalidCell {
        column,
        text: text.to_string(),
        reason,
    };
    let value = u16::from_str(text.trim()).map_err(|e| invalid(e.to_string()))?;
    if value > max {
        return Err(invalid(format!("must be between 0 and {}", max)));
    }
    Ok(value)
}
