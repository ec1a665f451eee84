use crate::curve::CurveModel;
use crate::error::Result;
use crate::table;
use std::path::Path;
use tracing::info;

/// Write the point table (Signal, Gradient, Red, Green, Blue) as CSV
pub fn save_table<W: std::io::Write>(model: &CurveModel, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in table::rows(model)? {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// No destination means the export was cancelled.
pub fn save_table_file(model: &CurveModel, dest: Option<&Path>) -> Result<bool> {
    let Some(path) = dest else {
        return Ok(false);
    };
    save_table(model, std::fs::File::create(path)?)?;
    info!(path = %path.display(), "exported point table");
    Ok(true)
}
