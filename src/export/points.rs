use crate::curve::CurveModel;
use crate::error::Result;
use crate::models::point::Channel;
use std::fs;
use std::path::Path;
use tracing::info;

/// Array-literal dump of every channel:
///
/// ```text
/// ThemeNamedRedPoints = 2;
/// ThemeNamedRedX = {0, 4095};
/// ThemeNamedRedY = {0, 255};
/// ```
///
/// with a blank line between channels.
pub fn points_text(model: &CurveModel) -> String {
    Channel::ALL
        .iter()
        .map(|&channel| {
            let points = model.points(channel);
            let xs = join(points.iter().map(|p| p.signal.to_string()));
            let ys = join(points.iter().map(|p| p.level.to_string()));
            let name = channel.name();
            format!(
                "ThemeNamed{name}Points = {};\n\
                 ThemeNamed{name}X = {{{}}};\n\
                 ThemeNamed{name}Y = {{{}}};\n",
                points.len(),
                xs,
                ys,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn join(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

/// Write the points file. No destination means the export was cancelled.
pub fn save_points(model: &CurveModel, dest: Option<&Path>) -> Result<bool> {
    let Some(path) = dest else {
        return Ok(false);
    };
    fs::write(path, points_text(model))?;
    info!(path = %path.display(), "exported points");
    Ok(true)
}
