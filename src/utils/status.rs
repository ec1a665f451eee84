use crate::{
    curve::CurveModel,
    models::{point::Channel, style::ColourStop},
    table::Column,
};
use comfy_table::{Attribute, Cell, CellAlignment, Table};

/// Truecolour block per stop, for terminals that support 24-bit colour
pub fn colour_bar(stops: &[ColourStop]) -> String {
    let mut s = String::new();
    for cs in stops {
        s.push_str(&format!(
            "\x1b[38;2;{};{};{}m█\x1b[0m",
            cs.red, cs.green, cs.blue
        ));
    }
    s
}

/// Point table for the terminal; falls back to a per-channel listing when
/// the channels no longer share their signals
pub fn curve_table(model: &CurveModel) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED);

    match crate::table::rows(model) {
        Ok(rows) => {
            let mut header = vec![
                Cell::new("#")
                    .add_attribute(Attribute::Bold)
                    .set_alignment(CellAlignment::Center),
            ];
            header.extend(Column::ALL.iter().map(|c| {
                Cell::new(c.header())
                    .add_attribute(Attribute::Bold)
                    .set_alignment(CellAlignment::Center)
            }));
            table.set_header(header);

            for (i, row) in rows.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i).set_alignment(CellAlignment::Center),
                    Cell::new(row.signal).set_alignment(CellAlignment::Right),
                    Cell::new(format!("{:.4}", row.gradient)).set_alignment(CellAlignment::Right),
                    Cell::new(row.red).set_alignment(CellAlignment::Right),
                    Cell::new(row.green).set_alignment(CellAlignment::Right),
                    Cell::new(row.blue).set_alignment(CellAlignment::Right),
                ]);
            }
        }
        Err(_) => {
            table.set_header(vec![
                Cell::new("Channel").add_attribute(Attribute::Bold),
                Cell::new("Points")
                    .add_attribute(Attribute::Bold)
                    .set_alignment(CellAlignment::Center),
                Cell::new("(signal, level)").add_attribute(Attribute::Bold),
            ]);
            for channel in Channel::ALL {
                let points = model.points(channel);
                let listing = points
                    .iter()
                    .map(|p| format!("({}, {})", p.signal, p.level))
                    .collect::<Vec<_>>()
                    .join(" ");
                table.add_row(vec![
                    Cell::new(channel),
                    Cell::new(points.len()).set_alignment(CellAlignment::Center),
                    Cell::new(listing),
                ]);
            }
        }
    }
    table
}

pub fn print_curve_summary(model: &CurveModel, stops: &[ColourStop]) {
    println!("\nCurve summary:\n{}", curve_table(model));
    println!("\nGradient: {}", colour_bar(stops));

    if let Err(e) = model.ensure_synchronized() {
        println!("\nWarnings:");
        println!("  ⚠️ {}", e);
        println!("\nTips:");
        println!(
            "  Table edits need every channel to hold the same signals; run `reset` to start over."
        );
    }

    println!();
}
