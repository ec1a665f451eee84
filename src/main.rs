use anyhow::Context;
use clap::Parser;
use gradcurve::config::{Cli, Command, Config};
use gradcurve::models::editor::{Editor, PressOutcome};
use gradcurve::sampler::GradientSampler;
use gradcurve::utils::status::{colour_bar, print_curve_summary};
use gradcurve::{CurveModel, Point, export, models::style, session, table};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from(&cli);

    let default_level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut model = session::load(&config.session)
        .with_context(|| format!("failed to load session {}", config.session.display()))?;

    if run(cli.command, &config, &mut model)? {
        session::save(&model, &config.session)
            .with_context(|| format!("failed to save session {}", config.session.display()))?;
    }
    Ok(())
}

/// Execute one command; returns whether the curve changed
fn run(command: Command, config: &Config, model: &mut CurveModel) -> anyhow::Result<bool> {
    match command {
        Command::Reset => {
            model.reset();
            println!("🔄 Curve reset to defaults");
            Ok(true)
        }
        Command::Show => {
            let stops = GradientSampler::new(model).reduced_stops(config.stop_count)?;
            print_curve_summary(model, &stops);
            Ok(false)
        }
        Command::Insert { signal, level } => {
            let point = Point::clamped(signal, level);
            Ok(report(model.insert_point(signal, level).map(|_| {
                println!(
                    "➕ Inserted ({}, {}) in all channels",
                    point.signal, point.level
                )
            })))
        }
        Command::Remove { channel, index } => Ok(report(model.remove_point(channel, index).map(|p| {
            println!("➖ Removed {} point ({}, {})", channel, p.signal, p.level)
        }))),
        Command::Move {
            channel,
            signal,
            level,
            new_level,
        } => Ok(report(model.move_point(channel, (signal, level), new_level).map(|i| {
            let p = model.points(channel)[i];
            println!("↕️ Moved {} point {} to ({}, {})", channel, i, p.signal, p.level)
        }))),
        Command::Drag {
            channel,
            button,
            signal,
            level,
            to,
        } => {
            let mut editor = Editor::new(channel);
            let outcome = editor.press(model, button.into(), signal, level);
            for level in to {
                editor.motion(model, level)?;
            }
            editor.release();
            match outcome {
                PressOutcome::Nothing => println!("🖱️ No {} point under the pointer", channel),
                PressOutcome::Selected(i) => println!("🖱️ Dragged {} point {}", channel, i),
                PressOutcome::Inserted => println!("➕ Inserted point at signal {}", signal),
                PressOutcome::Removed(i) => println!("➖ Removed {} point {}", channel, i),
                PressOutcome::Rejected => println!("⚠️ Gesture rejected"),
            }
            Ok(!matches!(outcome, PressOutcome::Nothing | PressOutcome::Rejected))
        }
        Command::Edit { row, column, text } => Ok(report(
            table::apply_edit(model, row, column, &text)
                .map(|_| println!("✏️ Row {} {} set to {}", row, column, text.trim())),
        )),
        Command::Sample { signals } => {
            let sampler = GradientSampler::new(model);
            for signal in signals {
                let [r, g, b] = sampler.rgb8(signal as f64);
                println!(
                    "{:>4}  rgb({:>3},{:>3},{:>3})  luminance {:>7.3}  {}",
                    signal,
                    r,
                    g,
                    b,
                    sampler.luminance(signal as f64),
                    colour_bar(&[style::ColourStop::opaque(0.0, [r, g, b])])
                );
            }
            Ok(false)
        }
        Command::Gradient { fill } => {
            let stops = GradientSampler::new(model).reduced_stops(config.stop_count)?;
            if fill {
                println!("{}", style::fill_style(&stops));
            } else {
                println!("{}", style::format_stops(&stops));
            }
            Ok(false)
        }
        Command::ExportPoints { output } => {
            if export::save_points(model, output.as_deref())? {
                println!("✅ Points written to {}", display(&output));
            } else {
                println!("No output chosen, nothing exported");
            }
            Ok(false)
        }
        Command::ExportPng { output, .. } => {
            let stops = GradientSampler::new(model).reduced_stops(config.stop_count)?;
            let gradient = style::format_stops(&stops);
            let (width, height) = (config.image_width, config.image_height);
            if export::save_png(&gradient, width, height, output.as_deref())? {
                println!(
                    "✅ {}x{} gradient written to {}",
                    width,
                    height,
                    display(&output)
                );
            } else {
                println!("No output chosen, nothing exported");
            }
            Ok(false)
        }
        Command::ExportCsv { output } => {
            if export::save_table_file(model, output.as_deref())? {
                println!("✅ Table written to {}", display(&output));
            } else {
                println!("No output chosen, nothing exported");
            }
            Ok(false)
        }
    }
}

/// Rejected edits leave the curve untouched; warn and carry on
fn report<T>(result: gradcurve::Result<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            warn!("⚠️ {}", e);
            false
        }
    }
}

fn display(path: &Option<std::path::PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}
