use crate::models::point::Channel;
use crate::table::Column;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GradError>;

#[derive(Error, Debug)]
pub enum GradError {
    // Curve edits
    #[error("{channel} already holds the maximum of {max} points")]
    ChannelFull { channel: Channel, max: usize },

    #[error("signal {signal} is already taken by a point")]
    SignalTaken { signal: u16 },

    #[error("signal {signal} must lie strictly between its neighbours {below} and {above}")]
    SignalOutOfOrder { signal: u16, below: u16, above: u16 },

    #[error("{channel} must keep at least {min} points")]
    TooFewPoints { channel: Channel, min: usize },

    #[error("point {index} of {channel} is an anchor and cannot be removed or shifted")]
    AnchorPoint { channel: Channel, index: usize },

    #[error("{channel} has no point at index {index}")]
    NoSuchPoint { channel: Channel, index: usize },

    #[error("no {channel} point near ({signal}, {level})")]
    NoPointNear {
        channel: Channel,
        signal: i32,
        level: i32,
    },

    #[error("invalid {channel} curve: {reason}")]
    InvalidCurve { channel: Channel, reason: String },

    #[error("channels have diverged: red={red}, green={green}, blue={blue} points")]
    ChannelsOutOfSync {
        red: usize,
        green: usize,
        blue: usize,
    },

    // Gradient stops
    #[error("at least 2 stops are required, got {count}")]
    TooFewStops { count: usize },

    #[error("invalid gradient stop '{text}': {reason}")]
    InvalidStop { text: String, reason: String },

    #[error("failed to build gradient: {0}")]
    Gradient(String),

    // Table edits
    #[error("row {row} is out of range for a table of {rows} rows")]
    NoSuchRow { row: usize, rows: usize },

    #[error("invalid value '{text}' for column {column}: {reason}")]
    InvalidCell {
        column: Column,
        text: String,
        reason: String,
    },

    #[error("column {0} is derived and cannot be edited")]
    ReadOnlyColumn(Column),

    // I/O and encoding
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
