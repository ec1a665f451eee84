use crate::curve::CurveModel;
use crate::error::Result;
use crate::models::point::{Channel, Point};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// On-disk form of a curve between CLI invocations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub red: Vec<Point>,
    pub green: Vec<Point>,
    pub blue: Vec<Point>,
}

impl From<&CurveModel> for Session {
    fn from(model: &CurveModel) -> Self {
        Session {
            red: model.points(Channel::Red).to_vec(),
            green: model.points(Channel::Green).to_vec(),
            blue: model.points(Channel::Blue).to_vec(),
        }
    }
}

impl TryFrom<Session> for CurveModel {
    type Error = crate::error::GradError;

    fn try_from(session: Session) -> Result<Self> {
        CurveModel::from_channels(session.red, session.green, session.blue)
    }
}

/// Load the curve stored at `path`, or the default curve if there is none yet
pub fn load<P: AsRef<Path>>(path: P) -> Result<CurveModel> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no session file, starting from defaults");
        return Ok(CurveModel::default());
    }
    let content = fs::read_to_string(path)?;
    let session: Session = serde_json::from_str(&content)?;
    CurveModel::try_from(session)
}

pub fn save<P: AsRef<Path>>(model: &CurveModel, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(&Session::from(model))?;
    fs::write(path, content)?;
    debug!(path = %path.display(), "session saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GradError;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let model = load(dir.path().join("nope.json")).unwrap();
        assert_eq!(model, CurveModel::default());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut model = CurveModel::new();
        model.insert_point(1234, 56).unwrap();
        model.set_level(Channel::Blue, 1, 200).unwrap();
        model.remove_point(Channel::Green, 1).unwrap();

        save(&model, &path).unwrap();
        assert_eq!(load(&path).unwrap(), model);
    }

    #[test]
    fn test_json_layout() {
        let json = serde_json::to_value(Session::from(&CurveModel::new())).unwrap();
        assert_eq!(
            json["red"],
            serde_json::json!([{"signal": 0, "level": 0}, {"signal": 4095, "level": 255}])
        );
    }

    #[test]
    fn test_invalid_session_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"red":[{"signal":0,"level":0}],"green":[],"blue":[]}"#,
        )
        .unwrap();
        assert!(matches!(load(&path), Err(GradError::InvalidCurve { .. })));

        let p = |signal: u16, level: u8| serde_json::json!({"signal": signal, "level": level});
        let ok = serde_json::json!([p(0, 0), p(4095, 255)]);
        for red in [
            serde_json::json!([p(0, 0), p(0, 90), p(4095, 255)]),
            serde_json::json!([p(0, 0), p(900, 9), p(900, 90), p(4095, 255)]),
            serde_json::json!([p(0, 0), p(4095, 10), p(4095, 200)]),
        ] {
            let session = serde_json::json!({"red": red, "green": ok, "blue": ok});
            fs::write(&path, session.to_string()).unwrap();
            assert!(
                matches!(load(&path), Err(GradError::InvalidCurve { .. })),
                "accepted red {}",
                red
            );
        }

        fs::write(&path, "not json").unwrap();
        assert!(matches!(load(&path), Err(GradError::Json(_))));
    }
}
