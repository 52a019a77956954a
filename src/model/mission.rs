use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Reference to an image supplied with the report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    /// Image stored on disk
    Path(PathBuf),
    /// Image already loaded into memory (e.g. an upload)
    Inline { name: String, data: Vec<u8> },
}

impl ImageRef {
    pub fn inline(name: impl Into<String>, data: Vec<u8>) -> Self {
        ImageRef::Inline {
            name: name.into(),
            data,
        }
    }

    /// Short name used in logs and image keys
    pub fn name(&self) -> String {
        match self {
            ImageRef::Path(path) => path.display().to_string(),
            ImageRef::Inline { name, .. } => name.clone(),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single shot fired during a round
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShotRecord {
    pub number: u32,
    /// Speed in knots
    pub speed: f64,
    /// Altitude in feet
    pub altitude: f64,
    /// Distance to target in metres
    pub distance: f64,
    pub hit: bool,
}

impl ShotRecord {
    pub fn new(number: u32, speed: f64, altitude: f64, distance: f64, hit: bool) -> Self {
        Self {
            number,
            speed,
            altitude,
            distance,
            hit,
        }
    }
}

/// One training round: an optional performance chart and its shots
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number
    pub number: u32,
    #[serde(default)]
    pub chart_image: Option<ImageRef>,
    #[serde(default)]
    pub shots: Vec<ShotRecord>,
}

impl RoundRecord {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    pub fn with_chart(mut self, chart: ImageRef) -> Self {
        self.chart_image = Some(chart);
        self
    }

    pub fn with_shots(mut self, shots: Vec<ShotRecord>) -> Self {
        self.shots = shots;
        self
    }

    pub fn hit_count(&self) -> usize {
        self.shots.iter().filter(|s| s.hit).count()
    }
}

/// Complete input for one report
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MissionReportData {
    pub pilot_name: String,
    pub instructor_name: String,
    /// Mission date as entered (see `parser::date` for accepted shapes)
    pub date: String,
    pub mission_type: String,
    #[serde(default)]
    pub mission_name: Option<String>,
    pub aircraft: String,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub pilot_photo: Option<ImageRef>,
    #[serde(default)]
    pub rounds: Vec<RoundRecord>,
}

impl MissionReportData {
    /// Parse report data from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total number of shots across all rounds
    pub fn total_shots(&self) -> usize {
        self.rounds.iter().map(|r| r.shots.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_minimal() {
        let json = r#"{
            "pilot_name": "Jane Doe",
            "instructor_name": "John Smith",
            "date": "2024-03-15",
            "mission_type": "Air-to-Ground",
            "aircraft": "Rafale"
        }"#;
        let data = MissionReportData::from_json(json).unwrap();
        assert_eq!(data.pilot_name, "Jane Doe");
        assert!(data.mission_name.is_none());
        assert!(data.pilot_photo.is_none());
        assert!(data.rounds.is_empty());
    }

    #[test]
    fn test_from_json_rounds_and_images() {
        let json = r#"{
            "pilot_name": "Jane Doe",
            "instructor_name": "John Smith",
            "date": "2024-03-15",
            "mission_type": "Air-to-Ground",
            "mission_name": "Desert Strike",
            "aircraft": "Rafale",
            "map": "Sector 7",
            "pilot_photo": "photos/jane.png",
            "rounds": [
                {
                    "number": 1,
                    "chart_image": {"name": "round1.png", "data": [1, 2, 3]},
                    "shots": [
                        {"number": 1, "speed": 350, "altitude": 1200.5, "distance": 800, "hit": true},
                        {"number": 2, "speed": 340, "altitude": 1100, "distance": 750, "hit": false}
                    ]
                },
                {"number": 2}
            ]
        }"#;
        let data = MissionReportData::from_json(json).unwrap();
        assert_eq!(
            data.pilot_photo,
            Some(ImageRef::Path(PathBuf::from("photos/jane.png")))
        );
        assert_eq!(data.rounds.len(), 2);
        assert_eq!(
            data.rounds[0].chart_image,
            Some(ImageRef::inline("round1.png", vec![1, 2, 3]))
        );
        assert_eq!(data.rounds[0].hit_count(), 1);
        assert!(data.rounds[1].chart_image.is_none());
        assert!(data.rounds[1].shots.is_empty());
        assert_eq!(data.total_shots(), 2);
    }

    #[test]
    fn test_from_json_missing_required_field() {
        let json = r#"{"pilot_name": "Jane Doe"}"#;
        assert!(MissionReportData::from_json(json).is_err());
    }
}
