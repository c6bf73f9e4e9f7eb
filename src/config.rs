//! Region configuration
//!
//! Each UI region that needs presentation state declares one of three
//! behaviors. Configs are plain serde data so hosts can ship them as JSON.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Names a UI region owning presentation state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One region's presentation behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub id: RegionId,
    #[serde(flatten)]
    pub kind: RegionKind,
}

/// The three behaviors a region can mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RegionKind {
    /// Cyclic index advance (slideshows, step highlighters).
    Rotation { sequence_length: usize, interval_ms: u64 },
    /// Typewriter reveal of a fixed text.
    Reveal { text: String, speed_ms: u64 },
    /// Rotation over captions, with the caption at the active index
    /// revealed character by character.
    SteppedReveal {
        captions: Vec<String>,
        interval_ms: u64,
        speed_ms: u64,
    },
}

/// Platform path for an optional region override file.
pub fn regions_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "showreel", "Showreel")
        .map(|dirs| dirs.config_dir().join("regions.json"))
}

/// Regions from the override file when present, else the stock dashboard.
pub fn load_regions() -> Vec<RegionConfig> {
    let Some(path) = regions_path() else {
        return stock_dashboard();
    };
    if !path.exists() {
        return stock_dashboard();
    }
    let parsed = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
    match parsed {
        Ok(regions) => {
            tracing::info!(path = %path.display(), "loaded region overrides");
            regions
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "unreadable region config, using stock dashboard");
            stock_dashboard()
        }
    }
}

/// Regions mounted when no override file is present.
pub fn stock_dashboard() -> Vec<RegionConfig> {
    vec![
        RegionConfig {
            id: RegionId::new("announcements"),
            kind: RegionKind::Rotation {
                sequence_length: 3,
                interval_ms: 4000,
            },
        },
        RegionConfig {
            id: RegionId::new("howto-steps"),
            kind: RegionKind::SteppedReveal {
                captions: vec![
                    "Top up your balance".to_string(),
                    "Pick a plan that fits".to_string(),
                    "Confirm your order".to_string(),
                    "You are ready to go".to_string(),
                ],
                interval_ms: 4000,
                speed_ms: 80,
            },
        },
        RegionConfig {
            id: RegionId::new("greeting"),
            kind: RegionKind::Reveal {
                text: "Welcome back! Here is what's new today.".to_string(),
                speed_ms: 100,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_config_round_trips() {
        let config = RegionConfig {
            id: RegionId::new("banner"),
            kind: RegionKind::Rotation {
                sequence_length: 3,
                interval_ms: 4000,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: RegionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id.as_str(), "banner");
        match back.kind {
            RegionKind::Rotation {
                sequence_length,
                interval_ms,
            } => {
                assert_eq!(sequence_length, 3);
                assert_eq!(interval_ms, 4000);
            }
            other => panic!("expected rotation, got {:?}", other),
        }
    }

    #[test]
    fn kind_tag_is_snake_case() {
        let json = r#"{
            "id": "steps",
            "kind": "stepped_reveal",
            "captions": ["one", "two"],
            "interval_ms": 4000,
            "speed_ms": 80
        }"#;
        let config: RegionConfig = serde_json::from_str(json).unwrap();
        match config.kind {
            RegionKind::SteppedReveal { captions, .. } => assert_eq!(captions.len(), 2),
            other => panic!("expected stepped reveal, got {:?}", other),
        }
    }

    #[test]
    fn reveal_config_parses() {
        let json = r#"{"id": "greeting", "kind": "reveal", "text": "Hi", "speed_ms": 100}"#;
        let config: RegionConfig = serde_json::from_str(json).unwrap();
        match config.kind {
            RegionKind::Reveal { text, speed_ms } => {
                assert_eq!(text, "Hi");
                assert_eq!(speed_ms, 100);
            }
            other => panic!("expected reveal, got {:?}", other),
        }
    }

    #[test]
    fn stock_dashboard_has_all_three_kinds() {
        let regions = stock_dashboard();
        assert_eq!(regions.len(), 3);
        assert!(
            regions
                .iter()
                .any(|r| matches!(r.kind, RegionKind::Rotation { .. }))
        );
        assert!(
            regions
                .iter()
                .any(|r| matches!(r.kind, RegionKind::SteppedReveal { .. }))
        );
        assert!(
            regions
                .iter()
                .any(|r| matches!(r.kind, RegionKind::Reveal { .. }))
        );
    }
}
