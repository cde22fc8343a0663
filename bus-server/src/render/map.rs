//! Leaflet segment-map artifacts.
//!
//! Turns a matched origin→destination path into a self-contained HTML
//! map: the full segment polyline, numbered circle markers with
//! stop-name popups, and distinguished origin/destination markers.
//! One artifact per valid match.

use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;
use serde::Serialize;

use crate::matcher::MatchResult;

/// Map centre when a path is unexpectedly empty (central Taipei).
const FALLBACK_CENTER: (f64, f64) = (25.0330, 121.5654);

/// Errors from rendering a segment map.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("failed to encode path: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Template)]
#[template(path = "map.html")]
struct SegmentMapTemplate<'a> {
    route: &'a str,
    direction: String,
    center_lat: f64,
    center_lon: f64,
    /// JSON array of path points, embedded directly in the page script.
    points_json: String,
}

/// Path point as embedded in the artifact's script.
#[derive(Serialize)]
struct PointJs<'a> {
    seq: u32,
    name: &'a str,
    lat: f64,
    lon: f64,
}

/// Writes segment-map artifacts into an output directory.
pub struct MapRenderer {
    output_dir: PathBuf,
}

impl MapRenderer {
    /// Create a renderer, creating the output directory if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// The directory artifacts are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render one matched segment and return the artifact path.
    ///
    /// The path's first and last points are the origin and destination
    /// stops; they carry the start and end markers.
    pub fn render(&self, result: &MatchResult) -> Result<PathBuf, RenderError> {
        let points: Vec<PointJs<'_>> = result
            .path
            .iter()
            .map(|p| PointJs {
                seq: p.seq,
                name: &p.name,
                lat: p.latitude,
                lon: p.longitude,
            })
            .collect();

        let (center_lat, center_lon) = result
            .path
            .first()
            .map(|p| (p.latitude, p.longitude))
            .unwrap_or(FALLBACK_CENTER);

        let template = SegmentMapTemplate {
            route: &result.route,
            direction: result.direction.to_string(),
            center_lat,
            center_lon,
            points_json: serde_json::to_string(&points)?,
        };

        let file_name = format!("direct_{}_{}.html", result.route, result.direction);
        let path = self.output_dir.join(file_name);
        fs::write(&path, template.render()?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, RouteCode};
    use crate::matcher::PathPoint;

    fn sample_match() -> MatchResult {
        MatchResult {
            route: "信義幹線".to_string(),
            code: RouteCode::parse("2").unwrap(),
            direction: Direction::Outbound,
            origin_arrival: Some("3分".to_string()),
            path: vec![
                PathPoint {
                    seq: 5,
                    name: "忠孝新生".to_string(),
                    latitude: 25.042356,
                    longitude: 121.532905,
                },
                PathPoint {
                    seq: 6,
                    name: "仁愛林森路口".to_string(),
                    latitude: 25.039234,
                    longitude: 121.525442,
                },
                PathPoint {
                    seq: 7,
                    name: "市政府".to_string(),
                    latitude: 25.041171,
                    longitude: 121.565228,
                },
            ],
        }
    }

    #[test]
    fn writes_artifact_named_after_route_and_direction() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MapRenderer::new(dir.path()).unwrap();

        let path = renderer.render(&sample_match()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "direct_信義幹線_outbound.html"
        );
        assert!(path.exists());
    }

    #[test]
    fn artifact_embeds_the_full_path() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MapRenderer::new(dir.path()).unwrap();

        let path = renderer.render(&sample_match()).unwrap();
        let html = std::fs::read_to_string(path).unwrap();

        assert!(html.contains("leaflet"));
        assert!(html.contains("忠孝新生"));
        assert!(html.contains("仁愛林森路口"));
        assert!(html.contains("市政府"));
        // Centred on the origin stop
        assert!(html.contains("25.042356"));
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("maps").join("out");

        let renderer = MapRenderer::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(renderer.output_dir(), nested.as_path());
    }
}
