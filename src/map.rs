//! Interactive map artifact rendering.
//!
//! Produces one self-contained Leaflet HTML file per render call,
//! centered on the record's coordinates with a single marker labeled by
//! the region description. Rendering without coordinates is a reported
//! precondition failure, not a crash.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::record::{TrackedRecord, UNKNOWN};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("coordinates unavailable, cannot create map")]
    CoordinatesUnavailable,

    #[error("failed to write map artifact: {0}")]
    Io(#[from] std::io::Error),
}

pub struct MapRenderer {
    output_dir: PathBuf,
    zoom: u8,
}

impl MapRenderer {
    pub fn new(output_dir: PathBuf, zoom: u8) -> Self {
        MapRenderer { output_dir, zoom }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a map artifact for the record and return its absolute path.
    ///
    /// The file name derives from the sanitized identifier plus a UTC
    /// timestamp token, so repeated renders during polling never collide.
    pub fn render(&self, record: &TrackedRecord) -> Result<PathBuf, RenderError> {
        let coords = record
            .coordinates
            .ok_or(RenderError::CoordinatesUnavailable)?;

        fs::create_dir_all(&self.output_dir)?;

        let token = Utc::now().format("%Y%m%d%H%M%S%3f");
        let file_name = format!("{}_{}.html", record.identifier.sanitized(), token);
        let path = self.output_dir.join(file_name);

        let label = record.region.as_deref().unwrap_or(UNKNOWN);
        let html = map_html(coords.lat(), coords.lon(), self.zoom, label);
        fs::write(&path, html)?;
        debug!("map: wrote artifact {}", path.display());

        // Report the absolute path back to the caller
        Ok(fs::canonicalize(&path).unwrap_or(path))
    }
}

/// Escape a marker label for embedding inside a single-quoted JS string.
fn escape_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('\n', " ")
}

fn map_html(lat: f64, lon: f64, zoom: u8, label: &str) -> String {
    let label = escape_label(label);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>numintel map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map('map').setView([{lat}, {lon}], {zoom});
L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
    maxZoom: 19,
    attribution: '&copy; OpenStreetMap contributors'
}}).addTo(map);
L.marker([{lat}, {lon}]).addTo(map).bindPopup('{label}').openPopup();
</script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::PhoneIdentifier;
    use crate::record::Coordinates;

    fn record_with_coords() -> TrackedRecord {
        let id = PhoneIdentifier::normalize("+91 99999 12345").unwrap();
        let mut record = TrackedRecord::new(id);
        record.region = Some("India".to_string());
        record.coordinates = Coordinates::new(17.385044, 78.486671);
        record
    }

    #[test]
    fn test_render_without_coordinates_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MapRenderer::new(dir.path().to_path_buf(), 9);
        let id = PhoneIdentifier::normalize("+91 99999 12345").unwrap();
        let record = TrackedRecord::new(id);

        let err = renderer.render(&record).unwrap_err();
        assert!(matches!(err, RenderError::CoordinatesUnavailable));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_render_writes_leaflet_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MapRenderer::new(dir.path().to_path_buf(), 9);
        let record = record_with_coords();

        let path = renderer.render(&record).unwrap();
        assert!(path.is_absolute());
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("17.385044"));
        assert!(html.contains("78.486671"));
        assert!(html.contains("], 9)"), "zoom level should be embedded");
        assert!(html.contains("India"));
    }

    #[test]
    fn test_artifact_name_derives_from_sanitized_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MapRenderer::new(dir.path().to_path_buf(), 9);
        let record = record_with_coords();

        let path = renderer.render(&record).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(&record.identifier.sanitized()));
        assert!(!name.contains('+'));
        assert!(!name.contains(' '));
        assert!(name.ends_with(".html"));
    }

    #[test]
    fn test_label_escaping() {
        assert_eq!(escape_label("it's"), "it\\'s");
        assert_eq!(escape_label("<script>"), "\\u003cscript\\u003e");
    }
}
