use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use crate::{
    foundation::error::{PhotostoryError, PhotostoryResult},
    story::gps::{GpsCoordinate, LatLong},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A photostory document: an ordered list of slides.
///
/// Image paths may be relative to the document; [`Photostory::load`] resolves them
/// against the directory of the JSON file.
pub struct Photostory {
    /// Seconds each slide is shown; falls back to the planner default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_slide_duration: Option<f64>,
    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// One slide of a story.
pub enum Slide {
    /// Collage of foreground photos with background photos around it.
    PhotoSlide(PhotoSlide),
    /// Route drawn on the world map.
    GpsSlide(GpsSlide),
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Photos of a collage slide.
pub struct PhotoSlide {
    /// Label shown in the slide editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Photos packed into the collage.
    #[serde(default)]
    pub foreground_paths: Vec<PathBuf>,
    /// Photos scattered around the collage.
    #[serde(default)]
    pub background_paths: Vec<PathBuf>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Route of a map slide.
pub struct GpsSlide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Waypoints in travel order.
    #[serde(default)]
    pub gps_coordinates: Vec<GpsCoordinate>,
}

impl Slide {
    pub fn name(&self) -> Option<&str> {
        match self {
            Slide::PhotoSlide(p) => p.name.as_deref(),
            Slide::GpsSlide(g) => g.name.as_deref(),
        }
    }
}

impl GpsSlide {
    /// Parsed waypoints.
    pub fn waypoints(&self) -> PhotostoryResult<Vec<LatLong>> {
        self.gps_coordinates
            .iter()
            .map(GpsCoordinate::lat_long)
            .collect()
    }
}

impl Photostory {
    /// Read, validate and resolve a story file.
    pub fn load(path: impl AsRef<Path>) -> PhotostoryResult<Self> {
        let path = path.as_ref();
        let mut story = Self::from_path(path)?;
        story.validate()?;
        if let Some(dir) = path.parent() {
            story.resolve_paths(dir);
        }
        Ok(story)
    }

    /// Read a story file without validating it.
    pub fn from_path(path: impl AsRef<Path>) -> PhotostoryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PhotostoryError::validation(format!("open story JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn from_reader(r: impl Read) -> PhotostoryResult<Self> {
        serde_json::from_reader(r).map_err(|e| PhotostoryError::serde(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> PhotostoryResult<Self> {
        serde_json::from_str(s).map_err(|e| PhotostoryError::serde(e.to_string()))
    }

    pub fn validate(&self) -> PhotostoryResult<()> {
        if let Some(d) = self.default_slide_duration
            && (!d.is_finite() || d <= 0.0)
        {
            return Err(PhotostoryError::validation(
                "default_slide_duration must be finite and > 0",
            ));
        }

        for (idx, slide) in self.slides.iter().enumerate() {
            match slide {
                Slide::PhotoSlide(p) => {
                    for path in p.foreground_paths.iter().chain(&p.background_paths) {
                        if path.as_os_str().is_empty() {
                            return Err(PhotostoryError::validation(format!(
                                "slide {idx}: image path must be non-empty"
                            )));
                        }
                    }
                }
                Slide::GpsSlide(g) => {
                    g.waypoints().map_err(|e| match e {
                        PhotostoryError::Validation(msg) => {
                            PhotostoryError::validation(format!("slide {idx}: {msg}"))
                        }
                        other => other,
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Join relative image paths onto `base_dir`. Absolute paths are kept.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        for slide in &mut self.slides {
            if let Slide::PhotoSlide(p) = slide {
                for path in p
                    .foreground_paths
                    .iter_mut()
                    .chain(p.background_paths.iter_mut())
                {
                    if path.is_relative() {
                        *path = base_dir.join(&*path);
                    }
                }
            }
        }
    }

    /// Every referenced image path once, in first-seen order.
    pub fn unique_image_paths(&self) -> Vec<PathBuf> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for slide in &self.slides {
            if let Slide::PhotoSlide(p) = slide {
                for path in p.foreground_paths.iter().chain(&p.background_paths) {
                    if seen.insert(path.clone()) {
                        out.push(path.clone());
                    }
                }
            }
        }
        out
    }

    pub fn has_gps_slides(&self) -> bool {
        self.slides
            .iter()
            .any(|s| matches!(s, Slide::GpsSlide(_)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/model.rs"]
mod tests;
