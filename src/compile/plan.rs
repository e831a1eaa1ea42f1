use std::path::PathBuf;

use crate::{
    assets::probe::ImageSizes,
    foundation::core::{Point, Rectangle, Vec2, ensure_canvas},
    foundation::error::{PhotostoryError, PhotostoryResult},
    foundation::math::slide_seed,
    layout::scatter::LayoutRng,
    layout::solver::{LayoutOpts, LayoutScale, ensure_slide_inputs, generate_layout_with},
    story::gps::{GpsCoordinate, route_length, world_map_rect},
    story::model::{PhotoSlide, Photostory, Slide},
};

/// Horizontal gap between consecutive slides, relative to the canvas width.
pub const DEFAULT_SLIDE_GAP_RATIO: f64 = 0.08;
/// Seconds a slide is shown when neither the story nor the options say otherwise.
pub const DEFAULT_SLIDE_DURATION: f64 = 4.5;
/// Standard deviation (radians) of the tilt given to each foreground photo.
pub const DEFAULT_PHOTO_ROTATION_STD_DEV: f64 = 0.02;
/// Background photos tilt this many times more than foreground photos.
pub const DEFAULT_BACKGROUND_ROTATION_FACTOR: f64 = 6.0;
/// Seconds spent zooming onto the map before a route is drawn.
pub const DEFAULT_MAP_ZOOM_DURATION: f64 = 3.0;
/// Seconds of route animation per waypoint.
pub const DEFAULT_ROUTE_SECONDS_PER_WAYPOINT: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Options of [`plan_story`].
pub struct PlanOpts {
    /// Slide canvas; every slide uses the same one, offset along `x`.
    pub canvas: Rectangle,
    /// Story seed. Slide `i` draws from a generator derived from `(seed, i)`.
    pub seed: u64,
    pub slide_gap_ratio: f64,
    /// Used when the story has no `default_slide_duration`.
    pub default_slide_duration: f64,
    pub photo_rotation_std_dev: f64,
    /// Multiplier on `photo_rotation_std_dev` for background photos.
    pub background_rotation_factor: f64,
    pub map_zoom_duration: f64,
    pub route_seconds_per_waypoint: f64,
    pub layout: LayoutOpts,
}

impl Default for PlanOpts {
    fn default() -> Self {
        Self {
            canvas: Rectangle::new(0.0, 0.0, 1920.0, 1080.0),
            seed: 0,
            slide_gap_ratio: DEFAULT_SLIDE_GAP_RATIO,
            default_slide_duration: DEFAULT_SLIDE_DURATION,
            photo_rotation_std_dev: DEFAULT_PHOTO_ROTATION_STD_DEV,
            background_rotation_factor: DEFAULT_BACKGROUND_ROTATION_FACTOR,
            map_zoom_duration: DEFAULT_MAP_ZOOM_DURATION,
            route_seconds_per_waypoint: DEFAULT_ROUTE_SECONDS_PER_WAYPOINT,
            layout: LayoutOpts::default(),
        }
    }
}

impl PlanOpts {
    pub fn validate(&self) -> PhotostoryResult<()> {
        ensure_canvas(&self.canvas)?;
        for (name, value) in [
            ("slide_gap_ratio", self.slide_gap_ratio),
            ("photo_rotation_std_dev", self.photo_rotation_std_dev),
            ("background_rotation_factor", self.background_rotation_factor),
            ("map_zoom_duration", self.map_zoom_duration),
            ("route_seconds_per_waypoint", self.route_seconds_per_waypoint),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PhotostoryError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.default_slide_duration.is_finite() || self.default_slide_duration <= 0.0 {
            return Err(PhotostoryError::validation(
                "default_slide_duration must be finite and > 0",
            ));
        }
        self.layout.validate()
    }

    /// Top-left corner of slide `index` in story space.
    pub fn slide_origin(&self, index: usize) -> Point {
        let step = self.canvas.width + self.slide_gap_ratio * self.canvas.width;
        Point::new(index as f64 * step, 0.0)
    }
}

/// Laid out story: one entry per slide, in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoryLayout {
    pub canvas: Rectangle,
    /// World map placement, present when the story has a GPS slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_map: Option<Rectangle>,
    pub slides: Vec<SlideLayout>,
}

impl StoryLayout {
    /// Sum of all slide durations in seconds.
    pub fn total_duration(&self) -> f64 {
        self.slides.iter().map(|s| s.duration).sum()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideLayout {
    pub index: usize,
    /// Slide name from the story, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Offset of the slide canvas in story space.
    pub origin: Point,
    /// Seconds the slide is shown.
    pub duration: f64,
    pub content: SlideContent,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideContent {
    Photo(PhotoLayout),
    Gps(RouteLayout),
}

/// Placed photos of a collage slide, in slide-local canvas coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhotoLayout {
    pub foreground: Vec<PlacedPhoto>,
    pub background: Vec<PlacedPhoto>,
    /// Absent for a slide without photos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<LayoutScale>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacedPhoto {
    pub path: PathBuf,
    pub rect: Rectangle,
    /// Tilt around the photo center, in radians.
    pub rotation: f64,
    /// Stacking order in `[0, 1]`; foreground photos sit at `1`.
    pub depth: f64,
}

/// Route of a GPS slide in world map coordinates (relative to the map's top-left corner).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RouteLayout {
    pub points: Vec<Point>,
    pub length: f64,
}

/// Lay out every slide of `story`.
///
/// Image sizes come from `sizes`. Slides are independent: each one gets its own random
/// generator derived from `opts.seed` and the slide index, so inserting a slide does not
/// reshuffle the ones before it. Any error aborts the whole plan.
#[tracing::instrument(skip_all, fields(slides = story.slides.len(), seed = opts.seed))]
pub fn plan_story(
    story: &Photostory,
    sizes: &mut dyn ImageSizes,
    opts: &PlanOpts,
) -> PhotostoryResult<StoryLayout> {
    opts.validate()?;
    story.validate()?;

    let duration = story
        .default_slide_duration
        .unwrap_or(opts.default_slide_duration);
    let world_map = story.has_gps_slides().then(|| world_map_rect(&opts.canvas));

    let mut slides = Vec::with_capacity(story.slides.len());
    for (index, slide) in story.slides.iter().enumerate() {
        let content = match slide {
            Slide::PhotoSlide(p) => {
                let mut rng = LayoutRng::from_seed(slide_seed(opts.seed, index));
                SlideContent::Photo(
                    plan_photo_slide(p, sizes, opts, &mut rng)
                        .map_err(|e| with_slide_index(e, index))?,
                )
            }
            Slide::GpsSlide(g) => {
                let map = world_map.ok_or_else(|| {
                    PhotostoryError::validation("gps slide without a world map")
                })?;
                SlideContent::Gps(
                    plan_route(&g.gps_coordinates, &map).map_err(|e| with_slide_index(e, index))?,
                )
            }
        };
        let duration = match &content {
            SlideContent::Photo(_) => duration,
            SlideContent::Gps(route) => {
                opts.map_zoom_duration
                    + opts.route_seconds_per_waypoint * route.points.len() as f64
            }
        };
        slides.push(SlideLayout {
            index,
            name: slide.name().map(str::to_owned),
            origin: opts.slide_origin(index),
            duration,
            content,
        });
    }

    tracing::info!(slides = slides.len(), "story planned");
    Ok(StoryLayout {
        canvas: opts.canvas,
        world_map,
        slides,
    })
}

fn plan_photo_slide(
    slide: &PhotoSlide,
    sizes: &mut dyn ImageSizes,
    opts: &PlanOpts,
    rng: &mut LayoutRng,
) -> PhotostoryResult<PhotoLayout> {
    let mut fg = rects_for(&slide.foreground_paths, sizes)?;
    let mut bg = rects_for(&slide.background_paths, sizes)?;
    ensure_slide_inputs(&fg, &bg)?;
    if fg.is_empty() {
        return Ok(PhotoLayout {
            foreground: Vec::new(),
            background: Vec::new(),
            scale: None,
        });
    }

    let scale = generate_layout_with(&mut fg, &mut bg, &opts.canvas, &opts.layout, rng)?;

    let foreground = slide
        .foreground_paths
        .iter()
        .zip(fg)
        .map(|(path, rect)| PlacedPhoto {
            path: path.clone(),
            rect,
            rotation: rng.gaussian(opts.photo_rotation_std_dev),
            depth: 1.0,
        })
        .collect();
    // Foreground tilts are drawn first.
    let bg_rotation_std_dev = opts.background_rotation_factor * opts.photo_rotation_std_dev;
    let n_bg = bg.len() as f64;
    let background = slide
        .background_paths
        .iter()
        .zip(bg)
        .enumerate()
        .map(|(i, (path, rect))| PlacedPhoto {
            path: path.clone(),
            rect,
            rotation: rng.gaussian(bg_rotation_std_dev),
            depth: i as f64 / n_bg,
        })
        .collect();

    Ok(PhotoLayout {
        foreground,
        background,
        scale: Some(scale),
    })
}

fn rects_for(
    paths: &[PathBuf],
    sizes: &mut dyn ImageSizes,
) -> PhotostoryResult<Vec<Rectangle>> {
    paths
        .iter()
        .map(|p| sizes.size_of(p).map(Rectangle::from_size))
        .collect()
}

fn plan_route(coords: &[GpsCoordinate], map: &Rectangle) -> PhotostoryResult<RouteLayout> {
    let points = coords
        .iter()
        .map(|c| c.lat_long().map(|ll| ll.to_map_xy(map.size())))
        .collect::<PhotostoryResult<Vec<_>>>()?;
    let length = route_length(&points);
    Ok(RouteLayout { points, length })
}

fn with_slide_index(e: PhotostoryError, index: usize) -> PhotostoryError {
    match e {
        PhotostoryError::InvalidCanvas(m) => {
            PhotostoryError::invalid_canvas(format!("slide {index}: {m}"))
        }
        PhotostoryError::EmptyInput(m) => PhotostoryError::empty_input(format!("slide {index}: {m}")),
        PhotostoryError::Placement(m) => PhotostoryError::placement(format!("slide {index}: {m}")),
        PhotostoryError::Validation(m) => PhotostoryError::validation(format!("slide {index}: {m}")),
        PhotostoryError::Serde(m) => PhotostoryError::serde(format!("slide {index}: {m}")),
        PhotostoryError::Other(e) => PhotostoryError::Other(e.context(format!("slide {index}"))),
    }
}

/// Translate a slide-local rectangle into story space.
pub fn to_story_space(slide: &SlideLayout, rect: &Rectangle) -> Rectangle {
    let mut r = *rect;
    r.translate(Vec2::new(slide.origin.x, slide.origin.y));
    r
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
