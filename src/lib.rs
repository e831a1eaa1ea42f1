//! Photostory lays out photo slideshows.
//!
//! A story is a JSON list of slides. Photo slides pack their foreground photos into a
//! collage that fills the slide canvas and scatter background photos around it; GPS
//! slides project a route onto an equirectangular world map.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `story.json -> Photostory` (validated, image paths resolved)
//! 2. **Probe**: image paths -> sizes via [`ImageSizes`] (headers only, no decoding)
//! 3. **Plan**: `Photostory -> StoryLayout` via [`plan_story`], one layout per slide
//!
//! The per-slide layout ([`generate_layout`]) is usable on its own: pack foreground
//! rectangles ([`pack_rectangles`]), center them ([`center_layout`]), then place the
//! background ([`scatter_background`]), which casts rays ([`Ray`]) from the canvas
//! center to find free space.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic with a seed**: a seeded [`LayoutRng`] gives identical layouts.
//! - **All or nothing**: a failing layout call leaves its inputs untouched.
//! - **y-down**: the canvas origin is the top-left corner.
#![forbid(unsafe_code)]

mod assets;
mod compile;
mod foundation;
mod geometry;
mod layout;
mod story;

pub use assets::probe::{ImageSizes, ProbedImageSizes};
pub use compile::plan::{
    DEFAULT_BACKGROUND_ROTATION_FACTOR, DEFAULT_MAP_ZOOM_DURATION, DEFAULT_PHOTO_ROTATION_STD_DEV,
    DEFAULT_ROUTE_SECONDS_PER_WAYPOINT, DEFAULT_SLIDE_DURATION, DEFAULT_SLIDE_GAP_RATIO,
    PhotoLayout, PlacedPhoto, PlanOpts, RouteLayout, SlideContent, SlideLayout, StoryLayout,
    plan_story, to_story_space,
};
pub use foundation::core::{Point, Rectangle, Size, Vec2};
pub use foundation::error::{PhotostoryError, PhotostoryResult};
pub use foundation::math::approx_eq;
pub use geometry::ray::{
    Ray, intersect_ray_rectangle, intersect_ray_rectangles, intersect_ray_segment,
};
pub use layout::pack::{
    DEFAULT_OVERLAP_MARGIN, Placement, pack_rectangles, pack_rectangles_with_margin,
    plan_packing,
};
pub use layout::regions::{background_regions, sample_in_regions, scatter_in_regions};
pub use layout::scatter::{
    DEFAULT_ANGLE_JITTER, DEFAULT_BACKGROUND_SCALE, LayoutRng, ScatterOpts, scatter_background,
    scatter_background_with,
};
pub use layout::solver::{
    BackgroundStrategy, DEFAULT_FOREGROUND_SHRINK, LayoutOpts, LayoutScale, center_layout,
    generate_layout, generate_layout_with, scale_layout,
};
pub use story::gps::{GpsCoordinate, LatLong, WORLD_MAP_SIZE, route_length, world_map_rect};
pub use story::model::{GpsSlide, PhotoSlide, Photostory, Slide};
