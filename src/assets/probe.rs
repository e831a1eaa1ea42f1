use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    foundation::core::Size,
    foundation::error::{PhotostoryError, PhotostoryResult},
};

/// Source of intrinsic image sizes for layout.
pub trait ImageSizes {
    /// Width and height of the image at `path`, in pixels.
    fn size_of(&mut self, path: &Path) -> PhotostoryResult<Size>;
}

/// Sizes resolved up front by the caller.
impl ImageSizes for BTreeMap<PathBuf, Size> {
    fn size_of(&mut self, path: &Path) -> PhotostoryResult<Size> {
        self.get(path).copied().ok_or_else(|| {
            PhotostoryError::validation(format!("no size known for image '{}'", path.display()))
        })
    }
}

/// Reads image headers from disk (no pixel decoding) and caches the result per path.
#[derive(Debug, Default)]
pub struct ProbedImageSizes {
    cache: BTreeMap<PathBuf, Size>,
}

impl ProbedImageSizes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe every path once, logging the ones that cannot be read.
    ///
    /// Returns how many paths were probed successfully.
    pub fn prefetch<'a, I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        let mut ok = 0;
        for path in paths {
            if self.size_of(path).is_ok() {
                ok += 1;
            }
        }
        ok
    }

    pub fn cached(&self) -> impl Iterator<Item = (&PathBuf, &Size)> {
        self.cache.iter()
    }
}

impl ImageSizes for ProbedImageSizes {
    #[tracing::instrument(skip(self))]
    fn size_of(&mut self, path: &Path) -> PhotostoryResult<Size> {
        if let Some(size) = self.cache.get(path) {
            return Ok(*size);
        }
        let (w, h) = match image::image_dimensions(path)
            .with_context(|| format!("read image header '{}'", path.display()))
        {
            Ok(dims) => dims,
            Err(e) => {
                tracing::warn!("loading image {} failed: {e:#}", path.display());
                return Err(e.into());
            }
        };
        if w == 0 || h == 0 {
            return Err(PhotostoryError::validation(format!(
                "image '{}' has an empty size {w}x{h}",
                path.display()
            )));
        }
        let size = Size::new(f64::from(w), f64::from(h));
        self.cache.insert(path.to_path_buf(), size);
        Ok(size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/probe.rs"]
mod tests;
