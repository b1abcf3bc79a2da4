use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Reference to a pre-decoded image, addressed by path or URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    /// Path or URL the host resolves to a bitmap.
    pub location: String,
    /// Short name for thumbnails and the HUD.
    pub label: String,
}

impl ImageSource {
    /// Build a source whose label is the last path segment of `location`.
    pub fn new(location: impl Into<String>) -> Self {
        let location = location.into();
        let label = location
            .rsplit(['/', '\\'])
            .find(|s| !s.is_empty())
            .unwrap_or(location.as_str())
            .to_string();
        Self { location, label }
    }

    pub fn with_label(location: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            label: label.into(),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(location: &str) -> Self {
        Self::new(location)
    }
}

impl From<String> for ImageSource {
    fn from(location: String) -> Self {
        Self::new(location)
    }
}

/// Ordered, non-empty list of images with a wrapping cursor.
#[derive(Debug, Clone)]
pub struct ImageSet {
    images: Vec<ImageSource>,
    current: usize,
}

impl ImageSet {
    pub fn new(images: Vec<ImageSource>) -> crate::Result<Self> {
        if images.is_empty() {
            return Err(CoreError::EmptyImageSet);
        }
        Ok(Self { images, current: 0 })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &ImageSource {
        &self.images[self.current]
    }

    pub fn get(&self, index: usize) -> Option<&ImageSource> {
        self.images.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageSource> {
        self.images.iter()
    }

    /// Advance by one, wrapping from the last image to the first.
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.images.len();
        self.current
    }

    /// Step back by one, wrapping from the first image to the last.
    pub fn retreat(&mut self) -> usize {
        let len = self.images.len();
        self.current = (self.current + len - 1) % len;
        self.current
    }

    pub fn select(&mut self, index: usize) -> crate::Result<usize> {
        if index >= self.images.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.images.len(),
            });
        }
        self.current = index;
        Ok(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> ImageSet {
        ImageSet::new(vec![
            "assets/img/photo1.jpg".into(),
            "assets/img/photo2.jpg".into(),
            "assets/img/photo3.jpg".into(),
        ])
        .unwrap()
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(ImageSet::new(Vec::new()).unwrap_err(), CoreError::EmptyImageSet);
    }

    #[test]
    fn advance_wraps_to_first() {
        let mut set = three();
        set.select(2).unwrap();
        assert_eq!(set.advance(), 0);
    }

    #[test]
    fn retreat_wraps_to_last() {
        let mut set = three();
        assert_eq!(set.retreat(), 2);
        assert_eq!(set.retreat(), 1);
    }

    #[test]
    fn select_out_of_range_keeps_index() {
        let mut set = three();
        set.select(1).unwrap();
        assert_eq!(
            set.select(3).unwrap_err(),
            CoreError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(set.current_index(), 1);
    }

    #[test]
    fn label_is_file_name() {
        assert_eq!(ImageSource::new("assets/img/photo1.jpg").label, "photo1.jpg");
        assert_eq!(ImageSource::new(r"C:\pics\a.png").label, "a.png");
        assert_eq!(ImageSource::new("plain").label, "plain");
        assert_eq!(ImageSource::with_label("x/y.png", "Y").label, "Y");
    }

    #[test]
    fn single_image_wraps_onto_itself() {
        let mut set = ImageSet::new(vec!["only.png".into()]).unwrap();
        assert_eq!(set.advance(), 0);
        assert_eq!(set.retreat(), 0);
    }
}
