//! Named, filtered layers.

use crate::core::error::{ModelError, ModelResult};
use crate::core::image::Image;
use crate::filters::{FilterName, OneFilter};
use serde::{Deserialize, Serialize};

/// One entry of a project's layer stack.
///
/// A layer is a value: every operation returns a new layer and leaves the receiver as
/// it was.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: String,
    filter: FilterName,
    image: Image,
}

impl Layer {
    /// Create a blank layer with the `normal` filter.
    ///
    /// The name must be non-empty and free of whitespace so it survives the
    /// whitespace-tokenized project format.
    pub fn blank(name: impl Into<String>, height: usize, width: usize) -> ModelResult<Self> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidLayerName(name));
        }

        Ok(Self {
            name,
            filter: FilterName::default(),
            image: Image::blank(height, width)?,
        })
    }

    /// Composite `image` onto this layer with its top-left corner at (`start_y`, `start_x`).
    pub fn combine_image(&self, image: &Image, start_y: i64, start_x: i64) -> ModelResult<Self> {
        if start_y < 0 || start_x < 0 {
            return Err(ModelError::NegativeOffset { y: start_y, x: start_x });
        }

        Ok(Self {
            image: self.image.combine(image, start_y, start_x)?,
            ..self.clone()
        })
    }

    /// Composite another layer's pixels onto this layer.
    pub fn combine_layer(&self, layer: &Layer, start_y: i64, start_x: i64) -> ModelResult<Self> {
        self.combine_image(&layer.image, start_y, start_x)
    }

    /// Assign the filter called `filter_name`. The pixels are untouched.
    pub fn update_filter(&self, filter_name: &str) -> ModelResult<Self> {
        Ok(self.with_filter(FilterName::from_name(filter_name)?))
    }

    /// Assign an already resolved filter.
    pub fn with_filter(&self, filter: FilterName) -> Self {
        Self {
            filter,
            ..self.clone()
        }
    }

    /// The layer with its filter's single-image form applied.
    pub fn apply_filter(&self) -> Self {
        Self {
            image: self.image.apply_filter(self.filter.as_one_filter()),
            ..self.clone()
        }
    }

    /// The layer with its dual-image filter applied against `lower`.
    ///
    /// Fails with an invalid-state error when the assigned filter is single-image only.
    pub fn apply_two_filter(&self, lower: &Image) -> ModelResult<Self> {
        let filter = self
            .filter
            .as_two_filter()
            .ok_or(ModelError::NotDualFilter(self.filter.name()))?;

        Ok(Self {
            image: self.image.apply_two_filter(filter, lower)?,
            ..self.clone()
        })
    }

    /// [`apply_two_filter`](Self::apply_two_filter) against another layer's pixels.
    pub fn apply_two_filter_layer(&self, lower: &Layer) -> ModelResult<Self> {
        self.apply_two_filter(&lower.image)
    }

    /// Layer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// External name of the assigned filter.
    pub fn filter_name(&self) -> &'static str {
        self.filter.name()
    }

    /// The assigned filter.
    pub fn filter(&self) -> FilterName {
        self.filter
    }

    /// The layer's pixels.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Consume the layer and keep its pixels.
    pub fn into_image(self) -> Image {
        self.image
    }

    pub(crate) fn summary(&self) -> LayerSummary {
        LayerSummary {
            name: self.name.clone(),
            filter: self.filter,
        }
    }
}

/// Name and filter of one layer, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSummary {
    /// Layer name.
    pub name: String,
    /// Assigned filter.
    pub filter: FilterName,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pixel::Pixel;

    fn block() -> Image {
        Image::from_rows(vec![
            vec![Pixel::rgb(255, 0, 0), Pixel::rgb(0, 255, 0)],
            vec![Pixel::rgb(0, 0, 255), Pixel::new(10, 20, 30, 128)],
        ])
        .unwrap()
    }

    #[test]
    fn test_blank_layer() {
        let layer = Layer::blank("background", 3, 4).unwrap();
        assert_eq!(layer.name(), "background");
        assert_eq!(layer.filter_name(), "normal");
        assert_eq!(layer.image(), &Image::blank(3, 4).unwrap());
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(
            Layer::blank("", 2, 2).unwrap_err(),
            ModelError::InvalidLayerName(String::new())
        );
        assert!(Layer::blank("two words", 2, 2).unwrap_err().is_invalid_argument());
        assert!(Layer::blank("tab\there", 2, 2).is_err());
        assert!(Layer::blank("ok", 0, 2).is_err());
    }

    #[test]
    fn test_combine_image_returns_new_layer() {
        let layer = Layer::blank("top", 3, 3).unwrap();
        let combined = layer.combine_image(&block(), 1, 1).unwrap();

        assert_eq!(combined.image().pixel(1, 1), Some(Pixel::rgb(255, 0, 0)));
        assert_eq!(combined.image().pixel(0, 0), Some(Pixel::BLANK));
        assert_eq!(layer.image(), &Image::blank(3, 3).unwrap());
        assert_eq!(combined.name(), "top");
    }

    #[test]
    fn test_combine_rejects_negative_offsets() {
        let layer = Layer::blank("top", 3, 3).unwrap();
        assert_eq!(
            layer.combine_image(&block(), -1, 0).unwrap_err(),
            ModelError::NegativeOffset { y: -1, x: 0 }
        );
        assert!(layer.combine_image(&block(), 2, 0).is_err());
    }

    #[test]
    fn test_combine_layer() {
        let source = Layer::blank("source", 2, 2)
            .unwrap()
            .combine_image(&block(), 0, 0)
            .unwrap();
        let target = Layer::blank("target", 2, 2).unwrap();
        let result = target.combine_layer(&source, 0, 0).unwrap();
        assert_eq!(result.image().pixel(1, 0), Some(Pixel::rgb(0, 0, 255)));
    }

    #[test]
    fn test_update_filter() {
        let layer = Layer::blank("a", 2, 2).unwrap();
        let red = layer.update_filter("red_filter").unwrap();
        assert_eq!(red.filter(), FilterName::RedFilter);
        assert_eq!(red.image(), layer.image());
        assert_eq!(layer.filter(), FilterName::Normal);

        assert_eq!(
            layer.update_filter("sepia").unwrap_err(),
            ModelError::UnknownFilter("sepia".to_string())
        );
    }

    #[test]
    fn test_apply_filter() {
        let layer = Layer::blank("a", 2, 2)
            .unwrap()
            .combine_image(&block(), 0, 0)
            .unwrap()
            .update_filter("blue_filter")
            .unwrap();
        let filtered = layer.apply_filter();
        assert_eq!(filtered.image().pixel(0, 0), Some(Pixel::rgb(0, 0, 0)));
        assert_eq!(filtered.image().pixel(1, 0), Some(Pixel::rgb(0, 0, 255)));
        assert_eq!(filtered.filter(), FilterName::BlueFilter);
    }

    #[test]
    fn test_apply_two_filter_requires_dual_filter() {
        let layer = Layer::blank("a", 2, 2).unwrap();
        let lower = Image::blank(2, 2).unwrap();
        let err = layer.apply_two_filter(&lower).unwrap_err();
        assert_eq!(err, ModelError::NotDualFilter("normal"));
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_apply_two_filter() {
        let lower = Layer::blank("lower", 2, 2)
            .unwrap()
            .combine_image(&block(), 0, 0)
            .unwrap();
        let layer = Layer::blank("upper", 2, 2)
            .unwrap()
            .combine_image(&Image::filled(2, 2, Pixel::rgb(0, 0, 0)).unwrap(), 0, 0)
            .unwrap()
            .update_filter("inversion_difference")
            .unwrap();

        let result = layer.apply_two_filter_layer(&lower).unwrap();
        assert_eq!(result.image(), lower.image());
        assert!(layer.apply_two_filter(&Image::blank(1, 2).unwrap()).is_err());
    }
}
