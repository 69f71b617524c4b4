//! The project: a canvas and its ordered layer stack, and the flattening algorithm.

use crate::codec::collage;
use crate::codec::CodecResult;
use crate::core::error::{ModelError, ModelResult};
use crate::core::image::{check_dimensions, Image};
use crate::filters::FilterName;
use crate::project::layer::{Layer, LayerSummary};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// A canvas with a bottom-to-top stack of layers.
///
/// The project starts without a canvas. [`create_project`](Self::create_project) sets one
/// up and discards any layers; every layer's image always matches the canvas size.
#[derive(Debug, Clone, Default)]
pub struct Project {
    canvas: Option<Canvas>,
    layers: Vec<Layer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Canvas {
    height: usize,
    width: usize,
}

impl Project {
    /// Create a project with no canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish a `height` x `width` canvas, discarding every existing layer.
    pub fn create_project(&mut self, height: usize, width: usize) -> ModelResult<()> {
        check_dimensions(height, width)?;

        self.canvas = Some(Canvas { height, width });
        self.layers.clear();
        debug!("Created {}x{} project", height, width);
        Ok(())
    }

    /// Check if a canvas has been created.
    pub fn has_project(&self) -> bool {
        self.canvas.is_some()
    }

    /// Append a blank layer called `name` on top of the stack.
    pub fn add_layer(&mut self, name: &str) -> ModelResult<()> {
        let canvas = self.canvas()?;
        if self.position(name).is_some() {
            return Err(ModelError::DuplicateLayer(name.to_string()));
        }

        self.layers.push(Layer::blank(name, canvas.height, canvas.width)?);
        debug!("Added layer '{}' ({} total)", name, self.layers.len());
        Ok(())
    }

    /// Composite `image` into the layer called `name` at (`start_y`, `start_x`).
    pub fn add_image(
        &mut self,
        name: &str,
        image: &Image,
        start_y: i64,
        start_x: i64,
    ) -> ModelResult<()> {
        let index = self.layer_index(name)?;
        let updated = self.layers[index].combine_image(image, start_y, start_x)?;
        self.layers[index] = updated;
        debug!(
            "Placed {}x{} image on layer '{}' at ({}, {})",
            image.height(),
            image.width(),
            name,
            start_y,
            start_x
        );
        Ok(())
    }

    /// Assign the filter called `filter_name` to the layer called `name`.
    pub fn set_filter(&mut self, name: &str, filter_name: &str) -> ModelResult<()> {
        let index = self.layer_index(name)?;
        let updated = self.layers[index].update_filter(filter_name)?;
        self.layers[index] = updated;
        debug!("Set filter of layer '{}' to {}", name, filter_name);
        Ok(())
    }

    /// Layer names, bottom to top.
    pub fn layer_names(&self) -> ModelResult<Vec<String>> {
        Ok(self
            .populated_layers()?
            .iter()
            .map(|layer| layer.name().to_string())
            .collect())
    }

    /// The layer stack, bottom to top.
    pub fn layers(&self) -> ModelResult<&[Layer]> {
        self.populated_layers()
    }

    /// Canvas height, 0 when no project exists.
    pub fn height(&self) -> usize {
        self.canvas.map_or(0, |canvas| canvas.height)
    }

    /// Canvas width, 0 when no project exists.
    pub fn width(&self) -> usize {
        self.canvas.map_or(0, |canvas| canvas.width)
    }

    /// Flatten the whole stack.
    pub fn final_image(&self) -> ModelResult<Image> {
        flatten(self.populated_layers()?)
    }

    /// Flatten the stack up to and including the layer called `name`.
    pub fn image_at_layer(&self, name: &str) -> ModelResult<Image> {
        let index = self.layer_index(name)?;
        flatten(&self.layers[..=index])
    }

    /// Replace this project with the one described by collage text.
    ///
    /// The project is rebuilt through the public operations, so a malformed file cannot
    /// produce a project that breaks the canvas invariant. On failure the project is left
    /// as it was.
    pub fn load_project(&mut self, text: &str) -> CodecResult<()> {
        let data = collage::parse(text)?;

        let mut loaded = Project::new();
        loaded.create_project(data.height, data.width)?;
        for layer in &data.layers {
            loaded.add_layer(&layer.name)?;
            loaded.set_filter(&layer.name, &layer.filter)?;
            loaded.add_image(&layer.name, &layer.image, 0, 0)?;
        }

        debug!(
            "Loaded {}x{} project with {} layers",
            data.height,
            data.width,
            data.layers.len()
        );
        *self = loaded;
        Ok(())
    }

    /// Every filter a layer can carry, in catalog order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        FilterName::all().map(|filter| filter.name()).collect()
    }

    /// Canvas size and layer list, for reporting.
    pub fn summary(&self) -> ModelResult<ProjectSummary> {
        let canvas = self.canvas()?;
        Ok(ProjectSummary {
            height: canvas.height,
            width: canvas.width,
            layers: self.layers.iter().map(Layer::summary).collect(),
        })
    }

    fn canvas(&self) -> ModelResult<Canvas> {
        self.canvas.ok_or(ModelError::NoProject)
    }

    fn populated_layers(&self) -> ModelResult<&[Layer]> {
        self.canvas()?;
        if self.layers.is_empty() {
            return Err(ModelError::NoLayers);
        }
        Ok(&self.layers)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.name() == name)
    }

    fn layer_index(&self, name: &str) -> ModelResult<usize> {
        self.canvas()?;
        self.position(name)
            .ok_or_else(|| ModelError::UnknownLayer(name.to_string()))
    }
}

/// Flatten a layer stack bottom to top.
///
/// Dual-image layers are first blended with the running composite, which the blend
/// then replaces; every layer is finally composited over the result in its single-image
/// form. Layers whose filter is single-image only skip the blend.
fn flatten(layers: &[Layer]) -> ModelResult<Image> {
    let (bottom, rest) = layers.split_first().ok_or(ModelError::NoLayers)?;

    let mut result = bottom.apply_filter().into_image();
    trace!("Flatten base '{}' ({})", bottom.name(), bottom.filter_name());

    for layer in rest {
        if layer.filter().is_dual() {
            trace!("Blending '{}' with {}", layer.name(), layer.filter_name());
            result = layer.apply_two_filter(&result)?.into_image();
        } else {
            trace!("Layer '{}' has no dual-image form, skipping blend", layer.name());
        }

        result = result.combine(layer.apply_filter().image(), 0, 0)?;
    }

    Ok(result)
}

/// Canvas size and layer list of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Canvas height.
    pub height: usize,
    /// Canvas width.
    pub width: usize,
    /// Layers bottom to top.
    pub layers: Vec<LayerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pixel::Pixel;

    fn block() -> Image {
        Image::from_rows(vec![
            vec![Pixel::rgb(255, 255, 255), Pixel::rgb(12, 40, 48)],
            vec![Pixel::rgb(33, 2, 3), Pixel::rgb(0, 0, 0)],
        ])
        .unwrap()
    }

    fn single(pixel: Pixel) -> Image {
        Image::filled(1, 1, pixel).unwrap()
    }

    #[test]
    fn test_no_project_state() {
        let mut project = Project::new();
        assert!(!project.has_project());
        assert_eq!((project.height(), project.width()), (0, 0));

        assert_eq!(project.add_layer("a").unwrap_err(), ModelError::NoProject);
        assert!(project.set_filter("a", "normal").unwrap_err().is_invalid_state());
        assert!(project.set_filter("a", "sepia").unwrap_err().is_invalid_state());
        assert!(project.final_image().unwrap_err().is_invalid_state());
        assert!(project.layer_names().unwrap_err().is_invalid_state());
        assert!(project.summary().is_err());
    }

    #[test]
    fn test_no_layers_state() {
        let mut project = Project::new();
        project.create_project(2, 2).unwrap();
        assert_eq!(project.final_image().unwrap_err(), ModelError::NoLayers);
        assert_eq!(project.layers().unwrap_err(), ModelError::NoLayers);
        assert_eq!(project.layer_names().unwrap_err(), ModelError::NoLayers);
        assert_eq!(
            project.set_filter("missing", "normal").unwrap_err(),
            ModelError::UnknownLayer("missing".to_string())
        );
    }

    #[test]
    fn test_invalid_canvas() {
        let mut project = Project::new();
        assert!(project.create_project(0, 5).unwrap_err().is_invalid_argument());
        assert!(project.create_project(5, 0).is_err());
        assert!(!project.has_project());

        let huge = 1usize << 33;
        assert_eq!(
            project.create_project(huge, huge),
            Err(ModelError::InvalidDimensions { height: huge, width: huge })
        );
        assert_eq!(project.add_layer("a"), Err(ModelError::NoProject));
    }

    #[test]
    fn test_single_block_on_canvas() {
        let mut project = Project::new();
        project.create_project(4, 5).unwrap();
        project.add_layer("test").unwrap();
        project.add_image("test", &block(), 0, 0).unwrap();

        let image = project.final_image().unwrap();
        assert_eq!(image.height(), 4);
        assert_eq!(image.width(), 5);
        assert_eq!(image.pixel(0, 0).unwrap().as_rgb(), block().pixel(0, 0).unwrap().as_rgb());
        assert_eq!(image.pixel(1, 1), Some(Pixel::rgb(0, 0, 0)));
        for (y, x) in [(0, 2), (2, 0), (3, 4), (2, 2)] {
            assert_eq!(image.pixel(y, x).unwrap().as_rgb(), [0, 0, 0]);
            assert_eq!(image.pixel(y, x).unwrap().alpha(), 0);
        }
    }

    #[test]
    fn test_three_layer_stack() {
        let red = Pixel::rgb(255, 0, 0);
        let green = Pixel::rgb(0, 255, 0);
        let blue = Pixel::rgb(0, 0, 255);

        let mut project = Project::new();
        project.create_project(2, 2).unwrap();
        project.add_layer("bottom").unwrap();
        project.add_layer("middle").unwrap();
        project.add_layer("top").unwrap();
        project.add_image("bottom", &single(red), 0, 0).unwrap();
        project.add_image("middle", &single(green), 1, 0).unwrap();
        project.add_image("top", &single(blue), 0, 1).unwrap();

        let image = project.final_image().unwrap();
        assert_eq!(image.pixel(0, 0), Some(red));
        assert_eq!(image.pixel(0, 1), Some(blue));
        assert_eq!(image.pixel(1, 0), Some(green));
        assert_eq!(image.pixel(1, 1).unwrap().as_rgba(), [0, 0, 0, 0]);

        assert_eq!(
            project.layer_names().unwrap(),
            vec!["bottom".to_string(), "middle".to_string(), "top".to_string()]
        );
    }

    #[test]
    fn test_image_at_layer_is_prefix_flatten() {
        let mut project = Project::new();
        project.create_project(1, 2).unwrap();
        project.add_layer("a").unwrap();
        project.add_layer("b").unwrap();
        project.add_image("a", &single(Pixel::rgb(10, 10, 10)), 0, 0).unwrap();
        project.add_image("b", &single(Pixel::rgb(20, 20, 20)), 0, 0).unwrap();

        assert_eq!(
            project.image_at_layer("a").unwrap().pixel(0, 0),
            Some(Pixel::rgb(10, 10, 10))
        );
        assert_eq!(
            project.image_at_layer("b").unwrap(),
            project.final_image().unwrap()
        );
        assert!(project.image_at_layer("c").is_err());
    }

    #[test]
    fn test_duplicate_layer() {
        let mut project = Project::new();
        project.create_project(2, 2).unwrap();
        project.add_layer("test").unwrap();
        let err = project.add_layer("test").unwrap_err();
        assert_eq!(err.to_string(), "Name already exists: test");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_create_project_discards_layers() {
        let mut project = Project::new();
        project.create_project(2, 2).unwrap();
        project.add_layer("a").unwrap();
        project.add_layer("b").unwrap();

        project.create_project(3, 4).unwrap();
        assert_eq!(project.layers().unwrap_err(), ModelError::NoLayers);
        assert_eq!((project.height(), project.width()), (3, 4));

        project.add_layer("a").unwrap();
        assert_eq!(project.layers().unwrap()[0].image().height(), 3);
    }

    #[test]
    fn test_set_filter() {
        let mut project = Project::new();
        project.create_project(2, 2).unwrap();
        project.add_layer("a").unwrap();

        let err = project.set_filter("a", "sepia").unwrap_err();
        assert_eq!(err, ModelError::UnknownFilter("sepia".to_string()));
        assert!(err.is_invalid_argument());

        project.set_filter("a", "green_filter").unwrap();
        assert_eq!(project.layers().unwrap()[0].filter(), FilterName::GreenFilter);
    }

    #[test]
    fn test_add_image_failures_keep_layer() {
        let mut project = Project::new();
        project.create_project(2, 2).unwrap();
        project.add_layer("a").unwrap();

        assert!(project.add_image("a", &block(), 1, 0).is_err());
        assert!(project.add_image("a", &block(), 0, -1).is_err());
        assert!(project.add_image("missing", &block(), 0, 0).is_err());
        assert_eq!(project.final_image().unwrap(), Image::blank(2, 2).unwrap());
    }

    #[test]
    fn test_channel_filter_in_stack() {
        let mut project = Project::new();
        project.create_project(1, 1).unwrap();
        project.add_layer("a").unwrap();
        project.add_image("a", &single(Pixel::rgb(10, 20, 30)), 0, 0).unwrap();
        project.set_filter("a", "red_filter").unwrap();

        assert_eq!(project.final_image().unwrap().pixel(0, 0), Some(Pixel::rgb(10, 0, 0)));
    }

    #[test]
    fn test_dual_filter_blends_running_composite() {
        let mut project = Project::new();
        project.create_project(1, 1).unwrap();
        project.add_layer("base").unwrap();
        project.add_layer("diff").unwrap();
        project.add_image("base", &single(Pixel::rgb(200, 100, 50)), 0, 0).unwrap();
        project.add_image("diff", &single(Pixel::new(50, 50, 50, 0)), 0, 0).unwrap();
        project.set_filter("diff", "inversion_difference").unwrap();

        let base = project.image_at_layer("base").unwrap();
        let image = project.final_image().unwrap();

        // The transparent top blends to the composite itself, and its single-image form
        // (difference against a blank pixel) is transparent too.
        assert_eq!(base.pixel(0, 0), Some(Pixel::rgb(200, 100, 50)));
        assert_eq!(image.pixel(0, 0), Some(Pixel::rgb(200, 100, 50)));
    }

    #[test]
    fn test_dual_filter_sees_everything_below() {
        let mut project = Project::new();
        project.create_project(1, 2).unwrap();
        project.add_layer("base").unwrap();
        project.add_layer("middle").unwrap();
        project.add_layer("top").unwrap();
        project
            .add_image("base", &Image::filled(1, 2, Pixel::rgb(200, 100, 50)).unwrap(), 0, 0)
            .unwrap();
        project.add_image("middle", &single(Pixel::new(0, 0, 255, 128)), 0, 0).unwrap();
        project
            .add_image("top", &Image::filled(1, 2, Pixel::rgb(255, 255, 255)).unwrap(), 0, 0)
            .unwrap();
        project.set_filter("top", "inversion_difference").unwrap();

        let below = project.image_at_layer("middle").unwrap();
        assert_eq!(below.pixel(0, 0), Some(Pixel::rgb(100, 50, 153)));
        assert_eq!(below.pixel(0, 1), Some(Pixel::rgb(200, 100, 50)));

        // White minus the base+middle composite, not minus the middle layer alone.
        let image = project.final_image().unwrap();
        assert_eq!(image.pixel(0, 0), Some(Pixel::rgb(155, 205, 102)));
        assert_eq!(image.pixel(0, 1), Some(Pixel::rgb(55, 155, 205)));
    }

    #[test]
    fn test_lightness_blends_in_stack() {
        let blended = |filter: &str| {
            let mut project = Project::new();
            project.create_project(1, 1).unwrap();
            project.add_layer("base").unwrap();
            project.add_layer("blend").unwrap();
            project.add_image("base", &single(Pixel::rgb(47, 75, 83)), 0, 0).unwrap();
            project.add_image("blend", &single(Pixel::rgb(12, 40, 48)), 0, 0).unwrap();
            project.set_filter("blend", filter).unwrap();
            project.final_image().unwrap().pixel(0, 0).unwrap()
        };

        assert_eq!(blended("darken_multiply"), Pixel::rgb(6, 9, 10));
        assert_eq!(blended("brighten_screen"), Pixel::rgb(63, 101, 112));
        assert_eq!(blended("inversion_difference"), Pixel::rgb(35, 35, 35));
    }

    #[test]
    fn test_load_project() {
        let text = "C1\n2 1\n255\nbg green_filter\n10 20 30 255\n40 50 60 255\n";
        let mut project = Project::new();
        project.load_project(text).unwrap();

        assert_eq!((project.height(), project.width()), (1, 2));
        let summary = project.summary().unwrap();
        assert_eq!(summary.layers.len(), 1);
        assert_eq!(summary.layers[0].filter, FilterName::GreenFilter);
        assert_eq!(
            project.final_image().unwrap().pixel(0, 1),
            Some(Pixel::rgb(0, 50, 0))
        );
    }

    #[test]
    fn test_failed_load_keeps_project() {
        let mut project = Project::new();
        project.create_project(2, 2).unwrap();
        project.add_layer("keep").unwrap();

        assert!(project.load_project("C1\n1 1\n255\na nope\n1 2 3 4\n").is_err());
        assert!(project.load_project("P3\n1 1\n255\n").is_err());
        assert_eq!(project.layer_names().unwrap(), vec!["keep".to_string()]);
    }

    #[test]
    fn test_filter_names_and_summary_json() {
        let mut project = Project::new();
        assert_eq!(project.filter_names().len(), 13);
        assert_eq!(project.filter_names()[0], "normal");

        project.create_project(2, 3).unwrap();
        project.add_layer("a").unwrap();
        let json = serde_json::to_value(project.summary().unwrap()).unwrap();
        assert_eq!(json["height"], 2);
        assert_eq!(json["width"], 3);
        assert_eq!(json["layers"][0]["filter"], "normal");
    }
}
