use std::{any::Any, fmt};

/// Errors reported by the compositor-facing data types.
#[derive(Debug, thiserror::Error)]
pub enum CompositorError {
    /// The supplied pixel buffer does not match the declared dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    PixelBufferMismatch {
        /// Declared bitmap width in pixels.
        width: u32,
        /// Declared bitmap height in pixels.
        height: u32,
        /// Byte count implied by the dimensions.
        expected: usize,
        /// Byte count actually supplied.
        actual: usize,
    },
}

/// Uncompressed RGBA bitmap, 4 bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaBitmap {
    /// Build a bitmap from a raw pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CompositorError::PixelBufferMismatch`] when the buffer length
    /// does not equal `width * height * 4`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CompositorError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(CompositorError::PixelBufferMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Bitmap filled with a single colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: rgba.repeat(width as usize * height as usize),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Mask shape applied to adaptive icons.
///
/// Interpretation of the shape is left to the host compositor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MaskShape {
    #[default]
    Circle,
    Squircle,
    RoundedSquare {
        /// Corner radius as a fraction of the icon size.
        corner_radius: f32,
    },
}

/// Drawing surface supplied by the host toolkit.
///
/// Host drawable implementations that need richer paint primitives than the
/// ones exposed here can recover their concrete surface through
/// [`as_any`](Canvas::as_any).
pub trait Canvas {
    /// Restrict subsequent drawing to the given mask shape.
    fn clip_mask(&mut self, mask: MaskShape);

    /// Blit a pre-rendered bitmap at a pixel offset.
    fn draw_bitmap(&mut self, bitmap: &RgbaBitmap, dx: i32, dy: i32);

    fn as_any(&mut self) -> &mut dyn Any;
}

/// A host-rendered image that can be drawn onto a [`Canvas`].
///
/// Drawables carry an integer "level" used to animate rotating sub-layers;
/// static artwork ignores it. [`clone_drawable`](Drawable::clone_drawable)
/// must produce an independently mutable copy: level changes applied to the
/// clone never show through the source.
pub trait Drawable: fmt::Debug + Send {
    fn draw(&self, canvas: &mut dyn Canvas);

    /// Update the drawable's level. Returns `true` when the stored level
    /// actually changed.
    fn set_level(&mut self, level: u32) -> bool {
        let _ = level;
        false
    }

    fn level(&self) -> u32 {
        0
    }

    fn clone_drawable(&self) -> Box<dyn Drawable>;
}

impl Clone for Box<dyn Drawable> {
    fn clone(&self) -> Self {
        self.clone_drawable()
    }
}

/// Ordered stack of sub-layers addressed by index.
#[derive(Debug, Clone, Default)]
pub struct LayeredDrawable {
    layers: Vec<Box<dyn Drawable>>,
}

impl LayeredDrawable {
    pub fn new(layers: Vec<Box<dyn Drawable>>) -> Self {
        Self { layers }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, index: usize) -> Option<&dyn Drawable> {
        self.layers.get(index).map(|layer| layer.as_ref())
    }

    /// Set the level of the layer at `index`.
    ///
    /// Returns `true` only when the layer exists and its level changed.
    pub fn set_layer_level(&mut self, index: usize, level: u32) -> bool {
        self.layers
            .get_mut(index)
            .is_some_and(|layer| layer.set_level(level))
    }
}

impl Drawable for LayeredDrawable {
    fn draw(&self, canvas: &mut dyn Canvas) {
        for layer in &self.layers {
            layer.draw(canvas);
        }
    }

    fn set_level(&mut self, level: u32) -> bool {
        let mut changed = false;
        for layer in &mut self.layers {
            changed |= layer.set_level(level);
        }
        changed
    }

    fn level(&self) -> u32 {
        self.layers.first().map_or(0, |layer| layer.level())
    }

    fn clone_drawable(&self) -> Box<dyn Drawable> {
        Box::new(self.clone())
    }
}

/// Foreground of an adaptive icon, resolved to its concrete shape once at
/// construction time.
#[derive(Debug, Clone)]
pub enum Foreground {
    /// A layered foreground whose sub-layers can be animated.
    Layered(LayeredDrawable),
    /// A flat foreground with no addressable sub-layers.
    Flat(Box<dyn Drawable>),
}

impl Foreground {
    pub fn as_layered(&self) -> Option<&LayeredDrawable> {
        match self {
            Self::Layered(layered) => Some(layered),
            Self::Flat(_) => None,
        }
    }

    pub fn as_layered_mut(&mut self) -> Option<&mut LayeredDrawable> {
        match self {
            Self::Layered(layered) => Some(layered),
            Self::Flat(_) => None,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Self::Layered(layered) => layered.draw(canvas),
            Self::Flat(drawable) => drawable.draw(canvas),
        }
    }
}

/// Adaptive icon composed of a background, a foreground and a mask shape.
#[derive(Debug, Clone)]
pub struct AdaptiveIcon {
    background: Box<dyn Drawable>,
    foreground: Foreground,
    mask: MaskShape,
}

impl AdaptiveIcon {
    pub fn new(background: Box<dyn Drawable>, foreground: Foreground, mask: MaskShape) -> Self {
        Self {
            background,
            foreground,
            mask,
        }
    }

    pub fn background(&self) -> &dyn Drawable {
        self.background.as_ref()
    }

    pub fn foreground(&self) -> &Foreground {
        &self.foreground
    }

    pub fn foreground_mut(&mut self) -> &mut Foreground {
        &mut self.foreground
    }

    pub fn mask(&self) -> MaskShape {
        self.mask
    }
}

/// Icon drawable variants a clock icon can be built from.
///
/// The variant is decided once when the icon is bound instead of re-checking
/// the drawable's runtime shape on every tick.
#[derive(Debug, Clone)]
pub enum ClockDrawable {
    /// A plain layered image.
    Layered(LayeredDrawable),
    /// An adaptive icon; only a layered foreground can be animated.
    Adaptive(AdaptiveIcon),
}

impl ClockDrawable {
    /// The layered structure holding the clock hands, when one exists.
    pub fn hands(&self) -> Option<&LayeredDrawable> {
        match self {
            Self::Layered(layered) => Some(layered),
            Self::Adaptive(icon) => icon.foreground().as_layered(),
        }
    }

    pub fn hands_mut(&mut self) -> Option<&mut LayeredDrawable> {
        match self {
            Self::Layered(layered) => Some(layered),
            Self::Adaptive(icon) => icon.foreground_mut().as_layered_mut(),
        }
    }

    /// The background layer for adaptive icons, the whole drawable otherwise.
    pub fn background(&self) -> &dyn Drawable {
        match self {
            Self::Layered(layered) => layered,
            Self::Adaptive(icon) => icon.background(),
        }
    }

    /// Clip the canvas to the icon mask. No-op for plain layered images.
    pub fn clip_to_mask(&self, canvas: &mut dyn Canvas) {
        if let Self::Adaptive(icon) = self {
            canvas.clip_mask(icon.mask());
        }
    }

    /// Draw only the foreground for adaptive icons, the whole drawable
    /// otherwise.
    pub fn draw_foreground(&self, canvas: &mut dyn Canvas) {
        match self {
            Self::Layered(layered) => layered.draw(canvas),
            Self::Adaptive(icon) => icon.foreground().draw(canvas),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::{
        AdaptiveIcon, Canvas, ClockDrawable, Drawable, Foreground, LayeredDrawable, MaskShape,
        RgbaBitmap,
    };

    #[derive(Debug, Clone, Default)]
    struct TestLayer {
        level: u32,
    }

    impl Drawable for TestLayer {
        fn draw(&self, canvas: &mut dyn Canvas) {
            canvas.draw_bitmap(&RgbaBitmap::solid(1, 1, [0, 0, 0, 255]), 0, 0);
        }

        fn set_level(&mut self, level: u32) -> bool {
            if self.level == level {
                return false;
            }
            self.level = level;
            true
        }

        fn level(&self) -> u32 {
            self.level
        }

        fn clone_drawable(&self) -> Box<dyn Drawable> {
            Box::new(self.clone())
        }
    }

    #[derive(Debug, Default)]
    struct TestCanvas {
        clips: Vec<MaskShape>,
        blits: usize,
    }

    impl Canvas for TestCanvas {
        fn clip_mask(&mut self, mask: MaskShape) {
            self.clips.push(mask);
        }

        fn draw_bitmap(&mut self, _bitmap: &RgbaBitmap, _dx: i32, _dy: i32) {
            self.blits += 1;
        }

        fn as_any(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn stack(count: usize) -> LayeredDrawable {
        LayeredDrawable::new(
            (0..count)
                .map(|_| Box::new(TestLayer::default()) as Box<dyn Drawable>)
                .collect(),
        )
    }

    #[test]
    fn layer_level_reports_change() {
        let mut layered = stack(2);

        assert!(layered.set_layer_level(0, 195));
        assert!(!layered.set_layer_level(0, 195));
        assert!(layered.set_layer_level(0, 196));
    }

    #[test]
    fn missing_layer_index_reports_no_change() {
        let mut layered = stack(1);

        assert!(!layered.set_layer_level(5, 10));
    }

    #[test]
    fn clone_does_not_alias_layer_state() {
        let mut original = stack(1);
        original.set_layer_level(0, 100);

        let mut clone = original.clone();
        clone.set_layer_level(0, 250);

        assert_eq!(original.layer(0).map(Drawable::level), Some(100));
        assert_eq!(clone.layer(0).map(Drawable::level), Some(250));
    }

    #[test]
    fn adaptive_flat_foreground_has_no_hands() {
        let drawable = ClockDrawable::Adaptive(AdaptiveIcon::new(
            Box::new(TestLayer::default()),
            Foreground::Flat(Box::new(TestLayer::default())),
            MaskShape::Circle,
        ));

        assert!(drawable.hands().is_none());
    }

    #[test]
    fn adaptive_layered_foreground_exposes_hands() {
        let drawable = ClockDrawable::Adaptive(AdaptiveIcon::new(
            Box::new(TestLayer::default()),
            Foreground::Layered(stack(3)),
            MaskShape::Squircle,
        ));

        assert_eq!(drawable.hands().map(LayeredDrawable::layer_count), Some(3));
    }

    #[test]
    fn clip_applies_only_to_adaptive_icons() {
        let mut canvas = TestCanvas::default();

        ClockDrawable::Layered(stack(1)).clip_to_mask(&mut canvas);
        assert!(canvas.clips.is_empty());

        ClockDrawable::Adaptive(AdaptiveIcon::new(
            Box::new(TestLayer::default()),
            Foreground::Layered(stack(1)),
            MaskShape::Squircle,
        ))
        .clip_to_mask(&mut canvas);
        assert_eq!(canvas.clips, vec![MaskShape::Squircle]);
    }

    #[test]
    fn draw_foreground_skips_adaptive_background() {
        let mut canvas = TestCanvas::default();
        let drawable = ClockDrawable::Adaptive(AdaptiveIcon::new(
            Box::new(TestLayer::default()),
            Foreground::Layered(stack(2)),
            MaskShape::Circle,
        ));

        drawable.draw_foreground(&mut canvas);

        assert_eq!(canvas.blits, 2);
    }

    #[test]
    fn bitmap_rejects_mismatched_buffer() {
        assert!(RgbaBitmap::from_pixels(2, 2, vec![0; 15]).is_err());
        assert!(RgbaBitmap::from_pixels(2, 2, vec![0; 16]).is_ok());
    }
}
