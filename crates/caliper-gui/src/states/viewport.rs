/// Viewport display state.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Decoded image size as `[width, height]`.
    pub image_size: Option<[usize; 2]>,
    /// Sub-tick remainder of smooth (pixel-unit) scrolling.
    pub scroll_accum: f32,
}
