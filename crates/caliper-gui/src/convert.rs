use caliper_core::image::Image;

/// Convert a decoded image to an egui ColorImage, full dynamic range mapped to gray.
pub fn image_to_color_image(image: &Image) -> egui::ColorImage {
    let pixels = image
        .to_gray8()
        .into_iter()
        .map(egui::Color32::from_gray)
        .collect();

    egui::ColorImage {
        size: [image.width(), image.height()],
        pixels,
        source_size: Default::default(),
    }
}
