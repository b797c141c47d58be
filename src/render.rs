use crate::scene::Scene;
use crate::surface::Surface;

/// Redraw the whole scene from scratch.
///
/// Connection curves go down first, in list order, so that every node is
/// drawn over the curve endpoints; then each layer draws its edit highlight,
/// outline and label.
pub fn render_scene<S: Surface + ?Sized>(scene: &Scene, surface: &mut S) {
    surface.clear();

    let layers = scene.layers();
    for pair in layers.windows(2) {
        pair[0].draw_connection_to(&pair[1], surface);
    }

    let config = scene.config();
    for layer in layers {
        layer.draw(surface, config);
    }
}
