use super::*;
use crate::render::drawable::SolidColor;
use crate::scene::node::Node;

/// Captures presented frames instead of opening a window.
#[derive(Default)]
struct CaptureSink {
    frames: Vec<(String, RgbImage)>,
}

impl DisplaySink for CaptureSink {
    fn show(&mut self, name: &str, frame: &RgbImage) -> SceneResult<()> {
        self.frames.push((name.to_owned(), frame.clone()));
        Ok(())
    }
}

#[test]
fn new_rejects_empty_dimensions() {
    assert!(matches!(
        Surface::new("w", 0, 100),
        Err(SceneError::InvalidTarget(_))
    ));
    assert!(matches!(
        Surface::new("w", 100, 0),
        Err(SceneError::InvalidTarget(_))
    ));
}

#[test]
fn render_paints_children_onto_black() {
    let mut surface = Surface::new("main", 20, 20).unwrap();
    let root = surface.root();
    surface
        .scene_mut()
        .insert_child(
            Node::new("panel", 4, 4)
                .at(2, 2)
                .drawn_by(SolidColor::opaque(50, 60, 70)),
            root,
        )
        .unwrap();

    surface.render().unwrap();
    assert_eq!(surface.frame().get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(surface.frame().get_pixel(2, 2).0, [50, 60, 70]);
}

#[test]
fn render_clears_between_frames() {
    let mut surface = Surface::new("main", 10, 10).unwrap();
    let root = surface.root();
    let panel = surface
        .scene_mut()
        .insert_child(
            Node::new("panel", 3, 3).drawn_by(SolidColor::opaque(9, 9, 9)),
            root,
        )
        .unwrap();

    surface.render().unwrap();
    assert_eq!(surface.frame().get_pixel(0, 0).0, [9, 9, 9]);

    // Detached content must vanish on the next frame; no stale pixels.
    surface.scene_mut().detach(panel);
    surface.render().unwrap();
    assert_eq!(surface.frame().get_pixel(0, 0).0, [0, 0, 0]);
}

#[test]
fn present_hands_the_frame_to_the_sink() {
    let mut surface = Surface::new("overlay", 8, 8).unwrap();
    surface.render().unwrap();

    let mut sink = CaptureSink::default();
    surface.present(&mut sink).unwrap();
    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.frames[0].0, "overlay");
    assert_eq!(&sink.frames[0].1, surface.frame());
}

#[test]
fn root_paints_no_tile_of_its_own() {
    let mut surface = Surface::new("main", 6, 6).unwrap();
    surface.render().unwrap();
    assert!(surface.frame().pixels().all(|p| p.0 == [0, 0, 0]));
    assert!(surface.scene().node(surface.root()).tile().is_none());
}
