use glam::{Vec2, Vec4};
use menu_distort::camera::fov_for;
use menu_distort::{Animator, Config, Gallery, InputEvent, LinkId, Viewport};

fn animator() -> Animator<&'static str> {
    let gallery = Gallery::new(4, vec!["one", "two", "three", "four"]).unwrap();
    Animator::new(Config::default(), Viewport::new(1000.0, 800.0), gallery)
}

#[test]
fn pointer_jump_moves_mesh_and_distorts() {
    let mut anim = animator();
    anim.handle(InputEvent::PointerMove { x: 500.0, y: 500.0 }).unwrap();

    let frame = anim.advance();
    // offset (50, 50) relative to the top-left, world origin at the centre
    let centre = frame.model * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!((centre.x - (50.0 - 500.0)).abs() < 1e-3);
    assert!((centre.y - (-50.0 + 400.0)).abs() < 1e-3);
    // lag of 450px in both axes
    assert!((frame.offset.x - 450.0 * 0.0005).abs() < 1e-6);
    assert!((frame.offset.y + 450.0 * 0.0005).abs() < 1e-6);
    assert_eq!(frame.alpha, 0.0);
    assert_eq!(frame.link_opacity, 1.0);
    assert_eq!(*frame.texture, "one");
}

#[test]
fn mesh_is_scaled_to_its_world_size() {
    let mut anim = animator();
    let frame = anim.advance();
    let corner = frame.model * Vec4::new(0.5, 0.5, 0.0, 1.0);
    let origin = frame.model * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!((corner.x - origin.x - 125.0).abs() < 1e-3);
    assert!((corner.y - origin.y - 175.0).abs() < 1e-3);
}

#[test]
fn hover_dims_links_and_raises_alpha() {
    let mut anim = animator();
    anim.handle(InputEvent::ListEnter).unwrap();
    anim.handle(InputEvent::LinkEnter(LinkId(2))).unwrap();

    let frame = anim.advance();
    assert_eq!(frame.link_opacity, 0.2);
    assert!((frame.alpha - 0.1).abs() < 1e-6);
    assert_eq!(*frame.texture, "three");

    anim.handle(InputEvent::ListLeave).unwrap();
    let frame = anim.advance();
    assert_eq!(frame.link_opacity, 1.0);
    // still fading out, not snapped to zero
    assert!(frame.alpha > 0.0);
    // leaving the list keeps the last image
    assert_eq!(*frame.texture, "three");
}

#[test]
fn unknown_link_is_rejected() {
    let mut anim = animator();
    anim.handle(InputEvent::LinkEnter(LinkId(1))).unwrap();
    assert!(anim.handle(InputEvent::LinkEnter(LinkId(4))).is_err());
    assert_eq!(anim.gallery().active_link(), LinkId(1));
}

#[test]
fn resize_updates_camera_and_centre() {
    let mut anim = animator();
    anim.handle(InputEvent::Resize(Viewport::new(1440.0, 900.0))).unwrap();
    assert_eq!(anim.viewport(), Viewport::new(1440.0, 900.0));
    assert!((anim.camera().fov - fov_for(900.0, 1000.0)).abs() < 1e-5);
    assert!(anim.camera().needs_update());

    anim.handle(InputEvent::PointerMove { x: 720.0, y: 450.0 }).unwrap();
    for _ in 0..300 {
        anim.advance();
    }
    let frame = anim.advance();
    let centre = frame.model * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(Vec2::new(centre.x, centre.y).length() < 1e-2);

    // mesh centre at the viewport centre projects to NDC origin
    let clip = frame.projection * frame.model_view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!((clip.x / clip.w).abs() < 1e-4 && (clip.y / clip.w).abs() < 1e-4);
}

fn mesh_centre_clip(config: Config) -> Vec4 {
    let viewport = Viewport::new(1000.0, 800.0);
    let gallery = Gallery::new(4, vec!["one", "two", "three", "four"]).unwrap();
    let mut anim = Animator::new(config, viewport, gallery);
    anim.handle(InputEvent::PointerMove { x: 500.0, y: 400.0 }).unwrap();
    let frame = anim.advance();
    frame.projection * frame.model_view() * Vec4::new(0.0, 0.0, 0.0, 1.0)
}

/// The stock 1000/1000 setup puts the plane exactly on the far plane.
fn inside_depth_range(clip: Vec4) -> bool {
    let depth = clip.z / clip.w;
    (-1.0..=1.0 + 1e-4).contains(&depth)
}

#[test]
fn mesh_stays_inside_the_far_plane() {
    let stock = mesh_centre_clip(Config::default());
    assert!(inside_depth_range(stock), "stock: z={} w={}", stock.z, stock.w);

    for perspective in ["1000", "1500", "4000"] {
        let config = Config::default()
            .apply_dataset(|key| (key == "perspective").then(|| perspective.to_string()))
            .unwrap();
        let clip = mesh_centre_clip(config);
        assert!(clip.w > 0.0);
        assert!(
            inside_depth_range(clip),
            "perspective={perspective}: z={} w={}",
            clip.z,
            clip.w
        );
    }
}
