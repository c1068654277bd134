use super::*;

#[test]
fn selection_tags_and_aliases_parse() {
    assert_eq!(
        "canvas2d".parse::<RendererKind>().unwrap(),
        RendererKind::DirectBlit
    );
    assert_eq!(
        "fabric".parse::<RendererKind>().unwrap(),
        RendererKind::SceneGraph
    );
    assert_eq!(
        "fabric-optimized".parse::<RendererKind>().unwrap(),
        RendererKind::OptimizedComposite
    );
    for kind in RendererKind::ALL {
        assert_eq!(kind.as_str().parse::<RendererKind>().unwrap(), kind);
    }
}

#[test]
fn absent_or_unknown_selection_is_config_error() {
    assert!(matches!(
        RendererKind::from_selection(None),
        Err(FramepaceError::Config(_))
    ));
    assert!(matches!(
        RendererKind::from_selection(Some("webgl")),
        Err(FramepaceError::Config(_))
    ));
}

#[test]
fn destination_is_required_except_for_scene_graph() {
    for kind in [RendererKind::DirectBlit, RendererKind::OptimizedComposite] {
        let mut reg = SurfaceRegistry::new();
        assert!(kind.requires_destination());
        assert!(matches!(
            create_renderer(kind, &mut reg, "videoCanvas"),
            Err(FramepaceError::Config(_))
        ));
    }

    let mut reg = SurfaceRegistry::new();
    let r = create_renderer(RendererKind::SceneGraph, &mut reg, "videoCanvas").unwrap();
    assert_eq!(r.kind(), RendererKind::SceneGraph);
    assert_eq!(r.surface().size(), DEFAULT_SURFACE_SIZE);
}

#[test]
fn create_renderer_consumes_registered_surface() {
    let mut reg = SurfaceRegistry::new();
    reg.insert("videoCanvas", Surface::new(Size::new(8, 8)).unwrap());
    let r = create_renderer(RendererKind::DirectBlit, &mut reg, "videoCanvas").unwrap();
    assert_eq!(r.surface().size(), Size::new(8, 8));
    assert!(!reg.contains("videoCanvas"));
}
