use sur_engine::gl::headless::HeadlessCanvas;
use sur_engine::logging::{LoggingConfig, init_logging};
use sur_engine::shader::ScriptNode;
use sur_engine::{S, Sur, SurConfig, SurError};

const VS: &str = "attribute vec4 aPosition; void main() { gl_Position = aPosition; }";
const FS: &str = "precision mediump float; uniform vec4 uFragColor; void main() { gl_FragColor = uFragColor; }";

fn nodes() -> [ScriptNode; 2] {
    [ScriptNode::vertex("test", VS), ScriptNode::fragment("test", FS)]
}

#[test]
fn falls_back_to_experimental_webgl() {
    init_logging(LoggingConfig::with_filter("sur_engine=debug"));
    let canvas = HeadlessCanvas::with_context_ids(["experimental-webgl"]);
    let sur = Sur::new(&canvas, nodes(), SurConfig::default()).unwrap();
    assert!(sur.program("test").is_some());
}

#[test]
fn surface_without_webgl_is_an_environment_error() {
    let err = Sur::new(&HeadlessCanvas::unsupported(), nodes(), SurConfig::default()).unwrap_err();
    assert!(matches!(err, SurError::Environment { .. }));
    assert!(err.to_string().contains("webgl, experimental-webgl"));
}

#[test]
fn custom_context_ids_are_tried_in_order() {
    let canvas = HeadlessCanvas::with_context_ids(["webgl2"]);
    let err = Sur::new(&canvas, nodes(), SurConfig::default()).unwrap_err();
    assert!(matches!(err, SurError::Environment { .. }));

    let config = SurConfig::default().with_context_ids(["webgl2", "webgl"]);
    assert!(Sur::new(&canvas, nodes(), config).is_ok());
}

#[test]
fn disabled_init_leaves_sets_empty() {
    let config = SurConfig::default().with_init_shaders(false);
    let sur = Sur::new(&HeadlessCanvas::new(), nodes(), config).unwrap();
    assert!(sur.shader_sets().is_empty());
    assert_eq!(sur.gl().shader_count(), 0);
}

#[test]
fn malformed_markup_is_reported() {
    let err = Sur::from_markup(&HeadlessCanvas::new(), "<html><body></html>", SurConfig::default()).unwrap_err();
    assert!(matches!(err, SurError::Markup(_)));
}

#[test]
fn short_alias_names_the_same_type() {
    let sur: S<_> = S::new(&HeadlessCanvas::new(), nodes(), SurConfig::default()).unwrap();
    let (gl, sets) = sur.into_parts();
    assert_eq!(sets.len(), 1);
    assert_eq!(gl.program_count(), 1);
}
