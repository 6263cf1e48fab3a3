use sur_engine::gl::headless::{HeadlessCanvas, HeadlessContext};
use sur_engine::gl::{self, GlContext};
use sur_engine::shader::{ScriptNode, ShaderRole, discover, reflect};
use sur_engine::{Sur, SurConfig, SurError, ShaderSetCollection, compile_shader_sets};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <script type="vertex-shader" data-name="test">
      attribute vec4 aPosition;
      void main() {
        gl_Position = aPosition;
      }
    </script>
    <script type="fragment-shader" data-name="test">
      precision mediump float;
      uniform vec4 uFragColor;
      void main() {
        gl_FragColor = uFragColor;
      }
    </script>
    <script src="app.js"></script>
  </head>
  <body><canvas id="c" width="640" height="480"></canvas></body>
</html>"#;

#[test]
fn markup_page_yields_one_reflected_program() {
    let sur = Sur::from_markup(&HeadlessCanvas::new(), PAGE, SurConfig::default()).unwrap();

    assert_eq!(sur.shader_sets().len(), 1);
    let set = sur.shader_set("test").unwrap();
    assert!(set.is_linked());
    assert_eq!(set.attributes.len(), 1);
    assert_eq!(set.uniforms.len(), 1);
    assert_eq!(set.attribute("aPosition"), Some(0));

    let program = sur.program("test").unwrap();
    let color = set.uniform("uFragColor").unwrap();
    assert_eq!(sur.gl().uniform_location(program, "uFragColor").as_ref(), Some(color));

    let active = sur.gl().active_uniform(program, 0).unwrap();
    assert_eq!(active.name, "uFragColor");
    assert_eq!(active.gl_type, gl::FLOAT_VEC4);
}

#[test]
fn compile_error_names_set_and_stage() {
    let gl = HeadlessContext::new();
    let mut sets: ShaderSetCollection<HeadlessContext> = discover([
        ScriptNode::vertex("broken", "attribute vec4 aPosition; void main() { gl_Position = aPosition; }"),
        ScriptNode::fragment("broken", "precision mediump float; void main() { gl_FragColor = vec4(1.0) }"),
    ]);

    let err = compile_shader_sets(&gl, &mut sets).unwrap_err();
    match &err {
        SurError::Compilation { set, role, log } => {
            assert_eq!(set, "broken");
            assert_eq!(*role, ShaderRole::Fragment);
            assert!(!log.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("shader compilation error"));
    assert!(!sets.get("broken").unwrap().is_linked());
}

#[test]
fn incomplete_set_fails_the_bootstrap() {
    let html = r#"<script type="fragment-shader" data-name="solo">void main() { gl_FragColor = vec4(1.0); }</script>"#;
    let err = Sur::from_markup(&HeadlessCanvas::new(), html, SurConfig::default()).unwrap_err();
    assert!(matches!(err, SurError::MissingShader { role: ShaderRole::Vertex, .. }));
    assert!(err.to_string().contains("require both a vertex and a fragment shader"));
}

#[test]
fn unrecognized_and_unnamed_nodes_are_ignored() {
    let html = r#"
        <script type="text/javascript">var a = 1;</script>
        <script type="vertex-shader">void main() {}</script>
        <script type="x-shader/x-fragment" data-name="legacy">void main() {}</script>
        <div type="vertex-shader" data-name="div">void main() {}</div>
    "#;
    let sur = Sur::from_markup(&HeadlessCanvas::new(), html, SurConfig::default()).unwrap();
    assert!(sur.shader_sets().is_empty());
    assert_eq!(sur.gl().shader_count(), 0);
}

#[test]
fn several_sets_keep_document_order() {
    let vs = "attribute vec2 aPos; void main() { gl_Position = vec4(aPos, 0.0, 1.0); }";
    let fs = "void main() { gl_FragColor = vec4(1.0); }";
    let sur = Sur::new(
        &HeadlessCanvas::new(),
        [
            ScriptNode::vertex("b", vs),
            ScriptNode::vertex("a", vs),
            ScriptNode::fragment("a", fs),
            ScriptNode::fragment("b", fs),
        ],
        SurConfig::default(),
    )
    .unwrap();
    assert_eq!(sur.shader_sets().keys().collect::<Vec<_>>(), ["b", "a"]);
    assert_ne!(sur.program("a"), sur.program("b"));

    let params = reflect(sur.gl(), sur.program("a").unwrap());
    assert_eq!(params.attributes.get("aPos"), Some(&0));
    assert!(params.uniforms.is_empty());
}
