use glauber_core::errors::{ErrorInfo, GlauberError};
use glauber_core::Palette;

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("vertex", "v1")
        .with_context("reason", "example")
}

#[test]
fn graph_error_surface() {
    let err = GlauberError::Graph(sample_info("G001", "unknown vertex"));
    assert_eq!(err.code(), "G001");
    assert!(err.info().context.contains_key("vertex"));
}

#[test]
fn coloring_error_surface() {
    let err = GlauberError::Coloring(sample_info("C001", "improper"));
    assert_eq!(err.info().code, "C001");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = GlauberError::Config(sample_info("K001", "bad palette").with_hint("use k > 0"));
    let rendered = err.to_string();
    assert!(rendered.starts_with("config error: bad palette (code: K001)"));
    assert!(rendered.contains("vertex=v1"));
    assert!(rendered.contains("hint: use k > 0"));
}

#[test]
fn zero_palette_is_a_config_error() {
    match Palette::new(0) {
        Err(GlauberError::Config(info)) => assert_eq!(info.code, "invalid-palette"),
        other => panic!("unexpected result: {other:?}"),
    }
    let palette = Palette::new(3).unwrap();
    assert_eq!(palette.colors().count(), 3);
}

#[test]
fn errors_round_trip_json() {
    let err = GlauberError::Analysis(sample_info("A001", "length mismatch"));
    let json = serde_json::to_string(&err).expect("serialize");
    let decoded: GlauberError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn palette_rejects_zero_on_deserialize() {
    assert!(serde_json::from_str::<Palette>("0").is_err());
    let palette: Palette = serde_json::from_str("4").expect("palette");
    assert_eq!(palette.size(), 4);
}
