use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        NexVideoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        NexVideoError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        NexVideoError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        NexVideoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = NexVideoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
