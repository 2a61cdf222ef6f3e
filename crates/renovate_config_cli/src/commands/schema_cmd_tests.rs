use super::*;

#[test]
fn test_schema_is_json_with_known_properties() {
    let rendered = render_schema().expect("schema should render");
    let schema: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    let properties = schema["properties"].as_object().expect("properties");
    assert!(properties.contains_key("platform"));
    assert!(properties.contains_key("regexManagers"));
    assert!(properties.contains_key("updateInternalDeps"));
    assert!(!properties.contains_key("updateInteralDeps"));
}
