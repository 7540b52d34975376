use jd_config::{ConfigError, ParamTree, ParameterSource, load, load_json, load_yaml, save_yaml};

const ARM_YAML: &str = r#"
arm:
  joint_names: [j1, j2]
  j1:
    effects: [spring]
    spring:
      coefficients: [2, -1.0]
  j2:
    effects: [friction]
    friction:
      coefficients: [0.1, 0.05, 0.01, 10.0]
"#;

#[test]
fn roundtrip_yaml_file() {
    let tree = ParamTree::from_yaml_str(ARM_YAML).unwrap();

    let path = std::env::temp_dir().join("jd_config_roundtrip_arm.yaml");
    save_yaml(&path, &tree).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(tree, loaded);
    assert_eq!(loaded.reals("arm/j1/spring/coefficients").unwrap(), vec![2.0, -1.0]);
}

#[test]
fn load_dispatches_on_extension() {
    let path = std::env::temp_dir().join("jd_config_dispatch.json");
    std::fs::write(&path, r#"{"arm": {"joint_names": ["j1", "j2"]}}"#).unwrap();

    let via_load = load(&path).unwrap();
    let via_json = load_json(&path).unwrap();
    assert_eq!(via_load, via_json);
    assert_eq!(via_load.strings("arm/joint_names").unwrap(), vec!["j1", "j2"]);
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("jd_config_does_not_exist.yaml");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(load_yaml(&path), Err(ConfigError::Io(_))));
}

#[test]
fn malformed_yaml_is_reported() {
    let err = ParamTree::from_yaml_str("arm: [unclosed").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn nested_lookup_reaches_effect_lists() {
    let tree = ParamTree::from_yaml_str(ARM_YAML).unwrap();
    assert_eq!(tree.strings("arm/j2/effects").unwrap(), vec!["friction"]);
    assert!(tree.contains("arm/j2/friction/coefficients"));
    assert!(!tree.contains("arm/j2/spring/coefficients"));
}
