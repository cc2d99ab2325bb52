use super::*;

#[test]
fn value_variant_follows_json_literal() {
    let v: Vec<Value> = serde_json::from_str(r#"[true, 256, 256.0, "Full"]"#).unwrap();
    assert_eq!(
        v,
        vec![
            Value::Bool(true),
            Value::Int(256),
            Value::Float(256.0),
            Value::Token("Full".to_string()),
        ]
    );
}

#[test]
fn enum_member_accepts_bare_key_and_object() {
    let members: Vec<EnumMember> = serde_json::from_str(
        r#"["Low", {"key": "Hybrid Pro", "ui_name": "Pro", "platforms": ["Windows", "Linux"]},
            {"key": "Northstar", "enable_py_condition": "hou.isApprentice()"}]"#,
    )
    .unwrap();
    assert_eq!(members[0].key(), "Low");
    assert_eq!(members[0].label(), "Low");
    assert_eq!(members[1].key(), "HybridPro");
    assert_eq!(members[1].raw_key(), "Hybrid Pro");
    assert_eq!(members[1].label(), "Pro");
    assert_eq!(
        members[1].gate(),
        Some(&ValueGate::Platforms(vec![Platform::Windows, Platform::Linux]))
    );
    assert_eq!(
        members[2].gate(),
        Some(&ValueGate::Python("hou.isApprentice()".to_string()))
    );
}

#[test]
fn enum_member_rejects_two_gates() {
    let err = serde_json::from_str::<EnumMember>(
        r#"{"key": "A", "platforms": ["Linux"], "enable_py_condition": "True"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("both"));
}

#[test]
fn platform_gate_renders_python_condition() {
    let gate = ValueGate::Platforms(vec![Platform::Windows, Platform::Linux]);
    assert_eq!(
        gate.python_condition(),
        r#"platform.system() in ["Windows", "Linux"]"#
    );
    assert!(gate.allows(Platform::Linux));
    assert!(!gate.allows(Platform::Darwin));
    assert!(ValueGate::Python("False".to_string()).allows(Platform::Darwin));
}

#[test]
fn hidewhen_accepts_string_or_list_and_drops_empty() {
    let one: Hidewhen = serde_json::from_str(r#""renderQuality == Low""#).unwrap();
    let many: Hidewhen = serde_json::from_str(r#"["a == 1", "", "b == 2"]"#).unwrap();
    let table = SettingsTable::default();
    assert_eq!(one.resolve(&table), vec!["renderQuality == Low"]);
    assert_eq!(many.resolve(&table), vec!["a == 1", "b == 2"]);
}

#[test]
fn computed_hidewhen_sees_table() {
    fn by_count(t: &SettingsTable) -> Vec<String> {
        vec![format!("n == {}", t.categories.len())]
    }
    let h = Hidewhen::Computed(by_count);
    assert_eq!(h.resolve(&SettingsTable::default()), vec!["n == 0"]);
    assert_eq!(format!("{h:?}"), "Computed(..)");
}

#[test]
fn table_parses_categories_folders_and_settings() {
    let json = r#"[
        {
            "name": "Sampling",
            "houdini": {"hidewhen": "renderQuality == Low"},
            "settings": [
                {"name": "maxSamples", "ui_name": "Max Samples", "defaultValue": 256,
                 "minValue": 1, "maxValue": 65536},
                {"folder": "Advanced", "settings": [
                    {"name": "raycastEpsilon", "defaultValue": 2e-05}
                ]}
            ]
        },
        {
            "name": "RenderQuality",
            "disabled_platform": ["Darwin"],
            "settings": [
                {"name": "renderQuality", "defaultValue": "High", "values": ["Low", "High"]}
            ]
        }
    ]"#;
    let table = SettingsTable::from_reader(json.as_bytes()).unwrap();
    assert_eq!(table.categories.len(), 2);
    assert!(table.categories[0].hidewhen().is_some());
    assert!(matches!(table.categories[0].items[1], CategoryItem::Folder(_)));
    assert_eq!(table.categories[1].disabled_platforms, vec![Platform::Darwin]);

    let names: Vec<_> = table.settings().map(|(i, s)| (i, s.name.as_str())).collect();
    assert_eq!(
        names,
        vec![(0, "maxSamples"), (0, "raycastEpsilon"), (1, "renderQuality")]
    );

    let eps = table.find_setting("raycastEpsilon").unwrap();
    assert_eq!(eps.default_value, Value::Float(2e-5));
    assert!(!eps.is_ui_visible());

    let rq = table.find_setting("renderQuality").unwrap();
    assert!(rq.is_enumerated());
    assert_eq!(rq.default_member().map(|m| m.key()), Some("High".to_string()));
    table.validate().unwrap();
}

#[test]
fn from_reader_reports_serde_error() {
    let err = SettingsTable::from_reader("{not json".as_bytes()).unwrap_err();
    assert!(matches!(err, CodegenError::Serde(_)));
}

#[test]
fn from_path_reports_missing_file() {
    let err = SettingsTable::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open settings table"));
}
