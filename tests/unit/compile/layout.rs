use super::*;
use crate::tables::render_settings_table;

#[test]
fn category_bits_are_sequential_after_reserved_bit() {
    let table = render_settings_table().unwrap();
    let layout = compile_layout(&table, Platform::Linux).unwrap();
    let bits: Vec<_> = layout.categories.iter().map(|c| c.bit).collect();
    assert_eq!(bits, (1..=table.categories.len() as u32).collect::<Vec<_>>());
    assert_eq!(layout.categories[0].dirty_flag, "DirtyRenderQuality");

    let mut seen = DirtyMask::bit(INTERACTIVE_MODE_BIT);
    for c in &layout.categories {
        assert!(!seen.intersects(c.mask()), "{} overlaps", c.dirty_flag);
        seen |= c.mask();
    }
}

#[test]
fn layout_is_deterministic() {
    let a = compile_layout(&render_settings_table().unwrap(), Platform::Linux).unwrap();
    let b = compile_layout(&render_settings_table().unwrap(), Platform::Linux).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.dump(), b.dump());
}

#[test]
fn enumerations_store_default_index_and_bounds() {
    let layout = compile_layout(&render_settings_table().unwrap(), Platform::Linux).unwrap();
    let rq = layout.setting("renderQuality").unwrap();
    assert_eq!(
        rq.kind,
        SettingKind::Enum {
            type_name: "RenderQualityType".to_string(),
            keys: vec![
                "Low".to_string(),
                "Medium".to_string(),
                "High".to_string(),
                "Full".to_string(),
            ],
        }
    );
    assert_eq!(rq.default, Value::Int(3));
    assert_eq!(rq.min, Some(Value::Int(0)));
    assert_eq!(rq.max, Some(Value::Int(3)));
    assert_eq!(rq.enum_key(1), Some("Medium"));
    assert_eq!(rq.enum_key(-1), None);
    assert_eq!(rq.kind.cpp_param_type(), "int");
    assert_eq!(rq.kind.cpp_storage_type(), "RenderQualityType");
}

#[test]
fn float_bounds_are_normalized() {
    let table = crate::schema::dsl::TableBuilder::new()
        .category(
            crate::schema::dsl::CategoryBuilder::new("Q")
                .setting(
                    crate::schema::dsl::SettingBuilder::new("quality:epsilon", 0.5)
                        .range(0, 1)
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let layout = compile_layout(&table, Platform::Windows).unwrap();
    let s = &layout.settings[0];
    assert_eq!(s.ident, "qualityEpsilon");
    assert_eq!(s.title, "QualityEpsilon");
    assert_eq!(s.min, Some(Value::Float(0.0)));
    assert_eq!(s.max, Some(Value::Float(1.0)));
    assert!(s.accepts(&Value::Float(1.0)));
    assert!(!s.accepts(&Value::Float(1.5)));
    assert!(!s.accepts(&Value::Int(1)));
}

#[test]
fn platform_gating_marks_setters_disabled() {
    let table = render_settings_table().unwrap();
    let mac = compile_layout(&table, Platform::Darwin).unwrap();
    let linux = compile_layout(&table, Platform::Linux).unwrap();
    assert!(mac.setting("renderQuality").unwrap().platform_disabled);
    assert!(!linux.setting("renderQuality").unwrap().platform_disabled);
    assert!(!mac.setting("maxSamples").unwrap().platform_disabled);
}

#[test]
fn accepts_checks_kind_and_range() {
    let layout = compile_layout(&render_settings_table().unwrap(), Platform::Linux).unwrap();
    let samples = layout.setting("maxSamples").unwrap();
    assert!(samples.accepts(&Value::Int(1)));
    assert!(samples.accepts(&Value::Int(65536)));
    assert!(!samples.accepts(&Value::Int(0)));
    assert!(!samples.accepts(&Value::Int(70000)));
    assert!(!samples.accepts(&Value::Float(5.0)));
    let policy = layout.setting("aspectRatioConformPolicy").unwrap();
    assert!(policy.accepts(&Value::Token("adjustPixelAspectRatio".to_string())));
}

#[test]
fn invalid_table_is_rejected() {
    let table = SettingsTable::new(vec![]);
    assert!(compile_layout(&table, Platform::Linux).unwrap().settings.is_empty());

    let bad: SettingsTable = serde_json::from_str(
        r#"[{"name": "A", "settings": [{"name": "x", "defaultValue": "Z", "values": ["Y"]}]}]"#,
    )
    .unwrap();
    assert!(compile_layout(&bad, Platform::Linux).is_err());
}

#[test]
fn unbounded_ints_must_fit_generated_storage() {
    use crate::schema::dsl::{CategoryBuilder, SettingBuilder, TableBuilder};

    let table = TableBuilder::new()
        .category(
            CategoryBuilder::new("Misc")
                .setting(SettingBuilder::new("seed", 0).build().unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let layout = compile_layout(&table, Platform::Linux).unwrap();
    let seed = layout.setting("seed").unwrap();
    assert!(seed.accepts(&Value::Int(i64::from(i32::MAX))));
    assert!(seed.accepts(&Value::Int(i64::from(i32::MIN))));
    assert!(!seed.accepts(&Value::Int(1 << 35)));
}
