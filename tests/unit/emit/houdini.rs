use super::*;
use crate::foundation::core::Platform;
use crate::schema::dsl::{CategoryBuilder, FolderBuilder, SettingBuilder, TableBuilder};
use crate::schema::model::{EnumMember, Hidewhen, ValueGate};

fn sampling_table(category_hidewhen: Option<Hidewhen>) -> SettingsTable {
    let mut cat = CategoryBuilder::new("Sampling").setting(
        SettingBuilder::new("maxSamples", 256)
            .ui_name("Max Samples")
            .range(1, 65536)
            .build()
            .unwrap(),
    );
    if let Some(h) = category_hidewhen {
        cat = cat.hidewhen(h);
    }
    TableBuilder::new().category(cat.build().unwrap()).build().unwrap()
}

fn ds(table: &SettingsTable) -> String {
    emit_ds(table, "Global").unwrap().unwrap().contents
}

#[test]
fn hidewhen_clause_formats_conditions() {
    assert_eq!(hidewhen_clause(&[]), None);
    assert_eq!(
        hidewhen_clause(&["a == 1".to_string(), "b != 2".to_string()]).as_deref(),
        Some("hidewhen \"{ a == 1 } { b != 2 } \"")
    );
}

#[test]
fn setting_block_matches_expected_shape() {
    let out = ds(&sampling_table(None));
    let expected = "    parm {\n\
                    \x20       name \"maxSamples\"\n\
                    \x20       label \"Max Samples\"\n\
                    \x20       type int\n\
                    \x20       size 1\n\
                    \x20       default { 256 }\n\
                    \x20       parmtag { \"spare_category\" \"Sampling\" }\n\
                    \x20       parmtag { \"uiscope\" \"viewport\" }\n\
                    \x20       parmtag { \"usdvaluetype\" \"int\" }\n\
                    \x20       disablewhen \"{ maxSamples_control == block } { maxSamples_control == none } \"\n\
                    \x20       range { 1! 65536 }\n\
                    \x20   }\n";
    assert!(out.contains(expected), "{out}");
    assert!(out.starts_with("#include \"$HFS/houdini/soho/parameters/CommonMacros.ds\""));
    assert!(out.contains("    name    \"RPR\"\n"));
}

#[test]
fn control_parameter_precedes_its_setting() {
    let out = ds(&sampling_table(None));
    let control = out.find("name    \"maxSamples_control\"").unwrap();
    let setting = out.find("name \"maxSamples\"").unwrap();
    assert!(control < setting);
    assert!(out.contains(
        "[ \"return loputils.createEditPropertiesControlMenu(kwargs, 'int[]')\" ]"
    ));
    assert!(out.contains("default { \"none\" }"));
}

#[test]
fn hidewhen_present_iff_conditions_exist() {
    let plain = ds(&sampling_table(None));
    assert!(!plain.contains("hidewhen"));

    let empty = ds(&sampling_table(Some(Hidewhen::Static(vec![String::new()]))));
    assert!(!empty.contains("hidewhen"));

    let hidden = ds(&sampling_table(Some(Hidewhen::one("renderQuality == Low"))));
    // Once on the control parameter, once on the setting.
    assert_eq!(
        hidden
            .matches("hidewhen \"{ renderQuality == Low } \"")
            .count(),
        2
    );
}

#[test]
fn computed_hidewhen_is_resolved_against_table() {
    fn count(t: &SettingsTable) -> Vec<String> {
        vec![format!("categories == {}", t.categories.len())]
    }
    let out = ds(&sampling_table(Some(Hidewhen::Computed(count))));
    assert!(out.contains("hidewhen \"{ categories == 1 } \""));
}

#[test]
fn setting_and_category_conditions_are_combined() {
    let table = TableBuilder::new()
        .category(
            CategoryBuilder::new("Quality")
                .hidewhen(Hidewhen::one("renderQuality != Full"))
                .setting(
                    SettingBuilder::new("radianceClamping", 0.0)
                        .ui_name("Clamp Radiance")
                        .range(0.0, 1e6)
                        .hidewhen(Hidewhen::one("enableRadianceClamping == 0"))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let out = ds(&table);
    assert!(out.contains(
        "hidewhen \"{ enableRadianceClamping == 0 } { renderQuality != Full } \""
    ));
    assert!(out.contains("range { 0.0! 1000000.0 }"));
    assert!(out.contains("default { 0.0 }"));
}

#[test]
fn static_and_dynamic_menus() {
    let table = TableBuilder::new()
        .category(
            CategoryBuilder::new("Device")
                .setting(
                    SettingBuilder::new("renderDevice", "GPU")
                        .ui_name("Render Device")
                        .values(["CPU", "GPU"])
                        .build()
                        .unwrap(),
                )
                .setting(
                    SettingBuilder::new("renderQuality", "Full")
                        .ui_name("Render Quality")
                        .values([
                            EnumMember::new("Low")
                                .gated(ValueGate::Platforms(vec![Platform::Windows])),
                            EnumMember::new("Full"),
                        ])
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let out = ds(&table);
    assert!(out.contains("        menu {\n            \"CPU\" \"CPU\"\n            \"GPU\" \"GPU\"\n        }\n"));
    assert!(out.contains("default { \"GPU\" }"));
    assert!(out.contains("parmtag { \"usdvaluetype\" \"token\" }"));
    assert!(out.contains(
        r#"[ "if platform.system() in [\"Windows\"]: menu_values.extend([\"Low\", \"Low\"])" ]"#
    ));
    assert!(out.contains(r#"[ "menu_values.extend([\"Full\", \"Full\"])" ]"#));
    assert!(out.contains("[ \"return menu_values\" ]"));
    // Enumerations never get a range clause.
    assert!(!out.contains("range {"));
}

#[test]
fn enum_control_menu_edits_strings() {
    let table = TableBuilder::new()
        .category(
            CategoryBuilder::new("Device")
                .setting(
                    SettingBuilder::new("renderDevice", "GPU")
                        .ui_name("Render Device")
                        .values(["CPU", "GPU"])
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let out = ds(&table);
    assert!(out.contains("createEditPropertiesControlMenu(kwargs, 'string[]')"));
    assert!(!out.contains("'token[]'"));
    assert!(out.contains("parmtag { \"usdvaluetype\" \"token\" }"));
}

#[test]
fn folders_wrap_children_and_names_are_encoded() {
    let table = TableBuilder::new()
        .category(
            CategoryBuilder::new("Mesh")
                .hidewhen(Hidewhen::one("mesh == 0"))
                .folder(
                    FolderBuilder::new("Visibility Settings")
                        .hidewhen(Hidewhen::one("showVisibility == 0"))
                        .setting(
                            SettingBuilder::new("primvars:rpr:visibilityPrimary", true)
                                .ui_name("Camera Visibility")
                                .custom_tag("\"uiicon\" VIEW_eye")
                                .build()
                                .unwrap(),
                        )
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let out = ds(&table);
    assert!(out.contains("    groupcollapsible {\n        name    \"VisibilitySettings\"\n"));
    assert!(out.contains("label   \"Visibility Settings\""));
    assert!(out.contains("hidewhen \"{ showVisibility == 0 } { mesh == 0 } \""));
    assert!(out.contains("name \"primvarsx3A_rprx3A_visibilityPrimary\""));
    assert!(out.contains("name    \"primvarsx3A_rprx3A_visibilityPrimary_control\""));
    assert!(out.contains("type toggle"));
    assert!(out.contains("default { 1 }"));
    assert!(out.contains("parmtag { \"uiicon\" VIEW_eye }"));
    assert!(out.contains("hidewhen \"{ mesh == 0 } \""));
}

#[test]
fn tables_without_ui_settings_produce_no_file() {
    let table = TableBuilder::new()
        .category(
            CategoryBuilder::new("UsdNativeCamera")
                .setting(SettingBuilder::new("instantaneousShutter", false).build().unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    assert!(emit_ds(&table, "Camera").unwrap().is_none());
    assert_eq!(ds_file_name("Light"), "HdRprPlugin_Light.ds");
}

#[test]
fn type_override_and_help_are_emitted() {
    let table = TableBuilder::new()
        .category(
            CategoryBuilder::new("Paths")
                .setting(
                    SettingBuilder::new("cachePath", "")
                        .ui_name("Cache Path")
                        .houdini_type("file")
                        .help("Where to \"cache\"")
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let out = ds(&table);
    assert!(out.contains("type file\n"));
    assert!(out.contains("default { \"\" }"));
    assert!(out.contains("help \"Where to \\\"cache\\\"\""));
    assert!(out.contains("parmtag { \"usdvaluetype\" \"string\" }"));
}
