use super::*;
use crate::compile::compile_layout;
use crate::foundation::core::Platform;
use crate::schema::dsl::{CategoryBuilder, SettingBuilder, TableBuilder};
use crate::tables::render_settings_table;

fn render_files(platform: Platform) -> (String, String) {
    let layout = compile_layout(&render_settings_table().unwrap(), platform).unwrap();
    let [h, c] = emit_config(&layout).unwrap();
    assert_eq!(h.name, HEADER_FILE);
    assert_eq!(c.name, SOURCE_FILE);
    (h.contents, c.contents)
}

#[test]
fn float_literals_keep_a_decimal_marker() {
    assert_eq!(cpp_float(0.0), "0.0f");
    assert_eq!(cpp_float(1.0), "1.0f");
    assert_eq!(cpp_float(2e-5), "2e-5f");
    assert_eq!(cpp_float(1e6), "1000000.0f");
}

#[test]
fn header_declares_dirty_flags_in_table_order() {
    let (h, _) = render_files(Platform::Linux);
    assert!(h.contains("        DirtyInteractiveMode = 1 << 0,\n"));
    assert!(h.contains("        DirtyRenderQuality = 1 << 1,\n"));
    assert!(h.contains("        DirtyUsdNativeCamera = 1 << 7,\n"));
    let a = h.find("DirtyDenoise = ").unwrap();
    let b = h.find("DirtySampling = ").unwrap();
    assert!(a < b);
}

#[test]
fn header_declares_enums_accessors_and_versioned_prefs() {
    let (h, _) = render_files(Platform::Linux);
    assert!(h.contains(
        "enum RenderQualityType {\n    kRenderQualityLow,\n    kRenderQualityMedium,\n    \
         kRenderQualityHigh,\n    kRenderQualityFull,\n};"
    ));
    assert!(h.contains("    void SetRenderQuality(int renderQuality);\n"));
    assert!(h.contains(
        "    RenderQualityType GetRenderQuality() const { return m_prefData.renderQuality; }\n"
    ));
    assert!(h.contains("    void SetRaycastEpsilon(float raycastEpsilon);\n"));
    assert!(h.contains("        uint32_t version;\n        bool enableInteractive;\n"));
    assert!(h.contains("constexpr static uint32_t k_prefDataVersion = 0x"));
    assert!(h.contains("    (maxSamples) \\\n"));
}

#[test]
fn non_identifier_names_use_explicit_token_strings() {
    let table = TableBuilder::new()
        .category(
            CategoryBuilder::new("Mesh")
                .setting(SettingBuilder::new("primvars:rpr:id", 0).range(0, 65536).build().unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let layout = compile_layout(&table, Platform::Linux).unwrap();
    let [h, c] = emit_config(&layout).unwrap();
    assert!(h.contents.contains("    ((primvarsRprId, \"primvars:rpr:id\")) \\\n"));
    assert!(h.contents.contains("void SetPrimvarsRprId(int primvarsRprId);"));
    assert!(c.contents.contains("const int kPrimvarsRprIdMax = 65536;"));
}

#[test]
fn source_defines_symbolic_and_literal_defaults() {
    let (_, c) = render_files(Platform::Linux);
    assert!(c.contains("const RenderQualityType kRenderQualityDefault = kRenderQualityFull;\n"));
    assert!(c.contains("const RenderQualityType kRenderQualityMax = RenderQualityType(3);\n"));
    assert!(c.contains("const int kMaxSamplesDefault = 256;\n"));
    assert!(c.contains("const int kMaxSamplesMin = 1;\n"));
    assert!(c.contains("const int kMaxSamplesMax = 65536;\n"));
    assert!(c.contains("const float kRaycastEpsilonDefault = 2e-5f;\n"));
    assert!(c.contains("const bool kEnableDenoisingDefault = false;\n"));
    assert!(c.contains(
        "const TfToken kAspectRatioConformPolicyDefault = TfToken(\"expandAperture\");\n"
    ));
}

#[test]
fn setters_validate_then_raise_their_category_bit() {
    let (_, c) = render_files(Platform::Linux);
    let expected = "void HdRprConfig::SetMaxSamples(int maxSamples) {\n\
                    \x20   if (maxSamples < kMaxSamplesMin) { return; }\n\
                    \x20   if (maxSamples > kMaxSamplesMax) { return; }\n\
                    \n\
                    \x20   if (m_prefData.maxSamples != maxSamples) {\n\
                    \x20       m_prefData.maxSamples = int(maxSamples);\n\
                    \x20       m_prefData.Save();\n\
                    \x20       m_dirtyFlags |= DirtySampling;\n\
                    \x20   }\n\
                    }\n";
    assert!(c.contains(expected), "{c}");
}

#[test]
fn platform_disabled_setters_are_no_ops() {
    let (_, mac) = render_files(Platform::Darwin);
    assert!(mac.contains(
        "void HdRprConfig::SetRenderQuality(int renderQuality) { /* Platform no-op */ }"
    ));
    let (_, linux) = render_files(Platform::Linux);
    assert!(!linux.contains("Platform no-op"));
}

#[test]
fn sync_reads_each_setting_with_matching_coercion() {
    let (_, c) = render_files(Platform::Linux);
    assert!(c.contains("if (m_lastRenderSettingsVersion != currentSettingsVersion) {"));
    assert!(c.contains(
        "        SetEnableDenoising(getBoolSetting(HdRprRenderSettingsTokens->enableDenoising, kEnableDenoisingDefault));\n"
    ));
    assert!(c.contains(
        "        SetRenderQuality(getEnumSetting(HdRprRenderSettingsTokens->renderQuality, {\"Low\", \"Medium\", \"High\", \"Full\"}, int(kRenderQualityDefault)));\n"
    ));
    assert!(c.contains(
        "        SetMaxSamples(renderDelegate->GetRenderSetting(HdRprRenderSettingsTokens->maxSamples, int(kMaxSamplesDefault)));\n"
    ));
    assert!(c.contains(
        "        SetVarianceThreshold(getFloatSetting(HdRprRenderSettingsTokens->varianceThreshold, kVarianceThresholdDefault));\n"
    ));
}

#[test]
fn descriptors_only_for_ui_visible_settings() {
    let (_, c) = render_files(Platform::Linux);
    assert!(c.contains(
        "    settingDescs.push_back({\"Max Pixel Samples\", HdRprRenderSettingsTokens->maxSamples, VtValue(kMaxSamplesDefault)});\n"
    ));
    assert!(c.contains(
        "    settingDescs.push_back({\"Render Quality\", HdRprRenderSettingsTokens->renderQuality, VtValue(TfToken(\"Full\"))});\n"
    ));
    assert!(!c.contains("HdRprRenderSettingsTokens->instantaneousShutter, VtValue"));
}

#[test]
fn is_valid_checks_version_and_ranges() {
    let (_, c) = render_files(Platform::Linux);
    assert!(c.contains("    return version == k_prefDataVersion\n"));
    assert!(c.contains("        && maxSamples >= kMaxSamplesMin\n        && maxSamples <= kMaxSamplesMax"));
    assert!(c.contains("    version = k_prefDataVersion;\n    enableInteractive = false;\n"));
}
