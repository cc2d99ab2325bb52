use crate::foundation::core::Platform;
use crate::foundation::error::CodegenResult;
use crate::schema::dsl::{CategoryBuilder, SettingBuilder, TableBuilder};
use crate::schema::model::{EnumMember, Hidewhen, SettingsTable, ValueGate};

/// Name of the render-quality setting other categories key their visibility on.
pub const RENDER_QUALITY: &str = "renderQuality";

/// Quality keys from cheapest to most accurate.
const QUALITIES: [&str; 4] = ["Low", "Medium", "High", "Full"];

/// Global render settings: emitted as `config.h`/`config.cpp` and `HdRprPlugin_Global.ds`.
pub fn render_settings_table() -> CodegenResult<SettingsTable> {
    render_settings_table_with(&[])
}

/// Render settings with the listed render-quality keys removed from the quality menu.
///
/// Removing the default quality is a validation error.
#[tracing::instrument]
pub fn render_settings_table_with(hidden_qualities: &[String]) -> CodegenResult<SettingsTable> {
    let hybrid = ValueGate::Platforms(vec![Platform::Windows, Platform::Linux]);
    let qualities = QUALITIES
        .iter()
        .filter(|q| !hidden_qualities.iter().any(|h| h.trim() == **q))
        .map(|q| {
            let m = EnumMember::new(*q);
            if *q == "Full" {
                m
            } else {
                m.gated(hybrid.clone())
            }
        })
        .collect::<Vec<_>>();
    if qualities.len() < QUALITIES.len() {
        tracing::debug!(remaining = qualities.len(), "hiding render qualities");
    }

    let render_quality = CategoryBuilder::new("RenderQuality")
        .disabled_on(Platform::Darwin)
        .setting(
            SettingBuilder::new(RENDER_QUALITY, "Full")
                .ui_name("Render Quality")
                .help("Render restart might be required")
                .values(qualities)
                .build()?,
        )
        .build()?;

    let device = CategoryBuilder::new("Device")
        .hidewhen(Hidewhen::one("renderQuality != Full"))
        .setting(
            SettingBuilder::new("renderDevice", "GPU")
                .ui_name("Render Device")
                .help("Restart required.")
                .values(["CPU", "GPU"])
                .build()?,
        )
        .build()?;

    let denoise = CategoryBuilder::new("Denoise")
        .hidewhen(Hidewhen::Computed(hide_below_high))
        .setting(
            SettingBuilder::new("enableDenoising", false)
                .ui_name("Enable Denoising")
                .custom_tag("\"uiicon\" VIEW_display_denoise")
                .build()?,
        )
        .build()?;

    let sampling = CategoryBuilder::new("Sampling")
        .hidewhen(Hidewhen::Computed(hide_below_medium))
        .setting(
            SettingBuilder::new("maxSamples", 256)
                .ui_name("Max Pixel Samples")
                .help("Maximum number of samples to render for each pixel.")
                .range(1, 1 << 16)
                .build()?,
        )
        .build()?;

    let adaptive = CategoryBuilder::new("AdaptiveSampling")
        .hidewhen(Hidewhen::one("renderQuality != Full"))
        .setting(
            SettingBuilder::new("minAdaptiveSamples", 64)
                .ui_name("Min Pixel Samples")
                .help(
                    "Minimum number of samples to render for each pixel. After this, adaptive \
                     sampling will stop sampling pixels where noise is less than 'Variance \
                     Threshold'.",
                )
                .range(1, 1 << 16)
                .build()?,
        )
        .setting(
            SettingBuilder::new("varianceThreshold", 0.0)
                .ui_name("Variance Threshold")
                .help(
                    "Cutoff for adaptive sampling. Once pixels are below this amount of noise, \
                     no more samples are added. Set to 0 for no cutoff.",
                )
                .range(0.0, 1.0)
                .build()?,
        )
        .build()?;

    let quality = CategoryBuilder::new("Quality")
        .hidewhen(Hidewhen::one("renderQuality != Full"))
        .settings(ray_depth_settings()?)
        .setting(
            SettingBuilder::new("raycastEpsilon", 2e-5)
                .ui_name("Ray Cast Epsilon")
                .help(
                    "Determines an offset used to move light rays away from the geometry for \
                     ray-surface intersection calculations.",
                )
                .range(1e-6, 1.0)
                .build()?,
        )
        .setting(
            SettingBuilder::new("enableRadianceClamping", false)
                .ui_name("Enable Clamp Radiance")
                .build()?,
        )
        .setting(
            SettingBuilder::new("radianceClamping", 0.0)
                .ui_name("Clamp Radiance")
                .help(
                    "Limits the intensity, or the maximum brightness, of samples in the scene. \
                     Greater clamp radiance values produce more brightness.",
                )
                .range(0.0, 1e6)
                .build()?,
        )
        .setting(
            SettingBuilder::new("interactiveMaxRayDepth", 2)
                .ui_name("Interactive Max Ray Depth")
                .help("Controls value of 'Max Ray Depth' in interactive mode.")
                .range(1, 50)
                .build()?,
        )
        .build()?;

    // Read by the delegate from the render settings map; not exposed in the UI.
    let camera = CategoryBuilder::new("UsdNativeCamera")
        .setting(SettingBuilder::new("aspectRatioConformPolicy", "expandAperture").build()?)
        .setting(SettingBuilder::new("instantaneousShutter", false).build()?)
        .build()?;

    TableBuilder::new()
        .categories([
            render_quality,
            device,
            denoise,
            sampling,
            adaptive,
            quality,
            camera,
        ])
        .build()
}

fn ray_depth_settings() -> CodegenResult<Vec<crate::schema::model::Setting>> {
    let depths: [(&str, &str, i64, i64, &str); 6] = [
        (
            "maxRayDepth",
            "Max Ray Depth",
            8,
            1,
            "The number of times that a ray bounces off various surfaces before being terminated.",
        ),
        (
            "maxRayDepthDiffuse",
            "Diffuse Ray Depth",
            3,
            0,
            "The maximum number of times that a light ray can be bounced off diffuse surfaces.",
        ),
        (
            "maxRayDepthGlossy",
            "Glossy Ray Depth",
            3,
            0,
            "The maximum number of ray bounces from specular surfaces.",
        ),
        (
            "maxRayDepthRefraction",
            "Refraction Ray Depth",
            3,
            0,
            "The maximum number of times that a light ray can be refracted, and is designated for \
             clear transparent materials, such as glass.",
        ),
        (
            "maxRayDepthGlossyRefraction",
            "Glossy Refraction Ray Depth",
            3,
            0,
            "The Glossy Refraction Ray Depth parameter is similar to the Refraction Ray Depth. The \
             difference is that it is aimed to work with matte refractive materials, such as \
             semi-frosted glass.",
        ),
        (
            "maxRayDepthShadow",
            "Shadow Ray Depth",
            2,
            0,
            "Controls the accuracy of shadows cast by transparent objects. It defines the maximum \
             number of surfaces that a light ray can encounter on its way causing these surfaces \
             to cast shadows.",
        ),
    ];
    depths
        .into_iter()
        .map(|(name, label, default, min, help)| {
            SettingBuilder::new(name, default)
                .ui_name(label)
                .help(help)
                .range(min, 50i64)
                .build()
        })
        .collect()
}

fn hide_below_high(table: &SettingsTable) -> Vec<String> {
    qualities_below(table, "High")
}

fn hide_below_medium(table: &SettingsTable) -> Vec<String> {
    qualities_below(table, "Medium")
}

/// One `renderQuality == <key>` condition per offered quality cheaper than `threshold`.
fn qualities_below(table: &SettingsTable, threshold: &str) -> Vec<String> {
    let Some(rq) = table.find_setting(RENDER_QUALITY) else {
        return Vec::new();
    };
    let limit = QUALITIES
        .iter()
        .position(|q| *q == threshold)
        .unwrap_or(0);
    rq.members()
        .iter()
        .map(|m| m.key())
        .filter(|k| QUALITIES[..limit].contains(&k.as_str()))
        .map(|k| format!("{RENDER_QUALITY} == {k}"))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/tables/render.rs"]
mod tests;
