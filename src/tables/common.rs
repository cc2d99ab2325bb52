use crate::foundation::error::CodegenResult;
use crate::schema::dsl::SettingBuilder;
use crate::schema::model::Setting;

/// Names of the per-prim visibility flags, in authoring order.
pub const VISIBILITY_FLAG_NAMES: [&str; 9] = [
    "primvars:rpr:visibilityPrimary",
    "primvars:rpr:visibilityShadow",
    "primvars:rpr:visibilityReflection",
    "primvars:rpr:visibilityGlossyReflection",
    "primvars:rpr:visibilityRefraction",
    "primvars:rpr:visibilityGlossyRefraction",
    "primvars:rpr:visibilityDiffuse",
    "primvars:rpr:visibilityTransparent",
    "primvars:rpr:visibilityLight",
];

/// Ray-visibility toggles shared by the geometry and light tables. All default to visible.
pub fn visibility_flag_settings() -> CodegenResult<Vec<Setting>> {
    let flags: [(&str, Option<&str>); 9] = [
        (
            "Camera Visibility",
            Some(
                "Used to show or hide an object from the camera.\n\
                 Disabling camera visibility is the most optimized way to hide an object from the \
                 camera but still have it cast shadows, be visible in reflections, etc.",
            ),
        ),
        (
            "Shadow Visibility",
            Some(
                "Shadow visibility controls whether to show or to hide shadows cast by the object \
                 onto other surfaces (including reflected shadows and shadows seen through \
                 transparent objects). You might need this option to hide shadows that darken \
                 other objects in the scene or create unwanted effects.",
            ),
        ),
        (
            "Reflection Visibility",
            Some(
                "Reflection visibility makes an object visible or invisible in reflections on \
                 specular surfaces. Note that hiding an object from specular reflections keeps \
                 its shadows (including reflected shadows) visible.",
            ),
        ),
        ("Glossy Reflection Visibility", None),
        (
            "Refraction Visibility",
            Some(
                "Refraction visibility makes an object visible or invisible when seen through \
                 transparent objects. Note that hiding an object from refractive rays keeps its \
                 shadows (including refracted shadows) visible.",
            ),
        ),
        ("Glossy Refraction Visibility", None),
        (
            "Diffuse Visibility",
            Some(
                "Diffuse visibility affects indirect diffuse rays and makes an object visible or \
                 invisible in reflections on diffuse surfaces.",
            ),
        ),
        ("Transparent Visibility", None),
        ("Light Visibility", None),
    ];

    VISIBILITY_FLAG_NAMES
        .iter()
        .zip(flags)
        .map(|(name, (label, help))| {
            let b = SettingBuilder::new(*name, true).ui_name(label);
            let b = match help {
                Some(h) => b.help(h),
                None => b,
            };
            b.build()
        })
        .collect()
}
