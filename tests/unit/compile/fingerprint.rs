use super::*;
use crate::compile::compile_layout;
use crate::foundation::core::Platform;
use crate::schema::dsl::{CategoryBuilder, SettingBuilder, TableBuilder};
use crate::schema::model::SettingsTable;

fn table(default: impl Into<crate::schema::model::Value>) -> SettingsTable {
    TableBuilder::new()
        .category(
            CategoryBuilder::new("Sampling")
                .setting(SettingBuilder::new("maxSamples", default).build().unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

#[test]
fn version_ignores_defaults_but_tracks_kinds() {
    let a = compile_layout(&table(256), Platform::Linux).unwrap();
    let b = compile_layout(&table(64), Platform::Linux).unwrap();
    let c = compile_layout(&table(256.0), Platform::Linux).unwrap();
    assert_eq!(prefs_version(&a.settings), prefs_version(&b.settings));
    assert_ne!(prefs_version(&a.settings), prefs_version(&c.settings));
    assert_eq!(a.prefs_version, prefs_version(&a.settings));
}

#[test]
fn version_is_never_zero() {
    assert_ne!(prefs_version(&[]), 0);
}
