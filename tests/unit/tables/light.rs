use super::*;
use crate::tables::VISIBILITY_FLAG_NAMES;
use crate::tables::geometry_settings_table;

#[test]
fn light_flips_three_visibility_defaults() {
    let table = light_settings_table().unwrap();
    let defaults: Vec<_> = table
        .settings()
        .map(|(_, s)| (s.name.as_str(), s.default_value.clone()))
        .collect();
    assert_eq!(defaults.len(), VISIBILITY_FLAG_NAMES.len());
    for (name, value) in defaults {
        let expected = !HIDDEN_BY_DEFAULT.contains(&name);
        assert_eq!(value, Value::Bool(expected), "{name}");
    }
}

#[test]
fn geometry_keeps_all_flags_visible_inside_a_folder() {
    let table = geometry_settings_table().unwrap();
    assert_eq!(table.categories.len(), 1);
    assert_eq!(table.categories[0].name, "Mesh");
    let flags: Vec<_> = table
        .settings()
        .filter(|(_, s)| s.name.contains("visibility"))
        .map(|(_, s)| s.default_value.clone())
        .collect();
    assert_eq!(flags.len(), 9);
    assert!(flags.iter().all(|v| *v == Value::Bool(true)));
    assert!(matches!(
        table.categories[0].items[3],
        crate::schema::model::CategoryItem::Folder(_)
    ));
}
