use crate::{
    foundation::core::Platform,
    foundation::error::{CodegenError, CodegenResult},
    schema::model::{
        Category, CategoryItem, EnumMember, Folder, Hidewhen, HoudiniMeta, Setting, SettingsTable,
        Value,
    },
};

/// Builder for a whole [`SettingsTable`]; `build` runs full validation.
#[derive(Default)]
pub struct TableBuilder {
    categories: Vec<Category>,
}

impl TableBuilder {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category. Order decides dirty-bit assignment.
    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Append several categories.
    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories.extend(categories);
        self
    }

    /// Finish and validate.
    pub fn build(self) -> CodegenResult<SettingsTable> {
        let table = SettingsTable::new(self.categories);
        table.validate()?;
        Ok(table)
    }
}

/// Builder for a [`Category`].
pub struct CategoryBuilder {
    name: String,
    hidewhen: Option<Hidewhen>,
    disabled_platforms: Vec<Platform>,
    items: Vec<CategoryItem>,
}

impl CategoryBuilder {
    /// Category named `name` (used verbatim in `Dirty<Name>`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidewhen: None,
            disabled_platforms: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Hide every setting of the category when `hidewhen` holds.
    pub fn hidewhen(mut self, hidewhen: Hidewhen) -> Self {
        self.hidewhen = Some(hidewhen);
        self
    }

    /// Compile the category's setters as no-ops on `platform`.
    pub fn disabled_on(mut self, platform: Platform) -> Self {
        if !self.disabled_platforms.contains(&platform) {
            self.disabled_platforms.push(platform);
        }
        self
    }

    /// Append a setting.
    pub fn setting(mut self, setting: Setting) -> Self {
        self.items.push(CategoryItem::Setting(setting));
        self
    }

    /// Append several settings.
    pub fn settings(mut self, settings: impl IntoIterator<Item = Setting>) -> Self {
        self.items
            .extend(settings.into_iter().map(CategoryItem::Setting));
        self
    }

    /// Append a folder.
    pub fn folder(mut self, folder: Folder) -> Self {
        self.items.push(CategoryItem::Folder(folder));
        self
    }

    /// Finish the category.
    pub fn build(self) -> CodegenResult<Category> {
        if self.name.trim().is_empty() {
            return Err(CodegenError::validation("category name must be non-empty"));
        }
        Ok(Category {
            name: self.name,
            houdini: self.hidewhen.map(|h| HoudiniMeta {
                hidewhen: Some(h),
                ..HoudiniMeta::default()
            }),
            disabled_platforms: self.disabled_platforms,
            items: self.items,
        })
    }
}

/// Builder for a [`Folder`].
pub struct FolderBuilder {
    name: String,
    hidewhen: Option<Hidewhen>,
    settings: Vec<Setting>,
}

impl FolderBuilder {
    /// Folder labelled `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidewhen: None,
            settings: Vec::new(),
        }
    }

    /// Hide the whole group when `hidewhen` holds.
    pub fn hidewhen(mut self, hidewhen: Hidewhen) -> Self {
        self.hidewhen = Some(hidewhen);
        self
    }

    /// Append a setting.
    pub fn setting(mut self, setting: Setting) -> Self {
        self.settings.push(setting);
        self
    }

    /// Append several settings.
    pub fn settings(mut self, settings: impl IntoIterator<Item = Setting>) -> Self {
        self.settings.extend(settings);
        self
    }

    /// Finish the folder.
    pub fn build(self) -> CodegenResult<Folder> {
        if self.name.trim().is_empty() {
            return Err(CodegenError::validation("folder name must be non-empty"));
        }
        Ok(Folder {
            name: self.name,
            houdini: self.hidewhen.map(|h| HoudiniMeta {
                hidewhen: Some(h),
                ..HoudiniMeta::default()
            }),
            settings: self.settings,
        })
    }
}

/// Builder for a single [`Setting`].
pub struct SettingBuilder {
    name: String,
    ui_name: Option<String>,
    default_value: Value,
    min_value: Option<Value>,
    max_value: Option<Value>,
    values: Option<Vec<EnumMember>>,
    help: Option<String>,
    disabled_platforms: Vec<Platform>,
    houdini: HoudiniMeta,
}

impl SettingBuilder {
    /// Setting `name` whose type follows `default_value`.
    pub fn new(name: impl Into<String>, default_value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ui_name: None,
            default_value: default_value.into(),
            min_value: None,
            max_value: None,
            values: None,
            help: None,
            disabled_platforms: Vec::new(),
            houdini: HoudiniMeta::default(),
        }
    }

    /// Expose the setting in the UI under `label`.
    pub fn ui_name(mut self, label: impl Into<String>) -> Self {
        self.ui_name = Some(label.into());
        self
    }

    /// Inclusive numeric range.
    pub fn range(mut self, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        self.min_value = Some(min.into());
        self.max_value = Some(max.into());
        self
    }

    /// Inclusive lower bound only.
    pub fn min(mut self, min: impl Into<Value>) -> Self {
        self.min_value = Some(min.into());
        self
    }

    /// Inclusive upper bound only.
    pub fn max(mut self, max: impl Into<Value>) -> Self {
        self.max_value = Some(max.into());
        self
    }

    /// Make the setting enumerated over `values`, in order.
    pub fn values<I, M>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<EnumMember>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Tooltip text.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Compile the setter as a no-op on `platform`.
    pub fn disabled_on(mut self, platform: Platform) -> Self {
        if !self.disabled_platforms.contains(&platform) {
            self.disabled_platforms.push(platform);
        }
        self
    }

    /// Hide the parameter when `hidewhen` holds.
    pub fn hidewhen(mut self, hidewhen: Hidewhen) -> Self {
        self.houdini.hidewhen = Some(hidewhen);
        self
    }

    /// Extra verbatim `parmtag` entry.
    pub fn custom_tag(mut self, tag: impl Into<String>) -> Self {
        self.houdini.custom_tags.push(tag.into());
        self
    }

    /// Override the inferred Houdini parameter type.
    pub fn houdini_type(mut self, ty: impl Into<String>) -> Self {
        self.houdini.param_type = Some(ty.into());
        self
    }

    /// Finish the setting. Cross-setting invariants are checked by [`TableBuilder::build`].
    pub fn build(self) -> CodegenResult<Setting> {
        if self.name.trim().is_empty() {
            return Err(CodegenError::validation("setting name must be non-empty"));
        }
        let has_houdini = self.houdini.hidewhen.is_some()
            || !self.houdini.custom_tags.is_empty()
            || self.houdini.param_type.is_some();
        Ok(Setting {
            name: self.name,
            ui_name: self.ui_name,
            default_value: self.default_value,
            min_value: self.min_value,
            max_value: self.max_value,
            values: self.values,
            help: self.help,
            disabled_platforms: self.disabled_platforms,
            houdini: has_houdini.then_some(self.houdini),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/dsl.rs"]
mod tests;
