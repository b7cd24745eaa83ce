use super::common::{load_xml, FileIdentity};
use crate::model::{GlobalVariable, Profile};
use std::path::Path;

/// Parser for execution profiles (`.glbl`)
pub struct ProfileParser;

impl ProfileParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, path: &Path, project_root: &Path) -> Option<Profile> {
        let root = load_xml(path)?;
        let identity = FileIdentity::new(path, project_root);

        Some(Profile {
            file_path: identity.file_path,
            relative_path: identity.relative_path,
            name: root.child_text("name"),
            description: root.child_text("description"),
            tag: root.child_text("tag"),
            is_default: root.child_bool("defaultProfile", false),
            global_variables: root
                .children_named("GlobalVariableEntity")
                .map(|var| GlobalVariable {
                    name: var.child_text("name"),
                    description: var.child_text("description"),
                    value_type: var.child_text("valueType"),
                    init_value: var.child_text("initValue"),
                    is_protected: var.child_bool("protected", false),
                })
                .collect(),
        })
    }
}

impl Default for ProfileParser {
    fn default() -> Self {
        Self::new()
    }
}
