use super::common::{load_xml, FileIdentity};
use super::xml::XmlElement;
use crate::model::{ElementProperty, ElementType, TestObject};
use std::collections::BTreeMap;
use std::path::Path;

/// Parser for test objects (`.rs` below `Object Repository`)
pub struct ObjectRepositoryParser;

impl ObjectRepositoryParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, path: &Path, project_root: &Path) -> Option<TestObject> {
        let root = load_xml(path)?;
        let identity = FileIdentity::new(path, project_root);

        Some(TestObject {
            file_path: identity.file_path,
            relative_path: identity.relative_path,
            element_type: ElementType::from_root_tag(&root.name),
            name: root.child_text("name"),
            description: root.child_text("description"),
            tag: root.child_text("tag"),
            guid: root.child_text("elementGuidId"),
            selector_method: root.child_text("selectorMethod"),
            smart_locator_enabled: root.child_bool("smartLocatorEnabled", false),
            selectors: entries(root.child("selectorCollection")),
            smart_locators: entries(root.child("smartLocatorCollection")),
            properties: root
                .children_named("webElementProperties")
                .map(element_property)
                .collect(),
            xpaths: root
                .children_named("webElementXpaths")
                .map(element_property)
                .collect(),
        })
    }
}

impl Default for ObjectRepositoryParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `<entry><key/><value/></entry>` pairs; entries missing either side are dropped
fn entries(collection: Option<&XmlElement>) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    if let Some(collection) = collection {
        for entry in collection.children_named("entry") {
            let key = entry.child_text("key");
            let value = entry.child_text("value");
            if !key.is_empty() && !value.is_empty() {
                map.insert(key, value);
            }
        }
    }
    map
}

fn element_property(element: &XmlElement) -> ElementProperty {
    ElementProperty {
        name: element.child_text("name"),
        value: element.child_text("value"),
        property_type: element.child_text("type"),
        match_condition: element.child_text("matchCondition"),
        is_selected: element.child_bool("isSelected", false),
        guid: element.child_text("webElementGuid"),
    }
}
