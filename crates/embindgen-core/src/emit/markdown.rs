//! Markdown reference documentation.

use crate::model::{ClassModel, InterfaceModel};
use crate::signature::{ANY_TYPE, public_signature};

/// Generate the reference documentation.
///
/// Sections (`## Enums`, `## Containers`, `## Objects`, `## Classes`) are
/// only written for categories that have entries.
pub fn generate_markdown(model: &InterfaceModel) -> String {
    let mut docs = String::new();

    if !model.enums.is_empty() {
        docs.push_str("## Enums\n\n");
        for definition in &model.enums {
            let values = definition
                .values
                .iter()
                .map(|v| v.value.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            docs.push_str(&format!("- `{}` :", definition.name));
            if !values.is_empty() {
                docs.push(' ');
                docs.push_str(&values);
            }
            docs.push('\n');
        }
        docs.push('\n');
    }

    if model.has_containers() {
        docs.push_str("## Containers\n\n");
        for vector in &model.vectors {
            docs.push_str(&format!(
                "- `{}` : array of `{}`\n",
                vector.name, vector.cpp_type
            ));
        }
        for map in &model.maps {
            docs.push_str(&format!(
                "- `{}` : map of `{}`: `{}`\n",
                map.name,
                map.ts_key_type.as_deref().unwrap_or(ANY_TYPE),
                map.ts_value_type.as_deref().unwrap_or(ANY_TYPE)
            ));
        }
        for template in &model.templates {
            docs.push_str(&format!(
                "- `{}` : {} of `{}`\n",
                template.name, template.ts_interface, template.cpp_type
            ));
        }
        docs.push('\n');
    }

    if !model.value_objects.is_empty() {
        docs.push_str("## Objects\n\n");
        for value_object in &model.value_objects {
            docs.push_str(&format!("### `{}`\n\n", value_object.name));
            if value_object.fields.is_empty() {
                continue;
            }
            for field in &value_object.fields {
                let optional = if field.optional { "?" } else { "" };
                docs.push_str(&format!(
                    "- `{}{optional}: {}`\n",
                    field.name,
                    field.ts_type.as_deref().unwrap_or(ANY_TYPE)
                ));
            }
            docs.push('\n');
        }
    }

    if !model.classes.is_empty() {
        docs.push_str("## Classes\n\n");
        for class in &model.classes {
            docs.push_str(&class_section(class));
        }
    }

    docs
}

fn class_section(class: &ClassModel) -> String {
    let mut docs = format!("### class `{}`\n\n", class.name);

    if !class.class_functions.is_empty() {
        docs.push_str("class methods:\n\n");
        for function in &class.class_functions {
            push_entry(&mut docs, &public_signature(function), function.description.as_deref());
        }
        docs.push('\n');
    }

    if !class.functions.is_empty() {
        docs.push_str("methods:\n\n");
        for function in &class.functions {
            let definition = &function.definition;
            push_entry(
                &mut docs,
                &public_signature(definition),
                definition.description.as_deref(),
            );
            // method descriptions are followed by a blank line
            if definition.description.is_some() {
                docs.push('\n');
            }
        }
        docs.push('\n');
    }

    if !class.properties.is_empty() {
        docs.push_str("properties:\n\n");
        for property in &class.properties {
            let definition = &property.definition;
            docs.push_str(&format!(
                "- `{}: {}`\n",
                definition.name,
                definition.ts_type.as_deref().unwrap_or(ANY_TYPE)
            ));
        }
        docs.push('\n');
    }

    docs
}

fn push_entry(docs: &mut String, signature: &str, description: Option<&str>) {
    docs.push_str(&format!("- `{signature}`\n"));
    if let Some(description) = description {
        docs.push_str(&format!("  {description}\n"));
    }
}
