//! TypeScript declaration generation.
//!
//! Output order is fixed: enums, container aliases (vectors, maps,
//! templates), value-object interfaces, class interfaces, and finally the
//! container interface that the module loader returns.

use crate::definition::{EnumDefinition, ValueObjectDefinition};
use crate::model::{ClassModel, InterfaceModel};
use crate::signature::{ANY_TYPE, public_signature};

/// Generate the TypeScript declarations for a model.
///
/// `container_name` names the aggregating interface listing every container
/// alias, class and top-level function of the module.
pub fn generate_typescript(container_name: &str, model: &InterfaceModel) -> String {
    let mut code = String::new();

    for definition in &model.enums {
        code.push_str(&enum_block(definition));
    }

    for vector in &model.vectors {
        if let Some(ts_type) = &vector.ts_type {
            code.push_str(&format!(
                "export type {} = EmscriptenArray<{}>;\n\n",
                vector.name, ts_type
            ));
        }
    }

    for map in &model.maps {
        if let (Some(key), Some(value)) = (&map.ts_key_type, &map.ts_value_type) {
            code.push_str(&format!(
                "export type {} = EmscriptenMap<{}, {}>;\n\n",
                map.name, key, value
            ));
        }
    }

    for template in &model.templates {
        if let Some(ts_type) = &template.ts_type {
            code.push_str(&format!(
                "export type {} = {}<{}>;\n\n",
                template.name, template.ts_interface, ts_type
            ));
        }
    }

    for value_object in &model.value_objects {
        code.push_str(&value_object_interface(value_object));
    }

    for class in &model.classes {
        code.push_str(&class_interface(class));
    }

    code.push_str(&container_interface(container_name, model));

    code
}

fn enum_block(definition: &EnumDefinition) -> String {
    let mut code = format!("export const enum {} {{\n", definition.name);

    let last = definition.values.len().saturating_sub(1);
    for (i, value) in definition.values.iter().enumerate() {
        let separator = if i < last { "," } else { "" };
        code.push_str(&format!("    {}{}\n", value.value, separator));
    }

    code.push_str("}\n\n");
    code
}

fn value_object_interface(value_object: &ValueObjectDefinition) -> String {
    let mut code = format!("export interface {} {{\n", value_object.name);

    for field in &value_object.fields {
        let access = if field.is_read_only() { "readonly " } else { "" };
        let optional = if field.optional { "?" } else { "" };
        code.push_str(&format!(
            "    {access}{}{optional}: {};\n",
            field.name,
            field.ts_type.as_deref().unwrap_or(ANY_TYPE)
        ));
    }

    code.push_str("}\n\n");
    code
}

/// A class interface.
///
/// The construction signature is always the zero-argument `new(): Name`,
/// whatever the declared constructors take. It marks the class as
/// constructible; it does not mirror the native overloads.
fn class_interface(class: &ClassModel) -> String {
    let mut code = format!("export interface {} {{\n", class.name);

    if !class.constructors.is_empty() {
        code.push_str(&format!("    new(): {};\n", class.name));
    }

    for function in &class.class_functions {
        code.push_str(&format!("    {};\n", public_signature(function)));
    }

    for function in &class.functions {
        code.push_str(&format!("    {};\n", public_signature(&function.definition)));
    }

    for property in &class.properties {
        let definition = &property.definition;
        let access = if definition.is_read_only() { "readonly " } else { "" };
        code.push_str(&format!(
            "    {access}{} : {};\n",
            definition.name,
            definition.ts_type.as_deref().unwrap_or(ANY_TYPE)
        ));
    }

    code.push_str("}\n\n");
    code
}

fn container_interface(container_name: &str, model: &InterfaceModel) -> String {
    let members: Vec<String> = model
        .vectors
        .iter()
        .map(|v| v.name.as_str())
        .chain(model.maps.iter().map(|m| m.name.as_str()))
        .chain(model.templates.iter().map(|t| t.name.as_str()))
        .chain(model.classes.iter().map(|c| c.name.as_str()))
        .map(|name| format!("    {name} : {name};\n"))
        .chain(
            model
                .functions
                .iter()
                .map(|f| format!("    {};\n", public_signature(f))),
        )
        .collect();

    if members.is_empty() {
        return String::new();
    }

    format!("export interface {container_name} {{\n{}}}", members.concat())
}
