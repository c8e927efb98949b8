//! Native registration generation (`EMSCRIPTEN_BINDINGS`).
//!
//! Blocks are emitted in a fixed order: free functions, enums, value
//! objects, vectors, maps, container templates, classes. Blocks are
//! separated by a blank line, also when a category is empty.
//!
//! Class members may carry a `preprocessorDefinition`; the clause is then
//! wrapped in `#ifdef SYMBOL` / `#endif` so optional native capabilities can
//! be compiled out without touching the definition file.

use crate::definition::{EnumDefinition, FieldDefinition, PropertyKind, ValueObjectDefinition};
use crate::model::{ClassModel, InterfaceModel};
use crate::signature::{
    class_function_signature, constructor_signature, function_signature, method_signature,
};

const CLAUSE_INDENT: &str = "        ";

/// Generate the registration listing.
///
/// With a non-empty `interface_name` the listing is wrapped in
/// `EMSCRIPTEN_BINDINGS(name) { ... }`. Otherwise the bare block is
/// returned, ready to be spliced into a larger registration unit.
pub fn generate_registration(interface_name: Option<&str>, model: &InterfaceModel) -> String {
    let functions: String = model
        .functions
        .iter()
        .map(|f| format!("    {};\n", function_signature(f)))
        .collect();

    let enums: String = model.enums.iter().map(enum_registration).collect();

    let value_objects: String = model
        .value_objects
        .iter()
        .map(value_object_registration)
        .collect();

    let vectors: String = model
        .vectors
        .iter()
        .map(|v| {
            format!(
                "    emscripten::register_vector<{}>(\"{}\");\n",
                v.cpp_type, v.name
            )
        })
        .collect();

    let maps: String = model
        .maps
        .iter()
        .map(|m| {
            format!(
                "    emscripten::register_map<{}, {}>(\"{}\");\n",
                m.cpp_key_type, m.cpp_value_type, m.name
            )
        })
        .collect();

    let templates: String = model
        .templates
        .iter()
        .map(|t| format!("    {}<{}>(\"{}\");\n", t.cpp_factory, t.cpp_type, t.name))
        .collect();

    let classes: String = model.classes.iter().map(class_registration).collect();

    let body = format!(
        "\n{functions}\n{enums}\n{value_objects}\n{vectors}\n{maps}\n{templates}\n{classes}"
    );

    match interface_name.filter(|name| !name.is_empty()) {
        Some(name) => format!("EMSCRIPTEN_BINDINGS({name}) {{\n{body}\n}}"),
        None => body,
    }
}

fn enum_registration(definition: &EnumDefinition) -> String {
    let mut code = format!(
        "    emscripten::enum_<{}>(\"{}\")\n",
        definition.cpp_type, definition.name
    );

    for value in &definition.values {
        code.push_str(&format!(
            "{CLAUSE_INDENT}.value(\"{}\", {})\n",
            value.value, value.cpp_value
        ));
    }

    code.push_str(CLAUSE_INDENT);
    code.push_str(";\n");
    code
}

fn value_object_registration(value_object: &ValueObjectDefinition) -> String {
    let mut code = format!(
        "    emscripten::value_object<{}>(\"{}\")\n",
        value_object.cpp_type, value_object.name
    );

    for field in &value_object.fields {
        if let Some(clause) = field_clause(&value_object.cpp_type, field) {
            code.push_str(CLAUSE_INDENT);
            code.push_str(&clause);
            code.push('\n');
        }
    }

    code.push_str(CLAUSE_INDENT);
    code.push_str(";\n");
    code
}

/// A `.field(...)` clause, or `None` for fields without a usable binding
/// (getter-only fields have no attribute to write back to).
fn field_clause(owner_cpp_type: &str, field: &FieldDefinition) -> Option<String> {
    if let Some(attribute) = &field.cpp_attribute {
        let template = field
            .cpp_type
            .as_ref()
            .map(|cpp_type| format!("<{owner_cpp_type}, {cpp_type}>"))
            .unwrap_or_default();
        return Some(format!(
            ".field{template}(\"{}\", &{attribute})",
            field.name
        ));
    }

    let (Some(getter), Some(setter)) = (&field.cpp_getter, &field.cpp_setter) else {
        return None;
    };

    let class_type = field.cpp_class_type.as_deref().unwrap_or(owner_cpp_type);
    let template = field
        .cpp_type
        .as_ref()
        .map(|cpp_type| {
            let setter_argument = if field.per_value {
                cpp_type.clone()
            } else {
                format!("const {cpp_type}&")
            };
            format!(
                "<{cpp_type}(*)(const {class_type}&), void(*)({class_type}&, {setter_argument})>"
            )
        })
        .unwrap_or_default();

    Some(format!(
        ".field{template}(\"{}\", {getter}, {setter})",
        field.name
    ))
}

fn class_registration(class: &ClassModel) -> String {
    let base = class
        .cpp_base_class
        .as_ref()
        .map(|base| format!(", {base}"))
        .unwrap_or_default();
    let mut code = format!(
        "    emscripten::class_<{}{base}>(\"{}\")\n",
        class.cpp_type, class.name
    );

    for constructor in &class.constructors {
        push_guarded(
            &mut code,
            constructor.preprocessor_definition.as_deref(),
            &constructor_signature(constructor),
        );
    }

    for function in &class.class_functions {
        push_guarded(
            &mut code,
            function.preprocessor_definition.as_deref(),
            &class_function_signature(function),
        );
    }

    for function in &class.functions {
        push_guarded(
            &mut code,
            function.definition.preprocessor_definition.as_deref(),
            &method_signature(&class.cpp_type, function),
        );
    }

    for property in &class.properties {
        let definition = &property.definition;
        let binding = match property.kind {
            PropertyKind::Instance => "property",
            PropertyKind::Class => "class_property",
        };
        let clause = match &definition.cpp_setter {
            Some(setter) => format!(
                ".{binding}(\"{}\", &{}, &{setter})",
                definition.name, definition.cpp_getter
            ),
            None => format!(
                ".{binding}(\"{}\", &{})",
                definition.name, definition.cpp_getter
            ),
        };
        push_guarded(
            &mut code,
            definition.preprocessor_definition.as_deref(),
            &clause,
        );
    }

    code.push_str(CLAUSE_INDENT);
    code.push_str(";\n");
    code
}

fn push_guarded(code: &mut String, guard: Option<&str>, clause: &str) {
    if let Some(symbol) = guard {
        code.push_str(&format!("#ifdef {symbol}\n"));
    }
    code.push_str(CLAUSE_INDENT);
    code.push_str(clause);
    code.push('\n');
    if guard.is_some() {
        code.push_str("#endif\n");
    }
}
