//! Signature builders shared by the emitters.
//!
//! All builders are pure and total: missing optional keys never fail, they
//! fall back to `any` (public types), `void` (return types) or to the
//! untemplated registration form.
//!
//! # Template arguments
//!
//! The native side spells an explicit argument list (`<R, P1, P2>`) only when
//! every parameter declares a native type. One missing parameter type drops
//! the whole list and lets embind deduce the signature from the function
//! pointer instead. When the record has no `parameters` key at all, the list
//! is emitted only if a native return type is given.

use crate::definition::{FunctionDefinition, InstanceKind, Parameter};
use crate::model::InstanceFunction;

/// Public type used when a record leaves it unset.
pub const ANY_TYPE: &str = "any";

/// Return type used when a record leaves it unset.
pub const VOID_TYPE: &str = "void";

/// Resolve the native `[return, params...]` list, or `None` for the
/// untemplated form.
pub fn template_arguments<'a>(
    return_type: Option<&'a str>,
    parameters: Option<&'a [Parameter]>,
) -> Option<Vec<&'a str>> {
    let typed = match parameters {
        Some(params) => params.iter().all(|p| p.cpp_type.is_some()),
        None => return_type.is_some(),
    };
    if !typed {
        return None;
    }

    let mut arguments = vec![return_type.unwrap_or(VOID_TYPE)];
    arguments.extend(
        parameters
            .unwrap_or_default()
            .iter()
            .filter_map(|p| p.cpp_type.as_deref()),
    );
    Some(arguments)
}

fn callable_template(function: &FunctionDefinition) -> String {
    template_arguments(function.cpp_type.as_deref(), function.parameters.as_deref())
        .map(|arguments| format!("<{}>", arguments.join(", ")))
        .unwrap_or_default()
}

fn native_reference(function: &FunctionDefinition) -> &str {
    function.cpp_interface.as_deref().unwrap_or_default()
}

/// Top-level function registration, without the trailing `;`.
///
/// `emscripten::function<double, const Point&>("area", &geo::area)`
pub fn function_signature(function: &FunctionDefinition) -> String {
    format!(
        "emscripten::function{}(\"{}\", &{})",
        callable_template(function),
        function.name,
        native_reference(function)
    )
}

/// Constructor clause of a class registration.
///
/// Records with a `cppInterface` register a factory through
/// `.smart_ptr_constructor`; records without one declare the smart pointer
/// type only (`.smart_ptr`).
pub fn constructor_signature(constructor: &FunctionDefinition) -> String {
    let template = callable_template(constructor);
    match constructor.cpp_interface.as_deref() {
        Some(reference) => format!(
            ".smart_ptr_constructor{template}(\"{}\", &{reference})",
            constructor.name
        ),
        None => format!(".smart_ptr{template}(\"{}\")", constructor.name),
    }
}

/// Static function clause of a class registration.
pub fn class_function_signature(function: &FunctionDefinition) -> String {
    format!(
        ".class_function{}(\"{}\", &{})",
        callable_template(function),
        function.name,
        native_reference(function)
    )
}

/// Instance function clause of a class registration.
///
/// The template argument is a function type:
/// - `R(Owner&, P...)` for free functions taking the instance first,
/// - `R(Owner::*)(P...)` for member functions,
/// - `R(Owner::*)(P...) const` for const member functions.
pub fn method_signature(owner_cpp_type: &str, method: &InstanceFunction) -> String {
    let definition = &method.definition;
    let template = template_arguments(
        definition.cpp_type.as_deref(),
        definition.parameters.as_deref(),
    )
    .map(|arguments| {
        let (return_type, params) = match arguments.split_first() {
            Some((first, rest)) => (*first, rest),
            None => (VOID_TYPE, &[][..]),
        };
        let function_type = match method.kind {
            InstanceKind::FreeFunction => {
                let mut all = vec![format!("{owner_cpp_type}&")];
                all.extend(params.iter().map(|p| p.to_string()));
                format!("{return_type}({})", all.join(", "))
            }
            InstanceKind::Method => {
                format!("{return_type}({owner_cpp_type}::*)({})", params.join(", "))
            }
            InstanceKind::ConstMethod => {
                format!(
                    "{return_type}({owner_cpp_type}::*)({}) const",
                    params.join(", ")
                )
            }
        };
        format!("<{function_type}>")
    })
    .unwrap_or_default();

    format!(
        ".function{template}(\"{}\", &{})",
        definition.name,
        native_reference(definition)
    )
}

/// TypeScript member signature: `name(a: number, b: any) : void`.
pub fn public_signature(function: &FunctionDefinition) -> String {
    let params = function
        .params()
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ts_type.as_deref().unwrap_or(ANY_TYPE)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}({params}) : {}",
        function.name,
        function.ts_type.as_deref().unwrap_or(VOID_TYPE)
    )
}
