//! Definition records as they appear in the JSON description.
//!
//! A definition document is a JSON object with an `objects` array. Every
//! element is a record with a `type` discriminant (case-insensitive) and a
//! `name`. The remaining keys depend on the discriminant:
//!
//! | `type` | Record | Key fields |
//! |--------|--------|------------|
//! | `enum` | [`EnumDefinition`] | `cppType`, `values[{value, cppValue}]` |
//! | `value_object` | [`ValueObjectDefinition`] | `cppType`, `fields[]` |
//! | `vector` | [`VectorDefinition`] | `cppType`, `tsType` |
//! | `map` | [`MapDefinition`] | `cppKeyType`, `cppValueType`, `tsKeyType`, `tsValueType` |
//! | `template` | [`TemplateDefinition`] | `cppFactory`, `tsInterface`, `cppType`, `tsType` |
//! | `class` | [`ClassDefinition`] | `cppType`, `cppBaseClass`, `methods[]` |
//! | `function` | [`FunctionDefinition`] | `cppInterface`, `cppType`, `tsType`, `parameters[]` |
//!
//! Records are decoded leniently: every key is optional and falls back to an
//! empty value, so a partially specified schema still produces output. A key
//! that is `null`, carries the wrong JSON type or holds an empty string is
//! treated as absent. Only records without a usable discriminant are logged
//! and dropped.

use crate::error::{GeneratorError, GeneratorResult};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// The raw definition document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefinitionDocument {
    /// Unclassified definition records.
    #[serde(default)]
    pub objects: Vec<Value>,
}

impl DefinitionDocument {
    /// Load a definition document from a file
    pub fn from_file(path: impl AsRef<Path>) -> GeneratorResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|err| GeneratorError::io(path, err))?;

        Self::from_str(&content)
    }

    /// Load a definition document from a file without blocking the runtime
    pub async fn load(path: impl AsRef<Path>) -> GeneratorResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| GeneratorError::io(path, err))?;

        Self::from_str(&content)
    }

    /// Parse a definition document from a string
    pub fn from_str(content: &str) -> GeneratorResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Decode every record, dropping the ones that are not understood
    pub fn definitions(&self) -> Vec<Definition> {
        self.objects.iter().filter_map(Definition::from_value).collect()
    }
}

/// Top-level record discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Enum,
    ValueObject,
    Vector,
    Map,
    Template,
    Class,
    Function,
}

impl DefinitionKind {
    /// Resolve a `type` tag, ignoring case
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "enum" => Some(DefinitionKind::Enum),
            "value_object" => Some(DefinitionKind::ValueObject),
            "vector" => Some(DefinitionKind::Vector),
            "map" => Some(DefinitionKind::Map),
            "template" => Some(DefinitionKind::Template),
            "class" => Some(DefinitionKind::Class),
            "function" => Some(DefinitionKind::Function),
            _ => None,
        }
    }

    /// The canonical `type` tag
    pub fn tag(&self) -> &'static str {
        match self {
            DefinitionKind::Enum => "enum",
            DefinitionKind::ValueObject => "value_object",
            DefinitionKind::Vector => "vector",
            DefinitionKind::Map => "map",
            DefinitionKind::Template => "template",
            DefinitionKind::Class => "class",
            DefinitionKind::Function => "function",
        }
    }
}

impl std::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A decoded definition record.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Enum(EnumDefinition),
    ValueObject(ValueObjectDefinition),
    Vector(VectorDefinition),
    Map(MapDefinition),
    Template(TemplateDefinition),
    Class(ClassDefinition),
    Function(FunctionDefinition),
}

impl Definition {
    /// Decode a raw record.
    ///
    /// Returns `None` for records without a usable `type` tag and for records
    /// that fail to decode; both cases are logged.
    pub fn from_value(value: &Value) -> Option<Self> {
        let name = record_name(value);

        let Some(tag) = value.get("type").and_then(Value::as_str) else {
            warn!(name, "definition record has no type, skipping");
            return None;
        };

        let Some(kind) = DefinitionKind::from_tag(tag) else {
            debug!(name, tag, "unsupported definition type, skipping");
            return None;
        };

        match Self::decode(kind, value) {
            Ok(definition) => Some(definition),
            Err(err) => {
                warn!(name, %kind, error = %err, "malformed definition record, skipping");
                None
            }
        }
    }

    fn decode(kind: DefinitionKind, value: &Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            DefinitionKind::Enum => Definition::Enum(EnumDefinition::deserialize(value)?),
            DefinitionKind::ValueObject => {
                Definition::ValueObject(ValueObjectDefinition::deserialize(value)?)
            }
            DefinitionKind::Vector => Definition::Vector(VectorDefinition::deserialize(value)?),
            DefinitionKind::Map => Definition::Map(MapDefinition::deserialize(value)?),
            DefinitionKind::Template => {
                Definition::Template(TemplateDefinition::deserialize(value)?)
            }
            DefinitionKind::Class => Definition::Class(ClassDefinition::deserialize(value)?),
            DefinitionKind::Function => {
                Definition::Function(FunctionDefinition::deserialize(value)?)
            }
        })
    }

    /// The record's discriminant
    pub fn kind(&self) -> DefinitionKind {
        match self {
            Definition::Enum(_) => DefinitionKind::Enum,
            Definition::ValueObject(_) => DefinitionKind::ValueObject,
            Definition::Vector(_) => DefinitionKind::Vector,
            Definition::Map(_) => DefinitionKind::Map,
            Definition::Template(_) => DefinitionKind::Template,
            Definition::Class(_) => DefinitionKind::Class,
            Definition::Function(_) => DefinitionKind::Function,
        }
    }

    /// The public symbol name
    pub fn name(&self) -> &str {
        match self {
            Definition::Enum(d) => &d.name,
            Definition::ValueObject(d) => &d.name,
            Definition::Vector(d) => &d.name,
            Definition::Map(d) => &d.name,
            Definition::Template(d) => &d.name,
            Definition::Class(d) => &d.name,
            Definition::Function(d) => &d.name,
        }
    }
}

fn record_name(value: &Value) -> &str {
    value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
}

/// A parameter of a function, method or constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameter {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::present")]
    pub ts_type: Option<String>,
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_type: Option<String>,
}

/// One enumerator: the public name and the native expression it binds to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumValue {
    #[serde(deserialize_with = "lenient::or_default")]
    pub value: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub cpp_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumDefinition {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub cpp_type: String,
    /// Declaration order is kept.
    #[serde(deserialize_with = "lenient::or_default")]
    pub values: Vec<EnumValue>,
}

/// A value-object field.
///
/// Bound either directly to a native attribute (`cppAttribute`) or through a
/// getter/setter pair of free functions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDefinition {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::present")]
    pub ts_type: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub optional: bool,
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_type: Option<String>,
    /// Overrides the owning type in the accessor signatures.
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_class_type: Option<String>,
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_attribute: Option<String>,
    /// The getter returns a copy rather than a reference.
    #[serde(deserialize_with = "lenient::or_default")]
    pub per_value: bool,
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_getter: Option<String>,
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_setter: Option<String>,
}

impl FieldDefinition {
    /// A getter without a setter
    pub fn is_read_only(&self) -> bool {
        self.cpp_getter.is_some() && self.cpp_setter.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueObjectDefinition {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub cpp_type: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VectorDefinition {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::present")]
    pub ts_type: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub cpp_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapDefinition {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::present")]
    pub ts_key_type: Option<String>,
    #[serde(deserialize_with = "lenient::present")]
    pub ts_value_type: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub cpp_key_type: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub cpp_value_type: String,
}

/// A parametrized container wrapper such as an optional or a handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateDefinition {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    /// Generic interface name on the TypeScript side.
    #[serde(deserialize_with = "lenient::or_default")]
    pub ts_interface: String,
    /// Native registration function, called as `factory<T>("Name")`.
    #[serde(deserialize_with = "lenient::or_default")]
    pub cpp_factory: String,
    #[serde(deserialize_with = "lenient::present")]
    pub ts_type: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub cpp_type: String,
}

/// A callable: top-level function, constructor, class function or method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionDefinition {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    /// Native symbol the registration points at.
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_interface: Option<String>,
    /// Native return type.
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_type: Option<String>,
    /// Public return type.
    #[serde(deserialize_with = "lenient::present")]
    pub ts_type: Option<String>,
    /// `None` when the record has no `parameters` key at all, which changes
    /// how template arguments are derived.
    #[serde(deserialize_with = "lenient::or_default")]
    pub parameters: Option<Vec<Parameter>>,
    #[serde(deserialize_with = "lenient::present")]
    pub description: Option<String>,
    /// Guard symbol for `#ifdef`.
    #[serde(deserialize_with = "lenient::present")]
    pub preprocessor_definition: Option<String>,
}

impl FunctionDefinition {
    /// Declared parameters, empty when the key is absent
    pub fn params(&self) -> &[Parameter] {
        self.parameters.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyDefinition {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::present")]
    pub ts_type: Option<String>,
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_type: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub cpp_getter: String,
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_setter: Option<String>,
    #[serde(deserialize_with = "lenient::present")]
    pub preprocessor_definition: Option<String>,
}

impl PropertyDefinition {
    pub fn is_read_only(&self) -> bool {
        self.cpp_setter.is_none()
    }
}

/// How an instance function is dispatched natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceKind {
    /// Free function taking the instance as first parameter (`function`).
    FreeFunction,
    /// Member function pointer (`method`).
    Method,
    /// Const member function pointer (`method_const`).
    ConstMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// `property`
    Instance,
    /// `class_property`
    Class,
}

/// A class member, discriminated by its `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// `smart_ptr_constructor`
    Constructor(FunctionDefinition),
    /// `class_function`
    ClassFunction(FunctionDefinition),
    /// `function`, `method`, `method_const`
    Instance(InstanceKind, FunctionDefinition),
    /// `property`, `class_property`
    Property(PropertyKind, PropertyDefinition),
}

impl Member {
    /// Decode a raw member record, logging and dropping what is not understood
    pub fn from_value(owner: &str, value: &Value) -> Option<Self> {
        let name = record_name(value);
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();

        let decoded = match tag.as_str() {
            "smart_ptr_constructor" => FunctionDefinition::deserialize(value).map(Member::Constructor),
            "class_function" => FunctionDefinition::deserialize(value).map(Member::ClassFunction),
            "function" => FunctionDefinition::deserialize(value)
                .map(|f| Member::Instance(InstanceKind::FreeFunction, f)),
            "method" => FunctionDefinition::deserialize(value)
                .map(|f| Member::Instance(InstanceKind::Method, f)),
            "method_const" => FunctionDefinition::deserialize(value)
                .map(|f| Member::Instance(InstanceKind::ConstMethod, f)),
            "property" => PropertyDefinition::deserialize(value)
                .map(|p| Member::Property(PropertyKind::Instance, p)),
            "class_property" => PropertyDefinition::deserialize(value)
                .map(|p| Member::Property(PropertyKind::Class, p)),
            _ => {
                debug!(owner, name, tag = %tag, "unsupported member type, skipping");
                return None;
            }
        };

        match decoded {
            Ok(member) => Some(member),
            Err(err) => {
                warn!(owner, name, tag = %tag, error = %err, "malformed member record, skipping");
                None
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Member::Constructor(f) | Member::ClassFunction(f) | Member::Instance(_, f) => &f.name,
            Member::Property(_, p) => &p.name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawClassDefinition {
    #[serde(deserialize_with = "lenient::or_default")]
    name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    cpp_type: String,
    #[serde(deserialize_with = "lenient::present")]
    cpp_base_class: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    methods: Vec<Value>,
}

/// A class with its members in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawClassDefinition")]
pub struct ClassDefinition {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub cpp_type: String,
    #[serde(deserialize_with = "lenient::present")]
    pub cpp_base_class: Option<String>,
    pub members: Vec<Member>,
}

impl From<RawClassDefinition> for ClassDefinition {
    fn from(raw: RawClassDefinition) -> Self {
        let members = raw
            .methods
            .iter()
            .filter_map(|value| Member::from_value(&raw.name, value))
            .collect();

        ClassDefinition {
            name: raw.name,
            cpp_type: raw.cpp_type,
            cpp_base_class: raw.cpp_base_class,
            members,
        }
    }
}

/// Field decoders that never fail a record.
///
/// `null`, a value of the wrong JSON type and (for optional strings) the
/// empty string all count as unset.
mod lenient {
    use serde::de::{Deserialize, DeserializeOwned, Deserializer};
    use serde_json::Value;

    /// Decode `T`, falling back to its default
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(T::deserialize(value).unwrap_or_default())
    }

    /// A non-empty string, or `None`
    pub fn present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) if !text.is_empty() => Some(text),
            _ => None,
        })
    }
}
