//! Classified interface model shared by all emitters.
//!
//! [`InterfaceModel::classify`] partitions decoded definitions into seven
//! categories and fixes their order once, so every emitter walks the same
//! sequence:
//!
//! - enums and value objects are sorted by name,
//! - value-object fields are sorted by name,
//! - vectors, maps, templates, classes, functions, enum values and class
//!   member groups keep declaration order.
//!
//! Classes and functions are deliberately left unsorted; generated outputs
//! of existing modules depend on that order.

use crate::definition::{
    ClassDefinition, Definition, DefinitionDocument, EnumDefinition, FunctionDefinition,
    InstanceKind, MapDefinition, Member, PropertyDefinition, PropertyKind, TemplateDefinition,
    ValueObjectDefinition, VectorDefinition,
};
use tracing::debug;

/// The classified, ordered view of one definition document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceModel {
    pub enums: Vec<EnumDefinition>,
    pub value_objects: Vec<ValueObjectDefinition>,
    pub vectors: Vec<VectorDefinition>,
    pub maps: Vec<MapDefinition>,
    pub templates: Vec<TemplateDefinition>,
    pub classes: Vec<ClassModel>,
    pub functions: Vec<FunctionDefinition>,
}

/// A class with its members split into groups, each in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassModel {
    pub name: String,
    pub cpp_type: String,
    pub cpp_base_class: Option<String>,
    pub constructors: Vec<FunctionDefinition>,
    pub class_functions: Vec<FunctionDefinition>,
    pub functions: Vec<InstanceFunction>,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceFunction {
    pub kind: InstanceKind,
    pub definition: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub kind: PropertyKind,
    pub definition: PropertyDefinition,
}

/// Per-category counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelSummary {
    pub enums: usize,
    pub value_objects: usize,
    pub vectors: usize,
    pub maps: usize,
    pub templates: usize,
    pub classes: usize,
    pub functions: usize,
}

impl ModelSummary {
    pub fn total(&self) -> usize {
        self.enums
            + self.value_objects
            + self.vectors
            + self.maps
            + self.templates
            + self.classes
            + self.functions
    }
}

impl std::fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} enums, {} objects, {} vectors, {} maps, {} templates, {} classes, {} functions",
            self.enums,
            self.value_objects,
            self.vectors,
            self.maps,
            self.templates,
            self.classes,
            self.functions
        )
    }
}

impl InterfaceModel {
    /// Decode and classify every record of a document
    pub fn from_document(document: &DefinitionDocument) -> Self {
        Self::classify(document.definitions())
    }

    /// Partition definitions into categories and apply the ordering rules
    pub fn classify(definitions: impl IntoIterator<Item = Definition>) -> Self {
        let mut model = InterfaceModel::default();

        for definition in definitions {
            match definition {
                Definition::Enum(d) => model.enums.push(d),
                Definition::ValueObject(mut d) => {
                    d.fields.sort_by(|a, b| a.name.cmp(&b.name));
                    model.value_objects.push(d);
                }
                Definition::Vector(d) => model.vectors.push(d),
                Definition::Map(d) => model.maps.push(d),
                Definition::Template(d) => model.templates.push(d),
                Definition::Class(d) => model.classes.push(ClassModel::from(d)),
                Definition::Function(d) => model.functions.push(d),
            }
        }

        model.enums.sort_by(|a, b| a.name.cmp(&b.name));
        model.value_objects.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(summary = %model.summary(), "classified definitions");
        model
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            enums: self.enums.len(),
            value_objects: self.value_objects.len(),
            vectors: self.vectors.len(),
            maps: self.maps.len(),
            templates: self.templates.len(),
            classes: self.classes.len(),
            functions: self.functions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary().total() == 0
    }

    /// Whether any vector, map or template is declared
    pub fn has_containers(&self) -> bool {
        !self.vectors.is_empty() || !self.maps.is_empty() || !self.templates.is_empty()
    }
}

impl From<ClassDefinition> for ClassModel {
    fn from(class: ClassDefinition) -> Self {
        let mut model = ClassModel {
            name: class.name,
            cpp_type: class.cpp_type,
            cpp_base_class: class.cpp_base_class,
            ..Default::default()
        };

        for member in class.members {
            match member {
                Member::Constructor(f) => model.constructors.push(f),
                Member::ClassFunction(f) => model.class_functions.push(f),
                Member::Instance(kind, definition) => {
                    model.functions.push(InstanceFunction { kind, definition })
                }
                Member::Property(kind, definition) => {
                    model.properties.push(Property { kind, definition })
                }
            }
        }

        model
    }
}
