//! The closed set of built-in components

use std::str::FromStr;

use flow_graph::{ComponentDescriptor, ComponentMetadata, FlowGraphError};

use crate::boundary::{FlowInput, FlowOutput};
use crate::control::{Condition, Script};
use crate::processing::{
    Add, ArrayCount, ArrayFlatten, ArrayHead, ArrayMap, ArrayNth, ArraySum, Combine, Convert,
    Handlebars, JsonTemplate, Multiply, ToFloat, ToJson, ToNumber, ToText,
};
use crate::storage::{MongoDb, MongoDbGet, MongoDbUpdate};
use crate::value::{FloatValue, JsonValue, NumberValue, TemplateValue, TextValue};

/// Every component the editor offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Input,
    Output,
    Number,
    Float,
    Text,
    Json,
    Template,
    Add,
    Multiply,
    ArrayCount,
    ArraySum,
    ArrayFlatten,
    ArrayHead,
    ArrayNth,
    ArrayMap,
    Combine,
    ToJson,
    Convert,
    ToNumber,
    ToFloat,
    ToText,
    Handlebars,
    JsonTemplate,
    MongoDb,
    MongoDbGet,
    MongoDbUpdate,
    Condition,
    Script,
}

impl ComponentKind {
    /// All kinds in palette order
    pub const ALL: [ComponentKind; 28] = [
        Self::Input,
        Self::Output,
        Self::Number,
        Self::Float,
        Self::Text,
        Self::Json,
        Self::Template,
        Self::Add,
        Self::Multiply,
        Self::ArrayCount,
        Self::ArraySum,
        Self::ArrayFlatten,
        Self::ArrayHead,
        Self::ArrayNth,
        Self::ArrayMap,
        Self::Combine,
        Self::ToJson,
        Self::Convert,
        Self::ToNumber,
        Self::ToFloat,
        Self::ToText,
        Self::Handlebars,
        Self::JsonTemplate,
        Self::MongoDb,
        Self::MongoDbGet,
        Self::MongoDbUpdate,
        Self::Condition,
        Self::Script,
    ];

    pub fn all() -> impl Iterator<Item = ComponentKind> {
        Self::ALL.into_iter()
    }

    /// Name stored in flow documents
    pub fn name(self) -> &'static str {
        match self {
            Self::Input => FlowInput::NAME,
            Self::Output => FlowOutput::NAME,
            Self::Number => NumberValue::NAME,
            Self::Float => FloatValue::NAME,
            Self::Text => TextValue::NAME,
            Self::Json => JsonValue::NAME,
            Self::Template => TemplateValue::NAME,
            Self::Add => Add::NAME,
            Self::Multiply => Multiply::NAME,
            Self::ArrayCount => ArrayCount::NAME,
            Self::ArraySum => ArraySum::NAME,
            Self::ArrayFlatten => ArrayFlatten::NAME,
            Self::ArrayHead => ArrayHead::NAME,
            Self::ArrayNth => ArrayNth::NAME,
            Self::ArrayMap => ArrayMap::NAME,
            Self::Combine => Combine::NAME,
            Self::ToJson => ToJson::NAME,
            Self::Convert => Convert::NAME,
            Self::ToNumber => ToNumber::NAME,
            Self::ToFloat => ToFloat::NAME,
            Self::ToText => ToText::NAME,
            Self::Handlebars => Handlebars::NAME,
            Self::JsonTemplate => JsonTemplate::NAME,
            Self::MongoDb => MongoDb::NAME,
            Self::MongoDbGet => MongoDbGet::NAME,
            Self::MongoDbUpdate => MongoDbUpdate::NAME,
            Self::Condition => Condition::NAME,
            Self::Script => Script::NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|kind| kind.name() == name)
    }

    /// Port and control schema of this component
    pub fn metadata(self) -> ComponentMetadata {
        match self {
            Self::Input => FlowInput::descriptor(),
            Self::Output => FlowOutput::descriptor(),
            Self::Number => NumberValue::descriptor(),
            Self::Float => FloatValue::descriptor(),
            Self::Text => TextValue::descriptor(),
            Self::Json => JsonValue::descriptor(),
            Self::Template => TemplateValue::descriptor(),
            Self::Add => Add::descriptor(),
            Self::Multiply => Multiply::descriptor(),
            Self::ArrayCount => ArrayCount::descriptor(),
            Self::ArraySum => ArraySum::descriptor(),
            Self::ArrayFlatten => ArrayFlatten::descriptor(),
            Self::ArrayHead => ArrayHead::descriptor(),
            Self::ArrayNth => ArrayNth::descriptor(),
            Self::ArrayMap => ArrayMap::descriptor(),
            Self::Combine => Combine::descriptor(),
            Self::ToJson => ToJson::descriptor(),
            Self::Convert => Convert::descriptor(),
            Self::ToNumber => ToNumber::descriptor(),
            Self::ToFloat => ToFloat::descriptor(),
            Self::ToText => ToText::descriptor(),
            Self::Handlebars => Handlebars::descriptor(),
            Self::JsonTemplate => JsonTemplate::descriptor(),
            Self::MongoDb => MongoDb::descriptor(),
            Self::MongoDbGet => MongoDbGet::descriptor(),
            Self::MongoDbUpdate => MongoDbUpdate::descriptor(),
            Self::Condition => Condition::descriptor(),
            Self::Script => Script::descriptor(),
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = FlowGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| FlowGraphError::UnknownComponent(s.to_string()))
    }
}
