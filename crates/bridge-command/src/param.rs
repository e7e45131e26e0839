//! B-side command parameter data: the shapes that fill an overload row.

use crate::node::ParserKind;

/// A B-side built-in parameter type. Coarser than the J-side parser set;
/// several J parsers map onto the same B type (spec §4.4 mapping table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Float,
    Int,
    Target,
    BlockPosition,
    Position,
    Message,
    Json,
    FilePath,
    Operator,
    String,
}

/// What a parser kind maps to: either a plain built-in type, or an enum
/// whose values must be sourced by the caller (the mapping table's
/// "enum" row — BOOL, BLOCK_STATE, ITEM_STACK, ITEM_ENCHANTMENT,
/// ENTITY_SUMMON, COLOR).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Type(ParamType),
    Enum,
}

/// Classifies a J-side parser per the fixed mapping table. Unrecognized
/// parsers fall back to `ParamType::String` (spec §7's "treat as STRING"
/// fall-through), which in this closed `ParserKind` enum only applies to
/// parser kinds outside the table's explicit rows.
pub fn classify_parser(parser: ParserKind) -> ParamKind {
    match parser {
        ParserKind::Float | ParserKind::Double => ParamKind::Type(ParamType::Float),
        ParserKind::Integer | ParserKind::Rotation => ParamKind::Type(ParamType::Int),
        ParserKind::Entity | ParserKind::GameProfile => ParamKind::Type(ParamType::Target),
        ParserKind::BlockPos | ParserKind::ColumnPos => ParamKind::Type(ParamType::BlockPosition),
        ParserKind::Vec3 => ParamKind::Type(ParamType::Position),
        ParserKind::Message => ParamKind::Type(ParamType::Message),
        ParserKind::Nbt | ParserKind::NbtCompoundTag | ParserKind::NbtTag | ParserKind::NbtPath => {
            ParamKind::Type(ParamType::Json)
        }
        ParserKind::ResourceLocation | ParserKind::Function => ParamKind::Type(ParamType::FilePath),
        ParserKind::Operation => ParamKind::Type(ParamType::Operator),
        ParserKind::Bool
        | ParserKind::BlockState
        | ParserKind::ItemStack
        | ParserKind::ItemEnchantment
        | ParserKind::EntitySummon
        | ParserKind::Color => ParamKind::Enum,
    }
}

/// A named enum parameter. `isSoft` is false on every enum this
/// translator emits, whether coalesced from literal siblings or sourced
/// from an external identifier list (spec §6).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandEnum {
    pub name: String,
    pub values: Vec<String>,
    pub is_soft: bool,
}

impl CommandEnum {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
            is_soft: false,
        }
    }
}

/// What a single command parameter slot accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamValue {
    Enum(CommandEnum),
    Type(ParamType),
}

/// One parameter in an overload row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandParamData {
    pub name: String,
    pub optional: bool,
    pub value: ParamValue,
    pub postfix: Option<String>,
}

impl CommandParamData {
    /// Builds a parameter whose value is an enum named after `name`
    /// (the literal's own name for a coalesced literal group, or the
    /// argument node's name for an externally-sourced enum — spec §4.4
    /// uses the same `CommandEnum(paramNode.name, values, false)` shape
    /// for both).
    pub fn enum_param(name: impl Into<String>, values: Vec<String>) -> Self {
        let name = name.into();
        Self {
            value: ParamValue::Enum(CommandEnum::new(name.clone(), values)),
            name,
            optional: false,
            postfix: None,
        }
    }

    pub fn argument(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            optional: false,
            value: ParamValue::Type(ty),
            postfix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_built_in_parsers_classify_to_expected_types() {
        assert_eq!(
            classify_parser(ParserKind::ResourceLocation),
            ParamKind::Type(ParamType::FilePath)
        );
        assert_eq!(classify_parser(ParserKind::Operation), ParamKind::Type(ParamType::Operator));
    }

    #[test]
    fn enum_producing_parsers_classify_to_enum() {
        for parser in [
            ParserKind::Bool,
            ParserKind::BlockState,
            ParserKind::ItemStack,
            ParserKind::ItemEnchantment,
            ParserKind::EntitySummon,
            ParserKind::Color,
        ] {
            assert_eq!(classify_parser(parser), ParamKind::Enum);
        }
    }

    #[test]
    fn float_and_double_collapse_to_same_type() {
        assert_eq!(classify_parser(ParserKind::Float), classify_parser(ParserKind::Double));
    }

    #[test]
    fn emitted_enums_are_never_soft() {
        let e = CommandEnum::new("value", vec!["true".into(), "false".into()]);
        assert!(!e.is_soft);
    }

    #[test]
    fn param_data_is_hashable_for_matrix_keys() {
        use std::collections::HashSet;
        let a = CommandParamData::argument("value", ParamType::Int);
        let b = CommandParamData::argument("value", ParamType::Int);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
