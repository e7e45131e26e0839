//! Protocol bridge facade: wires the item registry, the command
//! translator, asset loading, configuration, and NBT codec sub-crates
//! together behind one crate root, the way a top-level `valence`-style
//! crate re-exports its split-out workspace members.

pub use bridge_assets::{
    decode_creative_tag, load_from_bytes, load_from_paths, parse_creative_items, parse_mappings,
    AssetError, ItemsMapping, LoadedAssets, MappingEntry, Palette, PaletteEntry, RawCreativeItem,
    LODESTONE_COMPASS_IDENTIFIER,
};
pub use bridge_command::{
    build_overloads, classify_parser, compatible, translate, translate_commands, BuildContext,
    CommandDescriptor, CommandEnum, CommandMessage, CommandNode, CommandParamData,
    DescriptionSource, ExternalEnumSource, NodeKind, OverloadMatrix, PacketSink, ParamInfo,
    ParamKind, ParamType, ParamValue, ParserKind,
};
pub use bridge_config::{BridgeConfig, CommandsSection, ItemsSection};
pub use bridge_items::{
    furnace_minecart_component_descriptor, ComponentItemDescriptor, CreativeItem, ItemEntry,
    ItemRegistry, NamedSingles, RegistryError, ToolInfo, FURNACE_MINECART_IDENTIFIER,
    SPECTRAL_ARROW_IDENTIFIER,
};
pub use bridge_nbt::{read_nbt_le, write_nbt_le, NbtCompound, NbtError, NbtRoot, NbtTag};
