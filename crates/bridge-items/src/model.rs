//! Data types that make up the Item Registry's public surface.

use bridge_nbt::{NbtCompound, NbtTag};

/// Tool classification carried by some item entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub tool_type: String,
    /// May be empty when the source mapping didn't specify a tier.
    pub tool_tier: String,
}

/// An immutable registry record, keyed by a dense J-ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    pub j_identifier: String,
    pub b_identifier: String,
    pub j_id: usize,
    pub b_id: i32,
    pub b_damage: i16,
    pub is_block: bool,
    pub stack_size: u32,
    pub tool: Option<ToolInfo>,
}

impl ItemEntry {
    /// The sentinel "no item" identifier used at `j_id = 0` by convention.
    pub const AIR_IDENTIFIER: &'static str = "minecraft:air";
}

/// One entry of the synthesized creative-inventory payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreativeItem {
    pub net_id: u32,
    pub b_id: i32,
    pub b_damage: i16,
    pub count: u32,
    pub tag: Option<NbtCompound>,
}

/// Name plus a fixed-schema NBT component bag describing a client-defined
/// item that has no backing palette entry on the J side.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentItemDescriptor {
    pub name: String,
    pub id: i32,
    pub components: NbtCompound,
}

/// Builds the synthesized furnace-minecart component item descriptor
/// (the fixed NBT layout from the external-interfaces section).
pub fn furnace_minecart_component_descriptor(name: &str, id: i32) -> ComponentItemDescriptor {
    let mut icon = NbtCompound::new();
    icon.insert("texture".into(), NbtTag::String("minecart_furnace".into()));

    let mut display_name = NbtCompound::new();
    display_name.insert(
        "value".into(),
        NbtTag::String("item.minecartFurnace.name".into()),
    );

    let rail_tag = {
        let mut c = NbtCompound::new();
        c.insert("tags".into(), NbtTag::String("q.any_tag('rail')".into()));
        NbtTag::Compound(c)
    };

    let mut entity_placer = NbtCompound::new();
    entity_placer.insert("dispense_on".into(), NbtTag::List(vec![rail_tag.clone()]));
    entity_placer.insert("entity".into(), NbtTag::String("minecraft:minecart".into()));
    entity_placer.insert("use_on".into(), NbtTag::List(vec![rail_tag]));

    let mut item_properties = NbtCompound::new();
    item_properties.insert("allow_off_hand".into(), NbtTag::Byte(1));
    item_properties.insert("hand_equipped".into(), NbtTag::Byte(0));
    item_properties.insert("max_stack_size".into(), NbtTag::Int(1));
    item_properties.insert(
        "creative_group".into(),
        NbtTag::String("itemGroup.name.minecart".into()),
    );
    item_properties.insert("creative_category".into(), NbtTag::Int(4));

    let mut components = NbtCompound::new();
    components.insert("minecraft:icon".into(), NbtTag::Compound(icon));
    components.insert(
        "minecraft:display_name".into(),
        NbtTag::Compound(display_name),
    );
    components.insert(
        "minecraft:entity_placer".into(),
        NbtTag::Compound(entity_placer),
    );
    components.insert("item_properties".into(), NbtTag::Compound(item_properties));

    ComponentItemDescriptor {
        name: name.to_string(),
        id,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_descriptor_has_fixed_shape() {
        let desc = furnace_minecart_component_descriptor("geysermc:furnace_minecart", 256);
        assert_eq!(desc.name, "geysermc:furnace_minecart");
        assert_eq!(desc.id, 256);
        assert!(desc.components.contains_key("minecraft:icon"));
        assert!(desc.components.contains_key("minecraft:display_name"));
        assert!(desc.components.contains_key("minecraft:entity_placer"));
        assert!(desc.components.contains_key("item_properties"));

        let item_properties = desc.components.get("item_properties").unwrap();
        let NbtTag::Compound(item_properties) = item_properties else {
            panic!("item_properties should be a compound");
        };
        assert_eq!(
            item_properties.get("max_stack_size").and_then(NbtTag::as_int),
            Some(1)
        );
        assert_eq!(
            item_properties.get("allow_off_hand").and_then(NbtTag::as_byte),
            Some(1)
        );
        assert_eq!(
            item_properties.get("hand_equipped").and_then(NbtTag::as_byte),
            Some(0)
        );
    }
}
