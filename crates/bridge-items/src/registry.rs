//! Item Registry construction: bidirectional J↔B item mapping, derived
//! groupings, and the synthesized component item.

use std::collections::HashMap;

use bridge_assets::{Palette, RawCreativeItem};
use thiserror::Error;

use crate::model::{
    furnace_minecart_component_descriptor, ComponentItemDescriptor, CreativeItem, ItemEntry,
    ToolInfo,
};

/// J identifier of the singleton item synthesized only when
/// `synthesize_extra_item` is enabled.
pub const FURNACE_MINECART_IDENTIFIER: &str = "minecraft:furnace_minecart";
pub const SPECTRAL_ARROW_IDENTIFIER: &str = "minecraft:spectral_arrow";
const SYNTHETIC_B_IDENTIFIER: &str = "geysermc:furnace_minecart";

/// J-identifiers that exist only on the J side and must never come back
/// out of a B→J lookup, even if they happen to share a B-ID with something.
const B_LOOKUP_DENYLIST: &[&str] = &[
    SPECTRAL_ARROW_IDENTIFIER,
    "minecraft:debug_stick",
    "minecraft:knowledge_book",
    "minecraft:tipped_arrow",
    FURNACE_MINECART_IDENTIFIER,
];

const SINGLETON_NAMES: &[&str] = &[
    "barrier",
    "bamboo",
    "egg",
    "gold_ingot",
    "shield",
    "milk_bucket",
    "wheat",
    "writable_book",
];

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("mapping entry {j_identifier} references bedrock_id {bedrock_id} which is absent from the runtime palette")]
    UnknownBedrockId { j_identifier: String, bedrock_id: i32 },
}

/// Designated single-item slots recorded during construction, keyed by
/// name suffix (see spec §4.2 step 2).
#[derive(Debug, Clone, Default)]
pub struct NamedSingles(HashMap<&'static str, usize>);

impl NamedSingles {
    pub fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }
}

/// Immutable, read-only-after-construction item registry.
pub struct ItemRegistry {
    entries: Vec<ItemEntry>,
    by_j_identifier: HashMap<String, usize>,
    by_b_exact: HashMap<(i32, i16), usize>,
    by_b_id: HashMap<i32, Vec<usize>>,
    pub singles: NamedSingles,
    pub boats: Vec<i32>,
    pub buckets: Vec<i32>,
    /// All J identifiers in declaration order, including the two J-only
    /// ones appended unconditionally (see spec §4.2 step 3 and the open
    /// question in §9: `furnace_minecart` appears twice when synthesis is
    /// enabled, once via registration and once via this unconditional
    /// append — preserved verbatim).
    pub j_name_list: Vec<String>,
    pub creative_items: Vec<CreativeItem>,
    pub component_item: Option<ComponentItemDescriptor>,
    /// Palette entries appended when the synthesized item is enabled,
    /// marked component-provided; the outbound palette is
    /// `palette.entries` followed by these.
    pub extra_palette_entries: Vec<bridge_assets::PaletteEntry>,
}

impl ItemRegistry {
    pub fn build(
        palette: &Palette,
        mappings: &bridge_assets::ItemsMapping,
        creative_items: &[RawCreativeItem],
        synthesize_extra_item: bool,
    ) -> Result<Self, RegistryError> {
        let mut entries: Vec<ItemEntry> = Vec::with_capacity(mappings.len() + 2);
        let mut by_j_identifier = HashMap::with_capacity(mappings.len() + 2);
        let mut singles = HashMap::new();
        let mut boats = Vec::new();
        let mut buckets = Vec::new();
        let mut j_name_list = Vec::with_capacity(mappings.len() + 2);
        let mut synthetic_furnace_minecart_slot: Option<usize> = None;

        let mut next_j_id: usize = 0;

        for (j_identifier, mapping) in mappings {
            if j_identifier == FURNACE_MINECART_IDENTIFIER && synthesize_extra_item {
                synthetic_furnace_minecart_slot = Some(next_j_id);
                next_j_id += 1;
                j_name_list.push(j_identifier.clone());
                continue;
            }

            let b_identifier = palette
                .identifier_for(mapping.bedrock_id)
                .ok_or_else(|| RegistryError::UnknownBedrockId {
                    j_identifier: j_identifier.clone(),
                    bedrock_id: mapping.bedrock_id,
                })?
                .to_string();

            let entry = ItemEntry {
                j_identifier: j_identifier.clone(),
                b_identifier,
                j_id: next_j_id,
                b_id: mapping.bedrock_id,
                b_damage: mapping.bedrock_data,
                is_block: mapping.is_block,
                stack_size: mapping.stack_size.unwrap_or(64),
                tool: mapping.tool_type.as_ref().map(|tool_type| ToolInfo {
                    tool_type: tool_type.clone(),
                    tool_tier: mapping.tool_tier.clone().unwrap_or_default(),
                }),
            };

            if let Some(suffix) = j_identifier.strip_prefix("minecraft:") {
                if let Some(&name) = SINGLETON_NAMES.iter().find(|&&n| n == suffix) {
                    singles.insert(name, next_j_id);
                }
            }

            if j_identifier.contains("boat") {
                boats.push(entry.b_id);
            }
            if j_identifier.contains("bucket") && !j_identifier.contains("milk") {
                buckets.push(entry.b_id);
            }

            j_name_list.push(j_identifier.clone());
            by_j_identifier.insert(j_identifier.clone(), next_j_id);
            entries.push(entry);
            next_j_id += 1;
        }

        // Step 3: J-only identifiers appended unconditionally for autocompletion.
        j_name_list.push(FURNACE_MINECART_IDENTIFIER.to_string());
        j_name_list.push(SPECTRAL_ARROW_IDENTIFIER.to_string());

        // Step 4: synthetic lodestone compass entry, always installed.
        let lodestone_j_id = next_j_id;
        let lodestone_entry = ItemEntry {
            j_identifier: bridge_assets::LODESTONE_COMPASS_IDENTIFIER.to_string(),
            b_identifier: bridge_assets::LODESTONE_COMPASS_IDENTIFIER.to_string(),
            j_id: lodestone_j_id,
            b_id: palette.lodestone_compass_b_id,
            b_damage: 0,
            is_block: false,
            stack_size: 1,
            tool: None,
        };
        by_j_identifier.insert(lodestone_entry.j_identifier.clone(), lodestone_j_id);
        entries.push(lodestone_entry);
        next_j_id += 1;

        // Step 5: creative inventory, net-IDs start at 1.
        let mut built_creative_items = Vec::with_capacity(creative_items.len() + 1);
        for (i, raw) in creative_items.iter().enumerate() {
            let tag = raw
                .nbt_b64
                .as_deref()
                .and_then(bridge_assets::decode_creative_tag);
            built_creative_items.push(CreativeItem {
                net_id: (i + 1) as u32,
                b_id: raw.id,
                b_damage: raw.damage.unwrap_or(0),
                count: raw.count.unwrap_or(1),
                tag,
            });
        }

        // Step 6: the synthesized component item, gated on config.
        let mut extra_palette_entries = Vec::new();
        let mut component_item = None;
        if synthesize_extra_item {
            let new_b_id = palette.len() as i32 + 1;
            extra_palette_entries.push(bridge_assets::PaletteEntry {
                name: SYNTHETIC_B_IDENTIFIER.to_string(),
                id: new_b_id,
            });

            let slot = synthetic_furnace_minecart_slot.expect(
                "synthetic furnace_minecart j_id slot was reserved above when synthesis is enabled",
            );
            let synthetic_entry = ItemEntry {
                j_identifier: FURNACE_MINECART_IDENTIFIER.to_string(),
                b_identifier: SYNTHETIC_B_IDENTIFIER.to_string(),
                j_id: slot,
                b_id: new_b_id,
                b_damage: 0,
                is_block: false,
                stack_size: 1,
                tool: None,
            };
            by_j_identifier.insert(synthetic_entry.j_identifier.clone(), slot);
            entries.push(synthetic_entry);

            built_creative_items.push(CreativeItem {
                net_id: built_creative_items.len() as u32 + 1,
                b_id: new_b_id,
                b_damage: 0,
                count: 1,
                tag: None,
            });

            component_item = Some(furnace_minecart_component_descriptor(
                SYNTHETIC_B_IDENTIFIER,
                new_b_id,
            ));
        }

        entries.sort_by_key(|e| e.j_id);

        let mut by_b_exact = HashMap::with_capacity(entries.len());
        let mut by_b_id: HashMap<i32, Vec<usize>> = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            debug_assert_eq!(entry.j_id, idx, "j_id must equal its slot index");
            if B_LOOKUP_DENYLIST.contains(&entry.j_identifier.as_str()) {
                continue;
            }
            by_b_exact.insert((entry.b_id, entry.b_damage), idx);
            by_b_id.entry(entry.b_id).or_default().push(idx);
        }

        Ok(Self {
            entries,
            by_j_identifier,
            by_b_exact,
            by_b_id,
            singles: NamedSingles(singles),
            boats,
            buckets,
            j_name_list,
            creative_items: built_creative_items,
            component_item,
            extra_palette_entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_by_j_id(&self, j_id: usize) -> Option<&ItemEntry> {
        self.entries.get(j_id)
    }

    pub fn get_by_j_identifier(&self, j_identifier: &str) -> Option<&ItemEntry> {
        self.by_j_identifier
            .get(j_identifier)
            .and_then(|&idx| self.entries.get(idx))
    }

    /// AIR sentinel: the entry at `j_id = 0`. By convention the source
    /// mapping always lists `minecraft:air` first; the registry itself
    /// does not enforce this, it simply trusts the mapping's order.
    pub fn air(&self) -> Option<&ItemEntry> {
        self.get_by_j_id(0)
    }

    /// Looks up a B-side `(b_id, b_damage)` pair. Potions and arrows carry
    /// variable damage and match on `b_id` alone. Denylisted J-only
    /// entries are never returned. Falls back to the AIR sentinel.
    pub fn get_by_b_item(&self, b_id: i32, b_damage: i16) -> Option<&ItemEntry> {
        if let Some(&idx) = self.by_b_exact.get(&(b_id, b_damage)) {
            return self.entries.get(idx);
        }

        if let Some(candidates) = self.by_b_id.get(&b_id) {
            for &idx in candidates {
                let entry = &self.entries[idx];
                if entry.j_identifier.ends_with("potion") || entry.j_identifier == "minecraft:arrow"
                {
                    return Some(entry);
                }
            }
        }

        if b_id != 0 || b_damage != 0 {
            tracing::debug!(b_id, b_damage, "unrecognized B item, falling back to AIR");
        }
        self.air()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_assets::{parse_mappings, Palette};

    fn minimal_palette() -> Palette {
        let json = r#"[
            {"name": "minecraft:stone", "id": 1},
            {"name": "minecraft:lodestone_compass", "id": 741}
        ]"#;
        Palette::parse(json.as_bytes()).unwrap()
    }

    fn minimal_mappings() -> bridge_assets::ItemsMapping {
        let json = r#"{
            "minecraft:stone": {"bedrock_id": 1, "bedrock_data": 0, "is_block": true}
        }"#;
        parse_mappings(json.as_bytes()).unwrap()
    }

    #[test]
    fn minimal_mapping_scenario() {
        let palette = minimal_palette();
        let mappings = minimal_mappings();
        let registry = ItemRegistry::build(&palette, &mappings, &[], false).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get_by_j_identifier("minecraft:stone").unwrap().b_id,
            1
        );
        let lodestone = registry
            .get_by_j_identifier(bridge_assets::LODESTONE_COMPASS_IDENTIFIER)
            .unwrap();
        assert_eq!(lodestone.j_id, 1);
        assert_eq!(lodestone.b_id, 741);
    }

    #[test]
    fn j_ids_are_a_contiguous_permutation() {
        let palette = minimal_palette();
        let mappings = minimal_mappings();
        let registry = ItemRegistry::build(&palette, &mappings, &[], false).unwrap();
        let mut ids: Vec<usize> = (0..registry.len()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..registry.len()).collect::<Vec<_>>());
        for (idx, _) in ids.iter().enumerate() {
            assert_eq!(registry.get_by_j_id(idx).unwrap().j_id, idx);
        }
    }

    #[test]
    fn unknown_bedrock_id_is_fatal() {
        let palette = minimal_palette();
        let json = r#"{
            "minecraft:nope": {"bedrock_id": 9999, "bedrock_data": 0, "is_block": false}
        }"#;
        let mappings = parse_mappings(json.as_bytes()).unwrap();
        let err = ItemRegistry::build(&palette, &mappings, &[], false).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownBedrockId { .. }));
    }

    #[test]
    fn potion_damage_agnostic_lookup() {
        let palette = minimal_palette();
        let json = r#"{
            "minecraft:potion": {"bedrock_id": 733, "bedrock_data": 0, "is_block": false}
        }"#;
        let mappings = parse_mappings(json.as_bytes()).unwrap();
        let registry = ItemRegistry::build(&palette, &mappings, &[], false).unwrap();
        let entry = registry.get_by_b_item(733, 7).unwrap();
        assert_eq!(entry.j_identifier, "minecraft:potion");
    }

    #[test]
    fn boat_grouping() {
        let palette = {
            let json = r#"[
                {"name": "minecraft:oak_boat", "id": 10},
                {"name": "minecraft:birch_boat", "id": 11},
                {"name": "minecraft:lodestone_compass", "id": 741}
            ]"#;
            Palette::parse(json.as_bytes()).unwrap()
        };
        let json = r#"{
            "minecraft:oak_boat": {"bedrock_id": 10, "bedrock_data": 0, "is_block": false},
            "minecraft:birch_boat": {"bedrock_id": 11, "bedrock_data": 0, "is_block": false}
        }"#;
        let mappings = parse_mappings(json.as_bytes()).unwrap();
        let registry = ItemRegistry::build(&palette, &mappings, &[], false).unwrap();
        let mut boats = registry.boats.clone();
        boats.sort_unstable();
        assert_eq!(boats, vec![10, 11]);
    }

    #[test]
    fn denylist_never_returned_from_b_lookup() {
        let palette = {
            let json = r#"[
                {"name": "minecraft:air", "id": 0},
                {"name": "minecraft:spectral_arrow", "id": 50},
                {"name": "minecraft:arrow", "id": 51},
                {"name": "minecraft:lodestone_compass", "id": 741}
            ]"#;
            Palette::parse(json.as_bytes()).unwrap()
        };
        let json = r#"{
            "minecraft:air": {"bedrock_id": 0, "bedrock_data": 0, "is_block": false},
            "minecraft:spectral_arrow": {"bedrock_id": 50, "bedrock_data": 0, "is_block": false},
            "minecraft:arrow": {"bedrock_id": 51, "bedrock_data": 0, "is_block": false}
        }"#;
        let mappings = parse_mappings(json.as_bytes()).unwrap();
        let registry = ItemRegistry::build(&palette, &mappings, &[], false).unwrap();

        let entry = registry.get_by_b_item(50, 0).unwrap();
        assert_ne!(entry.j_identifier, "minecraft:spectral_arrow");

        let arrow = registry.get_by_b_item(51, 99).unwrap();
        assert_eq!(arrow.j_identifier, "minecraft:arrow");
    }

    #[test]
    fn unrecognized_b_item_falls_back_to_air() {
        let palette = minimal_palette();
        let mappings = minimal_mappings();
        let registry = ItemRegistry::build(&palette, &mappings, &[], false).unwrap();
        let fallback = registry.get_by_b_item(99999, 0).unwrap();
        assert_eq!(fallback.j_id, 0);
    }

    #[test]
    fn synthesized_item_installed_when_enabled() {
        let palette = minimal_palette();
        let mappings = minimal_mappings();
        let registry = ItemRegistry::build(&palette, &mappings, &[], true).unwrap();

        let synth = registry
            .get_by_j_identifier(FURNACE_MINECART_IDENTIFIER)
            .unwrap();
        assert_eq!(synth.b_identifier, SYNTHETIC_B_IDENTIFIER);
        assert_eq!(synth.b_id, palette.len() as i32 + 1);
        assert_eq!(registry.extra_palette_entries.len(), 1);
        assert!(registry.component_item.is_some());

        // Open question in spec §9: furnace_minecart appears twice in the
        // J-name list when synthesis is enabled.
        let occurrences = registry
            .j_name_list
            .iter()
            .filter(|n| n.as_str() == FURNACE_MINECART_IDENTIFIER)
            .count();
        assert_eq!(occurrences, 2);
    }

    #[test]
    fn synthesized_item_absent_when_disabled() {
        let palette = minimal_palette();
        let mappings = minimal_mappings();
        let registry = ItemRegistry::build(&palette, &mappings, &[], false).unwrap();
        assert!(registry.get_by_j_identifier(FURNACE_MINECART_IDENTIFIER).is_none());
        assert!(registry.component_item.is_none());
        assert!(registry.extra_palette_entries.is_empty());
    }

    #[test]
    fn creative_items_get_incrementing_net_ids() {
        let palette = minimal_palette();
        let mappings = minimal_mappings();
        let raw = vec![
            RawCreativeItem {
                id: 1,
                damage: None,
                count: None,
                nbt_b64: None,
            },
            RawCreativeItem {
                id: 2,
                damage: Some(3),
                count: Some(5),
                nbt_b64: None,
            },
        ];
        let registry = ItemRegistry::build(&palette, &mappings, &raw, false).unwrap();
        assert_eq!(registry.creative_items[0].net_id, 1);
        assert_eq!(registry.creative_items[1].net_id, 2);
        assert_eq!(registry.creative_items[1].count, 5);
    }

    #[test]
    fn named_singleton_slots_recorded() {
        let palette = {
            let json = r#"[
                {"name": "minecraft:barrier", "id": 20},
                {"name": "minecraft:lodestone_compass", "id": 741}
            ]"#;
            Palette::parse(json.as_bytes()).unwrap()
        };
        let json = r#"{
            "minecraft:barrier": {"bedrock_id": 20, "bedrock_data": 0, "is_block": true}
        }"#;
        let mappings = parse_mappings(json.as_bytes()).unwrap();
        let registry = ItemRegistry::build(&palette, &mappings, &[], false).unwrap();
        let idx = registry.singles.get("barrier").unwrap();
        assert_eq!(registry.get_by_j_id(idx).unwrap().j_identifier, "minecraft:barrier");
    }
}
