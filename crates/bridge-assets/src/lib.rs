//! Loads the three static resources the translation layer is built from:
//! the B-side runtime palette, the J↔B item mapping table, and the
//! creative-inventory list. Parsing is a pure function of byte slices so
//! it can be tested without touching a filesystem; [`load_from_paths`] is
//! the only entry point that does I/O.

use std::collections::HashMap;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bridge_nbt::{read_nbt_le, NbtCompound};
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

pub const LODESTONE_COMPASS_IDENTIFIER: &str = "minecraft:lodestone_compass";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("malformed JSON in {resource}: {source}")]
    MalformedJson {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("runtime palette has no entry named {LODESTONE_COMPASS_IDENTIFIER}")]
    MissingLodestoneCompass,
    #[error("failed to read {resource} from disk: {source}")]
    Io {
        resource: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// One `{name, id}` pair from the B-side runtime palette.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    pub id: i32,
}

/// The B-side runtime palette, in declaration order.
#[derive(Debug, Clone)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
    by_name: HashMap<String, i32>,
    by_id: HashMap<i32, String>,
    pub lodestone_compass_b_id: i32,
}

impl Palette {
    pub fn parse(bytes: &[u8]) -> Result<Self, AssetError> {
        let entries: Vec<PaletteEntry> =
            serde_json::from_slice(bytes).map_err(|source| AssetError::MalformedJson {
                resource: "runtime palette",
                source,
            })?;

        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_id = HashMap::with_capacity(entries.len());
        for entry in &entries {
            by_name.insert(entry.name.clone(), entry.id);
            by_id.insert(entry.id, entry.name.clone());
        }

        let lodestone_compass_b_id = *by_name
            .get(LODESTONE_COMPASS_IDENTIFIER)
            .ok_or(AssetError::MissingLodestoneCompass)?;

        Ok(Self {
            entries,
            by_name,
            by_id,
            lodestone_compass_b_id,
        })
    }

    pub fn b_id_for(&self, b_identifier: &str) -> Option<i32> {
        self.by_name.get(b_identifier).copied()
    }

    /// Reverse lookup: B-ID to canonical B-identifier string.
    pub fn identifier_for(&self, b_id: i32) -> Option<&str> {
        self.by_id.get(&b_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One value in the J↔B mapping table.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingEntry {
    pub bedrock_id: i32,
    #[serde(default)]
    pub bedrock_data: i16,
    #[serde(default)]
    pub is_block: bool,
    #[serde(default)]
    pub stack_size: Option<u32>,
    #[serde(default)]
    pub tool_type: Option<String>,
    #[serde(default)]
    pub tool_tier: Option<String>,
}

/// The J↔B mapping table, preserving declaration order (order determines
/// `j_id` assignment downstream).
pub type ItemsMapping = IndexMap<String, MappingEntry>;

pub fn parse_mappings(bytes: &[u8]) -> Result<ItemsMapping, AssetError> {
    serde_json::from_slice(bytes).map_err(|source| AssetError::MalformedJson {
        resource: "items mapping",
        source,
    })
}

/// One entry in the creative-inventory list, pre-assignment of a net-ID.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCreativeItem {
    pub id: i32,
    #[serde(default)]
    pub damage: Option<i16>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub nbt_b64: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CreativeItemsFile {
    items: Vec<RawCreativeItem>,
}

pub fn parse_creative_items(bytes: &[u8]) -> Result<Vec<RawCreativeItem>, AssetError> {
    let file: CreativeItemsFile =
        serde_json::from_slice(bytes).map_err(|source| AssetError::MalformedJson {
            resource: "creative items",
            source,
        })?;
    Ok(file.items)
}

/// Best-effort decode of a creative entry's base64 little-endian NBT blob.
/// A malformed blob is not fatal: logs and returns `None` per the bridge's
/// error-handling policy for this path.
pub fn decode_creative_tag(nbt_b64: &str) -> Option<NbtCompound> {
    let bytes = match STANDARD.decode(nbt_b64) {
        Ok(b) => b,
        Err(err) => {
            tracing::warn!(error = %err, "creative item nbt_b64 is not valid base64, dropping tag");
            return None;
        }
    };
    let mut buf = bytes::Bytes::from(bytes);
    match read_nbt_le(&mut buf) {
        Ok(root) => Some(root.compound),
        Err(err) => {
            tracing::warn!(error = %err, "creative item nbt blob failed to decode, dropping tag");
            None
        }
    }
}

/// Parsed view of all three resources, ready to hand to `bridge-items`.
pub struct LoadedAssets {
    pub palette: Palette,
    pub mappings: ItemsMapping,
    pub creative_items: Vec<RawCreativeItem>,
}

/// Parse all three resources from in-memory byte slices.
pub fn load_from_bytes(
    palette_json: &[u8],
    mappings_json: &[u8],
    creative_json: &[u8],
) -> Result<LoadedAssets, AssetError> {
    Ok(LoadedAssets {
        palette: Palette::parse(palette_json)?,
        mappings: parse_mappings(mappings_json)?,
        creative_items: parse_creative_items(creative_json)?,
    })
}

/// Read and parse all three resources from disk paths.
pub fn load_from_paths(
    palette_path: impl AsRef<Path>,
    mappings_path: impl AsRef<Path>,
    creative_path: impl AsRef<Path>,
) -> Result<LoadedAssets, AssetError> {
    let read = |resource: &'static str, path: &Path| {
        std::fs::read(path).map_err(|source| AssetError::Io { resource, source })
    };
    let palette_bytes = read("runtime palette", palette_path.as_ref())?;
    let mappings_bytes = read("items mapping", mappings_path.as_ref())?;
    let creative_bytes = read("creative items", creative_path.as_ref())?;
    load_from_bytes(&palette_bytes, &mappings_bytes, &creative_bytes)
}
