//! Item Registry: the bidirectional J↔B item mapping plus the synthesized
//! component item.

mod model;
mod registry;

pub use model::{
    furnace_minecart_component_descriptor, ComponentItemDescriptor, CreativeItem, ItemEntry,
    ToolInfo,
};
pub use registry::{
    ItemRegistry, NamedSingles, RegistryError, FURNACE_MINECART_IDENTIFIER,
    SPECTRAL_ARROW_IDENTIFIER,
};
