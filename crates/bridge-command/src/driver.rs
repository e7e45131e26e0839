//! Top-level translation driver: walks the J command graph, dedupes
//! redirect aliases by overload shape, and emits B command descriptors.

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::node::{follow_redirect, CommandNode, NodeKind};
use crate::overload::build_overloads;
use crate::param::{CommandEnum, CommandParamData};

/// The B-side `available_commands`-equivalent payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandMessage {
    pub commands: Vec<CommandDescriptor>,
}

/// One B-side command, covering every alias that coalesced into it.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    pub flags: u8,
    pub permission: u8,
    pub aliases_enum: CommandEnum,
    pub overloads: Vec<Vec<CommandParamData>>,
}

/// Wraps a set of overload rows so it can key a `HashMap` with an order
/// -sensitive hash: two commands whose rows are identical but listed in
/// a different sequence must NOT coalesce, since emission order is
/// itself observable to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadMatrix(pub Vec<Vec<CommandParamData>>);

impl Hash for OverloadMatrix {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.0.len());
        for row in &self.0 {
            state.write_usize(row.len());
            for param in row {
                param.hash(state);
            }
        }
    }
}

/// Supplies the free-text help description for a command name. Backed
/// by resource-bundle lookups external to this translator.
pub trait DescriptionSource {
    fn describe(&self, command_name: &str) -> String;
}

/// Supplies identifier lists for enum-valued parameters sourced from
/// registries outside the command tree itself (blocks, enchantments,
/// summonable entities, dye colors). Fetched at translation time, never
/// cached at startup, so a reload of the backing registry is reflected
/// on the next translation.
pub trait ExternalEnumSource {
    fn block_identifiers(&self) -> Vec<String>;
    fn enchantment_identifiers(&self) -> Vec<String>;
    fn entity_summon_identifiers(&self) -> Vec<String>;
    fn color_names(&self) -> Vec<String>;
}

/// Narrow send-path interface; the translator never touches a socket.
pub trait PacketSink {
    fn send_commands(&mut self, message: CommandMessage);
}

/// Everything the driver needs beyond the node graph itself. `item_names`
/// is the shared array of J-side item names (the registry's
/// `j_name_list`) the `ITEM_STACK` parser kind enumerates (spec §2).
pub struct BuildContext<'a> {
    pub descriptions: &'a dyn DescriptionSource,
    pub enum_source: &'a dyn ExternalEnumSource,
    pub item_names: &'a [String],
}

/// Pure translation: J node graph -> B command message. Does not touch
/// the packet send path; callers that also need to dispatch the result
/// should use [`translate`].
///
/// Root-level literal children of `nodes[0]` are the command names.
/// Redirect targets are followed before overloads are built, and
/// aliases whose resolved node index was already visited, or whose
/// lowercase name was already emitted, are skipped (steps 1-2 of the
/// coalescing procedure).
pub fn translate_commands(nodes: &[CommandNode], ctx: &BuildContext) -> CommandMessage {
    let root = &nodes[0];
    debug_assert_eq!(root.kind, NodeKind::Root);

    let mut seen_node_indices: HashSet<usize> = HashSet::new();
    let mut seen_aliases: HashSet<String> = HashSet::new();
    let mut order: Vec<OverloadMatrix> = Vec::new();
    let mut groups: HashMap<OverloadMatrix, Vec<String>> = HashMap::new();

    for &child_idx in &root.children {
        let child = &nodes[child_idx];
        if child.kind != NodeKind::Literal {
            continue;
        }
        let lower = child.name.to_ascii_lowercase();
        if !seen_aliases.insert(lower) {
            tracing::debug!(alias = %child.name, "dropping duplicate command alias");
            continue;
        }

        let effective_idx = follow_redirect(nodes, child_idx);
        seen_node_indices.insert(effective_idx);

        let rows = build_overloads(nodes, effective_idx, ctx);
        let matrix = OverloadMatrix(rows);

        match groups.get_mut(&matrix) {
            Some(aliases) => aliases.push(child.name.clone()),
            None => {
                order.push(matrix.clone());
                groups.insert(matrix, vec![child.name.clone()]);
            }
        }
    }

    let mut commands = Vec::with_capacity(order.len());
    for matrix in order {
        let aliases = groups.remove(&matrix).expect("just inserted");
        let primary_name = aliases[0].clone();
        let aliases_enum = CommandEnum::new(format!("{primary_name}Aliases"), aliases);
        commands.push(CommandDescriptor {
            name: primary_name.clone(),
            description: ctx.descriptions.describe(&primary_name),
            flags: 0,
            permission: 0,
            aliases_enum,
            overloads: matrix.0,
        });
    }

    CommandMessage { commands }
}

/// Translates and dispatches through the packet send path, short-
/// circuiting to an empty message when command suggestions are
/// disabled by configuration.
pub fn translate(
    nodes: &[CommandNode],
    ctx: &BuildContext,
    suggestions_enabled: bool,
    sink: &mut dyn PacketSink,
) {
    let message = if suggestions_enabled {
        translate_commands(nodes, ctx)
    } else {
        CommandMessage::default()
    };
    sink.send_commands(message);
}
