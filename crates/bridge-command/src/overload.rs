//! Overload coalescing: turns a J-side node subtree into the layered
//! slot structure an overload matrix is built from.

use std::collections::HashMap;

use crate::driver::BuildContext;
use crate::node::{CommandNode, ParserKind};
use crate::param::{classify_parser, CommandParamData, ParamKind};

/// One candidate parameter at a given depth, together with the deeper
/// slot layers reachable through it.
#[derive(Debug, Clone)]
pub struct ParamInfo {
    pub node_index: usize,
    pub param_data: CommandParamData,
    pub children: Vec<Vec<ParamInfo>>,
}

type CompatMemo = HashMap<(usize, usize), bool>;

/// Resolves the value list for an enum-producing parser kind, sourcing
/// from the registry's item-name list or the external enum source as
/// the mapping table in spec §4.4 dictates.
fn enum_values_for(parser: ParserKind, ctx: &BuildContext) -> Vec<String> {
    match parser {
        ParserKind::Bool => vec!["true".to_string(), "false".to_string()],
        ParserKind::BlockState => ctx.enum_source.block_identifiers(),
        ParserKind::ItemStack => ctx.item_names.to_vec(),
        ParserKind::ItemEnchantment => ctx.enum_source.enchantment_identifiers(),
        ParserKind::EntitySummon => ctx.enum_source.entity_summon_identifiers(),
        ParserKind::Color => ctx.enum_source.color_names(),
        other => unreachable!("{other:?} is not an enum-producing parser kind"),
    }
}

/// Builds the list of parameter candidates one step below `node_index`,
/// coalescing sibling literals that share compatible subtrees into a
/// single enum parameter, and recursing into each candidate's own
/// children.
pub fn build_children(
    nodes: &[CommandNode],
    node_index: usize,
    ctx: &BuildContext,
    memo: &mut CompatMemo,
) -> Vec<ParamInfo> {
    let node = &nodes[node_index];
    let child_indices: Vec<usize> = node.children.clone();

    // Partition children into literals (candidates for enum-merging)
    // and arguments (always their own slot), per the has-parser test.
    let mut literal_groups: Vec<Vec<usize>> = Vec::new();
    let mut argument_children: Vec<usize> = Vec::new();

    for &child_idx in &child_indices {
        let child = &nodes[child_idx];
        if child.is_argument() {
            argument_children.push(child_idx);
            continue;
        }
        // Find an existing group whose representative is structurally
        // compatible with this literal; otherwise start a new group.
        let mut placed = false;
        for group in literal_groups.iter_mut() {
            let rep = group[0];
            if compatible(nodes, rep, child_idx, memo) {
                group.push(child_idx);
                placed = true;
                break;
            }
        }
        if !placed {
            literal_groups.push(vec![child_idx]);
        }
    }

    let mut out = Vec::new();

    for group in literal_groups {
        let rep = group[0];
        let names: Vec<String> = group.iter().map(|&i| nodes[i].name.clone()).collect();
        let param_data = CommandParamData::enum_param(names[0].clone(), names);
        let children = collect_grandchildren(nodes, &group, ctx, memo);
        out.push(ParamInfo {
            node_index: rep,
            param_data,
            children,
        });
    }

    for child_idx in argument_children {
        let child = &nodes[child_idx];
        let Some(parser) = child.parser else {
            // An argument node with no parser is malformed input; skip
            // it rather than panic (spec §7: degrade, don't crash).
            continue;
        };
        let param_data = match classify_parser(parser) {
            ParamKind::Type(ty) => CommandParamData::argument(child.name.clone(), ty),
            ParamKind::Enum => {
                CommandParamData::enum_param(child.name.clone(), enum_values_for(parser, ctx))
            }
        };
        let deeper = build_children(nodes, child_idx, ctx, memo);
        let children = if deeper.is_empty() { Vec::new() } else { vec![deeper] };
        out.push(ParamInfo {
            node_index: child_idx,
            param_data,
            children,
        });
    }

    out
}

/// Builds the deeper slot layers shared by every member of a coalesced
/// literal group. Since all members are structurally compatible by
/// construction, any member's own children recurse identically; we use
/// the first member's as the representative.
fn collect_grandchildren(
    nodes: &[CommandNode],
    group: &[usize],
    ctx: &BuildContext,
    memo: &mut CompatMemo,
) -> Vec<Vec<ParamInfo>> {
    let rep = group[0];
    let deeper = build_children(nodes, rep, ctx, memo);
    if deeper.is_empty() {
        Vec::new()
    } else {
        vec![deeper]
    }
}

/// Recursive, order-independent structural compatibility check between
/// two node subtrees: same has-parser/parser-kind shape, and every
/// child on one side has a compatible counterpart on the other,
/// ignoring order. Memoized on `(a, b)` to avoid recomputing shared
/// subtrees.
pub fn compatible(nodes: &[CommandNode], a: usize, b: usize, memo: &mut CompatMemo) -> bool {
    if a == b {
        return true;
    }
    let key = if a <= b { (a, b) } else { (b, a) };
    if let Some(&result) = memo.get(&key) {
        return result;
    }
    // Insert a provisional `true` to break cycles from malformed/cyclic
    // redirect graphs before recursing.
    memo.insert(key, true);

    let node_a = &nodes[a];
    let node_b = &nodes[b];

    let shape_matches = node_a.is_argument() == node_b.is_argument() && node_a.parser == node_b.parser;

    let result = if !shape_matches {
        false
    } else if node_a.children.len() != node_b.children.len() {
        false
    } else {
        node_a.children.iter().all(|&ca| {
            node_b
                .children
                .iter()
                .any(|&cb| compatible(nodes, ca, cb, memo))
        })
    };

    memo.insert(key, result);
    result
}

/// Flattens the layered slot structure into the list-of-overload-rows
/// shape a `CommandDescriptor` carries: each top-level candidate opens
/// one overload row per leaf path through its `children` layers.
pub fn collect_slots(slots: &[ParamInfo]) -> Vec<Vec<CommandParamData>> {
    let mut rows = Vec::new();
    for slot in slots {
        collect_tree(slot, &mut Vec::new(), &mut rows);
    }
    if rows.is_empty() {
        rows.push(Vec::new());
    }
    rows
}

fn collect_tree(slot: &ParamInfo, prefix: &mut Vec<CommandParamData>, rows: &mut Vec<Vec<CommandParamData>>) {
    prefix.push(slot.param_data.clone());
    if slot.children.is_empty() {
        rows.push(prefix.clone());
    } else {
        for layer in &slot.children {
            for deeper in layer {
                collect_tree(deeper, prefix, rows);
            }
        }
    }
    prefix.pop();
}

/// Builds the full set of overload rows for the command rooted just
/// below `root_index` (the root's own name is the command's `name`,
/// not a parameter, so only its children enter the matrix).
pub fn build_overloads(
    nodes: &[CommandNode],
    root_index: usize,
    ctx: &BuildContext,
) -> Vec<Vec<CommandParamData>> {
    let mut memo = CompatMemo::new();
    let top_level = build_children(nodes, root_index, ctx, &mut memo);
    collect_slots(&top_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{DescriptionSource, ExternalEnumSource};
    use crate::node::CommandNode;

    struct NoDescriptions;
    impl DescriptionSource for NoDescriptions {
        fn describe(&self, command_name: &str) -> String {
            command_name.to_string()
        }
    }

    struct NoEnums;
    impl ExternalEnumSource for NoEnums {
        fn block_identifiers(&self) -> Vec<String> {
            vec![]
        }
        fn enchantment_identifiers(&self) -> Vec<String> {
            vec![]
        }
        fn entity_summon_identifiers(&self) -> Vec<String> {
            vec![]
        }
        fn color_names(&self) -> Vec<String> {
            vec![]
        }
    }

    fn test_ctx_parts() -> (NoDescriptions, NoEnums, Vec<String>) {
        (NoDescriptions, NoEnums, Vec::new())
    }

    fn leaf(name: &str) -> CommandNode {
        CommandNode::literal(name, vec![])
    }

    #[test]
    fn two_incompatible_literal_siblings_stay_distinct_slots() {
        // gamerule <rule> and gamerule <rule> <value> both exist as
        // overloads sharing one literal-coalesced enum of rule names.
        let nodes = vec![
            CommandNode::root(vec![1]),
            CommandNode::literal("gamerule", vec![2, 3]),
            leaf("doDaylightCycle"),
            leaf("keepInventory"),
        ];
        let (d, e, names) = test_ctx_parts();
        let ctx = BuildContext {
            descriptions: &d,
            enum_source: &e,
            item_names: &names,
        };
        let rows = build_overloads(&nodes, 1, &ctx);
        // Both literals are structurally identical (no children), so
        // they coalesce into a single enum slot -> one overload row.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn gamerule_style_two_overload_rows() {
        // doDaylightCycle has an extra boolean-argument child, while
        // keepInventory does not: their subtrees are NOT compatible,
        // so they must stay in separate slots, yielding two rows.
        let nodes = vec![
            CommandNode::root(vec![1]),
            CommandNode::literal("gamerule", vec![2, 4]),
            CommandNode::literal("doDaylightCycle", vec![3]),
            CommandNode::argument("value", ParserKind::Bool, vec![]),
            CommandNode::literal("keepInventory", vec![]),
        ];
        let (d, e, names) = test_ctx_parts();
        let ctx = BuildContext {
            descriptions: &d,
            enum_source: &e,
            item_names: &names,
        };
        let rows = build_overloads(&nodes, 1, &ctx);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn bool_argument_becomes_true_false_enum() {
        let nodes = vec![
            CommandNode::root(vec![1]),
            CommandNode::literal("cmd", vec![2]),
            CommandNode::argument("value", ParserKind::Bool, vec![]),
        ];
        let (d, e, names) = test_ctx_parts();
        let ctx = BuildContext {
            descriptions: &d,
            enum_source: &e,
            item_names: &names,
        };
        let rows = build_overloads(&nodes, 1, &ctx);
        assert_eq!(rows.len(), 1);
        match &rows[0][0].value {
            crate::param::ParamValue::Enum(e) => {
                assert_eq!(e.name, "value");
                assert_eq!(e.values, vec!["true".to_string(), "false".to_string()]);
                assert!(!e.is_soft);
            }
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn item_stack_argument_uses_registry_item_names() {
        let nodes = vec![
            CommandNode::root(vec![1]),
            CommandNode::literal("give", vec![2]),
            CommandNode::argument("item", ParserKind::ItemStack, vec![]),
        ];
        let item_names = vec!["minecraft:stone".to_string(), "minecraft:dirt".to_string()];
        let (d, e) = (NoDescriptions, NoEnums);
        let ctx = BuildContext {
            descriptions: &d,
            enum_source: &e,
            item_names: &item_names,
        };
        let rows = build_overloads(&nodes, 1, &ctx);
        match &rows[0][0].value {
            crate::param::ParamValue::Enum(e) => assert_eq!(e.values, item_names),
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn argument_siblings_never_merge() {
        let nodes = vec![
            CommandNode::root(vec![1]),
            CommandNode::literal("tp", vec![2, 3]),
            CommandNode::argument("destination", ParserKind::Entity, vec![]),
            CommandNode::argument("pos", ParserKind::Vec3, vec![]),
        ];
        let (d, e, names) = test_ctx_parts();
        let ctx = BuildContext {
            descriptions: &d,
            enum_source: &e,
            item_names: &names,
        };
        let rows = build_overloads(&nodes, 1, &ctx);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn compatible_is_order_independent() {
        let nodes = vec![
            CommandNode::literal("a", vec![2, 3]),
            CommandNode::literal("b", vec![3, 2]),
            leaf("x"),
            leaf("y"),
        ];
        let mut memo = CompatMemo::new();
        assert!(compatible(&nodes, 0, 1, &mut memo));
    }

    #[test]
    fn repeated_build_is_deterministic() {
        let nodes = vec![
            CommandNode::root(vec![1]),
            CommandNode::literal("foo", vec![2, 3]),
            leaf("bar"),
            leaf("baz"),
        ];
        let (d, e, names) = test_ctx_parts();
        let ctx = BuildContext {
            descriptions: &d,
            enum_source: &e,
            item_names: &names,
        };
        let rows_a = build_overloads(&nodes, 1, &ctx);
        let rows_b = build_overloads(&nodes, 1, &ctx);
        assert_eq!(rows_a, rows_b);
    }
}
