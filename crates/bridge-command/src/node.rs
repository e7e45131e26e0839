//! In-memory representation of a parsed J-side command graph.

/// A node in the J-side declare-commands packet.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandNode {
    /// Literal text, or the parameter placeholder name for an argument.
    pub name: String,
    pub kind: NodeKind,
    /// Present only on argument nodes; the translator otherwise only
    /// distinguishes "has parser" (argument) from "no parser" (literal).
    pub parser: Option<ParserKind>,
    /// Ordered child indices into the owning node array.
    pub children: Vec<usize>,
    /// When present, this node is an alias whose effective children are
    /// the target's children.
    pub redirect: Option<usize>,
}

impl CommandNode {
    pub fn is_argument(&self) -> bool {
        self.parser.is_some()
    }

    pub fn literal(name: impl Into<String>, children: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Literal,
            parser: None,
            children,
            redirect: None,
        }
    }

    pub fn argument(name: impl Into<String>, parser: ParserKind, children: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Argument,
            parser: Some(parser),
            children,
            redirect: None,
        }
    }

    pub fn root(children: Vec<usize>) -> Self {
        Self {
            name: String::new(),
            kind: NodeKind::Root,
            parser: None,
            children,
            redirect: None,
        }
    }

    pub fn with_redirect(mut self, target: usize) -> Self {
        self.redirect = Some(target);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Literal,
    Argument,
}

/// The J-side argument parser tag. Parsers outside this closed set's
/// enum-producing rows fall through to `ParamType::String` at mapping
/// time (spec §7); every variant here is one the mapping table names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    Float,
    Double,
    Rotation,
    Integer,
    Entity,
    GameProfile,
    BlockPos,
    ColumnPos,
    Vec3,
    Message,
    Nbt,
    NbtCompoundTag,
    NbtTag,
    NbtPath,
    ResourceLocation,
    Function,
    Bool,
    Operation,
    BlockState,
    ItemStack,
    ItemEnchantment,
    EntitySummon,
    Color,
}

/// Follows a chain of `redirect` links to the effective target node,
/// guarding against a malformed cycle in untrusted packet data.
pub fn follow_redirect(nodes: &[CommandNode], mut index: usize) -> usize {
    let mut hops = 0;
    while let Some(target) = nodes[index].redirect {
        index = target;
        hops += 1;
        if hops > nodes.len() {
            break;
        }
    }
    index
}
