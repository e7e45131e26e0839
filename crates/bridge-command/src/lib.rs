//! Command Tree Translator: turns a J-side command node graph into
//! B-side command descriptors via overload coalescing.

mod driver;
mod node;
mod overload;
mod param;

pub use driver::{
    translate, translate_commands, BuildContext, CommandDescriptor, CommandMessage,
    DescriptionSource, ExternalEnumSource, OverloadMatrix, PacketSink,
};
pub use node::{follow_redirect, CommandNode, NodeKind, ParserKind};
pub use overload::{build_overloads, compatible, ParamInfo};
pub use param::{classify_parser, CommandEnum, CommandParamData, ParamKind, ParamType, ParamValue};
