use super::{Context, Output};
use crate::error::Error;
use crate::node::Node;
use crate::path::Path;
use crate::synth::{self, Width};

/// Single-value container: the node holds exactly one primitive.
///
/// Each `decode_*` records a freshly synthesized value as this node's
/// content. The caller hands the driving routine its own placeholder.
pub struct ScalarContainer<'a, 'o> {
    ctx: &'a mut Context<'o>,
    path: Path,
    type_name: &'static str,
    out: &'a mut Output,
}

impl<'a, 'o> ScalarContainer<'a, 'o> {
    pub fn new(ctx: &'a mut Context<'o>, path: Path, type_name: &'static str, out: &'a mut Output) -> Self {
        Self { ctx, path, type_name, out }
    }

    fn record(self, node: Node) {
        *self.out = Output::Node(node);
    }

    pub fn decode_bool(self) {
        let value = synth::boolean(&mut self.ctx.rng);
        self.record(Node::Bool(value));
    }

    pub fn decode_integer(self, width: Width) {
        let value = synth::integer(&mut self.ctx.rng, self.ctx.options, width);
        self.record(Node::from(value));
    }

    pub fn decode_float(self) {
        let value = synth::float(&mut self.ctx.rng, self.ctx.options);
        self.record(Node::from(value));
    }

    pub fn decode_string(self) {
        let value = synth::string(&mut self.ctx.rng, self.ctx.options);
        self.record(Node::String(value));
    }

    pub fn decode_char(self) {
        let value = synth::character(&mut self.ctx.rng);
        self.record(Node::String(value.to_string()));
    }

    pub fn decode_unit(self) {
        self.record(Node::Null);
    }

    /// No synthesis rule exists for the requested type.
    pub fn unsupported(self) -> Error {
        Error::unsupported(self.type_name, &self.path)
    }
}
