//! The synthetic decoder.
//!
//! A [`Decoder`] is handed to a type's own `Deserialize` routine in place of
//! a real format deserializer. Whatever shape the routine asks for (a struct
//! or map, a sequence or tuple, a single primitive) decides which of the
//! three containers gets created for this node:
//!
//! - [`MappingContainer`]: keyed requests, accumulates `field -> node`
//! - [`SequenceContainer`]: indexed requests, stops after a target length
//! - [`ScalarContainer`]: exactly one primitive value
//!
//! Every request records a synthesized node while the routine itself is
//! handed a type-correct placeholder (`0`, `0.0`, `""`, `true`). Compound
//! sub-values recurse through [`drive`], one fresh decoder per level.
pub mod mapping;
pub mod sequence;
pub mod scalar;

use std::collections::HashSet;
use std::marker::PhantomData;

use chrono::Utc;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::de::{self, Deserializer as _, DeserializeSeed, Visitor};

use crate::error::{Error, Result};
use crate::node::Node;
use crate::options::GenerateOptions;
use crate::path::Path;
use crate::synth::{temporal, TemporalKind, Width};

pub use mapping::MappingContainer;
pub use sequence::SequenceContainer;
pub use scalar::ScalarContainer;

// ------------------------------- Context --------------------------------- //

/// Per-generation state shared by every decoder of one traversal.
pub struct Context<'o> {
    pub options: &'o GenerateOptions,
    pub rng: Xoshiro256StarStar,
    /// `(struct type, field name)` pairs naming a field a second time.
    shadowed: HashSet<(&'static str, &'static str)>,
}

impl<'o> Context<'o> {
    pub fn new(options: &'o GenerateOptions) -> Self {
        Self::with_shadowed(options, HashSet::new())
    }

    fn with_shadowed(options: &'o GenerateOptions, shadowed: HashSet<(&'static str, &'static str)>) -> Self {
        let rng = match options.seed {
            Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
            None => Xoshiro256StarStar::from_entropy(),
        };
        Self { options, rng, shadowed }
    }
}

/// Drive `T` from the root.
///
/// A struct's declared field list carries aliases next to the names they
/// stand for, and nothing tells them apart until the routine rejects a field
/// it has already seen. Each rejection marks that name as shadowed and the
/// traversal restarts from a fresh context with the same seed.
pub fn generate<'de, T: de::Deserialize<'de>>(options: &GenerateOptions) -> Result<Option<Node>> {
    let mut shadowed = HashSet::new();
    loop {
        let known = shadowed.len();
        let mut ctx = Context::with_shadowed(options, shadowed);
        match drive(&mut ctx, Path::root(), PhantomData::<T>) {
            Err(Error::DuplicateField { field }) if ctx.shadowed.len() > known => {
                log::debug!("`{field}` is also declared under an alias; restarting");
                shadowed = ctx.shadowed;
            }
            result => return result.map(|(_, node)| node),
        }
    }
}

// ------------------------------- Output ---------------------------------- //

/// What a decoder left behind once its owning call returned.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Output {
    /// The routine never asked for a container.
    #[default]
    Untouched,
    /// An optional decoded as absent; the parent records nothing.
    Omitted,
    Node(Node),
}

impl Output {
    /// The output node; an untouched decoder reads as an empty object.
    pub fn into_node(self) -> Option<Node> {
        match self {
            Output::Untouched => Some(Node::empty_object()),
            Output::Omitted => None,
            Output::Node(node) => Some(node),
        }
    }
}

/// Decode one value of the seed's declared type at `path`.
///
/// Temporal types are recognized by name here, before any recursion, and
/// short-circuit to a synthesized date string. Everything else gets a fresh
/// [`Decoder`] driven by the type's own routine.
pub fn drive<'de, S>(ctx: &mut Context<'_>, path: Path, seed: S) -> Result<(S::Value, Option<Node>)>
where
    S: DeserializeSeed<'de>,
{
    let type_name = std::any::type_name::<S::Value>();
    let mut out = Output::default();
    let value = match temporal::classify(type_name) {
        Some(kind) => seed.deserialize(TemporalDecoder { options: ctx.options, kind, out: &mut out })?,
        None => seed.deserialize(Decoder::new(ctx, path, type_name, &mut out))?,
    };
    Ok((value, out.into_node()))
}

// ------------------------------- Decoder --------------------------------- //

/// One recursion level. Consumed by the first shape request, so it owns at
/// most one container.
pub struct Decoder<'a, 'o> {
    ctx: &'a mut Context<'o>,
    path: Path,
    type_name: &'static str,
    out: &'a mut Output,
}

impl<'a, 'o> Decoder<'a, 'o> {
    pub fn new(ctx: &'a mut Context<'o>, path: Path, type_name: &'static str, out: &'a mut Output) -> Self {
        Self { ctx, path, type_name, out }
    }

    fn request_mapping_container(self, keys: mapping::Keys) -> (MappingContainer<'a, 'o>, &'a mut Output) {
        log::trace!("mapping container for `{}` at {}", self.type_name, self.path);
        (MappingContainer::new(self.ctx, self.path, keys), self.out)
    }

    fn request_sequence_container(self, target: usize) -> (SequenceContainer<'a, 'o>, &'a mut Output) {
        log::trace!("sequence container for `{}` at {} (target {target})", self.type_name, self.path);
        (SequenceContainer::new(self.ctx, self.path, target), self.out)
    }

    fn request_scalar_container(self) -> ScalarContainer<'a, 'o> {
        log::trace!("scalar container for `{}` at {}", self.type_name, self.path);
        ScalarContainer::new(self.ctx, self.path, self.type_name, self.out)
    }

    fn unsupported(self) -> Error {
        self.request_scalar_container().unsupported()
    }

    fn visit_mapping<'de, V: Visitor<'de>>(self, keys: mapping::Keys, visitor: V) -> Result<V::Value> {
        let (mut container, out) = self.request_mapping_container(keys);
        let value = visitor.visit_map(&mut container).inspect_err(|err| {
            if matches!(err, Error::DuplicateField { .. }) {
                container.shadow_pending();
            }
        })?;
        *out = Output::Node(container.into_node());
        Ok(value)
    }

    fn visit_sequence<'de, V: Visitor<'de>>(self, target: usize, visitor: V) -> Result<V::Value> {
        let (mut container, out) = self.request_sequence_container(target);
        let value = visitor.visit_seq(&mut container)?;
        *out = Output::Node(container.into_node());
        Ok(value)
    }
}

macro_rules! decode_integer {
    ($($method:ident => $visit:ident($ty:ty, $width:expr);)*) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            self.request_scalar_container().decode_integer($width);
            visitor.$visit(<$ty>::default())
        }
    )*};
}

impl<'de, 'a, 'o> de::Deserializer<'de> for Decoder<'a, 'o> {
    type Error = Error;

    /// Self-describing requests (`serde_json::Value`, untagged enums) have
    /// no declared shape to synthesize against.
    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(self.unsupported())
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.request_scalar_container().decode_bool();
        visitor.visit_bool(true)
    }

    decode_integer! {
        deserialize_i8 => visit_i8(i8, Width::I8);
        deserialize_i16 => visit_i16(i16, Width::I16);
        deserialize_i32 => visit_i32(i32, Width::I32);
        deserialize_i64 => visit_i64(i64, Width::I64);
        deserialize_u8 => visit_u8(u8, Width::U8);
        deserialize_u16 => visit_u16(u16, Width::U16);
        deserialize_u32 => visit_u32(u32, Width::U32);
        deserialize_u64 => visit_u64(u64, Width::U64);
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.request_scalar_container().decode_float();
        visitor.visit_f32(0.0)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.request_scalar_container().decode_float();
        visitor.visit_f64(0.0)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.request_scalar_container().decode_char();
        visitor.visit_char('\0')
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.request_scalar_container().decode_string();
        visitor.visit_borrowed_str("")
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(self.unsupported())
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(self.unsupported())
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if !self.ctx.options.generate_optionals {
            *self.out = Output::Omitted;
            return visitor.visit_none();
        }
        let type_name = temporal::unwrap_option(self.type_name);
        visitor.visit_some(Decoder { type_name, ..self })
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.request_scalar_container().decode_unit();
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    /// The wrapped type's routine supersedes this one on the same node. The
    /// inner type's name is not available here, so `type_name` stays the
    /// wrapper's.
    fn deserialize_newtype_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let target = self.ctx.options.sequence_length;
        self.visit_sequence(target, visitor)
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        self.visit_sequence(len, visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.visit_sequence(len, visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let keys = mapping::Keys::synthesized(self.ctx.options.sequence_length);
        self.visit_mapping(keys, visitor)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let keys = mapping::Keys::declared(self.type_name, fields);
        self.visit_mapping(keys, visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value> {
        // Inside a newtype the declared name is the wrapper's.
        let declared = self.type_name.split('<').next().unwrap_or(self.type_name);
        let type_name = if declared.rsplit("::").next() == Some(name) { self.type_name } else { name };
        Err(Decoder { type_name, ..self }.unsupported())
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        *self.out = Output::Omitted;
        visitor.visit_unit()
    }
}

// --------------------------- Temporal decoder ---------------------------- //

/// Leaf decoder for a declared temporal type.
///
/// Records a formatted date string and hands the type's routine the current
/// moment in its standard form, whatever shape it asks for.
struct TemporalDecoder<'a> {
    options: &'a GenerateOptions,
    kind: TemporalKind,
    out: &'a mut Output,
}

impl<'de, 'a> de::Deserializer<'de> for TemporalDecoder<'a> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let now = Utc::now();
        let recorded = temporal::render(self.kind, now, self.options);
        *self.out = Output::Node(Node::String(recorded));
        visitor.visit_string(self.kind.standard(now))
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if !self.options.generate_optionals {
            *self.out = Output::Omitted;
            return visitor.visit_none();
        }
        visitor.visit_some(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}
