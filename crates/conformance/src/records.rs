//! The conformance record set.
//!
//! One record per supported shape group: [`Required`] (every required
//! scalar), [`Optional`] (the same scalars as nullable fields), [`Maps`],
//! [`Lists`], the [`Tests`] aggregate composing all four, and the
//! minimal nested record [`Thing`]. Field-name strings are the wire
//! contract: encode writes them in declared order, decode matches them in
//! any order, skips unknown names, and leaves missing fields at their
//! defaults.

use std::collections::BTreeMap;

use modlink_buffers::Writer;
use modlink_msgpack::{
    read_array, read_map, read_nullable, write_array, write_map, write_nullable, Decoder, Message,
    MsgPackError, MsgPackWrite,
};

/// Minimal nested record: a single string field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Thing {
    pub value: String,
}

impl Thing {
    pub fn builder() -> ThingBuilder {
        ThingBuilder::default()
    }
}

impl Message for Thing {
    fn encode(&self, w: &mut dyn Writer) {
        w.write_map_len(1);
        w.write_str("value");
        w.write_str(&self.value);
    }

    fn decode(d: &mut Decoder<'_>) -> Result<Self, MsgPackError> {
        let mut thing = Thing::default();
        let mut fields = d.read_map_len()?;
        while fields > 0 {
            fields -= 1;
            match d.read_str()? {
                "value" => thing.value = d.read_str()?.to_owned(),
                _ => d.skip()?,
            }
        }
        Ok(thing)
    }
}

#[derive(Debug, Default)]
pub struct ThingBuilder {
    instance: Thing,
}

impl ThingBuilder {
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.instance.value = value.into();
        self
    }

    pub fn build(self) -> Thing {
        self.instance
    }
}

/// Every required scalar shape: booleans, the full signed/unsigned
/// integer width ladder, both float widths, a string, a byte sequence,
/// and one nested record.
///
/// Decode starts from `Default::default()`, so a record decoded from a
/// truncated or partial map is never left with uninitialized fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Required {
    pub bool_value: bool,
    pub u8_value: u8,
    pub u16_value: u16,
    pub u32_value: u32,
    pub u64_value: u64,
    pub s8_value: i8,
    pub s16_value: i16,
    pub s32_value: i32,
    pub s64_value: i64,
    pub f32_value: f32,
    pub f64_value: f64,
    pub string_value: String,
    pub bytes_value: Vec<u8>,
    pub object_value: Thing,
}

impl Required {
    pub fn builder() -> RequiredBuilder {
        RequiredBuilder::default()
    }
}

impl Message for Required {
    fn encode(&self, w: &mut dyn Writer) {
        w.write_map_len(14);
        w.write_str("boolValue");
        w.write_bool(self.bool_value);
        w.write_str("u8Value");
        w.write_u8(self.u8_value);
        w.write_str("u16Value");
        w.write_u16(self.u16_value);
        w.write_str("u32Value");
        w.write_u32(self.u32_value);
        w.write_str("u64Value");
        w.write_u64(self.u64_value);
        w.write_str("s8Value");
        w.write_i8(self.s8_value);
        w.write_str("s16Value");
        w.write_i16(self.s16_value);
        w.write_str("s32Value");
        w.write_i32(self.s32_value);
        w.write_str("s64Value");
        w.write_i64(self.s64_value);
        w.write_str("f32Value");
        w.write_f32(self.f32_value);
        w.write_str("f64Value");
        w.write_f64(self.f64_value);
        w.write_str("stringValue");
        w.write_str(&self.string_value);
        w.write_str("bytesValue");
        w.write_bin(&self.bytes_value);
        w.write_str("objectValue");
        self.object_value.encode(w);
    }

    fn decode(d: &mut Decoder<'_>) -> Result<Self, MsgPackError> {
        let mut required = Required::default();
        let mut fields = d.read_map_len()?;
        while fields > 0 {
            fields -= 1;
            match d.read_str()? {
                "boolValue" => required.bool_value = d.read_bool()?,
                "u8Value" => required.u8_value = d.read_u8()?,
                "u16Value" => required.u16_value = d.read_u16()?,
                "u32Value" => required.u32_value = d.read_u32()?,
                "u64Value" => required.u64_value = d.read_u64()?,
                "s8Value" => required.s8_value = d.read_i8()?,
                "s16Value" => required.s16_value = d.read_i16()?,
                "s32Value" => required.s32_value = d.read_i32()?,
                "s64Value" => required.s64_value = d.read_i64()?,
                "f32Value" => required.f32_value = d.read_f32()?,
                "f64Value" => required.f64_value = d.read_f64()?,
                "stringValue" => required.string_value = d.read_str()?.to_owned(),
                "bytesValue" => required.bytes_value = d.read_bin()?.to_vec(),
                "objectValue" => required.object_value = Thing::decode(d)?,
                _ => d.skip()?,
            }
        }
        Ok(required)
    }
}

#[derive(Debug, Default)]
pub struct RequiredBuilder {
    instance: Required,
}

impl RequiredBuilder {
    pub fn with_bool_value(mut self, value: bool) -> Self {
        self.instance.bool_value = value;
        self
    }

    pub fn with_u8_value(mut self, value: u8) -> Self {
        self.instance.u8_value = value;
        self
    }

    pub fn with_u16_value(mut self, value: u16) -> Self {
        self.instance.u16_value = value;
        self
    }

    pub fn with_u32_value(mut self, value: u32) -> Self {
        self.instance.u32_value = value;
        self
    }

    pub fn with_u64_value(mut self, value: u64) -> Self {
        self.instance.u64_value = value;
        self
    }

    pub fn with_s8_value(mut self, value: i8) -> Self {
        self.instance.s8_value = value;
        self
    }

    pub fn with_s16_value(mut self, value: i16) -> Self {
        self.instance.s16_value = value;
        self
    }

    pub fn with_s32_value(mut self, value: i32) -> Self {
        self.instance.s32_value = value;
        self
    }

    pub fn with_s64_value(mut self, value: i64) -> Self {
        self.instance.s64_value = value;
        self
    }

    pub fn with_f32_value(mut self, value: f32) -> Self {
        self.instance.f32_value = value;
        self
    }

    pub fn with_f64_value(mut self, value: f64) -> Self {
        self.instance.f64_value = value;
        self
    }

    pub fn with_string_value(mut self, value: impl Into<String>) -> Self {
        self.instance.string_value = value.into();
        self
    }

    pub fn with_bytes_value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.instance.bytes_value = value.into();
        self
    }

    pub fn with_object_value(mut self, value: Thing) -> Self {
        self.instance.object_value = value;
        self
    }

    pub fn build(self) -> Required {
        self.instance
    }
}

/// The same scalar shapes as [`Required`], each nullable.
///
/// Absence encodes as a single nil marker and is distinct from any
/// present-but-empty value (empty string, empty byte sequence).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Optional {
    pub bool_value: Option<bool>,
    pub u8_value: Option<u8>,
    pub u16_value: Option<u16>,
    pub u32_value: Option<u32>,
    pub u64_value: Option<u64>,
    pub s8_value: Option<i8>,
    pub s16_value: Option<i16>,
    pub s32_value: Option<i32>,
    pub s64_value: Option<i64>,
    pub f32_value: Option<f32>,
    pub f64_value: Option<f64>,
    pub string_value: Option<String>,
    pub bytes_value: Option<Vec<u8>>,
    pub object_value: Option<Thing>,
}

impl Optional {
    pub fn builder() -> OptionalBuilder {
        OptionalBuilder::default()
    }
}

impl Message for Optional {
    fn encode(&self, w: &mut dyn Writer) {
        w.write_map_len(14);
        w.write_str("boolValue");
        write_nullable(w, &self.bool_value, |w, v| w.write_bool(*v));
        w.write_str("u8Value");
        write_nullable(w, &self.u8_value, |w, v| w.write_u8(*v));
        w.write_str("u16Value");
        write_nullable(w, &self.u16_value, |w, v| w.write_u16(*v));
        w.write_str("u32Value");
        write_nullable(w, &self.u32_value, |w, v| w.write_u32(*v));
        w.write_str("u64Value");
        write_nullable(w, &self.u64_value, |w, v| w.write_u64(*v));
        w.write_str("s8Value");
        write_nullable(w, &self.s8_value, |w, v| w.write_i8(*v));
        w.write_str("s16Value");
        write_nullable(w, &self.s16_value, |w, v| w.write_i16(*v));
        w.write_str("s32Value");
        write_nullable(w, &self.s32_value, |w, v| w.write_i32(*v));
        w.write_str("s64Value");
        write_nullable(w, &self.s64_value, |w, v| w.write_i64(*v));
        w.write_str("f32Value");
        write_nullable(w, &self.f32_value, |w, v| w.write_f32(*v));
        w.write_str("f64Value");
        write_nullable(w, &self.f64_value, |w, v| w.write_f64(*v));
        w.write_str("stringValue");
        write_nullable(w, &self.string_value, |w, v| w.write_str(v));
        w.write_str("bytesValue");
        write_nullable(w, &self.bytes_value, |w, v| w.write_bin(v));
        w.write_str("objectValue");
        write_nullable(w, &self.object_value, |w, v| v.encode(w));
    }

    fn decode(d: &mut Decoder<'_>) -> Result<Self, MsgPackError> {
        let mut optional = Optional::default();
        let mut fields = d.read_map_len()?;
        while fields > 0 {
            fields -= 1;
            match d.read_str()? {
                "boolValue" => optional.bool_value = read_nullable(d, |d| d.read_bool())?,
                "u8Value" => optional.u8_value = read_nullable(d, |d| d.read_u8())?,
                "u16Value" => optional.u16_value = read_nullable(d, |d| d.read_u16())?,
                "u32Value" => optional.u32_value = read_nullable(d, |d| d.read_u32())?,
                "u64Value" => optional.u64_value = read_nullable(d, |d| d.read_u64())?,
                "s8Value" => optional.s8_value = read_nullable(d, |d| d.read_i8())?,
                "s16Value" => optional.s16_value = read_nullable(d, |d| d.read_i16())?,
                "s32Value" => optional.s32_value = read_nullable(d, |d| d.read_i32())?,
                "s64Value" => optional.s64_value = read_nullable(d, |d| d.read_i64())?,
                "f32Value" => optional.f32_value = read_nullable(d, |d| d.read_f32())?,
                "f64Value" => optional.f64_value = read_nullable(d, |d| d.read_f64())?,
                "stringValue" => {
                    optional.string_value = read_nullable(d, |d| Ok(d.read_str()?.to_owned()))?
                }
                "bytesValue" => {
                    optional.bytes_value = read_nullable(d, |d| Ok(d.read_bin()?.to_vec()))?
                }
                "objectValue" => optional.object_value = Thing::decode_nullable(d)?,
                _ => d.skip()?,
            }
        }
        Ok(optional)
    }
}

#[derive(Debug, Default)]
pub struct OptionalBuilder {
    instance: Optional,
}

impl OptionalBuilder {
    pub fn with_bool_value(mut self, value: Option<bool>) -> Self {
        self.instance.bool_value = value;
        self
    }

    pub fn with_u8_value(mut self, value: Option<u8>) -> Self {
        self.instance.u8_value = value;
        self
    }

    pub fn with_u16_value(mut self, value: Option<u16>) -> Self {
        self.instance.u16_value = value;
        self
    }

    pub fn with_u32_value(mut self, value: Option<u32>) -> Self {
        self.instance.u32_value = value;
        self
    }

    pub fn with_u64_value(mut self, value: Option<u64>) -> Self {
        self.instance.u64_value = value;
        self
    }

    pub fn with_s8_value(mut self, value: Option<i8>) -> Self {
        self.instance.s8_value = value;
        self
    }

    pub fn with_s16_value(mut self, value: Option<i16>) -> Self {
        self.instance.s16_value = value;
        self
    }

    pub fn with_s32_value(mut self, value: Option<i32>) -> Self {
        self.instance.s32_value = value;
        self
    }

    pub fn with_s64_value(mut self, value: Option<i64>) -> Self {
        self.instance.s64_value = value;
        self
    }

    pub fn with_f32_value(mut self, value: Option<f32>) -> Self {
        self.instance.f32_value = value;
        self
    }

    pub fn with_f64_value(mut self, value: Option<f64>) -> Self {
        self.instance.f64_value = value;
        self
    }

    pub fn with_string_value(mut self, value: Option<String>) -> Self {
        self.instance.string_value = value;
        self
    }

    pub fn with_bytes_value(mut self, value: Option<Vec<u8>>) -> Self {
        self.instance.bytes_value = value;
        self
    }

    pub fn with_object_value(mut self, value: Option<Thing>) -> Self {
        self.instance.object_value = value;
        self
    }

    pub fn build(self) -> Optional {
        self.instance
    }
}

/// Map shapes: 32-bit unsigned keys to string and to 64-bit unsigned
/// values. Ordered maps keep the encode iteration deterministic; wire
/// entry order on decode is irrelevant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Maps {
    pub map_string_primative: BTreeMap<u32, String>,
    pub map_u64_primative: BTreeMap<u32, u64>,
}

impl Maps {
    pub fn builder() -> MapsBuilder {
        MapsBuilder::default()
    }
}

impl Message for Maps {
    fn encode(&self, w: &mut dyn Writer) {
        w.write_map_len(2);
        w.write_str("mapStringPrimative");
        write_map(
            w,
            &self.map_string_primative,
            |w, key| w.write_u32(*key),
            |w, value| w.write_str(value),
        );
        w.write_str("mapU64Primative");
        write_map(
            w,
            &self.map_u64_primative,
            |w, key| w.write_u32(*key),
            |w, value| w.write_u64(*value),
        );
    }

    fn decode(d: &mut Decoder<'_>) -> Result<Self, MsgPackError> {
        let mut maps = Maps::default();
        let mut fields = d.read_map_len()?;
        while fields > 0 {
            fields -= 1;
            match d.read_str()? {
                "mapStringPrimative" => {
                    maps.map_string_primative =
                        read_map(d, |d| d.read_u32(), |d| Ok(d.read_str()?.to_owned()))?
                }
                "mapU64Primative" => {
                    maps.map_u64_primative = read_map(d, |d| d.read_u32(), |d| d.read_u64())?
                }
                _ => d.skip()?,
            }
        }
        Ok(maps)
    }
}

#[derive(Debug, Default)]
pub struct MapsBuilder {
    instance: Maps,
}

impl MapsBuilder {
    pub fn with_map_string_primative(mut self, value: BTreeMap<u32, String>) -> Self {
        self.instance.map_string_primative = value;
        self
    }

    pub fn with_map_u64_primative(mut self, value: BTreeMap<u32, u64>) -> Self {
        self.instance.map_u64_primative = value;
        self
    }

    pub fn build(self) -> Maps {
        self.instance
    }
}

/// List shapes: strings, 64-bit unsigned integers, nested records, and
/// nullable nested records. Element order is significant and preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lists {
    pub list_strings: Vec<String>,
    pub list_u64s: Vec<u64>,
    pub list_objects: Vec<Thing>,
    pub list_objects_optional: Vec<Option<Thing>>,
}

impl Lists {
    pub fn builder() -> ListsBuilder {
        ListsBuilder::default()
    }
}

impl Message for Lists {
    fn encode(&self, w: &mut dyn Writer) {
        w.write_map_len(4);
        w.write_str("listStrings");
        write_array(w, &self.list_strings, |w, item| w.write_str(item));
        w.write_str("listU64s");
        write_array(w, &self.list_u64s, |w, item| w.write_u64(*item));
        w.write_str("listObjects");
        write_array(w, &self.list_objects, |w, item| item.encode(w));
        w.write_str("listObjectsOptional");
        write_array(w, &self.list_objects_optional, |w, item| {
            write_nullable(w, item, |w, thing| thing.encode(w));
        });
    }

    fn decode(d: &mut Decoder<'_>) -> Result<Self, MsgPackError> {
        let mut lists = Lists::default();
        let mut fields = d.read_map_len()?;
        while fields > 0 {
            fields -= 1;
            match d.read_str()? {
                "listStrings" => {
                    lists.list_strings = read_array(d, |d| Ok(d.read_str()?.to_owned()))?
                }
                "listU64s" => lists.list_u64s = read_array(d, |d| d.read_u64())?,
                "listObjects" => lists.list_objects = read_array(d, Thing::decode)?,
                "listObjectsOptional" => {
                    lists.list_objects_optional = read_array(d, Thing::decode_nullable)?
                }
                _ => d.skip()?,
            }
        }
        Ok(lists)
    }
}

#[derive(Debug, Default)]
pub struct ListsBuilder {
    instance: Lists,
}

impl ListsBuilder {
    pub fn with_list_strings(mut self, value: Vec<String>) -> Self {
        self.instance.list_strings = value;
        self
    }

    pub fn with_list_u64s(mut self, value: Vec<u64>) -> Self {
        self.instance.list_u64s = value;
        self
    }

    pub fn with_list_objects(mut self, value: Vec<Thing>) -> Self {
        self.instance.list_objects = value;
        self
    }

    pub fn with_list_objects_optional(mut self, value: Vec<Option<Thing>>) -> Self {
        self.instance.list_objects_optional = value;
        self
    }

    pub fn build(self) -> Lists {
        self.instance
    }
}

/// Aggregate record composing all four shape groups; the canonical
/// payload for round-trip verification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tests {
    pub required: Required,
    pub optional: Optional,
    pub maps: Maps,
    pub lists: Lists,
}

impl Tests {
    pub fn builder() -> TestsBuilder {
        TestsBuilder::default()
    }
}

impl Message for Tests {
    fn encode(&self, w: &mut dyn Writer) {
        w.write_map_len(4);
        w.write_str("required");
        self.required.encode(w);
        w.write_str("optional");
        self.optional.encode(w);
        w.write_str("maps");
        self.maps.encode(w);
        w.write_str("lists");
        self.lists.encode(w);
    }

    fn decode(d: &mut Decoder<'_>) -> Result<Self, MsgPackError> {
        let mut tests = Tests::default();
        let mut fields = d.read_map_len()?;
        while fields > 0 {
            fields -= 1;
            match d.read_str()? {
                "required" => tests.required = Required::decode(d)?,
                "optional" => tests.optional = Optional::decode(d)?,
                "maps" => tests.maps = Maps::decode(d)?,
                "lists" => tests.lists = Lists::decode(d)?,
                _ => d.skip()?,
            }
        }
        Ok(tests)
    }
}

#[derive(Debug, Default)]
pub struct TestsBuilder {
    instance: Tests,
}

impl TestsBuilder {
    pub fn with_required(mut self, value: Required) -> Self {
        self.instance.required = value;
        self
    }

    pub fn with_optional(mut self, value: Optional) -> Self {
        self.instance.optional = value;
        self
    }

    pub fn with_maps(mut self, value: Maps) -> Self {
        self.instance.maps = value;
        self
    }

    pub fn with_lists(mut self, value: Lists) -> Self {
        self.instance.lists = value;
        self
    }

    pub fn build(self) -> Tests {
        self.instance
    }
}

/// Argument envelope for the `testFunction` operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestFunctionArgs {
    pub required: Required,
    pub optional: Optional,
    pub maps: Maps,
    pub lists: Lists,
}

impl Message for TestFunctionArgs {
    fn encode(&self, w: &mut dyn Writer) {
        w.write_map_len(4);
        w.write_str("required");
        self.required.encode(w);
        w.write_str("optional");
        self.optional.encode(w);
        w.write_str("maps");
        self.maps.encode(w);
        w.write_str("lists");
        self.lists.encode(w);
    }

    fn decode(d: &mut Decoder<'_>) -> Result<Self, MsgPackError> {
        let mut args = TestFunctionArgs::default();
        let mut fields = d.read_map_len()?;
        while fields > 0 {
            fields -= 1;
            match d.read_str()? {
                "required" => args.required = Required::decode(d)?,
                "optional" => args.optional = Optional::decode(d)?,
                "maps" => args.maps = Maps::decode(d)?,
                "lists" => args.lists = Lists::decode(d)?,
                _ => d.skip()?,
            }
        }
        Ok(args)
    }
}
