//! Generic map, array, and nullable codecs.
//!
//! Each codec is parameterized by explicit per-type encode/decode
//! functions rather than capturing ambient state, so the same generic
//! body serves every key/value/element combination the schema declares.

use std::collections::BTreeMap;

use modlink_buffers::Writer;

use crate::decode::Decoder;
use crate::error::MsgPackError;
use crate::write::MsgPackWrite;

/// Writes a map as an entry-count header followed by key/value pairs.
///
/// The map is ordered, so the sizing pass and the write pass iterate the
/// entries in the same order.
pub fn write_map<K, V>(
    w: &mut dyn Writer,
    map: &BTreeMap<K, V>,
    mut write_key: impl FnMut(&mut dyn Writer, &K),
    mut write_value: impl FnMut(&mut dyn Writer, &V),
) {
    w.write_map_len(map.len());
    for (key, value) in map {
        write_key(w, key);
        write_value(w, value);
    }
}

/// Reads a map: entry-count header, then that many key/value pairs.
///
/// Wire entry order is irrelevant; duplicate keys keep the last value.
pub fn read_map<K: Ord, V>(
    d: &mut Decoder<'_>,
    mut read_key: impl FnMut(&mut Decoder<'_>) -> Result<K, MsgPackError>,
    mut read_value: impl FnMut(&mut Decoder<'_>) -> Result<V, MsgPackError>,
) -> Result<BTreeMap<K, V>, MsgPackError> {
    let entries = d.read_map_len()?;
    let mut map = BTreeMap::new();
    for _ in 0..entries {
        let key = read_key(d)?;
        let value = read_value(d)?;
        map.insert(key, value);
    }
    Ok(map)
}

/// Writes an array as an element-count header followed by the elements in
/// sequence order.
pub fn write_array<T>(
    w: &mut dyn Writer,
    items: &[T],
    mut write_item: impl FnMut(&mut dyn Writer, &T),
) {
    w.write_array_len(items.len());
    for item in items {
        write_item(w, item);
    }
}

/// Reads an array: element-count header, then that many elements in order.
pub fn read_array<T>(
    d: &mut Decoder<'_>,
    mut read_item: impl FnMut(&mut Decoder<'_>) -> Result<T, MsgPackError>,
) -> Result<Vec<T>, MsgPackError> {
    let items = d.read_array_len()?;
    let mut out = Vec::new();
    for _ in 0..items {
        out.push(read_item(d)?);
    }
    Ok(out)
}

/// Writes nil for `None`, otherwise delegates to the element writer.
pub fn write_nullable<T>(
    w: &mut dyn Writer,
    value: &Option<T>,
    write_item: impl FnOnce(&mut dyn Writer, &T),
) {
    match value {
        None => w.write_nil(),
        Some(item) => write_item(w, item),
    }
}

/// Consults the nil predicate, then yields `None` or delegates to the
/// element reader.
pub fn read_nullable<T>(
    d: &mut Decoder<'_>,
    read_item: impl FnOnce(&mut Decoder<'_>) -> Result<T, MsgPackError>,
) -> Result<Option<T>, MsgPackError> {
    if d.is_next_nil()? {
        Ok(None)
    } else {
        read_item(d).map(Some)
    }
}
