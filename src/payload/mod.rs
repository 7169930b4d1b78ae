//! JSON payload synthesis for sized request bodies.
//!
//! The synthesizer builds a structured body whose serialized UTF-8 length
//! lands within [`SIZE_TOLERANCE_BYTES`] of a requested target, so runs can
//! exercise a service with realistic, non-trivial payload shapes instead of a
//! single repeated blob.

use rand::Rng;
use rand::distributions::{Alphanumeric, DistString};
use serde_json::{Map, Value, json};


/// Serialized output lands within this many bytes of the target.
pub const SIZE_TOLERANCE_BYTES: usize = 16;

/// Targets below this are built as a single sized field.
const MIN_STRUCTURED_TARGET: usize = 64;
/// Byte overhead of the single-field envelope `{"d":""}`.
const COMPACT_ENVELOPE_BYTES: usize = 8;
/// Deficits above this grow the object with a random key/value pair; smaller
/// deficits extend the filler field so the final size lands on target.
const PAIR_GROWTH_THRESHOLD: usize = 48;
const GROWTH_KEY_LEN: usize = 8;
const GROWTH_VALUE_LEN: usize = 24;
const FILLER_KEY: &str = "filler";

/// Builds a JSON value whose serialized length approximates `target_bytes`.
///
/// Never fails; very small targets yield a degenerate single-field object.
#[must_use]
pub fn synthesize(target_bytes: usize) -> Value {
    synthesize_with(&mut rand::thread_rng(), target_bytes)
}

pub(crate) fn synthesize_with<R: Rng>(rng: &mut R, target_bytes: usize) -> Value {
    if target_bytes < MIN_STRUCTURED_TARGET {
        return compact_payload(target_bytes);
    }

    let mut map = Map::new();
    map.insert("test".to_owned(), Value::String("data".to_owned()));
    map.insert("number".to_owned(), Value::from(123));
    map.insert(FILLER_KEY.to_owned(), Value::String(String::new()));

    loop {
        let size = serialized_len(&map);
        if size >= target_bytes {
            break;
        }
        let deficit = target_bytes.saturating_sub(size);
        if deficit > PAIR_GROWTH_THRESHOLD {
            let key = Alphanumeric.sample_string(rng, GROWTH_KEY_LEN);
            let value = Alphanumeric.sample_string(rng, GROWTH_VALUE_LEN);
            map.insert(key, Value::String(value));
        } else if let Some(Value::String(filler)) = map.get_mut(FILLER_KEY) {
            filler.extend(std::iter::repeat('x').take(deficit));
        } else {
            break;
        }
    }

    let overshoot = serialized_len(&map).saturating_sub(target_bytes);
    if overshoot > 0
        && let Some(Value::String(filler)) = map.get_mut(FILLER_KEY)
    {
        if filler.len() >= overshoot {
            filler.truncate(filler.len().saturating_sub(overshoot));
        } else {
            filler.clear();
        }
    }

    Value::Object(map)
}

fn compact_payload(target_bytes: usize) -> Value {
    let fill = target_bytes.saturating_sub(COMPACT_ENVELOPE_BYTES);
    json!({ "d": "x".repeat(fill) })
}

fn serialized_len(map: &Map<String, Value>) -> usize {
    serde_json::to_string(map).map_or(0, |serialized| serialized.len())
}
