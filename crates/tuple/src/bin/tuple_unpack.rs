//! `tuple-unpack` — decode tuple bytes (stdin) into a JSON array (stdout).
//!
//! Usage:
//!   tuple-unpack --types <signature>
//!
//! The signature must match the one the tuple was packed with; see
//! `tuple-pack`. Input is treated as untrusted and read through the
//! validating reader.

use std::io::{self, Read};

use ftjson_tuple::SafeTupleReader;
use serde_json::Value;

fn die(msg: &str) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut types = String::new();
    let mut i = 1;
    while i < args.len() {
        if args[i].as_str() == "--types" {
            i += 1;
            if let Some(t) = args.get(i) {
                types = t.clone();
            }
        }
        i += 1;
    }
    if types.is_empty() {
        die("usage: tuple-unpack --types <signature>");
    }

    let mut input = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut input) {
        die(&e.to_string());
    }

    let reader = match SafeTupleReader::new(&input, types.len()) {
        Ok(reader) => reader,
        Err(e) => die(&format!("malformed tuple: {e}")),
    };

    let mut items = Vec::with_capacity(types.len());
    for (slot, kind) in types.chars().enumerate() {
        let item = match kind {
            'u' => reader
                .get_u64_nullable(slot)
                .map(|v| v.map_or(Value::Null, Value::from)),
            'i' => reader
                .get_i64_nullable(slot)
                .map(|v| v.map_or(Value::Null, Value::from)),
            's' => reader.get_str(slot).map(Value::from),
            '?' => reader
                .get_bool_nullable(slot)
                .map(|v| v.map_or(Value::Null, Value::from)),
            'f' => reader
                .get_f64_nullable(slot)
                .map(|v| v.map_or(Value::Null, Value::from)),
            other => die(&format!("unknown signature character: {other}")),
        };
        match item {
            Ok(item) => items.push(item),
            Err(e) => die(&format!("slot {slot}: {e}")),
        }
    }

    println!("{}", Value::Array(items));
}
