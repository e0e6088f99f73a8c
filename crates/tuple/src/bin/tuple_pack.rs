//! `tuple-pack` — encode a JSON array (stdin) as tuple bytes (stdout).
//!
//! Usage:
//!   tuple-pack --types <signature>
//!
//! The signature maps one character per tuple slot: `u` unsigned
//! integer, `i` signed integer, `s` string, `?` boolean, `f` double.
//! JSON `null` is accepted for every slot kind except strings.

use std::io::{self, Read, Write};

use ftjson_tuple::TupleWriter;
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
        die("usage: tuple-pack --types <signature>");
    }

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        die(&e.to_string());
    }
    let value: Value = match serde_json::from_str(input.trim()) {
        Ok(v) => v,
        Err(e) => die(&format!("invalid JSON: {e}")),
    };
    let items = match value.as_array() {
        Some(items) => items,
        None => die("expected a JSON array"),
    };
    if items.len() != types.len() {
        die(&format!(
            "signature names {} slots but the array has {} elements",
            types.len(),
            items.len()
        ));
    }

    let mut buf = vec![0u8; 64 + types.len() * 16 + input.len() * 2];
    let mut writer = TupleWriter::new(&mut buf, types.len());
    for (slot, (kind, item)) in types.chars().zip(items).enumerate() {
        let result = match kind {
            'u' => match item {
                Value::Null => writer.append_u64_nullable(None),
                v => match v.as_u64() {
                    Some(n) => writer.append_u64(n),
                    None => die(&format!("slot {slot}: expected an unsigned integer")),
                },
            },
            'i' => match item {
                Value::Null => writer.append_i64_nullable(None),
                v => match v.as_i64() {
                    Some(n) => writer.append_i64(n),
                    None => die(&format!("slot {slot}: expected an integer")),
                },
            },
            's' => match item.as_str() {
                Some(s) => writer.append_str(s),
                None => die(&format!("slot {slot}: expected a string")),
            },
            '?' => match item {
                Value::Null => writer.append_bool_nullable(None),
                v => match v.as_bool() {
                    Some(b) => writer.append_bool_nullable(Some(b)),
                    None => die(&format!("slot {slot}: expected a boolean")),
                },
            },
            'f' => match item {
                Value::Null => writer.append_f64_nullable(None),
                v => match v.as_f64() {
                    Some(f) => writer.append_f64_nullable(Some(f)),
                    None => die(&format!("slot {slot}: expected a number")),
                },
            },
            other => die(&format!("unknown signature character: {other}")),
        };
        if let Err(e) = result {
            die(&format!("slot {slot}: {e}"));
        }
    }
    let len = match writer.seal() {
        Ok(len) => len,
        Err(e) => die(&e.to_string()),
    };

    if let Err(e) = io::stdout().write_all(&buf[..len]) {
        die(&e.to_string());
    }
}
