#![no_main]

use std::collections::{BTreeMap, HashMap};

use argpath::{IpNet, Payload, Size};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Default)]
struct Volume {
    name: String,
    size: Size,
}
argpath::record!(Volume { name, size });

#[derive(Debug, Default)]
struct Common {
    zone: String,
    name: Option<String>,
}
argpath::record!(Common { zone, name });

#[derive(Debug, Default)]
struct Doc {
    count: i64,
    ratio: f64,
    flag: bool,
    byte: u8,
    tags: Vec<String>,
    volumes: Vec<Volume>,
    labels: HashMap<String, String>,
    limits: BTreeMap<String, Vec<u32>>,
    subnet: IpNet,
    data: Payload,
    nested: Option<Box<Volume>>,
    common: Common,
}
argpath::record!(Doc {
    count, ratio, flag, byte, tags, volumes, labels, limits, subnet, data, nested;
    embedded common
});

// Each input line is one raw argument. Whatever the input, unmarshaling must return instead of
// panicking, and a successful call must never leave a sequence with more elements than lines.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let args: Vec<&str> = text.lines().take(64).collect();
    if let Ok(doc) = argpath::from_args::<Doc, _>(&args) {
        assert!(doc.tags.len() <= args.len());
        assert!(doc.volumes.len() <= args.len());
    }
});
