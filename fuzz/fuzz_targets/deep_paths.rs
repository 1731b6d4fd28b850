#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;

#[derive(Debug, Default)]
struct Node {
    value: String,
    children: Vec<Node>,
    named: HashMap<String, Node>,
}
argpath::record!(Node { value, children, named });

// Builds long dotted names from the input bytes to exercise recursion through sequences and maps
// under a tight depth limit.
fuzz_target!(|data: &[u8]| {
    let mut name = String::from("children");
    for &b in data.iter().take(256) {
        let segment = match b % 4 {
            0 => "children.0".to_owned(),
            1 => format!("named.k{}", b / 4),
            2 => "value".to_owned(),
            _ => format!("children.{}", b / 64),
        };
        name.push('.');
        name.push_str(&segment);
    }
    let arg = format!("{name}=x");
    let options = argpath::options! { max_path_depth: 48 };
    let _ = argpath::from_args_with_options::<Node, _>(&[arg.as_str()], options);
});
