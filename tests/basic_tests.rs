use std::collections::HashMap;

use argpath::{Error, RawArgs, Size};

#[derive(Debug, Default, PartialEq)]
struct Offer {
    size: Size,
}
argpath::record!(Offer { size });

#[derive(Debug, Default, PartialEq)]
struct Create {
    name: String,
    tags: Vec<String>,
    offer: Offer,
}
argpath::record!(Create { name, tags, offer });

#[test]
fn end_to_end_create_request() -> anyhow::Result<()> {
    let create: Create =
        argpath::from_args(&["name=foo", "tags.0=prod", "tags.1=blue", "offer.size=10G"])?;
    assert_eq!(
        create,
        Create {
            name: "foo".into(),
            tags: vec!["prod".into(), "blue".into()],
            offer: Offer {
                size: Size::from_bytes(10_000_000_000),
            },
        }
    );
    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct Numbers {
    small: i8,
    medium: i32,
    big: i64,
    native: isize,
    byte: u8,
    word: u16,
    count: u32,
    total: u64,
    len: usize,
    ratio: f32,
    precise: f64,
    label: String,
    enabled: bool,
}
argpath::record!(Numbers {
    small,
    medium,
    big,
    native,
    byte,
    word,
    count,
    total,
    len,
    ratio,
    precise,
    label,
    enabled,
});

#[test]
fn every_scalar_kind() {
    let n: Numbers = argpath::from_args(&[
        "small=-8",
        "medium=0x10",
        "big=-9223372036854775808",
        "native=0b11",
        "byte=255",
        "word=0o777",
        "count=1_000",
        "total=18446744073709551615",
        "len=010",
        "ratio=0.5",
        "precise=1e-3",
        "label=hello world",
        "enabled=true",
    ])
    .unwrap();
    assert_eq!(n.small, -8);
    assert_eq!(n.medium, 16);
    assert_eq!(n.big, i64::MIN);
    assert_eq!(n.native, 3);
    assert_eq!(n.byte, 255);
    assert_eq!(n.word, 0o777);
    assert_eq!(n.count, 1000);
    assert_eq!(n.total, u64::MAX);
    assert_eq!(n.len, 8);
    assert_eq!(n.ratio, 0.5);
    assert_eq!(n.precise, 0.001);
    assert_eq!(n.label, "hello world");
    assert!(n.enabled);
}

#[test]
fn integer_overflow_is_a_value_error() {
    let err = argpath::from_args::<Numbers, _>(&["byte=256"]).unwrap_err();
    match err.innermost() {
        Error::CannotUnmarshalValue { value, type_name, .. } => {
            assert_eq!(value, "256");
            assert_eq!(*type_name, "u8");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn boolean_narrow_grammar() {
    let n: Numbers = argpath::from_args(&["enabled="]).unwrap();
    assert!(n.enabled);
    let n: Numbers = argpath::from_args(&["enabled"]).unwrap();
    assert!(n.enabled);
    let n: Numbers = argpath::from_args(&["enabled=false"]).unwrap();
    assert!(!n.enabled);

    for bad in ["TRUE", "True", "yes", "1"] {
        let arg = format!("enabled={bad}");
        let err = argpath::from_args::<Numbers, _>(&[arg.as_str()]).unwrap_err();
        assert!(
            matches!(err.innermost(), Error::CannotUnmarshalValue { .. }),
            "`{bad}` gave {err}"
        );
    }
}

#[test]
fn values_keep_equals_signs() {
    let n: Numbers = argpath::from_args(&["label=a=b=c"]).unwrap();
    assert_eq!(n.label, "a=b=c");
}

#[test]
fn names_are_converted_from_kebab_case() {
    #[derive(Debug, Default)]
    struct Server {
        commercial_type: String,
        enable_ipv6: bool,
        r#type: String,
    }
    argpath::record!(Server { commercial_type, enable_ipv6, r#type });

    let s: Server =
        argpath::from_args(&["commercial-type=DEV1-S", "enable-ipv6=false", "type=x"]).unwrap();
    assert_eq!(s.commercial_type, "DEV1-S");
    assert!(!s.enable_ipv6);
    assert_eq!(s.r#type, "x");

    let s: Server = argpath::from_args(&["Commercial-Type=GP1-XS"]).unwrap();
    assert_eq!(s.commercial_type, "GP1-XS");
}

#[derive(Debug, Default)]
struct Indirections {
    limit: Option<u32>,
    boxed: Box<Offer>,
    nested: Option<Box<Offer>>,
}
argpath::record!(Indirections { limit, boxed, nested });

#[test]
fn optional_and_boxed_values_are_allocated() {
    let v: Indirections = argpath::from_args(&[
        "limit=5",
        "boxed.size=1KiB",
        "nested.size=2KB",
    ])
    .unwrap();
    assert_eq!(v.limit, Some(5));
    assert_eq!(v.boxed.size, Size::from_bytes(1024));
    assert_eq!(v.nested.map(|o| o.size), Some(Size::from_bytes(2000)));

    let v: Indirections = argpath::from_args::<Indirections, &str>(&[]).unwrap();
    assert_eq!(v.limit, None);
    assert!(v.nested.is_none());
}

#[test]
fn existing_values_are_overwritten_in_place() {
    let mut create = Create {
        name: "old".into(),
        tags: vec!["a".into()],
        offer: Offer::default(),
    };
    argpath::unmarshal(&["name=new", "tags.0=b", "tags.1=c"], &mut create).unwrap();
    assert_eq!(create.name, "new");
    assert_eq!(create.tags, ["b", "c"]);
}

#[test]
fn raw_args_capture_everything() {
    let input = vec!["anything goes".to_string(), "a=1".into(), "a=1".into()];
    let mut raw = RawArgs::default();
    argpath::unmarshal(&input, &mut raw).unwrap();
    assert_eq!(raw.0, input);
}

#[test]
fn map_as_root_destination() {
    let labels: HashMap<String, String> =
        argpath::from_args(&["env=prod", "team=core"]).unwrap();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels["env"], "prod");
    assert_eq!(labels["team"], "core");
}

#[test]
fn first_error_aborts_and_reports_argument() {
    let err = argpath::from_args::<Create, _>(&["name=ok", "tags.3=x", "offer.size=1G"])
        .unwrap_err();
    assert_eq!(err.argument(), Some(("tags.3", "x")));
    assert_eq!(
        err.to_string(),
        "cannot unmarshal argument 'tags.3=x': missing indices, 3 is not a valid index, expected 0"
    );
}
