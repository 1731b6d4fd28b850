use std::error::Error as _;

use argpath::Error;

#[derive(Debug, Default)]
struct Args {
    id: String,
    name: String,
    tags: Vec<String>,
    count: u8,
}
argpath::record!(Args { id, name, tags, count });

#[test]
fn invalid_names_are_rejected() {
    for arg in ["=x", "0=x", "-a=x", "a..b=x", "a.=x", "a_b=x", "spaced name=x"] {
        let err = argpath::from_args::<Args, _>(&[arg]).expect_err("must fail");
        assert!(
            matches!(err.innermost(), Error::InvalidArgumentName { .. }),
            "expected invalid name for `{arg}`, got: {err}"
        );
    }
}

#[test]
fn uuid_name_gets_a_hint() {
    let id = "11111111-1111-1111-1111-111111111111";
    let err = argpath::from_args::<Args, _>(&[id]).expect_err("must fail");
    assert!(matches!(err.innermost(), Error::UnknownArgumentName { name } if name == id));
    let rendered = err.to_string();
    assert!(rendered.contains(&format!("id={id}")), "got: {rendered}");

    let id = "abcdef12-3456-7890-abcd-ef1234567890";
    let err = argpath::from_args::<Args, _>(&[id]).expect_err("must fail");
    assert!(
        matches!(err.innermost(), Error::UnknownArgumentName { name } if name == id),
        "got: {err}"
    );
}

#[test]
fn duplicates_are_rejected_even_with_equal_values() {
    let err = argpath::from_args::<Args, _>(&["name=a", "name=a"]).expect_err("must fail");
    assert!(matches!(err.innermost(), Error::DuplicateArgumentName { name } if name == "name"));

    let err = argpath::from_args::<Args, _>(&["tags.0=a", "name=b", "tags.0=c"])
        .expect_err("must fail");
    assert_eq!(err.argument(), Some(("tags.0", "c")));
    assert_eq!(
        err.to_string(),
        "cannot unmarshal argument 'tags.0=c': duplicate argument 'tags.0'"
    );
}

#[test]
fn duplicates_are_detected_regardless_of_case() {
    for second in ["NAME=b", "Name=b"] {
        let mut args = Args::default();
        let err = argpath::unmarshal(&["name=a", second], &mut args).expect_err("must fail");
        assert!(
            matches!(err.innermost(), Error::DuplicateArgumentName { .. }),
            "expected duplicate for `{second}`, got: {err}"
        );
        assert_eq!(args.name, "a");
    }
}

#[test]
fn scalar_root_is_rejected() {
    let mut n = 0u32;
    let err = argpath::unmarshal(&["a=1"], &mut n).expect_err("must fail");
    assert!(matches!(err, Error::DestinationNotPointerToStructOrMap { type_name: "u32" }));
    assert!(err.argument().is_none());

    let mut list: Vec<String> = Vec::new();
    let err = argpath::unmarshal(&["0=a"], &mut list).expect_err("must fail");
    assert!(matches!(err, Error::DestinationNotPointerToStructOrMap { .. }));
}

#[test]
fn limits_are_enforced() {
    let options = argpath::options! { max_path_depth: 2 };
    let err = argpath::from_args_with_options::<Args, _>(&["tags.0.x=1"], options)
        .expect_err("must fail");
    assert!(matches!(err.innermost(), Error::PathTooDeep { depth: 3, max: 2 }), "got: {err}");

    let options = argpath::options! { max_arguments: 1 };
    let err = argpath::from_args_with_options::<Args, _>(&["name=a", "id=b"], options)
        .expect_err("must fail");
    assert!(matches!(err, Error::TooManyArguments { count: 2, max: 1 }), "got: {err}");
}

#[test]
fn wrapper_exposes_cause_chain() {
    let err = argpath::from_args::<Args, _>(&["count=300"]).expect_err("must fail");
    assert_eq!(err.argument(), Some(("count", "300")));

    let inner = err.source().expect("argument wrapper has a source");
    assert!(inner.to_string().starts_with("cannot unmarshal '300' into u8"));
    let scalar = inner.source().expect("value error has a source");
    assert_eq!(scalar.to_string(), "value out of range for u8");
}

#[test]
fn earlier_arguments_stay_applied_after_failure() {
    let mut args = Args::default();
    let err = argpath::unmarshal(&["name=kept", "count=x", "id=never"], &mut args)
        .expect_err("must fail");
    assert_eq!(err.argument(), Some(("count", "x")));
    assert_eq!(args.name, "kept");
    assert_eq!(args.id, "");
}
