use std::collections::{BTreeMap, HashMap};

use argpath::Error;

#[derive(Debug, Default, PartialEq)]
struct Rule {
    port: u16,
    action: String,
}
argpath::record!(Rule { port, action });

#[derive(Debug, Default)]
struct Group {
    labels: HashMap<String, String>,
    limits: BTreeMap<String, u32>,
    rules: HashMap<String, Rule>,
    lists: BTreeMap<String, Vec<String>>,
}
argpath::record!(Group { labels, limits, rules, lists });

#[test]
fn map_entries_are_created() {
    let g: Group = argpath::from_args(&["labels.env=prod", "labels.team=core", "limits.cpu=4"])
        .unwrap();
    assert_eq!(g.labels.len(), 2);
    assert_eq!(g.labels["env"], "prod");
    assert_eq!(g.limits.get("cpu"), Some(&4));
}

#[test]
fn keys_are_used_verbatim() {
    let g: Group = argpath::from_args(&["labels.Front-End=yes", "labels.0=zero"]).unwrap();
    assert_eq!(g.labels["Front-End"], "yes");
    assert_eq!(g.labels["0"], "zero");
}

#[test]
fn each_assignment_rebuilds_the_entry() {
    let g: Group = argpath::from_args(&["rules.ssh.port=22", "rules.ssh.action=accept"]).unwrap();
    assert_eq!(
        g.rules["ssh"],
        Rule {
            port: 0,
            action: "accept".into(),
        }
    );

    let mut g = Group::default();
    g.limits.insert("mem".into(), 1);
    argpath::unmarshal(&["limits.mem=2", "limits.disk=3"], &mut g).unwrap();
    assert_eq!(g.limits, BTreeMap::from([(String::from("disk"), 3), (String::from("mem"), 2)]));
}

#[test]
fn map_of_sequences_starts_each_entry_empty() {
    let g: Group = argpath::from_args(&["lists.dns.0=1.1.1.1", "lists.ntp.0=pool"]).unwrap();
    assert_eq!(g.lists["dns"], ["1.1.1.1"]);
    assert_eq!(g.lists["ntp"], ["pool"]);

    let err = argpath::from_args::<Group, _>(&["lists.dns.0=1.1.1.1", "lists.dns.1=8.8.8.8"])
        .expect_err("must fail");
    assert!(
        matches!(err.innermost(), Error::MissingIntermediateIndices { index: 1, len: 0 }),
        "got: {err}"
    );
}

#[test]
fn failed_entry_is_not_committed() {
    let err = argpath::from_args::<Group, _>(&["limits.cpu=many"]).expect_err("must fail");
    assert!(matches!(err.innermost(), Error::CannotUnmarshalValue { .. }), "got: {err}");

    let mut g = Group::default();
    let err = argpath::unmarshal(&["rules.web.nope=1"], &mut g).expect_err("must fail");
    assert!(matches!(err.innermost(), Error::UnknownField { name } if name == "nope"), "got: {err}");
    assert!(g.rules.is_empty());

    let mut g = Group::default();
    g.rules.insert(
        "web".into(),
        Rule {
            port: 80,
            action: "accept".into(),
        },
    );
    argpath::unmarshal(&["rules.web.port=http"], &mut g).expect_err("must fail");
    assert_eq!(g.rules["web"].port, 80);
    assert_eq!(g.rules["web"].action, "accept");
}

#[test]
fn missing_key_is_rejected() {
    let err = argpath::from_args::<Group, _>(&["labels=x"]).expect_err("must fail");
    assert!(matches!(err.innermost(), Error::MissingMapKey), "got: {err}");
    assert_eq!(err.to_string(), "cannot unmarshal argument 'labels=x': missing map key");
}

#[test]
fn record_path_must_name_a_field() {
    let err = argpath::from_args::<Group, _>(&["rules.ssh=x"]).expect_err("must fail");
    assert!(matches!(err.innermost(), Error::MissingStructField), "got: {err}");
}
