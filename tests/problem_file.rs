use slotpick::assign::{AssignOptions, assign};
use slotpick::model::{DEFAULT_SLOTS, Slot};
use slotpick::problem::{parse_items_str, parse_problem_str};

const PROBLEM: &str = r#"{
  "slots": 3,
  "items": [
    { "id": 1001, "name": "I play Carcassonne", "owners": 812 },
    { "id": "1002", "name": "Meeple lover" },
    { "id": 1003 },
    { "id": 1004 }
  ],
  "forbidden": [
    { "item": 1001, "slot": 1 },
    { "item": "1002", "slot": 3 }
  ]
}"#;

#[test]
fn numeric_and_text_ids_are_unified() {
    let file = parse_problem_str(PROBLEM).expect("parse");
    assert_eq!(file.items[0].id, "1001");
    assert_eq!(file.items[1].id, "1002");
    assert_eq!(file.items[0].extra.get("owners").and_then(|v| v.as_u64()), Some(812));
    assert_eq!(file.items[2].name, None);

    let problem = file.into_problem(None).expect("problem");
    assert_eq!(problem.slots, 3);
    assert!(problem.forbidden.is_forbidden(&"1001".to_string(), Slot::new(1)));
    assert!(problem.forbidden.is_allowed(&"1001".to_string(), Slot::new(2)));
}

#[test]
fn file_problem_assigns() {
    let problem = parse_problem_str(PROBLEM)
        .expect("parse")
        .into_problem(None)
        .expect("problem");
    for seed in 0..10 {
        let opts = AssignOptions {
            seed: Some(seed),
            ..AssignOptions::default()
        };
        let out = assign(&problem.catalog, &problem.forbidden, problem.slots, &opts).expect("assign");
        out.assignment
            .verify(&problem.catalog, &problem.forbidden, problem.slots)
            .expect("verify");
    }
}

#[test]
fn slot_count_resolution() {
    let file = parse_problem_str(r#"{ "items": [ { "id": "x" } ] }"#).expect("parse");
    assert_eq!(file.clone().into_problem(None).expect("problem").slots, DEFAULT_SLOTS);
    assert_eq!(file.into_problem(Some(1)).expect("problem").slots, 1);
}

#[test]
fn out_of_range_slot_is_rejected() {
    let err = match parse_problem_str(PROBLEM).expect("parse").into_problem(Some(2)) {
        Ok(_) => panic!("expected slot range error"),
        Err(e) => e.to_string(),
    };
    assert!(err.contains("outside 1..=2"));
}

#[test]
fn duplicate_ids_are_rejected() {
    let file = parse_problem_str(r#"{ "items": [ { "id": 7 }, { "id": "7" } ] }"#).expect("parse");
    let err = match file.into_problem(Some(1)) {
        Ok(_) => panic!("expected duplicate error"),
        Err(e) => e.to_string(),
    };
    assert!(err.contains("duplicate"));
}

#[test]
fn items_from_array_or_problem() {
    let arr = parse_items_str(r#"[ { "id": 1 }, { "id": 2, "name": "two" } ]"#).expect("array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[1].name.as_deref(), Some("two"));

    let from_problem = parse_items_str(PROBLEM).expect("problem");
    assert_eq!(from_problem.len(), 4);

    assert!(parse_items_str("{ \"nope\": 1 }").is_err());
}
