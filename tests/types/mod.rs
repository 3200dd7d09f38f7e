use outcome_rail::callsite::{CapturedStack, StackFrame};
use outcome_rail::{
    validate, ChainFormat, ContextFrame, Metadata, Outcome, OutcomeError, Raised, Reason,
    ShapeMode, Value, WrappedFailure,
};

mod value;

fn frame(label: &str) -> ContextFrame {
    ContextFrame::new(Some(label.to_string()), Metadata::new(), CapturedStack::default())
}

#[test]
fn strict_validation_accepts_only_canonical_shapes() {
    let ok = Value::atom("ok");
    let ok_with = Value::tuple([Value::atom("ok"), Value::from(1)]);
    let error = Value::atom("error");
    let error_with = Value::tuple([Value::atom("error"), Value::from("boom")]);

    assert_eq!(validate(ok, ShapeMode::Strict), Ok(Outcome::Success));
    assert_eq!(validate(ok_with, ShapeMode::Strict), Ok(Outcome::SuccessWith(Value::Int(1))));
    assert_eq!(validate(error, ShapeMode::Strict), Ok(Outcome::Failure));
    assert_eq!(
        validate(error_with, ShapeMode::Strict),
        Ok(Outcome::FailureWith(Value::from("boom")))
    );
}

#[test]
fn strict_validation_rejects_other_values() {
    let triple = Value::tuple([Value::atom("ok"), Value::from(1), Value::from(2)]);
    let err = validate(triple, ShapeMode::Strict).unwrap_err();
    assert!(matches!(err, OutcomeError::InvalidOutcomeShape { mode: ShapeMode::Strict, .. }));

    assert!(validate(Value::from(42), ShapeMode::Strict).is_err());
    assert!(validate(Value::atom("maybe"), ShapeMode::Strict).is_err());
    assert!(validate(Value::tuple([Value::atom("ok")]), ShapeMode::Strict).is_err());
}

#[test]
fn loose_validation_accepts_longer_tagged_tuples() {
    let triple = Value::tuple([Value::atom("error"), Value::atom("http"), Value::from(503)]);
    let outcome = validate(triple, ShapeMode::Loose).unwrap();
    assert_eq!(
        outcome,
        Outcome::FailureWith(Value::tuple([Value::atom("http"), Value::from(503)]))
    );

    let bare = validate(Value::tuple([Value::atom("ok")]), ShapeMode::Loose).unwrap();
    assert_eq!(bare, Outcome::Success);

    assert!(validate(Value::from("ok"), ShapeMode::Loose).is_err());
}

#[test]
fn outcome_error_messages_name_the_problem() {
    let shape = validate(Value::from(3), ShapeMode::Strict).unwrap_err();
    assert_eq!(shape.to_string(), "expected an outcome (Strict mode), found 3");
}

#[test]
fn outcome_round_trips_through_tagged_values() {
    let outcome: Outcome<Value, Value> = Outcome::FailureWith(Value::atom("enoent"));
    let tagged = outcome.to_value();
    assert_eq!(tagged.to_string(), "{:error, :enoent}");
    assert_eq!(Outcome::from_value(tagged, ShapeMode::Strict), Ok(outcome));
}

#[test]
fn outcome_conversions_use_none_for_bare_shapes() {
    assert_eq!(Outcome::<u8, &str>::Success.into_result(), Ok(None));
    assert_eq!(Outcome::<u8, &str>::SuccessWith(3).into_result(), Ok(Some(3)));
    assert_eq!(Outcome::<u8, &str>::Failure.into_result(), Err(None));
    assert_eq!(Outcome::<u8, &str>::FailureWith("x").into_result(), Err(Some("x")));

    assert_eq!(Outcome::<u8, &str>::from(Ok(1)), Outcome::SuccessWith(1));
    assert_eq!(Outcome::<u8, &str>::from(Err("x")), Outcome::FailureWith("x"));
    assert_eq!(Outcome::<u8, &str>::from(None), Outcome::Failure);
}

#[test]
fn outcome_map_only_touches_its_side() {
    let ok: Outcome<u8, &str> = Outcome::SuccessWith(2);
    assert_eq!(ok.clone().map(|v| v * 10), Outcome::SuccessWith(20));
    assert_eq!(ok.map_reason(str::len), Outcome::SuccessWith(2));

    let failed: Outcome<u8, &str> = Outcome::FailureWith("four");
    assert!(failed.is_failure());
    assert_eq!(failed.reason(), Some(&"four"));
    assert_eq!(failed.value(), None);
    assert_eq!(failed.clone().map(|v| v * 10), Outcome::FailureWith("four"));
    assert_eq!(failed.map_reason(str::len), Outcome::FailureWith(4));
}

#[test]
fn reason_from_value_classifies_payloads() {
    assert_eq!(Reason::from(Value::from("text")), Reason::message("text"));
    assert_eq!(Reason::from(Value::atom("db_timeout")), Reason::tag("db_timeout"));
    assert_eq!(Reason::from(Value::Null), Reason::Unspecified);
    assert_eq!(Reason::from(Value::from(7)), Reason::data(7));

    let exception = Value::exception("IoError", "closed", [("fd", 3)]);
    let reason = Reason::from(exception);
    assert!(reason.is_raised());
    assert_eq!(reason.derived_message(), "closed");
}

#[test]
fn raised_from_panic_keeps_string_payloads() {
    let payload = std::panic::catch_unwind(|| panic!("exploded {}", 42)).unwrap_err();
    let raised = Raised::from_panic(payload);
    assert_eq!(raised.type_name(), "panic");
    assert_eq!(raised.message(), "exploded 42");
    assert_eq!(raised.to_string(), "panic: exploded 42");
}

#[test]
fn raised_from_error_uses_short_type_name() {
    let err = "x".parse::<u32>().unwrap_err();
    let raised = Raised::from_error(&err).with_field("input", "x");
    assert_eq!(raised.type_name(), "ParseIntError");
    assert_eq!(raised.message(), err.to_string());
    assert_eq!(raised.to_value().get("input"), Some(&Value::from("x")));
}

#[test]
fn raised_type_names_shorten_every_path() {
    #[derive(Debug)]
    struct Rejected<T>(T);

    impl<T: std::fmt::Debug> std::fmt::Display for Rejected<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "rejected {:?}", self.0)
        }
    }

    impl<T: std::fmt::Debug> std::error::Error for Rejected<T> {}

    let pair = Rejected((String::from("sku"), 3i32));
    assert_eq!(Raised::from_error(&pair).type_name(), "Rejected<(String, i32)>");

    let err = "x".parse::<u8>().unwrap_err();
    assert_eq!(Raised::from_error(&&err).type_name(), "&ParseIntError");
    assert_eq!(Value::from_error(&&err).to_string(), r#"&ParseIntError("invalid digit found in string")"#);
}

#[test]
fn wrapped_failure_splits_into_ordered_frames() {
    let chain = WrappedFailure::from_parts(
        vec![frame("outer"), frame("middle"), frame("inner")],
        Reason::message("root"),
    )
    .unwrap();

    assert_eq!(chain.depth(), 3);
    assert_eq!(chain.terminal(), &Reason::message("root"));
    assert!(matches!(chain.cause(), Reason::Wrapped(_)));

    let (frames, terminal) = chain.into_parts();
    let labels: Vec<_> = frames.iter().filter_map(ContextFrame::label).collect();
    assert_eq!(labels, ["outer", "middle", "inner"]);
    assert_eq!(terminal, Reason::message("root"));
}

#[test]
fn wrapped_failure_from_parts_requires_a_frame() {
    assert!(WrappedFailure::from_parts(Vec::new(), Reason::message("root")).is_none());
}

#[test]
fn render_message_lists_terminal_then_frames() {
    let located = ContextFrame::new(
        Some("fetching user".into()),
        Metadata::new().with("user_id", 123),
        CapturedStack::from_frames(vec![StackFrame::new(
            "app::users::fetch",
            Some("src/users.rs"),
            Some(9),
        )]),
    );
    let bare = ContextFrame::default();
    let chain = WrappedFailure::new(
        located,
        Reason::from(WrappedFailure::new(bare, Reason::message("db_timeout"))),
    );

    assert_eq!(
        chain.render_message(),
        "db_timeout\n[CONTEXT] src/users.rs:9: fetching user {user_id: 123}\n[CONTEXT]"
    );
    assert_eq!(
        chain.render_with(&ChainFormat::labels_only(), None),
        "db_timeout\n[CONTEXT] fetching user\n[CONTEXT]"
    );
    assert_eq!(chain.to_string(), chain.render_message());
}

#[test]
fn deep_chains_clone_compare_and_drop_without_recursion() {
    let mut reason = Reason::message("root");
    for _ in 0..100_000 {
        reason = Reason::from(WrappedFailure::new(ContextFrame::default(), reason));
    }

    let chain = reason.as_wrapped().unwrap();
    assert_eq!(chain.depth(), 100_000);
    assert_eq!(chain.terminal(), &Reason::message("root"));

    let copy = reason.clone();
    assert!(copy == reason);
    drop(copy);

    let (frames, terminal) = reason.into_parts();
    assert_eq!(frames.len(), 100_000);
    assert_eq!(terminal, Reason::message("root"));
}

#[test]
fn metadata_preserves_insertion_order_and_replaces_in_place() {
    let mut metadata = Metadata::new().with("b", 1).with("a", 2);
    metadata.insert("b", 3);

    let keys: Vec<_> = metadata.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["b", "a"]);
    assert_eq!(metadata.get("b"), Some(&Value::Int(3)));
    assert_eq!(metadata.to_string(), "{b: 3, a: 2}");
    assert_eq!(metadata.to_value(), Value::map([("b", 3), ("a", 2)]));
}
