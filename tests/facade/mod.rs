use outcome_rail::config::{DiagnosticAdapter, DiagnosticConfig};
use outcome_rail::facade::{
    correlation_code, Diagnostics, RecordingSink, Severity, CODE_LENGTH, GENERIC_MESSAGE,
};
use outcome_rail::{annotate, meta, LogMode, Outcome, Raised, Reason, Value};

fn diagnostics(sink: &RecordingSink) -> Diagnostics<&RecordingSink> {
    Diagnostics::new(DiagnosticConfig::default(), sink)
}

fn code_of(message: &str) -> &str {
    message.strip_prefix(GENERIC_MESSAGE).expect("generic message").split(' ').next().unwrap()
}

fn is_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[test]
fn logging_a_success_in_errors_only_mode_emits_nothing() {
    let sink = RecordingSink::new();
    let out = diagnostics(&sink).log(Outcome::<u32, &str>::SuccessWith(42), LogMode::ErrorsOnly);
    assert_eq!(out, Outcome::SuccessWith(42));
    assert!(sink.is_empty());
}

#[test]
fn logging_a_failure_emits_one_problem() {
    let sink = RecordingSink::new();
    let out = diagnostics(&sink).log(Outcome::<u32, &str>::FailureWith("x"), LogMode::ErrorsOnly);
    assert_eq!(out, Outcome::FailureWith("x"));

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Problem);
    assert!(entries[0].message.ends_with("failure: x"));
    assert_eq!(entries[0].metadata.get("kind"), Some(&Value::atom("failure")));
    assert_eq!(entries[0].metadata.get("details"), Some(&Value::from("x")));
}

#[test]
fn logging_records_the_caller_as_call_site() {
    let sink = RecordingSink::new();
    let facade = diagnostics(&sink);
    let (_, line) = (facade.log(Outcome::<(), &str>::Failure, LogMode::ErrorsOnly), line!());

    let expected = format!("{}:{}", file!(), line);
    let entry = &sink.entries()[0];
    assert_eq!(entry.metadata.get("call_site"), Some(&Value::from(expected.as_str())));
    assert!(entry.message.starts_with(&format!("[{}] failure", expected)));
}

#[test]
fn all_mode_logs_successes_as_info() {
    let sink = RecordingSink::new();
    let facade = diagnostics(&sink);
    let _ = facade.log(Outcome::<u32, &str>::SuccessWith(42), LogMode::All);
    let _ = facade.log(Outcome::<u32, &str>::Success, LogMode::All);

    let entries = sink.take();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.severity == Severity::Info));
    assert!(entries[0].message.ends_with("success: 42"));
    assert_eq!(entries[1].metadata.get("kind"), Some(&Value::atom("success")));
    assert!(sink.is_empty());
}

#[test]
fn raised_failures_are_logged_with_their_own_kind() {
    let sink = RecordingSink::new();
    let reason = Reason::from(Raised::new("Timeout", "took 5s"));
    let _ = diagnostics(&sink).log(Outcome::<(), Reason>::FailureWith(reason), LogMode::ErrorsOnly);

    let entry = &sink.entries()[0];
    assert_eq!(entry.metadata.get("kind"), Some(&Value::atom("raised")));
    assert!(entry.message.ends_with(r#"raised: Timeout("took 5s")"#));
}

#[test]
fn logged_details_are_shrunk() {
    let sink = RecordingSink::new();
    let user = Value::map([("id", Value::from(1)), ("password", Value::from("hunter2"))]);
    let _ = diagnostics(&sink).log(Outcome::<(), Value>::FailureWith(user), LogMode::ErrorsOnly);

    let entry = &sink.entries()[0];
    assert_eq!(entry.metadata.get("details"), Some(&Value::map([("id", 1)])));
    assert!(!entry.message.contains("hunter2"));
}

#[test]
fn annotated_failures_are_shrunk_before_rendering() {
    let sink = RecordingSink::new();
    let facade = diagnostics(&sink);
    let user = Value::map([("id", Value::from(1)), ("password", Value::from("hunter2"))]);
    let failed: Outcome<(), Reason> = Outcome::FailureWith(Reason::data(user.clone()));
    let wrapped = annotate(failed, ("loading", meta! { "user" => user }));

    let wrapped = facade.log(wrapped, LogMode::ErrorsOnly);
    let message = facade.user_message(wrapped.reason().unwrap());
    assert!(message.starts_with(GENERIC_MESSAGE));
    assert!(message.ends_with(" [loading]"));

    let entries = sink.entries();
    assert_eq!(entries.len(), 2);
    for entry in &entries {
        let details = entry.metadata.get("details").unwrap().to_text();
        assert!(details.starts_with("{id: 1}\n[CONTEXT] "));
        assert!(details.ends_with(": loading {user: {id: 1}}"));
        assert!(!details.contains("hunter2"));
        assert!(!entry.message.contains("hunter2"));
    }
}

#[test]
fn json_adapter_encodes_details_as_text() {
    let sink = RecordingSink::new();
    let facade = Diagnostics::new(DiagnosticConfig::json(), &sink);
    assert_eq!(facade.config().adapter, DiagnosticAdapter::Json);

    let user = Value::record("User", [("id", 7)]);
    let _ = facade.log(Outcome::<(), Value>::FailureWith(user), LogMode::ErrorsOnly);
    let entry = &sink.entries()[0];
    assert_eq!(entry.metadata.get("details"), Some(&Value::from(r#"{"__type__":"User","id":7}"#)));
}

#[test]
fn log_value_validates_and_returns_the_original() {
    let sink = RecordingSink::new();
    let facade = diagnostics(&sink);

    let tagged = Value::tuple([Value::atom("error"), Value::from("disk full")]);
    assert_eq!(facade.log_value(tagged.clone(), LogMode::ErrorsOnly), Ok(tagged));
    assert_eq!(sink.len(), 1);

    assert!(facade.log_value(Value::from(3), LogMode::All).is_err());
    assert_eq!(sink.len(), 1);
}

#[test]
fn plain_messages_are_returned_verbatim() {
    let sink = RecordingSink::new();
    let message = diagnostics(&sink).user_message(&Reason::message("Your card was declined."));
    assert_eq!(message, "Your card was declined.");
    assert!(sink.is_empty());
}

#[test]
fn opaque_reasons_get_a_correlation_code() {
    let sink = RecordingSink::new();
    let opaque = Reason::from(Raised::new("DbError", "connection reset by 10.0.0.7"));
    let message = diagnostics(&sink).user_message(&opaque);

    let code = code_of(&message);
    assert!(is_code(code), "unexpected code {:?}", code);
    assert_eq!(message, format!("{}{}", GENERIC_MESSAGE, code));

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Problem);
    assert!(entries[0].message.contains(code));
    assert!(entries[0].message.contains("connection reset"));
    assert_eq!(entries[0].metadata.get("code"), Some(&Value::from(code)));
    assert_eq!(entries[0].metadata.get("kind"), Some(&Value::atom("raised")));
}

#[test]
fn tags_data_and_bare_failures_are_opaque() {
    let sink = RecordingSink::new();
    let facade = diagnostics(&sink);
    for reason in [Reason::tag("db_timeout"), Reason::data(503), Reason::Unspecified] {
        assert!(facade.user_message(&reason).starts_with(GENERIC_MESSAGE));
    }
    assert_eq!(sink.len(), 3);
}

#[test]
fn each_opaque_message_gets_a_fresh_code() {
    let sink = RecordingSink::new();
    let facade = diagnostics(&sink);
    let reason = Reason::tag("db_timeout");
    let first = facade.user_message(&reason);
    let second = facade.user_message(&reason);
    assert_ne!(code_of(&first), code_of(&second));
}

#[test]
fn annotated_messages_list_labels_outermost_first() {
    let sink = RecordingSink::new();
    let failed: Outcome<(), &str> = Outcome::FailureWith("card declined");
    let wrapped = annotate(
        annotate(failed, ("charging card", meta! { "card_last4" => "4242" })),
        "checkout",
    );

    let message = diagnostics(&sink).user_message(wrapped.reason().unwrap());
    assert_eq!(message, "card declined [checkout > charging card]");
    assert!(!message.contains("4242"));
    assert!(sink.is_empty());
}

#[test]
fn unlabeled_frames_are_skipped() {
    let sink = RecordingSink::new();
    let failed: Outcome<(), &str> = Outcome::FailureWith("out of stock");
    let wrapped = annotate(annotate(failed, meta! { "sku" => "A1" }), ());
    assert_eq!(diagnostics(&sink).user_message(wrapped.reason().unwrap()), "out of stock");

    let failed: Outcome<(), &str> = Outcome::FailureWith("out of stock");
    let wrapped = annotate(annotate(failed, "reserving"), ());
    assert_eq!(diagnostics(&sink).user_message(wrapped.reason().unwrap()), "out of stock [reserving]");
}

#[test]
fn annotated_opaque_reasons_keep_the_label_trail() {
    let sink = RecordingSink::new();
    let failed: Outcome<(), Reason> = Outcome::FailureWith(Reason::tag("db_timeout"));
    let wrapped = annotate(annotate(failed, "querying"), "loading profile");

    let message = diagnostics(&sink).user_message(wrapped.reason().unwrap());
    assert!(message.starts_with(GENERIC_MESSAGE));
    assert!(message.ends_with(" [loading profile > querying]"));
    assert!(is_code(code_of(&message)));

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].message.contains("db_timeout"));
}

#[test]
fn correlation_codes_are_uppercase_alphanumeric() {
    for _ in 0..32 {
        assert!(is_code(&correlation_code()));
    }
}
