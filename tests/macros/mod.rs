use std::cell::Cell;

use outcome_rail::{annotate, function_ref, label, meta, unwrap_chain, Metadata, Outcome, Value};

#[test]
fn meta_builds_ordered_metadata() {
    let m = meta! { "b" => 1, "a" => "two", "b" => 3 };
    let keys: Vec<_> = m.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["b", "a"]);
    assert_eq!(m.get("b"), Some(&Value::Int(3)));
    assert_eq!(meta! {}, Metadata::new());
}

#[test]
fn annotate_macro_without_label_adds_an_empty_frame() {
    let wrapped = annotate!(Outcome::<(), &str>::FailureWith("x"));
    let (frames, _) = unwrap_chain(wrapped.into_reason().unwrap());
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].label(), None);
}

#[test]
fn annotate_macro_with_metadata_records_the_invocation_site() {
    let failed: Outcome<(), &str> = Outcome::FailureWith("db_timeout");
    let (wrapped, line) = (annotate!(failed, "fetching user", "user_id" => 123, "shard" => 2), line!());

    let (frames, _) = unwrap_chain(wrapped.into_reason().unwrap());
    assert_eq!(frames[0].label(), Some("fetching user"));
    assert_eq!(frames[0].metadata().to_string(), "{user_id: 123, shard: 2}");
    assert_eq!(frames[0].call_site().map(|site| site.file.as_str()), Some(file!()));
    assert_eq!(frames[0].call_site().and_then(|site| site.line), Some(line));
}

#[test]
fn annotate_macro_skips_evaluation_on_success() {
    let evaluated = Cell::new(false);
    let expensive = || {
        evaluated.set(true);
        "expensive"
    };
    let ok: Outcome<u8, &str> = Outcome::SuccessWith(1);
    assert_eq!(annotate!(ok, expensive(), "k" => 1), Outcome::SuccessWith(1));
    assert!(!evaluated.get());

    let failed: Outcome<u8, &str> = Outcome::Failure;
    assert!(annotate!(failed, expensive(), "k" => 1).is_failure());
    assert!(evaluated.get());
}

#[test]
fn label_formats_only_for_failures() {
    let formatted = Cell::new(0);
    let counter = Counted(&formatted);

    let ok: Outcome<u8, &str> = Outcome::SuccessWith(1);
    let _ = annotate(ok, label!("loading {}", counter));
    assert_eq!(formatted.get(), 0);

    let failed: Outcome<u8, &str> = Outcome::FailureWith("x");
    let wrapped = annotate(failed, label!("loading {}", counter));
    assert_eq!(formatted.get(), 1);
    let (frames, _) = unwrap_chain(wrapped.into_reason().unwrap());
    assert_eq!(frames[0].label(), Some("loading profile"));
}

#[derive(Clone, Copy)]
struct Counted<'a>(&'a Cell<u32>);

impl std::fmt::Display for Counted<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.set(self.0.get() + 1);
        f.write_str("profile")
    }
}

#[test]
fn function_ref_forms() {
    assert_eq!(function_ref!("Jobs", "retry", 1).to_string(), "&Jobs.retry/1");

    let (anonymous, line) = (function_ref!(0), line!());
    assert_eq!(anonymous.file.as_deref(), Some(file!()));
    assert_eq!(anonymous.line, Some(line));
    assert_eq!(anonymous.to_string(), format!("#Function<{}:{}/0>", file!(), line));
}
