use outcome_rail::callsite::{parse_backtrace, CallSite, CapturedStack, Resolver, StackFrame};

const BACKTRACE: &str = "\
   0: std::backtrace::Backtrace::capture
             at /rustc/abc/library/std/src/backtrace.rs:296:13
   1: outcome_rail::callsite::CapturedStack::capture
             at ./src/callsite/mod.rs:121:38
   2: billing::invoice::send
             at ./src/invoice.rs:12:9
   3: billing_worker::main
             at ./src/main.rs:4:5
   4: core::ops::function::FnOnce::call_once
             at /rustc/abc/library/core/src/ops/function.rs:250:5
";

fn frame(symbol: &str, file: &str, line: u32) -> StackFrame {
    StackFrame::new(symbol, Some(file), Some(line))
}

#[test]
fn parse_backtrace_reads_symbols_and_locations() {
    let frames = parse_backtrace(BACKTRACE);
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[2].symbol, "billing::invoice::send");
    assert_eq!(frames[2].file.as_deref(), Some("./src/invoice.rs"));
    assert_eq!(frames[2].line, Some(12));
    assert!(frames[0].is_internal());
    assert!(frames[1].is_internal());
    assert!(!frames[2].is_internal());
}

#[test]
fn parse_backtrace_tolerates_unsymbolized_frames() {
    let frames = parse_backtrace("   0: <unknown>\n   1: main\n             at src/main.rs:3\n");
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].file, None);
    assert_eq!(frames[1].call_site(), Some(CallSite::new("src/main.rs", Some(3))));
}

#[test]
fn resolver_prefers_the_owning_component() {
    let stack = CapturedStack::from_frames(parse_backtrace(BACKTRACE))
        .with_caller(frame("", "src/lib.rs", 99));

    let owned = Resolver::new(Some("billing_worker".into()));
    assert_eq!(owned.call_site(&stack).unwrap().to_string(), "./src/main.rs:4");

    let unowned = Resolver::new(Some("shipping".into()));
    assert_eq!(unowned.call_site(&stack).unwrap().to_string(), "src/lib.rs:99");
}

#[test]
fn resolver_without_marker_uses_the_caller_location() {
    let stack = CapturedStack::from_frames(parse_backtrace(BACKTRACE))
        .with_caller(frame("", "src/lib.rs", 99));
    assert_eq!(Resolver::default().call_site(&stack), Some(CallSite::new("src/lib.rs", Some(99))));
}

#[test]
fn resolver_falls_back_to_first_external_frame() {
    let stack = CapturedStack::from_frames(parse_backtrace(BACKTRACE));
    let site = Resolver::new(None).call_site(&stack).unwrap();
    assert_eq!(site.to_string(), "./src/invoice.rs:12");
}

#[test]
fn resolver_returns_none_for_empty_stacks() {
    assert!(CapturedStack::default().is_empty());
    assert_eq!(Resolver::new(Some("billing".into())).call_site(&CapturedStack::default()), None);
}

#[test]
fn empty_marker_is_ignored() {
    assert_eq!(Resolver::new(Some(String::new())).owning_component(), None);
}

#[test]
fn belongs_to_matches_whole_path_segments() {
    let send = frame("billing::invoice::send", "src/invoice.rs", 1);
    assert!(send.belongs_to("billing"));
    assert!(send.belongs_to("billing::invoice"));
    assert!(!send.belongs_to("bill"));

    let method = frame("<billing::Invoice as core::fmt::Display>::fmt", "src/invoice.rs", 2);
    assert!(method.belongs_to("billing"));
}

#[test]
fn capture_records_the_caller_location() {
    let (stack, line) = (CapturedStack::capture(), line!());
    let caller = stack.caller().unwrap();
    assert_eq!(caller.file.as_deref(), Some(file!()));
    assert_eq!(caller.line, Some(line));
}

#[test]
fn call_site_formats_without_line() {
    assert_eq!(CallSite::new("src/lib.rs", None).to_string(), "src/lib.rs");
    assert_eq!(StackFrame::new("main", None, Some(1)).call_site(), None);
}
