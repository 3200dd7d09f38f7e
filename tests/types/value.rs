use outcome_rail::{FunctionRef, Value};

#[test]
fn display_renders_each_shape() {
    assert_eq!(Value::Null.to_string(), "nil");
    assert_eq!(Value::from(true).to_string(), "true");
    assert_eq!(Value::from(1.5).to_string(), "1.5");
    assert_eq!(Value::from("hi").to_string(), r#""hi""#);
    assert_eq!(Value::atom("ok").to_string(), ":ok");
    assert_eq!(Value::list([1, 2]).to_string(), "[1, 2]");
    assert_eq!(Value::tuple([Value::atom("ok"), Value::from(1)]).to_string(), "{:ok, 1}");
    assert_eq!(Value::map([("a", 1)]).to_string(), "{a: 1}");
    assert_eq!(Value::record("User", [("id", 1)]).to_string(), "User{id: 1}");
    assert_eq!(Value::Omitted(4).to_string(), "...(4 more)");
}

#[test]
fn exceptions_render_type_message_and_fields() {
    let bare = Value::exception("Timeout", "took 5s", Vec::<(String, Value)>::new());
    assert_eq!(bare.to_string(), r#"Timeout("took 5s")"#);

    let detailed = Value::exception("Timeout", "took 5s", [("after_ms", 5000)]);
    assert_eq!(detailed.to_string(), r#"Timeout("took 5s"){after_ms: 5000}"#);
}

#[test]
fn function_refs_render_named_and_anonymous_forms() {
    assert_eq!(FunctionRef::named("Billing.Invoice", "send", 2).to_string(), "&Billing.Invoice.send/2");
    assert_eq!(FunctionRef::anonymous(1, "src/jobs.rs", 40).to_string(), "#Function<src/jobs.rs:40/1>");

    let unnamed = FunctionRef { name: Some("retry".into()), arity: 0, ..FunctionRef::default() };
    assert_eq!(unnamed.to_string(), "&retry/0");
}

#[test]
fn to_text_leaves_top_level_strings_unquoted() {
    assert_eq!(Value::from("plain").to_text(), "plain");
    assert_eq!(Value::list(["a"]).to_text(), r#"["a"]"#);
}

#[test]
fn get_reads_fields_of_keyed_values() {
    let user = Value::record("User", [("id", Value::from(1)), ("name", Value::from("Ada"))]);
    assert_eq!(user.get("name"), Some(&Value::from("Ada")));
    assert_eq!(user.get("missing"), None);
    assert_eq!(Value::from(1).get("id"), None);
}

#[test]
fn large_unsigned_values_fall_back_to_floats() {
    assert_eq!(Value::from(7u64), Value::Int(7));
    assert!(matches!(Value::from(u64::MAX), Value::Float(_)));
    assert_eq!(Value::from(None::<u8>), Value::Null);
    assert_eq!(Value::from(vec![1u8, 2]), Value::list([1, 2]));
}

#[cfg(feature = "serde")]
#[test]
fn serializes_records_with_their_discriminator() {
    let value = Value::record(
        "User",
        [("id", Value::from(1)), ("roles", Value::list([Value::atom("admin")]))],
    );
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json, serde_json::json!({ "__type__": "User", "id": 1, "roles": ["admin"] }));

    let tuple = Value::tuple([Value::atom("ok"), Value::from(1)]);
    assert_eq!(serde_json::to_value(&tuple).unwrap(), serde_json::json!("{:ok, 1}"));
}

#[cfg(feature = "serde")]
#[test]
fn from_serialize_builds_an_opaque_property_map() {
    #[derive(serde::Serialize)]
    struct Session {
        id: u32,
        token: String,
    }

    let value = Value::from_serialize(&Session { id: 9, token: "secret".into() });
    assert_eq!(value.get("id"), Some(&Value::Int(9)));
    assert_eq!(value.get("token"), Some(&Value::from("secret")));
}
