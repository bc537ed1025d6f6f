use crate::DecodedSymbols;

#[test]
fn given_two_payloads_when_reading_first_then_returns_index_zero() {
    let symbols = DecodedSymbols::new(vec!["first".to_string(), "second".to_string()]);

    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols.first(), Some("first"));
    assert_eq!(symbols.iter().collect::<Vec<_>>(), ["first", "second"]);
}

#[test]
fn given_no_payloads_when_inspected_then_is_empty() {
    let symbols = DecodedSymbols::default();

    assert!(symbols.is_empty());
    assert_eq!(symbols.first(), None);
}

#[test]
fn given_symbols_when_serialized_then_plain_json_array() {
    let symbols = DecodedSymbols::from(vec!["a".to_string()]);

    assert_eq!(serde_json::to_string(&symbols).unwrap(), r#"["a"]"#);
}
