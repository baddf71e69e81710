use convivio::dialogue::rules::Rule;
use serde_json::json;

#[test]
fn test_in_list_exact_membership() {
    let rule = Rule::in_list(["italian", "mexican"]);

    assert!(rule.validate(&json!("italian")));
    assert!(!rule.validate(&json!("Italian")), "membership is case sensitive; callers normalize");
    assert!(!rule.validate(&json!("french")));
    assert!(!rule.validate(&json!(42)), "non-strings never match an allow-list");
    assert!(!rule.validate(&json!(null)));
}

#[test]
fn test_in_list_empty_rejects_everything() {
    let rule = Rule::in_list(Vec::<String>::new());

    assert!(!rule.validate(&json!("anything")));
    assert!(!rule.validate_str("anything"));
}

#[test]
fn test_is_string() {
    let rule = Rule::IsString;

    assert!(rule.validate(&json!("lasagne")));
    assert!(rule.validate(&json!("")), "empty strings still qualify");
    assert!(!rule.validate(&json!(null)));
    assert!(!rule.validate(&json!(3)));
    assert!(!rule.validate(&json!(["a"])));
}

#[test]
fn test_is_integer() {
    let rule = Rule::IsInteger;

    assert!(rule.validate(&json!(42)));
    assert!(rule.validate(&json!("42")));
    assert!(rule.validate(&json!(" 7 ")), "surrounding whitespace is tolerated");
    assert!(rule.validate(&json!(-3)));
    assert!(!rule.validate(&json!(4.5)), "non-integral numbers are not integers");
    assert!(!rule.validate(&json!("forty-two")));
    assert!(!rule.validate(&json!(null)));
}

#[test]
fn test_always_true() {
    let rule = Rule::AlwaysTrue;

    assert!(rule.validate(&json!(null)));
    assert!(rule.validate(&json!("whatever")));
    assert!(rule.validate(&json!([1, 2, 3])));
}

#[test]
fn test_range_inclusive_bounds() {
    let rule = Rule::Range { min: 1, max: 10 };

    assert!(rule.validate(&json!(1)));
    assert!(rule.validate(&json!(10)));
    assert!(rule.validate(&json!("5")), "integer-in-string parses like IsInteger");
    assert!(!rule.validate(&json!(0)));
    assert!(!rule.validate(&json!(11)));
    assert!(!rule.validate(&json!("abc")));
    assert!(!rule.validate(&json!(null)));
}

#[test]
fn test_validate_str_fast_path() {
    assert!(Rule::in_list(["garlic"]).validate_str("garlic"));
    assert!(!Rule::in_list(["garlic"]).validate_str("chilli"));
    assert!(Rule::IsString.validate_str(""));
    assert!(Rule::IsInteger.validate_str("12"));
    assert!(!Rule::IsInteger.validate_str("twelve"));
    assert!(Rule::Range { min: 0, max: 5 }.validate_str("3"));
    assert!(!Rule::Range { min: 0, max: 5 }.validate_str("9"));
}
