//! Structural validator integration tests.
//!
//! The validator collects every violation in one full traversal and never
//! aborts; these tests pin the per-tag rules, the collect-all behavior, and
//! the depth guard.

use voxml::{Schema, ValidationIssue, parse, validate};

fn issues_for(markup: &str) -> Vec<ValidationIssue> {
    validate(&parse(markup).expect("should parse"), &Schema::default())
}

#[test]
fn test_valid_document_has_no_issues() {
    let issues = issues_for(
        r#"<speak>
          Hello <sub alias="NYC">New York City</sub>!
          <p><s>Welcome.</s></p>
          <voice name="en-US-Jenny">A line.</voice>
          <prosody rate="slow" pitch="low">Slow part.</prosody>
          <break strength="medium"/>
          <say-as interpret-as="characters">HTML</say-as>
          <emphasis level="strong">Important.</emphasis>
        </speak>"#,
    );
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}

#[test]
fn test_root_must_be_speak() {
    let issues = issues_for("<voice>hello</voice>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].to_string(), "<speak>: root element must be <speak>");
}

#[test]
fn test_missing_root_element() {
    let issues = issues_for("just text, no elements");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("root element"));
}

#[test]
fn test_unknown_tag_per_occurrence() {
    let issues = issues_for("<speak><foo>a</foo><foo>b</foo></speak>");
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().all(|i| i.tag == "foo" && i.message == "unknown tag"));
}

#[test]
fn test_break_both_time_and_strength_single_issue_continues() {
    // Exactly one issue for the conflict, and traversal still reaches the
    // sibling's violation.
    let issues = issues_for(
        r#"<speak><break time="500ms" strength="strong"/><sub>missing</sub></speak>"#,
    );
    assert_eq!(issues.len(), 2);
    assert!(issues[0].message.contains("both 'time' and 'strength'"));
    assert!(issues[1].message.contains("alias"));
}

#[test]
fn test_break_neither_time_nor_strength() {
    let issues = issues_for("<speak><break/></speak>");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("either 'time' or 'strength'"));
}

#[test]
fn test_break_time_unit_and_magnitude_are_separate_rules() {
    assert!(issues_for(r#"<speak><break time="5sec"/></speak>"#)[0]
        .message
        .contains("'ms' or 's'"));
    assert!(issues_for(r#"<speak><break time="fastms"/></speak>"#)[0]
        .message
        .contains("numeric"));
    assert!(issues_for(r#"<speak><break time="500ms"/></speak>"#).is_empty());
    assert!(issues_for(r#"<speak><break time="2s"/></speak>"#).is_empty());
}

#[test]
fn test_break_unknown_strength() {
    let issues = issues_for(r#"<speak><break strength="ultra"/></speak>"#);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("'ultra'"));
}

#[test]
fn test_sub_blank_alias() {
    let issues = issues_for(r#"<speak><sub alias="   ">USA</sub></speak>"#);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("alias"));
}

#[test]
fn test_say_as_missing_mode() {
    let issues = issues_for("<speak><say-as>123</say-as></speak>");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("interpret-as"));
}

#[test]
fn test_unregistered_tag_allows_any_attributes() {
    // <s> has no registered attribute list: unconstrained, not "none".
    assert!(issues_for(r#"<speak><s custom="anything">x</s></speak>"#).is_empty());
}

#[test]
fn test_depth_guard_flags_every_node_beyond_limit() {
    // 70 <p> levels under <speak>: depths 65..=70 exceed the 64 limit, one
    // issue each.
    let markup = format!("<speak>{}x{}</speak>", "<p>".repeat(70), "</p>".repeat(70));
    let issues = issues_for(&markup);
    let depth_issues: Vec<_> = issues
        .iter()
        .filter(|i| i.message.contains("depth"))
        .collect();
    assert_eq!(depth_issues.len(), 6);
}

#[test]
fn test_depth_guard_still_checks_nodes_beneath() {
    let markup = format!(
        "<speak>{}<sub>deep</sub>{}</speak>",
        "<p>".repeat(66),
        "</p>".repeat(66)
    );
    let issues = issues_for(&markup);
    // Depth issues for p@65, p@66, sub@67, plus the sub alias violation.
    assert_eq!(issues.iter().filter(|i| i.message.contains("depth")).count(), 3);
    assert!(issues.iter().any(|i| i.message.contains("alias")));
}

#[test]
fn test_idempotent() {
    let doc = parse(r#"<speak><break time="500ms" strength="strong"/><foo/></speak>"#).unwrap();
    let schema = Schema::default();
    let first = validate(&doc, &schema);
    let second = validate(&doc, &schema);
    assert_eq!(first, second);
}

#[test]
fn test_custom_schema_vocabulary() {
    let mut schema = Schema::empty("doc");
    schema.allow_tag("doc").allow_tag("line");
    schema.register_attrs("line", ["n"]);

    let doc = parse(r#"<doc><line n="1">one</line><speak/></doc>"#).unwrap();
    let issues = validate(&doc, &schema);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].tag, "speak");
}

#[test]
fn test_custom_max_depth() {
    let schema = Schema::default().with_max_depth(2);
    let doc = parse("<speak><p><s><s>deep</s></s></p></speak>").unwrap();
    let issues = validate(&doc, &schema);
    assert_eq!(issues.iter().filter(|i| i.message.contains("depth")).count(), 1);
}
