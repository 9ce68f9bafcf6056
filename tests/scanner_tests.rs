use standup::core::models::ChannelReference;
use standup::slack::scanner::{mentions_user, scan};

const BOT: &str = "UBOT";

#[test]
fn test_plain_text_yields_single_unreferenced_segment() {
    let result = scan("  Refactored the auth module  ", BOT);

    assert!(!result.bot_mentioned);
    assert!(result.is_unrouted());
    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].reference, None);
    assert_eq!(result.segments[0].text, "Refactored the auth module");
}

#[test]
fn test_bot_mention_is_stripped_and_reported() {
    let result = scan("<@UBOT> shipped the release", BOT);

    assert!(result.bot_mentioned);
    assert!(result.is_unrouted());
    assert_eq!(result.segments[0].text, "shipped the release");
}

#[test]
fn test_other_user_mentions_are_kept() {
    let result = scan("paired with <@UALICE> on caching", BOT);

    assert!(!result.bot_mentioned);
    assert_eq!(result.segments[0].text, "paired with <@UALICE> on caching");
}

#[test]
fn test_single_mention_with_label() {
    let result = scan("<#C123|eng> fixed bug X", BOT);

    assert!(!result.is_unrouted());
    assert_eq!(result.segments.len(), 1);
    assert_eq!(
        result.segments[0].reference,
        Some(ChannelReference {
            token: "C123".to_string(),
            declared_label: "eng".to_string(),
        })
    );
    assert_eq!(result.segments[0].text, "fixed bug X");
}

#[test]
fn test_bare_mention_has_empty_label() {
    let result = scan("<#C123> fixed bug X", BOT);

    let reference = result.segments[0].reference.as_ref().unwrap();
    assert_eq!(reference.token, "C123");
    assert_eq!(reference.declared_label, "");
}

#[test]
fn test_segments_split_at_each_mention_in_order() {
    let text = "<#C1|api> added pagination\n<#C2|web> styled the header <#C3|ops> rotated keys";
    let result = scan(text, BOT);

    let tokens: Vec<&str> = result
        .segments
        .iter()
        .map(|s| s.reference.as_ref().unwrap().token.as_str())
        .collect();
    assert_eq!(tokens, vec!["C1", "C2", "C3"]);
    assert_eq!(result.segments[0].text, "added pagination");
    assert_eq!(result.segments[1].text, "styled the header");
    assert_eq!(result.segments[2].text, "rotated keys");
}

#[test]
fn test_adjacent_mentions_drop_the_empty_one() {
    let result = scan("<#C1|api><#C2|web> styled the header", BOT);

    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].reference.as_ref().unwrap().token, "C2");
}

#[test]
fn test_trailing_mention_without_text_yields_no_segments() {
    let result = scan("Did backend work today <#C123|eng>", BOT);

    assert!(result.segments.is_empty());
    assert!(!result.is_unrouted());
}

#[test]
fn test_bot_mention_inside_segment_is_removed() {
    let result = scan("<@UBOT> <#C1|api> <@UBOT> wrote tests", BOT);

    assert!(result.bot_mentioned);
    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].text, "wrote tests");
}

#[test]
fn test_scan_is_deterministic() {
    let text = "<#C1|api> one <#C2> two";
    assert_eq!(scan(text, BOT), scan(text, BOT));
}

#[test]
fn test_mentions_user() {
    assert!(mentions_user("hey <@UBOT>", BOT));
    assert!(mentions_user("hey <@UBOT|standup>", BOT));
    assert!(!mentions_user("hey <@UBOTX>", BOT));
    assert!(!mentions_user("hey <@UBOT>", ""));
}
