//! Property-based tests for mention markup

use dreamjournal::shared::mention::{format_mention, mention_ids, render_mentions};
use proptest::prelude::*;
use uuid::Uuid;

proptest! {
    #[test]
    fn test_formatted_mention_is_found(name in "[A-Za-z][A-Za-z ]{0,15}", id in any::<u128>(), before in "[a-z ]{0,10}") {
        let id = Uuid::from_u128(id);
        let text = format!("{}{} hello", before, format_mention(&name, id));

        prop_assert_eq!(mention_ids(&text), vec![id]);
        prop_assert_eq!(render_mentions(&text), format!("{}@{} hello", before, name));
    }

    #[test]
    fn test_plain_text_is_untouched(text in "[^@]{0,40}") {
        prop_assert!(mention_ids(&text).is_empty());
        prop_assert_eq!(render_mentions(&text), text);
    }
}
