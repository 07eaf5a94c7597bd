//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

use chrono::Utc;
use storagift_core::{CategoryUsage, Fid, FollowedAccount, RankedEntry, StorageUsage};

fn entry(fid: u64, username: &str, used: u64) -> RankedEntry {
    let account = FollowedAccount {
        fid: Fid(fid),
        username: username.to_string(),
        display_name: None,
        avatar_url: "https://img.example/a.png".to_string(),
    };
    let usage = StorageUsage {
        casts: CategoryUsage {
            capacity: 100,
            used,
        },
        reactions: CategoryUsage {
            capacity: 100,
            used: 0,
        },
        links: CategoryUsage {
            capacity: 100,
            used: 0,
        },
        fetched_at: Utc::now(),
    };
    RankedEntry::new(account, usage)
}

mod text_formatter_tests {
    use super::*;
    use crate::output::TextFormatter;
    use storagift_core::{paginate, PageParams};

    #[test]
    fn test_usage_bar_empty() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.usage_bar(0.0), "░░░░░░░░░░");
    }

    #[test]
    fn test_usage_bar_full() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.usage_bar(1.0), "██████████");
    }

    #[test]
    fn test_usage_bar_half() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.usage_bar(0.5), "█████░░░░░");
    }

    #[test]
    fn test_usage_bar_clamps_out_of_range() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.usage_bar(-0.3), "░░░░░░░░░░");
        assert_eq!(formatter.usage_bar(4.2), "██████████");
    }

    #[test]
    fn test_usage_bar_colors_track_fullness() {
        let formatter = TextFormatter::new(true);
        assert!(formatter.usage_bar(0.95).contains("\x1b[31m"));
        assert!(formatter.usage_bar(0.75).contains("\x1b[33m"));
        assert!(formatter.usage_bar(0.2).contains("\x1b[32m"));
    }

    #[test]
    fn test_entry_shows_username_and_totals() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_entry(&entry(3, "dwr", 40));

        assert!(output.contains("@dwr"));
        assert!(output.contains("(fid 3)"));
        assert!(output.contains("260 left"));
    }

    #[test]
    fn test_exhausted_entry_flagged() {
        let formatter = TextFormatter::new(false);
        let mut e = entry(3, "dwr", 100);
        e.usage.reactions.used = 100;
        e.usage.links.used = 100;
        let e = RankedEntry::new(e.account, e.usage);

        assert!(formatter.format_entry(&e).contains("OUT OF STORAGE"));
    }

    #[test]
    fn test_empty_page() {
        let formatter = TextFormatter::new(false);
        let page = paginate(&Vec::<RankedEntry>::new(), 1, &PageParams::default());
        let output = formatter.format_ranking_page(&page, 0);
        assert!(output.contains("No rankable accounts"));
    }

    #[test]
    fn test_dropped_count_reported() {
        let formatter = TextFormatter::new(false);
        let entries = vec![entry(1, "a", 10)];
        let page = paginate(&entries, 1, &PageParams::default());
        let output = formatter.format_ranking_page(&page, 3);
        assert!(output.contains("3 account(s) skipped"));
    }
}

mod json_formatter_tests {
    use super::*;
    use crate::output::{JsonFormatter, RankOutput};
    use storagift_core::{paginate, PageParams};

    #[test]
    fn test_rank_output_shape() {
        let entries = vec![entry(7, "low", 90), entry(8, "high", 10)];
        let page = paginate(&entries, 1, &PageParams::default());
        let output = RankOutput::from_page(16098, &page, 2);

        let json = JsonFormatter::new(false).format(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["viewerFid"], 16098);
        assert_eq!(value["page"], 1);
        assert_eq!(value["dropped"], 2);
        assert_eq!(value["entries"][0]["username"], "low");
        assert_eq!(value["entries"][0]["totalRemaining"], 210);
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let formatter = JsonFormatter::new(true);
        let output = formatter
            .format(&serde_json::json!({"a": 1, "b": 2}))
            .unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_null_display_name_omitted() {
        let e = entry(7, "low", 0);
        let json = serde_json::to_string(&crate::output::EntryOutput::from(&e)).unwrap();
        assert!(!json.contains("displayName"));
    }
}
