/// Census: one read-only pass over all windows and tabs, aggregated by domain
use std::collections::HashMap;

use crate::browser;
use crate::domain::domain_key;
use crate::tab_data::{TabInfo, WindowTabs};

/// Ranked domain list length.
pub const TOP_DOMAINS: usize = 20;

/// Aggregate view of the browser at one instant. Built fresh on every
/// refresh and discarded afterwards — snapshots are never merged, and the
/// tab/window ids inside are only valid for the display cycle that built
/// them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub total_windows: usize,
    pub total_tabs: usize,
    /// Tab count per window, in host enumeration order.
    pub window_tab_counts: Vec<usize>,
    /// Every tab of a domain, in enumeration order (windows in host order,
    /// tabs within a window in host order).
    pub tabs_by_domain: HashMap<String, Vec<TabInfo>>,
    pub domain_counts: HashMap<String, usize>,
    /// Domains in first-seen order. This is the tie-break order for the
    /// ranking below, kept explicit instead of leaning on map iteration.
    pub domain_order: Vec<String>,
    /// Up to TOP_DOMAINS (domain, count) pairs, count descending, ties in
    /// first-seen order.
    pub top_domains: Vec<(String, usize)>,
}

impl Snapshot {
    pub fn unique_domains(&self) -> usize {
        self.domain_counts.len()
    }

    /// Average tabs per window, rounded to one decimal. 0.0 when there are
    /// no windows.
    pub fn avg_tabs_per_window(&self) -> f64 {
        if self.total_windows == 0 {
            return 0.0;
        }
        let avg = self.total_tabs as f64 / self.total_windows as f64;
        (avg * 10.0).round() / 10.0
    }

    /// Distinct windows holding at least one tab of `domain`, in the order
    /// the windows were first encountered for that domain.
    pub fn window_ids_for(&self, domain: &str) -> Vec<i32> {
        let mut ids: Vec<i32> = Vec::new();
        if let Some(tabs) = self.tabs_by_domain.get(domain) {
            for tab in tabs {
                if !ids.contains(&tab.window_id) {
                    ids.push(tab.window_id);
                }
            }
        }
        ids
    }

    /// True when the domain's tabs currently live in more than one window.
    pub fn is_spread(&self, domain: &str) -> bool {
        self.window_ids_for(domain).len() > 1
    }
}

/// Aggregate an enumerated window list into a snapshot. Pure: all host
/// interaction happens before this is called.
pub fn build_snapshot(windows: &[WindowTabs]) -> Snapshot {
    let mut snapshot = Snapshot {
        total_windows: windows.len(),
        ..Snapshot::default()
    };

    for window in windows {
        snapshot.window_tab_counts.push(window.tabs.len());
        snapshot.total_tabs += window.tabs.len();

        for tab in &window.tabs {
            let domain = domain_key(&tab.url);
            if !snapshot.domain_counts.contains_key(&domain) {
                snapshot.domain_order.push(domain.clone());
            }
            *snapshot.domain_counts.entry(domain.clone()).or_insert(0) += 1;
            snapshot
                .tabs_by_domain
                .entry(domain)
                .or_default()
                .push(tab.clone());
        }
    }

    snapshot.top_domains = rank_domains(&snapshot);
    snapshot
}

/// Sort (domain, count) pairs by count descending and keep the first
/// TOP_DOMAINS. Starting from first-seen order and using a stable sort keeps
/// ties in encounter order.
fn rank_domains(snapshot: &Snapshot) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = snapshot
        .domain_order
        .iter()
        .map(|domain| (domain.clone(), snapshot.domain_counts[domain]))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_DOMAINS);
    ranked
}

/// Enumerate all windows and their tabs through the host bridge and build a
/// snapshot. Windows and tabs keep host order; enumeration happens one
/// window at a time. Any host failure propagates immediately — there is no
/// partial snapshot and no retry, the caller decides whether to refresh.
pub async fn compute_snapshot() -> Result<Snapshot, String> {
    let windows = browser::enumerate_windows().await?;
    Ok(build_snapshot(&windows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(id: i32, urls: &[&str]) -> WindowTabs {
        let tabs = urls
            .iter()
            .enumerate()
            .map(|(i, url)| TabInfo::new(id * 100 + i as i32, url.to_string(), id))
            .collect();
        WindowTabs { id, tabs }
    }

    #[test]
    fn test_totals_match_window_contents() {
        let windows = vec![
            window(1, &["https://a.com", "https://b.com", "https://a.com/x"]),
            window(2, &["https://c.com"]),
        ];

        let snapshot = build_snapshot(&windows);

        assert_eq!(snapshot.total_windows, 2);
        assert_eq!(snapshot.total_tabs, 4);
        assert_eq!(snapshot.window_tab_counts, vec![3, 1]);

        // Per-domain counts sum to the total tab count
        let sum: usize = snapshot.domain_counts.values().sum();
        assert_eq!(sum, snapshot.total_tabs);
    }

    #[test]
    fn test_every_tab_lands_in_exactly_one_bucket() {
        let windows = vec![
            window(1, &["https://a.com", "chrome://extensions", "garbage"]),
            window(2, &["https://www.a.com/y"]),
        ];

        let snapshot = build_snapshot(&windows);

        let bucketed: usize = snapshot.tabs_by_domain.values().map(Vec::len).sum();
        assert_eq!(bucketed, snapshot.total_tabs);
        assert_eq!(snapshot.tabs_by_domain["a.com"].len(), 2);
        assert_eq!(snapshot.tabs_by_domain["chrome://"].len(), 1);
        assert_eq!(snapshot.tabs_by_domain["unknown"].len(), 1);
    }

    #[test]
    fn test_bucket_preserves_enumeration_order() {
        let windows = vec![
            window(1, &["https://a.com/1", "https://b.com", "https://a.com/2"]),
            window(2, &["https://a.com/3"]),
        ];

        let snapshot = build_snapshot(&windows);

        let urls: Vec<&str> = snapshot.tabs_by_domain["a.com"]
            .iter()
            .map(|t| t.url.as_str())
            .collect();
        assert_eq!(urls, vec!["https://a.com/1", "https://a.com/2", "https://a.com/3"]);

        // Each tab remembers the window it came from
        assert_eq!(snapshot.tabs_by_domain["a.com"][2].window_id, 2);
    }

    #[test]
    fn test_average_tabs_per_window() {
        let windows = vec![
            window(1, &["https://a.com", "https://b.com", "https://c.com", "https://d.com"]),
            window(2, &["https://e.com", "https://f.com", "https://g.com"]),
        ];

        let snapshot = build_snapshot(&windows);
        assert_eq!(snapshot.avg_tabs_per_window(), 3.5);
    }

    #[test]
    fn test_average_with_no_windows() {
        let snapshot = build_snapshot(&[]);

        assert_eq!(snapshot.total_windows, 0);
        assert_eq!(snapshot.total_tabs, 0);
        assert_eq!(snapshot.avg_tabs_per_window(), 0.0);
        assert!(snapshot.top_domains.is_empty());
    }

    #[test]
    fn test_ranking_sorts_by_count_descending() {
        let windows = vec![window(
            1,
            &[
                "https://a.com",
                "https://b.com/1",
                "https://b.com/2",
                "https://b.com/3",
                "https://c.com/1",
                "https://c.com/2",
            ],
        )];

        let snapshot = build_snapshot(&windows);

        assert_eq!(
            snapshot.top_domains,
            vec![
                ("b.com".to_string(), 3),
                ("c.com".to_string(), 2),
                ("a.com".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_ranking_ties_keep_first_seen_order() {
        let windows = vec![window(
            1,
            &[
                "https://zeta.com/1",
                "https://alpha.com/1",
                "https://zeta.com/2",
                "https://alpha.com/2",
            ],
        )];

        let snapshot = build_snapshot(&windows);

        // Equal counts: zeta.com was seen first and stays first, regardless
        // of lexical order
        assert_eq!(snapshot.top_domains[0].0, "zeta.com");
        assert_eq!(snapshot.top_domains[1].0, "alpha.com");
    }

    #[test]
    fn test_ranking_is_capped() {
        let urls: Vec<String> = (0..30).map(|i| format!("https://site{i}.com")).collect();
        let url_refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let windows = vec![window(1, &url_refs)];

        let snapshot = build_snapshot(&windows);

        assert_eq!(snapshot.unique_domains(), 30);
        assert_eq!(snapshot.top_domains.len(), TOP_DOMAINS);
    }

    #[test]
    fn test_window_ids_for_and_spread_flag() {
        let windows = vec![
            window(1, &["https://a.com/1", "https://b.com"]),
            window(2, &["https://a.com/2"]),
        ];

        let snapshot = build_snapshot(&windows);

        assert_eq!(snapshot.window_ids_for("a.com"), vec![1, 2]);
        assert!(snapshot.is_spread("a.com"));
        assert!(!snapshot.is_spread("b.com"));
        assert!(snapshot.window_ids_for("missing.com").is_empty());
    }
}
