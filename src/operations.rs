/// Tab consolidation: move a domain's tabs into one window
///
/// Planning is pure and separated from execution so the selection rules are
/// testable without a host browser. Both executors are best-effort: a failed
/// move is logged and skipped, and whatever moved stays moved (no rollback).
use std::collections::HashMap;

use crate::browser;
use crate::tab_data::TabInfo;

/// Split of a domain's tabs into the seed for a new window and the rest.
/// None when there is nothing to move.
pub fn plan_new_window(tabs: &[TabInfo]) -> Option<(&TabInfo, &[TabInfo])> {
    let (seed, rest) = tabs.split_first()?;
    Some((seed, rest))
}

/// Outcome of planning a group-into-existing-window consolidation.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupPlan {
    /// Fewer than two tabs: nothing to group.
    OnlyOneTab,
    /// All tabs already share one window.
    AlreadyConsolidated,
    /// Move `tabs` (in input order) into `target`.
    Moves { target: i32, tabs: Vec<TabInfo> },
}

/// Pick the window already holding the most tabs of the domain and collect
/// every tab outside it. Ties go to the window encountered first in the tab
/// sequence — an explicit policy, not an artifact of numeric id order.
pub fn plan_group(domain_tabs: &[TabInfo]) -> GroupPlan {
    if domain_tabs.len() < 2 {
        return GroupPlan::OnlyOneTab;
    }

    // Partition by window, preserving the order windows first appear
    let mut window_order: Vec<i32> = Vec::new();
    let mut partitions: HashMap<i32, usize> = HashMap::new();
    for tab in domain_tabs {
        if !partitions.contains_key(&tab.window_id) {
            window_order.push(tab.window_id);
        }
        *partitions.entry(tab.window_id).or_insert(0) += 1;
    }

    if window_order.len() < 2 {
        return GroupPlan::AlreadyConsolidated;
    }

    let mut target = window_order[0];
    for &window_id in &window_order[1..] {
        if partitions[&window_id] > partitions[&target] {
            target = window_id;
        }
    }

    let tabs: Vec<TabInfo> = domain_tabs
        .iter()
        .filter(|tab| tab.window_id != target)
        .cloned()
        .collect();

    // Preconditions were checked on a snapshot; stale data could still leave
    // nothing to move
    if tabs.is_empty() {
        return GroupPlan::AlreadyConsolidated;
    }

    GroupPlan::Moves { target, tabs }
}

/// Result of executing a group consolidation, for user-facing reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupOutcome {
    OnlyOneTab,
    AlreadyConsolidated,
    Done {
        target: i32,
        moved: usize,
        failed: usize,
    },
}

/// Move every tab of a domain into a freshly created window. Runs in the
/// background context: creating a window tears the popup down, so this must
/// outlive it. The first tab seeds the new window; the rest are appended in
/// sequence order. Failed moves are skipped.
pub async fn move_domain_to_new_window(domain_tabs: &[TabInfo]) {
    let Some((seed, rest)) = plan_new_window(domain_tabs) else {
        log::warn!("No tabs to move");
        return;
    };

    let window_id = match browser::create_window_with_tab(seed.id).await {
        Ok(window_id) => window_id,
        Err(e) => {
            log::error!("Could not create window: {}", e);
            return;
        }
    };
    log::info!("Created window {} from tab {}", window_id, seed.id);

    for tab in rest {
        if let Err(e) = browser::move_tab(tab.id, window_id, browser::APPEND).await {
            log::warn!("Skipping tab {}: {}", tab.id, e);
        }
    }
}

/// Gather a domain's tabs into the window that already holds most of them.
/// Moves are appended at the tail one at a time, mirroring input order.
/// Failed moves are skipped and counted, matching the new-window path's
/// best-effort policy.
pub async fn group_domain_into_window(domain_tabs: &[TabInfo]) -> GroupOutcome {
    let (target, tabs) = match plan_group(domain_tabs) {
        GroupPlan::OnlyOneTab => return GroupOutcome::OnlyOneTab,
        GroupPlan::AlreadyConsolidated => return GroupOutcome::AlreadyConsolidated,
        GroupPlan::Moves { target, tabs } => (target, tabs),
    };

    log::info!("Moving {} tabs to window {}", tabs.len(), target);

    let mut moved = 0;
    let mut failed = 0;
    for tab in &tabs {
        match browser::move_tab(tab.id, target, browser::APPEND).await {
            Ok(()) => moved += 1,
            Err(e) => {
                log::warn!("Skipping tab {}: {}", tab.id, e);
                failed += 1;
            }
        }
    }

    GroupOutcome::Done {
        target,
        moved,
        failed,
    }
}
