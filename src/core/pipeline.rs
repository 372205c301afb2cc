use crate::core::generate::ScriptStyle;
use crate::core::youtube::{SearchRequest, VideoCandidate, VideoStats, YouTubeClient};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// Hard duration floor: anything under five minutes (Shorts territory) is
/// rejected regardless of the other filters.
pub const MIN_DURATION_SECS: u64 = 300;

/// Second, stricter view gate for recency-based trending. Fixed on purpose;
/// it does not track the caller's `min_views` setting.
pub const FAST_GROWTH_MIN_VIEWS: u64 = 8_000;
pub const FAST_GROWTH_MAX_AGE_DAYS: i64 = 3;
pub const BREAKOUT_MIN_VIEWS: u64 = 50_000;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;
pub const DEFAULT_MIN_VIEWS: u64 = 8_000;
pub const DEFAULT_MAX_SUBS: u64 = 3_000;

const HISTORY_KEYWORDS: &[&str] = &[
    "Napoleonic Wars documentary",
    "Napoleon Bonaparte history",
    "Peninsular War explained",
    "Battle of Waterloo explained",
    "Why Napoleon failed",
    "French Revolution documentary",
    "Empires that collapsed documentary",
    "Military history explained",
    "Greatest generals in history",
    "Rise and fall of empires",
];

/// Caller-supplied thresholds, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Lookback window in days, clamped to [1, 30] by the invoking layer.
    pub lookback_days: u32,
    pub min_views: u64,
    pub max_subs: u64,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            min_views: DEFAULT_MIN_VIEWS,
            max_subs: DEFAULT_MAX_SUBS,
        }
    }
}

/// Keyword source plus template pair. The generic and history-niche
/// variants share one pipeline and differ only through this profile.
#[derive(Debug, Clone)]
pub struct ScanProfile {
    pub keywords: Vec<String>,
    pub max_results: u32,
    pub style: ScriptStyle,
}

impl ScanProfile {
    pub fn generic(keyword: impl Into<String>) -> Self {
        Self {
            keywords: vec![keyword.into()],
            max_results: 20,
            style: ScriptStyle::Generic,
        }
    }

    pub fn history() -> Self {
        Self {
            keywords: HISTORY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            max_results: 15,
            style: ScriptStyle::Napoleon,
        }
    }
}

/// Heuristic labels, evaluated independently and always in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendTag {
    ViewsSubsExplosion,
    FastGrowth,
    Breakout,
}

impl TrendTag {
    pub fn label(self) -> &'static str {
        match self {
            TrendTag::ViewsSubsExplosion => "Views/Subs Explosion",
            TrendTag::FastGrowth => "Fast Growth",
            TrendTag::Breakout => "Breakout",
        }
    }
}

impl fmt::Display for TrendTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate that survived the join and the hard filters. Never
/// persisted; the whole set is rebuilt on every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedResult {
    pub title: String,
    pub url: String,
    pub view_count: u64,
    pub subscriber_count: u64,
    pub duration_minutes: u64,
    pub keyword: String,
    pub trend_tags: Vec<TrendTag>,
}

impl RankedResult {
    pub fn trend_summary(&self) -> String {
        if self.trend_tags.is_empty() {
            "Normal".to_string()
        } else {
            self.trend_tags
                .iter()
                .map(|t| t.label())
                .collect::<Vec<_>>()
                .join(" | ")
        }
    }
}

/// Join candidates with their enrichment data and apply the hard filters
/// and trend tagging. Pure with respect to its inputs; `now` is injected so
/// age-based tagging stays deterministic under test.
pub fn filter_candidates(
    candidates: &[VideoCandidate],
    videos: &HashMap<String, VideoStats>,
    channels: &HashMap<String, u64>,
    criteria: &SearchCriteria,
    keyword: &str,
    now: DateTime<Utc>,
) -> Vec<RankedResult> {
    let mut results = Vec::new();

    for candidate in candidates {
        // Inner join: a candidate missing either stats record is excluded.
        let Some(stats) = videos.get(&candidate.video_id) else {
            continue;
        };
        let Some(&subs) = channels.get(&candidate.channel_id) else {
            continue;
        };

        if stats.duration_secs < MIN_DURATION_SECS
            || stats.view_count < criteria.min_views
            || subs > criteria.max_subs
        {
            continue;
        }

        let age_days = (now - candidate.published_at).num_days();

        let mut trend_tags = Vec::new();
        if stats.view_count >= subs.saturating_mul(5) {
            trend_tags.push(TrendTag::ViewsSubsExplosion);
        }
        if age_days <= FAST_GROWTH_MAX_AGE_DAYS && stats.view_count >= FAST_GROWTH_MIN_VIEWS {
            trend_tags.push(TrendTag::FastGrowth);
        }
        if stats.view_count >= BREAKOUT_MIN_VIEWS {
            trend_tags.push(TrendTag::Breakout);
        }

        results.push(RankedResult {
            title: candidate.title.clone(),
            url: format!("https://www.youtube.com/watch?v={}", candidate.video_id),
            view_count: stats.view_count,
            subscriber_count: subs,
            duration_minutes: stats.duration_secs / 60,
            keyword: keyword.to_string(),
            trend_tags,
        });
    }

    results
}

/// Final ordering: descending by (tag count, views). Stable, so ties keep
/// their relative input order.
pub fn rank(results: &mut [RankedResult]) {
    results.sort_by(|a, b| {
        (b.trend_tags.len(), b.view_count).cmp(&(a.trend_tags.len(), a.view_count))
    });
}

/// Run the full pipeline for one keyword: search, enrich, filter. The three
/// network calls run strictly in sequence; any transport failure aborts this
/// keyword and propagates to the caller.
pub async fn scan_keyword(
    client: &YouTubeClient,
    keyword: &str,
    criteria: &SearchCriteria,
    max_results: u32,
    now: DateTime<Utc>,
) -> Result<Vec<RankedResult>> {
    let request = SearchRequest::new(keyword, criteria.lookback_days, max_results, now);
    let candidates = client.search(&request).await?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let video_ids: Vec<&str> = candidates.iter().map(|c| c.video_id.as_str()).collect();
    let channel_ids: Vec<&str> = candidates.iter().map(|c| c.channel_id.as_str()).collect();

    let videos = client.video_stats(&video_ids).await?;
    let channels = client.channel_stats(&channel_ids).await?;

    Ok(filter_candidates(
        &candidates,
        &videos,
        &channels,
        criteria,
        keyword,
        now,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn candidate(video_id: &str, channel_id: &str, age_days: i64) -> VideoCandidate {
        VideoCandidate {
            video_id: video_id.to_string(),
            channel_id: channel_id.to_string(),
            title: format!("video {video_id}"),
            published_at: now() - chrono::Duration::days(age_days),
        }
    }

    fn stats(view_count: u64, duration_secs: u64) -> VideoStats {
        VideoStats {
            view_count,
            duration_secs,
        }
    }

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            lookback_days: 7,
            min_views: 8_000,
            max_subs: 3_000,
        }
    }

    #[test]
    fn candidate_without_video_stats_never_appears() {
        let candidates = vec![candidate("v1", "c1", 1)];
        let videos = HashMap::new();
        let channels = HashMap::from([("c1".to_string(), 100u64)]);

        let results = filter_candidates(&candidates, &videos, &channels, &criteria(), "k", now());
        assert!(results.is_empty());
    }

    #[test]
    fn candidate_without_channel_stats_never_appears() {
        let candidates = vec![candidate("v1", "c1", 1)];
        let videos = HashMap::from([("v1".to_string(), stats(1_000_000, 600))]);
        let channels = HashMap::new();

        let results = filter_candidates(&candidates, &videos, &channels, &criteria(), "k", now());
        assert!(results.is_empty());
    }

    #[test]
    fn duration_floor_is_exact() {
        let candidates = vec![candidate("short", "c1", 5), candidate("long", "c1", 5)];
        let videos = HashMap::from([
            ("short".to_string(), stats(10_000, 299)),
            ("long".to_string(), stats(10_000, 300)),
        ]);
        let channels = HashMap::from([("c1".to_string(), 1_000u64)]);

        let results = filter_candidates(&candidates, &videos, &channels, &criteria(), "k", now());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://www.youtube.com/watch?v=long");
        assert_eq!(results[0].duration_minutes, 5);
    }

    #[test]
    fn trend_tags_are_deterministic_and_ordered() {
        let candidates = vec![candidate("v1", "c1", 1)];
        let videos = HashMap::from([("v1".to_string(), stats(100_000, 600))]);
        let channels = HashMap::from([("c1".to_string(), 1_000u64)]);

        let results = filter_candidates(&candidates, &videos, &channels, &criteria(), "k", now());
        assert_eq!(
            results[0].trend_tags,
            vec![
                TrendTag::ViewsSubsExplosion,
                TrendTag::FastGrowth,
                TrendTag::Breakout
            ]
        );
        assert_eq!(
            results[0].trend_summary(),
            "Views/Subs Explosion | Fast Growth | Breakout"
        );
    }

    #[test]
    fn untagged_result_still_appears_as_normal() {
        // 9000 views, 2900 subs: below 5x subs, too old for fast growth,
        // below breakout.
        let candidates = vec![candidate("v1", "c1", 6)];
        let videos = HashMap::from([("v1".to_string(), stats(9_000, 600))]);
        let channels = HashMap::from([("c1".to_string(), 2_900u64)]);

        let results = filter_candidates(&candidates, &videos, &channels, &criteria(), "k", now());
        assert_eq!(results.len(), 1);
        assert!(results[0].trend_tags.is_empty());
        assert_eq!(results[0].trend_summary(), "Normal");
    }

    #[test]
    fn fast_growth_needs_both_recency_and_views() {
        let candidates = vec![
            candidate("recent_low", "c1", 2),
            candidate("old_high", "c1", 4),
            candidate("recent_high", "c1", 3),
        ];
        let videos = HashMap::from([
            ("recent_low".to_string(), stats(7_999, 600)),
            ("old_high".to_string(), stats(20_000, 600)),
            ("recent_high".to_string(), stats(20_000, 600)),
        ]);
        let channels = HashMap::from([("c1".to_string(), 100_000u64)]);

        let loose = SearchCriteria {
            min_views: 0,
            max_subs: u64::MAX,
            ..criteria()
        };
        let results = filter_candidates(&candidates, &videos, &channels, &loose, "k", now());
        let tags: HashMap<_, _> = results
            .iter()
            .map(|r| (r.url.clone(), r.trend_tags.clone()))
            .collect();

        assert!(tags["https://www.youtube.com/watch?v=recent_low"].is_empty());
        assert!(tags["https://www.youtube.com/watch?v=old_high"].is_empty());
        assert_eq!(
            tags["https://www.youtube.com/watch?v=recent_high"],
            vec![TrendTag::FastGrowth]
        );
    }

    #[test]
    fn fast_growth_threshold_ignores_caller_min_views() {
        // min_views below the fixed 8000 gate: a 5000-view video passes the
        // filter but must not be tagged.
        let candidates = vec![candidate("v1", "c1", 1)];
        let videos = HashMap::from([("v1".to_string(), stats(5_000, 600))]);
        let channels = HashMap::from([("c1".to_string(), 100_000u64)]);

        let loose = SearchCriteria {
            min_views: 1_000,
            max_subs: u64::MAX,
            ..criteria()
        };
        let results = filter_candidates(&candidates, &videos, &channels, &loose, "k", now());
        assert_eq!(results.len(), 1);
        assert!(results[0].trend_tags.is_empty());
    }

    #[test]
    fn raising_min_views_never_grows_the_result_set() {
        let candidates: Vec<_> = (0..20).map(|i| candidate(&format!("v{i}"), "c1", 2)).collect();
        let videos: HashMap<_, _> = (0..20u64)
            .map(|i| (format!("v{i}"), stats(i * 3_000, 400 + i * 60)))
            .collect();
        let channels = HashMap::from([("c1".to_string(), 2_000u64)]);

        let mut previous_len = usize::MAX;
        for min_views in [0u64, 2_000, 8_000, 20_000, 50_000, 1_000_000] {
            let c = SearchCriteria {
                min_views,
                ..criteria()
            };
            let len = filter_candidates(&candidates, &videos, &channels, &c, "k", now()).len();
            assert!(len <= previous_len, "min_views={min_views} grew the set");
            previous_len = len;
        }
    }

    #[test]
    fn lowering_max_subs_never_grows_the_result_set() {
        let candidates: Vec<_> = (0..15).map(|i| candidate(&format!("v{i}"), &format!("c{i}"), 2)).collect();
        let videos: HashMap<_, _> = (0..15)
            .map(|i| (format!("v{i}"), stats(50_000, 600)))
            .collect();
        let channels: HashMap<_, _> = (0..15u64)
            .map(|i| (format!("c{i}"), i * 500))
            .collect();

        let mut previous_len = usize::MAX;
        for max_subs in [10_000u64, 5_000, 3_000, 1_000, 0] {
            let c = SearchCriteria {
                max_subs,
                min_views: 0,
                ..criteria()
            };
            let len = filter_candidates(&candidates, &videos, &channels, &c, "k", now()).len();
            assert!(len <= previous_len, "max_subs={max_subs} grew the set");
            previous_len = len;
        }
    }

    fn ranked(title: &str, tags: usize, views: u64) -> RankedResult {
        let all = [
            TrendTag::ViewsSubsExplosion,
            TrendTag::FastGrowth,
            TrendTag::Breakout,
        ];
        RankedResult {
            title: title.to_string(),
            url: format!("https://www.youtube.com/watch?v={title}"),
            view_count: views,
            subscriber_count: 1_000,
            duration_minutes: 10,
            keyword: "k".to_string(),
            trend_tags: all[..tags].to_vec(),
        }
    }

    #[test]
    fn ranking_orders_by_tag_count_then_views() {
        let mut results = vec![
            ranked("low", 0, 90_000),
            ranked("tagged", 2, 10_000),
            ranked("both", 2, 60_000),
            ranked("full", 3, 9_000),
        ];
        rank(&mut results);

        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["full", "both", "tagged", "low"]);
    }

    #[test]
    fn ranking_ties_preserve_input_order() {
        let mut results = vec![
            ranked("first", 1, 10_000),
            ranked("second", 1, 10_000),
            ranked("third", 1, 10_000),
        ];
        rank(&mut results);

        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn minutes_use_integer_division() {
        let candidates = vec![candidate("v1", "c1", 5)];
        let videos = HashMap::from([("v1".to_string(), stats(10_000, 659))]);
        let channels = HashMap::from([("c1".to_string(), 1_000u64)]);

        let results = filter_candidates(&candidates, &videos, &channels, &criteria(), "k", now());
        assert_eq!(results[0].duration_minutes, 10);
    }

    #[test]
    fn history_profile_carries_fixed_keywords() {
        let profile = ScanProfile::history();
        assert_eq!(profile.keywords.len(), 10);
        assert_eq!(profile.max_results, 15);
        assert_eq!(profile.style, ScriptStyle::Napoleon);
    }

    #[test]
    fn generic_profile_wraps_single_keyword() {
        let profile = ScanProfile::generic("Cars");
        assert_eq!(profile.keywords, vec!["Cars".to_string()]);
        assert_eq!(profile.max_results, 20);
        assert_eq!(profile.style, ScriptStyle::Generic);
    }
}
