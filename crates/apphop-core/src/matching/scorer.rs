use crate::config::ScoringConfig;
use crate::matching::tokens::{MatchTokens, normalize};
use crate::process::ProcessIdSet;
use crate::window::{TaskListing, WindowDescriptor};

/// A candidate together with the score that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored<T> {
    pub item: T,
    pub score: u32,
}

/// Resolved point weights and thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub process_match: u32,
    pub title_exact: u32,
    pub title_contains: u32,
    pub class_exact: u32,
    pub class_contains: u32,
    pub listing_title_exact: u32,
    pub listing_title_contains: u32,
    pub window_threshold: u32,
    pub listing_threshold: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoringConfig::default().weights()
    }
}

/// Scores candidates against a target using configured weights.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score an enumerated window.
    ///
    /// Owning pid in `pids` adds `process_match`. Then, per token, the title
    /// adds `title_exact` on equality or else `title_contains` on substring,
    /// and the class name likewise adds `class_exact` or `class_contains`.
    pub fn score_window(
        &self,
        window: &WindowDescriptor,
        pids: &ProcessIdSet,
        tokens: &MatchTokens,
    ) -> u32 {
        let w = &self.weights;
        let mut score = 0u32;
        if pids.contains(window.pid) {
            score = score.saturating_add(w.process_match);
        }

        let title = normalize(&window.title);
        let class_name = normalize(&window.class_name);
        for token in tokens.iter() {
            score = score.saturating_add(text_points(&title, token, w.title_exact, w.title_contains));
            score = score.saturating_add(text_points(
                &class_name,
                token,
                w.class_exact,
                w.class_contains,
            ));
        }
        score
    }

    /// Score a task listing title; no pid or class evidence is available.
    pub fn score_listing_title(&self, title: &str, tokens: &MatchTokens) -> u32 {
        let w = &self.weights;
        let title = normalize(title);
        tokens.iter().fold(0u32, |score, token| {
            score.saturating_add(text_points(
                &title,
                token,
                w.listing_title_exact,
                w.listing_title_contains,
            ))
        })
    }

    /// Highest-scoring window at or above `window_threshold`.
    pub fn best_window<'w>(
        &self,
        windows: &'w [WindowDescriptor],
        pids: &ProcessIdSet,
        tokens: &MatchTokens,
    ) -> Option<Scored<&'w WindowDescriptor>> {
        select_best(
            windows.iter(),
            |window| self.score_window(window, pids, tokens),
            self.weights.window_threshold,
        )
    }

    /// Highest-scoring listing row at or above `listing_threshold`.
    pub fn best_listing<'l>(
        &self,
        rows: &'l [TaskListing],
        tokens: &MatchTokens,
    ) -> Option<Scored<&'l TaskListing>> {
        select_best(
            rows.iter(),
            |row| self.score_listing_title(&row.title, tokens),
            self.weights.listing_threshold,
        )
    }
}

fn text_points(text: &str, token: &str, exact: u32, contains: u32) -> u32 {
    if token.is_empty() || text.is_empty() {
        0
    } else if text == token {
        exact
    } else if text.contains(token) {
        contains
    } else {
        0
    }
}

/// A later candidate replaces the best only with a strictly higher score,
/// so ties keep the first one seen. A zero score is never selected, even
/// against a zero threshold.
fn select_best<T>(
    candidates: impl Iterator<Item = T>,
    score: impl Fn(&T) -> u32,
    threshold: u32,
) -> Option<Scored<T>> {
    let mut best: Option<Scored<T>> = None;
    for item in candidates {
        let s = score(&item);
        if s > 0 && best.as_ref().is_none_or(|b| s > b.score) {
            best = Some(Scored { item, score: s });
        }
    }
    best.filter(|b| b.score >= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessId;
    use crate::window::WindowHandle;

    fn window(handle: u64, pid: u32, title: &str, class_name: &str) -> WindowDescriptor {
        WindowDescriptor {
            handle: WindowHandle::from_raw(handle),
            pid: ProcessId::from(pid),
            title: title.to_string(),
            class_name: class_name.to_string(),
            process_name: String::new(),
            process_path: String::new(),
        }
    }

    fn pids(values: &[u32]) -> ProcessIdSet {
        values.iter().copied().collect()
    }

    fn listing(pid: u32, title: &str) -> TaskListing {
        TaskListing {
            pid: ProcessId::from(pid),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_notepad_window_scores_115() {
        let scorer = Scorer::default();
        let tokens = MatchTokens::build("Notepad", r"C:\Windows\System32\notepad.exe");
        let win = window(1, 4321, "Untitled - Notepad", "");

        assert_eq!(scorer.score_window(&win, &pids(&[4321]), &tokens), 115);
    }

    #[test]
    fn test_process_match_alone_scores_100() {
        let scorer = Scorer::default();
        let tokens = MatchTokens::build("Foo", r"C:\Apps\foo.exe");
        let win = window(1, 7, "Unrelated", "SomeClass");

        assert_eq!(scorer.score_window(&win, &pids(&[7]), &tokens), 100);
        assert!(scorer.best_window(std::slice::from_ref(&win), &pids(&[7]), &tokens).is_some());
    }

    #[test]
    fn test_title_exact_without_pid() {
        let scorer = Scorer::default();
        let tokens: MatchTokens = ["Bar Editor"].into_iter().collect();

        let win = window(1, 1, "Bar Editor", "");
        // "bar editor" exact (+40); fragments "bar" and "editor" are substrings (+15 each).
        assert_eq!(scorer.score_window(&win, &ProcessIdSet::new(), &tokens), 70);

        let exact_only: MatchTokens = ["bar"].into_iter().collect();
        let win = window(2, 1, "bar", "");
        assert_eq!(scorer.score_window(&win, &ProcessIdSet::new(), &exact_only), 40);
        assert_eq!(scorer.score_listing_title("Bar", &exact_only), 30);
    }

    #[test]
    fn test_title_substring_thresholds() {
        let scorer = Scorer::default();
        let tokens: MatchTokens = ["bar"].into_iter().collect();

        // 15 on the window path: below 30.
        let windows = vec![window(1, 1, "Bar Editor", "")];
        assert_eq!(
            scorer.score_window(&windows[0], &ProcessIdSet::new(), &tokens),
            15
        );
        assert!(scorer.best_window(&windows, &ProcessIdSet::new(), &tokens).is_none());

        // 10 on the listing path: meets 10.
        let rows = vec![listing(1, "Bar Editor")];
        let best = scorer.best_listing(&rows, &tokens).unwrap();
        assert_eq!(best.score, 10);
        assert_eq!(best.item.title, "Bar Editor");
    }

    #[test]
    fn test_window_threshold_is_inclusive() {
        let scorer = Scorer::new(ScoreWeights {
            title_exact: 30,
            ..ScoreWeights::default()
        });
        let tokens: MatchTokens = ["bar"].into_iter().collect();
        let windows = vec![window(1, 1, "bar", "")];

        let best = scorer.best_window(&windows, &ProcessIdSet::new(), &tokens).unwrap();
        assert_eq!(best.score, 30);

        let scorer = Scorer::new(ScoreWeights {
            title_exact: 29,
            ..ScoreWeights::default()
        });
        assert!(scorer.best_window(&windows, &ProcessIdSet::new(), &tokens).is_none());
    }

    #[test]
    fn test_class_points() {
        let scorer = Scorer::default();
        let tokens: MatchTokens = ["notepad"].into_iter().collect();

        let exact = window(1, 1, "", "Notepad");
        assert_eq!(scorer.score_window(&exact, &ProcessIdSet::new(), &tokens), 15);

        let contains = window(2, 1, "", "NotepadPlusPlus");
        assert_eq!(scorer.score_window(&contains, &ProcessIdSet::new(), &tokens), 5);
    }

    #[test]
    fn test_adding_tokens_never_lowers_score() {
        let scorer = Scorer::default();
        let win = window(1, 5, "Visual Studio Code - main.rs", "Chrome_WidgetWin_1");
        let set = pids(&[5]);

        let mut tokens = MatchTokens::default();
        let mut previous = scorer.score_window(&win, &set, &tokens);
        for source in ["code", "Visual Studio Code", "chrome", "main.rs", "zzz"] {
            tokens.add(source);
            let current = scorer.score_window(&win, &set, &tokens);
            assert!(current >= previous, "{source}: {current} < {previous}");
            previous = current;
        }
    }

    #[test]
    fn test_highest_score_wins() {
        let scorer = Scorer::default();
        let tokens = MatchTokens::build("Notepad", r"C:\Windows\System32\notepad.exe");
        let windows = vec![
            window(1, 99, "notepad", ""),
            window(2, 4321, "Untitled - Notepad", ""),
        ];

        let best = scorer.best_window(&windows, &pids(&[4321]), &tokens).unwrap();
        assert_eq!(best.item.handle.as_u64(), 2);
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let scorer = Scorer::default();
        let tokens: MatchTokens = ["bar"].into_iter().collect();
        let rows = vec![listing(1, "Bar One"), listing(2, "Bar Two")];

        let best = scorer.best_listing(&rows, &tokens).unwrap();
        assert_eq!(best.item.pid.as_u32(), 1);
    }

    #[test]
    fn test_zero_score_never_selected_with_zero_threshold() {
        let scorer = Scorer::new(ScoreWeights {
            listing_threshold: 0,
            window_threshold: 0,
            ..ScoreWeights::default()
        });
        let tokens: MatchTokens = ["bar"].into_iter().collect();

        let rows = vec![listing(1, "Unrelated"), listing(2, "Other")];
        assert!(scorer.best_listing(&rows, &tokens).is_none());

        let windows = vec![window(1, 1, "Unrelated", "")];
        assert!(scorer.best_window(&windows, &ProcessIdSet::new(), &tokens).is_none());

        let rows = vec![listing(1, "Unrelated"), listing(2, "Bar Editor")];
        let best = scorer.best_listing(&rows, &tokens).unwrap();
        assert_eq!(best.item.pid.as_u32(), 2);
    }

    #[test]
    fn test_empty_candidates() {
        let scorer = Scorer::default();
        let tokens: MatchTokens = ["bar"].into_iter().collect();
        assert!(scorer.best_window(&[], &ProcessIdSet::new(), &tokens).is_none());
        assert!(scorer.best_listing(&[], &tokens).is_none());
    }
}
