use super::super::domain::{CareerSwipe, CategoryInterest, SwipeAction};
use super::DEFAULT_LOW_SCORE;

/// Like ratios per category, in the order categories were first swiped.
pub fn category_interest(swipes: &[CareerSwipe]) -> Vec<CategoryInterest> {
    let mut tallies: Vec<(String, usize, usize)> = Vec::new();

    for swipe in swipes {
        let category = swipe.category.trim();
        if category.is_empty() {
            continue;
        }

        let liked = usize::from(swipe.action == SwipeAction::Like);
        match tallies
            .iter_mut()
            .find(|(existing, _, _)| existing.eq_ignore_ascii_case(category))
        {
            Some((_, likes, total)) => {
                *likes += liked;
                *total += 1;
            }
            None => tallies.push((category.to_string(), liked, 1)),
        }
    }

    tallies
        .into_iter()
        .map(|(category, likes, total)| CategoryInterest {
            category,
            likes,
            total,
            like_ratio: likes as f64 / total as f64,
        })
        .collect()
}

/// Decisiveness of the strongest category: `|likeRatio - 0.5| * 2 * 100`.
///
/// Reports the maximum over categories rather than the mean, so one clear
/// preference is enough to score as clear. Exact ties keep the first-seen
/// category.
pub fn career_clarity(swipes: &[CareerSwipe]) -> f64 {
    let interests = category_interest(swipes);
    if interests.is_empty() {
        return DEFAULT_LOW_SCORE;
    }

    let mut best: Option<f64> = None;
    for interest in &interests {
        let decisiveness = (interest.like_ratio - 0.5).abs() * 2.0 * 100.0;
        if best.map_or(true, |current| decisiveness > current) {
            best = Some(decisiveness);
        }
    }

    best.unwrap_or(DEFAULT_LOW_SCORE).clamp(0.0, 100.0)
}

/// Category with the clearest decision, used for narrative callouts.
pub fn clearest_category(swipes: &[CareerSwipe]) -> Option<CategoryInterest> {
    let mut best: Option<(f64, CategoryInterest)> = None;
    for interest in category_interest(swipes) {
        let decisiveness = (interest.like_ratio - 0.5).abs();
        let replace = match &best {
            Some((current, _)) => decisiveness > *current,
            None => true,
        };
        if replace {
            best = Some((decisiveness, interest));
        }
    }
    best.map(|(_, interest)| interest)
}
