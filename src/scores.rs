use crate::match_stats::Stat;
use crate::metrics::DerivedRow;

pub const SCORE_COLUMNS: [&str; 4] = [
    "finishing_score",
    "chance_creation_score",
    "progression_score",
    "dribbling_onball_score",
];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadarScores {
    pub finishing: Option<f64>,
    pub chance_creation: Option<f64>,
    pub progression: Option<f64>,
    pub dribbling_onball: Option<f64>,
}

impl RadarScores {
    pub fn values(&self) -> [Option<f64>; 4] {
        [
            self.finishing,
            self.chance_creation,
            self.progression,
            self.dribbling_onball,
        ]
    }
}

/// Min-max scaling over the population. Missing stays missing; an all-missing
/// column stays all-missing; if every valid value is the same they all get 0.5.
pub fn min_max(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let cleaned = values
        .iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect::<Vec<_>>();
    let mut valid = cleaned.iter().flatten().copied();
    let Some(first) = valid.next() else {
        return vec![None; values.len()];
    };
    let (min, max) = valid.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if max == min {
        return cleaned.iter().map(|v| v.map(|_| 0.5)).collect();
    }
    let span = max - min;
    cleaned.iter().map(|v| v.map(|x| (x - min) / span)).collect()
}

/// Mean of the present components, or missing when none are present.
pub fn mean_present(components: &[Option<f64>]) -> Option<f64> {
    let (sum, n) = components
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn composite(columns: &[Vec<Option<f64>>], rows: usize) -> Vec<Option<f64>> {
    (0..rows)
        .map(|i| {
            let components = columns.iter().map(|col| col[i]).collect::<Vec<_>>();
            mean_present(&components)
        })
        .collect()
}

fn column<F>(rows: &[DerivedRow], pick: F) -> Vec<Option<f64>>
where
    F: Fn(&DerivedRow) -> Option<f64>,
{
    let raw = rows.iter().map(pick).collect::<Vec<_>>();
    min_max(&raw)
}

pub fn compute_scores(rows: &[DerivedRow]) -> Vec<RadarScores> {
    let n = rows.len();

    let finishing = composite(
        &[
            column(rows, |r| r.metrics.goals_per_shot),
            column(rows, |r| r.metrics.execution_value_per_shot),
            column(rows, |r| r.metrics.box_touch_share),
            column(rows, |r| r.metrics.deep_touch_share),
        ],
        n,
    );

    let chance_creation = composite(
        &[
            column(rows, |r| r.metrics.key_pass_rate),
            column(rows, |r| r.metrics.assist_rate),
            column(rows, |r| r.metrics.box_pass_rate),
            column(rows, |r| r.metrics.deep_pass_rate),
        ],
        n,
    );

    let progression = composite(
        &[
            column(rows, |r| Some(r.metrics.prog_pass)),
            column(rows, |r| Some(r.metrics.prog_carry)),
        ],
        n,
    );

    // fewer losses on the ball -> higher value
    let clean_on_ball = column(rows, |r| Some(r.metrics.bad_touches))
        .into_iter()
        .map(|v| v.map(|x| 1.0 - x))
        .collect::<Vec<_>>();
    let dribbling = composite(
        &[
            column(rows, |r| r.metrics.dribble_success_ft),
            column(rows, |r| r.metrics.fouls_won_rate),
            clean_on_ball,
        ],
        n,
    );

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let ft_touches = row.player.stats.total(Stat::TouchesFinalThird);
            RadarScores {
                finishing: finishing[i],
                chance_creation: chance_creation[i],
                progression: progression[i],
                dribbling_onball: if ft_touches == 0.0 { None } else { dribbling[i] },
            }
        })
        .collect()
}

/// Percentile rank with ties sharing their average rank, divided by the
/// number of non-missing values.
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut present = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| x.is_finite()).map(|x| (i, x)))
        .collect::<Vec<_>>();
    let n = present.len();
    let mut out = vec![None; values.len()];
    if n == 0 {
        return out;
    }
    present.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut start = 0usize;
    while start < n {
        let mut end = start + 1;
        while end < n && present[end].1 == present[start].1 {
            end += 1;
        }
        // 1-based ranks start+1 ..= end share their mean
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        for (idx, _) in &present[start..end] {
            out[*idx] = Some(avg_rank / n as f64);
        }
        start = end;
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadarPercentiles {
    pub finishing: Option<f64>,
    pub chance_creation: Option<f64>,
    pub progression: Option<f64>,
    pub dribbling_onball: Option<f64>,
}

impl RadarPercentiles {
    pub fn values(&self) -> [Option<f64>; 4] {
        [
            self.finishing,
            self.chance_creation,
            self.progression,
            self.dribbling_onball,
        ]
    }
}

pub fn compute_percentiles(scores: &[RadarScores]) -> Vec<RadarPercentiles> {
    let rank = |pick: fn(&RadarScores) -> Option<f64>| {
        percentile_ranks(&scores.iter().map(pick).collect::<Vec<_>>())
    };
    let finishing = rank(|s| s.finishing);
    let chance_creation = rank(|s| s.chance_creation);
    let progression = rank(|s| s.progression);
    let dribbling_onball = rank(|s| s.dribbling_onball);

    (0..scores.len())
        .map(|i| RadarPercentiles {
            finishing: finishing[i],
            chance_creation: chance_creation[i],
            progression: progression[i],
            dribbling_onball: dribbling_onball[i],
        })
        .collect()
}
