use crate::match_stats::{PlayerStats, Pressure, Stat, StatLine};

/// Weight for progressions that end inside the deep zone.
pub const DEEP_PROGRESSION_WEIGHT: f64 = 1.5;

pub const DERIVED_COLUMNS: [&str; 18] = [
    "xg_per_shot",
    "goals_per_shot",
    "execution_value_per_shot",
    "xg_per_shot_up",
    "goals_per_shot_up",
    "execution_value_per_shot_up",
    "dribble_success_ft",
    "dribble_success_ft_up",
    "box_touch_share",
    "deep_touch_share",
    "key_pass_rate",
    "assist_rate",
    "box_pass_rate",
    "deep_pass_rate",
    "prog_pass",
    "prog_carry",
    "fouls_won_rate",
    "bad_touches",
];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedMetrics {
    pub xg_per_shot: Option<f64>,
    pub goals_per_shot: Option<f64>,
    pub execution_value_per_shot: Option<f64>,
    pub xg_per_shot_up: Option<f64>,
    pub goals_per_shot_up: Option<f64>,
    pub execution_value_per_shot_up: Option<f64>,
    pub dribble_success_ft: Option<f64>,
    pub dribble_success_ft_up: Option<f64>,
    pub box_touch_share: Option<f64>,
    pub deep_touch_share: Option<f64>,
    pub key_pass_rate: Option<f64>,
    pub assist_rate: Option<f64>,
    pub box_pass_rate: Option<f64>,
    pub deep_pass_rate: Option<f64>,
    pub prog_pass: f64,
    pub prog_carry: f64,
    pub fouls_won_rate: Option<f64>,
    pub bad_touches: f64,
}

impl DerivedMetrics {
    pub fn from_stats(line: &StatLine) -> Self {
        let any = |stat| line.get(stat, Pressure::Any);
        let under = |stat| line.get(stat, Pressure::Under);
        let shots = any(Stat::Shots);
        let shots_up = under(Stat::Shots);
        let ft_touches = any(Stat::TouchesFinalThird);

        Self {
            xg_per_shot: ratio(any(Stat::Xg), shots),
            goals_per_shot: ratio(any(Stat::Goals), shots),
            execution_value_per_shot: ratio(any(Stat::ExecutionValue), shots),
            xg_per_shot_up: ratio(under(Stat::Xg), shots_up),
            goals_per_shot_up: ratio(under(Stat::Goals), shots_up),
            execution_value_per_shot_up: ratio(under(Stat::ExecutionValue), shots_up),
            dribble_success_ft: ratio(
                any(Stat::DribblesCompleted),
                any(Stat::DribblesAttempted),
            ),
            dribble_success_ft_up: ratio(
                under(Stat::DribblesCompleted),
                under(Stat::DribblesAttempted),
            ),
            box_touch_share: ratio(any(Stat::TouchesInBox), ft_touches),
            deep_touch_share: ratio(any(Stat::DeepTouches), ft_touches),
            key_pass_rate: ratio(any(Stat::KeyPassesFinalThird), ft_touches),
            assist_rate: ratio(any(Stat::AssistsFinalThird), ft_touches),
            box_pass_rate: ratio(any(Stat::PassesIntoBox), ft_touches),
            deep_pass_rate: ratio(any(Stat::PassesIntoDeepZone), ft_touches),
            prog_pass: any(Stat::ProgressionsPass)
                + DEEP_PROGRESSION_WEIGHT * any(Stat::ProgressionsPassDeep),
            prog_carry: any(Stat::ProgressionsCarry)
                + DEEP_PROGRESSION_WEIGHT * any(Stat::ProgressionsCarryDeep),
            fouls_won_rate: ratio(any(Stat::FoulsWon), ft_touches),
            bad_touches: any(Stat::Miscontrols) + any(Stat::Dispossessed),
        }
    }

    /// Values in `DERIVED_COLUMNS` order.
    pub fn values(&self) -> [Option<f64>; 18] {
        [
            self.xg_per_shot,
            self.goals_per_shot,
            self.execution_value_per_shot,
            self.xg_per_shot_up,
            self.goals_per_shot_up,
            self.execution_value_per_shot_up,
            self.dribble_success_ft,
            self.dribble_success_ft_up,
            self.box_touch_share,
            self.deep_touch_share,
            self.key_pass_rate,
            self.assist_rate,
            self.box_pass_rate,
            self.deep_pass_rate,
            Some(self.prog_pass),
            Some(self.prog_carry),
            self.fouls_won_rate,
            Some(self.bad_touches),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct DerivedRow {
    pub player: PlayerStats,
    pub metrics: DerivedMetrics,
}

pub fn derive_rows<'a, I>(players: I) -> Vec<DerivedRow>
where
    I: IntoIterator<Item = &'a PlayerStats>,
{
    players
        .into_iter()
        .map(|p| DerivedRow {
            player: p.clone(),
            metrics: DerivedMetrics::from_stats(&p.stats),
        })
        .collect()
}

/// Zero denominators give a missing value rather than inf/NaN.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let v = numerator / denominator;
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ratio_guards_zero() {
        assert_eq!(ratio(3.0, 0.0), None);
        assert_eq!(ratio(0.0, 0.0), None);
        assert_eq!(ratio(1.0, 4.0), Some(0.25));
    }

    #[test]
    fn empty_line_has_only_count_metrics() {
        let m = DerivedMetrics::from_stats(&StatLine::default());
        assert_eq!(m.goals_per_shot, None);
        assert_eq!(m.dribble_success_ft, None);
        assert_eq!(m.box_touch_share, None);
        assert_eq!(m.fouls_won_rate, None);
        assert_eq!(m.prog_pass, 0.0);
        assert_eq!(m.bad_touches, 0.0);
    }

    #[test]
    fn rates_use_final_third_touches() {
        let mut line = StatLine::default();
        line.record(Stat::TouchesFinalThird, false, 20.0);
        line.record(Stat::TouchesInBox, false, 5.0);
        line.record(Stat::KeyPassesFinalThird, false, 2.0);
        line.record(Stat::FoulsWon, false, 1.0);
        line.record(Stat::Shots, true, 4.0);
        line.record(Stat::Goals, true, 1.0);
        line.record(Stat::Xg, false, 0.8);
        line.record(Stat::ExecutionValue, false, 0.2);
        line.record(Stat::ProgressionsPass, false, 6.0);
        line.record(Stat::ProgressionsPassDeep, false, 2.0);
        line.record(Stat::ProgressionsCarryDeep, false, 1.0);
        line.record(Stat::Miscontrols, false, 2.0);
        line.record(Stat::Dispossessed, false, 3.0);

        let m = DerivedMetrics::from_stats(&line);
        assert_relative_eq!(m.box_touch_share.unwrap(), 0.25);
        assert_relative_eq!(m.key_pass_rate.unwrap(), 0.1);
        assert_relative_eq!(m.fouls_won_rate.unwrap(), 0.05);
        assert_relative_eq!(m.goals_per_shot.unwrap(), 0.25);
        assert_relative_eq!(m.goals_per_shot_up.unwrap(), 0.25);
        assert_relative_eq!(m.xg_per_shot.unwrap(), 0.2);
        assert_relative_eq!(m.xg_per_shot_up.unwrap(), 0.0);
        assert_relative_eq!(m.execution_value_per_shot.unwrap(), 0.05);
        assert_relative_eq!(m.prog_pass, 9.0);
        assert_relative_eq!(m.prog_carry, 1.5);
        assert_relative_eq!(m.bad_touches, 5.0);
        assert_eq!(m.assist_rate, Some(0.0));
    }
}
