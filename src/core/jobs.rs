//! The scheduled maintenance jobs exposed over HTTP

use crate::constants::{
    PROC_AMBULANCE_DAILY_PENALTIES, PROC_EXPIRE_PENDING_CHALLENGES,
    PROC_MONTHLY_INACTIVITY_PENALTIES, PROC_OVERDUE_PENALTIES,
};
use crate::core::pipeline::{Pipeline, Step};

const DAILY_PENALTY_STEPS: &[Step] = &[
    Step::new("ambulance_penalties", PROC_AMBULANCE_DAILY_PENALTIES),
    Step::new("overdue_penalties", PROC_OVERDUE_PENALTIES),
];

const EXPIRE_CHALLENGE_STEPS: &[Step] =
    &[Step::new("expired_count", PROC_EXPIRE_PENDING_CHALLENGES)];

const MONTHLY_PENALTY_STEPS: &[Step] =
    &[Step::new("inactivity_penalties", PROC_MONTHLY_INACTIVITY_PENALTIES)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CronJob {
    DailyPenalties,
    ExpireChallenges,
    MonthlyPenalties,
}

impl CronJob {
    pub const ALL: [CronJob; 3] = [
        CronJob::DailyPenalties,
        CronJob::ExpireChallenges,
        CronJob::MonthlyPenalties,
    ];

    /// Path segment under `/api/cron/`
    pub fn slug(&self) -> &'static str {
        match self {
            CronJob::DailyPenalties => "daily-penalties",
            CronJob::ExpireChallenges => "expire-challenges",
            CronJob::MonthlyPenalties => "monthly-penalties",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|job| job.slug() == slug)
    }

    /// Procedures run for this job, in order
    pub fn pipeline(&self) -> Pipeline {
        match self {
            CronJob::DailyPenalties => Pipeline::new(DAILY_PENALTY_STEPS),
            CronJob::ExpireChallenges => Pipeline::new(EXPIRE_CHALLENGE_STEPS),
            CronJob::MonthlyPenalties => Pipeline::new(MONTHLY_PENALTY_STEPS),
        }
    }
}

impl std::fmt::Display for CronJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for job in CronJob::ALL {
            assert_eq!(CronJob::from_slug(job.slug()), Some(job));
        }
        assert_eq!(CronJob::from_slug("weekly-penalties"), None);
    }

    #[test]
    fn test_daily_penalties_order() {
        let steps = CronJob::DailyPenalties.pipeline().steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].procedure, "apply_ambulance_daily_penalties");
        assert_eq!(steps[1].procedure, "apply_overdue_penalties");
    }

    #[test]
    fn test_single_step_jobs() {
        let expire = CronJob::ExpireChallenges.pipeline().steps();
        assert_eq!(expire, &[Step::new("expired_count", "expire_pending_challenges")]);

        let monthly = CronJob::MonthlyPenalties.pipeline().steps();
        assert_eq!(
            monthly,
            &[Step::new("inactivity_penalties", "apply_monthly_inactivity_penalties")]
        );
    }
}
