//! Adapters from parsed RINEX records
use crate::prelude::{Epoch, TimeScale};

pub mod navigation;
pub mod observation;

/// Rebuilds a RINEX [rinex::prelude::Epoch] as a GPST [Epoch],
/// through its GPS week and nanoseconds of week.
pub(crate) fn gpst(epoch: rinex::prelude::Epoch) -> Epoch {
    let (week, nanos) = epoch
        .to_time_scale(rinex::prelude::TimeScale::GPST)
        .to_time_of_week();
    Epoch::from_time_of_week(week, nanos, TimeScale::GPST)
}
