//! SP3 position records, reduced to [PreciseOrbitRow]s
use std::path::Path;

use log::debug;

use sp3::prelude::SP3;

use crate::{
    error::Error,
    precise::PreciseOrbitRow,
    prelude::{Epoch, TimeScale},
    sv::numeric_id,
    time::gps_week_seconds,
};

/// Reads every [PreciseOrbitRow] of a local SP3 file, coordinates converted to meters.
/// Null (missing) positions and constellations without addon are not retained.
pub fn from_file(path: &Path) -> Result<Vec<PreciseOrbitRow>, Error> {
    let path = path.to_string_lossy().to_string();
    let sp3 = SP3::from_file(&path)?;

    let rows = sp3
        .sv_position()
        .filter_map(|(epoch, sv, (x_km, y_km, z_km))| {
            let id = numeric_id(sv)?;
            if x_km == 0.0 && y_km == 0.0 && z_km == 0.0 {
                debug!("sp3: missing position for {} @ {}", sv, epoch);
                return None;
            }

            let (week, nanos) = epoch
                .to_time_scale(sp3::prelude::TimeScale::GPST)
                .to_time_of_week();
            let (week, sow) =
                gps_week_seconds(Epoch::from_time_of_week(week, nanos, TimeScale::GPST));

            Some(PreciseOrbitRow {
                id,
                week,
                sow,
                x_m: x_km * 1.0E3,
                y_m: y_km * 1.0E3,
                z_m: z_km * 1.0E3,
            })
        })
        .collect();

    Ok(rows)
}
