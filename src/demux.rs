//! SNR extraction per satellite and band
use crate::{
    cfg::OrbitKind,
    prelude::SV,
    rinex::observation::{ObservationData, ObservationEpoch, SnrBand, SnrObservations, SnrValues},
};

/// Dense SNR values of this [SV] where missing bands are replaced by 0.
/// An [SV] that was not observed is entirely null.
pub fn zero_filled(epoch: &ObservationEpoch, sv: SV) -> SnrValues {
    let snr = epoch.observations(sv).copied().unwrap_or_default();
    dense(&snr)
}

/// Dense SNR values of this [SV], only when the primary band (S1) is present.
/// Companion bands are zero filled.
pub fn primary_masked(epoch: &ObservationEpoch, sv: SV) -> Option<SnrValues> {
    let snr = epoch.observations(sv)?;
    snr.get(SnrBand::S1)?;
    Some(dense(snr))
}

fn dense(snr: &SnrObservations) -> SnrValues {
    let mut values = SnrValues::default();
    for band in SnrBand::ALL {
        // S8 not observed: 0, not NaN
        values.0[band.index()] = snr.get(band).unwrap_or(0.0);
    }
    values
}

/// Epoch selection policy, which depends on the orbit source.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Zero filled bands, S1 must be strictly positive.
    PrimaryPositive,
    /// S1 must not be missing, companions are zero filled.
    PrimaryPresent,
}

impl From<OrbitKind> for FilterPolicy {
    fn from(kind: OrbitKind) -> Self {
        match kind {
            OrbitKind::Broadcast => Self::PrimaryPositive,
            OrbitKind::Precise => Self::PrimaryPresent,
        }
    }
}

impl FilterPolicy {
    /// Returns the SNR values of this [SV] when this epoch is usable.
    pub fn select(&self, epoch: &ObservationEpoch, sv: SV) -> Option<SnrValues> {
        match self {
            Self::PrimaryPositive => {
                let values = zero_filled(epoch, sv);
                if values.get(SnrBand::S1) > 0.0 {
                    Some(values)
                } else {
                    None
                }
            },
            Self::PrimaryPresent => primary_masked(epoch, sv),
        }
    }
}

/// Time series of one band of this [SV], as (epoch index, value) pairs,
/// restricted to the epochs retained by this [FilterPolicy].
pub fn series(
    data: &ObservationData,
    sv: SV,
    band: SnrBand,
    policy: FilterPolicy,
) -> Vec<(usize, f64)> {
    data.epochs
        .iter()
        .enumerate()
        .filter_map(|(i, epoch)| policy.select(epoch, sv).map(|values| (i, values.get(band))))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::{Constellation, Epoch};
    use std::collections::BTreeMap;

    fn epoch(snr: &[(SV, SnrObservations)]) -> ObservationEpoch {
        ObservationEpoch {
            epoch: Epoch::default(),
            date: (2020, 6, 25),
            time: (0, 0, 0.0),
            flag: 0,
            snr: snr.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn dense_values() {
        let g01 = SV::new(Constellation::GPS, 1);
        let g02 = SV::new(Constellation::GPS, 2);
        let snr = SnrObservations::default()
            .with(SnrBand::S1, 45.0)
            .with(SnrBand::S5, 50.0);
        let e = epoch(&[(g01, snr)]);

        let values = zero_filled(&e, g01);
        assert_eq!(values.0, [45.0, 0.0, 50.0, 0.0, 0.0, 0.0]);
        assert_eq!(values.get(SnrBand::S8), 0.0);
        assert_eq!(zero_filled(&e, g02), SnrValues::default());

        assert_eq!(primary_masked(&e, g01), Some(values));
        assert_eq!(primary_masked(&e, g02), None);
    }

    #[test]
    fn filtering_policies() {
        let g01 = SV::new(Constellation::GPS, 1);
        let g02 = SV::new(Constellation::GPS, 2);
        let g03 = SV::new(Constellation::GPS, 3);

        // S1 null, S1 missing, S1 valid
        let null = SnrObservations::default().with(SnrBand::S1, 0.0).with(SnrBand::S2, 30.0);
        let missing = SnrObservations::default().with(SnrBand::S2, 30.0);
        let valid = SnrObservations::default().with(SnrBand::S1, 42.0);
        let e = epoch(&[(g01, null), (g02, missing), (g03, valid)]);

        let policy = FilterPolicy::from(OrbitKind::Broadcast);
        assert!(policy.select(&e, g01).is_none());
        assert!(policy.select(&e, g02).is_none());
        assert!(policy.select(&e, g03).is_some());

        // a null S1 is present
        let policy = FilterPolicy::from(OrbitKind::Precise);
        assert!(policy.select(&e, g01).is_some());
        assert!(policy.select(&e, g02).is_none());
        assert!(policy.select(&e, g03).is_some());
    }

    #[test]
    fn band_series() {
        let g01 = SV::new(Constellation::GPS, 1);
        let data = ObservationData::new(
            Default::default(),
            vec![
                epoch(&[(g01, SnrObservations::default().with(SnrBand::S1, 40.0).with(SnrBand::S2, 31.0))]),
                epoch(&[(g01, SnrObservations::default().with(SnrBand::S2, 32.0))]),
                epoch(&[(g01, SnrObservations::default().with(SnrBand::S1, 41.0))]),
            ],
        );

        let s2 = series(&data, g01, SnrBand::S2, FilterPolicy::PrimaryPresent);
        assert_eq!(s2, vec![(0, 31.0), (2, 0.0)]);

        let s1 = series(&data, g01, SnrBand::S1, FilterPolicy::PrimaryPositive);
        assert_eq!(s1, vec![(0, 40.0), (2, 41.0)]);
    }
}
