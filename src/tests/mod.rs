
use log::LevelFilter;
use std::{fs, path::PathBuf, sync::Once};

use crate::{
    ephemeris::EphemerisBlock,
    precise::PreciseOrbitRow,
    prelude::{Constellation, Epoch, TimeScale, Vector3, SV},
    time::gpst_epoch,
};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// (year, month, day, hours, minutes, seconds)
pub type Date = (i32, u8, u8, u8, u8, f64);

/// Date of the i-th 30s sample of 2020-06-25
pub fn sample_date(i: usize) -> Date {
    let seconds = 30 * i;
    (
        2020,
        6,
        25,
        (seconds / 3600) as u8,
        (seconds % 3600 / 60) as u8,
        (seconds % 60) as f64,
    )
}

/// Writes `content` to a file of a dedicated temporary directory.
pub fn temp_file(dir: &str, name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rinex2snr-{}", dir));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Mean Earth radius used to place test receivers (m)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// SNR values of one satellite, in order of the SNR observables of the header.
pub struct SnrEntry {
    pub sv: SV,
    pub snr: Vec<Option<f64>>,
}

impl SnrEntry {
    pub fn new(sv: SV, snr: &[Option<f64>]) -> Self {
        Self {
            sv,
            snr: snr.to_vec(),
        }
    }
}

fn letter(constellation: Constellation) -> char {
    match constellation {
        Constellation::Glonass => 'R',
        Constellation::Galileo => 'E',
        Constellation::BeiDou => 'C',
        _ => 'G',
    }
}

fn header_line(content: &str, label: &str) -> String {
    format!("{:<60}{}\n", content, label)
}

fn time_of_first_obs<T>(epochs: &[(Date, T)]) -> String {
    match epochs.first() {
        Some(((y, m, d, hh, mm, ss), _)) => header_line(
            &format!("  {:4}{:6}{:6}{:6}{:6}{:13.7}     GPS", y, m, d, hh, mm, ss),
            "TIME OF FIRST OBS",
        ),
        None => String::new(),
    }
}

fn observation(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:14.3}  ", value),
        None => " ".repeat(16),
    }
}

/// Builds a V2 observation RINEX.
/// Observables that are not SNR observables are given a dummy value.
pub fn rinex_v2(
    receiver: Vector3<f64>,
    observables: &[&str],
    epochs: &[(Date, Vec<SnrEntry>)],
) -> String {
    let mut content = header_line(
        &format!("{:>9}{:11}{:<20}{:<20}", "2.11", "", "OBSERVATION DATA", "M (MIXED)"),
        "RINEX VERSION / TYPE",
    );
    content.push_str(&header_line("test", "MARKER NAME"));
    content.push_str(&header_line(
        &format!("{:14.4}{:14.4}{:14.4}", receiver[0], receiver[1], receiver[2]),
        "APPROX POSITION XYZ",
    ));

    for (i, chunk) in observables.chunks(9).enumerate() {
        let mut line = if i == 0 {
            format!("{:6}", observables.len())
        } else {
            " ".repeat(6)
        };
        for code in chunk {
            line.push_str(&format!("    {:<2}", code));
        }
        content.push_str(&header_line(&line, "# / TYPES OF OBSERV"));
    }
    content.push_str(&time_of_first_obs(epochs));
    content.push_str(&header_line("", "END OF HEADER"));

    for ((y, m, d, hh, mm, ss), entries) in epochs {
        let mut line = format!(
            " {:02} {:>2} {:>2} {:>2} {:>2}{:11.7}  {}{:3}",
            y % 100,
            m,
            d,
            hh,
            mm,
            ss,
            0,
            entries.len()
        );
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 && i % 12 == 0 {
                line.push('\n');
                line.push_str(&" ".repeat(32));
            }
            line.push_str(&format!("{}{:02}", letter(entry.sv.constellation), entry.sv.prn));
        }
        content.push_str(&line);
        content.push('\n');

        for entry in entries {
            let mut snr = entry.snr.iter();
            let mut line = String::new();
            for (i, code) in observables.iter().enumerate() {
                if i > 0 && i % 5 == 0 {
                    content.push_str(line.trim_end());
                    content.push('\n');
                    line.clear();
                }
                let value = if code.starts_with('S') {
                    snr.next().copied().flatten()
                } else {
                    Some(20_000_000.0 + i as f64)
                };
                line.push_str(&observation(value));
            }
            content.push_str(line.trim_end());
            content.push('\n');
        }
    }
    content
}

/// Builds a V3 observation RINEX. Each satellite provides
/// one value per observable of its constellation.
#[allow(clippy::type_complexity)]
pub fn rinex_v3(
    receiver: Vector3<f64>,
    systems: &[(char, Vec<&str>)],
    epochs: &[(Date, Vec<(SV, Vec<Option<f64>>)>)],
) -> String {
    let mut content = header_line(
        &format!("{:>9}{:11}{:<20}{:<20}", "3.04", "", "OBSERVATION DATA", "M: Mixed"),
        "RINEX VERSION / TYPE",
    );
    content.push_str(&header_line(
        &format!("{:14.4}{:14.4}{:14.4}", receiver[0], receiver[1], receiver[2]),
        "APPROX POSITION XYZ",
    ));
    for (system, codes) in systems {
        for (i, chunk) in codes.chunks(13).enumerate() {
            let mut line = if i == 0 {
                format!("{}  {:3}", system, codes.len())
            } else {
                " ".repeat(6)
            };
            for code in chunk {
                line.push_str(&format!(" {:<3}", code));
            }
            content.push_str(&header_line(&line, "SYS / # / OBS TYPES"));
        }
    }
    content.push_str(&header_line("     30.000", "INTERVAL"));
    content.push_str(&time_of_first_obs(epochs));
    content.push_str(&header_line("", "END OF HEADER"));

    for ((y, m, d, hh, mm, ss), satellites) in epochs {
        content.push_str(&format!(
            "> {:04} {:02} {:02} {:02} {:02}{:11.7}  {}{:3}\n",
            y,
            m,
            d,
            hh,
            mm,
            ss,
            0,
            satellites.len()
        ));
        for (sv, values) in satellites {
            let mut line = format!("{}{:02}", letter(sv.constellation), sv.prn);
            for value in values {
                line.push_str(&observation(*value));
            }
            content.push_str(line.trim_end());
            content.push('\n');
        }
    }
    content
}

/// GPST calendar components of this [Epoch]
pub fn gpst_calendar(t: Epoch) -> Date {
    let (y, m, d, hh, mm, ss, nanos) = t.to_gregorian(TimeScale::GPST);
    (y, m, d, hh, mm, ss as f64 + nanos as f64 * 1.0E-9)
}

/// A plausible GPS navigation message, valid at 2020-06-25 00:00:00 GPST
pub fn reference_ephemeris(prn: u8) -> EphemerisBlock {
    EphemerisBlock {
        sv: SV::new(Constellation::GPS, prn),
        week: 2111,
        toc: gpst_epoch(2020, 6, 25, 0, 0, 0.0).unwrap(),
        clock_polynomials: (1.2345E-5, -1.136868377216E-12, 0.0),
        iode: 50.0,
        toe_s: 345600.0,
        sqrt_a: 5153.6,
        eccentricity: 0.0105,
        m0_rad: 0.3 * prn as f64,
        dn_rad: 4.5E-9,
        i0_rad: 0.96,
        idot_rad_s: 1.0E-10,
        omega0_rad: -2.0 + 0.4 * prn as f64,
        omega_rad: 0.5,
        omega_dot_rad_s: -8.0E-9,
        cus_cuc_rad: (5.2E-6, 1.1E-6),
        cis_cic_rad: (-5.0E-8, 1.0E-7),
        crs_crc_m: (48.5, 251.3),
        accuracy_m: 2.0,
        health: 0.0,
        tgd_s: -1.1E-8,
        iodc: 50.0,
    }
}

fn nav_field(value: f64) -> String {
    format!("{:19.12E}", value)
}

fn nav_orbit_lines(block: &EphemerisBlock, indent: &str) -> String {
    let (cus, cuc) = block.cus_cuc_rad;
    let (cis, cic) = block.cis_cic_rad;
    let (crs, crc) = block.crs_crc_m;
    let lines = [
        [block.iode, crs, block.dn_rad, block.m0_rad],
        [cuc, block.eccentricity, cus, block.sqrt_a],
        [block.toe_s, cic, block.omega0_rad, cis],
        [block.i0_rad, crc, block.omega_rad, block.omega_dot_rad_s],
        [block.idot_rad_s, 1.0, block.week as f64, 0.0],
        [block.accuracy_m, block.health, block.tgd_s, block.iodc],
    ];
    let mut content = String::new();
    for fields in lines {
        content.push_str(indent);
        for value in fields {
            content.push_str(&nav_field(value));
        }
        content.push('\n');
    }
    content.push_str(indent);
    content.push_str(&nav_field(block.toe_s - 30.0));
    content.push_str(&nav_field(4.0));
    content.push('\n');
    content
}

/// Builds a V2 GPS navigation RINEX
pub fn nav_v2(blocks: &[EphemerisBlock]) -> String {
    let mut content = header_line(
        &format!("{:>9}{:11}{:<20}{:<20}", "2.11", "", "N: GPS NAV DATA", ""),
        "RINEX VERSION / TYPE",
    );
    content.push_str(&header_line("", "END OF HEADER"));
    for block in blocks {
        let (y, m, d, hh, mm, ss) = gpst_calendar(block.toc);
        let (af0, af1, af2) = block.clock_polynomials;
        content.push_str(&format!(
            "{:2} {:02} {:>2} {:>2} {:>2} {:>2}{:5.1}{}{}{}\n",
            block.sv.prn,
            y % 100,
            m,
            d,
            hh,
            mm,
            ss,
            nav_field(af0),
            nav_field(af1),
            nav_field(af2)
        ));
        content.push_str(&nav_orbit_lines(block, "   "));
    }
    content
}

/// Builds a V3 navigation RINEX, optionally preceded by a Glonass record.
pub fn nav_v3(blocks: &[EphemerisBlock], with_glonass: bool) -> String {
    let mut content = header_line(
        &format!("{:>9}{:11}{:<20}{:<20}", "3.04", "", "N: GNSS NAV DATA", "M: MIXED"),
        "RINEX VERSION / TYPE",
    );
    content.push_str(&header_line("", "END OF HEADER"));
    if with_glonass {
        content.push_str(&format!(
            "R01 2020 06 25 00 15 00{}{}{}\n",
            nav_field(-1.0E-5),
            nav_field(0.0),
            nav_field(345600.0)
        ));
        for _ in 0..3 {
            content.push_str("    ");
            for value in [1.0E4, 1.0, 0.0, 0.0] {
                content.push_str(&nav_field(value));
            }
            content.push('\n');
        }
    }
    for block in blocks {
        let (y, m, d, hh, mm, ss) = gpst_calendar(block.toc);
        let (af0, af1, af2) = block.clock_polynomials;
        content.push_str(&format!(
            "G{:02} {:04} {:02} {:02} {:02} {:02} {:02}{}{}{}\n",
            block.sv.prn,
            y,
            m,
            d,
            hh,
            mm,
            ss as u8,
            nav_field(af0),
            nav_field(af1),
            nav_field(af2)
        ));
        content.push_str(&nav_orbit_lines(block, "    "));
    }
    content
}

/// Builds an SP3-d file tabulating these rows, which must be sorted by epoch.
/// Null positions are written as such.
pub fn sp3_content(rows: &[PreciseOrbitRow]) -> String {
    let satellites = rows
        .iter()
        .filter_map(|row| row.sv())
        .fold(Vec::<SV>::new(), |mut svs, sv| {
            if !svs.contains(&sv) {
                svs.push(sv);
            }
            svs
        });

    let first = rows.first().map(|row| (row.week, row.sow)).unwrap_or((2111, 345600.0));
    let t0 = Epoch::from_time_of_week(first.0, (first.1 * 1.0E9) as u64, TimeScale::GPST);
    let (y, m, d, hh, mm, ss, _) = t0.to_gregorian(TimeScale::GPST);

    let mut content = format!(
        "#dP{:4} {:2} {:2} {:2} {:2} {:11.8} {:7} ORBIT IGS14 HLM  IGS\n",
        y, m, d, hh, mm, ss as f64, rows.len()
    );
    content.push_str(&format!(
        "## {:4} {:15.8} {:14.8} {:5} {:15.13}\n",
        first.0, first.1, 900.0, 59025, 0.0
    ));
    let mut ids = format!("+  {:3}   ", satellites.len());
    for sv in satellites.iter() {
        ids.push_str(&format!("{}{:02}", letter(sv.constellation), sv.prn));
    }
    content.push_str(&format!("{:<60}\n", ids));
    content.push_str("%c M  cc GPS ccc cccc cccc cccc cccc ccccc ccccc ccccc ccccc\n");

    let mut epoch = Option::<(u32, f64)>::None;
    for row in rows {
        let Some(sv) = row.sv() else {
            continue;
        };
        if epoch != Some((row.week, row.sow)) {
            epoch = Some((row.week, row.sow));
            let t = Epoch::from_time_of_week(row.week, (row.sow * 1.0E9) as u64, TimeScale::GPST);
            let (y, m, d, hh, mm, ss, _) = t.to_gregorian(TimeScale::GPST);
            content.push_str(&format!(
                "*  {:4} {:2} {:2} {:2} {:2} {:11.8}\n",
                y, m, d, hh, mm, ss as f64
            ));
        }
        content.push_str(&format!(
            "P{}{:02}{:14.6}{:14.6}{:14.6}{:14.6}\n",
            letter(sv.constellation),
            sv.prn,
            row.x_m / 1.0E3,
            row.y_m / 1.0E3,
            row.z_m / 1.0E3,
            0.0
        ));
    }
    content.push_str("EOF\n");
    content
}

/// Receiver position on a spherical Earth, from which a satellite located
/// at `sat` (ECEF, m) is seen at approximately `elevation_deg`.
pub fn receiver_for_elevation(sat: &Vector3<f64>, elevation_deg: f64) -> Vector3<f64> {
    let elevation = elevation_deg.to_radians();
    let u = sat.normalize();
    let p = u.cross(&Vector3::z()).normalize();
    let gamma = (EARTH_RADIUS_M * elevation.cos() / sat.norm()).acos() - elevation;
    (u * gamma.cos() + p * gamma.sin()) * EARTH_RADIUS_M
}
