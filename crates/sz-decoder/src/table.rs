//! Field Descriptor Tables
//!
//! Page offsets count from the first byte of the response frame, so the
//! `61 <id>` header occupies offsets 0-1 and every descriptor points at
//! payload. Regenerate the page table when the fits change; the constants
//! below are copied from the fitting run verbatim.

#![allow(clippy::excessive_precision)]

use crate::calibration::{Fit, Formula, Transform};
use crate::record::Field;
use diag_codec::{PageId, Pid, Width};

/// Where a page field lives and how to convert it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    pub field: Field,
    pub page: PageId,
    pub offset: usize,
    pub width: Width,
    pub transform: Transform,
    pub fit: Fit,
}

/// Where an OBD-II field comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PidDescriptor {
    pub pid: Pid,
    pub field: Field,
    pub formula: Formula,
}

const fn page(
    field: Field,
    page: PageId,
    offset: usize,
    transform: Transform,
    fit: Fit,
) -> FieldDescriptor {
    FieldDescriptor {
        field,
        page,
        offset,
        width: Width::Two,
        transform,
        fit,
    }
}

const fn affine(scale: f32, bias: f32) -> Transform {
    Transform::Affine { scale, bias }
}

/// Page fields. `air_flow_request_mgcp`, `gear_ratio` and
/// `requested_in_pressure_mbar` have no fitted page source.
pub static PAGE_TABLE: [FieldDescriptor; 17] = [
    page(
        Field::DesiredIdleSpeedRpm,
        PageId::A0,
        44,
        affine(0.06220588595295306, 844.9560488396442),
        Fit::new(510, 7.71),
    ),
    page(
        Field::AcceleratorPct,
        PageId::A2,
        4,
        affine(0.26064220780047914, -16.498404044868188),
        Fit::new(510, 2.61),
    ),
    page(
        Field::IntakeC,
        PageId::A0,
        4,
        affine(0.0, -50.0),
        Fit::new(510, 0.00),
    ),
    page(
        Field::BatteryV,
        PageId::A2,
        26,
        affine(0.040871480833465604, -110.9969629393979),
        Fit::new(510, 0.03),
    ),
    page(
        Field::FuelTempC,
        PageId::A0,
        40,
        affine(-0.049803335431089446, 35.89450912523603),
        Fit::new(510, 0.01),
    ),
    page(
        Field::BarPressureKpa,
        PageId::A0,
        6,
        affine(0.0, 102.5),
        Fit::new(510, 0.00),
    ),
    page(
        Field::BarPressureMmhg,
        PageId::A0,
        12,
        affine(0.0, 768.813),
        Fit::new(510, 0.00),
    ),
    page(
        Field::AbsPressureMbar,
        PageId::A0,
        18,
        Transform::Identity,
        Fit::new(510, 2.87),
    ),
    page(
        Field::AirFlowEstimateMgcp,
        PageId::A0,
        20,
        Transform::Divide(10.0),
        Fit::new(509, 5.32),
    ),
    page(
        Field::SpeedKmh,
        PageId::A0,
        24,
        affine(0.0076758257804214565, 0.5328163584628314),
        Fit::new(510, 0.78),
    ),
    page(
        Field::RailPressureBar,
        PageId::A0,
        26,
        Transform::Divide(10.0),
        Fit::new(510, 18.99),
    ),
    page(
        Field::RailPressureControlBar,
        PageId::A0,
        14,
        Transform::Divide(1000.0),
        Fit::new(400, 0.01),
    ),
    page(
        Field::DesiredEgrPositionPct,
        PageId::A5,
        6,
        affine(-4.2779983956687014e-05, 35.34682533998348),
        Fit::new(510, 0.01),
    ),
    page(
        Field::EgrPositionPct,
        PageId::A0,
        36,
        affine(0.09544619466159861, 26.493944429533997),
        Fit::new(510, 0.83),
    ),
    page(
        Field::EngineTempC,
        PageId::A2,
        24,
        affine(0.07335171995784256, -183.22408684236524),
        Fit::new(510, 0.88),
    ),
    page(
        Field::AirTempC,
        PageId::A2,
        20,
        affine(0.09561560498782616, -260.3825049781947),
        Fit::new(510, 0.04),
    ),
    // no ground truth: the recording never left idle
    page(
        Field::EngineRpm,
        PageId::A2,
        12,
        Transform::Scale(8.0),
        Fit::new(0, f32::INFINITY),
    ),
];

/// OBD-II fields. PID 0B feeds two fields; PID 04 feeds none.
pub static PID_TABLE: [PidDescriptor; 8] = [
    PidDescriptor {
        pid: Pid::CoolantTemp,
        field: Field::EngineTempC,
        formula: Formula::Temperature,
    },
    PidDescriptor {
        pid: Pid::IntakeManifoldPressure,
        field: Field::BarPressureKpa,
        formula: Formula::Direct,
    },
    PidDescriptor {
        pid: Pid::IntakeManifoldPressure,
        field: Field::RequestedInPressureMbar,
        formula: Formula::KpaToMillibar,
    },
    PidDescriptor {
        pid: Pid::Rpm,
        field: Field::EngineRpm,
        formula: Formula::Rpm,
    },
    PidDescriptor {
        pid: Pid::Speed,
        field: Field::SpeedKmh,
        formula: Formula::Direct,
    },
    PidDescriptor {
        pid: Pid::Maf,
        field: Field::AirFlowEstimateMgcp,
        formula: Formula::MassAirFlow,
    },
    PidDescriptor {
        pid: Pid::ThrottlePosition,
        field: Field::AcceleratorPct,
        formula: Formula::Percent,
    },
    PidDescriptor {
        pid: Pid::FuelRailPressure,
        field: Field::RailPressureBar,
        formula: Formula::RailPressure,
    },
];

/// Shortest frame of `page` that yields every field it carries
pub fn min_page_len(page: PageId) -> usize {
    PAGE_TABLE
        .iter()
        .filter(|d| d.page == page)
        .map(|d| d.offset + d.width.bytes())
        .max()
        .unwrap_or(0)
}
