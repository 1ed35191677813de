//! Sensor Record
//!
//! One record per poll cycle. Every field starts undecoded (`None`) and is
//! written independently by the decoders.

use serde::{Deserialize, Serialize};

/// The 20 physical quantities shown by the SZ viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    DesiredIdleSpeedRpm,
    AcceleratorPct,
    IntakeC,
    BatteryV,
    FuelTempC,
    BarPressureKpa,
    BarPressureMmhg,
    AbsPressureMbar,
    AirFlowEstimateMgcp,
    AirFlowRequestMgcp,
    SpeedKmh,
    RailPressureBar,
    RailPressureControlBar,
    DesiredEgrPositionPct,
    GearRatio,
    EgrPositionPct,
    EngineTempC,
    AirTempC,
    RequestedInPressureMbar,
    EngineRpm,
}

impl Field {
    /// All fields in publication order
    pub const ALL: [Field; 20] = [
        Field::DesiredIdleSpeedRpm,
        Field::AcceleratorPct,
        Field::IntakeC,
        Field::BatteryV,
        Field::FuelTempC,
        Field::BarPressureKpa,
        Field::BarPressureMmhg,
        Field::AbsPressureMbar,
        Field::AirFlowEstimateMgcp,
        Field::AirFlowRequestMgcp,
        Field::SpeedKmh,
        Field::RailPressureBar,
        Field::RailPressureControlBar,
        Field::DesiredEgrPositionPct,
        Field::GearRatio,
        Field::EgrPositionPct,
        Field::EngineTempC,
        Field::AirTempC,
        Field::RequestedInPressureMbar,
        Field::EngineRpm,
    ];

    /// Key used in the published record
    pub fn name(&self) -> &'static str {
        match self {
            Field::DesiredIdleSpeedRpm => "desired_idle_speed_rpm",
            Field::AcceleratorPct => "accelerator_pct",
            Field::IntakeC => "intake_c",
            Field::BatteryV => "battery_v",
            Field::FuelTempC => "fuel_temp_c",
            Field::BarPressureKpa => "bar_pressure_kpa",
            Field::BarPressureMmhg => "bar_pressure_mmhg",
            Field::AbsPressureMbar => "abs_pressure_mbar",
            Field::AirFlowEstimateMgcp => "air_flow_estimate_mgcp",
            Field::AirFlowRequestMgcp => "air_flow_request_mgcp",
            Field::SpeedKmh => "speed_kmh",
            Field::RailPressureBar => "rail_pressure_bar",
            Field::RailPressureControlBar => "rail_pressure_control_bar",
            Field::DesiredEgrPositionPct => "desired_egr_position_pct",
            Field::GearRatio => "gear_ratio",
            Field::EgrPositionPct => "egr_position_pct",
            Field::EngineTempC => "engine_temp_c",
            Field::AirTempC => "air_temp_c",
            Field::RequestedInPressureMbar => "requested_in_pressure_mbar",
            Field::EngineRpm => "engine_rpm",
        }
    }

    /// Physical unit (empty for dimensionless ratios)
    pub fn unit(&self) -> &'static str {
        match self {
            Field::DesiredIdleSpeedRpm | Field::EngineRpm => "rpm",
            Field::AcceleratorPct | Field::DesiredEgrPositionPct | Field::EgrPositionPct => "%",
            Field::IntakeC | Field::FuelTempC | Field::EngineTempC | Field::AirTempC => "°C",
            Field::BatteryV => "V",
            Field::BarPressureKpa => "kPa",
            Field::BarPressureMmhg => "mmHg",
            Field::AbsPressureMbar | Field::RequestedInPressureMbar => "mbar",
            Field::AirFlowEstimateMgcp | Field::AirFlowRequestMgcp => "mg/cp",
            Field::SpeedKmh => "km/h",
            Field::RailPressureBar | Field::RailPressureControlBar => "bar",
            Field::GearRatio => "",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded readings of one poll cycle.
///
/// `None` means no valid reading was obtained; it serializes as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub desired_idle_speed_rpm: Option<f32>,
    pub accelerator_pct: Option<f32>,
    pub intake_c: Option<f32>,
    pub battery_v: Option<f32>,
    pub fuel_temp_c: Option<f32>,
    pub bar_pressure_kpa: Option<f32>,
    pub bar_pressure_mmhg: Option<f32>,
    pub abs_pressure_mbar: Option<f32>,
    pub air_flow_estimate_mgcp: Option<f32>,
    pub air_flow_request_mgcp: Option<f32>,
    pub speed_kmh: Option<f32>,
    pub rail_pressure_bar: Option<f32>,
    pub rail_pressure_control_bar: Option<f32>,
    pub desired_egr_position_pct: Option<f32>,
    pub gear_ratio: Option<f32>,
    pub egr_position_pct: Option<f32>,
    pub engine_temp_c: Option<f32>,
    pub air_temp_c: Option<f32>,
    pub requested_in_pressure_mbar: Option<f32>,
    pub engine_rpm: Option<f32>,
}

impl SensorRecord {
    /// Create a fresh record with every field undecoded
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, field: Field) -> &mut Option<f32> {
        match field {
            Field::DesiredIdleSpeedRpm => &mut self.desired_idle_speed_rpm,
            Field::AcceleratorPct => &mut self.accelerator_pct,
            Field::IntakeC => &mut self.intake_c,
            Field::BatteryV => &mut self.battery_v,
            Field::FuelTempC => &mut self.fuel_temp_c,
            Field::BarPressureKpa => &mut self.bar_pressure_kpa,
            Field::BarPressureMmhg => &mut self.bar_pressure_mmhg,
            Field::AbsPressureMbar => &mut self.abs_pressure_mbar,
            Field::AirFlowEstimateMgcp => &mut self.air_flow_estimate_mgcp,
            Field::AirFlowRequestMgcp => &mut self.air_flow_request_mgcp,
            Field::SpeedKmh => &mut self.speed_kmh,
            Field::RailPressureBar => &mut self.rail_pressure_bar,
            Field::RailPressureControlBar => &mut self.rail_pressure_control_bar,
            Field::DesiredEgrPositionPct => &mut self.desired_egr_position_pct,
            Field::GearRatio => &mut self.gear_ratio,
            Field::EgrPositionPct => &mut self.egr_position_pct,
            Field::EngineTempC => &mut self.engine_temp_c,
            Field::AirTempC => &mut self.air_temp_c,
            Field::RequestedInPressureMbar => &mut self.requested_in_pressure_mbar,
            Field::EngineRpm => &mut self.engine_rpm,
        }
    }

    /// Current value of a field
    pub fn get(&self, field: Field) -> Option<f32> {
        match field {
            Field::DesiredIdleSpeedRpm => self.desired_idle_speed_rpm,
            Field::AcceleratorPct => self.accelerator_pct,
            Field::IntakeC => self.intake_c,
            Field::BatteryV => self.battery_v,
            Field::FuelTempC => self.fuel_temp_c,
            Field::BarPressureKpa => self.bar_pressure_kpa,
            Field::BarPressureMmhg => self.bar_pressure_mmhg,
            Field::AbsPressureMbar => self.abs_pressure_mbar,
            Field::AirFlowEstimateMgcp => self.air_flow_estimate_mgcp,
            Field::AirFlowRequestMgcp => self.air_flow_request_mgcp,
            Field::SpeedKmh => self.speed_kmh,
            Field::RailPressureBar => self.rail_pressure_bar,
            Field::RailPressureControlBar => self.rail_pressure_control_bar,
            Field::DesiredEgrPositionPct => self.desired_egr_position_pct,
            Field::GearRatio => self.gear_ratio,
            Field::EgrPositionPct => self.egr_position_pct,
            Field::EngineTempC => self.engine_temp_c,
            Field::AirTempC => self.air_temp_c,
            Field::RequestedInPressureMbar => self.requested_in_pressure_mbar,
            Field::EngineRpm => self.engine_rpm,
        }
    }

    /// Store a decoded value
    pub fn set(&mut self, field: Field, value: f32) {
        *self.slot(field) = Some(value);
    }

    /// Reset a field to undecoded
    pub fn clear(&mut self, field: Field) {
        *self.slot(field) = None;
    }

    /// Number of fields holding a reading
    pub fn decoded_count(&self) -> usize {
        self.iter().filter(|(_, v)| v.is_some()).count()
    }

    /// `(field, value)` pairs in publication order
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<f32>)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Serialize as one JSON object, undecoded fields as `null`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Outcome of one decode call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Field writes performed
    pub written: usize,
    /// Field writes attempted but abandoned
    pub skipped: usize,
}
