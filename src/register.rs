//! Typed ST7789 register parameters
//!
//! Each bring-up register is a small struct implementing [`Register`]. Its
//! `encode` method lists the register's fields as a table of
//! `(name, value, bit width)` entries, runs them through [`check_fields`] and
//! only then packs them into the bytes sent after the opcode. A field that
//! does not fit its width is reported as a [`FieldError`] and nothing is
//! transmitted.
//!
//! ## Example
//!
//! ```
//! use pico_lcd::register::{GateControl, PorchControl, Register};
//!
//! let porch = PorchControl::default();
//! assert_eq!(porch.encode(), Ok([0x0C, 0x0C, 0x00, 0x33, 0x33]));
//!
//! let gate = GateControl { vghs: 0x08, vgls: 0x05 };
//! let err = gate.encode().unwrap_err();
//! assert_eq!((err.field, err.max), ("vghs", 0x07));
//! ```

use crate::color::ColorSpace;
use crate::command;
use crate::error::FieldError;

/// One entry of a register's field table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Field name as used in the datasheet
    pub name: &'static str,
    /// Value to validate
    pub value: u8,
    /// Smallest accepted value
    pub min: u8,
    /// Largest accepted value
    pub max: u8,
}

impl Field {
    /// A field `width` bits wide accepting `0..=2^width - 1`
    pub const fn bits(name: &'static str, value: u8, width: u8) -> Self {
        let max = if width >= 8 {
            u8::MAX
        } else {
            (1u8 << width) - 1
        };
        Self {
            name,
            value,
            min: 0,
            max,
        }
    }

    /// Reject zero for this field
    pub const fn nonzero(mut self) -> Self {
        self.min = 1;
        self
    }
}

/// Validate every field of `register` against its declared range
///
/// Returns the first field that is out of range.
pub fn check_fields(register: &'static str, fields: &[Field]) -> Result<(), FieldError> {
    match fields
        .iter()
        .find(|field| field.value < field.min || field.value > field.max)
    {
        Some(field) => Err(FieldError {
            register,
            field: field.name,
            value: field.value as i32,
            min: field.min as i32,
            max: field.max as i32,
        }),
        None => Ok(()),
    }
}

/// A controller register with a fixed-size, validated parameter block
pub trait Register {
    /// Command byte selecting the register
    const OPCODE: u8;
    /// Datasheet mnemonic, used in error reports
    const NAME: &'static str;
    /// Encoded parameter bytes
    type Payload: AsRef<[u8]>;

    /// Validate all fields and pack them
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] for the first field outside its bit width.
    fn encode(&self) -> Result<Self::Payload, FieldError>;
}

/// Memory data access control (MADCTL)
///
/// Controls the read/write scanning direction of the frame memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryAccessControl {
    /// MY: page address order (bottom to top)
    pub row_address_order: bool,
    /// MX: column address order (right to left)
    pub column_address_order: bool,
    /// MV: page/column exchange
    pub row_column_exchange: bool,
    /// ML: LCD vertical refresh bottom to top
    pub vertical_refresh_order: bool,
    /// RGB: BGR subpixel order
    pub bgr: bool,
    /// MH: LCD horizontal refresh right to left
    pub horizontal_refresh_order: bool,
}

impl Default for MemoryAccessControl {
    /// 0x70: columns right to left, rows/columns exchanged, refresh bottom to top
    fn default() -> Self {
        Self {
            row_address_order: false,
            column_address_order: true,
            row_column_exchange: true,
            vertical_refresh_order: true,
            bgr: false,
            horizontal_refresh_order: false,
        }
    }
}

impl Register for MemoryAccessControl {
    const OPCODE: u8 = command::MEMORY_ACCESS_CONTROL;
    const NAME: &'static str = "MADCTL";
    type Payload = [u8; 1];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        Ok([(self.row_address_order as u8) << 7
            | (self.column_address_order as u8) << 6
            | (self.row_column_exchange as u8) << 5
            | (self.vertical_refresh_order as u8) << 4
            | (self.bgr as u8) << 3
            | (self.horizontal_refresh_order as u8) << 2])
    }
}

impl Register for ColorSpace {
    const OPCODE: u8 = command::INTERFACE_PIXEL_FORMAT;
    const NAME: &'static str = "COLMOD";
    type Payload = [u8; 1];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        Ok([self.colmod()])
    }
}

/// Porch setting (PORCTRL)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PorchControl {
    /// Back porch in normal mode, 0x01 to 0x7F
    pub bpa: u8,
    /// Front porch in normal mode, 0x01 to 0x7F
    pub fpa: u8,
    /// Enable separate porch control, 0 or 1
    pub psen: u8,
    /// Back porch in idle mode, 0x01 to 0x0F
    pub bpb: u8,
    /// Front porch in idle mode, 0x01 to 0x0F
    pub fpb: u8,
    /// Back porch in partial mode, 0x01 to 0x0F
    pub bpc: u8,
    /// Front porch in partial mode, 0x01 to 0x0F
    pub fpc: u8,
}

impl Default for PorchControl {
    fn default() -> Self {
        Self {
            bpa: 0x0C,
            fpa: 0x0C,
            psen: 0,
            bpb: 0x03,
            fpb: 0x03,
            bpc: 0x03,
            fpc: 0x03,
        }
    }
}

impl Register for PorchControl {
    const OPCODE: u8 = command::PORCH_CONTROL;
    const NAME: &'static str = "PORCTRL";
    type Payload = [u8; 5];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        check_fields(
            Self::NAME,
            &[
                Field::bits("bpa", self.bpa, 7).nonzero(),
                Field::bits("fpa", self.fpa, 7).nonzero(),
                Field::bits("psen", self.psen, 1),
                Field::bits("bpb", self.bpb, 4).nonzero(),
                Field::bits("fpb", self.fpb, 4).nonzero(),
                Field::bits("bpc", self.bpc, 4).nonzero(),
                Field::bits("fpc", self.fpc, 4).nonzero(),
            ],
        )?;
        Ok([
            self.bpa,
            self.fpa,
            self.psen,
            self.bpb << 4 | self.fpb,
            self.bpc << 4 | self.fpc,
        ])
    }
}

/// Gate control (GCTRL)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateControl {
    /// VGH setting, 3 bits
    pub vghs: u8,
    /// VGL setting, 3 bits
    pub vgls: u8,
}

impl Default for GateControl {
    /// 13.26V / -10.43V
    fn default() -> Self {
        Self {
            vghs: 0x03,
            vgls: 0x05,
        }
    }
}

impl Register for GateControl {
    const OPCODE: u8 = command::GATE_CONTROL;
    const NAME: &'static str = "GCTRL";
    type Payload = [u8; 1];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        check_fields(
            Self::NAME,
            &[
                Field::bits("vghs", self.vghs, 3),
                Field::bits("vgls", self.vgls, 3),
            ],
        )?;
        Ok([self.vghs << 4 | self.vgls])
    }
}

/// VCOM setting (VCOMS), 6 bits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vcom(pub u8);

impl Default for Vcom {
    /// 0.725V
    fn default() -> Self {
        Self(0x19)
    }
}

impl Register for Vcom {
    const OPCODE: u8 = command::VCOM_SETTING;
    const NAME: &'static str = "VCOMS";
    type Payload = [u8; 1];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        check_fields(Self::NAME, &[Field::bits("setting", self.0, 6)])?;
        Ok([self.0])
    }
}

/// LCM control (LCMCTRL), 7 bits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcmControl(pub u8);

impl Default for LcmControl {
    fn default() -> Self {
        Self(0x2C)
    }
}

impl Register for LcmControl {
    const OPCODE: u8 = command::LCM_CONTROL;
    const NAME: &'static str = "LCMCTRL";
    type Payload = [u8; 1];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        check_fields(Self::NAME, &[Field::bits("parameter", self.0, 7)])?;
        Ok([self.0])
    }
}

/// VDV and VRH command enable (VDVVRHEN)
///
/// `true` takes VDV/VRH from [`VdvSet`]/[`VrhSet`], `false` from NVM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VdvVrhEnable(pub bool);

impl Default for VdvVrhEnable {
    fn default() -> Self {
        Self(true)
    }
}

impl Register for VdvVrhEnable {
    const OPCODE: u8 = command::VDV_VRH_ENABLE;
    const NAME: &'static str = "VDVVRHEN";
    type Payload = [u8; 2];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        Ok([self.0 as u8, command::VDV_VRH_ENABLE_SUFFIX])
    }
}

/// VRH set (VRHS), 6 bits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VrhSet(pub u8);

impl Default for VrhSet {
    /// +/-4.45V
    fn default() -> Self {
        Self(0x12)
    }
}

impl Register for VrhSet {
    const OPCODE: u8 = command::VRH_SET;
    const NAME: &'static str = "VRHS";
    type Payload = [u8; 1];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        check_fields(Self::NAME, &[Field::bits("value", self.0, 6)])?;
        Ok([self.0])
    }
}

/// VDV set (VDVS), 6 bits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VdvSet(pub u8);

impl Default for VdvSet {
    /// 0V
    fn default() -> Self {
        Self(0x20)
    }
}

impl Register for VdvSet {
    const OPCODE: u8 = command::VDV_SET;
    const NAME: &'static str = "VDVS";
    type Payload = [u8; 1];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        check_fields(Self::NAME, &[Field::bits("value", self.0, 6)])?;
        Ok([self.0])
    }
}

/// Frame rate control in normal mode (FRCTRL2)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRateControl {
    /// Dot inversion when true, column inversion when false
    pub dot_inversion: bool,
    /// Frame rate setting, 5 bits (0x0F = 60Hz)
    pub rtna: u8,
}

impl Default for FrameRateControl {
    fn default() -> Self {
        Self {
            dot_inversion: false,
            rtna: 0x0F,
        }
    }
}

impl Register for FrameRateControl {
    const OPCODE: u8 = command::FRAME_RATE_CONTROL;
    const NAME: &'static str = "FRCTRL2";
    type Payload = [u8; 1];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        check_fields(Self::NAME, &[Field::bits("rtna", self.rtna, 5)])?;
        // NLA2..0 are either all set or all clear
        let nla: u8 = if self.dot_inversion { 0b111 } else { 0 };
        Ok([nla << 5 | self.rtna])
    }
}

/// Power control 1 (PWCTRL1)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerControl {
    /// AVDD setting, 2 bits
    pub avdd: u8,
    /// AVCL setting, 2 bits
    pub avcl: u8,
    /// VDS setting, 2 bits
    pub vds: u8,
}

impl Default for PowerControl {
    /// 6.6V / -4.6V / 2.3V
    fn default() -> Self {
        Self {
            avdd: 0x01,
            avcl: 0x01,
            vds: 0x01,
        }
    }
}

impl Register for PowerControl {
    const OPCODE: u8 = command::POWER_CONTROL_1;
    const NAME: &'static str = "PWCTRL1";
    type Payload = [u8; 2];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        check_fields(
            Self::NAME,
            &[
                Field::bits("avdd", self.avdd, 2),
                Field::bits("avcl", self.avcl, 2),
                Field::bits("vds", self.vds, 2),
            ],
        )?;
        Ok([
            command::POWER_CONTROL_1_PREFIX,
            self.avdd << 6 | self.avcl << 4 | self.vds,
        ])
    }
}

/// Gamma curve coefficients shared by PVGAMCTRL and NVGAMCTRL
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct GammaCurve {
    pub vp0: u8,
    pub vp1: u8,
    pub vp2: u8,
    pub vp4: u8,
    pub vp6: u8,
    pub vp13: u8,
    pub vp20: u8,
    pub vp27: u8,
    pub vp36: u8,
    pub vp43: u8,
    pub vp50: u8,
    pub vp57: u8,
    pub vp59: u8,
    pub vp61: u8,
    pub vp62: u8,
    pub vp63: u8,
    pub jp0: u8,
    pub jp1: u8,
}

impl Default for GammaCurve {
    /// Curve from the Waveshare Pico-LCD-1.3 example code
    fn default() -> Self {
        Self {
            vp0: 0x00,
            vp1: 0x04,
            vp2: 0x0D,
            vp4: 0x11,
            vp6: 0x13,
            vp13: 0x0B,
            vp20: 0x3F,
            vp27: 0x04,
            vp36: 0x05,
            vp43: 0x4C,
            vp50: 0x08,
            vp57: 0x0D,
            vp59: 0x0B,
            vp61: 0x1F,
            vp62: 0x23,
            vp63: 0x0D,
            jp0: 0x02,
            jp1: 0x01,
        }
    }
}

impl GammaCurve {
    fn encode(&self, register: &'static str) -> Result<[u8; 14], FieldError> {
        check_fields(
            register,
            &[
                Field::bits("vp0", self.vp0, 4),
                Field::bits("vp1", self.vp1, 6),
                Field::bits("vp2", self.vp2, 6),
                Field::bits("vp4", self.vp4, 5),
                Field::bits("vp6", self.vp6, 5),
                Field::bits("vp13", self.vp13, 4),
                Field::bits("vp20", self.vp20, 7),
                Field::bits("vp27", self.vp27, 3),
                Field::bits("vp36", self.vp36, 3),
                Field::bits("vp43", self.vp43, 7),
                Field::bits("vp50", self.vp50, 4),
                Field::bits("vp57", self.vp57, 5),
                Field::bits("vp59", self.vp59, 5),
                Field::bits("vp61", self.vp61, 6),
                Field::bits("vp62", self.vp62, 6),
                Field::bits("vp63", self.vp63, 4),
                Field::bits("jp0", self.jp0, 2),
                Field::bits("jp1", self.jp1, 2),
            ],
        )?;
        Ok([
            self.vp63 << 4 | self.vp0,
            self.vp1,
            self.vp2,
            self.vp4,
            self.vp6,
            self.jp0 << 4 | self.vp13,
            self.vp20,
            self.vp36 << 4 | self.vp27,
            self.vp43,
            self.jp1 << 4 | self.vp50,
            self.vp57,
            self.vp59,
            self.vp61,
            self.vp62,
        ])
    }
}

/// Positive voltage gamma control (PVGAMCTRL)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositiveGamma(pub GammaCurve);

impl Register for PositiveGamma {
    const OPCODE: u8 = command::POSITIVE_GAMMA;
    const NAME: &'static str = "PVGAMCTRL";
    type Payload = [u8; 14];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        self.0.encode(Self::NAME)
    }
}

/// Negative voltage gamma control (NVGAMCTRL)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NegativeGamma(pub GammaCurve);

impl Register for NegativeGamma {
    const OPCODE: u8 = command::NEGATIVE_GAMMA;
    const NAME: &'static str = "NVGAMCTRL";
    type Payload = [u8; 14];

    fn encode(&self) -> Result<Self::Payload, FieldError> {
        self.0.encode(Self::NAME)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_field_bits_range() {
        assert_eq!(Field::bits("a", 0, 3).max, 0x07);
        assert_eq!(Field::bits("a", 0, 8).max, 0xFF);
        assert_eq!(Field::bits("a", 0, 1).nonzero().min, 1);
    }

    #[test]
    fn test_check_fields_reports_first_offender() {
        let err = check_fields(
            "TEST",
            &[
                Field::bits("ok", 3, 2),
                Field::bits("wide", 4, 2),
                Field::bits("zero", 0, 2).nonzero(),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            FieldError {
                register: "TEST",
                field: "wide",
                value: 4,
                min: 0,
                max: 3,
            }
        );
    }

    #[test]
    fn test_madctl_default_is_0x70() {
        assert_eq!(MemoryAccessControl::default().encode(), Ok([0x70]));
    }

    #[test]
    fn test_madctl_bit_positions() {
        let madctl = MemoryAccessControl {
            row_address_order: true,
            column_address_order: false,
            row_column_exchange: false,
            vertical_refresh_order: false,
            bgr: true,
            horizontal_refresh_order: true,
        };
        assert_eq!(madctl.encode(), Ok([0x8C]));
    }

    #[test]
    fn test_porch_packs_idle_and_partial_nibbles() {
        let porch = PorchControl {
            bpb: 0x0A,
            fpb: 0x05,
            bpc: 0x01,
            fpc: 0x0F,
            ..PorchControl::default()
        };
        assert_eq!(porch.encode(), Ok([0x0C, 0x0C, 0x00, 0xA5, 0x1F]));
    }

    #[test]
    fn test_porch_rejects_zero_and_wide_fields() {
        let zero = PorchControl {
            bpa: 0,
            ..PorchControl::default()
        };
        assert_eq!(zero.encode().unwrap_err().field, "bpa");

        let wide = PorchControl {
            fpb: 0x10,
            ..PorchControl::default()
        };
        let err = wide.encode().unwrap_err();
        assert_eq!((err.field, err.min, err.max), ("fpb", 1, 0x0F));

        let psen = PorchControl {
            psen: 2,
            ..PorchControl::default()
        };
        assert_eq!(psen.encode().unwrap_err().field, "psen");
    }

    #[test]
    fn test_gate_control_packing() {
        assert_eq!(GateControl::default().encode(), Ok([0x35]));
        let err = GateControl { vghs: 0, vgls: 8 }.encode().unwrap_err();
        assert_eq!(err.register, "GCTRL");
        assert_eq!(err.field, "vgls");
    }

    #[test]
    fn test_single_byte_registers() {
        assert_eq!(Vcom::default().encode(), Ok([0x19]));
        assert!(Vcom(0x40).encode().is_err());
        assert_eq!(LcmControl::default().encode(), Ok([0x2C]));
        assert!(LcmControl(0x80).encode().is_err());
        assert_eq!(VrhSet::default().encode(), Ok([0x12]));
        assert!(VrhSet(0x40).encode().is_err());
        assert_eq!(VdvSet::default().encode(), Ok([0x20]));
        assert!(VdvSet(0x40).encode().is_err());
        assert_eq!(ColorSpace::Rgb565.encode(), Ok([0x05]));
    }

    #[test]
    fn test_vdv_vrh_enable() {
        assert_eq!(VdvVrhEnable(true).encode(), Ok([0x01, 0xFF]));
        assert_eq!(VdvVrhEnable(false).encode(), Ok([0x00, 0xFF]));
    }

    #[test]
    fn test_frame_rate_control() {
        assert_eq!(FrameRateControl::default().encode(), Ok([0x0F]));
        let dot = FrameRateControl {
            dot_inversion: true,
            rtna: 0x01,
        };
        assert_eq!(dot.encode(), Ok([0xE1]));
        let err = FrameRateControl {
            dot_inversion: false,
            rtna: 0x20,
        }
        .encode()
        .unwrap_err();
        assert_eq!(err.field, "rtna");
    }

    #[test]
    fn test_power_control() {
        assert_eq!(PowerControl::default().encode(), Ok([0xA4, 0x51]));
        let max = PowerControl {
            avdd: 3,
            avcl: 3,
            vds: 3,
        };
        assert_eq!(max.encode(), Ok([0xA4, 0xF3]));
        assert!(
            PowerControl {
                avdd: 4,
                ..PowerControl::default()
            }
            .encode()
            .is_err()
        );
    }

    #[test]
    fn test_default_gamma_matches_reference_bytes() {
        let expected = [
            0xD0, 0x04, 0x0D, 0x11, 0x13, 0x2B, 0x3F, 0x54, 0x4C, 0x18, 0x0D, 0x0B, 0x1F, 0x23,
        ];
        assert_eq!(PositiveGamma::default().encode(), Ok(expected));
        assert_eq!(NegativeGamma::default().encode(), Ok(expected));
    }

    #[test]
    fn test_gamma_error_names_register() {
        let curve = GammaCurve {
            jp1: 4,
            ..GammaCurve::default()
        };
        let err = NegativeGamma(curve).encode().unwrap_err();
        assert_eq!(err.register, "NVGAMCTRL");
        assert_eq!(err.field, "jp1");
        assert_eq!(err.max, 3);
    }
}
