use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Reg {
    EAX,
    EBX,
    ECX,
    EDX,
    ESP,
    EBP,

    // Low bytes, written by `setcc`
    BL,
    CL,
}

impl Reg {
    /// 32-bit register this one aliases.
    pub fn full(self) -> Reg {
        match self {
            Reg::BL => Reg::EBX,
            Reg::CL => Reg::ECX,
            reg => reg,
        }
    }

    pub fn is_byte(self) -> bool {
        matches!(self, Reg::BL | Reg::CL)
    }
}
