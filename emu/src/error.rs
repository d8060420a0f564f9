use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Undefined label: `{0}`")]
    UndefinedLabel(String),

    #[error("Re-defined label: `{0}`")]
    RedefinedLabel(String),

    #[error("Divide error: {0} / {1}")]
    DivideError(i64, i64),

    #[error("Invalid stack access at 0x{0:08X}")]
    StackAccess(i64),

    #[error("Program counter out of range: {0}")]
    PcOutOfRange(usize),

    #[error("Step limit reached: {0} steps")]
    StepLimit(u64),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Invalid dump config: {0}")]
    Config(String, #[source] serde_yaml::Error),
}
