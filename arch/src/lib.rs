pub mod asm;
pub mod cond;
pub mod inst;
pub mod reg;

pub use asm::Asm;
pub use cond::Cond;
pub use inst::Inst;
pub use reg::Reg;
