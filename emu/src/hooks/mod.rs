pub mod dump;

use arch::Asm;

use crate::model::State;

/// Side effects attached to the execution loop.
pub trait Hook {
    fn init(&mut self, state: State) -> State {
        state
    }
    fn exec(&mut self, time: u64, pc: usize, line: &Asm, state: State) -> State;
}
