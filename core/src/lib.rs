pub use chip8::{Chip8, Cycle};
pub use error::{Fault, RomError};
pub use framebuffer::Framebuffer;
pub use keypad::Keypad;
pub use memory::Memory;
pub use opcode::Opcode;
pub use registers::Registers;
pub use timers::Timers;

mod chip8;
pub mod constants;
mod error;
pub mod framebuffer;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod registers;
mod state;
mod timers;
