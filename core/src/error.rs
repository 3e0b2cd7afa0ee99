use thiserror::Error;

/// Faults that halt the running program.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("stack overflow: more than 16 nested calls at pc {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return with an empty call stack at pc {pc:#05X}")]
    StackUnderflow { pc: u16 },
}

/// Errors raised while loading a ROM, before any instruction runs.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("unable to read ROM")]
    Io(#[from] std::io::Error),
}
