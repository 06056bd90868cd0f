use std::fmt;

/// Active subset of classification rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Root,
    BlockComment,
    StringLiteral,
    CharLiteral,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Root => write!(f, "root"),
            Mode::BlockComment => write!(f, "block comment"),
            Mode::StringLiteral => write!(f, "string literal"),
            Mode::CharLiteral => write!(f, "character literal"),
        }
    }
}

/// Nesting context of one scanning session.
///
/// `Root` sits at the base and can never be popped, so the stack is never
/// empty. Each scan owns its own stack; carrying a stack from one chunk of
/// input to the next resumes scanning where the previous chunk stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStack {
    stack: Vec<Mode>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Mode::Root],
        }
    }

    pub fn current(&self) -> Mode {
        self.stack.last().copied().unwrap_or(Mode::Root)
    }

    /// Number of modes above `Root`.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn is_root(&self) -> bool {
        self.stack.len() == 1
    }

    pub fn push(&mut self, mode: Mode) {
        self.stack.push(mode);
    }

    /// Pops the innermost mode. Returns `None` when only `Root` is left.
    pub fn pop(&mut self) -> Option<Mode> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}
