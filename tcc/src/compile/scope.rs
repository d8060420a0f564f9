use indexmap::IndexMap;

use crate::error::CodeGenError;

/// Lexical scopes of one function.
///
/// Every declaration takes the next slot below the frame pointer, in program
/// order, regardless of nesting. Slots are never reused when a scope closes.
pub struct Scopes {
    frames: Vec<IndexMap<String, i32>>,
    next_offset: i32,
}

impl Scopes {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            next_offset: -4,
        }
    }

    pub fn enter(&mut self) {
        self.frames.push(IndexMap::new());
    }

    pub fn leave(&mut self) {
        self.frames.pop();
    }

    /// Number of open frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind `name` in the innermost frame and return its offset.
    pub fn declare(&mut self, name: &str) -> Result<i32, CodeGenError> {
        if self.frames.is_empty() {
            self.enter();
        }
        let innermost = self.frames.len() - 1;
        let frame = &mut self.frames[innermost];
        if frame.contains_key(name) {
            return Err(CodeGenError::DuplicateDeclaration(name.to_string()));
        }
        let offset = self.next_offset;
        frame.insert(name.to_string(), offset);
        self.next_offset -= 4;
        Ok(offset)
    }

    /// Innermost binding of `name`.
    pub fn resolve(&self, name: &str) -> Result<i32, CodeGenError> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
            .ok_or_else(|| CodeGenError::UndeclaredVariable(name.to_string()))
    }
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}
