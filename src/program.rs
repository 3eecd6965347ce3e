use std::fmt;

use crate::error::Mismatch;

const PLUS: char = '+';
const MINUS: char = '-';
const LESS: char = '<';
const GREATER: char = '>';
const DOT: char = '.';
const COMMA: char = ',';
const LBRACKET: char = '[';
const RBRACKET: char = ']';

/// One of the eight meaningful symbols. Everything else is an inert comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Increment,
    Decrement,
    Left,
    Right,
    Output,
    Input,
    LoopOpen,
    LoopClose,
}

impl Instruction {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            PLUS => Some(Self::Increment),
            MINUS => Some(Self::Decrement),
            LESS => Some(Self::Left),
            GREATER => Some(Self::Right),
            DOT => Some(Self::Output),
            COMMA => Some(Self::Input),
            LBRACKET => Some(Self::LoopOpen),
            RBRACKET => Some(Self::LoopClose),
            _ => None,
        }
    }
}

/// Source symbols in order, inert characters included.
///
/// Positions matter: instruction pointers and error indices refer to the raw
/// symbol index, not to an index among meaningful instructions. A program is
/// append-only while a session runs; [`replace`](Self::replace) and
/// [`clear`](Self::clear) start over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    symbols: Vec<char>,
}

impl From<&str> for Program {
    fn from(source: &str) -> Self {
        Self {
            symbols: source.chars().collect(),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a program from multi-line source text with line terminators
    /// dropped, so instruction numbers run on across lines.
    pub fn from_lines(text: &str) -> Self {
        Self {
            symbols: text.lines().flat_map(str::chars).collect(),
        }
    }

    pub fn append(&mut self, source: &str) {
        self.symbols.extend(source.chars());
    }

    pub fn replace(&mut self, source: &str) {
        self.symbols.clear();
        self.append(source);
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Check that every `[` has a matching `]`.
    ///
    /// Fails at the first `]` that closes nothing, reporting its index; an
    /// open bracket left over at the end has no useful position to report.
    pub fn validate(&self) -> Result<(), Mismatch> {
        let mut open: usize = 0;
        for (index, &symbol) in self.symbols.iter().enumerate() {
            match symbol {
                LBRACKET => open += 1,
                RBRACKET => {
                    open = open
                        .checked_sub(1)
                        .ok_or(Mismatch::UnmatchedClose { index })?;
                }
                _ => {}
            }
        }
        if open == 0 {
            Ok(())
        } else {
            Err(Mismatch::UnmatchedOpen)
        }
    }

    /// Index of the `]` that closes the `[` at `open_index`, scanning forward
    /// and counting nested brackets.
    pub fn matching_close(&self, open_index: usize) -> Option<usize> {
        let mut depth: usize = 0;
        for (index, &symbol) in self.symbols.iter().enumerate().skip(open_index + 1) {
            match symbol {
                LBRACKET => depth += 1,
                RBRACKET if depth == 0 => return Some(index),
                RBRACKET => depth -= 1,
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_all_eight_symbols() {
        let decoded: Vec<_> = "+-<>.,[]"
            .chars()
            .map(Instruction::from_symbol)
            .collect();
        assert!(decoded.iter().all(Option::is_some));
        assert_eq!(decoded[6], Some(Instruction::LoopOpen));
    }

    #[test]
    fn test_other_symbols_are_inert() {
        for c in ['a', ' ', '\n', '{', '#', 'é'] {
            assert_eq!(Instruction::from_symbol(c), None);
        }
    }

    #[test]
    fn test_validate_balanced() {
        assert_eq!(Program::from("").validate(), Ok(()));
        assert_eq!(Program::from("+[->[+]<]comment").validate(), Ok(()));
    }

    #[test]
    fn test_validate_unmatched_open() {
        assert_eq!(Program::from("[").validate(), Err(Mismatch::UnmatchedOpen));
        assert_eq!(Program::from("[[]").validate(), Err(Mismatch::UnmatchedOpen));
    }

    #[test]
    fn test_validate_unmatched_close_reports_index() {
        assert_eq!(
            Program::from("]").validate(),
            Err(Mismatch::UnmatchedClose { index: 0 })
        );
        assert_eq!(
            Program::from("]+[").validate(),
            Err(Mismatch::UnmatchedClose { index: 0 })
        );
        assert_eq!(
            Program::from("+[]]").validate(),
            Err(Mismatch::UnmatchedClose { index: 3 })
        );
    }

    #[test]
    fn test_matching_close_skips_nested() {
        let program = Program::from("[[]x[]]");
        assert_eq!(program.matching_close(0), Some(6));
        assert_eq!(program.matching_close(1), Some(2));
        assert_eq!(program.matching_close(4), Some(5));
    }

    #[test]
    fn test_matching_close_missing() {
        assert_eq!(Program::from("[[]").matching_close(0), None);
    }

    #[test]
    fn test_append_keeps_earlier_symbols() {
        let mut program = Program::from("+");
        program.append("[-]");
        assert_eq!(program.to_string(), "+[-]");
        assert_eq!(program.len(), 4);
        assert_eq!(program.get(1), Some('['));
        assert_eq!(program.get(4), None);
    }

    #[test]
    fn test_from_lines_drops_line_breaks() {
        let program = Program::from_lines("+\r\n+\n]\n");
        assert_eq!(program.to_string(), "++]");
        assert_eq!(
            program.validate(),
            Err(Mismatch::UnmatchedClose { index: 2 })
        );
    }

    #[test]
    fn test_replace_and_clear() {
        let mut program = Program::from("+++");
        program.replace("-");
        assert_eq!(program.symbols(), &['-']);
        program.clear();
        assert!(program.is_empty());
    }
}
