use std::collections::HashSet;
use std::rc::Rc;

/// Deduplication table for literal text. Two lexemes with equal text get
/// the same shared `Rc<str>`, so repeated literals in one source file share
/// storage. Lives for a single scan; never observable in token content.
#[derive(Debug, Default)]
pub struct Interner {
    table: HashSet<Rc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical instance for `text`, storing it on first sight.
    pub fn intern(&mut self, text: &str) -> Rc<str> {
        if let Some(existing) = self.table.get(text) {
            return Rc::clone(existing);
        }
        let value: Rc<str> = Rc::from(text);
        self.table.insert(Rc::clone(&value));
        value
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_text_shares_one_instance() {
        let mut interner = Interner::new();
        let a = interner.intern("writeln");
        let b = interner.intern("writeln");
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn distinct_text_gets_distinct_instances() {
        let mut interner = Interner::new();
        let a = interner.intern("x");
        let b = interner.intern("y");
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn interned_value_equals_input() {
        let mut interner = Interner::new();
        let value = interner.intern("hello");
        assert_eq!(&*value, "hello");
    }
}
