use std::fmt::Write;

use crate::quark::StringTable;

/// Fixed-length window over the `n` most recent symbol ids.
///
/// A fresh window holds `n` empty sentinels (`None`). Each [`Context::shift`]
/// drops the oldest slot and appends the newest id, so the length never
/// changes. The tagger keys transitions on windows of tag ids; the n-gram
/// generator keys successors on windows of word ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Context(Box<[Option<usize>]>);

impl Context {
    pub fn initial(order: usize) -> Self {
        Self(vec![None; order].into_boxed_slice())
    }

    pub fn from_slots(slots: Vec<Option<usize>>) -> Self {
        Self(slots.into_boxed_slice())
    }

    pub fn order(&self) -> usize {
        self.0.len()
    }

    pub fn slots(&self) -> &[Option<usize>] {
        &self.0
    }

    #[must_use]
    pub fn shift(&self, id: usize) -> Self {
        if self.0.is_empty() {
            return self.clone();
        }
        let mut slots = Vec::with_capacity(self.0.len());
        slots.extend_from_slice(&self.0[1..]);
        slots.push(Some(id));
        Self::from_slots(slots)
    }

    /// Most recent symbol, `None` while the newest slot is still a sentinel.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied().flatten()
    }

    /// Formats as `(DET, NOUN)`; sentinels print as `""`.
    pub fn render<T: StringTable>(&self, table: &T) -> String {
        let mut s = String::from("(");
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                s.push_str(", ");
            }
            match slot.and_then(|id| table.to_str(id)) {
                Some(name) => s.push_str(name),
                None => s.push_str("\"\""),
            }
        }
        if self.0.len() == 1 {
            s.push(',');
        }
        s.push(')');
        s
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('[')?;
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Some(id) => write!(f, "{id}")?,
                None => f.write_char('_')?,
            }
        }
        f.write_char(']')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quark::{Quark, TextVectorizer};

    #[test]
    fn window_slides() {
        let ctx = Context::initial(2);
        assert_eq!(&[None, None], ctx.slots());
        assert_eq!(None, ctx.last());
        let ctx = ctx.shift(4);
        assert_eq!(&[None, Some(4)], ctx.slots());
        let ctx = ctx.shift(7).shift(9);
        assert_eq!(&[Some(7), Some(9)], ctx.slots());
        assert_eq!(Some(9), ctx.last());
        assert_eq!(2, ctx.order());
    }

    #[test]
    fn render_names() {
        let mut tags = Quark::default();
        let det = tags.find_or_insert("DET");
        assert_eq!("(\"\",)", Context::initial(1).render(&tags));
        assert_eq!("(\"\", DET)", Context::initial(2).shift(det).render(&tags));
        assert_eq!("[_, 0]", Context::initial(2).shift(det).to_string());
    }
}
