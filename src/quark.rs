use std::collections::HashMap;

/// Read access to an interned string table.
pub trait StringTable {
    fn to_str(&self, id: usize) -> Option<&str>;
    fn to_id(&self, s: &str) -> Option<usize>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assigns dense ids to strings on first sight.
pub trait TextVectorizer {
    fn find_or_insert(&mut self, key: &str) -> usize;
}

/// Arena-style registry mapping each first-seen string to a dense index.
///
/// Ids are handed out in order of first appearance and never removed, so
/// they can index rows and columns of the count tables directly. The tag
/// alphabet and the vocabulary of a model are both kept in a `Quark`.
#[derive(Debug, Default, Clone)]
pub struct Quark {
    v: Vec<String>,
    m: HashMap<String, usize>,
}

impl Quark {
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.v.iter().enumerate().map(|(i, s)| (i, s.as_str()))
    }
}

impl From<Vec<String>> for Quark {
    /// Duplicates keep the id of their first occurrence.
    fn from(value: Vec<String>) -> Self {
        let mut quark = Quark::default();
        for s in &value {
            quark.find_or_insert(s);
        }
        quark
    }
}

impl StringTable for Quark {
    fn to_str(&self, id: usize) -> Option<&str> {
        self.v.get(id).map(|x| x.as_str())
    }

    fn to_id(&self, s: &str) -> Option<usize> {
        self.m.get(s).copied()
    }

    fn len(&self) -> usize {
        self.v.len()
    }
}

impl TextVectorizer for Quark {
    fn find_or_insert(&mut self, key: &str) -> usize {
        if let Some(&id) = self.m.get(key) {
            return id;
        }
        let id = self.v.len();
        self.m.insert(key.to_string(), id);
        self.v.push(key.to_string());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_first_appearance() {
        let mut quark = Quark::default();
        for (s, id) in [("DET", 0), ("NOUN", 1), ("VERB", 2), ("NOUN", 1), ("DET", 0), ("ADJ", 3)] {
            assert_eq!(id, quark.find_or_insert(s), "{} != {}", s, id);
        }
        assert_eq!(4, quark.len());
    }

    #[test]
    fn lookup_both_ways() {
        let mut quark = Quark::default();
        quark.find_or_insert("the");
        quark.find_or_insert("cat");
        assert_eq!(quark.to_str(1), Some("cat"));
        assert_eq!(quark.to_str(2), None);
        assert_eq!(quark.to_id("the"), Some(0));
        assert_eq!(quark.to_id("dog"), None);
    }

    #[test]
    fn from_vec_collapses_duplicates() {
        let quark = Quark::from(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert_eq!(2, quark.len());
        assert_eq!(vec![(0, "a"), (1, "b")], quark.iter().collect::<Vec<_>>());
    }
}
