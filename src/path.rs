//! Location of the current recursion point, used to annotate errors.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

/// Ordered list of segments from the root down to the node being decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn root() -> Self { Self::default() }

    pub fn segments(&self) -> &[Segment] { &self.segments }

    pub fn is_root(&self) -> bool { self.segments.is_empty() }

    /// Child path one field deeper.
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut out = self.clone();
        out.segments.push(Segment::Field(name.into()));
        out
    }

    /// Child path one sequence position deeper.
    pub fn index(&self, index: usize) -> Self {
        let mut out = self.clone();
        out.segments.push(Segment::Index(index));
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fields_and_indices() {
        let path = Path::root().field("orders").index(2).field("customer");
        assert_eq!(path.to_string(), "$.orders[2].customer");
        assert_eq!(path.segments().len(), 3);
    }

    #[test]
    fn root_renders_as_dollar() {
        assert_eq!(Path::root().to_string(), "$");
        assert!(Path::root().is_root());
    }

    #[test]
    fn extending_leaves_parent_untouched() {
        let parent = Path::root().field("a");
        let _child = parent.index(0);
        assert_eq!(parent.segments(), &[Segment::Field("a".into())]);
    }
}
