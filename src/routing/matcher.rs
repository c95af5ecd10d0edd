//! Path pattern matching
//!
//! Patterns are `/`-separated segments; `:name` captures one non-empty,
//! percent-decoded segment, anything else must match literally.

/// One segment of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path pattern such as `/cdn/:domain/:cdnPath`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: &'static str,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &'static str) -> Self {
        let segments = split_segments(raw)
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { raw, segments }
    }

    pub const fn as_str(&self) -> &'static str {
        self.raw
    }

    /// Match a request path, returning the captured parameters
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let mut params = PathParams::default();
        let mut parts = split_segments(path);

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(lit) => {
                    if part != lit {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let decoded = urlencoding::decode(part).ok()?;
                    params.values.push((name.clone(), decoded.into_owned()));
                }
            }
        }

        // Extra trailing segments mean a different resource
        if parts.next().is_some() {
            return None;
        }

        Some(params)
    }
}

/// `/` is zero segments, `/a/b/` is `["a", "b", ""]`
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}

/// Parameters captured from the path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: Vec<(String, String)>,
}

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
