use std::collections::HashMap;

#[derive(Debug)]
pub enum TemplateError {
    /// Malformed braces or placeholder, with the byte offset it was found at.
    Syntax { offset: usize, message: String },
    /// The template references a placeholder that was never given a value.
    MissingValue(String),
    /// The template does not reference a placeholder it is required to have.
    MissingPlaceholder(String),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::Syntax { offset, message } => {
                write!(f, "Template syntax error at byte {}: {}", offset, message)
            }
            TemplateError::MissingValue(name) => {
                write!(f, "Template error: no value for placeholder {{{}}}", name)
            }
            TemplateError::MissingPlaceholder(name) => {
                write!(f, "Template error: placeholder {{{}}} is missing", name)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Values substituted into a [`Template`].
#[derive(Debug, Default)]
pub struct Context<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> Context<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_context(&mut self, key: &'a str, value: &'a str) {
        self.values.insert(key, value);
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.values.get(key).copied()
    }
}

/// A text template with `{name}` placeholders.
///
/// `{{` and `}}` stand for literal braces. Nothing else is interpreted and
/// substituted values are inserted as-is, without escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(TemplateError::Syntax {
                        offset,
                        message: "single '}' encountered".to_string(),
                    });
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Syntax {
                            offset,
                            message: "unclosed '{'".to_string(),
                        });
                    }
                    if !is_identifier(&name) {
                        return Err(TemplateError::Syntax {
                            offset,
                            message: format!("invalid placeholder {{{}}}", name),
                        });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name));
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Names of the placeholders, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fail unless every name in `required` appears at least once.
    pub fn require(&self, required: &[&str]) -> Result<(), TemplateError> {
        for name in required {
            if !self.placeholders().any(|p| p == *name) {
                return Err(TemplateError::MissingPlaceholder(name.to_string()));
            }
        }
        Ok(())
    }

    pub fn render(&self, context: &Context) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = context
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingValue(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
