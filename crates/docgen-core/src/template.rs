//! Prompt template builder.
//!
//! Templates use `{name}` placeholders that are filled from the fields of a
//! [`Request`]. Literal braces are written `{{` and `}}`. Substituted values
//! are inserted verbatim and never re-scanned, so pasted code may contain
//! braces freely.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SubstitutionError;
use crate::message::{Message, Role, StructuredPrompt};
use crate::request::Request;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}|\{|\}").expect("valid token regex")
});

pub const DOCUMENTATION_SYSTEM_PROMPT: &str = "You are a helpful AI assistant";

pub const DOCUMENTATION_USER_PROMPT: &str = "\
You are a staff software engineer with expertise in Python and always aim to write simple and precise code documentation.
Your code documentation is easy to understand and appreciated by other software engineers.
You will be provided with a function definition below and you have to write the documentation for it.

```python
{input}
```
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub role: Role,
    pub template: String,
}

impl MessageTemplate {
    pub fn new(role: Role, template: impl Into<String>) -> Self {
        Self {
            role,
            template: template.into(),
        }
    }
}

/// An ordered list of role-tagged message templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    messages: Vec<MessageTemplate>,
}

impl PromptTemplate {
    pub fn new(messages: Vec<MessageTemplate>) -> Self {
        Self { messages }
    }

    /// The fixed two-role documentation prompt: a system persona followed by
    /// the instruction with the pasted function embedded.
    pub fn documentation() -> Self {
        Self::new(vec![
            MessageTemplate::new(Role::System, DOCUMENTATION_SYSTEM_PROMPT),
            MessageTemplate::new(Role::User, DOCUMENTATION_USER_PROMPT),
        ])
    }

    pub fn messages(&self) -> &[MessageTemplate] {
        &self.messages
    }

    /// Render every message against `request`, preserving order.
    pub fn render(&self, request: &Request) -> Result<StructuredPrompt, SubstitutionError> {
        let messages = self
            .messages
            .iter()
            .map(|m| {
                Ok(Message {
                    role: m.role,
                    content: render_str(&m.template, request)?,
                })
            })
            .collect::<Result<Vec<_>, SubstitutionError>>()?;

        Ok(StructuredPrompt::new(messages))
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::documentation()
    }
}

/// Substitute `{name}` placeholders in `template` with fields from `request`.
pub fn render_str(template: &str, request: &Request) -> Result<String, SubstitutionError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in TOKEN_RE.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);

        match (whole.as_str(), caps.get(1)) {
            ("{{", _) => out.push('{'),
            ("}}", _) => out.push('}'),
            (_, Some(key)) => {
                let value = request
                    .get(key.as_str())
                    .ok_or_else(|| SubstitutionError::MissingKey(key.as_str().to_string()))?;
                out.push_str(value);
            }
            (stray, None) => {
                return Err(SubstitutionError::Malformed {
                    position: whole.start(),
                    reason: format!("unmatched '{}'", stray),
                });
            }
        }

        last = whole.end();
    }

    out.push_str(&template[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documentation_prompt_has_system_then_user() {
        let prompt = PromptTemplate::documentation()
            .render(&Request::new("def f(x): return x+1"))
            .unwrap();

        assert_eq!(prompt.len(), 2);
        assert_eq!(prompt.messages()[0].role, Role::System);
        assert_eq!(prompt.messages()[0].content, DOCUMENTATION_SYSTEM_PROMPT);
        assert_eq!(prompt.messages()[1].role, Role::User);
    }

    #[test]
    fn user_entry_embeds_input_verbatim() {
        let prompt = PromptTemplate::documentation()
            .render(&Request::new("def f(x): return x+1"))
            .unwrap();

        assert!(prompt.messages()[1]
            .content
            .contains("def f(x): return x+1"));
    }

    #[test]
    fn braces_in_input_are_not_rescanned() {
        let request = Request::new("fn main() { println!(\"{input}\"); }");
        let rendered = render_str("code: {input}", &request).unwrap();
        assert_eq!(rendered, "code: fn main() { println!(\"{input}\"); }");
    }

    #[test]
    fn missing_key_is_substitution_error() {
        let request = Request::default().with_field("code", "x");
        let err = PromptTemplate::documentation().render(&request).unwrap_err();
        assert_eq!(err, SubstitutionError::MissingKey("input".to_string()));
    }

    #[test]
    fn escaped_braces_render_literally() {
        let rendered = render_str("{{literal}} {input}", &Request::new("x")).unwrap();
        assert_eq!(rendered, "{literal} x");
    }

    #[test]
    fn stray_brace_is_malformed() {
        let err = render_str("oops { here", &Request::new("x")).unwrap_err();
        assert!(matches!(err, SubstitutionError::Malformed { position: 5, .. }));
    }

    #[test]
    fn empty_input_renders() {
        let prompt = PromptTemplate::documentation()
            .render(&Request::new(""))
            .unwrap();
        assert!(prompt.messages()[1].content.contains("```python\n\n```"));
    }
}
