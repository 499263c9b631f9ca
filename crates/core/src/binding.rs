//! Parsing of `{%...%}` binding placeholders.
//!
//! A placeholder's content is
//!
//! ```text
//! content    := ["?"] [flagPrefix] (valueList | pathSpec | flag)
//! flagPrefix := ("-" | "--") identifier ":"
//! valueList  := "[" item ("," item)* "]"      ; "..." allows custom input
//! pathSpec   := path [":" globFilter]
//! ```
//!
//! Every parsed [`Binding`] keeps the exact placeholder text and its byte
//! span in the command, so two identical placeholders stay independent.

use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::ops::Range;
use std::path::{Component, Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

const OPEN: &str = "{%";
const CLOSE: &str = "%}";

/// Item in a value list that enables custom input.
pub const CUSTOM_MARKER: &str = "...";

lazy_static! {
    static ref FLAG_PREFIX: Regex =
        Regex::new(r"^(-{1,2}[\w-]+):\s*").expect("valid flag prefix regex");
    pub(crate) static ref FLAG_TOKEN: Regex =
        Regex::new(r"^-{1,2}[\w-]+$").expect("valid flag token regex");
}

/// A dynamic placeholder found in a command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The original `{%...%}` text.
    pub placeholder: String,
    /// Byte range of the placeholder in the command it was parsed from.
    pub span: Range<usize>,
    /// Set by a leading `?`; the binding may be skipped at run time.
    pub optional: bool,
    pub kind: BindingKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    /// Pick a file below `path`, optionally filtered by a glob on the file name.
    Directory {
        path: PathBuf,
        filter: Option<String>,
        flag: Option<String>,
    },
    /// Pick one of `values`, or type a value when `allow_custom` is set.
    ValueList {
        values: Vec<String>,
        allow_custom: bool,
        flag: Option<String>,
    },
    /// Include or leave out a bare flag.
    BooleanFlag { flag: String },
}

impl Binding {
    /// Builds a binding together with its canonical placeholder text.
    ///
    /// The span covers the whole placeholder, so `parse(&b.placeholder)`
    /// returns exactly `[b]`.
    #[must_use]
    pub fn new(optional: bool, kind: BindingKind) -> Self {
        let placeholder = render(optional, &kind);
        Self {
            span: 0..placeholder.len(),
            placeholder,
            optional,
            kind,
        }
    }

    /// The flag this binding is attached to, if any.
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        match &self.kind {
            BindingKind::Directory { flag, .. } | BindingKind::ValueList { flag, .. } => {
                flag.as_deref()
            }
            BindingKind::BooleanFlag { flag } => Some(flag),
        }
    }
}

impl Display for Binding {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.placeholder)
    }
}

fn render(optional: bool, kind: &BindingKind) -> String {
    let mut body = String::new();
    if optional {
        body.push('?');
    }

    match kind {
        BindingKind::Directory { path, filter, flag } => {
            push_flag_prefix(&mut body, flag.as_deref());
            body.push_str(&path.display().to_string());
            if let Some(filter) = filter {
                body.push(':');
                body.push_str(filter);
            }
        }
        BindingKind::ValueList {
            values,
            allow_custom,
            flag,
        } => {
            push_flag_prefix(&mut body, flag.as_deref());
            let mut items: Vec<&str> = values.iter().map(String::as_str).collect();
            if *allow_custom {
                items.push(CUSTOM_MARKER);
            }
            body.push('[');
            body.push_str(&items.join(","));
            body.push(']');
        }
        BindingKind::BooleanFlag { flag } => body.push_str(flag),
    }

    format!("{OPEN}{body}{CLOSE}")
}

fn push_flag_prefix(body: &mut String, flag: Option<&str>) {
    if let Some(flag) = flag {
        body.push_str(flag);
        body.push(':');
    }
}

/// Finds every placeholder, returning its span and inner content.
///
/// Content must be at least one character and may not span lines. An
/// opening `{%` without a closing `%}` is plain text.
fn placeholders(command: &str) -> Vec<(Range<usize>, &str)> {
    let mut found = Vec::new();
    let mut from = 0;

    while let Some(offset) = command[from..].find(OPEN) {
        let start = from + offset;
        let body_start = start + OPEN.len();
        let Some(first) = command[body_start..].chars().next() else {
            break;
        };
        let search_from = body_start + first.len_utf8();

        let Some(close) = command[search_from..].find(CLOSE) else {
            break;
        };
        let end = search_from + close;
        let content = &command[body_start..end];

        if content.contains('\n') {
            from = start + 1;
            continue;
        }

        found.push((start..end + CLOSE.len(), content));
        from = end + CLOSE.len();
    }

    found
}

/// True when `token` can be used as a flag prefix or a boolean-flag binding,
/// e.g. `--epochs` or `-v`.
#[must_use]
pub fn is_flag_token(token: &str) -> bool {
    FLAG_TOKEN.is_match(token)
}

/// True when the command contains at least one placeholder.
#[must_use]
pub fn has_bindings(command: &str) -> bool {
    !placeholders(command).is_empty()
}

/// Parses every placeholder in `command`, in order of appearance.
///
/// A command without placeholders yields an empty list.
///
/// # Errors
///
/// Returns a syntax error naming the offending placeholder when one is
/// empty, has an empty or malformed value list, or has no recognizable shape.
pub fn parse(command: &str) -> Result<Vec<Binding>> {
    placeholders(command)
        .into_iter()
        .map(|(span, content)| {
            let placeholder = &command[span.clone()];
            parse_content(content, placeholder, span)
        })
        .collect()
}

fn parse_content(content: &str, placeholder: &str, span: Range<usize>) -> Result<Binding> {
    let mut content = content.trim();
    if content.is_empty() {
        return Err(Error::EmptyBinding(placeholder.to_string()));
    }

    let optional = if let Some(rest) = content.strip_prefix('?') {
        content = rest.trim();
        if content.is_empty() {
            return Err(Error::EmptyBinding(placeholder.to_string()));
        }
        true
    } else {
        false
    };

    let mut flag = None;
    if let Some(captures) = FLAG_PREFIX.captures(content) {
        flag = Some(captures[1].to_string());
        content = content[captures[0].len()..].trim();
        if content.is_empty() {
            return Err(Error::EmptyBinding(placeholder.to_string()));
        }
    }

    let kind = if flag.is_none() && FLAG_TOKEN.is_match(content) {
        BindingKind::BooleanFlag {
            flag: content.to_string(),
        }
    } else if content.len() >= 2 && content.starts_with('[') && content.ends_with(']') {
        parse_values(&content[1..content.len() - 1], placeholder, flag)?
    } else if content.starts_with('[') || content.ends_with(']') || content.starts_with('-') {
        return Err(Error::UnrecognizedBinding(placeholder.to_string()));
    } else {
        parse_path(content, flag)
    };

    Ok(Binding {
        placeholder: placeholder.to_string(),
        span,
        optional,
        kind,
    })
}

fn parse_values(inner: &str, placeholder: &str, flag: Option<String>) -> Result<BindingKind> {
    if inner.is_empty() {
        return Err(Error::EmptyValueList(placeholder.to_string()));
    }

    let mut values: Vec<String> = Vec::new();
    let mut allow_custom = false;

    for item in inner.split(',').map(str::trim) {
        if item == CUSTOM_MARKER {
            allow_custom = true;
        } else if item.is_empty() {
            return Err(Error::EmptyValue(placeholder.to_string()));
        } else if values.iter().any(|v| v == item) {
            return Err(Error::DuplicateValue {
                placeholder: placeholder.to_string(),
                value: item.to_string(),
            });
        } else {
            values.push(item.to_string());
        }
    }

    if values.is_empty() && !allow_custom {
        return Err(Error::EmptyValueList(placeholder.to_string()));
    }

    Ok(BindingKind::ValueList {
        values,
        allow_custom,
        flag,
    })
}

fn parse_path(content: &str, flag: Option<String>) -> BindingKind {
    // A colon at index 1 belongs to a drive letter, not a filter.
    let (path, filter) = match content.rfind(':') {
        Some(i) if i > 1 => (&content[..i], Some(&content[i + 1..])),
        _ => (content, None),
    };

    BindingKind::Directory {
        path: expand_path(path.trim()),
        filter: filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(ToString::to_string),
        flag,
    }
}

/// Expands `~` and makes `raw` absolute against the working directory.
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).as_ref());
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    };

    normalize(&absolute)
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Advisory checks for a binding. Warnings never block storing a command.
#[must_use]
pub fn validate(binding: &Binding) -> Vec<String> {
    let mut warnings = Vec::new();

    if let BindingKind::Directory { path, .. } = &binding.kind {
        let shown = path.display();
        match fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warnings.push(format!("directory '{shown}' does not exist"));
            }
            Err(e) => warnings.push(format!("cannot access '{shown}': {e}")),
            Ok(metadata) if !metadata.is_dir() => {
                warnings.push(format!("'{shown}' is not a directory"));
            }
            Ok(_) => {}
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(command: &str) -> Binding {
        let mut bindings = parse(command).unwrap();
        assert_eq!(bindings.len(), 1, "expected one binding in {command}");
        bindings.remove(0)
    }

    fn values(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_no_placeholders_yields_empty() {
        for command in [
            "",
            "git status",
            "echo {% unterminated",
            "echo %} {%%}",
            "printf '{%\n%}'",
        ] {
            assert!(parse(command).unwrap().is_empty(), "{command}");
            assert!(!has_bindings(command));
        }
    }

    #[test]
    fn test_value_list_with_custom() {
        let binding = parse_one("{%[10,50,100,...]%}");

        assert_eq!(
            binding.kind,
            BindingKind::ValueList {
                values: values(&["10", "50", "100"]),
                allow_custom: true,
                flag: None,
            }
        );
        assert!(!binding.optional);
    }

    #[test]
    fn test_optional_flagged_value_list() {
        let binding = parse_one("{%?--debug:[True,False]%}");

        assert!(binding.optional);
        assert_eq!(binding.flag(), Some("--debug"));
        assert_eq!(
            binding.kind,
            BindingKind::ValueList {
                values: values(&["True", "False"]),
                allow_custom: false,
                flag: Some("--debug".to_string()),
            }
        );
    }

    #[test]
    fn test_custom_only_list_starts_empty() {
        let binding = parse_one("{% -m: [...] %}");

        assert_eq!(
            binding.kind,
            BindingKind::ValueList {
                values: vec![],
                allow_custom: true,
                flag: Some("-m".to_string()),
            }
        );
    }

    #[test]
    fn test_value_list_errors() {
        assert!(matches!(parse("{%[]%}"), Err(Error::EmptyValueList(p)) if p == "{%[]%}"));
        assert!(matches!(parse("{%[ ,x]%}"), Err(Error::EmptyValue(p)) if p == "{%[ ,x]%}"));
        assert!(matches!(parse("{%[a,,b]%}"), Err(Error::EmptyValue(_))));
        assert!(matches!(
            parse("{%[a,b,a]%}"),
            Err(Error::DuplicateValue { value, .. }) if value == "a"
        ));
    }

    #[test]
    fn test_empty_content_errors() {
        for placeholder in ["{% %}", "{%?%}", "{% ? %}", "{%--flag:%}"] {
            let result = parse(&format!("run {placeholder}"));
            assert!(
                matches!(&result, Err(Error::EmptyBinding(p)) if p == placeholder),
                "{placeholder}: {result:?}"
            );
        }
    }

    #[test]
    fn test_unrecognized_shapes() {
        for placeholder in ["{%[a,b%}", "{%a,b]%}", "{%-%}", "{%--a:--b%}"] {
            let result = parse(placeholder);
            assert!(
                matches!(&result, Err(Error::UnrecognizedBinding(p)) if p == placeholder),
                "{placeholder}: {result:?}"
            );
            assert!(result.unwrap_err().is_binding_syntax());
        }
    }

    #[test]
    fn test_directory_with_filter() {
        let binding = parse_one("python train.py --config {%/configs:*.yaml%}");

        assert_eq!(
            binding.kind,
            BindingKind::Directory {
                path: PathBuf::from("/configs"),
                filter: Some("*.yaml".to_string()),
                flag: None,
            }
        );
        assert_eq!(binding.placeholder, "{%/configs:*.yaml%}");
        assert_eq!(binding.span, 25..44);
    }

    #[test]
    fn test_directory_with_flag_prefix() {
        let binding = parse_one("{%?--config:/etc/app:*.toml%}");

        assert!(binding.optional);
        assert_eq!(
            binding.kind,
            BindingKind::Directory {
                path: PathBuf::from("/etc/app"),
                filter: Some("*.toml".to_string()),
                flag: Some("--config".to_string()),
            }
        );
    }

    #[test]
    fn test_directory_relative_and_tilde_paths_are_absolute() {
        let relative = parse_one("{%configs/../data:*.csv%}");
        let cwd = std::env::current_dir().unwrap();
        match relative.kind {
            BindingKind::Directory { path, filter, .. } => {
                assert_eq!(path, cwd.join("data"));
                assert_eq!(filter.as_deref(), Some("*.csv"));
            }
            other => panic!("expected directory binding, got {other:?}"),
        }

        let home = parse_one("{%~/projects%}");
        match home.kind {
            BindingKind::Directory { path, filter, .. } => {
                assert!(path.is_absolute());
                assert!(path.ends_with("projects"));
                assert!(filter.is_none());
            }
            other => panic!("expected directory binding, got {other:?}"),
        }
    }

    #[test]
    fn test_drive_letter_colon_is_not_a_filter() {
        let binding = parse_one("{%C:data%}");
        match binding.kind {
            BindingKind::Directory { path, filter, .. } => {
                assert!(filter.is_none());
                assert!(path.ends_with("C:data"));
            }
            other => panic!("expected directory binding, got {other:?}"),
        }
    }

    #[test]
    fn test_is_flag_token() {
        assert!(is_flag_token("--dry-run"));
        assert!(is_flag_token("-v"));
        assert!(!is_flag_token("--level=3"));
        assert!(!is_flag_token("-"));
        assert!(!is_flag_token("value"));
    }

    #[test]
    fn test_boolean_flag() {
        let binding = parse_one("ls {%?--all%}");

        assert!(binding.optional);
        assert_eq!(
            binding.kind,
            BindingKind::BooleanFlag {
                flag: "--all".to_string()
            }
        );
        assert_eq!(binding.flag(), Some("--all"));
    }

    #[test]
    fn test_multiple_bindings_keep_order_and_spans() {
        let command = "echo {%[a,b]%} and {%[a,b]%}";
        let bindings = parse(command).unwrap();

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].placeholder, bindings[1].placeholder);
        assert_ne!(bindings[0].span, bindings[1].span);
        for binding in &bindings {
            assert_eq!(&command[binding.span.clone()], binding.placeholder);
        }
    }

    #[test]
    fn test_new_renders_parseable_placeholder() {
        let kinds = vec![
            (true, BindingKind::BooleanFlag { flag: "--verbose".to_string() }),
            (
                false,
                BindingKind::ValueList {
                    values: values(&["True", "False"]),
                    allow_custom: false,
                    flag: Some("--debug".to_string()),
                },
            ),
            (
                true,
                BindingKind::ValueList {
                    values: values(&["dev", "prod"]),
                    allow_custom: true,
                    flag: Some("-e".to_string()),
                },
            ),
            (
                false,
                BindingKind::Directory {
                    path: PathBuf::from("/configs"),
                    filter: Some("*.yaml".to_string()),
                    flag: Some("--config".to_string()),
                },
            ),
            (
                true,
                BindingKind::Directory {
                    path: PathBuf::from("/data"),
                    filter: None,
                    flag: None,
                },
            ),
        ];

        for (optional, kind) in kinds {
            let binding = Binding::new(optional, kind);
            assert_eq!(parse_one(&binding.placeholder), binding);
        }
    }

    #[test]
    fn test_render_value_list_text() {
        let binding = Binding::new(
            true,
            BindingKind::ValueList {
                values: values(&["10", "50"]),
                allow_custom: true,
                flag: Some("--epochs".to_string()),
            },
        );

        assert_eq!(binding.to_string(), "{%?--epochs:[10,50,...]%}");
    }

    #[test]
    fn test_validate_directory_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let existing = parse_one(&format!("{{%{}%}}", dir.path().display()));
        assert!(validate(&existing).is_empty());

        let missing = parse_one(&format!("{{%{}/nope%}}", dir.path().display()));
        let warnings = validate(&missing);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("does not exist"));

        let not_dir = parse_one(&format!("{{%{}%}}", file.display()));
        assert!(validate(&not_dir)[0].contains("is not a directory"));

        assert!(validate(&parse_one("{%[a]%}")).is_empty());
    }
}
