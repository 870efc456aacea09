//! Identifier casing.
//!
//! Template data usually carries one human-supplied name that has to appear
//! in several spellings across generated files. These functions derive each
//! spelling from any input style.
//!
//! | Input            | snake              | kebab              | camel            | pascal           |
//! |------------------|--------------------|--------------------|------------------|------------------|
//! | `my awesome app` | `my_awesome_app`   | `my-awesome-app`   | `myAwesomeApp`   | `MyAwesomeApp`   |
//! | `HTTPRequest`    | `http_request`     | `http-request`     | `httpRequest`    | `HttpRequest`    |

/// `my_app`
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// `my-app`
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// `MY_APP`
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// `MyApp`
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// `myApp`
pub fn to_camel_case(s: &str) -> String {
    let mut words = split_words(s).into_iter();
    let Some(first) = words.next() else {
        return String::new();
    };
    words.fold(first, |mut acc, w| {
        acc.push_str(&capitalize(&w));
        acc
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split on separators (`_`, `-`, `.`, whitespace), on lower-to-upper
/// transitions, and before the last capital of an acronym run
/// (`HTTPServer` -> `http`, `server`). Words are lowercased.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        current.push(c);

        let Some(&next) = chars.peek() else {
            continue;
        };

        let camel_boundary = (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase();
        let acronym_boundary = c.is_uppercase()
            && next.is_uppercase()
            && chars.clone().nth(1).is_some_and(char::is_lowercase);

        if camel_boundary || acronym_boundary {
            words.push(current.to_lowercase());
            current.clear();
        }
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
