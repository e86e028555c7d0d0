//! Reading the `#[serde(...)]` and doc attributes that influence schema names.

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// Serde options relevant to a container or a field.
#[derive(Default)]
pub struct SerdeAttrs {
    pub rename: Option<String>,
    pub rename_all: Option<String>,
    pub skip: bool,
    pub flatten: bool,
}

/// Collect serde options. Unknown keys are ignored, as serde itself
/// validates them.
pub fn extract_serde_attrs(attrs: &[Attribute]) -> SerdeAttrs {
    let mut out = SerdeAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        let _ = attr.parse_nested_meta(|meta| {
            let key = meta
                .path
                .get_ident()
                .map(|i| i.to_string())
                .unwrap_or_default();
            match key.as_str() {
                "skip" | "skip_serializing" => out.skip = true,
                "flatten" => out.flatten = true,
                "rename" | "rename_all" => {
                    if meta.input.peek(syn::Token![=]) {
                        let lit: syn::LitStr = meta.value()?.parse()?;
                        if key == "rename" {
                            out.rename = Some(lit.value());
                        } else {
                            out.rename_all = Some(lit.value());
                        }
                    } else {
                        // rename(serialize = "..", deserialize = "..")
                        meta.parse_nested_meta(|inner| {
                            let lit: syn::LitStr = inner.value()?.parse()?;
                            if inner.path.is_ident("serialize") {
                                if key == "rename" {
                                    out.rename = Some(lit.value());
                                } else {
                                    out.rename_all = Some(lit.value());
                                }
                            }
                            Ok(())
                        })?;
                    }
                }
                _ => {
                    if meta.input.peek(syn::Token![=]) {
                        let _: Expr = meta.value()?.parse()?;
                    } else if meta.input.peek(syn::token::Paren) {
                        meta.parse_nested_meta(|inner| {
                            if inner.input.peek(syn::Token![=]) {
                                let _: Expr = inner.value()?.parse()?;
                            }
                            Ok(())
                        })?;
                    }
                }
            }
            Ok(())
        });
    }
    out
}

/// Join `///` lines into a single description.
pub fn extract_doc_comment(attrs: &[Attribute]) -> Option<String> {
    let docs: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if attr.path().is_ident("doc") {
                if let Meta::NameValue(nv) = &attr.meta {
                    if let Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        return Some(s.value().trim().to_string());
                    }
                }
            }
            None
        })
        .filter(|line| !line.is_empty())
        .collect();
    if docs.is_empty() {
        None
    } else {
        Some(docs.join(" "))
    }
}

pub fn strip_raw_prefix(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Split an identifier into lowercase words on `_`, `-` and case changes.
fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = name.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        let boundary = ch.is_uppercase()
            && !current.is_empty()
            && (chars[i - 1].is_lowercase()
                || chars.get(i + 1).is_some_and(|next| next.is_lowercase()));
        if boundary {
            words.push(std::mem::take(&mut current));
        }
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Apply a serde `rename_all` rule to a field or variant name.
pub fn rename_with(name: &str, rule: Option<&str>) -> String {
    let name = strip_raw_prefix(name);
    let Some(rule) = rule else {
        return name.to_string();
    };
    let words = words(name);
    match rule {
        "lowercase" => name.to_lowercase(),
        "UPPERCASE" => name.to_uppercase(),
        "snake_case" => words.join("_"),
        "SCREAMING_SNAKE_CASE" => words.join("_").to_uppercase(),
        "kebab-case" => words.join("-"),
        "SCREAMING-KEBAB-CASE" => words.join("-").to_uppercase(),
        "PascalCase" => words.iter().map(|w| capitalize_first(w)).collect(),
        "camelCase" => words
            .iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { w.clone() } else { capitalize_first(w) })
            .collect(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_rules() {
        assert_eq!(rename_with("user_name", Some("camelCase")), "userName");
        assert_eq!(rename_with("user_name", Some("PascalCase")), "UserName");
        assert_eq!(rename_with("UserName", Some("snake_case")), "user_name");
        assert_eq!(rename_with("HTTPStatus", Some("snake_case")), "http_status");
        assert_eq!(rename_with("user_name", Some("kebab-case")), "user-name");
        assert_eq!(rename_with("Active", Some("lowercase")), "active");
        assert_eq!(
            rename_with("user_name", Some("SCREAMING_SNAKE_CASE")),
            "USER_NAME"
        );
        assert_eq!(rename_with("r#type", None), "type");
    }

    #[test]
    fn serde_options() {
        let field: syn::Field = syn::parse_quote! {
            #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
            pub id: Option<i64>
        };
        let attrs = extract_serde_attrs(&field.attrs);
        assert_eq!(attrs.rename.as_deref(), Some("userId"));
        assert!(!attrs.skip);
    }

    #[test]
    fn doc_lines_are_joined() {
        let field: syn::Field = syn::parse_quote! {
            /// The user id.
            /// Unique per tenant.
            pub id: i64
        };
        assert_eq!(
            extract_doc_comment(&field.attrs).as_deref(),
            Some("The user id. Unique per tenant.")
        );
    }
}
