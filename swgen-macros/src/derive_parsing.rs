use syn::spanned::Spanned;

use crate::serde_attrs::{extract_doc_comment, extract_serde_attrs, rename_with, strip_raw_prefix};

/// Parsed representation of a `#[derive(Reflect)]` item.
pub struct ReflectDef {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    /// Definition name. Empty for `#[swgen(inline)]` types.
    pub name: String,
    pub shape: Shape,
}

pub enum Shape {
    /// `#[swgen(definition = path)]`: schema supplied by a function.
    Custom(syn::Path),
    /// Described fields and the number of private ones left out.
    Struct(Vec<ReflectField>, usize),
    /// Single-field tuple struct described as its inner type.
    Newtype(syn::Type),
    /// Unit-only enum. `(wire value, variant name)` pairs.
    Enum(Vec<(String, String)>),
}

pub struct ReflectField {
    pub member: syn::Ident,
    pub ident: String,
    pub ty: syn::Type,
    pub embedded: bool,
    pub tags: Vec<(String, String)>,
}

#[derive(Default)]
struct ContainerAttrs {
    name: Option<String>,
    inline: bool,
    definition: Option<syn::Path>,
}

fn parse_container_attrs(attrs: &[syn::Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("swgen")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                out.name = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("inline") {
                out.inline = true;
                Ok(())
            } else if meta.path.is_ident("definition") {
                out.definition = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error(
                    "unknown attribute in #[swgen(...)]: expected `name`, `inline` or `definition`",
                ))
            }
        })?;
    }
    Ok(out)
}

#[derive(Default)]
struct FieldAttrs {
    tags: Vec<(String, String)>,
    flatten: bool,
    skip: bool,
    rename: Option<String>,
}

/// Render a tag value literal as the string the tag interpreter parses.
fn tag_value(expr: &syn::Expr) -> syn::Result<String> {
    match expr {
        syn::Expr::Lit(syn::ExprLit { lit, .. }) => match lit {
            syn::Lit::Str(s) => Ok(s.value()),
            syn::Lit::Int(i) => Ok(i.base10_digits().to_string()),
            syn::Lit::Float(f) => Ok(f.base10_digits().to_string()),
            syn::Lit::Bool(b) => Ok(b.value.to_string()),
            other => Err(syn::Error::new_spanned(
                other,
                "tag values must be string, integer, float or bool literals",
            )),
        },
        syn::Expr::Unary(syn::ExprUnary {
            op: syn::UnOp::Neg(_),
            expr,
            ..
        }) => Ok(format!("-{}", tag_value(expr)?)),
        other => Err(syn::Error::new_spanned(
            other,
            "tag values must be string, integer, float or bool literals",
        )),
    }
}

fn parse_field_attrs(attrs: &[syn::Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("swgen")) {
        attr.parse_nested_meta(|meta| {
            let Some(ident) = meta.path.get_ident() else {
                return Err(meta.error("expected a tag name"));
            };
            let key = strip_raw_prefix(&ident.to_string()).to_string();
            if !meta.input.peek(syn::Token![=]) {
                return match key.as_str() {
                    "flatten" => {
                        out.flatten = true;
                        Ok(())
                    }
                    "skip" => {
                        out.skip = true;
                        Ok(())
                    }
                    _ => Err(meta.error(format!("expected `{key} = <literal>`"))),
                };
            }
            let value = tag_value(&meta.value()?.parse()?)?;
            if key == "rename" {
                out.rename = Some(value);
            } else {
                out.tags.push((key, value));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

fn has_tag(tags: &[(String, String)], key: &str) -> bool {
    tags.iter().any(|(k, _)| k == key)
}

pub fn parse(input: syn::DeriveInput) -> syn::Result<ReflectDef> {
    let container = parse_container_attrs(&input.attrs)?;
    let serde = extract_serde_attrs(&input.attrs);
    let ident = input.ident;

    let name = if container.inline {
        String::new()
    } else {
        container
            .name
            .or(serde.rename)
            .unwrap_or_else(|| strip_raw_prefix(&ident.to_string()).to_string())
    };

    let shape = if let Some(path) = container.definition {
        Shape::Custom(path)
    } else {
        match input.data {
            syn::Data::Struct(data) => match data.fields {
                syn::Fields::Named(named) => {
                    let (fields, hidden) =
                        parse_fields(named.named.into_iter().collect(), serde.rename_all.as_deref())?;
                    Shape::Struct(fields, hidden)
                }
                syn::Fields::Unit => Shape::Struct(Vec::new(), 0),
                syn::Fields::Unnamed(unnamed) => {
                    if unnamed.unnamed.len() != 1 {
                        return Err(syn::Error::new(
                            unnamed.span(),
                            "#[derive(Reflect)] on a tuple struct needs exactly one field",
                        ));
                    }
                    let field = unnamed.unnamed.into_iter().next().map(|f| f.ty);
                    match field {
                        Some(ty) => Shape::Newtype(ty),
                        None => Shape::Struct(Vec::new(), 0),
                    }
                }
            },
            syn::Data::Enum(data) => {
                let mut variants = Vec::new();
                for variant in data.variants {
                    if !matches!(variant.fields, syn::Fields::Unit) {
                        return Err(syn::Error::new_spanned(
                            &variant.ident,
                            "#[derive(Reflect)] only supports enums with unit variants",
                        ));
                    }
                    let attrs = parse_field_attrs(&variant.attrs)?;
                    let variant_serde = extract_serde_attrs(&variant.attrs);
                    if attrs.skip || variant_serde.skip {
                        continue;
                    }
                    let variant_name = variant.ident.to_string();
                    let value = attrs
                        .rename
                        .or(variant_serde.rename)
                        .unwrap_or_else(|| rename_with(&variant_name, serde.rename_all.as_deref()));
                    variants.push((value, variant_name));
                }
                Shape::Enum(variants)
            }
            syn::Data::Union(_) => {
                return Err(syn::Error::new(
                    ident.span(),
                    "#[derive(Reflect)] only works on structs and enums",
                ))
            }
        }
    };

    Ok(ReflectDef {
        ident,
        generics: input.generics,
        name,
        shape,
    })
}

/// Public fields to describe, and how many private ones were left out.
fn parse_fields(
    fields: Vec<syn::Field>,
    rename_all: Option<&str>,
) -> syn::Result<(Vec<ReflectField>, usize)> {
    let mut parsed = Vec::new();
    let mut hidden = 0;
    for field in fields {
        let Some(member) = field.ident.clone() else {
            continue;
        };
        // Private fields never reach the schema.
        if !matches!(field.vis, syn::Visibility::Public(_)) {
            hidden += 1;
            continue;
        }
        let attrs = parse_field_attrs(&field.attrs)?;
        let serde = extract_serde_attrs(&field.attrs);
        if attrs.skip || serde.skip {
            continue;
        }

        let ident = strip_raw_prefix(&member.to_string()).to_string();
        let embedded = attrs.flatten || serde.flatten;
        let mut tags = attrs.tags;

        if !has_tag(&tags, "json") && !embedded {
            let json = attrs
                .rename
                .or(serde.rename)
                .unwrap_or_else(|| rename_with(&ident, rename_all));
            tags.insert(0, ("json".to_string(), json));
        }
        if !has_tag(&tags, "description") {
            if let Some(doc) = extract_doc_comment(&field.attrs) {
                tags.push(("description".to_string(), doc));
            }
        }

        parsed.push(ReflectField {
            member,
            ident,
            ty: field.ty,
            embedded,
            tags,
        });
    }
    Ok((parsed, hidden))
}
