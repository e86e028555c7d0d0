use proc_macro2::TokenStream;
use quote::quote;

use crate::crate_path::swgen_core_path;
use crate::derive_parsing::{ReflectDef, ReflectField, Shape};

pub fn generate(def: &ReflectDef) -> TokenStream {
    let krate = swgen_core_path();
    let ident = &def.ident;
    let name = &def.name;

    let mut generics = def.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(#krate::Reflect));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &def.shape {
        Shape::Custom(path) => quote! {
            fn type_info() -> #krate::TypeInfo {
                let mut info = #krate::TypeInfo::custom::<Self>(#path());
                info.name = ::std::string::String::from(#name);
                info
            }
        },
        Shape::Newtype(ty) => quote! {
            fn type_info() -> #krate::TypeInfo {
                #krate::TypeInfo::alias(
                    ::std::any::type_name::<Self>(),
                    #name,
                    ::std::module_path!(),
                    <#ty as #krate::Reflect>::type_info(),
                )
            }

            fn value_info(&self) -> #krate::TypeInfo {
                let inner = #krate::Reflect::value_info(&self.0);
                #krate::TypeInfo::alias(
                    ::std::any::type_name::<Self>(),
                    #name,
                    ::std::module_path!(),
                    inner,
                )
            }
        },
        Shape::Enum(variants) => {
            let values = variants.iter().map(|(value, _)| value);
            let names = variants.iter().map(|(_, name)| name);
            quote! {
                fn type_info() -> #krate::TypeInfo {
                    #krate::TypeInfo::enumeration(
                        ::std::any::type_name::<Self>(),
                        #name,
                        ::std::module_path!(),
                        #krate::EnumValues::strings(&[#(#values),*], &[#(#names),*]),
                    )
                }
            }
        }
        Shape::Struct(fields, hidden) => {
            let infos = fields.iter().map(|f| field_info(&krate, f));
            let samples = fields.iter().map(|f| field_sample(&krate, f));
            let hidden = (*hidden > 0).then(|| quote!(.with_hidden_fields(#hidden)));
            quote! {
                fn type_info() -> #krate::TypeInfo {
                    #krate::TypeInfo::structure(
                        ::std::any::type_name::<Self>(),
                        #name,
                        ::std::module_path!(),
                        ::std::vec![#(#infos),*],
                    )
                    #hidden
                }

                fn value_info(&self) -> #krate::TypeInfo {
                    <Self as #krate::Reflect>::type_info().with_samples(::std::vec![#(#samples),*])
                }
            }
        }
    };

    quote! {
        impl #impl_generics #krate::Reflect for #ident #ty_generics #where_clause {
            #body
        }
    }
}

fn field_info(krate: &TokenStream, field: &ReflectField) -> TokenStream {
    let ident = &field.ident;
    let ty = &field.ty;
    let tags = if field.tags.is_empty() {
        quote!(#krate::Tags::new())
    } else {
        let pairs = field.tags.iter().map(|(k, v)| quote!((#k, #v)));
        quote!(#krate::Tags::from_pairs([#(#pairs),*]))
    };
    let embedded = field.embedded.then(|| quote!(.embedded()));
    quote! {
        #krate::FieldInfo::new(#ident, <#ty as #krate::Reflect>::type_info)
            .with_tags(#tags)
            #embedded
    }
}

/// Embedded fields describe their whole value so flattened dynamic fields
/// resolve; other fields only forward a dynamic sample.
fn field_sample(krate: &TokenStream, field: &ReflectField) -> TokenStream {
    let member = &field.member;
    if field.embedded {
        quote!(::std::option::Option::Some(#krate::Reflect::value_info(&self.#member)))
    } else {
        quote!(#krate::Reflect::sample_info(&self.#member))
    }
}
