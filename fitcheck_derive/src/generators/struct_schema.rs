use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, Fields, Ident, Type};

use crate::container_attrs::ContainerAttributes;
use crate::parsers::field_parser::{FieldAttributes, parse_field_attributes};
use crate::type_utils::{
    TypeCategory, apply_rename_all, get_array_inner_type, get_option_inner_type,
    get_type_category, is_option_type,
};

/// Schema expression for a single (non-optional) Rust type
fn type_schema(ty: &Type) -> TokenStream {
    let category = get_type_category(ty);
    match category {
        TypeCategory::Array => {
            let items = match get_array_inner_type(ty) {
                Some(inner) => type_schema(inner),
                None => quote! { ::serde_json::json!({}) },
            };
            quote! {
                ::serde_json::json!({ "type": "array", "items": #items })
            }
        }
        TypeCategory::Object => quote! {
            <#ty as ::fitcheck::schema::SchemaType>::schema().to_json().clone()
        },
        primitive => {
            let schema_type = primitive.as_schema_type();
            quote! { ::serde_json::json!({ "type": #schema_type }) }
        }
    }
}

fn keyword_setters(
    attrs: &FieldAttributes,
    category: TypeCategory,
) -> syn::Result<Vec<TokenStream>> {
    let mut setters = Vec::new();

    if let Some(desc) = &attrs.description {
        setters.push(quote! {
            props.insert("description".to_string(), ::serde_json::Value::String(#desc.to_string()));
        });
    }

    for (keyword, bound) in [("minimum", &attrs.minimum), ("maximum", &attrs.maximum)] {
        let Some(bound) = bound else { continue };
        if !matches!(category, TypeCategory::Integer | TypeCategory::Number) {
            return Err(syn::Error::new_spanned(
                bound,
                format!("`{keyword}` is only supported on numeric fields"),
            ));
        }
        setters.push(quote! {
            props.insert(#keyword.to_string(), ::serde_json::json!(#bound));
        });
    }

    if let Some(example) = &attrs.example {
        setters.push(quote! {
            props.insert("example".to_string(), ::serde_json::json!(#example));
        });
    }

    Ok(setters)
}

/// Generate the schema implementation for a struct
pub fn generate_struct_schema(
    name: &Ident,
    data_struct: &DataStruct,
    container_attrs: &ContainerAttributes,
) -> syn::Result<TokenStream> {
    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new_spanned(
            name,
            "ModelOutput can only be derived for structs with named fields",
        ));
    };

    let mut property_blocks = Vec::new();

    for field in &fields.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attributes(field)?;

        let original_field_name = ident.to_string();
        let field_name = match (&attrs.serde_rename, &container_attrs.serde_rename_all) {
            (Some(renamed), _) => renamed.clone(),
            (None, Some(rule)) => apply_rename_all(&original_field_name, rule),
            (None, None) => original_field_name,
        };

        let is_optional = is_option_type(&field.ty);
        let base_type = get_option_inner_type(&field.ty);
        let category = get_type_category(base_type);

        let schema_expr = type_schema(base_type);
        let setters = keyword_setters(&attrs, category)?;
        let required = !is_optional;

        let property = if setters.is_empty() {
            quote! { let property: ::serde_json::Value = #schema_expr; }
        } else {
            quote! {
                let mut property: ::serde_json::Value = #schema_expr;
                if let ::serde_json::Value::Object(props) = &mut property {
                    #(#setters)*
                }
            }
        };

        property_blocks.push(quote! {
            {
                #property
                builder = builder.property(#field_name, property, #required);
            }
        });
    }

    let description_setter = container_attrs.description.as_ref().map(|desc| {
        quote! {
            builder = builder.description(#desc);
        }
    });

    let schema_name = container_attrs
        .name
        .clone()
        .unwrap_or_else(|| name.to_string());

    Ok(quote! {
        impl ::fitcheck::schema::SchemaType for #name {
            fn schema() -> ::fitcheck::schema::Schema {
                #[allow(unused_mut)]
                let mut builder = ::fitcheck::schema::SchemaBuilder::object()
                    .title(stringify!(#name));
                #description_setter

                #(#property_blocks)*

                builder.build()
            }

            fn schema_name() -> Option<String> {
                Some(#schema_name.to_string())
            }
        }
    })
}
