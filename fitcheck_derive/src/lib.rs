/*!
 Procedural macros for the fitcheck crate.

 `#[derive(ModelOutput)]` implements `fitcheck::schema::SchemaType` for a struct,
 producing the one JSON Schema that both the function-calling parameters and the
 structured-output format instructions are built from.
*/
mod container_attrs;
mod generators;
mod parsers;
mod type_utils;

use proc_macro::TokenStream;
use syn::{Data, DeriveInput, parse_macro_input};

use container_attrs::ContainerAttributes;

/// Derive macro for implementing `SchemaType` (and through the blanket impl, `ModelOutput`).
///
/// # Examples
///
/// ```
/// use fitcheck::ModelOutput;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(ModelOutput, Serialize, Deserialize, Debug)]
/// #[serde(rename_all = "camelCase")]
/// #[llm(name = "rate_outfit", description = "Rate the outfit in the image")]
/// struct OutfitRating {
///     #[llm(description = "Overall score from 0-10", minimum = 0, maximum = 10)]
///     overall_score: f64,
///
///     #[llm(description = "Style keywords", example = "streetwear")]
///     keywords: Vec<String>,
/// }
/// ```
///
/// Supported attributes:
///
/// - container `#[llm(name = "...")]`: schema name, used as the function name
/// - container `#[llm(description = "...")]`
/// - field `#[llm(description = "...")]`
/// - field `#[llm(minimum = N, maximum = N)]` for numeric fields
/// - field `#[llm(example = ...)]`
///
/// `#[serde(rename = "...")]` and container `#[serde(rename_all = "...")]` are honoured
/// so the schema matches the serialized field names.
#[proc_macro_derive(ModelOutput, attributes(llm))]
pub fn derive_model_output(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let container_attrs = match ContainerAttributes::from_attrs(&input.attrs) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };

    match &input.data {
        Data::Struct(data_struct) => {
            generators::generate_struct_schema(name, data_struct, &container_attrs)
                .unwrap_or_else(|err| err.to_compile_error())
                .into()
        }
        _ => syn::Error::new_spanned(name, "ModelOutput can only be derived for structs")
            .to_compile_error()
            .into(),
    }
}
