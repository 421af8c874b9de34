use syn::{Expr, Field, LitStr};

/// Represents parsed field attributes
#[derive(Default)]
pub struct FieldAttributes {
    pub description: Option<String>,
    pub minimum: Option<Expr>,
    pub maximum: Option<Expr>,
    pub example: Option<Expr>,
    /// Field rename from #[serde(rename = "...")]
    pub serde_rename: Option<String>,
}

/// Parse a single field's llm and serde attributes
pub fn parse_field_attributes(field: &Field) -> syn::Result<FieldAttributes> {
    let mut attrs = FieldAttributes::default();

    for attr in &field.attrs {
        if attr.path().is_ident("serde") {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let content: LitStr = meta.value()?.parse()?;
                    attrs.serde_rename = Some(content.value());
                } else if meta.input.peek(syn::Token![=]) {
                    let _: Expr = meta.value()?.parse()?;
                }
                Ok(())
            });
        }

        if attr.path().is_ident("llm") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("description") {
                    let content: LitStr = meta.value()?.parse()?;
                    attrs.description = Some(content.value());
                } else if meta.path.is_ident("minimum") {
                    attrs.minimum = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("maximum") {
                    attrs.maximum = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("example") {
                    attrs.example = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error("unsupported llm field attribute"));
                }
                Ok(())
            })?;
        }
    }

    Ok(attrs)
}
